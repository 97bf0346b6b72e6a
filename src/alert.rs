use std::sync::Arc;

use ratatui::text::Line;

/// Semantic role of an alert action, used for styling and cancel routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonRole {
    /// Ordinary action
    #[default]
    Default,
    /// Dismisses without doing anything; Esc routes here
    Cancel,
    /// Destructive action, styled as such
    Destructive,
}

/// One action in an alert directive.
///
/// Selecting any action dismisses the presentation; the optional message is
/// what the host's update loop receives on top of that.
#[derive(Clone)]
pub struct AlertButton<Msg> {
    pub(crate) label: String,
    pub(crate) role: ButtonRole,
    pub(crate) msg: Option<Msg>,
}

impl<Msg> AlertButton<Msg> {
    /// An ordinary action button.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            role: ButtonRole::Default,
            msg: None,
        }
    }

    /// A cancel button (Esc routes to it).
    pub fn cancel(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            role: ButtonRole::Cancel,
            msg: None,
        }
    }

    /// A destructive action button.
    pub fn destructive(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            role: ButtonRole::Destructive,
            msg: None,
        }
    }

    /// Set the message sent when this action is selected.
    pub fn on_select(mut self, msg: Msg) -> Self {
        self.msg = Some(msg);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn role(&self) -> ButtonRole {
        self.role
    }
}

/// Directive builder for alerts driven by a presented value.
///
/// Title, message, and actions are functions of the value so content follows
/// the state that opened the alert. Use [`Alert::plain`] and the other
/// zero-argument forms when the presented value is `()` (presence-only enum
/// cases).
///
/// # Examples
///
/// ```rust
/// use ratatui::text::Line;
/// use tui_navigation::{Alert, AlertButton};
///
/// #[derive(Clone)]
/// enum Msg { Delete }
///
/// struct Movie { title: String }
///
/// let alert: Alert<Movie, Msg> = Alert::titled(|m: &Movie| m.title.clone())
///     .message(|_| "Delete this movie from the library?".to_string())
///     .actions(|_| vec![
///         AlertButton::cancel("Cancel"),
///         AlertButton::destructive("Delete").on_select(Msg::Delete),
///     ]);
/// ```
pub struct Alert<V, Msg> {
    title: Arc<dyn Fn(&V) -> Line<'static> + Send + Sync>,
    message: Option<Arc<dyn Fn(&V) -> String + Send + Sync>>,
    actions: Arc<dyn Fn(&V) -> Vec<AlertButton<Msg>> + Send + Sync>,
}

impl<V, Msg> Clone for Alert<V, Msg> {
    fn clone(&self) -> Self {
        Self {
            title: Arc::clone(&self.title),
            message: self.message.as_ref().map(Arc::clone),
            actions: Arc::clone(&self.actions),
        }
    }
}

impl<V, Msg> Alert<V, Msg> {
    /// Create an alert with a styled title line.
    ///
    /// The default action list is a single "OK" button that only dismisses.
    pub fn new(title: impl Fn(&V) -> Line<'static> + Send + Sync + 'static) -> Self {
        Self {
            title: Arc::new(title),
            message: None,
            actions: Arc::new(|_| vec![AlertButton::new("OK")]),
        }
    }

    /// Create an alert with a plain-text title.
    pub fn titled(title: impl Fn(&V) -> String + Send + Sync + 'static) -> Self {
        Self::new(move |value| Line::from(title(value)))
    }

    /// Set the message/description shown under the title.
    pub fn message(mut self, message: impl Fn(&V) -> String + Send + Sync + 'static) -> Self {
        self.message = Some(Arc::new(message));
        self
    }

    /// Set the action list.
    pub fn actions(
        mut self,
        actions: impl Fn(&V) -> Vec<AlertButton<Msg>> + Send + Sync + 'static,
    ) -> Self {
        self.actions = Arc::new(actions);
        self
    }

    pub(crate) fn title_for(&self, value: &V) -> Line<'static> {
        (self.title)(value)
    }

    pub(crate) fn message_for(&self, value: &V) -> Option<String> {
        self.message.as_ref().map(|message| message(value))
    }

    pub(crate) fn actions_for(&self, value: &V) -> Vec<AlertButton<Msg>> {
        (self.actions)(value)
    }
}

impl<Msg> Alert<(), Msg> {
    /// Zero-argument title for presence-only cases.
    pub fn plain(title: impl Into<String>) -> Self {
        let title = title.into();
        Self::titled(move |()| title.clone())
    }

    /// Zero-argument message form.
    pub fn message_text(self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.message(move |()| message.clone())
    }

    /// Zero-argument action list form.
    pub fn buttons(self, buttons: Vec<AlertButton<Msg>>) -> Self
    where
        Msg: Clone + Send + Sync + 'static,
    {
        self.actions(move |()| buttons.clone())
    }
}

/// Generate hotkey display from a label, e.g. "Yes" -> "(y)es".
pub(crate) fn hotkey_label(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => format!("({}){}", first.to_lowercase(), chars.as_str()),
        None => String::new(),
    }
}

/// The character a label's hotkey responds to.
pub(crate) fn hotkey_char(label: &str) -> Option<char> {
    label.chars().next().and_then(|c| c.to_lowercase().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotkey_labels_wrap_the_first_char() {
        assert_eq!(hotkey_label("Yes"), "(y)es");
        assert_eq!(hotkey_label("OK"), "(o)K");
        assert_eq!(hotkey_label(""), "");
    }

    #[test]
    fn default_actions_are_a_single_ok() {
        let alert: Alert<u8, ()> = Alert::titled(|n| format!("{n}"));
        let actions = alert.actions_for(&1);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].label(), "OK");
    }

    #[test]
    fn unit_forms_ignore_the_value() {
        #[derive(Clone, PartialEq, Debug)]
        struct Confirmed;

        let alert: Alert<(), Confirmed> = Alert::plain("Sure?")
            .message_text("No undo.")
            .buttons(vec![
                AlertButton::cancel("Cancel"),
                AlertButton::new("Confirm").on_select(Confirmed),
            ]);
        assert_eq!(alert.message_for(&()), Some("No undo.".to_string()));
        assert_eq!(alert.actions_for(&()).len(), 2);
    }
}
