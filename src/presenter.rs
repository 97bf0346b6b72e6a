use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;

use crate::alert::{Alert, ButtonRole, hotkey_char, hotkey_label};
use crate::binding::Binding;
use crate::dismiss::{DismissAction, PresentationContext};
use crate::element::{Element, FocusId, LayoutConstraint, RowBuilder};
use crate::theme::Theme;

/// Why a presentation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The presenter performed the dismissal: an action was selected, Esc
    /// was pressed, or a dismiss capability ran.
    Dismissed,
    /// The state changed out from under the presentation: an external write
    /// of absent, or the enum moved to a case this presentation does not
    /// project.
    Replaced,
}

/// Lifecycle transition observed by [`AlertPresenter::sync`] /
/// [`SheetPresenter::sync`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentEvent {
    /// Absent became present.
    Began,
    /// Still present, but the value was rewritten; same presentation,
    /// updated content.
    Updated,
    /// Present became absent.
    Ended(EndReason),
}

/// Shared lifecycle bookkeeping for both presenter flavors.
struct PresenterCore<V> {
    binding: Binding<Option<V>>,
    snapshot: Option<V>,
    presenting: bool,
    generation: Arc<AtomicU64>,
    pending_dismiss: Arc<Mutex<Option<u64>>>,
    last_version: u64,
}

impl<V: Clone + Send + 'static> PresenterCore<V> {
    fn new(binding: Binding<Option<V>>) -> Self {
        let last_version = binding.version();
        Self {
            binding,
            snapshot: None,
            presenting: false,
            generation: Arc::new(AtomicU64::new(0)),
            pending_dismiss: Arc::new(Mutex::new(None)),
            last_version,
        }
    }

    fn sync(&mut self) -> Option<PresentEvent> {
        let current = self.binding.get();
        let version = self.binding.version();
        let event = match (self.presenting, current) {
            (false, Some(value)) => {
                let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
                *self.pending_dismiss.lock().expect("dismissal record poisoned") = None;
                self.snapshot = Some(value);
                self.presenting = true;
                log::debug!("presentation began (generation {generation})");
                Some(PresentEvent::Began)
            }
            (true, Some(value)) => {
                let rewritten = version != self.last_version;
                self.snapshot = Some(value);
                rewritten.then_some(PresentEvent::Updated)
            }
            (true, None) => {
                self.presenting = false;
                let generation = self.generation.load(Ordering::Relaxed);
                let pending = self
                    .pending_dismiss
                    .lock()
                    .expect("dismissal record poisoned")
                    .take();
                let reason = if pending == Some(generation) {
                    EndReason::Dismissed
                } else {
                    EndReason::Replaced
                };
                log::debug!("presentation ended (generation {generation}, {reason:?})");
                // Snapshot is retained: the host may draw one more frame
                // after the flag flips.
                Some(PresentEvent::Ended(reason))
            }
            (false, None) => None,
        };
        self.last_version = version;
        event
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }

    /// Record the dismissal and clear the binding, unless `generation` is
    /// stale (a newer presentation has begun since the capability was made).
    fn dismiss_generation(
        binding: &Binding<Option<V>>,
        current: &Arc<AtomicU64>,
        pending: &Arc<Mutex<Option<u64>>>,
        generation: u64,
    ) {
        if current.load(Ordering::Relaxed) != generation {
            log::debug!("stale dismiss for generation {generation} dropped");
            return;
        }
        *pending.lock().expect("dismissal record poisoned") = Some(generation);
        binding.set(None);
    }

    fn dismiss(&self) {
        Self::dismiss_generation(
            &self.binding,
            &self.generation,
            &self.pending_dismiss,
            self.generation(),
        );
    }

    fn dismiss_action(&self) -> DismissAction {
        let binding = self.binding.clone();
        let current = Arc::clone(&self.generation);
        let pending = Arc::clone(&self.pending_dismiss);
        let generation = self.generation();
        DismissAction::new(move || {
            Self::dismiss_generation(&binding, &current, &pending, generation);
        })
    }

    fn context(&self) -> PresentationContext {
        PresentationContext::new(self.dismiss_action(), self.generation())
    }
}

/// The Optional-State Presentation Adapter, alert flavor.
///
/// Drives an alert directly off a `Binding<Option<V>>`: presence of a value
/// is the presentation, and every user-triggered dismissal writes absent
/// back through the binding. Call [`sync`](Self::sync) once per UI pass,
/// route key events through [`handle_key`](Self::handle_key) while
/// presenting, and compose [`view`](Self::view) into the frame's layers.
///
/// The state machine is strict: absent → presenting on any non-absent
/// write, presenting → absent on dismissal or an external absent write.
/// Overwriting one value with another while presenting is not a transition;
/// the same presentation re-renders with the new content.
///
/// # Examples
///
/// ```rust
/// use tui_navigation::{Alert, AlertButton, AlertPresenter, StateCell};
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Msg { Delete }
///
/// #[derive(Clone)]
/// struct Movie { title: String }
///
/// let movie = StateCell::new(None::<Movie>);
/// let mut presenter = AlertPresenter::new(
///     movie.binding(),
///     Alert::titled(|m: &Movie| m.title.clone())
///         .actions(|_| vec![
///             AlertButton::cancel("Cancel"),
///             AlertButton::destructive("Delete").on_select(Msg::Delete),
///         ]),
/// );
///
/// movie.set(Some(Movie { title: "Blade Runner".into() }));
/// presenter.sync();
/// assert!(presenter.is_presenting());
/// presenter.dismiss();
/// presenter.sync();
/// assert!(!presenter.is_presenting());
/// assert_eq!(movie.get().map(|m| m.title), None);
/// ```
pub struct AlertPresenter<V, Msg> {
    core: PresenterCore<V>,
    alert: Alert<V, Msg>,
    selected: usize,
}

impl<V: Clone + Send + 'static, Msg: Clone> AlertPresenter<V, Msg> {
    pub fn new(binding: Binding<Option<V>>, alert: Alert<V, Msg>) -> Self {
        Self {
            core: PresenterCore::new(binding),
            alert,
            selected: 0,
        }
    }

    /// Reconcile with the bound state. Call once per UI pass, before
    /// building the view.
    pub fn sync(&mut self) -> Option<PresentEvent> {
        let event = self.core.sync();
        if event == Some(PresentEvent::Began) {
            self.selected = 0;
        }
        event
    }

    pub fn is_presenting(&self) -> bool {
        self.core.presenting
    }

    /// The value this presentation is showing, while it is showing.
    pub fn presented(&self) -> Option<&V> {
        if self.core.presenting {
            self.core.snapshot.as_ref()
        } else {
            None
        }
    }

    /// Last non-absent value, retained through the dismiss transition so
    /// content stays stable for the trailing frame.
    pub fn last_presented(&self) -> Option<&V> {
        self.core.snapshot.as_ref()
    }

    /// Generation of the current (or most recent) presentation.
    pub fn generation(&self) -> u64 {
        self.core.generation()
    }

    /// Title for the current presentation; empty when nothing was ever
    /// presented (unreachable in correct usage).
    pub fn title(&self) -> Line<'static> {
        match self.core.snapshot.as_ref() {
            Some(value) => self.alert.title_for(value),
            None => Line::default(),
        }
    }

    /// Programmatic dismissal, equivalent to the user cancelling.
    pub fn dismiss(&mut self) {
        self.core.dismiss();
    }

    /// A dismiss capability tied to the current presentation. Stale
    /// capabilities (from an earlier generation) are inert.
    pub fn dismiss_action(&self) -> DismissAction {
        self.core.dismiss_action()
    }

    /// Context value for hosts that thread dismissal into custom chrome.
    pub fn context(&self) -> PresentationContext {
        self.core.context()
    }

    /// Select the action at `index`: dismisses and returns the action's
    /// message for the host's update loop.
    pub fn select_action(&mut self, index: usize) -> Option<Msg> {
        let value = self.core.snapshot.as_ref()?;
        if !self.core.presenting {
            return None;
        }
        let buttons = self.alert.actions_for(value);
        self.core.dismiss();
        buttons.get(index).and_then(|button| button.msg.clone())
    }

    /// Route a key event. Returns the selected action's message, if the key
    /// completed one. Keys are only consumed while presenting.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Msg> {
        if !self.core.presenting || key.kind != KeyEventKind::Press {
            return None;
        }
        let buttons = match self.core.snapshot.as_ref() {
            Some(value) => self.alert.actions_for(value),
            None => Vec::new(),
        };
        let count = buttons.len();

        match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::BackTab => {
                if count > 0 {
                    self.selected = (self.selected + count - 1) % count;
                }
                None
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Tab => {
                if count > 0 {
                    self.selected = (self.selected + 1) % count;
                }
                None
            }
            KeyCode::Enter => {
                let index = self.selected.min(count.saturating_sub(1));
                if count == 0 {
                    self.core.dismiss();
                    None
                } else {
                    self.select_action(index)
                }
            }
            KeyCode::Esc => {
                let cancel = buttons.iter().position(|b| b.role == ButtonRole::Cancel);
                match cancel {
                    Some(index) => self.select_action(index),
                    None => {
                        self.core.dismiss();
                        None
                    }
                }
            }
            KeyCode::Char(c) => {
                let wanted = c.to_lowercase().next();
                let index = buttons
                    .iter()
                    .position(|b| hotkey_char(b.label()) == wanted)?;
                self.select_action(index)
            }
            _ => None,
        }
    }

    /// Build the alert's modal panel, or `None` when not presenting.
    ///
    /// Compose it over the base view with the `modal!` macro or a
    /// [`Layer`](crate::Layer) of your own.
    pub fn view(&self, theme: &Theme) -> Option<Element<Msg>> {
        if !self.core.presenting {
            return None;
        }
        let value = self.core.snapshot.as_ref()?;

        let mut title = self.alert.title_for(value);
        title.style = title
            .style
            .patch(theme.title_style().add_modifier(Modifier::BOLD));
        let title_element = Element::styled_text(title);

        let mut content = crate::element::ColumnBuilder::new();
        content = content.add(title_element, LayoutConstraint::Length(1));

        if let Some(message) = self.alert.message_for(value) {
            content = content.add(Element::text(""), LayoutConstraint::Length(1));
            content = content.add(
                Element::Text {
                    content: message,
                    style: Some(Style::default().fg(theme.text_primary)),
                },
                LayoutConstraint::Length(2),
            );
        }

        let buttons = self.alert.actions_for(value);
        let mut button_row = RowBuilder::new();
        for (index, button) in buttons.iter().enumerate() {
            if index > 0 {
                button_row = button_row.add(Element::text("  "), LayoutConstraint::Length(2));
            }
            let style = match button.role() {
                ButtonRole::Cancel => Style::default().fg(theme.text_secondary),
                ButtonRole::Destructive => theme.error_style(),
                ButtonRole::Default => theme.success_style(),
            };
            let element = Element::button(
                FocusId::new(format!("alert-action-{index}")),
                format!("[ {} ]", hotkey_label(button.label())),
            )
            .style(style)
            .focused(index == self.selected.min(buttons.len().saturating_sub(1)));
            let element = match button.msg.clone() {
                Some(msg) => element.on_press(msg),
                None => element,
            };
            button_row = button_row.add(element.build(), LayoutConstraint::Fill(1));
        }

        content = content.add(Element::text(""), LayoutConstraint::Length(1));
        content = content.add(button_row.spacing(0).build(), LayoutConstraint::Length(1));

        Some(Element::panel(content.build()).build())
    }
}

/// The Optional-State Presentation Adapter, free-form flavor.
///
/// Same lifecycle and write-back rules as [`AlertPresenter`], but content is
/// an arbitrary element tree built from the presented value and a
/// [`PresentationContext`] carrying the dismiss capability.
pub struct SheetPresenter<V, Msg> {
    core: PresenterCore<V>,
    content: Arc<dyn Fn(&V, &PresentationContext) -> Element<Msg> + Send + Sync>,
    title: Option<String>,
}

impl<V: Clone + Send + 'static, Msg> SheetPresenter<V, Msg> {
    pub fn new(
        binding: Binding<Option<V>>,
        content: impl Fn(&V, &PresentationContext) -> Element<Msg> + Send + Sync + 'static,
    ) -> Self {
        Self {
            core: PresenterCore::new(binding),
            content: Arc::new(content),
            title: None,
        }
    }

    /// Title for the sheet's panel border.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Reconcile with the bound state. Call once per UI pass.
    pub fn sync(&mut self) -> Option<PresentEvent> {
        self.core.sync()
    }

    pub fn is_presenting(&self) -> bool {
        self.core.presenting
    }

    pub fn presented(&self) -> Option<&V> {
        if self.core.presenting {
            self.core.snapshot.as_ref()
        } else {
            None
        }
    }

    pub fn last_presented(&self) -> Option<&V> {
        self.core.snapshot.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.core.generation()
    }

    pub fn dismiss(&mut self) {
        self.core.dismiss();
    }

    pub fn dismiss_action(&self) -> DismissAction {
        self.core.dismiss_action()
    }

    pub fn context(&self) -> PresentationContext {
        self.core.context()
    }

    /// Route a key event; Esc dismisses. Returns whether the key was
    /// consumed. Content-specific keys are the host's business.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !self.core.presenting || key.kind != KeyEventKind::Press {
            return false;
        }
        if key.code == KeyCode::Esc {
            self.core.dismiss();
            true
        } else {
            false
        }
    }

    /// Build the sheet's modal panel, or `None` when not presenting.
    pub fn view(&self, _theme: &Theme) -> Option<Element<Msg>> {
        if !self.core.presenting {
            return None;
        }
        let value = self.core.snapshot.as_ref()?;
        let context = self.core.context();
        let content = (self.content)(value, &context);
        let mut panel = Element::panel(content);
        if let Some(title) = &self.title {
            panel = panel.title(title.clone());
        }
        Some(panel.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertButton;
    use crate::binding::StateCell;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[derive(Clone, PartialEq, Debug)]
    enum Msg {
        Deleted,
    }

    fn delete_alert() -> Alert<String, Msg> {
        Alert::titled(|title: &String| title.clone())
            .message(|_| "No undo.".to_string())
            .actions(|_| {
                vec![
                    AlertButton::cancel("Cancel"),
                    AlertButton::destructive("Delete").on_select(Msg::Deleted),
                ]
            })
    }

    #[test]
    fn present_then_dismiss_returns_to_absent() {
        let cell = StateCell::new(None::<String>);
        let mut presenter = AlertPresenter::new(cell.binding(), delete_alert());

        assert_eq!(presenter.sync(), None);
        cell.set(Some("Alien".to_string()));
        assert_eq!(presenter.sync(), Some(PresentEvent::Began));
        assert!(presenter.is_presenting());

        presenter.dismiss();
        assert_eq!(
            presenter.sync(),
            Some(PresentEvent::Ended(EndReason::Dismissed))
        );
        assert!(!presenter.is_presenting());
        assert_eq!(cell.get(), None);
    }

    #[test]
    fn absent_writes_are_idempotent() {
        let cell = StateCell::new(None::<String>);
        let mut presenter = AlertPresenter::new(cell.binding(), delete_alert());

        cell.set(None);
        assert_eq!(presenter.sync(), None);
        cell.set(None);
        assert_eq!(presenter.sync(), None);
    }

    #[test]
    fn overwrite_while_presenting_is_an_update_not_a_transition() {
        let cell = StateCell::new(Some("One".to_string()));
        let mut presenter = AlertPresenter::new(cell.binding(), delete_alert());

        assert_eq!(presenter.sync(), Some(PresentEvent::Began));
        let generation = presenter.generation();

        cell.set(Some("Two".to_string()));
        assert_eq!(presenter.sync(), Some(PresentEvent::Updated));
        assert_eq!(presenter.generation(), generation);
        assert_eq!(presenter.presented(), Some(&"Two".to_string()));
    }

    #[test]
    fn quiet_pass_emits_no_event() {
        let cell = StateCell::new(Some("One".to_string()));
        let mut presenter = AlertPresenter::new(cell.binding(), delete_alert());

        assert_eq!(presenter.sync(), Some(PresentEvent::Began));
        assert_eq!(presenter.sync(), None);
    }

    #[test]
    fn external_clear_reports_replaced() {
        let cell = StateCell::new(Some("One".to_string()));
        let mut presenter = AlertPresenter::new(cell.binding(), delete_alert());
        presenter.sync();

        cell.set(None);
        assert_eq!(
            presenter.sync(),
            Some(PresentEvent::Ended(EndReason::Replaced))
        );
    }

    #[test]
    fn enter_selects_the_focused_action_and_dismisses() {
        let cell = StateCell::new(Some("One".to_string()));
        let mut presenter = AlertPresenter::new(cell.binding(), delete_alert());
        presenter.sync();

        // Move focus from Cancel to Delete, then confirm.
        assert_eq!(presenter.handle_key(press(KeyCode::Right)), None);
        assert_eq!(presenter.handle_key(press(KeyCode::Enter)), Some(Msg::Deleted));
        assert_eq!(cell.get(), None);
        assert_eq!(
            presenter.sync(),
            Some(PresentEvent::Ended(EndReason::Dismissed))
        );
    }

    #[test]
    fn esc_routes_to_the_cancel_action() {
        let cell = StateCell::new(Some("One".to_string()));
        let mut presenter = AlertPresenter::new(cell.binding(), delete_alert());
        presenter.sync();

        assert_eq!(presenter.handle_key(press(KeyCode::Esc)), None);
        assert_eq!(cell.get(), None);
    }

    #[test]
    fn hotkeys_select_by_label() {
        let cell = StateCell::new(Some("One".to_string()));
        let mut presenter = AlertPresenter::new(cell.binding(), delete_alert());
        presenter.sync();

        assert_eq!(
            presenter.handle_key(press(KeyCode::Char('d'))),
            Some(Msg::Deleted)
        );
        assert_eq!(cell.get(), None);
    }

    #[test]
    fn stale_dismiss_cannot_clobber_a_new_presentation() {
        let cell = StateCell::new(Some("One".to_string()));
        let mut presenter = AlertPresenter::new(cell.binding(), delete_alert());
        presenter.sync();

        let stale = presenter.dismiss_action();
        presenter.dismiss();
        presenter.sync();

        cell.set(Some("Two".to_string()));
        presenter.sync();
        assert!(presenter.is_presenting());

        stale.call();
        assert_eq!(cell.get(), Some("Two".to_string()));
        assert!(presenter.sync().is_none());
        assert!(presenter.is_presenting());
    }

    #[test]
    fn snapshot_survives_the_dismiss_transition() {
        let cell = StateCell::new(Some("One".to_string()));
        let mut presenter = AlertPresenter::new(cell.binding(), delete_alert());
        presenter.sync();
        presenter.dismiss();
        presenter.sync();

        assert_eq!(presenter.presented(), None);
        assert_eq!(presenter.last_presented(), Some(&"One".to_string()));
        assert_eq!(presenter.title().to_string(), "One");
    }

    #[test]
    fn keys_pass_through_when_not_presenting() {
        let cell = StateCell::new(None::<String>);
        let mut presenter = AlertPresenter::new(cell.binding(), delete_alert());
        presenter.sync();
        assert_eq!(presenter.handle_key(press(KeyCode::Enter)), None);
        assert!(presenter.view(&Theme::default()).is_none());
    }

    #[test]
    fn sheet_content_gets_a_live_dismiss_capability() {
        let cell = StateCell::new(Some(3u32));
        let mut sheet = SheetPresenter::new(cell.binding(), |count: &u32, ctx| {
            // Content builders may stash the capability; exercising it here
            // keeps the test honest about write-back.
            ctx.dismiss();
            Element::<()>::text(format!("{count} items"))
        })
        .title("Queue");

        sheet.sync();
        assert!(sheet.is_presenting());
        let view = sheet.view(&Theme::default());
        assert!(view.is_some());
        assert_eq!(cell.get(), None);
        assert_eq!(sheet.sync(), Some(PresentEvent::Ended(EndReason::Dismissed)));
    }

    #[test]
    fn sheet_esc_dismisses() {
        let cell = StateCell::new(Some(1u8));
        let mut sheet =
            SheetPresenter::new(cell.binding(), |_, _| Element::<()>::text("content"));
        sheet.sync();
        assert!(sheet.handle_key(press(KeyCode::Esc)));
        assert_eq!(cell.get(), None);
    }
}
