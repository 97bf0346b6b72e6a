use std::sync::Arc;

/// A callable capability that dismisses the presentation it was created for.
///
/// Dismiss actions are handed out by presenters via [`PresentationContext`]
/// and threaded explicitly through content construction; there is no ambient
/// registry to look one up from. Invocation is synchronous on the UI thread.
/// An action from an earlier presentation is inert: the presenter guards
/// every write with the presentation generation it was created under.
pub struct DismissAction {
    action: Arc<dyn Fn() + Send + Sync>,
}

impl Clone for DismissAction {
    fn clone(&self) -> Self {
        Self {
            action: Arc::clone(&self.action),
        }
    }
}

impl DismissAction {
    /// Wrap a closure as a dismiss capability.
    pub fn new(action: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            action: Arc::new(action),
        }
    }

    /// The "no enclosing presentation context" action.
    ///
    /// Invoking dismiss with nothing to dismiss is a caller error, not a
    /// crash condition: this performs no state change and emits a
    /// developer-facing diagnostic.
    pub fn noop() -> Self {
        Self::new(|| {
            log::warn!("dismiss invoked outside a presentation context; nothing to dismiss");
        })
    }

    /// Perform the dismissal.
    pub fn call(&self) {
        (self.action)()
    }
}

impl Default for DismissAction {
    fn default() -> Self {
        Self::noop()
    }
}

/// Per-presentation context threaded to content builders.
///
/// Carries the dismiss capability for the presentation currently being
/// built, plus the presentation generation for hosts that want to correlate
/// deferred work with the presentation it belongs to.
pub struct PresentationContext {
    dismiss: DismissAction,
    generation: u64,
}

impl PresentationContext {
    pub(crate) fn new(dismiss: DismissAction, generation: u64) -> Self {
        Self { dismiss, generation }
    }

    /// Dismiss the presentation this context belongs to.
    pub fn dismiss(&self) {
        self.dismiss.call()
    }

    /// Clone out the dismiss capability, e.g. to store in a button closure.
    pub fn dismiss_action(&self) -> DismissAction {
        self.dismiss.clone()
    }

    /// Generation of the presentation this context was created for.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn call_runs_the_wrapped_closure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let action = DismissAction::new(move || {
            counted.fetch_add(1, Ordering::Relaxed);
        });
        action.call();
        action.clone().call();
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn noop_is_callable() {
        // Only the diagnostic distinguishes this from silence.
        DismissAction::noop().call();
        DismissAction::default().call();
    }
}
