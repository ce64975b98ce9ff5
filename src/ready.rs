//! Document readiness gate
//!
//! Runs setup once the element tree can be queried: immediately if parsing
//! already finished, otherwise exactly once on `DOMContentLoaded`.

/// Mirror of `document.readyState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    #[default]
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadyState::Loading => "loading",
            ReadyState::Interactive => "interactive",
            ReadyState::Complete => "complete",
        }
    }

    /// Parse `document.readyState`; anything past loading that is not
    /// `interactive` counts as complete
    pub fn from_str(s: &str) -> Self {
        match s {
            "loading" => ReadyState::Loading,
            "interactive" => ReadyState::Interactive,
            _ => ReadyState::Complete,
        }
    }

    /// Whether the element tree is fully built
    pub fn is_parsed(&self) -> bool {
        *self != ReadyState::Loading
    }
}

/// A document that reports its parse state and can defer work until parsed
pub trait DocumentReadiness {
    fn ready_state(&self) -> ReadyState;

    /// Run `callback` once when structural parsing completes
    fn on_content_loaded(&self, callback: Box<dyn FnOnce()>);
}

/// Run `setup` now if the document is parsed, else once it is.
/// Returns `true` when `setup` ran synchronously.
pub fn when_ready<D, F>(document: &D, setup: F) -> bool
where
    D: DocumentReadiness + ?Sized,
    F: FnOnce() + 'static,
{
    let state = document.ready_state();
    if state.is_parsed() {
        log::debug!("Document is {}, running setup now", state.as_str());
        setup();
        true
    } else {
        log::debug!("Document still loading, deferring setup");
        document.on_content_loaded(Box::new(setup));
        false
    }
}
