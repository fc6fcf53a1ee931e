//! Entry and exit hooks attached to states.

use super::error::HookError;
use std::fmt;

pub type HookResult = std::result::Result<(), HookError>;

/// Zero-argument side effect run when a state is entered or left.
pub type Hook = Box<dyn FnMut() -> HookResult + Send>;

/// Optional `on_enter` / `on_exit` pair for one state.
///
/// # Example
///
/// ```rust
/// use brigade::machine::StateHooks;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let entered = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&entered);
/// let mut hooks = StateHooks::new().on_enter(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
///     Ok(())
/// });
///
/// hooks.run_enter().unwrap();
/// assert_eq!(entered.load(Ordering::SeqCst), 1);
/// ```
#[derive(Default)]
pub struct StateHooks {
    on_enter: Option<Hook>,
    on_exit: Option<Hook>,
}

impl StateHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: FnMut() -> HookResult + Send + 'static,
    {
        self.on_enter = Some(Box::new(hook));
        self
    }

    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: FnMut() -> HookResult + Send + 'static,
    {
        self.on_exit = Some(Box::new(hook));
        self
    }

    pub fn has_enter(&self) -> bool {
        self.on_enter.is_some()
    }

    pub fn has_exit(&self) -> bool {
        self.on_exit.is_some()
    }

    /// Run the entry hook, if any.
    pub fn run_enter(&mut self) -> HookResult {
        match self.on_enter.as_mut() {
            Some(hook) => hook(),
            None => Ok(()),
        }
    }

    /// Run the exit hook, if any.
    pub fn run_exit(&mut self) -> HookResult {
        match self.on_exit.as_mut() {
            Some(hook) => hook(),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for StateHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateHooks")
            .field("on_enter", &self.has_enter())
            .field("on_exit", &self.has_exit())
            .finish()
    }
}
