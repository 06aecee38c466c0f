use std::cell::{Cell, RefCell};
use std::rc::Rc;

const EMPTY_ATTRIBUTES: &str = "{}";

/// Per-mount enhancement bookkeeping.
#[derive(Debug, Default)]
pub struct EnhancementState {
    enhanced: Cell<bool>,
    enhancing: Cell<bool>,
    last_attributes: RefCell<Option<String>>,
}

impl EnhancementState {
    /// At least one pass has completed.
    #[must_use]
    pub fn is_enhanced(&self) -> bool {
        self.enhanced.get()
    }

    /// A pass is in flight.
    #[must_use]
    pub fn is_enhancing(&self) -> bool {
        self.enhancing.get()
    }

    #[must_use]
    pub fn last_attributes(&self) -> Option<String> {
        self.last_attributes.borrow().clone()
    }

    /// Takes the per-mount lock, or `None` when a pass is already in flight.
    #[must_use]
    pub fn try_acquire(self: &Rc<Self>) -> Option<EnhancementGuard> {
        if self.enhancing.replace(true) {
            return None;
        }
        Some(EnhancementGuard {
            state: Rc::clone(self),
        })
    }

    /// `true` when a completed pass already applied exactly this blob.
    #[must_use]
    pub fn is_unchanged(&self, blob: Option<&str>) -> bool {
        self.is_enhanced()
            && self.last_attributes.borrow().as_deref() == Some(normalize(blob))
    }

    pub(crate) fn complete(&self, blob: Option<&str>) {
        *self.last_attributes.borrow_mut() = Some(normalize(blob).to_owned());
        self.enhanced.set(true);
    }
}

fn normalize(blob: Option<&str>) -> &str {
    blob.filter(|b| !b.trim().is_empty()).unwrap_or(EMPTY_ATTRIBUTES)
}

/// Holds the enhancing flag; releasing happens on drop, so every exit path
/// of a pass (including unwinding) frees the mount.
#[derive(Debug)]
pub struct EnhancementGuard {
    state: Rc<EnhancementState>,
}

impl Drop for EnhancementGuard {
    fn drop(&mut self) {
        self.state.enhancing.set(false);
    }
}
