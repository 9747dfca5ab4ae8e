//! Modal bookkeeping shared by the dialogs on a page
//!
//! Provides:
//! - `ModalId` naming a dialog
//! - `ScrollLock` for the page-level "stop background scrolling" effect
//! - `ScrollLockCounter`, a reference-counted lock shared between managers
//! - `ModalManager`, the open/close state of one group of dialogs
//!
//! Nothing here touches the DOM. The browser adapter lives in `ui::modal`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use derive_more::{Display, From};

/// Identifier of the "start a project" dialog
pub const LEAD_CAPTURE_MODAL: &str = "lead-capture";

/// Key that closes the topmost dialog
pub const ESCAPE_KEY: &str = "Escape";

/// Name of a registered dialog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From)]
pub struct ModalId(String);

impl ModalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModalId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Page-level scroll suppression
pub trait ScrollLock: Send + 'static {
    fn lock(&mut self);
    fn unlock(&mut self);
}

struct LockState<L> {
    holders: usize,
    lock: L,
}

/// Reference-counted wrapper around a [`ScrollLock`]
///
/// `lock()` runs on the first acquire and `unlock()` on the last release,
/// so one dialog closing never unlocks the page while another is open.
pub struct ScrollLockCounter<L: ScrollLock> {
    inner: Arc<Mutex<LockState<L>>>,
}

impl<L: ScrollLock> ScrollLockCounter<L> {
    pub fn new(lock: L) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LockState { holders: 0, lock })),
        }
    }

    fn state(&self) -> MutexGuard<'_, LockState<L>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take one reference, locking the page on the first one
    pub fn acquire(&self) {
        let mut state = self.state();
        state.holders += 1;
        if state.holders == 1 {
            state.lock.lock();
        }
    }

    /// Drop one reference, unlocking the page when none remain
    pub fn release(&self) {
        let mut state = self.state();
        match state.holders {
            0 => {}
            1 => {
                state.holders = 0;
                state.lock.unlock();
            }
            _ => state.holders -= 1,
        }
    }

    pub fn holders(&self) -> usize {
        self.state().holders
    }

    pub fn is_locked(&self) -> bool {
        self.holders() > 0
    }
}

impl<L: ScrollLock> Clone for ScrollLockCounter<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Open/close state for a group of dialogs
///
/// Dialogs are kept in the order they were opened; the last one is the
/// topmost and is the one closed by Escape. A manager holds at most one
/// reference on the shared scroll lock, taken while anything is open.
pub struct ModalManager<L: ScrollLock> {
    open: Vec<ModalId>,
    scroll_lock: ScrollLockCounter<L>,
    holds_lock: bool,
}

impl<L: ScrollLock> ModalManager<L> {
    pub fn new(scroll_lock: ScrollLockCounter<L>) -> Self {
        Self {
            open: Vec::new(),
            scroll_lock,
            holds_lock: false,
        }
    }

    /// Open a dialog. Returns false if it was already open.
    pub fn open(&mut self, id: impl Into<ModalId>) -> bool {
        let id = id.into();
        if self.open.contains(&id) {
            return false;
        }
        self.open.push(id);
        self.sync_lock();
        true
    }

    /// Close a dialog. Closing one that is not open is a no-op.
    pub fn close(&mut self, id: &str) -> bool {
        let before = self.open.len();
        self.open.retain(|open| open.as_str() != id);
        let changed = self.open.len() != before;
        if changed {
            self.sync_lock();
        }
        changed
    }

    pub fn toggle(&mut self, id: impl Into<ModalId>) -> bool {
        let id = id.into();
        if self.is_open(id.as_str()) {
            self.close(id.as_str());
            false
        } else {
            self.open(id);
            true
        }
    }

    /// Close everything and give back this manager's scroll-lock reference
    pub fn close_all(&mut self) {
        self.open.clear();
        self.sync_lock();
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.iter().any(|open| open.as_str() == id)
    }

    pub fn has_open_modals(&self) -> bool {
        !self.open.is_empty()
    }

    /// Most recently opened dialog
    pub fn topmost(&self) -> Option<&ModalId> {
        self.open.last()
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// The keydown listener is only installed while this is true
    pub fn wants_escape_listener(&self) -> bool {
        self.has_open_modals()
    }

    /// Handle a keydown. Escape closes the topmost dialog and returns its id.
    pub fn handle_key(&mut self, key: &str) -> Option<ModalId> {
        if key != ESCAPE_KEY {
            return None;
        }
        let id = self.open.pop()?;
        self.sync_lock();
        Some(id)
    }

    pub fn scroll_lock(&self) -> &ScrollLockCounter<L> {
        &self.scroll_lock
    }

    fn sync_lock(&mut self) {
        let wants = self.has_open_modals();
        if wants && !self.holds_lock {
            self.scroll_lock.acquire();
            self.holds_lock = true;
        } else if !wants && self.holds_lock {
            self.scroll_lock.release();
            self.holds_lock = false;
        }
    }
}

impl<L: ScrollLock> Drop for ModalManager<L> {
    fn drop(&mut self) {
        if self.holds_lock {
            self.scroll_lock.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every lock/unlock call so tests can check the side effect
    #[derive(Clone, Default)]
    struct RecordingLock {
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    impl RecordingLock {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ScrollLock for RecordingLock {
        fn lock(&mut self) {
            self.calls.lock().unwrap().push("lock");
        }

        fn unlock(&mut self) {
            self.calls.lock().unwrap().push("unlock");
        }
    }

    fn manager() -> (ModalManager<RecordingLock>, RecordingLock) {
        let lock = RecordingLock::default();
        let counter = ScrollLockCounter::new(lock.clone());
        (ModalManager::new(counter), lock)
    }

    #[test]
    fn test_new_manager_is_closed() {
        let (modals, lock) = manager();
        assert!(!modals.has_open_modals());
        assert!(!modals.is_open(LEAD_CAPTURE_MODAL));
        assert!(!modals.wants_escape_listener());
        assert!(lock.calls().is_empty());
    }

    #[test]
    fn test_open_locks_scroll_once() {
        let (mut modals, lock) = manager();
        assert!(modals.open("a"));
        assert!(modals.open("b"));
        assert!(!modals.open("a"));

        assert_eq!(modals.open_count(), 2);
        assert_eq!(lock.calls(), vec!["lock"]);
    }

    #[test]
    fn test_close_last_unlocks() {
        let (mut modals, lock) = manager();
        modals.open("a");
        modals.open("b");

        assert!(modals.close("a"));
        assert!(modals.scroll_lock().is_locked());

        assert!(modals.close("b"));
        assert!(!modals.scroll_lock().is_locked());
        assert_eq!(lock.calls(), vec!["lock", "unlock"]);
    }

    #[test]
    fn test_close_unknown_is_noop() {
        let (mut modals, lock) = manager();
        assert!(!modals.close("missing"));
        modals.open("a");
        assert!(!modals.close("missing"));
        assert!(modals.is_open("a"));
        assert_eq!(lock.calls(), vec!["lock"]);
    }

    #[test]
    fn test_toggle() {
        let (mut modals, _lock) = manager();
        assert!(modals.toggle("a"));
        assert!(modals.is_open("a"));
        assert!(!modals.toggle("a"));
        assert!(!modals.is_open("a"));
        assert!(!modals.scroll_lock().is_locked());
    }

    #[test]
    fn test_close_all() {
        let (mut modals, lock) = manager();
        modals.open("a");
        modals.open("b");
        modals.close_all();

        assert!(!modals.has_open_modals());
        assert_eq!(lock.calls(), vec!["lock", "unlock"]);
    }

    #[test]
    fn test_two_managers_share_lock() {
        let lock = RecordingLock::default();
        let counter = ScrollLockCounter::new(lock.clone());
        let mut first = ModalManager::new(counter.clone());
        let mut second = ModalManager::new(counter.clone());

        first.open("pricing");
        second.open(LEAD_CAPTURE_MODAL);
        assert_eq!(counter.holders(), 2);

        first.close("pricing");
        assert!(counter.is_locked());

        second.close(LEAD_CAPTURE_MODAL);
        assert!(!counter.is_locked());
        assert_eq!(lock.calls(), vec!["lock", "unlock"]);
    }

    #[test]
    fn test_close_all_keeps_other_managers_lock() {
        let counter = ScrollLockCounter::new(RecordingLock::default());
        let mut first = ModalManager::new(counter.clone());
        let mut second = ModalManager::new(counter.clone());

        first.open("a");
        second.open("b");
        first.close_all();

        assert!(counter.is_locked());
        assert!(second.is_open("b"));
    }

    #[test]
    fn test_escape_closes_topmost() {
        let (mut modals, _lock) = manager();
        modals.open("a");
        modals.open("b");

        assert_eq!(modals.handle_key(ESCAPE_KEY), Some(ModalId::from("b")));
        assert!(modals.is_open("a"));
        assert_eq!(modals.topmost(), Some(&ModalId::from("a")));
    }

    #[test]
    fn test_escape_with_single_modal_detaches_listener() {
        let (mut modals, lock) = manager();
        modals.open(LEAD_CAPTURE_MODAL);
        assert!(modals.wants_escape_listener());

        assert_eq!(
            modals.handle_key("Escape"),
            Some(ModalId::from(LEAD_CAPTURE_MODAL))
        );
        assert!(!modals.wants_escape_listener());

        // A second Escape has nothing to close
        assert_eq!(modals.handle_key("Escape"), None);
        assert_eq!(lock.calls(), vec!["lock", "unlock"]);
    }

    #[test]
    fn test_other_keys_ignored() {
        let (mut modals, _lock) = manager();
        modals.open("a");
        assert_eq!(modals.handle_key("Enter"), None);
        assert!(modals.is_open("a"));
    }

    #[test]
    fn test_drop_releases_lock() {
        let counter = ScrollLockCounter::new(RecordingLock::default());
        {
            let mut modals = ModalManager::new(counter.clone());
            modals.open("a");
            assert!(counter.is_locked());
        }
        assert!(!counter.is_locked());
    }

    #[test]
    fn test_release_without_holders_is_noop() {
        let lock = RecordingLock::default();
        let counter = ScrollLockCounter::new(lock.clone());
        counter.release();
        assert_eq!(counter.holders(), 0);
        assert!(lock.calls().is_empty());
    }

    #[test]
    fn test_modal_id_display() {
        let id = ModalId::new(LEAD_CAPTURE_MODAL);
        assert_eq!(id.to_string(), "lead-capture");
        assert_eq!(id.as_str(), "lead-capture");
    }
}
