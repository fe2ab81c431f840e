//! Edge-triggered preset selector.
//!
//! Written from an interrupt handler (or the input loop), read by the
//! simulation only at the start of a generation, so a step never sees the
//! grid change under it. Several requests between two generations collapse
//! into the last one.

use std::sync::atomic::{AtomicUsize, Ordering};

const NO_REQUEST: usize = usize::MAX;

#[derive(Debug)]
pub struct ModeSwitch {
    pending: AtomicUsize,
}

impl ModeSwitch {
    pub const fn new() -> Self {
        Self {
            pending: AtomicUsize::new(NO_REQUEST),
        }
    }

    /// Ask for a reseed with the preset at `index`
    pub fn request(&self, index: usize) {
        self.pending.store(index.min(NO_REQUEST - 1), Ordering::Release);
    }

    /// Consume the pending request, if any
    pub fn take(&self) -> Option<usize> {
        match self.pending.swap(NO_REQUEST, Ordering::AcqRel) {
            NO_REQUEST => None,
            index => Some(index),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire) != NO_REQUEST
    }
}

impl Default for ModeSwitch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_empty_switch() {
        let switch = ModeSwitch::new();
        assert!(!switch.is_pending());
        assert_eq!(switch.take(), None);
    }

    #[test]
    fn test_request_is_consumed_once() {
        let switch = ModeSwitch::new();
        switch.request(3);
        assert!(switch.is_pending());
        assert_eq!(switch.take(), Some(3));
        assert_eq!(switch.take(), None);
    }

    #[test]
    fn test_last_request_wins() {
        let switch = ModeSwitch::new();
        switch.request(1);
        switch.request(4);
        assert_eq!(switch.take(), Some(4));
    }

    #[test]
    fn test_request_from_other_thread() {
        static SWITCH: ModeSwitch = ModeSwitch::new();
        thread::spawn(|| SWITCH.request(2)).join().unwrap();
        assert_eq!(SWITCH.take(), Some(2));
    }
}
