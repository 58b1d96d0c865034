/// Pointer-capture state of the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    #[default]
    Unlocked,
    Locked,
}

/// Gesture-gated pointer-capture state machine.
///
/// Unlocked -> Locked only on an explicit user gesture; Locked -> Unlocked
/// on user exit or programmatic release. Re-entering Locked requires a
/// fresh gesture. The host environment may still refuse the capture after
/// the gate passes; callers back that out with [`PointerLock::release`],
/// and movement/look simply stay inert until a later gesture succeeds.
#[derive(Debug, Clone, Default)]
pub struct PointerLock {
    state: LockState,
}

impl PointerLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.state == LockState::Locked
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    /// Request the Locked state. Rejected without a qualifying gesture.
    /// Returns whether the rig is locked after the request.
    pub fn request(&mut self, user_gesture: bool) -> bool {
        if user_gesture {
            if self.state != LockState::Locked {
                tracing::debug!("pointer capture engaged");
            }
            self.state = LockState::Locked;
        } else {
            tracing::debug!("pointer capture request without user gesture; ignored");
        }
        self.is_locked()
    }

    /// Return to Unlocked (escape key, focus loss, or host refusal).
    pub fn release(&mut self) {
        if self.state == LockState::Locked {
            tracing::debug!("pointer capture released");
        }
        self.state = LockState::Unlocked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unlocked() {
        assert!(!PointerLock::new().is_locked());
    }

    #[test]
    fn request_without_gesture_stays_unlocked() {
        let mut lock = PointerLock::new();
        assert!(!lock.request(false));
        assert_eq!(lock.state(), LockState::Unlocked);
    }

    #[test]
    fn gesture_locks_and_release_unlocks() {
        let mut lock = PointerLock::new();
        assert!(lock.request(true));
        assert!(lock.is_locked());
        lock.release();
        assert!(!lock.is_locked());
    }

    #[test]
    fn relocking_requires_a_fresh_gesture() {
        let mut lock = PointerLock::new();
        lock.request(true);
        lock.release();
        assert!(!lock.request(false));
        assert!(lock.request(true));
    }
}
