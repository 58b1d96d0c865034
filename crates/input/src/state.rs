use std::collections::BTreeMap;

/// Which logical key codes are currently held.
///
/// Keys are identified by their logical code name ("KeyW", "KeyA", ...),
/// matching what the windowing layer reports. The map is mutated by
/// key-down/key-up events and read once per tick by the controller.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: BTreeMap<String, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the held state of a key. Unknown codes are accepted as-is.
    pub fn set_key(&mut self, code: &str, down: bool) {
        self.held.insert(code.to_owned(), down);
    }

    /// Whether a key is currently held. Absent keys default to not held.
    pub fn is_held(&self, code: &str) -> bool {
        self.held.get(code).copied().unwrap_or(false)
    }

    /// Release every key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_keys_are_not_held() {
        let input = InputState::new();
        assert!(!input.is_held("KeyW"));
    }

    #[test]
    fn set_and_release() {
        let mut input = InputState::new();
        input.set_key("KeyW", true);
        assert!(input.is_held("KeyW"));
        input.set_key("KeyW", false);
        assert!(!input.is_held("KeyW"));
    }

    #[test]
    fn unknown_codes_are_harmless() {
        let mut input = InputState::new();
        input.set_key("MediaPlayPause", true);
        assert!(input.is_held("MediaPlayPause"));
        assert!(!input.is_held("KeyD"));
    }

    #[test]
    fn opposing_keys_can_be_held_together() {
        let mut input = InputState::new();
        input.set_key("KeyA", true);
        input.set_key("KeyD", true);
        assert!(input.is_held("KeyA") && input.is_held("KeyD"));
    }

    #[test]
    fn clear_releases_everything() {
        let mut input = InputState::new();
        input.set_key("KeyW", true);
        input.set_key("KeyD", true);
        input.clear();
        assert!(!input.is_held("KeyW"));
        assert!(!input.is_held("KeyD"));
    }
}
