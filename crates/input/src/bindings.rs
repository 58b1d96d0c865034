use serde::{Deserialize, Serialize};

/// Key codes for the four movement directions.
///
/// Part of the scene configuration, so variants can rebind movement without
/// code changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveBindings {
    pub forward: String,
    pub backward: String,
    pub strafe_left: String,
    pub strafe_right: String,
}

impl Default for MoveBindings {
    fn default() -> Self {
        Self {
            forward: "KeyW".into(),
            backward: "KeyS".into(),
            strafe_left: "KeyA".into(),
            strafe_right: "KeyD".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_wasd() {
        let b = MoveBindings::default();
        assert_eq!(b.forward, "KeyW");
        assert_eq!(b.backward, "KeyS");
        assert_eq!(b.strafe_left, "KeyA");
        assert_eq!(b.strafe_right, "KeyD");
    }
}
