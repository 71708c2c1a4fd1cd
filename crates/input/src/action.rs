/// Degrees applied by a single pan key press.
pub const PAN_STEP_DEGREES: f32 = 5.0;

/// A discrete scene command produced by a key press.
///
/// Handlers consume actions, never raw key codes, so the desktop window and
/// scripted drivers share the same scene logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    /// Turn left by [`PAN_STEP_DEGREES`].
    PanLeft,
    /// Turn right by [`PAN_STEP_DEGREES`].
    PanRight,
    /// Stack a block on the facing cell.
    AddBlock,
    /// Remove the top block of the facing cell.
    RemoveBlock,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::MoveForward,
        Action::MoveBackward,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::PanLeft,
        Action::PanRight,
        Action::AddBlock,
        Action::RemoveBlock,
    ];

    /// The key bound to this action.
    pub fn key(self) -> char {
        match self {
            Action::MoveForward => 'w',
            Action::MoveBackward => 's',
            Action::StrafeLeft => 'a',
            Action::StrafeRight => 'd',
            Action::PanLeft => 'q',
            Action::PanRight => 'e',
            Action::AddBlock => 'f',
            Action::RemoveBlock => 'g',
        }
    }
}

/// Case-insensitive key lookup. Unbound keys yield `None`.
pub fn action_for_key(key: char) -> Option<Action> {
    let key = key.to_ascii_lowercase();
    Action::ALL.into_iter().find(|a| a.key() == key)
}
