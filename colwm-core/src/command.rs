use serde::{Deserialize, Serialize};

/// Direction a focus or move command walks in, columns and panes wrap around at either end.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Forward,
    Backward,
}

/// Actions a key binding resolves to.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub enum Command {
    FocusPane(Direction),
    FocusColumn(Direction),
    MovePane(Direction),
    MoveColumn(Direction),
    ClosePane,
    ToggleFullScreen,
    ToggleKeepOpen,
    ToggleMinimize,
    /// Hide every unpinned pane of the focused column, or bring them back.
    MinimizeOthers,
    EditCommand,
    NewCommand,
    RestartCommand,
    PreviousFocus,
    /// Grow (or shrink, when negative) the focused pane at the expense of the panes below it.
    ResizePane(i32),
    Quit,
    RestartManager,
}
