use super::PaneId;
use serde::{Deserialize, Serialize};

/// Interactive titlebar drag.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Drag {
    /// Pane whose titlebar was pressed last.
    pub pane: Option<PaneId>,
    pub offset_x: i32,
    pub offset_y: i32,
    /// Position of the outline currently drawn on screen.
    pub outline: Option<(i32, i32)>,
    /// Pane and time of the last release, armed for a double click.
    pub last_release: Option<(PaneId, u64)>,
}
