//! Objects (such as panes and columns) the layout is built from.
mod column;
mod drag;
mod manager;
mod pane;
mod screen;
mod surface;
mod window_change;

pub use column::{layout_columns, Column, ColumnId};
pub use drag::Drag;
pub use manager::{ExitReason, Manager};
pub use pane::{Handle, MockHandle, Pane, PaneFlags, PaneId, Prompt, WindowHandle};
pub use screen::BBox;
pub use surface::{Protocols, SizeHints, SurfaceInfo, VisibilityState};
pub use window_change::WindowChange;
