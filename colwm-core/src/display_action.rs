use crate::models::{BBox, Handle, Pane, PaneId, VisibilityState, WindowHandle};
use serde::{Deserialize, Serialize};

/// How input focus is handed to a pane.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFocus {
    /// Nothing to type into, the frame takes the keyboard.
    Frame,
    /// The client asked to be told through its take focus protocol.
    Protocol,
    Direct,
}

/// Geometry of one pane, as decided by a commit of its column.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PaneGeometry<H: Handle> {
    pub pane: PaneId,
    #[serde(bound = "")]
    pub frame: Option<WindowHandle<H>>,
    #[serde(bound = "")]
    pub window: Option<WindowHandle<H>>,
    pub frame_bbox: BBox,
    /// Client area relative to the frame, absent for panes without a surface.
    pub client_bbox: Option<BBox>,
    /// Stack the frame above its siblings.
    pub raise: bool,
}

/// What the decoration collaborator needs to paint a titlebar.
#[allow(clippy::struct_excessive_bools)]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Decoration<H: Handle> {
    pub pane: PaneId,
    #[serde(bound = "")]
    pub frame: Option<WindowHandle<H>>,
    pub title: Option<String>,
    pub focused: bool,
    pub keep_open: bool,
    pub minimized: bool,
    pub editing: bool,
}

impl<H: Handle> From<&Pane<H>> for Decoration<H> {
    fn from(pane: &Pane<H>) -> Self {
        Self {
            pane: pane.id,
            frame: pane.frame,
            title: pane.title().map(ToOwned::to_owned),
            focused: pane.flags.focused,
            keep_open: pane.flags.keep_open,
            minimized: pane.flags.minimized,
            editing: pane.flags.editing,
        }
    }
}

/// These are responses from the Window manager.
/// The display server should act on these actions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum DisplayAction<H: Handle> {
    /// Create the decorated frame of a pane and reparent the client, if any, into it.
    /// Answered with `DisplayEvent::FrameCreated`.
    #[serde(bound = "")]
    CreateFrame {
        pane: PaneId,
        window: Option<WindowHandle<H>>,
        bbox: BBox,
    },

    #[serde(bound = "")]
    DestroyFrame(WindowHandle<H>),

    /// An override redirect window, leave it alone but make sure it is visible.
    #[serde(bound = "")]
    ShowUnmanaged(WindowHandle<H>),

    #[serde(bound = "")]
    SetVisibilityState(WindowHandle<H>, VisibilityState),

    #[serde(bound = "")]
    MapWindow(WindowHandle<H>),

    #[serde(bound = "")]
    UnmapWindow(WindowHandle<H>),

    /// Commit the geometry of a pane. Fails with `TargetGone` when the surface vanished.
    #[serde(bound = "")]
    ConfigurePane(PaneGeometry<H>),

    /// Answer a configure request of a client.
    #[serde(bound = "")]
    ConfigureWindow(WindowHandle<H>, BBox),

    #[serde(bound = "")]
    SetInputFocus(WindowHandle<H>, InputFocus),

    #[serde(bound = "")]
    Redraw(Decoration<H>),

    /// XOR outline of a dragged pane, drawing it a second time erases it.
    DrawOutline { pane: PaneId, bbox: BBox },

    #[serde(bound = "")]
    RaiseFrame(WindowHandle<H>),

    /// Hand a pointer click that focused nothing over to the client.
    #[serde(bound = "")]
    ReplayClick(WindowHandle<H>),

    /// Nicely ask a window if it would please close at its convenience.
    #[serde(bound = "")]
    SendDeleteRequest(WindowHandle<H>),

    #[serde(bound = "")]
    KillClient(WindowHandle<H>),

    /// Open the command prompt in the titlebar of a pane.
    OpenPrompt { pane: PaneId, text: String },
}
