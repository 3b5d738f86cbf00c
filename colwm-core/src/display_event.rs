use crate::models::{BBox, Handle, PaneId, SurfaceInfo, WindowChange, WindowHandle};
use crate::Command;
use serde::{Deserialize, Serialize};

/// Buttons drawn in a titlebar.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Close,
    KeepOpen,
}

/// A pointer button press or release.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Click<H: Handle> {
    #[serde(bound = "")]
    pub handle: WindowHandle<H>,
    /// Titlebar button under the pointer, if any.
    #[serde(default)]
    pub control: Option<FrameControl>,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub x_root: i32,
    #[serde(default)]
    pub y_root: i32,
    /// Server time in milliseconds.
    #[serde(default)]
    pub time: u64,
}

#[allow(clippy::large_enum_variant)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent<H: Handle> {
    ScreensCreate(Vec<BBox>),
    #[serde(bound = "")]
    WindowCreate(WindowHandle<H>),
    #[serde(bound = "")]
    MapRequest(SurfaceInfo<H>),
    /// A surface that already existed when the manager started.
    #[serde(bound = "")]
    ExistingWindow(SurfaceInfo<H>),
    #[serde(bound = "")]
    FrameCreated(PaneId, WindowHandle<H>),
    #[serde(bound = "")]
    WindowMapped(WindowHandle<H>),
    #[serde(bound = "")]
    WindowUnmapped(WindowHandle<H>),
    #[serde(bound = "")]
    WindowDestroy(WindowHandle<H>),
    #[serde(bound = "")]
    WindowReparent(WindowHandle<H>, WindowHandle<H>),
    #[serde(bound = "")]
    WindowChange(WindowChange<H>),
    #[serde(bound = "")]
    ConfigureRequest(WindowHandle<H>, BBox),
    /// A client wants a new client height.
    #[serde(bound = "")]
    ResizeRequest(WindowHandle<H>, i32),
    #[serde(bound = "")]
    ButtonPress(Click<H>),
    #[serde(bound = "")]
    ButtonRelease(Click<H>),
    Motion(i32, i32),
    #[serde(bound = "")]
    Expose(WindowHandle<H>),
    SendCommand(Command),
    PromptSubmit(PaneId, String),
    PromptCancel(PaneId),
}
