//! Pane Information
#![allow(clippy::module_name_repetitions)]

use std::fmt::Debug;

use super::{ColumnId, SizeHints, SurfaceInfo};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A trait which backend specific window handles need to implement
pub trait Handle:
    Serialize + DeserializeOwned + Debug + Clone + Copy + PartialEq + Eq + Default + Send + 'static
{
}

/// A Backend-agnostic handle to a window used to identify it
///
/// # Serde
///
/// Using generics here with serde derive macros causes some wierd behaviour with the compiler, so
/// as suggested by [this `serde` issue][serde-issue], just adding `#[serde(bound = "")]`
/// everywhere the generic is declared fixes the bug.
///
/// [serde-issue]: https://github.com/serde-rs/serde/issues/1296
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHandle<H>(#[serde(bound = "")] pub H)
where
    H: Handle;

/// Handle for testing purposes
pub type MockHandle = i32;
impl Handle for MockHandle {}

/// Stable identity of a pane, handed out from a counter that never goes back.
pub type PaneId = u64;

#[allow(clippy::struct_excessive_bools)]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaneFlags {
    pub focused: bool,
    pub minimized: bool,
    pub hidden: bool,
    /// Pinned: skipped when the other panes of a column are hidden.
    pub keep_open: bool,
    pub fullscreen: bool,
    pub mapped: bool,
    pub dirty: bool,
    pub has_delete_window: bool,
    pub has_take_focus: bool,
    pub want_restart: bool,
    pub captured: bool,
    pub editing: bool,
    /// Created from the new command prompt, there is no client behind it.
    pub placeholder: bool,
    pub hide_others_leader: bool,
}

impl PaneFlags {
    /// Panes without a surface only show their titlebar.
    #[must_use]
    pub const fn without_surface(&self) -> bool {
        self.placeholder || self.minimized || self.hidden
    }
}

/// Text entry state of the prompt shown in a pane's titlebar.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Pane<H: Handle> {
    pub id: PaneId,
    #[serde(bound = "")]
    pub window: Option<WindowHandle<H>>,
    #[serde(bound = "")]
    pub frame: Option<WindowHandle<H>>,
    pub flags: PaneFlags,
    pub height: i32,
    pub adjusted_height: i32,
    pub min_height: Option<i32>,
    pub max_height: Option<i32>,
    pub y: i32,
    /// Horizontal position the surface asked for when it was discovered.
    pub origin_x: i32,
    pub name: Option<String>,
    pub icon_name: Option<String>,
    pub command: Vec<String>,
    pub prompt: Prompt,
    pub recency: u64,
    pub(crate) column: Option<ColumnId>,
    pub(crate) prev: Option<PaneId>,
    pub(crate) next: Option<PaneId>,
}

impl<H: Handle> Pane<H> {
    #[must_use]
    pub fn new(id: PaneId, window: Option<WindowHandle<H>>) -> Self {
        Self {
            id,
            window,
            frame: None,
            flags: PaneFlags::default(),
            height: 0,
            adjusted_height: 0,
            min_height: None,
            max_height: None,
            y: 0,
            origin_x: 0,
            name: None,
            icon_name: None,
            command: vec![],
            prompt: Prompt::default(),
            recency: 0,
            column: None,
            prev: None,
            next: None,
        }
    }

    /// Builds the pane for a surface reported by the display server.
    #[must_use]
    pub fn from_surface(id: PaneId, info: &SurfaceInfo<H>) -> Self {
        let mut pane = Self::new(id, Some(info.handle));
        pane.name = info.name.clone();
        pane.icon_name = info.icon_name.clone();
        pane.command = info.command.clone();
        pane.origin_x = info.x;
        pane.flags.has_delete_window = info.protocols.delete_window;
        pane.flags.has_take_focus = info.protocols.take_focus;
        pane.flags.minimized = info.iconic;
        pane.min_height = info.hints.min_height();
        pane.max_height = info.hints.max_height;
        pane
    }

    #[must_use]
    pub fn placeholder(id: PaneId) -> Self {
        let mut pane = Self::new(id, None);
        pane.flags.placeholder = true;
        pane.flags.editing = true;
        pane
    }

    #[must_use]
    pub const fn column(&self) -> Option<ColumnId> {
        self.column
    }

    #[must_use]
    pub const fn prev(&self) -> Option<PaneId> {
        self.prev
    }

    #[must_use]
    pub const fn next(&self) -> Option<PaneId> {
        self.next
    }

    #[must_use]
    pub const fn is_detached(&self) -> bool {
        self.column.is_none() && self.prev.is_none() && self.next.is_none()
    }

    #[must_use]
    pub const fn without_surface(&self) -> bool {
        self.flags.without_surface()
    }

    /// Whether the handle is either the client or the frame of this pane.
    #[must_use]
    pub fn owns(&self, handle: &WindowHandle<H>) -> bool {
        self.window.as_ref() == Some(handle) || self.frame.as_ref() == Some(handle)
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.name.as_deref().or(self.icon_name.as_deref())
    }

    /// Clamps a client height to the size constraints of this pane.
    #[must_use]
    pub fn clamp_height(&self, height: i32) -> i32 {
        let mut height = height;
        if let Some(min) = self.min_height {
            height = height.max(min);
        }
        if let Some(max) = self.max_height.filter(|max| *max > 0) {
            height = height.min(max);
        }
        height
    }
}
