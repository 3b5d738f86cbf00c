use super::{Handle, WindowHandle};
use serde::{Deserialize, Serialize};

/// Window manager protocols a client advertises.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Protocols {
    #[serde(default)]
    pub delete_window: bool,
    #[serde(default)]
    pub take_focus: bool,
}

/// Vertical part of the normal size hints of a client.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeHints {
    #[serde(default)]
    pub base_height: Option<i32>,
    #[serde(default)]
    pub min_height: Option<i32>,
    #[serde(default)]
    pub max_height: Option<i32>,
    #[serde(default)]
    pub height_inc: Option<i32>,
}

impl SizeHints {
    /// Smallest height the client accepts.
    ///
    /// With base, increment and minimum all present the minimum counts increments on top of the
    /// base; otherwise the base wins over the minimum.
    #[must_use]
    pub fn min_height(&self) -> Option<i32> {
        match (self.base_height, self.height_inc, self.min_height) {
            (Some(base), Some(inc), Some(min)) => Some(base + inc * (min - 1).max(0)),
            (Some(base), _, _) => Some(base),
            (None, _, min) => min,
        }
    }
}

/// Value written to a client's persisted visibility state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityState {
    Normal,
    Iconic,
}

/// Everything the display server knows about a surface when it asks to be managed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SurfaceInfo<H: Handle> {
    #[serde(bound = "")]
    pub handle: WindowHandle<H>,
    #[serde(default)]
    pub override_redirect: bool,
    #[serde(default)]
    pub viewable: bool,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon_name: Option<String>,
    #[serde(default)]
    pub hints: SizeHints,
    /// The persisted visibility state says the client was iconified.
    #[serde(default)]
    pub iconic: bool,
    #[serde(default)]
    pub protocols: Protocols,
    #[serde(default)]
    pub command: Vec<String>,
}

impl<H: Handle> SurfaceInfo<H> {
    #[must_use]
    pub fn new(handle: WindowHandle<H>) -> Self {
        Self {
            handle,
            override_redirect: false,
            viewable: false,
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            name: None,
            icon_name: None,
            hints: SizeHints::default(),
            iconic: false,
            protocols: Protocols::default(),
            command: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_height_prefers_base_when_increments_are_missing() {
        let hints = SizeHints {
            base_height: Some(30),
            min_height: Some(50),
            ..SizeHints::default()
        };
        assert_eq!(hints.min_height(), Some(30));
        let hints = SizeHints {
            min_height: Some(50),
            ..SizeHints::default()
        };
        assert_eq!(hints.min_height(), Some(50));
        assert_eq!(SizeHints::default().min_height(), None);
    }
}
