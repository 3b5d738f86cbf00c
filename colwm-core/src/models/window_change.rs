use super::{Handle, Pane, WindowHandle};
use serde::{Deserialize, Serialize};

/// Property changes of a client, `None` meaning the property did not change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WindowChange<H: Handle> {
    #[serde(bound = "")]
    pub handle: WindowHandle<H>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon_name: Option<String>,
    #[serde(default)]
    pub command: Option<Vec<String>>,
}

impl<H: Handle> WindowChange<H> {
    #[must_use]
    pub const fn new(handle: WindowHandle<H>) -> Self {
        Self {
            handle,
            name: None,
            icon_name: None,
            command: None,
        }
    }

    /// Applies the change, returns whether the titlebar needs a redraw.
    pub fn update(self, pane: &mut Pane<H>) -> bool {
        let mut changed = false;
        if let Some(name) = self.name {
            changed = changed || pane.name.as_ref() != Some(&name);
            pane.name = Some(name);
        }
        if let Some(icon_name) = self.icon_name {
            changed = changed || pane.icon_name.as_ref() != Some(&icon_name);
            pane.icon_name = Some(icon_name);
        }
        if let Some(command) = self.command {
            pane.command = command;
        }
        changed
    }
}
