use super::Config;
use super::DisplayEvent;
use super::DisplayServer;
use crate::display_action::DisplayAction;
use crate::errors::{DisplayError, Result};
use crate::models::{MockHandle, WindowHandle};

/// Frames handed out by the mock are numbered from here on, by pane id.
pub const FRAME_BASE: MockHandle = 10_000;

#[derive(Clone, Debug, Default)]
pub struct MockDisplayServer {
    /// Events returned by the next call to `get_next_events`.
    pub events: Vec<DisplayEvent<MockHandle>>,
    pub executed: Vec<DisplayAction<MockHandle>>,
    /// Surfaces destroyed on the server whose notification was not handled yet.
    pub gone: Vec<WindowHandle<MockHandle>>,
}

impl MockDisplayServer {
    fn is_gone(&self, handle: Option<&WindowHandle<MockHandle>>) -> bool {
        handle.map_or(false, |handle| self.gone.contains(handle))
    }
}

impl DisplayServer<MockHandle> for MockDisplayServer {
    fn new(_: &impl Config) -> Result<Self> {
        Ok(Self::default())
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent<MockHandle>> {
        std::mem::take(&mut self.events)
    }

    fn execute_action(
        &mut self,
        act: DisplayAction<MockHandle>,
    ) -> std::result::Result<Option<DisplayEvent<MockHandle>>, DisplayError> {
        let gone = match &act {
            DisplayAction::ConfigurePane(geometry) => {
                self.is_gone(geometry.window.as_ref()) || self.is_gone(geometry.frame.as_ref())
            }
            DisplayAction::ConfigureWindow(handle, _) => self.is_gone(Some(handle)),
            _ => false,
        };
        let reply = match &act {
            DisplayAction::CreateFrame { pane, .. } => {
                let frame = FRAME_BASE + MockHandle::try_from(*pane).unwrap_or(MockHandle::MAX);
                Some(DisplayEvent::FrameCreated(*pane, WindowHandle(frame)))
            }
            _ => None,
        };
        self.executed.push(act);
        if gone {
            return Err(DisplayError::TargetGone);
        }
        Ok(reply)
    }

    fn wait_readable(&self) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()>>> {
        Box::pin(futures::future::ready(()))
    }

    fn flush(&self) {}
}
