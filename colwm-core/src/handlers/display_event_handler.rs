use super::{Config, DisplayEvent, Manager};
use crate::display_servers::DisplayServer;
use crate::models::Handle;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Process a collection of events, and apply them changes to a manager.
    /// Returns true if changes need to be rendered.
    pub fn display_event_handler(&mut self, event: DisplayEvent<H>) -> bool {
        match event {
            DisplayEvent::ScreensCreate(regions) => {
                let count = self.config.column_count();
                self.state.screens_create_handler(&regions, count)
            }

            DisplayEvent::MapRequest(info) => self.map_request_handler(&info),
            DisplayEvent::ExistingWindow(info) => self.existing_window_handler(&info),
            DisplayEvent::FrameCreated(pane, frame) => self.frame_created_handler(pane, frame),
            DisplayEvent::WindowMapped(handle) => self.window_mapped_handler(&handle),
            DisplayEvent::WindowUnmapped(handle) => self.window_unmapped_handler(&handle),
            DisplayEvent::WindowDestroy(handle) => self.window_destroyed_handler(&handle),
            DisplayEvent::WindowChange(change) => self.window_changed_handler(change),

            // Nothing to do until the client asks to be mapped.
            DisplayEvent::WindowCreate(handle) => {
                tracing::trace!("window {:?} created", handle);
                false
            }
            DisplayEvent::WindowReparent(handle, parent) => {
                tracing::trace!("window {:?} reparented to {:?}", handle, parent);
                false
            }

            DisplayEvent::ConfigureRequest(handle, bbox) => {
                self.configure_request_handler(&handle, bbox)
            }
            DisplayEvent::ResizeRequest(handle, height) => {
                self.resize_request_handler(&handle, height)
            }

            DisplayEvent::ButtonPress(click) => self.button_press_handler(&click),
            DisplayEvent::ButtonRelease(click) => self.button_release_handler(&click),
            DisplayEvent::Motion(x_root, y_root) => self.motion_handler(x_root, y_root),

            DisplayEvent::Expose(handle) => match self.state.find_pane(&handle) {
                Some(pane) => {
                    self.state.redraw(pane);
                    true
                }
                None => false,
            },

            DisplayEvent::SendCommand(command) => self.command_handler(&command),
            DisplayEvent::PromptSubmit(pane, text) => self.prompt_submit_handler(pane, &text),
            DisplayEvent::PromptCancel(pane) => self.prompt_cancel_handler(pane),
        }
    }
}
