#[cfg(test)]
pub mod mock_display_server;

use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::errors::{DisplayError, Result};
use crate::models::Handle;
use crate::DisplayEvent;

use futures::prelude::*;
use std::pin::Pin;

#[cfg(test)]
pub use self::mock_display_server::MockDisplayServer;

pub trait DisplayServer<H: Handle> {
    /// Connects to the display server.
    ///
    /// # Errors
    ///
    /// When there is no display to connect to or another window manager owns it.
    fn new(config: &impl Config) -> Result<Self>
    where
        Self: Sized;

    fn get_next_events(&mut self) -> Vec<DisplayEvent<H>>;

    /// Carries out an action, some actions are answered with an event.
    ///
    /// # Errors
    ///
    /// `DisplayError::TargetGone` when the surface the action is about no longer exists.
    fn execute_action(
        &mut self,
        act: DisplayAction<H>,
    ) -> std::result::Result<Option<DisplayEvent<H>>, DisplayError>;

    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>>;

    fn flush(&self);
}
