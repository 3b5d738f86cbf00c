//! The column layout and window lifecycle core of colwm.
// We deny clippy pedantic lints, primarily to keep code as correct as possible
#![warn(clippy::pedantic)]
// Each of these lints are globally allowed because they otherwise make a lot
// of noise.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::must_use_candidate,
    clippy::default_trait_access,
    clippy::module_name_repetitions
)]
mod command;
pub mod config;
pub mod display_action;
pub mod display_event;
pub mod display_servers;
pub mod errors;
mod event_loop;
pub mod geometry;
mod handlers;
pub mod models;
pub mod state;
pub mod utils;

pub use command::{Command, Direction};
pub use config::Config;
pub use display_action::DisplayAction;
pub use display_event::DisplayEvent;
pub use display_servers::DisplayServer;
pub use models::{ExitReason, Handle, Manager, WindowHandle};
pub use state::State;
pub use utils::child_process;
