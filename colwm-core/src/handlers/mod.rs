pub mod command_handler;
pub mod display_event_handler;
mod column_handler;
mod focus_handler;
mod minimize_handler;
mod mouse_handler;
mod prompt_handler;
mod screen_create_handler;
mod window_handler;

use super::command::{Command, Direction};
use super::config::Config;
use super::models::Manager;
use super::DisplayEvent;
