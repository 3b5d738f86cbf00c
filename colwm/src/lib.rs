//! Hosting side of colwm: the concrete configuration, logging and the replay display server.
mod config;
pub mod replay;
pub mod utils;

pub use config::Config;
pub use replay::{ReplayDisplayServer, ReplayHandle};
