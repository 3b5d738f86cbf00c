//! Various shared functions that colwm uses.
pub mod child_process;
