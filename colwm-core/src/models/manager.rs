use super::Handle;
use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::errors::Result;
use crate::state::State;
use crate::utils::child_process::Children;
use serde::{Deserialize, Serialize};
use std::sync::{atomic::AtomicBool, Arc};

/// How the event loop ended, the host decides what to do with it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    /// Replace the whole process with a fresh one.
    Restart,
}

/// Maintains current program state.
#[derive(Debug)]
pub struct Manager<H: Handle, C, SERVER> {
    pub state: State<H>,
    pub config: C,

    pub(crate) children: Children,
    pub(crate) reap_requested: Arc<AtomicBool>,
    pub(crate) exit: Option<ExitReason>,
    pub display_server: SERVER,
}

impl<H: Handle, C, SERVER> Manager<H, C, SERVER>
where
    C: Config,
    SERVER: DisplayServer<H>,
{
    /// # Errors
    ///
    /// When the display server cannot be connected to.
    pub fn new(config: C) -> Result<Self> {
        let display_server = SERVER::new(&config)?;

        Ok(Self {
            state: State::new(&config),
            config,
            children: Children::default(),
            reap_requested: Arc::default(),
            exit: None,
            display_server,
        })
    }

    pub fn register_child_hook(&self) {
        crate::child_process::register_child_hook(self.reap_requested.clone());
    }

    /// Stop the event loop after the current event.
    pub fn quit(&mut self) {
        self.exit = Some(ExitReason::Quit);
    }

    /// Stop the event loop and ask the host to start over.
    pub fn restart(&mut self) {
        self.exit = Some(ExitReason::Restart);
    }
}

#[cfg(test)]
impl
    Manager<
        super::MockHandle,
        crate::config::tests::TestConfig,
        crate::display_servers::MockDisplayServer,
    >
{
    pub fn new_test() -> Self {
        Self::new_test_with(crate::config::tests::TestConfig::default())
    }

    pub fn new_test_with(config: crate::config::tests::TestConfig) -> Self {
        match Self::new(config) {
            Ok(manager) => manager,
            Err(err) => panic!("mock display server failed: {err}"),
        }
    }
}
