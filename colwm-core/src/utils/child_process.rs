//! Launches the commands of restarted panes and the new command prompt, and keeps track of the
//! children until they are reaped.
use std::collections::HashMap;
use std::process::{Child, Command, Stdio};
use std::sync::{atomic::AtomicBool, Arc};

pub type ChildID = u32;

/// A struct managing children processes.
#[derive(Debug, Default)]
pub struct Children {
    inner: HashMap<ChildID, Child>,
}

impl Children {
    /// Insert a `Child` in the `Children`.
    ///
    /// # Returns
    /// - `true` if `child` is a new child-process
    /// - `false` if `child` is already known
    pub fn insert(&mut self, child: Child) -> bool {
        self.inner.insert(child.id(), child).is_none()
    }

    /// Remove all children precosses which finished
    pub fn remove_finished_children(&mut self) {
        self.inner
            .retain(|_, child| child.try_wait().map_or(true, |ret| ret.is_none()));
    }
}

/// Register the `SIGCHLD` signal handler. Once the signal is received,
/// the flag will be set true. User needs to manually clear the flag.
pub fn register_child_hook(flag: Arc<AtomicBool>) {
    _ = signal_hook::flag::register(signal_hook::consts::signal::SIGCHLD, flag)
        .map_err(|err| tracing::error!("Cannot register SIGCHLD signal handler: {:?}", err));
}

/// Sends command to shell for execution
/// Assumes STDIN/STDERR/STDOUT unwanted.
pub fn exec_shell(command: &str, children: &mut Children) -> Option<ChildID> {
    spawn(Command::new("sh").arg("-c").arg(command), children)
}

/// Runs an argument vector as captured from a client, without a shell in between.
pub fn exec_argv(argv: &[String], children: &mut Children) -> Option<ChildID> {
    let (program, args) = argv.split_first()?;
    spawn(Command::new(program).args(args), children)
}

fn spawn(command: &mut Command, children: &mut Children) -> Option<ChildID> {
    let child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|err| tracing::warn!("Unable to launch {:?}: {}", command, err))
        .ok()?;
    let pid = child.id();
    children.insert(child);
    Some(pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_argv_launches_nothing() {
        let mut children = Children::default();
        assert_eq!(exec_argv(&[], &mut children), None);
        assert!(children.inner.is_empty());
    }

    #[test]
    fn finished_children_are_reaped() {
        let mut children = Children::default();
        let pid = exec_argv(&["true".to_owned()], &mut children);
        assert!(pid.is_some());
        assert_eq!(children.inner.len(), 1);
        for child in children.inner.values_mut() {
            _ = child.wait();
        }
        children.remove_finished_children();
        assert!(children.inner.is_empty());
    }
}
