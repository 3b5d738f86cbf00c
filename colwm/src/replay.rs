//! A display server without a display: events are read from a script of JSON lines and every
//! action the core asks for is written out as a JSON line.
//!
//! One event per line, an empty line ends a batch. Each batch is handed to the core as if the
//! server had reported it at once. When the script runs out the session is ended with a `Quit`.
use colwm_core::display_servers::DisplayServer;
use colwm_core::errors::{ColwmError, DisplayError, Result};
use colwm_core::{Command, Config, DisplayAction, DisplayEvent, Handle, WindowHandle};
use futures::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::pin::Pin;

/// Environment variable naming the script to replay, stdin is read when it is not set.
pub const SCRIPT_ENV: &str = "COLWM_REPLAY";

/// Frames created during a replay are numbered from here on, by pane id.
pub const FRAME_BASE: u32 = 1_000_000;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct ReplayHandle(pub u32);

impl Handle for ReplayHandle {}

pub struct ReplayDisplayServer {
    script: Box<dyn BufRead>,
    out: Box<dyn Write>,
    /// Surfaces whose destroy notification was read already. Actions on them fail the way they
    /// would on a real server.
    gone: Vec<WindowHandle<ReplayHandle>>,
    line: usize,
    finished: bool,
}

impl std::fmt::Debug for ReplayDisplayServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplayDisplayServer")
            .field("gone", &self.gone)
            .field("line", &self.line)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl ReplayDisplayServer {
    pub fn from_reader(script: Box<dyn BufRead>, out: Box<dyn Write>) -> Self {
        Self {
            script,
            out,
            gone: vec![],
            line: 0,
            finished: false,
        }
    }

    /// Reads up to the next empty line. Lines that are not events are logged and skipped.
    fn read_batch(&mut self) -> Vec<DisplayEvent<ReplayHandle>> {
        let mut events = vec![];
        let mut buf = String::new();
        loop {
            buf.clear();
            match self.script.read_line(&mut buf) {
                Ok(0) => {
                    self.finished = true;
                    break;
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::error!("reading the replay script failed: {}", err);
                    self.finished = true;
                    break;
                }
            }
            self.line += 1;
            let line = buf.trim();
            if line.is_empty() {
                if events.is_empty() {
                    continue;
                }
                break;
            }
            if line.starts_with('#') {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(event) => events.push(event),
                Err(err) => tracing::warn!("line {}: not an event: {}", self.line, err),
            }
        }
        events
    }

    fn is_gone(&self, handle: Option<&WindowHandle<ReplayHandle>>) -> bool {
        handle.map_or(false, |handle| self.gone.contains(handle))
    }

    fn target_gone(&self, act: &DisplayAction<ReplayHandle>) -> bool {
        match act {
            DisplayAction::ConfigurePane(geometry) => {
                self.is_gone(geometry.window.as_ref()) || self.is_gone(geometry.frame.as_ref())
            }
            DisplayAction::ConfigureWindow(handle, _)
            | DisplayAction::SetVisibilityState(handle, _)
            | DisplayAction::MapWindow(handle)
            | DisplayAction::UnmapWindow(handle)
            | DisplayAction::SetInputFocus(handle, _)
            | DisplayAction::SendDeleteRequest(handle)
            | DisplayAction::KillClient(handle) => self.is_gone(Some(handle)),
            _ => false,
        }
    }
}

impl DisplayServer<ReplayHandle> for ReplayDisplayServer {
    fn new(_: &impl Config) -> Result<Self> {
        let script: Box<dyn BufRead> = match std::env::var_os(SCRIPT_ENV) {
            Some(path) if path.is_empty() => {
                return Err(ColwmError::DisplayConnection(format!(
                    "{SCRIPT_ENV} is set but names no script"
                )));
            }
            Some(path) => {
                let file = File::open(&path).map_err(|err| {
                    tracing::error!("cannot open replay script {:?}: {}", path, err);
                    err
                })?;
                Box::new(BufReader::new(file))
            }
            None => Box::new(BufReader::new(std::io::stdin())),
        };
        Ok(Self::from_reader(script, Box::new(std::io::stdout())))
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent<ReplayHandle>> {
        if self.finished {
            return vec![DisplayEvent::SendCommand(Command::Quit)];
        }
        let events = self.read_batch();
        for event in &events {
            if let DisplayEvent::WindowDestroy(handle) = event {
                self.gone.push(*handle);
            }
        }
        events
    }

    fn execute_action(
        &mut self,
        act: DisplayAction<ReplayHandle>,
    ) -> std::result::Result<Option<DisplayEvent<ReplayHandle>>, DisplayError> {
        if self.target_gone(&act) {
            return Err(DisplayError::TargetGone);
        }
        let line =
            serde_json::to_string(&act).map_err(|err| DisplayError::Protocol(err.to_string()))?;
        writeln!(self.out, "{line}").map_err(|err| DisplayError::Protocol(err.to_string()))?;

        let reply = match act {
            DisplayAction::CreateFrame { pane, .. } => {
                let frame = FRAME_BASE.saturating_add(u32::try_from(pane).unwrap_or(u32::MAX));
                Some(DisplayEvent::FrameCreated(
                    pane,
                    WindowHandle(ReplayHandle(frame)),
                ))
            }
            _ => None,
        };
        Ok(reply)
    }

    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>> {
        Box::pin(future::ready(()))
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use colwm_core::models::BBox;
    use std::io::{Read, Seek, SeekFrom};

    fn server(script: &str) -> (ReplayDisplayServer, File) {
        let out = tempfile::tempfile().unwrap();
        let server = ReplayDisplayServer::from_reader(
            Box::new(std::io::Cursor::new(script.to_owned())),
            Box::new(out.try_clone().unwrap()),
        );
        (server, out)
    }

    #[test]
    fn batches_end_at_empty_lines() {
        let script = r#"
{"ScreensCreate": [{"x": 0, "y": 0, "width": 800, "height": 600}]}
# a comment
{"MapRequest": {"handle": 5}}

{"WindowMapped": 5}
"#;
        let (mut server, _) = server(script);
        let first = server.get_next_events();
        assert_eq!(first.len(), 2);
        assert_eq!(
            first[0],
            DisplayEvent::ScreensCreate(vec![BBox::new(0, 0, 800, 600)])
        );
        assert_eq!(
            server.get_next_events(),
            vec![DisplayEvent::WindowMapped(WindowHandle(ReplayHandle(5)))]
        );
        assert_eq!(
            server.get_next_events(),
            vec![DisplayEvent::SendCommand(Command::Quit)]
        );
    }

    #[test]
    fn bad_lines_are_skipped() {
        let (mut server, _) = server("{\"WindowMapped\": 5}\nnot json\n{\"WindowUnmapped\": 5}\n");
        assert_eq!(server.get_next_events().len(), 2);
    }

    #[test]
    fn frames_are_answered_and_actions_written_out() {
        let (mut server, mut out) = server("");
        let reply = server
            .execute_action(DisplayAction::CreateFrame {
                pane: 3,
                window: Some(WindowHandle(ReplayHandle(5))),
                bbox: BBox::new(0, 0, 100, 100),
            })
            .unwrap();
        assert_eq!(
            reply,
            Some(DisplayEvent::FrameCreated(
                3,
                WindowHandle(ReplayHandle(FRAME_BASE + 3))
            ))
        );

        out.seek(SeekFrom::Start(0)).unwrap();
        let mut written = String::new();
        out.read_to_string(&mut written).unwrap();
        let act: DisplayAction<ReplayHandle> = serde_json::from_str(written.trim()).unwrap();
        assert!(matches!(act, DisplayAction::CreateFrame { pane: 3, .. }));
    }

    #[test]
    fn unusable_scripts_are_reported() {
        let config = crate::Config::default();
        std::env::set_var(SCRIPT_ENV, "");
        let empty = ReplayDisplayServer::new(&config);
        std::env::set_var(SCRIPT_ENV, "/nonexistent/colwm/replay.jsonl");
        let missing = ReplayDisplayServer::new(&config);
        std::env::remove_var(SCRIPT_ENV);

        assert!(matches!(empty, Err(ColwmError::DisplayConnection(_))));
        assert!(matches!(missing, Err(ColwmError::IoError(_))));
    }

    #[test]
    fn destroyed_windows_refuse_actions() {
        let (mut server, _) = server("{\"WindowDestroy\": 5}\n");
        server.get_next_events();
        let result = server.execute_action(DisplayAction::MapWindow(WindowHandle(ReplayHandle(5))));
        assert_eq!(result, Err(DisplayError::TargetGone));
        let result = server.execute_action(DisplayAction::MapWindow(WindowHandle(ReplayHandle(6))));
        assert_eq!(result, Ok(None));
    }
}
