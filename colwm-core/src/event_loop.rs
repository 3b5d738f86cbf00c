use crate::config::Config;
use crate::errors::DisplayError;
use crate::models::{ExitReason, Handle};
use crate::{DisplayEvent, DisplayServer, Manager};
use std::collections::VecDeque;
use std::sync::atomic::Ordering;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Runs until a command ends the session. Events are handled in the order the display server
    /// reports them, events answering an action are handled before new ones are read.
    pub async fn start_event_loop(&mut self) -> ExitReason {
        let mut event_buffer: VecDeque<DisplayEvent<H>> = VecDeque::new();
        loop {
            self.display_server.flush();

            if event_buffer.is_empty() {
                self.display_server.wait_readable().await;
                event_buffer.extend(self.display_server.get_next_events());
            }

            while let Some(event) = event_buffer.pop_front() {
                tracing::trace!("event {:?}", event);
                self.display_event_handler(event);
            }

            // Perform any actions requested by the handlers.
            self.execute_actions(&mut event_buffer);

            if self.reap_requested.swap(false, Ordering::SeqCst) {
                self.children.remove_finished_children();
            }

            if event_buffer.is_empty() {
                if let Some(reason) = self.exit.take() {
                    tracing::info!("leaving the event loop: {:?}", reason);
                    self.display_server.flush();
                    return reason;
                }
            }
        }
    }

    /// Hands the queued actions to the display server. A surface destroyed behind our back is
    /// expected, its destroy notification is on its way.
    pub(crate) fn execute_actions(&mut self, replies: &mut VecDeque<DisplayEvent<H>>) {
        while let Some(act) = self.state.actions.pop_front() {
            match self.display_server.execute_action(act) {
                Ok(Some(event)) => replies.push_back(event),
                Ok(None) => {}
                Err(DisplayError::TargetGone) => {
                    tracing::debug!("action target is gone, waiting for its destroy notification");
                }
                Err(err) => tracing::warn!("display action failed: {}", err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::display_action::PaneGeometry;
    use crate::display_servers::mock_display_server::FRAME_BASE;
    use crate::models::{BBox, ExitReason, Manager, MockHandle, SurfaceInfo, WindowHandle};
    use crate::{Command, DisplayAction, DisplayEvent};

    #[tokio::test]
    async fn runs_until_quit() {
        let mut manager = Manager::new_test();
        manager.display_server.events = vec![
            DisplayEvent::ScreensCreate(vec![BBox::new(0, 0, 800, 600)]),
            DisplayEvent::MapRequest(SurfaceInfo::new(WindowHandle(1))),
            DisplayEvent::WindowMapped(WindowHandle(1)),
            DisplayEvent::SendCommand(Command::Quit),
        ];
        assert_eq!(manager.start_event_loop().await, ExitReason::Quit);

        let pane = manager.state.find_pane(&WindowHandle(1)).unwrap();
        // The frame the server handed back was recorded before leaving.
        let frame = WindowHandle(FRAME_BASE + 1);
        assert_eq!(manager.state.panes[&pane].frame, Some(frame));
        assert_eq!(manager.state.focus, Some(pane));
        assert!(manager
            .display_server
            .executed
            .iter()
            .any(|act| matches!(act, DisplayAction::CreateFrame { pane: p, .. } if *p == pane)));
    }

    #[tokio::test]
    async fn restart_is_reported_to_the_host() {
        let mut manager = Manager::new_test();
        manager.display_server.events = vec![DisplayEvent::SendCommand(Command::RestartManager)];
        assert_eq!(manager.start_event_loop().await, ExitReason::Restart);
    }

    #[tokio::test]
    async fn actions_on_vanished_windows_are_swallowed() {
        let mut manager = Manager::new_test();
        manager.display_server.gone = vec![WindowHandle(2)];
        let mut events = vec![DisplayEvent::ScreensCreate(vec![BBox::new(0, 0, 800, 600)])];
        for handle in 1..=3 {
            events.push(DisplayEvent::MapRequest(SurfaceInfo::new(WindowHandle(handle))));
            events.push(DisplayEvent::WindowMapped(WindowHandle(handle)));
        }
        events.push(DisplayEvent::SendCommand(Command::Quit));
        manager.display_server.events = events;
        assert_eq!(manager.start_event_loop().await, ExitReason::Quit);

        let configured = |handle| {
            move |act: &DisplayAction<MockHandle>| {
                matches!(
                    act,
                    DisplayAction::ConfigurePane(PaneGeometry { window: Some(w), .. }) if *w == WindowHandle(handle)
                )
            }
        };
        let executed = &manager.display_server.executed;
        let first_failure = executed.iter().position(configured(2)).unwrap();
        let last_failure = executed.iter().rposition(configured(2)).unwrap();
        // The panes around the vanished one are still laid out after each failure.
        assert!(executed[first_failure..].iter().any(configured(1)));
        assert!(executed[last_failure..].iter().any(configured(3)));

        // Still managed until the destroy notification arrives.
        assert_eq!(manager.state.panes.len(), 3);
        for handle in 1..=3 {
            let pane = manager.state.find_pane(&WindowHandle(handle)).unwrap();
            assert_eq!(
                manager.state.panes[&pane].frame,
                Some(WindowHandle(FRAME_BASE + MockHandle::try_from(pane).unwrap()))
            );
        }
        assert!(manager.state.column_is_consistent(0));
        assert!(manager.state.actions.is_empty());
    }
}
