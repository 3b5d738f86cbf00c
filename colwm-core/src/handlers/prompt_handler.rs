use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::models::{Handle, Manager, PaneId};
use crate::utils::child_process::exec_shell;
use crate::DisplayAction;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Opens the prompt on the focused pane with the command it was last started with.
    pub(crate) fn edit_command(&mut self) -> Option<bool> {
        let focus = self.state.focus?;
        let pane = self.state.panes.get_mut(&focus)?;
        pane.flags.editing = true;
        let text = pane.prompt.text.clone();
        self.state.redraw(focus);
        self.state
            .actions
            .push_back(DisplayAction::OpenPrompt { pane: focus, text });
        Some(true)
    }

    /// Adds an empty pane after the focus and opens the prompt in it.
    pub(crate) fn new_command(&mut self) -> Option<bool> {
        let column = self.state.focus_column?;
        let after = self
            .state
            .focus
            .filter(|f| self.state.panes.get(f).and_then(|p| p.column()) == Some(column));
        let id = self.state.create_placeholder();
        self.state.manage_pane(id, column, after);
        self.state.focus_pane(Some(id));
        self.state.actions.push_back(DisplayAction::OpenPrompt {
            pane: id,
            text: String::new(),
        });
        self.state.debug_check();
        Some(true)
    }

    /// The user confirmed a command. An empty pane launches it and goes away, a client is closed
    /// and relaunched with it.
    pub fn prompt_submit_handler(&mut self, pane: PaneId, text: &str) -> bool {
        let Some(p) = self.state.panes.get_mut(&pane) else {
            return false;
        };
        let text = text.trim();
        p.flags.editing = false;
        p.prompt.text = text.to_owned();
        if p.flags.placeholder {
            if !text.is_empty() && exec_shell(text, &mut self.children).is_none() {
                tracing::warn!("unable to launch {:?}", text);
            }
            self.destroy_pane(pane);
            return true;
        }
        if text.is_empty() {
            self.state.redraw(pane);
            return true;
        }
        p.flags.want_restart = true;
        self.close_pane(pane);
        true
    }

    pub fn prompt_cancel_handler(&mut self, pane: PaneId) -> bool {
        let Some(p) = self.state.panes.get_mut(&pane) else {
            return false;
        };
        p.flags.editing = false;
        if p.flags.placeholder {
            self.destroy_pane(pane);
        } else {
            self.state.redraw(pane);
        }
        true
    }
}
