#![allow(clippy::wildcard_imports)]

use super::*;
use crate::display_servers::DisplayServer;
use crate::models::{ColumnId, Handle, PaneId};
use crate::state::State;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Processes a command and invokes the associated function.
    ///
    /// Returns `true` if changes need to be rendered.
    pub fn command_handler(&mut self, command: &Command) -> bool {
        tracing::debug!("command {:?}", command);
        process_internal(self, command).unwrap_or(false)
    }
}

fn process_internal<H: Handle, C: Config, SERVER: DisplayServer<H>>(
    manager: &mut Manager<H, C, SERVER>,
    command: &Command,
) -> Option<bool> {
    let state = &mut manager.state;
    match command {
        Command::FocusPane(direction) => focus_pane_change(state, *direction),
        Command::FocusColumn(direction) => focus_column_change(state, *direction),
        Command::MovePane(direction) => move_pane_change(state, *direction),
        Command::MoveColumn(direction) => move_column_change(state, *direction),

        Command::ClosePane => {
            let focus = state.focus?;
            manager.close_pane(focus);
            Some(true)
        }
        Command::ToggleFullScreen => toggle_fullscreen(state),
        Command::ToggleKeepOpen => {
            state.toggle_keep_open(state.focus?);
            Some(true)
        }
        Command::ToggleMinimize => {
            state.toggle_minimize(state.focus?);
            Some(true)
        }
        Command::MinimizeOthers => {
            state.minimize_others(state.focus?);
            Some(true)
        }

        Command::EditCommand => manager.edit_command(),
        Command::NewCommand => manager.new_command(),
        Command::RestartCommand => restart_command(manager),

        Command::PreviousFocus => {
            let previous = state.previous_focus(state.focus)?;
            state.focus_pane(Some(previous));
            Some(true)
        }
        Command::ResizePane(delta) => Some(state.resize_adjust(state.focus?, *delta)),

        Command::Quit => {
            manager.quit();
            None
        }
        Command::RestartManager => {
            manager.restart();
            None
        }
    }
}

/// Without a focus the first pane of the focus column is picked.
fn focus_pane_change<H: Handle>(state: &mut State<H>, direction: Direction) -> Option<bool> {
    let next = match state.focus {
        Some(focus) => state.cycle_pane(focus, direction)?,
        None => state.columns.get(state.focus_column?)?.first()?,
    };
    state.focus_pane(Some(next));
    Some(true)
}

/// Lands on the pane of the next non-empty column that sits at the height of the focus.
fn focus_column_change<H: Handle>(state: &mut State<H>, direction: Direction) -> Option<bool> {
    if state.columns.is_empty() {
        return Some(false);
    }
    let current = state.focus_column.unwrap_or(0);
    // With every column empty the first one takes the focus.
    let column = state.cycle_column(current, 1, direction).unwrap_or(0);
    let y = state
        .focus
        .and_then(|f| state.panes.get(&f))
        .map_or(0, |p| p.y);
    state.focus_column(column);
    if let Some(pane) = state.find_pane_by_vpos(y, column) {
        state.focus_pane(Some(pane));
    }
    Some(true)
}

/// Swaps the focus with its neighbour, wrapping to the other end of the column.
fn move_pane_change<H: Handle>(state: &mut State<H>, direction: Direction) -> Option<bool> {
    let focus = state.focus?;
    let pane = state.panes.get(&focus)?;
    let column = pane.column()?;
    if state.columns.get(column)?.len() < 2 {
        return Some(false);
    }
    let (target, after) = match direction {
        Direction::Forward => (focus, pane.next()),
        Direction::Backward => match pane.prev() {
            Some(prev) => (prev, Some(focus)),
            None => (focus, state.columns.get(column)?.last()),
        },
    };
    state.move_pane(target, column, after);
    state.focus_pane(Some(focus));
    state.debug_check();
    Some(true)
}

/// Moves the focus into the next column, right below its first pane.
fn move_column_change<H: Handle>(state: &mut State<H>, direction: Direction) -> Option<bool> {
    let focus = state.focus?;
    let current = state.panes.get(&focus)?.column()?;
    let column = state.cycle_column(current, 0, direction)?;
    if column == current {
        return Some(false);
    }
    move_to_column(state, focus, column);
    Some(true)
}

fn move_to_column<H: Handle>(state: &mut State<H>, pane: PaneId, column: ColumnId) {
    tracing::trace!("moving pane {} to column {}", pane, column);
    let after = state.columns.get(column).and_then(|c| c.first());
    state.move_pane(pane, column, after);
    state.focus_pane(Some(pane));
    state.debug_check();
}

fn toggle_fullscreen<H: Handle>(state: &mut State<H>) -> Option<bool> {
    let focus = state.focus?;
    let pane = state.panes.get_mut(&focus)?;
    pane.flags.fullscreen = !pane.flags.fullscreen;
    let column = pane.column()?;
    state.redraw(focus);
    state.commit_column(column);
    Some(true)
}

/// The focused client is closed and launched again from the command line it was started with.
fn restart_command<H: Handle, C: Config, SERVER: DisplayServer<H>>(
    manager: &mut Manager<H, C, SERVER>,
) -> Option<bool> {
    let focus = manager.state.focus?;
    let pane = manager.state.panes.get_mut(&focus)?;
    if pane.command.is_empty() && pane.prompt.text.is_empty() {
        tracing::debug!("pane {} has no command to restart", focus);
        return Some(false);
    }
    pane.flags.want_restart = true;
    manager.close_pane(focus);
    Some(true)
}
