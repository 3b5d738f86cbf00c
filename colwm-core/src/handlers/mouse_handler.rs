use crate::config::Config;
use crate::display_event::{Click, FrameControl};
use crate::display_servers::DisplayServer;
use crate::models::{BBox, Handle, Manager, PaneId};
use crate::state::State;
use crate::DisplayAction;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// A press on a client focuses it, a press on a titlebar arms a drag.
    pub fn button_press_handler(&mut self, click: &Click<H>) -> bool {
        let Some(id) = self.state.find_pane(&click.handle) else {
            return false;
        };
        let Some(pane) = self.state.panes.get(&id) else {
            return false;
        };
        if pane.window.as_ref() == Some(&click.handle) {
            if pane.flags.focused {
                self.state
                    .actions
                    .push_back(DisplayAction::ReplayClick(click.handle));
                return false;
            }
            // Swallowed, it only moves the focus.
            self.state.focus_pane(Some(id));
            return true;
        }

        let frame = pane.frame;
        self.state.drag.pane = None;
        match click.control {
            Some(FrameControl::Close) => {
                self.close_pane(id);
                return true;
            }
            Some(FrameControl::KeepOpen) => {
                self.state.toggle_keep_open(id);
                return true;
            }
            None => {}
        }
        if let Some(frame) = frame {
            self.state.actions.push_back(DisplayAction::RaiseFrame(frame));
        }
        self.state.focus_pane(Some(id));
        self.state.drag.pane = Some(id);
        self.state.drag.offset_x = click.x;
        self.state.drag.offset_y = click.y;
        true
    }

    /// Moves the outline of a dragged pane along with the pointer.
    pub fn motion_handler(&mut self, x_root: i32, y_root: i32) -> bool {
        let state = &mut self.state;
        let Some(id) = state.drag.pane else {
            return false;
        };
        state.drag.last_release = None;
        if let Some((x, y)) = state.drag.outline.take() {
            state.draw_outline(id, x, y);
        }
        let (x, y) = (x_root - state.drag.offset_x, y_root - state.drag.offset_y);
        state.draw_outline(id, x, y);
        state.drag.outline = Some((x, y));
        false
    }

    /// Ends a drag: a quick second release on the same titlebar toggles minimize, otherwise the
    /// pane lands in the column under the pointer.
    pub fn button_release_handler(&mut self, click: &Click<H>) -> bool {
        let Some(id) = self.state.find_pane(&click.handle) else {
            return false;
        };
        if self.state.panes.get(&id).and_then(|p| p.window.as_ref()) == Some(&click.handle) {
            self.state
                .actions
                .push_back(DisplayAction::ReplayClick(click.handle));
            return false;
        }
        let state = &mut self.state;
        if let (Some((x, y)), Some(active)) = (state.drag.outline.take(), state.drag.pane) {
            state.draw_outline(active, x, y);
        }
        let Some(active) = state.drag.pane else {
            return false;
        };

        let double_click = matches!(
            state.drag.last_release,
            Some((pane, time)) if pane == active && click.time.saturating_sub(time) < state.double_click_ms
        );
        if double_click {
            tracing::trace!("double click on pane {}", active);
            state.drag.last_release = None;
            state.toggle_minimize(active);
        } else {
            state.drag.last_release = Some((active, click.time));
        }
        state.snap_pane(active, click.x_root);
        true
    }
}

impl<H: Handle> State<H> {
    /// XOR outline of a pane at a position, drawing it twice erases it.
    fn draw_outline(&mut self, pane: PaneId, x: i32, y: i32) {
        let Some(p) = self.panes.get(&pane) else {
            return;
        };
        let width = p
            .column()
            .and_then(|c| self.columns.get(c))
            .map_or(0, |c| c.width);
        let bbox = BBox::new(x, y, width, p.adjusted_height);
        self.actions
            .push_back(DisplayAction::DrawOutline { pane, bbox });
    }

    /// Moves a dragged pane to the top of the column under `x_root` if it is not there already.
    fn snap_pane(&mut self, pane: PaneId, x_root: i32) {
        self.drag.pane = None;
        let Some(column) = self.find_column(x_root) else {
            return;
        };
        let current = self.panes.get(&pane).and_then(|p| p.column());
        if current.is_none() || current == Some(column) {
            return;
        }
        tracing::trace!("snapping pane {} to column {}", pane, column);
        self.move_pane(pane, column, None);
        self.focus_pane(Some(pane));
        self.debug_check();
    }
}
