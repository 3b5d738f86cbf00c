use crate::models::{Handle, PaneId, VisibilityState};
use crate::state::State;
use crate::DisplayAction;

impl<H: Handle> State<H> {
    /// Brings the client of a pane in line with its minimized flag and lays its column out
    /// again. A minimized pane loses its pin.
    pub fn minimize(&mut self, pane: PaneId) {
        let Some(p) = self.panes.get_mut(&pane) else {
            return;
        };
        let minimized = p.flags.minimized;
        if minimized {
            p.flags.keep_open = false;
        } else if !p.without_surface() {
            // Back to the height it had before it went away.
            p.adjusted_height = p.height;
        }
        let (window, column) = (p.window, p.column);
        if let Some(window) = window {
            let (visibility, map) = if minimized {
                (VisibilityState::Iconic, DisplayAction::UnmapWindow(window))
            } else {
                (VisibilityState::Normal, DisplayAction::MapWindow(window))
            };
            self.actions
                .push_back(DisplayAction::SetVisibilityState(window, visibility));
            self.actions.push_back(map);
        }
        self.redraw(pane);
        if let Some(column) = column {
            self.resize_remove(column, pane);
            self.resize_add(column, pane);
            self.commit_column(column);
        }
    }

    pub fn toggle_minimize(&mut self, pane: PaneId) {
        let Some(p) = self.panes.get_mut(&pane) else {
            return;
        };
        p.flags.minimized = !p.flags.minimized;
        p.flags.hidden = false;
        self.minimize(pane);
    }

    /// Hides every unpinned pane in the column of `focus`, a second call brings back the panes
    /// the first one hid.
    pub fn minimize_others(&mut self, focus: PaneId) {
        let Some(p) = self.panes.get_mut(&focus) else {
            return;
        };
        let Some(column) = p.column else {
            return;
        };
        if p.flags.minimized {
            p.flags.minimized = false;
            p.flags.hidden = false;
            self.minimize(focus);
        }
        let Some(p) = self.panes.get_mut(&focus) else {
            return;
        };
        let was_leader = p.flags.hide_others_leader;
        p.flags.hide_others_leader = !was_leader;

        for id in self.column_panes(column) {
            let Some(p) = self.panes.get_mut(&id) else {
                continue;
            };
            if id == focus || p.flags.keep_open {
                continue;
            }
            p.flags.hide_others_leader = false;
            let changed = if was_leader && p.flags.hidden {
                p.flags.minimized = false;
                p.flags.hidden = false;
                true
            } else if !was_leader && !p.flags.minimized {
                p.flags.minimized = true;
                p.flags.hidden = true;
                true
            } else {
                false
            };
            if changed {
                self.minimize(id);
            }
        }
        self.redraw(focus);
        self.commit_column(column);
    }

    pub fn toggle_keep_open(&mut self, pane: PaneId) {
        let Some(p) = self.panes.get_mut(&pane) else {
            return;
        };
        p.flags.keep_open = !p.flags.keep_open;
        let column = p.column;
        self.redraw(pane);
        if let Some(column) = column {
            self.commit_column(column);
        }
    }
}
