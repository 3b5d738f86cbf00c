use crate::command::Direction;
use crate::display_action::InputFocus;
use crate::models::{ColumnId, Handle, Pane, PaneId};
use crate::state::State;
use crate::DisplayAction;

impl<H: Handle> State<H> {
    /// Moves the focus to a pane, or clears it. The focus column stays when the focus is cleared.
    pub fn focus_pane(&mut self, pane: Option<PaneId>) {
        tracing::trace!("focus {:?} (was {:?})", pane, self.focus);
        if let Some(previous) = self.focus.filter(|f| Some(*f) != pane) {
            let mut fullscreen_column = None;
            if let Some(p) = self.panes.get_mut(&previous) {
                p.flags.focused = false;
                fullscreen_column = p.column.filter(|_| p.flags.fullscreen);
            }
            self.redraw(previous);
            if let Some(column) = fullscreen_column {
                self.commit_column(column);
            }
        }
        self.focus = pane;

        let Some(id) = pane else {
            return;
        };
        let recency = self.next_recency;
        let Some(p) = self.panes.get_mut(&id) else {
            tracing::warn!("focus on unknown pane {}", id);
            self.focus = None;
            return;
        };
        p.flags.focused = true;
        p.recency = recency;
        self.next_recency += 1;
        let input = input_focus(p);
        let column = p.column;
        let fullscreen = p.flags.fullscreen;
        if let Some((handle, method)) = input {
            self.actions
                .push_back(DisplayAction::SetInputFocus(handle, method));
        }
        self.redraw(id);
        if let Some(column) = column {
            self.focus_column = Some(column);
            if fullscreen {
                self.commit_column(column);
            }
        }
    }

    /// Clears the focus, the focus column stays.
    pub fn clear_focus(&mut self) {
        self.focus_pane(None);
    }

    pub fn focus_column(&mut self, column: ColumnId) {
        if column < self.columns.len() {
            self.focus_column = Some(column);
        }
    }

    /// The most recently focused pane, leaving out `excluding`. Ties go to the first pane found,
    /// walking the columns from the left.
    #[must_use]
    pub fn previous_focus(&self, excluding: Option<PaneId>) -> Option<PaneId> {
        let mut highest: Option<&Pane<H>> = None;
        for column in 0..self.columns.len() {
            for id in self.column_panes(column) {
                if Some(id) == excluding {
                    continue;
                }
                let Some(pane) = self.panes.get(&id) else {
                    continue;
                };
                if highest.map_or(true, |h| pane.recency > h.recency) {
                    highest = Some(pane);
                }
            }
        }
        highest.map(|pane| pane.id)
    }

    /// The pane after (or before) `pane` in its column, wrapping around.
    #[must_use]
    pub fn cycle_pane(&self, pane: PaneId, direction: Direction) -> Option<PaneId> {
        let p = self.panes.get(&pane)?;
        let column = self.columns.get(p.column?)?;
        match direction {
            Direction::Forward => p.next.or(column.first),
            Direction::Backward => p.prev.or(column.last),
        }
    }

    /// The next (or previous) column holding at least `min_panes` panes, wrapping past either
    /// end. The column itself qualifies last.
    #[must_use]
    pub fn cycle_column(
        &self,
        column: ColumnId,
        min_panes: usize,
        direction: Direction,
    ) -> Option<ColumnId> {
        let n = self.columns.len();
        if column >= n {
            return None;
        }
        (1..=n)
            .map(|step| match direction {
                Direction::Forward => (column + step) % n,
                Direction::Backward => (column + n - step) % n,
            })
            .find(|c| self.columns[*c].len() >= min_panes)
    }

    /// The pane of a column covering the vertical position `y`.
    #[must_use]
    pub fn find_pane_by_vpos(&self, y: i32, column: ColumnId) -> Option<PaneId> {
        let c = self.columns.get(column)?;
        let mut cursor = c.last;
        while let Some(p) = cursor.and_then(|id| self.panes.get(&id)) {
            if y >= p.y || c.first == Some(p.id) {
                break;
            }
            cursor = p.prev;
        }
        cursor
    }
}

/// Where input goes when a pane gets the focus.
fn input_focus<H: Handle>(pane: &Pane<H>) -> Option<(crate::models::WindowHandle<H>, InputFocus)> {
    if pane.without_surface() {
        return pane.frame.map(|frame| (frame, InputFocus::Frame));
    }
    let window = pane.window?;
    if pane.flags.has_take_focus {
        Some((window, InputFocus::Protocol))
    } else if pane.flags.mapped {
        Some((window, InputFocus::Direct))
    } else {
        None
    }
}
