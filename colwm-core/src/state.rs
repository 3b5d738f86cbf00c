//! The layout: columns, the panes in them, focus and drag state.

use crate::config::Config;
use crate::display_action::Decoration;
use crate::geometry::{Extent, Slot};
use crate::models::{Column, ColumnId, Drag, Handle, Pane, PaneId, WindowHandle};
use crate::DisplayAction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

#[derive(Serialize, Deserialize, Debug)]
pub struct State<H: Handle> {
    pub columns: Vec<Column>,
    #[serde(bound = "")]
    pub panes: BTreeMap<PaneId, Pane<H>>,
    pub focus: Option<PaneId>,
    pub focus_column: Option<ColumnId>,
    pub drag: Drag,
    #[serde(bound = "")]
    pub actions: VecDeque<DisplayAction<H>>,
    pub titlebar_height: i32,
    pub horizontal_spacing: i32,
    pub vertical_spacing: i32,
    pub double_click_ms: u64,
    pub(crate) next_pane_id: PaneId,
    /// Stamp handed to the next focused pane, panes never focused keep 0.
    pub(crate) next_recency: u64,
}

impl<H: Handle> State<H> {
    pub(crate) fn new(config: &impl Config) -> Self {
        Self {
            columns: vec![],
            panes: BTreeMap::new(),
            focus: None,
            focus_column: None,
            drag: Drag::default(),
            actions: VecDeque::new(),
            titlebar_height: config.titlebar_height(),
            horizontal_spacing: config.horizontal_spacing(),
            vertical_spacing: config.vertical_spacing(),
            double_click_ms: config.double_click_ms(),
            next_pane_id: 1,
            next_recency: 1,
        }
    }

    pub(crate) fn allocate_pane_id(&mut self) -> PaneId {
        let id = self.next_pane_id;
        self.next_pane_id += 1;
        id
    }

    /// Finds the pane owning a client or frame handle.
    #[must_use]
    pub fn find_pane(&self, handle: &WindowHandle<H>) -> Option<PaneId> {
        self.panes
            .values()
            .find(|pane| pane.owns(handle))
            .map(|pane| pane.id)
    }

    /// Panes of a column, top to bottom.
    #[must_use]
    pub fn column_panes(&self, column: ColumnId) -> Vec<PaneId> {
        let mut ids = vec![];
        let mut cursor = self.columns.get(column).and_then(Column::first);
        while let Some(id) = cursor {
            ids.push(id);
            if ids.len() > self.panes.len() {
                debug_assert!(false, "column {column} links into a cycle");
                break;
            }
            cursor = self.panes.get(&id).and_then(Pane::next);
        }
        ids
    }

    /// The column owning a horizontal position, the first column if none does.
    #[must_use]
    pub fn find_column(&self, x: i32) -> Option<ColumnId> {
        self.columns
            .iter()
            .find(|column| column.contains_x(x, self.horizontal_spacing))
            .or_else(|| self.columns.first())
            .map(|column| column.id)
    }

    pub(crate) fn extent(&self, column: ColumnId) -> Option<Extent> {
        let column = self.columns.get(column)?;
        Some(Extent {
            max_height: column.max_height,
            titlebar_height: self.titlebar_height,
            spacing: self.vertical_spacing,
        })
    }

    pub(crate) fn slots(&self, ids: &[PaneId]) -> Vec<Slot> {
        ids.iter()
            .filter_map(|id| self.panes.get(id))
            .map(|pane| Slot {
                surfaced: !pane.without_surface(),
                height: pane.adjusted_height,
            })
            .collect()
    }

    pub(crate) fn store_slots(&mut self, ids: &[PaneId], slots: &[Slot]) {
        for (id, slot) in ids.iter().zip(slots) {
            if let Some(pane) = self.panes.get_mut(id) {
                pane.adjusted_height = slot.height;
            }
        }
    }

    /// Ask for the titlebar of a pane to be painted again.
    pub fn redraw(&mut self, pane: PaneId) {
        if let Some(pane) = self.panes.get(&pane) {
            let act = DisplayAction::Redraw(Decoration::from(pane));
            self.actions.push_back(act);
        }
    }

    /// Links a detached pane into a column, at the top or right after `after`.
    pub(crate) fn link(&mut self, id: PaneId, column: ColumnId, after: Option<PaneId>) {
        let after = after.filter(|a| {
            let in_column = self.panes.get(a).and_then(Pane::column) == Some(column);
            if !in_column {
                tracing::warn!("pane {} is not in column {}, linking {} at the top", a, column, id);
            }
            in_column
        });
        let next = match after {
            Some(a) => self.panes.get(&a).and_then(Pane::next),
            None => self.columns.get(column).and_then(Column::first),
        };
        let Some(pane) = self.panes.get_mut(&id) else {
            return;
        };
        debug_assert!(pane.is_detached(), "pane {id} linked twice");
        pane.column = Some(column);
        pane.prev = after;
        pane.next = next;
        if let Some(prev) = after.and_then(|a| self.panes.get_mut(&a)) {
            prev.next = Some(id);
        }
        if let Some(next) = next.and_then(|n| self.panes.get_mut(&n)) {
            next.prev = Some(id);
        }
        if let Some(column) = self.columns.get_mut(column) {
            if after.is_none() {
                column.first = Some(id);
            }
            if next.is_none() {
                column.last = Some(id);
            }
            column.count += 1;
        }
    }

    /// Unlinks a pane from its column, returns the column it was in.
    pub(crate) fn unlink(&mut self, id: PaneId) -> Option<ColumnId> {
        let pane = self.panes.get_mut(&id)?;
        let column = pane.column.take()?;
        let prev = pane.prev.take();
        let next = pane.next.take();
        match prev.and_then(|p| self.panes.get_mut(&p)) {
            Some(prev) => prev.next = next,
            None => {
                if let Some(c) = self.columns.get_mut(column) {
                    c.first = next;
                }
            }
        }
        match next.and_then(|n| self.panes.get_mut(&n)) {
            Some(next) => next.prev = prev,
            None => {
                if let Some(c) = self.columns.get_mut(column) {
                    c.last = prev;
                }
            }
        }
        if let Some(c) = self.columns.get_mut(column) {
            c.count -= 1;
        }
        Some(column)
    }

    /// Checks the links of a column: the count matches both walks and every pane points back.
    #[must_use]
    pub fn column_is_consistent(&self, column: ColumnId) -> bool {
        let Some(c) = self.columns.get(column) else {
            return false;
        };
        if (c.count == 0) != c.first.is_none() || (c.count == 0) != c.last.is_none() {
            return false;
        }
        let forward = self.walk(c.first, Pane::next, column);
        let backward = self.walk(c.last, Pane::prev, column);
        matches!((forward, backward), (Some(f), Some(b)) if f == c.count && b == c.count)
    }

    fn walk(
        &self,
        start: Option<PaneId>,
        step: fn(&Pane<H>) -> Option<PaneId>,
        column: ColumnId,
    ) -> Option<usize> {
        let mut seen = 0;
        let mut cursor = start;
        while let Some(id) = cursor {
            let pane = self.panes.get(&id)?;
            if pane.column != Some(column) || seen > self.panes.len() {
                return None;
            }
            seen += 1;
            cursor = step(pane);
        }
        Some(seen)
    }

    /// At most one pane is flagged focused, it is the focus and its column is the focus column.
    #[must_use]
    pub fn focus_is_consistent(&self) -> bool {
        let mut flagged = self.panes.values().filter(|p| p.flags.focused);
        let first = flagged.next();
        if flagged.next().is_some() {
            return false;
        }
        match (self.focus, first) {
            (None, None) => true,
            (Some(focus), Some(pane)) if pane.id == focus => {
                pane.column.is_none() || pane.column == self.focus_column
            }
            _ => false,
        }
    }

    pub(crate) fn debug_check(&self) {
        debug_assert!(
            (0..self.columns.len()).all(|c| self.column_is_consistent(c)),
            "column links are broken"
        );
        debug_assert!(self.focus_is_consistent(), "focus is inconsistent");
    }
}
