use crate::display_action::PaneGeometry;
use crate::geometry;
use crate::models::{BBox, ColumnId, Handle, PaneId};
use crate::state::State;
use crate::DisplayAction;

impl<H: Handle> State<H> {
    /// Attaches a detached pane to a column, at the top or right after `after`.
    pub fn manage_pane(&mut self, pane: PaneId, column: ColumnId, after: Option<PaneId>) {
        tracing::trace!("manage pane {} in column {} after {:?}", pane, column, after);
        self.resize_add(column, pane);
        self.link(pane, column, after);
        self.commit_column(column);
        debug_assert!(self.column_is_consistent(column));
    }

    /// Detaches a pane from its column. The commit of the column it leaves can be skipped when
    /// the pane goes straight back into the same column.
    pub fn unmanage_pane(&mut self, pane: PaneId, commit: bool) -> Option<ColumnId> {
        tracing::trace!("unmanage pane {}", pane);
        let column = self.unlink(pane)?;
        self.resize_remove(column, pane);
        if commit {
            self.commit_column(column);
        }
        debug_assert!(self.column_is_consistent(column));
        Some(column)
    }

    pub fn move_pane(&mut self, pane: PaneId, column: ColumnId, after: Option<PaneId>) {
        let current = self.panes.get(&pane).and_then(|p| p.column());
        self.unmanage_pane(pane, current != Some(column));
        self.manage_pane(pane, column, after);
    }

    /// Makes room for `pane` in a column. The pane itself is not counted among the siblings,
    /// whether it is linked already or not.
    pub(crate) fn resize_add(&mut self, column: ColumnId, pane: PaneId) {
        let Some(extent) = self.extent(column) else {
            return;
        };
        let siblings: Vec<PaneId> = self
            .column_panes(column)
            .into_iter()
            .filter(|id| *id != pane)
            .collect();
        let mut slots = self.slots(&siblings);
        let Some(mut new) = self.slots(&[pane]).pop() else {
            return;
        };
        if let Err(err) = geometry::insert(&extent, &mut slots, &mut new) {
            tracing::warn!("column {}, pane {}: {}", column, pane, err);
        }
        self.store_slots(&siblings, &slots);
        self.store_slots(&[pane], &[new]);
    }

    /// Hands the room of `pane` to the rest of the column.
    pub(crate) fn resize_remove(&mut self, column: ColumnId, pane: PaneId) {
        let Some(extent) = self.extent(column) else {
            return;
        };
        let remaining: Vec<PaneId> = self
            .column_panes(column)
            .into_iter()
            .filter(|id| *id != pane)
            .collect();
        let mut slots = self.slots(&remaining);
        geometry::remove(&extent, &mut slots);
        self.store_slots(&remaining, &slots);
    }

    /// Grows a pane by `delta` at the expense of the panes below it.
    pub fn resize_adjust(&mut self, pane: PaneId, delta: i32) -> bool {
        let Some(column) = self.panes.get(&pane).and_then(|p| p.column()) else {
            return false;
        };
        let Some(extent) = self.extent(column) else {
            return false;
        };
        let ids = self.column_panes(column);
        let Some(index) = ids.iter().position(|id| *id == pane) else {
            return false;
        };
        let mut slots = self.slots(&ids);
        if !geometry::adjust(&extent, &mut slots, index, delta) {
            tracing::debug!("resize of pane {} by {} rejected", pane, delta);
            return false;
        }
        self.store_slots(&ids, &slots);
        self.commit_column(column);
        true
    }

    /// Stacks the panes of a column from the top and sends their geometry to the display server.
    pub fn commit_column(&mut self, column: ColumnId) {
        let (Some(extent), Some(c)) = (self.extent(column), self.columns.get(column).cloned()) else {
            return;
        };
        let ids = self.column_panes(column);
        let offsets = geometry::offsets(&extent, &self.slots(&ids));
        let titlebar = self.titlebar_height;
        for (id, y) in ids.iter().zip(offsets) {
            let Some(pane) = self.panes.get_mut(id) else {
                continue;
            };
            pane.y = y;
            let surfaced = !pane.without_surface();
            if surfaced {
                pane.height = pane.adjusted_height;
            }
            let fullscreen = surfaced && pane.flags.fullscreen && pane.flags.focused;
            let (frame_bbox, client_bbox) = if fullscreen {
                let region = c.region;
                let client = BBox::new(0, titlebar, region.width, region.height - titlebar);
                (region, Some(client))
            } else {
                let frame = BBox::new(c.x, c.region.y + y, c.width, pane.adjusted_height);
                let client = (surfaced && pane.flags.mapped).then(|| {
                    BBox::new(0, titlebar, c.width, (pane.adjusted_height - titlebar).max(1))
                });
                (frame, client)
            };
            let act = DisplayAction::ConfigurePane(PaneGeometry {
                pane: *id,
                frame: pane.frame,
                window: pane.window,
                frame_bbox,
                client_bbox,
                raise: fullscreen,
            });
            self.actions.push_back(act);
        }
    }
}
