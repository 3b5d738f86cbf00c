use crate::models::{layout_columns, BBox, Handle};
use crate::state::State;

impl<H: Handle> State<H> {
    /// Spreads the columns over the regions the display server reported. Regions are only
    /// reported once, at startup.
    ///
    /// Returns `true` if changes need to be rendered.
    pub fn screens_create_handler(&mut self, regions: &[BBox], column_count: usize) -> bool {
        if !self.columns.is_empty() {
            tracing::warn!("regions reported again, keeping the existing columns");
            return false;
        }
        self.columns = layout_columns(regions, column_count, self.horizontal_spacing);
        if self.columns.is_empty() {
            tracing::error!("no columns laid out over {} regions", regions.len());
            return false;
        }
        tracing::debug!(
            "{} columns over {} regions",
            self.columns.len(),
            regions.len()
        );
        self.focus_column = Some(0);
        false
    }
}
