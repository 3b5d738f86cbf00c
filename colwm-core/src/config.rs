/// Settings the core reads once, when the layout is built.
pub trait Config {
    /// Number of columns spread over the display regions.
    fn column_count(&self) -> usize;

    fn titlebar_height(&self) -> i32;

    /// Gap between columns, and to the left of the first one.
    fn horizontal_spacing(&self) -> i32;

    /// Gap between the panes of a column.
    fn vertical_spacing(&self) -> i32;

    /// Two releases on the same titlebar closer than this toggle minimize.
    fn double_click_ms(&self) -> u64;
}
