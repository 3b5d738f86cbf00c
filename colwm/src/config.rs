//! `colwm` general configuration

use serde::{Deserialize, Serialize};

/// Settings of one colwm session. There is no configuration file, the defaults are overridden
/// from the command line.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub column_count: usize,
    pub titlebar_height: i32,
    pub horizontal_spacing: i32,
    pub vertical_spacing: i32,
    pub double_click_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            column_count: 2,
            titlebar_height: 20,
            horizontal_spacing: 0,
            vertical_spacing: 0,
            double_click_ms: 500,
        }
    }
}

impl colwm_core::Config for Config {
    fn column_count(&self) -> usize {
        self.column_count.max(1)
    }

    fn titlebar_height(&self) -> i32 {
        self.titlebar_height.max(1)
    }

    fn horizontal_spacing(&self) -> i32 {
        self.horizontal_spacing.max(0)
    }

    fn vertical_spacing(&self) -> i32 {
        self.vertical_spacing.max(0)
    }

    fn double_click_ms(&self) -> u64 {
        self.double_click_ms
    }
}
