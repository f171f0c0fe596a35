use crate::{HeightMode, VariableLayout};

pub const DEFAULT_ITEM_HEIGHT: u32 = 50;
pub const DEFAULT_ESTIMATED_HEIGHT: u32 = 50;

/// Row geometry for a list.
///
/// This is plain data so hosts can load it from their own configuration files. With
/// `feature = "serde"`, missing fields deserialize to their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Row height in fixed mode.
    pub item_height: u32,
    /// Fallback height for unmeasured rows in variable mode.
    pub estimated_height: u32,
    /// Spacing added after every row, including the last.
    pub gap: u32,
    /// Selects the fixed-height algorithm when `true`.
    pub fixed_height: bool,
    pub variable_layout: VariableLayout,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            item_height: DEFAULT_ITEM_HEIGHT,
            estimated_height: DEFAULT_ESTIMATED_HEIGHT,
            gap: 0,
            fixed_height: true,
            variable_layout: VariableLayout::Scan,
        }
    }
}

impl LayoutConfig {
    /// Fixed mode with the given row height.
    pub fn fixed(item_height: u32) -> Self {
        Self {
            item_height,
            ..Self::default()
        }
    }

    /// Variable mode with the given estimate for unmeasured rows.
    pub fn variable(estimated_height: u32) -> Self {
        Self {
            estimated_height,
            fixed_height: false,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> HeightMode {
        if self.fixed_height {
            HeightMode::Fixed
        } else {
            HeightMode::Variable
        }
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_item_height(mut self, item_height: u32) -> Self {
        self.item_height = item_height;
        self
    }

    pub fn with_estimated_height(mut self, estimated_height: u32) -> Self {
        self.estimated_height = estimated_height;
        self
    }

    pub fn with_fixed_height(mut self, fixed_height: bool) -> Self {
        self.fixed_height = fixed_height;
        self
    }

    pub fn with_variable_layout(mut self, variable_layout: VariableLayout) -> Self {
        self.variable_layout = variable_layout;
        self
    }
}
