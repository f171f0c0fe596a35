use crate::fenwick::Fenwick;
use crate::{HeightMode, LayoutConfig, VariableLayout};

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
type MeasuredMap = HashMap<usize, u32>;
#[cfg(not(feature = "std"))]
type MeasuredMap = BTreeMap<usize, u32>;

#[derive(Clone, Debug)]
enum Heights {
    Fixed {
        item_height: u32,
    },
    Variable {
        estimated_height: u32,
        measured: MeasuredMap,
        // Present only for `VariableLayout::Indexed`; mirrors `step(i)` for every row.
        index: Option<Fenwick>,
    },
}

/// Per-row height lookup for one dataset.
///
/// In fixed mode every row has the configured height. In variable mode a row reports its
/// measured height once [`HeightModel::record`] has been called for it, and the shared estimate
/// otherwise. Measurements survive [`HeightModel::grow`] and are only dropped by
/// [`HeightModel::reset`], which models replacing the dataset.
#[derive(Clone, Debug)]
pub struct HeightModel {
    heights: Heights,
    len: usize,
    gap: u32,
}

impl HeightModel {
    pub fn new(config: &LayoutConfig, len: usize) -> Self {
        match config.mode() {
            HeightMode::Fixed => Self::fixed(config.item_height, config.gap, len),
            HeightMode::Variable => Self::variable(
                config.estimated_height,
                config.gap,
                len,
                config.variable_layout,
            ),
        }
    }

    pub fn fixed(item_height: u32, gap: u32, len: usize) -> Self {
        vdebug!(item_height, gap, len, "HeightModel::fixed");
        Self {
            heights: Heights::Fixed { item_height },
            len,
            gap,
        }
    }

    pub fn variable(estimated_height: u32, gap: u32, len: usize, layout: VariableLayout) -> Self {
        vdebug!(estimated_height, gap, len, ?layout, "HeightModel::variable");
        let mut model = Self {
            heights: Heights::Variable {
                estimated_height,
                measured: MeasuredMap::new(),
                index: None,
            },
            len,
            gap,
        };
        if layout == VariableLayout::Indexed {
            model.rebuild_index();
        }
        model
    }

    pub fn mode(&self) -> HeightMode {
        match self.heights {
            Heights::Fixed { .. } => HeightMode::Fixed,
            Heights::Variable { .. } => HeightMode::Variable,
        }
    }

    /// The variable-height strategy, or `None` in fixed mode.
    pub fn variable_layout(&self) -> Option<VariableLayout> {
        match &self.heights {
            Heights::Fixed { .. } => None,
            Heights::Variable { index: None, .. } => Some(VariableLayout::Scan),
            Heights::Variable { index: Some(_), .. } => Some(VariableLayout::Indexed),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn gap(&self) -> u32 {
        self.gap
    }

    /// Height of row `index` (excludes `gap`).
    pub fn get(&self, index: usize) -> u32 {
        match &self.heights {
            Heights::Fixed { item_height } => *item_height,
            Heights::Variable {
                estimated_height,
                measured,
                ..
            } => measured.get(&index).copied().unwrap_or(*estimated_height),
        }
    }

    /// Height of row `index` plus the trailing gap.
    pub fn step(&self, index: usize) -> u64 {
        (self.get(index) as u64).saturating_add(self.gap as u64)
    }

    pub fn is_measured(&self, index: usize) -> bool {
        match &self.heights {
            Heights::Fixed { .. } => false,
            Heights::Variable { measured, .. } => measured.contains_key(&index),
        }
    }

    /// Number of rows with a recorded measurement.
    pub fn measured_len(&self) -> usize {
        match &self.heights {
            Heights::Fixed { .. } => 0,
            Heights::Variable { measured, .. } => measured.len(),
        }
    }

    /// Records the measured height of row `index`.
    ///
    /// A repeated measurement replaces the stored value; the row never reverts to the estimate
    /// until [`Self::reset`]. Returns `true` when the reported height of the row changed.
    ///
    /// Fixed-mode models and out-of-range indexes ignore the call. So does a height of 0, which
    /// leaves the row at its previous height.
    pub fn record(&mut self, index: usize, height: u32) -> bool {
        if index >= self.len {
            vwarn!(index, len = self.len, "HeightModel::record: index out of range");
            return false;
        }
        if height == 0 {
            vtrace!(index, "HeightModel::record: zero height ignored");
            return false;
        }
        let prev = self.get(index);
        let Heights::Variable {
            measured, index: sums, ..
        } = &mut self.heights
        else {
            vtrace!(index, height, "HeightModel::record ignored in fixed mode");
            return false;
        };
        measured.insert(index, height);
        if prev == height {
            return false;
        }
        vtrace!(index, prev, height, "HeightModel::record");
        if let Some(sums) = sums {
            sums.add(index, height as i64 - prev as i64);
        }
        true
    }

    /// Records several measurements; returns how many rows changed height.
    pub fn record_many(&mut self, measurements: impl IntoIterator<Item = (usize, u32)>) -> usize {
        measurements
            .into_iter()
            .filter(|&(index, height)| self.record(index, height))
            .count()
    }

    /// Extends the model for rows appended to the dataset. Measurements are kept.
    ///
    /// A smaller `new_len` is ignored; shrinking is a dataset replacement (see [`Self::reset`]).
    pub fn grow(&mut self, new_len: usize) {
        if new_len <= self.len {
            return;
        }
        vdebug!(from = self.len, to = new_len, "HeightModel::grow");
        let gap = self.gap as u64;
        if let Heights::Variable {
            estimated_height,
            index: Some(sums),
            ..
        } = &mut self.heights
        {
            let step = (*estimated_height as u64).saturating_add(gap);
            for _ in self.len..new_len {
                sums.push(step);
            }
        }
        self.len = new_len;
    }

    /// Starts over for a replacement dataset of `new_len` rows; all measurements are dropped.
    pub fn reset(&mut self, new_len: usize) {
        vdebug!(
            len = new_len,
            dropped = self.measured_len(),
            "HeightModel::reset"
        );
        self.len = new_len;
        if let Heights::Variable { measured, .. } = &mut self.heights {
            measured.clear();
        }
        if self.variable_layout() == Some(VariableLayout::Indexed) {
            self.rebuild_index();
        }
    }

    /// Sum of `step(i)` over every row.
    pub fn total_extent(&self) -> u64 {
        match &self.heights {
            Heights::Fixed { .. } => self.fixed_step().saturating_mul(self.len as u64),
            Heights::Variable {
                index: Some(sums), ..
            } => sums.total(),
            Heights::Variable { index: None, .. } => {
                (0..self.len).fold(0u64, |acc, i| acc.saturating_add(self.step(i)))
            }
        }
    }

    /// The uniform row step in fixed mode.
    pub(crate) fn fixed_step(&self) -> u64 {
        self.step(0)
    }

    pub(crate) fn prefix_index(&self) -> Option<&Fenwick> {
        match &self.heights {
            Heights::Variable { index, .. } => index.as_ref(),
            Heights::Fixed { .. } => None,
        }
    }

    fn rebuild_index(&mut self) {
        let len = self.len;
        let gap = self.gap as u64;
        let Heights::Variable {
            estimated_height,
            measured,
            index,
        } = &mut self.heights
        else {
            return;
        };
        let steps = (0..len).map(|i| {
            let h = measured.get(&i).copied().unwrap_or(*estimated_height) as u64;
            h.saturating_add(gap)
        });
        *index = Some(Fenwick::from_steps(steps));
    }
}
