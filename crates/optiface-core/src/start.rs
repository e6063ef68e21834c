//! Deferred MIP-start cache.
//!
//! `PrimalStart` values are staged here instead of being sent to the backend
//! one at a time. The model facade drains the cache into a single batch
//! immediately before each solve.

use indexmap::IndexMap;
use optiface_expr::VariableIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartState {
    /// Nothing staged.
    Built,
    /// One or more values staged, not yet submitted.
    Deferred,
}

#[derive(Debug, Clone, Default)]
pub struct MipStart {
    staged: IndexMap<VariableIndex, f64>,
}

impl MipStart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StartState {
        if self.staged.is_empty() {
            StartState::Built
        } else {
            StartState::Deferred
        }
    }

    /// Stage or overwrite the start value of `var`. Overwriting keeps the
    /// position of the first staging.
    pub fn stage(&mut self, var: VariableIndex, value: f64) {
        self.staged.insert(var, value);
    }

    pub fn get(&self, var: VariableIndex) -> Option<f64> {
        self.staged.get(&var).copied()
    }

    pub fn remove(&mut self, var: VariableIndex) -> Option<f64> {
        self.staged.shift_remove(&var)
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Drain all staged values as parallel sequences in staging order.
    /// Returns `None` (and submits nothing) when the cache is empty.
    pub fn flush(&mut self) -> Option<(Vec<VariableIndex>, Vec<f64>)> {
        if self.staged.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.staged).into_iter().unzip())
    }

    /// Put back a batch the backend rejected, ahead of anything staged since.
    pub fn restore(&mut self, variables: Vec<VariableIndex>, values: Vec<f64>) {
        let newer = std::mem::take(&mut self.staged);
        self.staged.extend(variables.into_iter().zip(values));
        self.staged.extend(newer);
    }
}
