//! Opaque handles for backend-owned entities.

use serde::{Deserialize, Serialize};

/// Handle to a variable owned by a backend model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct VariableIndex(u32);

impl VariableIndex {
    /// Create a handle from a raw index.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the inner u32 value.
    pub fn inner(self) -> u32 {
        self.0
    }
}

/// Category of a constraint, fixed when the constraint is created.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ConstraintType {
    Linear,
    Quadratic,
    Sos1,
    Sos2,
}

impl ConstraintType {
    pub fn as_str(self) -> &'static str {
        match self {
            ConstraintType::Linear => "linear",
            ConstraintType::Quadratic => "quadratic",
            ConstraintType::Sos1 => "sos1",
            ConstraintType::Sos2 => "sos2",
        }
    }
}

impl std::fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Special ordered set flavor: at most one (`Sos1`) or at most two adjacent
/// (`Sos2`) members may be nonzero.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum SosType {
    Sos1,
    Sos2,
}

impl SosType {
    /// Constraint category of an SOS of this flavor.
    pub fn constraint_type(self) -> ConstraintType {
        match self {
            SosType::Sos1 => ConstraintType::Sos1,
            SosType::Sos2 => ConstraintType::Sos2,
        }
    }
}

/// Handle to a constraint owned by a backend model.
///
/// Indices are numbered per [`ConstraintType`], so two handles with the same
/// index but different kinds are distinct.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ConstraintIndex {
    kind: ConstraintType,
    index: u32,
}

impl ConstraintIndex {
    pub fn new(kind: ConstraintType, index: u32) -> Self {
        Self { kind, index }
    }

    pub fn kind(self) -> ConstraintType {
        self.kind
    }

    pub fn inner(self) -> u32 {
        self.index
    }
}

/// Unordered pair of variables keying a quadratic term.
///
/// The smaller index is always stored first, so `x*y` and `y*x` share a key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VariablePair {
    first: VariableIndex,
    second: VariableIndex,
}

impl VariablePair {
    pub fn new(a: VariableIndex, b: VariableIndex) -> Self {
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    pub fn first(self) -> VariableIndex {
        self.first
    }

    pub fn second(self) -> VariableIndex {
        self.second
    }

    /// True for `(v, v)`, i.e. a squared term.
    pub fn is_square(self) -> bool {
        self.first == self.second
    }
}
