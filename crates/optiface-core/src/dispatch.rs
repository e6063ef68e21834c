//! Two-tier attribute dispatch.
//!
//! Every get/set resolves the attribute against the backend's override table
//! first and the shared standard table second. The first table holding the
//! attribute wins; if neither does, the caller's handler builds the error.

use optiface_expr::{ConstraintIndex, VariableIndex};
use optiface_solver::{
    AttributeOperation, AttributeScope, AttributeValue, ConstraintAttribute, ModelAttribute,
    SolverError, VariableAttribute,
};
use tracing::{trace, warn};

use crate::model::Model;

pub type VariableGetter<B> = fn(&Model<B>, VariableIndex) -> Result<AttributeValue, SolverError>;
pub type VariableSetter<B> =
    fn(&mut Model<B>, VariableIndex, &AttributeValue) -> Result<(), SolverError>;
pub type ModelGetter<B> = fn(&Model<B>) -> Result<AttributeValue, SolverError>;
pub type ModelSetter<B> = fn(&mut Model<B>, &AttributeValue) -> Result<(), SolverError>;
pub type ConstraintGetter<B> =
    fn(&Model<B>, ConstraintIndex) -> Result<AttributeValue, SolverError>;
pub type ConstraintSetter<B> =
    fn(&mut Model<B>, ConstraintIndex, &AttributeValue) -> Result<(), SolverError>;

/// Fixed list of `(attribute, handler)` pairs.
#[derive(Debug)]
pub struct AttributeTable<K, F> {
    entries: Vec<(K, F)>,
}

impl<K: Copy + PartialEq, F: Copy> AttributeTable<K, F> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add or replace the handler for `key`.
    pub fn with(mut self, key: K, handler: F) -> Self {
        self.insert(key, handler);
        self
    }

    pub fn insert(&mut self, key: K, handler: F) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = handler,
            None => self.entries.push((key, handler)),
        }
    }

    pub fn lookup(&self, key: K) -> Option<F> {
        self.entries
            .iter()
            .find_map(|(k, handler)| (*k == key).then_some(*handler))
    }

    pub fn contains(&self, key: K) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Copy + PartialEq, F: Copy> Default for AttributeTable<K, F> {
    fn default() -> Self {
        Self::new()
    }
}

/// The six handler tables of one tier.
pub struct AttributeTables<B> {
    pub variable_get: AttributeTable<VariableAttribute, VariableGetter<B>>,
    pub variable_set: AttributeTable<VariableAttribute, VariableSetter<B>>,
    pub model_get: AttributeTable<ModelAttribute, ModelGetter<B>>,
    pub model_set: AttributeTable<ModelAttribute, ModelSetter<B>>,
    pub constraint_get: AttributeTable<ConstraintAttribute, ConstraintGetter<B>>,
    pub constraint_set: AttributeTable<ConstraintAttribute, ConstraintSetter<B>>,
}

impl<B> AttributeTables<B> {
    pub fn new() -> Self {
        Self {
            variable_get: AttributeTable::new(),
            variable_set: AttributeTable::new(),
            model_get: AttributeTable::new(),
            model_set: AttributeTable::new(),
            constraint_get: AttributeTable::new(),
            constraint_set: AttributeTable::new(),
        }
    }
}

impl<B> Default for AttributeTables<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> std::fmt::Debug for AttributeTables<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeTables")
            .field("variable_get", &self.variable_get.len())
            .field("variable_set", &self.variable_set.len())
            .field("model_get", &self.model_get.len())
            .field("model_set", &self.model_set.len())
            .field("constraint_get", &self.constraint_get.len())
            .field("constraint_set", &self.constraint_set.len())
            .finish()
    }
}

/// Override tier plus standard tier, consulted in that order.
pub struct Dispatch<B> {
    pub(crate) overrides: AttributeTables<B>,
    pub(crate) standard: AttributeTables<B>,
}

impl<B> Dispatch<B> {
    pub fn new(overrides: AttributeTables<B>, standard: AttributeTables<B>) -> Self {
        Self {
            overrides,
            standard,
        }
    }

    pub fn overrides(&self) -> &AttributeTables<B> {
        &self.overrides
    }

    pub fn standard(&self) -> &AttributeTables<B> {
        &self.standard
    }
}

impl<B> std::fmt::Debug for Dispatch<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatch")
            .field("overrides", &self.overrides)
            .field("standard", &self.standard)
            .finish()
    }
}

/// Which tier answered a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Override,
    Standard,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Override => "override",
            Tier::Standard => "standard",
        }
    }
}

/// Find the handler for `key`, override tier first.
pub fn resolve<K, F>(
    overrides: &AttributeTable<K, F>,
    standard: &AttributeTable<K, F>,
    key: K,
    on_unknown: impl FnOnce(K) -> SolverError,
) -> Result<(F, Tier), SolverError>
where
    K: Copy + PartialEq,
    F: Copy,
{
    if let Some(handler) = overrides.lookup(key) {
        return Ok((handler, Tier::Override));
    }
    if let Some(handler) = standard.lookup(key) {
        return Ok((handler, Tier::Standard));
    }
    Err(on_unknown(key))
}

/// Error handler used by the model facade: log and report the identifier.
pub(crate) fn unknown_attribute(
    scope: AttributeScope,
    operation: AttributeOperation,
    attribute: &'static str,
) -> SolverError {
    warn!(
        component = "dispatch",
        operation = operation.as_str(),
        status = "error",
        scope = scope.as_str(),
        attribute,
        "Attribute is not supported by this backend"
    );
    SolverError::UnknownAttribute {
        scope,
        operation,
        attribute,
    }
}

pub(crate) fn trace_resolved(
    scope: AttributeScope,
    operation: AttributeOperation,
    attribute: &'static str,
    tier: Tier,
) {
    trace!(
        component = "dispatch",
        operation = operation.as_str(),
        status = "success",
        scope = scope.as_str(),
        attribute,
        tier = tier.as_str(),
        "Resolved attribute handler"
    );
}
