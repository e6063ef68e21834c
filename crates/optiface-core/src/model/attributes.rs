//! Attribute get/set entry points.
//!
//! Handlers are resolved before anything is called, so an unsupported
//! attribute fails without touching the model or the backend.

use optiface_expr::{ConstraintIndex, VariableIndex};
use optiface_solver::{
    AttributeOperation, AttributeScope, AttributeValue, ConstraintAttribute, ModelAttribute,
    SolverError, VariableAttribute,
};

use super::Model;
use crate::dispatch::{resolve, trace_resolved, unknown_attribute};
use crate::traits::Backend;

impl<B: Backend> Model<B> {
    // ── Variable ────────────────────────────────────────────

    pub fn get_variable_attribute(
        &self,
        var: VariableIndex,
        attribute: VariableAttribute,
    ) -> Result<AttributeValue, SolverError> {
        let (getter, tier) = resolve(
            &self.dispatch.overrides.variable_get,
            &self.dispatch.standard.variable_get,
            attribute,
            |attr| unknown_attribute(AttributeScope::Variable, AttributeOperation::Get, attr.as_str()),
        )?;
        trace_resolved(
            AttributeScope::Variable,
            AttributeOperation::Get,
            attribute.as_str(),
            tier,
        );
        getter(self, var)
    }

    pub fn set_variable_attribute(
        &mut self,
        var: VariableIndex,
        attribute: VariableAttribute,
        value: impl Into<AttributeValue>,
    ) -> Result<(), SolverError> {
        let (setter, tier) = resolve(
            &self.dispatch.overrides.variable_set,
            &self.dispatch.standard.variable_set,
            attribute,
            |attr| unknown_attribute(AttributeScope::Variable, AttributeOperation::Set, attr.as_str()),
        )?;
        trace_resolved(
            AttributeScope::Variable,
            AttributeOperation::Set,
            attribute.as_str(),
            tier,
        );
        setter(self, var, &value.into())
    }

    pub fn supports_variable_attribute(
        &self,
        attribute: VariableAttribute,
        operation: AttributeOperation,
    ) -> bool {
        let (overrides, standard) = (&self.dispatch.overrides, &self.dispatch.standard);
        match operation {
            AttributeOperation::Get => {
                overrides.variable_get.contains(attribute)
                    || standard.variable_get.contains(attribute)
            }
            AttributeOperation::Set => {
                overrides.variable_set.contains(attribute)
                    || standard.variable_set.contains(attribute)
            }
        }
    }

    // ── Model ───────────────────────────────────────────────

    pub fn get_model_attribute(
        &self,
        attribute: ModelAttribute,
    ) -> Result<AttributeValue, SolverError> {
        let (getter, tier) = resolve(
            &self.dispatch.overrides.model_get,
            &self.dispatch.standard.model_get,
            attribute,
            |attr| unknown_attribute(AttributeScope::Model, AttributeOperation::Get, attr.as_str()),
        )?;
        trace_resolved(
            AttributeScope::Model,
            AttributeOperation::Get,
            attribute.as_str(),
            tier,
        );
        getter(self)
    }

    pub fn set_model_attribute(
        &mut self,
        attribute: ModelAttribute,
        value: impl Into<AttributeValue>,
    ) -> Result<(), SolverError> {
        let (setter, tier) = resolve(
            &self.dispatch.overrides.model_set,
            &self.dispatch.standard.model_set,
            attribute,
            |attr| unknown_attribute(AttributeScope::Model, AttributeOperation::Set, attr.as_str()),
        )?;
        trace_resolved(
            AttributeScope::Model,
            AttributeOperation::Set,
            attribute.as_str(),
            tier,
        );
        setter(self, &value.into())
    }

    pub fn supports_model_attribute(
        &self,
        attribute: ModelAttribute,
        operation: AttributeOperation,
    ) -> bool {
        let (overrides, standard) = (&self.dispatch.overrides, &self.dispatch.standard);
        match operation {
            AttributeOperation::Get => {
                overrides.model_get.contains(attribute) || standard.model_get.contains(attribute)
            }
            AttributeOperation::Set => {
                overrides.model_set.contains(attribute) || standard.model_set.contains(attribute)
            }
        }
    }

    // ── Constraint ──────────────────────────────────────────

    pub fn get_constraint_attribute(
        &self,
        constraint: ConstraintIndex,
        attribute: ConstraintAttribute,
    ) -> Result<AttributeValue, SolverError> {
        let (getter, tier) = resolve(
            &self.dispatch.overrides.constraint_get,
            &self.dispatch.standard.constraint_get,
            attribute,
            |attr| {
                unknown_attribute(AttributeScope::Constraint, AttributeOperation::Get, attr.as_str())
            },
        )?;
        trace_resolved(
            AttributeScope::Constraint,
            AttributeOperation::Get,
            attribute.as_str(),
            tier,
        );
        getter(self, constraint)
    }

    pub fn set_constraint_attribute(
        &mut self,
        constraint: ConstraintIndex,
        attribute: ConstraintAttribute,
        value: impl Into<AttributeValue>,
    ) -> Result<(), SolverError> {
        let (setter, tier) = resolve(
            &self.dispatch.overrides.constraint_set,
            &self.dispatch.standard.constraint_set,
            attribute,
            |attr| {
                unknown_attribute(AttributeScope::Constraint, AttributeOperation::Set, attr.as_str())
            },
        )?;
        trace_resolved(
            AttributeScope::Constraint,
            AttributeOperation::Set,
            attribute.as_str(),
            tier,
        );
        setter(self, constraint, &value.into())
    }

    pub fn supports_constraint_attribute(
        &self,
        attribute: ConstraintAttribute,
        operation: AttributeOperation,
    ) -> bool {
        let (overrides, standard) = (&self.dispatch.overrides, &self.dispatch.standard);
        match operation {
            AttributeOperation::Get => {
                overrides.constraint_get.contains(attribute)
                    || standard.constraint_get.contains(attribute)
            }
            AttributeOperation::Set => {
                overrides.constraint_set.contains(attribute)
                    || standard.constraint_set.contains(attribute)
            }
        }
    }
}
