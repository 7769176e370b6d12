//! The crop-allocation model.
//!
//! The farmer chooses how many units of each vegetable to plant. Each
//! vegetable sells at a fixed price and can be planted up to its available
//! quantity; planting consumes shared resources (land, water, seed budget)
//! that are capped per resource. The model maximizes revenue:
//!
//! ```text
//! Max revenue: sum_v price[v] * x[v]
//! s.t.         sum_v need[r][v] * x[v] <= capacity[r]    for each resource r
//!              0 <= x[v] <= availability[v]              for each vegetable v
//! ```

mod data;

use std::collections::BTreeMap;

use cropmix_expr::expr::weighted_sum;
use cropmix_expr::ids::{ConstraintId, VariableId};

use crate::instance::Instance;
use crate::model::Model;
use crate::types::{Bounds, Variable};

pub use data::{FarmData, FarmError};

/// Name the revenue objective is registered under.
pub const OBJECTIVE_NAME: &str = "revenue";

/// The abstract crop-allocation template.
///
/// Construction takes no runtime inputs; the structure (sets, parameter
/// shapes, variable bounds rule, objective, constraint family) is fixed.
/// Binding data via [`instantiate`](Self::instantiate) produces a solvable
/// [`FarmInstance`]; the template can be instantiated any number of times
/// with different data.
#[derive(Debug, Clone, Copy, Default)]
pub struct FarmModel;

impl FarmModel {
    /// Create the template.
    pub fn new() -> Self {
        Self
    }

    /// Bind concrete data and build an instance.
    ///
    /// Validates the data first; any invariant violation surfaces as a
    /// [`FarmError`] before the model is touched.
    pub fn instantiate(&self, data: &FarmData) -> Result<FarmInstance, FarmError> {
        data.validate()?;

        let mut model = Model::new();
        let mut planted = BTreeMap::new();
        let mut vegetable_vars = Vec::with_capacity(data.vegetables.len());

        // One bounded planting variable per vegetable; the upper bound is
        // that vegetable's availability, re-read per item.
        for vegetable in &data.vegetables {
            let upper = data.availability[vegetable];
            let id = model.named_variable(
                vegetable,
                Variable::continuous(Bounds::from_zero_to(upper)),
            )?;
            planted.insert(vegetable.clone(), id);
            vegetable_vars.push(id);
        }

        let prices: Vec<f64> = data
            .vegetables
            .iter()
            .map(|vegetable| data.prices[vegetable])
            .collect();
        let revenue = weighted_sum(&prices, &vegetable_vars)?;
        model.maximize(revenue)?;
        model.set_objective_name(Some(OBJECTIVE_NAME.to_string()));

        // One capacity row per resource.
        let mut usage = BTreeMap::new();
        for resource in &data.resources {
            let row = &data.requirements[resource];
            let needs: Vec<f64> = data
                .vegetables
                .iter()
                .map(|vegetable| row[vegetable])
                .collect();
            let used = weighted_sum(&needs, &vegetable_vars)?;
            let id = model.add_constraint_expr(used.le_scalar(data.capacities[resource]))?;
            model.set_constraint_name(id, resource)?;
            usage.insert(resource.clone(), id);
        }

        tracing::debug!(
            component = "farm",
            operation = "instantiate",
            status = "success",
            vegetables = data.vegetables.len(),
            resources = data.resources.len(),
            "Instantiated crop allocation model"
        );

        Ok(FarmInstance {
            instance: Instance::new(model),
            planted,
            usage,
        })
    }
}

/// A concrete crop-allocation instance with typed handles per set member.
#[derive(Debug, Clone)]
pub struct FarmInstance {
    instance: Instance,
    planted: BTreeMap<String, VariableId>,
    usage: BTreeMap<String, ConstraintId>,
}

impl FarmInstance {
    /// The underlying instance the reporting utilities consume.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Mutable access for solves and the mutating passes.
    pub fn instance_mut(&mut self) -> &mut Instance {
        &mut self.instance
    }

    /// Unwrap into the plain instance.
    pub fn into_instance(self) -> Instance {
        self.instance
    }

    /// Handle of a vegetable's planting variable.
    pub fn planted(&self, vegetable: &str) -> Option<VariableId> {
        self.planted.get(vegetable).copied()
    }

    /// Handle of a resource's capacity constraint.
    pub fn usage(&self, resource: &str) -> Option<ConstraintId> {
        self.usage.get(resource).copied()
    }

    /// Vegetable names in sorted order.
    pub fn vegetables(&self) -> impl Iterator<Item = &str> {
        self.planted.keys().map(String::as_str)
    }

    /// Resource names in sorted order.
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.usage.keys().map(String::as_str)
    }
}
