//! Cropmix core: model building and solved-instance utilities.
//!
//! The [`farm`] module declares the crop-allocation linear program (one
//! bounded planting variable per vegetable, one capacity constraint per
//! resource, revenue maximization). The [`Model`] type underneath it is a
//! small typed LP builder; [`Instance`] holds a model together with current
//! variable values and attached solve results, and [`report`] prints the
//! diagnostics a user asks of a solved instance.

pub mod farm;
pub mod instance;
pub mod model;
pub mod report;
pub mod types;

pub use farm::{FarmData, FarmError, FarmInstance, FarmModel};
pub use instance::{BoundsStatus, Instance};
pub use model::{Model, ModelError, PrettyOptions};
pub use types::{Bounds, Constraint, Domain, Objective, Sense, Variable};
