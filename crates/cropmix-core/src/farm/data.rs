//! Concrete data for a crop-allocation instance.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

/// Input data binding the farm template to one concrete problem.
///
/// `vegetables` and `resources` are the index sets; the parameter maps are
/// keyed by set member. `requirements` is nested resource-first:
/// `requirements[resource][vegetable]` is the amount of the resource one
/// planted unit consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct FarmData {
    pub vegetables: Vec<String>,
    pub resources: Vec<String>,
    /// Selling price per unit of each vegetable (strictly positive).
    pub prices: BTreeMap<String, f64>,
    /// Maximum plantable quantity per vegetable (also the variable's upper bound).
    pub availability: BTreeMap<String, f64>,
    /// Total amount of each resource available.
    pub capacities: BTreeMap<String, f64>,
    /// Resource consumed per planted unit, resource-first.
    pub requirements: BTreeMap<String, BTreeMap<String, f64>>,
}

impl FarmData {
    /// Parse farm data from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self, FarmError> {
        serde_json::from_str(text).map_err(|err| FarmError::Json {
            message: err.to_string(),
        })
    }

    /// Read and parse farm data from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, FarmError> {
        let text = std::fs::read_to_string(path).map_err(|err| FarmError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    /// Check every data invariant.
    ///
    /// Set members must be unique; every parameter key must belong to its
    /// set; prices are strictly positive; availability, capacities, and
    /// requirements are non-negative; every parameter is total over its
    /// index set (each vegetable priced and bounded, each resource capped,
    /// each (resource, vegetable) requirement present).
    pub fn validate(&self) -> Result<(), FarmError> {
        check_unique("vegetables", &self.vegetables)?;
        check_unique("resources", &self.resources)?;

        check_keys_and_total("prices", &self.prices, &self.vegetables)?;
        check_keys_and_total("availability", &self.availability, &self.vegetables)?;
        check_keys_and_total("capacities", &self.capacities, &self.resources)?;

        for vegetable in &self.vegetables {
            let price = self.prices[vegetable];
            if price.is_nan() || price <= 0.0 {
                return Err(FarmError::NonPositivePrice {
                    vegetable: vegetable.clone(),
                    value: price,
                });
            }
        }
        check_non_negative("availability", &self.availability)?;
        check_non_negative("capacities", &self.capacities)?;

        for resource in self.requirements.keys() {
            if !self.resources.contains(resource) {
                return Err(FarmError::UnknownMember {
                    parameter: "requirements".to_string(),
                    name: resource.clone(),
                });
            }
        }
        for resource in &self.resources {
            let row = self
                .requirements
                .get(resource)
                .ok_or_else(|| FarmError::MissingEntry {
                    parameter: "requirements".to_string(),
                    name: resource.clone(),
                })?;
            for vegetable in row.keys() {
                if !self.vegetables.contains(vegetable) {
                    return Err(FarmError::UnknownMember {
                        parameter: "requirements".to_string(),
                        name: format!("{resource}/{vegetable}"),
                    });
                }
            }
            for vegetable in &self.vegetables {
                let need = row.get(vegetable).ok_or_else(|| FarmError::MissingEntry {
                    parameter: "requirements".to_string(),
                    name: format!("{resource}/{vegetable}"),
                })?;
                if need.is_nan() || *need < 0.0 {
                    return Err(FarmError::NegativeValue {
                        parameter: "requirements".to_string(),
                        name: format!("{resource}/{vegetable}"),
                        value: *need,
                    });
                }
            }
        }

        Ok(())
    }
}

fn check_unique(set: &str, members: &[String]) -> Result<(), FarmError> {
    let mut seen = std::collections::BTreeSet::new();
    for member in members {
        if !seen.insert(member.as_str()) {
            return Err(FarmError::DuplicateMember {
                set: set.to_string(),
                name: member.clone(),
            });
        }
    }
    Ok(())
}

fn check_keys_and_total(
    parameter: &str,
    map: &BTreeMap<String, f64>,
    members: &[String],
) -> Result<(), FarmError> {
    for key in map.keys() {
        if !members.contains(key) {
            return Err(FarmError::UnknownMember {
                parameter: parameter.to_string(),
                name: key.clone(),
            });
        }
    }
    for member in members {
        if !map.contains_key(member) {
            return Err(FarmError::MissingEntry {
                parameter: parameter.to_string(),
                name: member.clone(),
            });
        }
    }
    Ok(())
}

fn check_non_negative(parameter: &str, map: &BTreeMap<String, f64>) -> Result<(), FarmError> {
    for (name, value) in map {
        if value.is_nan() || *value < 0.0 {
            return Err(FarmError::NegativeValue {
                parameter: parameter.to_string(),
                name: name.clone(),
                value: *value,
            });
        }
    }
    Ok(())
}

/// Errors raised while loading or validating farm data, or while binding it
/// to the model template.
#[derive(Debug, Clone, PartialEq)]
pub enum FarmError {
    /// A set member appears twice.
    DuplicateMember { set: String, name: String },
    /// A parameter is keyed by something outside its index set.
    UnknownMember { parameter: String, name: String },
    /// A parameter is missing a value for a set member.
    MissingEntry { parameter: String, name: String },
    /// A selling price is zero, negative, or NaN.
    NonPositivePrice { vegetable: String, value: f64 },
    /// A non-negative parameter holds a negative or NaN value.
    NegativeValue {
        parameter: String,
        name: String,
        value: f64,
    },
    /// Data file could not be read.
    Io { path: String, message: String },
    /// Data was not valid JSON for the expected shape.
    Json { message: String },
    /// The underlying model rejected an operation while binding.
    Model(crate::model::ModelError),
    /// An expression could not be assembled while binding.
    Expr(cropmix_expr::LinearExprError),
}

impl FarmError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            FarmError::DuplicateMember { .. } => "FARM_DUPLICATE_MEMBER",
            FarmError::UnknownMember { .. } => "FARM_UNKNOWN_MEMBER",
            FarmError::MissingEntry { .. } => "FARM_MISSING_ENTRY",
            FarmError::NonPositivePrice { .. } => "FARM_NONPOSITIVE_PRICE",
            FarmError::NegativeValue { .. } => "FARM_NEGATIVE_VALUE",
            FarmError::Io { .. } => "FARM_DATA_IO",
            FarmError::Json { .. } => "FARM_DATA_JSON",
            FarmError::Model(_) => "FARM_MODEL",
            FarmError::Expr(_) => "FARM_EXPR",
        }
    }
}

impl std::fmt::Display for FarmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FarmError::DuplicateMember { set, name } => {
                write!(f, "[{}] Duplicate {} member '{}'", self.code(), set, name)
            }
            FarmError::UnknownMember { parameter, name } => write!(
                f,
                "[{}] Parameter '{}' references unknown member '{}'",
                self.code(),
                parameter,
                name
            ),
            FarmError::MissingEntry { parameter, name } => write!(
                f,
                "[{}] Parameter '{}' has no value for '{}'",
                self.code(),
                parameter,
                name
            ),
            FarmError::NonPositivePrice { vegetable, value } => write!(
                f,
                "[{}] Price for '{}' must be strictly positive (got {})",
                self.code(),
                vegetable,
                value
            ),
            FarmError::NegativeValue {
                parameter,
                name,
                value,
            } => write!(
                f,
                "[{}] Parameter '{}' value for '{}' must be non-negative (got {})",
                self.code(),
                parameter,
                name,
                value
            ),
            FarmError::Io { path, message } => {
                write!(f, "[{}] Cannot read '{}': {}", self.code(), path, message)
            }
            FarmError::Json { message } => {
                write!(f, "[{}] Invalid farm data: {}", self.code(), message)
            }
            FarmError::Model(inner) => write!(f, "[{}] {}", self.code(), inner),
            FarmError::Expr(inner) => write!(f, "[{}] {}", self.code(), inner),
        }
    }
}

impl std::error::Error for FarmError {}

impl From<crate::model::ModelError> for FarmError {
    fn from(err: crate::model::ModelError) -> Self {
        FarmError::Model(err)
    }
}

impl From<cropmix_expr::LinearExprError> for FarmError {
    fn from(err: cropmix_expr::LinearExprError) -> Self {
        FarmError::Expr(err)
    }
}
