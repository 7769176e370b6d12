use cropmix_expr::ids::VariableId;

/// Optimization sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

/// Bounds for a variable or constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Unbounded on both sides.
    pub fn free() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// `[0, upper]`, the shape every planting variable uses.
    pub fn from_zero_to(upper: f64) -> Self {
        Self::new(0.0, upper)
    }
}

/// Value domain of a decision variable.
///
/// The domain kind is an explicit tag so callers dispatch by pattern
/// matching instead of inspecting bound patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Continuous,
    Integer,
    Binary,
}

impl Domain {
    /// Integer and binary variables are discrete; they are the ones the
    /// fixing pass freezes.
    pub fn is_discrete(self) -> bool {
        matches!(self, Domain::Integer | Domain::Binary)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Continuous => "continuous",
            Domain::Integer => "integer",
            Domain::Binary => "binary",
        }
    }
}

/// A decision variable with bounds and a domain tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    pub bounds: Bounds,
    pub domain: Domain,
    pub is_active: bool,
}

impl Variable {
    /// Create a continuous variable with specified bounds.
    pub fn continuous(bounds: Bounds) -> Self {
        Self {
            bounds,
            domain: Domain::Continuous,
            is_active: true,
        }
    }

    /// Create an integer variable with specified bounds.
    pub fn integer(bounds: Bounds) -> Self {
        Self {
            bounds,
            domain: Domain::Integer,
            is_active: true,
        }
    }

    /// Create a binary variable with bounds [0, 1].
    pub fn binary() -> Self {
        Self {
            bounds: Bounds::new(0.0, 1.0),
            domain: Domain::Binary,
            is_active: true,
        }
    }
}

/// A constraint row with lower and upper bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    pub bounds: Bounds,
    pub is_active: bool,
}

impl Constraint {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            is_active: true,
        }
    }

    /// Row bounded above only: `lhs <= upper`.
    pub fn at_most(upper: f64) -> Self {
        Self::new(Bounds::new(f64::NEG_INFINITY, upper))
    }
}

/// Objective function with a sense and linear terms.
#[derive(Debug, Clone, Default)]
pub struct Objective {
    pub sense: Option<Sense>,
    pub terms: Vec<(VariableId, f64)>,
}

impl Objective {
    /// Create a new empty objective.
    pub fn new() -> Self {
        Self::default()
    }

    /// An objective is active once a sense has been set.
    pub fn is_active(&self) -> bool {
        self.sense.is_some()
    }
}
