//! Console reporting utilities for a solved instance.
//!
//! Every function is stateless: it reads the instance and writes
//! line-oriented text to the given output target. The `print_*` variants
//! default to standard output. Output is for humans; the exact format is
//! not a stable contract. Inactive variables and constraints are skipped.

use std::io::{self, Write};

use crate::instance::{BoundsStatus, Instance};
use crate::model::format_number;

/// Write the symbolic expression of the active objective.
///
/// Writes nothing when the instance has no active objective.
pub fn write_objective_expression<W: Write>(instance: &Instance, out: &mut W) -> io::Result<()> {
    if let Some(line) = instance.model().render_objective(None) {
        writeln!(out, "Objective expression: {line}")?;
    }
    Ok(())
}

/// Write the numeric value of the active objective at the current point.
///
/// Writes nothing when the instance has no active objective.
pub fn write_objective_value<W: Write>(instance: &Instance, out: &mut W) -> io::Result<()> {
    if let Some(value) = instance.objective_value() {
        let name = instance.model().objective_name().unwrap_or("objective");
        writeln!(out, "OBJ: {name} = {}", format_number(value))?;
    }
    Ok(())
}

/// Write the current value of every active variable.
pub fn write_variable_values<W: Write>(instance: &Instance, out: &mut W) -> io::Result<()> {
    let model = instance.model();
    for (id, var) in model.variables() {
        if !var.is_active {
            continue;
        }
        // value() cannot fail for an id the model just yielded
        let value = instance.value(id).unwrap_or_default();
        writeln!(out, "{} = {}", model.variable_label(id), format_number(value))?;
    }
    Ok(())
}

/// Write the lower and upper slack of every active constraint.
pub fn write_slacks<W: Write>(instance: &Instance, out: &mut W) -> io::Result<()> {
    let model = instance.model();
    for (id, con) in model.constraints() {
        if !con.is_active {
            continue;
        }
        let (lslack, uslack) = instance.slack(id).unwrap_or((f64::NAN, f64::NAN));
        writeln!(
            out,
            "{}  lslack = {}  uslack = {}",
            model.constraint_label(id),
            format_number(lslack),
            format_number(uslack)
        )?;
    }
    Ok(())
}

/// Write the dual (shadow price) of every active constraint.
///
/// A constraint with no recorded dual gets an explicit notice; a recorded
/// dual of `0.0` is written as the number `0`. The two never mix.
pub fn write_duals<W: Write>(instance: &Instance, out: &mut W) -> io::Result<()> {
    let model = instance.model();
    for (id, con) in model.constraints() {
        if !con.is_active {
            continue;
        }
        let label = model.constraint_label(id);
        match instance.dual(id) {
            Some(dual) => writeln!(out, "{label}  dual = {}", format_number(dual))?,
            None => writeln!(out, "{label}  no dual available")?,
        }
    }
    Ok(())
}

/// Flag every active variable as inside or outside its declared bounds.
pub fn write_bound_check<W: Write>(instance: &Instance, out: &mut W) -> io::Result<()> {
    let model = instance.model();
    for (id, var) in model.variables() {
        if !var.is_active {
            continue;
        }
        let label = model.variable_label(id);
        match instance.bounds_status(id).unwrap_or(BoundsStatus::Within) {
            BoundsStatus::Within => writeln!(out, "{label}  bounds OK")?,
            BoundsStatus::OutOfBounds => writeln!(out, "{label}  out of bounds")?,
        }
    }
    Ok(())
}

/// Write `lower <= name <= upper` for every active variable.
pub fn write_bounds<W: Write>(instance: &Instance, out: &mut W) -> io::Result<()> {
    let model = instance.model();
    for (id, var) in model.variables() {
        if !var.is_active {
            continue;
        }
        writeln!(
            out,
            "{} <= {} <= {}",
            format_number(var.bounds.lower),
            model.variable_label(id),
            format_number(var.bounds.upper)
        )?;
    }
    Ok(())
}

macro_rules! stdout_variant {
    ($(#[$doc:meta])* $print_name:ident => $write_name:ident) => {
        $(#[$doc])*
        pub fn $print_name(instance: &Instance) -> io::Result<()> {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            $write_name(instance, &mut handle)
        }
    };
}

stdout_variant!(
    /// [`write_objective_expression`] to standard output.
    print_objective_expression => write_objective_expression
);
stdout_variant!(
    /// [`write_objective_value`] to standard output.
    print_objective_value => write_objective_value
);
stdout_variant!(
    /// [`write_variable_values`] to standard output.
    print_variable_values => write_variable_values
);
stdout_variant!(
    /// [`write_slacks`] to standard output.
    print_slacks => write_slacks
);
stdout_variant!(
    /// [`write_duals`] to standard output.
    print_duals => write_duals
);
stdout_variant!(
    /// [`write_bound_check`] to standard output.
    print_bound_check => write_bound_check
);
stdout_variant!(
    /// [`write_bounds`] to standard output.
    print_bounds => write_bounds
);
