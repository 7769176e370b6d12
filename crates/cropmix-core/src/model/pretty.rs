//! Human-readable ASCII model formatting.

use std::fmt::Write as _;

use cropmix_expr::ids::VariableId;

use crate::model::Model;
use crate::types::{Bounds, Domain, Sense};

const FLOAT_EQ_EPSILON: f64 = 1e-12;
const PREVIEW_CONSTRAINTS: usize = 20;
const PREVIEW_TERMS: usize = 30;

/// Formatting controls for pretty-print output.
#[derive(Debug, Clone, Copy)]
pub struct PrettyOptions {
    /// Maximum number of constraints to render.
    pub constraints: Option<usize>,
    /// Maximum number of terms to render per linear expression.
    pub terms: Option<usize>,
}

impl PrettyOptions {
    /// Preview mode used by terse displays.
    pub fn preview() -> Self {
        Self {
            constraints: Some(PREVIEW_CONSTRAINTS),
            terms: Some(PREVIEW_TERMS),
        }
    }

    /// Full mode with no truncation.
    pub fn full() -> Self {
        Self {
            constraints: None,
            terms: None,
        }
    }
}

impl Model {
    /// Render the model to ASCII: objective line, `s.t.` constraint rows,
    /// then domain and bounds sections.
    pub fn format_ascii(&self, options: PrettyOptions) -> String {
        let mut lines = Vec::new();
        lines.push(
            self.render_objective(options.terms)
                .unwrap_or_else(|| "Objective: (not set)".to_string()),
        );
        lines.push(String::new());
        lines.push("s.t.".to_string());

        let active: Vec<_> = self.constraints().filter(|(_, con)| con.is_active).collect();
        let limit = options.constraints.unwrap_or(active.len()).min(active.len());

        if limit == 0 {
            lines.push(" (none)".to_string());
        } else {
            let rows = self.rows();
            let mut rendered = Vec::with_capacity(limit);
            for (id, con) in active.iter().take(limit) {
                let row = rows.get(id.index()).map_or(&[][..], Vec::as_slice);
                let lhs = format!(
                    "{}: {}",
                    self.constraint_label(*id),
                    self.format_expression(row, options.terms)
                );
                rendered.push(render_relation(lhs, con.bounds));
            }

            let lhs_width = rendered.iter().map(|(lhs, _, _)| lhs.len()).max().unwrap_or(0);
            for (lhs, op, rhs) in rendered {
                lines.push(format!(" {lhs:lhs_width$} {op:>2} {rhs}"));
            }
        }

        if limit < active.len() {
            lines.push(format!(" ... ({} more constraints)", active.len() - limit));
        }

        let mut integer_vars = Vec::new();
        let mut binary_vars = Vec::new();
        let mut bounds_lines = Vec::new();
        for (id, var) in self.variables() {
            if !var.is_active {
                continue;
            }
            let label = self.variable_label(id);
            match var.domain {
                Domain::Binary => {
                    binary_vars.push(label);
                    continue;
                }
                Domain::Integer => integer_vars.push(label.clone()),
                Domain::Continuous => {}
            }
            if let Some(line) = format_bounds_line(&label, var.bounds) {
                bounds_lines.push(line);
            }
        }

        if !binary_vars.is_empty() || !integer_vars.is_empty() || !bounds_lines.is_empty() {
            lines.push(String::new());
        }
        if !binary_vars.is_empty() {
            lines.push(format!("Binary: {}", binary_vars.join(", ")));
        }
        if !integer_vars.is_empty() {
            lines.push(format!("Integer: {}", integer_vars.join(", ")));
        }
        if !bounds_lines.is_empty() {
            lines.push("Bounds:".to_string());
            for line in bounds_lines {
                lines.push(format!(" {line}"));
            }
        }

        lines.join("\n")
    }

    /// Render the objective line: `Max revenue: 3 tomato + 2 lettuce`.
    ///
    /// Returns `None` when no objective sense has been set.
    pub fn render_objective(&self, max_terms: Option<usize>) -> Option<String> {
        let objective = self.objective();
        let sense = objective.sense?;
        let sense_label = match sense {
            Sense::Minimize => "Min",
            Sense::Maximize => "Max",
        };
        let expr = self.format_expression(&objective.terms, max_terms);
        Some(match self.objective_name() {
            Some(name) => format!("{sense_label} {name}: {expr}"),
            None => format!("{sense_label} {expr}"),
        })
    }

    /// Render a linear expression with labels from the name registry.
    pub(crate) fn format_expression(
        &self,
        terms: &[(VariableId, f64)],
        max_terms: Option<usize>,
    ) -> String {
        let nonzero: Vec<(VariableId, f64)> = terms
            .iter()
            .copied()
            .filter(|(_, coeff)| !float_approx_equal(*coeff, 0.0))
            .collect();
        if nonzero.is_empty() {
            return "0".to_string();
        }

        let limit = max_terms.unwrap_or(nonzero.len()).min(nonzero.len());
        let mut rendered = String::new();

        for (idx, (var_id, coeff)) in nonzero.iter().take(limit).enumerate() {
            let negative = *coeff < 0.0;
            let abs_coeff = coeff.abs();
            let label = self.variable_label(*var_id);
            let term_body = if float_approx_equal(abs_coeff, 1.0) {
                label
            } else {
                format!("{} {label}", format_number(abs_coeff))
            };

            if idx == 0 {
                if negative {
                    rendered.push('-');
                }
                rendered.push_str(&term_body);
            } else if negative {
                let _ = write!(rendered, " - {term_body}");
            } else {
                let _ = write!(rendered, " + {term_body}");
            }
        }

        if limit < nonzero.len() {
            let _ = write!(rendered, " + ... ({} more terms)", nonzero.len() - limit);
        }

        rendered
    }
}

fn render_relation(lhs: String, bounds: Bounds) -> (String, &'static str, String) {
    if float_approx_equal(bounds.lower, bounds.upper) {
        return (lhs, "=", format_number(bounds.upper));
    }
    if bounds.lower.is_infinite() && bounds.upper.is_finite() {
        return (lhs, "<=", format_number(bounds.upper));
    }
    if bounds.upper.is_infinite() && bounds.lower.is_finite() {
        return (lhs, ">=", format_number(bounds.lower));
    }
    if bounds.lower.is_finite() && bounds.upper.is_finite() {
        return (
            lhs,
            "in",
            format!(
                "[{}, {}]",
                format_number(bounds.lower),
                format_number(bounds.upper)
            ),
        );
    }
    (lhs, "  ", "free".to_string())
}

/// Shared numeric formatter for ASCII output: fixed precision with trailing
/// zeros trimmed, `inf`/`-inf`/`nan` spelled out.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() {
            "-inf".to_string()
        } else {
            "inf".to_string()
        };
    }

    let normalized = if value.to_bits() == (-0.0_f64).to_bits() {
        0.0
    } else {
        value
    };
    let mut rendered = format!("{normalized:.12}");
    while rendered.ends_with('0') {
        rendered.pop();
    }
    if rendered.ends_with('.') {
        rendered.pop();
    }
    if rendered == "-0" {
        "0".to_string()
    } else {
        rendered
    }
}

fn float_approx_equal(lhs: f64, rhs: f64) -> bool {
    if lhs.to_bits() == rhs.to_bits() {
        return true;
    }
    if !lhs.is_finite() || !rhs.is_finite() {
        return false;
    }
    let scale = lhs.abs().max(rhs.abs()).max(1.0);
    (lhs - rhs).abs() <= FLOAT_EQ_EPSILON * scale
}

fn format_bounds_line(label: &str, bounds: Bounds) -> Option<String> {
    let lower_finite = bounds.lower.is_finite();
    let upper_finite = bounds.upper.is_finite();
    if !lower_finite && !upper_finite {
        return None;
    }

    if lower_finite && upper_finite {
        return Some(format!(
            "{} <= {label} <= {}",
            format_number(bounds.lower),
            format_number(bounds.upper)
        ));
    }
    if lower_finite {
        return Some(format!("{} <= {label}", format_number(bounds.lower)));
    }
    Some(format!("{label} <= {}", format_number(bounds.upper)))
}

#[cfg(test)]
mod tests {
    use super::{PrettyOptions, format_number};
    use crate::model::Model;
    use crate::types::{Bounds, Constraint, Objective, Sense, Variable};

    fn two_crop_model() -> Model {
        let mut model = Model::new();
        let tomato = model
            .named_variable("tomato", Variable::continuous(Bounds::from_zero_to(10.0)))
            .unwrap();
        let lettuce = model
            .named_variable("lettuce", Variable::continuous(Bounds::from_zero_to(10.0)))
            .unwrap();
        let land = model.add_constraint(Constraint::at_most(15.0)).unwrap();
        model.set_constraint_name(land, "land").unwrap();
        model.set_coefficient(tomato, land, 1.0).unwrap();
        model.set_coefficient(lettuce, land, 1.0).unwrap();
        model
            .set_objective(Objective {
                sense: Some(Sense::Maximize),
                terms: vec![(tomato, 3.0), (lettuce, 2.0)],
            })
            .unwrap();
        model.set_objective_name(Some("revenue".to_string()));
        model
    }

    #[test]
    fn format_ascii_renders_named_rows() {
        let rendered = two_crop_model().format_ascii(PrettyOptions::full());
        assert!(rendered.contains("Max revenue: 3 tomato + 2 lettuce"));
        assert!(rendered.contains("s.t."));
        assert!(rendered.contains("land: tomato + lettuce <= 15"));
        assert!(rendered.contains("0 <= tomato <= 10"));
    }

    #[test]
    fn objective_line_absent_without_sense() {
        let model = Model::new();
        assert!(model.render_objective(None).is_none());
        let rendered = model.format_ascii(PrettyOptions::full());
        assert!(rendered.contains("Objective: (not set)"));
        assert!(rendered.contains("(none)"));
    }

    #[test]
    fn preview_truncates_constraints() {
        let mut model = Model::new();
        let x = model
            .add_variable(Variable::continuous(Bounds::from_zero_to(1.0)))
            .unwrap();
        model
            .set_objective(Objective {
                sense: Some(Sense::Minimize),
                terms: vec![(x, 1.0)],
            })
            .unwrap();
        for rhs in 0..25 {
            let c = model.add_constraint(Constraint::at_most(rhs as f64)).unwrap();
            model.set_coefficient(x, c, 1.0).unwrap();
        }

        let rendered = model.format_ascii(PrettyOptions::preview());
        assert!(rendered.contains("... (5 more constraints)"));
    }

    #[test]
    fn inactive_constraints_are_skipped() {
        let mut model = two_crop_model();
        let land = model.constraint_named("land").unwrap();
        model.deactivate_constraint(land).unwrap();
        let rendered = model.format_ascii(PrettyOptions::full());
        assert!(rendered.contains("(none)"));
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(15.0), "15");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
    }
}
