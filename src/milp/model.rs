//! Linear model definition.

use std::fmt;

/// Handle of a declared variable (index into [`LinearModel::vars`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub(crate) usize);

impl VarId {
    /// Position of the variable in declaration order.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// {0, 1}.
    Binary,
    /// Non-negative integer.
    Integer,
}

/// Constraint sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// `lhs ≤ rhs`
    Le,
    /// `lhs ≥ rhs`
    Ge,
    /// `lhs = rhs`
    Eq,
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ObjectiveSense {
    #[default]
    Minimize,
    Maximize,
}

/// A declared variable.
#[derive(Debug, Clone)]
pub struct VarDecl {
    /// Variable name (diagnostics only).
    pub name: String,
    /// Variable domain.
    pub kind: VarKind,
    /// Objective coefficient.
    pub objective: f64,
}

/// A linear constraint `Σ coef·var (sense) rhs`.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    /// Constraint name (diagnostics only).
    pub name: String,
    /// `(variable, coefficient)` terms.
    pub terms: Vec<(VarId, f64)>,
    /// Constraint sense.
    pub sense: Sense,
    /// Right-hand side.
    pub rhs: f64,
}

impl LinearConstraint {
    /// Evaluates the left-hand side for a value vector.
    pub fn lhs(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coef)| coef * values.get(var.0).copied().unwrap_or(0.0))
            .sum()
    }

    /// Whether the constraint holds within `tolerance`.
    pub fn is_satisfied_by(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.lhs(values);
        match self.sense {
            Sense::Le => lhs <= self.rhs + tolerance,
            Sense::Ge => lhs >= self.rhs - tolerance,
            Sense::Eq => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

/// A mixed-integer linear program.
///
/// Variables and constraints are only ever appended; a [`VarId`] stays
/// valid for the lifetime of the model.
///
/// # Examples
///
/// ```
/// use u_roster::milp::{LinearModel, Sense, VarKind};
///
/// let mut model = LinearModel::new("example");
/// let x = model.declare_variable("x", VarKind::Binary, 1.0);
/// let y = model.declare_variable("y", VarKind::Binary, 2.0);
/// model.add_constraint("cover", vec![(x, 1.0), (y, 1.0)], Sense::Ge, 1.0);
///
/// assert_eq!(model.variable_count(), 2);
/// assert_eq!(model.objective_value(&[1.0, 0.0]), 1.0);
/// assert!(model.is_satisfied_by(&[1.0, 0.0], 1e-6));
/// assert!(!model.is_satisfied_by(&[0.0, 0.0], 1e-6));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinearModel {
    /// Model name.
    pub name: String,
    /// Declared variables.
    pub vars: Vec<VarDecl>,
    /// Linear constraints.
    pub constraints: Vec<LinearConstraint>,
    /// Optimization direction.
    pub sense: ObjectiveSense,
}

impl LinearModel {
    /// Creates an empty minimization model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declares a variable with its objective coefficient.
    pub fn declare_variable(&mut self, name: impl Into<String>, kind: VarKind, objective: f64) -> VarId {
        let id = VarId(self.vars.len());
        self.vars.push(VarDecl {
            name: name.into(),
            kind,
            objective,
        });
        id
    }

    /// Adds a linear constraint.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(VarId, f64)>,
        sense: Sense,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint {
            name: name.into(),
            terms,
            sense,
            rhs,
        });
    }

    /// Sets the optimization direction.
    pub fn set_objective_sense(&mut self, sense: ObjectiveSense) {
        self.sense = sense;
    }

    /// Returns a declared variable.
    pub fn var(&self, id: VarId) -> &VarDecl {
        &self.vars[id.0]
    }

    pub fn variable_count(&self) -> usize {
        self.vars.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Objective value of a value vector.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.vars
            .iter()
            .zip(values)
            .map(|(decl, value)| decl.objective * value)
            .sum()
    }

    /// Whether a value vector satisfies every constraint and variable domain.
    pub fn is_satisfied_by(&self, values: &[f64], tolerance: f64) -> bool {
        if values.len() != self.vars.len() {
            return false;
        }
        let domains_ok = self.vars.iter().zip(values).all(|(decl, &v)| {
            let integral = (v - v.round()).abs() <= tolerance;
            match decl.kind {
                VarKind::Binary => integral && v >= -tolerance && v <= 1.0 + tolerance,
                VarKind::Integer => integral && v >= -tolerance,
            }
        });
        domains_ok && self.constraints.iter().all(|c| c.is_satisfied_by(values, tolerance))
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sense::Le => write!(f, "<="),
            Sense::Ge => write!(f, ">="),
            Sense::Eq => write!(f, "="),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_count() {
        let mut m = LinearModel::new("m");
        let a = m.declare_variable("a", VarKind::Binary, 3.0);
        let b = m.declare_variable("b", VarKind::Integer, 0.0);
        m.add_constraint("c", vec![(a, 1.0), (b, -1.0)], Sense::Eq, 0.0);

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(m.variable_count(), 2);
        assert_eq!(m.constraint_count(), 1);
        assert_eq!(m.var(b).kind, VarKind::Integer);
        assert_eq!(m.sense, ObjectiveSense::Minimize);
    }

    #[test]
    fn test_constraint_senses() {
        let mut m = LinearModel::new("m");
        let a = m.declare_variable("a", VarKind::Integer, 0.0);
        m.add_constraint("le", vec![(a, 1.0)], Sense::Le, 2.0);
        m.add_constraint("ge", vec![(a, 1.0)], Sense::Ge, 1.0);

        assert!(m.is_satisfied_by(&[1.0], 1e-6));
        assert!(m.is_satisfied_by(&[2.0], 1e-6));
        assert!(!m.is_satisfied_by(&[3.0], 1e-6));
        assert!(!m.is_satisfied_by(&[0.0], 1e-6));
    }

    #[test]
    fn test_domain_checks() {
        let mut m = LinearModel::new("m");
        m.declare_variable("x", VarKind::Binary, 0.0);
        assert!(m.is_satisfied_by(&[0.999_999_9], 1e-6));
        assert!(!m.is_satisfied_by(&[0.5], 1e-6));
        assert!(!m.is_satisfied_by(&[2.0], 1e-6));
        assert!(!m.is_satisfied_by(&[], 1e-6));
    }

    #[test]
    fn test_objective_value() {
        let mut m = LinearModel::new("m");
        m.declare_variable("x", VarKind::Binary, 10.0);
        m.declare_variable("y", VarKind::Integer, -5.0);
        assert!((m.objective_value(&[1.0, 2.0]) - 0.0).abs() < 1e-10);
    }
}
