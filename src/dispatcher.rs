//! Dispatch orchestration.
//!
//! Sequences validation, model building, the external solve and decoding.
//! Owns no rule logic: every constraint comes from a
//! [`ConstraintFamily`](crate::formulation::ConstraintFamily).

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::DispatchConfig;
use crate::error::DispatchError;
use crate::events::{ModelEvent, ModelObserver};
use crate::formulation::{decode, standard_families, ModelContext, VariableRegistry};
use crate::milp::{LinearModel, MilpSolution, MilpSolver};
use crate::models::DispatchProblem;
use crate::validation::validate_input;

pub use crate::formulation::{DispatchOutcome, NoSolutionReason};

/// Builds and solves a dispatch model for one problem.
///
/// # Example
/// ```
/// use u_roster::dispatcher::Dispatcher;
/// use u_roster::milp::GoodLpSolver;
/// use u_roster::models::{DispatchProblem, Resource, Shift};
///
/// let problem = DispatchProblem::with_inferred_horizon(
///     vec![Resource::internal("Max").with_skill("fitter")],
///     vec![Shift::new("ID1", 1, "Zurich").with_demand("fitter", 1)],
/// );
/// let outcome = Dispatcher::new(&problem).solve(&GoodLpSolver::new()).unwrap();
/// let roster = outcome.roster().unwrap();
/// assert_eq!(roster.assignment_count(), 1);
/// ```
pub struct Dispatcher<'a> {
    problem: &'a DispatchProblem,
    config: DispatchConfig,
    observer: Option<Arc<dyn ModelObserver>>,
}

/// A built model together with the lookups needed to decode it.
#[derive(Debug)]
pub struct FormulatedModel<'a> {
    context: ModelContext<'a>,
    registry: VariableRegistry,
}

impl<'a> FormulatedModel<'a> {
    pub fn model(&self) -> &LinearModel {
        self.registry.model()
    }

    pub fn registry(&self) -> &VariableRegistry {
        &self.registry
    }

    pub fn context(&self) -> &ModelContext<'a> {
        &self.context
    }

    /// Decodes a solver result for this model.
    pub fn decode(&self, solution: &MilpSolution, accept_feasible: bool) -> DispatchOutcome {
        decode(&self.context, &self.registry, solution, accept_feasible)
    }
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher with the default configuration.
    pub fn new(problem: &'a DispatchProblem) -> Self {
        Self {
            problem,
            config: DispatchConfig::default(),
            observer: None,
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets an observer for build and solve events.
    pub fn with_observer(mut self, observer: Arc<dyn ModelObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Builds the model.
    ///
    /// Declares the assignment variables, then runs every standard family
    /// in order. Fails only on invalid configuration or, when enabled,
    /// invalid input.
    pub fn build(&self) -> Result<FormulatedModel<'a>, DispatchError> {
        self.config.validate()?;
        if self.config.solve.validate_input {
            validate_input(self.problem).map_err(DispatchError::Validation)?;
        }

        let context = ModelContext::new(self.problem);
        let mut registry = VariableRegistry::new("dispatch");
        let declared = registry.declare_assignments(
            &context,
            self.config.model.skill_scope,
            self.config.weights.external_multiplier,
        );
        debug!(
            event = "assignments_declared",
            variables = declared,
            scope = ?self.config.model.skill_scope,
        );

        for family in standard_families(&self.config) {
            let vars_before = registry.model().variable_count();
            let rows_before = registry.model().constraint_count();
            family.build(&context, &mut registry);
            self.emit(&ModelEvent::FamilyBuilt {
                family: family.name(),
                variables_added: registry.model().variable_count() - vars_before,
                constraints_added: registry.model().constraint_count() - rows_before,
            });
        }

        Ok(FormulatedModel { context, registry })
    }

    /// Builds, solves and decodes.
    pub fn solve<S: MilpSolver + ?Sized>(&self, solver: &S) -> Result<DispatchOutcome, DispatchError> {
        self.solve_detailed(solver).map(|(outcome, _)| outcome)
    }

    /// Like [`solve`](Self::solve), also returning the raw solver result.
    pub fn solve_detailed<S: MilpSolver + ?Sized>(
        &self,
        solver: &S,
    ) -> Result<(DispatchOutcome, MilpSolution), DispatchError> {
        let formulated = self.build()?;
        let model = formulated.model();
        info!(
            event = "dispatch_start",
            resources = self.problem.resource_count(),
            shifts = self.problem.shift_count(),
            horizon = self.problem.horizon,
        );

        self.emit(&ModelEvent::SolveStarted {
            variables: model.variable_count(),
            constraints: model.constraint_count(),
        });
        let solution = solver.solve(model, &self.config.solve.policy());
        self.emit(&ModelEvent::SolveFinished {
            status: solution.status,
            objective_value: solution.objective_value,
            solve_time_ms: solution.solve_time_ms,
        });

        let outcome = formulated.decode(&solution, self.config.solve.accept_feasible);
        match &outcome {
            DispatchOutcome::Solved(roster) => info!(
                event = "dispatch_end",
                assignments = roster.assignment_count(),
                objective = roster.objective_value,
                proven_optimal = roster.proven_optimal,
            ),
            DispatchOutcome::NoSolution(reason) => info!(
                event = "dispatch_end",
                no_solution = ?reason,
                status = ?solution.status,
            ),
        }
        Ok((outcome, solution))
    }

    fn emit(&self, event: &ModelEvent) {
        if let Some(observer) = &self.observer {
            observer.on_event(event);
        }
    }
}
