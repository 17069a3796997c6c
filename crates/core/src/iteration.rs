//! Bounded fixed-point iteration shared by the hull-transfer, gap-radiation,
//! air-absorption and dumbbell mass-ratio solvers.
//!
//! Every loop runs under an iteration ceiling; reaching it is reported as
//! [`IterationError::NonConvergence`] instead of spinning forever.

use thiserror::Error;
use tracing::debug;

/// Stopping criterion comparing two successive iterates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// Stop once `|next - previous| <= tol`.
    Absolute(f64),
    /// Stop once `|(next - previous) / previous| <= tol`.
    Relative(f64),
}

impl Tolerance {
    /// Whether the step from `previous` to `next` satisfies the criterion.
    ///
    /// A NaN change (e.g. relative change from zero) counts as converged, so a
    /// degenerate sequence stops instead of exhausting the ceiling.
    pub fn is_met(&self, previous: f64, next: f64) -> bool {
        let change = match *self {
            Tolerance::Absolute(_) => (next - previous).abs(),
            Tolerance::Relative(_) => ((next - previous) / previous).abs(),
        };
        let limit = match *self {
            Tolerance::Absolute(t) | Tolerance::Relative(t) => t,
        };
        !(change > limit)
    }
}

/// Raised when an iteration ceiling is reached.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IterationError {
    #[error("{solver} did not converge within {iterations} iterations (last change {last_change:e})")]
    NonConvergence {
        solver: &'static str,
        iterations: usize,
        last_change: f64,
    },
}

/// Outcome of a generic state iteration step.
#[derive(Debug, Clone)]
pub enum Step<S> {
    /// Keep iterating from the new state.
    Next(S),
    /// Stop immediately with this state (e.g. a feasibility limit was hit).
    Halt(S),
}

/// Converged (or halted) iteration result.
#[derive(Debug, Clone)]
pub struct Solution<S> {
    pub state: S,
    pub iterations: usize,
    pub halted: bool,
}

/// Damped fixed-point iteration with a hard iteration ceiling.
#[derive(Debug, Clone, Copy)]
pub struct FixedPoint {
    pub solver: &'static str,
    pub tolerance: Tolerance,
    pub damping: f64,
    pub max_iterations: usize,
}

impl FixedPoint {
    /// Undamped solver.
    pub fn new(solver: &'static str, tolerance: Tolerance, max_iterations: usize) -> Self {
        Self {
            solver,
            tolerance,
            damping: 1.0,
            max_iterations,
        }
    }

    /// Apply a damping factor `d`: each update moves `x` by `d * (g(x) - x)`.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Solve `x = g(x)` for a scalar map.
    ///
    /// Returns the iterate `x` whose image `g(x)` lies within tolerance of it.
    pub fn solve<E, G>(&self, initial: f64, mut map: G) -> Result<Solution<f64>, E>
    where
        G: FnMut(f64) -> Result<f64, E>,
        E: From<IterationError>,
    {
        let mut x = initial;
        let mut last_change = f64::INFINITY;
        for iteration in 1..=self.max_iterations {
            let image = map(x)?;
            if self.tolerance.is_met(x, image) {
                debug!(solver = self.solver, iterations = iteration, value = x, "fixed point converged");
                return Ok(Solution {
                    state: x,
                    iterations: iteration,
                    halted: false,
                });
            }
            last_change = image - x;
            x += self.damping * (image - x);
        }
        Err(self.non_convergence(last_change).into())
    }

    /// Iterate an arbitrary state until the scalar extracted by `value`
    /// settles, or until `step` halts.
    ///
    /// The first step is always taken; convergence compares the values of
    /// consecutive states and returns the newer one. Damping does not apply.
    pub fn iterate<S, V, F>(&self, initial: S, value: V, mut step: F) -> Result<Solution<S>, IterationError>
    where
        V: Fn(&S) -> f64,
        F: FnMut(&S) -> Step<S>,
    {
        let mut current = initial;
        let mut last_change = f64::INFINITY;
        for iteration in 1..=self.max_iterations {
            match step(&current) {
                Step::Halt(state) => {
                    debug!(solver = self.solver, iterations = iteration, "iteration halted");
                    return Ok(Solution {
                        state,
                        iterations: iteration,
                        halted: true,
                    });
                }
                Step::Next(next) => {
                    let previous = value(&current);
                    let latest = value(&next);
                    current = next;
                    if self.tolerance.is_met(previous, latest) {
                        debug!(solver = self.solver, iterations = iteration, value = latest, "iteration converged");
                        return Ok(Solution {
                            state: current,
                            iterations: iteration,
                            halted: false,
                        });
                    }
                    last_change = latest - previous;
                }
            }
        }
        Err(self.non_convergence(last_change))
    }

    fn non_convergence(&self, last_change: f64) -> IterationError {
        IterationError::NonConvergence {
            solver: self.solver,
            iterations: self.max_iterations,
            last_change,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damped_solver_finds_cosine_fixed_point() {
        let solver = FixedPoint::new("cosine", Tolerance::Absolute(1e-10), 10_000).with_damping(0.5);
        let solution = solver
            .solve::<IterationError, _>(1.0, |x| Ok(x.cos()))
            .expect("converges");
        assert!((solution.state - 0.739_085_133_2).abs() < 1e-8, "x = {}", solution.state);
    }

    #[test]
    fn ceiling_reports_non_convergence() {
        let solver = FixedPoint::new("diverging", Tolerance::Relative(1e-6), 25);
        let err = solver
            .solve::<IterationError, _>(1.0, |x| Ok(2.0 * x))
            .expect_err("must not converge");
        match err {
            IterationError::NonConvergence { solver, iterations, .. } => {
                assert_eq!(solver, "diverging");
                assert_eq!(iterations, 25);
            }
        }
    }

    #[test]
    fn state_iteration_can_halt_early() {
        let solver = FixedPoint::new("halting", Tolerance::Relative(1e-3), 100);
        let solution = solver
            .iterate(1.0_f64, |s| *s, |s| if *s > 10.0 { Step::Halt(*s) } else { Step::Next(s * 3.0) })
            .expect("halts");
        assert!(solution.halted);
        assert_eq!(solution.state, 27.0);
        assert_eq!(solution.iterations, 4);
    }

    #[test]
    fn relative_change_from_zero_counts_as_converged() {
        assert!(Tolerance::Relative(0.01).is_met(0.0, 0.0));
        assert!(!Tolerance::Relative(0.01).is_met(1.0, 1.5));
        assert!(Tolerance::Absolute(0.1).is_met(20.0, 20.05));
    }
}
