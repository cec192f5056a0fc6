//! Least-squares optimization for model calibration.
//!
//! A cost function exposes a residual vector; the scalar objective defaults
//! to the sum of squared residuals, which is what the calibration routines
//! minimize. Constraints keep line searches inside the admissible parameter
//! region, and end criteria bound the work an optimizer may do.

use crate::array::Array;
use sr_core::Real;

pub mod bfgs;

pub use bfgs::Bfgs;

// ── Cost function ─────────────────────────────────────────────────────────────

/// A multi-dimensional objective expressed through its residuals.
pub trait CostFunction {
    /// Residual vector at `x`, one entry per fitted quantity.
    fn values(&self, x: &Array) -> Array;

    /// Scalar objective at `x`. Defaults to the sum of squared residuals.
    fn value(&self, x: &Array) -> Real {
        self.values(x).norm_squared()
    }

    /// Gradient of the scalar objective. Defaults to forward differences
    /// on `value`, so it stays consistent with any override of `value`.
    fn gradient(&self, x: &Array) -> Array {
        let eps = 1e-8;
        let f0 = self.value(x);
        let n = x.size();
        let mut grad = Array::zeros(n);
        for j in 0..n {
            let mut xp = x.clone();
            xp[j] += eps;
            grad[j] = (self.value(&xp) - f0) / eps;
        }
        grad
    }
}

// ── Constraints ───────────────────────────────────────────────────────────────

/// A feasibility test on the parameter space.
pub trait Constraint {
    /// Returns `true` if `x` is admissible.
    fn test(&self, x: &Array) -> bool;
}

/// Accepts every parameter vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConstraint;

impl Constraint for NoConstraint {
    fn test(&self, _x: &Array) -> bool {
        true
    }
}

/// Requires every parameter to be strictly positive.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositiveConstraint;

impl Constraint for PositiveConstraint {
    fn test(&self, x: &Array) -> bool {
        x.iter().all(|&v| v > 0.0)
    }
}

/// Requires every parameter to be zero or above.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonNegativeConstraint;

impl Constraint for NonNegativeConstraint {
    fn test(&self, x: &Array) -> bool {
        x.iter().all(|&v| v >= 0.0)
    }
}

// ── End criteria ──────────────────────────────────────────────────────────────

/// Bounds on the work an optimizer may do before it gives up.
#[derive(Debug, Clone)]
pub struct EndCriteria {
    /// Hard cap on iterations.
    pub max_iterations: usize,
    /// Consecutive near-stationary iterations tolerated before stopping.
    pub max_stationary_state_iterations: usize,
    /// Stop once the objective itself drops below this.
    pub root_epsilon: Real,
    /// Objective changes smaller than this count as stationary.
    pub function_epsilon: Real,
    /// Stop once the gradient norm drops below this.
    pub gradient_norm_epsilon: Real,
}

impl EndCriteria {
    /// Creates fully specified end criteria.
    pub fn new(
        max_iterations: usize,
        max_stationary_state_iterations: usize,
        root_epsilon: Real,
        function_epsilon: Real,
        gradient_norm_epsilon: Real,
    ) -> Self {
        Self {
            max_iterations,
            max_stationary_state_iterations,
            root_epsilon,
            function_epsilon,
            gradient_norm_epsilon,
        }
    }
}

impl Default for EndCriteria {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            max_stationary_state_iterations: 100,
            root_epsilon: 1e-8,
            function_epsilon: 1e-8,
            gradient_norm_epsilon: 1e-8,
        }
    }
}

/// Why an optimization run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCriteriaType {
    /// The iteration cap was reached before any tolerance was met.
    MaxIterations,
    /// The objective fell below `root_epsilon`.
    RootEpsilon,
    /// The objective stalled within `function_epsilon` for the allowed
    /// number of consecutive iterations.
    FunctionEpsilon,
    /// The gradient norm fell below `gradient_norm_epsilon`.
    GradientNormEpsilon,
    /// The line search could no longer find a descent step.
    StationaryPoint,
}

/// Outcome of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best parameter vector found.
    pub x: Array,
    /// Objective value at `x`.
    pub value: Real,
    /// Iterations performed.
    pub iterations: usize,
    /// Why the run stopped.
    pub end_type: EndCriteriaType,
}

impl OptimizationResult {
    /// `true` unless the run stopped only because of the iteration cap.
    pub fn converged(&self) -> bool {
        self.end_type != EndCriteriaType::MaxIterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_constraint_rejects_zero() {
        let c = PositiveConstraint;
        assert!(c.test(&Array::from_slice(&[0.5, 2.0])));
        assert!(!c.test(&Array::from_slice(&[0.0, 2.0])));
        assert!(!c.test(&Array::from_slice(&[0.5, -1.0])));
    }

    #[test]
    fn non_negative_constraint_accepts_zero() {
        let c = NonNegativeConstraint;
        assert!(c.test(&Array::from_slice(&[0.0, 0.0])));
        assert!(!c.test(&Array::from_slice(&[-1e-12, 0.0])));
    }

    #[test]
    fn default_value_is_sum_of_squares() {
        struct TwoResiduals;
        impl CostFunction for TwoResiduals {
            fn values(&self, x: &Array) -> Array {
                Array::from_slice(&[x[0] - 1.0, x[0] + 1.0])
            }
        }
        // at x = 0 the residuals are (-1, 1), so the objective is 2
        let v = TwoResiduals.value(&Array::from_slice(&[0.0]));
        assert!((v - 2.0).abs() < 1e-12);
    }

    #[test]
    fn finite_difference_gradient_of_quadratic() {
        struct Quadratic;
        impl CostFunction for Quadratic {
            fn values(&self, x: &Array) -> Array {
                Array::from_slice(&[x[0] - 3.0, 2.0 * x[1]])
            }
        }
        // f = (x0 - 3)² + 4·x1², so ∇f = (2(x0 - 3), 8·x1)
        let g = Quadratic.gradient(&Array::from_slice(&[1.0, 0.5]));
        assert!((g[0] - (-4.0)).abs() < 1e-5);
        assert!((g[1] - 4.0).abs() < 1e-5);
    }

    #[test]
    fn converged_flag_tracks_end_type() {
        let make = |end_type| OptimizationResult {
            x: Array::from_slice(&[0.0]),
            value: 0.0,
            iterations: 10,
            end_type,
        };
        assert!(!make(EndCriteriaType::MaxIterations).converged());
        assert!(make(EndCriteriaType::FunctionEpsilon).converged());
        assert!(make(EndCriteriaType::StationaryPoint).converged());
    }
}
