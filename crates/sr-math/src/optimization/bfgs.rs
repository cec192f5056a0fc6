//! BFGS quasi-Newton minimizer.

use nalgebra::DMatrix;
use sr_core::{Error, Real, Result};

use crate::array::Array;
use crate::optimization::{
    Constraint, CostFunction, EndCriteria, EndCriteriaType, OptimizationResult,
};

/// Broyden-Fletcher-Goldfarb-Shanno minimizer.
///
/// Maintains a running approximation of the inverse Hessian and takes
/// quasi-Newton steps along it, with a backtracking Armijo line search
/// that never leaves the constrained region.
pub struct Bfgs;

impl Bfgs {
    /// Creates a new minimizer.
    pub fn new() -> Self {
        Self
    }

    /// Minimizes `cost_fn` subject to `constraint`, starting from
    /// `initial_values`.
    ///
    /// Always returns the best point found: exhausting the iteration cap
    /// is reported through [`EndCriteriaType::MaxIterations`], not as an
    /// error. The only error is an initial point that fails `constraint`.
    pub fn minimize<C: CostFunction, K: Constraint>(
        &self,
        cost_fn: &C,
        constraint: &K,
        initial_values: &Array,
        end_criteria: &EndCriteria,
    ) -> Result<OptimizationResult> {
        if !constraint.test(initial_values) {
            return Err(Error::InvalidArgument(
                "initial parameters violate the optimization constraint".into(),
            ));
        }

        let n = initial_values.size();
        let mut x = initial_values.clone();
        let mut value = cost_fn.value(&x);
        let mut grad = cost_fn.gradient(&x);
        let mut h_inv = DMatrix::<Real>::identity(n, n);

        let mut prev_value = value;
        let mut stationary = 0usize;

        for iteration in 0..end_criteria.max_iterations {
            if value < end_criteria.root_epsilon {
                return Ok(done(x, value, iteration, EndCriteriaType::RootEpsilon));
            }
            if grad.norm() < end_criteria.gradient_norm_epsilon {
                return Ok(done(x, value, iteration, EndCriteriaType::GradientNormEpsilon));
            }
            if iteration > 0 {
                if (prev_value - value).abs() < end_criteria.function_epsilon {
                    stationary += 1;
                    if stationary >= end_criteria.max_stationary_state_iterations {
                        return Ok(done(x, value, iteration, EndCriteriaType::FunctionEpsilon));
                    }
                } else {
                    stationary = 0;
                }
            }
            prev_value = value;

            // p = -H⁻¹·∇f, falling back to steepest descent if finite
            // difference noise has spoiled the curvature estimate
            let mut direction = Array::from(-(&h_inv * grad.inner()));
            let mut directional_deriv = grad.dot(&direction);
            if directional_deriv >= 0.0 {
                h_inv = DMatrix::identity(n, n);
                direction = -&grad;
                directional_deriv = -grad.norm_squared();
            }

            // Backtracking Armijo search; infeasible trial points are
            // skipped rather than evaluated
            let mut alpha = 1.0;
            let mut step = None;
            for _ in 0..50 {
                let x_trial = &x + &(&direction * alpha);
                if constraint.test(&x_trial) {
                    let trial_value = cost_fn.value(&x_trial);
                    if trial_value <= value + 1e-4 * alpha * directional_deriv {
                        step = Some((x_trial, trial_value));
                        break;
                    }
                }
                alpha *= 0.5;
            }
            let Some((x_new, new_value)) = step else {
                return Ok(done(x, value, iteration, EndCriteriaType::StationaryPoint));
            };

            let new_grad = cost_fn.gradient(&x_new);
            let s = &x_new - &x;
            let y = &new_grad - &grad;

            // H⁻¹ ← (I - ρ·s·yᵀ)·H⁻¹·(I - ρ·y·sᵀ) + ρ·s·sᵀ, skipped
            // unless sᵀy is safely positive
            let sy = s.dot(&y);
            if sy > 1e-30 {
                let rho = 1.0 / sy;
                let identity = DMatrix::<Real>::identity(n, n);
                let left = &identity - (s.inner() * y.inner().transpose()) * rho;
                let right = &identity - (y.inner() * s.inner().transpose()) * rho;
                h_inv = &left * &h_inv * right + (s.inner() * s.inner().transpose()) * rho;
            }

            x = x_new;
            value = new_value;
            grad = new_grad;
        }

        Ok(done(
            x,
            value,
            end_criteria.max_iterations,
            EndCriteriaType::MaxIterations,
        ))
    }
}

impl Default for Bfgs {
    fn default() -> Self {
        Self::new()
    }
}

fn done(x: Array, value: Real, iterations: usize, end_type: EndCriteriaType) -> OptimizationResult {
    OptimizationResult {
        x,
        value,
        iterations,
        end_type,
    }
}
