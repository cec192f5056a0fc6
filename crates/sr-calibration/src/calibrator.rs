//! Hull-White parameter calibration.
//!
//! Two modes share one optimizer and one parameter vector `[a, sigma]`.
//! Surface mode matches Monte-Carlo model volatilities to the historical
//! surface's column means; fixings mode matches the model's expected short
//! rate to each observed fixing. Both start from `(0.03, 0.001)`, keep the
//! search inside the admissible region through a constraint, and report an
//! exhausted iteration cap as `converged = false` rather than an error.

use std::cell::RefCell;
use std::fmt;

use tracing::{debug, info, warn};

use sr_core::{year_fraction_act365, Error, Rate, Real, Result, Time, Volatility};
use sr_math::array::Array;
use sr_math::optimization::{
    Bfgs, Constraint, CostFunction, EndCriteria, EndCriteriaType, NonNegativeConstraint,
    OptimizationResult,
};
use sr_math::InverseCumulativeNormalRng;
use sr_processes::{HullWhiteProcess, StochasticProcess1D};
use sr_termstructures::ForwardCurve;

use crate::fixings::FixingPoint;
use crate::simulation::{model_implied_volatility, SimulationConfig};
use crate::volatility::{VolatilitySurface, WINDOW_YEARS};

// ── Public types ──────────────────────────────────────────────────────────────

/// A Hull-White parameter pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParameters {
    /// Mean-reversion speed `a`.
    pub mean_reversion: Real,
    /// Short-rate volatility `sigma`.
    pub volatility: Volatility,
}

impl ModelParameters {
    /// Creates a parameter pair.
    pub fn new(mean_reversion: Real, volatility: Volatility) -> Self {
        Self {
            mean_reversion,
            volatility,
        }
    }
}

/// Everything a calibration run needs besides the data.
#[derive(Debug, Clone)]
pub struct CalibrationSettings {
    /// Starting point of the search.
    pub initial_guess: ModelParameters,
    /// Model maturities in years, paired column-for-column with the
    /// surface windows.
    pub maturities: [Time; 6],
    /// Monte-Carlo grid for each surface-mode objective evaluation.
    pub simulation: SimulationConfig,
    /// Replay seed for the Gaussian draws. `Some` replays the same draws
    /// on every evaluation, making the surface-mode objective a
    /// deterministic function of `(a, sigma)`; `None` draws fresh entropy
    /// each time, so repeated runs may differ slightly.
    pub seed: Option<u64>,
    /// Optimizer stopping rules.
    pub end_criteria: EndCriteria,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            initial_guess: ModelParameters::new(0.03, 0.001),
            maturities: WINDOW_YEARS,
            simulation: SimulationConfig::default(),
            seed: None,
            end_criteria: EndCriteria::default(),
        }
    }
}

/// Outcome of a calibration run.
#[derive(Debug, Clone)]
pub struct CalibrationResult {
    /// Best parameters found.
    pub parameters: ModelParameters,
    /// Objective value at those parameters.
    pub objective: Real,
    /// Optimizer iterations performed.
    pub iterations: usize,
    /// `false` when the run stopped only because of the iteration cap;
    /// the parameters are still the best seen.
    pub converged: bool,
    /// Detailed stop reason.
    pub end_criteria_type: EndCriteriaType,
}

// ── Parameter space ───────────────────────────────────────────────────────────

/// Admissible surface-mode parameters: `a >= 0` and `sigma > 0`.
///
/// The simulator rejects `sigma <= 0`, so the line search must never try
/// it; mean reversion may sit exactly at zero.
#[derive(Debug, Clone, Copy, Default)]
struct ParameterBounds;

impl Constraint for ParameterBounds {
    fn test(&self, x: &Array) -> bool {
        x[0] >= 0.0 && x[1] > 0.0
    }
}

// ── Objectives ────────────────────────────────────────────────────────────────

/// Sum-of-squares distance between historical and simulated volatilities.
///
/// The optimizer sees an infallible objective; a failed evaluation latches
/// its error here and poisons the residuals with NaN, which no line search
/// will accept. The calibration entry point turns the latch back into
/// `Err`, so a broken evaluation aborts the run instead of being skipped.
struct SurfaceObjective<'a, C> {
    curve: &'a C,
    targets: [Volatility; 6],
    maturities: [Time; 6],
    simulation: SimulationConfig,
    seed: Option<u64>,
    failure: RefCell<Option<Error>>,
}

impl<C> SurfaceObjective<'_, C>
where
    C: ForwardCurve + Clone + fmt::Debug + Send + Sync,
{
    fn residuals(&self, x: &Array) -> Result<Array> {
        let process = HullWhiteProcess::new(self.curve.clone(), x[0], x[1])?;
        let mut rng = match self.seed {
            Some(seed) => InverseCumulativeNormalRng::new(seed),
            None => InverseCumulativeNormalRng::from_entropy(),
        };
        let mut residuals = Array::zeros(self.maturities.len());
        for (k, (&maturity, &target)) in
            self.maturities.iter().zip(self.targets.iter()).enumerate()
        {
            let model = model_implied_volatility(&process, maturity, self.simulation, &mut rng)?;
            residuals[k] = target - model;
        }
        debug!(
            a = x[0],
            sigma = x[1],
            objective = residuals.norm_squared(),
            "evaluated surface objective"
        );
        Ok(residuals)
    }
}

impl<C> CostFunction for SurfaceObjective<'_, C>
where
    C: ForwardCurve + Clone + fmt::Debug + Send + Sync,
{
    fn values(&self, x: &Array) -> Array {
        if self.failure.borrow().is_some() {
            return Array::from_vec(vec![Real::NAN; self.maturities.len()]);
        }
        match self.residuals(x) {
            Ok(residuals) => residuals,
            Err(error) => {
                *self.failure.borrow_mut() = Some(error);
                Array::from_vec(vec![Real::NAN; self.maturities.len()])
            }
        }
    }
}

/// Distance between the model's expected short rate and each observed
/// fixing, reported as the root of the summed squares.
struct FixingsObjective<'a, C> {
    curve: &'a C,
    /// Absolute Act/365F offsets from the valuation date, with the
    /// observed rates already converted to decimals.
    observations: Vec<(Time, Rate)>,
    failure: RefCell<Option<Error>>,
}

impl<C> FixingsObjective<'_, C>
where
    C: ForwardCurve + Clone + fmt::Debug + Send + Sync,
{
    fn residuals(&self, x: &Array) -> Result<Array> {
        let process = HullWhiteProcess::new(self.curve.clone(), x[0], x[1])?;
        let mut residuals = Array::zeros(self.observations.len());
        for (k, &(t, observed)) in self.observations.iter().enumerate() {
            residuals[k] = process.expectation(0.0, 0.0, t) - observed;
        }
        Ok(residuals)
    }
}

impl<C> CostFunction for FixingsObjective<'_, C>
where
    C: ForwardCurve + Clone + fmt::Debug + Send + Sync,
{
    fn values(&self, x: &Array) -> Array {
        if self.failure.borrow().is_some() {
            return Array::from_vec(vec![Real::NAN; self.observations.len()]);
        }
        match self.residuals(x) {
            Ok(residuals) => residuals,
            Err(error) => {
                *self.failure.borrow_mut() = Some(error);
                Array::from_vec(vec![Real::NAN; self.observations.len()])
            }
        }
    }

    // the fixings fit reports distance, not squared distance
    fn value(&self, x: &Array) -> Real {
        self.values(x).norm()
    }
}

// ── Entry points ──────────────────────────────────────────────────────────────

fn minimize<C: CostFunction, K: Constraint>(
    objective: &C,
    constraint: &K,
    settings: &CalibrationSettings,
) -> Result<OptimizationResult> {
    let initial = Array::from_slice(&[
        settings.initial_guess.mean_reversion,
        settings.initial_guess.volatility,
    ]);
    Bfgs::new().minimize(objective, constraint, &initial, &settings.end_criteria)
}

fn report(mode: &str, outcome: OptimizationResult) -> CalibrationResult {
    let parameters = ModelParameters::new(outcome.x[0], outcome.x[1]);
    if outcome.converged() {
        info!(
            mode,
            a = parameters.mean_reversion,
            sigma = parameters.volatility,
            objective = outcome.value,
            iterations = outcome.iterations,
            "calibration finished"
        );
    } else {
        warn!(
            mode,
            a = parameters.mean_reversion,
            sigma = parameters.volatility,
            objective = outcome.value,
            iterations = outcome.iterations,
            "iteration cap reached, keeping the best parameters found"
        );
    }
    CalibrationResult {
        parameters,
        objective: outcome.value,
        iterations: outcome.iterations,
        converged: outcome.converged(),
        end_criteria_type: outcome.end_type,
    }
}

/// Calibrates `(a, sigma)` so simulated model volatilities match the
/// surface's column means under a sum-of-squares objective.
///
/// Errors with [`Error::InsufficientHistory`] on an empty surface and
/// propagates the first failed simulation evaluation unchanged. Hitting
/// the iteration cap is *not* an error: the result carries the best
/// parameters found and `converged = false`.
pub fn calibrate_to_surface<C>(
    surface: &VolatilitySurface,
    curve: &C,
    settings: &CalibrationSettings,
) -> Result<CalibrationResult>
where
    C: ForwardCurve + Clone + fmt::Debug + Send + Sync,
{
    let targets = surface.column_means()?;
    info!(
        rows = surface.len(),
        ?targets,
        "calibrating to the historical volatility surface"
    );

    let objective = SurfaceObjective {
        curve,
        targets,
        maturities: settings.maturities,
        simulation: settings.simulation,
        seed: settings.seed,
        failure: RefCell::new(None),
    };
    let outcome = minimize(&objective, &ParameterBounds, settings)?;
    if let Some(error) = objective.failure.into_inner() {
        return Err(error);
    }
    Ok(report("surface", outcome))
}

/// Calibrates `(a, sigma)` so the model's expected short rate matches each
/// historical fixing under a root-sum-of-squares objective.
///
/// Offsets are absolute Act/365F year fractions from the curve's reference
/// date, so fixings before and after it both contribute. Fixings arrive as
/// percent quotes and are converted to decimals here. No Monte Carlo is
/// involved, so the run is deterministic.
pub fn calibrate_to_fixings<C>(
    fixings: &[FixingPoint],
    curve: &C,
    settings: &CalibrationSettings,
) -> Result<CalibrationResult>
where
    C: ForwardCurve + Clone + fmt::Debug + Send + Sync,
{
    if fixings.is_empty() {
        return Err(Error::InsufficientHistory {
            required: 1,
            available: 0,
        });
    }

    let valuation = curve.reference_date();
    let observations: Vec<(Time, Rate)> = fixings
        .iter()
        .map(|p| {
            (
                year_fraction_act365(valuation, p.date).abs(),
                p.rate / 100.0,
            )
        })
        .collect();
    info!(
        observations = observations.len(),
        "calibrating to historical fixings"
    );

    let objective = FixingsObjective {
        curve,
        observations,
        failure: RefCell::new(None),
    };
    let outcome = minimize(&objective, &NonNegativeConstraint, settings)?;
    if let Some(error) = objective.failure.into_inner() {
        return Err(error);
    }
    Ok(report("fixings", outcome))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
