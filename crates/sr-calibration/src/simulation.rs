//! Monte-Carlo short-rate simulation.
//!
//! A [`PathGenerator`] walks a process across an equally spaced grid with
//! one Gaussian draw per step, using the process's exact transition through
//! [`StochasticProcess1D::evolve`]. The two entry points consume it in the
//! two modes the pipeline needs: [`simulate_paths`] keeps whole
//! trajectories, [`model_implied_volatility`] keeps only terminal rates and
//! condenses them into a single annualized volatility.
//!
//! All paths of one call draw from a single RNG stream in sequence, so a
//! seeded stream reproduces the full set bit-for-bit.

use tracing::debug;

use sr_core::{fail, Error, Rate, Real, Result, Time, Volatility};
use sr_math::{InverseCumulativeNormalRng, Statistics};
use sr_processes::StochasticProcess1D;

use crate::volatility::{log_returns, TRADING_DAYS_PER_YEAR};

// ── Paths ─────────────────────────────────────────────────────────────────────

/// One simulated trajectory on an equally spaced time grid.
///
/// Always holds the `t = 0` starting point, so it has `steps + 1` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedPath {
    times: Vec<Time>,
    rates: Vec<Rate>,
}

impl SimulatedPath {
    /// Grid times in years, starting at zero.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Simulated short rates, one per grid time.
    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    /// The short rate at the end of the horizon.
    pub fn terminal_value(&self) -> Rate {
        // construction always pushes the starting point first
        self.rates[self.rates.len() - 1]
    }

    /// Number of grid points (`steps + 1`).
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Always `false`; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Draws paths of a one-dimensional process on an equal-step grid.
pub struct PathGenerator<'a> {
    process: &'a dyn StochasticProcess1D,
    dt: Time,
    steps: usize,
    rng: &'a mut InverseCumulativeNormalRng,
}

impl<'a> PathGenerator<'a> {
    /// Creates a generator over `[0, horizon]` split into `steps` equal
    /// intervals, drawing Gaussians from `rng`.
    ///
    /// The generator itself accepts any process; the volatility checks live
    /// in the simulation entry points.
    pub fn new(
        process: &'a dyn StochasticProcess1D,
        horizon: Time,
        steps: usize,
        rng: &'a mut InverseCumulativeNormalRng,
    ) -> Result<Self> {
        if !horizon.is_finite() || horizon <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "simulation horizon must be positive and finite, got {horizon}"
            )));
        }
        if steps == 0 {
            return Err(Error::InvalidArgument(
                "at least one time step is required".into(),
            ));
        }
        Ok(Self {
            process,
            dt: horizon / steps as Real,
            steps,
            rng,
        })
    }

    /// Grid spacing in years.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Draws the next path, consuming one Gaussian per step.
    pub fn next_path(&mut self) -> SimulatedPath {
        let mut times = Vec::with_capacity(self.steps + 1);
        let mut rates = Vec::with_capacity(self.steps + 1);
        let mut rate = self.process.x0();
        times.push(0.0);
        rates.push(rate);
        for i in 0..self.steps {
            let t = i as Real * self.dt;
            rate = self.process.evolve(t, rate, self.dt, self.rng.next_real());
            times.push((i + 1) as Real * self.dt);
            rates.push(rate);
        }
        SimulatedPath { times, rates }
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Grid size of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Time steps per path.
    pub steps: usize,
    /// Number of paths.
    pub paths: usize,
}

impl SimulationConfig {
    /// Creates a configuration.
    pub fn new(steps: usize, paths: usize) -> Self {
        Self { steps, paths }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: 252,
            paths: 100,
        }
    }
}

fn validate(process: &dyn StochasticProcess1D, config: SimulationConfig) -> Result<()> {
    let sigma = process.diffusion(0.0, process.x0());
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(Error::InvalidArgument(format!(
            "process volatility must be strictly positive to simulate, got {sigma}"
        )));
    }
    if config.paths < 2 {
        return Err(Error::InvalidArgument(format!(
            "at least two paths are required, got {}",
            config.paths
        )));
    }
    Ok(())
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Simulates `config.paths` full trajectories over `[0, horizon]`.
///
/// Fails fast with [`Error::InvalidArgument`] on a non-stochastic process
/// (`sigma <= 0`), an empty grid, or fewer than two paths.
pub fn simulate_paths(
    process: &dyn StochasticProcess1D,
    horizon: Time,
    config: SimulationConfig,
    rng: &mut InverseCumulativeNormalRng,
) -> Result<Vec<SimulatedPath>> {
    validate(process, config)?;
    let mut generator = PathGenerator::new(process, horizon, config.steps, rng)?;
    Ok((0..config.paths).map(|_| generator.next_path()).collect())
}

/// Cross-sectional volatility of simulated terminal rates.
///
/// The terminal values are read as if they were consecutive daily
/// observations: log returns between adjacent path indices, then the sample
/// standard deviation annualized by `sqrt(252)` whatever the grid spacing
/// was. The historical estimator produces its target the same way, so both
/// sides of the calibration objective share one convention.
fn cross_sectional_volatility(terminals: &[Rate]) -> Result<Volatility> {
    let mut stats = Statistics::new();
    for r in log_returns(terminals) {
        if r.is_finite() {
            stats.add(r);
        }
    }
    match stats.std_dev() {
        Some(sd) => Ok(sd * TRADING_DAYS_PER_YEAR.sqrt()),
        None => fail!(
            "fewer than two usable log returns out of {} simulated terminal rates",
            terminals.len()
        ),
    }
}

/// Simulates to `maturity` and condenses the terminal short rates into one
/// annualized volatility (scalar mode).
///
/// Terminal rates at or below zero cannot enter a log return; the affected
/// returns are skipped like missing history. At least two usable returns
/// must remain or the call fails.
pub fn model_implied_volatility(
    process: &dyn StochasticProcess1D,
    maturity: Time,
    config: SimulationConfig,
    rng: &mut InverseCumulativeNormalRng,
) -> Result<Volatility> {
    validate(process, config)?;
    let mut generator = PathGenerator::new(process, maturity, config.steps, rng)?;

    let mut stats = Statistics::new();
    let mut terminals = Vec::with_capacity(config.paths);
    for _ in 0..config.paths {
        let terminal = generator.next_path().terminal_value();
        stats.add(terminal);
        terminals.push(terminal);
    }
    debug!(
        maturity,
        paths = config.paths,
        steps = config.steps,
        terminal_mean = stats.mean().unwrap_or(Real::NAN),
        terminal_min = stats.minimum().unwrap_or(Real::NAN),
        terminal_max = stats.maximum().unwrap_or(Real::NAN),
        "simulated terminal short rates"
    );

    cross_sectional_volatility(&terminals)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    use sr_processes::HullWhiteProcess;
    use sr_termstructures::FlatForwardCurve;

    use super::*;

    fn process(a: Real, sigma: Real) -> HullWhiteProcess<FlatForwardCurve> {
        let reference = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        HullWhiteProcess::new(FlatForwardCurve::new(reference, 0.02), a, sigma).unwrap()
    }

    #[test]
    fn default_grid_is_one_trading_year_of_steps() {
        assert_eq!(SimulationConfig::default(), SimulationConfig::new(252, 100));
    }

    #[test]
    fn rejects_degenerate_requests() {
        let mut rng = InverseCumulativeNormalRng::new(1);

        let flat = process(0.05, 0.0);
        let err = model_implied_volatility(&flat, 1.0, SimulationConfig::new(12, 10), &mut rng);
        assert!(matches!(err, Err(Error::InvalidArgument(_))));

        let hw = process(0.05, 0.01);
        let err = model_implied_volatility(&hw, 1.0, SimulationConfig::new(0, 10), &mut rng);
        assert!(matches!(err, Err(Error::InvalidArgument(_))));

        let err = simulate_paths(&hw, 1.0, SimulationConfig::new(12, 1), &mut rng);
        assert!(matches!(err, Err(Error::InvalidArgument(_))));

        let err = simulate_paths(&hw, -1.0, SimulationConfig::new(12, 10), &mut rng);
        assert!(matches!(err, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn paths_have_the_expected_shape() {
        let hw = process(0.05, 0.002);
        let mut rng = InverseCumulativeNormalRng::new(42);
        let paths = simulate_paths(&hw, 2.0, SimulationConfig::new(8, 3), &mut rng).unwrap();

        assert_eq!(paths.len(), 3);
        for path in &paths {
            assert_eq!(path.len(), 9);
            assert!(!path.is_empty());
            assert_eq!(path.times()[0], 0.0);
            assert_abs_diff_eq!(path.times()[8], 2.0, epsilon = 1e-12);
            assert_abs_diff_eq!(path.rates()[0], 0.02, epsilon = 1e-9);
            assert_eq!(path.terminal_value(), path.rates()[8]);
        }
    }

    #[test]
    fn one_seed_reproduces_the_whole_path_set() {
        let hw = process(0.05, 0.002);
        let config = SimulationConfig::new(16, 20);

        let mut rng = InverseCumulativeNormalRng::new(7);
        let first = simulate_paths(&hw, 1.0, config, &mut rng).unwrap();
        let mut rng = InverseCumulativeNormalRng::new(7);
        let second = simulate_paths(&hw, 1.0, config, &mut rng).unwrap();
        assert_eq!(first, second);

        let mut rng = InverseCumulativeNormalRng::new(8);
        let other = simulate_paths(&hw, 1.0, config, &mut rng).unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn zero_volatility_paths_follow_the_conditional_expectation() {
        let hw = process(0.1, 0.0);
        let mut rng = InverseCumulativeNormalRng::new(3);
        let mut generator = PathGenerator::new(&hw, 1.0, 4, &mut rng).unwrap();
        let path = generator.next_path();

        let dt = 0.25;
        let mut expected = hw.x0();
        for (i, &rate) in path.rates().iter().enumerate().skip(1) {
            expected = hw.expectation((i - 1) as Real * dt, expected, dt);
            assert_eq!(rate, expected);
        }
    }

    #[test]
    fn cross_sectional_estimator_uses_path_index_order() {
        let hw = process(0.05, 0.002);
        let config = SimulationConfig::new(8, 50);

        let mut rng = InverseCumulativeNormalRng::new(7);
        let paths = simulate_paths(&hw, 1.0, config, &mut rng).unwrap();
        let terminals: Vec<Rate> = paths.iter().map(|p| p.terminal_value()).collect();

        // returns between adjacent indices in simulation order
        let mut stats = Statistics::new();
        for r in log_returns(&terminals) {
            if r.is_finite() {
                stats.add(r);
            }
        }
        let by_hand = stats.std_dev().unwrap() * TRADING_DAYS_PER_YEAR.sqrt();

        let mut rng = InverseCumulativeNormalRng::new(7);
        let estimated = model_implied_volatility(&hw, 1.0, config, &mut rng).unwrap();
        assert_eq!(estimated, by_hand);

        // sorting the terminals changes the answer, so index order matters
        let mut sorted = terminals;
        sorted.sort_by(Real::total_cmp);
        let mut sorted_stats = Statistics::new();
        for r in log_returns(&sorted) {
            if r.is_finite() {
                sorted_stats.add(r);
            }
        }
        let from_sorted = sorted_stats.std_dev().unwrap() * TRADING_DAYS_PER_YEAR.sqrt();
        assert!((from_sorted - by_hand).abs() > 1e-8);
    }

    #[test]
    fn too_few_usable_returns_is_a_runtime_error() {
        // deeply negative initial curve keeps every terminal below zero
        let reference = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let hw =
            HullWhiteProcess::new(FlatForwardCurve::new(reference, -0.5), 0.05, 1e-6).unwrap();
        let mut rng = InverseCumulativeNormalRng::new(11);
        let err = model_implied_volatility(&hw, 1.0, SimulationConfig::new(4, 10), &mut rng);
        assert!(matches!(err, Err(Error::Runtime(_))));
    }
}
