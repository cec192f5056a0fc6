//! Full-pipeline tests through the façade: recorded fixings to volatility
//! surface, calibrated Hull-White parameters, simulated paths, and a
//! projected payment schedule.

use approx::assert_abs_diff_eq;
use chrono::{Days, NaiveDate};
use shortrate::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Daily percent fixings alternating between 4% and `4% * e^0.01`, so every
/// log return is +/-0.01 and each rolling window sees the same spread.
fn record_oscillating_history(store: &FixingStore, start: NaiveDate, days: u64) {
    store.add_fixings(
        "EURIBOR",
        IndexTenor::M6,
        (0..days).map(|i| {
            let rate = if i % 2 == 0 { 4.0 } else { 4.0 * 0.01f64.exp() };
            FixingPoint::new(start.checked_add_days(Days::new(i)).unwrap(), rate)
        }),
    );
}

/// Small Monte-Carlo grid and a tight iteration cap so the whole chain runs
/// in test time.
fn chain_settings(seed: u64) -> CalibrationSettings {
    CalibrationSettings {
        simulation: SimulationConfig::new(4, 24),
        seed: Some(seed),
        end_criteria: EndCriteria::new(25, 100, 1e-8, 1e-8, 1e-8),
        ..CalibrationSettings::default()
    }
}

// ───────────────────── history to payment schedule ─────────────────────

#[test]
fn history_flows_through_to_a_payment_schedule() {
    let store = FixingStore::new();
    let start = date(2005, 1, 3);
    record_oscillating_history(&store, start, 5_200);

    let history = store.history("EURIBOR", IndexTenor::M6).unwrap();
    let surface = VolatilitySurface::estimate(&history.window(FixingQuery::all()));
    // 5199 returns, and the 5040-day window is the last to fill up
    assert_eq!(surface.len(), 160);

    let valuation = start.checked_add_days(Days::new(5_199)).unwrap();
    let curve = FlatForwardCurve::new(valuation, 0.04);
    let result = calibrate_to_surface(&surface, &curve, &chain_settings(2024)).unwrap();
    assert!(result.parameters.mean_reversion >= 0.0);
    assert!(result.parameters.volatility > 0.0);
    assert!(result.objective.is_finite() && result.objective >= 0.0);
    assert!(result.iterations <= 25);
    assert_eq!(
        result.converged,
        result.end_criteria_type != EndCriteriaType::MaxIterations
    );

    let process = HullWhiteProcess::new(
        curve,
        result.parameters.mean_reversion,
        result.parameters.volatility,
    )
    .unwrap();
    let mut rng = InverseCumulativeNormalRng::new(7);
    let paths = simulate_paths(&process, 30.0, SimulationConfig::new(360, 8), &mut rng).unwrap();
    assert_eq!(paths.len(), 8);
    assert_eq!(paths[0].len(), 361);

    let path_points: Vec<(NaiveDate, Rate)> = paths[0]
        .times()
        .iter()
        .zip(paths[0].rates())
        .map(|(&t, &r)| {
            let day = valuation
                .checked_add_days(Days::new((t * 365.0).round() as u64))
                .unwrap();
            (day, r)
        })
        .collect();
    let schedule = project_annuity(&path_points, 250_000.0, 30, IndexTenor::M6).unwrap();

    assert_eq!(schedule.len(), 360);
    assert_eq!(schedule[0].date, valuation);
    for window in schedule.windows(2) {
        assert!(window[0].date < window[1].date);
    }
    assert!(schedule.iter().all(|e| e.amount.is_finite() && e.amount > 0.0));

    // short rates stay near 4%, so total interest is strictly positive and
    // the balance amortizes to zero on the last installment
    let paid: Real = schedule.iter().map(|e| e.amount).sum();
    assert!(paid > 250_000.0);

    let replay_curve = DepositStripCurve::new(IndexTenor::M6, &path_points).unwrap();
    let mut outstanding = 250_000.0;
    for entry in &schedule {
        let accrual_end = entry.date.checked_add_months(chrono::Months::new(1)).unwrap();
        let monthly = replay_curve.forward_rate(entry.date, accrual_end) / 12.0;
        let next = outstanding - (entry.amount - outstanding * monthly);
        assert!(next <= outstanding);
        outstanding = next;
    }
    assert_abs_diff_eq!(outstanding, 0.0, epsilon = 1e-6 * 250_000.0);
}

// ───────────────────── short histories ─────────────────────

#[test]
fn sub_year_history_yields_an_empty_surface() {
    let store = FixingStore::new();
    let start = date(2024, 1, 2);
    record_oscillating_history(&store, start, 200);

    let history = store.history("EURIBOR", IndexTenor::M6).unwrap();
    let surface = VolatilitySurface::estimate(&history.window(FixingQuery::all()));
    assert!(surface.is_empty());

    let curve = FlatForwardCurve::new(start, 0.04);
    let err = calibrate_to_surface(&surface, &curve, &CalibrationSettings::default()).unwrap_err();
    assert!(matches!(err, Error::InsufficientHistory { .. }));
}

// ───────────────────── simulator stability ─────────────────────

#[test]
fn growing_path_counts_stabilize_the_model_volatility() {
    let curve = FlatForwardCurve::new(date(2024, 1, 2), 0.02);
    let process = HullWhiteProcess::new(curve, 0.05, 0.002).unwrap();

    // constant-rate reference from the delta method: one-year terminals are
    // roughly N(mean, sd), so adjacent log returns have standard deviation
    // sqrt(2) * sd / mean before annualization
    let shape = 0.002 / 0.05 * (1.0 - (-0.05f64).exp());
    let mean = 0.02 + shape * shape / 2.0;
    let sd = 0.002 * ((1.0 - (-0.1f64).exp()) / 0.1).sqrt();
    let reference = std::f64::consts::SQRT_2 * sd / mean * 252f64.sqrt();

    let mut estimates = Vec::new();
    for paths in [500, 2_000, 8_000] {
        let mut rng = InverseCumulativeNormalRng::new(42);
        let vol =
            model_implied_volatility(&process, 1.0, SimulationConfig::new(252, paths), &mut rng)
                .unwrap();
        assert!(
            (vol - reference).abs() < 0.3 * reference,
            "paths {paths}: estimate {vol} vs reference {reference}"
        );
        estimates.push(vol);
    }

    // one seed, so each larger run extends the smaller run's draws and the
    // estimates tighten around the shared limit
    let max = estimates.iter().fold(Real::NEG_INFINITY, |m, &v| m.max(v));
    let min = estimates.iter().fold(Real::INFINITY, |m, &v| m.min(v));
    assert!(
        max - min < 0.15 * reference,
        "spread {} vs reference {reference}",
        max - min
    );
}

// ───────────────────── reproducibility ─────────────────────

#[test]
fn seeded_chains_reproduce_bitwise() {
    let surface = VolatilitySurface::from_points(vec![VolatilitySurfacePoint {
        date: date(2024, 1, 2),
        vols: [0.004; 6],
    }]);
    let curve = FlatForwardCurve::new(date(2024, 1, 2), 0.03);
    let settings = chain_settings(99);

    let first = calibrate_to_surface(&surface, &curve, &settings).unwrap();
    let second = calibrate_to_surface(&surface, &curve, &settings).unwrap();
    assert_eq!(first.parameters, second.parameters);
    assert_eq!(first.objective, second.objective);
    assert_eq!(first.iterations, second.iterations);
    assert_eq!(first.end_criteria_type, second.end_criteria_type);

    let process = HullWhiteProcess::new(curve, 0.05, 0.005).unwrap();
    let mut rng_a = InverseCumulativeNormalRng::new(11);
    let mut rng_b = InverseCumulativeNormalRng::new(11);
    let paths_a = simulate_paths(&process, 5.0, SimulationConfig::new(60, 4), &mut rng_a).unwrap();
    let paths_b = simulate_paths(&process, 5.0, SimulationConfig::new(60, 4), &mut rng_b).unwrap();
    assert_eq!(paths_a, paths_b);
}
