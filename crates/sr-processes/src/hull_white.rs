//! Hull-White (extended Vasicek) short-rate process.
//!
//! ```text
//! dr = (θ(t) − a·r) dt + σ dW
//! ```
//!
//! with mean-reversion speed `a`, volatility `σ`, and `θ(t)` chosen so the
//! process reproduces the initial forward curve. The conditional moments
//! are known in closed form, so path generation never needs the Euler
//! defaults.

use std::fmt;

use sr_core::{Error, Rate, Real, Result, Time, Volatility};
use sr_termstructures::ForwardCurve;

use crate::stochastic_process::StochasticProcess1D;

/// Hull-White one-factor short-rate process fitted to a forward curve.
///
/// The short rate starts at the curve's instantaneous forward at time
/// zero. A zero mean-reversion speed is accepted and handled through the
/// analytic limits.
#[derive(Debug, Clone)]
pub struct HullWhiteProcess<C> {
    curve: C,
    a: Real,
    sigma: Volatility,
    r0: Rate,
}

impl<C: ForwardCurve> HullWhiteProcess<C> {
    /// Creates a process over `curve` with mean-reversion speed `a` and
    /// volatility `sigma`.
    ///
    /// Both parameters must be finite and non-negative; `sigma == 0`
    /// gives the deterministic forward-curve dynamics.
    pub fn new(curve: C, a: Real, sigma: Volatility) -> Result<Self> {
        if !a.is_finite() || a < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "mean-reversion speed must be finite and non-negative, got {a}"
            )));
        }
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "volatility must be finite and non-negative, got {sigma}"
            )));
        }
        let r0 = curve.instantaneous_forward(0.0);
        Ok(Self {
            curve,
            a,
            sigma,
            r0,
        })
    }

    /// Mean-reversion speed.
    pub fn a(&self) -> Real {
        self.a
    }

    /// Short-rate volatility.
    pub fn sigma(&self) -> Volatility {
        self.sigma
    }

    /// α(t) = f(0,t) + σ²·(1 − e^{−at})²/(2a²), the deterministic shift
    /// that keeps the conditional mean on the forward curve.
    fn alpha(&self, t: Time) -> Real {
        let shape = if self.a > 1e-15 {
            (self.sigma / self.a) * (1.0 - (-self.a * t).exp())
        } else {
            self.sigma * t
        };
        self.curve.instantaneous_forward(t) + 0.5 * shape * shape
    }

    /// θ(t) = f'(0,t) + a·f(0,t) + σ²·(1 − e^{−2at})/(2a).
    fn theta(&self, t: Time) -> Real {
        let dt = 1e-4;
        let f = self.curve.instantaneous_forward(t);
        let f_up = self.curve.instantaneous_forward(t + dt);
        let f_prime = (f_up - f) / dt;
        let hump = if self.a > 1e-15 {
            self.sigma * self.sigma / (2.0 * self.a) * (1.0 - (-2.0 * self.a * t).exp())
        } else {
            self.sigma * self.sigma * t
        };
        f_prime + self.a * f + hump
    }
}

impl<C> StochasticProcess1D for HullWhiteProcess<C>
where
    C: ForwardCurve + fmt::Debug + Send + Sync,
{
    fn x0(&self) -> Real {
        self.r0
    }

    fn drift(&self, t: Time, x: Real) -> Real {
        self.theta(t) - self.a * x
    }

    fn diffusion(&self, _t: Time, _x: Real) -> Real {
        self.sigma
    }

    /// Exact conditional mean
    /// `r(t)·e^{−a·Δt} + α(t+Δt) − α(t)·e^{−a·Δt}`.
    fn expectation(&self, t: Time, x: Real, dt: Time) -> Real {
        let ema = (-self.a * dt).exp();
        x * ema + self.alpha(t + dt) - self.alpha(t) * ema
    }

    /// Exact conditional deviation `σ·√((1 − e^{−2a·Δt})/(2a))`, with the
    /// `σ·√Δt` limit as `a → 0`.
    fn std_deviation(&self, _t: Time, _x: Real, dt: Time) -> Real {
        if self.a > 1e-15 {
            self.sigma * ((1.0 - (-2.0 * self.a * dt).exp()) / (2.0 * self.a)).sqrt()
        } else {
            self.sigma * dt.sqrt()
        }
    }
}
