//! One-dimensional stochastic processes.
//!
//! A process `dX = μ(t,X)·dt + σ(t,X)·dW` is described by its drift and
//! diffusion. The conditional moments default to a first-order Euler
//! discretization; processes with known transition densities override
//! them with the exact expressions.

use sr_core::{Real, Time};

/// A one-dimensional Ito process.
pub trait StochasticProcess1D: std::fmt::Debug + Send + Sync {
    /// Value of the process at time zero.
    fn x0(&self) -> Real;

    /// Drift `μ(t, x)`.
    fn drift(&self, t: Time, x: Real) -> Real;

    /// Diffusion `σ(t, x)`.
    fn diffusion(&self, t: Time, x: Real) -> Real;

    /// Conditional mean `E[x(t+Δt) | x(t) = x]`. Defaults to the Euler
    /// step `x + μ(t,x)·Δt`.
    fn expectation(&self, t: Time, x: Real, dt: Time) -> Real {
        x + self.drift(t, x) * dt
    }

    /// Conditional standard deviation over `Δt`. Defaults to
    /// `σ(t,x)·√Δt`.
    fn std_deviation(&self, t: Time, x: Real, dt: Time) -> Real {
        self.diffusion(t, x) * dt.sqrt()
    }

    /// Conditional variance over `Δt`, always the square of
    /// `std_deviation` so the two stay in sync under overrides.
    fn variance(&self, t: Time, x: Real, dt: Time) -> Real {
        let s = self.std_deviation(t, x, dt);
        s * s
    }

    /// Advances the state by one step driven by the normal draw `dw`.
    fn evolve(&self, t: Time, x: Real, dt: Time, dw: Real) -> Real {
        self.expectation(t, x, dt) + self.std_deviation(t, x, dt) * dw
    }
}
