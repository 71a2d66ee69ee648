//! Model PDEs on a rod `[0, L]` with zero Dirichlet ends.
//!
//! - [`heat_explicit`] marches the heat equation `u_t = κ·u_xx` with the
//!   explicit FTCS scheme.
//! - [`HeatSeries`], [`WaveSeries`] and [`LaplaceSeries`] are truncated
//!   separation-of-variables solutions. Their sine coefficients
//!   `a_n = (2/L) ∫₀ᴸ f(x)·sin(nπx/L) dx` are projected once with the
//!   trapezoidal rule on `max(200, 20N)` panels; evaluation is then a sum of
//!   `N` terms.
//!
//! # Example
//!
//! ```
//! use formulary::pde::HeatSeries;
//!
//! let pi = core::f64::consts::PI;
//! let u = HeatSeries::new(1.0, 1.0, 5, |x: f64| (pi * x).sin());
//! let exact = (-pi * pi * 0.1).exp();
//! assert!((u.eval(0.5, 0.1) - exact).abs() < 1e-10);
//! ```

mod heat;
mod series;


pub use heat::{heat_explicit, HeatProfile};
pub use series::{HeatSeries, LaplaceSeries, WaveSeries};
