//! Fixed-step numerical integrators for ordinary differential equations.
//!
//! The crate solves initial value problems `dy/dt = f(t, y)`, `y(t0) = y0`
//! over a fixed horizon with a constant step size. Explicit single-step
//! methods (forward Euler, midpoint, Heun, classical RK4) share one
//! Butcher-tableau driven loop, the implicit methods (backward Euler and
//! the Adams-Moulton corrector) delegate each step to a Newton solve, and
//! a two-step Adams-Bashforth rounds out the multi-step family.
//!
//! States are anything implementing [`ode::types::OdeType`]: bare `f64`
//! for scalar equations, `Vec<f64>`, small tuples, or nalgebra vectors.

extern crate nalgebra as na;

pub mod error;

pub mod ode;

#[cfg(feature = "problems")]
pub mod problems;

pub mod timing;

pub use crate::error::{Error, OdeError, Result};
pub use crate::ode::newton::ImplicitOptions;
pub use crate::ode::problem::{OdeBuilder, OdeProblem};
pub use crate::ode::solution::{OdeSolution, SolutionPoint};
pub use crate::ode::Ode;
