//! Root finding for the implicit steppers.
//!
//! Every implicit step boils down to a nonlinear system g(z) = 0 for the
//! next state z. The solver below runs plain Newton iteration with a
//! forward-difference Jacobian, factorized by LU each sweep. It keeps no
//! state between calls.

use crate::error::OdeError;
use crate::ode::types::{OdeType, PNorm};
use alga::general::RealField;
use derive_builder::Builder;
use na::{DMatrix, DVector};
use num_traits::identities::One;
use std::ops::{Add, Mul};

/// Tuning knobs for the implicit solves.
#[derive(Debug, Clone, Builder)]
pub struct ImplicitOptions {
    /// residual inf-norm below which the iteration is accepted
    #[builder(default = "1e-10")]
    pub abstol: f64,
    /// iteration budget per step
    #[builder(default = "50")]
    pub max_iter: usize,
}

impl Default for ImplicitOptions {
    fn default() -> Self {
        Self {
            abstol: 1e-10,
            max_iter: 50,
        }
    }
}

/// Solves `residual(z) = 0` by Newton iteration starting from `guess`.
///
/// `timestamp` is only carried into the error on failure. The residual
/// closure is fallible so that shape violations inside the wrapped
/// derivative function surface unchanged.
pub(crate) fn solve<Y, T, G>(
    residual: G,
    guess: &Y,
    timestamp: f64,
    opts: &ImplicitOptions,
) -> Result<Y, OdeError>
where
    T: RealField + Add<f64, Output = T> + Mul<f64, Output = T> + Into<f64>,
    Y: OdeType<Item = T>,
    G: Fn(&Y) -> Result<Y, OdeError>,
{
    let dof = guess.dof();
    let sqrt_eps = f64::EPSILON.sqrt();
    let mut z = guess.clone();

    for _ in 0..opts.max_iter {
        let r = residual(&z)?;
        let rnorm: f64 = r.pnorm(PNorm::InfPos).into();
        if rnorm < opts.abstol {
            return Ok(z);
        }

        // forward-difference Jacobian, one column per degree of freedom
        let mut jac = DMatrix::<f64>::zeros(dof, dof);
        for j in 0..dof {
            let zj: f64 = z.get(j).into();
            let dz = zj.abs().max(1.0) * sqrt_eps;
            let mut zp = z.clone();
            zp.insert(j, T::one() * (zj + dz));
            let rp = residual(&zp)?;
            for i in 0..dof {
                let hi: f64 = rp.get(i).into();
                let lo: f64 = r.get(i).into();
                jac[(i, j)] = (hi - lo) / dz;
            }
        }

        let rhs = DVector::from_iterator(dof, r.ode_iter().map(|v| -(v.into())));
        match jac.lu().solve(&rhs) {
            Some(delta) => {
                for d in 0..dof {
                    z.insert(d, z.get(d) + delta[d]);
                }
            }
            // singular Jacobian, the iteration cannot make progress
            None => break,
        }
    }

    Err(OdeError::NonConvergence {
        timestamp,
        guess: z.ode_iter().map(Into::into).collect(),
        iterations: opts.max_iter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn newton_scalar_sqrt2() {
        let root = solve(
            |z: &f64| Ok(z * z - 2.0),
            &1.0,
            0.0,
            &ImplicitOptions::default(),
        )
        .unwrap();
        assert_relative_eq!(root, 2f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn newton_system() {
        // x + y = 3, x * y = 2
        let root = solve(
            |z: &Vec<f64>| Ok(vec![z[0] + z[1] - 3.0, z[0] * z[1] - 2.0]),
            &vec![0.5, 2.5],
            0.0,
            &ImplicitOptions::default(),
        )
        .unwrap();
        assert_relative_eq!(root[0], 1.0, epsilon = 1e-8);
        assert_relative_eq!(root[1], 2.0, epsilon = 1e-8);
    }

    #[test]
    fn newton_reports_failure() {
        // z^2 + 1 has no real root
        let err = solve(
            |z: &f64| Ok(z * z + 1.0),
            &1.0,
            4.2,
            &ImplicitOptions::default(),
        )
        .unwrap_err();
        match err {
            OdeError::NonConvergence { timestamp, .. } => assert_eq!(timestamp, 4.2),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn options_builder() {
        let opts = ImplicitOptionsBuilder::default()
            .abstol(1e-6)
            .build()
            .unwrap();
        assert_eq!(opts.abstol, 1e-6);
        assert_eq!(opts.max_iter, 50);
    }
}
