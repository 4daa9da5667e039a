//! Multi-step Adams methods.
//!
//! Both schemes need history beyond the initial condition, so the first
//! step(s) are bootstrapped with forward Euler and kept in the returned
//! trajectory like every other point.

use crate::error::OdeError;
use crate::ode::newton::{self, ImplicitOptions};
use crate::ode::problem::OdeProblem;
use crate::ode::solution::OdeSolution;
use crate::ode::types::OdeType;
use alga::general::RealField;
use std::ops::{Add, Mul};

impl<F, Y, T> OdeProblem<F, Y>
where
    F: Fn(f64, &Y) -> Y,
    T: RealField + Add<f64, Output = T> + Mul<f64, Output = T> + Into<f64>,
    Y: OdeType<Item = T>,
{
    /// two-step Adams-Bashforth
    ///
    /// Bootstraps the first step with forward Euler, thereafter
    /// y_{n+1} = y_n + (h/2)(3 f_n - f_{n-1}). The previous derivative is
    /// carried over instead of being recomputed.
    pub fn ab2(&self) -> Result<OdeSolution<f64, Y>, OdeError> {
        self.check_stepsize()?;

        let dof = self.y0.dof();
        let mut tout = Vec::with_capacity(self.capacity());
        let mut yout: Vec<Y> = Vec::with_capacity(self.capacity());
        tout.push(self.t0);
        yout.push(self.y0.clone());

        let mut t = self.t0;
        let mut fprev: Option<Y> = None;
        while t < self.tf {
            let yn = yout[yout.len() - 1].clone();
            let fcur = self.eval_rhs(t, &yn)?;

            let mut yi = yn;
            match &fprev {
                // no history yet, forward Euler bootstrap
                None => {
                    for d in 0..dof {
                        *yi.get_mut(d) += fcur.get(d) * self.h;
                    }
                }
                Some(fp) => {
                    for d in 0..dof {
                        *yi.get_mut(d) +=
                            fcur.get(d) * (1.5 * self.h) + fp.get(d) * (-0.5 * self.h);
                    }
                }
            }

            fprev = Some(fcur);
            t += self.h;
            tout.push(t);
            yout.push(yi);
        }

        Ok(OdeSolution { tout, yout })
    }

    /// Adams-Moulton with a trapezoidal corrector
    ///
    /// Bootstraps the first two steps with forward Euler, thereafter solves
    /// the corrector equation z = y_n + (h/2)(f(t_{n+1}, z) + f(t_n, y_n))
    /// for z with the Newton solver.
    pub fn am2(&self, opts: &ImplicitOptions) -> Result<OdeSolution<f64, Y>, OdeError> {
        self.check_stepsize()?;

        let dof = self.y0.dof();
        let mut tout = Vec::with_capacity(self.capacity());
        let mut yout: Vec<Y> = Vec::with_capacity(self.capacity());
        tout.push(self.t0);
        yout.push(self.y0.clone());

        let mut t = self.t0;
        let mut steps = 0usize;
        while t < self.tf {
            let yn = yout[yout.len() - 1].clone();
            let fcur = self.eval_rhs(t, &yn)?;
            let tn = t + self.h;

            let yi = if steps < 2 {
                // forward Euler bootstrap
                let mut yi = yn;
                for d in 0..dof {
                    *yi.get_mut(d) += fcur.get(d) * self.h;
                }
                yi
            } else {
                let half_h = 0.5 * self.h;
                // residual g(z) = z - y_n - (h/2)(f(t_{n+1}, z) + f(t_n, y_n))
                newton::solve(
                    |z: &Y| {
                        let dydt = self.eval_rhs(tn, z)?;
                        let mut r = z.clone();
                        for d in 0..dof {
                            *r.get_mut(d) += yn.get(d) * -1.
                                + dydt.get(d) * -half_h
                                + fcur.get(d) * -half_h;
                        }
                        Ok(r)
                    },
                    &yn,
                    tn,
                    opts,
                )?
            };

            steps += 1;
            t = tn;
            tout.push(t);
            yout.push(yi);
        }

        Ok(OdeSolution { tout, yout })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn exponential_problem(
        h: f64,
    ) -> OdeProblem<impl Fn(f64, &f64) -> f64, f64> {
        OdeProblem::builder()
            .fun(|_t, y: &f64| *y)
            .init(1.0)
            .tspan(0., 1.)
            .stepsize(h)
            .build()
            .unwrap()
    }

    fn final_error(solution: &OdeSolution<f64, f64>) -> f64 {
        (solution.yout[solution.yout.len() - 1] - std::f64::consts::E).abs()
    }

    #[test]
    fn ab2_beats_feuler() {
        let problem = exponential_problem(0.01);
        let ab2 = problem.ab2().unwrap();
        let feuler = problem.feuler().unwrap();

        assert_eq!(ab2.len(), feuler.len());
        assert!(final_error(&ab2) < final_error(&feuler));
    }

    #[test]
    fn am2_beats_feuler() {
        let problem = exponential_problem(0.01);
        let am2 = problem.am2(&ImplicitOptions::default()).unwrap();
        let feuler = problem.feuler().unwrap();

        assert!(final_error(&am2) < final_error(&feuler));
    }

    #[test]
    fn bootstrap_points_are_retained() {
        let problem = exponential_problem(0.25);
        let ab2 = problem.ab2().unwrap();
        let am2 = problem.am2(&ImplicitOptions::default()).unwrap();

        // 4 steps on [0, 1] plus the initial condition, bootstrap included
        assert_eq!(5, ab2.len());
        assert_eq!(5, am2.len());
        // the first ab2 step and the first two am2 steps are forward Euler
        assert_relative_eq!(ab2.yout[1], 1.25);
        assert_relative_eq!(am2.yout[1], 1.25);
        assert_relative_eq!(am2.yout[2], 1.25 * 1.25);
    }

    #[test]
    fn am2_matches_the_trapezoidal_fixed_point() {
        // dy/dt = -y makes the corrector z = y (1 - h/2) / (1 + h/2)
        let problem = OdeProblem::builder()
            .fun(|_t, y: &f64| -*y)
            .init(1.0)
            .tspan(0., 1.)
            .stepsize(0.1)
            .build()
            .unwrap();

        let solution = problem.am2(&ImplicitOptions::default()).unwrap();
        let shrink = (1. - 0.05) / (1. + 0.05);
        for w in solution.yout.windows(2).skip(2) {
            assert_relative_eq!(w[1], w[0] * shrink, epsilon = 1e-8);
        }
    }

    #[test]
    fn ab2_on_a_system() {
        // linear rotation, x'' = -x as a first order system
        let problem = OdeProblem::builder()
            .fun(|_t, y: &Vec<f64>| vec![y[1], -y[0]])
            .init(vec![1.0, 0.0])
            .tspan(0., std::f64::consts::PI)
            .stepsize(1e-3)
            .build()
            .unwrap();

        let solution = problem.ab2().unwrap();
        let last = &solution.yout[solution.len() - 1];
        // after one half period the oscillator flips sign
        assert_relative_eq!(last[0], -1.0, epsilon = 1e-3);
        assert_relative_eq!(last[1], 0.0, epsilon = 1e-3);
    }
}
