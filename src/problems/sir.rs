//! The SIR compartment model as a worked consumer of the solvers.
//!
//! A population of N = S + I + R people moves from susceptible through
//! infectious to recovered. The derivative of the total is identically
//! zero, which makes the model a handy conservation check for every
//! stepping rule.

use std::time::Duration;

use derive_builder::Builder;

use crate::error::Result;
use crate::ode::problem::OdeProblem;
use crate::ode::solution::OdeSolution;
use crate::ode::Ode;
use crate::timing::record_runtime;

/// Everything one simulation run needs, with the textbook epidemic as the
/// default scenario.
#[derive(Debug, Clone, Builder)]
pub struct SirParameters {
    /// initially susceptible
    #[builder(default = "990.")]
    pub s0: f64,
    /// initially infectious
    #[builder(default = "10.")]
    pub i0: f64,
    /// initially recovered
    #[builder(default = "0.")]
    pub r0: f64,
    /// transmission rate
    #[builder(default = "0.2")]
    pub beta: f64,
    /// recovery rate
    #[builder(default = "0.1")]
    pub gamma: f64,
    #[builder(default = "0.")]
    pub t0: f64,
    #[builder(default = "200.")]
    pub tf: f64,
    #[builder(default = "0.1")]
    pub h: f64,
}

impl Default for SirParameters {
    fn default() -> Self {
        SirParametersBuilder::default()
            .build()
            .expect("all fields carry defaults")
    }
}

impl SirParameters {
    pub fn builder() -> SirParametersBuilder {
        SirParametersBuilder::default()
    }
}

/// The SIR equations as a derivative closure over fixed rates.
///
/// State layout is `[S, I, R]`:
/// dS/dt = -beta S I / N, dI/dt = beta S I / N - gamma I, dR/dt = gamma I.
pub fn sir(beta: f64, gamma: f64) -> impl Fn(f64, &Vec<f64>) -> Vec<f64> {
    move |_t, y| {
        let (s, i) = (y[0], y[1]);
        let n = y[0] + y[1] + y[2];

        let ds_dt = -beta * s * i / n;
        let di_dt = beta * s * i / n - gamma * i;
        let dr_dt = gamma * i;

        vec![ds_dt, di_dt, dr_dt]
    }
}

/// Runs every requested method over the same scenario and hands each
/// trajectory to `sink` tagged with the method name and its measured
/// runtime. Solver errors are propagated unchanged.
pub fn run_methods<Sink>(
    params: &SirParameters,
    methods: &[Ode],
    mut sink: Sink,
) -> Result<()>
where
    Sink: FnMut(&str, &OdeSolution<f64, Vec<f64>>, Duration),
{
    for method in methods {
        let problem = OdeProblem::builder()
            .fun(sir(params.beta, params.gamma))
            .init(vec![params.s0, params.i0, params.r0])
            .tspan(params.t0, params.tf)
            .stepsize(params.h)
            .build()?;

        let (outcome, elapsed) = record_runtime(|| problem.solve(*method));
        sink(method.name(), &outcome?, elapsed);
    }

    Ok(())
}

pub const ALL_METHODS: [Ode; 7] = [
    Ode::Feuler,
    Ode::Beuler,
    Ode::Midpoint,
    Ode::Heun,
    Ode::Rk4,
    Ode::Ab2,
    Ode::Am2,
];

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn population_is_conserved_by_every_method() {
        let params = SirParameters::default();
        let total = params.s0 + params.i0 + params.r0;

        run_methods(&params, &ALL_METHODS, |name, solution, _elapsed| {
            for y in &solution.yout {
                assert_abs_diff_eq!(y[0] + y[1] + y[2], total, epsilon = 1e-6);
            }
            assert_eq!(solution.tout.len(), solution.yout.len(), "{}", name);
        })
        .unwrap();
    }

    #[test]
    fn epidemic_rises_and_burns_out() {
        let params = SirParameters::default();
        let problem = OdeProblem::builder()
            .fun(sir(params.beta, params.gamma))
            .init(vec![params.s0, params.i0, params.r0])
            .tspan(params.t0, params.tf)
            .stepsize(params.h)
            .build()
            .unwrap();

        let solution = problem.rk4().unwrap();
        let infectious = solution.component(1);
        let peak = infectious.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        // R0 = beta / gamma = 2: the outbreak grows well past the seed and
        // has receded by day 200
        assert!(peak > 100.);
        assert!(infectious[infectious.len() - 1] < 10.);

        let susceptible = solution.component(0);
        assert!(susceptible[susceptible.len() - 1] < 400.);
        let recovered = solution.component(2);
        assert!(recovered[recovered.len() - 1] > 600.);
    }

    #[test]
    fn driver_reports_each_method_once() {
        let params = SirParameters::builder()
            .tf(20.)
            .build()
            .unwrap();

        let mut seen = Vec::new();
        run_methods(&params, &ALL_METHODS, |name, solution, elapsed| {
            seen.push((name.to_string(), solution.len(), elapsed));
        })
        .unwrap();

        assert_eq!(7, seen.len());
        assert_eq!("feuler", seen[0].0);
        assert_eq!("am2", seen[6].0);
        // same grid for every method
        assert!(seen.iter().all(|(_, len, _)| *len == seen[0].1));
    }
}
