use crate::error::{Error, OdeError, Result};
use crate::ode::newton::{self, ImplicitOptions};
use crate::ode::runge_kutta::ButcherTableau;
use crate::ode::solution::OdeSolution;
use crate::ode::types::OdeType;
use crate::ode::Ode;
use alga::general::RealField;
use na::{allocator::Allocator, DefaultAllocator, Dim};
use std::ops::{Add, Mul};

/// An initial value problem dy/dt = F(t, y), y(t0) = y0, integrated with a
/// fixed step `h` until the accumulated time reaches `tf`.
///
/// F is the RHS of the ODE, a function of t and y(t) returning the
/// derivatives of y with the same degrees of freedom as `y0`. Model
/// parameters belong inside the closure, the steppers only ever see
/// `(t, &y)`. The loop condition is `t < tf`, so the last recorded point
/// may overshoot `tf` by less than one step; that overshoot is kept.
#[derive(Debug, Clone)]
pub struct OdeProblem<F, Y>
where
    F: Fn(f64, &Y) -> Y,
    Y: OdeType,
{
    /// the RHS of the ODE dy/dt = F(t,y)
    pub(crate) f: F,
    /// initial value for `F`, determines the element type of the `yout`
    /// vector of the solutions
    pub(crate) y0: Y,
    /// start of the integration horizon
    pub(crate) t0: f64,
    /// end of the integration horizon, reached by accumulating `h`
    pub(crate) tf: f64,
    /// fixed step size
    pub(crate) h: f64,
}

#[derive(Debug, Clone)]
pub struct OdeBuilder<F, Y>
where
    F: Fn(f64, &Y) -> Y,
    Y: OdeType,
{
    f: Option<F>,
    y0: Option<Y>,
    tspan: Option<(f64, f64)>,
    h: Option<f64>,
}

impl<F, Y> OdeBuilder<F, Y>
where
    F: Fn(f64, &Y) -> Y,
    Y: OdeType,
{
    /// set the problem function
    pub fn fun(mut self, f: F) -> Self {
        self.f = Some(f);
        self
    }

    /// set the initial starting point
    pub fn init<T: Into<Y>>(mut self, y0: T) -> Self {
        self.y0 = Some(y0.into());
        self
    }

    /// set the integration horizon `[t0, tf]`
    pub fn tspan(mut self, t0: f64, tf: f64) -> Self {
        self.tspan = Some((t0, tf));
        self
    }

    /// set the fixed step size
    pub fn stepsize(mut self, h: f64) -> Self {
        self.h = Some(h);
        self
    }

    /// creates a new OdeProblem
    /// returns an error if any field is None
    pub fn build(self) -> Result<OdeProblem<F, Y>> {
        let f = self
            .f
            .ok_or_else(|| Error::uninitialized("Problem function must be initialized"))?;
        let y0 = self.y0.ok_or_else(|| {
            Error::uninitialized("Initial starting point must be initialized")
        })?;
        let (t0, tf) = self
            .tspan
            .ok_or_else(|| Error::uninitialized("Time span must be initialized"))?;
        let h = self
            .h
            .ok_or_else(|| Error::uninitialized("Step size must be initialized"))?;

        Ok(OdeProblem { f, y0, t0, tf, h })
    }
}

impl<F, Y> Default for OdeBuilder<F, Y>
where
    F: Fn(f64, &Y) -> Y,
    Y: OdeType,
{
    fn default() -> Self {
        Self {
            f: None,
            y0: None,
            tspan: None,
            h: None,
        }
    }
}

impl<F, Y, T> OdeProblem<F, Y>
where
    F: Fn(f64, &Y) -> Y,
    T: RealField + Add<f64, Output = T> + Mul<f64, Output = T> + Into<f64>,
    Y: OdeType<Item = T>,
{
    /// convenience method to create a new builder
    /// same as `OdeBuilder::default()`
    pub fn builder() -> OdeBuilder<F, Y> {
        OdeBuilder::default()
    }

    /// run the method identified by `method` with default options
    pub fn solve(&self, method: Ode) -> Result<OdeSolution<f64, Y>, OdeError> {
        match method {
            Ode::Feuler => self.feuler(),
            Ode::Beuler => self.beuler(&ImplicitOptions::default()),
            Ode::Midpoint => self.midpoint(),
            Ode::Heun => self.heun(),
            Ode::Rk4 => self.rk4(),
            Ode::Ab2 => self.ab2(),
            Ode::Am2 => self.am2(&ImplicitOptions::default()),
        }
    }

    /// forward Euler: y' = y + h f(t, y)
    pub fn feuler(&self) -> Result<OdeSolution<f64, Y>, OdeError> {
        self.oderk_fixed(&ButcherTableau::feuler())
    }

    /// midpoint rule: y' = y + h f(t + h/2, y + (h/2) f(t, y))
    pub fn midpoint(&self) -> Result<OdeSolution<f64, Y>, OdeError> {
        self.oderk_fixed(&ButcherTableau::midpoint())
    }

    /// Heun's predictor-corrector scheme
    pub fn heun(&self) -> Result<OdeSolution<f64, Y>, OdeError> {
        self.oderk_fixed(&ButcherTableau::heun())
    }

    /// classical 4th order Runge-Kutta
    pub fn rk4(&self) -> Result<OdeSolution<f64, Y>, OdeError> {
        self.oderk_fixed(&ButcherTableau::rk4())
    }

    /// backward Euler: solves z = y + h f(t + h, z) for the next state z
    ///
    /// Each step hands the implicit update equation to the Newton solver
    /// with the previous state as initial guess. A step that fails to
    /// converge aborts the run with [`OdeError::NonConvergence`].
    pub fn beuler(&self, opts: &ImplicitOptions) -> Result<OdeSolution<f64, Y>, OdeError> {
        self.check_stepsize()?;

        let dof = self.y0.dof();
        let mut tout = Vec::with_capacity(self.capacity());
        let mut yout: Vec<Y> = Vec::with_capacity(self.capacity());
        tout.push(self.t0);
        yout.push(self.y0.clone());

        let mut t = self.t0;
        while t < self.tf {
            let yn = yout[yout.len() - 1].clone();
            let tn = t + self.h;

            // residual g(z) = z - y_n - h f(t_n + h, z)
            let z = newton::solve(
                |z: &Y| {
                    let dydt = self.eval_rhs(tn, z)?;
                    let mut r = z.clone();
                    for d in 0..dof {
                        *r.get_mut(d) += yn.get(d) * -1. + dydt.get(d) * -self.h;
                    }
                    Ok(r)
                },
                &yn,
                tn,
                opts,
            )?;

            t = tn;
            tout.push(t);
            yout.push(z);
        }

        Ok(OdeSolution { tout, yout })
    }

    /// advance with a fixed-step explicit Runge-Kutta tableau
    fn oderk_fixed<S: Dim>(
        &self,
        btab: &ButcherTableau<S>,
    ) -> Result<OdeSolution<f64, Y>, OdeError>
    where
        DefaultAllocator: Allocator<f64, S, S> + Allocator<f64, S>,
    {
        self.check_stepsize()?;

        let dof = self.y0.dof();
        let mut tout = Vec::with_capacity(self.capacity());
        let mut yout: Vec<Y> = Vec::with_capacity(self.capacity());
        tout.push(self.t0);
        yout.push(self.y0.clone());

        let mut t = self.t0;
        while t < self.tf {
            let yn = yout[yout.len() - 1].clone();
            let ks = self.calc_stages(btab, t, &yn)?;

            let mut yi = yn;
            for (s, k) in ks.iter().enumerate() {
                let b = btab.b[s];
                if b != 0. {
                    for d in 0..dof {
                        *yi.get_mut(d) += k.get(d) * (b * self.h);
                    }
                }
            }

            t += self.h;
            tout.push(t);
            yout.push(yi);
        }

        Ok(OdeSolution { tout, yout })
    }

    /// evaluates all stage increments `k` for the value `yn` at time `t`
    fn calc_stages<S: Dim>(
        &self,
        btab: &ButcherTableau<S>,
        t: f64,
        yn: &Y,
    ) -> Result<Vec<Y>, OdeError>
    where
        DefaultAllocator: Allocator<f64, S, S> + Allocator<f64, S>,
    {
        let dof = yn.dof();
        let mut ks: Vec<Y> = Vec::with_capacity(btab.nstages());

        // k1 is just the function call
        ks.push(self.eval_rhs(t, yn)?);

        for s in 1..btab.nstages() {
            let ts = t + btab.c[s] * self.h;

            // stage value from all previously computed ks in row s
            let mut yi = yn.clone();
            for (j, k) in ks.iter().enumerate() {
                let a = btab.a[(s, j)];
                if a != 0. {
                    for d in 0..dof {
                        *yi.get_mut(d) += k.get(d) * (a * self.h);
                    }
                }
            }

            ks.push(self.eval_rhs(ts, &yi)?);
        }

        Ok(ks)
    }

    /// calls the problem function and rejects derivatives whose degrees of
    /// freedom differ from the state's
    pub(crate) fn eval_rhs(&self, t: f64, y: &Y) -> Result<Y, OdeError> {
        let dydt = (self.f)(t, y);
        if dydt.dof() != self.y0.dof() {
            return Err(OdeError::ShapeMismatch {
                expected: self.y0.dof(),
                got: dydt.dof(),
                timestamp: t,
            });
        }
        Ok(dydt)
    }

    pub(crate) fn check_stepsize(&self) -> Result<(), OdeError> {
        if self.h > 0. {
            Ok(())
        } else {
            Err(OdeError::InvalidStepSize { h: self.h })
        }
    }

    /// estimated number of points, used to size the output buffers
    pub(crate) fn capacity(&self) -> usize {
        let steps = ((self.tf - self.t0) / self.h).ceil();
        if steps > 0. {
            steps as usize + 1
        } else {
            1
        }
    }

}
