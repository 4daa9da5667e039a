pub mod adams;
pub mod newton;
pub mod problem;
pub mod runge_kutta;
pub mod solution;
pub mod types;

#[cfg(feature = "serde0")]
use serde::{Deserialize, Serialize};

/// The available ODE solvers.
#[cfg_attr(feature = "serde0", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ode {
    /// forward Euler, explicit, order 1
    Feuler,
    /// backward Euler, implicit, order 1
    Beuler,
    /// explicit midpoint, order 2
    Midpoint,
    /// Heun's predictor-corrector, explicit, order 2
    Heun,
    /// classical Runge-Kutta, explicit, order 4
    Rk4,
    /// two-step Adams-Bashforth, explicit, order 2
    Ab2,
    /// Adams-Moulton trapezoidal corrector, implicit, order 2
    Am2,
}

impl Ode {
    /// stable identifier, also used to tag reported trajectories
    pub fn name(&self) -> &'static str {
        match self {
            Ode::Feuler => "feuler",
            Ode::Beuler => "beuler",
            Ode::Midpoint => "midpoint",
            Ode::Heun => "heun",
            Ode::Rk4 => "rk4",
            Ode::Ab2 => "ab2",
            Ode::Am2 => "am2",
        }
    }
}

impl std::fmt::Display for Ode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Ode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feuler" => Ok(Ode::Feuler),
            "beuler" => Ok(Ode::Beuler),
            "midpoint" => Ok(Ode::Midpoint),
            "heun" => Ok(Ode::Heun),
            "rk4" => Ok(Ode::Rk4),
            "ab2" => Ok(Ode::Ab2),
            "am2" => Ok(Ode::Am2),
            _ => Err(format!("{} is not a valid Ode identifier", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn identifiers_roundtrip() {
        for method in [
            Ode::Feuler,
            Ode::Beuler,
            Ode::Midpoint,
            Ode::Heun,
            Ode::Rk4,
            Ode::Ab2,
            Ode::Am2,
        ] {
            assert_eq!(method, Ode::from_str(method.name()).unwrap());
        }
        assert!(Ode::from_str("dopri5").is_err());
    }
}
