use crate::ode::types::OdeType;
use alga::general::RealField;
#[cfg(feature = "serde0")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// pairs the timestamp with the corresponding calculated value
#[cfg_attr(feature = "serde0", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct SolutionPoint<Y: OdeType, T: RealField = f64> {
    pub t: T,
    pub y: Y,
}

impl<Y: OdeType, T: RealField> SolutionPoint<Y, T> {
    #[inline]
    pub fn new(t: T, y: Y) -> Self {
        Self { t, y }
    }
}

/// The trajectory produced by one integrator run.
///
/// `tout` and `yout` are index aligned, `tout` strictly increasing from the
/// requested start time. Built by appending one point per step and immutable
/// once handed back to the caller.
#[cfg_attr(feature = "serde0", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct OdeSolution<T: RealField, Y: OdeType> {
    /// Vector of points at which solutions were obtained
    pub tout: Vec<T>,
    /// solutions at times `tout`, stored as a vector `yout`
    pub yout: Vec<Y>,
}

impl<T: RealField, Y: OdeType> OdeSolution<T, Y> {
    /// number of recorded points
    #[inline]
    pub fn len(&self) -> usize {
        self.tout.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tout.is_empty()
    }

    /// pair each timestep with the corresponding output
    #[inline]
    pub fn zipped(self) -> Vec<(T, Y)> {
        self.tout.into_iter().zip(self.yout).collect()
    }

    /// one component of the state as its own series, e.g. for plotting
    pub fn component(&self, d: usize) -> Vec<f64>
    where
        Y::Item: Into<f64>,
    {
        self.yout.iter().map(|y| y.get(d).into()).collect()
    }
}

impl<T: RealField, Y: OdeType> Default for OdeSolution<T, Y> {
    fn default() -> Self {
        OdeSolution {
            tout: Vec::new(),
            yout: Vec::new(),
        }
    }
}

impl<T: RealField, Y: OdeType> fmt::Display for OdeSolution<T, Y> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;

        fn slice_print<T: fmt::Debug>(f: &mut fmt::Formatter, items: &[T]) -> fmt::Result {
            write!(f, "[")?;
            let mut i = 0;
            while i < items.len() {
                if i == items.len() - 1 {
                    write!(f, "{:?}", items[i])?;
                } else {
                    write!(f, "{:?}, ", items[i])?;
                }
                if i > 8 && i < items.len() - 10 {
                    write!(f, "... ")?;
                    i = items.len() - 11;
                }
                i += 1;
            }
            write!(f, "]")
        }

        slice_print(f, &self.tout)?;
        write!(f, ", Vec{{{}}}", self.yout.len())?;
        slice_print(f, &self.yout)?;

        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zipped_pairs_points() {
        let solution = OdeSolution {
            tout: vec![0.0, 0.5, 1.0],
            yout: vec![1.0, 2.0, 4.0],
        };
        assert_eq!(
            vec![(0.0, 1.0), (0.5, 2.0), (1.0, 4.0)],
            solution.zipped()
        );
    }

    #[test]
    fn component_extracts_series() {
        let solution = OdeSolution {
            tout: vec![0.0, 1.0],
            yout: vec![vec![1.0, 10.0], vec![2.0, 20.0]],
        };
        assert_eq!(vec![10.0, 20.0], solution.component(1));
    }
}
