use na::allocator::Allocator;
use na::*;
use num_traits::identities::{One, Zero};
use std::fmt;

/// Identifies an explicit Runge-Kutta stepping rule.
#[derive(Debug, Clone)]
pub enum RKSymbol {
    Feuler,
    Midpoint,
    Heun,
    RK4,
}

impl RKSymbol {
    /// convergence order of the rule
    pub fn order(&self) -> usize {
        match self {
            RKSymbol::Feuler => 1,
            RKSymbol::Midpoint => 2,
            RKSymbol::Heun => 2,
            RKSymbol::RK4 => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RKSymbol::Feuler => "feuler",
            RKSymbol::Midpoint => "midpoint",
            RKSymbol::Heun => "heun",
            RKSymbol::RK4 => "rk4",
        }
    }
}

/// Tableau of the form
///
/// ```text
///  c1  | a_11   ....   a_1s
///  .   | a_21 .          .
///  .   | a_31     .      .
///  .   | ....         .  .
///  c_s | a_s1  ....... a_ss
/// -----+--------------------
///      | b_1     ...   b_s
/// ```
///
/// where `T` is the type of the coefficients and `S` is the number of
/// stages. Only explicit tableaus (strictly lower triangular `a`) live
/// here, the implicit methods do not step through a tableau at all.
#[derive(Debug, Clone)]
pub struct ButcherTableau<S: Dim, T: RealField = f64>
where
    DefaultAllocator: Allocator<T, S, S> + Allocator<T, S>,
{
    /// identifier for the rk method
    pub symbol: RKSymbol,
    /// coefficients - rk matrix
    pub a: MatrixN<T, S>,
    /// weights of the b-row used for stepping
    pub b: VectorN<T, S>,
    /// nodes
    pub c: VectorN<T, S>,
}

/// https://en.wikipedia.org/wiki/Runge%E2%80%93Kutta_methods
impl<S: Dim, T: RealField> ButcherTableau<S, T>
where
    DefaultAllocator: Allocator<T, S, S> + Allocator<T, S>,
{
    #[inline]
    pub fn order(&self) -> usize {
        self.symbol.order()
    }

    /// the number of stages `S`
    #[inline]
    pub fn nstages(&self) -> usize {
        self.c.nrows()
    }

    /// checks wether the rk method is consistent
    /// A Runge–Kutta method is consistent if:
    /// \sum _{j=1}^{i-1}a_{ij}=c_{i}{\text{ for }}i=2,\ldots ,s.
    #[inline]
    pub fn is_consistent_rk(&self) -> bool {
        for i in 1..self.nstages() {
            let mut row = T::zero();
            for j in 0..i {
                row += self.a[(i, j)];
            }
            if row != self.c[i] {
                return false;
            }
        }
        true
    }
}

impl<S: Dim, T: RealField> fmt::Display for ButcherTableau<S, T>
where
    DefaultAllocator: Allocator<T, S, S> + Allocator<T, S>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.nstages() {
            write!(f, " {:.3} |", self.c[row])?;
            for col in 0..self.nstages() {
                write!(f, " {:.3}", self.a[(row, col)])?;
            }
            writeln!(f)?;
        }
        write!(f, "-------+")?;
        write!(f, "{}", "------".repeat(self.nstages()))?;
        write!(f, "\n       |")?;
        for b in self.b.iter() {
            write!(f, " {:.3}", b)?;
        }
        Ok(())
    }
}

impl ButcherTableau<U1> {
    /// constructs the Butcher Tableau for the (forward) Euler method
    /// ```text
    ///   0.000 | 0.000
    ///  -------+------
    ///         | 1.000
    /// ```
    pub fn feuler() -> Self {
        let a = Matrix1::zero();
        let b = Vector1::one();
        let c = Vector1::zero();

        Self {
            symbol: RKSymbol::Feuler,
            a,
            b,
            c,
        }
    }
}

impl ButcherTableau<U2> {
    /// the midpoint method https://en.wikipedia.org/wiki/Midpoint_method
    ///
    /// ```text
    ///  0.000 | 0.000 0.000
    ///  0.500 | 0.500 0.000
    /// -------+------------
    ///        | 0.000 1.000
    /// ```
    pub fn midpoint() -> Self {
        let a = Matrix2::new(0., 0., 0.5, 0.0);
        let b = Vector2::new(0., 1.0);
        let c = Vector2::new(0., 0.5);

        Self {
            symbol: RKSymbol::Midpoint,
            a,
            b,
            c,
        }
    }

    /// Heun's predictor-corrector scheme
    /// ```text
    ///  0.000 | 0.000 0.000
    ///  1.000 | 1.000 0.000
    /// -------+------------
    ///        | 0.500 0.500
    /// ```
    pub fn heun() -> Self {
        let a = Matrix2::new(0., 0., 1., 0.);
        let b = Vector2::new(0.5, 0.5);
        let c = Vector2::new(0., 1.);

        Self {
            symbol: RKSymbol::Heun,
            a,
            b,
            c,
        }
    }
}

impl ButcherTableau<U4> {
    /// constructs the Butcher Tableau for the classical Runge Kutta 4 method
    /// ```text
    ///    0.000 | 0.000 0.000 0.000 0.000
    ///    0.500 | 0.500 0.000 0.000 0.000
    ///    0.500 | 0.000 0.500 0.000 0.000
    ///    1.000 | 0.000 0.000 1.000 0.000
    ///    -------+------------------------
    ///    | 0.167 0.333 0.333 0.167
    /// ```
    pub fn rk4() -> Self {
        let c = Vector4::new(0., 0.5, 0.5, 1.);
        let b = Vector4::new(1. / 6., 1. / 3., 1. / 3., 1. / 6.);
        let a = Matrix4::new(
            0., 0., 0., 0., 0.5, 0., 0., 0., 0., 0.5, 0., 0., 0., 0., 1., 0.,
        );

        Self {
            symbol: RKSymbol::RK4,
            a,
            b,
            c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_consistent() {
        assert!(ButcherTableau::feuler().is_consistent_rk());
        assert!(ButcherTableau::midpoint().is_consistent_rk());
        assert!(ButcherTableau::heun().is_consistent_rk());
        assert!(ButcherTableau::rk4().is_consistent_rk());
    }

    #[test]
    fn orders() {
        assert_eq!(1, ButcherTableau::feuler().order());
        assert_eq!(2, ButcherTableau::midpoint().order());
        assert_eq!(2, ButcherTableau::heun().order());
        assert_eq!(4, ButcherTableau::rk4().order());
    }
}
