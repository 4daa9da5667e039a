use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("element not initialized: {msg}")]
    Uninitialized { msg: String },
    #[error(transparent)]
    Ode(#[from] OdeError),
}

impl Error {
    pub(crate) fn uninitialized<T: Into<String>>(msg: T) -> Self {
        Error::Uninitialized { msg: msg.into() }
    }
}

/// Failures raised while stepping a problem.
#[derive(Debug, Error)]
pub enum OdeError {
    #[error("step size must be positive, got {h}")]
    InvalidStepSize { h: f64 },
    #[error("derivative has {got} components but the state has {expected}, at timestamp {timestamp}")]
    ShapeMismatch {
        expected: usize,
        got: usize,
        timestamp: f64,
    },
    #[error("implicit solve did not converge within {iterations} iterations at timestamp {timestamp}")]
    NonConvergence {
        timestamp: f64,
        guess: Vec<f64>,
        iterations: usize,
    },
}
