use std::{str::Utf8Error, sync::PoisonError};
use thiserror::Error;

/// The single error kind raised while loading a phase or running the sweep.
#[derive(Error, Debug)]
pub enum EquilibrationError {
    /// Represents errors that occur while loading the phase definition.
    #[error("Initialization failed: {0}")]
    InitializationError(String),

    /// Represents errors reported by the engine during a calculation.
    #[error("Calculation failed: {0}")]
    CalculationError(String),

    /// Represents invalid input errors, such as unknown species or malformed compositions.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Represents errors that occur while converting C strings to Rust strings.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] Utf8Error),

    /// Represents errors when the mutex protecting the engine is poisoned.
    #[error("Mutex was poisoned")]
    MutexPoisoned,

    /// Represents failures while writing results.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl<T> From<PoisonError<T>> for EquilibrationError {
    fn from(_: PoisonError<T>) -> Self {
        EquilibrationError::MutexPoisoned
    }
}
