use std::ffi::CString;

#[cfg(feature = "cantera")]
use std::{
    ffi::CStr,
    sync::{Mutex, MutexGuard},
};

use crate::EquilibrationError;
#[cfg(feature = "cantera")]
use crate::{bindings, CANTERA_MUTEX, CT_DERR};

/// Tolerance applied to mole-fraction sums and bounds.
pub(crate) const COMPOSITION_TOLERANCE: f64 = 1e-6;

#[cfg(feature = "cantera")]
pub(crate) fn acquire_lock<'a>() -> Result<MutexGuard<'a, ()>, EquilibrationError> {
    let lock = CANTERA_MUTEX.get_or_init(|| Mutex::new(())).lock()?;

    Ok(lock)
}

/// Converts a Rust string into a C string, rejecting interior null bytes.
#[cfg_attr(not(feature = "cantera"), allow(dead_code))]
pub(crate) fn to_cstring(what: &str, value: &str) -> Result<CString, EquilibrationError> {
    CString::new(value)
        .map_err(|e| EquilibrationError::InvalidInput(format!("{what} contains null byte: {e}")))
}

/// Checks that `x` is a mole-fraction vector: every entry in [0, 1] and a sum of 1.
pub(crate) fn validate_mole_fractions(x: &[f64]) -> Result<(), EquilibrationError> {
    if let Some((k, &xk)) = x.iter().enumerate().find(|&(_, &xk)| {
        !xk.is_finite() || xk < -COMPOSITION_TOLERANCE || xk > 1.0 + COMPOSITION_TOLERANCE
    }) {
        return Err(EquilibrationError::CalculationError(format!(
            "Mole fraction of species {k} is {xk}, which lies outside [0, 1]."
        )));
    }
    let sum_x: f64 = x.iter().sum();
    if (sum_x - 1.0).abs() > COMPOSITION_TOLERANCE {
        return Err(EquilibrationError::CalculationError(format!(
            "Sum of mole fractions is {sum_x}, which does not equal 1 within tolerance."
        )));
    }
    Ok(())
}

/// Retrieves the message of the most recent engine error.
///
/// # Safety
///
/// Contains unsafe code due to FFI interactions; the guard proves the caller holds the engine lock.
#[cfg(feature = "cantera")]
pub(crate) fn last_cantera_error(_guard: &MutexGuard<()>) -> Result<String, EquilibrationError> {
    const HERR_LENGTH: usize = 4096;
    let mut herr_buffer = vec![0 as libc::c_char; HERR_LENGTH];

    unsafe {
        bindings::ct_getCanteraError(HERR_LENGTH as _, herr_buffer.as_mut_ptr());
    }
    // Truncated messages still need a terminator.
    herr_buffer[HERR_LENGTH - 1] = 0;

    let message = unsafe { CStr::from_ptr(herr_buffer.as_ptr()) }
        .to_str()?
        .trim()
        .to_string();

    if message.is_empty() {
        Ok("unknown Cantera error".to_string())
    } else {
        Ok(message)
    }
}

/// Checks an integer status returned by the engine; negative values signal failure.
#[cfg(feature = "cantera")]
pub(crate) fn check_cantera_status(
    guard: &MutexGuard<()>,
    status: i32,
) -> Result<i32, EquilibrationError> {
    if status < 0 {
        Err(EquilibrationError::CalculationError(last_cantera_error(
            guard,
        )?))
    } else {
        Ok(status)
    }
}

/// Checks a floating-point value returned by the engine against its failure sentinel.
#[cfg(feature = "cantera")]
pub(crate) fn check_cantera_value(
    guard: &MutexGuard<()>,
    value: f64,
) -> Result<f64, EquilibrationError> {
    if value == CT_DERR {
        Err(EquilibrationError::CalculationError(last_cantera_error(
            guard,
        )?))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_normalized_composition() {
        assert!(validate_mole_fractions(&[0.21, 0.79]).is_ok());
        assert!(validate_mole_fractions(&[0.0, 1.0, 0.0]).is_ok());
    }

    #[test]
    fn rejects_composition_that_does_not_sum_to_one() {
        let err = validate_mole_fractions(&[0.5, 0.4]).unwrap_err();
        assert!(matches!(err, EquilibrationError::CalculationError(_)));
    }

    #[test]
    fn rejects_out_of_range_and_non_finite_fractions() {
        assert!(validate_mole_fractions(&[1.5, -0.5]).is_err());
        assert!(validate_mole_fractions(&[f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn rejects_interior_null_bytes() {
        let err = to_cstring("Phase file", "JP10\0.yaml").unwrap_err();
        assert!(err.to_string().contains("Phase file contains null byte"));
    }
}
