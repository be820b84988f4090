use crate::{
    bindings,
    utils::{acquire_lock, check_cantera_status, check_cantera_value},
    CanteraPhase, EquilibrationError,
};

impl CanteraPhase {
    /// Sets temperature and pressure using the `thermo_set_TP` function, holding composition fixed.
    ///
    /// # Parameters
    ///
    /// - `temperature`: Temperature [K]
    /// - `pressure`: Pressure [Pa]
    ///
    /// # Errors
    ///
    /// - Returns `EquilibrationError::InvalidInput` if either value is not strictly positive and finite.
    /// - Returns `EquilibrationError::CalculationError` if the engine rejects the state.
    /// - Returns `EquilibrationError::MutexPoisoned` if the engine mutex is poisoned.
    pub fn set_state_tp(&mut self, temperature: f64, pressure: f64) -> Result<(), EquilibrationError> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(EquilibrationError::InvalidInput(format!(
                "Temperature must be positive, got {temperature} K."
            )));
        }
        if !(pressure.is_finite() && pressure > 0.0) {
            return Err(EquilibrationError::InvalidInput(format!(
                "Pressure must be positive, got {pressure} Pa."
            )));
        }

        let guard = acquire_lock()?;

        let mut values = [temperature, pressure];
        let status = unsafe { bindings::thermo_set_TP(self.handle, values.as_mut_ptr()) };
        check_cantera_status(&guard, status)?;

        Ok(())
    }

    /// Sets the pressure [Pa] at fixed temperature and composition.
    pub fn set_pressure(&mut self, pressure: f64) -> Result<(), EquilibrationError> {
        let guard = acquire_lock()?;

        let status = unsafe { bindings::thermo_setPressure(self.handle, pressure) };
        check_cantera_status(&guard, status)?;

        Ok(())
    }

    /// Temperature [K]
    pub fn temperature(&self) -> Result<f64, EquilibrationError> {
        let guard = acquire_lock()?;

        let temperature = unsafe { bindings::thermo_temperature(self.handle) };
        check_cantera_value(&guard, temperature)
    }

    /// Pressure [Pa]
    pub fn pressure(&self) -> Result<f64, EquilibrationError> {
        let guard = acquire_lock()?;

        let pressure = unsafe { bindings::thermo_pressure(self.handle) };
        check_cantera_value(&guard, pressure)
    }
}
