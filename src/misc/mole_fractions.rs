use crate::{
    bindings,
    utils::{acquire_lock, check_cantera_status},
    CanteraPhase, EquilibrationError,
};

impl CanteraPhase {
    /// Retrieves the mole fraction of every species using the `thermo_getMoleFractions` function.
    ///
    /// # Returns
    ///
    /// - `Vec<f64>`: one mole fraction per species, in the phase's species order.
    ///
    /// # Errors
    ///
    /// - Returns `EquilibrationError::CalculationError` if the engine reports an error.
    /// - Returns `EquilibrationError::MutexPoisoned` if the engine mutex is poisoned.
    pub fn mole_fractions(&self) -> Result<Vec<f64>, EquilibrationError> {
        let count = self.species_count()?;

        let guard = acquire_lock()?;

        let mut mole_fractions = vec![0.0f64; count];
        let status = unsafe {
            bindings::thermo_getMoleFractions(self.handle, count as _, mole_fractions.as_mut_ptr())
        };
        check_cantera_status(&guard, status)?;

        Ok(mole_fractions)
    }

    /// Sets the composition using the `thermo_setMoleFractions` function.
    ///
    /// The engine normalizes `x`; temperature and pressure are preserved.
    ///
    /// # Parameters
    ///
    /// - `x`: one non-negative amount per species, in the phase's species order.
    ///
    /// # Errors
    ///
    /// - Returns `EquilibrationError::InvalidInput` if the length of `x` differs from the species count,
    ///   or if any entry is negative or not finite.
    /// - Returns `EquilibrationError::CalculationError` if the engine reports an error.
    pub fn set_mole_fractions(&mut self, x: &[f64]) -> Result<(), EquilibrationError> {
        let count = self.species_count()?;
        if x.len() != count {
            return Err(EquilibrationError::InvalidInput(format!(
                "Composition has {} entries but the phase has {count} species.",
                x.len()
            )));
        }
        if x.iter().any(|&xk| !xk.is_finite() || xk < 0.0) {
            return Err(EquilibrationError::InvalidInput(
                "Mole fractions must be finite and non-negative.".to_string(),
            ));
        }

        // Changing composition holds density; restore the pressure afterwards.
        let pressure = self.pressure()?;

        {
            let guard = acquire_lock()?;

            let mut buffer = x.to_vec();
            let status = unsafe {
                bindings::thermo_setMoleFractions(self.handle, count as _, buffer.as_mut_ptr(), 1)
            };
            check_cantera_status(&guard, status)?;
        }

        self.set_pressure(pressure)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::{CanteraPhase, EquilibrationError};

    #[test]
    fn test_set_and_get_mole_fractions() -> Result<(), EquilibrationError> {
        let mut gas = CanteraPhase::from_file("gri30.yaml")?;
        gas.set_state_tp(500.0, 2.0e5)?;

        let o2 = gas.species_index("O2")?.expect("O2 is part of gri30");
        let n2 = gas.species_index("N2")?.expect("N2 is part of gri30");
        let mut x = vec![0.0; gas.species_count()?];
        x[o2] = 1.0;
        x[n2] = 3.76;
        gas.set_mole_fractions(&x)?;

        let read_back = gas.mole_fractions()?;
        assert_relative_eq!(read_back[o2], 1.0 / 4.76, max_relative = 1e-12);
        assert_relative_eq!(read_back.iter().sum::<f64>(), 1.0, max_relative = 1e-12);
        assert_relative_eq!(gas.pressure()?, 2.0e5, max_relative = 1e-9);
        assert_relative_eq!(gas.temperature()?, 500.0, max_relative = 1e-12);

        Ok(())
    }

    #[test]
    fn test_rejects_wrong_length() -> Result<(), EquilibrationError> {
        let mut gas = CanteraPhase::from_file("gri30.yaml")?;
        assert!(matches!(
            gas.set_mole_fractions(&[1.0]),
            Err(EquilibrationError::InvalidInput(_))
        ));
        Ok(())
    }
}
