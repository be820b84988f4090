use std::ffi::CStr;

use crate::{
    bindings,
    misc::SPECIES_NAME_LENGTH,
    utils::{acquire_lock, check_cantera_status, check_cantera_value, to_cstring},
    CanteraPhase, EquilibrationError, CT_NPOS,
};

impl CanteraPhase {
    /// Number of species in the phase, from `thermo_nSpecies`.
    pub fn species_count(&self) -> Result<usize, EquilibrationError> {
        let _lock = acquire_lock()?;

        let count = unsafe { bindings::thermo_nSpecies(self.handle) };
        Ok(count as usize)
    }

    /// Name of species `k` using the `thermo_getSpeciesName` function.
    ///
    /// # Errors
    ///
    /// - Returns `EquilibrationError::InvalidInput` if `k` is not a valid species index.
    /// - Returns `EquilibrationError::CalculationError` if the engine reports an error.
    /// - Returns `EquilibrationError::Utf8Error` if the name cannot be converted to UTF-8.
    pub fn species_name(&self, k: usize) -> Result<String, EquilibrationError> {
        let count = self.species_count()?;
        if k >= count {
            return Err(EquilibrationError::InvalidInput(format!(
                "Species index {k} is out of range for a phase with {count} species."
            )));
        }

        let guard = acquire_lock()?;

        let mut name_buffer = [0 as libc::c_char; SPECIES_NAME_LENGTH];
        let status = unsafe {
            bindings::thermo_getSpeciesName(
                self.handle,
                k as _,
                SPECIES_NAME_LENGTH as _,
                name_buffer.as_mut_ptr(),
            )
        };
        check_cantera_status(&guard, status as i32)?;
        name_buffer[SPECIES_NAME_LENGTH - 1] = 0;

        let name = unsafe { CStr::from_ptr(name_buffer.as_ptr()) }
            .to_str()?
            .trim_end()
            .to_owned();

        Ok(name)
    }

    /// Index of the species called `name`, or `None` if the phase does not contain it.
    pub fn species_index(&self, name: &str) -> Result<Option<usize>, EquilibrationError> {
        let c_name = to_cstring("Species name", name)?;

        let _lock = acquire_lock()?;

        let index =
            unsafe { bindings::thermo_speciesIndex(self.handle, c_name.as_ptr() as *mut libc::c_char) };
        let index = index as usize;

        Ok((index != CT_NPOS).then_some(index))
    }

    /// Number of atoms of `element` in species `k`, from `thermo_nAtoms`.
    ///
    /// An element that is not part of the phase contributes zero atoms.
    pub fn atom_count(&self, k: usize, element: &str) -> Result<f64, EquilibrationError> {
        let c_element = to_cstring("Element name", element)?;

        let guard = acquire_lock()?;

        let m = unsafe {
            bindings::thermo_elementIndex(self.handle, c_element.as_ptr() as *mut libc::c_char)
        } as usize;
        if m == CT_NPOS {
            return Ok(0.0);
        }

        let atoms = unsafe { bindings::thermo_nAtoms(self.handle, k as _, m as _) };
        check_cantera_value(&guard, atoms)
    }
}
