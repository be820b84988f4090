use std::sync::{Mutex, PoisonError};

use crate::{
    bindings,
    utils::{acquire_lock, last_cantera_error, to_cstring},
    CanteraPhase, EquilibrationError, CANTERA_MUTEX,
};

impl CanteraPhase {
    /// Loads a phase definition from a file using the `thermo_newFromFile` function.
    ///
    /// The engine resolves `path` against its own data search path, so a bare name such as
    /// `"JP10.yaml"` is looked up in the working directory and the engine's data directories.
    /// The first phase defined in the file is used.
    ///
    /// # Parameters
    ///
    /// - `path`: Name or path of the phase definition file.
    ///
    /// # Errors
    ///
    /// - Returns `EquilibrationError::InvalidInput` if `path` contains null bytes.
    /// - Returns `EquilibrationError::InitializationError` if the file cannot be found or parsed.
    /// - Returns `EquilibrationError::MutexPoisoned` if the engine mutex is poisoned.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use phi_sweep::{CanteraPhase, EquilibrationError};
    ///
    /// fn main() -> Result<(), EquilibrationError> {
    ///     let gas = CanteraPhase::from_file("gri30.yaml")?;
    ///     println!("{} species", gas.species_count()?);
    ///     Ok(())
    /// }
    /// ```
    pub fn from_file(path: &str) -> Result<Self, EquilibrationError> {
        let c_path = to_cstring("Phase file name", path)?;
        // An empty phase name selects the first phase in the file.
        let c_phase_name = to_cstring("Phase name", "")?;

        // Acquire the mutex lock to ensure exclusive access
        let guard = acquire_lock()?;

        let handle = unsafe {
            bindings::thermo_newFromFile(
                c_path.as_ptr() as *mut libc::c_char,
                c_phase_name.as_ptr() as *mut libc::c_char,
            )
        };

        if handle < 0 {
            let message = last_cantera_error(&guard)?;
            return Err(EquilibrationError::InitializationError(format!(
                "could not load phase from '{path}': {message}"
            )));
        }

        Ok(Self { handle })
    }

    /// The engine handle of this phase.
    pub fn handle(&self) -> i32 {
        self.handle
    }
}

impl Drop for CanteraPhase {
    fn drop(&mut self) {
        // A poisoned lock must not leak the handle.
        let _guard = CANTERA_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        unsafe {
            bindings::thermo_del(self.handle);
        }
    }
}
