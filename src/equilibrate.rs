use crate::{
    bindings,
    utils::{acquire_lock, check_cantera_status, to_cstring},
    CanteraPhase, EquilibrationError, EquilibriumSolver, PropertyPair,
};

/// Relative tolerance passed to the engine's equilibrium routine.
pub const DEFAULT_RTOL: f64 = 1e-9;
/// Maximum number of solver steps.
pub const DEFAULT_MAX_STEPS: i32 = 50_000;
/// Maximum number of outer iterations on T or P when a non-TP pair is held.
pub const DEFAULT_MAX_ITERATIONS: i32 = 100;

impl CanteraPhase {
    /// Brings the mixture to chemical equilibrium using the `thermo_equilibrate` function.
    ///
    /// The two properties named by `pair` are held at their current values; the composition,
    /// and the remaining state variables, are updated in place.
    ///
    /// # Parameters
    ///
    /// - `pair`: Properties held constant, e.g. `PropertyPair::HP` for an adiabatic, isobaric solve.
    /// - `solver`: Solver strategy.
    ///
    /// # Errors
    ///
    /// - Returns `EquilibrationError::CalculationError` if the solver fails to converge.
    /// - Returns `EquilibrationError::MutexPoisoned` if the engine mutex is poisoned.
    pub fn equilibrate(
        &mut self,
        pair: PropertyPair,
        solver: EquilibriumSolver,
    ) -> Result<(), EquilibrationError> {
        let c_pair = to_cstring("Property pair", pair.as_str())?;
        let c_solver = to_cstring("Solver name", solver.as_str())?;

        // Acquire the mutex lock to ensure exclusive access
        let guard = acquire_lock()?;

        let status = unsafe {
            bindings::thermo_equilibrate(
                self.handle,
                c_pair.as_ptr() as *mut libc::c_char,
                c_solver.as_ptr() as *mut libc::c_char,
                DEFAULT_RTOL,
                DEFAULT_MAX_STEPS,
                DEFAULT_MAX_ITERATIONS,
                0,
            )
        };
        check_cantera_status(&guard, status)?;

        Ok(())
    }
}
