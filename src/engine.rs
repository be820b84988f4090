//! The seam between the sweep driver and the thermochemistry engine.

use crate::{
    stoichiometry::{equivalence_ratio_mixture, Composition},
    EquilibrationError, EquilibriumSolver, PropertyPair,
};

/// Operations the sweep driver needs from a mutable thermodynamic phase.
///
/// The engine models a single current state that every call reads or updates in place.
pub trait ThermoEngine {
    /// Number of species known to the phase.
    ///
    /// # Errors
    ///
    /// Returns [`EquilibrationError`] if the engine call fails.
    fn species_count(&self) -> Result<usize, EquilibrationError>;

    /// Name of species `k`.
    ///
    /// # Errors
    ///
    /// Returns [`EquilibrationError`] if `k` is out of range or the engine call fails.
    fn species_name(&self, k: usize) -> Result<String, EquilibrationError>;

    /// Index of the species called `name`, or `None` if the phase does not contain it.
    ///
    /// # Errors
    ///
    /// Returns [`EquilibrationError`] if the engine call fails.
    fn species_index(&self, name: &str) -> Result<Option<usize>, EquilibrationError>;

    /// Number of atoms of `element` in species `k`; zero for elements absent from the phase.
    ///
    /// # Errors
    ///
    /// Returns [`EquilibrationError`] if the engine call fails.
    fn element_count(&self, k: usize, element: &str) -> Result<f64, EquilibrationError>;

    /// Sets temperature [K] and pressure [Pa], holding composition fixed.
    ///
    /// # Errors
    ///
    /// Returns [`EquilibrationError`] if the state is rejected.
    fn set_state_tp(&mut self, temperature: f64, pressure: f64) -> Result<(), EquilibrationError>;

    /// Sets the composition from per-species amounts at the current temperature and pressure.
    ///
    /// # Errors
    ///
    /// Returns [`EquilibrationError`] if the composition is rejected.
    fn set_mole_fractions(&mut self, x: &[f64]) -> Result<(), EquilibrationError>;

    /// Equilibrates the current state holding `pair` constant.
    ///
    /// # Errors
    ///
    /// Returns [`EquilibrationError`] if the solver fails.
    fn equilibrate(
        &mut self,
        pair: PropertyPair,
        solver: EquilibriumSolver,
    ) -> Result<(), EquilibrationError>;

    /// Temperature [K] of the current state.
    ///
    /// # Errors
    ///
    /// Returns [`EquilibrationError`] if the engine call fails.
    fn temperature(&self) -> Result<f64, EquilibrationError>;

    /// Mole fraction of every species in the current state.
    ///
    /// # Errors
    ///
    /// Returns [`EquilibrationError`] if the engine call fails.
    fn mole_fractions(&self) -> Result<Vec<f64>, EquilibrationError>;

    /// Names of all species, in index order.
    ///
    /// # Errors
    ///
    /// Returns [`EquilibrationError`] if any lookup fails.
    fn species_names(&self) -> Result<Vec<String>, EquilibrationError> {
        (0..self.species_count()?)
            .map(|k| self.species_name(k))
            .collect()
    }

    /// Sets the composition for equivalence ratio `phi` of `fuel` against `oxidizer`.
    ///
    /// Both mixtures are given as composition strings such as `"O2:1.0, N2:3.76"` on a molar
    /// basis. Temperature and pressure are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`EquilibrationError::InvalidInput`] for malformed compositions, unknown species,
    /// a negative `phi`, or a fuel/oxidizer pair without a stoichiometric point.
    fn set_equivalence_ratio(
        &mut self,
        phi: f64,
        fuel: &str,
        oxidizer: &str,
    ) -> Result<(), EquilibrationError> {
        let fuel: Composition = fuel.parse()?;
        let oxidizer: Composition = oxidizer.parse()?;
        let x = equivalence_ratio_mixture(&*self, phi, &fuel, &oxidizer)?;
        self.set_mole_fractions(&x)
    }
}

#[cfg(feature = "cantera")]
impl ThermoEngine for crate::CanteraPhase {
    fn species_count(&self) -> Result<usize, EquilibrationError> {
        crate::CanteraPhase::species_count(self)
    }

    fn species_name(&self, k: usize) -> Result<String, EquilibrationError> {
        crate::CanteraPhase::species_name(self, k)
    }

    fn species_index(&self, name: &str) -> Result<Option<usize>, EquilibrationError> {
        crate::CanteraPhase::species_index(self, name)
    }

    fn element_count(&self, k: usize, element: &str) -> Result<f64, EquilibrationError> {
        self.atom_count(k, element)
    }

    fn set_state_tp(&mut self, temperature: f64, pressure: f64) -> Result<(), EquilibrationError> {
        crate::CanteraPhase::set_state_tp(self, temperature, pressure)
    }

    fn set_mole_fractions(&mut self, x: &[f64]) -> Result<(), EquilibrationError> {
        crate::CanteraPhase::set_mole_fractions(self, x)
    }

    fn equilibrate(
        &mut self,
        pair: PropertyPair,
        solver: EquilibriumSolver,
    ) -> Result<(), EquilibrationError> {
        crate::CanteraPhase::equilibrate(self, pair, solver)
    }

    fn temperature(&self) -> Result<f64, EquilibrationError> {
        crate::CanteraPhase::temperature(self)
    }

    fn mole_fractions(&self) -> Result<Vec<f64>, EquilibrationError> {
        crate::CanteraPhase::mole_fractions(self)
    }
}
