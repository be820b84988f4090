//! An in-memory engine for exercising the driver without the C library.

use std::{cell::Cell, rc::Rc};

use crate::{EquilibrationError, EquilibriumSolver, PropertyPair, ThermoEngine};

type Formula = &'static [(&'static str, f64)];

/// Species in a fixed order with CO at index 11 and CO2 at index 24.
const SPECIES: &[(&str, Formula)] = &[
    ("N2", &[("N", 2.0)]),
    ("O2", &[("O", 2.0)]),
    ("H2", &[("H", 2.0)]),
    ("H", &[("H", 1.0)]),
    ("O", &[("O", 1.0)]),
    ("OH", &[("O", 1.0), ("H", 1.0)]),
    ("H2O", &[("H", 2.0), ("O", 1.0)]),
    ("HO2", &[("H", 1.0), ("O", 2.0)]),
    ("H2O2", &[("H", 2.0), ("O", 2.0)]),
    ("C", &[("C", 1.0)]),
    ("CH", &[("C", 1.0), ("H", 1.0)]),
    ("CO", &[("C", 1.0), ("O", 1.0)]),
    ("CH2", &[("C", 1.0), ("H", 2.0)]),
    ("HCO", &[("H", 1.0), ("C", 1.0), ("O", 1.0)]),
    ("CH3", &[("C", 1.0), ("H", 3.0)]),
    ("CH4", &[("C", 1.0), ("H", 4.0)]),
    ("C2H2", &[("C", 2.0), ("H", 2.0)]),
    ("C2H4", &[("C", 2.0), ("H", 4.0)]),
    ("NO", &[("N", 1.0), ("O", 1.0)]),
    ("NO2", &[("N", 1.0), ("O", 2.0)]),
    ("N2O", &[("N", 2.0), ("O", 1.0)]),
    ("N", &[("N", 1.0)]),
    ("NH", &[("N", 1.0), ("H", 1.0)]),
    ("HCN", &[("H", 1.0), ("C", 1.0), ("N", 1.0)]),
    ("CO2", &[("C", 1.0), ("O", 2.0)]),
    ("C10H16", &[("C", 10.0), ("H", 16.0)]),
    ("AR", &[("Ar", 1.0)]),
];

pub(crate) const CO: usize = 11;
pub(crate) const CO2: usize = 24;

/// A deterministic stand-in for a thermo phase.
///
/// `equilibrate` burns any C10H16 into CO, CO2 and H2O and raises the temperature in
/// proportion to the fuel burnt; the result is always a valid mole-fraction vector.
#[derive(Debug)]
pub(crate) struct FakeEngine {
    species: Vec<(&'static str, Formula)>,
    temperature: f64,
    pressure: f64,
    x: Vec<f64>,
    pub(crate) state_resets: usize,
    pub(crate) equilibrate_calls: usize,
    pub(crate) last_equilibrate: Option<(PropertyPair, EquilibriumSolver)>,
    fail_on_equilibrate: Option<usize>,
    drops: Option<Rc<Cell<usize>>>,
}

impl FakeEngine {
    pub(crate) fn new() -> Self {
        Self::with_species(SPECIES.to_vec())
    }

    /// Only the first `count` species are known to the phase.
    pub(crate) fn truncated(count: usize) -> Self {
        Self::with_species(SPECIES[..count].to_vec())
    }

    fn with_species(species: Vec<(&'static str, Formula)>) -> Self {
        let mut x = vec![0.0; species.len()];
        x[0] = 1.0;
        Self {
            species,
            temperature: 300.0,
            pressure: 101325.0,
            x,
            state_resets: 0,
            equilibrate_calls: 0,
            last_equilibrate: None,
            fail_on_equilibrate: None,
            drops: None,
        }
    }

    /// The `call`-th equilibration (zero-based) reports non-convergence.
    pub(crate) fn failing_on(mut self, call: usize) -> Self {
        self.fail_on_equilibrate = Some(call);
        self
    }

    /// Counts how many times the engine is dropped.
    pub(crate) fn counting_drops(mut self, drops: Rc<Cell<usize>>) -> Self {
        self.drops = Some(drops);
        self
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.species.iter().position(|(species, _)| *species == name)
    }
}

impl Drop for FakeEngine {
    fn drop(&mut self) {
        if let Some(drops) = &self.drops {
            drops.set(drops.get() + 1);
        }
    }
}

impl ThermoEngine for FakeEngine {
    fn species_count(&self) -> Result<usize, EquilibrationError> {
        Ok(self.species.len())
    }

    fn species_name(&self, k: usize) -> Result<String, EquilibrationError> {
        self.species
            .get(k)
            .map(|(name, _)| name.to_string())
            .ok_or_else(|| EquilibrationError::InvalidInput(format!("Species index {k} is out of range.")))
    }

    fn species_index(&self, name: &str) -> Result<Option<usize>, EquilibrationError> {
        Ok(self.index_of(name))
    }

    fn element_count(&self, k: usize, element: &str) -> Result<f64, EquilibrationError> {
        let (_, formula) = self.species.get(k).ok_or_else(|| {
            EquilibrationError::InvalidInput(format!("Species index {k} is out of range."))
        })?;
        Ok(formula
            .iter()
            .find(|(symbol, _)| *symbol == element)
            .map_or(0.0, |(_, atoms)| *atoms))
    }

    fn set_state_tp(&mut self, temperature: f64, pressure: f64) -> Result<(), EquilibrationError> {
        self.state_resets += 1;
        self.temperature = temperature;
        self.pressure = pressure;
        Ok(())
    }

    fn set_mole_fractions(&mut self, x: &[f64]) -> Result<(), EquilibrationError> {
        if x.len() != self.species.len() {
            return Err(EquilibrationError::InvalidInput(
                "Composition length does not match the species count.".to_string(),
            ));
        }
        let total: f64 = x.iter().sum();
        self.x = x.iter().map(|xk| xk / total).collect();
        Ok(())
    }

    fn equilibrate(
        &mut self,
        pair: PropertyPair,
        solver: EquilibriumSolver,
    ) -> Result<(), EquilibrationError> {
        let call = self.equilibrate_calls;
        self.equilibrate_calls += 1;
        self.last_equilibrate = Some((pair, solver));

        if self.fail_on_equilibrate == Some(call) {
            return Err(EquilibrationError::CalculationError(
                "Equilibrium solver failed to converge.".to_string(),
            ));
        }

        let Some(fuel) = self.index_of("C10H16") else {
            return Ok(());
        };
        let (o2, h2o) = (1, 6);

        let burnt = self.x[fuel];
        let carbon = 10.0 * burnt;
        let co2_share = if carbon > 0.0 {
            (self.x[o2] / (self.x[o2] + carbon)).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let mut y = self.x.clone();
        y[fuel] = 0.0;
        if let (Some(co), Some(co2)) = (y.get(CO).copied(), y.get(CO2).copied()) {
            y[CO] = co + carbon * (1.0 - co2_share);
            y[CO2] = co2 + carbon * co2_share;
        }
        y[h2o] += 8.0 * burnt;
        y[o2] = (y[o2] - carbon * co2_share).max(0.0);

        let total: f64 = y.iter().sum();
        self.x = y.iter().map(|yk| yk / total).collect();
        self.temperature += 60_000.0 * burnt * co2_share;

        Ok(())
    }

    fn temperature(&self) -> Result<f64, EquilibrationError> {
        Ok(self.temperature)
    }

    fn mole_fractions(&self) -> Result<Vec<f64>, EquilibrationError> {
        Ok(self.x.clone())
    }
}
