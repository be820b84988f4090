//! Equivalence-ratio sweep driver.
//!
//! Every sample starts from the same baseline state, so results never carry over between
//! samples. The first failing sample aborts the sweep; lines already written stay written.

use std::{io::Write, process::ExitCode};

use tracing::{debug, error, info, warn};

use crate::{
    engine::ThermoEngine, format::general, utils::validate_mole_fractions, EquilibrationError,
    EquilibriumSolver, PropertyPair,
};

/// A species reported on every output line, addressed by its fixed index in the phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedSpecies {
    /// Label printed on the output line and expected at `index`.
    pub label: String,
    /// Position in the phase's species order.
    pub index: usize,
}

impl ReportedSpecies {
    pub fn new(label: &str, index: usize) -> Self {
        Self {
            label: label.to_string(),
            index,
        }
    }
}

/// Parameters of one sweep run.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Phase definition loaded by name.
    pub phase_file: String,
    /// Fuel composition string.
    pub fuel: String,
    /// Oxidizer composition string (molar amounts).
    pub oxidizer: String,
    /// Baseline temperature [K] set before every sample.
    pub initial_temperature: f64,
    /// Baseline pressure [Pa] set before every sample.
    pub initial_pressure: f64,
    /// Spacing between successive equivalence ratios; the first sample is at zero.
    pub phi_step: f64,
    /// Number of samples.
    pub samples: usize,
    pub property_pair: PropertyPair,
    pub solver: EquilibriumSolver,
    /// The two species printed on each line.
    pub reported_species: [ReportedSpecies; 2],
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            phase_file: "JP10.yaml".to_string(),
            fuel: "C10H16".to_string(),
            oxidizer: "O2:1.0, N2:3.76".to_string(),
            initial_temperature: 1000.0,
            initial_pressure: 101325.0,
            phi_step: 0.4082,
            samples: 50,
            property_pair: PropertyPair::HP,
            solver: EquilibriumSolver::Gibbs,
            reported_species: [ReportedSpecies::new("CO", 11), ReportedSpecies::new("CO2", 24)],
        }
    }
}

impl SweepConfig {
    /// Equivalence ratio of sample `index`.
    pub fn phi(&self, index: usize) -> f64 {
        self.phi_step * index as f64
    }

    /// All equivalence ratios of the sweep, in order.
    pub fn phis(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.samples).map(|i| self.phi(i))
    }
}

/// The equilibrium result of one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub index: usize,
    pub phi: f64,
    /// Adiabatic equilibrium temperature [K]
    pub temperature: f64,
    /// Mole fraction of every species at equilibrium.
    pub mole_fractions: Vec<f64>,
}

impl SweepPoint {
    pub fn mole_fraction(&self, species: usize) -> Option<f64> {
        self.mole_fractions.get(species).copied()
    }

    /// Renders the output line for this point.
    ///
    /// # Errors
    ///
    /// Returns [`EquilibrationError::InvalidInput`] if a reported species index is out of range.
    pub fn format_line(&self, reported: &[ReportedSpecies]) -> Result<String, EquilibrationError> {
        let mut line = format!("phi = {}", general(self.phi));
        for species in reported {
            let x = self.mole_fraction(species.index).ok_or_else(|| {
                EquilibrationError::InvalidInput(format!(
                    "Species index {} is out of range for {} mole fractions.",
                    species.index,
                    self.mole_fractions.len()
                ))
            })?;
            line.push_str(&format!("\t\t Xeq of {} = : {}", species.label, general(x)));
        }
        Ok(line)
    }
}

/// Results of a sweep, one point per solved sample, in sample order.
#[derive(Debug, Clone, Default)]
pub struct SweepTable {
    pub species_names: Vec<String>,
    pub points: Vec<SweepPoint>,
}

impl SweepTable {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point with the highest adiabatic temperature.
    pub fn peak_temperature(&self) -> Option<&SweepPoint> {
        self.points
            .iter()
            .max_by(|a, b| a.temperature.total_cmp(&b.temperature))
    }
}

/// Runs the sweep against one exclusively owned engine.
pub struct SweepDriver<E> {
    engine: E,
    config: SweepConfig,
}

impl<E: ThermoEngine> SweepDriver<E> {
    pub fn new(engine: E, config: SweepConfig) -> Self {
        Self { engine, config }
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Reads the species names and checks the reported indices against them.
    ///
    /// Indices are trusted as given: a name that differs from the label is only logged.
    ///
    /// # Errors
    ///
    /// Returns [`EquilibrationError::InvalidInput`] if a reported index is beyond the species count.
    pub fn check_reported_species(&self) -> Result<Vec<String>, EquilibrationError> {
        let names = self.engine.species_names()?;
        for species in &self.config.reported_species {
            match names.get(species.index) {
                None => {
                    return Err(EquilibrationError::InvalidInput(format!(
                        "Species index {} for {} is out of range for a phase with {} species.",
                        species.index,
                        species.label,
                        names.len()
                    )))
                }
                Some(name) if *name != species.label => warn!(
                    index = species.index,
                    expected = %species.label,
                    found = %name,
                    "reported species index does not name the expected species"
                ),
                Some(_) => {}
            }
        }
        Ok(names)
    }

    /// Solves sample `index` from the baseline state.
    ///
    /// # Errors
    ///
    /// Returns the first [`EquilibrationError`] raised by the engine, or a
    /// [`EquilibrationError::CalculationError`] if the engine returns an invalid composition.
    pub fn solve_sample(&mut self, index: usize) -> Result<SweepPoint, EquilibrationError> {
        let phi = self.config.phi(index);

        self.engine
            .set_state_tp(self.config.initial_temperature, self.config.initial_pressure)?;
        self.engine
            .set_equivalence_ratio(phi, &self.config.fuel, &self.config.oxidizer)?;
        self.engine
            .equilibrate(self.config.property_pair, self.config.solver)?;

        let temperature = self.engine.temperature()?;
        let mole_fractions = self.engine.mole_fractions()?;
        validate_mole_fractions(&mole_fractions)?;

        debug!(index, phi, temperature, "sample equilibrated");

        Ok(SweepPoint {
            index,
            phi,
            temperature,
            mole_fractions,
        })
    }

    /// Solves every sample in order, writing one line per sample to `out` as soon as it is solved.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first [`EquilibrationError`]; earlier lines remain written.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<SweepTable, EquilibrationError> {
        let species_names = self.check_reported_species()?;
        let mut table = SweepTable {
            species_names,
            points: Vec::with_capacity(self.config.samples),
        };

        for index in 0..self.config.samples {
            let point = self.solve_sample(index)?;
            writeln!(out, "{}", point.format_line(&self.config.reported_species)?)?;
            out.flush()?;
            table.points.push(point);
        }

        if let Some(peak) = table.peak_temperature() {
            info!(
                samples = table.len(),
                peak_temperature = peak.temperature,
                phi = peak.phi,
                "sweep complete"
            );
        }

        Ok(table)
    }
}

/// Loads the phase named by `config.phase_file` with `load` and runs the sweep.
///
/// The engine is dropped, and its handle released, before this function returns.
///
/// # Errors
///
/// Returns the load failure or the first sample failure.
pub fn run_sweep<E, L, W>(
    load: L,
    config: SweepConfig,
    out: &mut W,
) -> Result<SweepTable, EquilibrationError>
where
    E: ThermoEngine,
    L: FnOnce(&str) -> Result<E, EquilibrationError>,
    W: Write,
{
    let engine = load(&config.phase_file)?;
    let species = engine.species_count()?;
    info!(phase_file = %config.phase_file, species, "phase loaded");

    SweepDriver::new(engine, config).run(out)
}

/// Turns the outcome of a sweep into the process exit code.
///
/// On failure the error message is written to `out` as a single line after any data lines.
/// If `out` rejects it, the message goes to stderr instead.
pub fn report<W: Write>(result: Result<SweepTable, EquilibrationError>, out: &mut W) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "sweep aborted");
            if let Err(write_err) = writeln!(out, "{err}").and_then(|()| out.flush()) {
                warn!(%write_err, "could not write the error to the output");
                eprintln!("{err}");
            }
            ExitCode::FAILURE
        }
    }
}
