#[cfg(feature = "cantera")]
pub(crate) mod bindings;
pub mod engine;
#[cfg(feature = "cantera")]
mod equilibrate;
pub mod errors;
pub mod format;
#[cfg(feature = "cantera")]
mod misc;
#[cfg(feature = "cantera")]
mod setup;
#[cfg(feature = "cantera")]
mod state;
pub mod stoichiometry;
pub mod sweep;
#[cfg(test)]
pub(crate) mod test_support;
pub(crate) mod utils;

#[cfg(feature = "cantera")]
use std::sync::{Mutex, OnceLock};

pub use engine::ThermoEngine;
pub use errors::EquilibrationError;
pub use stoichiometry::Composition;
pub use sweep::{report, run_sweep, ReportedSpecies, SweepConfig, SweepDriver, SweepPoint, SweepTable};

#[cfg(feature = "cantera")]
pub use equilibrate::{DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_STEPS, DEFAULT_RTOL};

/// Cantera keeps every object in process-global storage that is not thread-safe.
#[cfg(feature = "cantera")]
pub(crate) static CANTERA_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Value returned by double-valued C library calls on failure.
#[cfg(feature = "cantera")]
pub(crate) const CT_DERR: f64 = -999.999;
/// Index returned by size-valued C library calls when nothing was found.
#[cfg(feature = "cantera")]
pub(crate) const CT_NPOS: usize = usize::MAX;

/// The pair of properties held constant while the mixture is equilibrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyPair {
    /// Temperature and pressure.
    TP,
    /// Enthalpy and pressure (adiabatic, isobaric).
    HP,
    /// Entropy and pressure.
    SP,
    /// Entropy and specific volume.
    SV,
    /// Temperature and specific volume.
    TV,
    /// Internal energy and specific volume.
    UV,
}

impl PropertyPair {
    /// The two-letter code the engine expects.
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyPair::TP => "TP",
            PropertyPair::HP => "HP",
            PropertyPair::SP => "SP",
            PropertyPair::SV => "SV",
            PropertyPair::TV => "TV",
            PropertyPair::UV => "UV",
        }
    }
}

/// Solver strategy used by the engine's equilibrium routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquilibriumSolver {
    /// Let the engine try the element-potential solver and fall back as needed.
    Auto,
    /// Element potential method; single-phase mixtures only.
    ElementPotential,
    /// Gibbs energy minimization.
    Gibbs,
    /// Villars-Cruise-Smith algorithm.
    Vcs,
}

impl EquilibriumSolver {
    /// The solver name the engine expects.
    pub fn as_str(self) -> &'static str {
        match self {
            EquilibriumSolver::Auto => "auto",
            EquilibriumSolver::ElementPotential => "element_potential",
            EquilibriumSolver::Gibbs => "gibbs",
            EquilibriumSolver::Vcs => "vcs",
        }
    }
}

/// A safe wrapper around one Cantera thermo object.
///
/// The handle is owned exclusively and released exactly once when the value is dropped.
#[cfg(feature = "cantera")]
#[derive(Debug)]
pub struct CanteraPhase {
    handle: i32,
}
