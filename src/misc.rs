mod mole_fractions;
mod species;

/// Longest species name the engine is asked to copy out.
pub(crate) const SPECIES_NAME_LENGTH: usize = 128;
