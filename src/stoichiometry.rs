//! Composition strings and the equivalence-ratio mixing rule.
//!
//! Oxygen demand is counted per mole of mixture as `C + S + H/4` moles of O2, and oxygen
//! present as `O/2`. The fuel must have a net demand and the oxidizer a net surplus; the
//! equivalence ratio then fixes the moles of fuel mixed into one mole of oxidizer.

use std::str::FromStr;

use crate::{engine::ThermoEngine, EquilibrationError};

/// An ordered list of species amounts, e.g. `"O2:1.0, N2:3.76"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    components: Vec<(String, f64)>,
}

impl Composition {
    /// Parses a composition string.
    ///
    /// Entries are `name:amount` pairs separated by commas. A bare species name is taken to
    /// mean one mole of that species.
    ///
    /// # Errors
    ///
    /// Returns [`EquilibrationError::InvalidInput`] for empty strings, duplicate species,
    /// unparsable or negative amounts, or a total amount of zero.
    pub fn parse(spec: &str) -> Result<Self, EquilibrationError> {
        let mut components: Vec<(String, f64)> = Vec::new();

        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, amount) = match entry.split_once(':') {
                Some((name, amount)) => {
                    let amount = amount.trim().parse::<f64>().map_err(|e| {
                        EquilibrationError::InvalidInput(format!(
                            "Invalid amount '{}' for species '{}': {e}",
                            amount.trim(),
                            name.trim()
                        ))
                    })?;
                    (name.trim(), amount)
                }
                None => (entry, 1.0),
            };

            if name.is_empty() {
                return Err(EquilibrationError::InvalidInput(format!(
                    "Missing species name in composition entry '{entry}'."
                )));
            }
            if !amount.is_finite() || amount < 0.0 {
                return Err(EquilibrationError::InvalidInput(format!(
                    "Amount of species '{name}' must be finite and non-negative, got {amount}."
                )));
            }
            if components.iter().any(|(existing, _)| existing == name) {
                return Err(EquilibrationError::InvalidInput(format!(
                    "Duplicate species '{name}' in composition '{spec}'."
                )));
            }
            components.push((name.to_string(), amount));
        }

        let total: f64 = components.iter().map(|(_, amount)| amount).sum();
        if components.is_empty() || total <= 0.0 {
            return Err(EquilibrationError::InvalidInput(format!(
                "Composition '{spec}' contains no species."
            )));
        }

        Ok(Self { components })
    }

    /// The parsed `(species, amount)` pairs in input order.
    pub fn components(&self) -> &[(String, f64)] {
        &self.components
    }

    /// The composition scaled so the amounts sum to one.
    pub fn normalized(&self) -> Vec<(String, f64)> {
        let total: f64 = self.components.iter().map(|(_, amount)| amount).sum();
        self.components
            .iter()
            .map(|(name, amount)| (name.clone(), amount / total))
            .collect()
    }

    /// Dense mole-fraction vector over the species of `engine`.
    ///
    /// # Errors
    ///
    /// Returns [`EquilibrationError::InvalidInput`] if a species is not part of the phase.
    pub fn to_mole_fractions<E: ThermoEngine + ?Sized>(
        &self,
        engine: &E,
    ) -> Result<Vec<f64>, EquilibrationError> {
        let mut x = vec![0.0; engine.species_count()?];
        for (name, fraction) in self.normalized() {
            let k = engine.species_index(&name)?.ok_or_else(|| {
                EquilibrationError::InvalidInput(format!("Unknown species '{name}'."))
            })?;
            x[k] += fraction;
        }
        Ok(x)
    }
}

impl FromStr for Composition {
    type Err = EquilibrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Moles of O2 needed to fully oxidize one mole of the mixture `x`, ignoring its own oxygen.
pub fn oxygen_demand<E: ThermoEngine + ?Sized>(
    engine: &E,
    x: &[f64],
) -> Result<f64, EquilibrationError> {
    weighted_atoms(x, |k| {
        Ok(engine.element_count(k, "C")?
            + engine.element_count(k, "S")?
            + 0.25 * engine.element_count(k, "H")?)
    })
}

/// Moles of O2 carried by one mole of the mixture `x`.
pub fn oxygen_present<E: ThermoEngine + ?Sized>(
    engine: &E,
    x: &[f64],
) -> Result<f64, EquilibrationError> {
    weighted_atoms(x, |k| Ok(0.5 * engine.element_count(k, "O")?))
}

fn weighted_atoms<F>(x: &[f64], per_species: F) -> Result<f64, EquilibrationError>
where
    F: Fn(usize) -> Result<f64, EquilibrationError>,
{
    x.iter()
        .enumerate()
        .filter(|&(_, &xk)| xk > 0.0)
        .map(|(k, &xk)| per_species(k).map(|atoms| xk * atoms))
        .sum()
}

/// Mole fractions of the mixture with equivalence ratio `phi` of `fuel` in `oxidizer`.
///
/// `phi = 0` gives the pure oxidizer and `phi = ∞` the pure fuel.
///
/// # Errors
///
/// Returns [`EquilibrationError::InvalidInput`] if `phi` is negative or NaN, a species is not
/// part of the phase, the fuel has no net oxygen demand, or the oxidizer has no net surplus.
pub fn equivalence_ratio_mixture<E: ThermoEngine + ?Sized>(
    engine: &E,
    phi: f64,
    fuel: &Composition,
    oxidizer: &Composition,
) -> Result<Vec<f64>, EquilibrationError> {
    if phi.is_nan() || phi < 0.0 {
        return Err(EquilibrationError::InvalidInput(format!(
            "Equivalence ratio must be non-negative, got {phi}."
        )));
    }

    let x_fuel = fuel.to_mole_fractions(engine)?;
    let x_oxidizer = oxidizer.to_mole_fractions(engine)?;

    let fuel_need = oxygen_demand(engine, &x_fuel)? - oxygen_present(engine, &x_fuel)?;
    let oxidizer_surplus =
        oxygen_present(engine, &x_oxidizer)? - oxygen_demand(engine, &x_oxidizer)?;

    if fuel_need <= 0.0 {
        return Err(EquilibrationError::InvalidInput(
            "Fuel mixture has insufficient fuel to react with oxygen.".to_string(),
        ));
    }
    if oxidizer_surplus <= 0.0 {
        return Err(EquilibrationError::InvalidInput(
            "Oxidizer mixture has insufficient oxygen.".to_string(),
        ));
    }

    if phi.is_infinite() {
        return Ok(x_fuel);
    }

    let fuel_moles = phi * oxidizer_surplus / fuel_need;
    let total = fuel_moles + 1.0;

    Ok(x_fuel
        .iter()
        .zip(&x_oxidizer)
        .map(|(xf, xo)| (fuel_moles * xf + xo) / total)
        .collect())
}
