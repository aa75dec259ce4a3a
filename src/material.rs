//! A module for material properties for a pressure vessel rating application.

use anyhow::{anyhow, Result};
use serde::Deserialize;

/// Represents the material allowables used in a vessel rating.
///
/// Holds the yield strength at room temperature and at the elevated
/// reference temperature the rating is derated to. Both values share the
/// stress unit of the calculated outputs.
#[derive(Debug, Deserialize)]
pub struct Material {
    /// Name of the material.
    pub name: String,
    /// Yield stress at room temperature.
    pub yield_stress: f64,
    /// Yield stress at the elevated reference temperature.
    pub derated_yield_stress: f64,
}

impl Material {
    /// Validates the `Material` struct to ensure the allowables are defined
    /// correctly.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if all properties are valid and within their
    /// expected ranges. Otherwise, it returns an error detailing the issue.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(anyhow!("name must not be empty, got {}", self.name));
        }
        if self.yield_stress < 0.0 {
            return Err(anyhow!(
                "yield_stress must be greater than 0.0, got {}",
                self.yield_stress
            ));
        }
        if self.derated_yield_stress < 0.0 {
            return Err(anyhow!(
                "derated_yield_stress must be greater than 0.0, got {}",
                self.derated_yield_stress
            ));
        }
        Ok(())
    }
}
