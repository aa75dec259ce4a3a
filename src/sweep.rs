//! Geometry parameter sweep: evaluates the room-temperature safety factor
//! over a grid of inner/outer diameter combinations.

use std::error::Error;
use std::path::Path;

use rayon::prelude::*;
use serde::Deserialize;

use crate::config::ValidationError;
use crate::vessel::{rate, VesselInputs};

fn default_step() -> f64 {
    0.005
}

/// Sweep section of the job configuration.
#[derive(Debug, Deserialize)]
pub struct Sweep {
    pub inner_diameter: Bounds,
    pub outer_diameter: Bounds,
    /// Grid increment shared by both diameter axes.
    #[serde(default = "default_step")]
    pub step: f64,
    /// Output path for the CSV grid.
    pub path: String,
}

/// Inclusive range of one swept diameter.
#[derive(Debug, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    fn validate(&self, field: &str) -> Result<(), ValidationError> {
        if self.min <= 0.0 {
            return Err(ValidationError::new(&format!(
                "{} min must be greater than 0.0, got {}",
                field, self.min
            )));
        }
        if self.max < self.min {
            return Err(ValidationError::new(&format!(
                "{} max must not be less than min, got {} and {}",
                field, self.max, self.min
            )));
        }
        Ok(())
    }
}

impl Sweep {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.inner_diameter.validate("inner_diameter")?;
        self.outer_diameter.validate("outer_diameter")?;
        if self.step <= 0.0 {
            return Err(ValidationError::new(&format!(
                "step must be greater than 0.0, got {}",
                self.step
            )));
        }
        if self.path.trim().is_empty() {
            return Err(ValidationError::new("path must not be empty"));
        }
        Ok(())
    }
}

/// Safety factors over the swept diameter grid.
#[derive(Debug)]
pub struct SweepGrid {
    pub inner_diameters: Vec<f64>,
    pub outer_diameters: Vec<f64>,
    /// Row-major: `safety_factors[row][col]` pairs `outer_diameters[row]`
    /// with `inner_diameters[col]`.
    pub safety_factors: Vec<Vec<f64>>,
}

/// Inclusive grid axis from `min` to `max` in increments of `step`.
pub fn diameter_steps(min: f64, max: f64, step: f64) -> Vec<f64> {
    let count = ((max - min) / step + 1e-9).floor() as usize + 1;
    (0..count).map(|i| min + i as f64 * step).collect()
}

/// Room-temperature safety factor for one diameter pair, with all other
/// parameters taken from `base`. Impossible geometry scores zero so the
/// feasibility boundary shows up in the grid.
pub fn check_diameters(base: &VesselInputs, inner_diameter: f64, outer_diameter: f64) -> f64 {
    if outer_diameter <= inner_diameter {
        return 0.0;
    }
    let inputs = VesselInputs {
        inner_diameter,
        outer_diameter,
        ..*base
    };
    match rate(&inputs) {
        Ok(rating) => rating.safety_factor_room,
        Err(_) => 0.0,
    }
}

/// Evaluate the grid. Every cell rates its own independent input set, so
/// the rows can run in parallel.
pub fn sweep_safety_factors(base: &VesselInputs, sweep: &Sweep) -> SweepGrid {
    let inner_diameters = diameter_steps(
        sweep.inner_diameter.min,
        sweep.inner_diameter.max,
        sweep.step,
    );
    let outer_diameters = diameter_steps(
        sweep.outer_diameter.min,
        sweep.outer_diameter.max,
        sweep.step,
    );
    let safety_factors: Vec<Vec<f64>> = outer_diameters
        .par_iter()
        .map(|&od| {
            inner_diameters
                .iter()
                .map(|&id| check_diameters(base, id, od))
                .collect()
        })
        .collect();
    SweepGrid {
        inner_diameters,
        outer_diameters,
        safety_factors,
    }
}

/// Writes the grid as CSV: a header row of inner diameters, then one row
/// per outer diameter.
pub fn write_csv<P: AsRef<Path>>(grid: &SweepGrid, path: P) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut header = vec![String::from("outer_diameter")];
    header.extend(grid.inner_diameters.iter().map(|id| id.to_string()));
    writer.write_record(&header)?;
    for (od, row) in grid.outer_diameters.iter().zip(grid.safety_factors.iter()) {
        let mut record = vec![od.to_string()];
        record.extend(row.iter().map(|sf| sf.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
