//! A module for validating and managing configurations for a vessel rating
//! application.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::material::Material;
use crate::parser::CONTEXT_NAMES;
use crate::sweep::Sweep;

/// Represents an error that can occur during validation of configuration data.
#[derive(Debug)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a given message.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error.
    pub fn new(message: &str) -> ValidationError {
        ValidationError {
            message: message.to_owned(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Represents the configuration for a vessel rating job.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub solution: Solution,
    pub vessel: VesselConfig,
    pub material: Material,
    #[serde(default)]
    pub sweep: Option<Sweep>,
    #[serde(default)]
    pub parameters: HashMap<String, f64>,
    #[serde(default)]
    pub variables: HashMap<String, String>,
    #[serde(default)]
    pub expressions: Expressions,
}

impl Config {
    /// Validates the entire configuration.
    ///
    /// This method checks the validity of each component of the
    /// configuration and ensures all required conditions are met.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.solution.validate()?;
        self.vessel.validate()?;
        self.material
            .validate()
            .map_err(|e| ValidationError::new(&e.to_string()))?;
        if let Some(sweep) = &self.sweep {
            sweep.validate()?;
        }
        self.validate_variables_and_values()?;
        Ok(())
    }

    /// Checks whether an expression references at least one known quantity.
    fn expression_valid(&self, expression: &str, valid_names: &HashSet<String>) -> bool {
        valid_names.iter().any(|name| expression.contains(name))
    }

    /// Validates parameter and variable names and the expressions built
    /// from them.
    ///
    /// Names must be plain identifiers, must not shadow a built-in report
    /// quantity, and every entry in the evaluation order must name a
    /// declared variable.
    fn validate_variables_and_values(&self) -> Result<(), ValidationError> {
        let mut valid_names: HashSet<String> =
            CONTEXT_NAMES.iter().map(|name| name.to_string()).collect();
        let re = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();

        for (key, value) in &self.parameters {
            if !re.is_match(key) {
                return Err(ValidationError::new(&format!(
                    "Invalid parameter name: {}",
                    key
                )));
            }
            if CONTEXT_NAMES.contains(&key.as_str()) {
                return Err(ValidationError::new(&format!(
                    "parameter '{}' shadows a built-in quantity",
                    key
                )));
            }
            if value.is_nan() {
                return Err(ValidationError::new(&format!(
                    "parameter value must be a number, got {}",
                    value
                )));
            }
            valid_names.insert(key.clone());
        }

        for key in self.variables.keys() {
            if !re.is_match(key) {
                return Err(ValidationError::new(&format!(
                    "Invalid variable name: {}",
                    key
                )));
            }
            if CONTEXT_NAMES.contains(&key.as_str()) {
                return Err(ValidationError::new(&format!(
                    "variable '{}' shadows a built-in quantity",
                    key
                )));
            }
            valid_names.insert(key.clone());
        }

        for (name, expression) in &self.variables {
            if expression.trim().is_empty() {
                return Err(ValidationError::new(&format!(
                    "Variable expression is empty for: {}",
                    name
                )));
            }
            if !self.expression_valid(expression, &valid_names) {
                return Err(ValidationError::new(&format!(
                    "Invalid expression for variable '{}': {}",
                    name, expression
                )));
            }
        }

        for key in &self.expressions.order {
            if !self.variables.contains_key(key) {
                return Err(ValidationError::new(&format!(
                    "expression order names unknown variable '{}'",
                    key
                )));
            }
        }
        Ok(())
    }
}

/// Represents the solution configuration for a rating session.
#[derive(Debug, Deserialize)]
pub struct Solution {
    /// Specifies the type of run. Valid values are "RATING" for a vessel
    /// rating and "NONE" for no analysis.
    pub run_type: String,
    /// The desired output format. Valid values are "JSON" and "TEXT".
    pub output: String,
}

impl Solution {
    /// Validates the `Solution` configuration to ensure all specified
    /// settings are valid and consistent with the application's
    /// requirements.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if the solution configuration is valid. If any
    /// setting is invalid, it returns a `ValidationError` with a detailed
    /// explanation.
    ///
    /// # Examples
    ///
    /// ```
    /// use vesselcalc::config::Solution;
    ///
    /// let solution = Solution {
    ///     run_type: String::from("RATING"),
    ///     output: String::from("JSON"),
    /// };
    /// assert!(solution.validate().is_ok());
    ///
    /// let invalid = Solution {
    ///     run_type: String::from("FEA"),
    ///     output: String::from("JSON"),
    /// };
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.run_type.as_str() {
            "RATING" | "NONE" => Ok(()),
            _ => Err(ValidationError::new(&format!(
                "run_type must be RATING or NONE, got {}",
                self.run_type
            ))),
        }?;

        match self.output.as_str() {
            "JSON" | "TEXT" => Ok(()),
            _ => Err(ValidationError::new(&format!(
                "output must be JSON or TEXT, got {}",
                self.output
            ))),
        }?;
        Ok(())
    }
}

/// Vessel geometry and load case for a rating job.
#[derive(Debug, Deserialize)]
pub struct VesselConfig {
    pub external_pressure: f64,
    pub internal_pressure: f64,
    pub outer_diameter: f64,
    pub inner_diameter: f64,
}

impl VesselConfig {
    /// Validates the geometry: a positive bore and a positive wall
    /// thickness.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.inner_diameter <= 0.0 {
            return Err(ValidationError::new(&format!(
                "inner_diameter must be greater than 0.0, got {}",
                self.inner_diameter
            )));
        }
        if self.outer_diameter <= self.inner_diameter {
            return Err(ValidationError::new(&format!(
                "outer_diameter must be greater than inner_diameter, got {} and {}",
                self.outer_diameter, self.inner_diameter
            )));
        }
        Ok(())
    }
}

/// Represents the order in which report-quantity expressions are evaluated.
///
/// Later expressions may reference the results of earlier ones, so the
/// order is part of the configuration rather than derived from the
/// variable map.
#[derive(Debug, Default, Deserialize)]
pub struct Expressions {
    /// A list of variable names indicating the sequence of evaluation.
    pub order: Vec<String>,
}

/// Loads the configuration from a YAML file.
///
/// # Arguments
///
/// * `config_path` - A path reference to the configuration file.
///
/// # Returns
///
/// This function returns a `Result` containing either the loaded `Config`
/// or an error.
///
/// # Errors
///
/// This function will return an error if reading or parsing the
/// configuration file fails.
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<Config, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(config_path)?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}
