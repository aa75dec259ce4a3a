use evalexpr::{eval_with_context, ContextWithMutableVariables, HashMapContext, Value};
use std::collections::HashMap;

use crate::config::Config;
use crate::vessel::{VesselInputs, VesselRating};

/// Identifiers every expression context is seeded with, in addition to the
/// user-declared parameters and variables.
pub const CONTEXT_NAMES: &[&str] = &[
    "external_pressure",
    "internal_pressure",
    "outer_diameter",
    "inner_diameter",
    "yield_stress",
    "derated_yield_stress",
    "load_is_external",
    "margin_factor",
    "max_stress",
    "average_stress",
    "safety_factor_room",
    "safety_factor_derated",
    "max_external_room",
    "max_internal_room",
    "max_external_derated",
    "max_internal_derated",
];

/// Evaluates the configured report-quantity expressions against the rated
/// vessel, in the declared order so later variables can reference earlier
/// ones.
pub fn evaluate_report_quantities(
    config: &Config,
    inputs: &VesselInputs,
    rating: &VesselRating,
) -> Result<HashMap<String, f64>, String> {
    let mut context = HashMapContext::new();

    let seeds = [
        ("external_pressure", inputs.external_pressure),
        ("internal_pressure", inputs.internal_pressure),
        ("outer_diameter", inputs.outer_diameter),
        ("inner_diameter", inputs.inner_diameter),
        ("yield_stress", inputs.yield_stress),
        ("derated_yield_stress", inputs.derated_yield_stress),
        ("margin_factor", rating.margin_factor),
        ("max_stress", rating.max_stress),
        ("average_stress", rating.average_stress),
        ("safety_factor_room", rating.safety_factor_room),
        ("safety_factor_derated", rating.safety_factor_derated),
        ("max_external_room", rating.max_external_room),
        ("max_internal_room", rating.max_internal_room),
        ("max_external_derated", rating.max_external_derated),
        ("max_internal_derated", rating.max_internal_derated),
    ];
    for (name, value) in seeds {
        if context
            .set_value(name.to_string(), Value::Float(value))
            .is_err()
        {
            return Err(format!("Failed to seed '{}' into context", name));
        }
    }
    if context
        .set_value(
            "load_is_external".to_string(),
            Value::Boolean(rating.load_is_external),
        )
        .is_err()
    {
        return Err(String::from("Failed to seed 'load_is_external' into context"));
    }

    // Insert parameters into context
    for (key, value) in &config.parameters {
        if context.set_value(key.clone(), (*value).into()).is_err() {
            return Err(format!("Failed to insert parameter '{}' into context", key));
        }
    }

    let mut results = HashMap::new();

    // Evaluate expressions based on the specified order
    for key in &config.expressions.order {
        let expression = config
            .variables
            .get(key)
            .ok_or_else(|| format!("No expression found for '{}'", key))?;
        match eval_with_context(expression, &context) {
            Ok(value) => {
                let number = match value {
                    Value::Float(number) => number,
                    Value::Int(number) => number as f64,
                    other => {
                        return Err(format!(
                            "Expression '{}' for key '{}' is not numeric, got {:?}",
                            expression, key, other
                        ))
                    }
                };
                context
                    .set_value(key.clone(), Value::Float(number))
                    .map_err(|e| format!("Failed to update context for key '{}': {}", key, e))?;
                results.insert(key.clone(), number);
            }
            Err(e) => {
                return Err(format!(
                    "Failed to evaluate expression '{}' for key '{}': {}",
                    expression, key, e
                ));
            }
        }
    }

    Ok(results)
}
