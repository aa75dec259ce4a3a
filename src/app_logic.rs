//! A module for the main application logic for the vessel rating tool
use std::collections::HashMap;
use std::error::Error;

use log::{debug, info};
use serde::Serialize;

use crate::config::load_config;
use crate::parser::evaluate_report_quantities;
use crate::sweep;
use crate::vessel::{Vessel, VesselInputs, VesselRating};

#[derive(Debug, Serialize)]
struct Report<'a> {
    inputs: &'a VesselInputs,
    rating: &'a VesselRating,
    quantities: &'a HashMap<String, f64>,
}

pub fn run(config_path: &str) -> Result<(), Box<dyn Error>> {
    info!("running with configuration {}", config_path);
    let conf = load_config(config_path)?;
    conf.validate()?;
    if conf.solution.run_type == "NONE" {
        info!("run_type is NONE, nothing to do");
        return Ok(());
    }

    let inputs = VesselInputs {
        external_pressure: conf.vessel.external_pressure,
        internal_pressure: conf.vessel.internal_pressure,
        outer_diameter: conf.vessel.outer_diameter,
        inner_diameter: conf.vessel.inner_diameter,
        yield_stress: conf.material.yield_stress,
        derated_yield_stress: conf.material.derated_yield_stress,
    };
    let vessel = Vessel::new(inputs)?;
    debug!("rating: {:?}", vessel.rating());

    print_rating(&vessel);

    let quantities = evaluate_report_quantities(&conf, vessel.inputs(), vessel.rating())?;
    for name in &conf.expressions.order {
        if let Some(value) = quantities.get(name) {
            println!("{}: {:.6}", name, value);
        }
    }

    if conf.solution.output == "JSON" {
        let report = Report {
            inputs: vessel.inputs(),
            rating: vessel.rating(),
            quantities: &quantities,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if let Some(sweep_config) = &conf.sweep {
        let grid = sweep::sweep_safety_factors(vessel.inputs(), sweep_config);
        sweep::write_csv(&grid, &sweep_config.path)?;
        info!(
            "wrote {} x {} sweep grid to {}",
            grid.outer_diameters.len(),
            grid.inner_diameters.len(),
            sweep_config.path
        );
    }

    Ok(())
}

/// Prints the rating table: calculated stresses against their allowables,
/// the pressure ratings, and the governing safety factors.
fn print_rating(vessel: &Vessel) {
    let inputs = vessel.inputs();
    let rating = vessel.rating();
    println!(
        "Average Linear Stress: {:.1} (allowable {:.0} room / {:.0} derated)",
        rating.average_stress,
        inputs.yield_stress * rating.margin_factor,
        inputs.derated_yield_stress * rating.margin_factor
    );
    println!(
        "Maximum Local Stress: {:.1} (allowable {:.0} room / {:.0} derated)",
        rating.max_stress, inputs.yield_stress, inputs.derated_yield_stress
    );
    println!(
        "Internal Pressure for Burst: {:.3} room / {:.3} derated",
        rating.max_internal_room, rating.max_internal_derated
    );
    println!(
        "External Pressure for Collapse: {:.3} room / {:.3} derated",
        rating.max_external_room, rating.max_external_derated
    );
    println!(
        "Minimum Safety Factor: {:.3} room / {:.3} derated",
        rating.safety_factor_room, rating.safety_factor_derated
    );
}
