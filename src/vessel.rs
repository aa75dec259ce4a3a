//! Rating model for a cylindrical pressure vessel under independent
//! internal and external pressure.

use std::fmt;

use serde::Serialize;

use crate::stress::SurfaceStress;

/// Allowable fraction of yield stress for the average-stress check when the
/// net load is external (collapse-governed).
pub const EXTERNAL_MARGIN_FACTOR: f64 = 0.80;
/// Allowable fraction of yield stress for the average-stress check when the
/// net load is internal (burst-governed).
pub const INTERNAL_MARGIN_FACTOR: f64 = 2.0 / 3.0;

/// Degenerate shell geometry: the outer diameter does not exceed the inner
/// diameter, leaving a zero or negative wall thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidGeometry {
    pub outer_diameter: f64,
    pub inner_diameter: f64,
}

impl fmt::Display for InvalidGeometry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "outer diameter must be greater than inner diameter, got OD {} and ID {}",
            self.outer_diameter, self.inner_diameter
        )
    }
}

impl std::error::Error for InvalidGeometry {}

/// Design parameters of the vessel.
///
/// Pressures share one unit, diameters one length unit, and the yield
/// stresses the unit of the stress outputs; the caller keeps them
/// consistent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VesselInputs {
    pub external_pressure: f64,
    pub internal_pressure: f64,
    pub outer_diameter: f64,
    pub inner_diameter: f64,
    pub yield_stress: f64,
    pub derated_yield_stress: f64,
}

/// Everything derived from one set of inputs, computed as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VesselRating {
    /// True iff the net pressure load is external.
    pub load_is_external: bool,
    /// Allowable fraction of yield stress for the average-stress check.
    pub margin_factor: f64,
    /// Larger of the two surface von Mises stresses.
    pub max_stress: f64,
    /// Mean of the two surface von Mises stresses.
    pub average_stress: f64,
    pub safety_factor_room: f64,
    pub safety_factor_derated: f64,
    pub max_external_room: f64,
    pub max_internal_room: f64,
    pub max_external_derated: f64,
    pub max_internal_derated: f64,
}

/// Sparse parameter overrides: `None` keeps the current value, `Some` sets
/// it (including `Some(0.0)`).
#[derive(Debug, Clone, Copy, Default)]
pub struct VesselUpdate {
    pub external_pressure: Option<f64>,
    pub internal_pressure: Option<f64>,
    pub outer_diameter: Option<f64>,
    pub inner_diameter: Option<f64>,
    pub yield_stress: Option<f64>,
    pub derated_yield_stress: Option<f64>,
}

/// Ratio of the allowable to the calculated value. A zero calculated value
/// means there is no load to fail under, so the factor is unbounded rather
/// than an error.
pub fn safety_factor(value: f64, allowable: f64) -> f64 {
    if value == 0.0 {
        f64::INFINITY
    } else {
        allowable / value
    }
}

/// Rate the vessel described by `inputs`.
///
/// Evaluates the surface stresses, the governing safety factor at the room
/// and derated temperature conditions, and the differential-pressure
/// ratings. Fails with [`InvalidGeometry`] before producing any derived
/// value when `outer_diameter <= inner_diameter`.
pub fn rate(inputs: &VesselInputs) -> Result<VesselRating, InvalidGeometry> {
    if inputs.outer_diameter <= inputs.inner_diameter {
        return Err(InvalidGeometry {
            outer_diameter: inputs.outer_diameter,
            inner_diameter: inputs.inner_diameter,
        });
    }

    let inner = SurfaceStress::at_inner_surface(
        inputs.external_pressure,
        inputs.internal_pressure,
        inputs.outer_diameter,
        inputs.inner_diameter,
    );
    let outer = SurfaceStress::at_outer_surface(
        inputs.external_pressure,
        inputs.internal_pressure,
        inputs.outer_diameter,
        inputs.inner_diameter,
    );
    let vm_inner = inner.von_mises();
    let vm_outer = outer.von_mises();
    let max_stress = vm_inner.max(vm_outer);
    let average_stress = (vm_inner + vm_outer) / 2.0;

    // Equal pressures count as internal loading, the comparison is strict.
    let load_is_external = inputs.external_pressure > inputs.internal_pressure;
    let margin_factor = if load_is_external {
        EXTERNAL_MARGIN_FACTOR
    } else {
        INTERNAL_MARGIN_FACTOR
    };

    // Governing minimum of the peak-stress check against full yield and the
    // membrane-stress check against the derated yield.
    let safety_factor_room = safety_factor(max_stress, inputs.yield_stress)
        .min(safety_factor(average_stress, inputs.yield_stress * margin_factor));
    let safety_factor_derated = safety_factor(max_stress, inputs.derated_yield_stress).min(
        safety_factor(average_stress, inputs.derated_yield_stress * margin_factor),
    );

    // Rating = safety factor times the current differential pressure; burst
    // and collapse share the scalar. A zero differential carries the
    // unbounded safety factor through instead of producing inf * 0.
    let differential = (inputs.external_pressure - inputs.internal_pressure).abs();
    let (max_room, max_derated) = if differential == 0.0 {
        (f64::INFINITY, f64::INFINITY)
    } else {
        (
            safety_factor_room * differential,
            safety_factor_derated * differential,
        )
    };

    Ok(VesselRating {
        load_is_external,
        margin_factor,
        max_stress,
        average_stress,
        safety_factor_room,
        safety_factor_derated,
        max_external_room: max_room,
        max_internal_room: max_room,
        max_external_derated: max_derated,
        max_internal_derated: max_derated,
    })
}

/// A vessel together with its current rating.
///
/// All mutation goes through [`Vessel::update`], which re-rates before
/// returning, so the rating a reader sees always reflects the current input
/// set.
#[derive(Debug, Clone, PartialEq)]
pub struct Vessel {
    inputs: VesselInputs,
    rating: VesselRating,
}

impl Vessel {
    pub fn new(inputs: VesselInputs) -> Result<Vessel, InvalidGeometry> {
        let rating = rate(&inputs)?;
        Ok(Vessel { inputs, rating })
    }

    /// Apply the overrides and re-rate. On invalid geometry the model keeps
    /// its previous inputs and rating.
    pub fn update(&mut self, update: VesselUpdate) -> Result<(), InvalidGeometry> {
        let mut next = self.inputs;
        if let Some(value) = update.external_pressure {
            next.external_pressure = value;
        }
        if let Some(value) = update.internal_pressure {
            next.internal_pressure = value;
        }
        if let Some(value) = update.outer_diameter {
            next.outer_diameter = value;
        }
        if let Some(value) = update.inner_diameter {
            next.inner_diameter = value;
        }
        if let Some(value) = update.yield_stress {
            next.yield_stress = value;
        }
        if let Some(value) = update.derated_yield_stress {
            next.derated_yield_stress = value;
        }

        let rating = rate(&next)?;
        self.inputs = next;
        self.rating = rating;
        Ok(())
    }

    pub fn inputs(&self) -> &VesselInputs {
        &self.inputs
    }

    pub fn rating(&self) -> &VesselRating {
        &self.rating
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_inputs() -> VesselInputs {
        VesselInputs {
            external_pressure: 15.0,
            internal_pressure: 0.0,
            outer_diameter: 1.695,
            inner_diameter: 1.460,
            yield_stress: 120.0,
            derated_yield_stress: 116.0,
        }
    }

    #[test]
    fn test_reference_rating() {
        let rating = rate(&reference_inputs()).unwrap();
        assert!(rating.load_is_external);
        assert_relative_eq!(rating.margin_factor, 0.80, epsilon = 1e-12);
        assert_relative_eq!(rating.max_stress, 100.6756, epsilon = 1e-3);
        assert_relative_eq!(rating.average_stress, 87.6852, epsilon = 1e-3);
        assert_relative_eq!(rating.safety_factor_room, 1.09483, epsilon = 1e-4);
        assert_relative_eq!(rating.safety_factor_derated, 1.05833, epsilon = 1e-4);
        assert_relative_eq!(
            rating.max_external_room,
            15.0 * rating.safety_factor_room,
            epsilon = 1e-9
        );
        assert_eq!(rating.max_external_room, rating.max_internal_room);
        assert_eq!(rating.max_external_derated, rating.max_internal_derated);
    }

    #[test]
    fn test_rating_is_deterministic() {
        let first = rate(&reference_inputs()).unwrap();
        let second = rate(&reference_inputs()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_pressures_give_unbounded_safety_factor() {
        let inputs = VesselInputs {
            external_pressure: 0.0,
            internal_pressure: 0.0,
            outer_diameter: 2.0,
            inner_diameter: 1.0,
            yield_stress: 120.0,
            derated_yield_stress: 116.0,
        };
        let rating = rate(&inputs).unwrap();
        assert_eq!(rating.max_stress, 0.0);
        assert_eq!(rating.average_stress, 0.0);
        assert!(rating.safety_factor_room.is_infinite());
        assert!(rating.safety_factor_derated.is_infinite());
        assert!(rating.max_internal_room.is_infinite());
        assert!(rating.max_external_derated.is_infinite());
    }

    #[test]
    fn test_equal_pressures_use_the_internal_margin() {
        // OD 3, ID 1 keeps the hydrostatic cancellation exact
        let inputs = VesselInputs {
            external_pressure: 8.0,
            internal_pressure: 8.0,
            outer_diameter: 3.0,
            inner_diameter: 1.0,
            yield_stress: 120.0,
            derated_yield_stress: 116.0,
        };
        let rating = rate(&inputs).unwrap();
        assert_eq!(rating.max_stress, 0.0);
        assert!(rating.safety_factor_room.is_infinite());
        assert!(!rating.load_is_external);
        assert_relative_eq!(rating.margin_factor, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_margin_factor_flips_with_load_direction() {
        let mut inputs = reference_inputs();
        let external = rate(&inputs).unwrap();
        assert!(external.load_is_external);
        assert_relative_eq!(external.margin_factor, 0.80, epsilon = 1e-12);

        inputs.external_pressure = 0.0;
        inputs.internal_pressure = 15.0;
        let internal = rate(&inputs).unwrap();
        assert!(!internal.load_is_external);
        assert_relative_eq!(internal.margin_factor, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sparse_update_keeps_unspecified_inputs() {
        let mut vessel = Vessel::new(reference_inputs()).unwrap();
        let before = *vessel.rating();
        vessel
            .update(VesselUpdate {
                outer_diameter: Some(1.8),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(vessel.inputs().outer_diameter, 1.8);
        assert_eq!(vessel.inputs().inner_diameter, 1.460);
        assert_eq!(vessel.inputs().external_pressure, 15.0);
        assert_eq!(vessel.inputs().yield_stress, 120.0);
        // A thicker wall must lower the peak stress, and the whole rating
        // must be refreshed.
        assert!(vessel.rating().max_stress < before.max_stress);
        assert!(vessel.rating().safety_factor_room > before.safety_factor_room);
    }

    #[test]
    fn test_zero_is_a_real_override() {
        let mut vessel = Vessel::new(reference_inputs()).unwrap();
        vessel
            .update(VesselUpdate {
                external_pressure: Some(0.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(vessel.inputs().external_pressure, 0.0);
        assert!(!vessel.rating().load_is_external);
    }

    #[test]
    fn test_invalid_geometry_is_rejected() {
        let mut inputs = reference_inputs();
        inputs.outer_diameter = 1.460;
        assert!(rate(&inputs).is_err());
        inputs.outer_diameter = 0.5;
        let err = rate(&inputs).unwrap_err();
        assert_eq!(
            err,
            InvalidGeometry {
                outer_diameter: 0.5,
                inner_diameter: 1.460,
            }
        );
    }

    #[test]
    fn test_failed_update_leaves_model_unchanged() {
        let mut vessel = Vessel::new(reference_inputs()).unwrap();
        let before = vessel.clone();
        let result = vessel.update(VesselUpdate {
            outer_diameter: Some(1.0),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(vessel, before);
    }

    #[test]
    fn test_noop_update_is_idempotent() {
        let mut vessel = Vessel::new(reference_inputs()).unwrap();
        let before = vessel.clone();
        let current = *vessel.inputs();
        vessel
            .update(VesselUpdate {
                external_pressure: Some(current.external_pressure),
                internal_pressure: Some(current.internal_pressure),
                outer_diameter: Some(current.outer_diameter),
                inner_diameter: Some(current.inner_diameter),
                yield_stress: Some(current.yield_stress),
                derated_yield_stress: Some(current.derated_yield_stress),
            })
            .unwrap();
        assert_eq!(vessel, before);
    }

    #[test]
    fn test_max_stress_grows_with_internal_pressure() {
        let mut previous = 0.0;
        for pressure in [20.0, 40.0, 60.0, 80.0] {
            let inputs = VesselInputs {
                external_pressure: 0.0,
                internal_pressure: pressure,
                outer_diameter: 1.695,
                inner_diameter: 1.460,
                yield_stress: 120.0,
                derated_yield_stress: 116.0,
            };
            let rating = rate(&inputs).unwrap();
            assert!(rating.max_stress >= previous);
            previous = rating.max_stress;
        }
    }

    #[test]
    fn test_safety_factor_handles_zero_stress() {
        assert!(safety_factor(0.0, 120.0).is_infinite());
        assert_relative_eq!(safety_factor(60.0, 120.0), 2.0, epsilon = 1e-12);
    }
}
