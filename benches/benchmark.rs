use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::distributions::{Distribution, Uniform};
use vesselcalc::sweep::{sweep_safety_factors, Bounds, Sweep};
use vesselcalc::vessel::{rate, VesselInputs};

fn bench_rating(c: &mut Criterion) {
    c.bench_function("rating over a batch of random load cases", |b| {
        let step = Uniform::new(0.0, 50.0);
        let mut rng = rand::thread_rng();
        let pressures: Vec<f64> = step.sample_iter(&mut rng).take(10000).collect();
        b.iter(|| {
            for &pressure in &pressures {
                let inputs = VesselInputs {
                    external_pressure: pressure,
                    internal_pressure: 0.0,
                    outer_diameter: 1.695,
                    inner_diameter: 1.460,
                    yield_stress: 120.0,
                    derated_yield_stress: 116.0,
                };
                let _ = rate(&black_box(inputs));
            }
        });
    });
}

fn bench_sweep(c: &mut Criterion) {
    c.bench_function("geometry sweep over a diameter grid", |b| {
        let base = VesselInputs {
            external_pressure: 15.0,
            internal_pressure: 0.0,
            outer_diameter: 1.695,
            inner_diameter: 1.460,
            yield_stress: 120.0,
            derated_yield_stress: 116.0,
        };
        let sweep = Sweep {
            inner_diameter: Bounds {
                min: 1.300,
                max: 1.600,
            },
            outer_diameter: Bounds {
                min: 1.500,
                max: 1.900,
            },
            step: 0.005,
            path: String::from("unused.csv"),
        };
        b.iter(|| {
            let grid = sweep_safety_factors(&base, &sweep);
            black_box(grid.safety_factors.len());
        });
    });
}

criterion_group!(benches, bench_rating, bench_sweep);
criterion_main!(benches);
