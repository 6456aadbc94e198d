use std::sync::atomic::AtomicBool;

use reflecto::{AngleRange, MirrorSegment, OnTick, Ray, RaySource, Simulation, SimulationConfig};

fn main() -> Result<(), reflecto::SimError> {
    let mirrors = vec![
        MirrorSegment::try_new([300., -300.], [300., 300.])?,
        MirrorSegment::try_new([300., 300.], [-300., 300.])?,
    ];

    let config = SimulationConfig::new(
        mirrors,
        vec![RaySource::new([0., 0.], "red")],
        AngleRange::try_new(30, 61, 15)?,
        1000,
    );

    let mut sim = Simulation::new(config)?;

    let mut headings: Vec<_> = sim.rays().iter().map(|ray| ray.heading).collect();

    let outcome = sim.run(
        OnTick(|tick: usize, rays: &[Ray]| {
            for (ray, heading) in rays.iter().zip(&mut headings) {
                if ray.heading != *heading {
                    println!("tick {tick}: {heading} -> {}", ray.heading);
                    *heading = ray.heading;
                }
            }
        }),
        &AtomicBool::new(false),
    );

    println!("{outcome:?}");

    for ray in sim.rays() {
        println!("{} ray at {:?}, heading {}", ray.color, ray.position.as_slice(), ray.heading);
    }

    Ok(())
}
