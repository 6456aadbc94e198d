use reflecto::*;

use core::iter;
pub use rand;

/// Half the side of the square box every random point lies in.
pub const SCENE_HALF_WIDTH: Float = 300.;

const COLORS: [&str; 6] = ["red", "green", "blue", "yellow", "magenta", "cyan"];

pub trait Random: Sized {
    /// Generate a randomized value of this type using the provided `rng`
    ///
    /// This method must not fail. If creating a value is faillible, keep trying until success
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self;
}

impl Random for MirrorSegment {
    /// Mirrors are mostly vertical or horizontal (the collision test is
    /// tuned for these) with the occasional diagonal one.
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        loop {
            let start = rand_point(rng, SCENE_HALF_WIDTH);
            let len = rng.gen_range(20.0..SCENE_HALF_WIDTH);

            let end = match rng.gen_range(0usize..5) {
                // drawn upwards, or leftwards, so that containment checks apply
                0 | 1 => start + Point::new(0., len),
                2 | 3 => start - Point::new(len, 0.),
                4 => start + rand_point(rng, len),
                _ => unreachable!(),
            };

            if let Ok(mirror) = Self::try_new(start, end) {
                break mirror;
            }
        }
    }
}

impl Random for RaySource {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        let color = COLORS[rng.gen_range(0..COLORS.len())];
        Self::new(rand_point(rng, SCENE_HALF_WIDTH / 2.), color)
    }
}

impl Random for AngleRange {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        let start = rng.gen_range(0i64..360);
        let step = rng.gen_range(5i64..=45);
        let count = rng.gen_range(1i64..=8);
        // `step` is never zero
        Self::try_new(start, start + step * count, step).unwrap_or(Self::single(start))
    }
}

pub fn rand_vec<T: Random>(rng: &mut (impl rand::Rng + ?Sized), n: usize) -> Vec<T> {
    iter::repeat_with(|| T::random(rng)).take(n).collect()
}

pub fn random_config(
    rng: &mut (impl rand::Rng + ?Sized),
    num_mirrors: usize,
    num_sources: usize,
    iterations: usize,
) -> SimulationConfig {
    SimulationConfig::new(
        rand_vec(rng, num_mirrors),
        rand_vec(rng, num_sources),
        AngleRange::random(rng),
        iterations,
    )
}

pub fn rand_point(rng: &mut (impl rand::Rng + ?Sized), max_coord_mag: Float) -> Point {
    // the rng generates floats in 0.0..1.0, scale and translate the range accordingly
    Point::from_fn(|_, _| (rng.gen::<Float>() - 0.5) * (max_coord_mag.abs() * 2.0))
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn points_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = rand_point(&mut rng, 10.);
            assert!(p.x.abs() <= 10. && p.y.abs() <= 10.);
        }
    }

    #[test]
    fn random_mirrors() {
        let mut rng = StdRng::seed_from_u64(7);
        for m in rand_vec::<MirrorSegment>(&mut rng, 500) {
            assert_ne!(m.start(), m.end());
        }
    }

    #[test]
    fn random_angles() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let a = AngleRange::random(&mut rng);
            assert!((1..=8).contains(&a.len()));
            assert_ne!(a.step(), 0);
        }
    }

    #[test]
    fn random_scene() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = random_config(&mut rng, 12, 3, 100);
        assert_eq!(config.mirrors.len(), 12);
        assert_eq!(config.sources.len(), 3);
        assert_eq!(config.iterations, 100);
        assert!(config.sources.iter().all(|s| COLORS.contains(&s.color.as_str())));

        let rays = Simulation::new(config.clone()).unwrap().run_to_end();
        assert_eq!(rays.len(), config.spawn_rays().len());
    }

    #[test]
    fn seeded_scenes_are_reproducible() {
        let a = random_config(&mut StdRng::seed_from_u64(99), 5, 2, 10);
        let b = random_config(&mut StdRng::seed_from_u64(99), 5, 2, 10);
        assert_eq!(a, b);
    }
}
