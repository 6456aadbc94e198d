use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{
    stepper::{self, StepParams},
    AngleRange, MirrorSegment, Ray, RaySource, SimResult, TickObserver,
};

/// Everything needed to set up a [`Simulation`].
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub mirrors: Vec<MirrorSegment>,
    pub sources: Vec<RaySource>,
    /// Every source emits one ray in each of these headings
    pub angles: AngleRange,
    /// Number of ticks in a full run
    pub iterations: usize,
    pub params: StepParams,
}

impl SimulationConfig {
    /// A config with default [`StepParams`].
    #[must_use]
    pub fn new(
        mirrors: Vec<MirrorSegment>,
        sources: Vec<RaySource>,
        angles: AngleRange,
        iterations: usize,
    ) -> Self {
        Self {
            mirrors,
            sources,
            angles,
            iterations,
            params: StepParams::default(),
        }
    }

    /// One ray per `(angle, source)` pair, angle-major.
    #[must_use]
    pub fn spawn_rays(&self) -> Vec<Ray> {
        self.angles
            .iter()
            .flat_map(|angle| self.sources.iter().map(move |source| source.emit(angle)))
            .collect()
    }
}

/// What happened during [`Simulation::run`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Number of ticks completed during this run
    pub ticks: usize,
    /// Total number of bounces, all rays included
    pub reflections: usize,
    /// Whether the run was stopped before completing all iterations
    pub interrupted: bool,
}

/// A running scene: a set of immutable mirrors, and the rays bouncing between them.
#[derive(Clone, Debug, PartialEq)]
pub struct Simulation {
    mirrors: Vec<MirrorSegment>,
    rays: Vec<Ray>,
    params: StepParams,
    iterations: usize,
    tick: usize,
}

impl Simulation {
    /// Spawns the rays of `config`.
    ///
    /// Fails if `config.params` is [invalid](StepParams::validate).
    pub fn new(config: SimulationConfig) -> SimResult<Self> {
        config.params.validate()?;

        let rays = config.spawn_rays();

        Ok(Self {
            mirrors: config.mirrors,
            rays,
            params: config.params,
            iterations: config.iterations,
            tick: 0,
        })
    }

    /// A simulation of already spawned rays.
    pub fn from_rays(
        mirrors: Vec<MirrorSegment>,
        rays: Vec<Ray>,
        iterations: usize,
        params: StepParams,
    ) -> SimResult<Self> {
        params.validate()?;

        Ok(Self {
            mirrors,
            rays,
            params,
            iterations,
            tick: 0,
        })
    }

    #[inline]
    #[must_use]
    pub fn mirrors(&self) -> &[MirrorSegment] {
        &self.mirrors
    }

    #[inline]
    #[must_use]
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    #[inline]
    #[must_use]
    pub fn into_rays(self) -> Vec<Ray> {
        self.rays
    }

    #[inline]
    #[must_use]
    pub const fn params(&self) -> &StepParams {
        &self.params
    }

    #[inline]
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of ticks done so far.
    #[inline]
    #[must_use]
    pub const fn tick_count(&self) -> usize {
        self.tick
    }

    /// Advance every ray by one tick. Returns the number of bounces that happened.
    pub fn tick(&mut self) -> usize {
        let (mirrors, params) = (self.mirrors.as_slice(), &self.params);

        #[cfg(feature = "rayon")]
        let reflections = self
            .rays
            .par_iter_mut()
            .map(|ray| stepper::step_ray(ray, mirrors, params))
            .sum::<usize>();

        #[cfg(not(feature = "rayon"))]
        let reflections = self
            .rays
            .iter_mut()
            .map(|ray| stepper::step_ray(ray, mirrors, params))
            .sum::<usize>();

        self.tick += 1;
        reflections
    }

    /// Run the remaining ticks, notifying `observer` along the way.
    ///
    /// `stop` is checked before every tick, the run ends early as soon as it is set,
    /// leaving the rays as they were after the last completed tick.
    pub fn run(&mut self, mut observer: impl TickObserver, stop: &AtomicBool) -> RunOutcome {
        log::info!(
            "running {} rays against {} mirrors for {} ticks",
            self.rays.len(),
            self.mirrors.len(),
            self.iterations.saturating_sub(self.tick),
        );

        observer.begin(&self.mirrors, &self.rays);

        let mut outcome = RunOutcome::default();

        while self.tick < self.iterations {
            if stop.load(Ordering::Relaxed) {
                log::warn!("simulation interrupted after {} ticks", self.tick);
                outcome.interrupted = true;
                break;
            }

            outcome.reflections += self.tick();
            outcome.ticks += 1;

            observer.on_tick(self.tick, &self.rays);
        }

        observer.finish(&self.rays, &outcome);

        log::debug!("{outcome:?}");

        outcome
    }

    /// Run all the ticks, without observing or interrupting, and return the final rays.
    #[must_use]
    pub fn run_to_end(mut self) -> Vec<Ray> {
        self.run((), &AtomicBool::new(false));
        self.rays
    }
}
