use alloc::{boxed::Box, vec::Vec};

use crate::{MirrorSegment, Ray, RunOutcome};

/// Anything that wants to see the simulation unfold: renderers, recorders, progress bars...
///
/// All methods do nothing by default.
///
/// Observers only ever see rays between ticks, never during one.
#[impl_trait_for_tuples::impl_for_tuples(16)]
pub trait TickObserver {
    /// Called once, before the first tick, with the (immutable) mirrors, and the rays as spawned.
    fn begin(&mut self, _mirrors: &[MirrorSegment], _rays: &[Ray]) {}

    /// Called after every tick, `tick` starts at `1`.
    fn on_tick(&mut self, _tick: usize, _rays: &[Ray]) {}

    /// Called once, after the last tick, or after the run was interrupted.
    fn finish(&mut self, _rays: &[Ray], _outcome: &RunOutcome) {}
}

impl<T: TickObserver> TickObserver for [T] {
    fn begin(&mut self, mirrors: &[MirrorSegment], rays: &[Ray]) {
        self.iter_mut().for_each(|o| o.begin(mirrors, rays));
    }

    fn on_tick(&mut self, tick: usize, rays: &[Ray]) {
        self.iter_mut().for_each(|o| o.on_tick(tick, rays));
    }

    fn finish(&mut self, rays: &[Ray], outcome: &RunOutcome) {
        self.iter_mut().for_each(|o| o.finish(rays, outcome));
    }
}

impl<T: TickObserver> TickObserver for Vec<T> {
    fn begin(&mut self, mirrors: &[MirrorSegment], rays: &[Ray]) {
        self.as_mut_slice().begin(mirrors, rays);
    }

    fn on_tick(&mut self, tick: usize, rays: &[Ray]) {
        self.as_mut_slice().on_tick(tick, rays);
    }

    fn finish(&mut self, rays: &[Ray], outcome: &RunOutcome) {
        self.as_mut_slice().finish(rays, outcome);
    }
}

// These all go through `DerefMut`, but a blanket impl over it would prevent downstream impls.

impl<T: TickObserver + ?Sized> TickObserver for Box<T> {
    fn begin(&mut self, mirrors: &[MirrorSegment], rays: &[Ray]) {
        self.as_mut().begin(mirrors, rays);
    }

    fn on_tick(&mut self, tick: usize, rays: &[Ray]) {
        self.as_mut().on_tick(tick, rays);
    }

    fn finish(&mut self, rays: &[Ray], outcome: &RunOutcome) {
        self.as_mut().finish(rays, outcome);
    }
}

impl<T: TickObserver + ?Sized> TickObserver for &mut T {
    fn begin(&mut self, mirrors: &[MirrorSegment], rays: &[Ray]) {
        (**self).begin(mirrors, rays);
    }

    fn on_tick(&mut self, tick: usize, rays: &[Ray]) {
        (**self).on_tick(tick, rays);
    }

    fn finish(&mut self, rays: &[Ray], outcome: &RunOutcome) {
        (**self).finish(rays, outcome);
    }
}

/// Keeps a copy of the rays after every tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    pub frames: Vec<Vec<Ray>>,
}

impl TickObserver for History {
    fn begin(&mut self, _mirrors: &[MirrorSegment], rays: &[Ray]) {
        self.frames.clear();
        self.frames.push(rays.to_vec());
    }

    fn on_tick(&mut self, _tick: usize, rays: &[Ray]) {
        self.frames.push(rays.to_vec());
    }
}

/// Calls the wrapped closure after every tick.
pub struct OnTick<F>(pub F);

impl<F: FnMut(usize, &[Ray])> TickObserver for OnTick<F> {
    fn on_tick(&mut self, tick: usize, rays: &[Ray]) {
        (self.0)(tick, rays)
    }
}
