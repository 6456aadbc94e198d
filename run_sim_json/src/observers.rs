use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use reflecto::{MirrorSegment, Ray, RunOutcome, TickObserver};
use reflecto_json::serialize_rays;

/// Logs how far along the simulation is, every `step_percent` percent.
pub struct ProgressLog {
    total: usize,
    step_percent: usize,
    next_percent: usize,
}

impl ProgressLog {
    pub fn new(total: usize, step_percent: u8) -> Self {
        let step_percent = usize::from(step_percent.clamp(1, 100));
        Self {
            total,
            step_percent,
            next_percent: step_percent,
        }
    }

    fn percent(&self, tick: usize) -> usize {
        if self.total == 0 {
            100
        } else {
            tick * 100 / self.total
        }
    }
}

impl TickObserver for ProgressLog {
    fn on_tick(&mut self, tick: usize, _rays: &[Ray]) {
        let percent = self.percent(tick);
        if percent >= self.next_percent {
            log::info!("simulation in progress... {percent}% ({tick}/{})", self.total);
            // skip the thresholds already passed
            self.next_percent = (percent / self.step_percent + 1) * self.step_percent;
        }
    }

    fn finish(&mut self, rays: &[Ray], outcome: &RunOutcome) {
        if !outcome.interrupted {
            log::info!(
                "simulation completed: {} rays, {} reflections",
                rays.len(),
                outcome.reflections
            );
        }
    }
}

/// Writes the state of every ray after every tick, one JSON object per line.
///
/// IO errors can't be reported from inside the simulation loop: the first
/// one stops the trace, and is handed back by [`Self::finish`].
pub struct TraceWriter<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl TraceWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> io::Result<Self> {
        File::create(path).map(|file| Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TraceWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    fn write_line(&mut self, tick: usize, rays: &[Ray]) {
        if self.error.is_some() {
            return;
        }

        let result = serde_json_line(&mut self.writer, tick, rays);

        if let Err(e) = result {
            log::error!("trace interrupted: {e}");
            self.error = Some(e);
        }
    }

    /// Flushes the trace, and returns the underlying writer, or the first error that happened.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn serde_json_line(writer: &mut impl Write, tick: usize, rays: &[Ray]) -> io::Result<()> {
    reflecto_json::serde_json::to_writer(&mut *writer, &serialize_rays(tick, rays))?;
    writer.write_all(b"\n")
}

impl<W: Write> TickObserver for TraceWriter<W> {
    fn begin(&mut self, _mirrors: &[MirrorSegment], rays: &[Ray]) {
        self.write_line(0, rays);
    }

    fn on_tick(&mut self, tick: usize, rays: &[Ray]) {
        self.write_line(tick, rays);
    }
}
