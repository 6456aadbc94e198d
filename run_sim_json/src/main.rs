//! Runs a scene described in a JSON file, see [`reflecto_json::load_config`] for the format.

mod observers;

use std::{
    error::Error,
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use clap::Parser;
use reflecto::{Ray, RunOutcome, Simulation};
use reflecto_json::{serde_json, serialize_rays, DEFAULT_CONFIG_PATH};

use observers::{ProgressLog, TraceWriter};

#[derive(Parser, Debug)]
#[command(name = "run_sim_json", about = "Ray reflection simulation")]
struct Args {
    /// Path to the scene file
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    scene: PathBuf,

    /// Save the final state of all rays as JSON (defaults to a timestamped file name)
    #[arg(short, long, num_args = 0..=1)]
    output: Option<Option<PathBuf>>,

    /// Record the state of all rays after every tick, as JSON lines
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// Log progress every this many percent
    #[arg(short, long, default_value_t = 10)]
    progress: u8,
}

impl Args {
    fn output_path(&self) -> Option<PathBuf> {
        self.output.as_ref().map(|path| {
            path.clone().unwrap_or_else(|| {
                PathBuf::from(format!("{}.json", chrono::Local::now().format("%Y%m%d-%H%M%S")))
            })
        })
    }
}

fn write_state(path: &Path, tick: usize, rays: &[Ray]) -> Result<(), Box<dyn Error>> {
    let file = File::create(path).map_err(|e| format!("cannot create {}: {e}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &serialize_rays(tick, rays))?;
    log::info!("final state saved to {}", path.display());
    Ok(())
}

fn run(args: &Args, stop: &AtomicBool) -> Result<RunOutcome, Box<dyn Error>> {
    let config = reflecto_json::load_config(&args.scene)?;
    let output = args.output_path();

    let mut sim = Simulation::new(config)?;
    let mut progress = ProgressLog::new(sim.iterations(), args.progress);

    let outcome = match &args.trace {
        Some(path) => {
            let mut trace = TraceWriter::create(path)
                .map_err(|e| format!("cannot create {}: {e}", path.display()))?;

            let outcome = sim.run((&mut progress, &mut trace), stop);

            trace
                .finish()
                .map_err(|e| format!("cannot write trace {}: {e}", path.display()))?;
            log::info!("trace saved to {}", path.display());

            outcome
        }
        None => sim.run(&mut progress, stop),
    };

    if let Some(path) = output {
        write_state(&path, sim.tick_count(), sim.rays())?;
    }

    Ok(outcome)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    ctrlc::set_handler(move || handler_stop.store(true, Ordering::Relaxed))?;

    match run(&args, &stop) {
        Ok(outcome) if outcome.interrupted => {
            log::warn!("simulation interrupted by the user, exiting...");
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("{e}");
            Err(e)
        }
    }
}
