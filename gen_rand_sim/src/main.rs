use std::{error::Error, fs::File, io::BufWriter, path::PathBuf};

use clap::Parser;
use reflecto_json::{serde_json, JsonSer};
use reflecto_random::{
    rand::{rngs::StdRng, SeedableRng},
    random_config,
};

/// Generate a random scene, readable by `run_sim_json`
#[derive(Parser, Debug)]
#[command(name = "gen_rand_sim")]
struct Args {
    /// Where to write the scene
    path: PathBuf,

    #[arg(short, long, default_value_t = 12)]
    mirrors: usize,

    #[arg(short, long, default_value_t = 4)]
    sources: usize,

    #[arg(short, long, default_value_t = 1000)]
    iterations: usize,

    /// Seed of the random number generator, random if unset
    #[arg(long)]
    seed: Option<u64>,
}

fn generate(args: &Args) -> serde_json::Value {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    random_config(&mut rng, args.mirrors, args.sources, args.iterations).to_json()
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let json = generate(&args);

    serde_json::to_writer_pretty(BufWriter::new(File::create(&args.path)?), &json)?;

    log::info!(
        "wrote a scene with {} mirrors and {} sources to {}",
        args.mirrors,
        args.sources,
        args.path.display()
    );

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use reflecto::SimulationConfig;
    use reflecto_json::JsonDes;

    #[test]
    fn generated_scenes_load_back() {
        let args = Args::parse_from(["gen_rand_sim", "out.json", "-m", "7", "--seed", "3"]);
        let json = generate(&args);
        let config = SimulationConfig::from_json(&json).unwrap();
        assert_eq!(config.mirrors.len(), 7);
        assert_eq!(config.sources.len(), 4);
        assert_eq!(config.iterations, 1000);
        assert_eq!(generate(&args), json);
    }
}
