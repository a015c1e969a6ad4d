//! gol-engine command line entry point
//!
//! Takes the same arguments as the `!gameoflife` chat command, runs one game
//! and prints the result as JSON on stdout.
//!
//! ```text
//! gol-engine seed=42 pixel=20 duration=60 [timeline] [realtime] [params=run.json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gol_engine::SimulationParams;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let timeline = args.iter().any(|a| a == "timeline");
    let realtime = args.iter().any(|a| a == "realtime");

    let params = match args.iter().find_map(|a| a.strip_prefix("params=")) {
        Some(path) => match load_params(path) {
            Ok(params) => params,
            Err(e) => {
                log::error!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => SimulationParams::from_command(&format!("gameoflife {}", args.join(" "))),
    };

    let output = if timeline {
        gol_engine::Timeline::record(&params).and_then(|t| Ok(serde_json::to_string(&t)?))
    } else if realtime {
        run_realtime(&params).and_then(|s| Ok(serde_json::to_string(&s)?))
    } else {
        gol_engine::simulate(&params).and_then(|s| Ok(serde_json::to_string(&s)?))
    };

    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_params(path: &str) -> Result<gol_engine::SimulationParams, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(gol_engine::SimulationParams::from_json(&json)?)
}

#[cfg(not(target_arch = "wasm32"))]
fn run_realtime(
    params: &gol_engine::SimulationParams,
) -> Result<gol_engine::RunSummary, gol_engine::ConfigurationError> {
    use gol_engine::sim::{WallClock, run_to_end};

    let mut run = gol_engine::SimulationRun::from_params(params)?;
    log::info!("Running against wall-clock time, seed {:?}", params.seed);
    let summary = run_to_end(&mut run, &mut WallClock);
    log::info!("Final speed multiplier: {:.3}", run.speed_multiplier());
    Ok(summary)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
