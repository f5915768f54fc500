use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use fairap_placement::{compare, format_report, random_seed, section_to_config};

use super::load_scenario;

pub fn optimize(path: &str, format: &str, seed: Option<u64>, sequential: bool) -> anyhow::Result<()> {
    println!("{}", render(path, format, seed, sequential)?);
    Ok(())
}

fn render(path: &str, format: &str, seed: Option<u64>, sequential: bool) -> anyhow::Result<String> {
    let (config, scenario) = load_scenario(path)?;

    let mut optimizer_config = section_to_config(config.optimizer.as_ref());
    if sequential {
        optimizer_config.parallel = false;
    }
    let mut rng = match random_seed(config.optimizer.as_ref(), seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(
        aps = scenario.access_points.len(),
        terminals = scenario.terminals.len(),
        parallel = optimizer_config.parallel,
        "optimizing scenario"
    );
    let report = compare(
        &scenario.access_points,
        &scenario.terminals,
        optimizer_config,
        &mut rng,
    )?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&report)?),
        _ => Ok(format_report(&report)),
    }
}
