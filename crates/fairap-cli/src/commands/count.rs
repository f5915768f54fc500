use fairap_placement::{Optimizer, section_to_config};

use super::load_scenario;

pub fn count(path: &str) -> anyhow::Result<()> {
    let (raw, feasible) = counts(path)?;
    println!("raw distributions:      {raw}");
    println!("feasible distributions: {feasible}");
    Ok(())
}

fn counts(path: &str) -> anyhow::Result<(u128, usize)> {
    let (config, scenario) = load_scenario(path)?;
    let optimizer = Optimizer::new(
        &scenario.access_points,
        &scenario.terminals,
        section_to_config(config.optimizer.as_ref()),
    );
    Ok((optimizer.search_space()?, optimizer.feasible_count()?))
}
