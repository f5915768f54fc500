pub mod count;
pub mod init;
pub mod optimize;

use std::path::Path;

use anyhow::Context;
use fairap_core::{Scenario, ScenarioConfig};
use fairap_metrics::MeasurementCollector;

/// Read a scenario file, normalize it, and fold any recorded samples into
/// the AP baselines.
pub(crate) fn load_scenario(path: &str) -> anyhow::Result<(ScenarioConfig, Scenario)> {
    let config = ScenarioConfig::from_file(Path::new(path))
        .with_context(|| format!("failed to load scenario {path}"))?;
    let mut scenario = config.scenario()?;

    let mut collector = MeasurementCollector::new(scenario.access_points.len());
    collector.extend(config.measurement_samples())?;
    collector.fold_into(&mut scenario.access_points)?;

    Ok((config, scenario))
}
