use std::path::Path;

use fairap_core::ScenarioConfig;

pub fn init(path: &str, aps: usize, terminals: usize) -> anyhow::Result<()> {
    let output = Path::new(path);
    if output.exists() {
        anyhow::bail!("{} already exists", output.display());
    }

    let config = ScenarioConfig::scaffold(aps, terminals);
    // Reject scaffolds the optimizer would refuse to load.
    config.scenario()?;
    std::fs::write(output, config.to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fairap.toml");

        init(&path.to_string_lossy(), 3, 12).unwrap();

        let config = ScenarioConfig::from_file(&path).unwrap();
        let scenario = config.scenario().unwrap();
        assert_eq!(scenario.access_points.len(), 3);
        assert_eq!(scenario.terminals.len(), 12);
        assert!(scenario.total_capacity() >= 12);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fairap.toml");
        std::fs::write(&path, "keep me").unwrap();

        assert!(init(&path.to_string_lossy(), 3, 12).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn test_init_rejects_zero_aps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fairap.toml");

        assert!(init(&path.to_string_lossy(), 0, 12).is_err());
        assert!(!path.exists());
    }
}
