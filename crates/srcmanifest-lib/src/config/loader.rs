use super::Config;
use crate::error::SrcManifestError;
use config::Config as ConfigBuilder;

pub const ENV_PREFIX: &str = "SRCMANIFEST";

/// Loads configuration from built-in defaults, the optional config file and
/// `SRCMANIFEST_*` environment variables, later sources taking precedence.
pub fn load_config(config_path: Option<&str>) -> Result<Config, SrcManifestError> {
    let mut builder = ConfigBuilder::builder()
        .set_default("manifest", Config::DEFAULT_MANIFEST)?
        .set_default("input_dir", Config::DEFAULT_INPUT_DIR)?
        .set_default("plan", Config::DEFAULT_PLAN)?;

    if let Some(config_path) = config_path {
        tracing::debug!("Loading configuration from {}", config_path);
        builder = builder.add_source(config::File::with_name(config_path));
    }

    let config_builder = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()?;

    config_builder.try_deserialize().map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_without_config_file() {
        let config = load_config(None).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_yaml_config_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("srcmanifest.yaml");
        std::fs::write(&path, "manifest: conf/sources.txt\ninput_dir: /tmp/input\n").unwrap();

        let config = load_config(path.to_str()).unwrap();

        assert_eq!(config.manifest, PathBuf::from("conf/sources.txt"));
        assert_eq!(config.input_dir, PathBuf::from("/tmp/input"));
        assert_eq!(config.plan, PathBuf::from(Config::DEFAULT_PLAN));
    }

    #[test]
    fn test_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("srcmanifest.toml");
        std::fs::write(&path, "plan = \"out/plan.json\"\n").unwrap();

        let config = load_config(path.to_str()).unwrap();

        assert_eq!(config.plan, PathBuf::from("out/plan.json"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("srcmanifest.yaml");
        std::fs::write(&path, "manifest: sources\nretries: 3\n").unwrap();

        let err = load_config(path.to_str()).unwrap_err();

        assert!(matches!(err, SrcManifestError::Config(_)));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        assert!(load_config(path.to_str()).is_err());
    }
}
