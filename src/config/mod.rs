use crate::models::ReleaseConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name of the persisted release settings
pub const RELEASE_CONFIG_FILE: &str = "release.yaml";

/// Prefix for environment overrides, e.g. `HOTPATCH_RELEASE__VERSION_ID=1.0.2`
pub const ENV_PREFIX: &str = "HOTPATCH_RELEASE";

/// Configuration manager for loading, saving and exporting release configs.
///
/// Settings live in `release.yaml` inside the configuration directory. Exports
/// are JSON documents written under the config's own `save_path`.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    release_config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory holding `release.yaml`; created if missing
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            release_config_path: config_dir.join(RELEASE_CONFIG_FILE),
            config_dir,
        })
    }

    /// Load the release configuration.
    ///
    /// The YAML file is layered with `HOTPATCH_RELEASE__*` environment
    /// variables. A missing file yields the defaults.
    pub fn load_release_config(&self) -> Result<ReleaseConfig> {
        if !self.release_config_path.exists() {
            tracing::warn!(
                "Release config file not found at {}, using defaults",
                self.release_config_path
            );
            return Ok(ReleaseConfig::default());
        }

        let settings = ::config::Config::builder()
            .add_source(
                ::config::File::from(self.release_config_path.as_std_path())
                    .format(::config::FileFormat::Yaml),
            )
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .with_context(|| {
                format!("Failed to read release config: {}", self.release_config_path)
            })?;

        let config: ReleaseConfig = settings.try_deserialize().with_context(|| {
            format!("Failed to parse release config: {}", self.release_config_path)
        })?;

        tracing::info!(
            "Loaded release config from {} (version={})",
            self.release_config_path,
            config.version_id
        );
        Ok(config)
    }

    /// Read a release config from any YAML file, without environment overrides.
    pub fn read_release_config(path: &Utf8Path) -> Result<ReleaseConfig> {
        let file_contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read release config: {}", path))?;

        serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse release config: {}", path))
    }

    /// Save the release configuration as YAML.
    pub fn save_release_config(&self, config: &ReleaseConfig) -> Result<()> {
        let yaml_string = serde_yaml_ng::to_string(config)
            .context("Failed to serialize release config to YAML")?;

        fs::write(&self.release_config_path, yaml_string).with_context(|| {
            format!("Failed to write release config: {}", self.release_config_path)
        })?;

        tracing::info!("Saved release config to {}", self.release_config_path);
        Ok(())
    }

    /// Write the JSON export of `config` if it asks to be saved.
    ///
    /// The document goes to `<save_path>/<version_id>/<version_id>_Release.json`.
    ///
    /// # Returns
    /// The written path, or `None` when `save_release_config` is off
    pub fn export_release_config(config: &ReleaseConfig) -> Result<Option<Utf8PathBuf>> {
        if !config.save_release_config {
            tracing::debug!("save_release_config is off, skipping export");
            return Ok(None);
        }

        let export_dir = config.save_path.join(&config.version_id);
        fs::create_dir_all(&export_dir)
            .with_context(|| format!("Failed to create export directory: {}", export_dir))?;

        let export_path = export_dir.join(format!("{}_Release.json", config.version_id));
        let json = config
            .serialize_to_string()
            .context("Failed to serialize release config to JSON")?;

        fs::write(&export_path, json)
            .with_context(|| format!("Failed to write release export: {}", export_path))?;

        tracing::info!("Exported release config to {}", export_path);
        Ok(Some(export_path))
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn release_config_path(&self) -> &Utf8Path {
        &self.release_config_path
    }
}
