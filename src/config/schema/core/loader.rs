use super::Config;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::Path;

impl Config {
    /// Load `~/.linkcap/config.toml`, writing a default one on first run.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let linkcap_dir = home.join(".linkcap");
        let config_path = linkcap_dir.join("config.toml");

        if !linkcap_dir.exists() {
            fs::create_dir_all(&linkcap_dir).context("Failed to create .linkcap directory")?;
        }

        if config_path.exists() {
            return Self::load_from(&config_path);
        }

        let mut config = Self {
            config_path,
            ..Self::default()
        };
        config.save()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load an explicit config file. Unlike [`Config::load_or_init`] the file
    /// must already exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config =
            toml::from_str(&contents).context("Failed to parse config file")?;
        config.config_path = path.to_path_buf();
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
