use crate::models::{GroupsConfig, UserConfig};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, Environment, File, FileFormat};
use indexmap::IndexMap;
use std::fs;

/// Prefix of environment variables that override user settings
/// (`GLOBSCOPE_SEARCH_SETTINGS__SEARCH_TIMEOUT=5`)
pub const ENV_PREFIX: &str = "GLOBSCOPE";

/// Configuration manager for loading and saving YAML configuration files.
///
/// Manages two configuration files:
/// - Groups config (`Globscope Groups.yaml`): named glob groups and their patterns
/// - User config (`Globscope Settings.yaml`): search settings and ignore lists,
///   overridable from the environment
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    groups_config_path: Utf8PathBuf,
    user_config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// The directory is created when it does not exist yet.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            groups_config_path: config_dir.join("Globscope Groups.yaml"),
            user_config_path: config_dir.join("Globscope Settings.yaml"),
            config_dir,
        })
    }

    /// Load the glob group definitions.
    ///
    /// # Returns
    /// The loaded GroupsConfig, or the built-in groups if the file doesn't exist
    pub fn load_groups_config(&self) -> Result<GroupsConfig> {
        if !self.groups_config_path.exists() {
            tracing::warn!(
                "Groups config file not found at {}, using defaults",
                self.groups_config_path
            );
            return Ok(Self::default_groups_config());
        }

        let file_contents = fs::read_to_string(&self.groups_config_path).with_context(|| {
            format!("Failed to read groups config: {}", self.groups_config_path)
        })?;

        let config: GroupsConfig = serde_yaml_ng::from_str(&file_contents).with_context(|| {
            format!("Failed to parse groups config: {}", self.groups_config_path)
        })?;

        tracing::info!(
            "Loaded {} glob groups from {}",
            config.glob_groups.len(),
            self.groups_config_path
        );
        Ok(config)
    }

    pub fn save_groups_config(&self, config: &GroupsConfig) -> Result<()> {
        let yaml_string = serde_yaml_ng::to_string(config)
            .context("Failed to serialize groups config to YAML")?;

        fs::write(&self.groups_config_path, yaml_string).with_context(|| {
            format!("Failed to write groups config: {}", self.groups_config_path)
        })?;

        tracing::info!("Saved groups config to {}", self.groups_config_path);
        Ok(())
    }

    /// Load the user configuration.
    ///
    /// The settings file is optional; environment variables prefixed with
    /// [`ENV_PREFIX`] are layered on top of it, `__` separating nested keys.
    pub fn load_user_config(&self) -> Result<UserConfig> {
        if !self.user_config_path.exists() {
            tracing::warn!(
                "User config file not found at {}, using defaults",
                self.user_config_path
            );
        }

        let settings = Config::builder()
            .add_source(
                File::from(self.user_config_path.as_std_path())
                    .format(FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read user config: {}", self.user_config_path))?;

        let config: UserConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse user config: {}", self.user_config_path))?;

        tracing::info!("Loaded user config from {}", self.user_config_path);
        Ok(config)
    }

    pub fn save_user_config(&self, config: &UserConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize user config to YAML")?;

        fs::write(&self.user_config_path, yaml_string)
            .with_context(|| format!("Failed to write user config: {}", self.user_config_path))?;

        tracing::info!("Saved user config to {}", self.user_config_path);
        Ok(())
    }

    /// Built-in glob groups used when no groups file exists
    pub fn default_groups_config() -> GroupsConfig {
        let mut glob_groups = IndexMap::new();

        let mut group = |id: &str, patterns: &[&str]| {
            glob_groups.insert(
                id.to_string(),
                patterns.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
            );
        };

        group("_c_pp", &["*.h", "*.c", "*.cc", "*.cpp", "*.hpp", "*.cxx"]);
        group("_r_ust", &["*.rs"]);
        group("_p_ython", &["*.py", "*.pyi"]);
        group("_w_eb", &["*.js", "*.ts", "*.jsx", "*.tsx", "*.css", "*.html"]);
        group("_d_ocs", &["*.md", "*.rst", "*.txt"]);
        group("_t_ests", &["*test*", "*spec*"]);
        group("_b_uild", &["Makefile", "CMakeLists.txt", "*.cmake", "Cargo.toml", "*.mk"]);

        GroupsConfig { glob_groups }
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn groups_config_path(&self) -> &Utf8Path {
        &self.groups_config_path
    }

    pub fn user_config_path(&self) -> &Utf8Path {
        &self.user_config_path
    }
}
