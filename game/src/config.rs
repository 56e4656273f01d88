use {crate::player::ActionMap, color_eyre::Report, eyre::WrapErr, std::path::Path};

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: marionette::Config,
    pub game: GameConfig,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub action_map: ActionMap,

    /// Log every mesh matrix after each line of input.
    pub log_meshes: bool,
}

impl Config {
    /// Loads the file named by `MARIONETTE_CONFIG_PATH` or `./cfg.ron`.
    /// Falls back to defaults when there is no such file.
    pub fn load_default() -> Result<Self, Report> {
        let path = marionette::Config::default_path();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }
        Self::load(&path)
    }

    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self, Report> {
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("Failed to open `{}`", path.display()))?;

        let config = ron::de::from_reader(file)
            .wrap_err_with(|| format!("Failed to parse `{}`", path.display()))?;

        Ok(config)
    }
}
