use {
    crate::{humanoid::Dimensions, joint::LimitPolicy},
    color_eyre::Report,
    eyre::WrapErr,
    std::path::{Path, PathBuf},
};

/// Size of a single command step.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Steps {
    /// Distance walked per command, in world units.
    pub translation: f32,

    /// Angle turned per command, in radians.
    pub rotation: f32,
}

impl Default for Steps {
    fn default() -> Self {
        Steps {
            translation: 0.1,
            rotation: 0.1,
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize,
)]
#[serde(default)]
pub struct Config {
    pub dimensions: Dimensions,
    pub steps: Steps,
    pub limit_policy: LimitPolicy,
}

impl Config {
    /// Path from `MARIONETTE_CONFIG_PATH`, `./cfg.ron` otherwise.
    pub fn default_path() -> PathBuf {
        std::env::var("MARIONETTE_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./cfg.ron"))
    }

    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self, Report> {
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("Failed to open `{}`", path.display()))?;

        let config = ron::de::from_reader(file)
            .wrap_err_with(|| format!("Failed to parse `{}`", path.display()))?;

        Ok(config)
    }

    pub fn parse(source: &str) -> Result<Self, Report> {
        Ok(ron::de::from_str(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("()").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.limit_policy, LimitPolicy::Reset);
    }

    #[test]
    fn partial_config_overrides_fields() {
        let config = Config::parse(
            "(
                steps: (rotation: 0.05),
                limit_policy: Clamp,
                dimensions: (torso_height: 2.0),
            )",
        )
        .unwrap();

        assert_eq!(config.steps.rotation, 0.05);
        assert_eq!(config.steps.translation, 0.1);
        assert_eq!(config.limit_policy, LimitPolicy::Clamp);
        assert_eq!(config.dimensions.torso_height, 2.0);
        assert_eq!(config.dimensions.head_radius, 0.32);
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(Config::load(Path::new("./does/not/exist.ron")).is_err());
    }
}
