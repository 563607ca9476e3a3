use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use starview_core::ViewerConfig;

/// Contents of a `--config` TOML file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    pub viewer: ViewerConfig,
    pub view: ViewSettings,
}

/// Initial view applied after the image is loaded. Unset values leave the
/// viewer's auto policies in charge.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub pan: Option<[f64; 2]>,
    pub zoom: Option<f64>,
    pub scale: Option<f64>,
    pub rotation: Option<f64>,
    pub flip_x: bool,
    pub flip_y: bool,
    pub swap_xy: bool,
    pub cuts: Option<[f64; 2]>,
}

impl SettingsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Defaults with a sample view table, as printed by `starview config`.
    pub fn example() -> Self {
        Self {
            viewer: ViewerConfig::default(),
            view: ViewSettings {
                width: Some(512),
                height: Some(512),
                rotation: Some(0.0),
                ..ViewSettings::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starview_core::config::AutoPolicy;

    #[test]
    fn test_partial_file() {
        let text = r#"
            [viewer]
            color_map = "heat"
            autocuts = "off"

            [view]
            pan = [10.0, 20.5]
            rotation = 30.0
            flip_x = true
        "#;
        let file: SettingsFile = toml::from_str(text).unwrap();
        assert_eq!(file.viewer.color_map, "heat");
        assert_eq!(file.viewer.autocuts, AutoPolicy::Off);
        assert_eq!(file.viewer.intensity_map, "ramp");
        assert_eq!(file.view.pan, Some([10.0, 20.5]));
        assert_eq!(file.view.rotation, Some(30.0));
        assert!(file.view.flip_x);
        assert!(!file.view.swap_xy);
        assert_eq!(file.view.cuts, None);
    }

    #[test]
    fn test_empty_file_is_default() {
        let file: SettingsFile = toml::from_str("").unwrap();
        assert_eq!(file, SettingsFile::default());
    }

    #[test]
    fn test_example_parses_back() {
        let text = toml::to_string_pretty(&SettingsFile::example()).unwrap();
        let back: SettingsFile = toml::from_str(&text).unwrap();
        assert_eq!(back, SettingsFile::example());
    }

    #[test]
    fn test_load_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[viewer]\nautozoom = \"sometimes\"\n").unwrap();
        let err = SettingsFile::load(&path).unwrap_err();
        assert!(format!("{err}").contains("bad.toml"));

        assert!(SettingsFile::load(&dir.path().join("missing.toml")).is_err());
    }
}
