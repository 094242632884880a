use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;
use winit::event::VirtualKeyCode;

use crate::{
    error::{Error, Result},
    geometry::{Quaternion, SLERP_DOT_THRESHOLD},
    input::KeyBindings,
    orientation::{AnimationSettings, OrientationSet, Preset},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
    pub window: WindowConfig,
    pub presets: Vec<PresetConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            animation: AnimationConfig::default(),
            camera: CameraConfig::default(),
            window: WindowConfig::default(),
            presets: PresetConfig::tutorial(),
        }
    }
}

impl AppConfig {
    /// Reads a TOML file. Sections missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!(?path, presets = config.presets.len(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn orientation_set(&self) -> Result<OrientationSet> {
        OrientationSet::new(
            self.presets
                .iter()
                .map(|preset| Preset {
                    name: preset.name.clone(),
                    rotation: preset.rotation,
                })
                .collect(),
        )
    }

    pub fn key_bindings(&self) -> KeyBindings {
        KeyBindings {
            presets: self.presets.iter().map(|preset| preset.key).collect(),
            ..KeyBindings::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Seconds a transition takes.
    pub duration: f32,
    /// Dot product above which slerp falls back to lerp.
    pub slerp_threshold: f32,
    pub start_with_slerp: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: 1.0,
            slerp_threshold: SLERP_DOT_THRESHOLD,
            start_with_slerp: false,
        }
    }
}

impl AnimationConfig {
    pub fn settings(&self) -> AnimationSettings {
        AnimationSettings {
            duration: self.duration,
            slerp_threshold: self.slerp_threshold,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 20.0,
            z_near: 1.0,
            z_far: 600.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// PNG used as the window icon, if any.
    pub icon: Option<PathBuf>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Interpolation".to_owned(),
            width: 500,
            height: 500,
            icon: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetConfig {
    pub name: String,
    pub key: VirtualKeyCode,
    /// Stored as `[w, x, y, z]`.
    #[serde(with = "wxyz")]
    pub rotation: Quaternion,
}

impl PresetConfig {
    /// The seven orientations of the interpolation tutorial, bound to Q to U.
    pub fn tutorial() -> Vec<PresetConfig> {
        [
            (VirtualKeyCode::Q, [0.7071, 0.7071, 0.0, 0.0]),
            (VirtualKeyCode::W, [0.5, 0.5, -0.5, 0.5]),
            (VirtualKeyCode::E, [-0.4895, -0.7892, -0.3700, -0.02514]),
            (VirtualKeyCode::R, [0.4895, 0.7892, 0.3700, 0.02514]),
            (VirtualKeyCode::T, [0.3840, -0.1591, -0.7991, -0.4344]),
            (VirtualKeyCode::Y, [0.5537, 0.5208, 0.6483, 0.0410]),
            (VirtualKeyCode::U, [0.0, 0.0, 1.0, 0.0]),
        ]
        .into_iter()
        .map(|(key, [w, x, y, z])| PresetConfig {
            name: format!("{key:?}"),
            key,
            rotation: Quaternion::new(w, x, y, z),
        })
        .collect()
    }
}

mod wxyz {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::geometry::Quaternion;

    pub fn serialize<S: Serializer>(q: &Quaternion, s: S) -> Result<S::Ok, S::Error> {
        q.to_wxyz().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Quaternion, D::Error> {
        let [w, x, y, z] = <[f32; 4]>::deserialize(d)?;
        Ok(Quaternion::new(w, x, y, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reproduce_the_tutorial() {
        let config = AppConfig::default();
        assert_eq!(config.presets.len(), 7);
        assert_eq!(config.presets[0].name, "Q");
        assert_eq!(config.presets[6].key, VirtualKeyCode::U);
        assert_eq!(config.animation.duration, 1.0);
        assert_eq!(config.animation.slerp_threshold, 0.9995);
        assert_eq!(config.camera.fov_degrees, 20.0);
        assert_eq!(config.orientation_set().unwrap().len(), 7);
    }

    #[test]
    fn default_config_survives_toml() {
        let text = AppConfig::default().to_toml_string().unwrap();
        let parsed = AppConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.presets.len(), 7);
        assert_eq!(parsed.presets[1].rotation, Quaternion::new(0.5, 0.5, -0.5, 0.5));
        assert_eq!(parsed.window.title, "Interpolation");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [animation]
            duration = 2.5
            "#,
        )
        .unwrap();
        assert_eq!(config.animation.duration, 2.5);
        assert_eq!(config.animation.slerp_threshold, SLERP_DOT_THRESHOLD);
        assert_eq!(config.presets.len(), 7);
    }

    #[test]
    fn custom_presets_replace_the_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [[presets]]
            name = "level"
            key = "Key1"
            rotation = [1.0, 0.0, 0.0, 0.0]

            [[presets]]
            name = "nose-up"
            key = "Key2"
            rotation = [0.7071, 0.7071, 0.0, 0.0]
            "#,
        )
        .unwrap();
        let bindings = config.key_bindings();
        assert_eq!(bindings.presets, vec![VirtualKeyCode::Key1, VirtualKeyCode::Key2]);
        assert_eq!(config.orientation_set().unwrap().get(1).unwrap().name, "nose-up");
    }

    #[test]
    fn empty_preset_list_is_rejected() {
        let config = AppConfig::from_toml_str("presets = []").unwrap();
        assert!(matches!(
            config.orientation_set(),
            Err(Error::EmptyOrientationSet)
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_toml_str("[animation]\nduration = \"slow\""),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let path = Path::new("/nonexistent/orient_tutorial.toml");
        match AppConfig::load(path) {
            Err(Error::ConfigRead { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
