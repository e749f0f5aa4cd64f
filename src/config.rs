//! Scene description loaded from TOML.
//!
//! ```toml
//! [player]
//! activate_key = "E"
//!
//! [[item]]
//! name = "Brass lamp"
//! description = "Still warm."
//! position = [2.0, 0.8, 3.0]
//! collider = { shape = "sphere", radius = 0.3 }
//! sound = "assets/click.wav"
//! ```

use std::path::{Path, PathBuf};

use macroquad::input::KeyCode;
use macroquad::math::{EulerRot, Quat, Vec3};
use serde::Deserialize;
use tracing::info;

use crate::collision::Shape;
use crate::error::ConfigError;
use crate::item::{
    DEFAULT_ACTIVATION_RANGE, DEFAULT_INSPECTION_DISTANCE, DEFAULT_ROTATION_SPEED, ItemBindings,
    Transform,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default, rename = "item")]
    pub items: Vec<ItemConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub spawn: [f32; 3],
    pub eye_height: f32,
    /// World units per second.
    pub move_speed: f32,
    pub look_sensitivity: f32,
    pub activate_key: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            spawn: [0.0, 0.0, 0.0],
            eye_height: 1.6,
            move_speed: 4.0,
            look_sensitivity: 3.0,
            activate_key: "E".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub position: [f32; 3],
    /// Euler angles in degrees about X, Y and Z.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default)]
    pub collider: ColliderConfig,
    #[serde(default = "default_activation_range")]
    pub activation_range: f32,
    #[serde(default = "default_inspection_distance")]
    pub inspection_distance: f32,
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
    #[serde(default)]
    pub sound: Option<PathBuf>,
    #[serde(default = "default_color")]
    pub color: [u8; 3],
}

fn default_activation_range() -> f32 {
    DEFAULT_ACTIVATION_RANGE
}

fn default_inspection_distance() -> f32 {
    DEFAULT_INSPECTION_DISTANCE
}

fn default_rotation_speed() -> f32 {
    DEFAULT_ROTATION_SPEED
}

fn default_color() -> [u8; 3] {
    [200, 200, 200]
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ColliderConfig {
    Sphere { radius: f32 },
    Box { half_extents: [f32; 3] },
}

impl Default for ColliderConfig {
    fn default() -> Self {
        ColliderConfig::Box {
            half_extents: [0.25, 0.25, 0.25],
        }
    }
}

impl ColliderConfig {
    pub fn shape(&self) -> Shape {
        match *self {
            ColliderConfig::Sphere { radius } => Shape::Sphere { radius },
            ColliderConfig::Box { half_extents } => Shape::Box {
                half_extents: Vec3::from_array(half_extents),
            },
        }
    }

    fn is_valid(&self) -> bool {
        match *self {
            ColliderConfig::Sphere { radius } => radius.is_finite() && radius > 0.0,
            ColliderConfig::Box { half_extents } => {
                half_extents.iter().all(|e| e.is_finite() && *e > 0.0)
            }
        }
    }
}

impl ItemConfig {
    pub fn transform(&self) -> Transform {
        let [x, y, z] = self.rotation.map(f32::to_radians);
        Transform {
            position: Vec3::from_array(self.position),
            rotation: Quat::from_euler(EulerRot::XYZ, x, y, z),
        }
    }

    /// Bindings with this item's own parameters filled in. The caller still
    /// has to attach the collider, lock and HUD surfaces.
    pub fn bindings(&self) -> ItemBindings {
        ItemBindings::new(self.name.clone(), self.transform())
            .description(self.description.clone())
            .activation_range(self.activation_range)
            .inspection_distance(self.inspection_distance)
            .rotation_speed(self.rotation_speed)
    }
}

impl SceneConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let scene = Self::from_toml_str(&text)?;
        info!(path = %path.display(), items = scene.items.len(), "loaded scene");
        Ok(scene)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let scene: SceneConfig = toml::from_str(text)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let player = &self.player;
        if !(player.move_speed.is_finite() && player.move_speed >= 0.0) {
            return Err(ConfigError::invalid("player.move_speed", player.move_speed));
        }
        if !player.look_sensitivity.is_finite() {
            return Err(ConfigError::invalid(
                "player.look_sensitivity",
                player.look_sensitivity,
            ));
        }
        if !player.eye_height.is_finite() {
            return Err(ConfigError::invalid("player.eye_height", player.eye_height));
        }
        parse_key(&player.activate_key)?;

        for item in &self.items {
            if !(item.activation_range.is_finite() && item.activation_range > 0.0) {
                return Err(ConfigError::invalid("activation_range", item.activation_range));
            }
            if !(item.inspection_distance.is_finite() && item.inspection_distance >= 0.0) {
                return Err(ConfigError::invalid(
                    "inspection_distance",
                    item.inspection_distance,
                ));
            }
            if !item.rotation_speed.is_finite() {
                return Err(ConfigError::invalid("rotation_speed", item.rotation_speed));
            }
            if !item.collider.is_valid() {
                return Err(ConfigError::invalid(
                    "collider",
                    format!("{:?} on {}", item.collider, item.name),
                ));
            }
        }
        Ok(())
    }

    pub fn activation_key(&self) -> Result<KeyCode, ConfigError> {
        parse_key(&self.player.activate_key)
    }

    /// Small room used when no scene file is given.
    pub fn demo() -> Self {
        let item = |name: &str, description: &str, position: [f32; 3], collider, color| ItemConfig {
            name: name.to_string(),
            description: description.to_string(),
            position,
            rotation: [0.0, 0.0, 0.0],
            collider,
            activation_range: DEFAULT_ACTIVATION_RANGE,
            inspection_distance: DEFAULT_INSPECTION_DISTANCE,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            sound: None,
            color,
        };

        SceneConfig {
            player: PlayerConfig::default(),
            items: vec![
                item(
                    "Wooden crate",
                    "Stamped with a shipping mark nobody recognises.",
                    [2.0, 0.5, 4.0],
                    ColliderConfig::Box {
                        half_extents: [0.35, 0.35, 0.35],
                    },
                    [150, 100, 50],
                ),
                item(
                    "Glass orb",
                    "Something moves inside when you are not looking.",
                    [-2.0, 1.0, 5.0],
                    ColliderConfig::Sphere { radius: 0.3 },
                    [120, 180, 255],
                ),
                item(
                    "Brass key",
                    "Heavier than it looks.",
                    [0.0, 0.8, 7.0],
                    ColliderConfig::Box {
                        half_extents: [0.3, 0.08, 0.08],
                    },
                    [220, 180, 60],
                ),
            ],
        }
    }
}

/// Maps a key name from the scene file to a macroquad key.
pub fn parse_key(name: &str) -> Result<KeyCode, ConfigError> {
    let key = match name.trim().to_ascii_uppercase().as_str() {
        "A" => KeyCode::A,
        "B" => KeyCode::B,
        "C" => KeyCode::C,
        "D" => KeyCode::D,
        "E" => KeyCode::E,
        "F" => KeyCode::F,
        "G" => KeyCode::G,
        "H" => KeyCode::H,
        "I" => KeyCode::I,
        "J" => KeyCode::J,
        "K" => KeyCode::K,
        "L" => KeyCode::L,
        "M" => KeyCode::M,
        "N" => KeyCode::N,
        "O" => KeyCode::O,
        "P" => KeyCode::P,
        "Q" => KeyCode::Q,
        "R" => KeyCode::R,
        "S" => KeyCode::S,
        "T" => KeyCode::T,
        "U" => KeyCode::U,
        "V" => KeyCode::V,
        "W" => KeyCode::W,
        "X" => KeyCode::X,
        "Y" => KeyCode::Y,
        "Z" => KeyCode::Z,
        "SPACE" => KeyCode::Space,
        "ENTER" => KeyCode::Enter,
        "TAB" => KeyCode::Tab,
        _ => return Err(ConfigError::UnknownKey(name.to_string())),
    };
    Ok(key)
}
