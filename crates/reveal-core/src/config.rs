use crate::constants::{DEFAULT_MODEL_PATH, DEFAULT_TEXTURE_PATH};
use crate::reveal::SettleMode;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneVariant {
    /// Textured glTF model with the reveal ramp.
    #[default]
    Can,
    /// Primitive sphere with the ring decal.
    Sphere,
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub variant: SceneVariant,
    pub model_path: PathBuf,
    pub texture_path: PathBuf,
    pub debug_mode: f32,
    pub settle: SettleMode,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            variant: SceneVariant::default(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            texture_path: PathBuf::from(DEFAULT_TEXTURE_PATH),
            debug_mode: 1.0,
            settle: SettleMode::default(),
        }
    }
}
