//! Image and font assets, loaded once at startup from `images/`.

use std::collections::HashMap;
use std::path::Path;

use pong_core::{SpriteKey, SpriteSizes};
use pong_render::{SpritePipeline, Texture};

pub const BACKGROUND_PATH: &str = "images/background.png";
pub const BALL_PATH: &str = "images/ball.png";
pub const PADDLE1_PATH: &str = "images/paddle1.png";
pub const PADDLE2_PATH: &str = "images/paddle2.png";
pub const DIVIDER_PATH: &str = "images/divider.png";
pub const FONT_PATH: &str = "images/boingium.ttf";
pub const SCORE_FONT_PX: f32 = 48.0;

/// Image file for every sprite that is drawn from disk. Score sprites are
/// rendered from the font instead.
pub const IMAGE_ASSETS: &[(SpriteKey, &str)] = &[
    (SpriteKey::Background, BACKGROUND_PATH),
    (SpriteKey::Divider, DIVIDER_PATH),
    (SpriteKey::Ball, BALL_PATH),
    (SpriteKey::Paddle1, PADDLE1_PATH),
    (SpriteKey::Paddle2, PADDLE2_PATH),
];

pub struct GpuSpriteTexture {
    pub texture: Texture,
    pub bind_group: wgpu::BindGroup,
}

impl GpuSpriteTexture {
    pub fn new(device: &wgpu::Device, pipeline: &SpritePipeline, texture: Texture) -> Self {
        let bind_group = pipeline.create_texture_bind_group(device, &texture);
        Self {
            texture,
            bind_group,
        }
    }

    pub fn size_i32(&self) -> (i32, i32) {
        let (w, h) = self.texture.size;
        (
            i32::try_from(w).unwrap_or(i32::MAX),
            i32::try_from(h).unwrap_or(i32::MAX),
        )
    }
}

pub fn load_texture_asset(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    pipeline: &SpritePipeline,
    asset_path: &str,
) -> Result<GpuSpriteTexture, String> {
    let bytes = std::fs::read(Path::new(asset_path))
        .map_err(|e| format!("Unable to load image '{}': {e}", asset_path))?;
    let texture = Texture::from_bytes(device, queue, &bytes, asset_path)?;
    log::info!(
        "Loaded '{}' ({}x{})",
        asset_path,
        texture.size.0,
        texture.size.1
    );
    Ok(GpuSpriteTexture::new(device, pipeline, texture))
}

/// Load every image asset. Fails on the first missing or corrupt file.
pub fn load_image_assets(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    pipeline: &SpritePipeline,
) -> Result<HashMap<SpriteKey, GpuSpriteTexture>, String> {
    let mut textures = HashMap::new();
    for &(key, path) in IMAGE_ASSETS {
        let texture = load_texture_asset(device, queue, pipeline, path)?;
        textures.insert(key, texture);
    }
    Ok(textures)
}

/// Sprite sizes taken from the loaded textures, falling back to the
/// defaults for anything not loaded.
pub fn sprite_sizes(textures: &HashMap<SpriteKey, GpuSpriteTexture>) -> SpriteSizes {
    let defaults = SpriteSizes::default();
    let size_of = |key: SpriteKey, fallback: (i32, i32)| {
        textures
            .get(&key)
            .map(GpuSpriteTexture::size_i32)
            .unwrap_or(fallback)
    };
    SpriteSizes {
        ball: size_of(SpriteKey::Ball, defaults.ball),
        paddle1: size_of(SpriteKey::Paddle1, defaults.paddle1),
        paddle2: size_of(SpriteKey::Paddle2, defaults.paddle2),
        divider: size_of(SpriteKey::Divider, defaults.divider),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_assets_cover_every_static_sprite() {
        for key in SpriteKey::ALL {
            let listed = IMAGE_ASSETS.iter().any(|(k, _)| k == key);
            let is_score = matches!(key, SpriteKey::Score1 | SpriteKey::Score2);
            assert_eq!(listed, !is_score, "{key}");
        }
    }

    #[test]
    fn asset_paths_live_under_images() {
        for (_, path) in IMAGE_ASSETS {
            assert!(path.starts_with("images/"));
            assert!(path.ends_with(".png"));
        }
        assert!(FONT_PATH.starts_with("images/"));
    }

    #[test]
    fn every_asset_ships_with_the_repo() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
        for path in IMAGE_ASSETS.iter().map(|(_, p)| *p).chain([FONT_PATH]) {
            assert!(root.join(path).is_file(), "missing asset {path}");
        }
    }

    #[test]
    fn sizes_fall_back_to_defaults_without_textures() {
        assert_eq!(sprite_sizes(&HashMap::new()), SpriteSizes::default());
    }
}
