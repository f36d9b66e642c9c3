//! CPU-side sprite mesh: one textured quad per visible sprite, batched into
//! draw calls by texture.

use pong_core::{Sprite, SpriteKey};
use pong_render::SpriteVertex;

/// A contiguous run of indices drawn with the same texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub texture_key: SpriteKey,
    pub index_start: u32,
    pub index_count: u32,
}

#[derive(Debug, Default)]
pub struct SpriteMesh {
    pub vertices: Vec<SpriteVertex>,
    pub indices: Vec<u32>,
    pub draw_calls: Vec<DrawCall>,
}

impl SpriteMesh {
    pub fn sprite_count(&self) -> usize {
        self.vertices.len() / 4
    }
}

/// Build quads for `sprites` in the given (back-to-front) order.
///
/// Sprites with an empty rectangle or without a loaded texture are skipped.
pub fn build_mesh(sprites: &[Sprite], has_texture: impl Fn(SpriteKey) -> bool) -> SpriteMesh {
    let mut mesh = SpriteMesh::default();
    for sprite in sprites {
        let rect = sprite.rect;
        if rect.width <= 0 || rect.height <= 0 {
            continue;
        }
        if !has_texture(sprite.key) {
            log::warn!("Skipping sprite '{}' due to missing texture", sprite.key);
            continue;
        }
        let base_index = mesh.vertices.len() as u32;
        mesh.vertices.extend_from_slice(&SpriteVertex::quad(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        ));
        let draw_start = mesh.indices.len() as u32;
        mesh.indices.extend_from_slice(&[
            base_index,
            base_index + 1,
            base_index + 2,
            base_index,
            base_index + 2,
            base_index + 3,
        ]);
        push_draw_call(&mut mesh.draw_calls, sprite.key, draw_start, 6);
    }
    mesh
}

/// Append a draw call, merging with the previous one when the texture matches
/// and indices are contiguous.
pub fn push_draw_call(
    draw_calls: &mut Vec<DrawCall>,
    texture_key: SpriteKey,
    index_start: u32,
    index_count: u32,
) {
    if let Some(last) = draw_calls.last_mut() {
        let contiguous = last.index_start + last.index_count == index_start;
        if last.texture_key == texture_key && contiguous {
            last.index_count += index_count;
            return;
        }
    }
    draw_calls.push(DrawCall {
        texture_key,
        index_start,
        index_count,
    });
}

pub fn count_texture_binds(draw_calls: &[DrawCall]) -> usize {
    let mut binds = 0usize;
    let mut current: Option<SpriteKey> = None;
    for draw in draw_calls {
        if current != Some(draw.texture_key) {
            current = Some(draw.texture_key);
            binds += 1;
        }
    }
    binds
}
