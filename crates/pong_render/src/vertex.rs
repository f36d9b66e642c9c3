/// Corner of a textured quad in logical play-field pixels.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl SpriteVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// The four corners of an axis-aligned quad, clockwise from top-left,
    /// sampling the full texture.
    pub fn quad(x: f32, y: f32, width: f32, height: f32) -> [SpriteVertex; 4] {
        let (right, bottom) = (x + width, y + height);
        [
            SpriteVertex {
                position: [x, y],
                tex_coords: [0.0, 0.0],
            },
            SpriteVertex {
                position: [right, y],
                tex_coords: [1.0, 0.0],
            },
            SpriteVertex {
                position: [right, bottom],
                tex_coords: [1.0, 1.0],
            },
            SpriteVertex {
                position: [x, bottom],
                tex_coords: [0.0, 1.0],
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_covers_rect_and_full_texture() {
        let q = SpriteVertex::quad(20.0, 216.0, 20.0, 48.0);
        assert_eq!(q[0].position, [20.0, 216.0]);
        assert_eq!(q[2].position, [40.0, 264.0]);
        assert_eq!(q[0].tex_coords, [0.0, 0.0]);
        assert_eq!(q[2].tex_coords, [1.0, 1.0]);
    }

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<SpriteVertex>(), 16);
        assert_eq!(SpriteVertex::layout().array_stride, 16);
    }
}
