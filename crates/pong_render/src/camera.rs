use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Region of the surface the play field is drawn into, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Fixed-resolution camera for the play field.
///
/// World coordinates are logical pixels with the origin in the top-left
/// corner and y pointing down. The logical rectangle is scaled uniformly to
/// the largest size that fits the surface and centred, leaving black bars on
/// the long axis.
pub struct Camera2D {
    pub logical_size: (u32, u32),
}

impl Camera2D {
    pub fn new(logical_width: u32, logical_height: u32) -> Self {
        Self {
            logical_size: (logical_width, logical_height),
        }
    }

    pub fn build_uniform(&self) -> CameraUniform {
        let (w, h) = self.logical_size;
        // bottom = h, top = 0 flips y so it grows downward.
        let proj = Mat4::orthographic_rh(0.0, w as f32, h as f32, 0.0, -1.0, 1.0);
        CameraUniform {
            view_proj: proj.to_cols_array_2d(),
        }
    }

    pub fn letterbox(&self, surface_width: u32, surface_height: u32) -> Viewport {
        let (lw, lh) = (self.logical_size.0 as f32, self.logical_size.1 as f32);
        let (sw, sh) = (surface_width as f32, surface_height as f32);
        let scale = (sw / lw).min(sh / lh);
        let width = (lw * scale).floor().max(1.0);
        let height = (lh * scale).floor().max(1.0);
        Viewport {
            x: ((sw - width) * 0.5).floor().max(0.0),
            y: ((sh - height) * 0.5).floor().max(0.0),
            width,
            height,
        }
    }
}
