//! GPU textures decoded from image files or built from raw RGBA pixels.

pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
}

impl Texture {
    /// Decode an encoded image (PNG) and upload it.
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
    ) -> Result<Self, String> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| format!("Unable to decode image '{label}': {e}"))?
            .to_rgba8();
        let (width, height) = image.dimensions();
        Self::from_rgba8(device, queue, &image, width, height, label)
    }

    /// Upload tightly packed RGBA8 pixels.
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Result<Self, String> {
        validate_dimensions(
            rgba.len(),
            width,
            height,
            device.limits().max_texture_dimension_2d,
        )
        .map_err(|e| format!("Unable to create texture '{label}': {e}"))?;

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Sprites are blitted at their native size, so sample texels exactly.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        log::debug!("Texture '{}' uploaded ({}x{})", label, width, height);
        Ok(Self {
            texture,
            view,
            sampler,
            size: (width, height),
        })
    }
}

fn validate_dimensions(byte_len: usize, width: u32, height: u32, max_dim: u32) -> Result<(), String> {
    if width == 0 || height == 0 {
        return Err(format!("empty size {width}x{height}"));
    }
    if width > max_dim || height > max_dim {
        return Err(format!(
            "size {width}x{height} exceeds device limit {max_dim}"
        ));
    }
    let expected = width as usize * height as usize * 4;
    if byte_len != expected {
        return Err(format!(
            "expected {expected} bytes of RGBA for {width}x{height}, got {byte_len}"
        ));
    }
    Ok(())
}
