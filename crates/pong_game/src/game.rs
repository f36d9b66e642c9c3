//! Game state and the per-frame update/render steps driven by the event loop.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use pong_core::input::{InputState, Key};
use pong_core::time::TimeState;
use pong_core::{
    CollisionRule, Field, GameConfig, PauseState, PlayerSide, ScoreBoard, SpriteKey, World,
};
use pong_devtools::{DebugOverlay, OverlayStats};
use pong_platform::window::PlatformConfig;
use pong_render::{Camera2D, GpuContext, SpritePipeline, SpriteVertex, Texture};

use crate::assets::{self, GpuSpriteTexture};
use crate::mesh::{self, SpriteMesh};
use crate::score_font::ScoreFont;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Everything the running game owns.
///
/// Fields drop top to bottom, which is the reverse of the order `new`
/// acquires them in: per-frame buffers, then textures and the font, then the
/// pipeline and GPU device, and the window last.
pub struct GameState {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    _camera_buffer: wgpu::Buffer,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,
    mesh: SpriteMesh,

    textures: HashMap<SpriteKey, GpuSpriteTexture>,
    score_font: ScoreFont,
    scoreboard: ScoreBoard,
    world: World,

    pub input: InputState,
    pub time: TimeState,
    camera: Camera2D,
    pause: PauseState,
    last_rule: Option<CollisionRule>,

    pub debug_overlay: DebugOverlay,
    sprite_pipeline: SpritePipeline,
    pub gpu: GpuContext,
    pub window: Arc<Window>,
}

impl GameState {
    pub fn new(window: Arc<Window>, config: &PlatformConfig, seed: u64) -> Result<Self, String> {
        let gpu = GpuContext::new(window.clone())?;
        let sprite_pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);
        let debug_overlay = DebugOverlay::new(&gpu.device, gpu.surface_format, &window);

        let textures = assets::load_image_assets(&gpu.device, &gpu.queue, &sprite_pipeline)?;
        let score_font = ScoreFont::load(Path::new(assets::FONT_PATH), assets::SCORE_FONT_PX)?;

        let game_config = GameConfig {
            field: Field::new(config.logical_width as i32, config.logical_height as i32),
            ..GameConfig::default()
        };
        let world = World::new(game_config, assets::sprite_sizes(&textures), seed);

        let camera = Camera2D::new(config.logical_width, config.logical_height);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            sprite_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);
        let vertex_buffer = create_vertex_buffer(&gpu.device, 1);
        let index_buffer = create_index_buffer(&gpu.device, 1);

        let mut state = Self {
            vertex_buffer,
            index_buffer,
            camera_bind_group,
            _camera_buffer: camera_buffer,
            mesh_vertex_capacity: 0,
            mesh_index_capacity: 0,
            mesh: SpriteMesh::default(),
            textures,
            score_font,
            scoreboard: ScoreBoard::new(),
            world,
            input: InputState::new(),
            time: TimeState::new(),
            camera,
            pause: PauseState::default(),
            last_rule: None,
            debug_overlay,
            sprite_pipeline,
            gpu,
            window,
        };

        // Score textures must exist before the first mesh is built.
        state.refresh_scores()?;
        state.rebuild_mesh();
        log::info!("Game ready");
        Ok(state)
    }

    /// Run one loop iteration: tick the world if a tick period has passed.
    pub fn update(&mut self) -> Result<LoopControl, String> {
        self.time.begin_frame();
        if !self.time.should_tick() {
            return Ok(LoopControl::Continue);
        }

        if self.input.should_quit() {
            log::info!("Quit requested, exiting.");
            return Ok(LoopControl::Quit);
        }
        if self.input.is_just_pressed(Key::F3) {
            self.debug_overlay.toggle(&self.window);
        }

        let report = self.pause.advance(&mut self.world, &self.input.tick_input());
        if report.restarted {
            self.scoreboard.invalidate();
        }
        if report.rule.is_some() {
            self.last_rule = report.rule;
        }
        self.refresh_scores()?;

        // Every edge-triggered key has been acted on by now, paused or not.
        self.input.end_frame();
        self.rebuild_mesh();
        Ok(LoopControl::Continue)
    }

    /// Re-render every score display whose value changed since it was drawn.
    fn refresh_scores(&mut self) -> Result<(), String> {
        for stale in self.scoreboard.stale(&self.world) {
            let bitmap = self.score_font.render(&stale.text)?;
            let key = match stale.side {
                PlayerSide::One => SpriteKey::Score1,
                PlayerSide::Two => SpriteKey::Score2,
            };
            let texture = Texture::from_rgba8(
                &self.gpu.device,
                &self.gpu.queue,
                &bitmap.rgba,
                bitmap.width,
                bitmap.height,
                key.label(),
            )?;
            let texture = GpuSpriteTexture::new(&self.gpu.device, &self.sprite_pipeline, texture);
            let (w, h) = texture.size_i32();
            // Inserting drops the previous texture for this display.
            self.textures.insert(key, texture);
            self.world.set_score_size(stale.side, w, h);
            self.scoreboard.mark_rendered(stale.side, stale.score);
            log::debug!("Score display for {} now reads {}", stale.side, stale.text);
        }
        Ok(())
    }

    fn rebuild_mesh(&mut self) {
        let textures = &self.textures;
        let mesh = mesh::build_mesh(&self.world.sprites(), |key| textures.contains_key(&key));
        self.ensure_mesh_capacity(mesh.vertices.len(), mesh.indices.len());

        if !mesh.vertices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&mesh.vertices));
        }
        if !mesh.indices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&mesh.indices));
        }
        self.mesh = mesh;
    }

    fn ensure_mesh_capacity(&mut self, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.mesh_vertex_capacity);
        }
        let needed_indices = index_count.max(1);
        if needed_indices > self.mesh_index_capacity {
            self.mesh_index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.mesh_index_capacity);
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        log::info!("Resized to {}x{}", width, height);
    }

    fn overlay_stats(&self) -> OverlayStats {
        let ball = &self.world.ball;
        OverlayStats {
            draw_calls: self.mesh.draw_calls.len() as u32,
            texture_binds: mesh::count_texture_binds(&self.mesh.draw_calls) as u32,
            sprite_count: self.mesh.sprite_count() as u32,
            scores: self.world.scores(),
            ball_position: (ball.rect().x, ball.rect().y),
            ball_velocity: (ball.x_vel, ball.y_vel),
            last_rule: self.last_rule.map(CollisionRule::label),
            paused: self.pause.is_paused(),
        }
    }

    /// Draw the current world and the debug overlay, then present.
    pub fn render(&mut self) -> Result<(), String> {
        if self.gpu.size.0 == 0 || self.gpu.size.1 == 0 {
            return Ok(());
        }
        let Some((output, view)) = self.gpu.begin_frame()? else {
            return Ok(());
        };

        let stats = self.overlay_stats();
        let (egui_primitives, egui_textures_delta, overlay_actions) =
            self.debug_overlay.prepare(&self.window, &self.time, &stats);
        if overlay_actions.restart {
            self.world.restart();
            self.scoreboard.invalidate();
            self.refresh_scores()?;
        }
        if overlay_actions.toggle_pause {
            self.pause.toggle();
        }
        if overlay_actions.single_step {
            self.pause.request_step();
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };
        let viewport = self.camera.letterbox(self.gpu.size.0, self.gpu.size.1);

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Play Field Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            render_pass.set_viewport(
                viewport.x,
                viewport.y,
                viewport.width,
                viewport.height,
                0.0,
                1.0,
            );
            render_pass.set_pipeline(&self.sprite_pipeline.render_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

            let mut last_bound: Option<SpriteKey> = None;
            for draw in &self.mesh.draw_calls {
                let Some(texture) = self.textures.get(&draw.texture_key) else {
                    continue;
                };
                if last_bound != Some(draw.texture_key) {
                    render_pass.set_bind_group(1, &texture.bind_group, &[]);
                    last_bound = Some(draw.texture_key);
                }
                render_pass.draw_indexed(
                    draw.index_start..(draw.index_start + draw.index_count),
                    0,
                    0..1,
                );
            }
        }

        self.debug_overlay.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &egui_primitives,
            &egui_textures_delta,
            &screen_descriptor,
        );
        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.debug_overlay
                .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
        }
        self.debug_overlay.cleanup(&egui_textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<SpriteVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
