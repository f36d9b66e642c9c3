//! foobarpong -- two-player Pong on a fixed 640x480 field.
//!
//! winit drives the event loop via `ApplicationHandler`. The loop sleeps with
//! `ControlFlow::WaitUntil` until the next tick is due, then requests a redraw.
//! `RedrawRequested` runs at most one world tick (no catch-up when the frame
//! ran long), rebuilds the sprite mesh and presents.
//!
//! Controls: W/S move the left paddle, Up/Down the right one, Enter restarts,
//! Escape quits and F3 toggles the debug overlay.

mod assets;
mod game;
mod mesh;
mod score_font;

use std::process::ExitCode;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use game::{GameState, LoopControl};
use pong_core::input::Key;
use pong_platform::window::PlatformConfig;

struct App {
    config: PlatformConfig,
    seed: u64,
    state: Option<GameState>,
    fatal: Option<String>,
}

impl App {
    fn new(seed: u64) -> Self {
        Self {
            config: PlatformConfig::default(),
            seed,
            state: None,
            fatal: None,
        }
    }

    /// Record the first fatal error, release everything and stop the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: String) {
        log::error!("{err}");
        self.fatal.get_or_insert(err);
        self.state = None;
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.fatal.is_some() {
            return;
        }
        let created = pong_platform::window::create_window(event_loop, &self.config)
            .and_then(|window| {
                let size = window.inner_size();
                log::info!("Window created: {}x{}", size.width, size.height);
                GameState::new(window, &self.config, self.seed)
            });
        match created {
            Ok(state) => self.state = Some(state),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            let next_tick = state.time.next_tick_at();
            if Instant::now() >= next_tick {
                state.window.request_redraw();
            }
            event_loop.set_control_flow(ControlFlow::WaitUntil(next_tick));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        let egui_consumed = state
            .debug_overlay
            .handle_window_event(&state.window, &event);

        let outcome = match event {
            WindowEvent::CloseRequested => {
                state.input.request_quit();
                state.window.request_redraw();
                Ok(LoopControl::Continue)
            }

            WindowEvent::Resized(physical_size) => {
                let (w, h) = (physical_size.width, physical_size.height);
                if w > 0 && h > 0 {
                    state.resize(w, h);
                }
                Ok(LoopControl::Continue)
            }

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(game_key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(game_key),
                            ElementState::Released => state.input.key_up(game_key),
                        }
                    }
                }
                Ok(LoopControl::Continue)
            }

            WindowEvent::RedrawRequested => state.update().and_then(|control| {
                if control == LoopControl::Continue {
                    state.render()?;
                }
                Ok(control)
            }),

            _ => Ok(LoopControl::Continue),
        };

        match outcome {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Quit) => {
                self.state = None;
                event_loop.exit();
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Release GPU resources and the window before the event loop goes away.
        self.state = None;
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::Enter | KeyCode::NumpadEnter => Some(Key::Enter),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F3 => Some(Key::F3),
        _ => None,
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("foobarpong starting...");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Unable to create event loop: {e}");
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(rand::random());
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {e}");
        return ExitCode::FAILURE;
    }

    match app.fatal {
        Some(_) => ExitCode::FAILURE,
        None => {
            log::info!("Goodbye.");
            ExitCode::SUCCESS
        }
    }
}
