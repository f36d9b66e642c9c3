use std::sync::Arc;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window, WindowAttributes};

pub struct PlatformConfig {
    pub title: String,
    /// Logical play-field size the renderer scales to the window.
    pub logical_width: u32,
    pub logical_height: u32,
    pub fullscreen: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "foobarpong".to_string(),
            logical_width: 640,
            logical_height: 480,
            fullscreen: true,
        }
    }
}

/// Open the game window: borderless fullscreen on the current monitor, or a
/// window sized to the logical resolution when fullscreen is off.
pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, String> {
    let mut attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.logical_width,
            config.logical_height,
        ));
    if config.fullscreen {
        attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }

    let window = event_loop
        .create_window(attrs)
        .map_err(|e| format!("Unable to create window: {e}"))?;
    window.set_cursor_visible(false);
    log::info!(
        "Opened '{}' ({}, logical field {}x{})",
        config.title,
        if config.fullscreen { "borderless fullscreen" } else { "windowed" },
        config.logical_width,
        config.logical_height
    );
    Ok(Arc::new(window))
}
