#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Maze Carver.
//!
//! The maze is silent, so macroquad is built without default features and
//! its `audio` feature does not pull in ALSA.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_pressed, KeyCode};
use maze_carver_rendering::{
    Color, FrameControl, FrameInput, Presentation, Quad, RenderingBackend, Scene,
};
use std::time::Duration;

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    quit_requested: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
        }
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Presentation {
            window_title,
            window_width,
            window_height,
            palette,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: i32::try_from(window_width).unwrap_or(i32::MAX),
            window_height: i32::try_from(window_height).unwrap_or(i32::MAX),
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = self.swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        tracing::debug!(
            width = window_width,
            height = window_height,
            "opening macroquad window"
        );

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(palette.background);

            loop {
                let keyboard = KeyboardShortcuts::poll();
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = FrameInput {
                    quit_requested: keyboard.quit_requested,
                };

                if update_scene(frame_dt, frame_input, &mut scene) == FrameControl::Exit {
                    break;
                }

                macroquad::window::clear_background(background);
                let metrics = SceneMetrics::fit(
                    scene.extent(),
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                for quad in scene.quads(&palette) {
                    draw_quad(quad, &metrics);
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Uniform scale and centring offset mapping maze space onto the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset: Vec2,
}

impl SceneMetrics {
    /// Mazes are drawn at native size unless they overflow the screen.
    fn fit(extent: Vec2, screen_width: f32, screen_height: f32) -> Self {
        let scale = if extent.x <= 0.0 || extent.y <= 0.0 {
            1.0
        } else {
            (screen_width / extent.x)
                .min(screen_height / extent.y)
                .min(1.0)
                .max(0.0)
        };
        let scaled = extent * scale;
        let offset = Vec2::new(
            ((screen_width - scaled.x) * 0.5).max(0.0),
            ((screen_height - scaled.y) * 0.5).max(0.0),
        );

        Self { scale, offset }
    }

    fn project(&self, quad: Quad) -> (Vec2, Vec2) {
        (self.offset + quad.origin * self.scale, quad.size * self.scale)
    }
}

fn draw_quad(quad: Quad, metrics: &SceneMetrics) {
    let (position, size) = metrics.project(quad);
    macroquad::shapes::draw_rectangle(
        position.x,
        position.y,
        size.x,
        size.y,
        to_macroquad_color(quad.color),
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
