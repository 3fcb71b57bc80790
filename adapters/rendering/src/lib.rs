#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Carver adapters.
//!
//! Backends receive a [`Presentation`] and a per-frame update closure. The
//! closure advances the generator and refreshes the [`Scene`]; the backend
//! turns the scene into [`Quad`]s through [`Scene::quads`] and draws them.

mod pacing;
mod text;

pub use pacing::StepPacer;
pub use text::render_text;

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_carver_core::{CellCoord, CellView, Dimensions};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);
    /// Opaque pure blue.
    pub const BLUE: Self = Self::from_rgb_u8(0, 0, 255);

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Mixes the color towards white; `amount` is clamped to 0.0..=1.0.
    #[must_use]
    pub fn tint(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |channel: f32| channel + (1.0 - channel) * amount;

        Self {
            red: mix(self.red),
            green: mix(self.green),
            blue: mix(self.blue),
            alpha: self.alpha,
        }
    }
}

/// Colors used to draw the maze.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Clear color behind the cells; visible through walls.
    pub background: Color,
    /// Fill for cells the generator has reached.
    pub visited: Color,
    /// Fill for cells not yet reached.
    pub unvisited: Color,
    /// Fill for the generator's current cell when highlighting is enabled.
    pub current: Color,
}

impl Palette {
    /// How far the highlight moves the unvisited fill towards white.
    pub const HIGHLIGHT_TINT: f32 = 0.5;

    /// Builds a palette whose highlight is a pale tint of the unvisited fill.
    #[must_use]
    pub fn from_base(background: Color, visited: Color, unvisited: Color) -> Self {
        Self {
            background,
            visited,
            unvisited,
            current: unvisited.tint(Self::HIGHLIGHT_TINT),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_base(Color::BLACK, Color::WHITE, Color::BLUE)
    }
}

/// Geometry of a cell and the wall gap that separates it from its neighbours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellLayout {
    cell_size: f32,
    gap: f32,
}

impl CellLayout {
    /// Default side length of a cell in pixels.
    pub const DEFAULT_CELL_SIZE: f32 = 32.0;

    /// Default wall thickness in pixels.
    pub const DEFAULT_GAP: f32 = 5.0;

    /// Creates a layout, rejecting non-positive cell sizes and negative gaps.
    pub fn new(cell_size: f32, gap: f32) -> Result<Self, RenderingError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(RenderingError::InvalidCellSize { cell_size });
        }
        if !gap.is_finite() || gap < 0.0 {
            return Err(RenderingError::InvalidGap { gap });
        }

        Ok(Self { cell_size, gap })
    }

    /// Side length of a cell.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Thickness of a standing wall.
    #[must_use]
    pub const fn gap(&self) -> f32 {
        self.gap
    }

    /// Distance between the origins of two adjacent cells.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.cell_size + self.gap
    }

    /// Rectangle covering `cell` at `coord`, widened into any cleared wall gap.
    #[must_use]
    pub fn cell_rect(&self, coord: CellCoord, cell: CellView) -> (Vec2, Vec2) {
        let origin = Vec2::new(
            coord.column() as f32 * self.pitch(),
            coord.row() as f32 * self.pitch(),
        );
        let mut size = Vec2::splat(self.cell_size);
        if !cell.wall_right {
            size.x += self.gap;
        }
        if !cell.wall_bottom {
            size.y += self.gap;
        }
        (origin, size)
    }

    /// Size of the whole maze without a trailing gap on the far edges.
    #[must_use]
    pub fn extent(&self, dimensions: Dimensions) -> Vec2 {
        Vec2::new(
            dimensions.columns() as f32 * self.pitch() - self.gap,
            dimensions.rows() as f32 * self.pitch() - self.gap,
        )
    }
}

impl Default for CellLayout {
    fn default() -> Self {
        Self {
            cell_size: Self::DEFAULT_CELL_SIZE,
            gap: Self::DEFAULT_GAP,
        }
    }
}

/// Filled rectangle emitted by [`Scene::quads`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    /// Top-left corner in maze space.
    pub origin: Vec2,
    /// Width and height in maze space.
    pub size: Vec2,
    /// Fill color.
    pub color: Color,
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Whether the user asked to cancel the run on this frame.
    pub quit_requested: bool,
}

/// Decision returned by the update closure after each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep presenting frames.
    Continue,
    /// Close the window and return from [`RenderingBackend::run`].
    Exit,
}

/// Snapshot of the maze drawn on the next frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    dimensions: Dimensions,
    layout: CellLayout,
    cells: Vec<CellView>,
    /// Cell drawn with [`Palette::current`], if any.
    pub highlight: Option<CellCoord>,
}

impl Scene {
    /// Creates a scene with every cell untouched.
    #[must_use]
    pub fn new(dimensions: Dimensions, layout: CellLayout) -> Self {
        Self {
            dimensions,
            layout,
            cells: vec![CellView::UNTOUCHED; dimensions.cell_count()],
            highlight: None,
        }
    }

    /// Dimensions of the presented maze.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Layout used to place cells.
    #[must_use]
    pub const fn layout(&self) -> CellLayout {
        self.layout
    }

    /// Overwrites the stored cells from a row-major snapshot.
    ///
    /// Coordinates outside the scene dimensions are ignored.
    pub fn sync<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = (CellCoord, CellView)>,
    {
        for (coord, view) in cells {
            if let Some(index) = self.dimensions.index_of(coord) {
                self.cells[index] = view;
            }
        }
    }

    /// Snapshot of a single cell.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<CellView> {
        self.dimensions
            .index_of(coord)
            .map(|index| self.cells[index])
    }

    /// Rectangles to draw, in row-major order.
    #[must_use]
    pub fn quads(&self, palette: &Palette) -> Vec<Quad> {
        let columns = self.dimensions.columns();
        self.cells
            .iter()
            .enumerate()
            .map(|(index, &view)| {
                let coord = CellCoord::new(
                    (index / columns as usize) as u32,
                    (index % columns as usize) as u32,
                );
                let (origin, size) = self.layout.cell_rect(coord, view);
                let color = if self.highlight == Some(coord) {
                    palette.current
                } else if view.visited {
                    palette.visited
                } else {
                    palette.unvisited
                };
                Quad {
                    origin,
                    size,
                    color,
                }
            })
            .collect()
    }

    /// Size of the maze in maze space.
    #[must_use]
    pub fn extent(&self) -> Vec2 {
        self.layout.extent(self.dimensions)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Requested window width in pixels.
    pub window_width: u32,
    /// Requested window height in pixels.
    pub window_height: u32,
    /// Colors used to draw each frame.
    pub palette: Palette,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Default window title.
    pub const DEFAULT_TITLE: &'static str = "Maze Carver";

    /// Default window width in pixels.
    pub const DEFAULT_WIDTH: u32 = 1024;

    /// Default window height in pixels.
    pub const DEFAULT_HEIGHT: u32 = 640;

    /// Constructs a presentation with the default window geometry.
    #[must_use]
    pub fn new<T>(window_title: T, palette: Palette, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            window_width: Self::DEFAULT_WIDTH,
            window_height: Self::DEFAULT_HEIGHT,
            palette,
            scene,
        }
    }

    /// Overrides the requested window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }
}

/// Rendering backend capable of presenting Maze Carver scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the update closure or the user ends it.
    ///
    /// `update_scene` receives the frame delta and the input captured this
    /// frame, may mutate the scene before it is drawn, and decides whether
    /// another frame follows.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Cells must have a positive, finite side length.
    InvalidCellSize {
        /// Provided size that failed validation.
        cell_size: f32,
    },
    /// Wall gaps must be finite and non-negative.
    InvalidGap {
        /// Provided gap that failed validation.
        gap: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellSize { cell_size } => {
                write!(f, "cell_size must be positive (received {cell_size})")
            }
            Self::InvalidGap { gap } => {
                write!(f, "gap must not be negative (received {gap})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimensions(rows: u32, columns: u32) -> Dimensions {
        Dimensions::new(rows, columns).expect("valid dimensions")
    }

    #[test]
    fn layout_rejects_degenerate_geometry_without_panicking() {
        assert_eq!(
            CellLayout::new(0.0, 5.0),
            Err(RenderingError::InvalidCellSize { cell_size: 0.0 })
        );
        assert_eq!(
            CellLayout::new(32.0, -1.0),
            Err(RenderingError::InvalidGap { gap: -1.0 })
        );
        assert!(CellLayout::new(f32::NAN, 5.0).is_err());
        assert!(CellLayout::new(32.0, 0.0).is_ok());
    }

    #[test]
    fn cleared_walls_extend_the_cell_into_the_gap() {
        let layout = CellLayout::default();
        let coord = CellCoord::new(2, 3);

        let (origin, size) = layout.cell_rect(coord, CellView::UNTOUCHED);
        assert_eq!(origin, Vec2::new(3.0 * 37.0, 2.0 * 37.0));
        assert_eq!(size, Vec2::splat(32.0));

        let open = CellView {
            visited: true,
            wall_right: false,
            wall_bottom: false,
        };
        let (_, size) = layout.cell_rect(coord, open);
        assert_eq!(size, Vec2::splat(37.0));
    }

    #[test]
    fn extent_omits_the_trailing_gap() {
        let layout = CellLayout::new(10.0, 2.0).expect("valid layout");
        assert_eq!(layout.extent(dimensions(3, 4)), Vec2::new(46.0, 34.0));
    }

    #[test]
    fn quads_follow_visit_state_and_highlight() {
        let mut scene = Scene::new(dimensions(1, 3), CellLayout::default());
        let visited = CellView {
            visited: true,
            ..CellView::UNTOUCHED
        };
        scene.sync([
            (CellCoord::new(0, 0), visited),
            (CellCoord::new(0, 1), visited),
            (CellCoord::new(5, 5), visited),
        ]);
        scene.highlight = Some(CellCoord::new(0, 1));

        let palette = Palette::default();
        let colors: Vec<_> = scene.quads(&palette).iter().map(|quad| quad.color).collect();
        assert_eq!(
            colors,
            vec![palette.visited, palette.current, palette.unvisited]
        );
    }

    #[test]
    fn highlight_is_a_pale_tint_of_the_unvisited_fill() {
        let palette = Palette::default();
        assert_eq!(
            palette.current,
            Color {
                red: 0.5,
                green: 0.5,
                blue: 1.0,
                alpha: 1.0,
            }
        );
        assert_ne!(palette.current, palette.visited);
        assert_ne!(palette.current, palette.unvisited);

        let custom = Palette::from_base(Color::WHITE, Color::BLACK, Color::BLACK);
        assert_eq!(custom.current, Color::from_rgb_u8(0, 0, 0).tint(0.5));
        assert_eq!(Color::BLACK.tint(2.0), Color::WHITE);
    }
}
