use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use maze_carver_rendering::{CellLayout, Color, Palette, Presentation, StepPacer};
use serde::Deserialize;

/// Presentation settings read from an optional TOML file.
///
/// Missing keys fall back to the defaults; unknown keys are rejected.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PresentationConfig {
    pub(crate) cell_size: f32,
    pub(crate) gap: f32,
    pub(crate) window_width: u32,
    pub(crate) window_height: u32,
    pub(crate) step_interval_ms: u64,
    /// Zero keeps the finished maze on screen until the user quits.
    pub(crate) hold_after_done_ms: u64,
    pub(crate) highlight_current: bool,
    pub(crate) colors: ColorConfig,
}

/// Byte triples for each palette entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ColorConfig {
    pub(crate) background: [u8; 3],
    pub(crate) visited: [u8; 3],
    pub(crate) unvisited: [u8; 3],
    /// Unset means a pale tint of `unvisited`.
    pub(crate) current: Option<[u8; 3]>,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            cell_size: CellLayout::DEFAULT_CELL_SIZE,
            gap: CellLayout::DEFAULT_GAP,
            window_width: Presentation::DEFAULT_WIDTH,
            window_height: Presentation::DEFAULT_HEIGHT,
            step_interval_ms: StepPacer::DEFAULT_INTERVAL.as_millis() as u64,
            hold_after_done_ms: 5_000,
            highlight_current: false,
            colors: ColorConfig::default(),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: [0, 0, 0],
            visited: [255, 255, 255],
            unvisited: [0, 0, 255],
            current: None,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
    pub(crate) step_interval_ms: Option<u64>,
    pub(crate) hold_after_done_ms: Option<u64>,
    pub(crate) highlight_current: bool,
}

impl PresentationConfig {
    /// Reads `path` when given, otherwise returns the defaults.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded presentation config");
        Ok(config)
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse presentation config toml contents")
    }

    pub(crate) fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(step_interval_ms) = overrides.step_interval_ms {
            self.step_interval_ms = step_interval_ms;
        }
        if let Some(hold_after_done_ms) = overrides.hold_after_done_ms {
            self.hold_after_done_ms = hold_after_done_ms;
        }
        self.highlight_current |= overrides.highlight_current;
        self
    }

    pub(crate) fn layout(&self) -> Result<CellLayout> {
        CellLayout::new(self.cell_size, self.gap).context("invalid cell layout")
    }

    pub(crate) fn palette(&self) -> Palette {
        let color = |[red, green, blue]: [u8; 3]| Color::from_rgb_u8(red, green, blue);
        let mut palette = Palette::from_base(
            color(self.colors.background),
            color(self.colors.visited),
            color(self.colors.unvisited),
        );
        if let Some(current) = self.colors.current {
            palette.current = color(current);
        }
        palette
    }

    pub(crate) fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    /// `None` means hold until the user quits.
    pub(crate) fn hold_after_done(&self) -> Option<Duration> {
        (self.hold_after_done_ms > 0).then(|| Duration::from_millis(self.hold_after_done_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = PresentationConfig::parse("").expect("empty config");
        assert_eq!(config, PresentationConfig::default());
        assert_eq!(config.step_interval(), Duration::from_millis(50));
        assert_eq!(config.hold_after_done(), Some(Duration::from_secs(5)));
        assert_eq!(config.palette(), Palette::default());
    }

    #[test]
    fn file_values_replace_defaults() {
        let config = PresentationConfig::parse(
            r#"
                cell_size = 12.0
                gap = 2.0
                hold_after_done_ms = 0

                [colors]
                visited = [10, 20, 30]
            "#,
        )
        .expect("valid config");

        assert_eq!(config.cell_size, 12.0);
        assert_eq!(config.hold_after_done(), None);
        assert_eq!(config.colors.visited, [10, 20, 30]);
        assert_eq!(config.colors.unvisited, [0, 0, 255]);
        assert_eq!(config.window_width, 1024);
    }

    #[test]
    fn highlight_follows_the_unvisited_color_unless_set() {
        let derived = PresentationConfig::parse("[colors]\nunvisited = [0, 0, 0]")
            .expect("valid config")
            .palette();
        assert_eq!(derived.unvisited, Color::BLACK);
        assert_eq!(
            derived.current,
            Color::BLACK.tint(Palette::HIGHLIGHT_TINT)
        );
        assert_ne!(derived.current, derived.unvisited);

        let explicit = PresentationConfig::parse(
            "[colors]\nunvisited = [0, 0, 0]\ncurrent = [230, 60, 60]",
        )
        .expect("valid config")
        .palette();
        assert_eq!(explicit.current, Color::from_rgb_u8(230, 60, 60));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(PresentationConfig::parse("cell_sise = 10.0").is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let config = PresentationConfig::parse("step_interval_ms = 200\nhold_after_done_ms = 10")
            .expect("valid config")
            .with_overrides(Overrides {
                step_interval_ms: Some(0),
                hold_after_done_ms: None,
                highlight_current: true,
            });

        assert_eq!(config.step_interval(), Duration::ZERO);
        assert_eq!(config.hold_after_done(), Some(Duration::from_millis(10)));
        assert!(config.highlight_current);
    }

    #[test]
    fn invalid_layout_is_reported() {
        let config = PresentationConfig {
            cell_size: 0.0,
            ..PresentationConfig::default()
        };
        assert!(config.layout().is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = Path::new("/nonexistent/maze-carver.toml");
        let error = PresentationConfig::load(Some(path)).expect_err("missing file");
        assert!(error.to_string().contains("maze-carver.toml"));
    }
}
