use std::{fmt, sync::mpsc, time::Duration};

use anyhow::{Context, Result};
use maze_carver_core::GenerationError;
use maze_carver_rendering::{
    render_text, FrameControl, FrameInput, Presentation, RenderingBackend, Scene, StepPacer,
};
use maze_carver_rendering_macroquad::MacroquadBackend;
use maze_carver_system_generator::GeneratorHandle;
use maze_carver_world::query;

use crate::config::PresentationConfig;

/// Outcome of a run completed without a window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HeadlessReport {
    pub(crate) seed: u64,
    pub(crate) steps: usize,
    pub(crate) visited: usize,
    pub(crate) cells: usize,
    pub(crate) perfect: bool,
    pub(crate) maze: String,
}

impl fmt::Display for HeadlessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.maze)?;
        write!(
            f,
            "seed={} steps={} visited={}/{}",
            self.seed, self.steps, self.visited, self.cells
        )
    }
}

/// Generates the whole maze without pacing.
pub(crate) fn headless(mut generator: GeneratorHandle) -> Result<HeadlessReport> {
    let steps = generator
        .run_to_completion()
        .context("maze generation failed")?;
    let dimensions = generator.dimensions();

    Ok(HeadlessReport {
        seed: generator.seed(),
        steps,
        visited: generator.visited_count(),
        cells: dimensions.cell_count(),
        perfect: query::is_perfect_maze(generator.grid()),
        maze: render_text(dimensions, generator.cells().map(|(_, view)| view)),
    })
}

/// Animates generation in a macroquad window until done or cancelled.
pub(crate) fn windowed(generator: GeneratorHandle, config: &PresentationConfig) -> Result<()> {
    let mut scene = Scene::new(generator.dimensions(), config.layout()?);
    scene.sync(generator.cells());
    let presentation = Presentation::new(Presentation::DEFAULT_TITLE, config.palette(), scene)
        .with_window_size(config.window_width, config.window_height);

    let pacer = StepPacer::new(
        config.step_interval(),
        StepPacer::DEFAULT_MAX_STEPS_PER_FRAME,
    );
    let mut session = Session::new(
        generator,
        pacer,
        config.hold_after_done(),
        config.highlight_current,
    );
    let (failure_sender, failure_receiver) = mpsc::channel::<GenerationError>();

    MacroquadBackend::new()
        .with_vsync(true)
        .run(presentation, move |frame_dt, input, scene| {
            match session.frame(frame_dt, input, scene) {
                Ok(control) => control,
                Err(error) => {
                    let _ = failure_sender.send(error);
                    FrameControl::Exit
                }
            }
        })
        .context("rendering backend failed")?;

    if let Ok(error) = failure_receiver.try_recv() {
        return Err(error).context("maze generation failed");
    }
    Ok(())
}

/// Per-frame driver joining the generator, the pacer and the completion hold.
#[derive(Debug)]
struct Session {
    generator: GeneratorHandle,
    pacer: StepPacer,
    hold_after_done: Option<Duration>,
    held: Duration,
    highlight_current: bool,
}

impl Session {
    fn new(
        generator: GeneratorHandle,
        pacer: StepPacer,
        hold_after_done: Option<Duration>,
        highlight_current: bool,
    ) -> Self {
        Self {
            generator,
            pacer,
            hold_after_done,
            held: Duration::ZERO,
            highlight_current,
        }
    }

    fn frame(
        &mut self,
        frame_dt: Duration,
        input: FrameInput,
        scene: &mut Scene,
    ) -> Result<FrameControl, GenerationError> {
        if input.quit_requested {
            tracing::info!(
                visited = self.generator.visited_count(),
                done = self.generator.is_done(),
                "run cancelled"
            );
            return Ok(FrameControl::Exit);
        }

        if self.generator.is_done() {
            self.held = self.held.saturating_add(frame_dt);
            return Ok(match self.hold_after_done {
                Some(hold) if self.held >= hold => FrameControl::Exit,
                _ => FrameControl::Continue,
            });
        }

        for _ in 0..self.pacer.advance(frame_dt) {
            if self.generator.is_done() {
                break;
            }
            let _ = self.generator.step()?;
        }

        scene.sync(self.generator.cells());
        scene.highlight = (self.highlight_current && !self.generator.is_done())
            .then(|| self.generator.current());
        Ok(FrameControl::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_carver_core::CellCoord;
    use maze_carver_rendering::CellLayout;
    use maze_carver_system_generator::initialize;

    const FRAME: Duration = Duration::from_millis(50);

    fn session(rows: u32, columns: u32, hold: Option<Duration>) -> (Session, Scene) {
        let generator = initialize(rows, columns, Some(3)).expect("generator");
        let scene = Scene::new(generator.dimensions(), CellLayout::default());
        let session = Session::new(generator, StepPacer::new(FRAME, 4), hold, true);
        (session, scene)
    }

    #[test]
    fn headless_report_covers_every_cell() {
        let report = headless(initialize(4, 5, Some(9)).expect("generator")).expect("report");

        assert_eq!(report.seed, 9);
        assert_eq!(report.visited, 20);
        assert_eq!(report.cells, 20);
        assert!(report.perfect);
        assert!(report.steps >= 19);
        assert_eq!(report.maze.lines().count(), 9);
        assert!(report.to_string().ends_with("visited=20/20"));
        assert!(!report.maze.contains('#'));
    }

    #[test]
    fn frames_advance_the_generator_at_the_paced_rate() {
        let (mut session, mut scene) = session(3, 3, None);

        let control = session
            .frame(Duration::from_millis(20), FrameInput::default(), &mut scene)
            .expect("frame");
        assert_eq!(control, FrameControl::Continue);
        assert_eq!(session.generator.visited_count(), 1);
        assert!(scene.cell(CellCoord::new(0, 0)).expect("cell").visited);

        let _ = session
            .frame(FRAME, FrameInput::default(), &mut scene)
            .expect("frame");
        assert_eq!(session.generator.visited_count(), 2);
        assert_eq!(scene.highlight, Some(session.generator.current()));
    }

    #[test]
    fn quit_cancels_an_unfinished_run() {
        let (mut session, mut scene) = session(6, 6, None);
        let control = session
            .frame(
                FRAME,
                FrameInput {
                    quit_requested: true,
                },
                &mut scene,
            )
            .expect("frame");

        assert_eq!(control, FrameControl::Exit);
        assert!(!session.generator.is_done());
    }

    #[test]
    fn finished_maze_is_held_before_exit() {
        let (mut session, mut scene) = session(2, 2, Some(Duration::from_millis(100)));
        while !session.generator.is_done() {
            let _ = session
                .frame(FRAME, FrameInput::default(), &mut scene)
                .expect("frame");
        }
        assert_eq!(scene.highlight, None);
        assert_eq!(scene.quads(&Default::default()).len(), 4);

        let first = session
            .frame(FRAME, FrameInput::default(), &mut scene)
            .expect("frame");
        let second = session
            .frame(FRAME, FrameInput::default(), &mut scene)
            .expect("frame");
        assert_eq!((first, second), (FrameControl::Continue, FrameControl::Exit));
    }

    #[test]
    fn zero_hold_waits_for_the_user() {
        let (mut session, mut scene) = session(1, 2, None);
        for _ in 0..100 {
            assert_eq!(
                session
                    .frame(Duration::from_secs(1), FrameInput::default(), &mut scene)
                    .expect("frame"),
                FrameControl::Continue
            );
        }
        assert!(session.generator.is_done());
    }
}
