//! The capture → scale → subtract → render → write loop.

use std::time::{Duration, Instant};

use image::RgbaImage;

use super::fps::FpsCounter;
use super::shutdown::ShutdownSignal;
use super::PipelineError;
use crate::ascii::{
    render_ansi, render_ascii, resize_to, ColorOverride, GlyphTable, GridSize, RenderMode,
    RenderOptions, Zoom, FALLBACK_TERMINAL_SIZE,
};
use crate::camera::{Frame, FrameSource};
use crate::greenscreen::{subtract, BackgroundSample, SampleStore, DEFAULT_THRESHOLD, SAMPLE_COUNT};
use crate::terminal::TerminalOutput;

/// Pause after a failed capture before trying again.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Where the pipeline is within one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Capturing,
    GeneratingSample,
    Processing,
    Rendering,
    /// Sample generation wrote its last file
    Finished,
}

/// What the loop does with captured frames.
#[derive(Debug, Clone)]
pub enum RunMode {
    /// Render every frame to the terminal
    Render,
    /// Save raw frames as `<dir>/<n>.png` for n in `0..count`, then stop
    GenerateSamples { store: SampleStore, count: u32 },
}

impl RunMode {
    /// Sample generation with the standard frame count.
    pub fn generate(store: SampleStore) -> Self {
        RunMode::GenerateSamples {
            store,
            count: SAMPLE_COUNT,
        }
    }
}

/// Static configuration of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub mode: RenderMode,
    pub glyphs: GlyphTable,
    pub color_override: ColorOverride,
    pub zoom: Zoom,
    /// Fixed output width in columns; tracks the terminal when `None`
    pub width: Option<u16>,
    /// Fixed output height in rows; tracks the terminal when `None`
    pub height: Option<u16>,
    pub show_fps: bool,
    /// Lab distance for greenscreen; used only with a background
    pub threshold: f64,
    pub run_mode: RunMode,
    pub retry_delay: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Ascii,
            glyphs: GlyphTable::default(),
            color_override: ColorOverride::UNSET,
            zoom: Zoom::default(),
            width: None,
            height: None,
            show_fps: false,
            threshold: DEFAULT_THRESHOLD,
            run_mode: RunMode::Render,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Result of a single [`Pipeline::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A frame was drawn
    Rendered,
    /// A frame was saved as the sample with this index
    SampleSaved(u32),
    /// Capture failed; the caller should wait and retry
    CaptureFailed,
    /// Sample generation is complete
    Finished,
}

/// Counters reported when a run ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames_rendered: u64,
    pub samples_saved: u32,
    pub capture_failures: u64,
}

/// Single-threaded frame pipeline.
///
/// Owns the frame source and terminal for the whole run. Each
/// [`step`](Pipeline::step) handles exactly one captured frame.
pub struct Pipeline<S: FrameSource, T: TerminalOutput> {
    source: S,
    terminal: T,
    options: PipelineOptions,
    render: RenderOptions,
    background: Option<BackgroundSample>,
    state: PipelineState,
    /// Terminal size the grid was last computed from
    last_terminal_size: Option<(u16, u16)>,
    grid: GridSize,
    fps: FpsCounter,
    summary: RunSummary,
    sample_dir_ready: bool,
}

impl<S: FrameSource, T: TerminalOutput> Pipeline<S, T> {
    pub fn new(source: S, terminal: T, options: PipelineOptions) -> Self {
        let render = RenderOptions::new(
            options.glyphs.clone(),
            options.color_override,
            terminal.color_profile(),
        );
        let last_terminal_size = terminal.size();
        let grid = grid_for(&options, last_terminal_size);

        Self {
            source,
            terminal,
            options,
            render,
            background: None,
            state: PipelineState::Idle,
            last_terminal_size,
            grid,
            fps: FpsCounter::default(),
            summary: RunSummary::default(),
            sample_dir_ready: false,
        }
    }

    /// Enable greenscreen against `background`.
    pub fn with_background(mut self, mut background: BackgroundSample) -> Self {
        background.fit(self.scaled_grid());
        self.background = Some(background);
        self
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Full render grid in pixels.
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// The render grid after zoom.
    pub fn scaled_grid(&self) -> GridSize {
        self.grid.scaled(self.options.zoom, self.options.mode)
    }

    pub fn fps(&self) -> &FpsCounter {
        &self.fps
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn into_parts(self) -> (S, T) {
        (self.source, self.terminal)
    }

    /// Loop until `shutdown` is requested or sample generation completes.
    ///
    /// The signal is checked once per iteration, before capture.
    pub fn run(&mut self, shutdown: &ShutdownSignal) -> Result<RunSummary, PipelineError> {
        log::info!(
            "Pipeline started: {} source, {:?} mode, grid {}x{}, zoom {}",
            self.source.resolution(),
            self.options.mode,
            self.grid.width,
            self.grid.height,
            self.options.zoom.level()
        );
        if matches!(self.options.run_mode, RunMode::Render) {
            self.terminal.clear_screen()?;
            self.terminal.flush()?;
        }

        while !shutdown.is_requested() {
            match self.step()? {
                StepOutcome::CaptureFailed => std::thread::sleep(self.options.retry_delay),
                StepOutcome::Finished => break,
                StepOutcome::Rendered | StepOutcome::SampleSaved(_) => {}
            }
        }

        log::info!(
            "Pipeline stopped after {} frames ({} capture failures)",
            self.summary.frames_rendered,
            self.summary.capture_failures
        );
        Ok(self.summary)
    }

    /// Run one iteration: capture, then save or process and render.
    ///
    /// Capture errors never fail the step. Terminal, sample and
    /// processing errors do.
    pub fn step(&mut self) -> Result<StepOutcome, PipelineError> {
        if self.state == PipelineState::Finished {
            return Ok(StepOutcome::Finished);
        }
        let started = Instant::now();

        self.state = PipelineState::Capturing;
        let frame = match self.source.read_frame() {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("Capture failed: {}", e);
                self.summary.capture_failures += 1;
                self.state = PipelineState::Idle;
                return Ok(StepOutcome::CaptureFailed);
            }
        };

        if let RunMode::GenerateSamples { .. } = self.options.run_mode {
            return self.save_sample(&frame);
        }

        self.state = PipelineState::Processing;
        self.track_resize()?;
        let image = self.process(&frame)?;

        self.state = PipelineState::Rendering;
        self.draw(&image, started)?;

        self.summary.frames_rendered += 1;
        self.state = PipelineState::Idle;
        Ok(StepOutcome::Rendered)
    }

    fn save_sample(&mut self, frame: &Frame) -> Result<StepOutcome, PipelineError> {
        let RunMode::GenerateSamples { store, count } = &self.options.run_mode else {
            return Ok(StepOutcome::Finished);
        };
        self.state = PipelineState::GeneratingSample;

        if !self.sample_dir_ready {
            store.ensure_dir()?;
            self.sample_dir_ready = true;
        }

        let index = self.summary.samples_saved;
        store.save(index, &frame.image)?;
        self.summary.samples_saved += 1;

        if self.summary.samples_saved >= *count {
            log::info!(
                "Saved {} background samples to {}",
                self.summary.samples_saved,
                store.dir().display()
            );
            self.state = PipelineState::Finished;
            return Ok(StepOutcome::Finished);
        }
        self.state = PipelineState::Idle;
        Ok(StepOutcome::SampleSaved(index))
    }

    /// Recompute the grid and clear the screen if the terminal changed size.
    fn track_resize(&mut self) -> Result<(), PipelineError> {
        if self.options.width.is_some() && self.options.height.is_some() {
            return Ok(());
        }
        let Some(size) = self.terminal.size() else {
            return Ok(());
        };
        if Some(size) == self.last_terminal_size {
            return Ok(());
        }

        self.last_terminal_size = Some(size);
        self.grid = grid_for(&self.options, Some(size));
        log::info!(
            "Terminal resized to {}x{}, render grid now {}x{}",
            size.0,
            size.1,
            self.grid.width,
            self.grid.height
        );
        self.terminal.clear_screen()?;
        Ok(())
    }

    /// Scale the frame to the zoomed grid and apply the greenscreen.
    fn process(&mut self, frame: &Frame) -> Result<RgbaImage, PipelineError> {
        let scaled = self.scaled_grid();
        let mut image = resize_to(&frame.to_rgba(), scaled);

        if let Some(background) = self.background.as_mut() {
            background.fit(scaled);
            subtract(
                &mut image,
                Some(background.fitted()),
                self.options.threshold,
            )?;
        }
        Ok(image)
    }

    fn draw(&mut self, image: &RgbaImage, started: Instant) -> Result<(), PipelineError> {
        let text = match self.options.mode {
            RenderMode::Ascii => {
                render_ascii(self.grid.width, self.grid.height, &self.render, image)
            }
            RenderMode::Ansi => render_ansi(self.render.profile, image)?,
        };

        self.terminal.move_cursor_home()?;
        self.terminal.clear_from_cursor()?;
        self.terminal.write(&text)?;

        self.fps.record(started.elapsed());
        if self.options.show_fps {
            let row = u16::try_from(self.grid.lines(self.options.mode)).unwrap_or(u16::MAX);
            self.terminal.move_cursor_to(0, row)?;
            self.terminal.write(&self.fps.label())?;
        }
        self.terminal.flush()?;
        Ok(())
    }
}

/// Render grid from explicit dimensions, falling back to the terminal size
/// and then to 80x24 per axis.
fn grid_for(options: &PipelineOptions, terminal_size: Option<(u16, u16)>) -> GridSize {
    let (detected_cols, detected_rows) = terminal_size.unwrap_or(FALLBACK_TERMINAL_SIZE);
    let columns = options.width.unwrap_or(detected_cols);
    let rows = options.height.unwrap_or(detected_rows);
    GridSize::for_terminal(columns, rows, options.mode)
}
