//! Render grid dimensions, zoom and render mode.

/// Terminal size assumed when it cannot be detected (columns, rows).
pub const FALLBACK_TERMINAL_SIZE: (u16, u16) = (80, 24);

/// Which renderer draws the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// One glyph per pixel
    #[default]
    Ascii,
    /// One half-block cell per two stacked pixels
    Ansi,
}

impl RenderMode {
    /// Pixel rows consumed by one line of terminal output.
    pub fn pixel_rows_per_line(&self) -> u32 {
        match self {
            RenderMode::Ascii => 1,
            RenderMode::Ansi => 2,
        }
    }
}

/// Zoom level from 1 (25%) to 4 (100%) of the render grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zoom(u8);

impl Zoom {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    /// Build a zoom level, clamping out-of-range values into 1..=4.
    pub fn new(level: u32) -> Self {
        Self(level.clamp(Self::MIN as u32, Self::MAX as u32) as u8)
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    /// Fraction of the grid used, 0.25 through 1.0.
    pub fn factor(&self) -> f64 {
        self.0 as f64 / Self::MAX as f64
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

/// Size of a pixel grid the renderers walk.
///
/// In ASCII mode this equals the terminal cell grid. In ANSI mode the
/// height is doubled since every cell shows two pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel grid covering `columns` x `rows` terminal cells.
    pub fn for_terminal(columns: u16, rows: u16, mode: RenderMode) -> Self {
        Self {
            width: columns as u32,
            height: rows as u32 * mode.pixel_rows_per_line(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of terminal lines this grid occupies when rendered.
    pub fn lines(&self, mode: RenderMode) -> u32 {
        self.height / mode.pixel_rows_per_line()
    }

    /// The grid scaled by `zoom`.
    ///
    /// Each axis becomes `floor(dim * zoom / 4)`, capped at the full grid.
    /// In ANSI mode the height is rounded down to an even number, with a
    /// minimum of 2 whenever the full grid is at least that tall.
    ///
    /// # Example
    /// ```
    /// use termcam::ascii::{GridSize, RenderMode, Zoom};
    ///
    /// let grid = GridSize::new(80, 24);
    /// assert_eq!(grid.scaled(Zoom::new(2), RenderMode::Ascii), GridSize::new(40, 12));
    /// ```
    pub fn scaled(&self, zoom: Zoom, mode: RenderMode) -> GridSize {
        let factor = zoom.factor();
        let width = ((self.width as f64 * factor) as u32).min(self.width);
        let mut height = ((self.height as f64 * factor) as u32).min(self.height);

        if mode == RenderMode::Ansi {
            height -= height % 2;
            if height == 0 && self.height >= 2 {
                height = 2;
            }
        }

        GridSize { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_clamps() {
        assert_eq!(Zoom::new(0).level(), 1);
        assert_eq!(Zoom::new(3).level(), 3);
        assert_eq!(Zoom::new(10).level(), 4);
        assert_eq!(Zoom::default().level(), 4);
    }

    #[test]
    fn test_zoom_factor() {
        assert_eq!(Zoom::new(1).factor(), 0.25);
        assert_eq!(Zoom::new(4).factor(), 1.0);
    }

    #[test]
    fn test_scaled_zoom_levels() {
        let grid = GridSize::new(80, 24);
        let cases = [(1, 20, 6), (2, 40, 12), (3, 60, 18), (4, 80, 24)];
        for (zoom, w, h) in cases {
            assert_eq!(
                grid.scaled(Zoom::new(zoom), RenderMode::Ascii),
                GridSize::new(w, h),
                "zoom {}",
                zoom
            );
        }
    }

    #[test]
    fn test_scaled_never_exceeds_grid() {
        let grid = GridSize::new(1000, 1000);
        let scaled = grid.scaled(Zoom::new(4), RenderMode::Ascii);
        assert!(scaled.width <= 1000 && scaled.height <= 1000);
    }

    #[test]
    fn test_terminal_grid_doubles_in_ansi() {
        assert_eq!(
            GridSize::for_terminal(80, 24, RenderMode::Ascii),
            GridSize::new(80, 24)
        );
        let ansi = GridSize::for_terminal(80, 24, RenderMode::Ansi);
        assert_eq!(ansi, GridSize::new(80, 48));
        assert_eq!(ansi.lines(RenderMode::Ansi), 24);
    }

    #[test]
    fn test_ansi_scaled_height_is_even() {
        // 48 * 0.75 = 36, already even
        let grid = GridSize::new(80, 48);
        assert_eq!(grid.scaled(Zoom::new(3), RenderMode::Ansi).height, 36);

        // 10 * 0.25 = 2.5 -> 2
        let grid = GridSize::new(10, 10);
        assert_eq!(grid.scaled(Zoom::new(1), RenderMode::Ansi).height, 2);

        // 6 * 0.75 = 4.5 -> 4
        let grid = GridSize::new(10, 6);
        assert_eq!(grid.scaled(Zoom::new(3), RenderMode::Ansi).height, 4);
    }

    #[test]
    fn test_ansi_scaled_height_minimum() {
        // 4 * 0.25 = 1 -> rounded down to 0 -> bumped to 2
        let grid = GridSize::new(8, 4);
        assert_eq!(grid.scaled(Zoom::new(1), RenderMode::Ansi).height, 2);
    }

    #[test]
    fn test_empty_grid() {
        assert!(GridSize::new(0, 10).is_empty());
        let scaled = GridSize::default().scaled(Zoom::new(4), RenderMode::Ansi);
        assert!(scaled.is_empty());
    }
}
