//! Drawing surfaces.
//!
//! [`Surface`] is the small slice of a 2D canvas API the renderer needs. The
//! browser canvas, a raster buffer or a terminal grid can all sit behind it.

/// Stroke color and width, as HSL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub line_width: f64,
}

impl StrokeStyle {
    pub fn from_hue(hue: f64) -> Self {
        Self {
            hue,
            saturation: 80.0,
            lightness: 60.0,
            line_width: 2.0,
        }
    }
}

pub trait Surface: Send {
    /// Width and height in drawing units
    fn size(&self) -> (f64, f64);
    fn clear(&mut self);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self, style: &StrokeStyle);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Stroke(StrokeStyle),
}

/// Keeps every command since the last `clear`, plus a frame count.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            frames: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of times the surface was cleared, i.e. frames started
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Points of the current frame's path, in drawing order.
    pub fn path_points(&self) -> Vec<(f64, f64)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::MoveTo(x, y) | DrawCommand::LineTo(x, y) => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke(_)))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.frames += 1;
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo(x, y));
    }

    fn stroke(&mut self, style: &StrokeStyle) {
        self.commands.push(DrawCommand::Stroke(*style));
    }
}

const TEXT_BLANK: char = ' ';
const TEXT_INK: char = '•';

/// Character grid, one cell per drawing unit. Used by the terminal front end.
#[derive(Debug, Clone)]
pub struct TextSurface {
    columns: usize,
    rows: usize,
    cells: Vec<char>,
    path: Vec<(f64, f64)>,
}

impl TextSurface {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![TEXT_BLANK; columns * rows],
            path: Vec::new(),
        }
    }

    /// The grid as text, rows separated by newlines, trailing blanks trimmed.
    pub fn render(&self) -> String {
        if self.columns == 0 {
            return String::new();
        }
        self.cells
            .chunks(self.columns)
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn plot(&mut self, x: f64, y: f64) {
        if self.columns == 0 || self.rows == 0 || !x.is_finite() || !y.is_finite() {
            return;
        }
        let col = (x.round().max(0.0) as usize).min(self.columns - 1);
        let row = (y.round().max(0.0) as usize).min(self.rows - 1);
        self.cells[row * self.columns + col] = TEXT_INK;
    }

    fn plot_segment(&mut self, (x0, y0): (f64, f64), (x1, y1): (f64, f64)) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            self.plot(x0 + (x1 - x0) * t, y0 + (y1 - y0) * t);
        }
    }
}

impl Surface for TextSurface {
    fn size(&self) -> (f64, f64) {
        // cells are addressed 0..=n-1
        (
            self.columns.saturating_sub(1) as f64,
            self.rows.saturating_sub(1) as f64,
        )
    }

    fn clear(&mut self) {
        self.cells.fill(TEXT_BLANK);
        self.path.clear();
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.clear();
        self.path.push((x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push((x, y));
    }

    fn stroke(&mut self, _style: &StrokeStyle) {
        let path = std::mem::take(&mut self.path);
        match path.as_slice() {
            [] => {}
            [only] => self.plot(only.0, only.1),
            _ => {
                for pair in path.windows(2) {
                    self.plot_segment(pair[0], pair[1]);
                }
            }
        }
        self.path = path;
    }
}
