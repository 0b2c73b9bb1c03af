//! Slime mould demo model shared by the terminal binary and tests.
//!
//! A [`Session`] walks through the drawing tool's steps: show a random
//! barrier map, let the user paint extra barriers, pick a source and a
//! target, then replay the search as slime spreading over the map and
//! finally draw the shortest path.

pub mod config;

pub use config::{ConfigError, SlimeConfig};
pub use slime_term::Input;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use slime_core::{Cell, Grid};
use slime_map::{BarrierGen, Brush, MapGenError, clear_around, store};
use slime_paths::{Frame, Playback, SearchError, manhattan, search};
use slime_term::{Color, Glyph, Terminal};

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Black, drawn as the terminal's own background.
pub const COL_BACKGROUND: Color = Color::Default;
pub const COL_BARRIER: Color = Color::Rgb(25, 25, 25);
pub const COL_USER_BARRIER: Color = Color::Rgb(255, 255, 255);
pub const COL_SLIME: Color = Color::Rgb(194, 178, 39);
pub const COL_VEIN: Color = Color::Rgb(161, 150, 66);
pub const COL_SLIME_TRAIL: Color = Color::Rgb(97, 92, 46);
pub const COL_DARK_SLIME: Color = Color::Rgb(22, 26, 10);
pub const COL_PATH: Color = Color::Rgb(232, 216, 67);
pub const COL_SOURCE: Color = Color::Rgb(0, 255, 0);
pub const COL_TARGET: Color = Color::Rgb(255, 255, 255);
pub const COL_BUTTON: Color = Color::Rgb(110, 24, 24);
pub const COL_BUTTON_TEXT: Color = Color::Rgb(255, 248, 219);
const COL_STATUS_FG: Color = Color::Rgb(200, 200, 200);

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// Something a [`Session`] can paint on.
pub trait Canvas {
    fn put(&mut self, cell: Cell, glyph: Glyph);

    fn print(&mut self, cell: Cell, text: &str, fg: Color, bg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(cell.shift(i as i32, 0), Glyph::new(ch, fg, bg));
        }
    }
}

impl Canvas for Terminal {
    fn put(&mut self, cell: Cell, glyph: Glyph) {
        Terminal::put(self, cell, glyph);
    }

    fn print(&mut self, cell: Cell, text: &str, fg: Color, bg: Color) {
        Terminal::print(self, cell, text, fg, bg);
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Where the session is in the draw / pick / animate cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A random map is shown, waiting for Start.
    Idle,
    /// Clicks paint barriers. Consecutive clicks are joined by a stroke.
    DrawBarriers { prev: Option<Cell>, drawing: bool },
    PickSource,
    PickTarget { source: Cell },
    /// The search has run and its playback is being replayed.
    Animating,
    Finished,
}

/// What the caller should do after [`Session::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Animation state drawn over a map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shade {
    Bare,
    Slime,
    Decayed,
    Vein,
    Path,
}

/// The demo state machine. It never touches the terminal: input comes in
/// through [`update`](Self::update), time through [`tick`](Self::tick), and
/// [`draw`](Self::draw) paints on any [`Canvas`].
pub struct Session {
    config: SlimeConfig,
    barriers: BarrierGen<StdRng>,
    seed: u64,
    grid: Grid,
    // User-painted barriers, drawn brighter than generated ones.
    drawn: Grid,
    phase: Phase,
    source: Option<Cell>,
    target: Option<Cell>,
    playback: Option<Playback>,
    shades: Vec<Shade>,
    path: Vec<Cell>,
    status: String,
}

impl Session {
    /// Start a session on a freshly generated map.
    ///
    /// The map generator is seeded from `config.grid.seed`, or from a
    /// random seed that is reported in the status line.
    pub fn new(config: SlimeConfig) -> Result<Self, MapGenError> {
        let seed = config.grid.seed.unwrap_or_else(|| rand::rng().random());
        let mut barriers = BarrierGen::new(StdRng::seed_from_u64(seed));
        let grid = barriers.generate(config.grid.width, config.grid.height, config.grid.density)?;
        log::debug!("session started with seed {seed}");

        let mut session = Self {
            config,
            barriers,
            seed,
            drawn: Grid::new(grid.width(), grid.height()),
            shades: vec![Shade::Bare; grid.len()],
            grid,
            phase: Phase::Idle,
            source: None,
            target: None,
            playback: None,
            path: Vec::new(),
            status: String::new(),
        };
        session.status = session.idle_status();
        Ok(session)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Barriers painted by the user since the map was generated or loaded.
    pub fn drawn(&self) -> &Grid {
        &self.drawn
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SlimeConfig {
        &self.config
    }

    pub fn source(&self) -> Option<Cell> {
        self.source
    }

    pub fn target(&self) -> Option<Cell> {
        self.target
    }

    /// The shortest path, once an animation has finished with one.
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Handle one input.
    pub fn update(&mut self, input: Input) -> Control {
        match input {
            Input::Key('q') | Input::Escape => return Control::Quit,
            Input::Key('r') => self.regenerate(),
            Input::Key('s') => self.save(),
            Input::Key('l') => self.load(),
            Input::Key(_) => {}
            Input::Enter => self.advance(),
            Input::Click(cell) => self.click(cell),
            Input::RightClick(_) => self.toggle_drawing(),
            Input::Resize(w, h) => self.resized(w, h),
        }
        Control::Continue
    }

    /// Advance the animation by one frame.
    ///
    /// Returns whether anything changed. Errors only on a corrupted search
    /// result.
    pub fn tick(&mut self) -> Result<bool, SearchError> {
        if self.phase != Phase::Animating {
            return Ok(false);
        }
        let Some(playback) = self.playback.as_mut() else {
            self.phase = Phase::Finished;
            return Ok(true);
        };
        match playback.next() {
            Some(frame) => self.apply(&frame?),
            None => self.finish()?,
        }
        Ok(true)
    }

    /// Paint the map and the status row below it.
    pub fn draw(&self, canvas: &mut impl Canvas) {
        for (cell, blocked) in self.grid.iter() {
            canvas.put(cell, self.glyph_at(cell, blocked));
        }

        let row = self.grid.height();
        let width = self.grid.width().max(0) as usize;
        let text: String = self.status.chars().take(width).collect();
        canvas.print(
            Cell::new(0, row),
            &format!("{text:<width$}"),
            COL_STATUS_FG,
            COL_BACKGROUND,
        );
        if let Some((at, label)) = self.button() {
            canvas.print(at, label, COL_BUTTON_TEXT, COL_BUTTON);
        }
    }

    // ---- Phase transitions ----

    fn advance(&mut self) {
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::DrawBarriers {
                    prev: None,
                    drawing: true,
                };
                self.status =
                    "Click to draw barriers, right click to pause drawing, Enter to continue."
                        .to_string();
            }
            Phase::DrawBarriers { .. } => {
                self.phase = Phase::PickSource;
                self.status = "Click the source cell.".to_string();
            }
            Phase::Finished => self.regenerate(),
            Phase::PickSource | Phase::PickTarget { .. } | Phase::Animating => {}
        }
    }

    fn click(&mut self, cell: Cell) {
        if self.button_hit(cell) {
            self.advance();
            return;
        }
        if !self.grid.in_bounds(cell) {
            return;
        }
        match self.phase {
            Phase::DrawBarriers {
                prev,
                drawing: true,
            } => {
                self.paint(prev, cell);
                self.phase = Phase::DrawBarriers {
                    prev: Some(cell),
                    drawing: true,
                };
            }
            Phase::PickSource => {
                self.source = Some(cell);
                self.phase = Phase::PickTarget { source: cell };
                self.status = format!("Source {cell}. Click the target cell.");
            }
            Phase::PickTarget { source } => {
                self.target = Some(cell);
                self.start_search(source, cell);
            }
            _ => {}
        }
    }

    fn toggle_drawing(&mut self) {
        if let Phase::DrawBarriers { drawing, .. } = self.phase {
            // Re-enabling starts a new stroke.
            self.phase = Phase::DrawBarriers {
                prev: None,
                drawing: !drawing,
            };
            self.status = if drawing {
                "Drawing paused. Right click to resume, Enter to continue.".to_string()
            } else {
                "Drawing resumed.".to_string()
            };
        }
    }

    fn paint(&mut self, prev: Option<Cell>, cell: Cell) {
        let brush = Brush::new(self.config.brush.radius);
        for grid in [&mut self.grid, &mut self.drawn] {
            match prev {
                Some(from) => brush.stroke(grid, from, cell, true),
                None => {
                    brush.stamp(grid, cell, true);
                }
            }
        }
    }

    fn start_search(&mut self, source: Cell, target: Cell) {
        let radius = self.config.brush.clear_radius;
        for cell in [source, target] {
            clear_around(&mut self.grid, cell, radius);
            clear_around(&mut self.drawn, cell, radius);
        }

        match search(&self.grid, source, target) {
            Ok(result) => {
                self.status = format!(
                    "Slime spreading from {source} to {target}: {} cells to explore.",
                    result.visit_order().len()
                );
                self.playback = Some(Playback::new(result, self.config.animation.playback()));
                self.phase = Phase::Animating;
            }
            Err(e) => {
                log::warn!("search from {source} to {target} failed: {e}");
                self.status = format!("Search failed: {e}");
                self.phase = Phase::Finished;
            }
        }
    }

    fn apply(&mut self, frame: &Frame) {
        for &cell in &frame.explored {
            self.set_shade(cell, Shade::Slime);
        }
        for &cell in &frame.decayed {
            self.set_shade(cell, Shade::Decayed);
        }
        for &cell in &frame.vein {
            self.set_shade(cell, Shade::Vein);
        }
    }

    fn finish(&mut self) -> Result<(), SearchError> {
        self.phase = Phase::Finished;
        let Some(playback) = self.playback.take() else {
            return Ok(());
        };
        match playback.final_path() {
            Ok(path) => {
                for &cell in &path {
                    self.set_shade(cell, Shade::Path);
                }
                let result = playback.result();
                self.status = format!(
                    "Path found: {} steps (straight line {}). Enter for a new map.",
                    path.len().saturating_sub(1),
                    manhattan(result.source(), result.target())
                );
                self.path = path;
            }
            Err(SearchError::NotFound) => {
                self.status = "No valid path exists. Enter for a new map.".to_string();
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    // ---- Map management ----

    fn regenerate(&mut self) {
        let g = &self.config.grid;
        match self.barriers.generate(g.width, g.height, g.density) {
            Ok(grid) => {
                self.reset(grid);
                self.status = self.idle_status();
            }
            Err(e) => {
                log::warn!("could not regenerate the map: {e}");
                self.status = format!("Could not generate a map: {e}");
            }
        }
    }

    fn save(&mut self) {
        let path = &self.config.storage.map_path;
        self.status = match store::save(path, &self.grid) {
            Ok(()) => format!("Saved map to {}.", path.display()),
            Err(e) => {
                log::warn!("saving {} failed: {e}", path.display());
                format!("Save failed: {e}")
            }
        };
    }

    fn load(&mut self) {
        let path = self.config.storage.map_path.clone();
        match store::load(&path) {
            Ok(grid) => {
                self.reset(grid);
                self.status = format!(
                    "Loaded {}x{} map from {}. Enter to start.",
                    self.grid.width(),
                    self.grid.height(),
                    path.display()
                );
            }
            Err(e) => {
                log::warn!("loading {} failed: {e}", path.display());
                self.status = format!("Load failed: {e}");
            }
        }
    }

    fn reset(&mut self, grid: Grid) {
        self.drawn = Grid::new(grid.width(), grid.height());
        self.shades = vec![Shade::Bare; grid.len()];
        self.grid = grid;
        self.phase = Phase::Idle;
        self.source = None;
        self.target = None;
        self.playback = None;
        self.path.clear();
    }

    fn resized(&mut self, w: i32, h: i32) {
        let (need_w, need_h) = (self.grid.width(), self.grid.height() + 1);
        if w < need_w || h < need_h {
            self.status = format!("Terminal is {w}x{h}, the map needs {need_w}x{need_h}.");
        }
    }

    fn idle_status(&self) -> String {
        format!("Seed {}. Enter or Start to begin, r for a new map.", self.seed)
    }

    // ---- Drawing helpers ----

    fn index(&self, cell: Cell) -> Option<usize> {
        self.grid
            .in_bounds(cell)
            .then(|| (cell.y * self.grid.width() + cell.x) as usize)
    }

    fn set_shade(&mut self, cell: Cell, shade: Shade) {
        if let Some(i) = self.index(cell) {
            self.shades[i] = shade;
        }
    }

    fn glyph_at(&self, cell: Cell, blocked: bool) -> Glyph {
        if self.source == Some(cell) {
            return Glyph::new('S', COL_SOURCE, COL_BACKGROUND);
        }
        if self.target == Some(cell) {
            return Glyph::new('T', COL_TARGET, COL_BACKGROUND);
        }
        match self.index(cell).map_or(Shade::Bare, |i| self.shades[i]) {
            Shade::Path => Glyph::block(COL_PATH),
            Shade::Vein => Glyph::block(COL_VEIN),
            Shade::Slime => Glyph::block(COL_SLIME),
            Shade::Decayed => Glyph::new('·', COL_SLIME_TRAIL, COL_DARK_SLIME),
            Shade::Bare if self.drawn.is_blocked(cell) == Ok(true) => {
                Glyph::block(COL_USER_BARRIER)
            }
            Shade::Bare if blocked => Glyph::block(COL_BARRIER),
            Shade::Bare => Glyph::block(COL_BACKGROUND),
        }
    }

    /// The clickable button at the right end of the status row.
    fn button(&self) -> Option<(Cell, &'static str)> {
        let label = match self.phase {
            Phase::Idle => " Start ",
            Phase::DrawBarriers { .. } => " Continue ",
            Phase::Finished => " Again ",
            _ => return None,
        };
        let x = (self.grid.width() - label.len() as i32).max(0);
        Some((Cell::new(x, self.grid.height()), label))
    }

    fn button_hit(&self, cell: Cell) -> bool {
        self.button().is_some_and(|(at, label)| {
            cell.y == at.y && cell.x >= at.x && cell.x < at.x + label.len() as i32
        })
    }
}
