/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` (a grid of Cell)
///   2. Compare each cell with `back` (the previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// One maze cell occupies CELL_W terminal columns. Inside a frame the
/// compose order is grid cells → gems → player → HUD text; later writes
/// overwrite earlier ones, so that order is also the z-order. Whenever
/// the active level or phase changes, the back buffer is invalidated
/// and the screen cleared, which re-fits the drawing surface to the new
/// map footprint.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::tile::Tile;
use crate::sim::world::{GameState, Phase};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for every empty terminal cell. Using the
    /// same RGB for `Clear` and for cell backgrounds keeps inter-row gap
    /// pixels the same color as the cells on VTE-based terminals.
    const BASE_BG: Color = Color::Rgb { r: 18, g: 18, b: 30 };

    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::White,
        bg: Cell::BASE_BG,
    };

    /// Sentinel that differs from any real cell; filling the back buffer
    /// with it forces a full repaint on the next diff.
    const INVALID: Cell = Cell {
        ch: '\0',
        fg: Color::Magenta,
        bg: Color::Magenta,
    };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        // Reset → BASE_BG so every cell carries an explicit background,
        // never the terminal default.
        let bg = match bg {
            Color::Reset => Self::BASE_BG,
            other => other,
        };
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y); each char occupies one column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell::new(ch, fg, bg));
            cx += 1;
        }
    }
}

// ── Renderer ──

/// Terminal columns per maze cell (the tile size of the surface).
const CELL_W: usize = 2;

/// Vertical offsets
const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;

const HUD_BG: Color = Color::Rgb { r: 20, g: 20, b: 60 };
const WALL_FG: Color = Color::Rgb { r: 110, g: 110, b: 145 };
const WALL_BG: Color = Color::Rgb { r: 58, g: 58, b: 84 };
const FLOOR_BG: Color = Color::Rgb { r: 28, g: 28, b: 44 };
const PLAYER_FG: Color = Color::Rgb { r: 255, g: 214, b: 80 };
const MSG_BG: Color = Color::Rgb { r: 200, g: 180, b: 50 };

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_level: Option<usize>,
    last_phase: Option<Phase>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_level: None,
            last_phase: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front everywhere.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &GameState) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        // Level or phase change → surface reset for the new footprint.
        let surface_changed = self.last_level != Some(world.current_level)
            || self.last_phase != Some(world.phase);
        if surface_changed {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_level = Some(world.current_level);
            self.last_phase = Some(world.phase);
        }

        // Build front buffer
        self.front.clear();
        match world.phase {
            Phase::Playing => self.compose_game(world),
            Phase::AllComplete => self.compose_all_complete(world),
        }

        // Diff and emit
        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Explicit base colors at frame start. Not ResetColor: the
        // terminal's native default may differ from BASE_BG and would
        // show as line artifacts.
        queue!(
            self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose_game(&mut self, w: &GameState) {
        let buf_w = self.front.width;

        // ── HUD row ──
        for x in 0..buf_w {
            self.front.set(x, HUD_ROW, Cell::new(' ', Color::White, HUD_BG));
        }
        let hud = format!(
            " Maze.{:<2} {}  ● {} left ",
            w.current_level + 1,
            w.level.name,
            w.level.gems_left(),
        );
        self.front.put_str(0, HUD_ROW, &hud, Color::White, HUD_BG);

        // ── Grid cells ──
        for r in 0..w.level.rows() {
            let row = MAP_ROW + r;
            if row >= self.front.height {
                break;
            }
            for c in 0..w.level.cols() {
                let col = c * CELL_W;
                if col + 1 >= buf_w {
                    break;
                }
                let (ch, fg, bg) = match w.level.tile_at(r, c) {
                    Tile::Wall => ('█', WALL_FG, WALL_BG),
                    Tile::Floor => (' ', Color::White, FLOOR_BG),
                };
                self.front.set(col, row, Cell::new(ch, fg, bg));
                self.front.set(col + 1, row, Cell::new(ch, fg, bg));
            }
        }

        // ── Gems (uncollected only; collected gems vanish) ──
        for gem in w.level.gems() {
            if gem.collected {
                continue;
            }
            let row = MAP_ROW + gem.row;
            let col = gem.col * CELL_W;
            let [r, g, b] = gem.color;
            self.front.set(col, row, Cell::new('●', Color::Rgb { r, g, b }, FLOOR_BG));
        }

        // ── Player ──
        let prow = MAP_ROW + w.player.row;
        let pcol = w.player.col * CELL_W;
        self.front.set(pcol, prow, Cell::new('█', PLAYER_FG, FLOOR_BG));
        self.front.set(pcol + 1, prow, Cell::new('█', PLAYER_FG, FLOOR_BG));

        // ── Message bar ──
        let msg_row = MAP_ROW + w.level.rows() + 1;
        if msg_row < self.front.height && !w.message.is_empty() {
            let msg = format!(" ◈ {} ", w.message);
            for x in 0..buf_w {
                self.front.set(x, msg_row, Cell::new(' ', Color::Black, MSG_BG));
            }
            self.front.put_str(0, msg_row, &msg, Color::Black, MSG_BG);
        }

        // ── Help bar ──
        let help_row = MAP_ROW + w.level.rows() + 3;
        if help_row < self.front.height {
            let help = " ←↑↓→ / WASD: Move   ESC/Q: Quit";
            self.front.put_str(0, help_row, help, Color::DarkGrey, Color::Reset);
        }
    }

    fn compose_all_complete(&mut self, w: &GameState) {
        let box_art = [
            "╔══════════════════════════════════╗",
            "║   ★  EVERY GEM COLLECTED!  ★    ║",
            "╚══════════════════════════════════╝",
        ];
        for (i, l) in box_art.iter().enumerate() {
            self.front
                .put_str(4, 4 + i, l, Color::Rgb { r: 255, g: 220, b: 50 }, Color::Reset);
        }
        let levels = format!("◈ All {} mazes cleared!", w.total_levels);
        self.front.put_str(6, 9, &levels, Color::Rgb { r: 80, g: 255, b: 80 }, Color::Reset);
        self.front.put_str(6, 11, "▸ ESC / Q: Quit", Color::DarkGrey, Color::Reset);
    }
}
