//! Terminal renderer: a pixel buffer drawn with Unicode half blocks, and a
//! fixed 400x600 logical canvas mapped onto it.
//!
//! Each terminal cell carries two vertically stacked pixels (`▀` with
//! independent foreground and background colors), so the pixel grid is
//! `cols x rows*2`. The logical canvas is scaled uniformly to fit and
//! centered; whatever the canvas does not cover stays letterboxed.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};

use crate::config::{CANVAS_H, CANVAS_W};
use crate::geom::Rect;
use crate::sprite::Sprite;

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }
}

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);
// Sky gradient endpoints, dark at the top.
pub const SKY_TOP: Rgb = Rgb(130, 130, 255);
pub const SKY_BOT: Rgb = Rgb(206, 206, 255);
// Obstacle segments: the near (low perpendicular side) one is darker.
pub const OBSTACLE_NEAR: Rgb = Rgb(0, 150, 0);
pub const OBSTACLE_FAR: Rgb = Rgb(0, 200, 0);
pub const BUTTON: Rgb = Rgb(200, 200, 200);
const LETTERBOX: Rgb = Rgb(12, 12, 16);
const SHADOW: Rgb = Rgb(30, 30, 30);

// ── Pixel buffer with half-block rendering ──────────────────────────────────

struct PixelBuf {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![BLACK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.clear();
        self.px.resize(w * h, BLACK);
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut pen = Pen::default();

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    // A space shows only the background color.
                    pen.background(out, top)?;
                    queue!(out, style::Print(' '))?;
                } else {
                    pen.foreground(out, top)?;
                    pen.background(out, bot)?;
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                pen = Pen::default();
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

/// The colors currently programmed into the terminal, so runs of identical
/// cells emit no escape codes. `None` after a reset.
#[derive(Default)]
struct Pen {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
}

impl Pen {
    fn foreground(&mut self, out: &mut impl Write, c: Rgb) -> io::Result<()> {
        if self.fg != Some(c) {
            queue!(
                out,
                style::SetForegroundColor(CColor::Rgb { r: c.0, g: c.1, b: c.2 })
            )?;
            self.fg = Some(c);
        }
        Ok(())
    }

    fn background(&mut self, out: &mut impl Write, c: Rgb) -> io::Result<()> {
        if self.bg != Some(c) {
            queue!(
                out,
                style::SetBackgroundColor(CColor::Rgb { r: c.0, g: c.1, b: c.2 })
            )?;
            self.bg = Some(c);
        }
        Ok(())
    }
}

// ── 3x5 bitmap font ─────────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

#[rustfmt::skip]
const LETTERS: [[u8; 15]; 26] = [
    [0,1,0, 1,0,1, 1,1,1, 1,0,1, 1,0,1], // A
    [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,1,0], // B
    [0,1,1, 1,0,0, 1,0,0, 1,0,0, 0,1,1], // C
    [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,1,0], // D
    [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,1,1], // E
    [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,0,0], // F
    [0,1,1, 1,0,0, 1,0,1, 1,0,1, 0,1,1], // G
    [1,0,1, 1,0,1, 1,1,1, 1,0,1, 1,0,1], // H
    [1,1,1, 0,1,0, 0,1,0, 0,1,0, 1,1,1], // I
    [0,0,1, 0,0,1, 0,0,1, 1,0,1, 0,1,0], // J
    [1,0,1, 1,0,1, 1,1,0, 1,0,1, 1,0,1], // K
    [1,0,0, 1,0,0, 1,0,0, 1,0,0, 1,1,1], // L
    [1,0,1, 1,1,1, 1,1,1, 1,0,1, 1,0,1], // M
    [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,0,1], // N
    [0,1,0, 1,0,1, 1,0,1, 1,0,1, 0,1,0], // O
    [1,1,0, 1,0,1, 1,1,0, 1,0,0, 1,0,0], // P
    [0,1,0, 1,0,1, 1,0,1, 0,1,0, 0,0,1], // Q
    [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,0,1], // R
    [0,1,1, 1,0,0, 0,1,0, 0,0,1, 1,1,0], // S
    [1,1,1, 0,1,0, 0,1,0, 0,1,0, 0,1,0], // T
    [1,0,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // U
    [1,0,1, 1,0,1, 1,0,1, 1,0,1, 0,1,0], // V
    [1,0,1, 1,0,1, 1,1,1, 1,1,1, 1,0,1], // W
    [1,0,1, 1,0,1, 0,1,0, 1,0,1, 1,0,1], // X
    [1,0,1, 1,0,1, 0,1,0, 0,1,0, 0,1,0], // Y
    [1,1,1, 0,0,1, 0,1,0, 1,0,0, 1,1,1], // Z
];

#[rustfmt::skip]
const COLON: [u8; 15] = [0,0,0, 0,1,0, 0,0,0, 0,1,0, 0,0,0];

fn glyph(ch: char) -> Option<&'static [u8; 15]> {
    match ch {
        '0'..='9' => Some(&DIGITS[(ch as u8 - b'0') as usize]),
        'A'..='Z' => Some(&LETTERS[(ch as u8 - b'A') as usize]),
        ':' => Some(&COLON),
        _ => None,
    }
}

/// Text sizes, as the logical side length of one font dot. Glyphs are 3x5
/// dots with a one-dot advance gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSize {
    Title,
    Label,
    Small,
}

impl TextSize {
    fn dot(self) -> f64 {
        match self {
            TextSize::Title => 8.0,
            TextSize::Label => 6.0,
            TextSize::Small => 4.0,
        }
    }
}

/// Width of a rendered string in logical units.
pub fn text_width(text: &str, size: TextSize) -> f64 {
    let chars = text.chars().count();
    if chars == 0 {
        return 0.0;
    }
    (chars as f64 * 4.0 - 1.0) * size.dot()
}

// ── Logical canvas ──────────────────────────────────────────────────────────

/// The drawing surface handed to every screen: logical 400x600 coordinates
/// in, scaled half-block pixels out.
pub struct Canvas {
    buf: PixelBuf,
    scale: f64,
    off_x: i32,
    off_y: i32,
    // Gradient color per device row of the canvas area, precomputed on
    // resize like the original's background surface.
    sky: Vec<Rgb>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let mut canvas = Canvas {
            buf: PixelBuf::new(cols as usize, rows as usize * 2),
            scale: 1.0,
            off_x: 0,
            off_y: 0,
            sky: Vec::new(),
        };
        canvas.rebuild();
        canvas
    }

    /// Adopt a new terminal size. Only the mapping changes; callers redraw
    /// everything each frame anyway.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.buf.resize(cols as usize, rows as usize * 2);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let pw = self.buf.w as f64;
        let ph = self.buf.h as f64;
        self.scale = (pw / CANVAS_W).min(ph / CANVAS_H).max(1e-6);
        let dev_w = (CANVAS_W * self.scale).round() as i32;
        let dev_h = (CANVAS_H * self.scale).round() as i32;
        self.off_x = (self.buf.w as i32 - dev_w) / 2;
        self.off_y = (self.buf.h as i32 - dev_h) / 2;
        self.sky = (0..dev_h.max(0))
            .map(|row| {
                let t = (row as u32 * 256 / dev_h.max(1) as u32).min(256) as u16;
                Rgb::lerp(SKY_TOP, SKY_BOT, t)
            })
            .collect();
    }

    fn dev_x(&self, x: f64) -> i32 {
        self.off_x + (x * self.scale).round() as i32
    }

    fn dev_y(&self, y: f64) -> i32 {
        self.off_y + (y * self.scale).round() as i32
    }

    /// Map a terminal cell (as reported by mouse events) to logical
    /// coordinates. Clicks in the letterbox map outside 0..400/0..600 and
    /// simply fail every hit test.
    pub fn cell_to_logical(&self, col: u16, row: u16) -> (f64, f64) {
        (
            (col as f64 + 0.5 - self.off_x as f64) / self.scale,
            (row as f64 * 2.0 + 1.0 - self.off_y as f64) / self.scale,
        )
    }

    /// Letterbox fill plus the sky gradient over the canvas area. Call once
    /// per frame before anything else.
    pub fn clear_background(&mut self) {
        self.buf.px.fill(LETTERBOX);
        let x0 = self.off_x;
        let x1 = self.off_x + (CANVAS_W * self.scale).round() as i32;
        for (row, &color) in self.sky.iter().enumerate() {
            let y = self.off_y + row as i32;
            for x in x0..x1 {
                self.buf.set(x, y, color);
            }
        }
    }

    /// Fill a logical rectangle. Rectangles with non-positive size draw
    /// nothing; anything with positive size covers at least one pixel.
    pub fn fill_rect(&mut self, r: Rect, c: Rgb) {
        if r.w <= 0.0 || r.h <= 0.0 {
            return;
        }
        let x0 = self.dev_x(r.x);
        let x1 = self.dev_x(r.right()).max(x0 + 1);
        let y0 = self.dev_y(r.y);
        let y1 = self.dev_y(r.bottom()).max(y0 + 1);
        for y in y0..y1 {
            for x in x0..x1 {
                self.buf.set(x, y, c);
            }
        }
    }

    /// Blit a sprite centered on (cx, cy), scaled to a `size`-unit square
    /// with nearest-neighbor sampling. Transparent pixels leave the
    /// background alone.
    pub fn draw_sprite(&mut self, sprite: &Sprite, cx: f64, cy: f64, size: f64) {
        let x0 = self.dev_x(cx - size / 2.0);
        let x1 = self.dev_x(cx + size / 2.0).max(x0 + 1);
        let y0 = self.dev_y(cy - size / 2.0);
        let y1 = self.dev_y(cy + size / 2.0).max(y0 + 1);
        let (tw, th) = ((x1 - x0) as usize, (y1 - y0) as usize);
        for dy in 0..th {
            let sy = dy * sprite.height() / th;
            for dx in 0..tw {
                let sx = dx * sprite.width() / tw;
                if let Some(c) = sprite.pixel(sx, sy) {
                    self.buf.set(x0 + dx as i32, y0 + dy as i32, c);
                }
            }
        }
    }

    /// Draw text centered on (cx, cy) with a one-dot drop shadow. Letters
    /// are uppercased; anything without a glyph becomes a blank advance.
    pub fn draw_text(&mut self, text: &str, size: TextSize, color: Rgb, cx: f64, cy: f64) {
        let dot = size.dot();
        let mut x = cx - text_width(text, size) / 2.0;
        let top = cy - 2.5 * dot;
        for ch in text.chars() {
            if let Some(bits) = glyph(ch.to_ascii_uppercase()) {
                for row in 0..5 {
                    for col in 0..3 {
                        if bits[row * 3 + col] == 1 {
                            let px = x + col as f64 * dot;
                            let py = top + row as f64 * dot;
                            // Row-major order lets a later dot's body cover
                            // an earlier dot's shadow, never the reverse.
                            self.fill_rect(Rect::new(px + dot, py + dot, dot, dot), SHADOW);
                            self.fill_rect(Rect::new(px, py, dot, dot), color);
                        }
                    }
                }
            }
            x += 4.0 * dot;
        }
    }

    /// Flush the pixel buffer to the terminal.
    pub fn present(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.buf.render(out)
    }

    #[cfg(test)]
    pub(crate) fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.buf.get(x, y)
    }
}
