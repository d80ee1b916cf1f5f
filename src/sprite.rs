//! The player sprite: a small pixel-art image with transparency, either the
//! built-in bird or one loaded from a plain-text pixmap file.
//!
//! The pixmap format is line based. Lines starting with `#` are comments,
//! lines starting with `=` define the palette (`= <symbol> <r> <g> <b>`),
//! and every remaining non-empty line is one row of pixels. `.` is always
//! transparent. Palette lines must come before the rows that use them.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::render::Rgb;

// The default bird, in the same pixmap format the loader accepts.
const BIRD_PIXMAP: &str = "\
# Built-in clappy bird, 16x16.
= h 255 225 100
= y 245 200 66
= w 215 165 35
= e 255 255 255
= p 20 20 20
= b 225 75 35
= B 240 110 50
................
......hhhh......
....hhyyyyh.....
...hyyyyyyyy....
..hyyyyyyeeee...
..yyyyyyyeepe...
.wyyyyyyyeeee...
.wwwyyyyyyyyBBB.
.wwwwwyyyyybbbbb
.wwwyyyyyyyybbb.
..yyyyyyyyyyy...
..yyyyyyyyyy....
...yyyyyyyyy....
....yyyyyyy.....
......yyyy......
................
";

/// Pixel-art image with per-pixel transparency. Art resolution is
/// independent of the canvas; the renderer scales it to the sprite box.
#[derive(Clone, Debug)]
pub struct Sprite {
    w: usize,
    h: usize,
    px: Vec<Option<Rgb>>,
}

impl Sprite {
    /// The default bird sprite.
    pub fn builtin() -> Sprite {
        // Backed by `builtin_pixmap_is_well_formed` below.
        Sprite::parse(BIRD_PIXMAP).expect("built-in bird pixmap is well formed")
    }

    /// Load a sprite from a pixmap file. Any failure here is fatal at
    /// startup; the game never runs without a player sprite.
    pub fn load(path: &Path) -> Result<Sprite, SpriteError> {
        let text = fs::read_to_string(path)?;
        Sprite::parse(&text)
    }

    fn parse(text: &str) -> Result<Sprite, SpriteError> {
        let mut palette: HashMap<char, Rgb> = HashMap::new();
        let mut rows: Vec<Vec<Option<Rgb>>> = Vec::new();
        let mut width = 0usize;

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let entry = raw.trim_end_matches('\r');
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            if entry.starts_with('=') {
                let (symbol, color) =
                    parse_palette_entry(entry).ok_or(SpriteError::BadPalette { line })?;
                palette.insert(symbol, color);
                continue;
            }
            let mut row = Vec::with_capacity(width);
            for symbol in entry.chars() {
                if symbol == '.' {
                    row.push(None);
                } else {
                    let color = *palette
                        .get(&symbol)
                        .ok_or(SpriteError::UnknownSymbol { symbol, line })?;
                    row.push(Some(color));
                }
            }
            if rows.is_empty() {
                width = row.len();
            } else if row.len() != width {
                return Err(SpriteError::RaggedRow { line });
            }
            rows.push(row);
        }

        if rows.is_empty() || width == 0 {
            return Err(SpriteError::Empty);
        }
        let h = rows.len();
        let px = rows.into_iter().flatten().collect();
        Ok(Sprite { w: width, h, px })
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Color at (x, y), or None for transparent. Out of range is a caller
    /// bug, so this indexes directly.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        self.px[y * self.w + x]
    }
}

fn parse_palette_entry(line: &str) -> Option<(char, Rgb)> {
    let mut parts = line.split_whitespace();
    if parts.next() != Some("=") {
        return None;
    }
    let symbol_token = parts.next()?;
    let mut symbols = symbol_token.chars();
    let symbol = symbols.next()?;
    if symbols.next().is_some() || symbol == '.' {
        return None;
    }
    let r = parts.next()?.parse().ok()?;
    let g = parts.next()?.parse().ok()?;
    let b = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((symbol, Rgb(r, g, b)))
}

#[derive(Debug)]
pub enum SpriteError {
    Io(io::Error),
    BadPalette { line: usize },
    UnknownSymbol { symbol: char, line: usize },
    RaggedRow { line: usize },
    Empty,
}

impl fmt::Display for SpriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpriteError::Io(err) => write!(f, "cannot read sprite file: {err}"),
            SpriteError::BadPalette { line } => {
                write!(f, "line {line}: palette entries look like `= <symbol> <r> <g> <b>`")
            }
            SpriteError::UnknownSymbol { symbol, line } => {
                write!(f, "line {line}: symbol {symbol:?} has no palette entry")
            }
            SpriteError::RaggedRow { line } => {
                write!(f, "line {line}: all pixel rows must be the same width")
            }
            SpriteError::Empty => write!(f, "no pixel rows found"),
        }
    }
}

impl Error for SpriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SpriteError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SpriteError {
    fn from(err: io::Error) -> Self {
        SpriteError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_pixmap_is_well_formed() {
        let bird = Sprite::builtin();
        assert_eq!(bird.width(), 16);
        assert_eq!(bird.height(), 16);
        assert_eq!(bird.pixel(0, 0), None);
        assert_eq!(bird.pixel(3, 8), Some(Rgb(215, 165, 35)));
        let colored = (0..16)
            .flat_map(|y| (0..16).map(move |x| (x, y)))
            .filter(|&(x, y)| bird.pixel(x, y).is_some())
            .count();
        assert!(colored > 60, "bird art is mostly empty: {colored} pixels");
    }

    #[test]
    fn parses_palette_comments_and_rows() {
        let s = Sprite::parse("# tiny\n= r 255 0 0\n.r.\nrrr\n").unwrap();
        assert_eq!((s.width(), s.height()), (3, 2));
        assert_eq!(s.pixel(0, 0), None);
        assert_eq!(s.pixel(1, 0), Some(Rgb(255, 0, 0)));
        assert_eq!(s.pixel(2, 1), Some(Rgb(255, 0, 0)));
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let err = Sprite::parse("= r 255 0 0\nrxr\n").unwrap_err();
        assert!(matches!(
            err,
            SpriteError::UnknownSymbol { symbol: 'x', line: 2 }
        ));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Sprite::parse("= r 1 2 3\nrr\nrrr\n").unwrap_err();
        assert!(matches!(err, SpriteError::RaggedRow { line: 3 }));
    }

    #[test]
    fn malformed_palette_lines_are_rejected() {
        for bad in ["= rr 1 2 3", "= r 1 2", "= r 256 0 0", "= . 1 2 3", "= r 1 2 3 4"] {
            let err = Sprite::parse(&format!("{bad}\nr\n")).unwrap_err();
            assert!(
                matches!(err, SpriteError::BadPalette { line: 1 }),
                "{bad:?} should be a palette error, got {err:?}"
            );
        }
    }

    #[test]
    fn empty_pixmap_is_rejected() {
        assert!(matches!(
            Sprite::parse("# nothing\n= r 1 2 3\n"),
            Err(SpriteError::Empty)
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Sprite::load(Path::new("/nonexistent/bird.pixmap")).unwrap_err();
        assert!(matches!(err, SpriteError::Io(_)));
    }
}
