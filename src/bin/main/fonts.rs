//! Glyph tables for the host preview, generated from one 5x7 source font.

use uvk_ui_core::{Font, FontSet};

const FIRST: u8 = b'!';
const LAST: u8 = b'~';
const SMALL_WIDTH: usize = 6;
const BIG_WIDTH: usize = 7;
const DIGIT_WIDTH: usize = 10;
const TINY_WIDTH: usize = 3;

/// Owned tables; [`FontTables::font_set`] borrows them for the compositor.
pub(super) struct FontTables {
    small: Vec<u8>,
    bold: Vec<u8>,
    big: Vec<u8>,
    digits: Vec<u8>,
    tiny: Vec<u8>,
}

impl FontTables {
    pub(super) fn build() -> Self {
        let mut small = Vec::new();
        let mut bold = Vec::new();
        let mut big = Vec::new();
        for code in FIRST..=LAST {
            let glyph = glyph_5x7(code as char);

            small.extend_from_slice(&glyph);
            small.push(0);

            let mut prev = 0;
            for &col in glyph.iter().chain(&[0]) {
                bold.push(col | prev);
                prev = col;
            }

            // One blank column each side, rows doubled into two bands.
            let columns: Vec<u16> = core::iter::once(0)
                .chain(glyph.iter().map(|&col| stretch(col)))
                .chain(core::iter::once(0))
                .collect();
            big.extend(columns.iter().map(|&col| col as u8));
            big.extend(columns.iter().map(|&col| (col >> 8) as u8));
        }

        let mut digits = Vec::new();
        for c in ('0'..='9').chain(core::iter::once('-')) {
            let doubled: Vec<u16> = glyph_5x7(c)
                .iter()
                .flat_map(|&col| [stretch(col), stretch(col)])
                .collect();
            digits.extend(doubled.iter().map(|&col| col as u8));
            digits.extend(doubled.iter().map(|&col| (col >> 8) as u8));
        }

        let mut tiny = Vec::new();
        for code in b' '..=LAST {
            tiny.extend_from_slice(&glyph_3x5(code as char));
        }

        Self {
            small,
            bold,
            big,
            digits,
            tiny,
        }
    }

    pub(super) fn font_set(&self) -> FontSet<'_> {
        FontSet {
            small: Font::new(&self.small, SMALL_WIDTH),
            small_bold: Some(Font::new(&self.bold, SMALL_WIDTH)),
            big: Font::with_layout(&self.big, BIG_WIDTH, 2, FIRST),
            big_digits: Font::with_layout(&self.digits, DIGIT_WIDTH, 2, b'0'),
            tiny: Font::with_layout(&self.tiny, TINY_WIDTH, 1, b' '),
        }
    }
}

/// Doubles every row of a 7-row column into a 14-row column.
fn stretch(col: u8) -> u16 {
    (0..7)
        .filter(|row| col & (1 << row) != 0)
        .fold(0u16, |acc, row| acc | (0b11 << (2 * row)))
}

fn glyph_5x7(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        'A' => [0x7E, 0x11, 0x11, 0x11, 0x7E],
        'B' => [0x7F, 0x49, 0x49, 0x49, 0x36],
        'C' => [0x3E, 0x41, 0x41, 0x41, 0x22],
        'D' => [0x7F, 0x41, 0x41, 0x22, 0x1C],
        'E' => [0x7F, 0x49, 0x49, 0x49, 0x41],
        'F' => [0x7F, 0x09, 0x09, 0x09, 0x01],
        'G' => [0x3E, 0x41, 0x49, 0x49, 0x7A],
        'H' => [0x7F, 0x08, 0x08, 0x08, 0x7F],
        'I' => [0x00, 0x41, 0x7F, 0x41, 0x00],
        'J' => [0x20, 0x40, 0x41, 0x3F, 0x01],
        'K' => [0x7F, 0x08, 0x14, 0x22, 0x41],
        'L' => [0x7F, 0x40, 0x40, 0x40, 0x40],
        'M' => [0x7F, 0x02, 0x0C, 0x02, 0x7F],
        'N' => [0x7F, 0x04, 0x08, 0x10, 0x7F],
        'O' => [0x3E, 0x41, 0x41, 0x41, 0x3E],
        'P' => [0x7F, 0x09, 0x09, 0x09, 0x06],
        'Q' => [0x3E, 0x41, 0x51, 0x21, 0x5E],
        'R' => [0x7F, 0x09, 0x19, 0x29, 0x46],
        'S' => [0x46, 0x49, 0x49, 0x49, 0x31],
        'T' => [0x01, 0x01, 0x7F, 0x01, 0x01],
        'U' => [0x3F, 0x40, 0x40, 0x40, 0x3F],
        'V' => [0x1F, 0x20, 0x40, 0x20, 0x1F],
        'W' => [0x7F, 0x20, 0x18, 0x20, 0x7F],
        'X' => [0x63, 0x14, 0x08, 0x14, 0x63],
        'Y' => [0x03, 0x04, 0x78, 0x04, 0x03],
        'Z' => [0x61, 0x51, 0x49, 0x45, 0x43],
        '0' => [0x3E, 0x51, 0x49, 0x45, 0x3E],
        '1' => [0x00, 0x42, 0x7F, 0x40, 0x00],
        '2' => [0x42, 0x61, 0x51, 0x49, 0x46],
        '3' => [0x21, 0x41, 0x45, 0x4B, 0x31],
        '4' => [0x18, 0x14, 0x12, 0x7F, 0x10],
        '5' => [0x27, 0x45, 0x45, 0x45, 0x39],
        '6' => [0x3C, 0x4A, 0x49, 0x49, 0x30],
        '7' => [0x01, 0x71, 0x09, 0x05, 0x03],
        '8' => [0x36, 0x49, 0x49, 0x49, 0x36],
        '9' => [0x06, 0x49, 0x49, 0x29, 0x1E],
        '.' => [0x00, 0x60, 0x60, 0x00, 0x00],
        ':' => [0x00, 0x36, 0x36, 0x00, 0x00],
        '-' => [0x08, 0x08, 0x08, 0x08, 0x08],
        '+' => [0x08, 0x08, 0x3E, 0x08, 0x08],
        '/' => [0x20, 0x10, 0x08, 0x04, 0x02],
        '%' => [0x23, 0x13, 0x08, 0x64, 0x62],
        '|' => [0x00, 0x00, 0x7F, 0x00, 0x00],
        '<' => [0x08, 0x14, 0x22, 0x41, 0x00],
        '>' => [0x00, 0x41, 0x22, 0x14, 0x08],
        '!' => [0x00, 0x00, 0x5F, 0x00, 0x00],
        _ => [0x00; 5],
    }
}

/// 3x5 status-line glyphs; characters without one are blank.
fn glyph_3x5(c: char) -> [u8; 3] {
    match c.to_ascii_uppercase() {
        '0' => [0x1F, 0x11, 0x1F],
        '1' => [0x12, 0x1F, 0x10],
        '2' => [0x1D, 0x15, 0x17],
        '3' => [0x15, 0x15, 0x1F],
        '4' => [0x07, 0x04, 0x1F],
        '5' => [0x17, 0x15, 0x1D],
        '6' => [0x1F, 0x15, 0x1D],
        '7' => [0x01, 0x01, 0x1F],
        '8' => [0x1F, 0x15, 0x1F],
        '9' => [0x17, 0x15, 0x1F],
        'A' => [0x1E, 0x05, 0x1E],
        'H' => [0x1F, 0x04, 0x1F],
        'K' => [0x1F, 0x04, 0x1B],
        'L' => [0x1F, 0x10, 0x10],
        'M' => [0x1F, 0x02, 0x1F],
        'N' => [0x1F, 0x01, 0x1E],
        'W' => [0x1F, 0x08, 0x1F],
        '.' => [0x00, 0x10, 0x00],
        '+' => [0x04, 0x0E, 0x04],
        '-' => [0x04, 0x04, 0x04],
        '>' => [0x11, 0x0A, 0x04],
        '|' => [0x00, 0x1F, 0x00],
        _ => [0x00; 3],
    }
}
