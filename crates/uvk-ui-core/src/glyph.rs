//! Band-level glyph blend operations.
//!
//! Every write goes through [`BandBuffer::byte_mut`], so a column left of 0,
//! past the last column, or a band past the surface is dropped instead of
//! landing in a neighbouring band.

use st7565::BandBuffer;

use crate::{
    font::{Font, is_visible},
    layout::cell_offset,
};

/// How glyph column bytes combine with the band they land on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Blend {
    /// Glyph bytes replace the band bytes.
    Overwrite,
    /// Clear stroke pixels only (white text on a black block).
    Negative,
    /// As [`Blend::Negative`], but the top pixel row is never cleared.
    NegativeInset,
    /// OR the glyph moved down one pixel (bottom aligned in the band).
    BottomInRow,
}

impl Blend {
    #[inline]
    fn apply(self, dst: &mut u8, glyph: u8) {
        match self {
            Self::Overwrite => *dst = glyph,
            Self::Negative => *dst &= !glyph,
            Self::NegativeInset => *dst &= !((glyph >> 1) << 1),
            Self::BottomInRow => *dst |= glyph >> 1,
        }
    }
}

#[inline]
fn column(x: i32) -> Option<usize> {
    usize::try_from(x).ok()
}

/// Applies `f` to the byte at `(band, x)` when it is on the surface.
#[inline]
pub fn with_byte<const N: usize>(
    surface: &mut BandBuffer<N>,
    band: usize,
    x: i32,
    f: impl FnOnce(&mut u8),
) {
    if let Some(byte) = column(x).and_then(|x| surface.byte_mut(band, x)) {
        f(byte);
    }
}

/// Visible characters of `text` with the column their cell draws from.
///
/// Blank and unsupported characters keep their cell: character `i` always
/// lands at `origin + cell_offset(i)`.
pub fn cells<'a>(
    text: &'a str,
    origin: i32,
    font: Font<'a>,
) -> impl Iterator<Item = (i32, &'a [u8])> + 'a {
    let width = font.width();
    text.bytes().enumerate().filter_map(move |(i, code)| {
        if !is_visible(code) {
            return None;
        }
        let glyph = font.glyph_band(code, 0)?;
        Some((origin.saturating_add(cell_offset(i, width)), glyph))
    })
}

/// Draws a one-band run of small glyphs into `band` starting at `origin`.
pub fn blit_run<const N: usize>(
    surface: &mut BandBuffer<N>,
    band: usize,
    origin: i32,
    text: &str,
    font: &Font<'_>,
    blend: Blend,
) {
    for (x, glyph) in cells(text, origin, *font) {
        for (k, &bits) in glyph.iter().enumerate() {
            let col = x.saturating_add(k as i32);
            with_byte(surface, band, col, |dst| blend.apply(dst, bits));
        }
    }
}

/// ORs a run shifted down by `offset` pixels, spilling into `band + 1`.
///
/// `offset` must be 1..=7 and `band + 1` must exist; otherwise nothing is drawn.
pub fn blit_run_shifted_down<const N: usize>(
    surface: &mut BandBuffer<N>,
    band: usize,
    origin: i32,
    text: &str,
    font: &Font<'_>,
    offset: u8,
) {
    let Some(below) = band.checked_add(1).filter(|&b| b < BandBuffer::<N>::BANDS) else {
        return;
    };
    if !(1..=7).contains(&offset) {
        return;
    }

    let low_mask = (1u8 << offset) - 1;
    for (x, glyph) in cells(text, origin, *font) {
        for (k, &bits) in glyph.iter().enumerate() {
            let col = x.saturating_add(k as i32);
            with_byte(surface, band, col, |dst| *dst |= (bits >> offset) << offset);
            with_byte(surface, below, col, |dst| {
                *dst |= (bits & low_mask) << (8 - offset)
            });
        }
    }
}

/// ORs a run shifted up by `offset` pixels, spilling into `band - 1`.
///
/// `offset` must be 1..=7 and `band` must lie between 1 and the band before
/// the last one; the bottom band never takes shifted text.
pub fn blit_run_shifted_up<const N: usize>(
    surface: &mut BandBuffer<N>,
    band: usize,
    origin: i32,
    text: &str,
    font: &Font<'_>,
    offset: u8,
) {
    let last = BandBuffer::<N>::BANDS.saturating_sub(1);
    if !(1..=7).contains(&offset) || band < 1 || band >= last {
        return;
    }

    for (x, glyph) in cells(text, origin, *font) {
        for (k, &bits) in glyph.iter().enumerate() {
            let col = x.saturating_add(k as i32);
            with_byte(surface, band - 1, col, |dst| *dst |= bits >> (8 - offset));
            with_byte(surface, band, col, |dst| *dst |= bits << offset);
        }
    }
}

/// XORs `pattern` into every column of `[from, to)` on `band`.
pub fn xor_span<const N: usize>(
    surface: &mut BandBuffer<N>,
    band: usize,
    from: i32,
    to: i32,
    pattern: u8,
) {
    for x in from.max(0)..to {
        with_byte(surface, band, x, |dst| *dst ^= pattern);
    }
}

/// Rounded end caps XORed outside a highlighted span, outermost first.
const LEFT_CAP: [u8; 3] = [0x3E, 0x7F, 0xFF];

/// XOR selection highlight over `[x_start, x_end)` with rounded end caps.
///
/// The left cap occupies the three columns before `x_start` and is skipped
/// entirely when `x_start < 3`. The right cap occupies the three columns from
/// `x_end` and is clipped per column. Applying the same highlight twice
/// restores the band.
pub fn highlight_span<const N: usize>(
    surface: &mut BandBuffer<N>,
    band: usize,
    x_start: i32,
    x_end: i32,
) {
    if x_start >= 3 {
        for (k, &cap) in LEFT_CAP.iter().enumerate() {
            with_byte(surface, band, x_start - 3 + k as i32, |dst| *dst ^= cap);
        }
    }

    xor_span(surface, band, x_start, x_end, 0xFF);

    for (k, &cap) in LEFT_CAP.iter().rev().enumerate() {
        with_byte(surface, band, x_end.saturating_add(k as i32), |dst| *dst ^= cap);
    }
}
