//! String-level print operations.
//!
//! Every function takes the placement descriptor `(text, start, end, band)`:
//! with `end > start` the run is centred in `[start, end)`, otherwise it is
//! left anchored at `start`. Nothing here reports errors; runs that leave the
//! surface are clipped.

use log::trace;
use st7565::{BandBuffer, protocol::BAND_ROWS};

use crate::{
    font::{Font, is_visible},
    glyph::{self, Blend, blit_run, highlight_span, with_byte, xor_span},
    layout::{
        DIGIT_COLUMNS, DOT_COLUMNS, FrequencyCell, FrequencyLayout, centered_start,
        text_pixel_width,
    },
};

/// Decimal point pattern in the lower band of a frequency readout.
const DOT_PATTERN: u8 = 0x60;
/// Box-outline edges used by the bold inverse style.
const BOX_EDGE: u8 = 0x7F;
const BOX_FILL: u8 = 0x41;

fn small_origin(text: &str, start: i32, end: i32, font: &Font<'_>) -> i32 {
    centered_start(start, end, text_pixel_width(text.len(), font.width()))
}

/// Two-band big text; cells are `cell_width` columns with no extra spacing.
pub fn print_big<const N: usize>(
    surface: &mut BandBuffer<N>,
    font: &Font<'_>,
    text: &str,
    start: i32,
    end: i32,
    band: usize,
    cell_width: i32,
) {
    let origin = centered_start(start, end, (text.len() as i32).saturating_mul(cell_width));

    for (i, code) in text.bytes().enumerate() {
        if !is_visible(code) {
            continue;
        }
        let x = origin.saturating_add((i as i32).saturating_mul(cell_width));
        for half in 0..font.bands().min(2) {
            let Some(columns) = font.glyph_band(code, half) else {
                continue;
            };
            for (k, &bits) in columns.iter().enumerate() {
                let col = x.saturating_add(k as i32);
                with_byte(surface, band.saturating_add(half), col, |dst| *dst = bits);
            }
        }
    }
}

/// Small text, overwrite blend.
pub fn print_small<const N: usize>(
    surface: &mut BandBuffer<N>,
    font: &Font<'_>,
    text: &str,
    start: i32,
    end: i32,
    band: usize,
) {
    let origin = small_origin(text, start, end, font);
    blit_run(surface, band, origin, text, font, Blend::Overwrite);
}

/// Small text anchored at pixel `(x, y)`; `y` selects the band `y / 8`.
pub fn print_small_at<const N: usize>(
    surface: &mut BandBuffer<N>,
    font: &Font<'_>,
    text: &str,
    x: i32,
    y: usize,
) {
    if y >= BandBuffer::<N>::HEIGHT {
        return;
    }
    blit_run(surface, y / BAND_ROWS, x, text, font, Blend::Overwrite);
}

/// White-on-black small text: clears stroke pixels of a pre-painted block.
pub fn print_small_negative<const N: usize>(
    surface: &mut BandBuffer<N>,
    font: &Font<'_>,
    text: &str,
    start: i32,
    end: i32,
    band: usize,
) {
    let origin = small_origin(text, start, end, font);
    blit_run(surface, band, origin, text, font, Blend::Negative);
}

/// White-on-black small text that leaves the top pixel row of the band black.
pub fn print_small_negative_inset<const N: usize>(
    surface: &mut BandBuffer<N>,
    font: &Font<'_>,
    text: &str,
    start: i32,
    end: i32,
    band: usize,
) {
    let origin = small_origin(text, start, end, font);
    blit_run(surface, band, origin, text, font, Blend::NegativeInset);
}

/// Small text ORed one pixel down so it sits on the bottom of its band.
pub fn print_small_bottom_in_row<const N: usize>(
    surface: &mut BandBuffer<N>,
    font: &Font<'_>,
    text: &str,
    start: i32,
    end: i32,
    band: usize,
) {
    let origin = small_origin(text, start, end, font);
    blit_run(surface, band, origin, text, font, Blend::BottomInRow);
}

/// Small text moved down by `offset` pixels (0..=7) into `band + 1`.
///
/// Offset 0 is plain small text.
pub fn print_small_offset_down<const N: usize>(
    surface: &mut BandBuffer<N>,
    font: &Font<'_>,
    text: &str,
    start: i32,
    end: i32,
    band: usize,
    offset: u8,
) {
    if band.saturating_add(1) >= BandBuffer::<N>::BANDS {
        return;
    }
    if offset == 0 {
        print_small(surface, font, text, start, end, band);
        return;
    }
    if offset > 7 {
        trace!("offset {offset} ignored for downward text");
        return;
    }

    let origin = small_origin(text, start, end, font);
    glyph::blit_run_shifted_down(surface, band, origin, text, font, offset);
}

/// Small text moved up by `offset` pixels (1..=7) into `band - 1`.
pub fn print_small_offset_up<const N: usize>(
    surface: &mut BandBuffer<N>,
    font: &Font<'_>,
    text: &str,
    start: i32,
    end: i32,
    band: usize,
    offset: u8,
) {
    let origin = small_origin(text, start, end, font);
    glyph::blit_run_shifted_up(surface, band, origin, text, font, offset);
}

/// Small text drawn normally, then XOR highlighted with rounded end caps.
///
/// The highlighted span covers the centred run plus one column, clamped to
/// `end` when `end` is non-zero.
pub fn print_small_inverse<const N: usize>(
    surface: &mut BandBuffer<N>,
    font: &Font<'_>,
    text: &str,
    start: i32,
    end: i32,
    band: usize,
) {
    print_small(surface, font, text, start, end, band);

    let x_start = if text.is_empty() {
        start
    } else {
        small_origin(text, start, end, font)
    };
    let mut x_end = x_start
        .saturating_add(text_pixel_width(text.len(), font.width()))
        .saturating_add(1);
    if end != 0 && x_end > end {
        x_end = end;
    }

    highlight_span(surface, band, x_start, x_end);
}

/// Bold text drawn normally, then boxed with an XOR outline from `start`.
///
/// The outline is anchored at the uncentred `start` column.
pub fn print_small_bold_inverse<const N: usize>(
    surface: &mut BandBuffer<N>,
    bold: &Font<'_>,
    text: &str,
    start: i32,
    end: i32,
    band: usize,
) {
    print_small(surface, bold, text, start, end, band);

    let mut x_end = start.saturating_add(text_pixel_width(text.len(), bold.width()));
    if end != 0 && x_end > end {
        x_end = end;
    }

    with_byte(surface, band, start, |dst| *dst ^= BOX_EDGE);
    xor_span(surface, band, start.saturating_add(1), x_end, BOX_FILL);
    with_byte(surface, band, x_end.saturating_add(1), |dst| *dst ^= BOX_EDGE);
}

/// 3x5 pixel text plotted pixel by pixel, 4 columns per character.
///
/// Codes are looked up from the space character; codes outside the table
/// still advance. `fill` selects set or clear for stroke pixels.
pub fn print_tiny<const N: usize>(
    surface: &mut BandBuffer<N>,
    font: &Font<'_>,
    text: &str,
    x: i32,
    y: i32,
    fill: bool,
) {
    for (i, code) in text.bytes().enumerate() {
        let Some(glyph) = font.glyph(code) else {
            continue;
        };
        let cx = x.saturating_add(4 * i as i32);
        for (col, &bits) in glyph.iter().enumerate() {
            let mut pixels = bits;
            for row in 0..6 {
                if pixels & 1 != 0 {
                    let px = cx.saturating_add(col as i32);
                    surface.set_pixel_signed(px, y.saturating_add(row), fill);
                }
                pixels >>= 1;
            }
        }
    }
}

/// 3x5 text cut out of a solid block that covers the run.
pub fn print_tiny_negative<const N: usize>(
    surface: &mut BandBuffer<N>,
    font: &Font<'_>,
    text: &str,
    x: i32,
    y: i32,
) {
    if text.is_empty() {
        return;
    }

    let width = text.len() as i32 * 4;
    for py in 0..6 {
        for px in 0..width {
            surface.set_pixel_signed(x.saturating_add(px), y.saturating_add(py), true);
        }
    }
    print_tiny(surface, font, text, x, y, false);
}

fn digit_halves<'f>(digits: &Font<'f>, index: usize) -> Option<(&'f [u8], &'f [u8])> {
    let glyph = digits.glyph_at(index)?;
    let width = digits.width();
    if width < DIGIT_COLUMNS || glyph.len() < 2 * width {
        return None;
    }
    Some((&glyph[..DIGIT_COLUMNS], &glyph[width..width + DIGIT_COLUMNS]))
}

/// Big-digit frequency readout on `band` and `band + 1`.
pub fn print_frequency<const N: usize>(
    surface: &mut BandBuffer<N>,
    digits: &Font<'_>,
    text: &str,
    x: i32,
    band: usize,
    center: bool,
) {
    let below = band.saturating_add(1);
    for cell in FrequencyLayout::new(text, x, center) {
        match cell {
            FrequencyCell::Digit { index, .. } => {
                let Some((top, bottom)) = digit_halves(digits, index) else {
                    continue;
                };
                let first = cell.first_column();
                for k in 0..DIGIT_COLUMNS {
                    let col = first.saturating_add(k as i32);
                    with_byte(surface, band, col, |dst| *dst = top[k]);
                    with_byte(surface, below, col, |dst| *dst = bottom[k]);
                }
            }
            FrequencyCell::Dot { cursor } => {
                for k in 0..DOT_COLUMNS {
                    with_byte(surface, below, cursor.saturating_add(k), |dst| *dst = DOT_PATTERN);
                }
            }
        }
    }
}

/// Big-digit readout raised by two pixels.
///
/// The two top glyph rows spill into `band - 1`. When `max_x_top` is non-zero
/// the spill is limited to columns `< max_x_top`, checked per painted column,
/// so anything at or right of `max_x_top` in `band - 1` is left alone.
/// `band` must be at least 1 and leave a spare band under `band + 1`;
/// otherwise the plain layout is used.
pub fn print_frequency_raised<const N: usize>(
    surface: &mut BandBuffer<N>,
    digits: &Font<'_>,
    text: &str,
    x: i32,
    band: usize,
    center: bool,
    max_x_top: i32,
) {
    if band < 1 || band.saturating_add(2) >= BandBuffer::<N>::BANDS {
        print_frequency(surface, digits, text, x, band, center);
        return;
    }

    let top_allowed = |col: i32| max_x_top == 0 || col < max_x_top;
    for cell in FrequencyLayout::new(text, x, center) {
        match cell {
            FrequencyCell::Digit { index, .. } => {
                let Some((top, bottom)) = digit_halves(digits, index) else {
                    continue;
                };
                let first = cell.first_column();
                for k in 0..DIGIT_COLUMNS {
                    let col = first.saturating_add(k as i32);
                    let (b0, b1) = (top[k], bottom[k]);
                    if top_allowed(col) {
                        with_byte(surface, band - 1, col, |dst| *dst |= b0 >> 6);
                    }
                    with_byte(surface, band, col, |dst| *dst = (b0 << 2) | (b1 >> 6));
                    with_byte(surface, band + 1, col, |dst| *dst = b1 << 2);
                }
            }
            FrequencyCell::Dot { cursor } => {
                for k in 0..DOT_COLUMNS {
                    let col = cursor.saturating_add(k);
                    if top_allowed(col) {
                        with_byte(surface, band - 1, col, |dst| *dst |= DOT_PATTERN >> 6);
                    }
                    with_byte(surface, band, col, |dst| *dst = DOT_PATTERN << 2);
                    with_byte(surface, band + 1, col, |dst| *dst = 0);
                }
            }
        }
    }
}
