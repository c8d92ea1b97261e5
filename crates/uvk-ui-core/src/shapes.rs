//! Straight lines and rectangle outlines.
//!
//! Sloped lines use a fixed-point slope scaled by [`SLOPE_SCALE`] and
//! evaluate one pixel per column. This is not Bresenham: steep lines leave
//! gaps and truncation toward zero shifts some rows by one. Displays built
//! on this layout depend on exactly these pixels.

use st7565::{BandBuffer, protocol::WIDTH};

pub const SLOPE_SCALE: i32 = 1000;

/// Draws (`on = true`) or erases a line between two inclusive endpoints.
///
/// Pixels off the surface are dropped. Slope and intercept are evaluated in
/// `i128` so far-off endpoints clip instead of overflowing.
pub fn draw_line<const N: usize>(
    surface: &mut BandBuffer<N>,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    on: bool,
) {
    let last_row = BandBuffer::<N>::HEIGHT as i32 - 1;
    let last_column = WIDTH as i32 - 1;

    if x1 == x2 {
        let (top, bottom) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        for y in top.max(0)..=bottom.min(last_row) {
            surface.set_pixel_signed(x1, y, on);
        }
        return;
    }

    let scale = i128::from(SLOPE_SCALE);
    let a = (i128::from(y2) - i128::from(y1)) * scale / (i128::from(x2) - i128::from(x1));
    let b = i128::from(y1) - a * i128::from(x1) / scale;

    let (left, right) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
    for x in left.max(0)..=right.min(last_column) {
        let y = i128::from(x) * a / scale + b;
        if let Ok(y) = i32::try_from(y) {
            surface.set_pixel_signed(x, y, on);
        }
    }
}

/// Draws or erases the outline of the rectangle spanned by two corners.
pub fn draw_rectangle<const N: usize>(
    surface: &mut BandBuffer<N>,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    on: bool,
) {
    draw_line(surface, x1, y1, x1, y2, on);
    draw_line(surface, x1, y1, x2, y1, on);
    draw_line(surface, x2, y1, x2, y2, on);
    draw_line(surface, x1, y2, x2, y2, on);
}
