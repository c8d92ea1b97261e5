//! Horizontal placement of text runs.

/// Extra blank column after every small-font character cell.
pub const CHAR_SPACING: i32 = 1;

/// Cell width of one big frequency digit.
pub const DIGIT_CELL: i32 = 13;
/// Columns drawn per big frequency digit, per band.
pub const DIGIT_COLUMNS: usize = 10;
/// Blank columns left of a big frequency digit inside its cell.
pub const DIGIT_INSET: i32 = 2;
/// Pull-back applied for every collapsed leading space when centring.
pub const DIGIT_SPACE_PULLBACK: i32 = 6;
/// Columns occupied by the decimal point.
pub const DOT_COLUMNS: i32 = 3;
/// Glyph index used for `'-'` in the digit table.
pub const DASH_DIGIT: usize = 10;

/// Start column for a run of `text_width` pixels.
///
/// With `end > start` the run is centred in `[start, end)`, rounding the half
/// pixel up with truncating division; text wider than the window starts left
/// of `start`, possibly at a negative column. Otherwise the run is left
/// anchored at `start`.
#[inline]
pub const fn centered_start(start: i32, end: i32, text_width: i32) -> i32 {
    if end > start {
        let span = end as i64 - start as i64 - text_width as i64 + 1;
        let origin = start as i64 + span / 2;
        if origin > i32::MAX as i64 {
            i32::MAX
        } else if origin < i32::MIN as i64 {
            i32::MIN
        } else {
            origin as i32
        }
    } else {
        start
    }
}

/// Pixel width of `len` small-font cells including their trailing spacing.
#[inline]
pub const fn text_pixel_width(len: usize, char_width: usize) -> i32 {
    (len * (char_width + CHAR_SPACING as usize)) as i32
}

/// Column offset of character `index` inside a small-font run.
///
/// Every cell starts with its one blank spacing column.
#[inline]
pub const fn cell_offset(index: usize, char_width: usize) -> i32 {
    (index * (char_width + CHAR_SPACING as usize)) as i32 + CHAR_SPACING
}

/// What the frequency layout places at a column.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrequencyCell {
    /// Big digit glyph index (`10` is the dash) at this cell origin.
    Digit { cursor: i32, index: usize },
    /// Decimal point spanning [`DOT_COLUMNS`] columns from this column.
    Dot { cursor: i32 },
}

impl FrequencyCell {
    /// First column the cell actually paints.
    pub const fn first_column(&self) -> i32 {
        match *self {
            Self::Digit { cursor, .. } => cursor.saturating_add(DIGIT_INSET),
            Self::Dot { cursor } => cursor,
        }
    }
}

/// Iterator over the cells of a big-digit frequency readout.
///
/// Leading spaces draw nothing; with `center` set each one pulls the cursor
/// back by [`DIGIT_SPACE_PULLBACK`] before the normal cell advance. Once the
/// first non-space character is seen every character takes a full cell,
/// except the decimal point which takes [`DOT_COLUMNS`].
#[derive(Clone, Debug)]
pub struct FrequencyLayout<'a> {
    bytes: core::slice::Iter<'a, u8>,
    cursor: i32,
    center: bool,
    started: bool,
}

impl<'a> FrequencyLayout<'a> {
    pub fn new(text: &'a str, x: i32, center: bool) -> Self {
        Self {
            bytes: text.as_bytes().iter(),
            cursor: x,
            center,
            started: false,
        }
    }
}

impl Iterator for FrequencyLayout<'_> {
    type Item = FrequencyCell;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut c = *self.bytes.next()?;
            if c == b'-' {
                c = b'9' + 1;
            }

            let cursor = self.cursor;
            if self.started || c != b' ' {
                self.started = true;
                if c == b'.' {
                    self.cursor = self.cursor.saturating_add(DOT_COLUMNS);
                    return Some(FrequencyCell::Dot { cursor });
                }
                self.cursor = self.cursor.saturating_add(DIGIT_CELL);
                if (b'0'..=b'9' + 1).contains(&c) {
                    return Some(FrequencyCell::Digit {
                        cursor,
                        index: (c - b'0') as usize,
                    });
                }
            } else {
                if self.center {
                    self.cursor = self.cursor.saturating_sub(DIGIT_SPACE_PULLBACK);
                }
                self.cursor = self.cursor.saturating_add(DIGIT_CELL);
            }
        }
    }
}
