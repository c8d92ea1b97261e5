//! Glyph table handles.
//!
//! The pixel content of every table is supplied by the caller; this module
//! only knows how to slice a flat table into fixed-size patches.

/// First code in a table that starts after the space character.
pub const FIRST_AFTER_SPACE: u8 = b'!';

/// Returns `true` for codes the text blitters draw: strictly between space and DEL.
#[inline]
pub const fn is_visible(code: u8) -> bool {
    code > b' ' && code < 0x7F
}

/// A flat table of fixed-size glyph patches.
///
/// Each patch is `width * bands` bytes. Band `k` of a patch occupies bytes
/// `k*width..(k+1)*width`, one byte per pixel column, bit 0 topmost.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Font<'a> {
    glyphs: &'a [u8],
    width: usize,
    bands: usize,
    first: u8,
}

impl<'a> Font<'a> {
    /// One-band font whose first patch is `'!'`.
    pub const fn new(glyphs: &'a [u8], width: usize) -> Self {
        Self {
            glyphs,
            width,
            bands: 1,
            first: FIRST_AFTER_SPACE,
        }
    }

    /// Font with an explicit first code and band count.
    pub const fn with_layout(glyphs: &'a [u8], width: usize, bands: usize, first: u8) -> Self {
        Self {
            glyphs,
            width,
            bands,
            first,
        }
    }

    /// Pixel columns per glyph.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Row bands per glyph.
    pub const fn bands(&self) -> usize {
        self.bands
    }

    /// Bytes per glyph patch.
    pub const fn stride(&self) -> usize {
        self.width * self.bands
    }

    /// Number of complete patches in the table.
    pub fn len(&self) -> usize {
        match self.stride() {
            0 => 0,
            stride => self.glyphs.len() / stride,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Patch by table index.
    pub fn glyph_at(&self, index: usize) -> Option<&'a [u8]> {
        let stride = self.stride();
        if stride == 0 {
            return None;
        }
        let start = index.checked_mul(stride)?;
        self.glyphs.get(start..start.checked_add(stride)?)
    }

    /// Patch for a character code, `None` when the code is outside the table.
    pub fn glyph(&self, code: u8) -> Option<&'a [u8]> {
        let index = code.checked_sub(self.first)?;
        self.glyph_at(index as usize)
    }

    /// One band of the patch for a character code.
    pub fn glyph_band(&self, code: u8, band: usize) -> Option<&'a [u8]> {
        if band >= self.bands {
            return None;
        }
        let glyph = self.glyph(code)?;
        glyph.get(band * self.width..(band + 1) * self.width)
    }
}

/// Every table the text blitters draw from.
#[derive(Clone, Copy, Debug)]
pub struct FontSet<'a> {
    /// Regular small text, one band high.
    pub small: Font<'a>,
    /// Bold small text; `None` falls back to `small`.
    pub small_bold: Option<Font<'a>>,
    /// Large text, two bands high.
    pub big: Font<'a>,
    /// Frequency digits `0..=9` followed by the dash glyph, two bands high.
    pub big_digits: Font<'a>,
    /// 3x5 pixel font starting at the space character.
    pub tiny: Font<'a>,
}
