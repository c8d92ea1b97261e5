//! In-memory band-packed surfaces for the ST7565.

use core::convert::TryFrom;

use crate::protocol::{BAND_ROWS, FRAME_BYTES, STATUS_BYTES, WIDTH};

/// 1bpp surface stored as `bands` consecutive runs of [`WIDTH`] column bytes.
///
/// Bit mapping within one column byte: bit 0 is the top row of the band.
/// `N` is the total byte count and must be a multiple of [`WIDTH`].
#[derive(Clone, PartialEq, Eq)]
pub struct BandBuffer<const N: usize> {
    bytes: [u8; N],
}

/// The 128x64 main framebuffer.
pub type FrameBuffer = BandBuffer<FRAME_BYTES>;

/// The one-band status strip shown above the main framebuffer.
pub type StatusLine = BandBuffer<STATUS_BYTES>;

impl<const N: usize> Default for BandBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for BandBuffer<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BandBuffer")
            .field("bands", &Self::BANDS)
            .finish_non_exhaustive()
    }
}

impl<const N: usize> BandBuffer<N> {
    /// Number of row bands.
    pub const BANDS: usize = N / WIDTH;
    /// Height in pixels.
    pub const HEIGHT: usize = Self::BANDS * BAND_ROWS;

    /// Creates a blank surface.
    pub const fn new() -> Self {
        Self { bytes: [0u8; N] }
    }

    /// Returns the underlying bytes, band after band.
    pub fn bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Returns mutable surface bytes.
    pub fn bytes_mut(&mut self) -> &mut [u8; N] {
        &mut self.bytes
    }

    /// Clears every pixel.
    pub fn clear(&mut self) {
        self.bytes.fill(0x00);
    }

    /// Fills every column byte with `byte`.
    pub fn fill(&mut self, byte: u8) {
        self.bytes.fill(byte);
    }

    /// Byte offset of `(band, column)`, or `None` when off the surface.
    #[inline]
    pub const fn offset(band: usize, column: usize) -> Option<usize> {
        if band >= Self::BANDS || column >= WIDTH {
            return None;
        }

        Some(band * WIDTH + column)
    }

    /// Reads one column byte.
    pub fn byte(&self, band: usize, column: usize) -> Option<u8> {
        Self::offset(band, column).map(|i| self.bytes[i])
    }

    /// Mutable access to one column byte.
    pub fn byte_mut(&mut self, band: usize, column: usize) -> Option<&mut u8> {
        Self::offset(band, column).map(|i| &mut self.bytes[i])
    }

    /// Returns one band of column bytes.
    pub fn band(&self, band: usize) -> Option<&[u8; WIDTH]> {
        let start = Self::offset(band, 0)?;
        <&[u8; WIDTH]>::try_from(&self.bytes[start..start + WIDTH]).ok()
    }

    /// Returns one band of column bytes for writing.
    pub fn band_mut(&mut self, band: usize) -> Option<&mut [u8; WIDTH]> {
        let start = Self::offset(band, 0)?;
        <&mut [u8; WIDTH]>::try_from(&mut self.bytes[start..start + WIDTH]).ok()
    }

    /// Sets a pixel state.
    ///
    /// Out-of-range coordinates are ignored and reported with `false`; the
    /// write never spills into a neighbouring band or column.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> bool {
        let Some(byte) = self.byte_mut(y / BAND_ROWS, x) else {
            return false;
        };

        let bit_mask = 1u8 << (y % BAND_ROWS);
        if on {
            *byte |= bit_mask;
        } else {
            *byte &= !bit_mask;
        }

        true
    }

    /// Signed-coordinate variant of [`Self::set_pixel`].
    pub fn set_pixel_signed(&mut self, x: i32, y: i32, on: bool) -> bool {
        if x < 0 || y < 0 {
            return false;
        }

        self.set_pixel(x as usize, y as usize, on)
    }

    /// Reads a pixel state.
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        let byte = self.byte(y / BAND_ROWS, x)?;
        Some((byte & (1u8 << (y % BAND_ROWS))) != 0)
    }

    /// Number of set pixels on the whole surface.
    pub fn count_set(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }
}
