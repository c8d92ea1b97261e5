//! Wire-level protocol helpers for the ST7565 page-addressed controller.

/// Panel width in pixels (columns).
pub const WIDTH: usize = 128;
/// Rows packed into one column byte.
pub const BAND_ROWS: usize = 8;
/// Number of row bands in the main framebuffer.
pub const FRAME_BANDS: usize = 8;
/// Main framebuffer height in pixels.
pub const HEIGHT: usize = FRAME_BANDS * BAND_ROWS;
/// Total main framebuffer size in bytes.
pub const FRAME_BYTES: usize = WIDTH * FRAME_BANDS;
/// Status strip size in bytes (one band).
pub const STATUS_BYTES: usize = WIDTH;

/// Display RAM pages the controller exposes (page 8 is the icon row).
pub const PAGE_COUNT: u8 = 9;
/// Display RAM columns the controller exposes.
pub const RAM_COLUMNS: u8 = 132;

pub const CMD_DISPLAY_OFF: u8 = 0xAE;
pub const CMD_DISPLAY_ON: u8 = 0xAF;
pub const CMD_START_LINE: u8 = 0x40;
pub const CMD_PAGE_ADDRESS: u8 = 0xB0;
pub const CMD_COLUMN_HIGH: u8 = 0x10;
pub const CMD_COLUMN_LOW: u8 = 0x00;
pub const CMD_SEGMENT_NORMAL: u8 = 0xA0;
pub const CMD_SEGMENT_REVERSE: u8 = 0xA1;
pub const CMD_BIAS_1_9: u8 = 0xA2;
pub const CMD_BIAS_1_7: u8 = 0xA3;
pub const CMD_ALL_PIXELS_NORMAL: u8 = 0xA4;
pub const CMD_INVERSE_OFF: u8 = 0xA6;
pub const CMD_RESET: u8 = 0xE2;
pub const CMD_COMMON_NORMAL: u8 = 0xC0;
pub const CMD_COMMON_REVERSE: u8 = 0xC8;
pub const CMD_POWER_CONTROL: u8 = 0x28;
pub const CMD_REGULATION_RATIO: u8 = 0x20;
pub const CMD_ELECTRONIC_VOLUME: u8 = 0x81;

/// Power control bits: booster, regulator and follower all on.
pub const POWER_ALL_ON: u8 = 0x07;
/// Highest electronic volume (contrast) value.
pub const MAX_CONTRAST: u8 = 0x3F;

/// Size of the page + column address command sequence.
pub const ADDRESS_PACKET_SIZE: usize = 3;

/// Builds the `set page / set column` command sequence.
///
/// Returns `None` for pages or columns the controller does not have.
#[inline]
pub fn build_address_packet(page: u8, column: u8) -> Option<[u8; ADDRESS_PACKET_SIZE]> {
    if page >= PAGE_COUNT || column >= RAM_COLUMNS {
        return None;
    }

    Some([
        CMD_PAGE_ADDRESS | page,
        CMD_COLUMN_HIGH | (column >> 4),
        CMD_COLUMN_LOW | (column & 0x0F),
    ])
}

/// Builds the electronic volume (contrast) two-byte command.
#[inline]
pub fn build_contrast_packet(contrast: u8) -> [u8; 2] {
    [CMD_ELECTRONIC_VOLUME, contrast.min(MAX_CONTRAST)]
}

/// Builds the start-line command for a display row 0..=63.
#[inline]
pub fn build_start_line(row: u8) -> Option<u8> {
    if row as usize >= HEIGHT {
        return None;
    }

    Some(CMD_START_LINE | row)
}
