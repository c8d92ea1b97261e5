//! Whole-frame views.

use st7565::FrameBuffer;

use crate::{
    font::FontSet,
    text::{print_big, print_small},
};

/// Horizontal window popups centre their text in.
pub const POPUP_START: i32 = 9;
pub const POPUP_END: i32 = 118;
/// Band of the big popup message (it covers this band and the next).
pub const POPUP_MESSAGE_BAND: usize = 2;
/// Band of the dismiss hint.
pub const POPUP_HINT_BAND: usize = 6;
/// Cell width of big popup characters.
pub const POPUP_CELL_WIDTH: i32 = 8;
pub const POPUP_HINT: &str = "Press EXIT";

/// Blanks every band of the frame.
pub fn clear(frame: &mut FrameBuffer) {
    frame.clear();
}

/// Modal message: big text over bands 2-3 with the dismiss hint on band 6.
pub fn popup(frame: &mut FrameBuffer, fonts: &FontSet<'_>, message: &str) {
    clear(frame);
    print_big(
        frame,
        &fonts.big,
        message,
        POPUP_START,
        POPUP_END,
        POPUP_MESSAGE_BAND,
        POPUP_CELL_WIDTH,
    );
    print_small(
        frame,
        &fonts.small,
        POPUP_HINT,
        POPUP_START,
        POPUP_END,
        POPUP_HINT_BAND,
    );
}
