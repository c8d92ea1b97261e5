//! Status-line bitmaps for the host preview.

use uvk_ui_core::{Icon, IconSet};

const BATTERY_WIDTH: usize = 13;
const BATTERY_LEVELS: usize = 6;

const ANTENNA: [u8; 5] = [0x03, 0x05, 0x7F, 0x05, 0x03];
const POWER_SAVE: [u8; 8] = [0x00, 0x26, 0x49, 0x49, 0x49, 0x49, 0x32, 0x00];
const NOAA: [u8; 12] = [
    0x00, 0x7F, 0x04, 0x08, 0x7F, 0x00, 0x3E, 0x41, 0x41, 0x3E, 0x00, 0x00,
];
const SCAN: [u8; 7] = [0x00, 0x26, 0x49, 0x49, 0x49, 0x32, 0x00];
const VOICE: [u8; 9] = [0x00, 0x18, 0x18, 0x24, 0x42, 0x7E, 0x00, 0x24, 0x18];
const DUAL_WATCH: [u8; 16] = [
    0x00, 0x7F, 0x41, 0x41, 0x3E, 0x00, 0x3F, 0x40, 0x38, 0x40, 0x3F, 0x00, 0x7F, 0x19, 0x29,
    0x46,
];
const HOLD: [u8; 11] = [
    0x00, 0x7F, 0x08, 0x7F, 0x00, 0x3E, 0x41, 0x3E, 0x00, 0x7F, 0x40,
];
const CROSS_BAND: [u8; 10] = [0x00, 0x63, 0x14, 0x08, 0x14, 0x63, 0x00, 0x7F, 0x49, 0x36];
const MONITOR: [u8; 10] = [0x00, 0x7F, 0x02, 0x0C, 0x02, 0x7F, 0x00, 0x3E, 0x41, 0x3E];
const READ_ONLY: [u8; 10] = [0x00, 0x7F, 0x19, 0x29, 0x46, 0x00, 0x3E, 0x41, 0x41, 0x3E];
const VOX: [u8; 18] = [
    0x00, 0x1F, 0x20, 0x40, 0x20, 0x1F, 0x00, 0x3E, 0x41, 0x41, 0x3E, 0x00, 0x63, 0x14, 0x08,
    0x14, 0x63, 0x00,
];
const PTT_ONE_PUSH: [u8; 10] = [0x00, 0x7F, 0x09, 0x06, 0x00, 0x00, 0x42, 0x7F, 0x40, 0x00];
const PTT_CLASSIC: [u8; 10] = [0x00, 0x7F, 0x09, 0x06, 0x00, 0x00, 0x3E, 0x41, 0x22, 0x00];
const KEY_LOCK: [u8; 9] = [0x00, 0x7C, 0x46, 0x45, 0x45, 0x45, 0x46, 0x7C, 0x00];
const F_KEY: [u8; 8] = [0x7F, 0x7F, 0x09, 0x09, 0x09, 0x01, 0x7F, 0x7F];
const MUTE: [u8; 12] = [
    0x00, 0x1C, 0x1C, 0x3E, 0x7F, 0x00, 0x22, 0x14, 0x08, 0x14, 0x22, 0x00,
];
const LIGHT: [u8; 12] = [
    0x00, 0x0C, 0x12, 0x21, 0x41, 0x5D, 0x41, 0x21, 0x12, 0x0C, 0x00, 0x00,
];
const USB_C: [u8; 9] = [0x00, 0x1C, 0x22, 0x22, 0x22, 0x22, 0x22, 0x1C, 0x00];

/// Battery outline with a nub on the left, filled from the right by level.
const fn battery(level: usize) -> [u8; BATTERY_WIDTH] {
    let mut out = [0x41; BATTERY_WIDTH];
    out[0] = 0x1C;
    out[1] = 0x7F;
    out[BATTERY_WIDTH - 1] = 0x7F;
    let mut cell = 0;
    while cell < 5 {
        let fill = if cell < level { 0x7F } else { 0x41 };
        let x = BATTERY_WIDTH - 2 - 2 * cell;
        out[x] = fill;
        out[x - 1] = fill;
        cell += 1;
    }
    out
}

static BATTERY: [[u8; BATTERY_WIDTH]; BATTERY_LEVELS] = [
    battery(0),
    battery(1),
    battery(2),
    battery(3),
    battery(4),
    battery(5),
];
static BATTERY_BLANK: [u8; BATTERY_WIDTH] = [0; BATTERY_WIDTH];

pub(super) struct PreviewIcons;

impl IconSet for PreviewIcons {
    fn icon(&self, icon: Icon) -> &[u8] {
        match icon {
            Icon::Antenna => &ANTENNA,
            Icon::PowerSave => &POWER_SAVE,
            Icon::Noaa => &NOAA,
            Icon::Scan => &SCAN,
            Icon::VoicePrompt => &VOICE,
            Icon::DualWatchRespond => &DUAL_WATCH,
            Icon::Hold => &HOLD,
            Icon::CrossBand => &CROSS_BAND,
            Icon::Monitor => &MONITOR,
            Icon::ReadOnly => &READ_ONLY,
            Icon::Vox => &VOX,
            Icon::PttOnePush => &PTT_ONE_PUSH,
            Icon::PttClassic => &PTT_CLASSIC,
            Icon::KeyLock => &KEY_LOCK,
            Icon::FKey => &F_KEY,
            Icon::Mute => &MUTE,
            Icon::Light => &LIGHT,
            Icon::UsbC => &USB_C,
            Icon::Battery { blink: true, .. } => &BATTERY_BLANK,
            Icon::Battery { level, .. } => {
                &BATTERY[usize::from(level).min(BATTERY_LEVELS - 1)]
            }
        }
    }
}
