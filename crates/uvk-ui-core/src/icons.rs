//! Status-line icon lookup.
//!
//! Icon pixels belong to the firmware image; the engine only asks for a
//! column patch by name and copies it into the status line.

/// Named status-line bitmaps.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Icon {
    Antenna,
    PowerSave,
    Noaa,
    /// Frequency scan marker.
    Scan,
    VoicePrompt,
    /// Dual watch with respond.
    DualWatchRespond,
    Hold,
    CrossBand,
    Monitor,
    ReadOnly,
    Vox,
    PttOnePush,
    PttClassic,
    KeyLock,
    FKey,
    Mute,
    Light,
    UsbC,
    /// Battery gauge; `blink` is the low-battery blink phase.
    Battery { level: u8, blink: bool },
}

/// Supplies the column bytes of each status-line icon, bit 0 topmost.
///
/// Every patch is one band high. Widths vary per icon; the layout advances by
/// the width of the patch returned here.
pub trait IconSet {
    fn icon(&self, icon: Icon) -> &[u8];

    /// Columns reserved for the battery gauge at the right edge.
    fn battery_width(&self) -> usize {
        self.icon(Icon::Battery {
            level: 1,
            blink: false,
        })
        .len()
    }
}

impl<T: IconSet + ?Sized> IconSet for &T {
    fn icon(&self, icon: Icon) -> &[u8] {
        (**self).icon(icon)
    }

    fn battery_width(&self) -> usize {
        (**self).battery_width()
    }
}
