//! Channel labels, including the partially typed number of an entry in progress.

use core::fmt::Write;

use heapless::String;

/// Highest memory channel index.
pub const LAST_CHANNEL: u16 = 199;
/// Index reported when no channel is assigned.
pub const NO_CHANNEL: u16 = 0xFFFF;
/// Entry value rendered as a dash.
pub const ENTRY_BLANK: u8 = 10;
/// Digits the keypad entry can hold.
pub const ENTRY_CAPACITY: usize = 8;

pub type ChannelLabel = String<8>;

/// Keypad number entry: digit values 0..=9 or [`ENTRY_BLANK`], plus a count.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EntryBuffer {
    pub digits: [u8; ENTRY_CAPACITY],
    pub count: u8,
}

impl EntryBuffer {
    /// An entry holding `values`; positions past `values` read as blank.
    pub fn from_values(values: &[u8]) -> Self {
        let mut digits = [ENTRY_BLANK; ENTRY_CAPACITY];
        let count = values.len().min(ENTRY_CAPACITY);
        digits[..count].copy_from_slice(&values[..count]);
        Self {
            digits,
            count: count as u8,
        }
    }

    pub const fn is_active(&self) -> bool {
        self.count > 0
    }

    /// The character shown for entry position `index`.
    pub fn char_at(&self, index: usize) -> char {
        match self.digits.get(index) {
            Some(&d) if d <= 9 => (b'0' + d) as char,
            _ => '-',
        }
    }

    fn push_chars(&self, out: &mut ChannelLabel, n: usize) {
        for i in 0..n {
            let _ = out.push(self.char_at(i));
        }
    }
}

/// `CH-NN` for the one-based channel, or `CH-` plus two typed characters.
pub fn channel_string(channel: u16, entry: &EntryBuffer) -> ChannelLabel {
    let mut out = ChannelLabel::new();
    if !entry.is_active() {
        let _ = write!(out, "CH-{:02}", u32::from(channel) + 1);
        return out;
    }

    let _ = out.push_str("CH-");
    entry.push_chars(&mut out, 2);
    out
}

/// Three-digit channel label.
///
/// While an entry is in progress the first three typed characters are shown,
/// after `CH-` when `show_prefix` is set. Otherwise `CH-NNN` with the prefix,
/// `None` past the last channel, `NULL` for [`NO_CHANNEL`], else `NNN`.
pub fn channel_string_ex(show_prefix: bool, channel: u16, entry: &EntryBuffer) -> ChannelLabel {
    let mut out = ChannelLabel::new();
    if entry.is_active() {
        if show_prefix {
            let _ = out.push_str("CH-");
        }
        entry.push_chars(&mut out, 3);
        return out;
    }

    let number = u32::from(channel) + 1;
    let _ = if show_prefix {
        write!(out, "CH-{number:03}")
    } else if channel == LAST_CHANNEL + 1 {
        out.push_str("None").map_err(|_| core::fmt::Error)
    } else if channel == NO_CHANNEL {
        out.push_str("NULL").map_err(|_| core::fmt::Error)
    } else {
        write!(out, "{number:03}")
    };
    out
}
