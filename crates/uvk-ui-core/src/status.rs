//! Status strip composition.
//!
//! The strip is rebuilt from scratch on every call from a [`StatusSnapshot`].
//! Two layouts exist: the classic indicator row and, for profiles with
//! `custom_main_status`, a compact receiver summary on the main screen. The
//! choice is made once in [`compose_status`].

use core::fmt::Write;

use heapless::String;
use log::trace;
use st7565::{StatusLine, protocol::WIDTH};

use crate::{
    font::FontSet,
    glyph::{Blend, blit_run, with_byte, xor_span},
    icons::{Icon, IconSet},
    profile::UiProfile,
    text::print_tiny,
};

/// Leftmost column of the right-hand indicator in the classic layout.
const RIGHT_INDICATOR_MIN_X: i32 = 69;
/// Width of the killed marker block.
const KILLED_BLOCK: i32 = 10;
/// Pixels per character of right-aligned battery text.
const BATTERY_TEXT_PITCH: i32 = 7;
/// Highest voltage the battery text shows, in 10 mV units.
const BATTERY_TEXT_MAX: u16 = 999;
/// Signal bars in the compact layout.
const SIGNAL_BARS: u32 = 5;
/// Upper limit of the RX timer, in seconds.
const RX_TIMER_LIMIT: u16 = 3600;

const POWER_LABELS: [&str; 7] = ["L1", "L2", "L3", "L4", "L5", "M", "H"];

type Label = String<12>;

/// What the radio is currently doing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RadioFunction {
    #[default]
    Foreground,
    Transmit,
    Receive,
    Monitor,
    PowerSave,
}

impl RadioFunction {
    pub const fn is_rx(self) -> bool {
        matches!(self, Self::Receive | Self::Monitor)
    }
}

/// Scan list shown while channel scanning.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ScanList {
    #[default]
    All,
    List(u8),
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ScanState {
    #[default]
    Off,
    Frequency,
    Channel { list: ScanList, list_enabled: bool },
}

/// Transmit power setting of the active VFO.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PowerLevel {
    /// User defined level; the label comes from [`VfoStatus::user_power`].
    User,
    Low1,
    Low2,
    Low3,
    Low4,
    Low5,
    Mid,
    #[default]
    High,
}

impl PowerLevel {
    const fn index(self) -> u8 {
        match self {
            Self::User => 0,
            Self::Low1 => 1,
            Self::Low2 => 2,
            Self::Low3 => 3,
            Self::Low4 => 4,
            Self::Low5 => 5,
            Self::Mid => 6,
            Self::High => 7,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Bandwidth {
    #[default]
    Wide,
    Narrow,
}

/// Battery text next to the gauge.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BatteryText {
    #[default]
    Off,
    Voltage,
    Percent,
}

/// Details of the transmit VFO used by the compact layout.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VfoStatus {
    /// Signal strength bar level, 0..=6.
    pub rssi_bar_level: u8,
    /// RX and TX frequencies are equal.
    pub simplex: bool,
    pub power: PowerLevel,
    /// User power setting, 0-based.
    pub user_power: u8,
    pub bandwidth: Bandwidth,
    /// Squelch open threshold, raw RSSI.
    pub squelch_open_rssi: u8,
    /// Channel step in units of 10 Hz.
    pub step: u16,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BatteryStatus {
    /// Gauge level passed to the icon set.
    pub level: u8,
    pub low_blink: bool,
    /// Averaged voltage in units of 10 mV.
    pub voltage: u16,
    pub percent: u8,
    pub text: BatteryText,
}

/// Everything the status strip shows, captured by value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StatusSnapshot {
    /// The main screen is displayed.
    pub main_screen: bool,
    pub air_copy: bool,
    pub dual_watch: bool,
    pub cross_band: bool,
    pub function: RadioFunction,
    pub noaa_mode: bool,
    pub scan: ScanState,
    /// The spectrum/frequency scanner is running.
    pub scanner_active: bool,
    pub killed: bool,
    pub voice_prompt: bool,
    /// The RX/TX timer setting is on.
    pub timer_enabled: bool,
    /// Remaining transmit time, in 500 ms ticks.
    pub tx_countdown: u16,
    /// Remaining receive time, in 500 ms ticks.
    pub rx_countdown: u16,
    pub menu_lock: bool,
    /// Dual watch is currently listening on the other VFO.
    pub dual_watch_active: bool,
    pub vox: bool,
    pub ptt_one_push: bool,
    pub key_lock: bool,
    pub f_key: bool,
    pub mute: bool,
    pub backlight: bool,
    pub charging_type_c: bool,
    pub vfo: VfoStatus,
    pub battery: BatteryStatus,
    pub debug: i32,
}

/// Which layout produced the strip.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatusLayout {
    Classic,
    MainCompact,
}

/// Result of one composition.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatusRender {
    pub layout: StatusLayout,
    /// The strip shows a running timer and must be composed again.
    pub redraw_pending: bool,
}

/// Picks the layout for `profile` and `snapshot`.
pub fn select_layout(profile: &UiProfile, snapshot: &StatusSnapshot) -> StatusLayout {
    if profile.custom_main_status
        && snapshot.main_screen
        && !snapshot.air_copy
        && !snapshot.dual_watch
        && !snapshot.cross_band
    {
        StatusLayout::MainCompact
    } else {
        StatusLayout::Classic
    }
}

/// Clears `line` and draws the status strip for `snapshot`.
pub fn compose_status<I: IconSet + ?Sized>(
    line: &mut StatusLine,
    fonts: &FontSet<'_>,
    icons: &I,
    profile: &UiProfile,
    snapshot: &StatusSnapshot,
) -> StatusRender {
    line.clear();

    let layout = select_layout(profile, snapshot);
    let mut painter = Painter {
        line,
        fonts,
        icons,
    };
    let redraw_pending = match layout {
        StatusLayout::Classic => painter.classic(profile, snapshot),
        StatusLayout::MainCompact => {
            painter.main_compact(snapshot);
            false
        }
    };

    trace!("status composed: {layout:?}, redraw pending {redraw_pending}");
    StatusRender {
        layout,
        redraw_pending,
    }
}

struct Painter<'l, 'f, I: ?Sized> {
    line: &'l mut StatusLine,
    fonts: &'l FontSet<'f>,
    icons: &'l I,
}

impl<I: IconSet + ?Sized> Painter<'_, '_, I> {
    fn width(&self, icon: Icon) -> i32 {
        self.icons.icon(icon).len() as i32
    }

    fn put(&mut self, x: i32, icon: Icon) {
        let icons = self.icons;
        self.put_bytes(x, icons.icon(icon));
    }

    fn put_bytes(&mut self, x: i32, bytes: &[u8]) {
        for (k, &b) in bytes.iter().enumerate() {
            with_byte(self.line, 0, x + k as i32, |dst| *dst = b);
        }
    }

    fn small(&mut self, x: i32, text: &str) {
        blit_run(self.line, 0, x, text, &self.fonts.small, Blend::Overwrite);
    }

    fn tiny(&mut self, x: i32, text: &str) {
        print_tiny(self.line, &self.fonts.tiny, text, x, 1, true);
    }

    fn battery(&mut self, x: i32, battery: &BatteryStatus) {
        self.put(
            x,
            Icon::Battery {
                level: battery.level,
                blink: battery.low_blink,
            },
        );
    }

    /// Returns `true` when a running timer was drawn.
    fn classic(&mut self, profile: &UiProfile, s: &StatusSnapshot) -> bool {
        let scanning = s.scan != ScanState::Off || s.scanner_active;
        let mut pending = false;

        if profile.noaa && !scanning && s.noaa_mode {
            self.put(0, Icon::Noaa);
        } else if s.function == RadioFunction::PowerSave {
            self.put(0, Icon::PowerSave);
        }
        let mut x = 8;
        let mut x1 = x;

        if profile.dtmf_calling && s.killed {
            for k in 0..KILLED_BLOCK {
                with_byte(self.line, 0, x + k, |dst| *dst = 0xFF);
            }
            x1 = x + KILLED_BLOCK;
        } else if scanning {
            match s.scan {
                ScanState::Channel { list, list_enabled } if !s.scanner_active => {
                    let (label, end) = scan_list_label(list, list_enabled);
                    print_tiny(self.line, &self.fonts.tiny, &label, 2, 1, true);
                    xor_span(self.line, 0, 0, end, 0x7F);
                }
                _ => self.put(x + 1, Icon::Scan),
            }
            x1 = x + 10;
        }
        x += 10;

        if profile.debug {
            let mut text = Label::new();
            let _ = write!(text, "{}", s.debug);
            self.small(x + 1, &text);
            x += 16;
        } else {
            if profile.voice {
                let width = self.width(Icon::VoicePrompt);
                if s.voice_prompt {
                    self.put(x, Icon::VoicePrompt);
                    x1 = x + width;
                }
                x += width;
            }

            if !s.scanner_active {
                let timer = profile.rx_tx_timer && s.timer_enabled;
                if timer && s.function == RadioFunction::Transmit {
                    self.elapsed(s.tx_countdown / 2);
                    pending = true;
                } else if timer && s.function.is_rx() {
                    self.elapsed(RX_TIMER_LIMIT.saturating_sub(s.rx_countdown / 2));
                    pending = true;
                } else if profile.rescue_ops && s.menu_lock {
                    self.put(x + 2, Icon::ReadOnly);
                } else {
                    self.mode_icon(x, s);
                }
            }
            x += self.width(Icon::DualWatchRespond) + 3;
        }

        if profile.vox {
            let width = self.width(Icon::Vox);
            if s.vox {
                self.put(x, Icon::Vox);
                x1 = x + width + 1;
            }
            x += width + 3;
        }

        if profile.custom_main_status {
            if !s.air_copy {
                let icon = if s.ptt_one_push {
                    Icon::PttOnePush
                } else {
                    Icon::PttClassic
                };
                self.put(x, icon);
                x1 = x + self.width(icon) + 1;
            }
        }

        let x = x1.max(RIGHT_INDICATOR_MIN_X);
        if let Some(icon) = right_indicator(profile, s) {
            self.put(x + 1, icon);
        }

        let mut x2 = WIDTH as i32 - self.icons.battery_width() as i32;
        self.battery(x2, &s.battery);

        if let Some(text) = battery_text(&s.battery) {
            x2 -= BATTERY_TEXT_PITCH * text.len() as i32;
            self.small(x2, &text);
        }

        pending
    }

    /// Dual-watch, cross-band or monitor marker of the classic layout.
    fn mode_icon(&mut self, x: i32, s: &StatusSnapshot) {
        let dw = u8::from(s.dual_watch) + 2 * u8::from(s.cross_band);
        match dw {
            1 | 3 => {
                if s.dual_watch_active {
                    let icons = self.icons;
                    let bytes = icons.icon(Icon::DualWatchRespond);
                    let (offset, bytes) = if dw == 1 {
                        (0, bytes)
                    } else {
                        (2, &bytes[..bytes.len().saturating_sub(5)])
                    };
                    self.put_bytes(x + offset, bytes);
                } else {
                    self.put(x + 3, Icon::Hold);
                }
            }
            2 => self.put(x + 2, Icon::CrossBand),
            _ if !s.air_copy => self.put(x + 2, Icon::Monitor),
            _ => {}
        }
    }

    /// `MM:SS` timer over the left end of the strip.
    fn elapsed(&mut self, seconds: u16) {
        for col in [0, 7, 14] {
            with_byte(self.line, 0, col, |dst| *dst = 0);
        }
        let mut text = Label::new();
        let _ = write!(text, "{:02}:{:02}", seconds / 60, seconds % 60);
        self.small(0, &text);
    }

    fn main_compact(&mut self, s: &StatusSnapshot) {
        let vfo = &s.vfo;

        self.put(0, Icon::Antenna);
        let mut x: i32 = 6 - 2;

        let bars = if s.function.is_rx() {
            ((u32::from(vfo.rssi_bar_level) * 5 + 5) / 6).min(SIGNAL_BARS)
        } else {
            0
        };
        for i in 0..bars {
            let h = i + 1;
            let mask = (((1u32 << h) - 1) << (7 - h)) as u8;
            with_byte(self.line, 0, x + 2 * i as i32, |dst| *dst |= mask);
        }
        x += 2 * SIGNAL_BARS as i32;

        if vfo.simplex {
            self.tiny(x, "|->|");
            x += 22;
        }

        let power = match vfo.power {
            PowerLevel::User => vfo.user_power.saturating_add(1),
            level => level.index(),
        };
        if (1..=7).contains(&power) {
            self.tiny(x, POWER_LABELS[usize::from(power - 1)]);
            x += 14;
        }

        let (mode, width) = match vfo.bandwidth {
            Bandwidth::Wide => ("W", "25K"),
            Bandwidth::Narrow => ("N", "12K"),
        };
        self.tiny(x, mode);
        x += 6;
        self.tiny(x, width);
        x += 14;

        let squelch = ((u32::from(vfo.squelch_open_rssi) * 9 + 255) / 256).min(9);
        let mut text = Label::new();
        let _ = write!(text, "{squelch}");
        self.tiny(x, &text);
        x += 6;

        text.clear();
        let _ = write!(text, "{}.{:02}K", vfo.step / 100, vfo.step % 100);
        self.tiny(x, &text);

        let x = WIDTH as i32 - self.icons.battery_width() as i32 - 2;
        self.battery(x, &s.battery);
    }
}

/// Tiny scan-list label and the width of its highlight.
fn scan_list_label(list: ScanList, list_enabled: bool) -> (Label, i32) {
    let mut label = Label::new();
    let end = match (list, list_enabled) {
        (ScanList::All, true) => {
            let _ = label.push_str("ALL+");
            19
        }
        (ScanList::All, false) => {
            let _ = label.push_str("ALL");
            15
        }
        (ScanList::List(n), true) => {
            let _ = write!(label, "{n:02}+");
            15
        }
        (ScanList::List(n), false) => {
            let _ = write!(label, "{n:02}");
            11
        }
    };
    (label, end)
}

/// The single indicator right of the mode section, first match wins.
fn right_indicator(profile: &UiProfile, s: &StatusSnapshot) -> Option<Icon> {
    if s.key_lock {
        Some(Icon::KeyLock)
    } else if s.f_key {
        (!(profile.rescue_ops && s.menu_lock)).then_some(Icon::FKey)
    } else if profile.custom_main_status && s.mute {
        Some(Icon::Mute)
    } else if s.backlight {
        Some(Icon::Light)
    } else if profile.charging_type_c && s.charging_type_c {
        Some(Icon::UsbC)
    } else {
        None
    }
}

fn battery_text(battery: &BatteryStatus) -> Option<Label> {
    let mut text = Label::new();
    match battery.text {
        BatteryText::Off => return None,
        BatteryText::Voltage => {
            let v = battery.voltage.min(BATTERY_TEXT_MAX);
            let _ = write!(text, "{}.{:02}", v / 100, v % 100);
        }
        BatteryText::Percent => {
            let _ = write!(text, "{:02}%", battery.percent);
        }
    }
    Some(text)
}
