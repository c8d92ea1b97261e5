//! Host preview: composes the main radio screen and prints the panel.
//!
//! `UVK_PROFILE` selects the firmware profile (`classic` or `f4hwn`),
//! `UVK_CHANNEL_ENTRY` simulates a keypad channel entry (digits, `-` for
//! blank) and any arguments are shown as a popup over the screen.

use std::io;

use embedded_graphics_core::{
    Pixel, draw_target::DrawTarget, geometry::Point, pixelcolor::BinaryColor,
};
use log::{info, warn};
use uvk_ui_core::{
    Compositor, DrawRequest, EntryBuffer, StatusSnapshot, TextStyle, UiProfile,
    channel::{ENTRY_BLANK, ENTRY_CAPACITY},
    channel_string_ex,
    compositor::request_text,
    status::{BatteryStatus, BatteryText, Bandwidth, PowerLevel, RadioFunction, VfoStatus},
};

use fonts::FontTables;
use icons::PreviewIcons;
use terminal::TerminalSink;

#[path = "main/fonts.rs"]
mod fonts;
#[path = "main/icons.rs"]
mod icons;
#[path = "main/terminal.rs"]
mod terminal;

const PROFILE_ENV: &str = "UVK_PROFILE";
const ENTRY_ENV: &str = "UVK_CHANNEL_ENTRY";
const DEMO_CHANNEL: u16 = 11;
const DEMO_FREQUENCY: &str = "145.500";
const SEPARATOR_ROW: i32 = 47;

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let profile = load_profile();
    let entry = load_entry();
    let popup: Vec<String> = std::env::args().skip(1).collect();

    let tables = FontTables::build();
    let mut ui = Compositor::new(tables.font_set(), PreviewIcons, profile);

    ui.apply(&DrawRequest::Clear);
    ui.apply(&DrawRequest::Status(demo_status()));

    let channel = channel_string_ex(true, DEMO_CHANNEL, &entry);
    ui.apply(&DrawRequest::text(&channel, 0, 0, 0, TextStyle::SmallInverse));
    ui.apply(&DrawRequest::text("VFO A", 64, 128, 0, TextStyle::SmallBold));
    ui.apply(&DrawRequest::Frequency {
        text: request_text(DEMO_FREQUENCY),
        x: 20,
        band: 2,
        center: false,
        raised: Some(0),
    });
    ui.apply(&DrawRequest::text("FM  12.5K", 0, 128, 4, TextStyle::Small));
    draw_separator(&mut ui);
    ui.apply(&DrawRequest::text("SQL 3", 0, 0, 7, TextStyle::SmallBottomInRow));

    if !popup.is_empty() {
        let message = popup.join(" ");
        if ui.submit(DrawRequest::popup(&message)).is_err() {
            warn!("popup dropped");
        }
    }

    let stdout = io::stdout();
    let mut sink = TerminalSink::new(stdout.lock());
    let applied = ui.refresh(&mut sink)?;

    info!(
        "profile={} queued={} bands={} status_redraw={}",
        profile_name(&profile),
        applied,
        sink.bands_written(),
        ui.status_redraw_pending()
    );
    Ok(())
}

fn load_profile() -> UiProfile {
    match std::env::var(PROFILE_ENV) {
        Ok(name) => UiProfile::from_name(&name).unwrap_or_else(|| {
            warn!("unknown {PROFILE_ENV}={name}, using classic");
            UiProfile::classic()
        }),
        Err(_) => UiProfile::default(),
    }
}

fn load_entry() -> EntryBuffer {
    let Ok(raw) = std::env::var(ENTRY_ENV) else {
        return EntryBuffer::default();
    };

    let mut digits = [ENTRY_BLANK; ENTRY_CAPACITY];
    let mut count = 0;
    for (slot, c) in digits.iter_mut().zip(raw.chars()) {
        *slot = c.to_digit(10).map_or(ENTRY_BLANK, |d| d as u8);
        count += 1;
    }
    EntryBuffer::from_values(&digits[..count])
}

fn profile_name(profile: &UiProfile) -> &'static str {
    if *profile == UiProfile::f4hwn() {
        "f4hwn"
    } else if *profile == UiProfile::classic() {
        "classic"
    } else {
        "custom"
    }
}

/// Dotted rule under the frequency readout, drawn through `embedded-graphics`.
fn draw_separator<I: uvk_ui_core::IconSet>(ui: &mut Compositor<'_, I>) {
    let dots = (0..128)
        .step_by(2)
        .map(|x| Pixel(Point::new(x, SEPARATOR_ROW), BinaryColor::On));
    let _ = ui.frame_mut().draw_iter(dots);
}

fn demo_status() -> StatusSnapshot {
    StatusSnapshot {
        main_screen: true,
        function: RadioFunction::Receive,
        key_lock: true,
        vfo: VfoStatus {
            rssi_bar_level: 4,
            simplex: true,
            power: PowerLevel::Mid,
            bandwidth: Bandwidth::Narrow,
            squelch_open_rssi: 90,
            step: 1250,
            ..VfoStatus::default()
        },
        battery: BatteryStatus {
            level: 4,
            voltage: 791,
            percent: 78,
            text: BatteryText::Voltage,
            ..BatteryStatus::default()
        },
        ..StatusSnapshot::default()
    }
}
