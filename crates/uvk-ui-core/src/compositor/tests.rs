use st7565::protocol::WIDTH;

use super::*;
use crate::{
    icons::Icon,
    status::{
        BatteryStatus, BatteryText, PowerLevel, RadioFunction, ScanList, ScanState, StatusLayout,
        VfoStatus,
    },
};

const GLYPHS: usize = 94;

// Every small glyph column carries its own character code.
const fn small_table() -> [u8; GLYPHS * 6] {
    let mut table = [0u8; GLYPHS * 6];
    let mut i = 0;
    while i < table.len() {
        table[i] = b'!' + (i / 6) as u8;
        i += 1;
    }
    table
}

// Bold glyphs are the small ones with the top pixel row set.
const fn bold_table() -> [u8; GLYPHS * 6] {
    let mut table = small_table();
    let mut i = 0;
    while i < table.len() {
        table[i] |= 0x80;
        i += 1;
    }
    table
}

// Big glyphs: upper band 0x0F, lower band 0xF0.
const fn big_table() -> [u8; GLYPHS * 14] {
    let mut table = [0u8; GLYPHS * 14];
    let mut i = 0;
    while i < table.len() {
        table[i] = if i % 14 < 7 { 0x0F } else { 0xF0 };
        i += 1;
    }
    table
}

// Tiny glyphs from ' ': a single pixel in the top row of the first column.
const fn tiny_table() -> [u8; (GLYPHS + 1) * 3] {
    let mut table = [0u8; (GLYPHS + 1) * 3];
    let mut i = 3;
    while i < table.len() {
        table[i] = 0x01;
        i += 3;
    }
    table
}

static SMALL: [u8; GLYPHS * 6] = small_table();
static BOLD: [u8; GLYPHS * 6] = bold_table();
static BIG: [u8; GLYPHS * 14] = big_table();
static DIGITS: [u8; 11 * 20] = [0x3C; 11 * 20];
static TINY: [u8; (GLYPHS + 1) * 3] = tiny_table();

fn fonts() -> FontSet<'static> {
    FontSet {
        small: Font::new(&SMALL, 6),
        small_bold: Some(Font::new(&BOLD, 6)),
        big: Font::with_layout(&BIG, 7, 2, b'!'),
        big_digits: Font::with_layout(&DIGITS, 10, 2, b'0'),
        tiny: Font::with_layout(&TINY, 3, 1, b' '),
    }
}

struct TestIcons;

impl IconSet for TestIcons {
    fn icon(&self, icon: Icon) -> &[u8] {
        match icon {
            Icon::Antenna => &[0xA0; 5],
            Icon::PowerSave => &[0xA1; 8],
            Icon::Noaa => &[0xA2; 12],
            Icon::Scan => &[0xA3; 7],
            Icon::VoicePrompt => &[0xA4; 9],
            Icon::DualWatchRespond => &[0xA5; 16],
            Icon::Hold => &[0xA6; 11],
            Icon::CrossBand => &[0xA7; 10],
            Icon::Monitor => &[0xA8; 10],
            Icon::ReadOnly => &[0xA9; 10],
            Icon::Vox => &[0xAA; 18],
            Icon::PttOnePush => &[0xAB; 10],
            Icon::PttClassic => &[0xAC; 10],
            Icon::KeyLock => &[0xAD; 9],
            Icon::FKey => &[0xAE; 8],
            Icon::Mute => &[0xAF; 12],
            Icon::Light => &[0xB0; 12],
            Icon::UsbC => &[0xB1; 9],
            Icon::Battery { blink: true, .. } => &[0x00; 13],
            Icon::Battery { .. } => &[0xB2; 13],
        }
    }
}

#[derive(Default)]
struct RecordingSink {
    status: Vec<[u8; WIDTH]>,
    bands: Vec<(usize, [u8; WIDTH])>,
    fail_on_band: Option<usize>,
}

impl BandSink for RecordingSink {
    type Error = usize;

    fn flush_band(&mut self, band: usize, data: &[u8; WIDTH]) -> Result<(), Self::Error> {
        if self.fail_on_band == Some(band) {
            return Err(band);
        }
        self.bands.push((band, *data));
        Ok(())
    }

    fn flush_status_line(&mut self, data: &[u8; WIDTH]) -> Result<(), Self::Error> {
        self.status.push(*data);
        Ok(())
    }
}

fn compositor(profile: UiProfile) -> Compositor<'static, TestIcons> {
    Compositor::new(fonts(), TestIcons, profile)
}

fn status_of(profile: UiProfile, snapshot: StatusSnapshot) -> [u8; WIDTH] {
    let mut ui = compositor(profile);
    ui.apply(&DrawRequest::Status(snapshot));
    *ui.status_line().bytes()
}

fn with_battery(snapshot: StatusSnapshot) -> StatusSnapshot {
    StatusSnapshot {
        battery: BatteryStatus {
            level: 4,
            ..BatteryStatus::default()
        },
        ..snapshot
    }
}

#[test]
fn refresh_applies_queue_then_flushes_status_and_every_band() {
    let mut ui = compositor(UiProfile::classic());
    let mut sink = RecordingSink::default();

    assert!(ui.submit(DrawRequest::popup("SAVED")).is_ok());
    assert_eq!(ui.pending(), 1);

    let applied = ui.refresh(&mut sink).unwrap();

    assert_eq!(applied, 1);
    assert_eq!(ui.pending(), 0);
    assert_eq!(sink.status.len(), 1);
    let order: Vec<usize> = sink.bands.iter().map(|(band, _)| *band).collect();
    assert_eq!(order, (0..8).collect::<Vec<_>>());
    for (band, data) in &sink.bands {
        assert_eq!(Some(data), ui.frame().band(*band));
    }

    let mut expected = FrameBuffer::new();
    views::popup(&mut expected, &fonts(), "SAVED");
    assert!(*ui.frame() == expected);
}

#[test]
fn popup_places_message_and_hint() {
    let mut ui = compositor(UiProfile::classic());
    ui.apply(&DrawRequest::Line {
        x1: 0,
        y1: 63,
        x2: 127,
        y2: 63,
        on: true,
    });

    ui.apply(&DrawRequest::popup("OK"));

    let frame = ui.frame();
    // 109 - 16 + 1 = 94, origin 9 + 47 = 56
    assert_eq!(frame.byte(2, 55), Some(0x00));
    assert_eq!(frame.byte(2, 56), Some(0x0F));
    assert_eq!(frame.byte(3, 56), Some(0xF0));
    assert_eq!(frame.byte(2, 70), Some(0x0F));
    assert_eq!(frame.byte(2, 71), Some(0x00));
    // "Press EXIT": width 70, origin 9 + 20 = 29, 'P' at 30
    assert_eq!(frame.byte(6, 29), Some(0x00));
    assert_eq!(frame.byte(6, 30), Some(b'P'));
    // blank keeps its cell: 'E' is character 6
    assert_eq!(frame.byte(6, 29 + 6 * 7 + 1), Some(b'E'));
    assert_eq!(frame.byte(7, 0), Some(0x00));
}

#[test]
fn full_queue_returns_request() {
    let mut ui = compositor(UiProfile::classic());
    for _ in 0..QUEUE_DEPTH {
        assert!(ui.submit(DrawRequest::Clear).is_ok());
    }

    let rejected = ui.submit(DrawRequest::popup("LATE"));

    assert_eq!(rejected, Err(DrawRequest::popup("LATE")));
    assert_eq!(ui.pending(), QUEUE_DEPTH);
}

#[test]
fn requests_apply_in_submission_order() {
    let mut ui = compositor(UiProfile::classic());
    let mut sink = RecordingSink::default();

    let _ = ui.submit(DrawRequest::text("AB", 0, 0, 1, TextStyle::Small));
    let _ = ui.submit(DrawRequest::Clear);
    let _ = ui.submit(DrawRequest::Rectangle {
        x1: 0,
        y1: 0,
        x2: 3,
        y2: 3,
        on: true,
    });
    ui.refresh(&mut sink).unwrap();

    assert_eq!(ui.frame().byte(1, 1), Some(0x00));
    assert_eq!(ui.frame().count_set(), 12);
}

#[test]
fn sink_error_keeps_composed_frame() {
    let mut ui = compositor(UiProfile::classic());
    let mut sink = RecordingSink {
        fail_on_band: Some(3),
        ..RecordingSink::default()
    };

    let _ = ui.submit(DrawRequest::text("A", 0, 0, 5, TextStyle::Small));

    assert_eq!(ui.refresh(&mut sink), Err(3));
    assert_eq!(sink.bands.len(), 3);
    assert_eq!(ui.frame().byte(5, 1), Some(b'A'));

    sink.fail_on_band = None;
    assert_eq!(ui.refresh(&mut sink), Ok(0));
    assert_eq!(sink.bands.last().map(|(band, _)| *band), Some(7));
}

#[test]
fn long_request_text_is_truncated() {
    let long = "0123456789".repeat(4);

    let DrawRequest::Popup(text) = DrawRequest::popup(&long) else {
        panic!("popup request expected");
    };

    assert_eq!(text.len(), TEXT_BYTES);
    assert!(long.starts_with(text.as_str()));
}

#[test]
fn bold_style_follows_profile() {
    let mut plain = compositor(UiProfile::classic());
    let mut bold = compositor(UiProfile::classic().with_small_bold(true));
    let request = DrawRequest::text("A", 0, 0, 0, TextStyle::SmallBold);

    plain.apply(&request);
    bold.apply(&request);

    assert_eq!(plain.frame().byte(0, 1), Some(b'A'));
    assert_eq!(bold.frame().byte(0, 1), Some(b'A' | 0x80));
}

#[test]
fn frequency_request_selects_raised_layout() {
    let mut ui = compositor(UiProfile::classic());

    ui.apply(&DrawRequest::Frequency {
        text: request_text("1"),
        x: 0,
        band: 3,
        center: false,
        raised: Some(0),
    });

    // 0x3C << 2 = 0xF0, top spill 0x3C >> 6 = 0
    assert_eq!(ui.frame().byte(3, 2), Some(0xF0 | (0x3C >> 6)));
    assert_eq!(ui.frame().byte(4, 2), Some(0xF0));
}

#[test]
fn tiny_request_reaches_status_line() {
    let mut ui = compositor(UiProfile::classic());

    ui.apply(&DrawRequest::Tiny {
        text: request_text("AB"),
        x: 10,
        y: 1,
        target: Target::Status,
        fill: true,
    });

    assert_eq!(ui.status_line().byte(0, 10), Some(0x02));
    assert_eq!(ui.status_line().byte(0, 14), Some(0x02));
    assert_eq!(ui.frame().count_set(), 0);
}

#[test]
fn classic_status_power_save_mode_icon_and_battery() {
    let snapshot = with_battery(StatusSnapshot {
        function: RadioFunction::PowerSave,
        key_lock: true,
        ..StatusSnapshot::default()
    });

    let line = status_of(UiProfile::classic(), snapshot);

    assert!(line[..8].iter().all(|&b| b == 0xA1));
    // mode section at 18, monitor icon two columns in
    assert_eq!(&line[18..20], &[0, 0]);
    assert!(line[20..30].iter().all(|&b| b == 0xA8));
    // right indicator at max(x1, 69) + 1
    assert_eq!(line[69], 0);
    assert!(line[70..79].iter().all(|&b| b == 0xAD));
    assert!(line[115..].iter().all(|&b| b == 0xB2));
    assert_eq!(line[114], 0);
}

#[test]
fn classic_channel_scan_label_is_highlighted() {
    let snapshot = StatusSnapshot {
        scan: ScanState::Channel {
            list: ScanList::All,
            list_enabled: true,
        },
        ..StatusSnapshot::default()
    };

    let line = status_of(UiProfile::classic(), snapshot);

    // "ALL+" pixels at columns 2, 6, 10, 14 on row 1, then XOR 0x7F over [0, 19)
    for col in 0..19 {
        let expected = if [2, 6, 10, 14].contains(&col) {
            0x7F ^ 0x02
        } else {
            0x7F
        };
        assert_eq!(line[col], expected, "column {col}");
    }
    assert_eq!(line[19], 0);
}

#[test]
fn classic_frequency_scan_shows_s_icon() {
    let snapshot = StatusSnapshot {
        scan: ScanState::Frequency,
        ..StatusSnapshot::default()
    };

    let line = status_of(UiProfile::classic(), snapshot);

    assert_eq!(line[8], 0);
    assert!(line[9..16].iter().all(|&b| b == 0xA3));
}

#[test]
fn killed_block_replaces_scan_marker() {
    let snapshot = StatusSnapshot {
        killed: true,
        scan: ScanState::Frequency,
        ..StatusSnapshot::default()
    };

    let classic = status_of(UiProfile::classic(), snapshot);
    let dtmf = status_of(UiProfile::f4hwn(), snapshot);

    assert!(classic[9..16].iter().all(|&b| b == 0xA3));
    assert!(dtmf[8..18].iter().all(|&b| b == 0xFF));
}

#[test]
fn transmit_timer_overwrites_left_of_strip_and_requests_redraw() {
    let mut ui = compositor(UiProfile::f4hwn());
    let snapshot = with_battery(StatusSnapshot {
        function: RadioFunction::Transmit,
        timer_enabled: true,
        tx_countdown: 250,
        ..StatusSnapshot::default()
    });

    ui.apply(&DrawRequest::Status(snapshot));

    let line = ui.status_line().bytes();
    assert!(ui.status_redraw_pending());
    assert_eq!(
        ui.last_status().map(|render| render.layout),
        Some(StatusLayout::Classic)
    );
    // "02:05"
    assert_eq!(line[0], 0);
    assert_eq!(line[1], b'0');
    assert_eq!(line[7], 0);
    assert_eq!(line[8], b'2');
    assert_eq!(line[14], 0);
    assert_eq!(line[15], b':');
    assert_eq!(line[29], b'5');
    // PTT icon after the mode (19) and VOX (21) sections
    assert!(line[58..68].iter().all(|&b| b == 0xAC));
    assert!(line[115..].iter().all(|&b| b == 0xB2));
}

#[test]
fn receive_timer_counts_up_from_limit() {
    let snapshot = StatusSnapshot {
        function: RadioFunction::Receive,
        timer_enabled: true,
        rx_countdown: 7200 - 2 * 61,
        ..StatusSnapshot::default()
    };

    let line = status_of(UiProfile::f4hwn(), snapshot);

    // 61 s elapsed: "01:01"
    assert_eq!(line[1], b'0');
    assert_eq!(line[8], b'1');
    assert_eq!(line[22], b'0');
    assert_eq!(line[29], b'1');
}

#[test]
fn dual_watch_and_cross_band_mode_icons() {
    let dual = StatusSnapshot {
        dual_watch: true,
        dual_watch_active: true,
        ..StatusSnapshot::default()
    };
    let line = status_of(UiProfile::classic(), dual);
    assert!(line[18..34].iter().all(|&b| b == 0xA5));

    let both = StatusSnapshot {
        cross_band: true,
        ..dual
    };
    let line = status_of(UiProfile::classic(), both);
    assert_eq!(&line[18..20], &[0, 0]);
    assert!(line[20..31].iter().all(|&b| b == 0xA5));
    assert_eq!(line[31], 0);

    let hold = StatusSnapshot {
        dual_watch_active: false,
        ..dual
    };
    let line = status_of(UiProfile::classic(), hold);
    assert!(line[21..32].iter().all(|&b| b == 0xA6));

    let cross = StatusSnapshot {
        cross_band: true,
        ..StatusSnapshot::default()
    };
    let line = status_of(UiProfile::classic(), cross);
    assert!(line[20..30].iter().all(|&b| b == 0xA7));
}

#[test]
fn read_only_icon_needs_rescue_profile() {
    let snapshot = StatusSnapshot {
        menu_lock: true,
        ..StatusSnapshot::default()
    };

    let classic = status_of(UiProfile::classic(), snapshot);
    let rescue = status_of(UiProfile::f4hwn(), snapshot);

    assert!(classic[20..30].iter().all(|&b| b == 0xA8));
    assert!(rescue[20..30].iter().all(|&b| b == 0xA9));
}

#[test]
fn battery_text_sits_left_of_gauge() {
    let snapshot = StatusSnapshot {
        battery: BatteryStatus {
            level: 3,
            voltage: 812,
            text: BatteryText::Voltage,
            ..BatteryStatus::default()
        },
        ..StatusSnapshot::default()
    };

    let line = status_of(UiProfile::classic(), snapshot);

    // "8.12" is 28 columns wide: origin 115 - 28 = 87
    assert_eq!(line[87], 0);
    assert_eq!(line[88], b'8');
    assert_eq!(line[95], b'.');
    assert_eq!(line[109], b'2');
    assert_eq!(line[115], 0xB2);
}

#[test]
fn vox_and_voice_advance_the_layout() {
    let profile = UiProfile::classic().with_voice(true).with_vox(true);
    let snapshot = StatusSnapshot {
        voice_prompt: true,
        vox: true,
        ..StatusSnapshot::default()
    };

    let line = status_of(profile, snapshot);

    assert!(line[18..27].iter().all(|&b| b == 0xA4));
    // monitor icon after the voice icon
    assert!(line[29..39].iter().all(|&b| b == 0xA8));
    // VOX at 27 + 19
    assert!(line[46..64].iter().all(|&b| b == 0xAA));
}

#[test]
fn debug_profile_prints_value() {
    let snapshot = StatusSnapshot {
        debug: -7,
        ..StatusSnapshot::default()
    };

    let line = status_of(UiProfile::classic().with_debug(true), snapshot);

    assert_eq!(line[19], 0);
    assert_eq!(line[20], b'-');
    assert_eq!(line[27], b'7');
    assert!(!line.contains(&0xA8));
}

#[test]
fn compact_status_bars_follow_rssi_while_receiving() {
    let profile = UiProfile::f4hwn();
    let receiving = with_battery(StatusSnapshot {
        main_screen: true,
        function: RadioFunction::Receive,
        vfo: VfoStatus {
            rssi_bar_level: 6,
            ..VfoStatus::default()
        },
        ..StatusSnapshot::default()
    });

    let mut ui = compositor(profile);
    ui.apply(&DrawRequest::Status(receiving));
    let line = ui.status_line().bytes();

    assert_eq!(
        ui.last_status().map(|render| render.layout),
        Some(StatusLayout::MainCompact)
    );
    assert!(!ui.status_redraw_pending());
    // the first bar shares column 4 with the antenna
    assert!(line[..4].iter().all(|&b| b == 0xA0));
    assert_eq!(line[4], 0xA0 | 0x40);
    assert_eq!(line[5], 0);
    assert_eq!(line[6], 0x60);
    assert_eq!(line[8], 0x70);
    assert_eq!(line[10], 0x78);
    assert_eq!(line[12], 0x7C);
    assert!(line[113..126].iter().all(|&b| b == 0xB2));
    assert_eq!(&line[126..], &[0, 0]);

    let idle = StatusSnapshot {
        function: RadioFunction::Foreground,
        ..receiving
    };
    let line = status_of(profile, idle);
    for col in [6, 8, 10, 12] {
        assert_eq!(line[col], 0);
    }
}

#[test]
fn compact_status_label_positions() {
    let snapshot = StatusSnapshot {
        main_screen: true,
        vfo: VfoStatus {
            power: PowerLevel::User,
            user_power: 6,
            step: 250,
            ..VfoStatus::default()
        },
        ..StatusSnapshot::default()
    };

    let line = status_of(UiProfile::f4hwn(), snapshot);

    // "H" 14, "W" 28, "25K" 34, squelch 48, "2.50K" 54
    let marked: Vec<usize> = (5..113).filter(|&col| line[col] == 0x02).collect();
    assert_eq!(
        marked,
        vec![14, 28, 34, 38, 42, 48, 54, 58, 62, 66, 70]
    );

    let simplex = StatusSnapshot {
        vfo: VfoStatus {
            simplex: true,
            power: PowerLevel::User,
            user_power: 7,
            ..snapshot.vfo
        },
        ..snapshot
    };
    let line = status_of(UiProfile::f4hwn(), simplex);

    // "|->|" 14..26, no power label, "W" at 36
    let marked: Vec<usize> = (5..113).filter(|&col| line[col] == 0x02).collect();
    assert_eq!(&marked[..5], &[14, 18, 22, 26, 36]);
}
