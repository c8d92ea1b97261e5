//! Firmware capability profile.
//!
//! Each flag switches on an optional status-line element or an alternative
//! layout. Profiles are plain values so one build can render every variant.

/// Optional UI capabilities of a firmware build.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct UiProfile {
    /// Compact main-screen status strip (signal bars, power, bandwidth, step).
    pub custom_main_status: bool,
    /// NOAA weather channel indicator.
    pub noaa: bool,
    /// DTMF kill state indicator.
    pub dtmf_calling: bool,
    /// Voice prompt indicator.
    pub voice: bool,
    /// VOX indicator.
    pub vox: bool,
    /// Elapsed RX/TX timer in place of the mode icon.
    pub rx_tx_timer: bool,
    /// Read-only indicator while the menu is locked.
    pub rescue_ops: bool,
    /// USB-C charging indicator.
    pub charging_type_c: bool,
    /// Debug value in place of the voice/mode section.
    pub debug: bool,
    /// Use the bold small font where one is supplied.
    pub small_bold: bool,
}

impl UiProfile {
    /// Stock firmware: every optional element off.
    pub const fn classic() -> Self {
        Self {
            custom_main_status: false,
            noaa: false,
            dtmf_calling: false,
            voice: false,
            vox: false,
            rx_tx_timer: false,
            rescue_ops: false,
            charging_type_c: false,
            debug: false,
            small_bold: false,
        }
    }

    /// Extended firmware with the compact main status and its extras.
    pub const fn f4hwn() -> Self {
        Self {
            custom_main_status: true,
            noaa: false,
            dtmf_calling: true,
            voice: false,
            vox: true,
            rx_tx_timer: true,
            rescue_ops: true,
            charging_type_c: true,
            debug: false,
            small_bold: true,
        }
    }

    pub const fn with_noaa(mut self, enabled: bool) -> Self {
        self.noaa = enabled;
        self
    }

    pub const fn with_voice(mut self, enabled: bool) -> Self {
        self.voice = enabled;
        self
    }

    pub const fn with_vox(mut self, enabled: bool) -> Self {
        self.vox = enabled;
        self
    }

    pub const fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    pub const fn with_custom_main_status(mut self, enabled: bool) -> Self {
        self.custom_main_status = enabled;
        self
    }

    pub const fn with_small_bold(mut self, enabled: bool) -> Self {
        self.small_bold = enabled;
        self
    }

    /// Looks up a preset by name (`classic` or `f4hwn`, case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("classic") {
            Some(Self::classic())
        } else if name.eq_ignore_ascii_case("f4hwn") {
            Some(Self::f4hwn())
        } else {
            None
        }
    }
}
