#![cfg_attr(not(test), no_std)]

//! Composition engine for a 128x64 band-packed monochrome radio display.
//!
//! Text, frequency readouts, lines and the status strip are rendered into
//! [`st7565::FrameBuffer`] and [`st7565::StatusLine`]; pushing them to glass
//! goes through [`st7565::BandSink`].

pub mod channel;
pub mod compositor;
pub mod font;
pub mod glyph;
pub mod icons;
pub mod layout;
pub mod profile;
pub mod shapes;
pub mod status;
pub mod text;
pub mod views;

pub use channel::{EntryBuffer, channel_string, channel_string_ex};
pub use compositor::{Compositor, DrawRequest, Target, TextStyle};
pub use font::{Font, FontSet};
pub use icons::{Icon, IconSet};
pub use profile::UiProfile;
pub use status::{StatusRender, StatusSnapshot, compose_status};
