//! A decibel gain stage followed by a stereo panner, with a small
//! custom-skinned control panel.
//!
//! Everything except the host binding is plain Rust and can be driven
//! directly: [`processor::GainPanProcessor`] renders audio,
//! [`editor::Editor`] paints and handles input, and [`state`] persists
//! parameters. Enable the `plugin` feature to expose [`GainPan`] through
//! the CLAP and VST3 wrappers.

pub mod buffer;
pub mod bus;
pub mod dsp;
pub mod editor;
pub mod events;
pub mod params;
pub mod processor;
pub mod state;

#[cfg(feature = "plugin")]
mod plugin;

#[cfg(feature = "plugin")]
pub use plugin::{GainPan, GainPanEngine, GainPanView};

pub const NAME: &str = "Gain Pan";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const VENDOR: &str = "Vendor";
pub const URL: &str = "https://example.com";
pub const EMAIL: &str = "example@example.com";

pub const CLAP_ID: &str = "rs.coupler.gainpan";
pub const VST3_CLASS_ID: [u32; 4] = [0x5A1E37C2, 0x4B0F4D1E, 0x9E2A61C8, 0x33D7F0B4];
