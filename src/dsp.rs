//! The two processing nodes: a decibel gain and a stereo panner.

mod gain;
mod panner;

pub use gain::{decibels_to_gain, gain_to_decibels, Gain, MINUS_INFINITY_DB};
pub use panner::{PanRule, Panner};
