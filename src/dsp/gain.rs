use crate::buffer::AudioBlock;
use crate::params::smooth::{BuildSmoother, Linear, LinearSmoother, Smoother};

/// Anything at or below this level is treated as silence.
pub const MINUS_INFINITY_DB: f32 = -100.0;

#[inline]
pub fn decibels_to_gain(decibels: f32) -> f32 {
    if decibels > MINUS_INFINITY_DB {
        10.0f32.powf(decibels * 0.05)
    } else {
        0.0
    }
}

#[inline]
pub fn gain_to_decibels(gain: f32) -> f32 {
    if gain > 0.0 {
        (20.0 * gain.log10()).max(MINUS_INFINITY_DB)
    } else {
        MINUS_INFINITY_DB
    }
}

/// Multiplies every channel by a gain factor, optionally ramped.
pub struct Gain {
    gain: LinearSmoother,
    ramp_seconds: f64,
    sample_rate: f64,
}

impl Default for Gain {
    fn default() -> Gain {
        Gain::new()
    }
}

impl Gain {
    pub fn new() -> Gain {
        let sample_rate = 44100.0;

        Gain {
            gain: Linear::default().seconds(0.0).build(1.0, sample_rate),
            ramp_seconds: 0.0,
            sample_rate,
        }
    }

    pub fn prepare(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.rebuild();
    }

    /// Sets how long a gain change takes to settle. Takes effect
    /// immediately and snaps any ramp in progress.
    pub fn set_ramp_duration(&mut self, seconds: f64) {
        self.ramp_seconds = seconds;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.gain = Linear::default()
            .seconds(self.ramp_seconds)
            .build(self.gain.target(), self.sample_rate);
    }

    pub fn reset(&mut self) {
        self.gain.reset();
    }

    #[inline]
    pub fn set_gain_linear(&mut self, gain: f32) {
        self.gain.set(gain);
    }

    #[inline]
    pub fn set_gain_decibels(&mut self, decibels: f32) {
        self.set_gain_linear(decibels_to_gain(decibels));
    }

    #[inline]
    pub fn gain_linear(&self) -> f32 {
        self.gain.target()
    }

    #[inline]
    pub fn gain_decibels(&self) -> f32 {
        gain_to_decibels(self.gain_linear())
    }

    #[inline]
    pub fn is_smoothing(&self) -> bool {
        self.gain.is_active()
    }

    pub fn process(&mut self, block: &mut AudioBlock) {
        if self.gain.is_active() {
            for index in 0..block.len() {
                let gain = self.gain.next();
                for channel in 0..block.channel_count() {
                    block.channel_mut(channel)[index] *= gain;
                }
            }
        } else {
            let gain = self.gain.get();
            for channel in 0..block.channel_count() {
                block.multiply_channel(channel, gain);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decibel_conversion() {
        assert_eq!(decibels_to_gain(0.0), 1.0);
        assert!((decibels_to_gain(20.0) - 10.0).abs() < 1e-5);
        assert!((decibels_to_gain(-6.0206) - 0.5).abs() < 1e-4);
        assert_eq!(decibels_to_gain(-100.0), 0.0);
        assert_eq!(decibels_to_gain(-120.0), 0.0);

        assert_eq!(gain_to_decibels(1.0), 0.0);
        assert_eq!(gain_to_decibels(0.0), MINUS_INFINITY_DB);
        assert_eq!(gain_to_decibels(1e-9), MINUS_INFINITY_DB);
    }

    #[test]
    fn constant_gain() {
        let mut gain = Gain::new();
        gain.prepare(48000.0);
        gain.set_gain_decibels(20.0);
        assert!(!gain.is_smoothing());
        assert!((gain.gain_decibels() - 20.0).abs() < 1e-4);

        let mut left = [1.0, -1.0, 0.5];
        let mut right = [2.0, 0.0, -0.5];
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
        gain.process(&mut AudioBlock::new(&mut channels));

        for (out, expected) in left.iter().zip([10.0, -10.0, 5.0]) {
            assert!((out - expected).abs() < 1e-4);
        }
        for (out, expected) in right.iter().zip([20.0, 0.0, -5.0]) {
            assert!((out - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn ramped_gain() {
        let mut gain = Gain::new();
        gain.set_ramp_duration(0.001);
        gain.prepare(4000.0);

        gain.set_gain_linear(0.0);
        assert!(gain.is_smoothing());

        let mut mono = [1.0; 5];
        let mut channels: [&mut [f32]; 1] = [&mut mono];
        gain.process(&mut AudioBlock::new(&mut channels));

        assert_eq!(mono, [0.75, 0.5, 0.25, 0.0, 0.0]);
        assert!(!gain.is_smoothing());
    }

    #[test]
    fn ramp_applies_to_every_channel() {
        let mut gain = Gain::new();
        gain.set_ramp_duration(0.001);
        gain.prepare(4000.0);
        gain.set_gain_linear(0.0);

        let mut left = [1.0; 4];
        let mut right = [-2.0; 4];
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
        let mut block = AudioBlock::new(&mut channels);
        gain.process(&mut block.slice(1..4).unwrap());

        assert_eq!(left, [1.0, 0.75, 0.5, 0.25]);
        assert_eq!(right, [-2.0, -1.5, -1.0, -0.5]);
    }

    #[test]
    fn silence_at_floor() {
        let mut gain = Gain::new();
        gain.set_gain_decibels(MINUS_INFINITY_DB);

        let mut mono = [0.3; 4];
        let mut channels: [&mut [f32]; 1] = [&mut mono];
        gain.process(&mut AudioBlock::new(&mut channels));

        assert_eq!(mono, [0.0; 4]);
    }
}
