use std::f64::consts::FRAC_PI_2;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::buffer::AudioBlock;
use crate::params::smooth::{BuildSmoother, Linear, LinearSmoother, Smoother};
use crate::params::{Encode, ParamValue};

const RAMP_SECONDS: f64 = 0.05;

/// Pan laws, in parameter order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanRule {
    Linear,
    #[default]
    Balanced,
    Sin3dB,
    Sin4p5dB,
    Sin6dB,
    SquareRoot3dB,
    SquareRoot4p5dB,
}

impl PanRule {
    pub const ALL: [PanRule; 7] = [
        PanRule::Linear,
        PanRule::Balanced,
        PanRule::Sin3dB,
        PanRule::Sin4p5dB,
        PanRule::Sin6dB,
        PanRule::SquareRoot3dB,
        PanRule::SquareRoot4p5dB,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parameter name, also used in saved state.
    pub fn name(self) -> &'static str {
        match self {
            PanRule::Linear => "linear",
            PanRule::Balanced => "balanced",
            PanRule::Sin3dB => "sin3dB",
            PanRule::Sin4p5dB => "sin4p5dB",
            PanRule::Sin6dB => "sin6dB",
            PanRule::SquareRoot3dB => "squareRoot3dB",
            PanRule::SquareRoot4p5dB => "squareRoot4p5dB",
        }
    }

    /// Short label shown in the editor's dropdown.
    pub fn label(self) -> &'static str {
        match self {
            PanRule::Linear => "linear",
            PanRule::Balanced => "balanced",
            PanRule::Sin3dB => "sin3dB",
            PanRule::Sin4p5dB => "sin4.5dB",
            PanRule::Sin6dB => "sin6dB",
            PanRule::SquareRoot3dB => "sqrt3dB",
            PanRule::SquareRoot4p5dB => "sqrt4.5dB",
        }
    }

    /// Left and right channel factors for a pan position in `[-1, 1]`.
    ///
    /// Every law is boosted so that the centre position is unity on both
    /// channels.
    pub fn gains(self, pan: f32) -> (f32, f32) {
        let normalized = 0.5 * (pan.max(-1.0).min(1.0) as f64 + 1.0);
        let left = 1.0 - normalized;
        let right = normalized;

        let (left, right, boost) = match self {
            PanRule::Linear => (left, right, 2.0),
            PanRule::Balanced => (left.min(0.5), right.min(0.5), 2.0),
            PanRule::Sin3dB => (sin_law(left), sin_law(right), 2.0f64.sqrt()),
            PanRule::Sin4p5dB => (
                sin_law(left).powf(1.5),
                sin_law(right).powf(1.5),
                2.0f64.powf(0.75),
            ),
            PanRule::Sin6dB => (sin_law(left).powi(2), sin_law(right).powi(2), 2.0),
            PanRule::SquareRoot3dB => (left.sqrt(), right.sqrt(), 2.0f64.sqrt()),
            PanRule::SquareRoot4p5dB => (
                left.sqrt().powf(1.5),
                right.sqrt().powf(1.5),
                2.0f64.powf(0.75),
            ),
        };

        ((left * boost) as f32, (right * boost) as f32)
    }
}

#[inline]
fn sin_law(position: f64) -> f64 {
    (FRAC_PI_2 * position).sin()
}

impl Encode for PanRule {
    fn steps() -> Option<u32> {
        Some(PanRule::ALL.len() as u32)
    }

    fn encode(&self) -> ParamValue {
        (self.index() as f64 + 0.5) / PanRule::ALL.len() as f64
    }

    fn decode(value: ParamValue) -> Self {
        let count = PanRule::ALL.len();
        let index = (value.max(0.0) * count as f64) as usize;
        PanRule::ALL[index.min(count - 1)]
    }
}

impl FromStr for PanRule {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanRule::ALL
            .into_iter()
            .find(|rule| rule.name() == s || rule.label() == s)
            .ok_or(())
    }
}

impl Display for PanRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Distributes a stereo signal across both channels according to a pan law.
pub struct Panner {
    rule: PanRule,
    pan: f32,
    left: LinearSmoother,
    right: LinearSmoother,
}

impl Default for Panner {
    fn default() -> Panner {
        Panner::new()
    }
}

impl Panner {
    pub fn new() -> Panner {
        let rule = PanRule::default();
        let pan = 0.0;
        let (left, right) = rule.gains(pan);

        Panner {
            rule,
            pan,
            left: Linear::default().seconds(RAMP_SECONDS).build(left, 44100.0),
            right: Linear::default().seconds(RAMP_SECONDS).build(right, 44100.0),
        }
    }

    /// Rebuilds the ramps for `sample_rate` and jumps to the current targets.
    pub fn prepare(&mut self, sample_rate: f64) {
        let smoother = Linear::default().seconds(RAMP_SECONDS);
        self.left = smoother.build(self.left.target(), sample_rate);
        self.right = smoother.build(self.right.target(), sample_rate);
    }

    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }

    #[inline]
    pub fn rule(&self) -> PanRule {
        self.rule
    }

    #[inline]
    pub fn pan(&self) -> f32 {
        self.pan
    }

    pub fn set_rule(&mut self, rule: PanRule) {
        if rule != self.rule {
            self.rule = rule;
            self.update();
        }
    }

    /// Sets the pan position, clamped to `[-1, 1]`.
    pub fn set_pan(&mut self, pan: f32) {
        let pan = pan.max(-1.0).min(1.0);
        if pan != self.pan {
            self.pan = pan;
            self.update();
        }
    }

    fn update(&mut self) {
        let (left, right) = self.rule.gains(self.pan);
        self.left.set(left);
        self.right.set(right);
    }

    /// Only stereo blocks are panned; anything else passes through.
    pub fn process(&mut self, block: &mut AudioBlock) {
        if block.channel_count() != 2 {
            return;
        }

        for sample in block.channel_mut(0) {
            *sample *= self.left.next();
        }
        for sample in block.channel_mut(1) {
            *sample *= self.right.next();
        }
    }
}
