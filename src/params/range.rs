use coupler::params::{ParamValue, Range};

/// A continuous range with an optional snapping interval and a skew
/// factor. A skew above 1 spends more of the normalized range on the top
/// end.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SkewedRange {
    pub start: f64,
    pub end: f64,
    pub interval: f64,
    pub skew: f64,
}

impl SkewedRange {
    pub const fn new(start: f64, end: f64) -> SkewedRange {
        SkewedRange {
            start,
            end,
            interval: 0.0,
            skew: 1.0,
        }
    }

    pub const fn interval(self, interval: f64) -> SkewedRange {
        SkewedRange { interval, ..self }
    }

    pub const fn skew(self, skew: f64) -> SkewedRange {
        SkewedRange { skew, ..self }
    }

    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.start as f32).min(self.end as f32)
    }

    /// Rounds to the nearest step counted from `start`, halves rounding
    /// up, then clamps.
    #[inline]
    pub fn snap(&self, value: f32) -> f32 {
        self.clamp(self.snap_to_interval(value as f64) as f32)
    }

    // Dividing the step count by the inverse interval keeps decimal
    // intervals exact (-6.0 rather than -5.999999999999986).
    fn snap_to_interval(&self, value: f64) -> f64 {
        if self.interval > 0.0 {
            let scale = 1.0 / self.interval;
            let steps = ((value - self.start) * scale + 0.5).floor();
            self.start + steps / scale
        } else {
            value
        }
    }
}

impl Range<f32> for SkewedRange {
    #[inline]
    fn steps(&self) -> Option<u32> {
        None
    }

    #[inline]
    fn encode(&self, value: &f32) -> ParamValue {
        let proportion = (self.clamp(*value) as f64 - self.start) / (self.end - self.start);
        if self.skew != 1.0 && proportion > 0.0 {
            proportion.powf(self.skew)
        } else {
            proportion
        }
    }

    #[inline]
    fn decode(&self, value: ParamValue) -> f32 {
        let mut proportion = value.max(0.0).min(1.0);
        if self.skew != 1.0 && proportion > 0.0 {
            proportion = (proportion.ln() / self.skew).exp();
        }

        let value = self.start + (self.end - self.start) * proportion;
        self.clamp(self.snap_to_interval(value) as f32)
    }
}
