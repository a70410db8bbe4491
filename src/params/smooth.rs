pub use coupler::params::smooth::{BuildSmoother, Smoother};

/// Linear ramp over a fixed duration. A zero duration disables smoothing.
#[derive(Copy, Clone, Debug)]
pub struct Linear {
    seconds: f64,
}

impl Default for Linear {
    fn default() -> Linear {
        Linear { seconds: 0.05 }
    }
}

impl Linear {
    pub fn seconds(self, seconds: f64) -> Self {
        Linear { seconds }
    }
}

#[derive(Clone, Debug)]
pub struct LinearSmoother {
    current: f32,
    target: f32,
    step: f32,
    countdown: u32,
    ramp_len: u32,
}

impl LinearSmoother {
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }
}

impl BuildSmoother<f32> for Linear {
    type Smoother = LinearSmoother;

    #[inline]
    fn build(self, value: f32, sample_rate: f64) -> Self::Smoother {
        let ramp_len = (self.seconds.max(0.0) * sample_rate).floor() as u32;

        LinearSmoother {
            current: value,
            target: value,
            step: 0.0,
            countdown: 0,
            ramp_len,
        }
    }
}

impl Smoother<f32> for LinearSmoother {
    type Value = f32;

    #[inline]
    fn reset(&mut self) {
        self.current = self.target;
        self.countdown = 0;
    }

    #[inline]
    fn set(&mut self, value: f32) {
        if value == self.target {
            return;
        }

        self.target = value;

        if self.ramp_len == 0 {
            self.reset();
        } else {
            self.countdown = self.ramp_len;
            self.step = (self.target - self.current) / self.ramp_len as f32;
        }
    }

    #[inline]
    fn get(&self) -> Self::Value {
        self.current
    }

    #[inline]
    fn next(&mut self) -> Self::Value {
        if self.countdown == 0 {
            return self.target;
        }

        self.countdown -= 1;
        if self.countdown == 0 {
            self.current = self.target;
        } else {
            self.current += self.step;
        }

        self.current
    }

    #[inline]
    fn is_active(&self) -> bool {
        self.countdown > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp() {
        let mut smoother = Linear::default().seconds(0.001).build(0.0, 4000.0);
        assert!(!smoother.is_active());

        smoother.set(1.0);
        assert!(smoother.is_active());
        assert_eq!(smoother.get(), 0.0);

        let mut out = [0.0; 5];
        smoother.fill(&mut out);
        assert_eq!(out, [0.25, 0.5, 0.75, 1.0, 1.0]);
        assert!(!smoother.is_active());
    }

    #[test]
    fn retarget_mid_ramp() {
        let mut smoother = Linear::default().seconds(0.001).build(0.0, 4000.0);
        smoother.set(1.0);
        smoother.next();
        smoother.next();

        smoother.set(0.0);
        assert_eq!(smoother.next(), 0.375);
    }

    #[test]
    fn zero_length_ramp() {
        let mut smoother = Linear::default().seconds(0.0).build(1.0, 48000.0);
        smoother.set(0.5);
        assert!(!smoother.is_active());
        assert_eq!(smoother.get(), 0.5);
        assert_eq!(smoother.next(), 0.5);
    }

    #[test]
    fn reset_jumps_to_target() {
        let mut smoother = Linear::default().build(0.0, 48000.0);
        smoother.set(2.0);
        smoother.reset();
        assert!(!smoother.is_active());
        assert_eq!(smoother.get(), 2.0);
        assert_eq!(smoother.target(), 2.0);
    }
}
