use crate::buffer::AudioBlock;
use crate::bus::Layout;
use crate::dsp::{Gain, Panner};
use crate::events::{split_at_events, Data, Event};
use crate::params::{GainPanParams, Params};

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub layout: Layout,
    pub sample_rate: f64,
    pub max_buffer_size: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            layout: Layout::STEREO,
            sample_rate: 44100.0,
            max_buffer_size: 512,
        }
    }
}

/// Runs the gain stage and then the panner over each block, applying
/// parameter changes at their sample offsets.
pub struct GainPanProcessor {
    params: GainPanParams,
    input_channels: usize,
    gain: Gain,
    panner: Panner,
}

impl GainPanProcessor {
    pub fn new(params: GainPanParams, config: &Config) -> GainPanProcessor {
        log::debug!(
            "preparing processor: {:?}, {} Hz, {} samples",
            config.layout,
            config.sample_rate,
            config.max_buffer_size
        );

        let layout = if config.layout.is_supported() {
            config.layout
        } else {
            log::debug!("unsupported layout {:?}, processing as stereo", config.layout);
            Layout::STEREO
        };

        let mut processor = GainPanProcessor {
            params,
            input_channels: layout.input.channel_count(),
            gain: Gain::new(),
            panner: Panner::new(),
        };

        processor.apply_params();
        processor.gain.prepare(config.sample_rate);
        processor.panner.prepare(config.sample_rate);

        processor
    }

    pub fn params(&self) -> &GainPanParams {
        &self.params
    }

    pub fn reset(&mut self) {
        self.gain.reset();
        self.panner.reset();
    }

    /// Applies parameter changes outside of processing.
    pub fn flush(&mut self, events: &[Event]) {
        for event in events {
            self.handle_event(event);
        }

        self.apply_params();
    }

    pub fn process(&mut self, block: &mut AudioBlock, events: &[Event]) {
        for channel in self.input_channels..block.channel_count() {
            block.clear_channel(channel);
        }

        for (range, events) in split_at_events(block.len(), events) {
            for event in events {
                self.handle_event(event);
            }

            self.apply_params();

            if let Some(mut segment) = block.slice(range) {
                self.gain.process(&mut segment);
                self.panner.process(&mut segment);
            }
        }
    }

    fn handle_event(&mut self, event: &Event) {
        match event.data {
            Data::ParamChange { id, value } => self.params.set_param(id, value),
        }
    }

    fn apply_params(&mut self) {
        self.gain.set_gain_decibels(self.params.gain);
        self.panner.set_rule(self.params.pan_rule);
        self.panner.set_pan(self.params.pan_angle / 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Format;
    use crate::dsp::PanRule;
    use crate::params::{Encode, GAIN, PAN_ANGLE, PAN_RULE};

    #[test]
    fn defaults_are_transparent() {
        let mut processor = GainPanProcessor::new(GainPanParams::default(), &Config::default());

        let mut left = [0.25, -0.5, 1.0];
        let mut right = [0.75, 0.0, -1.0];
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
        processor.process(&mut AudioBlock::new(&mut channels), &[]);

        assert_eq!(left, [0.25, -0.5, 1.0]);
        assert_eq!(right, [0.75, 0.0, -1.0]);
    }

    #[test]
    fn sample_accurate_gain_change() {
        let mut processor = GainPanProcessor::new(GainPanParams::default(), &Config::default());

        let mut left = [1.0; 4];
        let mut right = [1.0; 4];
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
        let events = [Event::param_change(2, GAIN, 0.0)];
        processor.process(&mut AudioBlock::new(&mut channels), &events);

        assert_eq!(left, [1.0, 1.0, 0.0, 0.0]);
        assert_eq!(right, [1.0, 1.0, 0.0, 0.0]);
        assert_eq!(processor.params().gain, -100.0);
    }

    #[test]
    fn flushed_pan() {
        let mut processor = GainPanProcessor::new(GainPanParams::default(), &Config::default());
        processor.flush(&[
            Event::param_change(0, PAN_RULE, PanRule::Balanced.encode()),
            Event::param_change(0, PAN_ANGLE, 1.0),
        ]);
        processor.reset();

        let mut left = [0.5; 3];
        let mut right = [0.5; 3];
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
        processor.process(&mut AudioBlock::new(&mut channels), &[]);

        assert_eq!(left, [0.0; 3]);
        assert_eq!(right, [0.5; 3]);
    }

    #[test]
    fn initial_params_apply_without_ramp() {
        let params = GainPanParams {
            gain: 0.0,
            pan_rule: PanRule::Linear,
            pan_angle: -100.0,
        };
        let mut processor = GainPanProcessor::new(params, &Config::default());

        let mut left = [1.0; 2];
        let mut right = [1.0; 2];
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
        processor.process(&mut AudioBlock::new(&mut channels), &[]);

        assert_eq!(left, [2.0; 2]);
        assert_eq!(right, [0.0; 2]);
    }

    #[test]
    fn mono_is_not_panned() {
        let config = Config {
            layout: Layout::MONO,
            ..Config::default()
        };
        let params = GainPanParams {
            pan_angle: 100.0,
            ..GainPanParams::default()
        };
        let mut processor = GainPanProcessor::new(params, &config);

        let mut mono = [0.5; 3];
        let mut channels: [&mut [f32]; 1] = [&mut mono];
        processor.process(&mut AudioBlock::new(&mut channels), &[]);

        assert_eq!(mono, [0.5; 3]);
    }

    #[test]
    fn clears_extra_outputs() {
        let config = Config {
            layout: Layout {
                input: Format::Mono,
                output: Format::Mono,
            },
            ..Config::default()
        };
        let mut processor = GainPanProcessor::new(GainPanParams::default(), &config);

        let mut first = [1.0; 2];
        let mut garbage = [7.0; 2];
        let mut channels: [&mut [f32]; 2] = [&mut first, &mut garbage];
        processor.process(&mut AudioBlock::new(&mut channels), &[]);

        assert_eq!(first, [1.0; 2]);
        assert_eq!(garbage, [0.0; 2]);
    }

    #[test]
    fn mismatched_layout_runs_as_stereo() {
        let config = Config {
            layout: Layout {
                input: Format::Mono,
                output: Format::Stereo,
            },
            ..Config::default()
        };
        let params = GainPanParams {
            pan_rule: PanRule::Linear,
            pan_angle: -100.0,
            ..GainPanParams::default()
        };
        let mut processor = GainPanProcessor::new(params, &config);

        let mut left = [1.0; 2];
        let mut right = [1.0; 2];
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
        processor.process(&mut AudioBlock::new(&mut channels), &[]);

        // the right input is kept and panned rather than cleared as an extra output
        assert_eq!(left, [2.0; 2]);
        assert_eq!(right, [0.0; 2]);
    }
}
