use std::fmt::{self, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dsp::PanRule;

mod range;
pub mod smooth;

pub use coupler::params::{Encode, ParamId, ParamInfo, ParamValue, Params, Range};
pub use range::SkewedRange;

pub const GAIN: ParamId = 0;
pub const PAN_RULE: ParamId = 1;
pub const PAN_ANGLE: ParamId = 2;

/// Gain in decibels. The skew puts unity gain roughly two thirds of the
/// way up the fader.
pub const GAIN_RANGE: SkewedRange = SkewedRange::new(-100.0, 10.0).interval(0.01).skew(4.5);

/// Pan position in percent, -100 (left) to 100 (right).
pub const PAN_ANGLE_RANGE: SkewedRange = SkewedRange::new(-100.0, 100.0).interval(1.0);

/// Plain (unnormalized) parameter values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GainPanParams {
    pub gain: f32,
    #[serde(rename = "panrule")]
    pub pan_rule: PanRule,
    #[serde(rename = "panangle")]
    pub pan_angle: f32,
}

impl Default for GainPanParams {
    fn default() -> GainPanParams {
        GainPanParams {
            gain: 0.0,
            pan_rule: PanRule::Balanced,
            pan_angle: 0.0,
        }
    }
}

impl Params for GainPanParams {
    fn params() -> Vec<ParamInfo> {
        let default = GainPanParams::default();

        vec![
            ParamInfo {
                id: GAIN,
                name: "Gain".to_string(),
                default: GAIN_RANGE.encode(&default.gain),
                steps: GAIN_RANGE.steps(),
            },
            ParamInfo {
                id: PAN_RULE,
                name: "Pan Rule".to_string(),
                default: default.pan_rule.encode(),
                steps: PanRule::steps(),
            },
            ParamInfo {
                id: PAN_ANGLE,
                name: "Pan Angle".to_string(),
                default: PAN_ANGLE_RANGE.encode(&default.pan_angle),
                steps: PAN_ANGLE_RANGE.steps(),
            },
        ]
    }

    fn set_param(&mut self, id: ParamId, value: ParamValue) {
        match id {
            GAIN => self.gain = GAIN_RANGE.decode(value),
            PAN_RULE => self.pan_rule = PanRule::decode(value),
            PAN_ANGLE => self.pan_angle = PAN_ANGLE_RANGE.decode(value),
            _ => {}
        }
    }

    fn get_param(&self, id: ParamId) -> ParamValue {
        match id {
            GAIN => GAIN_RANGE.encode(&self.gain),
            PAN_RULE => self.pan_rule.encode(),
            PAN_ANGLE => PAN_ANGLE_RANGE.encode(&self.pan_angle),
            _ => 0.0,
        }
    }

    fn parse_param(&self, id: ParamId, text: &str) -> Option<ParamValue> {
        let text = text.trim();

        match id {
            GAIN => {
                let number = strip_suffix_ignore_case(text, "db").unwrap_or(text).trim();
                let value = number.parse::<f32>().ok().filter(|v| !v.is_nan())?;
                Some(GAIN_RANGE.encode(&value))
            }
            PAN_RULE => PanRule::from_str(text).ok().map(|rule| rule.encode()),
            PAN_ANGLE => {
                let value = text.parse::<f32>().ok().filter(|v| !v.is_nan())?;
                Some(PAN_ANGLE_RANGE.encode(&value))
            }
            _ => None,
        }
    }

    fn display_param(
        &self,
        id: ParamId,
        value: ParamValue,
        fmt: &mut Formatter,
    ) -> Result<(), fmt::Error> {
        match id {
            GAIN => write!(fmt, "{:.2} dB", GAIN_RANGE.decode(value)),
            PAN_RULE => write!(fmt, "{}", PanRule::decode(value)),
            PAN_ANGLE => write!(fmt, "{:.0}", PAN_ANGLE_RANGE.decode(value)),
            _ => Ok(()),
        }
    }
}

impl GainPanParams {
    /// Pulls every value back into its legal range, replacing non-finite
    /// values with defaults.
    pub fn sanitize(&mut self) {
        let default = GainPanParams::default();

        self.gain = if self.gain.is_finite() {
            GAIN_RANGE.snap(self.gain)
        } else {
            default.gain
        };
        self.pan_angle = if self.pan_angle.is_finite() {
            PAN_ANGLE_RANGE.snap(self.pan_angle)
        } else {
            default.pan_angle
        };
    }
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let split = text.len().checked_sub(suffix.len())?;
    if !text.is_char_boundary(split) {
        return None;
    }

    let (head, tail) = text.split_at(split);
    if tail.eq_ignore_ascii_case(suffix) {
        Some(head)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shown<'a>(&'a GainPanParams, ParamId, ParamValue);

    impl fmt::Display for Shown<'_> {
        fn fmt(&self, f: &mut Formatter) -> fmt::Result {
            self.0.display_param(self.1, self.2, f)
        }
    }

    fn display(id: ParamId, value: ParamValue) -> String {
        Shown(&GainPanParams::default(), id, value).to_string()
    }

    #[test]
    fn param_list() {
        let params = GainPanParams::params();

        let ids: Vec<ParamId> = params.iter().map(|p| p.id).collect();
        assert_eq!(ids, [GAIN, PAN_RULE, PAN_ANGLE]);

        assert_eq!(params[0].name, "Gain");
        assert_eq!(params[0].steps, None);
        assert!((params[0].default - 0.651228).abs() < 1e-4);

        assert_eq!(params[1].name, "Pan Rule");
        assert_eq!(params[1].steps, Some(7));
        assert_eq!(params[1].default, 1.5 / 7.0);

        assert_eq!(params[2].name, "Pan Angle");
        assert_eq!(params[2].default, 0.5);
    }

    #[test]
    fn set_and_get() {
        let mut params = GainPanParams::default();

        params.set_param(PAN_ANGLE, 0.75);
        assert_eq!(params.pan_angle, 50.0);
        assert_eq!(params.get_param(PAN_ANGLE), 0.75);

        params.set_param(PAN_RULE, PanRule::Sin6dB.encode());
        assert_eq!(params.pan_rule, PanRule::Sin6dB);

        params.set_param(GAIN, 0.0);
        assert_eq!(params.gain, -100.0);
        params.set_param(GAIN, 1.0);
        assert_eq!(params.gain, 10.0);

        // -12.5 lies halfway between two steps
        params.set_param(PAN_ANGLE, 0.4375);
        assert_eq!(params.pan_angle, -12.0);
    }

    #[test]
    fn unknown_id() {
        let mut params = GainPanParams::default();
        params.set_param(42, 0.3);
        assert_eq!(params, GainPanParams::default());
        assert_eq!(params.get_param(42), 0.0);
        assert_eq!(params.parse_param(42, "1"), None);
        assert_eq!(display(42, 0.5), "");
    }

    #[test]
    fn parse() {
        let params = GainPanParams::default();

        assert_eq!(params.parse_param(GAIN, "-6 dB"), Some(GAIN_RANGE.encode(&-6.0)));
        assert_eq!(params.parse_param(GAIN, " -6dB "), Some(GAIN_RANGE.encode(&-6.0)));
        assert_eq!(params.parse_param(GAIN, "-6"), Some(GAIN_RANGE.encode(&-6.0)));
        assert_eq!(params.parse_param(GAIN, "loud"), None);
        assert_eq!(params.parse_param(GAIN, "NaN"), None);

        assert_eq!(params.parse_param(PAN_ANGLE, "-100"), Some(0.0));
        assert_eq!(params.parse_param(PAN_ANGLE, "left"), None);

        let sin4p5 = Some(PanRule::Sin4p5dB.encode());
        assert_eq!(params.parse_param(PAN_RULE, "sin4.5dB"), sin4p5);
        assert_eq!(params.parse_param(PAN_RULE, "sin4p5dB"), sin4p5);
        assert_eq!(params.parse_param(PAN_RULE, "cubic"), None);
    }

    #[test]
    fn display_values() {
        assert_eq!(display(GAIN, GAIN_RANGE.encode(&-6.0)), "-6.00 dB");
        assert_eq!(display(GAIN, 1.0), "10.00 dB");
        assert_eq!(display(PAN_ANGLE, 0.35), "-30");
        assert_eq!(display(PAN_RULE, PanRule::Sin3dB.encode()), "sin3dB");
    }

    #[test]
    fn sanitize() {
        let mut params = GainPanParams {
            gain: 50.0,
            pan_rule: PanRule::Linear,
            pan_angle: f32::NAN,
        };
        params.sanitize();
        assert_eq!(params.gain, 10.0);
        assert_eq!(params.pan_angle, 0.0);

        let mut params = GainPanParams {
            gain: -12.504,
            pan_rule: PanRule::Linear,
            pan_angle: -33.4,
        };
        params.sanitize();
        assert_eq!(params.gain, -12.5);
        assert_eq!(params.pan_angle, -33.0);
    }
}
