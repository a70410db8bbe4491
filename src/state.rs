//! Saving and restoring parameters as a JSON document.
//!
//! ```json
//! {"id":"gainpan","params":{"gain":-6.0,"panrule":"sin3dB","panangle":25.0}}
//! ```

use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};

use crate::params::GainPanParams;

pub const STATE_ID: &str = "gainpan";

#[derive(Serialize)]
struct SavedState<'a> {
    id: &'a str,
    params: &'a GainPanParams,
}

#[derive(Deserialize)]
struct LoadedState {
    id: String,
    #[serde(default)]
    params: GainPanParams,
}

pub fn save(params: &GainPanParams, output: &mut impl Write) -> io::Result<()> {
    let state = SavedState {
        id: STATE_ID,
        params,
    };
    serde_json::to_writer(output, &state)?;

    Ok(())
}

/// Reads a saved document back. Values are pulled into range; documents
/// written by something else are rejected.
pub fn load(input: &mut impl Read) -> io::Result<GainPanParams> {
    let state: LoadedState = serde_json::from_reader(input)?;

    if state.id != STATE_ID {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("unexpected state id `{}`", state.id),
        ));
    }

    let mut params = state.params;
    params.sanitize();

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::PanRule;

    fn load_str(text: &str) -> io::Result<GainPanParams> {
        load(&mut text.as_bytes())
    }

    #[test]
    fn saves_plain_values() {
        let mut output = Vec::new();
        save(&GainPanParams::default(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            r#"{"id":"gainpan","params":{"gain":0.0,"panrule":"balanced","panangle":0.0}}"#
        );
    }

    #[test]
    fn restores_saved_params() {
        let params = GainPanParams {
            gain: -6.5,
            pan_rule: PanRule::SquareRoot4p5dB,
            pan_angle: -40.0,
        };

        let mut output = Vec::new();
        save(&params, &mut output).unwrap();

        assert_eq!(load(&mut &output[..]).unwrap(), params);
    }

    #[test]
    fn rejects_foreign_state() {
        let error = load_str(r#"{"id":"gain","params":{"gain":3.0}}"#).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);

        let error = load_str("not json").unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);

        let error = load_str(r#"{"id":"gainpan","params":{"panrule":"cubic"}}"#).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn missing_values_use_defaults() {
        let params = load_str(r#"{"id":"gainpan","params":{"gain":-12.5}}"#).unwrap();
        assert_eq!(
            params,
            GainPanParams {
                gain: -12.5,
                ..GainPanParams::default()
            }
        );

        assert_eq!(load_str(r#"{"id":"gainpan"}"#).unwrap(), GainPanParams::default());
    }

    #[test]
    fn clamps_out_of_range_values() {
        let params =
            load_str(r#"{"id":"gainpan","params":{"gain":50.0,"panangle":-250.4}}"#).unwrap();
        assert_eq!(params.gain, 10.0);
        assert_eq!(params.pan_angle, -100.0);
    }
}
