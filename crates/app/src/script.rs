use std::str::FromStr;

use harmonic_composer_core::{App, HarmonicError, Result};

/// One scripted UI event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Press `+`.
    Add,
    /// Press `-`.
    Remove,
    /// `mag:<index>:<value>`: drag the magnitude slider of a harmonic.
    Magnitude { index: usize, value: f64 },
    /// `phase:<index>:<turns>`: drag the phase slider of a harmonic.
    Phase { index: usize, turns: f64 },
}

impl Step {
    pub fn apply(self, app: &mut App) -> Result<()> {
        tracing::debug!(step = ?self, "applying script step");
        match self {
            Step::Add => app.add_harmonic(),
            Step::Remove => app.remove_harmonic(),
            Step::Magnitude { index, value } => app.set_magnitude(index, value),
            Step::Phase { index, turns } => app.set_phase(index, turns),
        }
    }
}

impl FromStr for Step {
    type Err = HarmonicError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().split(':');
        let step = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some("add"), None, _, _) => Step::Add,
            (Some("remove"), None, _, _) => Step::Remove,
            (Some("mag"), Some(index), Some(value), None) => Step::Magnitude {
                index: parse_index(index)?,
                value: parse_value(value)?,
            },
            (Some("phase"), Some(index), Some(turns), None) => Step::Phase {
                index: parse_index(index)?,
                turns: parse_value(turns)?,
            },
            _ => {
                return Err(HarmonicError::argument(format!(
                    "unknown step `{s}`; expected add, remove, mag:<i>:<v> or phase:<i>:<v>"
                )))
            }
        };
        Ok(step)
    }
}

fn parse_index(text: &str) -> Result<usize> {
    text.parse()
        .map_err(|_| HarmonicError::argument(format!("invalid harmonic index `{text}`")))
}

fn parse_value(text: &str) -> Result<f64> {
    text.parse()
        .map_err(|_| HarmonicError::argument(format!("invalid slider value `{text}`")))
}

#[cfg(test)]
mod tests {
    use harmonic_composer_core::AppConfig;

    use super::*;

    #[test]
    fn parses_every_step() {
        assert_eq!("add".parse::<Step>().unwrap(), Step::Add);
        assert_eq!(" remove ".parse::<Step>().unwrap(), Step::Remove);
        assert_eq!(
            "mag:1:0.5".parse::<Step>().unwrap(),
            Step::Magnitude {
                index: 1,
                value: 0.5
            }
        );
        assert_eq!(
            "phase:0:0.25".parse::<Step>().unwrap(),
            Step::Phase {
                index: 0,
                turns: 0.25
            }
        );
    }

    #[test]
    fn rejects_malformed_steps() {
        for bad in ["", "add:1", "mag:1", "mag:x:0.5", "phase:0:y", "mag:0:1:2", "jump"] {
            assert!(bad.parse::<Step>().is_err(), "accepted `{bad}`");
        }
    }

    #[test]
    fn steps_drive_the_app() {
        let mut app = App::new(AppConfig::default());
        app.start().unwrap();

        for step in ["add", "mag:1:0.25", "remove", "remove", "remove"] {
            step.parse::<Step>().unwrap().apply(&mut app).unwrap();
        }
        assert!(app.harmonics().unwrap().is_empty());
    }
}
