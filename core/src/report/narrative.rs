use crate::radar_interface::{StepRecord, TOKEN_DELIMITER};

pub const CONSOLE_HEADER: &str = "--CONSOLE LOG--";
pub const COMPLETION_PREFIX: &str = "--Simulation completed in";

const DETECTED: &str = "Hostile detected & Missile launched! Engaging target...";
const IDENTIFIED: &str = "Hostile identified & Missile neutralized the target.";
const NOT_IDENTIFIED: &str = "Hostile not identified.";
const CLEAR: &str = "No hostile detected.";

/// Narrative lines for one step, in emission order. The leading blank line
/// separates consecutive steps in the trace.
///
/// The header echoes the row exactly as read, tokens rejoined with the input
/// delimiter and nothing escaped.
pub fn step_lines(record: &StepRecord) -> Vec<String> {
    let delimiter = TOKEN_DELIMITER.to_string();
    let raw_row = record.tokens.join(delimiter.as_str());
    let mut lines = vec![
        String::new(),
        format!("Time step {:2}s: Radar data [{}]", record.step, raw_row),
    ];

    if record.detected {
        lines.push(DETECTED.to_owned());
        lines.push(if record.identified {
            IDENTIFIED.to_owned()
        } else {
            NOT_IDENTIFIED.to_owned()
        });
    } else {
        lines.push(CLEAR.to_owned());
    }
    lines
}

pub fn completion_line(elapsed_secs: f64) -> String {
    format!("{} {:.1}s--", COMPLETION_PREFIX, elapsed_secs)
}
