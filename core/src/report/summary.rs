use crate::math::stats::StatsHelper;
use crate::prelude::EngineResult;
use crate::processing::accumulator::RunState;
use crate::telemetry::sink::LineSink;
use serde::{Deserialize, Serialize};

pub const RESULTS_HEADER: &str = "--SIMULATION RESULTS--";

/// Read-only statistics derived from a finished run.
///
/// Rates are `None` when their denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub steps_processed: usize,
    pub hostiles_detected: usize,
    pub hostiles_identified: usize,
    pub detection_rate: Option<f64>,
    pub identification_rate: Option<f64>,
    pub realized_kill_ratio: Option<f64>,
}

impl RunSummary {
    pub fn from_state(state: &RunState) -> Self {
        let steps = state.steps_processed();
        let detected = state.hostiles_detected();
        let identified = state.hostiles_identified();
        Self {
            steps_processed: steps,
            hostiles_detected: detected,
            hostiles_identified: identified,
            detection_rate: StatsHelper::ratio(detected, steps),
            identification_rate: StatsHelper::ratio(identified, steps),
            realized_kill_ratio: StatsHelper::ratio(identified, detected),
        }
    }

    pub fn detection_percentage(&self) -> Option<f64> {
        StatsHelper::percentage(self.hostiles_detected, self.steps_processed)
    }

    pub fn identification_percentage(&self) -> Option<f64> {
        StatsHelper::percentage(self.hostiles_identified, self.steps_processed)
    }

    /// Fixed-format results report.
    pub fn render(&self) -> Vec<String> {
        let mut lines = vec![
            RESULTS_HEADER.to_owned(),
            format!("Total Hostiles: {}", self.steps_processed),
            format!("Hostiles Detected: {}", self.hostiles_detected),
        ];
        if let Some(pct) = self.detection_percentage() {
            lines.push(format!("Probability of Detection: {:.2}%", pct));
        }
        lines.push(format!("Hostiles Identified: {}", self.hostiles_identified));
        if let Some(pct) = self.identification_percentage() {
            lines.push(format!("Probability of Identification: {:.2}%", pct));
        }
        if let Some(ratio) = self.realized_kill_ratio {
            lines.push(format!(
                "Simulated Pk Ratio [#Identification/#Detection]: {:.2}",
                ratio
            ));
        }
        lines
    }

    pub fn write_to<S: LineSink + ?Sized>(&self, sink: &mut S) -> EngineResult<()> {
        for line in self.render() {
            sink.write_line(&line)?;
        }
        sink.flush()
    }
}

impl From<&RunState> for RunSummary {
    fn from(state: &RunState) -> Self {
        Self::from_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::sink::MemorySink;

    fn state(steps: &[(bool, bool)]) -> RunState {
        let mut state = RunState::new();
        for &(detected, identified) in steps {
            state.record_step(detected, identified);
        }
        state
    }

    #[test]
    fn summary_reports_rates_and_ratio() {
        let summary = RunSummary::from_state(&state(&[
            (true, true),
            (false, false),
            (true, false),
            (true, true),
        ]));
        assert_eq!(summary.detection_rate, Some(0.75));
        assert_eq!(summary.identification_rate, Some(0.5));
        assert_eq!(
            summary.render(),
            vec![
                "--SIMULATION RESULTS--",
                "Total Hostiles: 4",
                "Hostiles Detected: 3",
                "Probability of Detection: 75.00%",
                "Hostiles Identified: 2",
                "Probability of Identification: 50.00%",
                "Simulated Pk Ratio [#Identification/#Detection]: 0.67",
            ]
        );
    }

    #[test]
    fn percentages_scale_rates() {
        let summary = RunSummary::from_state(&state(&[(true, true), (false, false)]));
        assert_eq!(summary.detection_percentage(), Some(50.0));
        assert_eq!(summary.identification_percentage(), Some(50.0));
        let empty = RunSummary::from_state(&RunState::new());
        assert_eq!(empty.detection_percentage(), None);
    }

    #[test]
    fn empty_run_omits_percentages_and_ratio() {
        let summary = RunSummary::from_state(&RunState::new());
        assert_eq!(summary.detection_rate, None);
        assert_eq!(summary.realized_kill_ratio, None);
        assert_eq!(
            summary.render(),
            vec![
                "--SIMULATION RESULTS--",
                "Total Hostiles: 0",
                "Hostiles Detected: 0",
                "Hostiles Identified: 0",
            ]
        );
    }

    #[test]
    fn ratio_omitted_without_detections() {
        let summary = RunSummary::from(&state(&[(false, false), (false, false)]));
        let lines = summary.render();
        assert!(lines.contains(&"Probability of Detection: 0.00%".to_string()));
        assert!(!lines.iter().any(|line| line.starts_with("Simulated Pk Ratio")));
    }

    #[test]
    fn write_to_emits_rendered_lines() {
        let summary = RunSummary::from_state(&state(&[(true, true)]));
        let mut sink = MemorySink::new();
        summary.write_to(&mut sink).unwrap();
        assert_eq!(sink.lines(), summary.render().as_slice());
    }
}
