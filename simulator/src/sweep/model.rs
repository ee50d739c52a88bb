use serde::{Deserialize, Serialize};

/// Realized kill-ratio distribution for one configured Pk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SweepPoint {
    pub kill_probability: f64,
    pub runs: u64,
    /// Runs with at least one detection; only these carry a ratio.
    pub runs_with_detection: u64,
    pub mean_ratio: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SweepReport {
    pub trials: u64,
    pub steps_processed: usize,
    pub detection_count: usize,
    pub points: Vec<SweepPoint>,
}

impl SweepReport {
    pub fn render_table(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "Pk sweep: {} trials per Pk, {} steps, {} detections per run",
                self.trials, self.steps_processed, self.detection_count
            ),
            format!("{:>6} {:>12} {:>10} {:>10}", "Pk", "runs(det)", "mean", "std"),
        ];
        for point in &self.points {
            lines.push(format!(
                "{:>6.2} {:>12} {:>10.4} {:>10.4}",
                point.kill_probability,
                point.runs_with_detection,
                point.mean_ratio,
                point.std_dev
            ));
        }
        lines
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
