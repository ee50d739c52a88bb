use crate::sweep::model::{SweepPoint, SweepReport};
use airdefcore::math::StatsHelper;
use airdefcore::prelude::SimulationParameters;
use airdefcore::processing::Engine;
use airdefcore::radar_interface::TimeStepRow;
use airdefcore::telemetry::{NoWait, NullSink};
use anyhow::{bail, Context};
use log::info;
use serde::{Deserialize, Serialize};

/// Seeds `0..trials` are run for every kill probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub kill_probabilities: Vec<f64>,
    pub trials: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            kill_probabilities: (1..=10).map(|tenth| tenth as f64 / 10.0).collect(),
            trials: 1_000,
        }
    }
}

/// Runs independent silent simulations over the same rows. Every run owns its
/// own engine, random stream and counters.
pub fn run_sweep(rows: &[TimeStepRow], config: &SweepConfig) -> anyhow::Result<SweepReport> {
    if config.trials == 0 {
        bail!("sweep needs at least one trial per kill probability");
    }

    let mut report = SweepReport {
        trials: config.trials,
        ..Default::default()
    };

    for &kill_probability in &config.kill_probabilities {
        let mut ratios = Vec::new();
        for seed in 0..config.trials {
            let params = SimulationParameters::new(kill_probability, false, Some(seed))?;
            let mut engine = Engine::new(params, NullSink, NoWait)?;
            let outcome = engine
                .run(rows.iter().cloned().map(Ok))
                .with_context(|| format!("sweep run Pk {} seed {}", kill_probability, seed))?;

            report.steps_processed = outcome.state.steps_processed();
            report.detection_count = outcome.state.hostiles_detected();
            if let Some(ratio) = outcome.summary.realized_kill_ratio {
                ratios.push(ratio);
            }
        }

        let point = SweepPoint {
            kill_probability,
            runs: config.trials,
            runs_with_detection: ratios.len() as u64,
            mean_ratio: StatsHelper::mean(&ratios),
            std_dev: StatsHelper::std_dev(&ratios),
        };
        info!(
            "Pk {:.2}: mean realized ratio {:.4} (std {:.4})",
            point.kill_probability, point.mean_ratio, point.std_dev
        );
        report.points.push(point);
    }

    Ok(report)
}
