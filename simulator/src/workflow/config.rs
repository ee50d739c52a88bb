use airdefcore::prelude::SimulationParameters;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub input: PathBuf,
    pub kill_probability: f64,
    #[serde(default)]
    pub real_time: bool,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Skip the console copy of the narrative; the log file is still written.
    #[serde(default)]
    pub quiet: bool,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        input: PathBuf,
        kill_probability: f64,
        real_time: bool,
        seed: Option<u64>,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            input,
            kill_probability,
            real_time,
            seed,
            output_dir,
            quiet: false,
        }
    }

    pub fn to_parameters(&self) -> anyhow::Result<SimulationParameters> {
        SimulationParameters::new(self.kill_probability, self.real_time, self.seed)
            .context("validating simulation parameters")
    }

    /// Narrative trace path, suffixed with the seed when one is set.
    pub fn log_path(&self) -> PathBuf {
        self.output_dir.join(self.seeded_name("log"))
    }

    pub fn results_path(&self) -> PathBuf {
        self.output_dir.join(self.seeded_name("results"))
    }

    fn seeded_name(&self, stem: &str) -> String {
        match self.seed {
            Some(seed) => format!("{}_{}.txt", stem, seed),
            None => format!("{}.txt", stem),
        }
    }
}
