use crate::workflow::config::WorkflowConfig;
use airdefcore::prelude::{EngineError, SimulationParameters};
use airdefcore::processing::{Engine, RunOutcome};
use airdefcore::radar_interface::{LineSource, TimeStepRow};
use airdefcore::report::{completion_line, CONSOLE_HEADER};
use airdefcore::telemetry::{LineSink, NullSink, TeeSink, ThreadSleeper, WriterSink};
use anyhow::Context;
use log::{info, warn};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct WorkflowResult {
    pub outcome: RunOutcome,
    pub log_path: PathBuf,
    pub results_path: PathBuf,
    pub elapsed: Duration,
}

/// Opens the radar input, failing before any output file exists.
pub fn open_input(path: &Path) -> Result<BufReader<File>, EngineError> {
    File::open(path).map(BufReader::new).map_err(|err| {
        EngineError::InputUnavailable(format!("{}: {}", path.display(), err))
    })
}

/// Reads at most `limit` rows, the most a single run will ever consume.
pub fn read_rows(path: &Path, limit: usize) -> anyhow::Result<Vec<TimeStepRow>> {
    let input = open_input(path)?;
    LineSource::new(input)
        .take(limit)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("reading radar rows from {}", path.display()))
}

fn finish_trace<S: LineSink>(narrative: &mut S, elapsed: Duration) -> Result<(), EngineError> {
    narrative.write_line("")?;
    narrative.write_line(&completion_line(elapsed.as_secs_f64()))?;
    narrative.flush()
}

fn create_sink_file(path: &Path) -> Result<BufWriter<File>, EngineError> {
    let unavailable =
        |err: io::Error| EngineError::SinkUnavailable(format!("{}: {}", path.display(), err));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(unavailable)?;
    }
    File::create(path).map(BufWriter::new).map_err(unavailable)
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Runs one simulation: narrative to the console and the log file, the
    /// summary to the results file. Nothing is written to the results file
    /// unless the run completes.
    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        let input = open_input(&self.config.input)?;
        self.execute_from(input)
    }

    /// Same as [`Runner::execute`] with the radar rows read from `input`.
    pub fn execute_from<R: BufRead>(&self, input: R) -> anyhow::Result<WorkflowResult> {
        let params = self.config.to_parameters()?;

        let log_path = self.config.log_path();
        let log_file = create_sink_file(&log_path)?;
        let console: Box<dyn LineSink> = if self.config.quiet {
            Box::new(NullSink)
        } else {
            Box::new(WriterSink::new("console", io::stdout()))
        };
        let mut narrative = TeeSink::new(
            console,
            WriterSink::new(log_path.display().to_string(), log_file),
        );

        let started = Instant::now();
        let outcome = match self.run_engine(params, input, &mut narrative) {
            Ok(outcome) => outcome,
            Err(err) => {
                if let Err(flush_err) = narrative.flush() {
                    warn!("partial trace not flushed: {}", flush_err);
                }
                return Err(err).context("running engagement simulation");
            }
        };
        let elapsed = started.elapsed();

        finish_trace(&mut narrative, elapsed).context("finishing narrative trace")?;

        let results_path = self.config.results_path();
        let mut results = WriterSink::new(
            results_path.display().to_string(),
            create_sink_file(&results_path)?,
        );
        outcome
            .summary
            .write_to(&mut results)
            .with_context(|| format!("writing results {}", results_path.display()))?;
        info!(
            "results written to {} ({} steps)",
            results_path.display(),
            outcome.state.steps_processed()
        );

        Ok(WorkflowResult {
            outcome,
            log_path,
            results_path,
            elapsed,
        })
    }

    fn run_engine<R: BufRead, S: LineSink>(
        &self,
        params: SimulationParameters,
        input: R,
        narrative: &mut S,
    ) -> Result<RunOutcome, EngineError> {
        narrative.write_line(CONSOLE_HEADER)?;
        let mut engine = Engine::new(params, narrative, ThreadSleeper)?;
        engine.run(LineSource::new(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airdefcore::processing::STEP_CEILING;
    use std::io::Write;

    fn write_input(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("radar_data.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn quiet_config(
        input: PathBuf,
        output_dir: PathBuf,
        pk: f64,
        seed: Option<u64>,
    ) -> WorkflowConfig {
        let mut cfg = WorkflowConfig::from_args(input, pk, false, seed, output_dir);
        cfg.quiet = true;
        cfg
    }

    #[test]
    fn runner_writes_log_and_results() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(
            dir.path(),
            "1011;0001;1111\n1010; 0000 ;1110\n1111111;1111111;0000000\n",
        );
        let cfg = quiet_config(input, dir.path().join("output"), 1.0, Some(0));

        let result = Runner::new(cfg).execute().unwrap();
        assert_eq!(result.outcome.state.steps_processed(), 3);
        assert_eq!(result.outcome.state.hostiles_detected(), 2);
        assert_eq!(result.outcome.state.hostiles_identified(), 2);
        assert!(result.log_path.ends_with("log_0.txt"));

        let results = fs::read_to_string(&result.results_path).unwrap();
        assert_eq!(
            results,
            "--SIMULATION RESULTS--\n\
             Total Hostiles: 3\n\
             Hostiles Detected: 2\n\
             Probability of Detection: 66.67%\n\
             Hostiles Identified: 2\n\
             Probability of Identification: 66.67%\n\
             Simulated Pk Ratio [#Identification/#Detection]: 1.00\n"
        );

        let log = fs::read_to_string(&result.log_path).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines[0], CONSOLE_HEADER);
        assert_eq!(lines[2], "Time step  1s: Radar data [1011;0001;1111]");
        assert_eq!(lines[6], "Time step  2s: Radar data [1010; 0000 ;1110]");
        assert_eq!(lines[7], "No hostile detected.");
        assert!(lines.last().unwrap().starts_with("--Simulation completed in"));
    }

    #[test]
    fn missing_input_aborts_without_output_files() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("output");
        let cfg = quiet_config(dir.path().join("absent.csv"), output_dir.clone(), 0.8, None);

        let err = Runner::new(cfg).execute().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::InputUnavailable(_))
        ));
        assert!(!output_dir.exists());
    }

    #[test]
    fn corrupt_byte_in_a_token_does_not_abort_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("radar_data.csv");
        fs::write(&path, b"1;1;0\n1;\xFF;0\n0;0;1\n").unwrap();
        let cfg = quiet_config(path, dir.path().join("output"), 1.0, Some(0));

        let result = Runner::new(cfg).execute().unwrap();
        assert_eq!(result.outcome.state.steps_processed(), 3);
        assert_eq!(result.outcome.state.hostiles_detected(), 2);
        assert_eq!(result.outcome.records[1].odd, 2);
        assert!(result.results_path.exists());
    }

    #[test]
    fn mid_run_read_failure_leaves_partial_trace_and_no_results() {
        struct FailsAfterFirstRow {
            served: bool,
        }

        impl io::Read for FailsAfterFirstRow {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.served {
                    return Err(io::Error::new(io::ErrorKind::BrokenPipe, "feed lost"));
                }
                self.served = true;
                let row = b"1;1;0\n";
                buf[..row.len()].copy_from_slice(row);
                Ok(row.len())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let cfg = quiet_config(
            dir.path().join("unused.csv"),
            dir.path().join("output"),
            1.0,
            Some(3),
        );
        let log_path = cfg.log_path();
        let results_path = cfg.results_path();

        let input = BufReader::new(FailsAfterFirstRow { served: false });
        let err = Runner::new(cfg).execute_from(input).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::InputUnavailable(_))
        ));

        assert!(!results_path.exists());
        let log = fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines[0], CONSOLE_HEADER);
        assert_eq!(lines[2], "Time step  1s: Radar data [1;1;0]");
        assert!(!log.contains("Simulation completed"));
    }

    #[test]
    fn unwritable_output_dir_is_sink_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "1;1;0\n");
        let blocker = dir.path().join("blocked");
        File::create(&blocker).unwrap();
        let cfg = quiet_config(input, blocker, 0.8, Some(1));

        let err = Runner::new(cfg).execute().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::SinkUnavailable(_))
        ));
    }

    #[test]
    fn empty_input_produces_zero_step_summary() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), "");
        let cfg = quiet_config(input, dir.path().to_path_buf(), 0.8, None);

        let result = Runner::new(cfg).execute().unwrap();
        assert_eq!(result.outcome.state.steps_processed(), 0);
        let results = fs::read_to_string(dir.path().join("results.txt")).unwrap();
        assert_eq!(
            results,
            "--SIMULATION RESULTS--\n\
             Total Hostiles: 0\n\
             Hostiles Detected: 0\n\
             Hostiles Identified: 0\n"
        );
    }

    #[test]
    fn read_rows_stops_at_limit() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), &"1;0;1\n".repeat(30));
        let rows = read_rows(&input, STEP_CEILING).unwrap();
        assert_eq!(rows.len(), STEP_CEILING);
    }
}
