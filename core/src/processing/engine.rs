use crate::prelude::{EngineError, EngineResult, SimulationParameters};
use crate::processing::accumulator::RunState;
use crate::processing::classifier::RowClassifier;
use crate::processing::resolver::{random_source, IdentificationResolver};
use crate::radar_interface::{StepRecord, TimeStepRow};
use crate::report::narrative::step_lines;
use crate::report::summary::RunSummary;
use crate::telemetry::log::LogManager;
use crate::telemetry::sink::LineSink;
use crate::telemetry::waiter::Waiter;
use rand::rngs::StdRng;
use std::time::Duration;

/// Hard limit on time steps per run; rows past it are never pulled.
pub const STEP_CEILING: usize = 20;

/// Real-time cadence: one step per second, less loop overhead.
pub const PACING_INTERVAL: Duration = Duration::from_millis(995);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running,
    Completed,
    Aborted,
}

/// Frozen result of a completed run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub state: RunState,
    pub summary: RunSummary,
    pub records: Vec<StepRecord>,
}

/// Time-stepped classification and identification engine.
///
/// Each engine drives exactly one run and owns that run's random stream.
/// The narrative sink and the pacing waiter are injected so callers decide
/// where the trace goes and whether steps are throttled.
pub struct Engine<N, W> {
    params: SimulationParameters,
    classifier: RowClassifier,
    resolver: IdentificationResolver,
    rng: StdRng,
    narrative: N,
    waiter: W,
    status: EngineState,
    logger: LogManager,
}

impl<N: LineSink, W: Waiter> Engine<N, W> {
    pub fn new(params: SimulationParameters, narrative: N, waiter: W) -> EngineResult<Self> {
        let rng = random_source(params.seed);
        Self::with_rng(params, rng, narrative, waiter)
    }

    pub fn with_rng(
        params: SimulationParameters,
        rng: StdRng,
        narrative: N,
        waiter: W,
    ) -> EngineResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            classifier: RowClassifier::new(),
            resolver: IdentificationResolver::new(params.kill_probability),
            rng,
            narrative,
            waiter,
            status: EngineState::Idle,
            logger: LogManager::new("engine"),
        })
    }

    pub fn status(&self) -> EngineState {
        self.status
    }

    pub fn into_narrative(self) -> N {
        self.narrative
    }

    /// Consumes rows until the source is exhausted or [`STEP_CEILING`] steps
    /// have run. A source error or a narrative write failure aborts the run
    /// and no outcome is produced.
    pub fn run<I>(&mut self, rows: I) -> EngineResult<RunOutcome>
    where
        I: IntoIterator<Item = EngineResult<TimeStepRow>>,
    {
        if self.status != EngineState::Idle {
            return Err(EngineError::Internal(format!(
                "engine already used (state {:?})",
                self.status
            )));
        }

        self.status = EngineState::Running;
        self.logger.record(&format!(
            "run started (Pk {}, real time {}, seed {:?})",
            self.params.kill_probability, self.params.real_time, self.params.seed
        ));

        match self.drive(rows.into_iter()) {
            Ok(outcome) => {
                self.status = EngineState::Completed;
                self.logger.record(&format!(
                    "run completed after {} steps",
                    outcome.state.steps_processed()
                ));
                Ok(outcome)
            }
            Err(err) => {
                self.status = EngineState::Aborted;
                self.logger.warn(&format!("run aborted: {}", err));
                Err(err)
            }
        }
    }

    fn drive<I>(&mut self, mut rows: I) -> EngineResult<RunOutcome>
    where
        I: Iterator<Item = EngineResult<TimeStepRow>>,
    {
        let mut state = RunState::new();
        let mut records = Vec::new();

        while state.steps_processed() < STEP_CEILING {
            let Some(row) = rows.next() else {
                break;
            };
            let record = self.step(&mut state, row?)?;
            records.push(record);
        }

        self.narrative.flush()?;
        Ok(RunOutcome {
            summary: RunSummary::from_state(&state),
            state,
            records,
        })
    }

    fn step(&mut self, state: &mut RunState, row: TimeStepRow) -> EngineResult<StepRecord> {
        let step = state.steps_processed() + 1;
        let classification = self.classifier.classify(&row);
        if classification.malformed > 0 {
            self.logger.warn(&format!(
                "step {}: ignored {} empty token(s)",
                step, classification.malformed
            ));
        }

        let detected = classification.is_hostile();
        let identified = self.resolver.resolve(detected, &mut self.rng);
        state.record_step(detected, identified);

        let record = StepRecord::new(
            step,
            row.tokens,
            classification.odd,
            classification.even,
            classification.malformed,
            detected,
            identified,
        );
        self.logger.trace_step(&format!(
            "step {}: odd {} even {} detected {} identified {}",
            step, record.odd, record.even, detected, identified
        ));

        for line in step_lines(&record) {
            self.narrative.write_line(&line)?;
        }

        if self.params.real_time {
            self.waiter.wait(PACING_INTERVAL);
        }
        Ok(record)
    }
}
