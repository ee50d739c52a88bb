use airdefcore::processing::STEP_CEILING;
use anyhow::Context;
use clap::Parser;
use generator::profile::{write_radar_file, GeneratorConfig};
use std::fs;
use std::path::PathBuf;
use sweep::analysis::{run_sweep, SweepConfig};
use workflow::config::WorkflowConfig;
use workflow::runner::{read_rows, Runner};

mod generator;
mod sweep;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Radar-driven air-defense engagement simulator")]
struct Args {
    /// Radar data file: one time step per line, tokens separated by ';'
    #[arg(long, default_value = "radar_data.csv")]
    input: PathBuf,
    /// Probability that a detected hostile is identified (Pk)
    #[arg(long, default_value_t = 0.8)]
    kill_probability: f64,
    /// Seed for reproducible identification draws
    #[arg(long)]
    seed: Option<u64>,
    /// Pace each time step to roughly one second of wall-clock time
    #[arg(long, default_value_t = false)]
    real_time: bool,
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,
    /// Do not echo the narrative to the console
    #[arg(long, default_value_t = false)]
    quiet: bool,
    /// Load the run configuration from YAML instead of the flags above
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Write ROWS synthetic radar lines to --input and exit
    #[arg(long, value_name = "ROWS")]
    generate: Option<usize>,
    /// Seed for --generate
    #[arg(long, default_value_t = 42)]
    generator_seed: u64,
    /// Sweep Pk 0.1..=1.0 over many seeds instead of a single run
    #[arg(long, default_value_t = false)]
    sweep: bool,
    #[arg(long, default_value_t = 1000)]
    trials: u64,
    /// Also write the sweep report as JSON
    #[arg(long)]
    sweep_json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(rows) = args.generate {
        let config = GeneratorConfig {
            rows,
            seed: args.generator_seed,
            ..Default::default()
        };
        write_radar_file(&args.input, &config)?;
        println!("Generated {} radar rows -> {}", rows, args.input.display());
        return Ok(());
    }

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        let mut config = WorkflowConfig::from_args(
            args.input,
            args.kill_probability,
            args.real_time,
            args.seed,
            args.output_dir,
        );
        config.quiet = args.quiet;
        config
    };

    if args.sweep {
        let rows = read_rows(&workflow_config.input, STEP_CEILING)?;
        let sweep_config = SweepConfig {
            trials: args.trials,
            ..Default::default()
        };
        let report = run_sweep(&rows, &sweep_config)?;
        for line in report.render_table() {
            println!("{}", line);
        }
        if let Some(path) = args.sweep_json {
            fs::write(&path, report.to_json()?)
                .with_context(|| format!("writing sweep report {}", path.display()))?;
        }
        return Ok(());
    }

    let runner = Runner::new(workflow_config);
    let result = runner.execute()?;
    if runner.config().quiet {
        for line in result.outcome.summary.render() {
            println!("{}", line);
        }
    }
    log::info!(
        "trace {} / results {} ({:.1}s)",
        result.log_path.display(),
        result.results_path.display(),
        result.elapsed.as_secs_f64()
    );

    Ok(())
}
