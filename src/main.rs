use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rpc_rate::{
    cli::{RateSubCommand, CLI},
    context::RateContext,
    error::AnalysisError,
    processors::{single_run::RunAnalyzer, sweep::SweepAnalyzer},
    trace::reader::CsvEventReader,
    EventProcessor, EventSource,
};

pub fn run<C: EventProcessor>(command: C, ctx: &RateContext) -> Result<()> {
    CsvEventReader::open(&ctx.input)?.process_events(command, ctx)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .ok();
}

fn main() {
    let opts = CLI::parse();
    init_logging(opts.verbose);

    let ctx = RateContext::from(&opts);

    let result = match &opts.command {
        RateSubCommand::Sweep { .. } => run(SweepAnalyzer::from(&ctx), &ctx),
        RateSubCommand::Run { .. } => run(RunAnalyzer::from(&ctx), &ctx),
    };

    if let Err(err) = result {
        let code = exit_code_for_error(&err);
        eprintln!("error: {err:?}");
        std::process::exit(code);
    }
}

/// 2: unreadable or malformed input, 3: analysis precondition violated,
/// 4: invalid configuration, 1: other.
fn exit_code_for_error(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<AnalysisError>() {
            return match e {
                AnalysisError::Config(_) => 4,
                e if e.is_precondition() => 3,
                _ => 2,
            };
        }
        if cause.is::<csv::Error>() || cause.is::<std::io::Error>() {
            return 2;
        }
    }
    1
}
