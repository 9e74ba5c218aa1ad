use std::env;
use std::io;
use std::process;
use failure::Error;
use p2p_eval::args::{self, LatencyReportArgs, OutputFormat};
use p2p_eval::evaluation;
use p2p_eval::log_parser::log_events::LogLineGrammar;
use p2p_eval::render::prometheus::PrometheusRenderer;
use p2p_eval::render::terminal::TerminalRenderer;
use p2p_eval::render::Renderer;

fn run(args: &LatencyReportArgs) -> Result<(), Error> {
    let grammar = LogLineGrammar::with_key(args.request_key);

    let report = if args.filenames.is_empty() {
        evaluation::evaluate_cohorts(&args.root, args.cohorts, &grammar)?
    } else {
        evaluation::evaluate_files(&args.filenames, &grammar)?
    };

    let stdout = io::stdout();
    let mut stream = stdout.lock();

    match args.format {
        OutputFormat::Terminal => TerminalRenderer::new(&mut stream).render(&report),
        OutputFormat::Prometheus => PrometheusRenderer::new(&mut stream)?.render(&report),
    }
}

fn main() {
    env_logger::init();

    let args = match args::parse_latency_report_args(env::args()) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    };

    if let Err(err) = run(&args) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
