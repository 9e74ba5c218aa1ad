use std::path::PathBuf;
use std::time::Duration;
use clap::{App, Arg};
use failure::{err_msg, Error};
use crate::driver::{self, LaunchConfig, Script};
use crate::evaluation;
use crate::log_parser::log_events::RequestKey;

/// Highest peer count whose port still fits the `55xxx` scheme.
pub const MAX_PEERS: usize = 999;

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum OutputFormat {
    Terminal,
    Prometheus,
}

#[derive(PartialEq, Debug)]
pub struct LatencyReportArgs {
    pub root: PathBuf,
    pub cohorts: usize,
    pub filenames: Vec<String>,
    pub format: OutputFormat,
    pub request_key: RequestKey,
}

#[derive(PartialEq, Debug)]
pub struct PeerLoadArgs {
    pub peer_count: usize,
    pub launch: LaunchConfig,
}

pub fn parse_latency_report_args<T>(args: T) -> Result<LatencyReportArgs, Error>
where
    T: IntoIterator<Item = String>,
{
    let cohorts_default = evaluation::DEFAULT_COHORTS.to_string();

    let app = App::new("Peer latency report")
        .author(crate_authors!())
        .version(crate_version!())
        .about("Average search request latency per cohort of concurrent peers")
        .arg(
            Arg::with_name("filename")
                .index(1)
                .value_name("FILE")
                .required(false)
                .multiple(true)
                .help("Peer logs to pool into a single average instead of the cohort layout")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("root")
                .value_name("DIR")
                .long("root")
                .help("Directory containing one_client/, two_clients/, ...")
                .takes_value(true)
                .default_value("."),
        )
        .arg(
            Arg::with_name("cohorts")
                .value_name("COUNT")
                .long("cohorts")
                .help("Evaluate the cohorts of one up to COUNT clients")
                .takes_value(true)
                .default_value(&cohorts_default),
        )
        .arg(
            Arg::with_name("format")
                .value_name("FORMAT")
                .long("format")
                .possible_values(&["terminal", "prometheus"])
                .takes_value(true)
                .default_value("terminal"),
        )
        .arg(
            Arg::with_name("whole-request-id")
                .long("whole-request-id")
                .help("Identify requests by the whole token after '!' instead of its first character"),
        )
        .get_matches_from(args);

    let filenames = match app.values_of("filename") {
        Some(values) => values.map(|v| v.to_string()).collect(),
        None => vec![],
    };

    let cohorts: usize = match app.value_of("cohorts").unwrap_or("10").parse() {
        Ok(0) => return Err(err_msg("--cohorts must be at least 1")),
        Ok(value) => value,
        Err(err) => return Err(err_msg(format!("--cohorts must be numeric ({})", err))),
    };

    let format = match app.value_of("format") {
        Some("prometheus") => OutputFormat::Prometheus,
        _ => OutputFormat::Terminal,
    };

    let request_key = if app.is_present("whole-request-id") {
        RequestKey::Token
    } else {
        RequestKey::FirstChar
    };

    Ok(LatencyReportArgs {
        root: PathBuf::from(app.value_of("root").unwrap_or(".")),
        cohorts,
        filenames,
        format,
        request_key,
    })
}

pub fn parse_peer_load_args<T>(args: T) -> Result<PeerLoadArgs, Error>
where
    T: IntoIterator<Item = String>,
{
    let searches_default = driver::script::DEFAULT_SEARCHES.to_string();
    let timeout_default = driver::DEFAULT_TIMEOUT.as_secs().to_string();

    let app = App::new("Peer load driver")
        .author(crate_authors!())
        .version(crate_version!())
        .about("Starts N peers and drives each through a scripted series of searches")
        .arg(
            Arg::with_name("peers")
                .index(1)
                .value_name("N")
                .required(true)
                .help("Number of peers to start")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("peer-root")
                .value_name("DIR")
                .long("peer-root")
                .help("Working directory of the peers, holding the peer executable and peers/")
                .takes_value(true)
                .default_value(driver::DEFAULT_PEER_ROOT),
        )
        .arg(
            Arg::with_name("executable")
                .value_name("PATH")
                .long("executable")
                .help("Peer executable, relative to the peer root unless absolute")
                .takes_value(true)
                .default_value(driver::DEFAULT_EXECUTABLE),
        )
        .arg(
            Arg::with_name("searches")
                .value_name("COUNT")
                .long("searches")
                .help("Search commands sent to every peer before it is told to quit")
                .takes_value(true)
                .default_value(&searches_default),
        )
        .arg(
            Arg::with_name("search-term")
                .value_name("TERM")
                .long("search-term")
                .takes_value(true)
                .default_value(driver::script::DEFAULT_SEARCH_TERM),
        )
        .arg(
            Arg::with_name("timeout")
                .value_name("SECONDS")
                .long("timeout")
                .help("How long to wait for each peer to exit after the quit command")
                .takes_value(true)
                .default_value(&timeout_default),
        )
        .get_matches_from(args);

    let peer_count: usize = match app.value_of("peers").unwrap_or("").parse() {
        Ok(value) if value >= 1 && value <= MAX_PEERS => value,
        Ok(_) => {
            return Err(err_msg(format!(
                "N must be between 1 and {}",
                MAX_PEERS
            )))
        }
        Err(err) => return Err(err_msg(format!("N must be numeric ({})", err))),
    };

    let searches: usize = match app.value_of("searches").unwrap_or("").parse() {
        Ok(value) => value,
        Err(err) => return Err(err_msg(format!("--searches must be numeric ({})", err))),
    };

    let timeout: u64 = match app.value_of("timeout").unwrap_or("").parse() {
        Ok(value) => value,
        Err(err) => return Err(err_msg(format!("--timeout must be numeric ({})", err))),
    };

    let search_term = app
        .value_of("search-term")
        .unwrap_or(driver::script::DEFAULT_SEARCH_TERM);

    Ok(PeerLoadArgs {
        peer_count,
        launch: LaunchConfig {
            peer_root: PathBuf::from(app.value_of("peer-root").unwrap_or(driver::DEFAULT_PEER_ROOT)),
            executable: PathBuf::from(
                app.value_of("executable").unwrap_or(driver::DEFAULT_EXECUTABLE),
            ),
            script: Script {
                searches,
                search_term: search_term.to_string(),
            },
            timeout: Duration::from_secs(timeout),
        },
    })
}
