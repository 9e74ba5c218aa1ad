#[macro_use]
extern crate log;

use std::env;
use std::process;
use failure::Error;
use p2p_eval::args::{self, PeerLoadArgs};
use p2p_eval::driver;

fn run(args: PeerLoadArgs) -> Result<(), Error> {
    let config = args.launch.resolve()?;
    let peers = driver::plan_peers(args.peer_count);

    info!(
        "driving {} peers with {} ({} searches each)",
        peers.len(),
        config.executable.display(),
        config.script.searches
    );

    let outcomes = driver::run(peers, config)?;

    let failed = outcomes.iter().filter(|outcome| !outcome.status.success()).count();
    info!("{} peers finished, {} with a non-zero exit status", outcomes.len(), failed);

    Ok(())
}

fn main() {
    env_logger::init();

    let args = match args::parse_peer_load_args(env::args()) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
