use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use crate::cohort;
use crate::error::EvalError;

pub mod script;
pub use self::script::{write_script, Script};

pub const DEFAULT_PEER_ROOT: &str = "../src/";
pub const DEFAULT_EXECUTABLE: &str = "peer";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Clone, Debug, PartialEq)]
pub struct PeerSpec {
    pub index: usize,
    pub directory: String,
    pub port: String,
}

impl PeerSpec {
    pub fn new(index: usize) -> PeerSpec {
        PeerSpec {
            index,
            directory: format!("peers/p{}/", index),
            port: cohort::peer_port(index),
        }
    }
}

pub fn plan_peers(count: usize) -> Vec<PeerSpec> {
    (1..=count).map(PeerSpec::new).collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct LaunchConfig {
    /// Working directory of every peer; peer directories are relative to it.
    pub peer_root: PathBuf,
    /// Peer executable, relative to `peer_root` unless absolute.
    pub executable: PathBuf,
    pub script: Script,
    pub timeout: Duration,
}

impl Default for LaunchConfig {
    fn default() -> LaunchConfig {
        LaunchConfig {
            peer_root: PathBuf::from(DEFAULT_PEER_ROOT),
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            script: Script::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LaunchConfig {
    /// Makes the peer root absolute so the executable path does not depend
    /// on the working directory of the driver.
    pub fn resolve(self) -> Result<LaunchConfig, EvalError> {
        let peer_root = fs::canonicalize(&self.peer_root).map_err(|error| {
            EvalError::ProcessSpawnFailure {
                executable: self.peer_root.join(&self.executable).display().to_string(),
                error,
            }
        })?;

        Ok(LaunchConfig {
            executable: peer_root.join(&self.executable),
            peer_root,
            ..self
        })
    }
}

#[derive(Debug)]
pub struct PeerOutcome {
    pub peer: PeerSpec,
    pub status: ExitStatus,
    pub elapsed: Duration,
}

pub fn spawn_peer(peer: &PeerSpec, config: &LaunchConfig) -> Result<Child, EvalError> {
    Command::new(&config.executable)
        .arg(&peer.directory)
        .arg(&peer.port)
        .current_dir(&config.peer_root)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(|error| EvalError::ProcessSpawnFailure {
            executable: config.executable.display().to_string(),
            error,
        })
}

fn kill_and_reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Polls the child until it exits. Gives up when the writer reports a
/// failure or `timeout` has passed since `spawned`. The child is killed
/// and reaped on every error, which also unblocks a writer stuck on a
/// full pipe.
fn wait_with_timeout(
    child: &mut Child,
    peer: &PeerSpec,
    written: &Receiver<io::Result<()>>,
    spawned: Instant,
    timeout: Duration,
) -> Result<ExitStatus, EvalError> {
    loop {
        if let Ok(Err(error)) = written.try_recv() {
            kill_and_reap(child);

            return Err(EvalError::PipeWriteFailure {
                port: peer.port.clone(),
                error,
            });
        }

        let waited = match child.try_wait() {
            Ok(waited) => waited,
            Err(error) => {
                kill_and_reap(child);

                return Err(EvalError::WaitFailure {
                    port: peer.port.clone(),
                    error,
                });
            }
        };

        if let Some(status) = waited {
            return Ok(status);
        }

        if spawned.elapsed() >= timeout {
            warn!("peer {} still running after {:?}, killing it", peer.port, timeout);
            kill_and_reap(child);

            return Err(EvalError::ShutdownTimeout {
                port: peer.port.clone(),
                waited_ms: spawned.elapsed().as_millis(),
            });
        }

        thread::sleep(WAIT_POLL_INTERVAL);
    }
}

/// Starts one peer, feeds it the search script and waits for it to quit.
///
/// The script is written from a separate thread so that `config.timeout`
/// bounds the whole drive, including a peer that stops reading its input.
pub fn drive_peer(peer: &PeerSpec, config: &LaunchConfig) -> Result<PeerOutcome, EvalError> {
    let started = Instant::now();
    let mut child = spawn_peer(peer, config)?;
    let spawned = Instant::now();

    info!("started peer {} in {} (pid {})", peer.port, peer.directory, child.id());

    let mut stdin = match child.stdin.take() {
        Some(stdin) => stdin,
        None => {
            kill_and_reap(&mut child);

            return Err(EvalError::PipeWriteFailure {
                port: peer.port.clone(),
                error: io::Error::new(io::ErrorKind::BrokenPipe, "peer stdin is not piped"),
            });
        }
    };

    let (sender, written) = mpsc::channel();
    let script = config.script.clone();
    let port = peer.port.clone();

    let writer = thread::spawn(move || {
        let result = write_script(&mut stdin, &script);
        drop(stdin);
        if result.is_ok() {
            debug!("peer {}: script written, input closed", port);
        }
        let _ = sender.send(result);
    });

    let waited = wait_with_timeout(&mut child, peer, &written, spawned, config.timeout);
    let joined = writer.join();

    // a timeout also breaks the pipe, report the timeout
    let status = waited?;

    if joined.is_err() {
        return Err(EvalError::PeerPanicked {
            port: peer.port.clone(),
        });
    }

    if let Ok(Err(error)) = written.try_recv() {
        return Err(EvalError::PipeWriteFailure {
            port: peer.port.clone(),
            error,
        });
    }

    if !status.success() {
        warn!("peer {} exited with {}", peer.port, status);
    }

    Ok(PeerOutcome {
        peer: peer.clone(),
        status,
        elapsed: started.elapsed(),
    })
}

/// Drives every peer from its own thread and joins all of them. Returns
/// the first error in peer order once every thread has finished.
pub fn run(peers: Vec<PeerSpec>, config: LaunchConfig) -> Result<Vec<PeerOutcome>, EvalError> {
    let config = Arc::new(config);
    let mut threads = vec![];

    for peer in peers {
        let config = config.clone();
        let port = peer.port.clone();

        threads.push((port, thread::spawn(move || drive_peer(&peer, &config))));
    }

    let mut outcomes = Vec::with_capacity(threads.len());
    let mut first_error: Option<EvalError> = None;

    for (port, handle) in threads {
        let result = match handle.join() {
            Ok(result) => result,
            Err(_) => Err(EvalError::PeerPanicked { port }),
        };

        match result {
            Ok(outcome) => {
                info!("peer {} done in {:?}", outcome.peer.port, outcome.elapsed);
                outcomes.push(outcome);
            }
            Err(err) => {
                error!("{}", err);
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(outcomes),
    }
}
