use crate::error::{DiashowError, Result};
use crossbeam_channel::{Receiver, RecvTimeoutError};
use log::{debug, warn};
use std::io::{ErrorKind, Read};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Anything that can turn a query into a list of file paths.
#[cfg_attr(test, mockall::automock)]
pub trait Searcher {
    fn search(&self, pattern: &str) -> Result<Vec<String>>;
}

/// Runs an external indexing tool (`mdfind` by default) as `program <pattern>`.
#[derive(Debug, Clone)]
pub struct ToolSearcher {
    program: String,
    timeout: Duration,
}

impl ToolSearcher {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Searcher for ToolSearcher {
    fn search(&self, pattern: &str) -> Result<Vec<String>> {
        debug!("Running {} {:?}", self.program, pattern);
        let mut child = Command::new(&self.program)
            .arg(pattern)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| DiashowError::SearchSpawn {
                program: self.program.clone(),
                source,
            })?;

        // Both pipes are drained off-thread so a full pipe cannot stall the
        // child while it is being waited on.
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(DiashowError::SearchTimeout {
                    program: self.program.clone(),
                    timeout: self.timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        };

        // A background process started by the tool may keep the pipes open
        // after it exits; take what arrives within the grace period.
        let drain_deadline = Instant::now() + DRAIN_GRACE;
        let out = drain(&stdout, drain_deadline);
        let err = drain(&stderr, drain_deadline);

        let stderr = String::from_utf8_lossy(&err).trim().to_string();
        if !status.success() {
            return Err(DiashowError::SearchFailed {
                program: self.program.clone(),
                status,
                stderr,
            });
        }
        if !stderr.is_empty() {
            warn!("{} wrote to stderr: {}", self.program, stderr);
        }

        let lines = split_lines(&String::from_utf8_lossy(&out));
        debug!("{} {:?} returned {} paths", self.program, pattern, lines.len());
        Ok(lines)
    }
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<Vec<u8>> {
    let (tx, rx) = crossbeam_channel::unbounded();
    if let Some(mut pipe) = pipe {
        thread::spawn(move || {
            let mut buf = [0u8; 8192];
            loop {
                match pipe.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        if tx.send(buf[..n].to_vec()).is_err() {
                            break;
                        }
                    }
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => {
                        debug!("Failed reading search tool output: {e}");
                        break;
                    }
                }
            }
        });
    }
    rx
}

fn drain(rx: &Receiver<Vec<u8>>, deadline: Instant) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        match rx.recv_deadline(deadline) {
            Ok(chunk) => out.extend_from_slice(&chunk),
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                debug!("Search tool output still open after exit, ignoring the rest");
                break;
            }
        }
    }
    out
}

/// Splits tool output into lines, dropping empty entries.
pub fn split_lines(output: &str) -> Vec<String> {
    output
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
