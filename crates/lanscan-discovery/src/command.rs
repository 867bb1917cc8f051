//! External utility invocation
//!
//! Probes never spawn processes directly; they hand a [`CommandSpec`] to a
//! [`CommandRunner`]. [`SystemRunner`] runs the real utility through
//! `tokio::process`, tests substitute canned output.

use lanscan_core::Dialect;
use std::fmt;
use std::io;
use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, trace};

/// Default number of echo requests sent to the broadcast address
pub const DEFAULT_PING_COUNT: u32 = 5;

/// A program and its argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Output of a command that ran to completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs a command to completion and captures its output
///
/// An `Err` means the command could not be launched or did not finish; a
/// command that ran but failed still returns `Ok` with its stderr.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, command: &CommandSpec) -> io::Result<CommandOutput>;
}

/// Runs commands on the host
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    /// Create a runner; with a timeout, commands still running after it are killed
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec) -> io::Result<CommandOutput> {
        debug!(command = %command, "Running command");

        let mut child = Command::new(&command.program);
        child
            .args(&command.args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.output())
                .await
                .map_err(|_| {
                    io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("`{}` did not finish within {:?}", command, limit),
                    )
                })??,
            None => child.output().await?,
        };

        let output = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        trace!(
            command = %command,
            status = ?output.status,
            stdout = %output.stdout,
            stderr = %output.stderr,
            "Command finished"
        );
        Ok(output)
    }
}

/// The three utilities a scan invokes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSet {
    /// Interface listing
    pub interfaces: CommandSpec,
    /// Broadcast ping, without the target address
    pub ping: CommandSpec,
    /// Neighbor table dump
    pub neighbors: CommandSpec,
}

impl CommandSet {
    /// Commands for a dialect, sending `ping_count` echo requests
    pub fn for_dialect(dialect: Dialect, ping_count: u32) -> Self {
        let count = ping_count.to_string();
        let ping = match dialect {
            // iputils refuses broadcast targets without -b
            Dialect::Linux => CommandSpec::new("ping").args(["-b", "-c", count.as_str()]),
            Dialect::Bsd => CommandSpec::new("ping").args(["-c", count.as_str()]),
        };

        Self {
            interfaces: CommandSpec::new("ifconfig"),
            ping,
            neighbors: CommandSpec::new("arp").args(["-a", "-n"]),
        }
    }

    /// Ping command aimed at `target`
    pub fn ping_to(&self, target: Ipv4Addr) -> CommandSpec {
        self.ping.clone().args([target.to_string()])
    }
}

impl Default for CommandSet {
    fn default() -> Self {
        Self::for_dialect(Dialect::default(), DEFAULT_PING_COUNT)
    }
}
