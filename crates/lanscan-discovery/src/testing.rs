//! Canned command output for probe tests

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

use crate::command::{CommandOutput, CommandRunner, CommandSpec};

pub(crate) const IFCONFIG: &str = "\
lo        Link encap:Local Loopback
          inet addr:127.0.0.1  Mask:255.0.0.0

eth0      Link encap:Ethernet  HWaddr AA:BB:CC:DD:EE:FF
          inet addr:192.168.0.10  Bcast:192.168.0.255  Mask:255.255.255.0
          UP BROADCAST RUNNING MULTICAST  MTU:1500  Metric:1
";

pub(crate) const PING: &str = "\
PING 192.168.0.255 (192.168.0.255) 56(84) bytes of data.
64 bytes from 192.168.0.1: icmp_seq=1 ttl=64 time=0.412 ms
64 bytes from 192.168.0.20: icmp_seq=1 ttl=64 time=1.03 ms

--- 192.168.0.255 ping statistics ---
5 packets transmitted, 3 received, 40% packet loss, time 4006ms
";

pub(crate) const PING_NO_REPLY: &str = "\
PING 192.168.0.255 (192.168.0.255) 56(84) bytes of data.

--- 192.168.0.255 ping statistics ---
5 packets transmitted, 0 received, 100% packet loss, time 4090ms
";

pub(crate) const PING_WARNING: &str = "WARNING: pinging broadcast address\n";

pub(crate) const ARP: &str = "\
? (192.168.0.1) at 11:22:33:44:55:66 [ether] on eth0
? (192.168.0.20) at 66:55:44:33:22:11 [ether] on eth0
";

/// Replays fixed output per program name and records every invocation
#[derive(Default)]
pub(crate) struct ScriptedRunner {
    replies: HashMap<String, Result<CommandOutput, io::ErrorKind>>,
    calls: RefCell<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(mut self, program: &str, stdout: &str, stderr: &str) -> Self {
        self.replies.insert(
            program.to_string(),
            Ok(CommandOutput {
                status: Some(0),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            }),
        );
        self
    }

    pub(crate) fn fail(mut self, program: &str, kind: io::ErrorKind) -> Self {
        self.replies.insert(program.to_string(), Err(kind));
        self
    }

    /// A runner where every stage succeeds
    pub(crate) fn healthy() -> Self {
        Self::new()
            .reply("ifconfig", IFCONFIG, "")
            .reply("ping", PING, PING_WARNING)
            .reply("arp", ARP, "")
    }

    pub(crate) fn programs_called(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.program.clone()).collect()
    }

    pub(crate) fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &CommandSpec) -> io::Result<CommandOutput> {
        self.calls.borrow_mut().push(command.clone());
        match self.replies.get(&command.program) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(kind)) => Err(io::Error::from(*kind)),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }
}
