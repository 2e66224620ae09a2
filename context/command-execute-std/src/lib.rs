//! Blocking command execution for lawsend.
//!
//! `StdCommandExecute` implements the `CommandExecute` trait from `lawsend_core`
//! with [`std::process::Command`]. It is what lets the Azure CLI credential
//! provider shell out to `az`.
//!
//! ## Example
//!
//! ```no_run
//! use lawsend_core::Context;
//! use lawsend_command_execute_std::StdCommandExecute;
//!
//! let ctx = Context::new().with_command_execute(StdCommandExecute);
//!
//! match ctx.command_execute("az", &["version"]) {
//!     Ok(output) if output.success() => {
//!         println!("{}", String::from_utf8_lossy(&output.stdout));
//!     }
//!     Ok(output) => eprintln!("az exited with {}", output.status),
//!     Err(e) => eprintln!("failed to execute command: {e}"),
//! }
//! ```

use lawsend_core::{CommandExecute, CommandOutput, Error, Result};
use log::debug;
use std::process::{Command, Stdio};

/// std::process based implementation of the `CommandExecute` trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdCommandExecute;

impl CommandExecute for StdCommandExecute {
    fn command_execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        debug!("executing command: {program} {}", args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                Error::unexpected(format!("failed to execute command '{program}'")).with_source(e)
            })?;

        Ok(CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
