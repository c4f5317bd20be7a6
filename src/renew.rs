//! Fire-and-forget address renewal.

use std::process::{Child, Command, Stdio};

/// An elevated lease-renewal command.
///
/// [`trigger`](Self::trigger) spawns the command detached and returns
/// immediately. The child's outcome is never observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenewCommand {
    program: String,
    args: Vec<String>,
}

impl RenewCommand {
    /// Creates a renewal command.
    #[must_use]
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the program name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the program arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Starts the renewal and returns without waiting.
    ///
    /// A spawn failure is logged at debug level and otherwise ignored.
    pub fn trigger(&self) {
        match self.spawn() {
            Ok(child) => tracing::debug!("Started '{}' (pid {})", self.program, child.id()),
            Err(e) => tracing::debug!("Failed to start '{}': {e}", self.program),
        }
    }

    fn spawn(&self) -> std::io::Result<Child> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            // CREATE_NO_WINDOW
            command.creation_flags(0x0800_0000);
        }

        command.spawn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_collects_args() {
        let cmd = RenewCommand::new("pkexec", ["dhclient"]);

        assert_eq!(cmd.program(), "pkexec");
        assert_eq!(cmd.args(), ["dhclient".to_string()]);
    }

    #[test]
    fn trigger_with_missing_program_does_not_panic() {
        let cmd = RenewCommand::new("netid-test-no-such-program", Vec::<String>::new());

        cmd.trigger();
        assert!(cmd.spawn().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn spawn_runs_program_detached() {
        let cmd = RenewCommand::new("true", Vec::<String>::new());

        let mut child = cmd.spawn().unwrap();

        assert!(child.wait().unwrap().success());
    }

    #[cfg(unix)]
    #[test]
    fn trigger_returns_before_child_exits() {
        let cmd = RenewCommand::new("sleep", ["5"]);
        let start = std::time::Instant::now();

        cmd.trigger();

        assert!(start.elapsed() < std::time::Duration::from_secs(5));
    }
}
