//! Diagnostic subprocess capture with a bounded wait.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

/// Error type for diagnostic command capture.
///
/// Gateway resolution degrades every variant to "unavailable"; the
/// advanced view shows the message instead of the dump.
#[derive(Debug, Error)]
pub enum DiagnosticError {
    /// The process could not be started.
    #[error("Failed to start process '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The process did not finish within the wait bound.
    #[error("Process timed out after {}s", .0.as_secs_f32())]
    TimedOut(Duration),

    /// The process exited unsuccessfully.
    #[error("Process exited with {0}")]
    Exit(ExitStatus),

    /// The process produced no output.
    #[error("Process produced no output")]
    EmptyOutput,
}

/// Trait for capturing a textual diagnostic dump.
///
/// # Design
///
/// Abstracts the subprocess so the gateway resolver can be tested with
/// canned dumps instead of spawning real processes.
pub trait DiagnosticSource: Send + Sync {
    /// Captures the dump's standard output as text.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticError`] when the process cannot start, exits
    /// unsuccessfully, produces nothing, or exceeds its wait bound.
    fn capture(&self) -> impl std::future::Future<Output = Result<String, DiagnosticError>> + Send;
}

/// Runs an external command and captures its standard output.
///
/// The child is killed if the wait bound expires.
///
/// # Example
///
/// ```no_run
/// use netid::gateway::{CommandDump, DiagnosticSource};
/// use std::time::Duration;
///
/// # async fn example() {
/// let dump = CommandDump::new("ipconfig", Vec::<String>::new(), Duration::from_secs(5));
/// match dump.capture().await {
///     Ok(text) => println!("{text}"),
///     Err(e) => eprintln!("{e}"),
/// }
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDump {
    program: String,
    args: Vec<String>,
    wait: Duration,
}

impl CommandDump {
    /// Creates a new command dump.
    #[must_use]
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
        wait: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            wait,
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

    /// Returns the wait bound.
    #[must_use]
    pub const fn wait(&self) -> Duration {
        self.wait
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        // CREATE_NO_WINDOW: no console flashes up for the child.
        #[cfg(windows)]
        command.creation_flags(0x0800_0000);

        command
    }
}

impl DiagnosticSource for CommandDump {
    async fn capture(&self) -> Result<String, DiagnosticError> {
        let child = self
            .command()
            .spawn()
            .map_err(|source| DiagnosticError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let output = tokio::time::timeout(self.wait, child.wait_with_output())
            .await
            .map_err(|_| DiagnosticError::TimedOut(self.wait))?
            .map_err(|source| DiagnosticError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DiagnosticError::Exit(output.status));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        if text.trim().is_empty() {
            return Err(DiagnosticError::EmptyOutput);
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_collects_args() {
        let dump = CommandDump::new("ipconfig", ["/all"], Duration::from_secs(5));

        assert_eq!(dump.program(), "ipconfig");
        assert_eq!(dump.args(), ["/all".to_string()]);
        assert_eq!(dump.wait(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let dump = CommandDump::new(
            "netid-definitely-not-a-real-program",
            Vec::<String>::new(),
            Duration::from_secs(5),
        );

        let result = dump.capture().await;

        assert!(matches!(result, Err(DiagnosticError::Spawn { .. })));
    }

    #[test]
    fn timed_out_displays_wait() {
        let error = DiagnosticError::TimedOut(Duration::from_secs(5));
        assert_eq!(error.to_string(), "Process timed out after 5s");
    }

    #[cfg(unix)]
    mod unix {
        use super::*;

        #[tokio::test]
        async fn captures_stdout() {
            let dump = CommandDump::new("echo", ["Default Gateway : 10.0.0.1"], Duration::from_secs(5));

            let text = dump.capture().await.unwrap();

            assert_eq!(text.trim(), "Default Gateway : 10.0.0.1");
        }

        #[tokio::test]
        async fn non_zero_exit_is_error() {
            let dump = CommandDump::new("false", Vec::<String>::new(), Duration::from_secs(5));
            assert!(matches!(dump.capture().await, Err(DiagnosticError::Exit(_))));
        }

        #[tokio::test]
        async fn silent_success_is_empty_output() {
            let dump = CommandDump::new("true", Vec::<String>::new(), Duration::from_secs(5));
            assert!(matches!(
                dump.capture().await,
                Err(DiagnosticError::EmptyOutput)
            ));
        }

        #[tokio::test]
        async fn slow_process_times_out() {
            let dump = CommandDump::new("sleep", ["5"], Duration::from_millis(100));
            assert!(matches!(
                dump.capture().await,
                Err(DiagnosticError::TimedOut(_))
            ));
        }
    }
}
