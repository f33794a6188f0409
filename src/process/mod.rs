//! Child process spawning with live output relaying
//!
//! Both output streams of the child are consumed by asynchronous line-reader
//! tasks and forwarded to the invoking terminal as lines arrive. A spinner
//! indicates progress until the child produces its first output.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;

/// Spinner shown until the first output line arrives
pub fn build_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Run `cmd` to completion, relaying its stdout and stderr line-by-line.
///
/// The spinner is cleared as soon as the child produces any output, and
/// unconditionally once the child exits. The child is not sent any shutdown
/// signal; killing the parent terminates it implicitly.
pub async fn run_streaming(mut cmd: Command, spinner: ProgressBar) -> Result<ExitStatus> {
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    let mut child = cmd.spawn().context("Failed to spawn child process")?;

    let mut relays: Vec<JoinHandle<()>> = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        relays.push(tokio::spawn(relay_lines(stdout, spinner.clone())));
    }
    if let Some(stderr) = child.stderr.take() {
        relays.push(tokio::spawn(relay_lines(stderr, spinner.clone())));
    }

    let status = child
        .wait()
        .await
        .context("Failed to wait for child process")?;

    // Drain whatever the readers have not forwarded yet.
    for relay in relays {
        let _ = relay.await;
    }
    spinner.finish_and_clear();

    Ok(status)
}

/// Forward every line of `stream` to stdout, stopping the spinner on the
/// first one.
async fn relay_lines<R>(stream: R, spinner: ProgressBar)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut lines = BufReader::new(stream).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        if !spinner.is_finished() {
            spinner.finish_and_clear();
        }
        println!("{line}");
    }
}
