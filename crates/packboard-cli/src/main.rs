//! packboard CLI - terminal dashboard for instrumented builds
//!
//! Usage:
//!   packboard                         Listen for a producer and render
//!   packboard -- npm run dev          Also spawn the build command,
//!                                     piping its output into the log pane
//!   packboard -m -p 9839 -- make      Minimal mode on a custom port

use anyhow::Result;
use clap::Parser;
use packboard_core::{retry_with_delay, DashboardOptions, Message, DEFAULT_PORT};
use packboard_plugin::{MessageSink, SocketSink};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::process::Command;
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

const CONNECT_ATTEMPTS: usize = 10;
const CONNECT_DELAY: Duration = Duration::from_millis(200);

#[derive(Parser)]
#[command(name = "packboard")]
#[command(author, version, about = "Terminal dashboard for instrumented builds")]
struct Cli {
    /// Border and accent color theme
    #[arg(short, long, default_value = "green")]
    color: String,

    /// Suppress analysis panels, keeping only log/status/progress
    #[arg(short, long)]
    minimal: bool,

    /// Dashboard title
    #[arg(short, long)]
    title: Option<String>,

    /// Host to listen on
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Restrict analysis to matching asset names (literal prefix or glob)
    #[arg(short = 'a', long = "include-assets", value_name = "PATTERN")]
    include_assets: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Build command to spawn, after `--`
    #[arg(last = true)]
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout belongs to the TUI.
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = DashboardOptions {
        color: cli.color,
        minimal: cli.minimal,
        title: cli.title,
        host: cli.host,
        port: cli.port,
        include_assets: cli.include_assets,
    };

    if !cli.command.is_empty() {
        let host = options.host.clone();
        let port = options.port;
        let command = cli.command;
        tokio::spawn(async move {
            if let Err(e) = forward_build_output(command, &host, port).await {
                warn!("build command failed: {}", e);
            }
        });
    }

    packboard_dashboard::run(options).await?;
    Ok(())
}

/// Spawn the build command and pipe its output into the dashboard
///
/// The child's stdout and stderr arrive in the log pane as ordinary `log`
/// messages over the same socket any producer would use.
async fn forward_build_output(command: Vec<String>, host: &str, port: u16) -> Result<()> {
    let Some((program, args)) = command.split_first() else {
        return Ok(());
    };

    // The dashboard binds its socket right after startup; retry briefly.
    let connected = retry_with_delay(
        "connect to dashboard",
        CONNECT_ATTEMPTS,
        CONNECT_DELAY,
        || SocketSink::connect(host, port),
    )
    .await;
    let Some((sink, _handshake)) = connected else {
        anyhow::bail!("dashboard socket never came up on {}:{}", host, port);
    };
    let sink = Arc::new(sink);

    let mut child = Command::new(program)
        .args(args)
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    if let Some(stdout) = child.stdout.take() {
        let sink = Arc::clone(&sink);
        tokio::spawn(forward_lines(BufReader::new(stdout).lines(), sink));
    }
    if let Some(stderr) = child.stderr.take() {
        let sink = Arc::clone(&sink);
        tokio::spawn(forward_lines(BufReader::new(stderr).lines(), sink));
    }

    let status = child.wait().await?;
    sink.send(vec![Message::log(format!("build command exited: {}", status))]);
    Ok(())
}

async fn forward_lines<R>(mut lines: Lines<R>, sink: Arc<SocketSink>)
where
    R: AsyncBufRead + Unpin,
{
    while let Ok(Some(line)) = lines.next_line().await {
        sink.send(vec![Message::log(line)]);
    }
}
