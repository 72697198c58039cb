use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};
use kaka_config::KakaConfig;
use kaka_cookie::{FilterMode, RequestContext, RequestId, RequestSlot};
use kaka_telemetry::{EventLogger, MetricsRecorder};
use opentelemetry::KeyValue;
use tracing::{info, warn};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "kaka", version, about)]
pub struct Cli {
    /// Configuration file; without it config/kaka.yaml and KAKA_* variables apply
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn wants_metrics(&self) -> bool {
        matches!(&self.command, Commands::Replay(args) if args.metrics)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a header and print one name=value line per cookie
    Parse(ParseArgs),
    /// Keep or drop the listed cookies and print the rendered header
    Filter(FilterArgs),
    /// Render a header into a bounded buffer; fails if it does not fit
    Render(RenderArgs),
    /// Serve every line of a file as one request's Cookie header
    Replay(ReplayArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    pub header: String,
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("mode").required(true).args(["keep", "drop"])))]
pub struct FilterArgs {
    pub header: String,
    /// Comma separated names to keep
    #[arg(long)]
    pub keep: Option<String>,
    /// Comma separated names to drop
    #[arg(long)]
    pub drop: Option<String>,
}

impl FilterArgs {
    fn mode(&self) -> (&str, FilterMode) {
        match (&self.keep, &self.drop) {
            (Some(list), _) => (list.as_str(), FilterMode::KeepOnly),
            (None, Some(list)) => (list.as_str(), FilterMode::Drop),
            (None, None) => ("", FilterMode::KeepOnly),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    pub header: String,
    /// Output buffer size in bytes, terminator included
    #[arg(long)]
    pub buffer: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    pub file: PathBuf,
    /// Print prometheus metrics after the last request
    #[arg(long)]
    pub metrics: bool,
}

pub fn run_command(
    command: Commands,
    config: &KakaConfig,
    metrics: Option<&MetricsRecorder>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut slot = RequestSlot::from_config(config);

    match command {
        Commands::Parse(args) => {
            let ctx = request(&mut slot, RequestId(1), metrics);
            run_parse(ctx, &args.header, out)
        }
        Commands::Filter(args) => {
            let ctx = request(&mut slot, RequestId(1), metrics);
            run_filter(ctx, &args, config.render.buffer_size, out)
        }
        Commands::Render(args) => {
            let buffer = args.buffer.unwrap_or(config.render.buffer_size);
            let ctx = request(&mut slot, RequestId(1), metrics);
            run_render(ctx, &args.header, buffer, out)
        }
        Commands::Replay(args) => {
            let reader = BufReader::new(File::open(&args.file)?);
            run_replay(&mut slot, reader, config.render.buffer_size, metrics, out)?;
            if let (true, Some(metrics)) = (args.metrics, metrics) {
                out.write_all(metrics.gather_metrics()?.as_bytes())?;
            }
            Ok(())
        }
    }
}

fn request<'r>(
    slot: &'r mut RequestSlot,
    id: RequestId,
    metrics: Option<&'r MetricsRecorder>,
) -> RequestContext<'r> {
    let ctx = slot.acquire(id);
    match metrics {
        Some(metrics) => ctx.with_metrics(metrics),
        None => ctx,
    }
}

fn run_parse(
    mut ctx: RequestContext<'_>,
    header: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let report = ctx.parse(Some(header))?;
    for entry in ctx.store() {
        writeln!(out, "{}={}", entry.name(), entry.value())?;
    }
    info!(
        parsed = report.parsed,
        malformed = report.malformed,
        oversized = report.oversized,
        "header parsed"
    );
    Ok(())
}

fn run_filter(
    mut ctx: RequestContext<'_>,
    args: &FilterArgs,
    limit: usize,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let (list, mode) = args.mode();
    ctx.parse(Some(args.header.as_str()))?;
    let removed = ctx.filter(list, mode);
    info!(removed, ?mode, "header filtered");
    writeln!(out, "{}", ctx.render_to_string(limit)?)?;
    Ok(())
}

fn run_render(
    mut ctx: RequestContext<'_>,
    header: &str,
    buffer: usize,
    out: &mut impl Write,
) -> Result<(), CliError> {
    ctx.parse(Some(header))?;
    let mut buf = vec![0u8; buffer];
    let written = ctx.render(&mut buf)?;
    out.write_all(&buf[..written])?;
    writeln!(out)?;
    Ok(())
}

/// Serves each line as a new request on `slot`, ids counting up from 1.
///
/// A request that fails is reported on its own output line and the replay
/// moves on. Returns the number of requests that rendered.
pub fn run_replay(
    slot: &mut RequestSlot,
    reader: impl BufRead,
    limit: usize,
    metrics: Option<&MetricsRecorder>,
    out: &mut impl Write,
) -> Result<usize, CliError> {
    let mut rendered = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let id = RequestId(index as u64 + 1);
        let mut ctx = request(slot, id, metrics);

        let result = ctx
            .parse(Some(line.as_str()))
            .and_then(|_| ctx.render_to_string(limit));
        match result {
            Ok(header) => {
                EventLogger::log_event(
                    "request_rendered",
                    &[
                        KeyValue::new("request_id", id.0 as i64),
                        KeyValue::new("cookies", ctx.store().len() as i64),
                        KeyValue::new("arena_used", ctx.arena().used() as i64),
                    ],
                );
                writeln!(out, "{header}")?;
                rendered += 1;
            }
            Err(err) => {
                warn!(request_id = %id, error = %err, "request failed");
                writeln!(out, "# request {id}: {err}")?;
            }
        }
    }

    slot.finish();
    Ok(rendered)
}
