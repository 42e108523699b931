use std::path::PathBuf;

use anyhow::{Context, Result};
use chipexport::{
    ExportFormat, ExportOptions, LoopPoint, available_formats, decode_log, export, statistics,
};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod trace;
use trace::{read_trace_as_vec, write_export};

/// chipexport command line tools
#[derive(Parser)]
#[command(
    name = "chipexport",
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show write counts and duration of a trace (use '-' for stdin)
    Stats {
        /// Trace file to read (use '-' for stdin, .gz is decompressed)
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Sample rate the trace timestamps count in
        #[arg(long, default_value_t = chipexport::timing::DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,
    },
    /// List the formats able to carry a trace, or every format without FILE
    Formats {
        /// Trace file to read (use '-' for stdin, .gz is decompressed)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Convert a trace into a chip music file
    Export(ExportArgs),
    /// Show the memory layout of the embedded playback drivers
    Drivers,
}

#[derive(Args)]
struct ExportArgs {
    /// Trace file to read (use '-' for stdin, .gz is decompressed)
    #[arg(value_name = "FILE")]
    file: PathBuf,
    /// Target format tag (vgm, gym, nsf, gbs, spc, zsm, sap, tiuna)
    #[arg(short, long)]
    format: String,
    /// Output path (use '-' for stdout); defaults to a name derived from the title
    #[arg(short, long, value_name = "OUTPUT")]
    out: Option<PathBuf>,
    /// Gzip-compress the output (e.g. .vgz)
    #[arg(long)]
    gzip: bool,

    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    game: Option<String>,
    #[arg(long)]
    copyright: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    comment: Option<String>,

    /// Sample rate the trace timestamps count in
    #[arg(long)]
    sample_rate: Option<u32>,
    /// Playback frame rate in Hz for frame-based formats
    #[arg(long)]
    frame_rate: Option<u32>,
    /// Loop start on the source sample clock
    #[arg(long, conflicts_with = "loop_row")]
    loop_sample: Option<u64>,
    /// Loop start as a tracker row (needs --samples-per-row)
    #[arg(long, requires = "samples_per_row")]
    loop_row: Option<u32>,
    /// Samples per tracker row for --loop-row
    #[arg(long)]
    samples_per_row: Option<u32>,
    /// Write a raw GYM stream without the GYMX header
    #[arg(long)]
    no_gymx: bool,
}

impl ExportArgs {
    fn options(&self) -> ExportOptions {
        let loop_point = match (self.loop_sample, self.loop_row, self.samples_per_row) {
            (Some(sample), _, _) => Some(LoopPoint::Sample(sample)),
            (None, Some(row), Some(samples_per_row)) => Some(LoopPoint::Row {
                row,
                samples_per_row,
            }),
            _ => None,
        };
        ExportOptions {
            title: self.title.clone(),
            author: self.author.clone(),
            game: self.game.clone(),
            copyright: self.copyright.clone(),
            date: self.date.clone(),
            comment: self.comment.clone(),
            source_sample_rate: self.sample_rate,
            frame_rate: self.frame_rate,
            loop_point,
            gym_header: self.no_gymx.then_some(false),
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Stats { file, sample_rate } => {
            let bytes = read_trace_as_vec(&file)?;
            let writes = decode_log(&bytes);
            trace::stats(&file, &statistics(&writes), sample_rate);
        }
        Commands::Formats { file: Some(file) } => {
            let bytes = read_trace_as_vec(&file)?;
            let writes = decode_log(&bytes);
            trace::formats(&available_formats(&writes));
        }
        Commands::Formats { file: None } => {
            let all: Vec<_> = ExportFormat::ALL
                .into_iter()
                .map(ExportFormat::descriptor)
                .collect();
            trace::formats(&all);
        }
        Commands::Export(args) => {
            let bytes = read_trace_as_vec(&args.file)?;
            let result = export(&bytes, &args.format, &args.options())
                .with_context(|| format!("failed to export {}", args.file.display()))?;
            let out = match &args.out {
                Some(out) => out.clone(),
                None if args.gzip => PathBuf::from(format!("{}.gz", result.filename)),
                None => PathBuf::from(&result.filename),
            };
            write_export(&out, &result, args.gzip)?;
        }
        Commands::Drivers => {
            trace::drivers(&chipexport::driver::all());
        }
    }

    Ok(())
}
