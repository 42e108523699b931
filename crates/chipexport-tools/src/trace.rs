use std::fs::File;
use std::io::{Read, Write, stdin, stdout};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chipexport::driver::EmbeddedDriver;
use chipexport::{ExportResult, FormatDescriptor, TraceStats};
use comfy_table::{Cell, ContentArrangement, Table, presets::NOTHING};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use unicode_width::UnicodeWidthStr;

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Pad a &str to a target display width (columns) using unicode-width so
/// fullwidth titles (e.g. Japanese) stay aligned.
fn pad_to_width(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

fn gunzip(bytes: &[u8], what: &str) -> anyhow::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .with_context(|| format!("failed to decompress gzip data from {what}"))?;
    Ok(out)
}

/// Read trace bytes from a path or stdin ('-') into a Vec<u8>.
///
/// For regular files, a `.gz` extension means gzip-compressed input. For
/// stdin, gzipped content is detected via gzip magic bytes (0x1F 0x8B) and
/// decompressed automatically.
pub fn read_trace_as_vec(path: &PathBuf) -> anyhow::Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut inbuf = Vec::new();
        stdin()
            .read_to_end(&mut inbuf)
            .context("failed to read from stdin")?;
        if inbuf.starts_with(&GZIP_MAGIC) {
            tracing::debug!("stdin is gzip compressed");
            gunzip(&inbuf, "stdin")
        } else {
            Ok(inbuf)
        }
    } else {
        let mut f = File::open(path)
            .with_context(|| format!("failed to open input file: {}", path.display()))?;
        let mut inbuf = Vec::new();
        f.read_to_end(&mut inbuf)
            .context("failed to read input file")?;

        let is_gz = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
        if is_gz {
            gunzip(&inbuf, &path.display().to_string())
        } else {
            Ok(inbuf)
        }
    }
}

/// Write an export to `path` ('-' for stdout), gzip-compressed when asked.
pub fn write_export(path: &Path, result: &ExportResult, gzip: bool) -> anyhow::Result<()> {
    let bytes = if gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
        encoder
            .write_all(&result.bytes)
            .context("failed to compress output")?;
        encoder.finish().context("failed to compress output")?
    } else {
        result.bytes.clone()
    };

    if path == Path::new("-") {
        let mut handle = stdout().lock();
        handle
            .write_all(&bytes)
            .context("failed to write to stdout")?;
        handle.flush().context("failed to write to stdout")?;
    } else {
        std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write output file: {}", path.display()))?;
        eprintln!(
            "\"{}\": {} ({} bytes)",
            path.display(),
            result.format,
            bytes.len()
        );
    }
    Ok(())
}

/// Print a two-column key/value summary, expanding multi-line values.
fn display_rows(rows: &[(String, String)]) {
    let mut col0 = UnicodeWidthStr::width("Field");
    let mut col1 = UnicodeWidthStr::width("Value");
    for (k, v) in rows {
        col0 = col0.max(UnicodeWidthStr::width(k.as_str()));
        for line in v.split('\n') {
            col1 = col1.max(UnicodeWidthStr::width(line));
        }
    }

    println!(
        "{}  {}",
        pad_to_width("Field", col0),
        pad_to_width("Value", col1)
    );
    for (k, v) in rows {
        for (i, line) in v.split('\n').enumerate() {
            let key = if i == 0 { k.as_str() } else { "" };
            println!("{}  {}", pad_to_width(key, col0), pad_to_width(line, col1));
        }
    }
}

/// Show trace statistics: totals, duration and per-chip write counts.
pub fn stats(path: &Path, stats: &TraceStats, sample_rate: u32) {
    let seconds = stats.duration_samples as f64 / sample_rate.max(1) as f64;
    let chips = if stats.chips.is_empty() {
        "(none)".to_string()
    } else {
        stats
            .chips
            .iter()
            .map(|chip| format!("{:<24} {}", chip.name, chip.writes))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let rows = vec![
        ("file".to_string(), path.display().to_string()),
        ("writes".to_string(), stats.total_writes.to_string()),
        (
            "duration".to_string(),
            format!(
                "{} samples ({:.3} s @ {}Hz)",
                stats.duration_samples, seconds, sample_rate
            ),
        ),
        ("chips".to_string(), chips),
    ];
    display_rows(&rows);
}

/// List format descriptors as a table.
pub fn formats(descriptors: &[&FormatDescriptor]) {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Tag"),
        Cell::new("Format"),
        Cell::new("MIME type"),
        Cell::new("Chips"),
    ]);
    for descriptor in descriptors {
        let chips = descriptor
            .chips
            .iter()
            .map(|chip| chip.name())
            .collect::<Vec<_>>();
        let chips = if chips.len() > 4 {
            format!("{} chips", chips.len())
        } else {
            chips.join(", ")
        };
        table.add_row(vec![
            Cell::new(descriptor.extension),
            Cell::new(descriptor.name),
            Cell::new(descriptor.mime_type),
            Cell::new(chips),
        ]);
    }
    println!("{table}");
}

/// Show the memory layout of the embedded drivers.
pub fn drivers(drivers: &[&EmbeddedDriver]) {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("CPU"),
        Cell::new("Load"),
        Cell::new("INIT"),
        Cell::new("PLAY"),
        Cell::new("Data"),
        Cell::new("Capacity"),
        Cell::new("Patch sites"),
    ]);
    for driver in drivers {
        table.add_row(vec![
            Cell::new(driver.cpu.name()),
            Cell::new(format!("${:04X}", driver.load_address)),
            Cell::new(format!("${:04X}", driver.init_address())),
            Cell::new(format!("${:04X}", driver.play_address())),
            Cell::new(format!("${:04X}", driver.data_start())),
            Cell::new(format!("{} bytes", driver.data_capacity())),
            Cell::new(driver.patch_sites.len()),
        ]);
    }
    println!("{table}");
}
