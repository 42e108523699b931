use std::path::PathBuf;

use chipexport::{ExportOptions, ExportResult, RegisterWrite, encode_log, export};

/// Optional output directory for exported test files (relative to the crate root).
///
/// Behavior:
/// - If the environment variable `CHIPEXPORT_TEST_OUTPUT` is set to a non-empty
///   path, that path is used.
/// - If the env var is not set or is empty, the function returns `None` (no output).
///
/// Usage:
/// - Enable output only when needed: CHIPEXPORT_TEST_OUTPUT=assets/export cargo test
pub fn output_dir() -> Option<PathBuf> {
    match std::env::var("CHIPEXPORT_TEST_OUTPUT") {
        Ok(s) if !s.is_empty() => Some(PathBuf::from(s)),
        _ => None,
    }
}

pub fn maybe_write_export(result: &ExportResult) {
    if let Some(dir) = output_dir() {
        let manifest = env!("CARGO_MANIFEST_DIR");
        let out_dir = std::path::Path::new(manifest).join(dir);
        if let Err(e) = std::fs::create_dir_all(&out_dir) {
            eprintln!("warning: could not create output dir {:?}: {}", out_dir, e);
        } else {
            let out_path = out_dir.join(&result.filename);
            if let Err(e) = std::fs::write(&out_path, &result.bytes) {
                eprintln!("warning: failed to write export {:?}: {}", out_path, e);
            } else {
                eprintln!("Wrote test export to {:?}", out_path);
            }
        }
    }
}

/// Export `writes` as `format`, titled `title`, and keep a copy when asked to.
pub fn export_titled(
    writes: &[RegisterWrite],
    format: &str,
    title: &str,
    options: ExportOptions,
) -> ExportResult {
    let options = ExportOptions {
        title: Some(title.to_string()),
        ..options
    };
    let result = export(&encode_log(writes), format, &options).unwrap();
    maybe_write_export(&result);
    result
}

pub fn u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

pub fn u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

/// NUL-terminated ASCII field.
pub fn ascii_at(bytes: &[u8], offset: usize, len: usize) -> String {
    let field = &bytes[offset..offset + len];
    let end = field.iter().position(|&b| b == 0).unwrap_or(len);
    String::from_utf8_lossy(&field[..end]).into_owned()
}

#[path = "format/vgm.rs"]
mod vgm;

#[path = "format/gym.rs"]
mod gym;

#[path = "format/nsf.rs"]
mod nsf;

#[path = "format/gbs.rs"]
mod gbs;

#[path = "format/spc.rs"]
mod spc;

#[path = "format/zsm.rs"]
mod zsm;

#[path = "format/sap.rs"]
mod sap;

#[path = "format/tiuna.rs"]
mod tiuna;
