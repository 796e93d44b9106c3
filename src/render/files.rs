//! Sidecar files (PNG images, TSV tables) written next to the TeX output.

use std::fs;
use std::path::{Path, PathBuf};

use camino::Utf8PathBuf;

use crate::errors::{Error, Result};
use crate::log::debug;

use super::context::CompileState;

/// Where a sidecar lives on disk and how the TeX code refers to it
#[derive(Clone, Debug, PartialEq)]
pub struct Sidecar {
    pub path: PathBuf,
    pub rel: Utf8PathBuf,
}

fn sidecar_for(ctx: &CompileState, dir: &Path, index: i64, ext: &str) -> Sidecar {
    let file_name = format!("{}-{:03}.{}", ctx.base_name, index, ext);
    let rel = match &ctx.rel_data_path {
        Some(prefix) => prefix.join(&file_name),
        None => Utf8PathBuf::from(file_name),
    };
    Sidecar {
        path: dir.join(rel.as_std_path()),
        rel,
    }
}

/// Reserve the next sidecar name of a kind.
///
/// Each kind counts from 0. Unless externals may be overridden, indices whose
/// file already exists are skipped.
pub fn new_sidecar(ctx: &mut CompileState, kind: &str, ext: &str) -> Result<Sidecar> {
    let dir = ctx.sidecar_dir()?;
    let mut index = ctx.file_counters.get(kind).copied().unwrap_or(-1) + 1;
    let mut sidecar = sidecar_for(ctx, &dir, index, ext);
    if !ctx.override_externals {
        while sidecar.path.is_file() {
            index += 1;
            sidecar = sidecar_for(ctx, &dir, index, ext);
        }
    }
    ctx.file_counters.insert(kind.to_string(), index);
    debug!(kind, path = %sidecar.path.display(), "reserved sidecar");
    Ok(sidecar)
}

/// Write bytes to a sidecar, creating its directory if needed.
pub fn write_sidecar(sidecar: &Sidecar, contents: &[u8]) -> Result<()> {
    if let Some(dir) = sidecar.path.parent() {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    fs::write(&sidecar.path, contents).map_err(|e| Error::io(&sidecar.path, e))
}
