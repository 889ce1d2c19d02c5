//! Timestamped tour artifacts.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use super::TourResult;
use crate::error::Result;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

pub fn timestamp(now: NaiveDateTime) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// `<dir>/<timestamp>_tour.<ext>`
pub fn artifact_path(dir: &Path, now: NaiveDateTime, ext: &str) -> PathBuf {
    dir.join(format!("{}_tour.{ext}", timestamp(now)))
}

/// Writes one numbered line per entry and returns the file's path.
pub fn write_text_artifact(result: &TourResult, dir: &Path, now: NaiveDateTime) -> Result<PathBuf> {
    let mut body = result.numbered().join("\n");
    body.push('\n');
    write_new(dir, now, "txt", body.as_bytes())
}

/// Writes a rendered SVG document and returns the file's path.
pub fn write_svg_artifact(svg: &str, dir: &Path, now: NaiveDateTime) -> Result<PathBuf> {
    write_new(dir, now, "svg", svg.as_bytes())
}

/// Creates the artifact without clobbering an earlier run from the same
/// second; later runs get a `-1`, `-2`, ... suffix.
fn write_new(dir: &Path, now: NaiveDateTime, ext: &str, contents: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let mut path = artifact_path(dir, now, ext);
    let mut attempt = 0u32;
    loop {
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(contents)?;
                log::info!("wrote {}", path.display());
                return Ok(path);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                attempt += 1;
                path = dir.join(format!("{}_tour-{attempt}.{ext}", timestamp(now)));
            }
            Err(e) => return Err(e.into()),
        }
    }
}
