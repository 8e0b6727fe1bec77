//! Where the report goes and how it is opened.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::NaiveDateTime;

use super::error::ReportError;

/// External spreadsheet-style viewer launched on the saved file.
pub const VIEWER: &str = "tabview";

/// Default report location: `<home>/trips/<from>_<dest>_<timestamp>.csv`.
///
/// `<dest>` is `<N>km` in radius mode, else the destination list, else `any`.
pub fn default_output_path(
    home: &Path,
    from: &str,
    to: Option<&str>,
    distance_km: u32,
    now: NaiveDateTime,
) -> PathBuf {
    let destination = if distance_km > 0 {
        format!("{distance_km}km")
    } else {
        match to.map(str::trim).filter(|t| !t.is_empty()) {
            Some(to) => to.replace(' ', "_"),
            None => "any".to_string(),
        }
    };

    let file_name = format!(
        "{}_{}_{}.csv",
        from.trim().replace(' ', "_"),
        destination,
        now.format("%Y%m%d_%H%M%S")
    );
    home.join("trips").join(file_name)
}

/// The user's home directory, from `$HOME`.
pub fn home_dir() -> Result<PathBuf, ReportError> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .ok_or(ReportError::NoHome)
}

/// Look `program` up on `PATH`.
pub fn find_on_path(program: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// Open `file` in the viewer if it is installed, with inherited stdio.
///
/// Returns whether the viewer was found.
pub fn open_in_viewer(file: &Path) -> Result<bool, ReportError> {
    let Some(viewer) = find_on_path(VIEWER) else {
        tracing::debug!("{VIEWER} not on PATH, not opening report");
        return Ok(false);
    };

    println!("Opening {VIEWER}...");
    let status = Command::new(&viewer)
        .arg(file)
        .status()
        .map_err(|source| ReportError::Viewer {
            viewer: viewer.display().to_string(),
            source,
        })?;

    if !status.success() {
        tracing::warn!(%status, "{VIEWER} exited unsuccessfully");
    }
    Ok(true)
}
