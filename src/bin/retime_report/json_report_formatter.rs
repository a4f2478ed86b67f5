use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use caption_retime::Report;

pub fn write_report(path: &Path, report: &Report) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            format!(
                "Failed to create report output directory '{}': {err}",
                parent.display()
            )
        })?;
    }

    let mut file = File::create(path)
        .map_err(|err| format!("Failed to create report file '{}': {err}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, report)
        .map_err(|err| format!("Failed to serialize report '{}': {err}", path.display()))?;
    file.write_all(b"\n")
        .map_err(|err| format!("Failed to finalize report file '{}': {err}", path.display()))?;
    Ok(())
}

pub fn print_report(report: &Report) -> Result<(), String> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, report)
        .map_err(|err| format!("Failed to serialize report to stdout: {err}"))?;
    handle
        .write_all(b"\n")
        .map_err(|err| format!("Failed to write report to stdout: {err}"))?;
    Ok(())
}
