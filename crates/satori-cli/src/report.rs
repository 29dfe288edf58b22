//! Report files written next to the working directory.
//!
//! A solve over `foo.cnf` leaves `stats_foo.txt` behind, and on SAT also
//! `assgn_foo.txt` with the JSON assignment object.

use satori_format::Model;
use std::fs;
use std::path::{Path, PathBuf};

fn base_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string())
}

/// Path of the statistics report for `input`.
pub fn stats_path(input: &Path) -> PathBuf {
    PathBuf::from(format!("stats_{}.txt", base_stem(input)))
}

/// Path of the assignment report for `input`.
pub fn assignment_path(input: &Path) -> PathBuf {
    PathBuf::from(format!("assgn_{}.txt", base_stem(input)))
}

/// Writes a text report.
pub fn write_text(path: &Path, contents: &str) -> anyhow::Result<()> {
    fs::write(path, contents)?;
    Ok(())
}

/// Writes the assignment as a JSON object mapping each variable to its
/// value, in ascending variable order.
pub fn write_model(path: &Path, model: &Model) -> anyhow::Result<()> {
    fs::write(path, serde_json::to_string(model)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_paths_use_file_stem() {
        let input = Path::new("bench/uf50-01.cnf");
        assert_eq!(stats_path(input), PathBuf::from("stats_uf50-01.txt"));
        assert_eq!(assignment_path(input), PathBuf::from("assgn_uf50-01.txt"));
    }
}
