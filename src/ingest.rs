// ingest.rs
use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::ParticipantRow;

/// Lists the entry names of a directory, sorted, for diagnostics.
pub fn list_directory(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read directory {:?}", dir))? {
        let entry = entry.with_context(|| format!("Failed to read entry in {:?}", dir))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

/// Finds the participant CSV files in `source_dir`, sorted by file name.
/// Files must be named so that lexicographic order is processing order.
pub fn find_participant_files(source_dir: &Path, prefix: &str, suffix: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(source_dir)
        .with_context(|| format!("Failed to read source directory {:?}", source_dir))?;

    let mut matches: Vec<(String, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {:?}", source_dir))?;
        let file_name = match entry.file_name().to_str() {
            Some(name) => name.to_string(),
            None => continue,
        };
        if !file_name.starts_with(prefix) || !file_name.ends_with(suffix) {
            continue;
        }
        if !entry.path().is_file() {
            debug!("Skipping non-file entry {:?}", entry.path());
            continue;
        }
        matches.push((file_name, entry.path()));
    }

    matches.sort_by(|a, b| a.0.cmp(&b.0));
    info!(
        "Found participants files: {:?}",
        matches.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>()
    );
    Ok(matches.into_iter().map(|(_, path)| path).collect())
}

const REQUIRED_COLUMNS: [&str; 3] = ["name", "role", "space_url"];

/// Parses one participants CSV file. Any bad record fails the whole file.
/// Rows may leave out trailing optional cells.
pub fn read_participant_rows(path: &Path) -> Result<Vec<ParticipantRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open participants file {:?}", path))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header row of {:?}", path))?
        .clone();
    if headers.is_empty() {
        bail!("Participants file {:?} has no header row", path);
    }
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            bail!("Participants file {:?} is missing required column '{}'", path, column);
        }
    }

    let mut rows = Vec::new();
    for (idx, record) in reader.deserialize::<ParticipantRow>().enumerate() {
        let row = record.with_context(|| format!("Failed to parse record {} in {:?}", idx + 1, path))?;
        if let Some(field) = row.blank_required_field() {
            bail!("Record {} in {:?} has an empty '{}' field", idx + 1, path, field);
        }
        rows.push(row);
    }
    debug!("Read {} rows from {:?}", rows.len(), path);
    Ok(rows)
}

/// Reads every file in order and concatenates their rows.
pub fn read_all_rows(files: &[PathBuf]) -> Result<Vec<ParticipantRow>> {
    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(ProgressStyle::with_template(
        "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>4}/{len:4} participants files",
    )?);

    let mut all_rows = Vec::new();
    for file in files {
        info!("Processing {:?}...", file.file_name().unwrap_or(file.as_os_str()));
        let rows = read_participant_rows(file)?;
        all_rows.extend(rows);
        progress.inc(1);
    }
    progress.finish_and_clear();

    info!("Read {} participant rows from {} files.", all_rows.len(), files.len());
    Ok(all_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    #[test]
    fn finds_matching_files_in_lexicographic_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_file(dir.path(), "participants_2024-02-01.csv", "name,role,space_url\n");
        write_file(dir.path(), "participants_2024-01-15.csv", "name,role,space_url\n");
        write_file(dir.path(), "spaces_2024-01-15.csv", "x\n");
        write_file(dir.path(), "participants_notes.txt", "x\n");
        fs::create_dir(dir.path().join("participants_dir.csv")).expect("mkdir");

        let files = find_participant_files(dir.path(), "participants_", ".csv").expect("find files");
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["participants_2024-01-15.csv", "participants_2024-02-01.csv"]);
    }

    #[test]
    fn missing_source_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope");
        let err = find_participant_files(&missing, "participants_", ".csv").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read source directory"));
    }

    #[test]
    fn twitter_link_column_is_optional() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_file(
            dir.path(),
            "participants_a.csv",
            "name,role,space_url\nAlice,Host,https://x.com/i/spaces/1\n",
        );
        let rows = read_participant_rows(&path).expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Alice");
        assert_eq!(rows[0].role, "Host");
        assert_eq!(rows[0].twitter_link, None);
    }

    #[test]
    fn short_row_without_trailing_twitter_link_is_accepted() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_file(
            dir.path(),
            "participants_a.csv",
            "name,role,space_url,twitter_link\nA,host,s1,https://t/a\nB,speaker,s1\n",
        );
        let rows = read_participant_rows(&path).expect("rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].twitter_handle(), Some("https://t/a"));
        assert_eq!(rows[1].name, "B");
        assert_eq!(rows[1].twitter_handle(), None);
    }

    #[test]
    fn short_row_missing_required_cell_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_file(dir.path(), "participants_a.csv", "name,role,space_url\nA,host\n");
        let err = read_participant_rows(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse record 1"));
    }

    #[test]
    fn empty_file_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_file(dir.path(), "participants_a.csv", "");
        let err = read_participant_rows(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("has no header row"));
    }

    #[test]
    fn header_only_file_missing_required_column_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_file(dir.path(), "participants_a.csv", "name,space_url\n");
        let err = read_participant_rows(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("missing required column 'role'"));
    }

    #[test]
    fn header_only_file_with_required_columns_has_no_rows() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_file(dir.path(), "participants_a.csv", "name,role,space_url,twitter_link\n");
        assert!(read_participant_rows(&path).expect("rows").is_empty());
    }

    #[test]
    fn blank_required_cells_fail_with_record_index() {
        let dir = tempfile::tempdir().expect("temp dir");
        let blank_role = write_file(dir.path(), "participants_a.csv", "name,role,space_url\nA,host,s1\nB,,s1\n");
        let err = read_participant_rows(&blank_role).unwrap_err();
        assert!(format!("{:#}", err).contains("Record 2"));
        assert!(format!("{:#}", err).contains("empty 'role' field"));

        let blank_name = write_file(dir.path(), "participants_b.csv", "name,role,space_url\n,host,s1\n");
        let err = read_participant_rows(&blank_name).unwrap_err();
        assert!(format!("{:#}", err).contains("empty 'name' field"));

        let blank_url = write_file(dir.path(), "participants_c.csv", "name,role,space_url\nA,host, \n");
        let err = read_participant_rows(&blank_url).unwrap_err();
        assert!(format!("{:#}", err).contains("empty 'space_url' field"));
    }

    #[test]
    fn blank_twitter_link_has_no_handle() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_file(
            dir.path(),
            "participants_a.csv",
            "name,role,space_url,twitter_link\nAlice,host,s1,\nBob,speaker,s1, \nCara,speaker,s1,https://twitter.com/cara\n",
        );
        let rows = read_participant_rows(&path).expect("rows");
        assert_eq!(rows[0].twitter_handle(), None);
        assert_eq!(rows[1].twitter_handle(), None);
        assert_eq!(rows[2].twitter_handle(), Some("https://twitter.com/cara"));
    }

    #[test]
    fn missing_required_column_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_file(dir.path(), "participants_a.csv", "name,role\nAlice,host\n");
        let err = read_participant_rows(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("missing required column 'space_url'"));
    }

    #[test]
    fn rows_are_concatenated_in_file_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let first = write_file(dir.path(), "participants_1.csv", "name,role,space_url\nA,host,s1\n");
        let second = write_file(dir.path(), "participants_2.csv", "name,role,space_url\nB,speaker,s2\nC,speaker,s2\n");
        let rows = read_all_rows(&[first, second]).expect("rows");
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }
}
