use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, error};

use crate::config::OutputMode;
use crate::domain::{FilterResult, SlotRow};

pub const CSV_HEADER: [&str; 7] = [
    "Center Name",
    "District",
    "Pincode",
    "Session Date",
    "Availability",
    "Min Age Limit",
    "Vaccine",
];

/// Serializes the matched rows under `results_dir` and returns the paths
/// written. A bucket whose directory or file cannot be created is logged and
/// abandoned; the remaining buckets still get written.
pub fn write_results(
    result: &FilterResult,
    district_id: u32,
    mode: OutputMode,
    results_dir: &Path,
) -> Vec<PathBuf> {
    match mode {
        OutputMode::Bucketed => write_bucketed(result, district_id, results_dir),
        OutputMode::Single => write_single(result, results_dir),
    }
}

fn write_bucketed(result: &FilterResult, district_id: u32, results_dir: &Path) -> Vec<PathBuf> {
    let stamp = Utc::now().timestamp();
    let mut written = Vec::new();

    for (dose, age, rows) in result.buckets() {
        if rows.is_empty() {
            continue;
        }

        let dir = results_dir
            .join(district_id.to_string())
            .join(age.to_string())
            .join(format!("dose-{dose}"));
        if let Err(e) = fs::create_dir_all(&dir) {
            error!("error creating {}: {e}", dir.display());
            continue;
        }

        let path = dir.join(format!("{stamp}.csv"));
        match write_rows(&path, rows) {
            Ok(()) => {
                debug!("successfully written csv file {}", path.display());
                written.push(path);
            }
            Err(e) => error!("error writing {}: {e}", path.display()),
        }
    }

    written
}

fn write_single(result: &FilterResult, results_dir: &Path) -> Vec<PathBuf> {
    if result.is_empty() {
        return Vec::new();
    }

    if let Err(e) = fs::create_dir_all(results_dir) {
        error!("error creating {}: {e}", results_dir.display());
        return Vec::new();
    }

    let path = results_dir.join("result.csv");
    let rows: Vec<SlotRow> = result
        .buckets()
        .iter()
        .flat_map(|&(_, _, rows)| rows.iter().cloned())
        .collect();

    match write_rows(&path, &rows) {
        Ok(()) => {
            debug!("successfully written csv file {}", path.display());
            vec![path]
        }
        Err(e) => {
            error!("error writing {}: {e}", path.display());
            Vec::new()
        }
    }
}

fn write_rows(path: &Path, rows: &[SlotRow]) -> csv::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADER)?;

    for row in rows {
        // Upstream reports capacity as a float; the report truncates it.
        let availability = (row.availability as i64).to_string();
        let min_age = row.min_age_limit.to_string();
        writer.write_record([
            row.centre_name.as_str(),
            row.district_name.as_str(),
            row.pincode.as_str(),
            row.session_date.as_str(),
            availability.as_str(),
            min_age.as_str(),
            row.vaccine.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(min_age: u32, availability: f64) -> SlotRow {
        SlotRow {
            centre_name: "Apollo Clinic".to_string(),
            district_name: "Satara".to_string(),
            pincode: "415514".to_string(),
            session_date: "10-05-2021".to_string(),
            availability,
            min_age_limit: min_age,
            vaccine: "COVISHIELD".to_string(),
        }
    }

    const HEADER_LINE: &str =
        "Center Name,District,Pincode,Session Date,Availability,Min Age Limit,Vaccine";

    #[test]
    fn bucketed_layout_is_district_age_dose() {
        let dir = tempfile::tempdir().unwrap();
        let mut result = FilterResult::default();
        result.dose1_age18.push(row(18, 5.0));

        let written = write_results(&result, 395, OutputMode::Bucketed, dir.path());

        assert_eq!(written.len(), 1);
        let path = &written[0];
        assert!(path.starts_with(dir.path().join("395").join("18").join("dose-1")));
        assert_eq!(path.extension().unwrap(), "csv");

        let content = fs::read_to_string(path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), HEADER_LINE);
        assert_eq!(
            lines.next().unwrap(),
            "Apollo Clinic,Satara,415514,10-05-2021,5,18,COVISHIELD"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn only_nonempty_buckets_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut result = FilterResult::default();
        result.dose2_age45.push(row(45, 12.0));

        let written = write_results(&result, 363, OutputMode::Bucketed, dir.path());

        assert_eq!(written.len(), 1);
        assert!(written[0].starts_with(dir.path().join("363").join("45").join("dose-2")));
        assert!(!dir.path().join("363").join("18").exists());
    }

    #[test]
    fn empty_result_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let written =
            write_results(&FilterResult::default(), 395, OutputMode::Bucketed, dir.path());
        assert!(written.is_empty());
        assert!(!dir.path().join("395").exists());

        let written = write_results(&FilterResult::default(), 395, OutputMode::Single, dir.path());
        assert!(written.is_empty());
        assert!(!dir.path().join("result.csv").exists());
    }

    #[test]
    fn single_mode_collects_every_bucket_into_result_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut result = FilterResult::default();
        result.dose1_age18.push(row(18, 5.0));
        result.dose2_age45.push(row(45, 3.0));

        let written = write_results(&result, 395, OutputMode::Single, dir.path());

        assert_eq!(written, vec![dir.path().join("result.csv")]);
        let content = fs::read_to_string(&written[0]).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], HEADER_LINE);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains(",5,18,"));
        assert!(lines[2].contains(",3,45,"));
    }

    #[test]
    fn availability_is_truncated_to_an_integer() {
        let dir = tempfile::tempdir().unwrap();
        let mut result = FilterResult::default();
        result.dose1_age18.push(row(18, 7.9));

        let written = write_results(&result, 395, OutputMode::Single, dir.path());
        let content = fs::read_to_string(&written[0]).unwrap();
        assert!(content.lines().nth(1).unwrap().contains(",7,18,"));
    }

    #[test]
    fn unwritable_bucket_does_not_stop_the_others() {
        let dir = tempfile::tempdir().unwrap();
        // Occupy the age-18 path with a plain file so create_dir_all fails
        // for that bucket only.
        fs::create_dir_all(dir.path().join("395")).unwrap();
        fs::write(dir.path().join("395").join("18"), b"in the way").unwrap();

        let mut result = FilterResult::default();
        result.dose1_age18.push(row(18, 5.0));
        result.dose1_age45.push(row(45, 2.0));

        let written = write_results(&result, 395, OutputMode::Bucketed, dir.path());

        assert_eq!(written.len(), 1);
        assert!(written[0].starts_with(dir.path().join("395").join("45").join("dose-1")));
    }
}
