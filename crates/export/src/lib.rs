//! Export helpers for CSV and JSON artifacts.

pub mod summary;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use habitat_design::Habitat;
use thiserror::Error;

pub use summary::HabitatSummary;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to open export target: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Flatten evaluated habitats into export rows.
pub fn summarize(habitats: &[Habitat]) -> Vec<HabitatSummary> {
    habitats.iter().map(HabitatSummary::from).collect()
}

/// Write one CSV row per habitat, with a header.
pub fn write_csv(path: &Path, rows: &[HabitatSummary]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer_for_path(path)?);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the rows as a pretty-printed JSON array.
pub fn write_json(path: &Path, rows: &[HabitatSummary]) -> Result<(), ExportError> {
    let mut writer = writer_for_path(path)?;
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitat_config::HabitatConfig;
    use tempfile::tempdir;

    fn rows() -> Vec<HabitatSummary> {
        let config = HabitatConfig::default();
        let habitats: Vec<Habitat> = [1e9, 1e10]
            .into_iter()
            .map(|power| {
                Habitat::evaluate(&config, power, config.friction_fractions(), None).expect("habitat")
            })
            .collect();
        summarize(&habitats)
    }

    #[test]
    fn csv_has_header_and_one_line_per_habitat() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested/habitats.csv");
        write_csv(&path, &rows()).expect("csv");

        let text = fs::read_to_string(&path).expect("read");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("power_w,population,shape,"));
        assert!(lines[1].contains(",cylinder,"));
    }

    #[test]
    fn json_round_trips_key_fields() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("habitats.json");
        let rows = rows();
        write_json(&path, &rows).expect("json");

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
        let array = value.as_array().expect("array");
        assert_eq!(array.len(), 2);
        assert_eq!(array[1]["power_w"].as_f64(), Some(1e10));
        assert_eq!(array[1]["shape"].as_str(), Some("cylinder"));
        assert!(array[0]["opposite_rotational_radius_m"].is_null());
        let mass = array[1]["total_cooling_mass_kg"].as_f64().expect("mass");
        assert!((mass.log10() - 8.964883982294).abs() < 1e-9);
    }

    #[test]
    fn summary_mirrors_habitat() {
        let row = &rows()[1];
        assert_eq!(row.power_w, 1e10);
        assert!(row.is_cooling_possible);
        assert!(row.cooling_report.is_none());
        assert!(row.total_mass_kg > row.total_cooling_mass_kg);
        assert!(row.floor_count >= 1);
    }
}
