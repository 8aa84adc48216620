//! CSV export for estimate results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::config::SystemInput;
use crate::estimator::types::{Estimate, Payback};

/// Schema v1 column header for CSV estimate export.
const HEADER: &str = "panel_type,panel_count,weather,tariff_per_kwh,battery_capacity_kwh,\
                      installed_kwc,gross_production_kwh,direct_self_consumption_kwh,\
                      surplus_kwh,battery_stored_kwh,battery_discharged_kwh,\
                      total_self_consumption_kwh,annual_savings,total_investment,\
                      payback_years,performance_index";

/// One exportable row: the input echoed next to its derived estimate.
#[derive(Debug, Clone)]
pub struct EstimateRow {
    /// The evaluated input.
    pub input: SystemInput,
    /// The derived estimate.
    pub estimate: Estimate,
}

/// Exports estimate rows to a CSV file at the given path.
///
/// Writes a header row followed by one data row per estimate using the
/// schema v1 column layout. Produces deterministic output for identical
/// inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(rows: &[EstimateRow], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(rows, buf)
}

/// Writes estimate rows as CSV to any writer.
///
/// An unbounded payback is written as `inf` (parseable back into a float);
/// a missing performance index becomes an empty field.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(rows: &[EstimateRow], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    // Data rows
    for row in rows {
        let e = &row.estimate;
        let payback = match e.payback {
            Payback::Years(y) => format!("{y:.4}"),
            Payback::Unbounded => "inf".to_string(),
        };
        let perf = e
            .performance_index
            .map(|pi| format!("{pi:.4}"))
            .unwrap_or_default();

        wtr.write_record(&[
            row.input.panel_type.clone(),
            row.input.panel_count.to_string(),
            row.input.weather.clone(),
            format!("{:.4}", row.input.tariff_per_kwh),
            format!("{:.4}", row.input.battery_capacity_kwh),
            format!("{:.4}", e.installed_kwc),
            format!("{:.4}", e.gross_production_kwh),
            format!("{:.4}", e.direct_self_consumption_kwh),
            format!("{:.4}", e.surplus_kwh),
            format!("{:.4}", e.battery_stored_kwh),
            format!("{:.4}", e.battery_discharged_kwh),
            format!("{:.4}", e.total_self_consumption_kwh),
            format!("{:.4}", e.annual_savings),
            format!("{:.4}", e.total_investment),
            payback,
            perf,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineParams, SiteParameters, SystemInput};
    use crate::estimator::Estimator;

    fn make_row(panel_count: u32) -> EstimateRow {
        let estimator = Estimator::new(SiteParameters::default(), EngineParams::default())
            .expect("defaults are valid");
        let input = SystemInput {
            panel_count,
            ..SystemInput::default()
        };
        let estimate = estimator.evaluate(&input).expect("valid input");
        EstimateRow { input, estimate }
    }

    #[test]
    fn header_matches_schema_v1() {
        let rows = vec![make_row(20)];
        let mut buf = Vec::new();
        write_csv(&rows, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "panel_type,panel_count,weather,tariff_per_kwh,battery_capacity_kwh,\
             installed_kwc,gross_production_kwh,direct_self_consumption_kwh,\
             surplus_kwh,battery_stored_kwh,battery_discharged_kwh,\
             total_self_consumption_kwh,annual_savings,total_investment,\
             payback_years,performance_index"
        );
    }

    #[test]
    fn row_count_matches_estimate_count() {
        let rows: Vec<EstimateRow> = (5..=30).map(make_row).collect();
        let mut buf = Vec::new();
        write_csv(&rows, &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        // 1 header + 26 data rows
        assert_eq!(lines.len(), 27);
    }

    #[test]
    fn deterministic_output() {
        let rows: Vec<EstimateRow> = (5..=10).map(make_row).collect();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(&rows, &mut buf1).ok();
        write_csv(&rows, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn round_trip_parseable() {
        let rows: Vec<EstimateRow> = (5..=7).map(make_row).collect();
        let mut buf = Vec::new();
        write_csv(&rows, &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(16));

        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            let rec = rec.as_ref();
            // panel_count parses as u32
            let count: Result<u32, _> = rec.unwrap()[1].parse();
            assert!(count.is_ok(), "panel_count should parse as u32");
            // Numeric columns parse as f32
            for i in 3..16 {
                let val: Result<f32, _> = rec.unwrap()[i].parse();
                assert!(val.is_ok(), "column {i} should parse as f32");
            }
            row_count += 1;
        }
        assert_eq!(row_count, 3);
    }
}
