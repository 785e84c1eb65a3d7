//! CSV export of a finished result table.

use crate::error::Result;
use crate::record::ResultTable;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use vipon_core::OutputConfig;

/// File name for a table, e.g. `deals_info_20240402.csv`.
#[must_use]
pub fn file_name(prefix: &str, table: &ResultTable) -> String {
    format!("{}_{}.csv", prefix, table.crawl_date().format("%Y%m%d"))
}

/// Write the header row and one row per record to `writer`.
pub fn write_table<W: Write>(table: &ResultTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if table.is_empty() {
        // serde only emits headers alongside the first record
        wtr.write_record(COLUMNS)?;
    }
    for record in table {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the table into the configured directory, returning the file path.
pub fn write_csv(table: &ResultTable, output: &OutputConfig) -> Result<PathBuf> {
    if !output.directory.as_os_str().is_empty() {
        fs::create_dir_all(&output.directory)?;
    }

    let path = output.directory.join(file_name(&output.file_prefix, table));
    let file = fs::File::create(&path)?;
    write_table(table, file)?;

    tracing::info!("Wrote {} deals to {}", table.len(), path.display());
    Ok(path)
}

const COLUMNS: [&str; 12] = [
    "product_id",
    "title",
    "category",
    "like",
    "dislike",
    "discount",
    "code",
    "expiry_time",
    "list_price",
    "sales_price",
    "amazon_url",
    "crawl_date",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::sample_deal;
    use crate::record::ResultAggregator;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn table(ids: &[(u64, Option<&str>)]) -> ResultTable {
        let mut aggregator = ResultAggregator::new();
        for (id, code) in ids {
            aggregator.push(sample_deal(*id, *code));
        }
        aggregator.finalize(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap())
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("deals_info", &table(&[])), "deals_info_20240402.csv");
    }

    #[test]
    fn test_write_table() {
        let mut out = Vec::new();
        write_table(&table(&[(1, Some("SAVE20")), (2, None)]), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], COLUMNS.join(","));
        assert_eq!(
            lines[1],
            "1,Deal 1,Electronics,17,3,60% off,SAVE20,2024-05-01,$49.99,$19.99,https://www.amazon.com/dp/1,2024-04-02"
        );
        assert_eq!(
            lines[2],
            "2,Deal 2,Electronics,17,3,60% off,,2024-05-01,$49.99,$19.99,https://www.amazon.com/dp/2,2024-04-02"
        );
    }

    #[test]
    fn test_write_empty_table_has_header() {
        let mut out = Vec::new();
        write_table(&table(&[]), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim_end(), COLUMNS.join(","));
    }

    #[test]
    fn test_write_csv_creates_directory() {
        let tmp = TempDir::new().expect("create temp dir");
        let output = OutputConfig {
            directory: tmp.path().join("exports"),
            file_prefix: "deals_info".to_string(),
        };

        let path = write_csv(&table(&[(7, None)]), &output).unwrap();
        assert_eq!(path, tmp.path().join("exports").join("deals_info_20240402.csv"));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 1);
    }
}
