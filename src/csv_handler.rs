// src/csv_handler.rs
use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use tokio::task;

use crate::data_types::TableData;
use crate::error::{Result, ScrapeError};

pub struct CSVHandler {}

impl CSVHandler {
    pub fn new() -> Self {
        CSVHandler {}
    }

    /// Writes header + rows to `path`, replacing any file already there.
    pub async fn write_csv(&self, path: &Path, table: &TableData) -> Result<()> {
        let target = path.to_path_buf();
        let table = table.clone();

        task::spawn_blocking(move || Self::write_blocking(&target, &table))
            .await
            .map_err(|e| ScrapeError::io(path, std::io::Error::other(e)))?
    }

    pub async fn read_csv(&self, path: &Path) -> Result<TableData> {
        let source = path.to_path_buf();

        task::spawn_blocking(move || Self::read_blocking(&source))
            .await
            .map_err(|e| ScrapeError::io(path, std::io::Error::other(e)))?
    }

    fn write_blocking(path: &Path, table: &TableData) -> Result<()> {
        // File::create truncates, so a second run on the same day overwrites.
        let file = File::create(path).map_err(|e| ScrapeError::io(path, e))?;
        let mut writer = WriterBuilder::new().from_writer(file);

        writer.write_record(&table.headers)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(|e| ScrapeError::io(path, e))?;

        Ok(())
    }

    fn read_blocking(path: &Path) -> Result<TableData> {
        let file = File::open(path).map_err(|e| ScrapeError::io(path, e))?;
        let mut reader = ReaderBuilder::new().from_reader(file);

        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(String::from).collect());
        }

        TableData::new(headers, rows)
    }
}

impl Default for CSVHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TableData {
        TableData::new(
            vec!["Company".into(), "Price".into()],
            vec![
                vec!["ABC".into(), "12.50".into()],
                vec!["QUOTED, INC".into(), "1,000.00".into()],
            ],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn writes_header_then_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("data_2024-03-07.csv");

        CSVHandler::new().write_csv(&path, &sample()).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Company,Price\nABC,12.50\n\"QUOTED, INC\",\"1,000.00\"\n");
        assert_eq!(CSVHandler::new().read_csv(&path).await.unwrap(), sample());
    }

    #[tokio::test]
    async fn rewriting_replaces_previous_content() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("data_2024-03-07.csv");
        std::fs::write(&path, "old,header\nstale,row\nstale,row\nstale,row\n").unwrap();

        CSVHandler::new().write_csv(&path, &sample()).await.unwrap();

        let table = CSVHandler::new().read_csv(&path).await.unwrap();
        assert_eq!(table.headers, vec!["Company", "Price"]);
        assert_eq!(table.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_reports_its_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nope.csv");

        match CSVHandler::new().read_csv(&path).await {
            Err(ScrapeError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
