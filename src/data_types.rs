// src/data_types.rs
use crate::error::{Result, ScrapeError};

/// A scraped price table: named columns plus rows of string cells,
/// each row positionally aligned to `headers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Builds a table, rejecting anything the sinks cannot hold:
    /// no headers, no rows, or a row whose width differs from the header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if headers.is_empty() {
            return Err(ScrapeError::DataIntegrity(
                "the scraped table has no header cells".to_string(),
            ));
        }
        if rows.is_empty() {
            return Err(ScrapeError::DataIntegrity(
                "the scraped table is empty, the website might not have loaded correctly".to_string(),
            ));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != headers.len()) {
            return Err(ScrapeError::DataIntegrity(format!(
                "row {} has {} cells but the header has {}",
                i,
                row.len(),
                headers.len()
            )));
        }

        Ok(TableData { headers, rows })
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn accepts_aligned_rows() {
        let table = TableData::new(
            cells(&["Company", "Price"]),
            vec![cells(&["ABC", "1.00"]), cells(&["DEF", "2.00"])],
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.column_index("Price"), Some(1));
        assert_eq!(table.column_index("Volume"), None);
    }

    #[test]
    fn rejects_empty_rows() {
        let err = TableData::new(cells(&["Company"]), Vec::new()).unwrap_err();
        assert!(matches!(err, ScrapeError::DataIntegrity(_)));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = TableData::new(
            cells(&["Company", "Price"]),
            vec![cells(&["ABC", "1.00"]), cells(&["DEF"])],
        )
        .unwrap_err();

        match err {
            ScrapeError::DataIntegrity(msg) => assert!(msg.contains("row 1")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
