// src/transform.rs
use crate::data_types::TableData;
use crate::error::{Result, ScrapeError};

/// Strips the footnote markers and suffixes the exchange appends to company names
/// (`"ABC PLC [MRF]"` becomes `"ABC"`) in `column`. Values without a delimiter are kept.
pub fn clean(mut table: TableData, column: &str) -> Result<TableData> {
    let idx = table
        .column_index(column)
        .ok_or_else(|| ScrapeError::Schema(column.to_string()))?;

    for row in table.rows.iter_mut() {
        if let Some(cell) = row.get_mut(idx) {
            let token_len = leading_token(cell).len();
            cell.truncate(token_len);
        }
    }

    Ok(table)
}

/// Everything before the first whitespace character or `[`.
pub fn leading_token(value: &str) -> &str {
    match value.find(|c: char| c.is_whitespace() || c == '[') {
        Some(end) => &value[..end],
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[[&str; 2]]) -> TableData {
        TableData::new(
            vec!["Company".to_string(), "Price".to_string()],
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn leading_token_cuts_at_whitespace_or_bracket() {
        assert_eq!(leading_token("ABC PLC [NOTE]"), "ABC");
        assert_eq!(leading_token("GTCO[MRS]"), "GTCO");
        assert_eq!(leading_token("FBNH\tHoldings"), "FBNH");
        assert_eq!(leading_token("XYZ"), "XYZ");
        assert_eq!(leading_token(""), "");
    }

    #[test]
    fn cleans_only_the_company_column() {
        let cleaned = clean(table(&[["ABC PLC [NOTE]", "1 000.00"], ["XYZ", "2.00"]]), "Company").unwrap();

        assert_eq!(cleaned.rows[0], vec!["ABC", "1 000.00"]);
        assert_eq!(cleaned.rows[1], vec!["XYZ", "2.00"]);
    }

    #[test]
    fn cleaning_twice_changes_nothing() {
        let once = clean(table(&[["DEF Ltd", "7.00"], ["UBA [DIP]", "9.10"]]), "Company").unwrap();
        let twice = clean(once.clone(), "Company").unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        match clean(table(&[["ABC", "1.00"]]), "Symbol") {
            Err(ScrapeError::Schema(column)) => assert_eq!(column, "Symbol"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
