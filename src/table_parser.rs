// src/table_parser.rs
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::data_types::TableData;
use crate::error::Result;

// Hardcoded selectors; parsing cannot fail.
static HEAD_CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("thead th").unwrap());
static FIRST_ROW_HEAD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr:first-child th").unwrap());
static BODY_ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tbody tr").unwrap());
static ANY_ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());

/// DataTables renders this class on its single "no data" row.
const EMPTY_PLACEHOLDER_CLASS: &str = "dataTables_empty";

/// Parses the outer HTML of the price table into a [`TableData`].
///
/// Header names come from the `<th>` cells of `<thead>` (or of the first row when
/// there is no `<thead>`), rows from the `<td>` cells of each body row, all trimmed.
/// An empty or ragged result is a data integrity error.
pub fn parse(html: &str) -> Result<TableData> {
    let document = Html::parse_fragment(html);

    let mut headers: Vec<String> = document.select(&HEAD_CELL_SELECTOR).map(cell_text).collect();
    if headers.is_empty() {
        headers = document.select(&FIRST_ROW_HEAD_SELECTOR).map(cell_text).collect();
    }

    let has_body = document.select(&BODY_ROW_SELECTOR).next().is_some();
    let row_selector: &Selector = if has_body { &BODY_ROW_SELECTOR } else { &ANY_ROW_SELECTOR };

    let rows = document
        .select(row_selector)
        .filter_map(|tr| {
            let cells: Vec<ElementRef> = tr.select(&CELL_SELECTOR).collect();
            if cells.is_empty() || cells.iter().any(|td| is_placeholder(td)) {
                return None;
            }
            Some(cells.into_iter().map(cell_text).collect::<Vec<_>>())
        })
        .collect();

    TableData::new(headers, rows)
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn is_placeholder(cell: &ElementRef) -> bool {
    cell.value().classes().any(|c| c == EMPTY_PLACEHOLDER_CLASS)
}
