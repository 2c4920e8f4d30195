use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::watch::{Result, WatchError};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static ROW_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td, th").unwrap());

/// Pulls every row of every table matched by `selector` out of a rendered page.
///
/// Each row is the list of its `td`/`th` texts in document order, with
/// whitespace collapsed and trimmed, close to what `innerText.trim()` gives
/// in the browser. A row is returned once even when nested containers both
/// match the selector.
pub fn parse_table_rows(html: &str, selector: &str) -> Result<Vec<Vec<String>>> {
    let container_selector = Selector::parse(selector)
        .map_err(|e| WatchError::Extraction(format!("invalid selector `{}`: {}", selector, e)))?;
    let document = Html::parse_document(html);

    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    for container in document.select(&container_selector) {
        for row in container.select(&ROW_SELECTOR) {
            if !seen.insert(row.id()) {
                continue;
            }
            let cells = row.select(&CELL_SELECTOR).map(cell_text).collect();
            rows.push(cells);
        }
    }

    Ok(rows)
}

fn cell_text(cell: ElementRef<'_>) -> String {
    let raw = cell.text().collect::<String>();
    WHITESPACE.replace_all(&raw, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="design">
            <table>
              <tr><th>Idioma</th><th>Grupo</th><th>Fecha</th></tr>
              <tr><td> FRANCÉS </td><td>A1-1</td><td>12
                  enero</td></tr>
              <tr><td>INGLÉS</td><td><span>B2</span></td><td>13 enero</td></tr>
            </table>
          </div>
        </body></html>
    "#;

    #[test]
    fn rows_and_cells_come_back_in_document_order() {
        let rows = parse_table_rows(PAGE, "table").unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["Idioma", "Grupo", "Fecha"],
                vec!["FRANCÉS", "A1-1", "12 enero"],
                vec!["INGLÉS", "B2", "13 enero"],
            ]
        );
    }

    #[test]
    fn no_matching_container_means_no_rows() {
        let rows = parse_table_rows(PAGE, "table.missing").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn empty_rows_are_kept_for_the_normalizer_to_judge() {
        let html = "<table><tr></tr><tr><td>FRANCÉS</td><td>A1</td></tr></table>";
        let rows = parse_table_rows(html, "table").unwrap();
        assert_eq!(rows, vec![vec![], vec!["FRANCÉS".to_string(), "A1".to_string()]]);
    }

    #[test]
    fn nested_matches_yield_each_row_once() {
        let html = r#"
            <div class="grid"><div class="grid"><table>
              <tr><td>FRANCÉS</td><td>A1-1</td><td>12 enero</td></tr>
              <tr><td>FRANCÉS</td><td>A1-2</td><td>14 enero</td></tr>
            </table></div></div>
        "#;
        let rows = parse_table_rows(html, ".grid").unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["FRANCÉS", "A1-1", "12 enero"],
                vec!["FRANCÉS", "A1-2", "14 enero"],
            ]
        );
    }

    #[test]
    fn invalid_selector_is_an_extraction_error() {
        let err = parse_table_rows(PAGE, "table[").unwrap_err();
        assert!(matches!(err, WatchError::Extraction(_)));
    }
}
