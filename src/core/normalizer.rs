use std::collections::HashSet;

use log::{debug, warn};

use crate::config::Config;
use crate::error::watch::{Result, WatchError};
use crate::model::absence_entry::AbsenceEntry;

/// Maps one row of cells onto an entry: language, group, date.
///
/// Cells past the third are ignored. Rows with fewer than three cells are
/// rejected instead of producing half-empty entries.
pub fn normalize<S: AsRef<str>>(row: &[S]) -> Result<AbsenceEntry> {
    match row {
        [language, group, date, ..] => Ok(AbsenceEntry::new(
            language.as_ref(),
            group.as_ref(),
            date.as_ref(),
        )),
        _ => Err(WatchError::Extraction(format!(
            "expected at least 3 cells, got {}",
            row.len()
        ))),
    }
}

/// Normalizes scraped rows in order, skipping rows with the wrong shape.
pub fn normalize_rows(rows: &[Vec<String>]) -> Vec<AbsenceEntry> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            if row.iter().all(|cell| cell.is_empty()) {
                debug!("Skipping empty row {}", index);
                return None;
            }
            match normalize(row.as_slice()) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping row {} {:?}: {}", index, row, e);
                    None
                }
            }
        })
        .collect()
}

/// Which entries are tracked at all.
#[derive(Clone, Debug)]
pub struct RelevanceFilter {
    pub language: String,
    pub group_fragment: String,
}

impl RelevanceFilter {
    pub fn new(language: &str, group_fragment: &str) -> Self {
        RelevanceFilter {
            language: language.to_string(),
            group_fragment: group_fragment.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.language, &config.group_fragment)
    }

    /// Exact language match and substring group match, both case-sensitive.
    /// The substring lets `A1` cover labels like `A1-2` or `A1 Mañana`.
    pub fn is_relevant(&self, entry: &AbsenceEntry) -> bool {
        entry.language == self.language && entry.group.contains(&self.group_fragment)
    }

    /// Relevant entries in their original order, first occurrence wins.
    pub fn select(&self, entries: Vec<AbsenceEntry>) -> Vec<AbsenceEntry> {
        let mut seen = HashSet::new();
        entries
            .into_iter()
            .filter(|entry| self.is_relevant(entry))
            .filter(|entry| seen.insert(entry.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn french_a1() -> RelevanceFilter {
        RelevanceFilter::new("FRANCÉS", "A1")
    }

    #[test]
    fn normalize_copies_cells_by_position() {
        let entry = normalize(&["FRANCÉS", "A1-1", "12 enero"]).unwrap();
        assert_eq!(entry, AbsenceEntry::new("FRANCÉS", "A1-1", "12 enero"));
    }

    #[test]
    fn normalize_ignores_extra_cells() {
        let entry = normalize(&["FRANCÉS", "A1-1", "12 enero", "Aula 4"]).unwrap();
        assert_eq!(entry.date, "12 enero");
    }

    #[test]
    fn normalize_rejects_short_rows() {
        assert!(matches!(
            normalize(&["FRANCÉS", "A1-1"]),
            Err(WatchError::Extraction(_))
        ));
        assert!(normalize::<&str>(&[]).is_err());
    }

    #[test]
    fn normalize_rows_skips_bad_and_empty_rows() {
        let rows = vec![
            row(&[]),
            row(&["FRANCÉS", "A1-1"]),
            row(&["FRANCÉS", "A1-1", "12 enero"]),
            row(&["", "", ""]),
        ];
        let entries = normalize_rows(&rows);
        assert_eq!(entries, vec![AbsenceEntry::new("FRANCÉS", "A1-1", "12 enero")]);
    }

    #[test]
    fn relevance_needs_exact_language_and_group_substring() {
        let filter = french_a1();
        assert!(filter.is_relevant(&AbsenceEntry::new("FRANCÉS", "A1-2", "x")));
        assert!(filter.is_relevant(&AbsenceEntry::new("FRANCÉS", "A1 Mañana", "x")));
        assert!(filter.is_relevant(&AbsenceEntry::new("FRANCÉS", "Grupo A1", "x")));

        assert!(!filter.is_relevant(&AbsenceEntry::new("INGLÉS", "A1-1", "x")));
        assert!(!filter.is_relevant(&AbsenceEntry::new("Francés", "A1-1", "x")));
        assert!(!filter.is_relevant(&AbsenceEntry::new("FRANCÉS ", "A1-1", "x")));
        assert!(!filter.is_relevant(&AbsenceEntry::new("FRANCES", "A1-1", "x")));
        assert!(!filter.is_relevant(&AbsenceEntry::new("FRANCÉS", "a1-1", "x")));
        assert!(!filter.is_relevant(&AbsenceEntry::new("FRANCÉS", "B2", "x")));
    }

    #[test]
    fn header_row_is_never_relevant() {
        let filter = french_a1();
        let header = normalize(&["Idioma", "Grupo", "Fecha"]).unwrap();
        assert!(!filter.is_relevant(&header));
    }

    #[test]
    fn select_keeps_order_and_drops_duplicates() {
        let filter = french_a1();
        let entries = vec![
            AbsenceEntry::new("FRANCÉS", "A1-2", "14 enero"),
            AbsenceEntry::new("INGLÉS", "B2", "13 enero"),
            AbsenceEntry::new("FRANCÉS", "A1-1", "12 enero"),
            AbsenceEntry::new("FRANCÉS", "A1-2", "14 enero"),
        ];
        assert_eq!(
            filter.select(entries),
            vec![
                AbsenceEntry::new("FRANCÉS", "A1-2", "14 enero"),
                AbsenceEntry::new("FRANCÉS", "A1-1", "12 enero"),
            ]
        );
    }
}
