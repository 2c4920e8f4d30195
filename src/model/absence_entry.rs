use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One reported absence row: which course, which group, which session.
///
/// Equality and hashing are by field value, so separately scraped copies of
/// the same row collapse into a single set member.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AbsenceEntry {
    pub language: String,
    pub group: String,
    /// Opaque label exactly as shown on the page, e.g. `12 enero`.
    pub date: String,
}

pub type EntrySet = HashSet<AbsenceEntry>;

impl AbsenceEntry {
    pub fn new(language: &str, group: &str, date: &str) -> Self {
        AbsenceEntry {
            language: language.to_string(),
            group: group.to_string(),
            date: date.to_string(),
        }
    }

    pub fn line(&self, separator: &str) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.language,
            self.group,
            self.date,
            sep = separator
        )
    }

    pub fn to_row(&self) -> [String; 3] {
        [self.language.clone(), self.group.clone(), self.date.clone()]
    }
}

/// Shape of one record in the store file.
///
/// Older files hold bare `[language, group, date]` rows, hand-edited ones may
/// use objects; both are accepted on read.
#[derive(Serialize, Deserialize, Debug)]
#[serde(untagged)]
pub enum StoredEntry {
    Row(Vec<String>),
    Record(AbsenceEntry),
}
