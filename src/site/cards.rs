use crate::site::escape_html;

const SUMMARY_PLACEHOLDER: &str = "Escribe aquí el punto importante.";
const NOTICE_PLACEHOLDER: &str = "Añade el mensaje del aviso aquí.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryCard {
    pub title: String,
    pub points: Vec<String>,
}

impl SummaryCard {
    /// Builds a card from the add-summary form.
    ///
    /// Returns `None` without a title. `points` is a comma-separated list; a
    /// missing or blank list yields the placeholder point.
    pub fn from_form(title: &str, points: Option<&str>) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let points = match points.map(str::trim).filter(|p| !p.is_empty()) {
            Some(csv) => csv
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
            None => vec![SUMMARY_PLACEHOLDER.to_string()],
        };

        Some(SummaryCard {
            title: title.to_string(),
            points,
        })
    }

    pub fn render(&self) -> String {
        let items = self
            .points
            .iter()
            .map(|p| format!("<li>{}</li>", escape_html(p)))
            .collect::<String>();
        format!(
            r#"<article class="summary-card"><h2>{}</h2><ul>{}</ul></article>"#,
            escape_html(&self.title),
            items
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeCard {
    pub title: String,
    pub message: String,
}

impl NoticeCard {
    pub fn from_form(title: &str, message: Option<&str>) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let message = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(NOTICE_PLACEHOLDER);

        Some(NoticeCard {
            title: title.to_string(),
            message: message.to_string(),
        })
    }

    pub fn render(&self) -> String {
        format!(
            r#"<article class="notice-card"><h2>{}</h2><p>{}</p></article>"#,
            escape_html(&self.title),
            escape_html(&self.message)
        )
    }
}

/// Cards shown newest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardList<T> {
    cards: Vec<T>,
}

impl<T> Default for CardList<T> {
    fn default() -> Self {
        CardList { cards: Vec::new() }
    }
}

impl<T> CardList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, card: T) {
        self.cards.insert(0, card);
    }

    pub fn cards(&self) -> &[T] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
