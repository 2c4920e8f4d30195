use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::site::escape_html;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

pub fn parse_notices(json: &str) -> serde_json::Result<Vec<Notice>> {
    serde_json::from_str(json)
}

pub async fn load_notices(path: &Path) -> anyhow::Result<Vec<Notice>> {
    let json = tokio::fs::read_to_string(path).await?;
    Ok(parse_notices(&json)?)
}

/// Renders the notices board, newest first with undated notices last.
pub fn render_notice_board(notices: &[Notice]) -> String {
    if notices.is_empty() {
        return r#"<section id="notice-board"><p class="empty">No hay avisos por ahora.</p></section>"#
            .to_string();
    }

    let mut ordered: Vec<&Notice> = notices.iter().collect();
    // None sorts before Some, so reverse puts undated notices at the end.
    ordered.sort_by(|a, b| b.date.cmp(&a.date));

    let cards = ordered
        .into_iter()
        .map(render_notice)
        .collect::<Vec<_>>()
        .join("\n  ");
    format!("<section id=\"notice-board\">\n  {}\n</section>", cards)
}

fn render_notice(notice: &Notice) -> String {
    let date = notice
        .date
        .map(|d| {
            format!(
                r#"<time datetime="{}">{}</time>"#,
                d.format("%Y-%m-%d"),
                d.format("%d/%m/%Y")
            )
        })
        .unwrap_or_default();
    format!(
        r#"<article class="notice-card"><h2>{}</h2>{}<p>{}</p></article>"#,
        escape_html(&notice.title),
        date,
        escape_html(&notice.message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTICES: &str = r#"[
        {"title": "Sin fecha", "message": "Traed el libro"},
        {"title": "Examen", "message": "Oral <B1>", "date": "2025-02-03"},
        {"title": "Cambio de aula", "message": "Aula 12", "date": "2025-03-10"}
    ]"#;

    #[test]
    fn board_is_sorted_newest_first() {
        let board = render_notice_board(&parse_notices(NOTICES).unwrap());
        let aula = board.find("Cambio de aula").unwrap();
        let examen = board.find("Examen").unwrap();
        let sin_fecha = board.find("Sin fecha").unwrap();
        assert!(aula < examen && examen < sin_fecha);
    }

    #[test]
    fn dates_and_text_are_formatted() {
        let board = render_notice_board(&parse_notices(NOTICES).unwrap());
        assert!(board.contains(r#"<time datetime="2025-02-03">03/02/2025</time>"#));
        assert!(board.contains("Oral &lt;B1&gt;"));
    }

    #[test]
    fn empty_board_says_so() {
        assert!(render_notice_board(&[]).contains("No hay avisos"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_notices(r#"[{"title": "x"}]"#).is_err());
    }
}
