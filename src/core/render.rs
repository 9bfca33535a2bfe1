// src/core/render.rs
//! Turns an extraction result into cards and pretty JSON

use crate::types::{ExtractionResult, ResumeField};

/// Shown in a card whose field is missing or empty.
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: &'static str,
    pub content: String,
}

impl Card {
    pub fn new(title: &'static str, content: impl Into<String>) -> Self {
        Self {
            title,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedResult {
    pub cards: Vec<Card>,
    pub json: String,
}

pub fn render_result(result: &ExtractionResult) -> RenderedResult {
    let cards = ResumeField::ALL
        .iter()
        .map(|field| {
            Card::new(
                field.label(),
                result.field(*field).unwrap_or_else(|| PLACEHOLDER.to_string()),
            )
        })
        .collect();

    RenderedResult {
        cards,
        json: result.pretty_json(),
    }
}

/// Plain-text rendering of the cards for a terminal.
pub fn cards_to_text(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| {
            let body = card
                .content
                .lines()
                .map(|line| format!("  {}", line))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{}\n{}", card.title, if body.is_empty() { "  ".to_string() } else { body })
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_fields_render_five_cards() {
        let result = ExtractionResult::new(json!({
            "fullname": "Ada Lovelace",
            "email": "ada@example.org",
            "skills": "Mathematics, Analysis",
            "experience": "Analytical Engine notes",
            "education": "Private tutoring"
        }));

        let rendered = render_result(&result);
        assert_eq!(
            rendered.cards,
            vec![
                Card::new("Full Name", "Ada Lovelace"),
                Card::new("Email", "ada@example.org"),
                Card::new("Skills", "Mathematics, Analysis"),
                Card::new("Experience", "Analytical Engine notes"),
                Card::new("Education", "Private tutoring"),
            ]
        );
        assert!(rendered.json.contains("\"fullname\": \"Ada Lovelace\""));
    }

    #[test]
    fn test_missing_field_uses_placeholder() {
        let result = ExtractionResult::new(json!({
            "fullname": "Ada Lovelace",
            "email": "",
            "extra": "kept in json"
        }));

        let rendered = render_result(&result);
        assert_eq!(rendered.cards.len(), 5);
        assert_eq!(rendered.cards[1], Card::new("Email", PLACEHOLDER));
        assert_eq!(rendered.cards[4], Card::new("Education", PLACEHOLDER));
        assert!(rendered.json.contains("kept in json"));
    }

    #[test]
    fn test_cards_to_text_indents_multiline_content() {
        let text = cards_to_text(&[
            Card::new("Skills", "Rust\nSQL"),
            Card::new("Email", PLACEHOLDER),
        ]);
        assert_eq!(text, "Skills\n  Rust\n  SQL\n\nEmail\n  —");
    }
}
