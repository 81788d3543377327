//! # Template Narration
//!
//! An offline narrator that stitches request fields into stock phrases.
//! Phrases rotate so consecutive lines differ.

use crate::game::NarrationRequest;
use crate::lldm::Narrator;
use crate::ReckoningResult;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

const COMBAT_CODAS: [&str; 4] = [
    "Ichor spatters the stones.",
    "The blow echoes through the dark.",
    "Something inside it cracks.",
    "The void drinks the pain.",
];

const ROOM_LINES: [&str; 3] = [
    "Walls sweat black water. Shapes shuffle beyond the light.",
    "Broken crates litter the floor. Something breathes nearby.",
    "A low hum fills the chamber, like a heartbeat far below.",
];

const EULOGY_LINES: [&str; 3] = [
    "Their light guttered out",
    "The dark closed over them",
    "They went quietly, as all do",
];

/// Offline narrator used by the command-line runner.
#[derive(Debug, Default)]
pub struct TemplateNarrator {
    cursor: AtomicUsize,
}

impl TemplateNarrator {
    pub fn new() -> Self {
        Self::default()
    }

    fn next<'a>(&self, lines: &[&'a str]) -> &'a str {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        lines[index % lines.len()]
    }

    fn compose(&self, request: &NarrationRequest) -> String {
        match request {
            NarrationRequest::Combat {
                attacker,
                target,
                action,
                damage,
            } => format!(
                "{} {} {} for {}. {}",
                attacker,
                action,
                target,
                damage,
                self.next(&COMBAT_CODAS)
            ),
            NarrationRequest::Room { floor } => {
                format!("Floor {}. {}", floor, self.next(&ROOM_LINES))
            }
            NarrationRequest::Eulogy { floor } => {
                format!("{} on floor {}.", self.next(&EULOGY_LINES), floor)
            }
        }
    }
}

#[async_trait]
impl Narrator for TemplateNarrator {
    async fn narrate(&self, request: &NarrationRequest) -> ReckoningResult<String> {
        Ok(self.compose(request))
    }

    fn name(&self) -> &'static str {
        "template"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_combat_line_uses_request_fields() {
        let narrator = TemplateNarrator::new();
        let line = narrator
            .narrate(&NarrationRequest::Combat {
                attacker: "Wraith".to_string(),
                target: "Ash".to_string(),
                action: "wails at".to_string(),
                damage: 9,
            })
            .await
            .unwrap();
        assert!(line.starts_with("Wraith wails at Ash for 9."));
    }

    #[tokio::test]
    async fn test_lines_rotate() {
        let narrator = TemplateNarrator::new();
        let request = NarrationRequest::Room { floor: 2 };
        let first = narrator.narrate(&request).await.unwrap();
        let second = narrator.narrate(&request).await.unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("Floor 2."));
    }
}
