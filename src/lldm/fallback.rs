//! # Fallback Narration
//!
//! Hardcoded lines used whenever the narrator fails, stalls or says nothing.

use crate::game::NarrationRequest;
use crate::lldm::Narrator;
use crate::ReckoningResult;
use async_trait::async_trait;

/// The fixed line for a request.
///
/// # Examples
///
/// ```
/// use void_reckoning::{fallback_text, NarrationRequest};
///
/// let line = fallback_text(&NarrationRequest::Eulogy { floor: 4 });
/// assert!(line.contains("floor 4"));
/// ```
pub fn fallback_text(request: &NarrationRequest) -> String {
    match request {
        NarrationRequest::Combat {
            attacker,
            target,
            damage,
            ..
        } => format!("{} strikes {} for {} damage.", attacker, target, damage),
        NarrationRequest::Eulogy { floor } => format!(
            "The void claims another soul on floor {}. None will remember the name.",
            floor
        ),
        NarrationRequest::Room { floor } => format!(
            "Floor {}. The air is cold and something waits in the dark.",
            floor
        ),
    }
}

/// Narrator that only ever returns the fallback lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackNarrator;

#[async_trait]
impl Narrator for FallbackNarrator {
    async fn narrate(&self, request: &NarrationRequest) -> ReckoningResult<String> {
        Ok(fallback_text(request))
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combat_fallback_names_both_sides() {
        let line = fallback_text(&NarrationRequest::Combat {
            attacker: "Soul-Seeker".to_string(),
            target: "Void Husk".to_string(),
            action: "cleaves".to_string(),
            damage: 14,
        });
        assert_eq!(line, "Soul-Seeker strikes Void Husk for 14 damage.");
    }

    #[test]
    fn test_fallbacks_are_never_empty() {
        for request in [
            NarrationRequest::Room { floor: 1 },
            NarrationRequest::Eulogy { floor: 9 },
        ] {
            assert!(!fallback_text(&request).trim().is_empty());
        }
    }
}
