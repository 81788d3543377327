//! # Narrator Traits
//!
//! The seam between the simulation and whatever writes its flavor text.

use crate::game::NarrationRequest;
use crate::ReckoningResult;
use async_trait::async_trait;

/// Source of flavor text.
///
/// Implementations may be slow or fail; callers go through
/// [`crate::narrate_with_fallback`], which bounds the wait and substitutes a
/// fallback line. Gameplay never depends on what comes back.
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn narrate(&self, request: &NarrationRequest) -> ReckoningResult<String>;

    /// Name used in logs.
    fn name(&self) -> &'static str {
        "narrator"
    }
}
