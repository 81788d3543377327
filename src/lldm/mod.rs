//! # Narration Module
//!
//! Best-effort flavor text. A [`Narrator`] turns a [`NarrationRequest`] into
//! a line for the combat log; [`narrate_with_fallback`] makes sure a line
//! always comes back within a bounded time, whatever the narrator does.

pub mod fallback;
pub mod local;
pub mod traits;

pub use fallback::*;
pub use local::*;
pub use traits::*;

use crate::game::NarrationRequest;
use std::time::Duration;

/// Asks `narrator` for a line, falling back to [`fallback_text`] on error,
/// timeout or an empty reply. Never fails.
pub async fn narrate_with_fallback(
    narrator: &dyn Narrator,
    request: &NarrationRequest,
    timeout: Duration,
) -> String {
    match tokio::time::timeout(timeout, narrator.narrate(request)).await {
        Ok(Ok(text)) if !text.trim().is_empty() => text,
        Ok(Ok(_)) => {
            log::debug!("{} narrator returned nothing", narrator.name());
            fallback_text(request)
        }
        Ok(Err(err)) => {
            log::warn!("{} narrator failed: {}", narrator.name(), err);
            fallback_text(request)
        }
        Err(_) => {
            log::warn!(
                "{} narrator timed out after {}ms",
                narrator.name(),
                timeout.as_millis()
            );
            fallback_text(request)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ReckoningError, ReckoningResult};
    use async_trait::async_trait;

    struct Broken;

    #[async_trait]
    impl Narrator for Broken {
        async fn narrate(&self, _request: &NarrationRequest) -> ReckoningResult<String> {
            Err(ReckoningError::Narration("service unavailable".to_string()))
        }
    }

    struct Silent;

    #[async_trait]
    impl Narrator for Silent {
        async fn narrate(&self, _request: &NarrationRequest) -> ReckoningResult<String> {
            Ok("   ".to_string())
        }
    }

    struct Stalled;

    #[async_trait]
    impl Narrator for Stalled {
        async fn narrate(&self, _request: &NarrationRequest) -> ReckoningResult<String> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".to_string())
        }
    }

    #[tokio::test]
    async fn test_failures_fall_back() {
        let request = NarrationRequest::Room { floor: 3 };
        let expected = fallback_text(&request);
        let timeout = Duration::from_millis(50);

        assert_eq!(narrate_with_fallback(&Broken, &request, timeout).await, expected);
        assert_eq!(narrate_with_fallback(&Silent, &request, timeout).await, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_narrator_times_out() {
        let request = NarrationRequest::Eulogy { floor: 2 };
        let line = narrate_with_fallback(&Stalled, &request, Duration::from_millis(2500)).await;
        assert_eq!(line, fallback_text(&request));
    }

    #[tokio::test]
    async fn test_good_reply_passes_through() {
        let request = NarrationRequest::Room { floor: 1 };
        let line = narrate_with_fallback(&TemplateNarrator::new(), &request, Duration::from_secs(1)).await;
        assert!(line.starts_with("Floor 1."));
    }
}
