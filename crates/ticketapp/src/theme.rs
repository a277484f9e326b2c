// Theme store: a single light/dark flag. No broadcast channel; consumers
// re-derive on their own mount/update cycle.

use std::sync::Arc;

use ticketapp_core::logger::StoreLogger;
use ticketapp_core::models::Theme;
use ticketapp_core::storage::{StorageBackend, keys};

/// Light/dark preference over an injected backend.
///
/// The fallback stands in for the environment's color-scheme preference
/// (what the browser variants probed via media query); embedders that know
/// it pass it in, everyone else gets [`Theme::Light`].
#[derive(Debug)]
pub struct ThemeStore {
    backend: Arc<dyn StorageBackend>,
    fallback: Theme,
    logger: StoreLogger,
}

impl ThemeStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_fallback(backend, Theme::Light, StoreLogger::default())
    }

    pub fn with_fallback(
        backend: Arc<dyn StorageBackend>,
        fallback: Theme,
        logger: StoreLogger,
    ) -> Self {
        Self {
            backend,
            fallback,
            logger,
        }
    }

    /// The persisted flag, or the fallback when absent or unreadable.
    pub async fn stored_theme(&self) -> Theme {
        let raw = match self.backend.get(keys::THEME).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return self.fallback,
            Err(err) => {
                self.logger.warn(&format!("theme slot unreadable: {err}"));
                return self.fallback;
            }
        };
        serde_json::from_str(&raw).unwrap_or(self.fallback)
    }

    /// Persist the flag. Applying it to the rendered document is the
    /// presentation layer's job.
    pub async fn persist_theme(&self, theme: Theme) {
        match serde_json::to_string(&theme) {
            Ok(json) => {
                if let Err(err) = self.backend.set(keys::THEME, &json).await {
                    self.logger
                        .warn(&format!("failed to persist theme slot: {err}"));
                }
            }
            Err(err) => self
                .logger
                .error(&format!("theme serialization failed: {err}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketapp_core::storage::MemoryBackend;

    fn store() -> (Arc<MemoryBackend>, ThemeStore) {
        let backend = Arc::new(MemoryBackend::new());
        let store = ThemeStore::with_fallback(backend.clone(), Theme::Light, StoreLogger::disabled());
        (backend, store)
    }

    #[tokio::test]
    async fn test_defaults_to_light() {
        let (_, store) = store();
        assert_eq!(store.stored_theme().await, Theme::Light);
    }

    #[tokio::test]
    async fn test_fallback_stands_in_for_os_preference() {
        let backend = Arc::new(MemoryBackend::new());
        let store = ThemeStore::with_fallback(backend, Theme::Dark, StoreLogger::disabled());
        assert_eq!(store.stored_theme().await, Theme::Dark);
    }

    #[tokio::test]
    async fn test_persist_round_trip() {
        let (backend, store) = store();
        store.persist_theme(Theme::Dark).await;
        assert_eq!(store.stored_theme().await, Theme::Dark);

        use ticketapp_core::storage::StorageBackend as _;
        assert_eq!(
            backend.get(keys::THEME).await.unwrap(),
            Some("\"dark\"".to_string())
        );
    }

    #[tokio::test]
    async fn test_invalid_flag_falls_back() {
        let (backend, store) = store();
        use ticketapp_core::storage::StorageBackend as _;
        backend.set(keys::THEME, "\"sepia\"").await.unwrap();
        assert_eq!(store.stored_theme().await, Theme::Light);
    }

    #[tokio::test]
    async fn test_toggle_is_pure() {
        let (_, store) = store();
        store.persist_theme(Theme::Dark).await;
        let flipped = store.stored_theme().await.toggled();
        assert_eq!(flipped, Theme::Light);
        // Toggling alone persists nothing.
        assert_eq!(store.stored_theme().await, Theme::Dark);
    }
}
