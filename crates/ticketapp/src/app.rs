// Application wiring: all four stores over one shared backend.

use std::sync::Arc;

use ticketapp_core::logger::StoreLogger;
use ticketapp_core::models::Theme;
use ticketapp_core::storage::StorageBackend;

use crate::options::TicketAppOptions;
use crate::session::SessionStore;
use crate::theme::ThemeStore;
use crate::tickets::TicketStore;
use crate::toast::ToastBus;

/// The simulated backend of the myTickets demo, constructed once per
/// application instance and passed by reference to consumers.
///
/// All stores share the backend (and therefore a storage scope); the toast
/// bus is storage-free. There is no hidden module state; constructing two
/// apps over two backends yields fully isolated worlds.
#[derive(Debug)]
pub struct TicketApp {
    pub session: Arc<SessionStore>,
    pub tickets: Arc<TicketStore>,
    pub toasts: ToastBus,
    pub theme: ThemeStore,
}

impl TicketApp {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_options(backend, TicketAppOptions::default())
    }

    pub fn with_options(backend: Arc<dyn StorageBackend>, options: TicketAppOptions) -> Self {
        let logger = StoreLogger::new(options.logger);
        Self {
            session: Arc::new(SessionStore::with_options(
                backend.clone(),
                options.session,
                logger.clone(),
            )),
            tickets: Arc::new(TicketStore::with_options(
                backend.clone(),
                options.tickets,
                logger.clone(),
            )),
            toasts: ToastBus::with_options(options.toasts),
            theme: ThemeStore::with_fallback(backend, Theme::Light, logger),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketapp_core::storage::MemoryBackend;

    use crate::seed::{DEMO_EMAIL, DEMO_PASSWORD};

    #[tokio::test(start_paused = true)]
    async fn test_two_apps_over_two_backends_are_isolated() {
        let a = TicketApp::new(Arc::new(MemoryBackend::new()));
        let b = TicketApp::new(Arc::new(MemoryBackend::new()));

        a.session.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        assert!(a.session.require_auth().await);
        assert!(!b.session.require_auth().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stores_share_one_backend() {
        let backend = Arc::new(MemoryBackend::new());
        let app = TicketApp::new(backend.clone());

        app.session.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        app.theme.persist_theme(Theme::Dark).await;

        // A second app over the same backend sees everything, the way a
        // reloaded tab re-reads its storage scope.
        let reloaded = TicketApp::new(backend);
        assert!(reloaded.session.require_auth().await);
        assert_eq!(reloaded.theme.stored_theme().await, Theme::Dark);
        assert_eq!(reloaded.tickets.stats().await.total, 3);
    }
}
