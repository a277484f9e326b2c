//! Simulated backend of the myTickets demo application: user accounts and
//! sessions, ticket CRUD with filtering and sorting, a toast notification
//! bus with timed auto-dismiss, and the theme flag, all over an injected
//! key-value backend with artificial latency standing in for a network.
//!
//! There is no real authentication, no server, and no wire protocol; the
//! point of this crate is faithful simulation of those things for a local
//! demo, with the state machines and broadcast contracts a UI needs.
//!
//! ```no_run
//! use std::sync::Arc;
//! use ticketapp::{TicketApp, ToastLevel};
//! use ticketapp_core::storage::MemoryBackend;
//!
//! # async fn demo() {
//! let app = TicketApp::new(Arc::new(MemoryBackend::new()));
//! let session = app.session.login("demo@mytickets.app", "demo12345").await.unwrap();
//! let tickets = app.tickets.list(&ticketapp::TicketStore::default_filters()).await;
//! app.toasts.push(format!("Welcome back, {}", session.user.name), ToastLevel::Success);
//! # let _ = tickets;
//! # }
//! ```

pub mod app;
pub mod options;
pub mod seed;
pub mod session;
pub mod theme;
pub mod tickets;
pub mod toast;

pub use app::TicketApp;
pub use options::{SessionOptions, TicketAppOptions, TicketOptions, ToastOptions};
pub use session::SessionStore;
pub use theme::ThemeStore;
pub use tickets::TicketStore;
pub use toast::{EXIT_DELAY, ToastBus};

// Re-export the core vocabulary so consumers rarely need ticketapp-core
// directly.
pub use ticketapp_core::error::{AuthError, TicketError};
pub use ticketapp_core::models::{
    PriorityFilter, PublicUser, Session, StatusFilter, Theme, Ticket, TicketDraft, TicketFilters,
    TicketPriority, TicketStats, TicketStatus, ToastLevel, ToastMessage,
};
pub use ticketapp_core::time::{format_relative_time, format_relative_time_now};
