//! Core building blocks for the myTickets demo stores: the record types in
//! their persisted shape, the injected key-value [`storage`] backend, the
//! [`subscribers`] registry every store broadcasts through, the shared
//! [`logger`], and the relative [`time`] formatter.

pub mod error;
pub mod logger;
pub mod models;
pub mod storage;
pub mod subscribers;
pub mod time;

// Re-exports for convenience
pub use error::{AuthError, StorageError, TicketError};
pub use logger::{LogHandler, LogLevel, LoggerConfig, StoreLogger};
pub use models::{
    PriorityFilter, PublicUser, Session, StatusFilter, Theme, Ticket, TicketDraft, TicketFilters,
    TicketPriority, TicketStats, TicketStatus, ToastLevel, ToastMessage, User,
};
pub use storage::{MemoryBackend, StorageBackend, keys};
pub use subscribers::{SubscriberRegistry, Subscription};
pub use time::{format_relative_time, format_relative_time_now};
