// Record types shared by every store, in the exact shape persisted to the
// key-value slots (snake_case timestamp keys, camelCase session expiry).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user, as stored in the `ticketapp_users` slot.
///
/// The password is kept in cleartext. Deliberate demo constraint: the
/// registry never leaves the local backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Password-stripped projection of a [`User`], the only user shape handed
/// to consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: u64,
    pub name: String,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// The single active session, stored in the `ticketapp_session` slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: PublicUser,
    pub token: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has expired as of `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whether the session has expired as of the current instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Ticket workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ticket priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    High,
    Medium,
    Low,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ticket record, as stored in the `ticketapp_tickets` slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    pub title: String,
    /// May be empty; older records may omit the key entirely.
    #[serde(default)]
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The mutable fields of a ticket, used by create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TicketStatus,
    pub priority: TicketPriority,
}

/// Status criterion of a ticket query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TicketStatus),
}

/// Priority criterion of a ticket query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(TicketPriority),
}

/// Ticket query criteria. Never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TicketFilters {
    /// Free-text query, matched case-insensitively against title and
    /// description. Empty matches everything.
    pub q: String,
    pub status: StatusFilter,
    pub priority: PriorityFilter,
}

impl TicketFilters {
    /// Whether a ticket satisfies all three criteria.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        let query = self.q.trim().to_lowercase();
        let matches_query = query.is_empty()
            || ticket.title.to_lowercase().contains(&query)
            || ticket.description.to_lowercase().contains(&query);

        let matches_status = match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => ticket.status == status,
        };

        let matches_priority = match self.priority {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => ticket.priority == priority,
        };

        matches_query && matches_status && matches_priority
    }
}

/// Counts across the full unfiltered ticket collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    #[serde(rename = "inProgress")]
    pub in_progress: usize,
    pub closed: usize,
}

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl ToastLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transient notification. Lives only in the toast bus, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    pub id: String,
    pub level: ToastLevel,
    pub message: String,
    /// How long the toast stays visible before the bus auto-dismisses it.
    pub duration: std::time::Duration,
}

/// Light/dark preference flag, stored in the `ticketapp_theme` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Pure flip between light and dark.
    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
