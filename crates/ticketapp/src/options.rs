// Store configuration, grouped per concern with defaults matching the
// original demo behavior.

use std::time::Duration;

use chrono::TimeDelta;
use ticketapp_core::logger::LoggerConfig;

/// How long a session stays valid after login. Default 24 hours.
pub fn default_session_duration() -> TimeDelta {
    TimeDelta::hours(24)
}

/// Artificial delay applied to ticket operations to mimic a network
/// round-trip. Default ~120ms.
pub const DEFAULT_TICKET_LATENCY: Duration = Duration::from_millis(120);

/// How long a toast stays visible before the bus auto-dismisses it.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3200);

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub duration: TimeDelta,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            duration: default_session_duration(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TicketOptions {
    pub latency: Duration,
}

impl Default for TicketOptions {
    fn default() -> Self {
        Self {
            latency: DEFAULT_TICKET_LATENCY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToastOptions {
    pub default_duration: Duration,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            default_duration: DEFAULT_TOAST_DURATION,
        }
    }
}

/// Top-level configuration consumed by [`crate::TicketApp`].
#[derive(Debug, Clone, Default)]
pub struct TicketAppOptions {
    pub session: SessionOptions,
    pub tickets: TicketOptions,
    pub toasts: ToastOptions,
    pub logger: LoggerConfig,
}
