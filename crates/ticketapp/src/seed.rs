// Default records written whenever a persisted slot is empty or unreadable.

use chrono::{DateTime, TimeDelta, Utc};
use ticketapp_core::models::{Ticket, TicketPriority, TicketStatus, User};

/// Email of the user guaranteed to exist in an otherwise empty registry.
pub const DEMO_EMAIL: &str = "demo@mytickets.app";

/// Password of the demo user, stored in cleartext like every other password.
pub const DEMO_PASSWORD: &str = "demo12345";

/// The user registry seeded into an empty or unreadable users slot.
pub fn seed_users(now: DateTime<Utc>) -> Vec<User> {
    vec![User {
        id: 1,
        name: "Demo User".into(),
        email: DEMO_EMAIL.into(),
        password: DEMO_PASSWORD.into(),
        created_at: now,
        updated_at: now,
    }]
}

/// The three tickets seeded into a missing or unreadable tickets slot.
/// Timestamps are offset into the past so the dashboard shows a plausible
/// history on first run.
pub fn seed_tickets(now: DateTime<Utc>) -> Vec<Ticket> {
    let stamp = |minutes_ago: i64| now - TimeDelta::minutes(minutes_ago);

    vec![
        Ticket {
            id: 1,
            title: "Welcome to myTickets Manager".into(),
            description: "Start by creating a ticket to track work items and assign statuses."
                .into(),
            status: TicketStatus::Open,
            priority: TicketPriority::High,
            created_at: stamp(720),
            updated_at: stamp(45),
        },
        Ticket {
            id: 2,
            title: "Review onboarding flow copy".into(),
            description: "Ensure login and signup microcopy matches the latest deck.".into(),
            status: TicketStatus::InProgress,
            priority: TicketPriority::Medium,
            created_at: stamp(1440),
            updated_at: stamp(120),
        },
        Ticket {
            id: 3,
            title: "Archive resolved tickets weekly".into(),
            description: "Closed tickets should be exported and archived every Friday.".into(),
            status: TicketStatus::Closed,
            priority: TicketPriority::Low,
            created_at: stamp(4320),
            updated_at: stamp(1440),
        },
    ]
}
