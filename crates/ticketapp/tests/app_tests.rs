// End-to-end flows over the durable file backend: what a page consumer
// does across login, ticket edits, toasts, and a simulated reload.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tempfile::tempdir;

use ticketapp::{
    TicketApp, TicketDraft, TicketFilters, TicketPriority, TicketStatus, TicketStore, ToastLevel,
};
use ticketapp_fs::FileBackend;

async fn app_in(dir: &std::path::Path) -> TicketApp {
    let backend = Arc::new(FileBackend::open(dir).await.unwrap());
    TicketApp::new(backend)
}

#[tokio::test(start_paused = true)]
async fn seed_state_survives_a_reload() {
    let dir = tempdir().unwrap();

    {
        let app = app_in(dir.path()).await;
        app.session
            .login("demo@mytickets.app", "demo12345")
            .await
            .unwrap();
        app.tickets
            .create(TicketDraft {
                title: "Written before reload".into(),
                description: Some("should persist".into()),
                status: TicketStatus::Open,
                priority: TicketPriority::Medium,
            })
            .await;
    }

    // A fresh app over the same directory plays the role of the reloaded tab.
    let app = app_in(dir.path()).await;
    assert!(app.session.require_auth().await);
    let stats = app.tickets.stats().await;
    assert_eq!(stats.total, 4);
    assert_eq!(stats.open, 2);
}

#[tokio::test(start_paused = true)]
async fn signup_login_and_ticket_flow() {
    let dir = tempdir().unwrap();
    let app = app_in(dir.path()).await;

    let user = app
        .session
        .signup("Grace Hopper", "grace@example.com", "c0b0l")
        .await
        .unwrap();
    assert!(user.id > 1);

    let session = app.session.login("grace@example.com", "c0b0l").await.unwrap();
    assert_eq!(session.user.email, "grace@example.com");

    let created = app
        .tickets
        .create(TicketDraft {
            title: "  File weekly report  ".into(),
            description: None,
            status: TicketStatus::InProgress,
            priority: TicketPriority::High,
        })
        .await;
    assert_eq!(created.title, "File weekly report");

    let found = app
        .tickets
        .list(&TicketFilters {
            q: "weekly".into(),
            ..Default::default()
        })
        .await;
    // "weekly" also matches the seeded archive ticket.
    assert!(found.iter().any(|t| t.id == created.id));
    assert_eq!(found[0].id, created.id);
}

#[tokio::test(start_paused = true)]
async fn session_broadcast_reaches_every_open_view() {
    let dir = tempdir().unwrap();
    let app = app_in(dir.path()).await;

    let header_updates = Arc::new(AtomicUsize::new(0));
    let sidebar_updates = Arc::new(AtomicUsize::new(0));
    let header = Arc::clone(&header_updates);
    let sidebar = Arc::clone(&sidebar_updates);
    let _header_sub = app.session.subscribe(move |_| {
        header.fetch_add(1, Ordering::SeqCst);
    });
    let _sidebar_sub = app.session.subscribe(move |_| {
        sidebar.fetch_add(1, Ordering::SeqCst);
    });

    app.session
        .login("demo@mytickets.app", "demo12345")
        .await
        .unwrap();
    app.session.logout().await;

    assert_eq!(header_updates.load(Ordering::SeqCst), 2);
    assert_eq!(sidebar_updates.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn ticket_mutations_notify_and_persist() {
    let dir = tempdir().unwrap();
    let app = app_in(dir.path()).await;

    let changes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&changes);
    let _sub = app.tickets.subscribe(move |()| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let ticket = app
        .tickets
        .create(TicketDraft {
            title: "Flaky printer".into(),
            description: Some("third floor".into()),
            status: TicketStatus::Open,
            priority: TicketPriority::Low,
        })
        .await;
    app.tickets
        .update(
            ticket.id,
            TicketDraft {
                title: "Flaky printer".into(),
                description: Some("third floor".into()),
                status: TicketStatus::Closed,
                priority: TicketPriority::Low,
            },
        )
        .await
        .unwrap();
    app.tickets.delete(ticket.id).await;
    assert_eq!(changes.load(Ordering::SeqCst), 3);

    let reloaded = app_in(dir.path()).await;
    assert!(reloaded.tickets.get(ticket.id).await.is_none());
}

#[tokio::test(start_paused = true)]
async fn failure_toast_flow_for_stale_edit() {
    let dir = tempdir().unwrap();
    let app = app_in(dir.path()).await;

    // The edit view lost a race with a delete elsewhere; the store error is
    // surfaced as a generic failure toast.
    let result = app
        .tickets
        .update(
            999,
            TicketDraft {
                title: "stale".into(),
                description: None,
                status: TicketStatus::Open,
                priority: TicketPriority::Low,
            },
        )
        .await;
    assert!(result.is_err());

    let (dismissed, toasts) = (Arc::new(AtomicUsize::new(0)), &app.toasts);
    let counter = Arc::clone(&dismissed);
    let _sub = toasts.subscribe_dismissals(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let toast = toasts.push_with_duration(
        "Could not save the ticket.",
        ToastLevel::Error,
        Duration::from_millis(200),
    );
    assert_eq!(toasts.active().len(), 1);

    // The user closes it just before the timer does: one dismissal only.
    toasts.dismiss(&toast.id);
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(dismissed.load(Ordering::SeqCst), 1);
    assert!(toasts.active().is_empty());
}

#[tokio::test(start_paused = true)]
async fn corrupt_slots_recover_to_defaults() {
    let dir = tempdir().unwrap();
    tokio::fs::write(dir.path().join("ticketapp_users.json"), "{oops")
        .await
        .unwrap();
    tokio::fs::write(dir.path().join("ticketapp_tickets.json"), "[broken")
        .await
        .unwrap();

    let app = app_in(dir.path()).await;
    // Both stores reseed silently; the demo account and seed tickets exist.
    app.session
        .login("demo@mytickets.app", "demo12345")
        .await
        .unwrap();
    assert_eq!(app.tickets.list(&TicketStore::default_filters()).await.len(), 3);
}
