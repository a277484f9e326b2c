// Ticket store: CRUD plus filter/sort over the persisted collection, with
// a change broadcast and an artificial latency that stands in for a network
// round-trip.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use ticketapp_core::error::TicketError;
use ticketapp_core::logger::StoreLogger;
use ticketapp_core::models::{Ticket, TicketDraft, TicketFilters, TicketStats, TicketStatus};
use ticketapp_core::storage::{StorageBackend, keys};
use ticketapp_core::subscribers::{SubscriberRegistry, Subscription};

use crate::options::TicketOptions;
use crate::seed::seed_tickets;

/// Ticket collection over an injected backend.
///
/// Every operation suspends for the configured latency before resolving.
/// Every mutation persists, then emits one "tickets changed" notification;
/// listeners re-query [`list`](Self::list) or [`stats`](Self::stats) to
/// refresh their view.
#[derive(Debug)]
pub struct TicketStore {
    backend: Arc<dyn StorageBackend>,
    listeners: SubscriberRegistry<()>,
    latency: Duration,
    logger: StoreLogger,
}

impl TicketStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_options(backend, TicketOptions::default(), StoreLogger::default())
    }

    pub fn with_options(
        backend: Arc<dyn StorageBackend>,
        options: TicketOptions,
        logger: StoreLogger,
    ) -> Self {
        Self {
            backend,
            listeners: SubscriberRegistry::new(),
            latency: options.latency,
            logger,
        }
    }

    /// The neutral query: empty text, all statuses, all priorities.
    pub fn default_filters() -> TicketFilters {
        TicketFilters::default()
    }

    /// Tickets matching `filters`, most recently updated first.
    pub async fn list(&self, filters: &TicketFilters) -> Vec<Ticket> {
        let mut tickets = self.read_tickets().await;
        tickets.retain(|ticket| filters.matches(ticket));
        tickets.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        self.simulate_latency().await;
        tickets
    }

    /// A single ticket by id.
    pub async fn get(&self, id: u64) -> Option<Ticket> {
        let ticket = self
            .read_tickets()
            .await
            .into_iter()
            .find(|ticket| ticket.id == id);
        self.simulate_latency().await;
        ticket
    }

    /// Create a ticket from a draft. The title and description are trimmed
    /// and a missing description becomes the empty string.
    pub async fn create(&self, draft: TicketDraft) -> Ticket {
        let mut tickets = self.read_tickets().await;
        let now = Utc::now();
        let ticket = Ticket {
            id: tickets.iter().map(|t| t.id).max().unwrap_or(0) + 1,
            title: draft.title.trim().to_string(),
            description: draft
                .description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            status: draft.status,
            priority: draft.priority,
            created_at: now,
            updated_at: now,
        };
        tickets.push(ticket.clone());
        self.write_tickets(&tickets).await;
        self.logger.debug(&format!("ticket #{} created", ticket.id));
        self.simulate_latency().await;
        ticket
    }

    /// Overwrite the draft fields of an existing ticket, refreshing
    /// `updated_at` and preserving `id` and `created_at`.
    pub async fn update(&self, id: u64, draft: TicketDraft) -> Result<Ticket, TicketError> {
        let mut tickets = self.read_tickets().await;
        let Some(ticket) = tickets.iter_mut().find(|ticket| ticket.id == id) else {
            self.simulate_latency().await;
            return Err(TicketError::NotFound(id));
        };

        ticket.title = draft.title.trim().to_string();
        ticket.description = draft
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        ticket.status = draft.status;
        ticket.priority = draft.priority;
        ticket.updated_at = Utc::now();
        let updated = ticket.clone();

        self.write_tickets(&tickets).await;
        self.logger.debug(&format!("ticket #{id} updated"));
        self.simulate_latency().await;
        Ok(updated)
    }

    /// Remove a ticket. Unknown ids are a no-op, but the collection is
    /// persisted and the change broadcast either way.
    pub async fn delete(&self, id: u64) {
        let mut tickets = self.read_tickets().await;
        tickets.retain(|ticket| ticket.id != id);
        self.write_tickets(&tickets).await;
        self.logger.debug(&format!("ticket #{id} deleted"));
        self.simulate_latency().await;
    }

    /// Counts over the full unfiltered collection.
    pub async fn stats(&self) -> TicketStats {
        let tickets = self.read_tickets().await;
        let mut stats = TicketStats {
            total: tickets.len(),
            ..Default::default()
        };
        for ticket in &tickets {
            match ticket.status {
                TicketStatus::Open => stats.open += 1,
                TicketStatus::InProgress => stats.in_progress += 1,
                TicketStatus::Closed => stats.closed += 1,
            }
        }
        self.simulate_latency().await;
        stats
    }

    /// Reset the collection to the seed tickets and broadcast the change.
    pub async fn clear(&self) {
        let seeded = seed_tickets(Utc::now());
        self.write_tickets(&seeded).await;
        self.simulate_latency().await;
    }

    /// Register a listener for the "tickets changed" broadcast.
    pub fn subscribe(&self, listener: impl Fn(&()) + Send + Sync + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    async fn read_tickets(&self) -> Vec<Ticket> {
        let raw = match self.backend.get(keys::TICKETS).await {
            Ok(raw) => raw,
            Err(err) => {
                self.logger
                    .warn(&format!("tickets slot unreadable, reseeding: {err}"));
                None
            }
        };

        match raw.map(|raw| serde_json::from_str::<Vec<Ticket>>(&raw)) {
            // An existing collection is authoritative even when empty: the
            // seeds only cover a slot that was never written or is corrupt.
            Some(Ok(tickets)) => tickets,
            Some(Err(err)) => {
                self.logger
                    .warn(&format!("tickets slot corrupt, reseeding: {err}"));
                self.reseed().await
            }
            None => self.reseed().await,
        }
    }

    async fn reseed(&self) -> Vec<Ticket> {
        let seeded = seed_tickets(Utc::now());
        self.persist(&seeded).await;
        seeded
    }

    /// Persist without broadcasting, for reads that reseed.
    async fn persist(&self, tickets: &[Ticket]) {
        match serde_json::to_string(tickets) {
            Ok(json) => {
                if let Err(err) = self.backend.set(keys::TICKETS, &json).await {
                    self.logger
                        .warn(&format!("failed to persist tickets slot: {err}"));
                }
            }
            Err(err) => self
                .logger
                .error(&format!("tickets slot serialization failed: {err}")),
        }
    }

    async fn write_tickets(&self, tickets: &[Ticket]) {
        self.persist(tickets).await;
        self.listeners.emit(&());
    }
}
