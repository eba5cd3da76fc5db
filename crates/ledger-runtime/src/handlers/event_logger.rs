//! # Event Logger
//!
//! Writes every committed ledger event to the log as a structured line.
//! Runs until the bus closes or a shutdown signal arrives.

use shared_bus::{LedgerEvent, Subscription};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Handler that logs bus events.
pub struct EventLoggerHandler {
    /// Subscription the events arrive on.
    subscription: Subscription,
}

impl EventLoggerHandler {
    /// Create a new handler over `subscription`.
    pub fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }

    /// Run the handler loop. Returns the number of events logged.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> u64 {
        info!("Event logger started");
        let mut handled = 0u64;

        loop {
            tokio::select! {
                event = self.subscription.recv() => match event {
                    Some(event) => {
                        log_event(&event);
                        handled += 1;
                    }
                    None => {
                        debug!("Event bus closed");
                        break;
                    }
                },
                _ = shutdown.changed() => {
                    // Drain what was already committed before stopping.
                    if let Ok(rest) = self.subscription.drain() {
                        for event in &rest {
                            log_event(event);
                        }
                        handled += rest.len() as u64;
                    }
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        if self.subscription.lagged() > 0 {
            warn!(lagged = self.subscription.lagged(), "Event logger missed events");
        }
        info!(handled, "Event logger stopped");
        handled
    }
}

fn log_event(event: &LedgerEvent) {
    match event {
        LedgerEvent::UserRoleRequested { user, role } => {
            info!(%user, %role, "EVENT UserRoleRequested");
        }
        LedgerEvent::UserStatusChanged { user, status } => {
            info!(%user, %status, "EVENT UserStatusChanged");
        }
        LedgerEvent::TokenCreated {
            token_id,
            creator,
            name,
            total_supply,
        } => {
            info!(token_id, %creator, %name, %total_supply, "EVENT TokenCreated");
        }
        LedgerEvent::TransferRequested {
            transfer_id,
            from,
            to,
            token_id,
            amount,
        } => {
            info!(transfer_id, %from, %to, token_id, %amount, "EVENT TransferRequested");
        }
        LedgerEvent::TransferAccepted {
            transfer_id,
            from,
            to,
        } => {
            info!(transfer_id, %from, %to, "EVENT TransferAccepted");
        }
        LedgerEvent::TransferRejected {
            transfer_id,
            from,
            to,
        } => {
            info!(transfer_id, %from, %to, "EVENT TransferRejected");
        }
        LedgerEvent::ActivityRecorded {
            activity_id,
            activity_type,
            actor,
            timestamp,
        } => {
            debug!(activity_id, %activity_type, %actor, timestamp, "EVENT ActivityRecorded");
        }
    }
}
