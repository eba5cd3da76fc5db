//! # Ledger Properties
//!
//! Conservation, terminality, all-or-nothing failure, authorization and
//! activity completeness, checked through the public engine API.

mod common;

use common::*;
use ledger_runtime::{
    ActivityLogApi, ActorDirectoryApi, BatchEvent, BatchRegistryApi, LedgerConfig, NewBatch,
    TransferWorkflowApi,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use shared_types::{ActivityType, Address, LedgerError, TransferStatus, UserStatus};
use std::sync::Barrier;
use std::thread;

// =============================================================================
// CONSERVATION
// =============================================================================

#[test]
fn test_random_workflow_conserves_supply() {
    let (ledger, clock) = ledger();
    let actors: Vec<Address> = (1..=5u8).map(Address::repeat).collect();
    for actor in &actors {
        approve(&ledger, *actor, "Trader");
    }
    ledger.create_batch(actors[0], NewBatch::new("Lot A", units(5_000))).unwrap();
    ledger.create_batch(actors[1], NewBatch::new("Lot B", units(3_000))).unwrap();

    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..400 {
        clock.advance(1);
        let batch_id = rng.gen_range(1..=2u64);
        let from = actors[rng.gen_range(0..actors.len())];
        let to = actors[rng.gen_range(0..actors.len())];

        match rng.gen_range(0..3) {
            0 => {
                let _ = ledger.request_transfer(from, to, batch_id, units(rng.gen_range(1..2_000)));
            }
            1 => {
                if let Some(t) = ledger.get_pending_transfers(&to).first() {
                    let _ = ledger.accept_transfer(to, t.id);
                }
            }
            _ => {
                if let Some(t) = ledger.get_pending_transfers(&to).last() {
                    let _ = ledger.reject_transfer(to, t.id);
                }
            }
        }

        assert_eq!(held(&ledger, 1), units(5_000));
        assert_eq!(held(&ledger, 2), units(3_000));
    }
}

#[test]
fn test_first_accepted_wins_without_escrow() {
    let (ledger, _clock) = ledger();
    approve(&ledger, X, "Producer");
    ledger.create_batch(X, NewBatch::new("Lot", units(1000))).unwrap();

    let to_y = ledger.request_transfer(X, Y, 1, units(700)).unwrap();
    let to_z = ledger.request_transfer(X, Z, 1, units(700)).unwrap();
    // Requests do not reserve balance.
    assert_eq!(ledger.get_balance(1, &X), units(1000));
    assert_eq!(ledger.get_outgoing_pending(&X).len(), 2);

    ledger.accept_transfer(Z, to_z).unwrap();
    let activities = ledger.total_activities();
    let result = ledger.accept_transfer(Y, to_y);

    assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
    assert_eq!(ledger.get_transfer(to_y).unwrap().status, TransferStatus::Pending);
    assert_eq!(ledger.get_balance(1, &X), units(300));
    assert_eq!(ledger.get_balance(1, &Y), units(0));
    assert_eq!(ledger.total_activities(), activities);
}

#[test]
fn test_concurrent_accepts_settle_once() {
    const RECIPIENTS: u8 = 20;
    let (ledger, _clock) = ledger();
    approve(&ledger, X, "Producer");
    ledger.create_batch(X, NewBatch::new("Lot", units(1000))).unwrap();
    let requests: Vec<_> = (0..RECIPIENTS)
        .map(|i| {
            let to = Address::repeat(0x40 + i);
            (to, ledger.request_transfer(X, to, 1, units(700)).unwrap())
        })
        .collect();

    let barrier = Barrier::new(requests.len());
    let wins = thread::scope(|scope| {
        let handles: Vec<_> = requests
            .iter()
            .map(|&(to, id)| {
                let (ledger, barrier) = (&ledger, &barrier);
                scope.spawn(move || {
                    barrier.wait();
                    ledger.accept_transfer(to, id).is_ok()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|accepted| *accepted)
            .count()
    });

    assert_eq!(wins, 1);
    assert_eq!(held(&ledger, 1), units(1000));
    assert_eq!(ledger.get_balance(1, &X), units(300));
    assert_eq!(ledger.get_pending_transfers(&X).len(), 0);
    assert_eq!(ledger.get_outgoing_pending(&X).len(), RECIPIENTS as usize - 1);
    assert_eq!(ledger.get_activities_by_type(ActivityType::TransferAccepted).len(), 1);
}

// =============================================================================
// TERMINALITY
// =============================================================================

#[test]
fn test_rejected_transfer_is_final() {
    let (ledger, _clock) = ledger();
    approve(&ledger, X, "Producer");
    ledger.create_batch(X, NewBatch::new("Lot", units(100))).unwrap();
    let id = ledger.request_transfer(X, Y, 1, units(10)).unwrap();
    ledger.reject_transfer(Y, id).unwrap();
    let activities = ledger.total_activities();

    for result in [ledger.accept_transfer(Y, id), ledger.reject_transfer(Y, id)] {
        assert_eq!(
            result,
            Err(LedgerError::InvalidState {
                transfer_id: id,
                status: TransferStatus::Rejected
            })
        );
    }
    assert_eq!(ledger.total_activities(), activities);
    assert_eq!(ledger.get_balance(1, &X), units(100));
}

#[test]
fn test_only_recipient_resolves() {
    let (ledger, _clock) = ledger();
    approve(&ledger, X, "Producer");
    ledger.create_batch(X, NewBatch::new("Lot", units(100))).unwrap();
    let id = ledger.request_transfer(X, Y, 1, units(10)).unwrap();

    assert!(matches!(ledger.accept_transfer(X, id), Err(LedgerError::Unauthorized { .. })));
    assert!(matches!(ledger.reject_transfer(ADMIN, id), Err(LedgerError::Unauthorized { .. })));
    assert_eq!(
        ledger.accept_transfer(Y, 99),
        Err(LedgerError::transfer_not_found(99))
    );
    assert_eq!(ledger.get_pending_transfers(&Y).len(), 1);
}

// =============================================================================
// ALL-OR-NOTHING FAILURE
// =============================================================================

#[test]
fn test_failed_operations_write_nothing() {
    let (ledger, _clock) = ledger();
    approve(&ledger, X, "Producer");
    ledger.request_role(Y, "Exporter").unwrap();
    ledger.create_batch(X, NewBatch::new("Lot", units(100))).unwrap();
    let before = table_sizes(&ledger);

    let failures = [
        ledger.request_role(Y, "Exporter").map(|_| ()),
        ledger.request_role(Z, "  ").map(|_| ()),
        ledger.create_batch(X, NewBatch::new("Empty", units(0))).map(|_| ()),
        ledger.create_batch(X, NewBatch::new("   ", units(5))).map(|_| ()),
        ledger.create_batch(Y, NewBatch::new("Pending", units(5))).map(|_| ()),
        ledger.request_transfer(X, X, 1, units(1)).map(|_| ()),
        ledger.request_transfer(X, Y, 2, units(1)).map(|_| ()),
        ledger.request_transfer(X, Y, 1, units(0)).map(|_| ()),
        ledger.request_transfer(X, Y, 1, units(101)).map(|_| ()),
        ledger.request_transfer(Y, X, 1, units(1)).map(|_| ()),
        ledger.accept_transfer(Y, 1),
    ];

    let codes: Vec<_> = failures
        .iter()
        .map(|r| r.as_ref().map_err(|e| e.code()).unwrap_err())
        .collect();
    assert_eq!(
        codes,
        vec![
            "ALREADY_REQUESTED",
            "INVALID_INPUT",
            "INVALID_QUANTITY",
            "INVALID_INPUT",
            "NOT_APPROVED",
            "INVALID_RECIPIENT",
            "NOT_FOUND",
            "INVALID_QUANTITY",
            "INSUFFICIENT_BALANCE",
            "NOT_APPROVED",
            "NOT_FOUND",
        ]
    );
    assert_eq!(table_sizes(&ledger), before);
    assert_eq!(ledger.get_balance(1, &X), units(100));
}

#[test]
fn test_empty_batches_when_enabled() {
    let config = LedgerConfig {
        allow_empty_batches: true,
        ..LedgerConfig::with_admin(ADMIN)
    };
    let (ledger, _clock) = ledger_with(config);
    approve(&ledger, X, "Producer");

    ledger.create_batch(X, NewBatch::new("Coffee Lot 1", units(1000))).unwrap();
    ledger.create_batch(X, NewBatch::new("Placeholder", units(0))).unwrap();
    ledger.create_batch(X, NewBatch::new("", units(10))).unwrap();

    // Valid means a positive supply and a non-blank name.
    assert_eq!(ledger.total_batches(), 3);
    assert_eq!(ledger.count_valid_batches(), 1);
    let created: Vec<_> = ledger.list_batches_by_creator(&X).into_iter().map(|b| b.id).collect();
    assert_eq!(created, vec![1, 2, 3]);
    let held: Vec<_> = ledger.list_batches_held_by(&X).into_iter().map(|b| b.id).collect();
    assert_eq!(held, vec![1, 3]);
}

// =============================================================================
// AUTHORIZATION
// =============================================================================

#[test]
fn test_admin_only_operations() {
    let (ledger, _clock) = ledger();
    approve(&ledger, X, "Producer");
    let before = table_sizes(&ledger);

    assert!(matches!(
        ledger.register_by_admin(X, Y, "Exporter", UserStatus::Approved),
        Err(LedgerError::Unauthorized { .. })
    ));
    assert!(matches!(
        ledger.change_status(X, X, UserStatus::Canceled),
        Err(LedgerError::Unauthorized { .. })
    ));
    assert_eq!(
        ledger.change_status(ADMIN, Z, UserStatus::Approved),
        Err(LedgerError::user_not_found(Z))
    );

    assert_eq!(table_sizes(&ledger), before);
    assert_eq!(ledger.get_user(&X).unwrap().status, UserStatus::Approved);
    assert!(ledger.is_admin(&ADMIN));
    assert!(!ledger.is_admin(&X));
}

#[test]
fn test_revoked_user_loses_write_access() {
    let (ledger, _clock) = ledger();
    approve(&ledger, X, "Producer");
    ledger.create_batch(X, NewBatch::new("Lot", units(100))).unwrap();

    ledger.change_status(ADMIN, X, UserStatus::Canceled).unwrap();

    assert!(matches!(
        ledger.request_transfer(X, Y, 1, units(1)),
        Err(LedgerError::NotApproved { .. })
    ));
    // Overwrite is unconditional: a canceled user can be approved again.
    ledger.change_status(ADMIN, X, UserStatus::Approved).unwrap();
    assert!(ledger.request_transfer(X, Y, 1, units(1)).is_ok());
}

#[test]
fn test_batch_events_need_custody() {
    let (ledger, _clock) = ledger();
    approve(&ledger, X, "Producer");
    approve(&ledger, Y, "Transporter");
    approve(&ledger, Z, "Retailer");
    ledger.create_batch(X, NewBatch::new("Lot", units(100))).unwrap();
    let id = ledger.request_transfer(X, Y, 1, units(40)).unwrap();

    // Y is only a pending recipient so far.
    assert!(matches!(
        ledger.record_batch_event(Y, 1, BatchEvent::new("Loaded", "Truck 7")),
        Err(LedgerError::Unauthorized { .. })
    ));
    ledger.accept_transfer(Y, id).unwrap();

    let activity_id = ledger
        .record_batch_event(
            Y,
            1,
            BatchEvent::new("Loaded", "Truck 7").with_metadata(r#"{"temp_c":4}"#),
        )
        .unwrap();
    let activity = ledger.get_activity(activity_id).unwrap();
    assert_eq!(activity.activity_type, ActivityType::BatchEvent);
    assert_eq!(activity.description, "Loaded @ Truck 7");
    assert_eq!(activity.related_id, 1);
    assert_eq!(activity.data, br#"{"temp_c":4}"#.to_vec());

    assert!(ledger.record_batch_event(X, 1, BatchEvent::new("Harvested", "")).is_ok());
    assert!(matches!(
        ledger.record_batch_event(Z, 1, BatchEvent::new("Shelved", "Store 2")),
        Err(LedgerError::Unauthorized { .. })
    ));
    assert_eq!(
        ledger.record_batch_event(X, 5, BatchEvent::new("Harvested", "")),
        Err(LedgerError::batch_not_found(5))
    );
    assert!(matches!(
        ledger.record_batch_event(X, 1, BatchEvent::new(" ", "")),
        Err(LedgerError::InvalidInput { .. })
    ));
    assert_eq!(ledger.get_activities_by_type(ActivityType::BatchEvent).len(), 2);
}

// =============================================================================
// ACTIVITY COMPLETENESS
// =============================================================================

#[test]
fn test_one_activity_per_success_with_ordered_ids_and_times() {
    let (ledger, clock) = ledger();

    approve(&ledger, X, "Producer");
    clock.advance(10);
    ledger.request_role(Y, "Exporter").unwrap();
    ledger.change_status(ADMIN, Y, UserStatus::Approved).unwrap();
    // The clock stepping back must not produce an earlier timestamp.
    clock.set(T0 - 500);
    ledger.create_batch(X, NewBatch::new("Lot", units(10))).unwrap();
    clock.set(T0 + 20);
    let transfer_id = ledger.request_transfer(X, Y, 1, units(5)).unwrap();
    ledger.reject_transfer(Y, transfer_id).unwrap();

    let log = ledger.get_all_activities();
    assert_eq!(log.len(), 6);
    assert!(log.windows(2).all(|w| w[0].id + 1 == w[1].id));
    assert!(log.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert_eq!(log[3].timestamp, T0 + 10);

    let related: Vec<_> = log.iter().map(|a| (a.activity_type, a.related_id)).collect();
    assert_eq!(
        related,
        vec![
            (ActivityType::UserRegisteredByAdmin, 1),
            (ActivityType::UserRoleRequested, 2),
            (ActivityType::UserStatusChanged, 2),
            (ActivityType::TokenCreated, 1),
            (ActivityType::TransferRequested, transfer_id),
            (ActivityType::TransferRejected, transfer_id),
        ]
    );
    assert_eq!(ledger.get_activities_by_actor(&ADMIN).len(), 2);
    assert_eq!(
        ledger.get_activity(99).map(|a| a.id),
        Err(LedgerError::activity_not_found(99))
    );
}

#[test]
fn test_entity_dates_match_their_activity() {
    let (ledger, clock) = ledger();
    approve(&ledger, X, "Producer");

    clock.set(T0 + 100);
    ledger.create_batch(X, NewBatch::new("Lot A", units(10))).unwrap();
    // Clock steps back: the second batch must not predate the first.
    clock.set(T0 + 50);
    ledger.create_batch(X, NewBatch::new("Lot B", units(10))).unwrap();
    let transfer_id = ledger.request_transfer(X, Y, 2, units(5)).unwrap();

    for id in [1, 2] {
        let created = ledger.get_activities_by_related(ActivityType::TokenCreated, id);
        assert_eq!(ledger.get_batch(id).unwrap().date_created, created[0].timestamp);
    }
    assert_eq!(ledger.get_batch(2).unwrap().date_created, T0 + 100);
    let requested =
        ledger.get_activities_by_related(ActivityType::TransferRequested, transfer_id);
    assert_eq!(
        ledger.get_transfer(transfer_id).unwrap().date_created,
        requested[0].timestamp
    );
}

#[test]
fn test_user_transfer_history_and_ownership() {
    let (ledger, _clock) = ledger();
    approve(&ledger, X, "Producer");
    approve(&ledger, Y, "Exporter");
    ledger.create_batch(X, NewBatch::new("Lot A", units(100))).unwrap();
    ledger.create_batch(Y, NewBatch::new("Lot B", units(50))).unwrap();
    let t1 = ledger.request_transfer(X, Y, 1, units(100)).unwrap();
    ledger.accept_transfer(Y, t1).unwrap();
    let t2 = ledger.request_transfer(Y, X, 2, units(10)).unwrap();

    let history: Vec<_> = ledger.get_user_transfers(&X).into_iter().map(|t| t.id).collect();
    assert_eq!(history, vec![t1, t2]);

    // X created batch 1 but gave it all away; still "owned" through creation.
    let owned: Vec<_> = ledger.list_batches_owned_by(&X).into_iter().map(|b| b.id).collect();
    assert_eq!(owned, vec![1]);
    let owned: Vec<_> = ledger.list_batches_owned_by(&Y).into_iter().map(|b| b.id).collect();
    assert_eq!(owned, vec![1, 2]);
    assert_eq!(ledger.holders_of(1), vec![(Y, units(100))]);
}
