//! # End-to-End Scenarios
//!
//! The coffee-lot walkthrough: an admin approves a producer, the producer
//! creates a batch and ships part of it, and the buyer accepts.

mod common;

use common::*;
use ledger_runtime::{
    ActivityLogApi, ActorDirectoryApi, BatchRegistryApi, NewBatch, TransferWorkflowApi,
};
use shared_types::{ActivityType, LedgerError, TransferStatus, UserStatus};

/// Runs scenarios A through C and returns the ledger and transfer id.
fn through_scenario_c() -> (TestLedger, u64) {
    let (ledger, _clock) = ledger();
    approve(&ledger, X, "Producer");
    approve(&ledger, Y, "Exporter");
    ledger
        .create_batch(X, NewBatch::new("Coffee Lot 1", units(1000)))
        .unwrap();
    let transfer_id = ledger.request_transfer(X, Y, 1, units(400)).unwrap();
    ledger.accept_transfer(Y, transfer_id).unwrap();
    (ledger, transfer_id)
}

#[test]
fn test_scenario_a_admin_registers_producer() {
    let (ledger, _clock) = ledger();

    ledger
        .register_by_admin(ADMIN, X, "Producer", UserStatus::Approved)
        .unwrap();

    assert!(ledger.is_registered(&X));
    let user = ledger.get_user(&X).unwrap();
    assert_eq!(user.status, UserStatus::Approved);
    assert_eq!(user.role, "Producer");
    assert!(!ledger.is_registered(&ADMIN));
}

#[test]
fn test_scenario_b_create_root_batch() {
    let (ledger, _clock) = ledger();
    approve(&ledger, X, "Producer");

    let id = ledger
        .create_batch(
            X,
            NewBatch::new("Coffee Lot 1", units(1000)).with_features(r#"{"origin":"Huila"}"#),
        )
        .unwrap();

    assert_eq!(id, 1);
    let batch = ledger.get_batch(1).unwrap();
    assert_eq!(batch.total_supply, units(1000));
    assert_eq!(batch.parent_id, None);
    assert_eq!(batch.date_created, T0);
    assert_eq!(ledger.get_balance(1, &X), units(1000));
}

#[test]
fn test_scenario_c_transfer_accepted() {
    let (ledger, transfer_id) = through_scenario_c();

    assert_eq!(ledger.get_balance(1, &X), units(600));
    assert_eq!(ledger.get_balance(1, &Y), units(400));
    assert_eq!(
        ledger.get_transfer(transfer_id).unwrap().status,
        TransferStatus::Accepted
    );
}

#[test]
fn test_scenario_d_second_accept_fails() {
    let (ledger, transfer_id) = through_scenario_c();
    let activities_before = ledger.total_activities();

    let result = ledger.accept_transfer(Y, transfer_id);

    assert_eq!(
        result,
        Err(LedgerError::InvalidState {
            transfer_id,
            status: TransferStatus::Accepted
        })
    );
    assert_eq!(ledger.get_balance(1, &X), units(600));
    assert_eq!(ledger.get_balance(1, &Y), units(400));
    assert_eq!(ledger.total_activities(), activities_before);
}

#[test]
fn test_scenario_e_unregistered_creator() {
    let (ledger, _clock) = ledger();
    approve(&ledger, X, "Producer");
    ledger.create_batch(X, NewBatch::new("Lot A", units(10))).unwrap();

    let result = ledger.create_batch(Z, NewBatch::new("Lot Z", units(10)));

    assert_eq!(result, Err(LedgerError::NotRegistered { address: Z }));
    assert_eq!(ledger.total_batches(), 1);
    let next = ledger.create_batch(X, NewBatch::new("Lot B", units(10))).unwrap();
    assert_eq!(next, 2);
}

#[test]
fn test_full_walkthrough_activity_trail() {
    let (ledger, _transfer_id) = through_scenario_c();

    let trail: Vec<_> = ledger
        .get_all_activities()
        .into_iter()
        .map(|a| (a.activity_type, a.actor, a.related_id))
        .collect();

    assert_eq!(
        trail,
        vec![
            (ActivityType::UserRegisteredByAdmin, ADMIN, 1),
            (ActivityType::UserRegisteredByAdmin, ADMIN, 2),
            (ActivityType::TokenCreated, X, 1),
            (ActivityType::TransferRequested, X, 1),
            (ActivityType::TransferAccepted, Y, 1),
        ]
    );
}

#[test]
fn test_self_service_then_approval() {
    let (ledger, _clock) = ledger();

    let id = ledger.request_role(X, "Transporter").unwrap();
    assert_eq!(
        ledger.create_batch(X, NewBatch::new("Lot", units(5))),
        Err(LedgerError::NotApproved {
            address: X,
            status: UserStatus::Pending
        })
    );

    ledger.change_status(ADMIN, X, UserStatus::Approved).unwrap();

    assert_eq!(ledger.user_id_of(&X), Some(id));
    assert!(ledger.create_batch(X, NewBatch::new("Lot", units(5))).is_ok());
    let changes = ledger.get_activities_by_related(ActivityType::UserStatusChanged, id);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].actor, ADMIN);
}

#[test]
fn test_derived_batch_provenance() {
    let (ledger, _clock) = ledger();
    approve(&ledger, X, "Producer");
    approve(&ledger, Y, "Processor");
    ledger.create_batch(X, NewBatch::new("Cherries", units(1000))).unwrap();
    ledger
        .create_batch(Y, NewBatch::new("Green Coffee", units(800)).with_parent(1))
        .unwrap();
    ledger
        .create_batch(Y, NewBatch::new("Roasted", units(650)).with_parent(2))
        .unwrap();

    let chain: Vec<_> = ledger.provenance(3).unwrap().into_iter().map(|b| b.id).collect();
    assert_eq!(chain, vec![3, 2, 1]);
    let children: Vec<_> = ledger.children_of(1).into_iter().map(|b| b.id).collect();
    assert_eq!(children, vec![2]);
    assert_eq!(
        ledger.create_batch(Y, NewBatch::new("Orphan", units(1)).with_parent(9)),
        Err(LedgerError::ParentNotFound { parent_id: 9 })
    );
}

#[test]
fn test_snapshot_after_walkthrough() {
    let (ledger, transfer_id) = through_scenario_c();

    let snapshot = ledger.snapshot();

    assert_eq!(snapshot.admin, ADMIN);
    assert_eq!(snapshot.token.symbol, "SCB");
    assert_eq!(snapshot.users.len(), 2);
    assert_eq!(ledger.get_user_by_id(2).map(|u| u.address), Some(Y));
    assert_eq!(ledger.list_users(), snapshot.users);
    assert_eq!(snapshot.held_in(1), units(1000));
    assert_eq!(snapshot.transfers[0].id, transfer_id);
    assert_eq!(snapshot.activities.len(), 5);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["balances"].as_array().map(Vec::len), Some(2));
}
