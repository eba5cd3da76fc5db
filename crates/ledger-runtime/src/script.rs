//! # Operation Scripts
//!
//! JSON-lines protocol the `ledger-node` binary replays. One object per line,
//! tagged by `"op"`. Quantities, in commands and in results alike, are
//! decimal strings (plain JSON integers are accepted on input) so values
//! beyond `u64` survive the trip.
//!
//! ```text
//! {"op":"register_by_admin","caller":"0xad..","address":"0x01..","role":"Producer","status":"Approved"}
//! {"op":"create_batch","caller":"0x01..","name":"Coffee Lot 1","total_supply":"1000"}
//! {"op":"request_transfer","caller":"0x01..","to":"0x02..","batch_id":1,"amount":"400"}
//! ```
//!
//! Each line produces one [`ScriptOutcome`]. Ledger errors are reported in
//! the outcome and replay continues. A line that does not parse stops the
//! replay.

use sc_01_actor_directory::ActorDirectoryApi;
use sc_02_batch_registry::{BatchRegistryApi, NewBatch};
use sc_03_transfer_workflow::TransferWorkflowApi;
use sc_04_activity_log::{ActivityLogApi, BatchEvent};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared_types::{ActivityType, Address, BatchId, LedgerError, TransferId, UserStatus, U256};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::debug;

/// Everything the ledger exposes, in one bound.
pub trait LedgerApi:
    ActorDirectoryApi + BatchRegistryApi + TransferWorkflowApi + ActivityLogApi
{
}

impl<L> LedgerApi for L where
    L: ActorDirectoryApi + BatchRegistryApi + TransferWorkflowApi + ActivityLogApi
{
}

/// One scripted operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    // Actor Directory
    RequestRole {
        caller: Address,
        role: String,
    },
    RegisterByAdmin {
        caller: Address,
        address: Address,
        role: String,
        status: UserStatus,
    },
    ChangeStatus {
        caller: Address,
        address: Address,
        status: UserStatus,
    },
    GetUser {
        address: Address,
    },
    ListUsers,

    // Batch Registry
    CreateBatch {
        caller: Address,
        name: String,
        #[serde(with = "shared_types::quantity")]
        total_supply: U256,
        #[serde(default)]
        features: String,
        #[serde(default)]
        parent_id: Option<BatchId>,
    },
    GetBatch {
        batch_id: BatchId,
    },
    GetBalance {
        batch_id: BatchId,
        owner: Address,
    },
    ListBatchesOwnedBy {
        owner: Address,
    },
    Provenance {
        batch_id: BatchId,
    },
    CountValidBatches,

    // Transfer Workflow
    RequestTransfer {
        caller: Address,
        to: Address,
        batch_id: BatchId,
        #[serde(with = "shared_types::quantity")]
        amount: U256,
    },
    AcceptTransfer {
        caller: Address,
        transfer_id: TransferId,
    },
    RejectTransfer {
        caller: Address,
        transfer_id: TransferId,
    },
    GetTransfer {
        transfer_id: TransferId,
    },
    PendingTransfers {
        address: Address,
    },

    // Activity Log
    RecordBatchEvent {
        caller: Address,
        batch_id: BatchId,
        event_type: String,
        #[serde(default)]
        location: String,
        #[serde(default)]
        metadata: String,
    },
    ActivitiesByType {
        activity_type: ActivityType,
    },
    TotalActivities,
}

impl Command {
    /// The `"op"` tag, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RequestRole { .. } => "request_role",
            Self::RegisterByAdmin { .. } => "register_by_admin",
            Self::ChangeStatus { .. } => "change_status",
            Self::GetUser { .. } => "get_user",
            Self::ListUsers => "list_users",
            Self::CreateBatch { .. } => "create_batch",
            Self::GetBatch { .. } => "get_batch",
            Self::GetBalance { .. } => "get_balance",
            Self::ListBatchesOwnedBy { .. } => "list_batches_owned_by",
            Self::Provenance { .. } => "provenance",
            Self::CountValidBatches => "count_valid_batches",
            Self::RequestTransfer { .. } => "request_transfer",
            Self::AcceptTransfer { .. } => "accept_transfer",
            Self::RejectTransfer { .. } => "reject_transfer",
            Self::GetTransfer { .. } => "get_transfer",
            Self::PendingTransfers { .. } => "pending_transfers",
            Self::RecordBatchEvent { .. } => "record_batch_event",
            Self::ActivitiesByType { .. } => "activities_by_type",
            Self::TotalActivities => "total_activities",
        }
    }

    /// Runs the command against `ledger`.
    pub fn execute<L: LedgerApi + ?Sized>(self, ledger: &L) -> Result<Value, LedgerError> {
        let value = match self {
            Self::RequestRole { caller, role } => {
                json!({ "user_id": ledger.request_role(caller, &role)? })
            }
            Self::RegisterByAdmin {
                caller,
                address,
                role,
                status,
            } => json!({ "user_id": ledger.register_by_admin(caller, address, &role, status)? }),
            Self::ChangeStatus {
                caller,
                address,
                status,
            } => {
                ledger.change_status(caller, address, status)?;
                json!({ "status": status })
            }
            Self::GetUser { address } => json!(ledger.get_user(&address)?),
            Self::ListUsers => json!(ledger.list_users()),
            Self::CreateBatch {
                caller,
                name,
                total_supply,
                features,
                parent_id,
            } => {
                let request = NewBatch {
                    name,
                    total_supply,
                    features,
                    parent_id,
                };
                json!({ "batch_id": ledger.create_batch(caller, request)? })
            }
            Self::GetBatch { batch_id } => json!(ledger.get_batch(batch_id)?),
            Self::GetBalance { batch_id, owner } => {
                json!({ "balance": ledger.get_balance(batch_id, &owner).to_string() })
            }
            Self::ListBatchesOwnedBy { owner } => json!(ledger.list_batches_owned_by(&owner)),
            Self::Provenance { batch_id } => {
                let chain: Vec<BatchId> = ledger
                    .provenance(batch_id)?
                    .into_iter()
                    .map(|b| b.id)
                    .collect();
                json!({ "chain": chain })
            }
            Self::CountValidBatches => json!({ "count": ledger.count_valid_batches() }),
            Self::RequestTransfer {
                caller,
                to,
                batch_id,
                amount,
            } => json!({ "transfer_id": ledger.request_transfer(caller, to, batch_id, amount)? }),
            Self::AcceptTransfer {
                caller,
                transfer_id,
            } => {
                ledger.accept_transfer(caller, transfer_id)?;
                json!({ "status": "Accepted" })
            }
            Self::RejectTransfer {
                caller,
                transfer_id,
            } => {
                ledger.reject_transfer(caller, transfer_id)?;
                json!({ "status": "Rejected" })
            }
            Self::GetTransfer { transfer_id } => json!(ledger.get_transfer(transfer_id)?),
            Self::PendingTransfers { address } => json!(ledger.get_pending_transfers(&address)),
            Self::RecordBatchEvent {
                caller,
                batch_id,
                event_type,
                location,
                metadata,
            } => {
                let event = BatchEvent {
                    event_type,
                    location,
                    metadata,
                };
                json!({ "activity_id": ledger.record_batch_event(caller, batch_id, event)? })
            }
            Self::ActivitiesByType { activity_type } => {
                json!(ledger.get_activities_by_type(activity_type))
            }
            Self::TotalActivities => json!({ "count": ledger.total_activities() }),
        };
        Ok(value)
    }
}

/// Result of one script line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptOutcome {
    /// 1-based line number in the script.
    pub line: usize,
    /// The command's `"op"` tag.
    pub op: String,
    /// Whether the operation succeeded.
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

/// Error half of a failed outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable code from [`LedgerError::code`].
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Totals for a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub executed: usize,
    pub failed: usize,
}

/// Fatal replay errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write outcome: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Executes one parsed command and wraps the result.
pub fn run_command<L: LedgerApi + ?Sized>(ledger: &L, line: usize, command: Command) -> ScriptOutcome {
    let op = command.name().to_string();
    match command.execute(ledger) {
        Ok(result) => ScriptOutcome {
            line,
            op,
            ok: true,
            result: Some(result),
            error: None,
        },
        Err(err) => ScriptOutcome {
            line,
            op,
            ok: false,
            result: None,
            error: Some(ErrorBody {
                code: err.code().to_string(),
                message: err.to_string(),
            }),
        },
    }
}

/// Replays every line of `reader`, writing one JSON outcome per line to
/// `writer`.
pub fn replay<L, R, W>(ledger: &L, reader: R, mut writer: W) -> Result<ReplaySummary, ScriptError>
where
    L: LedgerApi + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut summary = ReplaySummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let Some(command) =
            parse_line(&line).map_err(|source| ScriptError::Parse { line: line_no, source })?
        else {
            continue;
        };

        debug!(line = line_no, op = command.name(), "Replaying command");
        let outcome = run_command(ledger, line_no, command);
        summary.executed += 1;
        if !outcome.ok {
            summary.failed += 1;
        }
        serde_json::to_writer(&mut writer, &outcome)?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN: &str = "0xadadadadadadadadadadadadadadadadadadadad";
    const X: &str = "0x0101010101010101010101010101010101010101";

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# setup").unwrap(), None);
    }

    #[test]
    fn test_parse_register() {
        let line = format!(
            r#"{{"op":"register_by_admin","caller":"{}","address":"{}","role":"Producer","status":"Approved"}}"#,
            ADMIN, X
        );
        let command = parse_line(&line).unwrap().unwrap();
        assert_eq!(
            command,
            Command::RegisterByAdmin {
                caller: Address::repeat(0xAD),
                address: Address::repeat(0x01),
                role: "Producer".into(),
                status: UserStatus::Approved,
            }
        );
    }

    #[test]
    fn test_quantities_accept_strings_and_integers() {
        let from_string = format!(
            r#"{{"op":"create_batch","caller":"{}","name":"Lot","total_supply":"115792089237316195423570985008687907853269984665640564039457584007913129639935"}}"#,
            X
        );
        let from_number = format!(
            r#"{{"op":"create_batch","caller":"{}","name":"Lot","total_supply":1000}}"#,
            X
        );

        match parse_line(&from_string).unwrap().unwrap() {
            Command::CreateBatch {
                total_supply,
                parent_id,
                ..
            } => {
                assert_eq!(total_supply, U256::MAX);
                assert_eq!(parent_id, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
        match parse_line(&from_number).unwrap().unwrap() {
            Command::CreateBatch { total_supply, .. } => {
                assert_eq!(total_supply, U256::from(1000u64))
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bad_quantity_is_parse_error() {
        let line = format!(
            r#"{{"op":"request_transfer","caller":"{}","to":"{}","batch_id":1,"amount":"-5"}}"#,
            X, X
        );
        assert!(parse_line(&line).is_err());
    }

    #[test]
    fn test_unknown_op_is_parse_error() {
        assert!(parse_line(r#"{"op":"mint_everything"}"#).is_err());
    }

    #[test]
    fn test_command_serializes_amount_as_decimal() {
        let command = Command::RequestTransfer {
            caller: Address::repeat(1),
            to: Address::repeat(2),
            batch_id: 1,
            amount: U256::from(400u64),
        };
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["op"], "request_transfer");
        assert_eq!(json["amount"], "400");
    }
}
