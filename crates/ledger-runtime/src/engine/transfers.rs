//! `TransferWorkflowApi` for the engine.

use super::{rejected, Commit, SupplyChainLedger};
use sc_03_transfer_workflow::{Transfer, TransferWorkflowApi};
use sc_04_activity_log::TimeSource;
use shared_bus::{EventPublisher, LedgerEvent};
use shared_types::{ActivityType, Address, BatchId, LedgerError, LedgerResult, TransferId, U256};
use tracing::{info, instrument};

impl<T: TimeSource, P: EventPublisher> TransferWorkflowApi for SupplyChainLedger<T, P> {
    #[instrument(skip(self), fields(from = %from, to = %to))]
    fn request_transfer(
        &self,
        from: Address,
        to: Address,
        batch_id: BatchId,
        amount: U256,
    ) -> LedgerResult<TransferId> {
        let mut state = self.state.write();
        let now = self.now(&state);

        state
            .directory
            .require_approved(&from)
            .map_err(|e| rejected("request_transfer", &from, e))?;

        let state = &mut *state;
        let id = state
            .transfers
            .request(&state.registry, from, to, batch_id, amount, now)
            .map_err(|e| rejected("request_transfer", &from, e))?;

        self.commit(
            state,
            Commit {
                activity_type: ActivityType::TransferRequested,
                actor: from,
                related_id: id,
                description: format!(
                    "Requested transfer of {} from batch #{} to {}",
                    amount, batch_id, to
                ),
                data: Vec::new(),
                event: Some(LedgerEvent::TransferRequested {
                    transfer_id: id,
                    from,
                    to,
                    token_id: batch_id,
                    amount,
                }),
            },
            now,
        );
        info!(transfer_id = id, batch_id, %amount, "Transfer requested");
        Ok(id)
    }

    #[instrument(skip(self), fields(caller = %caller))]
    fn accept_transfer(&self, caller: Address, transfer_id: TransferId) -> LedgerResult<()> {
        let mut state = self.state.write();
        let now = self.now(&state);
        let state = &mut *state;

        let transfer = state
            .transfers
            .accept(&mut state.registry, &caller, transfer_id)
            .map_err(|e| rejected("accept_transfer", &caller, e))?
            .clone();

        self.commit(
            state,
            Commit {
                activity_type: ActivityType::TransferAccepted,
                actor: caller,
                related_id: transfer_id,
                description: format!(
                    "Accepted transfer #{} of {} from batch #{}",
                    transfer_id, transfer.amount, transfer.token_id
                ),
                data: Vec::new(),
                event: Some(LedgerEvent::TransferAccepted {
                    transfer_id,
                    from: transfer.from,
                    to: transfer.to,
                }),
            },
            now,
        );
        info!(
            transfer_id,
            batch_id = transfer.token_id,
            amount = %transfer.amount,
            "Transfer accepted, balance moved"
        );
        Ok(())
    }

    #[instrument(skip(self), fields(caller = %caller))]
    fn reject_transfer(&self, caller: Address, transfer_id: TransferId) -> LedgerResult<()> {
        let mut state = self.state.write();
        let now = self.now(&state);

        let transfer = state
            .transfers
            .reject(&caller, transfer_id)
            .map_err(|e| rejected("reject_transfer", &caller, e))?
            .clone();

        self.commit(
            &mut state,
            Commit {
                activity_type: ActivityType::TransferRejected,
                actor: caller,
                related_id: transfer_id,
                description: format!(
                    "Rejected transfer #{} of {} from batch #{}",
                    transfer_id, transfer.amount, transfer.token_id
                ),
                data: Vec::new(),
                event: Some(LedgerEvent::TransferRejected {
                    transfer_id,
                    from: transfer.from,
                    to: transfer.to,
                }),
            },
            now,
        );
        info!(transfer_id, "Transfer rejected");
        Ok(())
    }

    fn get_transfer(&self, id: TransferId) -> LedgerResult<Transfer> {
        self.state
            .read()
            .transfers
            .get(id)
            .cloned()
            .ok_or(LedgerError::transfer_not_found(id))
    }

    fn get_pending_transfers(&self, recipient: &Address) -> Vec<Transfer> {
        let state = self.state.read();
        state.transfers.pending_for(recipient).into_iter().cloned().collect()
    }

    fn get_outgoing_pending(&self, sender: &Address) -> Vec<Transfer> {
        let state = self.state.read();
        state.transfers.outgoing_pending(sender).into_iter().cloned().collect()
    }

    fn get_user_transfers(&self, address: &Address) -> Vec<Transfer> {
        let state = self.state.read();
        state.transfers.involving(address).into_iter().cloned().collect()
    }

    fn total_transfers(&self) -> u64 {
        self.state.read().transfers.len() as u64
    }
}
