// SPDX-FileCopyrightText: 2026 Anketa Maintainers
// SPDX-License-Identifier: MIT

//! Save coordination between field machines and the persistence capability.
//!
//! Each field gets a slot tracking its save state and a submit generation.
//! At most one submit per field is in flight: a second submit while one is
//! pending is suppressed, not queued. Resolved calls come back as
//! [`SaveOutcome`]s on a channel; outcomes whose generation no longer matches
//! the slot (the field was cancelled or re-opened since dispatch) are stale
//! and dropped.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::client::{ClientError, ProfileClient};
use crate::model::{FieldId, FieldValue, SaveState, UserId};

/// When the aggregate is told a field's submit cycle is complete.
///
/// The observed page signals completion right after dispatch, before the
/// network result is known, so the page-level saving indicator clears while
/// the write may still fail. `Immediate` reproduces that timing;
/// `AfterPersist` holds the acknowledgement until the outcome arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AckMode {
    #[default]
    Immediate,
    AfterPersist,
}

/// Resolution of one dispatched persistence call.
#[derive(Debug)]
pub struct SaveOutcome {
    pub field_id: FieldId,
    pub generation: u64,
    pub value: FieldValue,
    pub result: Result<(), ClientError>,
}

/// What `submit` did with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDisposition {
    Dispatched { generation: u64 },
    /// A submit for this field is already pending; no second persist call
    /// was made.
    Suppressed,
}

#[derive(Debug, Default)]
struct Slot {
    save_state: SaveState,
    generation: u64,
}

pub struct SaveCoordinator {
    client: Arc<dyn ProfileClient>,
    slots: BTreeMap<FieldId, Slot>,
    outcome_tx: mpsc::UnboundedSender<SaveOutcome>,
    ack_mode: AckMode,
}

impl SaveCoordinator {
    pub fn new(
        client: Arc<dyn ProfileClient>,
        ack_mode: AckMode,
    ) -> (Self, mpsc::UnboundedReceiver<SaveOutcome>) {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        (Self { client, slots: BTreeMap::new(), outcome_tx, ack_mode }, outcome_rx)
    }

    pub fn ack_mode(&self) -> AckMode {
        self.ack_mode
    }

    pub fn save_state(&self, field_id: FieldId) -> SaveState {
        self.slots.get(&field_id).map(|slot| slot.save_state).unwrap_or_default()
    }

    pub fn has_pending(&self) -> bool {
        self.slots.values().any(|slot| slot.save_state == SaveState::Pending)
    }

    /// Resets a field's save state on edit-open.
    pub fn reset(&mut self, field_id: FieldId) {
        let slot = self.slots.entry(field_id).or_default();
        slot.save_state = SaveState::Idle;
    }

    /// Marks any in-flight submit for this field stale (edit cancelled); its
    /// eventual outcome will no longer match the slot generation.
    pub fn invalidate(&mut self, field_id: FieldId) {
        let slot = self.slots.entry(field_id).or_default();
        slot.generation += 1;
        slot.save_state = SaveState::Idle;
    }

    /// Dispatches one persistence call for the field, unless one is already
    /// pending. Gender routes through the account-attribute capability,
    /// everything else through the profile write.
    pub fn submit(
        &mut self,
        user: &UserId,
        field_id: FieldId,
        value: FieldValue,
    ) -> SubmitDisposition {
        let slot = self.slots.entry(field_id).or_default();
        if slot.save_state == SaveState::Pending {
            return SubmitDisposition::Suppressed;
        }

        slot.generation += 1;
        slot.save_state = SaveState::Pending;
        let generation = slot.generation;

        let client = Arc::clone(&self.client);
        let outcome_tx = self.outcome_tx.clone();
        let user = user.clone();
        tokio::spawn(async move {
            let result = if field_id.is_account_attribute() {
                client.persist_account_attribute(&user, field_id, value.clone()).await
            } else {
                client.persist_field(&user, field_id, value.clone()).await
            };
            // The receiver may be gone during shutdown; nothing to do then.
            let _ = outcome_tx.send(SaveOutcome { field_id, generation, value, result });
        });

        SubmitDisposition::Dispatched { generation }
    }

    /// Applies a resolved outcome to its slot. Returns `false` when the
    /// outcome is stale and must be ignored.
    pub fn resolve(&mut self, outcome: &SaveOutcome) -> bool {
        let Some(slot) = self.slots.get_mut(&outcome.field_id) else {
            return false;
        };
        if outcome.generation != slot.generation || slot.save_state != SaveState::Pending {
            return false;
        }
        slot.save_state = match outcome.result {
            Ok(()) => SaveState::Complete,
            Err(_) => SaveState::Error,
        };
        true
    }
}
