// SPDX-FileCopyrightText: 2026 Anketa Maintainers
// SPDX-License-Identifier: MIT

//! The page-level aggregate composing one field machine per editable field.
//!
//! The page owns the broadcast signal pair and runs an explicit
//! publish/acknowledge protocol around save-all: it records which fields are
//! expected to acknowledge, each field acknowledges exactly once per submit
//! cycle, and the save signal clears when the last expected acknowledgement
//! arrives. No field ever reads another field's state.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::client::ProfileClient;
use crate::machine::{EditError, EditSignal, FieldEvent, FieldMachine};
use crate::model::{FieldDescriptor, FieldId, PhotoUrl, SaveState, SocialLink, UserId};
use crate::save::{AckMode, SaveCoordinator, SaveOutcome, SubmitDisposition};

/// The page-level edit trigger.
///
/// `SavingAll` is exited exactly when the save signal is reset; the change
/// signal clears later, once every field has left `editing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageMode {
    #[default]
    Idle,
    EditingAll,
    SavingAll,
}

pub struct ProfilePage {
    user_id: UserId,
    viewer_is_owner: bool,
    name: Option<String>,
    date_joined: Option<String>,
    photo: Option<PhotoUrl>,
    photo_state: SaveState,
    photo_error: Option<String>,
    fields: BTreeMap<FieldId, FieldMachine>,
    signal: EditSignal,
    mode: PageMode,
    pending_acks: BTreeSet<FieldId>,
    coordinator: SaveCoordinator,
    outcomes: mpsc::UnboundedReceiver<SaveOutcome>,
    client: Arc<dyn ProfileClient>,
}

impl ProfilePage {
    /// Builds a page for `user_id`'s profile as seen by `viewer`. All fields
    /// start empty; call [`load`](Self::load) to populate them.
    pub fn new(
        client: Arc<dyn ProfileClient>,
        user_id: UserId,
        viewer: Option<&UserId>,
        ack_mode: AckMode,
    ) -> Self {
        let viewer_is_owner = viewer == Some(&user_id);
        let fields = FieldId::EDITABLE
            .into_iter()
            .map(|field_id| {
                (field_id, FieldMachine::new(FieldDescriptor::empty(field_id), viewer_is_owner))
            })
            .collect();
        let (coordinator, outcomes) = SaveCoordinator::new(Arc::clone(&client), ack_mode);
        Self {
            user_id,
            viewer_is_owner,
            name: None,
            date_joined: None,
            photo: None,
            photo_state: SaveState::Idle,
            photo_error: None,
            fields,
            signal: EditSignal::default(),
            mode: PageMode::Idle,
            pending_acks: BTreeSet::new(),
            coordinator,
            outcomes,
            client,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn viewer_is_owner(&self) -> bool {
        self.viewer_is_owner
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn date_joined(&self) -> Option<&str> {
        self.date_joined.as_deref()
    }

    pub fn photo(&self) -> Option<&PhotoUrl> {
        self.photo.as_ref()
    }

    pub fn photo_state(&self) -> SaveState {
        self.photo_state
    }

    pub fn photo_error(&self) -> Option<&str> {
        self.photo_error.as_deref()
    }

    pub fn mode(&self) -> PageMode {
        self.mode
    }

    pub fn signal(&self) -> EditSignal {
        self.signal
    }

    pub fn field(&self, field_id: FieldId) -> Option<&FieldMachine> {
        self.fields.get(&field_id)
    }

    /// Field machines in page display order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldMachine> {
        self.fields.values()
    }

    pub fn save_state(&self, field_id: FieldId) -> SaveState {
        self.coordinator.save_state(field_id)
    }

    pub fn has_pending_saves(&self) -> bool {
        self.coordinator.has_pending()
    }

    /// Whether a field block renders at all: the owner always sees their own
    /// blocks, other viewers only see non-empty ones. Evaluated here, not by
    /// the field.
    pub fn is_block_visible(&self, field_id: FieldId) -> bool {
        if self.viewer_is_owner {
            return true;
        }
        self.fields.get(&field_id).is_some_and(|machine| machine.descriptor().has_value())
    }

    /// Fetches the profile snapshot and auxiliary account attributes,
    /// emitting the view analytics event fire-and-forget. Fetch failures are
    /// logged and degrade to empty fields; the page always renders.
    pub async fn load(&mut self) {
        {
            let client = Arc::clone(&self.client);
            let user = self.user_id.clone();
            tokio::spawn(async move {
                client.log_view_event(&user).await;
            });
        }

        match self.client.fetch_profile(&self.user_id).await {
            Ok(snapshot) => {
                self.name = snapshot.name.clone();
                self.date_joined = snapshot.date_joined.clone();
                self.photo = snapshot.profile_image.clone();
                for field_id in FieldId::EDITABLE {
                    if field_id.is_account_attribute() {
                        continue;
                    }
                    if let Some(machine) = self.fields.get_mut(&field_id) {
                        machine.load_value(snapshot.field_value(field_id));
                        machine.set_visibility(snapshot.visibility(field_id));
                    }
                }
            }
            Err(err) => {
                tracing::warn!(user = %self.user_id, error = %err, "profile fetch failed, rendering defaults");
            }
        }

        match self.client.fetch_account_attributes(&self.user_id).await {
            Ok(account) => {
                if let Some(machine) = self.fields.get_mut(&FieldId::Gender) {
                    machine.load_value(account.gender_value());
                }
            }
            Err(err) => {
                tracing::warn!(user = %self.user_id, error = %err, "account fetch failed, rendering defaults");
            }
        }
    }

    /// Requests all fields open their editors.
    pub fn begin_edit(&mut self) {
        if self.mode != PageMode::Idle || !self.viewer_is_owner {
            return;
        }
        self.mode = PageMode::EditingAll;
        self.signal.change_data = true;
        self.broadcast();
    }

    /// Requests all open fields submit. The change signal stays up until
    /// every field has left `editing`; the save signal clears when the last
    /// expected acknowledgement arrives.
    pub fn save_all(&mut self) {
        if self.mode != PageMode::EditingAll {
            return;
        }
        self.pending_acks = self
            .fields
            .values()
            .filter(|machine| machine.state().is_editing())
            .map(FieldMachine::field_id)
            .collect();
        if self.pending_acks.is_empty() {
            self.mode = PageMode::Idle;
            return;
        }
        self.mode = PageMode::SavingAll;
        self.signal.save_data = true;
        self.broadcast();
    }

    /// Aborts the page-wide edit: every field discards its draft.
    pub fn cancel_all(&mut self) {
        if self.mode != PageMode::EditingAll {
            return;
        }
        self.mode = PageMode::Idle;
        self.signal.change_data = false;
        self.broadcast();
    }

    /// Opens a single field's editor outside the page-wide cycle.
    pub fn open_field(&mut self, field_id: FieldId) {
        if !self.viewer_is_owner {
            return;
        }
        self.apply_event(field_id, FieldEvent::Open);
    }

    /// Cancels a single field's editor. An in-flight submit for the field
    /// becomes stale; its eventual outcome is dropped.
    pub fn cancel_field(&mut self, field_id: FieldId) {
        self.apply_event(field_id, FieldEvent::Cancel);
        self.maybe_clear_change();
    }

    /// Submits a single field's draft.
    pub fn submit_field(&mut self, field_id: FieldId) {
        let editing =
            self.fields.get(&field_id).is_some_and(|machine| machine.state().is_editing());
        if !editing {
            return;
        }
        self.pending_acks.insert(field_id);
        self.dispatch_submit(field_id);
    }

    pub fn edit_text(
        &mut self,
        field_id: FieldId,
        text: impl Into<String>,
    ) -> Result<(), EditError> {
        let machine = self.fields.get_mut(&field_id).ok_or(EditError::NotEditing)?;
        machine.edit_text(text)
    }

    pub fn edit_link(&mut self, link: SocialLink) -> Result<(), EditError> {
        let machine = self.fields.get_mut(&FieldId::SocialLinks).ok_or(EditError::NotEditing)?;
        machine.edit_link(link)
    }

    /// Applies all resolved save outcomes without blocking. Returns how many
    /// were applied (stale outcomes dropped silently).
    pub fn pump_outcomes(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.outcomes.try_recv() {
            if self.apply_outcome(outcome) {
                applied += 1;
            }
        }
        self.maybe_clear_change();
        applied
    }

    /// Awaits outcomes until no submit is in flight.
    pub async fn drain_saves(&mut self) {
        while let Ok(outcome) = self.outcomes.try_recv() {
            self.apply_outcome(outcome);
        }
        while self.coordinator.has_pending() {
            let Some(outcome) = self.outcomes.recv().await else {
                break;
            };
            self.apply_outcome(outcome);
        }
        self.maybe_clear_change();
    }

    pub async fn save_photo(&mut self, payload: Vec<u8>) {
        self.photo_state = SaveState::Pending;
        self.photo_error = None;
        match self.client.upload_profile_photo(&self.user_id, payload).await {
            Ok(url) => {
                self.photo = Some(url);
                self.photo_state = SaveState::Complete;
            }
            Err(err) => {
                tracing::warn!(user = %self.user_id, error = %err, "photo upload failed");
                self.photo_state = SaveState::Error;
                self.photo_error = Some(err.to_string());
            }
        }
    }

    pub async fn delete_photo(&mut self) {
        self.photo_state = SaveState::Pending;
        self.photo_error = None;
        match self.client.delete_profile_photo(&self.user_id).await {
            Ok(()) => {
                self.photo = None;
                self.photo_state = SaveState::Complete;
            }
            Err(err) => {
                tracing::warn!(user = %self.user_id, error = %err, "photo delete failed");
                self.photo_state = SaveState::Error;
                self.photo_error = Some(err.to_string());
            }
        }
    }

    /// Publishes the current signal to every machine until a fixed point:
    /// handling an event may mutate the signal (an acknowledgement clearing
    /// the save flag), in which case one more pass lets every machine record
    /// the new level without re-firing.
    fn broadcast(&mut self) {
        let field_ids: Vec<FieldId> = self.fields.keys().copied().collect();
        loop {
            let mut fired = false;
            let signal = self.signal;
            for field_id in &field_ids {
                let Some(machine) = self.fields.get_mut(field_id) else {
                    continue;
                };
                let events = machine.observe(signal);
                fired |= !events.is_empty();
                for event in events {
                    self.apply_event(*field_id, event);
                }
            }
            if !fired && signal == self.signal {
                break;
            }
            if !fired {
                // Signal changed mid-pass; one more pass records the level.
                continue;
            }
        }
    }

    fn apply_event(&mut self, field_id: FieldId, event: FieldEvent) {
        match event {
            FieldEvent::Open => {
                if let Some(machine) = self.fields.get_mut(&field_id) {
                    machine.open();
                }
                self.coordinator.reset(field_id);
            }
            FieldEvent::Cancel => {
                let was_editing = self
                    .fields
                    .get(&field_id)
                    .is_some_and(|machine| machine.state().is_editing());
                if let Some(machine) = self.fields.get_mut(&field_id) {
                    machine.cancel();
                }
                if was_editing {
                    self.coordinator.invalidate(field_id);
                }
            }
            FieldEvent::Submit => self.dispatch_submit(field_id),
        }
    }

    fn dispatch_submit(&mut self, field_id: FieldId) {
        let Some(machine) = self.fields.get(&field_id) else {
            return;
        };
        match machine.submit_value() {
            // Nothing to persist (no editor, or draft equals the committed
            // value): acknowledge so the page signal can still clear, and
            // let the field come to rest.
            None => {
                if let Some(machine) = self.fields.get_mut(&field_id) {
                    if machine.state().is_editing() {
                        machine.cancel();
                    }
                }
                self.acknowledge(field_id);
            }
            Some(value) => {
                match self.coordinator.submit(&self.user_id, field_id, value) {
                    SubmitDisposition::Dispatched { .. } => {
                        if self.coordinator.ack_mode() == AckMode::Immediate {
                            // Deliberate fire-and-forget: the page-level
                            // saving indicator clears before the write is
                            // known to be durable.
                            self.acknowledge(field_id);
                        }
                    }
                    SubmitDisposition::Suppressed => {
                        tracing::debug!(field = %field_id, "submit suppressed, one already pending");
                        self.acknowledge(field_id);
                    }
                }
            }
        }
    }

    /// One acknowledgement per field per submit cycle; the last one resets
    /// the save signal exactly once.
    fn acknowledge(&mut self, field_id: FieldId) {
        if !self.pending_acks.remove(&field_id) {
            return;
        }
        if self.pending_acks.is_empty() && self.signal.save_data {
            self.signal.save_data = false;
            self.mode = PageMode::Idle;
        }
    }

    fn apply_outcome(&mut self, outcome: SaveOutcome) -> bool {
        if !self.coordinator.resolve(&outcome) {
            tracing::debug!(field = %outcome.field_id, "dropping stale save outcome");
            return false;
        }
        let field_id = outcome.field_id;
        if let Some(machine) = self.fields.get_mut(&field_id) {
            match &outcome.result {
                Ok(()) => machine.commit_save(outcome.value),
                Err(err) => {
                    tracing::warn!(field = %field_id, error = %err, "field save failed");
                    machine.reject_save();
                    // The page is still in edit mode: the field keeps its
                    // draft so the user can retry or cancel.
                    if self.signal.change_data && self.mode == PageMode::Idle {
                        self.mode = PageMode::EditingAll;
                    }
                }
            }
        }
        if self.coordinator.ack_mode() == AckMode::AfterPersist {
            self.acknowledge(field_id);
        }
        true
    }

    /// Clears the change signal once the save signal is down and every field
    /// has left `editing`.
    fn maybe_clear_change(&mut self) {
        if self.mode != PageMode::Idle || !self.signal.change_data || self.signal.save_data {
            return;
        }
        if self.fields.values().any(|machine| machine.state().is_editing()) {
            return;
        }
        self.signal.change_data = false;
        self.broadcast();
    }
}
