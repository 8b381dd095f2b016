// SPDX-FileCopyrightText: 2026 Anketa Maintainers
// SPDX-License-Identifier: MIT

//! In-process `ProfileClient` with failure injection.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::model::{
    AccountAttributes, FieldId, FieldValue, Gender, LanguageProficiency, PhotoUrl,
    ProfileSnapshot, UserId,
};

use super::{ClientError, ProfileClient};

#[derive(Debug, Default)]
struct MemoryState {
    snapshot: ProfileSnapshot,
    account: AccountAttributes,
    photo: Option<PhotoUrl>,
    view_events: u32,
    fail_persists: bool,
    fail_fetches: bool,
    persist_calls: Vec<(FieldId, FieldValue)>,
}

/// A profile service held in memory behind a mutex.
///
/// Writes are applied to the held snapshot so a subsequent fetch observes
/// them; `fail_*` toggles reject the corresponding calls for exercising the
/// error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryClient {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryClient {
    pub fn new(snapshot: ProfileSnapshot, account: AccountAttributes) -> Self {
        let photo = snapshot.profile_image.clone();
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                snapshot,
                account,
                photo,
                ..MemoryState::default()
            })),
        }
    }

    pub fn set_fail_persists(&self, fail: bool) {
        self.lock().fail_persists = fail;
    }

    pub fn set_fail_fetches(&self, fail: bool) {
        self.lock().fail_fetches = fail;
    }

    /// Every persist call observed so far, in dispatch-completion order.
    pub fn persist_calls(&self) -> Vec<(FieldId, FieldValue)> {
        self.lock().persist_calls.clone()
    }

    pub fn view_events(&self) -> u32 {
        self.lock().view_events
    }

    pub fn snapshot(&self) -> ProfileSnapshot {
        self.lock().snapshot.clone()
    }

    pub fn account(&self) -> AccountAttributes {
        self.lock().account.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().expect("memory client lock poisoned")
    }

    fn apply_field(state: &mut MemoryState, field_id: FieldId, value: &FieldValue) {
        let text = value.as_text().map(str::to_owned);
        match field_id {
            FieldId::Name => state.snapshot.name = text,
            FieldId::Country => state.snapshot.country = text,
            FieldId::LevelOfEducation => state.snapshot.level_of_education = text,
            FieldId::LanguageProficiencies => {
                state.snapshot.language_proficiencies =
                    text.map(LanguageProficiency::new).into_iter().collect();
            }
            FieldId::Bio => state.snapshot.bio = text,
            FieldId::SocialLinks => {
                state.snapshot.social_links = value.as_links().map(<[_]>::to_vec).unwrap_or_default();
            }
            FieldId::Gender => {
                state.account.gender = text.as_deref().and_then(Gender::from_code);
            }
        }
    }
}

#[async_trait]
impl ProfileClient for MemoryClient {
    async fn fetch_profile(&self, user: &UserId) -> Result<ProfileSnapshot, ClientError> {
        let state = self.lock();
        if state.fail_fetches {
            return Err(ClientError::Fetch(format!("profile for '{user}' unavailable")));
        }
        Ok(state.snapshot.clone())
    }

    async fn fetch_account_attributes(
        &self,
        user: &UserId,
    ) -> Result<AccountAttributes, ClientError> {
        let state = self.lock();
        if state.fail_fetches {
            return Err(ClientError::Fetch(format!("account for '{user}' unavailable")));
        }
        Ok(state.account.clone())
    }

    async fn persist_field(
        &self,
        _user: &UserId,
        field_id: FieldId,
        value: FieldValue,
    ) -> Result<(), ClientError> {
        let mut state = self.lock();
        state.persist_calls.push((field_id, value.clone()));
        if state.fail_persists {
            return Err(ClientError::Persistence(format!("write to '{field_id}' rejected")));
        }
        Self::apply_field(&mut state, field_id, &value);
        Ok(())
    }

    async fn persist_account_attribute(
        &self,
        _user: &UserId,
        field_id: FieldId,
        value: FieldValue,
    ) -> Result<(), ClientError> {
        let mut state = self.lock();
        state.persist_calls.push((field_id, value.clone()));
        if state.fail_persists {
            return Err(ClientError::Persistence(format!("write to '{field_id}' rejected")));
        }
        Self::apply_field(&mut state, field_id, &value);
        Ok(())
    }

    async fn upload_profile_photo(
        &self,
        user: &UserId,
        payload: Vec<u8>,
    ) -> Result<PhotoUrl, ClientError> {
        let mut state = self.lock();
        if state.fail_persists {
            return Err(ClientError::Persistence("photo upload rejected".to_owned()));
        }
        if payload.is_empty() {
            return Err(ClientError::Validation("photo payload is empty".to_owned()));
        }
        let url = PhotoUrl::new(format!("https://cdn.example.org/photos/{user}.jpg"));
        state.photo = Some(url.clone());
        state.snapshot.profile_image = Some(url.clone());
        Ok(url)
    }

    async fn delete_profile_photo(&self, _user: &UserId) -> Result<(), ClientError> {
        let mut state = self.lock();
        if state.fail_persists {
            return Err(ClientError::Persistence("photo delete rejected".to_owned()));
        }
        state.photo = None;
        state.snapshot.profile_image = None;
        Ok(())
    }

    async fn log_view_event(&self, _user: &UserId) {
        self.lock().view_events += 1;
    }
}
