// SPDX-FileCopyrightText: 2026 Anketa Maintainers
// SPDX-License-Identifier: MIT

//! Capabilities consumed from the hosting platform.
//!
//! The page treats persistence as opaque result-returning calls; the hosting
//! environment speaks HTTP/JSON but nothing here depends on that. The
//! [`memory::MemoryClient`] implementation backs the demo binary and tests.

pub mod memory;

use std::fmt;

use async_trait::async_trait;

use crate::model::{AccountAttributes, FieldId, FieldValue, PhotoUrl, ProfileSnapshot, UserId};

/// Errors surfaced by the remote account/profile service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Initial read failed; the page renders with defaults.
    Fetch(String),
    /// A write failed; the field stays editable so the user can retry.
    Persistence(String),
    /// The service rejected the value shape.
    Validation(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(reason) => write!(f, "fetch failed: {reason}"),
            Self::Persistence(reason) => write!(f, "persistence failed: {reason}"),
            Self::Validation(reason) => write!(f, "validation failed: {reason}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// The remote account/profile service, reduced to the calls the page makes.
#[async_trait]
pub trait ProfileClient: Send + Sync {
    /// Reads the full profile snapshot.
    async fn fetch_profile(&self, user: &UserId) -> Result<ProfileSnapshot, ClientError>;

    /// Reads auxiliary account fields (gender) not part of the snapshot.
    async fn fetch_account_attributes(
        &self,
        user: &UserId,
    ) -> Result<AccountAttributes, ClientError>;

    /// Writes one profile field.
    async fn persist_field(
        &self,
        user: &UserId,
        field_id: FieldId,
        value: FieldValue,
    ) -> Result<(), ClientError>;

    /// Writes one auxiliary account field.
    async fn persist_account_attribute(
        &self,
        user: &UserId,
        field_id: FieldId,
        value: FieldValue,
    ) -> Result<(), ClientError>;

    async fn upload_profile_photo(
        &self,
        user: &UserId,
        payload: Vec<u8>,
    ) -> Result<PhotoUrl, ClientError>;

    async fn delete_profile_photo(&self, user: &UserId) -> Result<(), ClientError>;

    /// Fire-and-forget analytics notification; no result is consumed.
    async fn log_view_event(&self, user: &UserId);
}
