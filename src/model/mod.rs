// SPDX-FileCopyrightText: 2026 Anketa Maintainers
// SPDX-License-Identifier: MIT

//! Typed domain model for the profile page.
//!
//! Everything here is plain data: identifiers, field descriptors, the
//! four-state edit lifecycle, and the profile/account snapshots fetched from
//! the hosting service.

mod field;
pub mod fixtures;
mod ids;
mod snapshot;
mod value;

pub use field::{
    FieldDescriptor, FieldId, FieldState, ParseFieldIdError, ParseVisibilityError, SaveState,
    Visibility,
};
pub use ids::{IdError, UserId};
pub use snapshot::{AccountAttributes, LanguageProficiency, ProfileSnapshot};
pub use value::{FieldValue, Gender, ParsePlatformError, PhotoUrl, SocialLink, SocialPlatform};
