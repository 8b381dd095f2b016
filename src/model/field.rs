// SPDX-FileCopyrightText: 2026 Anketa Maintainers
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::value::FieldValue;

/// The editable attributes of a profile, in page display order.
///
/// `Name` is displayed but never enters the edit lifecycle; the editable set
/// is [`FieldId::EDITABLE`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum FieldId {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "gender")]
    Gender,
    #[serde(rename = "country")]
    Country,
    #[serde(rename = "languageProficiencies")]
    LanguageProficiencies,
    #[serde(rename = "levelOfEducation")]
    LevelOfEducation,
    #[serde(rename = "bio")]
    Bio,
    #[serde(rename = "socialLinks")]
    SocialLinks,
}

impl FieldId {
    pub const EDITABLE: [FieldId; 6] = [
        FieldId::Gender,
        FieldId::Country,
        FieldId::LanguageProficiencies,
        FieldId::LevelOfEducation,
        FieldId::Bio,
        FieldId::SocialLinks,
    ];

    /// Wire name used in service paths and form ids.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Gender => "gender",
            Self::Country => "country",
            Self::LanguageProficiencies => "languageProficiencies",
            Self::LevelOfEducation => "levelOfEducation",
            Self::Bio => "bio",
            Self::SocialLinks => "socialLinks",
        }
    }

    pub fn display_label(self) -> &'static str {
        match self {
            Self::Name => "Full name",
            Self::Gender => "Gender",
            Self::Country => "Location",
            Self::LanguageProficiencies => "Primary language spoken",
            Self::LevelOfEducation => "Education",
            Self::Bio => "About me",
            Self::SocialLinks => "Social links",
        }
    }

    /// Gender lives on the account record, not the profile snapshot, and is
    /// written through the account-attribute capability.
    pub fn is_account_attribute(self) -> bool {
        matches!(self, Self::Gender)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = ParseFieldIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "gender" => Ok(Self::Gender),
            "country" => Ok(Self::Country),
            "languageProficiencies" => Ok(Self::LanguageProficiencies),
            "levelOfEducation" => Ok(Self::LevelOfEducation),
            "bio" => Ok(Self::Bio),
            "socialLinks" => Ok(Self::SocialLinks),
            _ => Err(ParseFieldIdError(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldIdError(String);

impl fmt::Display for ParseFieldIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field id '{}'", self.0)
    }
}

impl std::error::Error for ParseFieldIdError {}

/// Per-field visibility setting controlling who may see the value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum Visibility {
    #[default]
    #[serde(rename = "private")]
    Private,
    #[serde(rename = "all_users")]
    AllUsers,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::AllUsers => "all_users",
        }
    }

    /// The visibility policy: owners always see their own values, everyone
    /// else only sees `all_users` fields.
    pub fn is_visible_to(self, viewer_owns_profile: bool) -> bool {
        viewer_owns_profile || matches!(self, Self::AllUsers)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = ParseVisibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Self::Private),
            "all_users" => Ok(Self::AllUsers),
            _ => Err(ParseVisibilityError(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVisibilityError(String);

impl fmt::Display for ParseVisibilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown visibility '{}'", self.0)
    }
}

impl std::error::Error for ParseVisibilityError {}

/// The four mutually exclusive display states of an editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// No value set, not being edited.
    Empty,
    /// Value set, read-only, no edit affordance (someone else's profile).
    Static,
    /// Value set, read-only, with an edit affordance (own profile).
    Editable,
    /// An open editor is showing a draft value.
    Editing,
}

impl FieldState {
    /// The state a field starts in, derived from whether a value is present
    /// and whether the viewer owns the profile. Never `Editing`.
    pub fn initial(has_value: bool, owner_view: bool) -> Self {
        if !has_value {
            Self::Empty
        } else if owner_view {
            Self::Editable
        } else {
            Self::Static
        }
    }

    pub fn is_editing(self) -> bool {
        matches!(self, Self::Editing)
    }
}

/// Status of a field's most recent persistence attempt.
///
/// `Idle` corresponds to "no attempt yet" and is restored on every
/// edit-open; the remaining variants track one dispatched submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Pending,
    Complete,
    Error,
}

/// One editable attribute: stable identity plus mutable value and visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    field_id: FieldId,
    visibility: Visibility,
    value: FieldValue,
}

impl FieldDescriptor {
    pub fn new(field_id: FieldId, visibility: Visibility, value: FieldValue) -> Self {
        Self { field_id, visibility, value }
    }

    pub fn empty(field_id: FieldId) -> Self {
        Self::new(field_id, Visibility::default(), FieldValue::Empty)
    }

    pub fn field_id(&self) -> FieldId {
        self.field_id
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn set_value(&mut self, value: FieldValue) {
        self.value = value;
    }

    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }
}
