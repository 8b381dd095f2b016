// SPDX-FileCopyrightText: 2026 Anketa Maintainers
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use super::field::{FieldId, Visibility};
use super::value::{FieldValue, Gender, PhotoUrl, SocialLink};

/// One language the user reports speaking, keyed by locale code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProficiency {
    pub code: String,
}

impl LanguageProficiency {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// The full profile record as fetched from the profile service.
///
/// Every field is optional with an empty default, so a missing or failed
/// snapshot degrades to "all fields empty" instead of refusing to render.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileSnapshot {
    pub name: Option<String>,
    pub country: Option<String>,
    pub level_of_education: Option<String>,
    pub language_proficiencies: Vec<LanguageProficiency>,
    pub bio: Option<String>,
    pub social_links: Vec<SocialLink>,
    pub visibility_country: Visibility,
    pub visibility_level_of_education: Visibility,
    pub visibility_language_proficiencies: Visibility,
    pub visibility_bio: Visibility,
    pub visibility_social_links: Visibility,
    pub profile_image: Option<PhotoUrl>,
    pub date_joined: Option<String>,
}

impl ProfileSnapshot {
    /// The committed value for one field, in the field machine's shape.
    ///
    /// Language proficiencies collapse to the primary (first) code; the page
    /// edits a single preferred language even though the service stores a
    /// list.
    pub fn field_value(&self, field_id: FieldId) -> FieldValue {
        match field_id {
            FieldId::Name => FieldValue::from_optional_text(self.name.clone()),
            FieldId::Country => FieldValue::from_optional_text(self.country.clone()),
            FieldId::LevelOfEducation => {
                FieldValue::from_optional_text(self.level_of_education.clone())
            }
            FieldId::LanguageProficiencies => FieldValue::from_optional_text(
                self.language_proficiencies.first().map(|lang| lang.code.clone()),
            ),
            FieldId::Bio => FieldValue::from_optional_text(self.bio.clone()),
            FieldId::SocialLinks => {
                if self.social_links.is_empty() {
                    FieldValue::Empty
                } else {
                    FieldValue::Links(self.social_links.clone())
                }
            }
            // Gender is not part of the profile snapshot.
            FieldId::Gender => FieldValue::Empty,
        }
    }

    pub fn visibility(&self, field_id: FieldId) -> Visibility {
        match field_id {
            FieldId::Country => self.visibility_country,
            FieldId::LevelOfEducation => self.visibility_level_of_education,
            FieldId::LanguageProficiencies => self.visibility_language_proficiencies,
            FieldId::Bio => self.visibility_bio,
            FieldId::SocialLinks => self.visibility_social_links,
            FieldId::Name | FieldId::Gender => Visibility::Private,
        }
    }
}

/// Auxiliary account fields fetched separately from the profile snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountAttributes {
    pub gender: Option<Gender>,
}

impl AccountAttributes {
    pub fn gender_value(&self) -> FieldValue {
        match self.gender {
            Some(gender) => FieldValue::text(gender.code()),
            None => FieldValue::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AccountAttributes, LanguageProficiency, ProfileSnapshot};
    use crate::model::{FieldId, FieldValue, Gender, Visibility};

    #[test]
    fn snapshot_deserializes_from_service_json() {
        let snapshot: ProfileSnapshot = serde_json::from_str(
            r#"{
                "name": "Olena Kovalenko",
                "country": "UA",
                "bio": "Lifelong learner.",
                "languageProficiencies": [{"code": "uk"}, {"code": "en"}],
                "socialLinks": [{"platform": "twitter", "socialLink": "https://t.co/a"}],
                "visibilityBio": "all_users",
                "dateJoined": "2021-03-14"
            }"#,
        )
        .expect("deserialize");

        assert_eq!(snapshot.field_value(FieldId::Bio), FieldValue::text("Lifelong learner."));
        assert_eq!(
            snapshot.field_value(FieldId::LanguageProficiencies),
            FieldValue::text("uk")
        );
        assert_eq!(snapshot.visibility(FieldId::Bio), Visibility::AllUsers);
        assert_eq!(snapshot.visibility(FieldId::Country), Visibility::Private);
    }

    #[test]
    fn missing_snapshot_fields_default_to_empty() {
        let snapshot = ProfileSnapshot::default();
        for field_id in FieldId::EDITABLE {
            assert!(snapshot.field_value(field_id).is_empty(), "{field_id} not empty");
        }
    }

    #[test]
    fn account_gender_maps_to_wire_code() {
        let attrs = AccountAttributes { gender: Some(Gender::Female) };
        assert_eq!(attrs.gender_value(), FieldValue::text("f"));
        assert_eq!(AccountAttributes::default().gender_value(), FieldValue::Empty);
    }

    #[test]
    fn primary_language_is_first_entry() {
        let snapshot = ProfileSnapshot {
            language_proficiencies: vec![
                LanguageProficiency::new("uk"),
                LanguageProficiency::new("en"),
            ],
            ..ProfileSnapshot::default()
        };
        assert_eq!(
            snapshot.field_value(FieldId::LanguageProficiencies),
            FieldValue::text("uk")
        );
    }
}
