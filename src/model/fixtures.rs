// SPDX-FileCopyrightText: 2026 Anketa Maintainers
// SPDX-License-Identifier: MIT

//! Canned profile data for the demo binary and tests.

use super::field::Visibility;
use super::snapshot::{AccountAttributes, LanguageProficiency, ProfileSnapshot};
use super::value::{Gender, SocialLink, SocialPlatform};

pub fn demo_snapshot() -> ProfileSnapshot {
    ProfileSnapshot {
        name: Some("Olena Kovalenko".to_owned()),
        country: Some("UA".to_owned()),
        level_of_education: Some("m".to_owned()),
        language_proficiencies: vec![LanguageProficiency::new("uk")],
        bio: Some("Frontend tutor, learning Rust on weekends.".to_owned()),
        social_links: vec![SocialLink::new(
            SocialPlatform::Twitter,
            Some("https://t.co/olenak".to_owned()),
        )],
        visibility_bio: Visibility::AllUsers,
        visibility_social_links: Visibility::AllUsers,
        date_joined: Some("2021-03-14".to_owned()),
        ..ProfileSnapshot::default()
    }
}

pub fn demo_account() -> AccountAttributes {
    AccountAttributes { gender: Some(Gender::Female) }
}
