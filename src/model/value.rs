// SPDX-FileCopyrightText: 2026 Anketa Maintainers
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Social networks the profile can link to, in canonical display order.
///
/// The declaration order is load-bearing: merged link lists and the editor
/// always present platforms in this order, regardless of edit order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Twitter,
    Facebook,
    Linkedin,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 3] =
        [SocialPlatform::Twitter, SocialPlatform::Facebook, SocialPlatform::Linkedin];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
            Self::Linkedin => "linkedin",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Twitter => "Twitter",
            Self::Facebook => "Facebook",
            Self::Linkedin => "LinkedIn",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocialPlatform {
    type Err = ParsePlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "twitter" => Ok(Self::Twitter),
            "facebook" => Ok(Self::Facebook),
            "linkedin" => Ok(Self::Linkedin),
            _ => Err(ParsePlatformError(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePlatformError(String);

impl fmt::Display for ParsePlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown social platform '{}'", self.0)
    }
}

impl std::error::Error for ParsePlatformError {}

/// One platform slot in the social-links field.
///
/// A link with `url == None` is a known-but-unset slot; it stays addressable
/// in the editor and is never dropped by merges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    platform: SocialPlatform,
    #[serde(rename = "socialLink")]
    url: Option<String>,
}

impl SocialLink {
    pub fn new(platform: SocialPlatform, url: Option<String>) -> Self {
        Self { platform, url }
    }

    pub fn platform(&self) -> SocialPlatform {
        self.platform
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// Gender as stored by the account service: single-letter wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}

impl Gender {
    pub fn code(self) -> &'static str {
        match self {
            Self::Male => "m",
            Self::Female => "f",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "m" => Some(Self::Male),
            "f" => Some(Self::Female),
            _ => None,
        }
    }

    /// Display label shown on the profile page (the page ships with the
    /// platform's Ukrainian locale baked in, matching the account service).
    pub fn display_label(self) -> &'static str {
        match self {
            Self::Male => "Чоловіча",
            Self::Female => "Жіноча",
        }
    }

    /// Label for an arbitrary wire code; unknown codes fall back to the raw
    /// code so the page never renders a hole.
    pub fn label_for(code: &str) -> &str {
        match Self::from_code(code) {
            Some(gender) => gender.display_label(),
            None => code,
        }
    }
}

/// URL of an uploaded profile photo, as returned by the upload capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUrl(String);

impl PhotoUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The committed value of one editable field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    #[default]
    Empty,
    Text(String),
    Links(Vec<SocialLink>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }

    pub fn from_optional_text(value: Option<String>) -> Self {
        match value {
            Some(text) => Self::text(text),
            None => Self::Empty,
        }
    }

    /// A field counts as empty when there is nothing to display: no text, or
    /// a link list whose slots are all unset.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            Self::Links(links) => links.iter().all(|link| link.url().is_none()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_links(&self) -> Option<&[SocialLink]> {
        match self {
            Self::Links(links) => Some(links),
            _ => None,
        }
    }
}
