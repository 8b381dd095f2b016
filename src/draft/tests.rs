// SPDX-FileCopyrightText: 2026 Anketa Maintainers
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use rstest::rstest;

use super::{merge_with_drafts, Draft};
use crate::model::{FieldValue, SocialLink, SocialPlatform};

fn link(platform: SocialPlatform, url: &str) -> SocialLink {
    SocialLink::new(platform, Some(url.to_owned()))
}

fn drafts_of(links: &[SocialLink]) -> BTreeMap<SocialPlatform, SocialLink> {
    links.iter().map(|l| (l.platform(), l.clone())).collect()
}

#[rstest]
#[case(SocialPlatform::Twitter)]
#[case(SocialPlatform::Facebook)]
#[case(SocialPlatform::Linkedin)]
fn merge_preserves_canonical_order_regardless_of_edited_key(#[case] edited: SocialPlatform) {
    let drafts = drafts_of(&[
        link(SocialPlatform::Linkedin, "https://linkedin.com/in/o"),
        link(SocialPlatform::Twitter, "https://t.co/a"),
        link(SocialPlatform::Facebook, "https://fb.com/o"),
    ]);

    let merged = merge_with_drafts(&drafts, link(edited, "https://example.com/new"));

    let order: Vec<SocialPlatform> = merged.iter().map(SocialLink::platform).collect();
    assert_eq!(
        order,
        vec![SocialPlatform::Twitter, SocialPlatform::Facebook, SocialPlatform::Linkedin]
    );
}

#[test]
fn merge_substitutes_incoming_and_carries_others() {
    let drafts = drafts_of(&[link(SocialPlatform::Twitter, "https://t.co/a")]);

    let merged = merge_with_drafts(&drafts, link(SocialPlatform::Facebook, "https://fb.com/b"));

    assert_eq!(
        merged,
        vec![
            link(SocialPlatform::Twitter, "https://t.co/a"),
            link(SocialPlatform::Facebook, "https://fb.com/b"),
        ]
    );
}

#[test]
fn merge_retains_entries_with_unset_url() {
    let drafts = drafts_of(&[
        link(SocialPlatform::Twitter, "https://t.co/a"),
        SocialLink::new(SocialPlatform::Linkedin, None),
    ]);

    let merged = merge_with_drafts(&drafts, link(SocialPlatform::Facebook, "https://fb.com/b"));

    assert_eq!(merged.len(), 3);
    assert_eq!(merged[2].platform(), SocialPlatform::Linkedin);
    assert_eq!(merged[2].url(), None);
}

#[test]
fn merge_replaces_existing_entry_for_same_platform() {
    let drafts = drafts_of(&[link(SocialPlatform::Twitter, "https://t.co/old")]);

    let merged = merge_with_drafts(&drafts, link(SocialPlatform::Twitter, "https://t.co/new"));

    assert_eq!(merged, vec![link(SocialPlatform::Twitter, "https://t.co/new")]);
}

#[test]
fn draft_seeds_from_committed_value() {
    let committed = FieldValue::Links(vec![link(SocialPlatform::Twitter, "https://t.co/a")]);
    let draft = Draft::from_value(&committed);
    assert_eq!(draft.to_value(), committed);

    let committed = FieldValue::text("Short bio");
    let draft = Draft::from_value(&committed);
    assert_eq!(draft.to_value(), committed);
}

#[test]
fn scalar_draft_replaces_on_set() {
    let mut draft = Draft::from_value(&FieldValue::text("old"));
    draft.set_text("new");
    assert_eq!(draft.to_value(), FieldValue::text("new"));
}

#[test]
fn link_draft_accumulates_across_edits() {
    let mut draft = Draft::links_from_value(&FieldValue::Empty);
    draft.merge_link(link(SocialPlatform::Linkedin, "https://linkedin.com/in/o"));
    draft.merge_link(link(SocialPlatform::Twitter, "https://t.co/a"));

    assert_eq!(
        draft.to_value(),
        FieldValue::Links(vec![
            link(SocialPlatform::Twitter, "https://t.co/a"),
            link(SocialPlatform::Linkedin, "https://linkedin.com/in/o"),
        ])
    );
}

#[test]
fn empty_scalar_draft_submits_empty() {
    let mut draft = Draft::from_value(&FieldValue::text("something"));
    draft.set_text("");
    assert_eq!(draft.to_value(), FieldValue::Empty);
}
