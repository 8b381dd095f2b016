// SPDX-FileCopyrightText: 2026 Anketa Maintainers
// SPDX-License-Identifier: MIT

use rstest::rstest;

use super::{transition, EditError, EditSignal, FieldEvent, FieldMachine};
use crate::model::{
    FieldDescriptor, FieldId, FieldState, FieldValue, SocialLink, SocialPlatform, Visibility,
};

fn machine(field_id: FieldId, value: FieldValue) -> FieldMachine {
    FieldMachine::new(FieldDescriptor::new(field_id, Visibility::Private, value), true)
}

#[rstest]
#[case(FieldState::Empty)]
#[case(FieldState::Static)]
#[case(FieldState::Editable)]
#[case(FieldState::Editing)]
fn open_always_enters_editing(#[case] state: FieldState) {
    assert_eq!(transition(state, FieldEvent::Open, true), FieldState::Editing);
    assert_eq!(transition(state, FieldEvent::Open, false), FieldState::Editing);
}

#[test]
fn cancel_from_editing_depends_on_value_presence() {
    assert_eq!(transition(FieldState::Editing, FieldEvent::Cancel, true), FieldState::Static);
    assert_eq!(transition(FieldState::Editing, FieldEvent::Cancel, false), FieldState::Empty);
}

#[rstest]
#[case(FieldState::Empty)]
#[case(FieldState::Static)]
#[case(FieldState::Editable)]
fn cancel_and_submit_outside_editing_are_noops(#[case] state: FieldState) {
    assert_eq!(transition(state, FieldEvent::Cancel, true), state);
    assert_eq!(transition(state, FieldEvent::Submit, true), state);
}

#[test]
fn submit_keeps_editing_until_save_resolves() {
    assert_eq!(transition(FieldState::Editing, FieldEvent::Submit, true), FieldState::Editing);
}

#[test]
fn signal_held_high_fires_open_exactly_once() {
    let mut machine = machine(FieldId::Bio, FieldValue::text("existing"));
    let signal = EditSignal { change_data: true, save_data: false };

    let events = machine.observe(signal);
    assert_eq!(events, vec![FieldEvent::Open]);

    // Subsequent cycles with the flag still high must not re-fire.
    for _ in 0..3 {
        assert!(machine.observe(signal).is_empty());
    }
}

#[test]
fn falling_change_edge_fires_cancel() {
    let mut machine = machine(FieldId::Bio, FieldValue::text("existing"));
    machine.observe(EditSignal { change_data: true, save_data: false });
    let events = machine.observe(EditSignal::default());
    assert_eq!(events, vec![FieldEvent::Cancel]);
}

#[test]
fn rising_save_edge_fires_submit_once() {
    let mut machine = machine(FieldId::Bio, FieldValue::text("existing"));
    machine.observe(EditSignal { change_data: true, save_data: false });

    let signal = EditSignal { change_data: true, save_data: true };
    assert_eq!(machine.observe(signal), vec![FieldEvent::Submit]);
    assert!(machine.observe(signal).is_empty());
}

#[test]
fn open_seeds_draft_from_committed_value() {
    let mut machine = machine(FieldId::Bio, FieldValue::text("existing"));
    machine.open();
    assert_eq!(machine.state(), FieldState::Editing);
    assert_eq!(machine.draft().map(|d| d.to_value()), Some(FieldValue::text("existing")));
    // Unchanged draft has nothing to submit.
    assert_eq!(machine.submit_value(), None);
}

#[test]
fn cancel_discards_draft_and_keeps_committed_value() {
    let mut machine = machine(FieldId::Bio, FieldValue::text("before"));
    machine.open();
    machine.edit_text("after").expect("edit");
    machine.cancel();

    assert_eq!(machine.state(), FieldState::Static);
    assert!(machine.draft().is_none());
    assert_eq!(machine.descriptor().value(), &FieldValue::text("before"));
}

#[test]
fn cancel_on_empty_field_returns_to_empty() {
    let mut machine = machine(FieldId::Country, FieldValue::Empty);
    machine.open();
    machine.cancel();
    assert_eq!(machine.state(), FieldState::Empty);
}

#[test]
fn submit_value_reflects_draft_changes() {
    let mut machine = machine(FieldId::Country, FieldValue::Empty);
    machine.open();
    machine.edit_text("UA").expect("edit");
    assert_eq!(machine.submit_value(), Some(FieldValue::text("UA")));
}

#[test]
fn submit_value_is_none_outside_editing() {
    let machine = machine(FieldId::Country, FieldValue::text("UA"));
    assert_eq!(machine.submit_value(), None);
}

#[test]
fn commit_save_moves_to_rest_state_for_owner() {
    let mut machine = machine(FieldId::Bio, FieldValue::Empty);
    machine.open();
    machine.edit_text("hello").expect("edit");
    machine.commit_save(FieldValue::text("hello"));

    assert_eq!(machine.state(), FieldState::Editable);
    assert_eq!(machine.descriptor().value(), &FieldValue::text("hello"));
    assert!(machine.draft().is_none());
}

#[test]
fn commit_of_empty_value_returns_to_empty() {
    let mut machine = machine(FieldId::Bio, FieldValue::text("old"));
    machine.open();
    machine.edit_text("").expect("edit");
    machine.commit_save(FieldValue::Empty);
    assert_eq!(machine.state(), FieldState::Empty);
}

#[test]
fn edit_outside_editing_is_rejected() {
    let mut machine = machine(FieldId::Bio, FieldValue::text("x"));
    assert_eq!(machine.edit_text("y"), Err(EditError::NotEditing));
}

#[test]
fn invalid_gender_code_is_surfaced_inline_without_touching_draft() {
    let mut machine = machine(FieldId::Gender, FieldValue::Empty);
    machine.open();

    let err = machine.edit_text("x").expect_err("invalid code");
    assert!(matches!(err, EditError::Invalid(_)));
    assert!(machine.inline_error().is_some());
    assert_eq!(machine.submit_value(), None);

    // A valid edit clears the inline error.
    machine.edit_text("f").expect("valid code");
    assert!(machine.inline_error().is_none());
    assert_eq!(machine.submit_value(), Some(FieldValue::text("f")));
}

#[test]
fn link_with_whitespace_is_rejected_inline() {
    let mut machine = machine(FieldId::SocialLinks, FieldValue::Empty);
    machine.open();
    let link = SocialLink::new(SocialPlatform::Twitter, Some("https://t.co/a b".to_owned()));
    assert!(machine.edit_link(link).is_err());
    assert!(machine.inline_error().is_some());
}

#[test]
fn non_owner_machine_rests_in_static() {
    let descriptor =
        FieldDescriptor::new(FieldId::Bio, Visibility::AllUsers, FieldValue::text("bio"));
    let machine = FieldMachine::new(descriptor, false);
    assert_eq!(machine.state(), FieldState::Static);
}

#[test]
fn load_value_recomputes_rest_state_but_not_while_editing() {
    let mut machine = machine(FieldId::Bio, FieldValue::Empty);
    assert_eq!(machine.state(), FieldState::Empty);

    machine.load_value(FieldValue::text("loaded"));
    assert_eq!(machine.state(), FieldState::Editable);

    machine.open();
    machine.load_value(FieldValue::text("reloaded"));
    assert_eq!(machine.state(), FieldState::Editing);
}
