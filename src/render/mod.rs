// SPDX-FileCopyrightText: 2026 Anketa Maintainers
// SPDX-License-Identifier: MIT

//! Plain-text rendering of the profile page.
//!
//! One line-oriented view per field state: empty prompts, read-only values,
//! and open editors with their save-state hint. This is the whole
//! presentation layer; markup and theming belong to the hosting shell.

use crate::machine::FieldMachine;
use crate::model::{FieldId, FieldState, FieldValue, Gender, SaveState, SocialPlatform};
use crate::page::ProfilePage;

/// Renders the full page to text lines, skipping blocks the viewer may not
/// see.
pub fn render_page(page: &ProfilePage) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("@{}", page.user_id()));
    if let Some(date_joined) = page.date_joined() {
        lines.push(format!("joined {date_joined}"));
    }
    if let Some(photo) = page.photo() {
        lines.push(format!("photo: {photo}"));
    }
    if page.photo_state() == SaveState::Error {
        if let Some(error) = page.photo_error() {
            lines.push(format!("photo upload failed: {error}"));
        }
    }

    if let Some(name) = page.name() {
        lines.push(String::new());
        lines.push(format!("{}:", FieldId::Name.display_label()));
        lines.push(format!("  {name}"));
    }

    for machine in page.fields() {
        if !page.is_block_visible(machine.field_id()) {
            continue;
        }
        lines.push(String::new());
        render_field(&mut lines, machine, page.save_state(machine.field_id()));
    }

    lines
}

/// Renders one field block for its current state.
pub fn render_field(lines: &mut Vec<String>, machine: &FieldMachine, save_state: SaveState) {
    let field_id = machine.field_id();
    let label = field_id.display_label();

    match machine.state() {
        FieldState::Empty => {
            lines.push(format!("{label}:"));
            for prompt in empty_prompts(field_id) {
                lines.push(format!("  + {prompt}"));
            }
        }
        FieldState::Static => {
            lines.push(format!("{label}:"));
            render_value(lines, field_id, machine.descriptor().value());
        }
        FieldState::Editable => {
            lines.push(format!(
                "{label} [edit] ({}):",
                machine.descriptor().visibility()
            ));
            render_value(lines, field_id, machine.descriptor().value());
        }
        FieldState::Editing => {
            lines.push(format!("{label} [editing]:"));
            let draft_value = machine
                .draft()
                .map(|draft| draft.to_value())
                .unwrap_or_else(|| machine.descriptor().value().clone());
            render_draft(lines, field_id, &draft_value);
            if let Some(error) = machine.inline_error() {
                lines.push(format!("  ! {error}"));
            }
            if let Some(hint) = save_hint(save_state) {
                lines.push(format!("  [{hint}]"));
            }
        }
    }
}

fn render_value(lines: &mut Vec<String>, field_id: FieldId, value: &FieldValue) {
    match value {
        FieldValue::Empty => {}
        FieldValue::Text(text) => {
            let shown = match field_id {
                FieldId::Gender => Gender::label_for(text),
                _ => text.as_str(),
            };
            lines.push(format!("  {shown}"));
        }
        FieldValue::Links(links) => {
            // Read-only views list only the platforms that have a link.
            for link in links {
                if let Some(url) = link.url() {
                    lines.push(format!("  {}: {url}", link.platform().display_name()));
                }
            }
        }
    }
}

fn render_draft(lines: &mut Vec<String>, field_id: FieldId, value: &FieldValue) {
    match value {
        FieldValue::Links(links) => {
            // The editor keeps every known platform addressable.
            for platform in SocialPlatform::ALL {
                let url = links
                    .iter()
                    .find(|link| link.platform() == platform)
                    .and_then(|link| link.url());
                lines.push(format!("  {}: [{}]", platform.display_name(), url.unwrap_or("")));
            }
        }
        FieldValue::Text(text) => {
            let shown = match field_id {
                FieldId::Gender => Gender::label_for(text),
                _ => text.as_str(),
            };
            lines.push(format!("  [{shown}]"));
        }
        FieldValue::Empty => lines.push("  []".to_owned()),
    }
}

fn empty_prompts(field_id: FieldId) -> Vec<String> {
    match field_id {
        FieldId::SocialLinks => SocialPlatform::ALL
            .iter()
            .map(|platform| format!("Add {}", platform.display_name()))
            .collect(),
        FieldId::Bio => vec!["Add a short bio".to_owned()],
        FieldId::Gender => vec!["Add gender".to_owned()],
        FieldId::Country => vec!["Add location".to_owned()],
        FieldId::LanguageProficiencies => vec!["Add language".to_owned()],
        FieldId::LevelOfEducation => vec!["Add education".to_owned()],
        FieldId::Name => vec!["Add name".to_owned()],
    }
}

fn save_hint(save_state: SaveState) -> Option<&'static str> {
    match save_state {
        SaveState::Idle => None,
        SaveState::Pending => Some("saving…"),
        SaveState::Complete => Some("saved"),
        SaveState::Error => Some("save failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::{render_field, render_page};
    use crate::machine::FieldMachine;
    use crate::model::{
        fixtures, FieldDescriptor, FieldId, FieldValue, SaveState, SocialLink, SocialPlatform,
        Visibility,
    };

    fn lines_for(machine: &FieldMachine, save_state: SaveState) -> Vec<String> {
        let mut lines = Vec::new();
        render_field(&mut lines, machine, save_state);
        lines
    }

    #[test]
    fn empty_bio_renders_prompt() {
        let machine =
            FieldMachine::new(FieldDescriptor::empty(FieldId::Bio), true);
        // Empty because there is no value; the prompt invites an edit.
        assert_eq!(lines_for(&machine, SaveState::Idle), vec!["About me:", "  + Add a short bio"]);
    }

    #[test]
    fn editable_field_shows_affordance_and_visibility() {
        let descriptor = FieldDescriptor::new(
            FieldId::Bio,
            Visibility::AllUsers,
            FieldValue::text("Hi there."),
        );
        let machine = FieldMachine::new(descriptor, true);
        assert_eq!(
            lines_for(&machine, SaveState::Idle),
            vec!["About me [edit] (all_users):", "  Hi there."]
        );
    }

    #[test]
    fn static_gender_renders_display_label() {
        let descriptor =
            FieldDescriptor::new(FieldId::Gender, Visibility::Private, FieldValue::text("f"));
        let machine = FieldMachine::new(descriptor, false);
        assert_eq!(lines_for(&machine, SaveState::Idle), vec!["Gender:", "  Жіноча"]);
    }

    #[test]
    fn static_links_list_only_set_platforms_in_order() {
        let descriptor = FieldDescriptor::new(
            FieldId::SocialLinks,
            Visibility::AllUsers,
            FieldValue::Links(vec![
                SocialLink::new(SocialPlatform::Twitter, Some("https://t.co/a".to_owned())),
                SocialLink::new(SocialPlatform::Linkedin, None),
            ]),
        );
        let machine = FieldMachine::new(descriptor, false);
        assert_eq!(
            lines_for(&machine, SaveState::Idle),
            vec!["Social links:", "  Twitter: https://t.co/a"]
        );
    }

    #[test]
    fn editing_field_shows_draft_and_save_hint() {
        let descriptor =
            FieldDescriptor::new(FieldId::Bio, Visibility::Private, FieldValue::text("old"));
        let mut machine = FieldMachine::new(descriptor, true);
        machine.open();
        machine.edit_text("new").expect("edit");

        assert_eq!(
            lines_for(&machine, SaveState::Pending),
            vec!["About me [editing]:", "  [new]", "  [saving…]"]
        );
    }

    #[test]
    fn editing_links_keep_every_platform_addressable() {
        let descriptor = FieldDescriptor::new(
            FieldId::SocialLinks,
            Visibility::Private,
            FieldValue::Links(vec![SocialLink::new(
                SocialPlatform::Twitter,
                Some("https://t.co/a".to_owned()),
            )]),
        );
        let mut machine = FieldMachine::new(descriptor, true);
        machine.open();

        assert_eq!(
            lines_for(&machine, SaveState::Idle),
            vec![
                "Social links [editing]:",
                "  Twitter: [https://t.co/a]",
                "  Facebook: []",
                "  LinkedIn: []",
            ]
        );
    }

    #[tokio::test]
    async fn page_render_skips_hidden_blocks_for_other_viewers() {
        use crate::client::memory::MemoryClient;
        use crate::page::ProfilePage;
        use crate::save::AckMode;
        use std::sync::Arc;

        let mut snapshot = fixtures::demo_snapshot();
        snapshot.level_of_education = None;
        let client = MemoryClient::new(snapshot, fixtures::demo_account());
        let owner = crate::model::UserId::new("olena").expect("user id");
        let viewer = crate::model::UserId::new("guest").expect("user id");
        let mut page =
            ProfilePage::new(Arc::new(client), owner, Some(&viewer), AckMode::Immediate);
        page.load().await;

        let rendered = render_page(&page).join("\n");
        assert!(rendered.contains("About me"));
        // Guests never see an empty block or an edit affordance.
        assert!(!rendered.contains("Education"));
        assert!(!rendered.contains("[edit]"));
    }
}
