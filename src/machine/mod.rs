// SPDX-FileCopyrightText: 2026 Anketa Maintainers
// SPDX-License-Identifier: MIT

//! The generic editable-field state machine.
//!
//! Every editable field (bio, country, education, language, gender, social
//! links) runs the same lifecycle: `empty`/`static`/`editable` at rest,
//! `editing` while an editor is open. The page broadcasts an [`EditSignal`]
//! pair; each machine observes it with edge detection so a signal held high
//! across render cycles fires its event exactly once.

use std::fmt;

use crate::draft::Draft;
use crate::model::{FieldDescriptor, FieldId, FieldState, FieldValue, Gender, SocialLink};

/// Page-wide broadcast requesting all fields to enter edit mode
/// (`change_data`) or submit their open editors (`save_data`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditSignal {
    pub change_data: bool,
    pub save_data: bool,
}

/// Events driving one field's lifecycle, from the user or the page signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    Open,
    Cancel,
    Submit,
}

/// The exhaustive transition function.
///
/// `Submit` keeps the machine in `Editing`; the field only leaves that state
/// when the save coordinator resolves the dispatched call. `Cancel` outside
/// `Editing` is a no-op, which makes late signal edges harmless.
pub fn transition(state: FieldState, event: FieldEvent, has_value: bool) -> FieldState {
    match (state, event) {
        (_, FieldEvent::Open) => FieldState::Editing,
        (FieldState::Editing, FieldEvent::Cancel) => {
            if has_value {
                FieldState::Static
            } else {
                FieldState::Empty
            }
        }
        (FieldState::Editing, FieldEvent::Submit) => FieldState::Editing,
        (state, FieldEvent::Cancel | FieldEvent::Submit) => state,
    }
}

/// A field-local edit that could not be accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The field has no open editor.
    NotEditing,
    /// The value shape is invalid; the draft is left unchanged and the
    /// reason is surfaced inline.
    Invalid(String),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEditing => f.write_str("field has no open editor"),
            Self::Invalid(reason) => write!(f, "invalid value: {reason}"),
        }
    }
}

impl std::error::Error for EditError {}

/// One field's state machine: descriptor, display state, local draft, and
/// the previously observed page signal for edge detection.
#[derive(Debug, Clone)]
pub struct FieldMachine {
    descriptor: FieldDescriptor,
    owner_view: bool,
    state: FieldState,
    draft: Option<Draft>,
    inline_error: Option<String>,
    last_signal: EditSignal,
}

impl FieldMachine {
    pub fn new(descriptor: FieldDescriptor, owner_view: bool) -> Self {
        let state = FieldState::initial(descriptor.has_value(), owner_view);
        Self {
            descriptor,
            owner_view,
            state,
            draft: None,
            inline_error: None,
            last_signal: EditSignal::default(),
        }
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub fn field_id(&self) -> FieldId {
        self.descriptor.field_id()
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn owner_view(&self) -> bool {
        self.owner_view
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn inline_error(&self) -> Option<&str> {
        self.inline_error.as_deref()
    }

    /// Replaces the committed value outside the edit lifecycle (initial
    /// load). Recomputes the resting state unless an editor is open.
    pub fn load_value(&mut self, value: FieldValue) {
        self.descriptor.set_value(value);
        if self.state != FieldState::Editing {
            self.state = FieldState::initial(self.descriptor.has_value(), self.owner_view);
        }
    }

    pub fn set_visibility(&mut self, visibility: crate::model::Visibility) {
        self.descriptor.set_visibility(visibility);
    }

    /// Observes the page signal and returns the events its edges imply.
    ///
    /// Only transitions of the signal produce events; a flag held `true`
    /// across cycles fires once.
    pub fn observe(&mut self, signal: EditSignal) -> Vec<FieldEvent> {
        let previous = self.last_signal;
        self.last_signal = signal;

        let mut events = Vec::new();
        if signal.change_data && !previous.change_data {
            events.push(FieldEvent::Open);
        }
        if !signal.change_data && previous.change_data {
            events.push(FieldEvent::Cancel);
        }
        if signal.save_data && !previous.save_data {
            events.push(FieldEvent::Submit);
        }
        events
    }

    /// Opens the editor, seeding the draft from the committed value.
    pub fn open(&mut self) {
        self.state = transition(self.state, FieldEvent::Open, self.descriptor.has_value());
        self.inline_error = None;
        if self.draft.is_none() {
            self.draft = Some(match self.field_id() {
                FieldId::SocialLinks => Draft::links_from_value(self.descriptor.value()),
                _ => Draft::from_value(self.descriptor.value()),
            });
        }
    }

    /// Discards the draft and returns to the resting state. Any in-flight
    /// save for this field becomes stale and must be invalidated by the
    /// caller.
    pub fn cancel(&mut self) {
        self.draft = None;
        self.inline_error = None;
        self.state = transition(self.state, FieldEvent::Cancel, self.descriptor.has_value());
    }

    /// The value a submit would persist, or `None` when there is nothing to
    /// save: no open editor, no draft, or a draft equal to the committed
    /// value.
    pub fn submit_value(&self) -> Option<FieldValue> {
        if self.state != FieldState::Editing {
            return None;
        }
        let value = self.draft.as_ref()?.to_value();
        if value == *self.descriptor.value() {
            return None;
        }
        Some(value)
    }

    /// Applies a successful save: the submitted value becomes the committed
    /// value, the draft is destroyed, and the machine returns to rest.
    pub fn commit_save(&mut self, value: FieldValue) {
        self.descriptor.set_value(value);
        self.draft = None;
        self.inline_error = None;
        self.state = FieldState::initial(self.descriptor.has_value(), self.owner_view);
    }

    /// Applies a failed save: the machine stays in `Editing` and the draft
    /// is retained so the user can retry or cancel.
    pub fn reject_save(&mut self) {
        debug_assert_eq!(self.state, FieldState::Editing);
    }

    pub fn edit_text(&mut self, text: impl Into<String>) -> Result<(), EditError> {
        if self.state != FieldState::Editing {
            return Err(EditError::NotEditing);
        }
        let text = text.into();
        if let Err(reason) = validate_text(self.field_id(), &text) {
            self.inline_error = Some(reason.clone());
            return Err(EditError::Invalid(reason));
        }
        self.inline_error = None;
        match self.draft.as_mut() {
            Some(draft) => draft.set_text(text),
            None => self.draft = Some(Draft::Text(text)),
        }
        Ok(())
    }

    pub fn edit_link(&mut self, link: SocialLink) -> Result<(), EditError> {
        if self.state != FieldState::Editing {
            return Err(EditError::NotEditing);
        }
        if let Some(url) = link.url() {
            if url.contains(char::is_whitespace) {
                let reason = format!("{} link must not contain whitespace", link.platform());
                self.inline_error = Some(reason.clone());
                return Err(EditError::Invalid(reason));
            }
        }
        self.inline_error = None;
        match self.draft.as_mut() {
            Some(draft) => draft.merge_link(link),
            None => {
                let mut draft = Draft::links_from_value(self.descriptor.value());
                draft.merge_link(link);
                self.draft = Some(draft);
            }
        }
        Ok(())
    }
}

const BIO_MAX_CHARS: usize = 3000;

fn validate_text(field_id: FieldId, text: &str) -> Result<(), String> {
    match field_id {
        FieldId::Bio => {
            if text.chars().count() > BIO_MAX_CHARS {
                return Err(format!("bio must be at most {BIO_MAX_CHARS} characters"));
            }
        }
        FieldId::Gender => {
            if !text.is_empty() && Gender::from_code(text).is_none() {
                return Err(format!("unknown gender code '{text}'"));
            }
        }
        FieldId::Country | FieldId::LanguageProficiencies | FieldId::LevelOfEducation => {
            if text.contains(char::is_whitespace) {
                return Err(format!("{field_id} must be a code without whitespace"));
            }
        }
        FieldId::Name | FieldId::SocialLinks => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests;
