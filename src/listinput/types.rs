//! Core types and messages for the list input component.

use super::config::Config;
use bubbletea_rs::Msg;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One item of the list.
///
/// `index` is positional: it is reassigned whenever an earlier entry is
/// removed, so it is not an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// 0-based display position.
    pub index: usize,
    /// The entered text, possibly empty.
    pub text: String,
    /// Whether the entry has a remove control.
    pub deletable: bool,
}

/// The element a verdict points at, for focus-on-error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    /// The add control.
    AddButton,
    /// The input of the entry at this index.
    Input(usize),
}

impl Anchor {
    /// Resolves the anchor to an element id.
    pub fn element_id(&self, config: &Config) -> String {
        match self {
            Anchor::AddButton => config.add_id(),
            Anchor::Input(index) => config.input_id(*index),
        }
    }
}

/// Outcome of validity evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// All constraints hold.
    Valid,
    /// The control is required and nothing has been entered.
    MissingAllItems {
        /// Message shown to the user.
        message: String,
        /// Where focus goes when the form reports the error.
        anchor: Anchor,
    },
    /// Empty items are not allowed and every item is empty.
    MissingNonEmptyItem {
        /// Message shown to the user.
        message: String,
        /// The first empty input.
        anchor: Anchor,
    },
    /// Empty items are not allowed and some item is empty.
    ItemEmpty {
        /// Message shown to the user.
        message: String,
        /// The first empty input.
        anchor: Anchor,
    },
}

impl Verdict {
    /// Whether this is [`Verdict::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// The validation message; empty when valid.
    pub fn message(&self) -> &str {
        match self {
            Verdict::Valid => "",
            Verdict::MissingAllItems { message, .. }
            | Verdict::MissingNonEmptyItem { message, .. }
            | Verdict::ItemEmpty { message, .. } => message,
        }
    }

    /// The offending element, if any.
    pub fn anchor(&self) -> Option<Anchor> {
        match self {
            Verdict::Valid => None,
            Verdict::MissingAllItems { anchor, .. }
            | Verdict::MissingNonEmptyItem { anchor, .. }
            | Verdict::ItemEmpty { anchor, .. } => Some(*anchor),
        }
    }

    /// The native-style validity flags.
    pub fn state(&self) -> ValidityState {
        ValidityState {
            value_missing: !self.is_valid(),
        }
    }
}

/// Validity flags in the shape a browser form expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityState {
    /// A required value, or a value for some item, is missing.
    pub value_missing: bool,
}

impl ValidityState {
    /// Whether no flag is set.
    pub fn valid(&self) -> bool {
        !self.value_missing
    }
}

/// Which of the control's elements has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The input of an entry.
    Input(usize),
    /// The remove control of an entry.
    Remove(usize),
    /// The add control.
    Add,
}

impl Focus {
    /// Resolves the focus target to an element id.
    pub fn element_id(&self, config: &Config) -> String {
        match self {
            Focus::Input(index) => config.input_id(*index),
            Focus::Remove(index) => config.remove_id(*index),
            Focus::Add => config.add_id(),
        }
    }
}

impl From<Anchor> for Focus {
    fn from(anchor: Anchor) -> Self {
        match anchor {
            Anchor::AddButton => Focus::Add,
            Anchor::Input(index) => Focus::Input(index),
        }
    }
}

/// A change made while repairing markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The host element's id was set.
    AssignedId,
    /// No list existed, so one was created.
    CreatedList,
    /// Items of an extra list were moved into the first one.
    MergedList,
    /// A node that is not a list item was removed from the list.
    DroppedNode {
        /// Tag of the dropped element, or `#text`.
        tag: String,
    },
    /// The list was empty, so entry 0 was created.
    SeededEntry,
    /// An entry had no label.
    CreatedLabel(usize),
    /// An entry had no input.
    CreatedInput(usize),
    /// An entry's input was nested in other markup and was moved up.
    LiftedInput(usize),
    /// An entry lacked its remove control.
    CreatedRemoveButton(usize),
    /// A remove control was on the non-deletable first entry.
    RemovedRemoveButton(usize),
    /// An entry had more than one element of a role.
    RemovedDuplicate {
        /// Position of the entry.
        index: usize,
        /// Tag of the removed duplicate.
        tag: String,
    },
    /// No add control existed.
    CreatedAddButton,
    /// The add control preceded the list and was moved after it.
    MovedAddButton,
    /// An extra direct `<button>` was removed.
    RemovedExtraButton,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::AssignedId => write!(f, "assigned control id"),
            Diagnostic::CreatedList => write!(f, "created list"),
            Diagnostic::MergedList => write!(f, "merged extra list"),
            Diagnostic::DroppedNode { tag } => write!(f, "dropped <{tag}> from list"),
            Diagnostic::SeededEntry => write!(f, "seeded entry 0"),
            Diagnostic::CreatedLabel(i) => write!(f, "created label for entry {i}"),
            Diagnostic::CreatedInput(i) => write!(f, "created input for entry {i}"),
            Diagnostic::LiftedInput(i) => write!(f, "moved nested input of entry {i}"),
            Diagnostic::CreatedRemoveButton(i) => write!(f, "created remove control for entry {i}"),
            Diagnostic::RemovedRemoveButton(i) => write!(f, "removed remove control from entry {i}"),
            Diagnostic::RemovedDuplicate { index, tag } => {
                write!(f, "removed duplicate <{tag}> from entry {index}")
            }
            Diagnostic::CreatedAddButton => write!(f, "created add control"),
            Diagnostic::MovedAddButton => write!(f, "moved add control after list"),
            Diagnostic::RemovedExtraButton => write!(f, "removed extra button"),
        }
    }
}

/// Appends an empty entry to the addressed control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItemMsg {
    /// Id of the target control.
    pub control_id: String,
}

/// Removes the entry at `index` from the addressed control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveItemMsg {
    /// Id of the target control.
    pub control_id: String,
    /// Position of the entry.
    pub index: usize,
}

/// Commits new text for the entry at `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditItemMsg {
    /// Id of the target control.
    pub control_id: String,
    /// Position of the entry.
    pub index: usize,
    /// The committed text.
    pub text: String,
}

/// Kind of a forwarded browser event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEventKind {
    /// A button was activated.
    Click,
    /// An input's content was committed.
    Change,
    /// An element received focus.
    Focus,
}

/// A browser event forwarded by the host, addressed by element id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEventMsg {
    /// What happened.
    pub kind: DomEventKind,
    /// Id of the element the event fired on.
    pub target: String,
    /// The input's value for [`DomEventKind::Change`].
    pub value: Option<String>,
}

impl DomEventMsg {
    /// A click on `target`.
    pub fn click(target: impl Into<String>) -> Self {
        Self {
            kind: DomEventKind::Click,
            target: target.into(),
            value: None,
        }
    }

    /// A committed change of `target` to `value`.
    pub fn change(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: DomEventKind::Change,
            target: target.into(),
            value: Some(value.into()),
        }
    }

    /// Focus moving to `target`.
    pub fn focus(target: impl Into<String>) -> Self {
        Self {
            kind: DomEventKind::Focus,
            target: target.into(),
            value: None,
        }
    }
}

/// Asks the host to move focus to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusMsg {
    /// Id of the control requesting focus.
    pub control_id: String,
    /// Id of the element to focus.
    pub element_id: String,
}

impl From<AddItemMsg> for Msg {
    fn from(msg: AddItemMsg) -> Self {
        Box::new(msg) as Msg
    }
}

impl From<RemoveItemMsg> for Msg {
    fn from(msg: RemoveItemMsg) -> Self {
        Box::new(msg) as Msg
    }
}

impl From<EditItemMsg> for Msg {
    fn from(msg: EditItemMsg) -> Self {
        Box::new(msg) as Msg
    }
}

impl From<DomEventMsg> for Msg {
    fn from(msg: DomEventMsg) -> Self {
        Box::new(msg) as Msg
    }
}
