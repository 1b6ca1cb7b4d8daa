//! Core model for the list input component.

use super::config::{Config, TAG_NAME};
use super::keymap::{default_key_map, KeyMap};
use super::types::{Entry, Focus, FocusMsg, ValidityState, Verdict};
use super::validity::evaluate;
use crate::form::{FormAssociated, FormValue};
use crate::markup::{self, Element};
use crate::Component;
use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};

/// A form-associated control holding an open-ended list of text entries.
///
/// The model owns three things: the immutable [`Config`], the control's
/// markup, and the state derived from it (entries, the published value and
/// its [`Verdict`]). Every add, remove and edit runs in two phases: the
/// markup is repaired (renumbering ids and placeholders), then the value and
/// the verdict are recomputed, in that order.
///
/// # Examples
///
/// ```rust
/// use minutes_widgets::listinput::{Config, Model};
///
/// let mut sederunt = Model::new(
///     Config::new()
///         .with_id("sederunt")
///         .with_required(true)
///         .with_item_desc("attendee"),
/// );
/// sederunt.mount();
/// assert_eq!(sederunt.len(), 1);
/// assert!(!sederunt.check_validity());
///
/// sederunt.edit_item(0, "Alice");
/// sederunt.add_item();
/// sederunt.edit_item(1, "Bob");
/// assert_eq!(sederunt.value(), ["Alice", "Bob"]);
/// assert_eq!(sederunt.value_json(), r#"["Alice","Bob"]"#);
/// assert!(sederunt.check_validity());
/// ```
///
/// Adopting server-rendered markup:
///
/// ```rust
/// use minutes_widgets::listinput::Model;
///
/// let mut list = Model::parse(
///     r#"<list-input id="x"><ul><li><input value="Alice"></li><li><input value="Bob"></li></ul></list-input>"#,
/// ).unwrap();
/// list.mount();
/// assert_eq!(list.value(), ["Alice", "Bob"]);
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    pub(super) config: Config,
    pub(super) root: Element,
    pub(super) entries: Vec<Entry>,
    pub(super) value: Vec<String>,
    pub(super) verdict: Verdict,
    pub(super) focus: Option<Focus>,
    pub(super) mounted: bool,
    pub(super) revision: u64,

    /// Keyboard bindings used while focused.
    pub key_map: KeyMap,
}

/// Creates an unmounted control with the given configuration.
pub fn new(config: Config) -> Model {
    Model::new(config)
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Config::new())
    }
}

impl Model {
    /// Creates an unmounted control. Its markup is just the host element;
    /// call [`Model::mount`] to build the list.
    pub fn new(config: Config) -> Self {
        let root = config.to_element();
        Self::with_root(config, root)
    }

    /// Wraps an existing host element, reading the configuration from its
    /// attributes. The markup is adopted as-is until [`Model::mount`].
    pub fn from_element(root: Element) -> Self {
        let config = Config::from_element(&root);
        Self::with_root(config, root)
    }

    /// Parses markup and wraps its first `<list-input>` element.
    ///
    /// # Errors
    ///
    /// Fails if the markup cannot be tokenized or has no `<list-input>`.
    pub fn parse(markup: &str) -> markup::Result<Self> {
        markup::parse_element(markup, TAG_NAME).map(Self::from_element)
    }

    fn with_root(config: Config, root: Element) -> Self {
        let verdict = evaluate(&[], &config);
        Self {
            config,
            root,
            entries: Vec::new(),
            value: Vec::new(),
            verdict,
            focus: None,
            mounted: false,
            revision: 0,
            key_map: default_key_map(),
        }
    }

    /// The control id.
    pub fn id(&self) -> &str {
        self.config.id()
    }

    /// The configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The control's current markup.
    pub fn markup(&self) -> &Element {
        &self.root
    }

    /// Whether [`Model::mount`] has run.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries, which only holds before mounting.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The published value: entry texts in display order.
    pub fn value(&self) -> &[String] {
        &self.value
    }

    /// The published value as JSON text.
    pub fn value_json(&self) -> String {
        serde_json::to_string(&self.value).unwrap_or_else(|_| "[]".to_string())
    }

    /// The published verdict.
    pub fn validity(&self) -> &Verdict {
        &self.verdict
    }

    /// The verdict as native-style flags.
    pub fn validity_state(&self) -> ValidityState {
        self.verdict.state()
    }

    /// The validation message; empty when valid.
    pub fn validation_message(&self) -> &str {
        self.verdict.message()
    }

    /// Whether the control is valid.
    pub fn check_validity(&self) -> bool {
        self.verdict.is_valid()
    }

    /// Number of publications so far. Each add, remove, edit or mount
    /// publishes value and verdict together and bumps this once.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The element that currently has focus, if it belongs to this control.
    pub fn focus_target(&self) -> Option<Focus> {
        self.focus
    }

    /// Renders the control's markup as HTML.
    pub fn view(&self) -> String {
        self.root.to_html()
    }

    /// Records `target` as focused and returns the command asking the host
    /// to move focus there.
    pub(super) fn set_focus(&mut self, target: Focus) -> Cmd {
        self.focus = Some(target);
        focus_cmd(self.config.id().to_string(), target.element_id(&self.config))
    }
}

fn focus_cmd(control_id: String, element_id: String) -> Cmd {
    Box::pin(async move {
        Some(Box::new(FocusMsg {
            control_id,
            element_id,
        }) as Msg)
    })
}

impl Component for Model {
    /// Focuses the first input, or the add control when there is none.
    fn focus(&mut self) -> Option<Cmd> {
        let target = if self.entries.is_empty() {
            Focus::Add
        } else {
            Focus::Input(0)
        };
        Some(self.set_focus(target))
    }

    fn blur(&mut self) {
        self.focus = None;
    }

    fn focused(&self) -> bool {
        self.focus.is_some()
    }
}

impl FormAssociated for Model {
    fn name(&self) -> &str {
        self.config.name()
    }

    fn form_value(&self) -> FormValue {
        FormValue::List(self.value.clone())
    }

    fn check_validity(&self) -> bool {
        self.verdict.is_valid()
    }

    fn validation_message(&self) -> &str {
        self.verdict.message()
    }

    fn anchor_id(&self) -> Option<String> {
        self.verdict.anchor().map(|a| a.element_id(&self.config))
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let mut model = Self::default();
        model.mount();
        (model, None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
