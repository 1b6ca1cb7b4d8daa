//! Host-supplied configuration, read once when the control is created.

use crate::markup::Element;
use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;

/// Tag name of the host element.
pub const TAG_NAME: &str = "list-input";

/// Item description used when `itemdesc` is absent.
pub const DEFAULT_ITEM_DESC: &str = "item";

/// Immutable configuration of one list input.
///
/// Built from the host element's attributes with [`Config::from_element`]
/// or programmatically with [`Config::new`] and the `with_*` methods.
///
/// ```rust
/// use minutes_widgets::listinput::Config;
///
/// let config = Config::new()
///     .with_id("sederunt")
///     .with_required(true)
///     .with_item_desc("attendee");
/// assert_eq!(config.item_placeholder(), "Attendee");
/// assert_eq!(config.input_id(2), "sederunt-input-2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    id: String,
    name: Option<String>,
    required: bool,
    allow_empty: bool,
    item_desc: String,
    item_placeholder: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Default configuration with a freshly generated id.
    pub fn new() -> Self {
        Self {
            id: generate_id(),
            name: None,
            required: false,
            allow_empty: false,
            item_desc: DEFAULT_ITEM_DESC.to_string(),
            item_placeholder: None,
        }
    }

    /// Reads `id`, `name`, `required`, `allowempty`, `itemdesc` and
    /// `itemplaceholder` from a host element. A missing or empty `id` is
    /// replaced by a generated one.
    pub fn from_element(el: &Element) -> Self {
        let id = match el.attr("id") {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => generate_id(),
        };
        Self {
            id,
            name: el.attr("name").map(str::to_string),
            required: el.has_attr("required"),
            allow_empty: el.has_attr("allowempty"),
            item_desc: el.attr("itemdesc").unwrap_or(DEFAULT_ITEM_DESC).to_string(),
            item_placeholder: el.attr("itemplaceholder").map(str::to_string),
        }
    }

    /// Writes the configuration back as attributes on a new host element.
    pub fn to_element(&self) -> Element {
        let mut el = Element::new(TAG_NAME).with_attr("id", self.id.as_str());
        if let Some(name) = &self.name {
            el.set_attr("name", name.as_str());
        }
        if self.required {
            el.set_attr("required", "");
        }
        if self.allow_empty {
            el.set_attr("allowempty", "");
        }
        if self.item_desc != DEFAULT_ITEM_DESC {
            el.set_attr("itemdesc", self.item_desc.as_str());
        }
        if let Some(placeholder) = &self.item_placeholder {
            el.set_attr("itemplaceholder", placeholder.as_str());
        }
        el
    }

    /// Sets the control id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the name the value is submitted under.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets whether at least one item is required.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets whether empty items are allowed.
    pub fn with_allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    /// Sets the item description.
    pub fn with_item_desc(mut self, desc: impl Into<String>) -> Self {
        self.item_desc = desc.into();
        self
    }

    /// Sets the input placeholder prefix.
    pub fn with_item_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.item_placeholder = Some(placeholder.into());
        self
    }

    /// The control id. Every derived element id starts with it.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The submission name: the `name` attribute, or the id when unnamed.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Whether at least one item is required.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Whether empty items are valid.
    pub fn allow_empty(&self) -> bool {
        self.allow_empty
    }

    /// The item description, e.g. `"attendee"`.
    pub fn item_desc(&self) -> &str {
        &self.item_desc
    }

    /// The placeholder prefix: explicit, or the capitalized item description.
    pub fn item_placeholder(&self) -> String {
        match &self.item_placeholder {
            Some(placeholder) => placeholder.clone(),
            None => capitalize_first(&self.item_desc),
        }
    }

    /// Id of the input of entry `index`.
    pub fn input_id(&self, index: usize) -> String {
        format!("{}-input-{}", self.id, index)
    }

    /// Id of the remove control of entry `index`.
    pub fn remove_id(&self, index: usize) -> String {
        format!("{}-remove-{}", self.id, index)
    }

    /// Id of the add control.
    pub fn add_id(&self) -> String {
        format!("{}-add", self.id)
    }
}

/// Generates a page-unique control id.
pub fn generate_id() -> String {
    format!("{}-{}", TAG_NAME, Uuid::new_v4())
}

/// Uppercases the first grapheme cluster of `s`.
pub fn capitalize_first(s: &str) -> String {
    let mut graphemes = s.graphemes(true);
    match graphemes.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), graphemes.as_str()),
        None => String::new(),
    }
}
