//! Form participation for controls.
//!
//! A form collects the controls that take part in its submission. Each
//! control reports a name, a value and whether it is valid; [`submit`]
//! refuses to produce [`FormData`] while any control is invalid, and points
//! at the first offending control instead.
//!
//! ```rust
//! use minutes_widgets::form::{submit, FormError, TextField};
//! use minutes_widgets::listinput::{Config, Model};
//!
//! let mut title = TextField::new("meeting-title").with_required(true);
//! let mut sederunt = Model::new(
//!     Config::new().with_id("sederunt").with_required(true).with_item_desc("attendee"),
//! );
//! sederunt.mount();
//!
//! let err = submit(&[&title, &sederunt]).unwrap_err();
//! assert!(matches!(err, FormError::Invalid { ref control, .. } if control == "meeting-title"));
//!
//! title.set_value("AGM");
//! sederunt.edit_item(0, "Alice");
//! let data = submit(&[&title, &sederunt]).unwrap();
//! assert_eq!(data.get("meeting-title"), Some("AGM"));
//! assert_eq!(data.list("sederunt").unwrap(), ["Alice"]);
//! ```

use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

/// Result type for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors raised while submitting or reading form data.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FormError {
    /// A control failed validation; submission was blocked.
    #[error("{control}: {message}")]
    Invalid {
        /// Name of the control.
        control: String,
        /// Its validation message.
        message: String,
        /// Id of the element to focus, if the control names one.
        anchor: Option<String>,
    },
    /// No field with this name was submitted.
    #[error("missing form field `{0}`")]
    MissingField(String),
    /// A list field did not hold a JSON array of strings.
    #[error("form field `{name}` is not a list")]
    MalformedList {
        /// Name of the field.
        name: String,
        /// Decoding error.
        #[source]
        source: serde_json::Error,
    },
}

/// The value a control contributes to submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    /// A single string.
    Text(String),
    /// An ordered list of strings, submitted as JSON.
    List(Vec<String>),
}

impl FormValue {
    /// The submitted string form.
    pub fn to_submission(&self) -> String {
        match self {
            FormValue::Text(text) => text.clone(),
            FormValue::List(items) => {
                serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
            }
        }
    }
}

/// A control that takes part in form submission and validation.
pub trait FormAssociated {
    /// Name under which the value is submitted.
    fn name(&self) -> &str;

    /// The current value.
    fn form_value(&self) -> FormValue;

    /// Whether the control is valid.
    fn check_validity(&self) -> bool;

    /// Message explaining why the control is invalid; empty when valid.
    fn validation_message(&self) -> &str;

    /// Id of the element to focus when reporting invalidity.
    fn anchor_id(&self) -> Option<String>;
}

/// Submitted name/value pairs in control order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: IndexMap<String, String>,
}

impl FormData {
    /// Creates empty form data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any earlier value for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// The submitted string for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Decodes a list field.
    ///
    /// # Errors
    ///
    /// [`FormError::MissingField`] if nothing was submitted under `name`,
    /// [`FormError::MalformedList`] if the value is not a JSON string array.
    pub fn list(&self, name: &str) -> Result<Vec<String>> {
        let raw = self
            .get(name)
            .ok_or_else(|| FormError::MissingField(name.to_string()))?;
        serde_json::from_str(raw).map_err(|source| FormError::MalformedList {
            name: name.to_string(),
            source,
        })
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field was submitted.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Validates every control, then collects their values.
///
/// # Errors
///
/// [`FormError::Invalid`] for the first invalid control, in order.
pub fn submit(controls: &[&dyn FormAssociated]) -> Result<FormData> {
    let mut data = FormData::new();
    for control in controls {
        if !control.check_validity() {
            debug!(control = control.name(), "submission blocked");
            return Err(FormError::Invalid {
                control: control.name().to_string(),
                message: control.validation_message().to_string(),
                anchor: control.anchor_id(),
            });
        }
        data.insert(control.name(), control.form_value().to_submission());
    }
    debug!(fields = data.len(), "form submitted");
    Ok(data)
}

const FILL_IN_MESSAGE: &str = "Please fill in this field.";

/// A single-line text control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    id: String,
    name: Option<String>,
    value: String,
    required: bool,
}

impl TextField {
    /// Creates an empty, optional field.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets the submission name. The id is used when unset.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets whether an empty value is invalid.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the initial value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// The element id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl FormAssociated for TextField {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    fn form_value(&self) -> FormValue {
        FormValue::Text(self.value.clone())
    }

    fn check_validity(&self) -> bool {
        !(self.required && self.value.is_empty())
    }

    fn validation_message(&self) -> &str {
        if self.check_validity() {
            ""
        } else {
            FILL_IN_MESSAGE
        }
    }

    fn anchor_id(&self) -> Option<String> {
        (!self.check_validity()).then(|| self.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listinput::{Config, Model};

    fn sederunt(required: bool) -> Model {
        let mut model = Model::new(
            Config::new()
                .with_id("sederunt")
                .with_required(required)
                .with_item_desc("attendee"),
        );
        model.mount();
        model
    }

    #[test]
    fn test_list_value_submits_as_json() {
        assert_eq!(
            FormValue::List(vec!["Alice".into(), "Bob".into()]).to_submission(),
            r#"["Alice","Bob"]"#
        );
        assert_eq!(FormValue::Text("AGM".into()).to_submission(), "AGM");
    }

    #[test]
    fn test_invalid_list_blocks_submission_with_anchor() {
        let title = TextField::new("meeting-title").with_value("AGM");
        let list = sederunt(true);
        match submit(&[&title, &list]) {
            Err(FormError::Invalid {
                control,
                message,
                anchor,
            }) => {
                assert_eq!(control, "sederunt");
                assert_eq!(message, "Please enter at least one attendee.");
                assert_eq!(anchor.as_deref(), Some("sederunt-input-0"));
            }
            other => panic!("expected invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_submits_in_control_order() {
        let title = TextField::new("title").with_name("meeting-title").with_value("AGM");
        let mut list = sederunt(false);
        list.set_values(["Alice", "Bob"]);
        let data = submit(&[&list, &title]).unwrap();
        let names: Vec<_> = data.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["sederunt", "meeting-title"]);
        assert_eq!(data.list("sederunt").unwrap(), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_list_decoding_errors() {
        let mut data = FormData::new();
        data.insert("title", "AGM");
        assert!(matches!(data.list("sederunt"), Err(FormError::MissingField(name)) if name == "sederunt"));
        assert!(matches!(data.list("title"), Err(FormError::MalformedList { .. })));
    }

    #[test]
    fn test_text_field_validity() {
        let mut field = TextField::new("t").with_required(true);
        assert!(!field.check_validity());
        assert_eq!(field.validation_message(), FILL_IN_MESSAGE);
        assert_eq!(field.anchor_id().as_deref(), Some("t"));
        field.set_value("x");
        assert!(field.check_validity());
        assert_eq!(field.validation_message(), "");
        assert!(field.anchor_id().is_none());
        assert!(TextField::new("optional").check_validity());
    }

    #[test]
    fn test_error_messages() {
        let err = FormError::Invalid {
            control: "sederunt".into(),
            message: "Please enter at least one attendee.".into(),
            anchor: None,
        };
        assert_eq!(err.to_string(), "sederunt: Please enter at least one attendee.");
        assert_eq!(
            FormError::MissingField("x".into()).to_string(),
            "missing form field `x`"
        );
    }
}
