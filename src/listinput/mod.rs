//! Form-associated list input control.
//!
//! A `<list-input>` collects an open-ended, ordered list of short text
//! entries (the sederunt of a meeting, say) and submits it with its form as
//! a single JSON-encoded value. The user can append entries, remove any
//! entry except a required first one, and edit entries in place.
//!
//! # Basic Usage
//!
//! ```rust
//! use minutes_widgets::listinput::{Config, DomEventMsg, Model};
//!
//! let mut list = Model::new(Config::new().with_id("sederunt").with_item_desc("attendee"));
//! list.mount();
//!
//! // Events forwarded by the host are addressed by element id.
//! list.update(DomEventMsg::change("sederunt-input-0", "Alice").into());
//! list.update(DomEventMsg::click("sederunt-add").into());
//! list.update(DomEventMsg::change("sederunt-input-1", "Bob").into());
//! assert_eq!(list.value_json(), r#"["Alice","Bob"]"#);
//!
//! list.update(DomEventMsg::click("sederunt-remove-0").into());
//! assert_eq!(list.value(), ["Bob"]);
//! ```
//!
//! # Markup
//!
//! The control's markup is repaired into canonical form on every mutation;
//! see [`repair()`]. Hand-authored or server-rendered markup is adopted:
//! existing inputs keep their text, anything missing is created, and
//! anything out of place is moved or dropped.
//!
//! # Validity
//!
//! [`evaluate`] decides the [`Verdict`] from the published value. Value and
//! verdict are always published together, value first.

pub mod config;
pub mod keymap;
pub mod methods;
pub mod model;
pub mod repair;
pub mod types;
pub mod validity;


pub use config::{Config, TAG_NAME};
pub use keymap::{default_key_map, KeyMap};
pub use model::{new, Model};
pub use repair::{render_list_item, repair, Repaired};
pub use types::{
    AddItemMsg, Anchor, Diagnostic, DomEventKind, DomEventMsg, EditItemMsg, Entry, Focus,
    FocusMsg, RemoveItemMsg, ValidityState, Verdict,
};
pub use validity::evaluate;
