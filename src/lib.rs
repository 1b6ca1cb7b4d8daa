#![warn(missing_docs)]

//! # minutes-widgets
//!
//! Form controls and minute-entry fragments for an in-browser meeting
//! minutes tool, written as [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! components.
//!
//! ## Overview
//!
//! The centerpiece is [`ListInput`], a form-associated control that collects
//! an open-ended, ordered list of short text entries and submits it as one
//! JSON value. Like every component here it follows the Elm Architecture:
//! messages go in through `update()`, markup comes out of `view()`, and
//! anything the host must do (moving focus) comes back as a `Cmd`.
//!
//! Markup is an in-memory [`markup::Element`] tree standing in for the DOM.
//! The control repairs that tree into canonical form on every mutation, so
//! it can adopt hand-authored or server-rendered markup.
//!
//! ## Components
//!
//! - **Form Controls**: `ListInput`, `TextField`
//! - **Minute Entries**: called to order, any other business, motions,
//!   voting results, adjournment
//! - **Utilities**: `markup` tree and parser, `key` bindings, `form` submission
//!
//! ## Focus Management
//!
//! Components implement the [`Component`] trait:
//!
//! ```rust
//! use minutes_widgets::prelude::*;
//! use bubbletea_rs::Cmd;
//!
//! fn handle_focus<T: Component>(component: &mut T) {
//!     let _cmd: Option<Cmd> = component.focus();
//!     assert!(component.focused());
//!     component.blur();
//!     assert!(!component.focused());
//! }
//!
//! let mut sederunt = ListInput::new(ListInputConfig::new().with_id("sederunt"));
//! sederunt.mount();
//! handle_focus(&mut sederunt);
//! ```
//!
//! ## Forms
//!
//! ```rust
//! use minutes_widgets::prelude::*;
//!
//! let title = TextField::new("meeting-title").with_value("AGM");
//! let mut sederunt = ListInput::new(
//!     ListInputConfig::new().with_id("sederunt").with_required(true),
//! );
//! sederunt.set_values(["Alice", "Bob"]);
//!
//! let data = submit(&[&title, &sederunt]).unwrap();
//! assert_eq!(data.get("sederunt"), Some(r#"["Alice","Bob"]"#));
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use minutes_widgets::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct MeetingForm {
//!     sederunt: ListInput,
//! }
//!
//! impl Model for MeetingForm {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut sederunt = ListInput::new(
//!             ListInputConfig::new()
//!                 .with_id("sederunt")
//!                 .with_required(true)
//!                 .with_item_desc("attendee"),
//!         );
//!         sederunt.mount();
//!         (Self { sederunt }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.sederunt.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("<form>{}</form>", self.sederunt.view())
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! Components log through [`tracing`]: repairs and publications at `debug`,
//! ignored requests at `warn`, routing decisions at `trace`. No subscriber
//! is installed by this crate.

pub mod form;
pub mod key;
pub mod listinput;
pub mod markup;
pub mod minutes;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// ## Focus States
///
/// - **Focused**: one of the component's elements has keyboard focus and
///   key messages are handled
/// - **Blurred**: key messages are ignored
///
/// ## Implementation Guidelines
///
/// - `focus()` sets the focused state and returns the command that asks the
///   host to move focus, if any
/// - `blur()` clears the focused state
/// - `focused()` reports the current state
///
/// ## Examples
///
/// ```rust
/// use minutes_widgets::prelude::*;
///
/// let mut list = ListInput::new(ListInputConfig::new());
/// list.mount();
/// assert!(!list.focused());
///
/// let _cmd = list.focus();
/// assert!(list.focused());
///
/// list.blur();
/// assert!(!list.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// # Returns
    ///
    /// An optional command for the bubbletea runtime, typically a message
    /// asking the host to focus a particular element.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns `true` if the component is currently focused.
    fn focused(&self) -> bool;
}

pub use form::{submit, FormAssociated, FormData, FormError, FormValue, TextField};
pub use key::{
    matches, matches_binding, new_binding, with_disabled, with_help, with_keys_str, Binding,
    Help as KeyHelp, KeyMap, KeyPress,
};
pub use listinput::{
    default_key_map as listinput_default_key_map, new as listinput_new, AddItemMsg,
    Config as ListInputConfig, DomEventKind, DomEventMsg, EditItemMsg, FocusMsg,
    KeyMap as ListInputKeyMap, Model as ListInput, RemoveItemMsg, Verdict,
};
pub use markup::{parse_element, parse_fragment, Element, Node, ParseError};
pub use minutes::MeetingDetails;

/// Prelude module for convenient imports.
///
/// ```rust
/// use minutes_widgets::prelude::*;
/// ```
///
/// # What's Included
///
/// - The component types (`ListInput`, `TextField`) and their messages
/// - The `Component` and `FormAssociated` traits
/// - Key binding types and functions (`Binding`, `KeyMap`, etc.)
/// - The markup tree types
pub mod prelude {
    pub use crate::form::{submit, FormAssociated, FormData, FormError, FormValue, TextField};
    pub use crate::key::{
        matches, matches_binding, new_binding, with_disabled, with_help, with_keys_str, Binding,
        Help as KeyHelp, KeyMap, KeyPress,
    };
    pub use crate::listinput::{
        default_key_map as listinput_default_key_map, new as listinput_new, AddItemMsg,
        Config as ListInputConfig, DomEventMsg, EditItemMsg, FocusMsg, Model as ListInput,
        RemoveItemMsg, Verdict,
    };
    pub use crate::markup::{Element, Node};
    pub use crate::minutes::MeetingDetails;
    pub use crate::Component;
}
