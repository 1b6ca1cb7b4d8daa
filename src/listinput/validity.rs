//! Validity evaluation for list values.

use super::config::Config;
use super::types::{Anchor, Verdict};

/// Evaluates `value` against the control's constraints.
///
/// Rules apply in order; the first that matches decides:
///
/// 1. required and no entries: [`Verdict::MissingAllItems`] at the add control
/// 2. required, empties disallowed, every entry empty: [`Verdict::MissingAllItems`]
/// 3. empties disallowed, every entry empty: [`Verdict::MissingNonEmptyItem`]
/// 4. empties disallowed, some entry empty: [`Verdict::ItemEmpty`]
///
/// Rules 2 to 4 anchor at the first empty input. Anything else is valid.
///
/// ```rust
/// use minutes_widgets::listinput::{evaluate, Anchor, Config};
///
/// let config = Config::new();
/// let verdict = evaluate(&["Alice".into(), "".into()], &config);
/// assert_eq!(verdict.anchor(), Some(Anchor::Input(1)));
/// ```
pub fn evaluate(value: &[String], config: &Config) -> Verdict {
    let first_empty = value.iter().position(String::is_empty).map(Anchor::Input);
    let all_empty = value.iter().all(String::is_empty);

    if config.required() && value.is_empty() {
        return Verdict::MissingAllItems {
            message: at_least_one(config),
            anchor: Anchor::AddButton,
        };
    }

    if config.required() && !config.allow_empty() && all_empty {
        return Verdict::MissingAllItems {
            message: at_least_one(config),
            anchor: first_empty.unwrap_or(Anchor::AddButton),
        };
    }

    if !config.allow_empty() {
        if let Some(anchor) = first_empty {
            let message = each_item(config);
            return if all_empty {
                Verdict::MissingNonEmptyItem { message, anchor }
            } else {
                Verdict::ItemEmpty { message, anchor }
            };
        }
    }

    Verdict::Valid
}

fn at_least_one(config: &Config) -> String {
    format!("Please enter at least one {}.", config.item_desc())
}

fn each_item(config: &Config) -> String {
    format!("Please enter a value for each {}.", config.item_desc())
}
