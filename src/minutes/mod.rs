//! Minute entries for a meeting in session.
//!
//! Each function here renders one fragment of the minutes feed as an
//! [`Element`](crate::markup::Element). The feed starts with the meeting
//! being called to order, read from the meeting details form, and offers
//! any other business after each item until the meeting is adjourned.
//!
//! ```rust
//! use minutes_widgets::form::FormData;
//! use minutes_widgets::minutes::{render_called_to_order, MeetingDetails};
//!
//! let mut data = FormData::new();
//! data.insert("meeting-title", "AGM");
//! data.insert("sederunt", r#"["Alice","Bob"]"#);
//!
//! let details = MeetingDetails::from_form(&data, "Wednesday 14 October 2026", "2:05 pm UTC")?;
//! let entry = render_called_to_order(&details);
//! assert_eq!(entry.find_by_id("sederunt").unwrap().text_content(), "AliceBob");
//! # Ok::<(), minutes_widgets::form::FormError>(())
//! ```

pub mod datetime;
pub mod render;

pub use render::{
    render_adjournment, render_any_other_business, render_called_to_order, render_discuss_motion,
    render_put_motion_form, render_voting_result,
};

use crate::form::{self, FormData};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::debug;

/// Field holding the meeting title.
pub const TITLE_FIELD: &str = "meeting-title";

/// Field holding the attendee list.
pub const SEDERUNT_FIELD: &str = "sederunt";

/// What the meeting details form collects, plus when the meeting started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDetails {
    /// The meeting title.
    pub title: String,
    /// Attendees, in the order entered.
    pub sederunt: Vec<String>,
    /// Formatted start date.
    pub local_start_date: String,
    /// Formatted start time.
    pub local_start_time: String,
}

impl MeetingDetails {
    /// Reads the details from submitted form data.
    ///
    /// # Errors
    ///
    /// Fails if either field is missing or the sederunt is not a list.
    pub fn from_form(
        data: &FormData,
        local_start_date: impl Into<String>,
        local_start_time: impl Into<String>,
    ) -> form::Result<Self> {
        let title = data
            .get(TITLE_FIELD)
            .ok_or_else(|| form::FormError::MissingField(TITLE_FIELD.to_string()))?
            .to_string();
        let sederunt = data.list(SEDERUNT_FIELD)?;
        let details = Self {
            title,
            sederunt,
            local_start_date: local_start_date.into(),
            local_start_time: local_start_time.into(),
        };
        debug!(?details, "meeting details submitted");
        Ok(details)
    }

    /// Reads the details, formatting `started` as the start date and time.
    ///
    /// # Errors
    ///
    /// As [`MeetingDetails::from_form`].
    pub fn started_at<Tz>(data: &FormData, started: &DateTime<Tz>) -> form::Result<Self>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self::from_form(
            data,
            datetime::format_date(started),
            datetime::format_time(started),
        )
    }

    /// Title of the page while the meeting is in session.
    pub fn session_title(&self) -> String {
        format!("Meeting in session: {}", self.title)
    }
}
