//! Fragment renderers for the minutes feed.

use super::MeetingDetails;
use crate::markup::Element;

fn button(action: &str, text: &str) -> Element {
    Element::new("button")
        .with_attr("type", "button")
        .with_attr("data-action", action)
        .with_text(text)
}

// Motion texts are minuted as sentences.
fn as_sentence(text: &str) -> String {
    if text.ends_with('.') {
        text.to_string()
    } else {
        format!("{text}.")
    }
}

/// The entry recording that the meeting was called to order, with its
/// sederunt.
pub fn render_called_to_order(details: &MeetingDetails) -> Element {
    let sederunt = details
        .sederunt
        .iter()
        .fold(Element::new("ul").with_attr("id", "sederunt"), |ul, attendee| {
            ul.with_child(Element::new("li").with_text(attendee.as_str()))
        });

    Element::new("section")
        .with_child(Element::new("h2").with_text(details.title.as_str()))
        .with_child(Element::new("p").with_text(format!(
            "The meeting was called to order at {} on {}.",
            details.local_start_time, details.local_start_date
        )))
        .with_child(Element::new("h3").with_text("Sederunt"))
        .with_child(sederunt)
}

/// The prompt offered between items: put a motion or adjourn.
pub fn render_any_other_business() -> Element {
    let buttons = Element::new("div")
        .with_attr("class", "aob__buttons")
        .with_child(button("put-motion", "Put a motion"))
        .with_child(button("adjourn", "Adjourn the meeting"));

    Element::new("section")
        .with_attr("id", "aob")
        .with_attr("class", "aob")
        .with_child(Element::new("h1").with_text("Any other business?"))
        .with_child(buttons)
}

/// The form for putting a motion: a sponsor chosen from the sederunt and
/// the motion text, both required.
pub fn render_put_motion_form(sederunt: &[String]) -> Element {
    let sponsor = sederunt.iter().fold(
        Element::new("select")
            .with_attr("id", "put-motion-form-sponsor")
            .with_attr("aria-label", "Sponsor")
            .with_attr("class", "put-motion-form__sponsor")
            .with_attr("required", ""),
        |select, attendee| {
            select.with_child(
                Element::new("option")
                    .with_attr("value", attendee.as_str())
                    .with_text(attendee.as_str()),
            )
        },
    );

    let motion = Element::new("div")
        .with_attr("class", "put-motion-form__motion")
        .with_child(sponsor)
        .with_child(
            Element::new("p")
                .with_attr("aria-hidden", "true")
                .with_attr("class", "put-motion-form__moves-that")
                .with_text("moves that"),
        )
        .with_child(
            Element::new("textarea")
                .with_attr("aria-label", "Motion text")
                .with_attr("class", "put-motion-form__text")
                .with_attr("required", ""),
        );

    let buttons = Element::new("div")
        .with_attr("class", "put-motion-form__buttons")
        .with_child(
            Element::new("button")
                .with_attr("type", "submit")
                .with_attr("data-action", "put-motion")
                .with_text("Put motion"),
        )
        .with_child(button("cancel", "Cancel").with_attr("class", "button--neutral"));

    Element::new("form")
        .with_attr("class", "put-motion-form")
        .with_child(motion)
        .with_child(buttons)
}

/// A motion put to the floor, ready for discussion.
pub fn render_discuss_motion(sponsor: &str, text: &str) -> Element {
    Element::new("section")
        .with_child(Element::new("h1").with_text(format!("{sponsor}’s motion is on the table")))
        .with_child(
            Element::new("p").with_text(format!("{sponsor} moved that {}", as_sentence(text))),
        )
        .with_child(Element::new("p").with_text(
            "Discuss the motion. When the floor is ready to vote, activate the button below.",
        ))
        .with_child(button("vote", "Vote"))
}

/// The outcome of a vote.
///
/// `against` is `None` when voting stopped after the count in favour, which
/// happens when nobody, or an absolute majority, is in favour. The motion is
/// carried when more are in favour than against.
pub fn render_voting_result(
    sponsor: &str,
    text: &str,
    in_favour: u32,
    against: Option<u32>,
) -> Element {
    let result = if in_favour > against.unwrap_or(0) {
        "carried"
    } else {
        "denied"
    };

    let explanation = match against {
        _ if in_favour == 0 => "The motion was denied, since nobody was in favour.".to_string(),
        None => format!(
            "The motion was carried, since {in_favour} voted in favour, \
             which is an absolute majority of those present."
        ),
        Some(against) => format!(
            "The motion was {result}, since {in_favour} voted in favour and {against} voted against."
        ),
    };

    Element::new("section")
        .with_child(Element::new("h2").with_text(format!("{sponsor}’s motion was {result}")))
        .with_child(
            Element::new("p").with_text(format!("{sponsor} moved that {}", as_sentence(text))),
        )
        .with_child(Element::new("p").with_text(explanation))
}

/// The closing entry.
pub fn render_adjournment(date: &str, time: &str) -> Element {
    Element::new("section")
        .with_child(Element::new("h1").with_text("Meeting adjourned"))
        .with_child(
            Element::new("p").with_text(format!("The meeting was adjourned at {time} on {date}.")),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(el: &'a Element, tag: &'a str) -> Vec<String> {
        el.child_elements()
            .filter(|e| e.tag == tag)
            .map(Element::text_content)
            .collect()
    }

    #[test]
    fn test_called_to_order() {
        let details = MeetingDetails {
            title: "AGM".into(),
            sederunt: vec!["Alice".into(), "Bob".into()],
            local_start_date: "Wednesday 14 October 2026".into(),
            local_start_time: "2:05 pm UTC".into(),
        };
        let entry = render_called_to_order(&details);
        assert_eq!(texts(&entry, "h2"), vec!["AGM"]);
        assert_eq!(
            texts(&entry, "p"),
            vec!["The meeting was called to order at 2:05 pm UTC on Wednesday 14 October 2026."]
        );
        assert_eq!(texts(&entry, "h3"), vec!["Sederunt"]);
        let sederunt = entry.find_by_id("sederunt").unwrap();
        assert_eq!(texts(sederunt, "li"), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_any_other_business() {
        assert_eq!(
            render_any_other_business().to_html(),
            concat!(
                r#"<section id="aob" class="aob"><h1>Any other business?</h1>"#,
                r#"<div class="aob__buttons">"#,
                r#"<button type="button" data-action="put-motion">Put a motion</button>"#,
                r#"<button type="button" data-action="adjourn">Adjourn the meeting</button>"#,
                r#"</div></section>"#,
            )
        );
    }

    #[test]
    fn test_put_motion_form_offers_sederunt_as_sponsors() {
        let form = render_put_motion_form(&["Alice".to_string(), "Bob & Co".to_string()]);
        assert_eq!(
            form.to_html(),
            concat!(
                r#"<form class="put-motion-form"><div class="put-motion-form__motion">"#,
                r#"<select id="put-motion-form-sponsor" aria-label="Sponsor" class="put-motion-form__sponsor" required>"#,
                r#"<option value="Alice">Alice</option>"#,
                r#"<option value="Bob &amp; Co">Bob &amp; Co</option>"#,
                r#"</select>"#,
                r#"<p aria-hidden="true" class="put-motion-form__moves-that">moves that</p>"#,
                r#"<textarea aria-label="Motion text" class="put-motion-form__text" required></textarea>"#,
                r#"</div><div class="put-motion-form__buttons">"#,
                r#"<button type="submit" data-action="put-motion">Put motion</button>"#,
                r#"<button type="button" data-action="cancel" class="button--neutral">Cancel</button>"#,
                r#"</div></form>"#,
            )
        );
        let empty = render_put_motion_form(&[]);
        assert!(empty.find_by_id("put-motion-form-sponsor").unwrap().children.is_empty());
    }

    #[test]
    fn test_discuss_motion_adds_full_stop() {
        let entry = render_discuss_motion("Alice", "the minutes be approved");
        assert_eq!(texts(&entry, "h1"), vec!["Alice’s motion is on the table"]);
        assert_eq!(
            texts(&entry, "p")[0],
            "Alice moved that the minutes be approved."
        );
        let entry = render_discuss_motion("Alice", "we adjourn.");
        assert_eq!(texts(&entry, "p")[0], "Alice moved that we adjourn.");
        assert_eq!(entry.child("button").unwrap().attr("data-action"), Some("vote"));
    }

    #[test]
    fn test_voting_result_explanations() {
        let denied = render_voting_result("Bob", "we adjourn", 0, None);
        assert_eq!(texts(&denied, "h2"), vec!["Bob’s motion was denied"]);
        assert_eq!(
            texts(&denied, "p")[1],
            "The motion was denied, since nobody was in favour."
        );

        let majority = render_voting_result("Bob", "we adjourn", 3, None);
        assert_eq!(texts(&majority, "h2"), vec!["Bob’s motion was carried"]);
        assert_eq!(
            texts(&majority, "p")[1],
            "The motion was carried, since 3 voted in favour, which is an absolute majority of those present."
        );

        let counted = render_voting_result("Bob", "we adjourn", 2, Some(2));
        assert_eq!(texts(&counted, "h2"), vec!["Bob’s motion was denied"]);
        assert_eq!(
            texts(&counted, "p")[1],
            "The motion was denied, since 2 voted in favour and 2 voted against."
        );

        let carried = render_voting_result("Bob", "we adjourn", 3, Some(1));
        assert_eq!(texts(&carried, "h2"), vec!["Bob’s motion was carried"]);
    }

    #[test]
    fn test_adjournment() {
        let entry = render_adjournment("Wednesday 14 October 2026", "4:30 pm UTC");
        assert_eq!(
            entry.to_html(),
            "<section><h1>Meeting adjourned</h1><p>The meeting was adjourned at 4:30 pm UTC on Wednesday 14 October 2026.</p></section>"
        );
    }
}
