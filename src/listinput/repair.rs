//! Idempotent normalization of list input markup.
//!
//! [`repair`] maps any host element (hand-authored, server-rendered, empty or
//! already canonical) to the canonical structure:
//!
//! ```html
//! <list-input id="x">
//!   <ul>
//!     <li>
//!       <label for="x-input-0">Name</label>
//!       <input id="x-input-0" type="text" placeholder="Item 1">
//!       <button type="button" id="x-remove-0" data-action="remove" aria-label="Remove item">x</button>
//!     </li>
//!   </ul>
//!   <button type="button" id="x-add" data-action="add" aria-label="Add item">+</button>
//! </list-input>
//! ```
//!
//! It never fails. Everything it changes is reported as a [`Diagnostic`], and
//! repairing its own output again changes nothing.

use super::config::Config;
use super::types::{Diagnostic, Entry};
use crate::markup::{Element, Node};

/// Static text of every entry label.
pub const LABEL_TEXT: &str = "Name";

/// Output of [`repair`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repaired {
    /// The canonical host element.
    pub root: Element,
    /// Entries in display order, read from the repaired inputs.
    pub entries: Vec<Entry>,
    /// What had to change.
    pub diagnostics: Vec<Diagnostic>,
}

/// Whether the entry at `index` keeps a remove control.
pub fn is_deletable(index: usize, config: &Config) -> bool {
    !(index == 0 && config.required())
}

/// Repairs `source` into canonical form.
pub fn repair(source: &Element, config: &Config) -> Repaired {
    let mut root = source.clone();
    let mut diagnostics = Vec::new();

    if root.attr("id") != Some(config.id()) {
        root.set_attr("id", config.id());
        diagnostics.push(Diagnostic::AssignedId);
    }

    let list_pos = ensure_list(&mut root, &mut diagnostics);
    let entries = match root.children[list_pos].as_element_mut() {
        Some(list) => repair_list(list, config, &mut diagnostics),
        None => Vec::new(),
    };

    ensure_add_button(&mut root, config, &mut diagnostics);

    Repaired {
        root,
        entries,
        diagnostics,
    }
}

/// Renders a fresh entry.
pub fn render_list_item(config: &Config, index: usize, text: &str) -> Element {
    let mut label = Element::new("label");
    configure_label(&mut label, config, index);

    let mut input = Element::new("input");
    configure_input(&mut input, config, index);
    if !text.is_empty() {
        input.set_attr("value", text);
    }

    let mut li = Element::new("li").with_child(label).with_child(input);
    if is_deletable(index, config) {
        let mut button = Element::new("button");
        configure_remove_button(&mut button, config, index);
        li.push(button);
    }
    li
}

fn is_list(node: &Node) -> bool {
    node.is_element("ul") || node.is_element("ol")
}

/// Index into `root.children` of the list container.
pub(crate) fn list_position(root: &Element) -> Option<usize> {
    root.children.iter().position(is_list)
}

/// The list container, if there is one.
pub(crate) fn list_mut(root: &mut Element) -> Option<&mut Element> {
    root.children
        .iter_mut()
        .find(|n| is_list(n))
        .and_then(Node::as_element_mut)
}

/// Index into `list.children` of the `index`-th item.
pub(crate) fn item_position(list: &Element, index: usize) -> Option<usize> {
    list.children
        .iter()
        .enumerate()
        .filter(|(_, n)| n.is_element("li"))
        .nth(index)
        .map(|(pos, _)| pos)
}

fn ensure_list(root: &mut Element, diagnostics: &mut Vec<Diagnostic>) -> usize {
    let positions: Vec<usize> = root
        .children
        .iter()
        .enumerate()
        .filter(|(_, n)| is_list(n))
        .map(|(pos, _)| pos)
        .collect();

    let Some((&first, extra)) = positions.split_first() else {
        root.push(Element::new("ul"));
        diagnostics.push(Diagnostic::CreatedList);
        return root.children.len() - 1;
    };

    let mut moved = Vec::new();
    for &pos in extra.iter().rev() {
        if let Node::Element(list) = root.children.remove(pos) {
            moved.push(list.children);
            diagnostics.push(Diagnostic::MergedList);
        }
    }
    if let Some(list) = root.children[first].as_element_mut() {
        for children in moved.into_iter().rev() {
            list.children.extend(children);
        }
    }
    first
}

fn repair_list(list: &mut Element, config: &Config, diagnostics: &mut Vec<Diagnostic>) -> Vec<Entry> {
    list.children.retain(|node| match node {
        Node::Element(el) if el.tag == "li" => true,
        n if n.is_blank_text() => false,
        Node::Element(el) => {
            diagnostics.push(Diagnostic::DroppedNode {
                tag: el.tag.clone(),
            });
            false
        }
        Node::Text(_) => {
            diagnostics.push(Diagnostic::DroppedNode {
                tag: "#text".to_string(),
            });
            false
        }
    });

    if list.children.is_empty() {
        list.push(render_list_item(config, 0, ""));
        diagnostics.push(Diagnostic::SeededEntry);
    }

    list.child_elements_mut()
        .enumerate()
        .map(|(index, li)| repair_item(li, index, config, diagnostics))
        .collect()
}

fn repair_item(
    li: &mut Element,
    index: usize,
    config: &Config,
    diagnostics: &mut Vec<Diagnostic>,
) -> Entry {
    for tag in ["label", "input", "button"] {
        remove_duplicates(li, index, tag, diagnostics);
    }

    // An input wrapped in other markup, the label included, is moved up
    // before the label's children are replaced.
    let mut nested_input = None;
    if li.child_position("input").is_none() {
        nested_input = li.take_descendant(&|el: &Element| el.tag == "input");
        if nested_input.is_some() {
            diagnostics.push(Diagnostic::LiftedInput(index));
        }
    }

    let label_pos = match li.child_position("label") {
        Some(pos) => pos,
        None => {
            li.children.insert(0, Element::new("label").into());
            diagnostics.push(Diagnostic::CreatedLabel(index));
            0
        }
    };
    if let Some(label) = li.children[label_pos].as_element_mut() {
        configure_label(label, config, index);
    }

    if li.child_position("input").is_none() {
        let input = nested_input.unwrap_or_else(|| {
            diagnostics.push(Diagnostic::CreatedInput(index));
            Element::new("input")
        });
        li.children.insert(label_pos + 1, input.into());
    }
    let text = match li.child_mut("input") {
        Some(input) => {
            configure_input(input, config, index);
            input.attr("value").unwrap_or_default().to_string()
        }
        None => String::new(),
    };

    let deletable = is_deletable(index, config);
    match (li.child_position("button"), deletable) {
        (Some(pos), false) => {
            li.children.remove(pos);
            diagnostics.push(Diagnostic::RemovedRemoveButton(index));
        }
        (Some(pos), true) => {
            if let Some(button) = li.children[pos].as_element_mut() {
                configure_remove_button(button, config, index);
            }
        }
        (None, true) => {
            let mut button = Element::new("button");
            configure_remove_button(&mut button, config, index);
            li.push(button);
            diagnostics.push(Diagnostic::CreatedRemoveButton(index));
        }
        (None, false) => {}
    }

    Entry {
        index,
        text,
        deletable,
    }
}

fn remove_duplicates(li: &mut Element, index: usize, tag: &str, diagnostics: &mut Vec<Diagnostic>) {
    let mut seen = false;
    li.children.retain(|node| {
        if !node.is_element(tag) {
            return true;
        }
        if seen {
            diagnostics.push(Diagnostic::RemovedDuplicate {
                index,
                tag: tag.to_string(),
            });
            return false;
        }
        seen = true;
        true
    });
}

fn ensure_add_button(root: &mut Element, config: &Config, diagnostics: &mut Vec<Diagnostic>) {
    let mut seen = false;
    root.children.retain(|node| {
        if !node.is_element("button") {
            return true;
        }
        if seen {
            diagnostics.push(Diagnostic::RemovedExtraButton);
            return false;
        }
        seen = true;
        true
    });

    let list_pos = list_position(root);
    let button_pos = root.child_position("button");
    let mut button = match (button_pos, list_pos) {
        (Some(pos), Some(list)) if pos > list => {
            if let Some(button) = root.children[pos].as_element_mut() {
                configure_add_button(button, config);
            }
            return;
        }
        (Some(pos), _) => match root.children.remove(pos) {
            Node::Element(button) => {
                diagnostics.push(Diagnostic::MovedAddButton);
                button
            }
            Node::Text(_) => Element::new("button"),
        },
        (None, _) => {
            diagnostics.push(Diagnostic::CreatedAddButton);
            Element::new("button")
        }
    };

    configure_add_button(&mut button, config);
    let at = list_position(root).map_or(root.children.len(), |pos| pos + 1);
    root.children.insert(at, Node::Element(button));
}

fn configure_label(label: &mut Element, config: &Config, index: usize) {
    label.set_attr("for", config.input_id(index));
    label.set_text(LABEL_TEXT);
}

fn configure_input(input: &mut Element, config: &Config, index: usize) {
    input.set_attr("id", config.input_id(index));
    input.set_attr("type", "text");
    input.set_attr(
        "placeholder",
        format!("{} {}", config.item_placeholder(), index + 1),
    );
}

fn configure_remove_button(button: &mut Element, config: &Config, index: usize) {
    button.set_attr("type", "button");
    button.set_attr("id", config.remove_id(index));
    button.set_attr("data-action", "remove");
    button.set_attr("aria-label", format!("Remove {}", config.item_desc()));
    button.set_text("x");
}

fn configure_add_button(button: &mut Element, config: &Config) {
    button.set_attr("type", "button");
    button.set_attr("id", config.add_id());
    button.set_attr("data-action", "add");
    button.set_attr("aria-label", format!("Add {}", config.item_desc()));
    button.set_text("+");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_element;

    fn config() -> Config {
        Config::new().with_id("x").with_item_desc("attendee")
    }

    fn parse(markup: &str) -> Element {
        parse_element(markup, "list-input").unwrap()
    }

    #[test]
    fn test_empty_host_gets_canonical_structure() {
        let repaired = repair(&Element::new("list-input"), &config().with_required(true));
        assert_eq!(
            repaired.root.to_html(),
            concat!(
                r#"<list-input id="x"><ul><li>"#,
                r#"<label for="x-input-0">Name</label>"#,
                r#"<input id="x-input-0" type="text" placeholder="Attendee 1">"#,
                r#"</li></ul>"#,
                r#"<button type="button" id="x-add" data-action="add" aria-label="Add attendee">+</button>"#,
                r#"</list-input>"#,
            )
        );
        assert_eq!(
            repaired.diagnostics,
            vec![
                Diagnostic::AssignedId,
                Diagnostic::CreatedList,
                Diagnostic::SeededEntry,
                Diagnostic::CreatedAddButton,
            ]
        );
        assert_eq!(
            repaired.entries,
            vec![Entry {
                index: 0,
                text: String::new(),
                deletable: false,
            }]
        );
    }

    #[test]
    fn test_adopts_existing_items_and_their_text() {
        let root = parse(
            r#"<list-input id="x"><ul>
                 <li><input value="Alice"></li>
                 <li><label>Who</label><input value="Bob"><button>del</button></li>
               </ul></list-input>"#,
        );
        let repaired = repair(&root, &config());
        let texts: Vec<_> = repaired.entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Alice", "Bob"]);
        assert!(repaired.entries.iter().all(|e| e.deletable));

        let list = repaired.root.child("ul").unwrap();
        let second = list.child_elements().nth(1).unwrap();
        assert_eq!(second.child("label").unwrap().attr("for"), Some("x-input-1"));
        assert_eq!(second.child("label").unwrap().text_content(), "Name");
        assert_eq!(second.child("button").unwrap().attr("aria-label"), Some("Remove attendee"));
        assert!(repaired.diagnostics.contains(&Diagnostic::CreatedLabel(0)));
        assert!(repaired.diagnostics.contains(&Diagnostic::CreatedRemoveButton(0)));
    }

    #[test]
    fn test_required_strips_remove_control_from_first_item() {
        let root = parse(r#"<list-input id="x"><ul><li><input><button></button></li></ul></list-input>"#);
        let repaired = repair(&root, &config().with_required(true));
        let li = repaired.root.child("ul").unwrap().child("li").unwrap();
        assert!(li.child("button").is_none());
        assert!(repaired.diagnostics.contains(&Diagnostic::RemovedRemoveButton(0)));
    }

    #[test]
    fn test_missing_input_is_created_after_label() {
        let root = parse(r#"<list-input id="x"><ul><li><label>Name</label></li></ul></list-input>"#);
        let repaired = repair(&root, &config());
        let li = repaired.root.child("ul").unwrap().child("li").unwrap();
        let tags: Vec<_> = li.child_elements().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["label", "input", "button"]);
        assert!(repaired.diagnostics.contains(&Diagnostic::CreatedInput(0)));
    }

    #[test]
    fn test_nested_input_is_adopted_with_its_text() {
        let root = parse(
            r#"<list-input id="x"><ul><li><span><input value="Alice"></span></li><li><input value="Bob"></li></ul></list-input>"#,
        );
        let repaired = repair(&root, &config());
        let texts: Vec<_> = repaired.entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Alice", "Bob"]);
        assert!(repaired.diagnostics.contains(&Diagnostic::LiftedInput(0)));
        assert!(!repaired.diagnostics.contains(&Diagnostic::CreatedInput(0)));

        let li = repaired.root.child("ul").unwrap().child("li").unwrap();
        let tags: Vec<_> = li.child_elements().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["label", "input", "span", "button"]);
        assert_eq!(li.child("input").unwrap().attr("id"), Some("x-input-0"));
        assert!(li.child("span").unwrap().children.is_empty());

        let twice = repair(&repaired.root, &config());
        assert!(twice.diagnostics.is_empty());
        assert_eq!(twice.root, repaired.root);
    }

    #[test]
    fn test_input_inside_label_survives_relabeling() {
        let root = parse(r#"<list-input id="x"><ul><li><label>Name <input value="Alice"></label></li></ul></list-input>"#);
        let repaired = repair(&root, &config());
        assert_eq!(repaired.entries[0].text, "Alice");
        let li = repaired.root.child("ul").unwrap().child("li").unwrap();
        let label = li.child("label").unwrap();
        assert_eq!(label.children, vec![Node::Text(LABEL_TEXT.into())]);
        assert_eq!(li.child("input").unwrap().attr("value"), Some("Alice"));
    }

    #[test]
    fn test_add_button_before_list_is_moved_after_it() {
        let root = parse(r#"<list-input id="x"><button>Add</button><ul><li><input></li></ul></list-input>"#);
        let repaired = repair(&root, &config());
        let tags: Vec<_> = repaired.root.child_elements().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["ul", "button"]);
        assert!(repaired.diagnostics.contains(&Diagnostic::MovedAddButton));
    }

    #[test]
    fn test_extra_lists_and_buttons_are_merged_or_dropped() {
        let root = parse(
            r#"<list-input id="x"><ul><li><input value="a"></li></ul><button></button>
               <ol><li><input value="b"></li></ol><button></button></list-input>"#,
        );
        let repaired = repair(&root, &config());
        let lists = repaired.root.child_elements().filter(|e| e.tag == "ul" || e.tag == "ol");
        assert_eq!(lists.count(), 1);
        let buttons = repaired.root.child_elements().filter(|e| e.tag == "button");
        assert_eq!(buttons.count(), 1);
        let texts: Vec<_> = repaired.entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert!(repaired.diagnostics.contains(&Diagnostic::MergedList));
        assert!(repaired.diagnostics.contains(&Diagnostic::RemovedExtraButton));
    }

    #[test]
    fn test_non_items_are_dropped_from_list() {
        let root = parse(r#"<list-input id="x"><ul>stray<p>no</p><li></li></ul></list-input>"#);
        let repaired = repair(&root, &config());
        assert_eq!(repaired.entries.len(), 1);
        assert!(repaired
            .diagnostics
            .contains(&Diagnostic::DroppedNode { tag: "p".into() }));
        assert!(repaired
            .diagnostics
            .contains(&Diagnostic::DroppedNode { tag: "#text".into() }));
    }

    #[test]
    fn test_duplicate_roles_are_removed() {
        let root = parse(r#"<list-input id="x"><ul><li><input value="a"><input value="b"><button></button><button></button></li></ul></list-input>"#);
        let repaired = repair(&root, &config());
        let li = repaired.root.child("ul").unwrap().child("li").unwrap();
        assert_eq!(li.child_elements().filter(|e| e.tag == "input").count(), 1);
        assert_eq!(li.child_elements().filter(|e| e.tag == "button").count(), 1);
        assert_eq!(repaired.entries[0].text, "a");
    }

    #[test]
    fn test_repair_is_idempotent_on_its_output() {
        let root = parse(r#"<list-input><button></button><ul><li>x<input value="a"></li><li><button></button></li></ul></list-input>"#);
        let once = repair(&root, &config());
        let twice = repair(&once.root, &config());
        assert_eq!(twice.root, once.root);
        assert_eq!(twice.entries, once.entries);
        assert!(twice.diagnostics.is_empty());
    }

    #[test]
    fn test_render_list_item_matches_repair() {
        let mut list = Element::new("ul");
        list.push(render_list_item(&config(), 0, "Alice"));
        list.push(render_list_item(&config(), 1, ""));
        let root = Element::new("list-input").with_child(list);
        let repaired = repair(&root, &config());
        assert_eq!(repaired.root.child("ul"), root.child("ul"));
    }
}
