//! Operations and message handling for the list input component.

use super::model::Model;
use super::repair::{item_position, list_mut, render_list_item, repair, Repaired};
use super::types::{
    AddItemMsg, Diagnostic, DomEventKind, DomEventMsg, EditItemMsg, Focus, RemoveItemMsg,
};
use super::validity::evaluate;
use crate::key::matches_binding;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use tracing::{debug, trace, warn};

/// An element of the control, resolved from its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Add,
    Remove(usize),
    Input(usize),
}

impl Model {
    /// Brings the markup into canonical form and publishes the first value
    /// and verdict. Safe to call again; a second call changes nothing but
    /// the revision.
    ///
    /// Returns what the repair pass had to change.
    pub fn mount(&mut self) -> Vec<Diagnostic> {
        let diagnostics = self.settle();
        self.mounted = true;
        diagnostics
    }

    /// Appends an empty entry and focuses its input.
    ///
    /// Returns the focus command, or `None` before mounting.
    pub fn add_item(&mut self) -> Option<Cmd> {
        if !self.mounted {
            warn!(control = %self.config.id(), "add before mount ignored");
            return None;
        }
        let index = self.entries.len();
        if let Some(list) = list_mut(&mut self.root) {
            list.push(render_list_item(&self.config, index, ""));
        }
        self.settle();
        Some(self.set_focus(Focus::Input(index)))
    }

    /// Removes the entry at `index`. Later entries shift down one position
    /// and keep their text. Focus moves to the input now at `index`.
    ///
    /// Entries without a remove control cannot be removed; the request is
    /// ignored and `None` returned.
    pub fn remove_item(&mut self, index: usize) -> Option<Cmd> {
        if !self.mounted {
            warn!(control = %self.config.id(), "remove before mount ignored");
            return None;
        }
        match self.entries.get(index) {
            Some(entry) if entry.deletable => {}
            Some(_) => {
                warn!(control = %self.config.id(), index, "entry has no remove control");
                return None;
            }
            None => {
                warn!(control = %self.config.id(), index, "no such entry");
                return None;
            }
        }
        if let Some(list) = list_mut(&mut self.root) {
            if let Some(pos) = item_position(list, index) {
                list.children.remove(pos);
            }
        }
        self.settle();
        let focus = Focus::Input(index.min(self.entries.len().saturating_sub(1)));
        Some(self.set_focus(focus))
    }

    /// Commits `text` as the entry's content. Returns `false` if there is no
    /// entry at `index`.
    pub fn edit_item(&mut self, index: usize, text: impl Into<String>) -> bool {
        if !self.mounted {
            warn!(control = %self.config.id(), "edit before mount ignored");
            return false;
        }
        let text = text.into();
        let input = list_mut(&mut self.root).and_then(|list| {
            let pos = item_position(list, index)?;
            list.children[pos].as_element_mut()?.child_mut("input")
        });
        let Some(input) = input else {
            warn!(control = %self.config.id(), index, "no such entry");
            return false;
        };
        input.set_attr("value", text.as_str());
        if let Some(entry) = self.entries.get_mut(index) {
            entry.text = text;
        }
        self.publish();
        true
    }

    /// Replaces every entry with `values`, mounting first if needed. An empty
    /// `values` leaves one empty entry.
    pub fn set_values<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.mounted {
            self.mount();
        }
        if let Some(list) = list_mut(&mut self.root) {
            list.children = values
                .into_iter()
                .enumerate()
                .map(|(index, text)| render_list_item(&self.config, index, text.as_ref()).into())
                .collect();
        }
        self.focus = None;
        self.settle();
    }

    /// Asks the host to focus the offending element when invalid.
    ///
    /// Returns `None` when the control is valid.
    pub fn report_validity(&mut self) -> Option<Cmd> {
        let anchor = self.verdict.anchor()?;
        Some(self.set_focus(anchor.into()))
    }

    /// Handles host messages: typed item messages and forwarded DOM events
    /// for this control, and key presses while focused. Messages addressed
    /// to another control are ignored.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(add) = msg.downcast_ref::<AddItemMsg>() {
            if !self.owns(&add.control_id) {
                return None;
            }
            return self.add_item();
        }

        if let Some(remove) = msg.downcast_ref::<RemoveItemMsg>() {
            if !self.owns(&remove.control_id) {
                return None;
            }
            return self.remove_item(remove.index);
        }

        if let Some(edit) = msg.downcast_ref::<EditItemMsg>() {
            if self.owns(&edit.control_id) {
                self.edit_item(edit.index, edit.text.clone());
            }
            return None;
        }

        if let Some(event) = msg.downcast_ref::<DomEventMsg>() {
            return self.handle_dom_event(event);
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.focus.is_some() {
                return self.handle_key(key_msg);
            }
        }

        None
    }

    fn owns(&self, control_id: &str) -> bool {
        let owned = control_id == self.config.id();
        if !owned {
            trace!(control = %self.config.id(), target = control_id, "message for another control");
        }
        owned
    }

    fn handle_dom_event(&mut self, event: &DomEventMsg) -> Option<Cmd> {
        let Some(target) = self.resolve_target(&event.target) else {
            trace!(control = %self.config.id(), target = %event.target, "event outside control");
            return None;
        };
        match (event.kind, target) {
            (DomEventKind::Click, Target::Add) => self.add_item(),
            (DomEventKind::Click, Target::Remove(index)) => self.remove_item(index),
            (DomEventKind::Change, Target::Input(index)) => {
                self.edit_item(index, event.value.clone().unwrap_or_default());
                None
            }
            (DomEventKind::Focus, target) => {
                self.focus = Some(match target {
                    Target::Add => Focus::Add,
                    Target::Remove(index) => Focus::Remove(index),
                    Target::Input(index) => Focus::Input(index),
                });
                None
            }
            (kind, target) => {
                trace!(control = %self.config.id(), ?kind, ?target, "event has no action");
                None
            }
        }
    }

    fn resolve_target(&self, element_id: &str) -> Option<Target> {
        let rest = element_id
            .strip_prefix(self.config.id())?
            .strip_prefix('-')?;
        if rest == "add" {
            return Some(Target::Add);
        }
        // Only ids the control generated resolve; "input-00" does not.
        if let Some(index) = rest.strip_prefix("remove-") {
            let index: usize = index.parse().ok()?;
            return self
                .entries
                .get(index)
                .filter(|e| e.deletable && self.config.remove_id(index) == element_id)
                .map(|_| Target::Remove(index));
        }
        let index: usize = rest.strip_prefix("input-")?.parse().ok()?;
        (index < self.entries.len() && self.config.input_id(index) == element_id)
            .then_some(Target::Input(index))
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if matches_binding(key_msg, &self.key_map.next_focus) {
            return self.move_focus(1);
        }
        if matches_binding(key_msg, &self.key_map.prev_focus) {
            return self.move_focus(-1);
        }
        if matches_binding(key_msg, &self.key_map.activate) {
            return match self.focus {
                Some(Focus::Add) => self.add_item(),
                Some(Focus::Remove(index)) => self.remove_item(index),
                _ => None,
            };
        }
        None
    }

    /// Tab order: each input followed by its remove control, then add.
    fn tab_order(&self) -> Vec<Focus> {
        let mut order = Vec::with_capacity(self.entries.len() * 2 + 1);
        for entry in &self.entries {
            order.push(Focus::Input(entry.index));
            if entry.deletable {
                order.push(Focus::Remove(entry.index));
            }
        }
        order.push(Focus::Add);
        order
    }

    // Moving past either end leaves the control; the host takes over.
    fn move_focus(&mut self, step: isize) -> Option<Cmd> {
        let order = self.tab_order();
        let current = self.focus.and_then(|f| order.iter().position(|&o| o == f))?;
        match current.checked_add_signed(step).and_then(|i| order.get(i)) {
            Some(&next) => Some(self.set_focus(next)),
            None => {
                self.focus = None;
                None
            }
        }
    }

    /// Phase 1 then phase 2.
    fn settle(&mut self) -> Vec<Diagnostic> {
        let Repaired {
            root,
            entries,
            diagnostics,
        } = repair(&self.root, &self.config);
        for diagnostic in &diagnostics {
            debug!(control = %self.config.id(), %diagnostic, "repaired markup");
        }
        self.root = root;
        self.entries = entries;
        if let Some(Focus::Input(i) | Focus::Remove(i)) = self.focus {
            if i >= self.entries.len() {
                self.focus = None;
            }
        }
        self.publish();
        diagnostics
    }

    /// Recomputes the value, mirrors it on the host element, then recomputes
    /// the verdict.
    fn publish(&mut self) {
        self.value = self.entries.iter().map(|e| e.text.clone()).collect();
        let json = self.value_json();
        self.root.set_attr("value", json);
        self.verdict = evaluate(&self.value, &self.config);
        self.revision += 1;
        debug!(
            control = %self.config.id(),
            revision = self.revision,
            entries = self.value.len(),
            valid = self.verdict.is_valid(),
            "published value"
        );
    }
}
