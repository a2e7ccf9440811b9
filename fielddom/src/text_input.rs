use std::collections::HashMap;

use log::trace;

use crate::event::{Event, Key, KeyPress, Modifiers};
use crate::{Document, NodeId};

/// Cursor state for a single text input.
#[derive(Debug, Clone, Default)]
pub struct TextInputData {
    pub text: String,
    /// Cursor position in characters.
    pub cursor: usize,
    /// Anchor position for selection. When Some and != cursor, text is selected.
    pub anchor: Option<usize>,
}

impl TextInputData {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            anchor: None,
        }
    }

    /// Selected character range, ordered. `None` when nothing is selected.
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor.filter(|a| *a != self.cursor)?;
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    pub fn select_all(&mut self) {
        if !self.text.is_empty() {
            self.anchor = Some(0);
            self.cursor = self.text.chars().count();
        }
    }

    /// Remove the selected range, leaving the cursor at its start.
    fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection() else {
            return false;
        };
        let from = char_to_byte_index(&self.text, start);
        let to = char_to_byte_index(&self.text, end);
        self.text.replace_range(from..to, "");
        self.cursor = start;
        self.clear_selection();
        true
    }
}

/// Line editing for input nodes of a [`Document`].
///
/// Key presses edit the node's live value and come back out as field events:
/// text changes produce [`Event::Input`], Enter produces [`Event::Submit`],
/// and Tab, BackTab or Escape produce [`Event::Blur`].
#[derive(Debug, Default)]
pub struct TextInputState {
    inputs: HashMap<NodeId, TextInputData>,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_data(&self, id: NodeId) -> Option<&TextInputData> {
        self.inputs.get(&id)
    }

    /// Editing state for the node, resynchronized with its live value when
    /// something else (a reset, a programmatic set) changed it.
    fn sync(&mut self, doc: &Document, id: NodeId) -> &mut TextInputData {
        let live = doc.value(id).unwrap_or_default();
        let data = self.inputs.entry(id).or_insert_with(|| TextInputData::new(&live));
        if data.text != live {
            *data = TextInputData::new(live);
        }
        data
    }

    /// Apply a key press to the input node `target`.
    ///
    /// Returns the field event the key produced, if any. Cursor movement is
    /// absorbed without an event.
    pub fn handle_key(
        &mut self,
        doc: &Document,
        target: NodeId,
        press: impl Into<KeyPress>,
    ) -> Option<Event> {
        let KeyPress { key, modifiers } = press.into();
        let data = self.sync(doc, target);

        let result = edit(data, key, modifiers);
        trace!("key {key:?} on {target}: {result:?}");

        match result {
            TextEditResult::Changed => {
                doc.set_value(target, data.text.clone());
                Some(Event::Input { target })
            }
            TextEditResult::Submitted => Some(Event::Submit { target }),
            TextEditResult::Left => Some(Event::Blur { target }),
            TextEditResult::Handled | TextEditResult::Ignored => None,
        }
    }

    /// Type a string one character at a time, collecting the events.
    pub fn type_str(&mut self, doc: &Document, target: NodeId, text: &str) -> Vec<Event> {
        text.chars()
            .filter_map(|c| self.handle_key(doc, target, KeyPress::plain(Key::Char(c))))
            .collect()
    }
}

fn edit(data: &mut TextInputData, key: Key, modifiers: Modifiers) -> TextEditResult {
    match key {
        Key::Char('a') if modifiers.ctrl => {
            data.select_all();
            TextEditResult::Handled
        }

        Key::Char(c) if modifiers.none() || (modifiers.shift && !modifiers.ctrl) => {
            data.delete_selection();
            let byte_pos = char_to_byte_index(&data.text, data.cursor);
            data.text.insert(byte_pos, c);
            data.cursor += 1;
            TextEditResult::Changed
        }

        Key::Backspace if modifiers.none() => {
            if data.delete_selection() {
                return TextEditResult::Changed;
            }
            if data.cursor == 0 {
                return TextEditResult::Handled;
            }
            let from = char_to_byte_index(&data.text, data.cursor - 1);
            let to = char_to_byte_index(&data.text, data.cursor);
            data.text.replace_range(from..to, "");
            data.cursor -= 1;
            TextEditResult::Changed
        }

        Key::Delete if modifiers.none() => {
            if data.delete_selection() {
                return TextEditResult::Changed;
            }
            if data.cursor >= data.text.chars().count() {
                return TextEditResult::Handled;
            }
            let from = char_to_byte_index(&data.text, data.cursor);
            let to = char_to_byte_index(&data.text, data.cursor + 1);
            data.text.replace_range(from..to, "");
            TextEditResult::Changed
        }

        Key::Left if !modifiers.ctrl => {
            move_cursor(data, -1, modifiers.shift);
            TextEditResult::Handled
        }

        Key::Right if !modifiers.ctrl => {
            move_cursor(data, 1, modifiers.shift);
            TextEditResult::Handled
        }

        Key::Home => {
            place_cursor(data, 0, modifiers.shift);
            TextEditResult::Handled
        }

        Key::End => {
            let len = data.text.chars().count();
            place_cursor(data, len, modifiers.shift);
            TextEditResult::Handled
        }

        Key::Enter => TextEditResult::Submitted,

        Key::Tab | Key::BackTab | Key::Escape => TextEditResult::Left,

        _ => TextEditResult::Ignored,
    }
}

fn move_cursor(data: &mut TextInputData, delta: isize, extend_selection: bool) {
    // Without shift an arrow collapses the selection toward its direction
    if let (false, Some((start, end))) = (extend_selection, data.selection()) {
        let edge = if delta < 0 { start } else { end };
        place_cursor(data, edge, false);
        return;
    }
    let len = data.text.chars().count();
    let to = data.cursor.saturating_add_signed(delta).min(len);
    place_cursor(data, to, extend_selection);
}

fn place_cursor(data: &mut TextInputData, to: usize, extend_selection: bool) {
    if !extend_selection {
        data.clear_selection();
    } else if data.anchor.is_none() {
        data.anchor = Some(data.cursor);
    }
    data.cursor = to;
}

/// What a key press did to an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEditResult {
    Changed,
    Submitted,
    /// Focus moves away from the input.
    Left,
    /// Absorbed without changing the text.
    Handled,
    Ignored,
}

fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}
