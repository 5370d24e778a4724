//! Page rendered as plain text on the terminal.

use std::{collections::HashMap, io::Write};

use client_core::{Fragment, Page, Slot};

pub struct TerminalPage<O: Write, E: Write> {
    values: HashMap<Slot, String>,
    out: O,
    err: E,
}

impl<O: Write, E: Write> TerminalPage<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self {
            values: HashMap::new(),
            out,
            err,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> Page for TerminalPage<O, E> {
    type Handle = Slot;

    fn lookup(&self, slot: Slot) -> Option<Slot> {
        Some(slot)
    }

    fn value(&self, handle: &Slot) -> String {
        self.values.get(handle).cloned().unwrap_or_default()
    }

    fn set_value(&mut self, handle: &Slot, value: &str) {
        self.values.insert(*handle, value.to_string());
    }

    fn set_content(&mut self, handle: &Slot, fragment: Fragment) {
        tracing::debug!(slot = handle.element_id(), "rendering");
        if let Err(err) = writeln!(self.out, "{fragment}\n") {
            tracing::warn!("failed to write to terminal: {err}");
        }
    }

    // Output is a transcript: everything written stays visible.
    fn set_hidden(&mut self, _handle: &Slot, _hidden: bool) {}

    fn scroll_into_view(&mut self, _handle: &Slot) {}

    fn reset_form(&mut self, _handle: &Slot) {
        self.values.remove(&Slot::PassengerName);
        self.values.remove(&Slot::Seats);
    }

    fn alert(&mut self, message: &str) {
        if let Err(err) = writeln!(self.err, "{message}") {
            tracing::warn!("failed to write to terminal: {err}");
        }
    }
}
