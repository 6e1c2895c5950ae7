use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use todolist_core::{ListItem, Surface};

/// Everything the terminal draws, written by the controller worker and
/// read by the key loop.
#[derive(Debug, Default)]
pub struct ViewState {
    pub items: Vec<ListItem>,
    pub input: String,
    /// Cursor in the entry field, in chars.
    pub cursor: usize,
    pub alert: Option<String>,
    pub status: Option<String>,
    /// Intents sent but not yet processed by the worker.
    pub in_flight: usize,
}

impl ViewState {
    /// The field can be cleared by the worker behind the cursor's back.
    pub fn clamped_cursor(&self) -> usize {
        self.cursor.min(self.input.chars().count())
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.input.chars().take(char_index).map(|c| c.len_utf8()).sum()
    }

    pub fn insert_char(&mut self, c: char) {
        let cursor = self.clamped_cursor();
        let byte_index = self.byte_index(cursor);
        self.input.insert(byte_index, c);
        self.cursor = cursor + 1;
    }

    pub fn delete_char(&mut self) {
        let cursor = self.clamped_cursor();
        if cursor > 0 {
            let byte_index = self.byte_index(cursor - 1);
            self.input.remove(byte_index);
            self.cursor = cursor - 1;
        } else {
            self.cursor = 0;
        }
    }

    pub fn task_count(&self) -> usize {
        self.items.iter().filter(|i| i.as_task().is_some()).count()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SharedView(Arc<Mutex<ViewState>>);

impl SharedView {
    pub fn lock(&self) -> MutexGuard<'_, ViewState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn begin_request(&self) {
        self.lock().in_flight += 1;
    }

    pub fn finish_request(&self) {
        let mut state = self.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

impl Surface for SharedView {
    fn render_list(&mut self, items: Vec<ListItem>) {
        self.lock().items = items;
    }

    fn clear_input(&mut self) {
        let mut state = self.lock();
        state.input.clear();
        state.cursor = 0;
    }

    fn alert(&mut self, message: &str) {
        self.lock().alert = Some(message.to_string());
    }

    fn notify(&mut self, message: &str) {
        self.lock().status = Some(message.to_string());
    }
}
