use ratatui::widgets::TableState;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use todolist_core::{Intent, TaskId};

use crate::tui::surface::SharedView;

pub enum InputMode {
    Normal,
    Adding,
}

pub struct App {
    pub view: SharedView,
    pub state: TableState,
    pub input_mode: InputMode,
    pub api_url: String,
    intents: UnboundedSender<Intent>,
}

impl App {
    pub fn new(view: SharedView, intents: UnboundedSender<Intent>, api_url: String) -> App {
        App {
            view,
            state: TableState::default(),
            input_mode: InputMode::Normal,
            api_url,
            intents,
        }
    }

    fn send(&self, intent: Intent) {
        self.view.begin_request();
        if self.intents.send(intent).is_err() {
            // Worker is gone; nothing will ever answer.
            self.view.finish_request();
            warn!("controller worker stopped, intent dropped");
        }
    }

    /// Keeps the selection on a valid row after the list was replaced.
    pub fn sync_selection(&mut self) {
        let len = self.view.lock().task_count();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            None => self.state.select(Some(0)),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    pub fn next(&mut self) {
        let len = self.view.lock().task_count();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.view.lock().task_count();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        let i = self.state.selected()?;
        let view = self.view.lock();
        view.items
            .iter()
            .filter_map(|item| item.as_task())
            .nth(i)
            .map(|row| row.id)
    }

    pub fn toggle_status(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.send(Intent::Complete(id));
        }
    }

    pub fn delete_task(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.send(Intent::Delete(id));
        }
    }

    pub fn refresh(&mut self) {
        self.send(Intent::Refresh);
    }

    pub fn has_alert(&self) -> bool {
        self.view.lock().alert.is_some()
    }

    pub fn dismiss_alert(&mut self) {
        self.view.lock().alert = None;
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::Adding;
        let mut view = self.view.lock();
        view.cursor = view.input.chars().count();
        view.status = None;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        self.view.lock().insert_char(c);
    }

    pub fn delete_char(&mut self) {
        self.view.lock().delete_char();
    }

    pub fn move_cursor_left(&mut self) {
        let mut view = self.view.lock();
        view.cursor = view.clamped_cursor().saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let mut view = self.view.lock();
        let len = view.input.chars().count();
        view.cursor = (view.clamped_cursor() + 1).min(len);
    }

    /// Hands the raw field text to the controller, which validates it and
    /// clears the field once the create request went out.
    pub fn submit_command(&mut self) {
        let text = {
            let mut view = self.view.lock();
            view.cursor = 0;
            view.input.clone()
        };
        self.send(Intent::Add(text));
        self.exit_input_mode();
    }
}
