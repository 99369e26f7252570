use ratatui::widgets::TableState;
use taskflow_core::{parse_input, Task, TaskStorage, TaskStore};

use crate::fields::collect_fields;
use crate::limit_message;

pub enum InputMode {
    Normal,
    Adding,
    Editing,
}

pub struct App<S: TaskStorage> {
    pub store: TaskStore<S>,
    /// Display-order snapshot, rebuilt after every mutation.
    pub tasks: Vec<Task>,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub dark: bool,
    pub status: Option<String>,
}

impl<S: TaskStorage> App<S> {
    pub fn new(store: TaskStore<S>) -> App<S> {
        let tasks = store.sorted_tasks();
        let mut state = TableState::default();
        if !tasks.is_empty() {
            state.select(Some(0));
        }
        App {
            store,
            tasks,
            state,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            dark: true,
            status: None,
        }
    }

    pub fn next(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.tasks.len() - 1 {
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
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.tasks.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn toggle_theme(&mut self) {
        self.dark = !self.dark;
    }

    pub fn toggle_selected(&mut self) {
        if let Some(i) = self.state.selected() {
            if let Some(task) = self.tasks.get(i) {
                let id = task.id;
                self.store.toggle(&id);
                self.reload_tasks();
            }
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(i) = self.state.selected() {
            if let Some(task) = self.tasks.get(i) {
                let id = task.id;
                self.store.delete(&id);
            }
            self.reload_tasks();

            if self.tasks.is_empty() {
                self.state.select(None);
            } else if i >= self.tasks.len() {
                self.state.select(Some(self.tasks.len() - 1));
            } else {
                self.state.select(Some(i));
            }
        }
    }

    fn reload_tasks(&mut self) {
        self.tasks = self.store.sorted_tasks();
        if let Some(i) = self.state.selected() {
            if self.tasks.is_empty() {
                self.state.select(None);
            } else if i >= self.tasks.len() {
                self.state.select(Some(self.tasks.len() - 1));
            }
        }
    }

    pub fn enter_add_mode(&mut self) {
        if !self.store.can_add_more() {
            self.status = Some(limit_message());
            return;
        }
        self.input_mode = InputMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn enter_edit_mode(&mut self) {
        if self.state.selected().is_some() {
            self.input_mode = InputMode::Editing;
            self.input.clear();
            self.cursor_position = 0;
        }
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self
            .input
            .chars()
            .take(self.cursor_position)
            .map(|c| c.len_utf8())
            .sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self
                .input
                .chars()
                .take(self.cursor_position - 1)
                .map(|c| c.len_utf8())
                .sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_command(&mut self) {
        if self.input.trim().is_empty() {
            self.exit_input_mode();
            return;
        }

        match self.input_mode {
            InputMode::Adding => self.submit_add(),
            InputMode::Editing => self.submit_edit(),
            InputMode::Normal => {}
        }

        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
    }

    fn submit_add(&mut self) {
        let words: Vec<String> = self.input.split_whitespace().map(|s| s.to_string()).collect();
        let parsed = parse_input(&words);

        if parsed.title.trim().is_empty() {
            self.status = Some("A task needs a title.".to_string());
            return;
        }

        let values = collect_fields(&parsed);
        if !values.warnings.is_empty() {
            self.status = Some(values.warnings.join("; "));
        }

        let description = values.description.flatten();
        let priority = values.priority.unwrap_or_default();
        let end_date = values.end_date.flatten();

        if self.store.add(&parsed.title, description, priority, end_date) {
            let new_id = self.store.tasks().last().map(|t| t.id);
            self.reload_tasks();
            if let Some(id) = new_id {
                let pos = self.tasks.iter().position(|t| t.id == id);
                self.state.select(pos.or(Some(0)));
            }
        } else {
            self.status = Some(limit_message());
        }
    }

    fn submit_edit(&mut self) {
        let Some(i) = self.state.selected() else {
            return;
        };
        let Some(id) = self.tasks.get(i).map(|t| t.id) else {
            return;
        };

        let words: Vec<String> = self.input.split_whitespace().map(|s| s.to_string()).collect();
        let parsed = parse_input(&words);
        let values = collect_fields(&parsed);
        if !values.warnings.is_empty() {
            self.status = Some(values.warnings.join("; "));
        }

        self.store.update(&id, values.into_patch(&parsed.title));
        self.reload_tasks();

        // Keep the edited task selected even if it moved in display order.
        if let Some(pos) = self.tasks.iter().position(|t| t.id == id) {
            self.state.select(Some(pos));
        }
    }
}
