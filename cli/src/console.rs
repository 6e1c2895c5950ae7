use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

use todolist_core::{ListItem, Surface, TaskRow};

#[derive(Tabled)]
struct ConsoleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "Task")]
    content: String,
    #[tabled(rename = "Toggle")]
    toggle: &'static str,
    #[tabled(rename = "Delete")]
    delete: &'static str,
}

impl From<&TaskRow> for ConsoleRow {
    fn from(row: &TaskRow) -> Self {
        ConsoleRow {
            id: row.id.to_string(),
            marker: if row.completed { "✔" } else { "☐" },
            content: row.content.clone(),
            toggle: row.toggle_label,
            delete: row.delete_label,
        }
    }
}

/// Surface for one-shot commands: collects what the controller drew and
/// prints it once the command is done.
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    rendered: Option<String>,
    messages: Vec<String>,
}

impl ConsoleSurface {
    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn print(&self) {
        for message in &self.messages {
            eprintln!("{}", message);
        }
        if let Some(rendered) = &self.rendered {
            println!("{}", rendered);
        }
    }
}

fn format_list(items: &[ListItem]) -> String {
    let notices: Vec<&str> = items
        .iter()
        .filter_map(|item| match item {
            ListItem::Notice(notice) => Some(notice.as_str()),
            ListItem::Task(_) => None,
        })
        .collect();
    if !notices.is_empty() {
        return notices.join("\n");
    }

    let rows: Vec<ConsoleRow> = items
        .iter()
        .filter_map(|item| item.as_task())
        .map(ConsoleRow::from)
        .collect();
    if rows.is_empty() {
        return "No tasks found.".to_string();
    }

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}

impl Surface for ConsoleSurface {
    fn render_list(&mut self, items: Vec<ListItem>) {
        self.rendered = Some(format_list(&items));
    }

    fn clear_input(&mut self) {}

    fn alert(&mut self, message: &str) {
        self.messages.push(format!("Error: {}", message));
    }

    fn notify(&mut self, message: &str) {
        self.messages.push(format!("Warning: {}", message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todolist_core::view::{render_fetch_error, render_tasks};
    use todolist_core::{Task, TaskId};

    #[test]
    fn test_renders_rows_with_labels() {
        let mut surface = ConsoleSurface::default();
        surface.render_list(render_tasks(vec![
            Task::new(TaskId(1), "Buy milk", false),
            Task::new(TaskId(2), "Pay rent", true),
        ]));

        let out = surface.rendered().unwrap();
        assert!(out.contains("Buy milk"));
        assert!(out.contains("Completar"));
        assert!(out.contains("Pay rent"));
        assert!(out.contains("Pendiente"));
        assert!(out.find("Buy milk").unwrap() < out.find("Pay rent").unwrap());
    }

    #[test]
    fn test_fetch_error_prints_notice_only() {
        let mut surface = ConsoleSurface::default();
        surface.render_list(render_fetch_error());
        assert_eq!(surface.rendered(), Some("Error al conectar con la API."));
    }

    #[test]
    fn test_empty_list_and_messages() {
        let mut surface = ConsoleSurface::default();
        surface.render_list(Vec::new());
        surface.alert("La tarea no puede estar vacía.");
        assert_eq!(surface.rendered(), Some("No tasks found."));
        assert_eq!(surface.messages(), ["Error: La tarea no puede estar vacía.".to_string()]);
    }
}
