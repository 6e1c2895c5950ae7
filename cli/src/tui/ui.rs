use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, BorderType, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use todolist_core::{ListItem, TaskRow};

use crate::tui::app::{App, InputMode};
use crate::tui::surface::ViewState;

pub fn draw(f: &mut Frame, app: &mut App) {
    app.sync_selection();
    let view = app.view.clone();
    let state = view.lock();
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Entry field
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let title = if state.in_flight > 0 {
        format!("TODOLIST  ({} …)", app.api_url)
    } else {
        format!("TODOLIST  ({})", app.api_url)
    };
    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ])
        .split(main_chunks[1]);

    draw_task_list(f, app, &state, content_chunks[0]);
    draw_detail_view(f, app, &state, content_chunks[1]);
    draw_input(f, app, &state, main_chunks[2]);

    let footer = match &state.status {
        Some(status) => Paragraph::new(status.as_str()).style(Style::default().fg(Color::Yellow)),
        None => Paragraph::new("j/k: Navigate | space: Toggle | d: Delete | a: Add | r: Refresh | q: Quit")
            .style(Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(footer.alignment(Alignment::Center), main_chunks[3]);

    if let Some(alert) = &state.alert {
        draw_alert(f, alert, size);
    }
}

fn task_row(row: &TaskRow) -> Row<'static> {
    let (marker, content_style) = if row.completed {
        ("✔", Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT))
    } else {
        ("☐", Style::default().add_modifier(Modifier::BOLD))
    };

    Row::new(vec![
        Span::raw(marker),
        Span::styled(row.content.clone(), content_style),
        Span::styled(format!("[{}]", row.toggle_label), Style::default().fg(Color::Green)),
        Span::styled(format!("[{}]", row.delete_label), Style::default().fg(Color::Red)),
    ])
}

fn draw_task_list(f: &mut Frame, app: &mut App, state: &ViewState, area: Rect) {
    let rows: Vec<Row> = state.items.iter().map(|item| match item {
        ListItem::Task(row) => task_row(row),
        ListItem::Notice(notice) => Row::new(vec![
            Span::raw("!"),
            Span::styled(notice.clone(), Style::default().fg(Color::Red)),
        ]),
    }).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),  // Marker
            Constraint::Min(10),    // Content
            Constraint::Length(12), // Toggle
            Constraint::Length(10), // Delete
        ]
    )
    .block(Block::default().title(" Tasks ").borders(Borders::ALL).border_type(BorderType::Rounded))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_detail_view(f: &mut Frame, app: &App, state: &ViewState, area: Rect) {
    let block = Block::default().title(" Detail ").borders(Borders::ALL).border_type(BorderType::Rounded);

    let selected = app.state.selected().and_then(|i| {
        state.items.iter().filter_map(|item| item.as_task()).nth(i)
    });

    let Some(row) = selected else {
        f.render_widget(block, area);
        return;
    };

    let mut detail_text = vec![
        Line::from(vec![
            Span::styled("Task: ", Style::default().fg(Color::Blue)),
            Span::styled(row.content.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("ID: ", Style::default().fg(Color::DarkGray)),
            Span::raw(row.id.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Blue)),
            Span::raw(if row.completed { "Completed" } else { "Pending" }),
        ]),
    ];

    if let Some(created) = row.created {
        detail_text.push(Line::from(vec![
            Span::styled("Created: ", Style::default().fg(Color::Blue)),
            Span::raw(created.format("%Y-%m-%d %H:%M").to_string()),
        ]));
    }

    let detail = Paragraph::new(detail_text)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(detail, area);
}

fn draw_input(f: &mut Frame, app: &App, state: &ViewState, area: Rect) {
    let (title, style) = match app.input_mode {
        InputMode::Adding => (" New task (Enter: add, Esc: cancel) ", Style::default().fg(Color::Yellow)),
        InputMode::Normal => (" New task ", Style::default()),
    };
    let input = Paragraph::new(state.input.as_str())
        .style(style)
        .block(Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(input, area);

    if let InputMode::Adding = app.input_mode {
        let before: String = state.input.chars().take(state.clamped_cursor()).collect();
        let x = area.x + 1 + before.width() as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_alert(f: &mut Frame, message: &str, area: Rect) {
    let width = (message.width() as u16 + 4).max(20).min(area.width);
    let height = 5u16.min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let body = Paragraph::new(vec![
        Line::from(message),
        Line::from(""),
        Line::from(Span::styled("press any key", Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().title(" Aviso ").borders(Borders::ALL).border_type(BorderType::Double))
    .style(Style::default().fg(Color::Red));

    f.render_widget(Clear, popup);
    f.render_widget(body, popup);
}
