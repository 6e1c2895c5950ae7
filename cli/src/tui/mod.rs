pub mod app;
pub mod surface;
pub mod ui;
pub mod worker;

use std::io;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use todolist_core::{ClientConfig, HttpTaskApi, TaskListController};

use crate::tui::app::{App, InputMode};
use crate::tui::surface::SharedView;

pub fn run(runtime: &Runtime, config: &ClientConfig) -> Result<()> {
    let api = HttpTaskApi::new(config)?;
    let view = SharedView::default();
    let controller = TaskListController::new(api, view.clone())
        .with_policy(config.mutation_policy);

    let (tx, rx) = mpsc::unbounded_channel();
    runtime.spawn(worker::drive(controller, rx));

    let mut app = App::new(view, tx, config.api_base_url.to_string());
    // First load, like opening the page.
    app.refresh();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        // Short poll so worker results show up without a key press.
        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if app.has_alert() {
            app.dismiss_alert();
            continue;
        }

        match app.input_mode {
            InputMode::Normal => {
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Down | KeyCode::Char('j') => app.next(),
                    KeyCode::Up | KeyCode::Char('k') => app.previous(),
                    KeyCode::Char(' ') | KeyCode::Enter => app.toggle_status(),
                    KeyCode::Char('d') | KeyCode::Delete => app.delete_task(),
                    KeyCode::Char('a') => app.enter_add_mode(),
                    KeyCode::Char('r') => app.refresh(),
                    _ => {}
                }
            },
            InputMode::Adding => {
                match key.code {
                    KeyCode::Enter => app.submit_command(),
                    KeyCode::Esc => app.exit_input_mode(),
                    KeyCode::Char(c) => app.input_char(c),
                    KeyCode::Backspace => app.delete_char(),
                    KeyCode::Left => app.move_cursor_left(),
                    KeyCode::Right => app.move_cursor_right(),
                    _ => {}
                }
            }
        }
    }
}
