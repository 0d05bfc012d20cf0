use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use predictor::{ClientConfig, HttpClient};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;

use super::backend::Backend;
use crate::ui::screens::{menu, Action, Screen};

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Runs the TUI application.
///
/// # Errors
/// Returns an error if the runtime, the HTTP client, terminal setup or rendering fails.
pub fn run() -> Result<()> {
    let runtime = Runtime::new()?;
    let client = HttpClient::new(ClientConfig::from_env())?;
    log::info!("prediction endpoint: {}", client.endpoint());
    let backend = Backend::new(client, runtime.handle().clone());

    let _guard = TerminalGuard::enter()?;

    let term_backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(term_backend)?;
    terminal.clear()?;

    let mut screen = Screen::Menu(menu::MenuState::new(backend));

    loop {
        screen.tick();
        terminal.draw(|f| screen.draw(f))?;

        if event::poll(Duration::from_millis(120))? {
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match screen.handle_key(k.code) {
                    Action::Quit => break,
                    Action::Transition(next) => screen = next,
                    Action::None => {}
                }
            }
        }
    }

    terminal.show_cursor()?;
    Ok(())
}
