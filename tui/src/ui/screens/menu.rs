use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::backend::Backend;
use crate::ui::{layout::centered_rect, theme::Theme};

use super::{form::FormScreenState, Action, Screen};

const BANNER: &str = r#"
 ╦ ╦╔═╗╦ ╦╔═╗╦╔╗╔╔═╗
 ╠═╣║ ║║ ║╚═╗║║║║║ ╦
 ╩ ╩╚═╝╚═╝╚═╝╩╝╚╝╚═╝

California House Prediction
"#;

const MENU_ITEMS: &[&str] = &["Predict House Price", "Quit"];

pub struct MenuState {
    pub selected: usize,
    backend: Backend,
}

impl MenuState {
    pub fn new(backend: Backend) -> Self {
        Self {
            selected: 0,
            backend,
        }
    }
}

pub fn handle_key(state: &mut MenuState, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            state.selected = state.selected.saturating_sub(1);
            Action::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.selected < MENU_ITEMS.len() - 1 {
                state.selected += 1;
            }
            Action::None
        }
        KeyCode::Enter => match state.selected {
            0 => Action::Transition(Screen::Form(FormScreenState::new(state.backend.clone()))),
            1 => Action::Quit,
            _ => Action::None,
        },
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

pub fn draw(f: &mut Frame, state: &MenuState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = centered_rect(50, 70, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(1),
            Constraint::Length(MENU_ITEMS.len() as u16 * 2 + 2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(outer);

    let banner: Vec<Line> = BANNER
        .lines()
        .map(|l| Line::from(Span::styled(l, Theme::title())))
        .collect();
    f.render_widget(Paragraph::new(banner).alignment(Alignment::Center), chunks[0]);

    draw_menu(f, chunks[2], state);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled("↑↓ / j k", Theme::dim()),
        Span::styled("  navigate    ", Theme::muted()),
        Span::styled("enter", Theme::dim()),
        Span::styled("  select    ", Theme::muted()),
        Span::styled("q", Theme::dim()),
        Span::styled("  quit", Theme::muted()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(hint, chunks[4]);
}

fn draw_menu(f: &mut Frame, area: Rect, state: &MenuState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(" MENU ")
        .title_alignment(Alignment::Center)
        .title_style(Theme::title());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = MENU_ITEMS
        .iter()
        .enumerate()
        .flat_map(|(i, label)| {
            let (prefix, style) = if i == state.selected {
                ("▶ ", Theme::accent().add_modifier(Modifier::BOLD))
            } else {
                ("  ", Theme::dim())
            };
            [
                Line::from(vec![Span::styled(prefix, style), Span::styled(*label, style)]),
                Line::default(),
            ]
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
