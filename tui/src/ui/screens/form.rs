use crossterm::event::KeyCode;
use predictor::{
    Coordinator, Feature, FormState, PredictionClient, PredictorError,
};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::app::backend::Backend;
use crate::ui::{layout, theme::Theme};

use super::{menu::MenuState, Action, Screen};

const FAILED_BANNER: &str = "Values are incorrect";
const NO_PREDICTION: &str = "--";

/// Which row of the form takes input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Field(usize),
    Location,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Field(i) if i + 1 < Feature::ALL.len() => Focus::Field(i + 1),
            Focus::Field(_) => Focus::Location,
            Focus::Location => Focus::Field(0),
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Field(0) => Focus::Location,
            Focus::Field(i) => Focus::Field(i - 1),
            Focus::Location => Focus::Field(Feature::ALL.len() - 1),
        }
    }
}

type Pending = oneshot::Receiver<Result<f64, PredictorError>>;

pub struct FormScreenState {
    form: FormState,
    coordinator: Coordinator,
    focus: Focus,
    backend: Backend,
    pending: Option<Pending>,
}

impl FormScreenState {
    pub fn new(backend: Backend) -> Self {
        Self {
            form: FormState::new(),
            coordinator: Coordinator::new(),
            focus: Focus::Field(0),
            backend,
            pending: None,
        }
    }
}

pub fn handle_key(state: &mut FormScreenState, key: KeyCode) -> Action {
    match key {
        KeyCode::Esc => {
            return Action::Transition(Screen::Menu(MenuState::new(state.backend.clone())))
        }
        KeyCode::Down | KeyCode::Tab => state.focus = state.focus.next(),
        KeyCode::Up | KeyCode::BackTab => state.focus = state.focus.prev(),
        KeyCode::Enter => submit(state),
        key => edit(state, key),
    }
    Action::None
}

fn edit(state: &mut FormScreenState, key: KeyCode) {
    match state.focus {
        Focus::Location => match key {
            KeyCode::Left => state.form.select_category(state.form.category().prev()),
            KeyCode::Right => state.form.select_category(state.form.category().next()),
            _ => {}
        },
        Focus::Field(i) => {
            let feature = Feature::ALL[i];
            let mut raw = state.form.raw(feature).to_string();
            match key {
                KeyCode::Char(c) if is_numeric_char(c) => raw.push(c),
                KeyCode::Backspace => {
                    raw.pop();
                }
                _ => return,
            }
            state.form.update_field(feature, raw);
        }
    }
}

fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
}

/// Validates and, if the form passes, hands the request to the runtime.
fn submit(state: &mut FormScreenState) {
    let record = match state.coordinator.begin(&mut state.form) {
        Ok(record) => record,
        Err(outcome) => {
            log::debug!("submit rejected: {outcome:?}");
            return;
        }
    };

    let (tx, rx) = oneshot::channel();
    let client = state.backend.client.clone();
    state.backend.runtime.spawn(async move {
        let result = client.predict(&record).await;
        let _ = tx.send(result);
    });
    state.pending = Some(rx);
}

/// Applies a finished request, if any. Non-blocking.
///
/// Should be called once per frame tick.
pub fn tick(state: &mut FormScreenState) {
    let Some(rx) = state.pending.as_mut() else {
        return;
    };

    let result = match rx.try_recv() {
        Ok(result) => result,
        Err(TryRecvError::Empty) => return,
        Err(TryRecvError::Closed) => Err(PredictorError::Aborted),
    };

    state.pending = None;
    state.coordinator.complete(&mut state.form, result);
}

pub fn draw(f: &mut Frame, state: &FormScreenState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = layout::centered_rect(90, 90, area);
    let (banner_area, body_area, hints_area) = layout::vertical(outer);
    let (form_area, result_area) = layout::body(body_area);

    if state.form.submission_failed() {
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" ✖ ", Theme::error()),
                Span::styled(FAILED_BANNER, Theme::error()),
            ])),
            banner_area,
        );
    }

    draw_fields(f, form_area, state);
    draw_result(f, result_area, state);
    draw_hints(f, hints_area);
}

fn draw_fields(f: &mut Frame, area: Rect, state: &FormScreenState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(" California House Prediction ")
        .title_style(Theme::title());

    let mut lines = Vec::with_capacity(Feature::ALL.len() * 2 + 1);

    for (i, feature) in Feature::ALL.iter().enumerate() {
        let focused = state.focus == Focus::Field(i);
        let (marker, label_style) = if focused {
            ("▶ ", Theme::accent())
        } else {
            ("  ", Theme::dim())
        };

        let mut spans = vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{:<20}", feature.label()), label_style),
            Span::styled(state.form.raw(*feature).to_string(), Theme::text()),
        ];
        if focused {
            spans.push(Span::styled("█", Theme::accent()));
        }
        lines.push(Line::from(spans));

        let msg = state.form.error(*feature).unwrap_or_default();
        lines.push(Line::from(Span::styled(
            format!("{:22}{msg}", ""),
            Theme::error(),
        )));
    }

    let focused = state.focus == Focus::Location;
    let (marker, style) = if focused {
        ("▶ ", Theme::accent())
    } else {
        ("  ", Theme::dim())
    };
    lines.push(Line::from(vec![
        Span::styled(marker, style),
        Span::styled(format!("{:<20}", "Location"), style),
        Span::styled(format!("◀ {} ▶", state.form.category()), Theme::text()),
    ]));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_result(f: &mut Frame, area: Rect, state: &FormScreenState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(" Predicted Value ")
        .title_alignment(Alignment::Center)
        .title_style(Theme::title());

    let value = state
        .form
        .prediction()
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| NO_PREDICTION.to_string());

    let status = if state.coordinator.in_flight() {
        Span::styled("submitting...", Theme::muted())
    } else {
        Span::raw("")
    };

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(value, Theme::accent())),
        Line::default(),
        Line::from(status),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_hints(f: &mut Frame, area: Rect) {
    let hints = [
        ("↑↓", "move"),
        ("←→", "location"),
        ("enter", "submit"),
        ("esc", "back"),
    ];

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(format!("[{key}] "), Theme::dim()),
                Span::styled(format!("{action}   "), Theme::muted()),
            ]
        })
        .collect();

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
