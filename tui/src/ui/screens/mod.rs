pub mod form;
pub mod menu;

use crossterm::event::KeyCode;
use ratatui::Frame;

pub enum Action {
    None,
    Quit,
    Transition(Screen),
}

pub enum Screen {
    Menu(menu::MenuState),
    Form(form::FormScreenState),
}

impl Screen {
    pub fn draw(&self, f: &mut Frame) {
        match self {
            Screen::Menu(s) => menu::draw(f, s),
            Screen::Form(s) => form::draw(f, s),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Action {
        match self {
            Screen::Menu(s) => menu::handle_key(s, key),
            Screen::Form(s) => form::handle_key(s, key),
        }
    }

    /// Applies anything that arrived since the last frame. Non-blocking.
    pub fn tick(&mut self) {
        if let Screen::Form(s) = self {
            form::tick(s);
        }
    }
}
