use bitfall_engine::{Action, GameSession, TickSettings};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Paragraph},
};
use tick_runtime::{App, RenderMode, Runtime};

use crate::ui::widgets::{BoardDisplay, style};

#[derive(Debug)]
pub struct PlayScreen {
    session: GameSession,
    settings: TickSettings,
    render_mode: RenderMode,
}

impl PlayScreen {
    pub fn new(session: GameSession, settings: TickSettings, render_mode: RenderMode) -> Self {
        Self {
            session,
            settings,
            render_mode,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }
}

/// Maps a plain (unmodified) key press to a game action.
fn action_for(key: &KeyEvent) -> Option<Action> {
    if !(key.modifiers - KeyModifiers::SHIFT).is_empty() {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Action::from_key(c),
        _ => None,
    }
}

impl App for PlayScreen {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(self.settings.tick_duration());
        runtime.set_render_mode(self.render_mode);
        self.session.ensure_piece();
    }

    fn should_exit(&self) -> bool {
        false
    }

    fn handle_key(&mut self, _runtime: &mut Runtime, key: KeyEvent) -> bool {
        action_for(&key).is_some_and(|action| self.session.apply(action))
    }

    fn update(&mut self, _runtime: &mut Runtime) -> bool {
        self.session.increment_tick()
    }

    fn draw(&self, frame: &mut Frame) {
        let field = self.session.field();
        let frame_board = field.frame();
        let board = BoardDisplay::new(&frame_board).block(Block::bordered().title(" bitfall "));

        let piece = self
            .session
            .falling_piece()
            .map_or_else(|| "-".to_owned(), |id| id.to_string());
        let status = Text::from(vec![
            Line::from(format!("Piece:  {piece}")),
            Line::from(format!("Locked: {}", self.session.completed_pieces())),
            Line::from(format!("Ticks:  {}", self.session.total_ticks())),
            Line::from(format!("Seed:   {}", field.seed())),
        ]);
        let help_text = Text::from("Controls: a (Left) | d (Right) | s (Soft Drop) | Ctrl+C (Quit)")
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(board.height()),
            Constraint::Length(1),
        ])
        .areas::<2>(frame.area());
        let [board_area, status_area] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(44),
        ])
        .flex(Flex::Center)
        .spacing(2)
        .areas::<2>(main_area);

        frame.render_widget(board, board_area);
        frame.render_widget(
            Paragraph::new(status)
                .style(style::DEFAULT)
                .block(Block::bordered().title(" status ")),
            status_area,
        );
        frame.render_widget(help_text, help_area);
    }
}

#[cfg(test)]
mod tests {
    use bitfall_engine::PieceSeed;

    use super::*;

    fn screen() -> PlayScreen {
        let settings = TickSettings::default();
        let seed: PieceSeed = "00112233445566778899aabbccddeeff".parse().unwrap();
        PlayScreen::new(
            GameSession::with_seed(&settings, seed),
            settings,
            RenderMode::FullRepaint,
        )
    }

    #[test]
    fn test_action_keys() {
        let key = |code, modifiers| KeyEvent::new(code, modifiers);
        assert_eq!(
            action_for(&key(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(Action::MoveLeft)
        );
        assert_eq!(
            action_for(&key(KeyCode::Char('s'), KeyModifiers::NONE)),
            Some(Action::SoftDrop)
        );
        assert_eq!(action_for(&key(KeyCode::Char('q'), KeyModifiers::NONE)), None);
        assert_eq!(action_for(&key(KeyCode::Left, KeyModifiers::NONE)), None);
        assert_eq!(
            action_for(&key(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_init_configures_runtime_and_spawns() {
        let mut screen = screen();
        let mut runtime = Runtime::new();
        screen.init(&mut runtime);
        assert_eq!(runtime.tick_interval(), TickSettings::default().tick_duration());
        assert!(screen.session().falling_piece().is_some());
    }

    #[test]
    fn test_unknown_key_is_not_a_change() {
        let mut screen = screen();
        let mut runtime = Runtime::new();
        screen.init(&mut runtime);
        let before = *screen.session().field().dynamic();
        let changed = screen.handle_key(
            &mut runtime,
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE),
        );
        assert!(!changed);
        assert_eq!(*screen.session().field().dynamic(), before);
    }
}
