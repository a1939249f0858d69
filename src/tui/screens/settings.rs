//! Settings screen: player name and board size.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::tui::screen::{GameContext, Screen, ScreenTransition};

/// State for the settings screen.
#[derive(Debug, Default)]
pub struct SettingsScreen {
    start_refused: bool,
}

impl SettingsScreen {
    /// Creates a new settings screen.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing SettingsScreen");
        Self::default()
    }

    /// Returns true if the last start attempt was refused for lack of a name.
    pub fn start_refused(&self) -> bool {
        self.start_refused
    }
}

impl Screen for SettingsScreen {
    #[instrument(skip(self, frame, ctx))]
    fn render(&self, frame: &mut Frame, ctx: &GameContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("Memory Pairs")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let settings = ctx.settings();
        let highlight = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(vec![
                Span::raw("Player name:  "),
                Span::styled(format!("{}_", settings.player_name()), highlight),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::raw("Board size:   "),
                Span::styled(format!("◀ {0}×{0} ▶", settings.board_size()), highlight),
            ]),
        ];
        if self.start_refused {
            lines.push(Line::from(""));
            lines.push(Line::styled(
                "Enter a player name to start",
                Style::default().fg(Color::Red),
            ));
        }
        let form = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Settings"));
        frame.render_widget(form, chunks[1]);

        let help_text = if settings.can_start() {
            "Type name | ←→: Size | Enter: Start | Esc: Quit"
        } else {
            "Type name | ←→: Size | Esc: Quit"
        };
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    #[instrument(skip(self, key, ctx))]
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut GameContext) -> ScreenTransition {
        match key.code {
            KeyCode::Left => {
                ctx.settings_mut().previous_size();
                ScreenTransition::Stay
            }
            KeyCode::Right => {
                ctx.settings_mut().next_size();
                ScreenTransition::Stay
            }
            KeyCode::Backspace => {
                ctx.settings_mut().pop_char();
                ScreenTransition::Stay
            }
            KeyCode::Char(c) => {
                ctx.settings_mut().push_char(c);
                self.start_refused = false;
                ScreenTransition::Stay
            }
            KeyCode::Enter if ctx.settings().can_start() => {
                info!(
                    player = %ctx.settings().player_name(),
                    size = %ctx.settings().board_size(),
                    "Starting game"
                );
                ScreenTransition::StartGame
            }
            KeyCode::Enter => {
                debug!("Start refused without player name");
                self.start_refused = true;
                ScreenTransition::Stay
            }
            KeyCode::Esc => {
                info!("Quitting from settings");
                ScreenTransition::Quit
            }
            _ => ScreenTransition::Stay,
        }
    }
}
