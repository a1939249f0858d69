//! Best-score table, one row per board size.

use crossterm::event::{KeyCode, KeyEvent};
use pairs_core::{BoardSize, ScoreRow, format_time};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use tracing::{debug, info, instrument, warn};

use crate::tui::screen::{GameContext, Screen, ScreenTransition};

/// State for the best-score screen.
#[derive(Debug)]
pub struct BestScoresScreen {
    rows: Vec<ScoreRow>,
    highlight: Option<BoardSize>,
    load_error: Option<String>,
}

impl BestScoresScreen {
    /// Loads the table from the score store.
    #[instrument(skip(ctx))]
    pub fn new(ctx: &GameContext, highlight: Option<BoardSize>) -> Self {
        let (rows, load_error) = match ctx.scores().table() {
            Ok(rows) => {
                debug!(count = rows.len(), "Best-score table loaded");
                (rows, None)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load best scores");
                (Vec::new(), Some(e.message.clone()))
            }
        };
        Self {
            rows,
            highlight,
            load_error,
        }
    }

    /// Returns the loaded rows.
    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }
}

impl Screen for BestScoresScreen {
    #[instrument(skip(self, frame, _ctx))]
    fn render(&self, frame: &mut Frame, _ctx: &GameContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("Best Times")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        if let Some(error) = &self.load_error {
            let message = Paragraph::new(format!("Could not load best scores: {}", error))
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, chunks[1]);
        } else {
            let rows = self.rows.iter().map(|row| {
                let (time, player) = match row.best() {
                    Some(best) => (format_time(*best.seconds()), best.player_name().clone()),
                    None => ("--:--:--".to_string(), "-".to_string()),
                };
                let style = if Some(*row.board_size()) == self.highlight {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let size = format!("{0}×{0}", row.board_size());
                Row::new(vec![Cell::from(size), Cell::from(time), Cell::from(player)]).style(style)
            });
            let table = Table::new(
                rows,
                [
                    Constraint::Length(8),
                    Constraint::Length(10),
                    Constraint::Min(10),
                ],
            )
            .header(
                Row::new(vec!["Board", "Time", "Player"])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(table, chunks[1]);
        }

        let help = Paragraph::new("Enter / Esc: Back to board")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    #[instrument(skip(self, key, _ctx))]
    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut GameContext) -> ScreenTransition {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                info!("Leaving best-score table");
                ScreenTransition::GoToBoard
            }
            _ => ScreenTransition::Stay,
        }
    }
}
