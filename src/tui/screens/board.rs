//! Game board screen: the card grid, the timer and the best time.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use pairs_core::{
    BestScore, BoardSize, GameError, GameEvent, GameSession, Phase, SlotIndex, SlotState,
    format_time,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::timer::{ClockEvent, TokioClock};
use crate::tui::input::move_cursor;
use crate::tui::screen::{GameContext, Screen, ScreenTransition};

/// Pause on the finished board before the best-score table opens.
pub const HIGH_SCORE_DELAY: Duration = Duration::from_millis(1500);

/// State for the board screen.
#[derive(Debug)]
pub struct BoardScreen {
    session: GameSession<TokioClock>,
    clock_rx: UnboundedReceiver<ClockEvent>,
    rng: SmallRng,
    cursor: SlotIndex,
    best: Option<BestScore>,
    status: String,
    show_scores_at: Option<Instant>,
}

impl BoardScreen {
    /// Deals a game for the player and board size in the current settings.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the deal fails.
    #[instrument(skip(ctx))]
    pub fn new(ctx: &GameContext) -> Result<Self, GameError> {
        let (clock, clock_rx) = TokioClock::new();
        let mut session = GameSession::new(clock, ctx.settings().player_name());
        let mut rng = SmallRng::from_rng(&mut rand::rng());
        let size = *ctx.settings().board_size();
        session.new_game(u8::from(size), &mut rng)?;

        let mut screen = Self {
            session,
            clock_rx,
            rng,
            cursor: 0,
            best: None,
            status: String::new(),
            show_scores_at: None,
        };
        screen.refresh_best(ctx, size);
        screen.status = "Select a card to start".to_string();
        info!(%size, "Board ready");
        Ok(screen)
    }

    /// Returns the game session.
    pub fn session(&self) -> &GameSession<TokioClock> {
        &self.session
    }

    /// Returns the slot under the cursor.
    pub fn cursor(&self) -> SlotIndex {
        self.cursor
    }

    /// Returns the status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the best time shown for this board size.
    pub fn best(&self) -> Option<&BestScore> {
        self.best.as_ref()
    }

    /// Feeds every pending clock event into the session.
    #[instrument(skip(self))]
    pub fn drain_clock(&mut self) {
        while let Ok(event) = self.clock_rx.try_recv() {
            let reflected = match event {
                ClockEvent::Tick(epoch) => self.session.tick(epoch),
                ClockEvent::Settle(token) => self.session.complete_settle(token),
            };
            if let Some(GameEvent::SettleComplete(first, second)) = reflected {
                debug!(first, second, "Cards flipped back");
                self.status = "Try again".to_string();
            }
        }
    }

    /// Waits for a stopped tick task to wind down, then discards whatever
    /// it delivered before stopping.
    ///
    /// Returns immediately when the timer was not stopped since the last
    /// call.
    #[instrument(skip(self))]
    pub async fn confirm_stopped(&mut self) {
        self.session.clock_mut().settled().await;
        self.drain_clock();
    }

    /// Selects the card at `index`.
    #[instrument(skip(self, ctx))]
    pub fn select(&mut self, index: SlotIndex, ctx: &mut GameContext) {
        let events = self.session.select_slot(index);
        self.apply(events, ctx);
    }

    /// Deals a new game of the same size.
    #[instrument(skip(self, ctx))]
    pub fn restart(&mut self, ctx: &GameContext) {
        match self.session.restart(&mut self.rng) {
            Ok(_) => {
                self.cursor = 0;
                self.show_scores_at = None;
                self.status = "New game - select a card to start".to_string();
                if let Some(size) = self.session.board_size() {
                    self.refresh_best(ctx, size);
                }
                info!("Board restarted");
            }
            Err(e) => warn!(error = %e, "Restart failed"),
        }
    }

    fn apply(&mut self, events: Vec<GameEvent>, ctx: &mut GameContext) {
        for event in events {
            match event {
                GameEvent::Resumed => self.status = "Resumed".to_string(),
                GameEvent::Match { card, .. } => {
                    self.status = format!("Pair of {} found", card);
                }
                GameEvent::Mismatch { .. } => self.status = "No match".to_string(),
                GameEvent::GameComplete { elapsed_seconds } => {
                    self.record_finish(elapsed_seconds, ctx);
                }
                other => debug!(event = ?other, "Event reflected"),
            }
        }
    }

    fn record_finish(&mut self, elapsed_seconds: u64, ctx: &mut GameContext) {
        let Some(size) = self.session.board_size() else {
            return;
        };
        let player = self.session.player_name().to_string();
        match ctx.scores_mut().submit(size, elapsed_seconds, &player) {
            Ok(Some(GameEvent::NewHighScore {
                seconds,
                player_name,
            })) => {
                self.status = format!("New best time: {}!", format_time(seconds));
                self.best = Some(BestScore::new(seconds, player_name));
                self.show_scores_at = Some(Instant::now() + HIGH_SCORE_DELAY);
            }
            Ok(_) => {
                self.status = format!("Finished in {}", format_time(elapsed_seconds));
            }
            Err(e) => {
                warn!(error = %e, "Failed to record score");
                self.status = format!(
                    "Finished in {} (score not saved)",
                    format_time(elapsed_seconds)
                );
            }
        }
    }

    fn refresh_best(&mut self, ctx: &GameContext, size: BoardSize) {
        self.best = match ctx.scores().best(size) {
            Ok(best) => best,
            Err(e) => {
                warn!(error = %e, "Failed to load best score");
                None
            }
        };
    }

    fn side(&self) -> usize {
        self.session
            .board_size()
            .map_or(0, |size| usize::from(size.get()))
    }

    fn cell(&self, index: SlotIndex) -> Span<'static> {
        let state = self.session.slot_state(index).unwrap_or_default();
        let face = self
            .session
            .board()
            .and_then(|b| b.card(index))
            .filter(|_| state.is_visible());
        let text = match face {
            Some(card) => format!(" {:>2} ", card.get()),
            None => " ?? ".to_string(),
        };
        let mut style = match state {
            SlotState::FaceDown => Style::default().fg(Color::DarkGray),
            SlotState::FaceUp => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            SlotState::Matched => Style::default().fg(Color::Green),
        };
        if index == self.cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Span::styled(text, style)
    }
}

impl Screen for BoardScreen {
    #[instrument(skip(self, frame, _ctx))]
    fn render(&self, frame: &mut Frame, _ctx: &GameContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let best = match &self.best {
            Some(best) => format!("{} ({})", format_time(*best.seconds()), best.player_name()),
            None => "--:--:--".to_string(),
        };
        let phase = match self.session.phase() {
            Phase::Paused => " [paused]",
            Phase::Won => " [finished]",
            _ => "",
        };
        let header = Paragraph::new(vec![
            Line::from(format!(
                "Player: {}   Time: {}{}   Best: {}",
                self.session.player_name(),
                format_time(self.session.elapsed_seconds()),
                phase,
                best
            )),
            Line::styled(self.status.clone(), Style::default().fg(Color::Cyan)),
        ])
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let side = self.side();
        let grid = (0..side)
            .map(|row| Line::from((0..side).map(|col| self.cell(row * side + col)).collect::<Vec<_>>()))
            .collect::<Vec<_>>();
        let title = format!(
            "Pairs {}/{}",
            self.session.matched_pairs(),
            self.session.couple_count()
        );
        let board = Paragraph::new(grid)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(board, chunks[1]);

        let help = Paragraph::new("Arrows: Move | Space: Flip | Enter: Resume / New game | r: Restart | Esc: Pause/Back")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    #[instrument(skip(self, key, ctx))]
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut GameContext) -> ScreenTransition {
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, self.side(), key.code);
            }
            KeyCode::Char(' ') => self.select(self.cursor, ctx),
            KeyCode::Enter => match self.session.phase() {
                Phase::Paused => {
                    if self.session.resume().is_some() {
                        self.status = "Resumed".to_string();
                    }
                }
                Phase::Ready | Phase::Won => self.restart(ctx),
                Phase::Running | Phase::Idle => debug!("Enter ignored while playing"),
            },
            KeyCode::Esc => {
                if self.session.pause().is_some() {
                    self.status = "Paused - Enter to resume".to_string();
                } else {
                    info!("Leaving board");
                    return ScreenTransition::GoToSettings;
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.restart(ctx),
            _ => {}
        }
        ScreenTransition::Stay
    }

    #[instrument(skip(self, _ctx))]
    fn update(&mut self, _ctx: &mut GameContext) -> ScreenTransition {
        self.drain_clock();
        match self.show_scores_at {
            Some(at) if Instant::now() >= at => {
                self.show_scores_at = None;
                ScreenTransition::GoToBestScores {
                    highlight: self.session.board_size(),
                }
            }
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ScoreRepository;
    use crate::settings::PlayerSettings;
    use crossterm::event::KeyModifiers;
    use pairs_core::HighScores;

    fn context(dir: &tempfile::TempDir) -> GameContext {
        let db = dir.path().join("scores.db");
        let repo = ScoreRepository::new(db.to_string_lossy()).unwrap();
        GameContext::new(
            HighScores::new(repo),
            PlayerSettings::new("Ada", BoardSize::Two),
            dir.path().join("settings.toml"),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn pairs(screen: &BoardScreen) -> Vec<(SlotIndex, SlotIndex)> {
        let cards = screen.session().deck().unwrap().cards().to_vec();
        let mut pairs = Vec::new();
        for (i, card) in cards.iter().enumerate() {
            if let Some(j) = (i + 1..cards.len()).find(|&j| cards[j] == *card) {
                pairs.push((i, j));
            }
        }
        pairs
    }

    #[tokio::test(start_paused = true)]
    async fn test_space_starts_and_esc_pauses() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        let mut screen = BoardScreen::new(&ctx).unwrap();
        assert_eq!(screen.session().phase(), Phase::Ready);

        screen.handle_key(key(KeyCode::Char(' ')), &mut ctx);
        assert_eq!(screen.session().phase(), Phase::Running);

        assert_eq!(screen.handle_key(key(KeyCode::Esc), &mut ctx), ScreenTransition::Stay);
        assert_eq!(screen.session().phase(), Phase::Paused);

        screen.handle_key(key(KeyCode::Enter), &mut ctx);
        assert_eq!(screen.session().phase(), Phase::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_while_running_does_not_flip() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        let mut screen = BoardScreen::new(&ctx).unwrap();
        screen.handle_key(key(KeyCode::Char(' ')), &mut ctx);
        screen.handle_key(key(KeyCode::Right), &mut ctx);

        screen.handle_key(key(KeyCode::Enter), &mut ctx);
        assert_eq!(screen.session().phase(), Phase::Running);
        assert_eq!(screen.session().slot_state(1), Some(SlotState::FaceDown));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_is_confirmed_before_time_moves_on() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        let mut screen = BoardScreen::new(&ctx).unwrap();
        screen.select(0, &mut ctx);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        screen.update(&mut ctx);

        screen.handle_key(key(KeyCode::Esc), &mut ctx);
        screen.confirm_stopped().await;
        let paused_at = screen.session().elapsed_seconds();
        assert_eq!(paused_at, 1);
        assert!(!screen.session().clock().is_ticking());

        tokio::time::sleep(Duration::from_secs(3)).await;
        screen.update(&mut ctx);
        assert_eq!(screen.session().elapsed_seconds(), paused_at);
        assert_eq!(screen.session().phase(), Phase::Paused);
    }

    #[tokio::test(start_paused = true)]
    async fn test_esc_when_not_running_goes_to_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        let mut screen = BoardScreen::new(&ctx).unwrap();
        assert_eq!(
            screen.handle_key(key(KeyCode::Esc), &mut ctx),
            ScreenTransition::GoToSettings
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cursor_moves_on_grid() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        let mut screen = BoardScreen::new(&ctx).unwrap();
        screen.handle_key(key(KeyCode::Down), &mut ctx);
        screen.handle_key(key(KeyCode::Right), &mut ctx);
        assert_eq!(screen.cursor(), 3);
        screen.handle_key(key(KeyCode::Right), &mut ctx);
        assert_eq!(screen.cursor(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_reach_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        let mut screen = BoardScreen::new(&ctx).unwrap();
        screen.select(0, &mut ctx);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        screen.update(&mut ctx);
        assert_eq!(screen.session().elapsed_seconds(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_high_score_opens_table_after_delay() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        let mut screen = BoardScreen::new(&ctx).unwrap();

        for (first, second) in pairs(&screen) {
            screen.select(first, &mut ctx);
            screen.select(second, &mut ctx);
        }
        assert_eq!(screen.session().phase(), Phase::Won);
        assert_eq!(screen.best().map(|b| *b.seconds()), Some(0));
        assert_eq!(screen.update(&mut ctx), ScreenTransition::Stay);

        tokio::time::advance(HIGH_SCORE_DELAY).await;
        assert_eq!(
            screen.update(&mut ctx),
            ScreenTransition::GoToBestScores {
                highlight: Some(BoardSize::Two)
            }
        );
        assert_eq!(
            ctx.scores().best(BoardSize::Two).unwrap().map(|b| *b.seconds()),
            Some(0)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resets_board() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        let mut screen = BoardScreen::new(&ctx).unwrap();
        screen.select(0, &mut ctx);
        screen.handle_key(key(KeyCode::Char('r')), &mut ctx);
        assert_eq!(screen.session().phase(), Phase::Ready);
        assert_eq!(screen.session().slot_state(0), Some(SlotState::FaceDown));
    }
}
