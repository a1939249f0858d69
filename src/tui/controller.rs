//! Game controller: the state machine driving the multi-screen TUI.

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument, warn};

use crate::tui::screen::{GameContext, Screen, ScreenTransition};
use crate::tui::screens::{BestScoresScreen, BoardScreen, SettingsScreen};

/// Active screen in the controller state machine.
#[derive(Debug)]
enum ActiveScreen {
    Settings(SettingsScreen),
    Board(Box<BoardScreen>),
    BestScores(BestScoresScreen),
}

/// Controller that drives the screens.
///
/// Call [`GameController::run`] to start the event loop.
#[derive(Debug)]
pub struct GameController {
    ctx: GameContext,
    parked_board: Option<Box<BoardScreen>>,
}

impl GameController {
    /// Creates a new controller over a shared context.
    #[instrument(skip(ctx))]
    pub fn new(ctx: GameContext) -> Self {
        info!("Creating GameController");
        Self {
            ctx,
            parked_board: None,
        }
    }

    /// Runs the event loop until the user quits.
    ///
    /// Must run on a tokio runtime: the board's clock spawns tasks.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting game event loop");
        let mut screen = ActiveScreen::Settings(SettingsScreen::new());

        loop {
            terminal.draw(|f| match &screen {
                ActiveScreen::Settings(s) => s.render(f, &self.ctx),
                ActiveScreen::Board(s) => s.render(f, &self.ctx),
                ActiveScreen::BestScores(s) => s.render(f, &self.ctx),
            })?;

            let mut transition = match &mut screen {
                ActiveScreen::Settings(s) => s.update(&mut self.ctx),
                ActiveScreen::Board(s) => s.update(&mut self.ctx),
                ActiveScreen::BestScores(s) => s.update(&mut self.ctx),
            };

            // Poll for input with short timeout to keep the timer display live.
            if transition == ScreenTransition::Stay
                && event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
                && key.kind != KeyEventKind::Release
            {
                transition = match &mut screen {
                    ActiveScreen::Settings(s) => s.handle_key(key, &mut self.ctx),
                    ActiveScreen::Board(s) => s.handle_key(key, &mut self.ctx),
                    ActiveScreen::BestScores(s) => s.handle_key(key, &mut self.ctx),
                };
            }

            // Pausing or finishing stops the tick task; wait for it to wind down.
            if let ActiveScreen::Board(board) = &mut screen {
                board.confirm_stopped().await;
            }

            screen = match self.apply_transition(transition, screen) {
                Some(next) => next,
                None => {
                    info!("Quitting");
                    return Ok(());
                }
            };

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Applies a screen transition, returning the next screen or `None` to quit.
    #[instrument(skip(self, current))]
    fn apply_transition(
        &mut self,
        transition: ScreenTransition,
        current: ActiveScreen,
    ) -> Option<ActiveScreen> {
        if transition != ScreenTransition::Stay {
            debug!(?transition, "Applying screen transition");
        }
        match transition {
            ScreenTransition::Stay => Some(current),

            ScreenTransition::StartGame => {
                self.ctx.persist_settings();
                self.parked_board = None;
                Some(self.new_board())
            }

            ScreenTransition::GoToSettings => {
                info!("Navigating to Settings");
                self.parked_board = None;
                Some(ActiveScreen::Settings(SettingsScreen::new()))
            }

            ScreenTransition::GoToBoard => match self.parked_board.take() {
                Some(board) => {
                    info!("Returning to Board");
                    Some(ActiveScreen::Board(board))
                }
                None => Some(self.new_board()),
            },

            ScreenTransition::GoToBestScores { highlight } => {
                info!(?highlight, "Navigating to BestScores");
                if let ActiveScreen::Board(board) = current {
                    self.parked_board = Some(board);
                }
                Some(ActiveScreen::BestScores(BestScoresScreen::new(
                    &self.ctx, highlight,
                )))
            }

            ScreenTransition::Quit => None,
        }
    }

    fn new_board(&self) -> ActiveScreen {
        match BoardScreen::new(&self.ctx) {
            Ok(board) => {
                info!("Navigating to Board");
                ActiveScreen::Board(Box::new(board))
            }
            Err(e) => {
                warn!(error = %e, "Could not deal a game");
                ActiveScreen::Settings(SettingsScreen::new())
            }
        }
    }
}
