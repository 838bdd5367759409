//! Screen flow around a session
//!
//! Menu (name entry) -> Loading (sprites still settling) -> Playing ->
//! GameOver, and back to Menu. The shell owns the DOM; this only decides
//! which screen is showing and when a score may be saved.

use thiserror::Error;

use crate::highscores::{HighScoreEntry, HighScoreStore, MAX_HIGH_SCORES, StoreError};

/// Longest accepted player name, in characters
pub const MAX_NAME_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Loading,
    Playing,
    GameOver { score: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("please enter your name")]
    Empty,
    #[error("name must be at most {max} characters")]
    TooLong { max: usize },
}

/// Result of pressing "save" on the game over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Stored at this rank (1-indexed)
    Saved { rank: usize },
    /// Did not make the board; nothing stored
    OffBoard,
    /// Not on the game over screen, or already saved this game
    NothingToSave,
}

/// A validated, trimmed player name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(NameError::TooLong { max: MAX_NAME_LEN });
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug)]
pub struct App<S> {
    screen: AppScreen,
    name: Option<PlayerName>,
    store: S,
    saved: bool,
}

impl<S: HighScoreStore> App<S> {
    pub fn new(store: S) -> Self {
        Self {
            screen: AppScreen::Menu,
            name: None,
            store,
            saved: false,
        }
    }

    pub fn screen(&self) -> AppScreen {
        self.screen
    }

    /// Leave the menu with the entered name.
    ///
    /// Ignored outside the menu. Returns the screen now showing.
    pub fn request_start(&mut self, raw_name: &str, assets_ready: bool) -> Result<AppScreen, NameError> {
        if self.screen != AppScreen::Menu {
            return Ok(self.screen);
        }
        let name = PlayerName::parse(raw_name)?;
        log::info!("Starting game for {}", name.as_str());
        self.name = Some(name);
        self.screen = if assets_ready {
            AppScreen::Playing
        } else {
            AppScreen::Loading
        };
        Ok(self.screen)
    }

    /// Every sprite has settled; a pending start can now play
    pub fn assets_settled(&mut self) -> AppScreen {
        if self.screen == AppScreen::Loading {
            self.screen = AppScreen::Playing;
        }
        self.screen
    }

    pub fn game_over(&mut self, score: u64) {
        if self.screen != AppScreen::Playing {
            log::debug!("Game over ignored on {:?}", self.screen);
            return;
        }
        log::info!("Game over, final score {}", score);
        self.screen = AppScreen::GameOver { score };
        self.saved = false;
    }

    /// Save the finished score under the player's name. A store error leaves
    /// the save available for another try.
    pub fn save_score(&mut self) -> Result<SaveOutcome, StoreError> {
        let AppScreen::GameOver { score } = self.screen else {
            return Ok(SaveOutcome::NothingToSave);
        };
        if self.saved {
            return Ok(SaveOutcome::NothingToSave);
        }
        let Some(name) = &self.name else {
            return Ok(SaveOutcome::NothingToSave);
        };
        let rank = self.store.save(name.as_str(), score)?;
        self.saved = true;
        Ok(match rank {
            Some(rank) => SaveOutcome::Saved { rank },
            None => SaveOutcome::OffBoard,
        })
    }

    /// Pending storage notice for the player, if any
    pub fn take_notice(&mut self) -> Option<String> {
        self.store.take_notice()
    }

    pub fn can_save(&self) -> bool {
        matches!(self.screen, AppScreen::GameOver { .. }) && !self.saved
    }

    pub fn play_again(&mut self) {
        if let AppScreen::GameOver { .. } = self.screen {
            self.screen = AppScreen::Menu;
            self.saved = false;
        }
    }

    /// Leaderboard for display; a failing store shows as empty
    pub fn high_scores(&self) -> Vec<HighScoreEntry> {
        self.store.list(MAX_HIGH_SCORES).unwrap_or_else(|e| {
            log::warn!("Could not list high scores: {e}");
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::LocalHighScores;

    fn app() -> App<LocalHighScores> {
        App::new(LocalHighScores::new())
    }

    #[test]
    fn test_name_validation() {
        assert_eq!(PlayerName::parse("  Zé  ").unwrap().as_str(), "Zé");
        assert_eq!(PlayerName::parse("   "), Err(NameError::Empty));
        assert_eq!(PlayerName::parse(&"é".repeat(20)).unwrap().as_str().chars().count(), 20);
        assert_eq!(
            PlayerName::parse(&"x".repeat(21)),
            Err(NameError::TooLong { max: MAX_NAME_LEN })
        );
    }

    #[test]
    fn test_start_refused_without_name() {
        let mut app = app();
        assert_eq!(app.request_start("", true), Err(NameError::Empty));
        assert_eq!(app.screen(), AppScreen::Menu);
    }

    #[test]
    fn test_start_waits_for_assets() {
        let mut app = app();
        assert_eq!(app.request_start("ana", false), Ok(AppScreen::Loading));
        assert_eq!(app.assets_settled(), AppScreen::Playing);
    }

    #[test]
    fn test_start_with_assets_ready() {
        let mut app = app();
        assert_eq!(app.request_start("ana", true), Ok(AppScreen::Playing));
        assert_eq!(app.assets_settled(), AppScreen::Playing);
    }

    #[test]
    fn test_save_once_per_game_over() {
        let mut app = app();
        app.request_start("ana", true).unwrap();
        assert_eq!(app.save_score().unwrap(), SaveOutcome::NothingToSave);
        app.game_over(42);
        assert_eq!(app.screen(), AppScreen::GameOver { score: 42 });
        assert!(app.can_save());
        assert_eq!(app.save_score().unwrap(), SaveOutcome::Saved { rank: 1 });
        assert_eq!(app.save_score().unwrap(), SaveOutcome::NothingToSave);
        assert!(!app.can_save());
        assert_eq!(app.high_scores().len(), 1);
    }

    #[test]
    fn test_play_again_rearms_save() {
        let mut app = app();
        app.request_start("ana", true).unwrap();
        app.game_over(10);
        app.save_score().unwrap();
        app.play_again();
        assert_eq!(app.screen(), AppScreen::Menu);

        app.request_start("bia", true).unwrap();
        app.game_over(30);
        assert_eq!(app.save_score().unwrap(), SaveOutcome::Saved { rank: 1 });
        let names: Vec<_> = app.high_scores().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["bia", "ana"]);
    }

    #[test]
    fn test_game_over_only_while_playing() {
        let mut app = app();
        app.game_over(5);
        assert_eq!(app.screen(), AppScreen::Menu);
        app.play_again();
        assert_eq!(app.screen(), AppScreen::Menu);
    }

    #[test]
    fn test_off_board_score_is_not_reported_saved() {
        let mut board = LocalHighScores::new();
        for score in 1..=10 {
            board.add_score("p", score * 100);
        }
        let mut app = App::new(board);
        app.request_start("ana", true).unwrap();
        app.game_over(3);
        assert_eq!(app.save_score().unwrap(), SaveOutcome::OffBoard);
        assert!(!app.can_save());
        assert!(app.high_scores().iter().all(|e| e.name != "ana"));
    }

    #[test]
    fn test_fallback_notice_reaches_app() {
        use crate::highscores::FallbackStore;

        struct Offline;

        impl HighScoreStore for Offline {
            fn list(&self, _limit: usize) -> Result<Vec<HighScoreEntry>, StoreError> {
                Err(StoreError::Unavailable("offline".into()))
            }

            fn save(&mut self, _name: &str, _score: u64) -> Result<Option<usize>, StoreError> {
                Err(StoreError::Unavailable("offline".into()))
            }
        }

        let mut app = App::new(FallbackStore::new(Offline, LocalHighScores::new()));
        app.request_start("ana", true).unwrap();
        app.game_over(12);
        assert_eq!(app.save_score().unwrap(), SaveOutcome::Saved { rank: 1 });
        assert!(app.take_notice().is_some_and(|n| n.contains("local storage")));
        assert!(app.take_notice().is_none());
        assert_eq!(app.high_scores().len(), 1);
    }
}
