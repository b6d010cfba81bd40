//! Code-guessing minigame.
//!
//! A secret code of `digits` digits is drawn when the session starts. Each
//! line is a guess; well-formed guesses use up one try and are scored by
//! digits in the right place and digits present elsewhere in the code.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::session::{Program, Reply};

crate::state_enum! {
    /// Where a game stands.
    pub enum GamePhase {
        Playing,
        Won,
        Lost,
    }
    final: [Won, Lost]
}

/// Result of comparing a guess against the secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    /// Positions holding the right digit.
    pub exact: usize,
    /// Other positions whose digit appears at some different position
    /// of the secret. Each guess position counts at most once.
    pub misplaced: usize,
}

/// Score `guess` against `secret`.
///
/// ```
/// use stepform::programs::minigame::{score, Score};
///
/// assert_eq!(score(&[1, 2, 3], &[1, 3, 2]), Score { exact: 1, misplaced: 2 });
/// ```
pub fn score(guess: &[u8], secret: &[u8]) -> Score {
    let mut exact = 0;
    let mut misplaced = 0;
    for (i, digit) in guess.iter().enumerate() {
        if secret.get(i) == Some(digit) {
            exact += 1;
        } else if secret
            .iter()
            .enumerate()
            .any(|(j, s)| j != i && s == digit)
        {
            misplaced += 1;
        }
    }
    Score { exact, misplaced }
}

/// Read a code as a decimal number, most significant digit first.
pub fn code_value(code: &[u8]) -> u64 {
    code.iter().fold(0, |n, d| n * 10 + u64::from(*d))
}

fn render(code: &[u8]) -> String {
    code.iter()
        .map(|d| char::from_digit(u32::from(*d), 10).unwrap_or('?'))
        .collect()
}

fn fresh_rng() -> StdRng {
    StdRng::from_entropy()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Minigame {
    secret: Vec<u8>,
    remaining: u32,
    tries: u32,
    digits: usize,
    digit_range: u8,
    #[serde(skip, default = "fresh_rng")]
    rng: StdRng,
}

impl Default for Minigame {
    fn default() -> Self {
        Self::new(&Config::default(), None)
    }
}

impl Minigame {
    /// A game using the config's rules. A `seed` makes codes reproducible.
    pub fn new(config: &Config, seed: Option<u64>) -> Self {
        Self {
            secret: Vec::new(),
            remaining: config.tries,
            tries: config.tries,
            digits: config.digits,
            digit_range: config.digit_range,
            rng: seed.map_or_else(fresh_rng, StdRng::seed_from_u64),
        }
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    fn parse_guess(&self, line: &str) -> Result<Vec<u8>, String> {
        let entered = line.chars().count();
        if entered != self.digits {
            return Err(format!(
                "Invalid input length. Please enter exactly {} digits. You entered {entered}.\n",
                self.digits
            ));
        }

        line.chars()
            .map(|c| c.to_digit(10).map(|d| d as u8))
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(|| "Invalid input. Enter only digits.\n".to_string())
    }

    fn guess(&mut self, line: &str) -> Reply<GamePhase> {
        let guess = match self.parse_guess(line) {
            Ok(guess) => guess,
            Err(message) => return Reply::new(GamePhase::Playing, message),
        };

        self.remaining = self.remaining.saturating_sub(1);
        let Score { exact, misplaced } = score(&guess, &self.secret);
        let code = render(&self.secret);

        if exact == self.digits {
            info!(tries_left = self.remaining, "code guessed");
            return Reply::new(
                GamePhase::Won,
                format!("You opened the vault! The code was: {code}\n"),
            );
        }

        let direction = if code_value(&guess) > code_value(&self.secret) {
            "Too high."
        } else {
            "Too low."
        };
        let mut text = format!(
            "{direction} {exact} correct digit(s) in the right place, {misplaced} correct digit(s) in the wrong place.\n"
        );

        if self.remaining == 0 {
            info!("out of tries");
            text.push_str(&format!(
                "You've run out of tries. Game over.\nThe correct code was: {code}\n"
            ));
            return Reply::new(GamePhase::Lost, text);
        }

        Reply::new(GamePhase::Playing, text)
    }
}

impl Program for Minigame {
    type Step = GamePhase;

    fn reset(&mut self) -> GamePhase {
        let range = self.digit_range;
        self.secret = (0..self.digits)
            .map(|_| self.rng.gen_range(0..=range))
            .collect();
        self.remaining = self.tries;
        GamePhase::Playing
    }

    fn greeting(&self) -> String {
        format!(
            "Welcome to the Code Guessing Minigame!\nTry to guess the {}-digit secret code. Digits are between 0 and {}.\n",
            self.digits, self.digit_range
        )
    }

    fn prompt(&self, step: &GamePhase) -> String {
        match step {
            GamePhase::Playing => {
                format!("{} tries remaining. Enter your guess:\n", self.remaining)
            }
            GamePhase::Won | GamePhase::Lost => String::new(),
        }
    }

    fn handle(&mut self, step: &GamePhase, line: &str) -> Reply<GamePhase> {
        match step {
            GamePhase::Playing => self.guess(line.trim()),
            GamePhase::Won | GamePhase::Lost => Reply::silent(*step),
        }
    }

    fn validate(&self, _step: &GamePhase) -> Result<(), String> {
        if !(1..=9).contains(&self.digits) || self.digit_range > 9 {
            return Err(format!(
                "unsupported code shape: {} digits in 0..={}",
                self.digits, self.digit_range
            ));
        }
        if self.secret.len() != self.digits {
            return Err(format!(
                "secret has {} digits, expected {}",
                self.secret.len(),
                self.digits
            ));
        }
        if let Some(digit) = self.secret.iter().find(|d| **d > self.digit_range) {
            return Err(format!(
                "secret digit {digit} outside 0..={}",
                self.digit_range
            ));
        }
        if self.remaining > self.tries {
            return Err(format!(
                "{} tries remaining exceeds the limit of {}",
                self.remaining, self.tries
            ));
        }
        Ok(())
    }

    fn ended(&self, step: &GamePhase) -> String {
        let mut text = String::from("Game is over. Please initialize a new game.\n");
        match step {
            GamePhase::Won => text.push_str("You already won!\n"),
            GamePhase::Lost => text.push_str(&format!(
                "You already lost. The code was: {}\n",
                render(&self.secret)
            )),
            GamePhase::Playing => {}
        }
        text
    }
}
