//! Text command front-end.
//!
//! A line-oriented protocol in the GTP mold, meant for user scripts and
//! GUI drivers: one command per line, an optional numeric id, responses
//! prefixed with `=` on success and `?` on failure. The engine itself
//! only ever returns structured values; this layer turns them into
//! human-readable text.
//!
//! ## Supported Commands
//!
//! - `name` / `version` / `list_commands` / `known_command <cmd>`
//! - `reset <size> [opponent]` - start a fresh game
//! - `play <vertex>` - play a Black stone (e.g. `play D4`)
//! - `pass` - Black passes
//! - `genmove` - let the configured opponent deliberate and answer
//! - `cheat <place|vanish> <vertex>` - attempt a cheat
//! - `bonus [grant <n> | take]` - inspect or use banked bonus turns
//! - `score` / `showboard` / `stats`
//! - `quit`

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Result;

use crate::board::{Color, Coord};
use crate::cheat::{CheatKind, CheatOutcome};
use crate::game::{ConfigError, Game, GameConfig, Play, StatsLedger};
use crate::opponent::{self, Opponent};
use crate::score;

/// The list of known console commands.
const KNOWN_COMMANDS: &[&str] = &[
    "bonus",
    "cheat",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "pass",
    "play",
    "quit",
    "reset",
    "score",
    "showboard",
    "stats",
    "version",
];

/// Parse a vertex like `D4` into board coordinates. The `I` column is
/// skipped by Go convention. Row 1 is the bottom of the board.
pub fn parse_coord(s: &str, size: usize) -> Option<Coord> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    let col_char = bytes[0].to_ascii_uppercase();
    if !col_char.is_ascii_uppercase() || col_char == b'I' {
        return None;
    }
    let mut x = (col_char - b'A') as usize;
    if col_char > b'I' {
        x -= 1;
    }
    let row: usize = s[1..].parse().ok()?;
    if x >= size || row == 0 || row > size {
        return None;
    }
    Some((x, size - row))
}

/// Format board coordinates as a vertex string.
pub fn str_coord((x, y): Coord, size: usize) -> String {
    let mut col = b'A' + x as u8;
    if col >= b'I' {
        col += 1;
    }
    format!("{}{}", col as char, size - y)
}

/// Console front-end state: the running game plus everything that
/// outlives it (the stats ledger and the player's skill modifier).
pub struct Console {
    game: Game,
    ledger: StatsLedger,
    skill: f64,
    verbose: bool,
    fixed_delay: Option<Duration>,
    recorded: bool,
}

impl Console {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            ledger: StatsLedger::new(),
            skill: 0.5,
            verbose: false,
            fixed_delay: None,
            recorded: false,
        }
    }

    /// Skill modifier fed into cheat resolution.
    pub fn set_skill(&mut self, skill: f64) {
        self.skill = skill;
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Pin the opponent thinking delay (tests use a zero delay).
    pub fn set_think_delay(&mut self, delay: Duration) {
        self.fixed_delay = Some(delay);
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn ledger(&self) -> &StatsLedger {
        &self.ledger
    }

    /// Run the command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }
            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(stdout, "\n{prefix}{id_str} {message}\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a console command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "tengen".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "reset" => self.cmd_reset(args),

            "play" => self.cmd_play(args),

            "pass" => self.cmd_pass(),

            "genmove" => self.cmd_genmove(),

            "cheat" => self.cmd_cheat(args),

            "bonus" => self.cmd_bonus(args),

            "score" => (true, self.format_score()),

            "showboard" => (true, format!("\n{}", self.game.board())),

            "stats" => (true, self.format_stats()),

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn cmd_reset(&mut self, args: &[&str]) -> (bool, String) {
        if args.is_empty() {
            return (false, "missing argument".to_string());
        }
        let Ok(size) = args[0].parse::<usize>() else {
            return (false, "invalid size".to_string());
        };
        let opponent = match args.get(1) {
            Some(name) => match Opponent::parse(name) {
                Some(opponent) => opponent,
                None => {
                    let err = ConfigError::UnknownOpponent((*name).to_string());
                    return (false, err.to_string());
                }
            },
            None => self.game.opponent(),
        };
        let config = GameConfig {
            size,
            opponent,
            komi: self.game.komi(),
            ..GameConfig::default()
        };
        match self.game.reset(config) {
            Ok(()) => {
                self.recorded = false;
                (true, String::new())
            }
            Err(err) => (false, err.to_string()),
        }
    }

    fn cmd_play(&mut self, args: &[&str]) -> (bool, String) {
        if args.is_empty() {
            return (false, "missing argument".to_string());
        }
        let Some((x, y)) = parse_coord(args[0], self.game.board().size()) else {
            return (false, format!("invalid vertex '{}'", args[0]));
        };
        let validity = self.game.play(x, y);
        if validity.is_valid() {
            (true, String::new())
        } else {
            (false, format!("illegal move: {validity}"))
        }
    }

    fn cmd_pass(&mut self) -> (bool, String) {
        let validity = self.game.pass();
        if !validity.is_valid() {
            return (false, format!("illegal move: {validity}"));
        }
        if self.game.is_over() {
            self.record_finished_game();
            (true, "game over".to_string())
        } else {
            (true, String::new())
        }
    }

    fn cmd_genmove(&mut self) -> (bool, String) {
        if self.game.opponent() == Opponent::None {
            return (false, "no opponent configured".to_string());
        }
        match self.opponent_reply() {
            Some(reply) => (true, reply),
            None => (false, "the game is over".to_string()),
        }
    }

    /// Let the opponent deliberate and apply the result. `None` when the
    /// game is already over.
    fn opponent_reply(&mut self) -> Option<String> {
        if self.game.is_over() {
            return None;
        }
        if self.verbose {
            eprintln!("{} is thinking...", self.game.opponent());
        }
        let pending = match self.fixed_delay {
            Some(delay) => opponent::think_with_delay(&self.game, delay),
            None => opponent::think(&self.game),
        };
        let size = self.game.board().size();
        let reply = match self.game.resolve_opponent(pending)? {
            Play::Move(x, y) => str_coord((x, y), size),
            Play::Pass => {
                if self.game.is_over() {
                    self.record_finished_game();
                    "pass (game over)".to_string()
                } else {
                    "pass".to_string()
                }
            }
            Play::GameOver => "game over".to_string(),
        };
        Some(reply)
    }

    fn cmd_cheat(&mut self, args: &[&str]) -> (bool, String) {
        if args.len() < 2 {
            return (false, "missing arguments".to_string());
        }
        let Some(coord) = parse_coord(args[1], self.game.board().size()) else {
            return (false, format!("invalid vertex '{}'", args[1]));
        };
        let kind = match args[0].to_lowercase().as_str() {
            "place" => CheatKind::PlaceExtra(coord),
            "vanish" => CheatKind::Vanish(coord),
            other => return (false, format!("unknown cheat '{other}'")),
        };
        if self.game.is_over() {
            return (false, "the game is over".to_string());
        }

        let outcome = self.game.attempt_cheat(kind, self.skill);
        let mut message = match outcome {
            CheatOutcome::Success => "cheat succeeded".to_string(),
            CheatOutcome::Fumble => "cheat failed, turn forfeited".to_string(),
            CheatOutcome::Rejected => return (false, "the game is over".to_string()),
            CheatOutcome::Bust => {
                if self.game.opponent() != Opponent::None {
                    self.ledger.record_loss(self.game.opponent());
                }
                self.recorded = true;
                return (true, "cheat backfired, game over".to_string());
            }
        };
        // Win or lose the roll, the opponent answers.
        if self.game.opponent() != Opponent::None {
            if let Some(reply) = self.opponent_reply() {
                message.push_str(&format!(", opponent answers {reply}"));
            }
        }
        (true, message)
    }

    fn cmd_bonus(&mut self, args: &[&str]) -> (bool, String) {
        match args.first() {
            None => (true, format!("{} banked", self.game.bonus_turns())),
            Some(&"grant") => {
                let Some(Ok(count)) = args.get(1).map(|s| s.parse::<u32>()) else {
                    return (false, "invalid count".to_string());
                };
                self.game.grant_bonus_turns(count);
                (true, format!("{} banked", self.game.bonus_turns()))
            }
            Some(&"take") => {
                if self.game.take_bonus_turn() {
                    (true, "bonus turn taken".to_string())
                } else {
                    (false, "no bonus turns banked".to_string())
                }
            }
            Some(other) => (false, format!("unknown bonus action '{other}'")),
        }
    }

    fn format_score(&self) -> String {
        let sheet = score::score(&self.game);
        let winner = match sheet.winner() {
            Some(Color::Black) => "black leads".to_string(),
            Some(Color::White) => "white leads".to_string(),
            None => "tied".to_string(),
        };
        format!(
            "black {:.1} (stones {}, territory {}, captures {}) / \
             white {:.1} (stones {}, territory {}, captures {}, komi {:.1}) - {}",
            sheet.black.total(),
            sheet.black.stones,
            sheet.black.territory,
            sheet.black.captures,
            sheet.white.total(),
            sheet.white.stones,
            sheet.white.territory,
            sheet.white.captures,
            sheet.white.komi,
            winner,
        )
    }

    fn format_stats(&self) -> String {
        let mut lines: Vec<String> = self
            .ledger
            .iter()
            .map(|(opponent, stats)| {
                format!(
                    "{}: {}W/{}L streak {} (best {}) favor {}",
                    opponent, stats.wins, stats.losses, stats.streak, stats.best_streak,
                    stats.favor,
                )
            })
            .collect();
        if lines.is_empty() {
            return "no games recorded".to_string();
        }
        lines.sort();
        lines.join("\n")
    }

    /// Update the persistent ledger once per finished game.
    fn record_finished_game(&mut self) {
        if self.recorded || self.game.opponent() == Opponent::None {
            return;
        }
        self.recorded = true;
        match score::score(&self.game).winner() {
            Some(Color::Black) => self.ledger.record_win(self.game.opponent()),
            Some(Color::White) => self.ledger.record_loss(self.game.opponent()),
            None => {}
        }
    }
}
