//! Command-line interface for arena_viewer.

use std::path::PathBuf;

use arena_replay::ReplayStrategy;
use clap::{Args, Parser, Subcommand};

/// Arena Viewer - step through recorded arena games
#[derive(Parser, Debug)]
#[command(name = "arena_viewer")]
#[command(about = "Replay recorded two-player grid games move by move", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the viewer configuration file
    #[arg(long, global = true, default_value = "arena_viewer.toml")]
    pub config: PathBuf,

    /// Arena server URL (overrides config and ARENA_SERVER_URL)
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Replay strategy: recompute or cached
    #[arg(long, global = true)]
    pub strategy: Option<ReplayStrategy>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Which game to load and from where.
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// Game identifier (a positive integer)
    #[arg(short, long)]
    pub game: String,

    /// Read the game from a JSON file instead of the server
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the interactive replay viewer
    View {
        /// Game to view
        #[command(flatten)]
        game: GameArgs,
    },

    /// Print the board at one position
    Print {
        /// Game to print
        #[command(flatten)]
        game: GameArgs,

        /// Number of turns to apply (defaults to the whole game)
        #[arg(short, long, allow_hyphen_values = true)]
        position: Option<i64>,
    },

    /// Check that a record replays to its final snapshot
    Verify {
        /// Game to check
        #[command(flatten)]
        game: GameArgs,
    },
}

impl Command {
    /// The game arguments shared by every command.
    pub fn game_args(&self) -> &GameArgs {
        match self {
            Command::View { game } | Command::Print { game, .. } | Command::Verify { game } => game,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_print_with_globals() {
        let cli = Cli::try_parse_from([
            "arena_viewer",
            "print",
            "--game",
            "7",
            "--position",
            "3",
            "--strategy",
            "cached",
        ])
        .unwrap();

        assert_eq!(cli.strategy, Some(ReplayStrategy::Cached));
        assert_eq!(cli.config, PathBuf::from("arena_viewer.toml"));
        match cli.command {
            Command::Print { game, position } => {
                assert_eq!(game.game, "7");
                assert_eq!(position, Some(3));
            }
            other => panic!("Expected print, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_position_reaches_controller() {
        let cli =
            Cli::try_parse_from(["arena_viewer", "print", "-g", "7", "--position", "-1"]).unwrap();
        assert!(matches!(cli.command, Command::Print { position: Some(-1), .. }));
    }

    #[test]
    fn test_game_is_required() {
        assert!(Cli::try_parse_from(["arena_viewer", "verify"]).is_err());
    }
}
