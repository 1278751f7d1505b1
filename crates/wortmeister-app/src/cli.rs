use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wortmeister_types::Level;

#[derive(Parser, Debug)]
#[command(
    name = "wortmeister",
    version,
    about = "German vocabulary trainer backed by Gemini",
    long_about = "Look up German words with a generative model, hear them pronounced, \
                  and keep a library of the last 50 words you studied.\n\n\
                  Run without a subcommand for the interactive shell."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Learner level used in prompts (A1, B1, C1)
    #[arg(long, global = true)]
    pub level: Option<Level>,

    /// Directory for saved words, XP and cached audio
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a word and save it to the library
    Analyze { word: String },

    /// Pronounce text
    Speak {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// List saved words
    Library {
        /// Only show words whose German or English form contains this
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Delete a saved word
    Remove { word: String },

    /// Show XP and library size
    Stats,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_level_and_subcommand() {
        let cli = Cli::try_parse_from(["wortmeister", "--level", "b1", "analyze", "Haus"]).unwrap();
        assert_eq!(cli.level, Some(Level::B1));
        assert!(matches!(cli.command, Some(Command::Analyze { ref word }) if word == "Haus"));

        let cli = Cli::try_parse_from(["wortmeister"]).unwrap();
        assert!(cli.command.is_none());

        assert!(Cli::try_parse_from(["wortmeister", "--level", "B2"]).is_err());
    }

    #[test]
    fn test_speak_joins_words() {
        let cli = Cli::try_parse_from(["wortmeister", "speak", "Guten", "Morgen"]).unwrap();
        match cli.command {
            Some(Command::Speak { text }) => assert_eq!(text.join(" "), "Guten Morgen"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
