use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "licenprep")]
#[command(about = "Study tool for medical licensing exams", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show streak, stats and per-system progress
    #[command(alias = "d")]
    Dashboard,

    /// Manage uploaded textbooks
    #[command(alias = "tb")]
    Textbooks {
        #[command(subcommand)]
        action: Option<TextbookAction>,
    },

    /// Practice the active question set interactively
    #[command(alias = "p")]
    Practice,

    /// Generate a new question set from the textbook corpus
    #[command(alias = "g")]
    Generate(GenerateArgs),

    /// Faculty review board
    #[command(alias = "r")]
    Review {
        #[command(subcommand)]
        action: Option<ReviewAction>,
    },

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TextbookAction {
    /// List textbooks
    #[command(alias = "ls")]
    List,

    /// Register a textbook file
    Add {
        /// Path to the file (.pdf, .ppt, .pptx, .doc or .docx, up to 100 MB)
        path: PathBuf,

        /// Title (defaults to the file name)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Set a textbook's processing status
    Status {
        /// Textbook id
        id: String,

        /// processing, processed or failed
        status: String,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Subject category (e.g. Cardiology)
    pub category: String,

    /// Free-text focus for retrieval
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Number of source passages to retrieve
    #[arg(short, long, default_value_t = licenprep::generation::DEFAULT_K)]
    pub k: u32,

    /// Number of questions to generate
    #[arg(
        short = 'n',
        long = "count",
        default_value_t = licenprep::generation::DEFAULT_NUM_QUESTIONS
    )]
    pub num_questions: u32,
}

#[derive(Subcommand, Debug)]
pub enum ReviewAction {
    /// List questions in each bucket
    #[command(alias = "ls")]
    List {
        /// Only show this bucket (pending, approved, flagged)
        bucket: Option<String>,
    },

    /// Move a question between buckets
    #[command(alias = "mv")]
    Move {
        /// Question id
        id: String,

        /// Source bucket
        from: String,

        /// Destination bucket
        to: String,
    },

    /// Approve every pending question
    ApproveAll,
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print current settings
    Show,

    /// Change one or more settings
    Set {
        /// Model tier (gpt-3.5-turbo, gpt-4, claude-3-opus, gemini-pro)
        #[arg(long)]
        model: Option<String>,

        /// Monthly token budget (100000 to 1000000)
        #[arg(long)]
        budget: Option<u32>,

        /// light, dark or system
        #[arg(long)]
        theme: Option<String>,

        /// Base URL of the question generation service (saved to config.json)
        #[arg(long)]
        api_url: Option<String>,

        /// Generation request timeout in seconds, 0 to wait indefinitely
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_defaults() {
        let cli = Cli::try_parse_from(["licenprep", "generate", "Cardiology"]).unwrap();
        match cli.command {
            Some(Commands::Generate(args)) => {
                assert_eq!(args.category, "Cardiology");
                assert_eq!(args.query, "");
                assert_eq!(args.k, 5);
                assert_eq!(args.num_questions, 3);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["licenprep", "-vv", "dashboard"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn review_move_args() {
        let cli =
            Cli::try_parse_from(["licenprep", "review", "move", "q1", "pending", "approved"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Review {
                action: Some(ReviewAction::Move { .. })
            })
        ));
    }

    #[test]
    fn settings_set_service_args() {
        let cli = Cli::try_parse_from([
            "licenprep",
            "settings",
            "set",
            "--api-url",
            "http://gen:9000",
            "--timeout",
            "30",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Settings {
                action:
                    Some(SettingsAction::Set {
                        api_url, timeout, ..
                    }),
            }) => {
                assert_eq!(api_url.as_deref(), Some("http://gen:9000"));
                assert_eq!(timeout, Some(30));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
