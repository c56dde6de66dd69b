//! Clap argument types.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use codelens::models::Persona;

/// AI-powered code review service.
#[derive(Parser, Debug)]
#[command(name = "codelens", version = codelens::constants::VERSION, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP review service.
    Serve(ServeArgs),

    /// Review a single file and print the result.
    Review(ReviewArgs),

    /// Manage saved review history.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Print version information.
    Version,
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind, e.g. 127.0.0.1:3000 (overrides config and env).
    #[arg(long)]
    pub bind: Option<String>,

    /// History file location (overrides config and env).
    #[arg(long)]
    pub history_path: Option<PathBuf>,
}

/// Arguments for the `review` subcommand.
#[derive(Parser, Debug)]
pub struct ReviewArgs {
    /// File to review, or `-` for stdin.
    pub file: PathBuf,

    /// Reviewer persona.
    #[arg(long, value_enum, default_value_t = Persona::Junior)]
    pub persona: Persona,

    /// Source language (inferred from the file extension when omitted).
    #[arg(long)]
    pub language: Option<String>,

    /// Area the review should emphasise, e.g. Security or Performance.
    #[arg(long)]
    pub focus: Option<String>,

    /// Extra context about what the code is for.
    #[arg(long)]
    pub description: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Save the result to history.
    #[arg(long, default_value_t = false)]
    pub save: bool,
}

impl ReviewArgs {
    /// The explicit language, or one guessed from the file extension.
    pub fn language(&self) -> Option<String> {
        self.language.clone().or_else(|| {
            let ext = self.file.extension()?.to_str()?;
            language_for_extension(ext).map(str::to_string)
        })
    }
}

/// History management subcommands.
#[derive(clap::Subcommand, Debug)]
pub enum HistoryAction {
    /// List saved reviews, newest first.
    List,
    /// Remove all saved reviews.
    Clear,
    /// Print the history file path.
    Path,
}

/// Output format for the `review` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

fn language_for_extension(ext: &str) -> Option<&'static str> {
    let lang = match ext.to_ascii_lowercase().as_str() {
        "rs" => "rust",
        "js" | "mjs" | "cjs" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "py" => "python",
        "go" => "go",
        "java" => "java",
        "kt" => "kotlin",
        "rb" => "ruby",
        "php" => "php",
        "c" | "h" => "c",
        "cc" | "cpp" | "hpp" => "cpp",
        "cs" => "csharp",
        "swift" => "swift",
        "sql" => "sql",
        "sh" => "shell",
        _ => return None,
    };
    Some(lang)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("codelens").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn review_defaults() {
        let cli = parse(&["review", "main.rs"]);
        let Command::Review(args) = cli.command else {
            panic!("expected review command");
        };
        assert_eq!(args.persona, Persona::Junior);
        assert_eq!(args.format, OutputFormat::Terminal);
        assert!(!args.save);
        assert_eq!(args.language().as_deref(), Some("rust"));
    }

    #[test]
    fn review_flags() {
        let cli = parse(&[
            "review", "app.txt", "--persona", "senior", "--focus", "Security", "--format", "json",
            "--save",
        ]);
        let Command::Review(args) = cli.command else {
            panic!("expected review command");
        };
        assert_eq!(args.persona, Persona::Senior);
        assert_eq!(args.focus.as_deref(), Some("Security"));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.save);
        assert_eq!(args.language(), None);
    }

    #[test]
    fn explicit_language_wins() {
        let cli = parse(&["review", "x.py", "--language", "cython"]);
        let Command::Review(args) = cli.command else {
            panic!("expected review command");
        };
        assert_eq!(args.language().as_deref(), Some("cython"));
    }

    #[test]
    fn serve_overrides() {
        let cli = parse(&["serve", "--bind", "127.0.0.1:9999"]);
        let Command::Serve(args) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(args.bind.as_deref(), Some("127.0.0.1:9999"));
        assert!(args.history_path.is_none());
    }

    #[test]
    fn unknown_persona_is_rejected_on_cli() {
        let result = Cli::try_parse_from(["codelens", "review", "a.rs", "--persona", "boss"]);
        assert!(result.is_err());
    }
}
