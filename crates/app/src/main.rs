use std::fmt;
use std::io;
use std::path::PathBuf;

use log::info;
use services::{DEFAULT_ROUND_SIZE, LeaderboardStore, QuizSession, RoundBuilder};
use storage::QuestionSource;
use storage::json::JsonQuestionBank;
use storage::repository::Storage;

mod terminal;

use terminal::{Terminal, render_leaderboard};

const DEFAULT_LEADERBOARD_PATH: &str = "leaderboard.json";
const EMBEDDED_QUESTIONS: &str = include_str!("../data/questions.json");

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidRoundSize { raw: String },
    InvalidPath { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidRoundSize { raw } => write!(f, "invalid --round-size value: {raw}"),
            ArgsError::InvalidPath { flag, raw } => write!(f, "invalid {flag} value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play        [--leaderboard <path>] [--questions <path>] [--round-size <n>]");
    eprintln!("  cargo run -p app -- leaderboard [--leaderboard <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --leaderboard {DEFAULT_LEADERBOARD_PATH}");
    eprintln!("  --questions   built-in question bank");
    eprintln!("  --round-size  {DEFAULT_ROUND_SIZE}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRIVIA_LEADERBOARD, TRIVIA_QUESTIONS, TRIVIA_ROUND_SIZE, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Leaderboard,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "leaderboard" => Some(Self::Leaderboard),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    leaderboard_path: PathBuf,
    questions_path: Option<PathBuf>,
    round_size: usize,
}

fn parse_round_size(raw: String) -> Result<usize, ArgsError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ArgsError::InvalidRoundSize { raw }),
    }
}

fn parse_path(flag: &'static str, raw: String) -> Result<PathBuf, ArgsError> {
    if raw.trim().is_empty() {
        return Err(ArgsError::InvalidPath { flag, raw });
    }
    Ok(PathBuf::from(raw))
}

impl Args {
    /// Flags win over environment values, which win over defaults.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut leaderboard_path = env("TRIVIA_LEADERBOARD")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_LEADERBOARD_PATH), PathBuf::from);
        let mut questions_path = env("TRIVIA_QUESTIONS")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let mut round_size = match env("TRIVIA_ROUND_SIZE") {
            Some(raw) => parse_round_size(raw)?,
            None => DEFAULT_ROUND_SIZE,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--leaderboard" => {
                    let value = require_value(args, "--leaderboard")?;
                    leaderboard_path = parse_path("--leaderboard", value)?;
                }
                "--questions" => {
                    let value = require_value(args, "--questions")?;
                    questions_path = Some(parse_path("--questions", value)?);
                }
                "--round-size" => {
                    let value = require_value(args, "--round-size")?;
                    round_size = parse_round_size(value)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            leaderboard_path,
            questions_path,
            round_size,
        })
    }
}

fn parse_command(argv: &mut Vec<String>) -> Result<Command, ArgsError> {
    // Default behavior: play when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => return Ok(Command::Play),
        Some(first) if first.starts_with('-') => return Ok(Command::Play),
        Some(first) => {
            Command::from_arg(first).ok_or_else(|| ArgsError::UnknownArg(first.to_string()))?
        }
    };
    argv.remove(0);
    Ok(cmd)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();
    if matches!(argv.first().map(String::as_str), Some("--help" | "-h")) {
        print_usage();
        return Ok(());
    }

    let (cmd, parsed) = parse_command(&mut argv)
        .and_then(|cmd| {
            let mut iter = argv.into_iter();
            Args::parse(&mut iter, |key| std::env::var(key).ok()).map(|args| (cmd, args))
        })
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;

    let storage = Storage::json_file(&parsed.leaderboard_path);
    info!("using leaderboard at {}", parsed.leaderboard_path.display());
    let mut store = LeaderboardStore::open(storage.leaderboard);

    match cmd {
        Command::Play => {
            let bank = match &parsed.questions_path {
                Some(path) => {
                    info!("loading questions from {}", path.display());
                    JsonQuestionBank::from_path(path)
                }
                None => JsonQuestionBank::embedded(EMBEDDED_QUESTIONS),
            };
            let mut session =
                QuizSession::new(RoundBuilder::new().with_round_size(parsed.round_size));

            let stdin = io::stdin();
            let mut terminal = Terminal::new(stdin.lock(), io::stdout());
            terminal.play(&mut session, &mut store, &bank as &dyn QuestionSource)?;
            Ok(())
        }
        Command::Leaderboard => {
            render_leaderboard(&mut io::stdout(), &store, None)?;
            Ok(())
        }
    }
}

fn main() {
    pretty_env_logger::init();
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
