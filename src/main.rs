use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use persona_quiz::history::{FjallBackend, HistoryError, HistoryStore};
use persona_quiz::quiz::{Answer, Category, QUIZZES, Question, QuizKind, ResponseMode};
use persona_quiz::result::{QuizOutcome, compute_result_from_categories};
use persona_quiz::session::{Countdown, DEFAULT_TIME_LIMIT, QuizSession, SessionError, Tick, WARNING_THRESHOLD};
use persona_quiz::{HistoryRecord, QuizError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History store error: {0}")]
    History(#[from] HistoryError),

    #[error("{0}")]
    Quiz(#[from] QuizError),

    #[error("{0}")]
    Session(#[from] SessionError),

    #[error("Not a valid answer: '{0}'")]
    InvalidAnswer(String),

    #[error("Input closed before the quiz was finished")]
    InputClosed,

    #[error("No history for quiz '{0}'")]
    NoHistory(String),
}

#[derive(Parser)]
#[command(name = "persona-quiz")]
#[command(about = "Take personality quizzes and keep a history of your results")]
struct Cli {
    /// Store path
    #[arg(long, global = true, default_value = ".persona-quiz", env = "PERSONA_QUIZ_PATH")]
    path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available quizzes
    Quizzes,

    /// Take a quiz interactively
    Take {
        /// Quiz to take: `major` or `animal` (or its identifier)
        quiz: QuizKind,

        /// Seconds allowed per question
        #[arg(long, default_value_t = DEFAULT_TIME_LIMIT)]
        time_limit: u32,

        /// Do not append the result to the history
        #[arg(long)]
        no_record: bool,
    },

    /// Compute a result from category tags without taking the quiz
    Result {
        /// Quiz the tags belong to
        #[arg(long)]
        kind: QuizKind,

        /// Category tags in answer order, e.g. `lion cat lion`
        categories: Vec<Category>,
    },

    /// Inspect or edit the result history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List all results, most recent first
    List,

    /// Show the most recent result of a quiz
    Latest {
        /// Quiz identifier, e.g. `animal-quiz`
        identifier: String,
    },

    /// Show aggregate statistics
    Stats,

    /// Delete every result
    Clear,

    /// Delete the result at a position of `history list`
    Delete {
        /// Zero-based position, most recent first
        index: usize,
    },
}

fn main() -> Result<(), AppError> {
    init_logging();

    let cli = Cli::parse();
    let open_store = || HistoryStore::open(&cli.path);

    match cli.command {
        Commands::Quizzes => {
            let store = open_store()?;
            for info in &QUIZZES {
                let marker = if store.has_completed(info.identifier) { "✓" } else { " " };
                println!(
                    "[{}] {} {} ({}, {} questions)",
                    marker,
                    info.emoji,
                    info.title,
                    info.identifier,
                    info.kind.questions().len()
                );
                println!("      {}", info.description);
            }
            Ok(())
        }
        Commands::Take {
            quiz,
            time_limit,
            no_record,
        } => {
            let store = if no_record { None } else { Some(open_store()?) };
            let input = spawn_stdin_reader();
            let outcome = take_quiz(quiz, time_limit, &input, store.as_ref())?;
            print_outcome(&outcome);
            Ok(())
        }
        Commands::Result { kind, categories } => {
            let category = compute_result_from_categories(&categories, kind)?;
            print_outcome(&QuizOutcome::new(category));
            Ok(())
        }
        Commands::History { action } => run_history(&open_store()?, action),
    }
}

fn run_history(store: &HistoryStore<FjallBackend>, action: HistoryAction) -> Result<(), AppError> {
    match action {
        HistoryAction::List => {
            let records = store.get_all();
            if records.is_empty() {
                println!("No quiz history yet");
            }
            for (i, record) in records.iter().enumerate() {
                print!("{:>3}. ", i);
                print_record(record);
            }
            Ok(())
        }
        HistoryAction::Latest { identifier } => {
            let record = store
                .get_latest(&identifier)
                .ok_or(AppError::NoHistory(identifier))?;
            print_record(&record);
            Ok(())
        }
        HistoryAction::Stats => {
            let stats = store.get_statistics();
            println!("Quizzes taken:  {}", stats.total_count);
            println!("Unique quizzes: {}", stats.unique_quiz_count);
            println!("Total time:     {} min", stats.total_minutes());
            Ok(())
        }
        HistoryAction::Clear => {
            store.clear_all()?;
            println!("History cleared");
            Ok(())
        }
        HistoryAction::Delete { index } => {
            match store.delete_at(index)? {
                Some(record) => println!("Deleted {} {} ({})", record.result_emoji, record.result, record.quiz_title),
                None => println!("Nothing at position {}", index),
            }
            Ok(())
        }
    }
}

/// Run one quiz against lines arriving on `input`.
fn take_quiz(
    kind: QuizKind,
    time_limit: u32,
    input: &Receiver<String>,
    store: Option<&HistoryStore<FjallBackend>>,
) -> Result<QuizOutcome, AppError> {
    let info = kind.info();
    println!("{} {}", info.emoji, info.title);
    println!("{}", info.description);

    let mut session = QuizSession::new(kind, rand::thread_rng());
    let mut countdown = Countdown::new(time_limit);

    while let Some(question) = session.current().cloned() {
        let (index, total) = session.position();
        println!();
        println!("Question {} of {} ({}s)", index + 1, total, countdown.budget());
        print_question(&question);
        prompt(&question)?;

        if let Answered::TimedOut(picked) = answer_current(&mut session, &question, input, &mut countdown)? {
            println!("⏰ Time's up! Picked: {}", picked.text);
        }
    }

    let completion = session.finish(chrono::Utc::now())?;
    if let Some(store) = store {
        // The result is still shown when the history write fails.
        if let Err(e) = store.append(completion.record) {
            tracing::warn!(error = %e, "result not saved to history");
            eprintln!("Warning: result not saved to history: {}", e);
        }
    }
    Ok(completion.outcome)
}

/// How the current question was settled.
#[derive(Debug, PartialEq)]
enum Answered {
    Chosen,
    TimedOut(Answer),
}

/// Wait for a valid answer to `question`, or pick one when the countdown expires.
///
/// Seconds are counted on the wall clock, whatever input arrives meanwhile.
fn answer_current<R: rand::Rng>(
    session: &mut QuizSession<R>,
    question: &Question,
    input: &Receiver<String>,
    countdown: &mut Countdown,
) -> Result<Answered, AppError> {
    const SECOND: Duration = Duration::from_secs(1);

    countdown.reset();
    let mut next_tick = Instant::now() + SECOND;
    loop {
        let wait = next_tick.saturating_duration_since(Instant::now());
        match input.recv_timeout(wait) {
            Ok(line) => match submit(session, question, line.trim()) {
                Ok(()) => return Ok(Answered::Chosen),
                Err(e) => {
                    println!("{}", e);
                    prompt(question)?;
                }
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Err(AppError::InputClosed),
        }

        while Instant::now() >= next_tick {
            next_tick += SECOND;
            match countdown.tick() {
                Tick::Running(_) => {}
                Tick::Warning(n) => {
                    if n == WARNING_THRESHOLD || n <= 3 {
                        println!("⏳ {}s left", n);
                    }
                }
                Tick::Expired => {
                    return Ok(Answered::TimedOut(session.time_out()?));
                }
            }
        }
    }
}

/// Apply one line of user input to the current question.
fn submit<R: rand::Rng>(
    session: &mut QuizSession<R>,
    question: &Question,
    line: &str,
) -> Result<(), AppError> {
    match question.mode {
        ResponseMode::Single => {
            let choice = parse_choice(line, question.answers.len())?;
            session.answer_single(choice)?;
        }
        ResponseMode::Multiple => {
            let choices = line
                .split([',', ' '])
                .filter(|s| !s.is_empty())
                .map(|s| parse_choice(s, question.answers.len()))
                .collect::<Result<Vec<_>, _>>()?;
            session.answer_multiple(&choices)?;
        }
        ResponseMode::Ranged => {
            let percent: f32 = line.parse().map_err(|_| invalid_input(line))?;
            session.answer_ranged(percent / 100.0)?;
        }
    }
    Ok(())
}

/// Parse a 1-based answer number into an index.
fn parse_choice(s: &str, len: usize) -> Result<usize, AppError> {
    match s.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Ok(n - 1),
        _ => Err(invalid_input(s)),
    }
}

fn invalid_input(s: &str) -> AppError {
    AppError::InvalidAnswer(s.to_string())
}

fn print_question(question: &Question) {
    println!("{}", question.text);
    match question.mode {
        ResponseMode::Ranged => {
            if let Some((low, high)) = question.ranged_labels() {
                println!("  0 = {}   100 = {}", low, high);
            }
        }
        ResponseMode::Single | ResponseMode::Multiple => {
            for (i, answer) in question.answers.iter().enumerate() {
                println!("  {}. {}", i + 1, answer.text);
            }
        }
    }
}

fn prompt(question: &Question) -> std::io::Result<()> {
    let hint = match question.mode {
        ResponseMode::Single => "pick one",
        ResponseMode::Multiple => "pick any, e.g. 1,3 (empty for none)",
        ResponseMode::Ranged => "0-100",
    };
    print!("[{}] > ", hint);
    std::io::stdout().flush()
}

fn print_outcome(outcome: &QuizOutcome) {
    println!();
    println!("{} {}", outcome.emoji, outcome.headline);
    println!("{}", outcome.definition);
    for score in &outcome.traits {
        let filled = (score.percent() / 5) as usize;
        println!(
            "  {:<20} {}{} {}%",
            score.label,
            "█".repeat(filled),
            "░".repeat(20usize.saturating_sub(filled)),
            score.percent()
        );
    }
}

fn print_record(record: &HistoryRecord) {
    println!(
        "{} {} - {} ({}, {})",
        record.result_emoji,
        record.result,
        record.quiz_title,
        record.formatted_date(),
        record.formatted_time()
    );
}

/// Forward stdin lines over a channel so the countdown can wait with a timeout.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("PERSONA_QUIZ_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber installed elsewhere wins.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
