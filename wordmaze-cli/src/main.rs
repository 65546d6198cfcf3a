mod boards;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

use boards::{BoardSpec, EmbeddedWords, WordFile, catalog, pick_board};
use wordmaze_game::{
    Difficulty, GameEngine, GameSession, HelpOutcome, ScoringConfig, SessionSummary,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    /// Roomy boards, three helps, relaxed hint pacing
    Easy,
    /// Two helps, quicker hints
    Medium,
    /// One help and hints barely linger
    Hard,
}

impl DifficultyArg {
    const fn to_difficulty(self) -> Difficulty {
        match self {
            Self::Easy => Difficulty::Easy,
            Self::Medium => Difficulty::Medium,
            Self::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "wordmaze", version)]
#[command(about = "Wordmaze - escape a lettered labyrinth by walking its words")]
struct Args {
    /// Difficulty: picks the board pool, word list, and help budget
    #[arg(long, value_enum, default_value_t = DifficultyArg::Easy)]
    difficulty: DifficultyArg,

    /// Seed for the board pick
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Play a specific board by name instead of a seeded pick
    #[arg(long)]
    board: Option<String>,

    /// List all embedded boards and exit
    #[arg(long)]
    list_boards: bool,

    /// Word list file overriding the embedded list (one word per line, '#' comments)
    #[arg(long)]
    words: Option<PathBuf>,

    /// Scoring weights file (JSON) overriding the defaults
    #[arg(long)]
    scoring: Option<PathBuf>,

    /// Scripted commands separated by ';' instead of reading stdin
    #[arg(long)]
    commands: Option<String>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "console"])]
    report: String,

    /// Optional path to write the report instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_boards(&args)? {
        return Ok(());
    }

    render::banner();
    println!("{}", render::CONTROLS.cyan());

    let board = pick_board(
        args.difficulty.to_difficulty(),
        args.seed,
        args.board.as_deref(),
    )?;
    info!(
        "board '{}' selected at difficulty {}",
        board.name, board.difficulty
    );
    println!(
        "Board: {} ({} cells, {})",
        board.name,
        board.vertices.len(),
        board.difficulty
    );

    let scoring = load_scoring(args.scoring.as_deref())?;
    let mut session = build_session(&args, board, scoring)?;
    session.start();

    match &args.commands {
        Some(script) => play_scripted(&mut session, script),
        None => play_interactive(&mut session)?,
    }

    let report = report_from(board, args.seed, &session);
    write_report(&args, &report)
}

fn maybe_list_boards(args: &Args) -> Result<bool> {
    if !args.list_boards {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Embedded boards:")?;
    for board in catalog() {
        writeln!(
            output_target.writer(),
            "  {:10} - {} cells, {}",
            board.name,
            board.vertices.len(),
            board.difficulty
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn load_scoring(path: Option<&Path>) -> Result<ScoringConfig> {
    let Some(path) = path else {
        return Ok(ScoringConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let scoring = ScoringConfig::from_json(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    scoring.validate()?;
    Ok(scoring)
}

/// The board's own difficulty governs the word list and help budget;
/// `--difficulty` only steers the seeded pick.
fn build_session(args: &Args, board: &BoardSpec, scoring: ScoringConfig) -> Result<GameSession> {
    let graph = board
        .to_graph()
        .with_context(|| format!("board '{}' is malformed", board.name))?;
    let session = match &args.words {
        Some(path) => GameEngine::new(WordFile::new(path.clone()))
            .with_scoring(scoring)
            .new_session(graph, board.difficulty)?,
        None => GameEngine::new(EmbeddedWords::new(board.difficulty))
            .with_scoring(scoring)
            .new_session(graph, board.difficulty)?,
    };
    Ok(session)
}

/// Run one command through the session, echoing each processed character.
/// Returns true when the run ended.
fn drive(session: &mut GameSession, command: &str) -> bool {
    let outcome = session.submit(command);
    for step in &outcome.steps {
        render::print_step(step);
    }
    if outcome.steps.is_empty() {
        render::print_message(session.message());
    }
    if !outcome.ended {
        render::print_status(session);
    }
    outcome.ended
}

fn request_help(session: &mut GameSession) {
    match session.request_help() {
        HelpOutcome::Granted {
            paths,
            hold,
            cost: _,
        } => {
            render::print_message(session.message());
            render::show_hints(session.graph(), &paths, hold);
            render::print_status(session);
        }
        HelpOutcome::Exhausted | HelpOutcome::NotRunning => {
            render::print_message(session.message());
        }
    }
}

fn play_scripted(session: &mut GameSession, script: &str) {
    render::print_message(session.message());
    render::print_status(session);
    for command in script.split(';').map(str::trim).filter(|c| !c.is_empty()) {
        debug!("scripted command: {command}");
        match command {
            "quit" | "exit" => break,
            "help" | "h" => request_help(session),
            _ => {
                if drive(session, command) {
                    break;
                }
            }
        }
    }
}

fn play_interactive(session: &mut GameSession) -> Result<()> {
    render::print_message(session.message());
    render::print_status(session);
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let command = line.trim();
        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" | "h" => request_help(session),
            _ => {
                if drive(session, command) {
                    break;
                }
            }
        }
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
struct GameReport {
    board: String,
    seed: u64,
    #[serde(flatten)]
    summary: SessionSummary,
}

fn report_from(board: &BoardSpec, seed: u64, session: &GameSession) -> GameReport {
    GameReport {
        board: board.name.clone(),
        seed,
        summary: session.summary(),
    }
}

const fn outcome_label(summary: &SessionSummary) -> &'static str {
    if !summary.finished {
        "abandoned"
    } else if summary.won {
        "won"
    } else {
        "lost"
    }
}

fn format_words(words: &[String]) -> String {
    if words.is_empty() {
        "none".to_string()
    } else {
        words.join(", ")
    }
}

fn write_console_report(out: &mut dyn Write, report: &GameReport) -> io::Result<()> {
    let summary = &report.summary;
    writeln!(out, "Run summary")?;
    writeln!(out, "  board      : {} (seed {})", report.board, report.seed)?;
    writeln!(out, "  difficulty : {}", summary.difficulty)?;
    writeln!(out, "  outcome    : {}", outcome_label(summary))?;
    writeln!(out, "  score      : {}", summary.score)?;
    writeln!(
        out,
        "  moves      : {} accepted (shortest route {})",
        summary.accepted_moves, summary.shortest_edges
    )?;
    writeln!(out, "  words      : {}", format_words(&summary.words_found))?;
    writeln!(out, "  helps used : {}", summary.helps_used)?;
    Ok(())
}

fn write_report(args: &Args, report: &GameReport) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => {
            serde_json::to_writer_pretty(&mut output_target, report)?;
            writeln!(&mut output_target)?;
        }
        _ => write_console_report(&mut output_target, report)?,
    }
    output_target
        .flush_inner()
        .context("failed to flush report output")
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
