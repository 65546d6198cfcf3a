//! Console rendering: banner, status lines, step echoes, hint highlights.
//!
//! Everything here turns the engine's typed payloads into text; no game
//! rules live in this module.

use colored::{Color, ColoredString, Colorize};
use std::io::Write;
use std::thread;
use std::time::Duration;

use wordmaze_game::{GameSession, Graph, HintPath, StatusMessage, StepRecord};

/// Highlight palette cycled by hint group key.
const HINT_COLORS: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

pub const CONTROLS: &str =
    "Move with q/w/e, a/d, z/s/c around your cell; chain several moves in one command. \
     'help' buys hints, 'quit' abandons the run.";

pub fn banner() {
    println!("{}", "🌀 Wordmaze".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

/// One line of game state: score, collected letters, cell, exits.
#[must_use]
pub fn status_line(session: &GameSession) -> String {
    let exits: Vec<String> = session
        .graph()
        .exits(session.position())
        .iter()
        .map(|(direction, to)| format!("{}→{}", direction.symbol(), session.graph().label(*to)))
        .collect();
    format!(
        "score {:>5} | letters \"{}\" | cell '{}' | exits {}",
        session.score(),
        session.collected(),
        session.current_label(),
        exits.join("  ")
    )
}

pub fn print_status(session: &GameSession) {
    println!("{}", status_line(session).bold());
}

fn message_line(message: &StatusMessage) -> ColoredString {
    match message {
        StatusMessage::Ready => "Find your way out, one letter at a time.".cyan(),
        StatusMessage::KeepGoing => "Keep going! (≧▽≦)".green(),
        StatusMessage::WordCompleted { word, points } => {
            format!("You found the word '{word}'! +{points}")
                .bright_green()
                .bold()
        }
        StatusMessage::DeadEnd => "Dead end ahead; back you go.".red(),
        StatusMessage::BrokenPrefix { attempted } => {
            format!("No word starts with '{attempted}'; back you go.").red()
        }
        StatusMessage::InvalidMove { symbol, penalty } => {
            format!("Invalid move '{symbol}'! -{penalty} points, command dropped.")
                .red()
                .bold()
        }
        StatusMessage::Victory {
            score,
            shortest_bonus,
        } => {
            let tail = if *shortest_bonus {
                ", shortest route bonus included"
            } else {
                ""
            };
            format!("🎉 Congratulations, you won! Final score {score}{tail}.")
                .bright_green()
                .bold()
        }
        StatusMessage::Defeat {
            score,
            shortest_bonus,
        } => {
            let tail = if *shortest_bonus {
                ", shortest route bonus included"
            } else {
                ""
            };
            format!("You lost the game. Final score {score}{tail}.")
                .bright_red()
                .bold()
        }
        StatusMessage::HelpGranted { cost, paths } => {
            format!("Help costs {cost} points; showing {paths} routes.").cyan()
        }
        StatusMessage::HelpExhausted => "No help left at this difficulty.".yellow(),
        StatusMessage::NotRunning => "The game is not running.".yellow(),
    }
}

pub fn print_message(message: &StatusMessage) {
    println!("{}", message_line(message));
}

/// Echo one processed command character with its outcome.
pub fn print_step(step: &StepRecord) {
    println!(
        "  {}  {}",
        step.symbol.to_string().bold(),
        message_line(&step.status)
    );
}

/// Uncolored hint route text, e.g. `route 1: c → a → t`.
#[must_use]
pub fn route_line(graph: &Graph, hint: &HintPath) -> String {
    let labels: Vec<String> = hint
        .path
        .vertices()
        .iter()
        .map(|id| graph.label(*id).to_string())
        .collect();
    format!("route {}: {}", hint.group + 1, labels.join(" → "))
}

/// Show each hint route in its group color, hold it, then wipe the line.
/// Blocking; the difficulty sets the pacing.
pub fn show_hints(graph: &Graph, paths: &[HintPath], hold: Duration) {
    for hint in paths {
        let color = HINT_COLORS[hint.group % HINT_COLORS.len()];
        let line = route_line(graph, hint);
        print!("{}", line.color(color).bold());
        let _ = std::io::stdout().flush();
        thread::sleep(hold);
        print!("\r{}\r", " ".repeat(line.chars().count()));
    }
    println!("{}", format!("{} routes shown.", paths.len()).cyan());
}
