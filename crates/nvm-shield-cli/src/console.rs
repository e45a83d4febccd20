//! Colorized one-line console messages.

use colored::{ColoredString, Colorize};
use nvm_shield_core::Outcome;

/// Fixed prefix on every message
pub const TAG: &str = "(NVM-Shield):";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Failure,
}

impl Tone {
    fn paint(self, body: String) -> ColoredString {
        match self {
            Tone::Success => body.bold().white().on_green(),
            Tone::Warning => body.bold().black().on_yellow(),
            Tone::Failure => body.bold().white().on_red(),
        }
    }
}

pub fn tone_for(outcome: &Outcome) -> Tone {
    match outcome {
        Outcome::NoVersionSource => Tone::Warning,
        Outcome::LockDrifted { .. } => Tone::Failure,
        _ => Tone::Success,
    }
}

/// Render `message` behind the program tag.
pub fn line(tone: Tone, message: &str) -> String {
    let tag = format!(" {} ", TAG).bold().white().on_blue();
    format!("{}{}", tag, tone.paint(format!(" {} ", message)))
}

/// Print the verdict line. Failures go to stderr, everything else to stdout.
pub fn report(outcome: &Outcome) {
    let tone = tone_for(outcome);
    let text = line(tone, &outcome.to_string());
    if tone == Tone::Failure {
        eprintln!("{}", text);
    } else {
        println!("{}", text);
    }
}

pub fn failure(message: &str) {
    eprintln!("{}", line(Tone::Failure, message));
}
