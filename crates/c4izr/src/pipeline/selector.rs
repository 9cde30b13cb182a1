//! Main-system selector
//!
//! Chooses the label that marks "the" system under description. Selection
//! is by label value: every vertex whose label equals the chosen one is
//! styled as main, so duplicate labels are never disambiguated.
//!
//! Console I/O is behind the [`Prompt`] trait so the validation rules can be
//! exercised without a terminal.

use std::collections::{HashSet, VecDeque};
use std::io::{self, BufRead, Write};

use tracing::{info, span, warn, Level};

/// Line-oriented console used by the interactive selection
pub trait Prompt {
    /// Show a line of text to the operator
    fn show(&mut self, message: &str);

    /// Read one line of input; None means the input stream has ended
    fn read_line(&mut self) -> Option<String>;
}

/// Prompt backed by a reader and a writer, normally stdin and stderr
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompt<io::BufReader<io::Stdin>, io::Stderr> {
    /// Prompt on the process console
    ///
    /// Stdin is only locked for the duration of each read.
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompt and return the writer
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompt for ConsolePrompt<R, W> {
    fn show(&mut self, message: &str) {
        if writeln!(self.output, "{}", message).is_err() {
            warn!("Could not write prompt to console");
        }
        let _ = self.output.flush();
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(e) => {
                warn!(error = %e, "Reading selection failed");
                None
            }
        }
    }
}

/// Prompt that replays pre-supplied answers and records what it was shown
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    shown: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            shown: Vec::new(),
        }
    }

    /// Messages shown so far, in order
    pub fn shown(&self) -> &[String] {
        &self.shown
    }

    /// Answers not yet consumed
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompt for ScriptedPrompt {
    fn show(&mut self, message: &str) {
        self.shown.push(message.to_string());
    }

    fn read_line(&mut self) -> Option<String> {
        self.answers.pop_front()
    }
}

/// Outcome of the main-system selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// 1-based position of the chosen vertex in encounter order
    pub index: usize,
    /// Label compared against every vertex's label
    pub label: String,
    /// Whether the candidate labels were not pairwise unique
    pub duplicate_labels: bool,
}

/// Interpretation of one line of operator input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Empty line: take the first vertex
    Default,
    /// A valid 1-based index
    Index(usize),
    /// A number outside `1..=count`
    OutOfRange,
    /// Anything that is not a plain decimal number
    Invalid,
}

/// Validate one line of input against `count` candidates
pub fn parse_choice(line: &str, count: usize) -> Choice {
    let key = line.trim();
    if key.is_empty() {
        return Choice::Default;
    }
    if !key.chars().all(|c| c.is_ascii_digit()) {
        return Choice::Invalid;
    }
    match key.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Choice::Index(n),
        _ => Choice::OutOfRange,
    }
}

/// True if some label occurs more than once
pub fn has_duplicate_labels<S: AsRef<str>>(labels: &[S]) -> bool {
    let mut seen = HashSet::with_capacity(labels.len());
    !labels.iter().all(|label| seen.insert(label.as_ref()))
}

/// Resolve the main-system label
///
/// In interactive mode the candidates are listed on the prompt and input is
/// re-requested until it is valid; an empty line or the end of input picks
/// the first vertex. Non-interactive mode picks the first vertex directly.
/// Returns None only when there are no candidates.
pub fn select_main_system<S: AsRef<str>>(
    labels: &[S],
    interactive: bool,
    prompt: &mut dyn Prompt,
) -> Option<Selection> {
    let select_span = span!(
        Level::INFO,
        "select_main_system",
        candidates = labels.len(),
        interactive
    );
    let _enter = select_span.enter();

    if labels.is_empty() {
        return None;
    }
    let duplicate_labels = has_duplicate_labels(labels);

    if !interactive {
        let label = labels[0].as_ref().to_string();
        info!(system = %label, "Non-interactive mode: automatically selected main system");
        return Some(Selection {
            index: 1,
            label,
            duplicate_labels,
        });
    }

    prompt.show("Found:");
    for (ix, label) in labels.iter().enumerate() {
        prompt.show(&format!(" {}. {}", ix + 1, label.as_ref()));
    }
    if duplicate_labels {
        warn!(
            "Duplicate system names found. \
             Selecting a duplicated system will mark all of them as main system."
        );
        prompt.show(
            "Warning: duplicate system names found; \
             selecting one marks all of them as main system.",
        );
    }
    prompt.show("Select main system by entering the number: (default: 1)");

    let index = loop {
        let Some(line) = prompt.read_line() else {
            info!("Input interrupted. Using default value 1.");
            break 1;
        };
        match parse_choice(&line, labels.len()) {
            Choice::Default => break 1,
            Choice::Index(n) => break n,
            Choice::OutOfRange => {
                prompt.show(&format!(
                    "Please enter a number between 1 and {}",
                    labels.len()
                ));
            }
            Choice::Invalid => {
                prompt.show("Please enter a valid number or press Enter for default");
            }
        }
    };

    let label = labels[index - 1].as_ref().to_string();
    info!(index, system = %label, "Selected main system");
    Some(Selection {
        index,
        label,
        duplicate_labels,
    })
}
