// Interactive prompts for registering training drills into a training CSV.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use coach_core::position::Position;
use coach_core::training::{TrainingEntry, TrainingError, TrainingRepository};

/// Directory every training file lives in, relative to the working directory.
pub const TRAINING_DIR: &str = "data/training/";

pub const WELCOME: &str = "\
Welcome! Enter the training filename first so the drills can be saved properly.

You will be asked for drills one at a time until you choose not to continue.
The file is always stored under 'data/training/', so the directory and the
'.csv' extension can be left out.
Type '\\n' to start a new line inside a description.
";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("input closed before the entry was complete")]
    InputClosed,

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Training(#[from] TrainingError),
}

/// Place `filename` under `TRAINING_DIR` and give it a `.csv` extension
/// unless it already has either.
pub fn training_file_name(filename: &str) -> String {
    let mut name = filename.trim().to_string();
    if !name.starts_with(TRAINING_DIR) {
        name = format!("{TRAINING_DIR}{name}");
    }
    if !name.ends_with(".csv") {
        name.push_str(".csv");
    }
    name
}

/// Line-oriented prompter over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `label`, read one line. `None` once input is exhausted.
    fn ask(&mut self, label: &str) -> Result<Option<String>, SessionError> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn require(&mut self, label: &str) -> Result<String, SessionError> {
        self.ask(label)?.ok_or(SessionError::InputClosed)
    }

    pub fn say(&mut self, message: &str) -> Result<(), SessionError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    pub fn read_filename(&mut self) -> Result<String, SessionError> {
        let raw = self.require("Enter training filename")?;
        Ok(training_file_name(&raw))
    }

    /// Ask until the answer names a known position.
    fn read_position(&mut self) -> Result<Position, SessionError> {
        loop {
            let raw = self.require("Position")?;
            match raw.parse::<Position>() {
                Ok(position) => return Ok(position),
                Err(e) => self.say(&e.to_string())?,
            }
        }
    }

    /// Prompt for one drill.
    pub fn read_entry(&mut self) -> Result<TrainingEntry, SessionError> {
        let name = self.require("Name")?;
        let description = self.require("Description")?.replace("\\n", "\n");
        let position = self.read_position()?;
        let attributes = self
            .require("Attributes [separated by comma (,)]")?
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect();
        Ok(TrainingEntry::new(name.trim(), description, position.as_str(), attributes))
    }

    /// Anything but `n` continues; so does an empty answer.
    pub fn wants_more(&mut self) -> Result<bool, SessionError> {
        match self.ask("Continue [Y|n]")? {
            Some(answer) => Ok(!answer.trim().eq_ignore_ascii_case("n")),
            None => Ok(false),
        }
    }
}

/// Run a full session rooted at `root`: welcome, filename, drills until the
/// user stops, then save. Returns the saved file and its entry count.
pub fn run_session<R: BufRead, W: Write>(
    input: R,
    output: W,
    root: &Path,
) -> Result<(PathBuf, usize), SessionError> {
    let mut prompter = Prompter::new(input, output);
    prompter.say(WELCOME)?;

    let path = root.join(prompter.read_filename()?);
    let mut repository = TrainingRepository::load(&path)?;
    loop {
        let entry = prompter.read_entry()?;
        info!("registered training `{}`", entry.name);
        repository.add(entry, false)?;
        if !prompter.wants_more()? {
            break;
        }
    }

    repository.save()?;
    prompter.say(&format!(
        "Saved {} training entries to {}",
        repository.len(),
        path.display()
    ))?;
    Ok((path, repository.len()))
}
