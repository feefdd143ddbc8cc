//! Command-line argument definitions.
//!
//! All `#[derive(Parser)]` / `#[derive(Subcommand)]` types live here so that
//! `main.rs` only does dispatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use language_quiz::quiz::{Difficulty, TestType};
use language_quiz::speech::{Speaker, TtsVoice};

/// Generate, edit and export language-learning quizzes
#[derive(Parser)]
#[command(name = "language-quiz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Settings file to use instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Generate a quiz session from a script, a passage or an audio file
    Generate(GenerateArgs),

    /// Apply edits to a saved quiz session
    Edit(EditArgs),

    /// Write the HTML quiz and the answer key for a session
    Export {
        /// Session file written by `generate`
        session: PathBuf,

        /// Directory for the exported files
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Stylesheet linked from the HTML page (default: from settings)
        #[arg(long)]
        stylesheet: Option<String>,
    },

    /// Wrap a raw PCM file in a WAV header
    PackWav {
        /// Raw little-endian PCM input
        input: PathBuf,

        /// WAV file to write
        output: PathBuf,

        /// Sample rate in Hz (default: from settings)
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Channel count (default: from settings)
        #[arg(long)]
        channels: Option<u16>,

        /// Bits per sample (default: from settings)
        #[arg(long)]
        bits: Option<u16>,
    },

    /// List the narration voices
    Voices,

    /// Write a settings file with the default values
    InitConfig {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Test title
    #[arg(long)]
    pub title: String,

    /// Author shown on the quiz
    #[arg(long, default_value = "")]
    pub author: String,

    /// listening or reading (default: from settings)
    #[arg(long)]
    pub test_type: Option<TestType>,

    /// easy, medium or hard (default: from settings)
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Number of questions (default: from settings)
    #[arg(short = 'n', long)]
    pub questions: Option<u32>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Narrator voice for single-speaker narration (default: from settings)
    #[arg(long)]
    pub voice: Option<TtsVoice>,

    /// Dialogue speaker as NAME=VOICE; give exactly two for two-person narration
    #[arg(long = "speaker", value_parser = parse_speaker)]
    pub speakers: Vec<Speaker>,

    /// Pick dialogue voices from the speakers' names
    #[arg(long)]
    pub auto_voice: bool,

    /// MIME type of the audio file (default: guessed from the extension)
    #[arg(long)]
    pub mime: Option<String>,

    /// Session file to write
    #[arg(short, long, default_value = "quiz.json")]
    pub output: PathBuf,

    /// Also export the HTML quiz and answer key into this directory
    #[arg(long)]
    pub export_dir: Option<PathBuf>,
}

/// Exactly one content source.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub(crate) struct SourceArgs {
    /// Text file used as-is (listening script or reading passage)
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Script file to narrate before generating questions
    #[arg(long)]
    pub narrate: Option<PathBuf>,

    /// Pre-recorded audio file
    #[arg(long)]
    pub audio: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct EditArgs {
    /// Session file to edit in place
    pub session: PathBuf,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New author
    #[arg(long)]
    pub author: Option<String>,

    /// Replace the reading passage with this file's contents
    #[arg(long)]
    pub passage_file: Option<PathBuf>,

    /// Question to edit, numbered from 1
    #[arg(short, long)]
    pub question: Option<usize>,

    /// New question text
    #[arg(long, requires = "question")]
    pub text: Option<String>,

    /// Replace an option as N=TEXT, options numbered from 1
    #[arg(long = "option", value_parser = parse_option_edit, requires = "question")]
    pub options: Vec<(usize, String)>,

    /// Number of the correct option, from 1
    #[arg(long, requires = "question")]
    pub correct: Option<usize>,

    /// New explanation
    #[arg(long, requires = "question")]
    pub explanation: Option<String>,
}

// ---------------------------------------------------------------------------
// Value parsers
// ---------------------------------------------------------------------------

fn parse_speaker(s: &str) -> Result<Speaker, String> {
    let (name, voice) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VOICE, got `{s}`"))?;
    Ok(Speaker::new(name.trim(), voice.parse()?))
}

fn parse_option_edit(s: &str) -> Result<(usize, String), String> {
    let (number, text) = s
        .split_once('=')
        .ok_or_else(|| format!("expected N=TEXT, got `{s}`"))?;
    let number: usize = number
        .trim()
        .parse()
        .map_err(|_| format!("option number must be a positive integer, got `{number}`"))?;
    if number == 0 {
        return Err("options are numbered from 1".into());
    }
    Ok((number, text.to_string()))
}
