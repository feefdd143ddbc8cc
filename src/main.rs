//! Application entry point for the language quiz generator.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Parse the command line.
//! 3. Load [`AppConfig`] (defaults on first run or when the file is unreadable).
//! 4. Dispatch the subcommand. Only `generate` builds a [`GeminiClient`]; it
//!    is created once and shared by `Arc` with the pipeline.

mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;

use language_quiz::{
    audio::{self, WavFormat},
    config::{AppConfig, AppPaths},
    export::{self, HtmlOptions},
    genai::GeminiClient,
    pipeline::{GenerationRequest, GenerationStage, QuizPipeline, QuizSession, QuizSource},
    quiz::{QuizEditor, TestType},
    speech::{auto_assign_voices, Speaker, SpeakerConfig, TtsVoice},
};

use cli::{Cli, Commands, EditArgs, GenerateArgs};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Command line
    let cli = Cli::parse();

    // 3. Configuration
    let config = load_config(cli.config.as_deref());

    // 4. Dispatch
    match cli.command {
        Commands::Generate(args) => generate(args, &config).await,
        Commands::Edit(args) => edit(args),
        Commands::Export {
            session,
            out_dir,
            stylesheet,
        } => export_session(&session, &out_dir, stylesheet.as_deref(), &config),
        Commands::PackWav {
            input,
            output,
            sample_rate,
            channels,
            bits,
        } => {
            let base = config.audio.wav_format();
            let format = WavFormat::new(
                sample_rate.unwrap_or(base.sample_rate),
                channels.unwrap_or(base.channels),
                bits.unwrap_or(base.bits_per_sample),
            );
            pack_wav(&input, &output, &format)
        }
        Commands::Voices => {
            list_voices(config.generation.default_voice);
            Ok(())
        }
        Commands::InitConfig { force } => init_config(cli.config.as_deref(), force),
    }
}

fn load_config(path: Option<&Path>) -> AppConfig {
    let loaded = match path {
        Some(p) => AppConfig::load_from(p),
        None => AppConfig::load(),
    };
    loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    })
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

async fn generate(args: GenerateArgs, config: &AppConfig) -> Result<()> {
    let client = Arc::new(GeminiClient::from_config(&config.genai)?);
    log::debug!("using {client:?}");

    let mut rng = StdRng::from_entropy();
    let source = if let Some(path) = &args.source.script {
        QuizSource::Script(read_text(path)?)
    } else if let Some(path) = &args.source.narrate {
        let voice = args.voice.unwrap_or(config.generation.default_voice);
        let mut speakers = speaker_config(voice, args.speakers)?;
        if args.auto_voice {
            speakers = auto_assign_voices(speakers, client.as_ref(), &mut rng).await;
        }
        QuizSource::Narrated {
            script: read_text(path)?,
            speakers,
        }
    } else if let Some(path) = &args.source.audio {
        let bytes = std::fs::read(path).with_context(|| format!("reading audio {}", path.display()))?;
        let mime_type = args.mime.clone().or_else(|| guess_audio_mime(path).map(str::to_string));
        QuizSource::AudioFile { bytes, mime_type }
    } else {
        bail!("one of --script, --narrate or --audio is required");
    };

    let request = GenerationRequest {
        title: args.title,
        author: args.author,
        test_type: args.test_type.unwrap_or(config.generation.test_type),
        difficulty: args.difficulty.unwrap_or(config.generation.difficulty),
        num_questions: args.questions.unwrap_or(config.generation.num_questions),
        source,
    };

    let (progress_tx, progress_rx) = mpsc::channel(16);
    let reporter = tokio::spawn(report_progress(progress_rx));

    let mut pipeline = QuizPipeline::new(client.clone(), client, config.audio.wav_format())
        .with_rng(rng)
        .with_progress(progress_tx);
    let result = pipeline.run(request).await;

    // Closing the channel lets the reporter finish.
    drop(pipeline);
    let _ = reporter.await;

    let session = result?;
    session.save_to(&args.output)?;
    println!(
        "Saved {} question(s) for \"{}\" to {}",
        session.quiz.questions.len(),
        session.quiz.title,
        args.output.display()
    );

    if let Some(dir) = args.export_dir {
        export_session(&args.output, &dir, None, config)?;
    }
    Ok(())
}

fn speaker_config(voice: TtsVoice, speakers: Vec<Speaker>) -> Result<SpeakerConfig> {
    match <[Speaker; 2]>::try_from(speakers) {
        Ok([first, second]) => Ok(SpeakerConfig::dialogue(first, second)),
        Err(speakers) if speakers.is_empty() => Ok(SpeakerConfig::single(voice)),
        Err(speakers) => bail!("dialogue narration needs exactly two --speaker values, got {}", speakers.len()),
    }
}

async fn report_progress(mut rx: mpsc::Receiver<GenerationStage>) {
    while let Some(stage) = rx.recv().await {
        if stage.is_busy() {
            eprintln!("{}", stage.label());
        }
    }
}

fn guess_audio_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "mp3" => "audio/mp3",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "m4a" | "mp4" => "audio/mp4",
        "aac" => "audio/aac",
        "flac" => "audio/flac",
        "webm" => "audio/webm",
        _ => return None,
    };
    Some(mime)
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

// ---------------------------------------------------------------------------
// edit
// ---------------------------------------------------------------------------

fn edit(args: EditArgs) -> Result<()> {
    let mut session = QuizSession::load_from(&args.session)?;
    let mut editor = QuizEditor::new(session.quiz);

    if let Some(title) = args.title {
        editor.set_title(title);
    }
    if let Some(author) = args.author {
        editor.set_author(author);
    }
    if let Some(path) = &args.passage_file {
        if editor.quiz().test_type != TestType::Reading {
            log::warn!("setting a passage on a listening quiz; it will not be shown");
        }
        editor.set_passage(read_text(path)?);
    }

    if let Some(number) = args.question {
        let id = editor.id_for_number(number)?;
        if let Some(text) = args.text {
            editor.set_question_text(&id, text)?;
        }
        for (option, text) in args.options {
            editor.set_option(&id, option - 1, text)?;
        }
        if let Some(correct) = args.correct {
            if correct == 0 {
                bail!("options are numbered from 1");
            }
            editor.set_correct_answer(&id, correct - 1)?;
        }
        if let Some(explanation) = args.explanation {
            editor.set_explanation(&id, explanation)?;
        }
    }

    session.quiz = editor.into_quiz();
    session.save_to(&args.session)?;
    println!("Updated {}", args.session.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// export / pack-wav / voices
// ---------------------------------------------------------------------------

fn export_session(session: &Path, out_dir: &Path, stylesheet: Option<&str>, config: &AppConfig) -> Result<()> {
    let session = QuizSession::load_from(session)?;
    let options = HtmlOptions {
        audio_data_uri: session.audio_data_uri.as_deref(),
        stylesheet_url: stylesheet.unwrap_or(&config.export.stylesheet_url),
    };
    let files = export::write_exports(&session.quiz, &options, out_dir)?;
    println!("Wrote {}", files.html.display());
    println!("Wrote {}", files.answer_key.display());
    Ok(())
}

fn pack_wav(input: &Path, output: &Path, format: &WavFormat) -> Result<()> {
    let pcm = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let wav = audio::pack_pcm(&pcm, format)?;
    std::fs::write(output, &wav).with_context(|| format!("writing {}", output.display()))?;

    println!(
        "Wrote {} ({:.2} s, {} Hz, {} ch, {}-bit)",
        output.display(),
        format.duration_secs(pcm.len()),
        format.sample_rate,
        format.channels,
        format.bits_per_sample
    );
    Ok(())
}

fn list_voices(default_voice: TtsVoice) {
    for voice in TtsVoice::ALL {
        let marker = if voice == default_voice { " (default)" } else { "" };
        println!("{:<8} {}{marker}", voice.api_name(), voice.friendly_name());
    }
}

fn init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let target = path.map(Path::to_path_buf).unwrap_or_else(|| AppPaths::new().settings_file);
    if target.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", target.display());
    }

    let defaults = AppConfig::default();
    let saved = match path {
        Some(p) => defaults.save_to(p),
        None => defaults.save(),
    };
    saved.with_context(|| format!("writing {}", target.display()))?;

    println!("Wrote {}", target.display());
    Ok(())
}
