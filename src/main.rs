use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use speakscore::audio::wav::read_wav_metrics;
use speakscore::input::{RuntimeBaseline, RuntimePreviousScores, RuntimeSession, RuntimeTranscript};
use speakscore::scoring::{FeedbackScores, ScoreDelta, ScoreWeights};
use speakscore::session::{score_session, SessionReport};
use speakscore::types::{AudioMetrics, CoachTone, ScenarioCategory, TranscriptionResult};

/// speakscore - delivery feedback scoring for rehearsal recordings
///
/// Scores a recorded rehearsal session (level metrics plus an optional
/// transcript) into clarity, pacing, tone and confidence on a 0-100
/// scale, with an overall tier and strength/weakness picks.
#[derive(Parser, Debug)]
#[command(name = "speakscore")]
#[command(version = "0.1.0")]
#[command(about = "Delivery feedback scoring for rehearsal recordings", long_about = None)]
struct Args {
    /// Session JSON file with rms_windows/peak_windows/duration and an
    /// optional embedded transcript
    #[arg(long, value_name = "PATH", conflicts_with = "wav")]
    session: Option<PathBuf>,

    /// WAV recording to ingest instead of a metric dump
    #[arg(long, value_name = "PATH")]
    wav: Option<PathBuf>,

    /// Transcript JSON file ({"text": ..., "segments": [...]}); overrides
    /// any transcript embedded in the session file
    #[arg(long, value_name = "PATH")]
    transcript: Option<PathBuf>,

    /// Conversation type being rehearsed
    #[arg(long, default_value = "career")]
    scenario: ScenarioCategory,

    /// Coaching style bias
    #[arg(long = "coach-tone", default_value = "gentle")]
    coach_tone: CoachTone,

    /// Baseline JSON file with rolling averages from prior sessions
    #[arg(long, value_name = "PATH")]
    baseline: Option<PathBuf>,

    /// Previous scores JSON file; prints per-dimension deltas
    #[arg(long, value_name = "PATH")]
    previous: Option<PathBuf>,

    /// Emit machine-readable JSON instead of the text report
    #[arg(long)]
    json: bool,
}

impl Args {
    fn validate(&self) -> Result<()> {
        if self.session.is_none() && self.wav.is_none() {
            anyhow::bail!("provide a recording via --session or --wav");
        }
        for path in [&self.session, &self.wav, &self.transcript, &self.baseline, &self.previous]
            .into_iter()
            .flatten()
        {
            if !path.is_file() {
                anyhow::bail!("input file does not exist: {:?}", path);
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    args.validate()
        .context("failed to validate command-line arguments")?;

    let (metrics, embedded_transcript) = load_recording(&args)?;
    let transcript = match &args.transcript {
        Some(path) => Some(load_transcript(path)?),
        None => embedded_transcript,
    };
    let baseline = args
        .baseline
        .as_deref()
        .map(load_baseline)
        .transpose()?
        .map(|runtime| runtime.to_baseline());

    let report = score_session(
        &metrics,
        transcript.as_ref(),
        args.scenario,
        baseline.as_ref(),
        args.coach_tone,
    );

    let delta = args
        .previous
        .as_deref()
        .map(|path| load_delta(path, &report.scores))
        .transpose()?;

    if args.json {
        print_json(&report, delta.as_ref())?;
    } else {
        print_report(&args, &report, delta.as_ref());
    }
    Ok(())
}

fn load_recording(args: &Args) -> Result<(AudioMetrics, Option<TranscriptionResult>)> {
    if let Some(path) = &args.wav {
        let metrics = read_wav_metrics(path)?;
        return Ok((metrics, None));
    }
    let path = args.session.as_ref().expect("validated above");
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read session file {:?}", path))?;
    let session: RuntimeSession =
        serde_json::from_str(&raw).context("failed to parse session JSON")?;
    session.validate().context("session validation failed")?;
    Ok((session.to_metrics(), session.to_transcript()))
}

fn load_transcript(path: &Path) -> Result<TranscriptionResult> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read transcript file {:?}", path))?;
    let transcript: RuntimeTranscript =
        serde_json::from_str(&raw).context("failed to parse transcript JSON")?;
    Ok(transcript.to_result())
}

fn load_baseline(path: &Path) -> Result<RuntimeBaseline> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read baseline file {:?}", path))?;
    serde_json::from_str(&raw).context("failed to parse baseline JSON")
}

fn load_delta(path: &Path, current: &FeedbackScores) -> Result<ScoreDelta> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read previous scores file {:?}", path))?;
    let previous: RuntimePreviousScores =
        serde_json::from_str(&raw).context("failed to parse previous scores JSON")?;
    let previous = FeedbackScores::from_dimensions(
        previous.clarity,
        previous.pacing,
        previous.tone,
        previous.confidence,
        &ScoreWeights::default(),
    );
    Ok(ScoreDelta::between(current, &previous))
}

fn print_json(report: &SessionReport, delta: Option<&ScoreDelta>) -> Result<()> {
    let mut value = serde_json::to_value(report.scores)?;
    if let Some(delta) = delta {
        value["delta"] = serde_json::to_value(delta)?;
    }
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_report(args: &Args, report: &SessionReport, delta: Option<&ScoreDelta>) {
    let scores = &report.scores;
    let analyses = &report.analyses;

    println!(
        "speakscore report ({} / {} coach)",
        args.scenario.as_str(),
        args.coach_tone.as_str()
    );
    println!();
    println!("  clarity     {:>3}", scores.clarity);
    println!("  pacing      {:>3}", scores.pacing);
    println!("  tone        {:>3}", scores.tone);
    println!("  confidence  {:>3}", scores.confidence);
    println!();
    println!("  overall     {:>3}  ({})", scores.overall, scores.tier.as_str());
    println!(
        "  strength    {}  (weighted: {})",
        scores.primary_strength.as_str(),
        scores.weighted_strength.as_str()
    );
    println!(
        "  weakness    {}  (weighted: {})",
        scores.primary_weakness.as_str(),
        scores.weighted_weakness.as_str()
    );

    println!();
    println!("signals:");
    println!("  filler words        {}", analyses.clarity.filler_count);
    println!("  hedging phrases     {}", analyses.confidence.hedging_count);
    match analyses.pacing.words_per_minute {
        Some(wpm) => println!("  words per minute    {:.0}", wpm),
        None => println!("  words per minute    n/a (no transcript)"),
    }
    println!("  pauses              {}", analyses.pacing.pause_count);
    println!("  silence ratio       {:.2}", analyses.clarity.silence_ratio);
    println!("  sentiment           {:+.2}", analyses.tone.sentiment_score);

    if let Some(delta) = delta {
        println!();
        println!(
            "vs previous: clarity {:+} pacing {:+} tone {:+} confidence {:+} overall {:+}",
            delta.clarity, delta.pacing, delta.tone, delta.confidence, delta.overall
        );
    }
}
