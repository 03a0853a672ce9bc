//! pgo-remap: convert a Papagayo lip-sync file into time-remap keyframes.

mod jsx;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::debug;
use papagayo_remap_core::{
    bake_frames, baking::export_baked_json, export_plan_json, load_plan, Config, FrameRate,
    PhonemeSet, RemapPlan, UnresolvedPolicy,
};

/// Papagayo (.pgo) to time-remap keyframe converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Papagayo file to convert
    input: PathBuf,

    /// JSON config file; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frame rate of the mouth strip (defaults to the file's frame rate)
    #[arg(long = "target-fps")]
    target_fps: Option<f64>,

    /// Built-in phoneme set
    #[arg(long, value_enum)]
    phonemes: Option<PhonemeSetArg>,

    /// Unknown phoneme handling: keep, skip or substitute:<token>
    #[arg(long)]
    unresolved: Option<UnresolvedPolicy>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PhonemeSetArg {
    PrestonBlair,
    Extended,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Full remap plan
    Json,
    /// One shape index per source frame
    Frames,
    /// After Effects script applying the keys to the selected layer
    Jsx,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = resolve_config(&cli)?;
    debug!("config: {config:?}");

    let plan = load_plan(&cli.input, &config)
        .with_context(|| format!("failed to convert {}", cli.input.display()))?;

    for w in &plan.timeline.warnings {
        eprintln!(
            "warning: unknown phoneme {:?} at frame {} in {}",
            w.phoneme,
            w.frame,
            cli.input.display()
        );
    }
    if plan.timeline.is_empty() {
        eprintln!("warning: no phoneme frames found in {}", cli.input.display());
    }

    let rendered = render(&plan, cli.format)?;
    match &cli.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => Config::default(),
    };
    if let Some(fps) = cli.target_fps {
        config.target_frame_rate = Some(FrameRate::new(fps)?);
    }
    if let Some(set) = cli.phonemes {
        config.phoneme_set = match set {
            PhonemeSetArg::PrestonBlair => PhonemeSet::PrestonBlair,
            PhonemeSetArg::Extended => PhonemeSet::PrestonBlairExtended,
        };
    }
    if let Some(policy) = &cli.unresolved {
        config.unresolved = policy.clone();
    }
    Ok(config)
}

fn read_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

fn render(plan: &RemapPlan, format: Format) -> Result<String> {
    let mut out = match format {
        Format::Json => serde_json::to_string_pretty(&export_plan_json(plan))?,
        Format::Frames => serde_json::to_string_pretty(&export_baked_json(&bake_frames(plan)))?,
        Format::Jsx => jsx::render(plan).context("failed to render script")?,
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use papagayo_test_fixtures::{configs, papagayo};

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pgo-remap").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_config_file() {
        let cfg_path = configs::path("strip-12fps").unwrap();
        let c = cli(&[
            "in.pgo",
            "--config",
            cfg_path.to_str().unwrap(),
            "--target-fps",
            "8",
            "--unresolved",
            "substitute:rest",
        ]);
        let config = resolve_config(&c).unwrap();
        assert_eq!(config.target_frame_rate.map(FrameRate::get), Some(8.0));
        assert_eq!(config.unresolved, UnresolvedPolicy::Substitute("rest".into()));
        assert_eq!(config.phoneme_set, PhonemeSet::PrestonBlairExtended);
    }

    #[test]
    fn bad_policy_is_rejected_by_parser() {
        let parsed = Cli::try_parse_from(["pgo-remap", "in.pgo", "--unresolved", "drop"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn zero_target_fps_is_rejected() {
        let c = cli(&["in.pgo", "--target-fps", "0"]);
        assert!(resolve_config(&c).is_err());
    }

    #[test]
    fn frames_format_bakes_every_frame() {
        let plan = load_plan(papagayo::path("hello").unwrap(), &Config::default()).unwrap();
        let out = render(&plan, Format::Frames).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["shapes"].as_array().map(Vec::len), Some(48));
        assert_eq!(json["frame_rate"], 24.0);
    }

    #[test]
    fn json_format_carries_warnings_and_fixup() {
        let plan = load_plan(papagayo::path("unknown-token").unwrap(), &Config::default()).unwrap();
        let out = render(&plan, Format::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["name"], "unknown_token");
        assert_eq!(json["needs_frame_zero_fixup"], false);
        assert_eq!(json["warnings"][0]["phoneme"], "ZZ");
        assert_eq!(json["strip"][10], "TH");
    }
}
