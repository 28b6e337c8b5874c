//! Offline inspection of viewmodel assets: validity, pools and timing.

use anyhow::{anyhow, bail, Context, Result};
use asset_store::{AssetPath, AssetStore, DirAssetStore};
use clap::{Parser, Subcommand};
use log::debug;
use sequence_analysis::{KeywordSet, ModelCache};
use std::path::PathBuf;

/// Text rendering helpers used by the CLI commands.
mod render {
    use asset_store::AssetPath;
    use model_format::{ModelError, SequenceEntry, SequenceTiming};
    use sequence_analysis::duration;
    use sequence_analysis::{ModelAnalysis, PoolKind, SilencerTag};
    use std::fmt::Write;

    fn pool_label(kind: PoolKind, tag: SilencerTag) -> &'static str {
        match (kind, tag) {
            (PoolKind::Inspect, SilencerTag::Silenced) => "inspect/silenced",
            (PoolKind::Inspect, SilencerTag::Unsilenced) => "inspect/unsilenced",
            (PoolKind::Inspect, SilencerTag::Generic) => "inspect/generic",
            (PoolKind::Idle, SilencerTag::Silenced) => "idle/silenced",
            (PoolKind::Idle, SilencerTag::Unsilenced) => "idle/unsilenced",
            (PoolKind::Idle, SilencerTag::Generic) => "idle/generic",
        }
    }

    fn name_of(sequences: &[SequenceEntry], index: u32) -> &str {
        sequences
            .iter()
            .find(|s| s.index == index)
            .map_or("?", |s| s.name.as_str())
    }

    /// Format a model's support verdict followed by its non-empty pools.
    pub fn analysis(
        path: &AssetPath,
        analysis: &ModelAnalysis,
        sequences: &[SequenceEntry],
    ) -> String {
        let mut out = String::new();
        let verdict = if analysis.supports_inspect {
            "inspect supported"
        } else {
            "no inspect sequences"
        };
        writeln!(out, "{path}: {verdict} ({} sequences)", sequences.len()).expect("write verdict");
        for kind in [PoolKind::Inspect, PoolKind::Idle] {
            for tag in SilencerTag::ALL {
                let pool = analysis.pools.get(kind, tag);
                if pool.is_empty() {
                    continue;
                }
                let members: Vec<String> = pool
                    .as_slice()
                    .iter()
                    .map(|&i| format!("#{i} {}", name_of(sequences, i)))
                    .collect();
                writeln!(out, "  {:<18} {}", pool_label(kind, tag), members.join(", "))
                    .expect("write pool");
            }
        }
        out
    }

    /// Format a model that failed validation.
    pub fn invalid(path: &AssetPath, err: &ModelError) -> String {
        format!("{path}: invalid ({err})\n")
    }

    /// Format the raw timing fields of one sequence and the derived duration.
    pub fn timing(entry: &SequenceEntry, timing: SequenceTiming) -> String {
        let mut out = String::new();
        writeln!(out, "#{} {}", entry.index, entry.name).expect("write header");
        writeln!(
            out,
            "  fps:      raw {} -> {:.2}",
            timing.fps,
            duration::sanitize_fps(timing.fps)
        )
        .expect("write fps");
        let frames = match duration::pick_frames(timing.frames_a, timing.frames_b) {
            Ok(frames) => frames.to_string(),
            Err(_) => "none".to_owned(),
        };
        writeln!(
            out,
            "  frames:   {} / {} -> {frames}",
            timing.frames_a, timing.frames_b
        )
        .expect("write frames");
        match duration::estimate(timing) {
            Ok(secs) => writeln!(out, "  duration: {secs:.3}s").expect("write duration"),
            Err(err) => writeln!(out, "  duration: unresolved ({err})").expect("write duration"),
        }
        out
    }
}

/// Report how viewmodels would behave under the inspect feature.
#[derive(Parser, Debug)]
#[command(author, version, about = "Analyse viewmodels for inspect sequences", long_about = None)]
struct Cli {
    /// Directory model paths are resolved against.
    #[arg(long, global = true, default_value = ".", value_name = "DIR")]
    root: PathBuf,

    /// Keyword file, one keyword per line (defaults to the built-in list).
    #[arg(long, global = true, value_name = "FILE")]
    keywords: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate models and list their inspect and idle pools.
    Analyze {
        /// Model paths relative to the root.
        #[arg(value_name = "MODEL", required = true)]
        models: Vec<String>,
    },
    /// Print the timing fields and estimated duration of one sequence.
    Timing {
        #[arg(value_name = "MODEL")]
        model: String,
        /// Sequence index.
        #[arg(value_name = "SEQ")]
        sequence: u32,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let store = DirAssetStore::new(&cli.root);

    match cli.command {
        Command::Analyze { models } => {
            let keywords = load_keywords(cli.keywords.as_ref())?;
            handle_analyze(store, keywords, &models)
        }
        Command::Timing { model, sequence } => handle_timing(&store, &model, sequence),
    }
}

fn load_keywords(path: Option<&PathBuf>) -> Result<KeywordSet> {
    let Some(path) = path else {
        return Ok(KeywordSet::default());
    };
    let keywords = KeywordSet::load(path)?;
    if keywords.is_empty() {
        bail!("keyword file {path:?} has no keywords");
    }
    debug!("loaded {} keywords from {path:?}", keywords.len());
    Ok(keywords)
}

fn handle_analyze(store: DirAssetStore, keywords: KeywordSet, models: &[String]) -> Result<()> {
    let mut cache = ModelCache::new(store, keywords);
    let mut failures = 0usize;
    for model in models {
        let path = AssetPath::from(model.as_str());
        match analyze_model(&mut cache, &path) {
            Ok(report) => print!("{report}"),
            Err(report) => {
                failures += 1;
                print!("{report}");
            }
        }
    }
    if failures > 0 {
        bail!("{failures} of {} models failed validation", models.len());
    }
    Ok(())
}

/// Report for one model; `Err` carries the rendered failure.
fn analyze_model<S: AssetStore>(
    cache: &mut ModelCache<S>,
    path: &AssetPath,
) -> std::result::Result<String, String> {
    let sequences = model_format::validate(cache.store(), path)
        .and_then(|_| model_format::extract_sequences(cache.store(), path))
        .map_err(|err| render::invalid(path, &err))?;
    let analysis = cache.get_or_analyze(path);
    Ok(render::analysis(path, analysis, &sequences))
}

fn handle_timing(store: &DirAssetStore, model: &str, sequence: u32) -> Result<()> {
    let path = AssetPath::from(model);
    let sequences = model_format::extract_sequences(store, &path)
        .with_context(|| format!("failed to read sequences of {path}"))?;
    let entry = sequences
        .iter()
        .find(|s| s.index == sequence)
        .ok_or_else(|| anyhow!("{path} has {} sequences, no #{sequence}", sequences.len()))?;
    let timing = model_format::read_timing(store, &path, sequence)
        .with_context(|| format!("failed to read timing of {path} #{sequence}"))?;
    print!("{}", render::timing(entry, timing));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{analyze_model, render};
    use asset_store::{AssetPath, MemAssetStore};
    use insta::assert_snapshot;
    use model_format::{ModelError, SequenceEntry, SequenceTiming};
    use sequence_analysis::{KeywordSet, ModelAnalysis, ModelCache, SequenceClassifier};
    use testdata::ModelBuilder;

    fn entries(names: &[&str]) -> Vec<SequenceEntry> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| SequenceEntry {
                index: i as u32,
                name: (*name).to_owned(),
            })
            .collect()
    }

    #[test]
    fn analysis_render_lists_non_empty_pools() {
        let sequences = entries(&["idle", "shoot", "inspect_sil", "inspect_unsil", "idle_unsil"]);
        let classifier = SequenceClassifier::new(KeywordSet::default());
        let analysis = ModelAnalysis::from_pools(classifier.classify_all(&sequences));
        let out = render::analysis(&AssetPath::from("models/v_m4a1.mdl"), &analysis, &sequences);
        assert_snapshot!(out, @r"
        models/v_m4a1.mdl: inspect supported (5 sequences)
          inspect/silenced   #2 inspect_sil
          inspect/unsilenced #3 inspect_unsil
          idle/unsilenced    #4 idle_unsil
          idle/generic       #0 idle
        ");
    }

    #[test]
    fn invalid_render_names_the_error() {
        let out = render::invalid(
            &AssetPath::from("models/v_bad.mdl"),
            &ModelError::BadMagic { found: 0 },
        );
        assert!(out.starts_with("models/v_bad.mdl: invalid ("));
        assert!(out.ends_with(")\n"));
    }

    #[test]
    fn timing_render_shows_derivation() {
        let entry = SequenceEntry {
            index: 6,
            name: "ak47_inspect".to_owned(),
        };
        let timing = SequenceTiming {
            fps: 24,
            frames_a: 96,
            frames_b: 0,
        };
        assert_snapshot!(render::timing(&entry, timing), @r"
        #6 ak47_inspect
          fps:      raw 24 -> 24.00
          frames:   96 / 0 -> 96
          duration: 4.000s
        ");
    }

    #[test]
    fn timing_render_reports_unresolved_duration() {
        let entry = SequenceEntry {
            index: 0,
            name: "broken".to_owned(),
        };
        let timing = SequenceTiming {
            fps: 500,
            frames_a: 0,
            frames_b: -4,
        };
        let out = render::timing(&entry, timing);
        assert!(out.contains("raw 500 -> 30.00"));
        assert!(out.contains("0 / -4 -> none"));
        assert!(out.contains("duration: unresolved"));
    }

    #[test]
    fn unreadable_table_is_reported_per_model() {
        let mut store = MemAssetStore::new();
        store.insert(
            "models/v_short.mdl",
            ModelBuilder::new()
                .sequences(["idle", "inspect"])
                .declared_count(1000)
                .build(),
        );
        store.insert(
            "models/v_ok.mdl",
            ModelBuilder::new().sequences(["idle", "inspect"]).build(),
        );
        let mut cache = ModelCache::new(store, KeywordSet::default());

        let bad = analyze_model(&mut cache, &AssetPath::from("models/v_short.mdl")).unwrap_err();
        assert!(bad.starts_with("models/v_short.mdl: invalid ("));
        let good = analyze_model(&mut cache, &AssetPath::from("models/v_ok.mdl")).unwrap();
        assert!(good.starts_with("models/v_ok.mdl: inspect supported (2 sequences)"));
    }
}
