//! Snapshot runner: every `<dir>/<id>.json` is built as custom type `<id>` and
//! its SDL compared with `<dir>/<id>.graphql`. An optional `<id>.options.json`
//! holds build options.
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use prismic_typegen::{BuildOptions, build_schema_from_str, sdl};

static OPTIONS_FILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.options\.json$").unwrap());

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Outcome {
    Pass { id: String, diagnostics: usize },
    Blessed { id: String },
    Mismatch { id: String, first_difference: usize },
    Failed { id: String, error: String },
}

/// build every fixture and compare it with its SDL snapshot
#[derive(Parser, Debug)]
struct Settings {
    /// fixture directory
    #[arg(default_value = "fixtures")]
    dir: PathBuf,

    /// only run fixtures whose id matches
    #[arg(long)]
    filter: Option<Regex>,

    /// overwrite snapshots with the current output
    #[arg(long)]
    bless: bool,

    /// print outcomes as JSON
    #[arg(long)]
    json: bool,
}

fn fixture_ids(settings: &Settings) -> Result<Vec<String>, String> {
    let entries = std::fs::read_dir(&settings.dir)
        .map_err(|e| format!("cannot read {}: {e}", settings.dir.display()))?;
    let mut ids = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| e.to_string())?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else { continue };
        if !name.ends_with(".json") || OPTIONS_FILE.is_match(name) {
            continue;
        }
        let id = name.trim_end_matches(".json").to_string();
        if settings.filter.as_ref().is_none_or(|rx| rx.is_match(&id)) {
            ids.push(id);
        }
    }
    ids.sort();
    Ok(ids)
}

fn load_options(dir: &Path, id: &str) -> Result<BuildOptions, String> {
    let path = dir.join(format!("{id}.options.json"));
    if !path.exists() {
        return Ok(BuildOptions::default());
    }
    let source = std::fs::read_to_string(&path).map_err(|e| e.to_string())?;
    BuildOptions::from_json_str(&source).map_err(|err| format!("{}: {err}", path.display()))
}

fn run_one(settings: &Settings, id: &str) -> Outcome {
    let failed = |error: String| Outcome::Failed { id: id.to_string(), error };

    let options = match load_options(&settings.dir, id) {
        Ok(x) => x,
        Err(error) => return failed(error),
    };
    let source = match std::fs::read_to_string(settings.dir.join(format!("{id}.json"))) {
        Ok(x) => x,
        Err(error) => return failed(error.to_string()),
    };
    let schema = match build_schema_from_str(id, &source, &options) {
        Ok(x) => x,
        Err(error) => return failed(error.to_string()),
    };
    let actual = sdl::render(&schema);

    let snapshot = settings.dir.join(format!("{id}.graphql"));
    if settings.bless {
        return match std::fs::write(&snapshot, &actual) {
            Ok(()) => Outcome::Blessed { id: id.to_string() },
            Err(error) => failed(error.to_string()),
        };
    }
    let expected = match std::fs::read_to_string(&snapshot) {
        Ok(x) => x,
        Err(error) => return failed(format!("missing snapshot {}: {error}", snapshot.display())),
    };
    if expected == actual {
        Outcome::Pass { id: id.to_string(), diagnostics: schema.diagnostics.len() }
    } else {
        let first_difference = expected
            .lines()
            .zip(actual.lines())
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| expected.lines().count().min(actual.lines().count()))
            + 1;
        Outcome::Mismatch { id: id.to_string(), first_difference }
    }
}

fn main() -> ExitCode {
    let settings = Settings::parse();
    let ids = match fixture_ids(&settings) {
        Ok(x) => x,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let outcomes: Vec<Outcome> = ids.iter().map(|id| run_one(&settings, id)).collect();
    let ok = outcomes
        .iter()
        .all(|o| matches!(o, Outcome::Pass { .. } | Outcome::Blessed { .. }));

    if settings.json {
        match serde_json::to_string_pretty(&outcomes) {
            Ok(report) => println!("{report}"),
            Err(error) => eprintln!("{error}"),
        }
    } else {
        for outcome in &outcomes {
            match outcome {
                Outcome::Pass { id, diagnostics } => println!("✅ {id} ({diagnostics} diagnostic(s))"),
                Outcome::Blessed { id } => println!("📝 {id}"),
                Outcome::Mismatch { id, first_difference } => {
                    println!("❌ {id}: snapshot differs at line {first_difference}")
                }
                Outcome::Failed { id, error } => println!("❌ {id}: {error}"),
            }
        }
    }

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments() {
        let settings = Settings::try_parse_from(["dev-test-runner"]).unwrap();
        assert_eq!(settings.dir, PathBuf::from("fixtures"));
        assert!(settings.filter.is_none() && !settings.bless && !settings.json);

        let settings =
            Settings::try_parse_from(["dev-test-runner", "cases", "--filter", "^blog", "--bless", "--json"]).unwrap();
        assert_eq!(settings.dir, PathBuf::from("cases"));
        assert!(settings.filter.unwrap().is_match("blog_post"));
        assert!(settings.bless && settings.json);

        assert!(Settings::try_parse_from(["dev-test-runner", "--filter", "("]).is_err());
    }

    #[test]
    fn options_file_errors_name_file_and_key() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_options(dir.path(), "page").unwrap(), BuildOptions::default());

        std::fs::write(dir.path().join("page.options.json"), r#"{ "prefix": "Cms" }"#).unwrap();
        assert_eq!(load_options(dir.path(), "page").unwrap().prefix, "Cms");

        std::fs::write(dir.path().join("page.options.json"), r#"{ "max_depth": "deep" }"#).unwrap();
        let error = load_options(dir.path(), "page").unwrap_err();
        assert!(error.contains("page.options.json"), "{error}");
        assert!(error.contains("max_depth"), "{error}");
    }
}
