//! Minimal CLI: custom type JSON → (sdl | json)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;

use crate::ir::Schema;
use crate::options::{BuildOptions, CollisionPolicy, TabPrecedence};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// turn Prismic custom type definitions into GraphQL schema types
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,

    /// log progress (same as RUST_LOG=debug)
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print GraphQL SDL
    Sdl(Target),
    /// print the schema graph as JSON
    Json(Target),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more custom type JSON files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// custom type id (defaults to the file stem; single input only)
    #[arg(long)]
    id: Option<String>,

    /// JSON build options file
    #[arg(long)]
    config: Option<PathBuf>,

    /// type name prefix
    #[arg(long)]
    prefix: Option<String>,

    /// which definition wins when two tabs declare the same field
    #[arg(long, value_enum)]
    tab_precedence: Option<TabPrecedence>,

    /// what to do when two fields generate the same type name
    #[arg(long, value_enum)]
    collisions: Option<CollisionPolicy>,

    /// deepest allowed group / slice nesting
    #[arg(long)]
    max_depth: Option<usize>,
}

#[derive(clap::Parser, Debug)]
struct Target {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output file, or directory when there are several inputs (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Sdl,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Job {
    id: String,
    path: PathBuf,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn build_options(&self) -> Result<BuildOptions> {
        let mut options = match &self.config {
            Some(path) => BuildOptions::load(path)?,
            None => BuildOptions::default(),
        };
        if let Some(prefix) = &self.prefix {
            options.prefix = prefix.clone();
        }
        if let Some(precedence) = self.tab_precedence {
            options.tab_precedence = precedence;
        }
        if let Some(policy) = self.collisions {
            options.collisions = policy;
        }
        if let Some(depth) = self.max_depth {
            options.max_depth = depth;
        }
        Ok(options)
    }

    fn jobs(&self) -> Result<Vec<Job>> {
        let paths = resolve_file_path_patterns(&self.input)?;
        if self.id.is_some() && paths.len() > 1 {
            bail!("--id needs exactly one input, got {}", paths.len());
        }
        paths
            .into_iter()
            .map(|path| -> Result<Job> {
                let id = match &self.id {
                    Some(id) => id.clone(),
                    None => custom_type_id_for(&path)?,
                };
                Ok(Job { id, path })
            })
            .collect()
    }
}

impl Job {
    fn build(&self, options: &BuildOptions) -> Result<Schema> {
        let source = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read source file {}", self.path.display()))?;
        crate::assemble::build_schema_from_str(&self.id, &source, options)
            .with_context(|| format!("failed to build schema for `{}` ({})", self.id, self.path.display()))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn init_logging(&self) {
        let level = if self.verbose { "debug" } else { "warn" };
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
            .format_timestamp(None)
            .try_init();
    }

    /// `Ok(false)` when at least one input failed to build.
    pub fn run(&self) -> Result<bool> {
        let (target, format) = match &self.cmd {
            Command::Sdl(target) => (target, Format::Sdl),
            Command::Json(target) => (target, Format::Json),
        };

        // debug path
        if target.no_op {
            eprintln!("{self:#?}");
            return Ok(true);
        }

        let options = target.input_settings.build_options()?;
        let jobs = target.input_settings.jobs()?;

        // one build per worker; a failed build leaves the others alone
        let results: Vec<Result<Schema>> = jobs.par_iter().map(|job| job.build(&options)).collect();

        report(&jobs, &results);

        let built: Vec<(&Job, &Schema)> = jobs
            .iter()
            .zip(&results)
            .filter_map(|(job, result)| result.as_ref().ok().map(|schema| (job, schema)))
            .collect();
        write_outputs(&built, format, target.out.as_deref())?;

        Ok(results.iter().all(Result::is_ok))
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn render(schema: &Schema, format: Format) -> Result<String> {
    match format {
        Format::Sdl => Ok(crate::sdl::render(schema)),
        Format::Json => serde_json::to_string_pretty(schema).context("failed to serialize schema"),
    }
}

fn extension(format: Format) -> &'static str {
    match format {
        Format::Sdl => "graphql",
        Format::Json => "json",
    }
}

fn write_outputs(built: &[(&Job, &Schema)], format: Format, out: Option<&Path>) -> Result<()> {
    match out {
        None => {
            for (job, schema) in built {
                if built.len() > 1 {
                    println!("# {}", job.id);
                }
                println!("{}", render(schema, format)?);
            }
        }
        Some(out) if built.len() == 1 && !out.is_dir() => {
            write_file(out, &render(built[0].1, format)?)?;
        }
        Some(dir) => {
            for (job, schema) in built {
                let path = dir.join(format!("{}.{}", job.id, extension(format)));
                write_file(&path, &render(schema, format)?)?;
            }
        }
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn report(jobs: &[Job], results: &[Result<Schema>]) {
    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(schema) => {
                let line = format!(
                    "✓ {} → {} ({} diagnostic(s))",
                    job.id,
                    schema.root_name(),
                    schema.diagnostics.len()
                );
                eprintln!("{}", line.green());
                for diagnostic in &schema.diagnostics {
                    eprintln!("  {}", diagnostic.to_string().yellow());
                }
            }
            Err(error) => {
                eprintln!("{}", format!("✗ {}: {error:#}", job.id).red());
            }
        }
    }
}

fn custom_type_id_for(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .with_context(|| format!("cannot derive a custom type id from {}", path.display()))
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched = glob::glob(pattern)
                .with_context(|| format!("invalid glob pattern: {pattern}"))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            if matched.is_empty() {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
            out.append(&mut matched);
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommandLineInterface {
        CommandLineInterface::try_parse_from(args).unwrap()
    }

    fn settings(cli: &CommandLineInterface) -> &InputSettings {
        match &cli.cmd {
            Command::Sdl(t) | Command::Json(t) => &t.input_settings,
        }
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&[
            "prismic-typegen", "sdl", "-i", "page.json",
            "--prefix", "Cms", "--tab-precedence", "last-seen-wins", "--collisions", "warn",
        ]);
        let options = settings(&cli).build_options().unwrap();
        assert_eq!(options.prefix, "Cms");
        assert_eq!(options.tab_precedence, TabPrecedence::LastSeenWins);
        assert_eq!(options.collisions, CollisionPolicy::Warn);
        assert_eq!(options.max_depth, BuildOptions::default().max_depth);
    }

    #[test]
    fn id_defaults_to_file_stem() {
        let cli = parse(&["prismic-typegen", "json", "-i", "types/blog_post.json"]);
        let jobs = settings(&cli).jobs().unwrap();
        assert_eq!(jobs, [Job { id: "blog_post".into(), path: "types/blog_post.json".into() }]);
    }

    #[test]
    fn id_with_several_inputs_is_rejected() {
        let cli = parse(&["prismic-typegen", "sdl", "-i", "a.json", "b.json", "--id", "page"]);
        assert!(settings(&cli).jobs().is_err());
    }

    #[test]
    fn glob_without_matches_is_an_error() {
        let err = resolve_file_path_patterns(["/definitely/not/here/*.json"]).unwrap_err();
        assert!(err.to_string().contains("matched no files"));
    }
}
