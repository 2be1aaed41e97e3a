//! Minimal CLI: validate | generate | batch
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::pipeline::{self, BatchInput};
use crate::settings::GenerationSettings;
use crate::validate::validate_json;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate TypeScript-style type declarations from JSON samples
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// check that an input is valid JSON and print a report
    Validate(ValidateCmd),
    /// run the pipeline over one document and emit the declaration
    Generate(GenerateCmd),
    /// run the pipeline over many documents and print aggregate statistics
    Batch(BatchCmd),
}

#[derive(Args, Debug, Clone)]
struct SettingsArgs {
    /// declaration name (also the fallback for unusable batch labels)
    #[arg(long, default_value = "Root")]
    name: String,

    /// literal types ("abc", 42, true) instead of widened primitives
    #[arg(long, default_value_t = false)]
    strict_types: bool,

    /// do not mark null/undefined-valued properties with `?`
    #[arg(long, default_value_t = false)]
    no_optional_properties: bool,

    /// emit a preamble comment block
    #[arg(long, default_value_t = false)]
    comments: bool,

    /// prefix declarations with `export`
    #[arg(long, default_value_t = false)]
    export: bool,

    /// mark every property `readonly`
    #[arg(long, default_value_t = false)]
    readonly: bool,

    /// append Partial/Required/keyof aliases for object roots
    #[arg(long, default_value_t = false)]
    utility_types: bool,

    /// property indent width in spaces
    #[arg(long, default_value_t = 2)]
    indent: usize,
}

#[derive(Args, Debug)]
struct ValidateCmd {
    /// JSON file to check
    input: PathBuf,
}

#[derive(Args, Debug)]
struct GenerateCmd {
    /// JSON file to read
    #[arg(long, short)]
    input: PathBuf,

    #[command(flatten)]
    settings: SettingsArgs,

    /// output .ts file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// print the full generation result as JSON instead of the declaration
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct BatchCmd {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    #[command(flatten)]
    settings: SettingsArgs,

    /// write one .ts file per item into this directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// print the full batch report as JSON instead of the summary
    #[arg(long, default_value_t = false)]
    json: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl SettingsArgs {
    fn to_settings(&self) -> GenerationSettings {
        GenerationSettings {
            interface_name: self.name.clone(),
            use_optional_properties: !self.no_optional_properties,
            generate_comments: self.comments,
            use_strict_types: self.strict_types,
            export_interface: self.export,
            use_readonly: self.readonly,
            generate_utility_types: self.utility_types,
            indent_size: self.indent,
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<ExitCode> {
        match &self.cmd {
            Command::Validate(cmd) => cmd.run(),
            Command::Generate(cmd) => cmd.run(),
            Command::Batch(cmd) => cmd.run(),
        }
    }
}

impl ValidateCmd {
    fn run(&self) -> anyhow::Result<ExitCode> {
        let text = read_input(&self.input)?;
        let report = validate_json(&text);

        if report.is_valid {
            println!("{} {}", "valid".green().bold(), self.input.display());
        } else {
            println!("{} {}", "invalid".red().bold(), self.input.display());
            for err in &report.errors {
                match (err.line, err.column) {
                    (Some(l), Some(c)) => println!("  {} (line {l}, column {c})", err.message),
                    _ => println!("  {}", err.message),
                }
            }
        }
        for w in &report.warnings {
            println!("  {} {w}", "warning:".yellow());
        }
        for s in &report.suggestions {
            println!("  {} {s}", "hint:".cyan());
        }

        Ok(if report.is_valid { ExitCode::SUCCESS } else { ExitCode::FAILURE })
    }
}

impl GenerateCmd {
    fn run(&self) -> anyhow::Result<ExitCode> {
        let text = read_input(&self.input)?;
        let settings = self.settings.to_settings();
        let result = pipeline::generate_single(&text, &self.settings.name, &settings)?;

        let rendered = if self.json {
            serde_json::to_string_pretty(&result)?
        } else if result.is_valid {
            result.output.clone()
        } else {
            let message = result.error.as_deref().unwrap_or("invalid JSON");
            eprintln!("{} {message}", "error:".red().bold());
            return Ok(ExitCode::FAILURE);
        };

        write_output(self.out.as_deref(), &rendered)?;
        Ok(ExitCode::SUCCESS)
    }
}

impl BatchCmd {
    fn run(&self) -> anyhow::Result<ExitCode> {
        let settings = self.settings.to_settings();
        let paths = resolve_file_path_patterns(&self.input)?;

        let mut items = Vec::with_capacity(paths.len());
        for path in &paths {
            let content = read_input(path)?;
            let label = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            items.push(BatchInput { content, label });
        }

        let batch = pipeline::generate_batch(&items, &settings)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&batch)?);
            return Ok(ExitCode::SUCCESS);
        }

        for result in &batch.results {
            if result.is_valid {
                println!(
                    "{} {} ({:.1}ms, depth {})",
                    "✓".green(),
                    result.interface_name,
                    result.statistics.processing_time,
                    result.statistics.complexity.depth,
                );
            } else {
                println!(
                    "{} {}: {}",
                    "✗".red(),
                    result.interface_name,
                    result.error.as_deref().unwrap_or("invalid JSON"),
                );
            }
        }

        if let Some(dir) = self.out_dir.as_ref() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            for result in batch.results.iter().filter(|r| r.is_valid) {
                let path = dir.join(format!("{}.ts", result.interface_name));
                std::fs::write(&path, &result.output)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
        }

        let s = &batch.statistics;
        println!(
            "\n{} {} generated, {} valid, {} invalid ({:.1}% success), avg depth {:.2}",
            "summary:".bold(),
            s.total_generated,
            s.valid_count,
            s.invalid_count,
            s.success_rate,
            s.average_complexity,
        );

        Ok(if s.invalid_count == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn read_input(path: &PathBuf) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file {}", path.display()))
}

fn write_output(out: Option<&std::path::Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            // Treat as a glob pattern
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                let path = entry?;
                matched_any = true;
                out.push(path);
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                anyhow::bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            // Treat as a literal path
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
