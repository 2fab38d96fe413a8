use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use stencil_codegen::CodeGenerator;
use stencil_spec::parser::{self, SpecFileType, CONFIG_FILE};
use stencil_spec::schema_def;
use stencil_spec::types::common::{EmitterKind, Severity};
use stencil_spec::types::error::{ErrorEntry, ValidationReport};
use stencil_spec::LoadedProject;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stencil", about = "Stencil – class scaffolding from fragment catalogs")]
#[command(version, propagate_version = true)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize a new Stencil project
    Init {
        /// Project name
        name: String,
        /// Target directory (defaults to ./<name>)
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// Language of the example class
        #[arg(short, long, default_value = "Python")]
        language: String,
    },
    /// Validate a Stencil project
    Validate {
        /// Project directory (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Check project and show summary info
    Check {
        /// Project directory (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Generate source files for every class spec
    Generate {
        /// Project directory (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Output directory (defaults to the config's `output`)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only generate the class with this name
        #[arg(short, long)]
        class: Option<String>,
    },
    /// Print a JSON Schema, or check a file against one
    Schema {
        /// Which schema to print
        #[arg(value_enum, default_value = "class")]
        kind: SchemaKind,
        /// Validate this file instead of printing the schema
        #[arg(long)]
        check: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SchemaKind {
    Config,
    Class,
    Fragments,
}

impl SchemaKind {
    fn schema(self) -> serde_json::Value {
        match self {
            SchemaKind::Config => schema_def::generate_config_schema(),
            SchemaKind::Class => schema_def::generate_class_schema(),
            SchemaKind::Fragments => schema_def::generate_fragment_file_schema(),
        }
    }
}

impl From<SpecFileType> for SchemaKind {
    fn from(file_type: SpecFileType) -> Self {
        match file_type {
            SpecFileType::Config => SchemaKind::Config,
            SpecFileType::Class => SchemaKind::Class,
            SpecFileType::Fragments => SchemaKind::Fragments,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Init {
            name,
            dir,
            language,
        } => cmd_init(&name, dir.as_deref(), &language),
        Command::Validate { path } => cmd_validate(&path),
        Command::Check { path } => cmd_check(&path),
        Command::Generate {
            path,
            output,
            class,
        } => cmd_generate(&path, output.as_deref(), class.as_deref()),
        Command::Schema { kind, check } => cmd_schema(kind, check.as_deref()),
    };

    match result {
        Ok(success) => {
            if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_init(name: &str, dir: Option<&Path>, language: &str) -> Result<bool> {
    let project_dir = match dir {
        Some(d) => d.to_path_buf(),
        None => {
            validate_default_dir_name(name)?;
            PathBuf::from(name)
        }
    };

    if project_dir.exists() {
        anyhow::bail!("Directory '{}' already exists", project_dir.display());
    }

    std::fs::create_dir_all(&project_dir)
        .with_context(|| format!("Failed to create directory '{}'", project_dir.display()))?;

    for sub in &["classes", "fragments"] {
        std::fs::create_dir_all(project_dir.join(sub))?;
    }

    let config = serde_json::json!({
        "version": "1.0.0",
        "name": name,
        "output": "generated",
        "builtinCatalog": true
    });
    std::fs::write(
        project_dir.join(CONFIG_FILE),
        serde_json::to_string_pretty(&config)?,
    )?;

    let point = serde_json::json!({
        "name": "Point",
        "language": language,
        "fields": [
            { "name": "x", "type": "integer", "default": "0" },
            { "name": "y", "type": "integer", "default": "0" }
        ],
        "functions": [
            { "name": "length", "returnType": "real" }
        ]
    });
    std::fs::write(
        project_dir.join("classes/point.class.json"),
        serde_json::to_string_pretty(&point)?,
    )?;

    println!(
        "{} Created project '{}' at {}",
        "✓".green().bold(),
        name.bold(),
        project_dir.display()
    );
    println!("  {} {}", "→".dimmed(), CONFIG_FILE);
    println!("  {} classes/point.class.json", "→".dimmed());
    println!("  {} fragments/", "→".dimmed());
    println!();
    println!("Next steps:");
    println!("  {} {}", "cd".dimmed(), project_dir.display());
    println!("  {} generate", "stencil".dimmed());

    Ok(true)
}

fn validate_default_dir_name(name: &str) -> Result<()> {
    if name.is_empty() {
        anyhow::bail!("Project name must not be empty");
    }

    // Only applies when the name doubles as the directory
    if name.contains('/') || name.contains('\\') {
        anyhow::bail!("Project name must not contain path separators");
    }

    let mut components = Path::new(name).components();
    let Some(first) = components.next() else {
        anyhow::bail!("Project name must not be empty");
    };

    if components.next().is_some() {
        anyhow::bail!("Project name must be a single path component");
    }

    match first {
        std::path::Component::Normal(_) => Ok(()),
        _ => anyhow::bail!("Project name must be a normal directory name"),
    }
}

/// Load a project and run every validation rule over it.
fn load_and_validate(path: &Path) -> Result<(LoadedProject, ValidationReport)> {
    let (project, mut report) = stencil_spec::load_project(path)
        .with_context(|| format!("Failed to load project at '{}'", path.display()))?;
    report.merge(stencil_valid::validate(&project));
    debug!(
        classes = project.classes.len(),
        entries = report.errors.len(),
        "project loaded"
    );
    Ok((project, report))
}

fn print_entries(entries: &[ErrorEntry]) {
    for entry in entries {
        let severity_str = match entry.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue().bold(),
        };

        println!(
            "  {} [{}] {} ({}:{})",
            severity_str,
            entry.code.dimmed(),
            entry.message,
            entry.file.dimmed(),
            entry.path.dimmed(),
        );

        if let Some(suggestion) = &entry.suggestion {
            println!("    {} {}", "hint:".cyan(), suggestion);
        }
    }
}

fn cmd_validate(path: &Path) -> Result<bool> {
    println!(
        "{} {}",
        "Validating".bold(),
        path.canonicalize()
            .unwrap_or_else(|_| path.to_path_buf())
            .display()
    );

    let (project, report) = load_and_validate(path)?;
    print_entries(&report.errors);

    let error_count = report.count(Severity::Error);
    let warning_count = report.count(Severity::Warning);

    println!();
    if error_count == 0 && warning_count == 0 {
        println!(
            "{} Project is valid ({} classes, {} fragment files)",
            "✓".green().bold(),
            project.classes.len(),
            project.fragment_files.len(),
        );
        Ok(true)
    } else if error_count == 0 {
        println!(
            "{} Valid with {} warning(s)",
            "⚠".yellow().bold(),
            warning_count,
        );
        Ok(true)
    } else {
        println!(
            "{} {} error(s), {} warning(s)",
            "✗".red().bold(),
            error_count,
            warning_count,
        );
        Ok(false)
    }
}

fn cmd_check(path: &Path) -> Result<bool> {
    let (project, report) = load_and_validate(path)?;

    println!("{}", "Project Info".bold().underline());
    println!("  Name:      {}", project.config.name);
    println!("  Version:   {}", project.config.version);
    println!("  Output:    {}", project.config.output);
    println!(
        "  Built-ins: {}",
        if project.config.builtin_catalog { "yes" } else { "no" }
    );

    println!();
    println!("{}", "Catalog".bold().underline());
    for name in project.catalog.languages() {
        let Some(fragments) = project.catalog.language(name) else {
            continue;
        };
        let indent = fragments
            .indent()
            .map(|n| format!(", indent {n}"))
            .unwrap_or_default();
        println!(
            "  {:<10} {} keyword(s), {} method(s){}",
            fragments.language(),
            fragments.keyword_count(),
            fragments.method_count(),
            indent
        );
    }
    for file in &project.fragment_files {
        println!("  {} {}", "+".dimmed(), file);
    }

    println!();
    println!("{}", "Classes".bold().underline());
    for (file, spec) in &project.classes {
        let kind = EmitterKind::for_language(&spec.language);
        println!(
            "  {:<12} {:<8} {:?} ({} field(s), {} function(s)) {}",
            spec.name,
            spec.language,
            kind,
            spec.fields.len(),
            spec.functions.len(),
            file.dimmed()
        );
    }

    println!();
    let error_count = report.count(Severity::Error);
    if error_count > 0 {
        println!(
            "{} {} validation error(s) found",
            "✗".red().bold(),
            error_count
        );
        Ok(false)
    } else {
        println!("{} No validation errors", "✓".green().bold());
        Ok(true)
    }
}

fn cmd_generate(path: &Path, output: Option<&Path>, only: Option<&str>) -> Result<bool> {
    println!(
        "{} {}",
        "Generating classes from".bold(),
        path.canonicalize()
            .unwrap_or_else(|_| path.to_path_buf())
            .display()
    );

    // 1. Load & validate
    let (project, report) = load_and_validate(path)?;
    let error_count = report.count(Severity::Error);
    if error_count > 0 {
        print_entries(&report.errors);
        eprintln!(
            "{} {} validation error(s), fix them before generating",
            "✗".red().bold(),
            error_count
        );
        return Ok(false);
    }

    // 2. Generate each class into its own archive directory
    let output_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| project.output_dir());
    let generator = CodeGenerator::new(&project.catalog);
    let mut generated_count = 0;

    for (file, spec) in &project.classes {
        if only.is_some_and(|name| name != spec.name) {
            continue;
        }

        let generated = generator
            .generate(spec)
            .with_context(|| format!("Failed to generate '{}' from {file}", spec.name))?;

        let target = output_dir.join(generated.archive_stem());
        generated
            .write_to_disk(&target)
            .with_context(|| format!("Failed to write to '{}'", target.display()))?;

        println!(
            "{} {} → {}",
            "✓".green().bold(),
            generated.archive_name(),
            target.display()
        );
        for artifact in generated.artifacts() {
            println!("  {} {}", "→".dimmed(), artifact.filename);
        }
        for warning in generated.warnings() {
            println!(
                "  {} [{}] {}",
                "warning".yellow().bold(),
                warning.code().dimmed(),
                warning
            );
        }
        generated_count += 1;
    }

    if let Some(name) = only {
        if generated_count == 0 {
            anyhow::bail!("No class named '{name}' in project");
        }
    }
    if generated_count == 0 {
        println!("{} No class specs found", "⚠".yellow().bold());
    }

    Ok(true)
}

fn cmd_schema(kind: SchemaKind, check: Option<&Path>) -> Result<bool> {
    let Some(file) = check else {
        println!("{}", serde_json::to_string_pretty(&kind.schema())?);
        return Ok(true);
    };

    // The file name decides the schema when it follows the naming convention
    let kind = parser::detect_spec_type(file).map(SchemaKind::from).unwrap_or(kind);
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read '{}'", file.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("'{}' is not valid JSON", file.display()))?;

    let display = file.to_string_lossy();
    let entries = schema_def::validate_against_schema(&value, &kind.schema(), &display);
    if entries.is_empty() {
        println!(
            "{} {} matches the {:?} schema",
            "✓".green().bold(),
            display,
            kind
        );
        Ok(true)
    } else {
        print_entries(&entries);
        println!(
            "{} {} schema violation(s)",
            "✗".red().bold(),
            entries.len()
        );
        Ok(false)
    }
}
