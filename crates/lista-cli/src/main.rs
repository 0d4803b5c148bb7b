//! lista CLI - Manage grocery categories, backups, and conflict-aware imports
//!
//! Categories live in named lists; `export` writes a JSON backup of a
//! list's categories and `import` restores one with a selectable conflict
//! strategy.

use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::aot::Generator;
use clap_complete::{generate, shells};
use lista_core::backup::{
    backup_to_categories, build_backup, parse_backup, preview_restore, render_backup,
    restore_categories,
};
use lista_core::conflict::{CategoryClassification, CategoryStrategy, ImportPhase, ImportReport};
use lista_core::db::{
    CategoryRepository, Database, ListRepository, SqliteCategoryRepository, SqliteListRepository,
};
use lista_core::{Category, GroceryList, ReconcileConfig, RenameSuffix};
use serde::Serialize;
use thiserror::Error;

const DEFAULT_LIST_NAME: &str = "Groceries";

#[derive(Parser)]
#[command(name = "lista")]
#[command(about = "Manage grocery categories and conflict-aware backups")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Optional path to local database file
    #[arg(long, value_name = "PATH")]
    db_path: Option<PathBuf>,

    /// Target list name
    #[arg(long, global = true, default_value = DEFAULT_LIST_NAME, value_name = "NAME")]
    list: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new category
    #[command(alias = "new")]
    Add {
        /// Category name
        name: String,
        /// Hex color, e.g. #ff8800
        #[arg(long)]
        color: Option<String>,
        /// Short icon string or emoji
        #[arg(long)]
        icon: Option<String>,
    },
    /// List categories
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export categories as a JSON backup
    Export {
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Import a category backup with a conflict strategy
    Import {
        /// Backup file to read
        file: PathBuf,
        /// How to resolve name conflicts
        #[arg(long, value_enum, default_value_t = StrategyArg::Skip)]
        strategy: StrategyArg,
        /// Suffix used by the rename strategy
        #[arg(long, value_enum, default_value_t = SuffixArg::Imported)]
        rename_suffix: SuffixArg,
        /// Collapse duplicate names within the backup to the first entry
        #[arg(long)]
        dedupe: bool,
        /// Show the conflict preview without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Core(#[from] lista_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Category name cannot be empty")]
    EmptyCategoryName,
    #[error("Category already exists: {0}")]
    DuplicateCategory(String),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum StrategyArg {
    Skip,
    Overwrite,
    Rename,
    Merge,
}

impl StrategyArg {
    const fn to_strategy(self) -> CategoryStrategy {
        match self {
            Self::Skip => CategoryStrategy::Skip,
            Self::Overwrite => CategoryStrategy::Overwrite,
            Self::Rename => CategoryStrategy::Rename { new_name: None },
            Self::Merge => CategoryStrategy::Merge,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum SuffixArg {
    Copy,
    Imported,
}

impl SuffixArg {
    const fn to_suffix(self) -> RenameSuffix {
        match self {
            Self::Copy => RenameSuffix::Copy,
            Self::Imported => RenameSuffix::Imported,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lista=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path);

    match cli.command {
        Commands::Add { name, color, icon } => run_add(&name, color, icon, &cli.list, &db_path)?,
        Commands::List { json } => run_list(json, &cli.list, &db_path)?,
        Commands::Export { output } => run_export(output.as_deref(), &cli.list, &db_path)?,
        Commands::Import {
            file,
            strategy,
            rename_suffix,
            dedupe,
            dry_run,
        } => {
            let config = ReconcileConfig {
                rename_suffix: rename_suffix.to_suffix(),
                dedupe_batch: dedupe,
            };
            run_import(
                &file,
                &strategy.to_strategy(),
                &config,
                dry_run,
                &cli.list,
                &db_path,
            )?;
        }
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
    }

    Ok(())
}

fn run_add(
    name: &str,
    color: Option<String>,
    icon: Option<String>,
    list_name: &str,
    db_path: &Path,
) -> Result<(), CliError> {
    if name.trim().is_empty() {
        return Err(CliError::EmptyCategoryName);
    }

    let db = open_database(db_path)?;
    let list = resolve_list(&db, list_name)?;
    let repo = SqliteCategoryRepository::new(db.connection());

    if let Some(existing) = repo.find_by_name(&list.id, name)? {
        return Err(CliError::DuplicateCategory(existing.name));
    }

    let category = Category::new(list.id, name, color, icon)?;
    let created = CategoryRepository::create(&repo, &category)?;
    println!("{}", created.id);
    Ok(())
}

#[derive(Debug, Serialize)]
struct CategoryListItem {
    id: String,
    name: String,
    color: Option<String>,
    icon: Option<String>,
}

fn run_list(as_json: bool, list_name: &str, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let list = resolve_list(&db, list_name)?;
    let categories = SqliteCategoryRepository::new(db.connection()).list(&list.id)?;

    if as_json {
        let items = categories
            .iter()
            .map(|category| CategoryListItem {
                id: category.id.to_string(),
                name: category.name.clone(),
                color: category.color.clone(),
                icon: category.icon.clone(),
            })
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for line in format_category_lines(&categories) {
            println!("{line}");
        }
    }

    Ok(())
}

fn run_export(output_path: Option<&Path>, list_name: &str, db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path)?;
    let list = resolve_list(&db, list_name)?;
    let categories = SqliteCategoryRepository::new(db.connection()).list(&list.id)?;

    let rendered = render_backup(&build_backup(&list, &categories))?;

    if let Some(path) = output_path {
        std::fs::write(path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}

fn run_import(
    file: &Path,
    strategy: &CategoryStrategy,
    config: &ReconcileConfig,
    dry_run: bool,
    list_name: &str,
    db_path: &Path,
) -> Result<(), CliError> {
    let payload = std::fs::read_to_string(file)?;
    let backup = parse_backup(&payload)?;

    let db = open_database(db_path)?;
    let list = resolve_list(&db, list_name)?;
    let repo = SqliteCategoryRepository::new(db.connection());
    let existing = repo.list(&list.id)?;
    let incoming = backup_to_categories(&backup, list.id)?;

    let phase = ImportPhase::Idle.advance(ImportPhase::Previewing)?;
    if dry_run {
        print_preview(&preview_restore(&incoming, &existing, config));
        phase.advance(ImportPhase::Idle)?;
        return Ok(());
    }

    let phase = phase.advance(ImportPhase::Applying)?;
    let report = restore_categories(&repo, &incoming, &existing, strategy, config);
    let done = if report.errors.is_empty() {
        ImportPhase::Completed
    } else {
        ImportPhase::CompletedWithErrors
    };
    let phase = phase.advance(done)?;
    tracing::debug!(?phase, "import finished");

    print_report(&report);
    Ok(())
}

fn print_preview(classified: &[CategoryClassification]) {
    let mut clean = 0usize;
    for classification in classified {
        match classification {
            CategoryClassification::Clean(_) => clean += 1,
            CategoryClassification::Conflict(conflict) => {
                println!(
                    "conflict: {} ({} field(s) differ)",
                    conflict.existing.name,
                    conflict.changed.len()
                );
            }
        }
    }
    println!("{clean} new, {} conflicting", classified.len() - clean);
}

fn print_report(report: &ImportReport) {
    println!(
        "Imported {}, skipped {} ({} conflict(s) seen)",
        report.imported,
        report.skipped,
        report.conflicts.len()
    );
    for error in &report.errors {
        eprintln!("warning: {error}");
    }
}

fn run_completions(shell: CompletionShell, output_path: Option<&Path>) -> Result<(), CliError> {
    let mut command = Cli::command();
    let mut buffer = Vec::new();

    match shell {
        CompletionShell::Bash => generate_for_shell(shells::Bash, &mut command, &mut buffer),
        CompletionShell::Zsh => generate_for_shell(shells::Zsh, &mut command, &mut buffer),
        CompletionShell::Fish => generate_for_shell(shells::Fish, &mut command, &mut buffer),
    }

    if let Some(path) = output_path {
        std::fs::write(path, &buffer)?;
        println!("{}", path.display());
    } else {
        io::stdout().write_all(&buffer)?;
    }

    Ok(())
}

fn generate_for_shell<G: Generator>(
    generator: G,
    command: &mut clap::Command,
    buffer: &mut Vec<u8>,
) {
    generate(generator, command, "lista", buffer);
}

fn format_category_lines(categories: &[Category]) -> Vec<String> {
    categories
        .iter()
        .map(|category| {
            let icon = category.icon.as_deref().unwrap_or(" ");
            let color = category.color.as_deref().unwrap_or("-");
            format!("{icon}  {:<24}  {color}", category.name)
        })
        .collect()
}

/// Find the named list, creating it on first use.
fn resolve_list(db: &Database, name: &str) -> Result<GroceryList, CliError> {
    let repo = SqliteListRepository::new(db.connection());
    if let Some(list) = repo.list()?.into_iter().find(|l| l.name == name.trim()) {
        return Ok(list);
    }

    let list = GroceryList::new(name);
    tracing::info!(name = %list.name, "creating list");
    Ok(repo.create(&list)?)
}

fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("LISTA_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lista")
        .join("lista.db")
}

fn open_database(path: &Path) -> Result<Database, CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(Database::open(path)?)
}
