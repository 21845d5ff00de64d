//! CLI entry point for orchard

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use orchard::file_utils::{DEFAULT_MAX_FILE_SIZE, parse_file_size};
use orchard::graph::{
    Graph, collapse_all_but_root, collapse_imports, from_import_structure,
    toggle_children_for_parent, toggle_descendants_for_parent,
};
use orchard::stats::DEFAULT_TOP_IMPORTS;
use orchard::{
    ExtractionConfig, GraphStats, ImportStructure, Language, OrchardError, OutputConfig, Result,
    SourceWalker, StructureFormatter, WalkerConfig, extract_structure, print_json, print_stats,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "orchard")]
#[command(about = "Extract source imports and show them as a tree or dependency graph")]
#[command(version)]
struct Args {
    /// Project directory to scan
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Source language: rust or python
    #[arg(short = 'l', long = "language", default_value = "rust")]
    language: String,

    /// Include hidden and gitignored files
    #[arg(short, long)]
    all: bool,

    /// Ignore files and directories matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Number of parallel workers for extraction
    /// (0 = auto-detect, 1 = sequential, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    jobs: usize,

    /// Maximum source file size (default: 1MB)
    /// Larger files are skipped. Use suffixes: K, M, G (e.g., 5M for 5MB)
    #[arg(long = "max-file-size", value_name = "SIZE")]
    max_file_size: Option<String>,

    /// Do not prefix paths with the project directory's name
    #[arg(long = "no-root-name")]
    no_root_name: bool,

    /// Read an import structure JSON file instead of scanning PATH
    #[arg(long = "from-structure", value_name = "FILE")]
    from_structure: Option<PathBuf>,

    /// Output the import structure (or, with --stats, the statistics) as JSON
    #[arg(long = "json", conflicts_with = "graph")]
    json: bool,

    /// Output the dependency graph as JSON
    #[arg(long = "graph", conflicts_with = "stats")]
    graph: bool,

    /// Show dependency graph statistics
    #[arg(long = "stats")]
    stats: bool,

    /// Number of most-shared imports listed by --stats
    #[arg(long = "top", value_name = "N", default_value_t = DEFAULT_TOP_IMPORTS, requires = "stats")]
    top: usize,

    /// Do not list imports beneath files in the tree view
    #[arg(long = "no-imports")]
    no_imports: bool,

    /// Collapse every import node
    #[arg(long = "collapse-imports", requires = "graph")]
    collapse_imports: bool,

    /// Toggle every node except the root
    #[arg(long = "collapse-all-but-root", requires = "graph")]
    collapse_all_but_root: bool,

    /// Toggle the immediate children of node ID (can be used multiple times)
    #[arg(long = "toggle-children", value_name = "ID", requires = "graph")]
    toggle_children: Vec<String>,

    /// Toggle every descendant of node ID (can be used multiple times)
    #[arg(long = "toggle-descendants", value_name = "ID", requires = "graph")]
    toggle_descendants: Vec<String>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("orchard: {}", e);
        process::exit(if e.is_config_error() { 2 } else { 1 });
    }
}

/// Log to stderr; stdout carries the output.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn run(args: &Args) -> Result<()> {
    let language = args.language.parse::<Language>()?.ensure_supported()?;
    let max_file_size = match &args.max_file_size {
        Some(size) => parse_file_size(size)?,
        None => DEFAULT_MAX_FILE_SIZE,
    };

    let structure = match &args.from_structure {
        Some(path) => load_structure(path)?,
        None => scan(args, language, max_file_size)?,
    };

    let use_color = should_use_color(args.color);

    if args.graph || args.stats {
        let graph = from_import_structure(&structure, language);
        if args.stats {
            let stats = GraphStats::collect(&graph, args.top);
            if args.json {
                print_json(&stats)?;
            } else {
                print_stats(&stats, use_color)?;
            }
        } else {
            print_json(&apply_collapse(graph, args)?)?;
        }
    } else if args.json {
        print_json(&structure)?;
    } else {
        let label = match &args.from_structure {
            Some(path) => path.display().to_string(),
            None => ".".to_string(),
        };
        let formatter = StructureFormatter::new(OutputConfig {
            use_color,
            show_imports: !args.no_imports,
        });
        formatter.print(&structure, &label)?;
    }

    Ok(())
}

fn load_structure(path: &Path) -> Result<ImportStructure> {
    let json = std::fs::read_to_string(path).map_err(|source| OrchardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let structure = orchard::structure::from_json(&json)?;
    info!(path = %path.display(), files = structure.file_count(), "loaded import structure");
    Ok(structure)
}

fn scan(args: &Args, language: Language, max_file_size: u64) -> Result<ImportStructure> {
    let walker = SourceWalker::new(WalkerConfig {
        show_all: args.all,
        ignore_patterns: args.ignore.clone(),
        include_root_name: !args.no_root_name,
        max_file_size,
        language,
    });
    let files = walker.collect(&args.path)?;
    let config = ExtractionConfig::new(language)?.with_parallel_workers(args.jobs);
    extract_structure(&files, &config)
}

/// Apply the requested collapse operations in a fixed order.
fn apply_collapse(mut graph: Graph, args: &Args) -> Result<Graph> {
    if args.collapse_imports {
        graph = collapse_imports(&graph);
    }
    if args.collapse_all_but_root {
        graph = collapse_all_but_root(&graph);
    }
    for id in &args.toggle_children {
        debug!(id = %id, "toggling children");
        graph = toggle_children_for_parent(&graph, id)?;
    }
    for id in &args.toggle_descendants {
        debug!(id = %id, "toggling descendants");
        graph = toggle_descendants_for_parent(&graph, id)?;
    }
    Ok(graph)
}
