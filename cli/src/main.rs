//! pagemend CLI - rebuild readable Markdown from PDF extractor page dumps

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use pagemend::{
    assemble, load_pages, reconstruct_with_options, AssembleOptions, CleanupPreset, Error,
    PageSelection, PipelineOptions,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_USAGE: i32 = 1;
const EXIT_UNSUPPORTED: i32 = 2;
const EXIT_FAILED: i32 = 3;
const EXIT_SCANNED: i32 = 4;

#[derive(Parser)]
#[command(name = "pagemend")]
#[command(version)]
#[command(about = "Rebuild clean Markdown from PDF extractor page dumps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single page dump to Markdown
    Convert {
        /// Input page dump (.json)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output .md file (defaults to input with .md extension)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        args: ConvertArgs,
    },

    /// Convert every page dump in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "DIR")]
        input_dir: PathBuf,

        /// Output directory
        #[arg(long, value_name = "DIR")]
        out_dir: PathBuf,

        /// Process subdirectories
        #[arg(long)]
        recursive: bool,

        #[command(flatten)]
        args: ConvertArgs,
    },

    /// Show version information
    Version,
}

/// Flags shared by `convert` and `batch`.
#[derive(Args, Clone)]
struct ConvertArgs {
    /// Remove headers/footers, fix hyphenation, reflow paragraphs, normalize whitespace
    #[arg(long)]
    clean: bool,

    /// Text cleanup preset (implies --clean)
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,

    /// Add YAML frontmatter instead of a comment header
    #[arg(long)]
    frontmatter: bool,

    /// Add `## Page N` headings
    #[arg(long)]
    page_labels: bool,

    /// Splice extracted tables into the output
    #[arg(long)]
    extract_tables: bool,

    /// Truncate output at N characters
    #[arg(long, value_name = "N")]
    max_chars: Option<usize>,

    /// Fraction of pages a header/footer must repeat on
    #[arg(long, value_name = "F")]
    threshold: Option<f64>,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Overwrite existing output files
    #[arg(long)]
    overwrite: bool,

    /// Suppress warnings
    #[arg(long)]
    quiet: bool,

    /// Show detailed progress
    #[arg(long, env = "PAGEMEND_VERBOSE")]
    verbose: bool,

    /// Machine-readable JSON output
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (Unicode and whitespace normalization only)
    Minimal,
    /// Standard cleanup (default with --clean)
    Standard,
    /// Aggressive cleanup (lower header/footer threshold)
    Aggressive,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Aggressive => CleanupPreset::Aggressive,
        }
    }
}

impl ConvertArgs {
    fn pipeline_options(&self) -> pagemend::Result<PipelineOptions> {
        let mut options = match (self.cleanup, self.clean) {
            (Some(level), _) => PipelineOptions::from_preset(level.into()),
            (None, true) => PipelineOptions::standard(),
            (None, false) => PipelineOptions::raw(),
        };
        options = options
            .with_tables(self.extract_tables)
            .with_page_labels(self.page_labels);
        if let Some(threshold) = self.threshold {
            options = options.with_threshold(threshold);
        }
        if let Some(pages) = &self.pages {
            options = options.with_pages(PageSelection::parse(pages)?);
        }
        options.validate()?;
        Ok(options)
    }

    fn assemble_options(&self) -> AssembleOptions {
        let options = AssembleOptions::new().with_frontmatter(self.frontmatter);
        match self.max_chars {
            Some(max_chars) => options.with_max_chars(max_chars),
            None => options,
        }
    }

    fn log_level(&self) -> &'static str {
        if self.verbose && !self.quiet {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

/// Outcome of converting one page dump.
struct Conversion {
    markdown: String,
    warnings: Vec<String>,
    pages: u32,
    exit_code: i32,
}

impl Conversion {
    fn failed(error: &Error) -> Self {
        let pages = match error {
            Error::AllPagesScanned(n) => *n,
            _ => 0,
        };
        Self {
            markdown: String::new(),
            warnings: vec![error.to_string()],
            pages,
            exit_code: exit_code(error),
        }
    }

    fn succeeded(&self) -> bool {
        self.exit_code == EXIT_SUCCESS
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match &cli.command {
        Commands::Convert { args, .. } | Commands::Batch { args, .. } => args.log_level(),
        Commands::Version => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            args,
        } => cmd_convert(&input, output.as_deref(), &args),
        Commands::Batch {
            input_dir,
            out_dir,
            recursive,
            args,
        } => cmd_batch(&input_dir, &out_dir, recursive, &args),
        Commands::Version => {
            cmd_version();
            Ok(EXIT_SUCCESS)
        }
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(EXIT_USAGE);
        }
    }
}

fn exit_code(error: &Error) -> i32 {
    match error {
        Error::UnsupportedFormat(_) => EXIT_UNSUPPORTED,
        Error::AllPagesScanned(_) => EXIT_SCANNED,
        Error::InvalidPageRange(_) | Error::InvalidOption(_) => EXIT_USAGE,
        Error::Io(_) | Error::Json(_) => EXIT_FAILED,
    }
}

fn convert_file(input: &Path, args: &ConvertArgs) -> Conversion {
    let attempt = || -> pagemend::Result<Conversion> {
        let options = args.pipeline_options()?;
        let pages = load_pages(input)?;
        let document = reconstruct_with_options(&pages, &options)?;

        let source_name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let markdown = assemble(&document, &source_name, &args.assemble_options())?;

        Ok(Conversion {
            markdown,
            warnings: document.warnings,
            pages: document.page_count,
            exit_code: EXIT_SUCCESS,
        })
    };

    attempt().unwrap_or_else(|e| {
        log::debug!("Conversion of {} failed: {}", input.display(), e);
        Conversion::failed(&e)
    })
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("md")
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    args: &ConvertArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    if args.verbose && !args.quiet {
        eprintln!("{} {}", "Converting:".cyan(), input.display());
    }

    let conversion = convert_file(input, args);

    if args.json {
        let summary = json!({
            "source": input.file_name().map(|n| n.to_string_lossy()),
            "exit_code": conversion.exit_code,
            "warnings": conversion.warnings,
            "chars": conversion.markdown.chars().count(),
            "pages": conversion.pages,
        });
        println!("{}", summary);
        return Ok(conversion.exit_code);
    }

    if !conversion.succeeded() {
        if !args.quiet {
            print_warnings(&conversion.warnings);
        }
        return Ok(conversion.exit_code);
    }

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input));

    if output.exists() && !args.overwrite {
        return Err(format!(
            "{} already exists. Use --overwrite to replace.",
            output.display()
        )
        .into());
    }

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output, &conversion.markdown)?;

    if !args.quiet {
        print_warnings(&conversion.warnings);
        println!(
            "{} {} -> {}",
            "Converted:".green(),
            input.display(),
            output.display()
        );
    }

    Ok(EXIT_SUCCESS)
}

fn cmd_batch(
    input_dir: &Path,
    out_dir: &Path,
    recursive: bool,
    args: &ConvertArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    if !input_dir.is_dir() {
        return Err(format!("{} is not a directory", input_dir.display()).into());
    }
    // Fail on bad options before touching any file
    args.pipeline_options()?;

    let files = collect_dumps(input_dir, recursive)?;
    if files.is_empty() {
        if !args.quiet {
            eprintln!("{}", "No page dumps (.json) found.".yellow());
        }
        return Ok(EXIT_SUCCESS);
    }

    fs::create_dir_all(out_dir)?;

    let pb = if args.quiet || args.json {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        pb
    };

    let mut success = 0;
    let mut failed = 0;
    let mut results = Vec::new();

    for file in &files {
        let relative = file.strip_prefix(input_dir).unwrap_or(file.as_path());
        let output = out_dir.join(relative).with_extension("md");
        pb.set_message(relative.display().to_string());

        if output.exists() && !args.overwrite {
            if args.verbose && !args.quiet {
                pb.println(format!("{} {}", "Skipping (exists):".dimmed(), file.display()));
            }
            pb.inc(1);
            continue;
        }

        let conversion = convert_file(file, args);
        if conversion.succeeded() {
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output, &conversion.markdown)?;
            success += 1;
            if args.verbose && !args.quiet {
                pb.println(format!("  {} {}", "->".green(), output.display()));
            }
        } else {
            failed += 1;
            if !args.quiet && !args.json {
                for warning in &conversion.warnings {
                    pb.println(format!(
                        "  {} ({}): {}",
                        "Warning".yellow(),
                        file.display(),
                        warning
                    ));
                }
            }
        }

        if args.json {
            results.push(json!({
                "source": file.display().to_string(),
                "output": output.display().to_string(),
                "exit_code": conversion.exit_code,
                "warnings": conversion.warnings,
                "chars": conversion.markdown.chars().count(),
                "pages": conversion.pages,
            }));
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    if args.json {
        println!(
            "{}",
            json!({ "files": results, "success": success, "failed": failed })
        );
    } else if !args.quiet {
        println!(
            "\n{} {} converted, {} failed.",
            "Done:".green().bold(),
            success,
            failed
        );
    }

    Ok(if failed == 0 { EXIT_SUCCESS } else { EXIT_FAILED })
}

/// Find `.json` page dumps in a directory, sorted by path.
fn collect_dumps(dir: &Path, recursive: bool) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if recursive {
                files.extend(collect_dumps(&path, true)?);
            }
        } else if path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("json"))
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("{}: {}", "Warning".yellow(), warning);
    }
}

fn cmd_version() {
    println!("{} {}", "pagemend".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Text reconstruction for PDF extraction output");
    println!();
    println!("License: MIT");
}
