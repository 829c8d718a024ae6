use birthday_letter::compose::{RenderableDocument, compose};
use birthday_letter::config::{self, LetterConfig};
use birthday_letter::export::{DirectorySink, ExportCoordinator};
use birthday_letter::layout::lay_out;
use birthday_letter::naming::artifact_stem;
use birthday_letter::paginate::PageSize;
use birthday_letter::raster::SvgRasterizer;
use birthday_letter::record::{InputDraft, InputError, InputRecord};
use birthday_letter::{output, preview};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Shared flag for commands that write files.
#[derive(clap::Args, Clone)]
struct OutputArgs {
    /// Directory to write into (created if missing)
    #[arg(long, default_value = "out")]
    output: PathBuf,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pdf,
    Png,
    Both,
}

#[derive(Parser)]
#[command(name = "birthday-letter")]
#[command(about = "Compose a Gujarati birthday letter and export it as PDF or PNG")]
#[command(long_about = "\
Compose a Gujarati birthday letter and export it as PDF or PNG

The letter is described by a small TOML or JSON file:

  recipientName = \"Asha\"
  senderName    = \"Ravi\"                           # optional
  letterDate    = \"2024-03-15\"
  birthDate     = \"1990-07-04\"                     # only month and day are shown
  address       = \"12 Elm St, Springfield, 62704\"  # one line per comma
  wishes        = [0, 4]                           # optional, see 'wishes'

Exports are named birthday-wishes-{recipientName}.pdf / .png.

Layout, page size, fonts and the signature image are configured in
letter.toml, looked up next to the input file unless --config is given.
Run 'birthday-letter gen-config' to generate a documented letter.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: letter.toml next to the input file)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the letter and save it as PDF, PNG, or both
    Export {
        /// Letter input file (.toml or .json)
        input: PathBuf,
        /// Which artifact(s) to produce
        #[arg(long, value_enum, default_value_t = Format::Pdf)]
        format: Format,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Write an HTML preview of the letter
    Preview {
        /// Letter input file (.toml or .json)
        input: PathBuf,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Validate the input and print the composed letter outline
    Check {
        /// Letter input file (.toml or .json)
        input: PathBuf,
    },
    /// List the selectable wish paragraphs with their indices
    Wishes,
    /// Print a stock letter.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Export { input, format, out } => {
            let Some(record) = read_record(&input)? else {
                return Ok(ExitCode::from(2));
            };
            let config = load_config(cli.config.as_deref(), &input)?;
            let region = lay_out(&compose(&record), &config);

            let rasterizer = SvgRasterizer::from_config(&config);
            let sink = DirectorySink::new(&out.output);
            let coordinator =
                ExportCoordinator::new(&rasterizer, &sink, PageSize::from(&config.page));

            if matches!(format, Format::Pdf | Format::Both) {
                let report = coordinator.export_as_document(&region, &record)?;
                output::print_export_report(&report);
            }
            if matches!(format, Format::Png | Format::Both) {
                let report = coordinator.export_as_image(&region, &record)?;
                output::print_export_report(&report);
            }
        }
        Command::Preview { input, out } => {
            let Some(record) = read_record(&input)? else {
                return Ok(ExitCode::from(2));
            };
            let config = load_config(cli.config.as_deref(), &input)?;
            let doc = compose(&record);
            let path = write_preview(&doc, &record, &config, &out.output)?;
            println!("Preview → {}", path.display());
        }
        Command::Check { input } => {
            let Some(record) = read_record(&input)? else {
                return Ok(ExitCode::from(2));
            };
            load_config(cli.config.as_deref(), &input)?;
            output::print_letter_outline(&compose(&record));
            println!("==> Letter is valid");
        }
        Command::Wishes => output::print_wishes(),
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Logs go to stderr so they never mix with command output.
fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Read and validate a draft.
///
/// `None` means required fields were missing; the list has already been
/// printed and the caller should stop without rendering anything.
fn read_record(input: &Path) -> Result<Option<InputRecord>, Box<dyn std::error::Error>> {
    let draft = InputDraft::load(input)?;
    match draft.validate() {
        Ok(record) => Ok(Some(record)),
        Err(InputError::ValidationGap(missing)) => {
            for line in output::format_validation_gap(&missing) {
                eprintln!("{}", line);
            }
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// `--config` if given, otherwise `letter.toml` beside the input (or defaults).
fn load_config(
    explicit: Option<&Path>,
    input: &Path,
) -> Result<LetterConfig, config::ConfigError> {
    match explicit {
        Some(path) => config::load_config_file(path),
        None => {
            let dir = input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            config::load_config(dir)
        }
    }
}

fn write_preview(
    doc: &RenderableDocument,
    record: &InputRecord,
    config: &LetterConfig,
    out_dir: &Path,
) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;
    let html = preview::render_preview(doc, &artifact_stem(record.recipient_name()), config);
    let path = out_dir.join("preview.html");
    std::fs::write(&path, html)?;
    Ok(path)
}
