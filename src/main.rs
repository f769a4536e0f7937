//! mdocx - Markdown to DOCX renderer

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use mdocx::config::RenderConfig;
use mdocx::markdown::{InlineOrder, clean_response, extract_code};
use mdocx::util::{guess_file_name, output_file_name};
use mdocx::{Error, render_with_config};

#[derive(Parser)]
#[command(name = "mdocx")]
#[command(version, about = "Render Markdown outlines and bodies to DOCX", long_about = None)]
#[command(after_help = "EXAMPLES:
    mdocx render -t \"My Paper\" --outline outline.md --body body.md
    mdocx render -t Notes --outline o.md --body b.md -o out/notes.docx --config style.toml
    mdocx extract answer.md -o src")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Render an outline and a body into one DOCX file
    Render(RenderArgs),
    /// Write the first fenced code block of a file to disk
    Extract {
        /// Input file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory for the extracted code
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let result = match cli.command {
        Command::Render(args) => render(args),
        Command::Extract { input, output } => extract(&input, &output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Args)]
struct RenderArgs {
    /// Document title
    #[arg(short, long)]
    title: String,

    /// Markdown file with the outline
    #[arg(long, value_name = "FILE")]
    outline: PathBuf,

    /// Markdown file with the body
    #[arg(long, value_name = "FILE")]
    body: PathBuf,

    /// Output file (default: output/<title>.docx)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// TOML style configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Group inline spans by pattern instead of source order
    #[arg(long)]
    pass_order: bool,

    /// Render the inputs as-is, without response cleanup
    #[arg(long)]
    no_cleanup: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

fn render(args: RenderArgs) -> Result<(), Error> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    if args.pass_order {
        config.inline.order = InlineOrder::Pass;
    }

    let mut outline = read_input(&args.outline)?;
    let mut body = read_input(&args.body)?;
    if !args.no_cleanup {
        outline = clean_response(&outline, &config.cleanup);
        body = clean_response(&body, &config.cleanup);
    }

    let output = args
        .output
        .unwrap_or_else(|| Path::new("output").join(output_file_name(&args.title)));

    render_with_config(&args.title, &outline, &body, &output, &config)?;

    if !args.quiet {
        println!("Wrote {}", output.display());
    }
    Ok(())
}

fn extract(input: &Path, dir: &Path) -> Result<(), Error> {
    let text = read_input(input)?;
    let found = extract_code(&text);

    let Some(code) = found.code else {
        log::warn!("no fenced code block in {}", input.display());
        println!("{}", found.text);
        return Ok(());
    };

    let file_name = guess_file_name(found.language.as_deref().unwrap_or(""));
    let path = dir.join(file_name);
    fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    fs::write(&path, code).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;

    println!("{}", found.text);
    eprintln!("Wrote code to {}", path.display());
    Ok(())
}

fn read_input(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}
