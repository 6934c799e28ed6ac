//! pagemark CLI - paginate markdown and plain text for print

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use pagemark::render::{to_html, to_json, to_text};
use pagemark::{
    BlockStream, BreakKind, DocumentParser, JsonFormat, PageBreakOptions, PageSize, ParseMode,
    ParseOptions, RenderOptions, StreamStats,
};

#[derive(Parser)]
#[command(name = "pagemark")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Paginate markdown and plain text into print-ready HTML", long_about = None)]
struct Cli {
    /// Input file ("-" for stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Parsing and pagination flags shared by every command.
#[derive(Args, Clone)]
struct LayoutArgs {
    /// Line grammar
    #[arg(long, value_enum, default_value = "auto", global = true)]
    mode: Mode,

    /// Do not break before titles
    #[arg(long, global = true)]
    no_section_breaks: bool,

    /// Do not break before section headers
    #[arg(long, global = true)]
    no_subsection_breaks: bool,

    /// Weighted lines per page
    #[arg(
        long,
        env = "PAGEMARK_PAGE_CAPACITY",
        default_value_t = pagemark::parser::DEFAULT_PAGE_CAPACITY,
        value_parser = clap::value_parser!(u32).range(1..),
        global = true
    )]
    page_capacity: u32,

    /// Do not insert page breaks
    #[arg(long, global = true)]
    no_paginate: bool,
}

impl LayoutArgs {
    fn parse_options(&self) -> ParseOptions {
        let breaks = PageBreakOptions::new()
            .with_section_breaks(!self.no_section_breaks)
            .with_subsection_breaks(!self.no_subsection_breaks)
            .with_page_capacity(self.page_capacity);

        ParseOptions::new()
            .with_mode(self.mode.into())
            .with_page_breaks(breaks)
            .with_pagination(!self.no_paginate)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render to HTML (default)
    Html {
        /// Input file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Paper size for the print stylesheet
        #[arg(long, value_enum, default_value = "letter")]
        page_size: Paper,

        /// Emit a complete HTML document
        #[arg(short, long)]
        standalone: bool,

        /// Omit the embedded stylesheet
        #[arg(long)]
        no_styles: bool,

        /// Number pages in the output
        #[arg(long)]
        page_numbers: bool,

        /// Document title for standalone output
        #[arg(long)]
        title: Option<String>,
    },

    /// Render to paginated plain text
    Text {
        /// Input file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Prefix each page with its number
        #[arg(long)]
        page_numbers: bool,
    },

    /// Dump the block stream as JSON
    Json {
        /// Input file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show structure and pagination statistics
    Info {
        /// Input file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Markdown if any sigil appears, plain text otherwise
    Auto,
    /// Explicit `#` and `-` sigils
    Markdown,
    /// Heuristic structure detection
    Plain,
}

impl From<Mode> for ParseMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Auto => ParseMode::Auto,
            Mode::Markdown => ParseMode::Markdown,
            Mode::Plain => ParseMode::PlainText,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Paper {
    Letter,
    A4,
    Legal,
    Tabloid,
}

impl From<Paper> for PageSize {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::Letter => PageSize::Letter,
            Paper::A4 => PageSize::A4,
            Paper::Legal => PageSize::Legal,
            Paper::Tabloid => PageSize::Tabloid,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = cli.layout.parse_options();

    let result = match cli.command {
        Some(Commands::Html {
            input,
            output,
            page_size,
            standalone,
            no_styles,
            page_numbers,
            title,
        }) => {
            let mut render_options = RenderOptions::new()
                .with_page_size(page_size.into())
                .with_standalone(standalone)
                .with_styles(!no_styles)
                .with_page_numbers(page_numbers);
            if let Some(title) = title {
                render_options = render_options.with_title(title);
            }
            cmd_html(&input, output.as_deref(), &options, &render_options)
        }
        Some(Commands::Text {
            input,
            output,
            page_numbers,
        }) => cmd_text(&input, output.as_deref(), &options, page_numbers),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), &options, compact),
        Some(Commands::Info { input }) => cmd_info(&input, &options),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: render HTML if input is provided
            if let Some(input) = cli.input {
                cmd_html(
                    &input,
                    cli.output.as_deref(),
                    &options,
                    &RenderOptions::default(),
                )
            } else {
                println!("{}", "Usage: pagemark <FILE> [-o OUTPUT]".yellow());
                println!("       pagemark --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read the whole input, treating "-" as stdin.
fn read_input(input: &Path) -> io::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(input)
    }
}

fn parse_input(
    input: &Path,
    options: &ParseOptions,
) -> Result<BlockStream, Box<dyn std::error::Error>> {
    options.page_breaks.validate()?;
    let text = read_input(input)?;
    let stream = DocumentParser::new(options.clone()).parse(&text);
    log::info!(
        "Parsed {} as {:?}: {} items",
        input.display(),
        stream.format,
        stream.len()
    );
    Ok(stream)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    options: &ParseOptions,
    render_options: &RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let stream = parse_input(input, options)?;
    let html = to_html(&stream, render_options)?;
    write_output(output, &html)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    options: &ParseOptions,
    page_numbers: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let stream = parse_input(input, options)?;
    let render_options = RenderOptions::new().with_page_numbers(page_numbers);
    let text = to_text(&stream, &render_options)?;
    write_output(output, &text)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    options: &ParseOptions,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let stream = parse_input(input, options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = to_json(&stream, format)?;
    write_output(output, &json)
}

fn cmd_info(input: &Path, options: &ParseOptions) -> Result<(), Box<dyn std::error::Error>> {
    let stream = parse_input(input, options)?;
    let stats = StreamStats::from_stream(&stream);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {:?}", "Format".bold(), stream.format);
    println!("{}: {}", "Pages".bold(), stats.page_count);
    println!(
        "{}: {}",
        "Page capacity".bold(),
        options.page_breaks.page_capacity
    );

    println!();
    println!("{}", "Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Titles".bold(), stats.title_count);
    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "Subsections".bold(), stats.subsection_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!(
        "{}: {} ({} items)",
        "Lists".bold(),
        stats.list_count,
        stats.list_item_count
    );
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    if stream.is_paginated() {
        println!();
        println!("{}", "Page Breaks".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());

        for (number, page) in stream.pages().iter().enumerate() {
            let reason = match page.opened_by {
                Some(BreakKind::Initial) => "start",
                Some(BreakKind::SectionBreak) => "title",
                Some(BreakKind::SubsectionBreak) => "section",
                Some(BreakKind::Overflow) => "overflow",
                None => "-",
            };
            println!(
                "  {} page {} ({} blocks, {})",
                "├─".dimmed(),
                number + 1,
                page.block_count(),
                reason
            );
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pagemark".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown and plain-text pagination tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/pagemark".dimmed());
    println!("License: MIT");
}
