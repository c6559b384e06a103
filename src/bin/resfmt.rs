use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use is_terminal::IsTerminal;
use resfmt::{
    parse_utc_offset, BodyFormatter, EolStyle, FormatOptions, HttpExchange, PreviewOption,
    PreviewRenderer,
};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// Content-type aware pretty-printer for HTTP response bodies.
///
/// resfmt reads a response body from stdin or a file and reformats it
/// according to its content type: JSON is pretty-printed (including
/// `/Date(ms)/` rewriting and nested JSON-in-string payloads), anything
/// else passes through unchanged. It can also render a captured
/// request/response exchange as a preview document.
#[derive(Parser, Debug)]
#[command(name = "resfmt")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file. If not specified, reads from stdin.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output file. If not specified, writes to stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Declared content type of the body, e.g. "application/json".
    #[arg(short = 'c', long, value_name = "TYPE")]
    content_type: Option<String>,

    /// Number of spaces per indentation level.
    #[arg(short, long, default_value = "2")]
    indent: usize,

    /// Line ending style.
    #[arg(long, value_enum, default_value = "native")]
    eol: EolArg,

    /// UTC offset for rewriting /Date(ms)/ tokens, e.g. "+08:00".
    /// Defaults to the local time zone.
    #[arg(short = 'z', long, value_name = "OFFSET")]
    timezone: Option<String>,

    /// Don't warn when a JSON content type carries a body that isn't JSON.
    #[arg(long)]
    no_validate: bool,

    /// Treat the input as a JSON exchange snapshot ({"request":…,
    /// "response":…}) and render a preview document instead of a bare body.
    #[arg(long)]
    exchange: bool,

    /// Which parts of an exchange snapshot to render.
    #[arg(long, value_enum, default_value = "full")]
    preview: PreviewArg,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EolArg {
    Native,
    Lf,
    Crlf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PreviewArg {
    Full,
    Headers,
    Body,
    Exchange,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);

    if let Err(e) = run(args) {
        eprintln!("resfmt: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let input = match &args.file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?,
        None => {
            if io::stdin().is_terminal() {
                return Err("no input file and stdin is a terminal; \
                            pipe a response body or pass FILE"
                    .into());
            }
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let mut options = FormatOptions::default();
    options.indent_spaces = args.indent;
    options.eol_style = match args.eol {
        EolArg::Native => EolStyle::native(),
        EolArg::Lf => EolStyle::Lf,
        EolArg::Crlf => EolStyle::Crlf,
    };
    if let Some(offset) = &args.timezone {
        options.utc_offset = Some(parse_utc_offset(offset)?);
    }

    let formatter = BodyFormatter::with_options(options);

    let output = if args.exchange {
        let exchange: HttpExchange = serde_json::from_str(&input)
            .map_err(|e| format!("invalid exchange snapshot: {}", e))?;
        let option = match args.preview {
            PreviewArg::Full => PreviewOption::Full,
            PreviewArg::Headers => PreviewOption::Headers,
            PreviewArg::Body => PreviewOption::Body,
            PreviewArg::Exchange => PreviewOption::Exchange,
        };
        PreviewRenderer::new(formatter, option).render(&exchange)
    } else {
        formatter
            .format_body(&input, args.content_type.as_deref(), args.no_validate)
            .text
    };

    if let Some(path) = args.output {
        fs::write(&path, &output)
            .map_err(|e| format!("cannot write '{}': {}", path.display(), e))?;
    } else {
        io::stdout().write_all(output.as_bytes())?;
    }

    Ok(())
}
