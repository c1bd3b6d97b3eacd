//! Markscan - byte-level Markdown scanning primitives.
//!
//! This binary exposes the markscan scanners on the command line, one
//! result line per input line from files or stdin.

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, Command};
use log::{debug, error, info, trace, LevelFilter};
use markscan_config::{Config, ScanConfig};
use markscan_core::{MarkscanError, PrioritizedList, Result, Window};
use markscan_scan::{
    escape_html, find_attribute_indices_reverse, find_closure, find_email_index, find_url_index,
    resolve_entity_names, resolve_numeric_references, unescape_punctuations, url_escape,
};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

/// A byte transformation that borrows its input when nothing changes.
type Pass = for<'a> fn(&'a [u8]) -> Cow<'a, [u8]>;

fn main() {
    let cli = <Cli as ClapParser>::parse();

    // Handle --paths flag
    if cli.show_paths {
        cli::show_paths();
        return;
    }

    setup_logging(&cli.log_level);
    info!("Markscan v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Set up logging based on the log level argument.
fn setup_logging(level: &str) {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Main application logic.
fn run(cli: &Cli) -> Result<()> {
    let command = cli
        .command
        .as_ref()
        .ok_or_else(|| MarkscanError::Input("no subcommand given".into()))?;

    let mut config = Config::load_with_override(cli.config.as_deref())?;
    command.apply_overrides(&mut config.scan);
    debug!("Scan settings: {:?}", config.scan);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let files = &command.input().files;

    if files.is_empty() {
        info!("Reading from stdin");
        process(io::stdin().lock(), command, &config.scan, &mut out)?;
    } else {
        for path in files {
            info!("Processing file: {}", path.display());
            let reader = BufReader::new(File::open(path)?);
            process(reader, command, &config.scan, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Run `command` over every line of `reader`.
fn process<R: BufRead, W: Write>(
    reader: R,
    command: &Command,
    scan: &ScanConfig,
    out: &mut W,
) -> Result<()> {
    for line in reader.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        trace!("Input line: {}", String::from_utf8_lossy(&line));
        emit_line(&line, command, scan, out)?;
    }
    Ok(())
}

/// Write the result of `command` for one line, newline included.
fn emit_line<W: Write>(line: &[u8], command: &Command, scan: &ScanConfig, out: &mut W) -> Result<()> {
    match command {
        Command::EscapeHtml { .. } => out.write_all(&escape_html(line))?,
        Command::Unescape { .. } => out.write_all(&unescape_punctuations(line))?,
        Command::Resolve { .. } => out.write_all(&apply_passes(line, &reference_passes()))?,
        Command::UrlEscape { .. } => out.write_all(&url_escape(line, scan.resolve_references))?,
        Command::Attributes { .. } => {
            out.write_all(format_attributes(line, scan.escaped_quotes).as_bytes())?
        }
        Command::Closure {
            open, close, from, ..
        } => out.write_all(format_closure(line, *open, *close, *from, scan).as_bytes())?,
        Command::Autolink { .. } => out.write_all(format_autolink(line).as_bytes())?,
    }
    out.write_all(b"\n")?;
    Ok(())
}

/// Character reference passes, numeric before named.
fn reference_passes() -> PrioritizedList<Pass> {
    let mut passes = PrioritizedList::new();
    passes.push(resolve_entity_names as Pass, 200);
    passes.push(resolve_numeric_references as Pass, 100);
    passes.sort();
    passes
}

/// Feed `line` through each pass in order.
fn apply_passes<'a>(line: &'a [u8], passes: &PrioritizedList<Pass>) -> Cow<'a, [u8]> {
    let mut current = Cow::Borrowed(line);
    for pass in passes.values() {
        current = match current {
            Cow::Borrowed(bytes) => pass(bytes),
            Cow::Owned(bytes) => Cow::Owned(pass(&bytes).into_owned()),
        };
    }
    current
}

/// `#id .class name="value"` for a trailing attribute block, `-` if absent.
fn format_attributes(line: &[u8], escaped_quotes: bool) -> String {
    let Some(records) = find_attribute_indices_reverse(line, escaped_quotes) else {
        return "-".to_string();
    };
    records
        .iter()
        .map(|record| {
            let name = String::from_utf8_lossy(record.name(line));
            if record.is_boolean(line) {
                name.into_owned()
            } else {
                format!("{}=\"{}\"", name, String::from_utf8_lossy(record.value(line)))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Offset of the closer within the line, or `-`.
fn format_closure(line: &[u8], open: u8, close: u8, from: usize, scan: &ScanConfig) -> String {
    let window = match Window::new(line, from, line.len()) {
        Ok(window) => window,
        Err(e) => {
            debug!("Skipping line: {}", e);
            return "-".to_string();
        }
    };
    match find_closure(window.bytes(), open, close, scan.code_spans, scan.allow_nesting) {
        Some(offset) => window.absolute(offset).to_string(),
        None => "-".to_string(),
    }
}

/// `url <end>` or `email <end>` for an autolink at the line start, or `-`.
fn format_autolink(line: &[u8]) -> String {
    if let Some(end) = find_url_index(line) {
        format!("url {}", end)
    } else if let Some(end) = find_email_index(line) {
        format!("email {}", end)
    } else {
        "-".to_string()
    }
}
