// SPDX-License-Identifier: MIT
//
// strata — run a file through the display filter pipeline and print the
// result.
//
// This binary wires the two crates together:
//
//   strata-text    → buffer loading, selections
//   strata-display → display buffer, filter registry, pipeline
//
// Each invocation is one render pass:
//
//   file → Buffer → DisplayBuffer (one atom) → filters → text or atom dump
//
// Nothing is painted; the output is the rendered text (gutters and expanded
// tabs included) or, with --atoms, one line per atom with its style.

use std::env;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use strata_display::{
    DisplayBuffer, FilterContext, FilterParameters, FilterPipeline, FilterRegistry,
};
use strata_text::{Buffer, Selection};
use tracing::{debug, Level};

/// Filters applied when none are given: coloring first so that no match is
/// lost to a split made by a later filter.
const DEFAULT_PIPELINE: [&str; 4] = ["hlcpp", "number_lines", "expand_tabs", "highlight_selections"];

const USAGE: &str = "\
usage: strata [OPTIONS] FILE

options:
  -f, --filter NAME      append a filter (repeatable)
  -p, --param KEY=VALUE  parameter for the last --filter
  -s, --select B..E      select chars B..E (repeatable)
  -l, --lines FIRST:N    render N lines from line FIRST (1-based)
  -a, --atoms            print one line per atom instead of text
  -v                     more logging on stderr (-vv for trace)
  -h, --help             show this help

filters: hlcpp, regex, expand_tabs, number_lines, highlight_selections";

// ─── Errors ─────────────────────────────────────────────────────────────────

#[derive(Debug)]
enum CliError {
    Usage(String),
    Io(PathBuf, io::Error),
    Filter(strata_display::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "{msg}\n\n{USAGE}"),
            Self::Io(path, e) => write!(f, "{}: {e}", path.display()),
            Self::Filter(e) => write!(f, "{e}"),
        }
    }
}

impl From<strata_display::Error> for CliError {
    fn from(e: strata_display::Error) -> Self {
        Self::Filter(e)
    }
}

// ─── Options ────────────────────────────────────────────────────────────────

/// One `--filter` with the `--param`s that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FilterSpec {
    name: String,
    params: Vec<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    path: Option<PathBuf>,
    filters: Vec<FilterSpec>,
    selections: Vec<Selection>,
    lines: Option<(usize, usize)>,
    atoms: bool,
    verbosity: u8,
    help: bool,
}

fn parse_selection(arg: &str) -> Result<Selection, CliError> {
    let bad = || CliError::Usage(format!("bad selection '{arg}' (expected B..E)"));
    let (b, e) = arg.split_once("..").ok_or_else(bad)?;
    let b = b.trim().parse().map_err(|_| bad())?;
    let e = e.trim().parse().map_err(|_| bad())?;
    Ok(Selection::ordered(b, e))
}

fn parse_lines(arg: &str) -> Result<(usize, usize), CliError> {
    let bad = || CliError::Usage(format!("bad line window '{arg}' (expected FIRST:N)"));
    let (first, count) = arg.split_once(':').ok_or_else(bad)?;
    let first: usize = first.trim().parse().map_err(|_| bad())?;
    let count = count.trim().parse().map_err(|_| bad())?;
    if first == 0 {
        return Err(bad());
    }
    Ok((first - 1, count))
}

fn parse_args<I>(args: I) -> Result<Options, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut opts = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| CliError::Usage(format!("{flag} needs a value")))
        };
        match arg.as_str() {
            "-h" | "--help" => opts.help = true,
            "-a" | "--atoms" => opts.atoms = true,
            "-v" => opts.verbosity += 1,
            "-vv" => opts.verbosity += 2,
            "-f" | "--filter" => {
                let name = value(&arg)?;
                opts.filters.push(FilterSpec {
                    name,
                    params: Vec::new(),
                });
            }
            "-p" | "--param" => {
                let param = value(&arg)?;
                let spec = opts
                    .filters
                    .last_mut()
                    .ok_or_else(|| CliError::Usage(format!("{arg} before any --filter")))?;
                spec.params.push(param);
            }
            "-s" | "--select" => opts.selections.push(parse_selection(&value(&arg)?)?),
            "-l" | "--lines" => opts.lines = Some(parse_lines(&value(&arg)?)?),
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(CliError::Usage(format!("unknown option {flag}")));
            }
            _ => {
                if opts.path.is_some() {
                    return Err(CliError::Usage("only one FILE may be given".to_string()));
                }
                opts.path = Some(PathBuf::from(arg));
            }
        }
    }
    Ok(opts)
}

// ─── Rendering ──────────────────────────────────────────────────────────────

fn build_pipeline(
    registry: &FilterRegistry,
    context: &FilterContext,
    specs: &[FilterSpec],
) -> Result<FilterPipeline, CliError> {
    let mut pipeline = FilterPipeline::new();
    if specs.is_empty() {
        for name in DEFAULT_PIPELINE {
            pipeline.add_named(registry, name, context, &FilterParameters::new())?;
        }
        return Ok(pipeline);
    }
    for spec in specs {
        let params = FilterParameters::from_tokens(&spec.params)?;
        pipeline.add_named(registry, &spec.name, context, &params)?;
    }
    Ok(pipeline)
}

/// One line per atom: range, colors, attributes, rendered width and text.
fn dump_atoms(display: &DisplayBuffer<'_>, out: &mut impl Write) -> io::Result<()> {
    let buffer = display.buffer();
    for atom in display.atoms() {
        writeln!(
            out,
            "{:>6}..{:<6} fg={:<7} bg={:<7} attrs={:<9} width={:<3} {:?}",
            atom.begin(),
            atom.end(),
            atom.fg,
            atom.bg,
            atom.attrs.to_string(),
            atom.width(buffer),
            atom.text(buffer),
        )?;
    }
    Ok(())
}

fn render(opts: &Options, path: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let buffer = Buffer::from_file(path).map_err(|e| CliError::Io(path.to_path_buf(), e))?;
    let registry = FilterRegistry::with_builtins()?;
    let context = FilterContext::default();
    context.selections.borrow_mut().extend(opts.selections.iter().copied());

    let pipeline = build_pipeline(&registry, &context, &opts.filters)?;
    debug!(filters = ?pipeline.ids(), "pipeline built");

    let mut display = match opts.lines {
        Some((first, count)) => DisplayBuffer::for_lines(&buffer, first, count),
        None => DisplayBuffer::new(&buffer, 0..buffer.len_chars()),
    };
    pipeline.apply(&mut display);
    let atoms = display.len();
    debug!(atoms, "render pass done");

    let written = if opts.atoms {
        dump_atoms(&display, out)
    } else {
        out.write_all(display.render_text().as_bytes())
    };
    written.map_err(|e| CliError::Io(PathBuf::from("<stdout>"), e))
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() {
    let opts = parse_args(env::args().skip(1)).unwrap_or_else(|e| {
        eprintln!("strata: {e}");
        process::exit(2);
    });
    if opts.help {
        println!("{USAGE}");
        return;
    }
    init_logging(opts.verbosity);

    let Some(path) = opts.path.clone() else {
        eprintln!("strata: {}", CliError::Usage("no FILE given".to_string()));
        process::exit(2);
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = render(&opts, &path, &mut out) {
        eprintln!("strata: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
