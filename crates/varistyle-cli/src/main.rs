//! `varistyle` - resolve style specs from the command line.
//!
//! ```text
//! varistyle resolve button.yaml -s intent=primary -s size=lg -c w-full
//! varistyle resolve menu.yaml -f item --json
//! varistyle merge layout.yaml text.yaml -s size=lg
//! echo "  a   b " | varistyle flatten
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use console::Style;
use log::{debug, LevelFilter};
use varistyle::{
    create_style_function, flatten, merge_style_functions, Selection, StyleFactory, StyleSpec,
};

/// Resolve variant-driven class names from YAML or JSON style specs.
#[derive(Parser, Debug)]
#[command(name = "varistyle")]
#[command(version)]
#[command(about = "Resolve variant-driven class names from style specs")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve one spec against a selection
    Resolve(ResolveArgs),

    /// Resolve several specs and join their outputs in order
    Merge(MergeArgs),

    /// Normalize whitespace in the given text (or stdin)
    Flatten(FlattenArgs),
}

#[derive(Args, Debug)]
struct SelectArgs {
    /// Select a choice for a variant group
    #[arg(short, long = "select", value_parser = parse_selection_pair)]
    #[arg(value_name = "GROUP=CHOICE")]
    select: Vec<(String, String)>,

    /// Load selections from a JSON object file; -s entries win
    #[arg(long = "selection", value_name = "FILE")]
    selection_file: Option<PathBuf>,

    /// Extra class name appended to the result
    #[arg(short = 'c', long = "class-name", value_name = "CLASS")]
    class_name: Option<String>,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    /// Spec file (.yaml, .yml or .json)
    spec: PathBuf,

    /// Declare an output field; switches to multi-field output
    #[arg(short, long = "field", value_name = "NAME")]
    fields: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    selection: SelectArgs,
}

#[derive(Args, Debug)]
struct MergeArgs {
    /// Spec files, merged in the given order
    #[arg(required = true, num_args = 1..)]
    specs: Vec<PathBuf>,

    #[command(flatten)]
    selection: SelectArgs,
}

#[derive(Args, Debug)]
struct FlattenArgs {
    /// Text fragments; stdin is read when none are given
    text: Vec<String>,
}

fn parse_selection_pair(raw: &str) -> std::result::Result<(String, String), String> {
    let (group, choice) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected GROUP=CHOICE, got '{}'", raw))?;
    let group = group.trim();
    if group.is_empty() {
        return Err(format!("missing group name in '{}'", raw));
    }
    Ok((group.to_string(), choice.trim().to_string()))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG, when set, overrides the flag.
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

fn load_spec(path: &Path) -> Result<StyleSpec> {
    let spec = StyleSpec::from_file(path)
        .with_context(|| format!("failed to load spec {}", path.display()))?;
    for (name, group) in spec.variants() {
        let choices = group.len();
        let boolean = group.is_boolean();
        debug!("group '{name}': {choices} choice(s), boolean {boolean}");
    }
    Ok(spec)
}

fn load_selection(args: &SelectArgs) -> Result<Selection> {
    let from_file = match &args.selection_file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read selection {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid selection in {}", path.display()))?
        }
        None => Selection::new(),
    };
    let pairs: Selection = args.select.iter().cloned().collect();
    let selection = from_file.merge(pairs);
    for (group, choice) in selection.iter() {
        debug!("select {group}={choice}");
    }
    Ok(selection)
}

fn run(cli: Cli, out: &mut impl Write, input: &mut impl Read) -> Result<()> {
    match cli.command {
        Commands::Resolve(args) => resolve(args, out),
        Commands::Merge(args) => merge(args, out),
        Commands::Flatten(args) => {
            let text = if args.text.is_empty() {
                let mut buf = String::new();
                input
                    .read_to_string(&mut buf)
                    .context("failed to read stdin")?;
                flatten([buf])
            } else {
                flatten(args.text)
            };
            writeln!(out, "{}", text)?;
            Ok(())
        }
    }
}

fn resolve(args: ResolveArgs, out: &mut impl Write) -> Result<()> {
    let spec = load_spec(&args.spec)?;
    let selection = load_selection(&args.selection)?;
    let class_name = args.selection.class_name.as_deref();

    if args.fields.is_empty() {
        let style = create_style_function(spec);
        let result = style.call(Some(&selection), class_name);
        if args.json {
            writeln!(out, "{}", serde_json::to_string(&result)?)?;
        } else {
            writeln!(out, "{}", result)?;
        }
        return Ok(());
    }

    let factory = StyleFactory::try_new(args.fields)?;
    let output = factory.create(spec).call(Some(&selection), class_name);
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        writeln!(out, "className: {}", output.class_name())?;
        for (name, value) in output.fields() {
            writeln!(out, "{}: {}", name, value)?;
        }
    }
    Ok(())
}

fn merge(args: MergeArgs, out: &mut impl Write) -> Result<()> {
    let specs = args
        .specs
        .iter()
        .map(|path| load_spec(path))
        .collect::<Result<Vec<_>>>()?;
    let selection = load_selection(&args.selection)?;

    let merged = merge_style_functions(specs.into_iter().map(create_style_function));
    debug!("merged {} style function(s)", merged.len());
    let class_name = args.selection.class_name.as_deref();
    writeln!(out, "{}", merged.call(Some(&selection), class_name))?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = run(cli, &mut out, &mut io::stdin().lock()) {
        let label = Style::new().red().bold().for_stderr().apply_to("error:");
        eprintln!("{} {:#}", label, err);
        process::exit(1);
    }
}
