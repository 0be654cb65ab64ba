// Command-line interface for repdoc
//
// This binary turns a markdown report into a Word document laid out as an academic report:
// title page, table of contents, headings, lists, tables and code blocks.
//
// The heavy lifting lives in the repdoc-babel crate. This binary reads files, layers the
// configuration, sets up logging and reports errors. Nothing else.
//
// Converting:
//
// With no arguments, repdoc converts the input path named in the configuration into the
// configured output path. The only source format is report markdown (.md) and the only target
// is docx; --from is needed for inputs with another extension.
// Usage:
//  repdoc [<input>] [--from report-md] [-o <file>]   - Convert (default)
//  repdoc convert [<input>] [-o <file>] ...          - Same as above (explicit)
//  repdoc inspect <path> [<transform>]   - Execute a transform (defaults to "ir-treeviz")
//  repdoc generate-config                - Print the default configuration
//  repdoc --list-transforms              - List available transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix. Keys that map onto configuration (toc, title-page,
// inline-formatting, toc-mode, page-size) are applied to the loaded configuration, the rest are
// handed to the format or transform.
// Example:
//  repdoc report.md --extra-toc-mode field --extra-title-page false

use repdoc_cli::error::CliError;
use repdoc_cli::transforms;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use repdoc_babel::formats::docx::{render_docx, DocxFormat, DocxOptions, PageSize, TocMode};
use repdoc_babel::formats::markdown::ScanRules;
use repdoc_babel::FormatRegistry;
use repdoc_config::{Loader, RepdocConfig};
use std::collections::HashMap;
use std::fs;
use std::str::FromStr;
use tracing::{debug, info};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "inspect", "generate-config", "help"];

const SOURCE_FORMATS: &[&str] = &["report-md"];
const TARGET_FORMATS: &[&str] = &["docx"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("repdoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert markdown reports into Word documents")
        .long_about(
            "repdoc converts a markdown report into a .docx document with a title page,\n\
            a table of contents and a fixed report layout.\n\n\
            Commands:\n  \
            - convert: Convert a report (default command)\n  \
            - inspect: View what the scanner makes of a report\n  \
            - generate-config: Print the default configuration\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            repdoc                                   # Convert the configured input\n  \
            repdoc report.md -o report.docx          # Convert a given file\n  \
            repdoc report.md --extra-toc false       # Skip the table of contents\n  \
            repdoc inspect report.md                 # Print the document tree\n  \
            repdoc inspect report.md lines           # Per-line classification",
        )
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a repdoc.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect how a report is scanned")
                .long_about(
                    "View the intermediate representation of a report before it is rendered.\n\n\
                    Transforms:\n  \
                    - ir-treeviz:  IR as tree visualization (default)\n  \
                    - ir-json:     IR as JSON\n  \
                    - lines:       Classification of every source line\n\n\
                    Extra Parameters:\n  \
                    --extra-inlines      Show inline spans under each block (ir-treeviz)\n\n\
                    Examples:\n  \
                    repdoc inspect report.md                    # Tree visualization\n  \
                    repdoc inspect report.md ir-json            # JSON output\n  \
                    repdoc inspect report.md --extra-inlines    # Tree with inline spans",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the report file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'ir-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a report (default command)")
                .long_about(
                    "Convert a report markdown file (.md) into a Word document (.docx).\n\n\
                    The input defaults to input.path from the configuration and the output to\n\
                    output.path, unless -o is given. Files with another extension need\n\
                    --from report-md.\n\n\
                    Examples:\n  \
                    repdoc convert report.md -o report.docx   # Word document\n  \
                    repdoc notes.txt --from report-md         # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path (defaults to input.path from the configuration)")
                        .required(false)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_parser(clap::builder::PossibleValuesParser::new(SOURCE_FORMATS))
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .default_value("docx")
                        .value_parser(clap::builder::PossibleValuesParser::new(TARGET_FORMATS))
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path")
                        .long_help(
                            "Path to write the Word document.\n\n\
                            Defaults to output.path from the configuration.",
                        )
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("generate-config")
                .about("Print the default configuration")
                .long_about(
                    "Prints the embedded default configuration.\n\n\
                    Save it as repdoc.toml next to your report and edit it to change the title\n\
                    page, the table of contents or the scanner rules.\n\n\
                    Examples:\n  \
                    repdoc generate-config > repdoc.toml",
                ),
        )
}

/// Parse the command line, injecting `convert` when no subcommand was given.
fn parse_command_line(cleaned_args: &[String]) -> ArgMatches {
    let cli = build_cli();
    let names_subcommand = cleaned_args
        .get(1)
        .is_some_and(|arg| SUBCOMMANDS.contains(&arg.as_str()));

    let mut with_convert = vec![
        cleaned_args
            .first()
            .cloned()
            .unwrap_or_else(|| "repdoc".to_string()),
        "convert".to_string(),
    ];
    with_convert.extend(cleaned_args.iter().skip(1).cloned());

    match cli.clone().try_get_matches_from(cleaned_args) {
        Ok(m) if m.subcommand().is_some() || m.get_flag("list-transforms") => m,
        Ok(_) => cli
            .try_get_matches_from(with_convert)
            .unwrap_or_else(|e| e.exit()),
        Err(e) => {
            let shows_info = matches!(
                e.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            );
            if names_subcommand || shows_info {
                e.exit();
            }
            cli.try_get_matches_from(with_convert)
                .unwrap_or_else(|e2| e2.exit())
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);
    let matches = parse_command_line(&cleaned_args);

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    if let Err(err) = run(&matches, &mut extra_params) {
        report_error(&err);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches, extra_params: &mut HashMap<String, String>) -> Result<(), CliError> {
    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()))?;
    init_logging(&config.log.level);
    apply_config_overrides(&mut config, extra_params)?;

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .map(String::as_str)
                .unwrap_or_default();
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, extra_params, &config)
        }
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .cloned()
                .unwrap_or_else(|| config.input.path.clone());
            let registry = registry_from_config(&config);

            // Auto-detect --from if not provided
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.clone(),
                None => registry
                    .detect_format_from_filename(&input)
                    .ok_or_else(|| CliError::UnknownFormat(input.clone()))?,
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, &input, &from, output, extra_params, &config)
        }
        Some(("generate-config", _)) => {
            print!("{}", repdoc_config::default_toml());
            Ok(())
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// The single place errors turn into messages.
fn report_error(err: &CliError) {
    match err {
        CliError::InputNotFound(path) => {
            eprintln!("Error: file '{}' not found", path.display());
            eprintln!("Pass the report path as an argument or set input.path in repdoc.toml");
        }
        other => eprintln!("Error: {other}"),
    }
}

/// Route `tracing` output to stderr, filtered by `RUST_LOG` or the configured level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

fn registry_from_config(config: &RepdocConfig) -> FormatRegistry {
    FormatRegistry::with_settings(
        ScanRules::from(&config.scan),
        DocxOptions::from(&config.convert.docx),
    )
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &RepdocConfig,
) -> Result<(), CliError> {
    let source = fs::read_to_string(path).map_err(|e| CliError::reading(path, e))?;
    let rules = ScanRules::from(&config.scan);
    let output = transforms::execute_transform(&source, transform, &rules, extra_params)?;
    print!("{output}");
    Ok(())
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &RepdocConfig,
) -> Result<(), CliError> {
    registry.get(from)?;

    let source = fs::read_to_string(input).map_err(|e| CliError::reading(input, e))?;
    debug!(input, from, bytes = source.len(), "read input");

    let doc = registry.parse(&source, from)?;

    let format = DocxFormat::new(DocxOptions::from(&config.convert.docx));
    let options = format.resolve_options(extra_params)?;
    let rendered = render_docx(&doc, &options)?;
    let path = output.unwrap_or(config.output.path.as_str());
    write_output(path, &rendered.bytes)?;
    info!(path, paragraphs = rendered.stats.paragraphs, "document written");
    println!("Word document created: {path}");
    println!("Paragraphs: {}", rendered.stats.paragraphs);
    Ok(())
}

fn write_output(path: &str, bytes: &[u8]) -> Result<(), CliError> {
    fs::write(path, bytes).map_err(|source| CliError::Write {
        path: path.into(),
        source,
    })
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("  ir-treeviz  - IR as tree visualization (default)");
    println!("  ir-json     - IR as JSON");
    println!("  lines       - Classification of every source line\n");

    println!("Transform names:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> Result<RepdocConfig, CliError> {
    let loader = Loader::new().with_optional_file("repdoc.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    Ok(loader.build()?)
}

/// Move configuration-backed extras into the config, leaving format parameters behind.
fn apply_config_overrides(
    config: &mut RepdocConfig,
    extra_params: &mut HashMap<String, String>,
) -> Result<(), CliError> {
    let docx = &mut config.convert.docx;

    if let Some(raw) = take_override(extra_params, &["toc"]) {
        docx.toc.enabled = parse_bool_arg("toc", &raw)?;
    }
    if let Some(raw) = take_override(extra_params, &["title-page", "titlepage"]) {
        docx.title_page.enabled = parse_bool_arg("title-page", &raw)?;
    }
    if let Some(raw) = take_override(extra_params, &["inline-formatting", "inline"]) {
        docx.inline_formatting = parse_bool_arg("inline-formatting", &raw)?;
    }
    if let Some(raw) = take_override(extra_params, &["toc-mode"]) {
        docx.toc.mode = TocMode::from_str(&raw).map_err(|reason| CliError::InvalidOption {
            flag: "toc-mode".to_string(),
            value: raw.clone(),
            reason,
        })?;
    }
    if let Some(raw) = take_override(extra_params, &["page-size"]) {
        docx.page.size = PageSize::from_str(&raw).map_err(|reason| CliError::InvalidOption {
            flag: "page-size".to_string(),
            value: raw.clone(),
            reason,
        })?;
    }

    Ok(())
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> Result<bool, CliError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" => Ok(true),
        "false" | "0" | "no" | "n" | "off" => Ok(false),
        other => Err(CliError::InvalidOption {
            flag: flag.to_string(),
            value: other.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
