// Command-line interface for note
//
// This binary converts note documents between markup and stored blocks, prints
// the intermediate block views, and runs the math normalizer over plain text.
// The core capabilities live in note-babel; this crate only wires them to a shell.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension,
// while being overwrittable by an explicit --from flag.
// Usage:
//  note <input> --to <format> [--from <format>] [--output <file>]            - Convert (default)
//  note convert <input> --to <format> [--from <format>] [--output <file>]    - Same as above (explicit)
//  note inspect <path> [<transform>]      - Print a block view (defaults to "blocks-json")
//  note math <path> [--detect]            - Normalize math in a text file, or only detect it
//  note --list-formats                    - List formats and transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format/transform.
// Keys that mirror configuration (group-lists, normalize-math, rewrite-fractions) override the
// loaded config instead.
// Example:
//  note convert note.json --to html --extra-group-lists

mod transforms;

use clap::{Arg, ArgAction, Command, ValueHint};
use note_babel::transforms::normalize_block_math;
use note_babel::{
    detect_math_content, normalize_math_content_with, Format, FormatRegistry, MathOptions,
};
use note_config::{Loader, NoteConfig};
use std::collections::HashMap;
use std::fs;
use tracing_subscriber::EnvFilter;

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

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

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
    Command::new("note")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting note documents and normalizing their math")
        .long_about(
            "note is a command-line tool for working with note documents.\n\n\
            Commands:\n  \
            - convert: Convert between markup (html) and stored blocks (json)\n  \
            - inspect: View the block sequence a document parses to\n  \
            - math:    Normalize informal math notation in a text file\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            note page.html --to json                   # Blocks as json (stdout)\n  \
            note blocks.json --to html -o page.html    # Markup file\n  \
            note inspect page.html blocks-grouped      # Lists folded into groups\n  \
            note math notes.txt                        # Wrap math in $...$",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and inspect transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a note.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the block sequence of a document")
                .long_about(
                    "View the blocks a document parses to.\n\n\
                    Transforms:\n  \
                    - blocks-json:     Flat block sequence as json (default)\n  \
                    - blocks-grouped:  Block sequence with list runs folded into groups\n  \
                    - markup-grouped:  Markup with one container per list run\n\n\
                    Extra Parameters:\n  \
                    --extra-normalize-math     Normalize math in non-code blocks first\n  \
                    --extra-rewrite-fractions  Set to false to keep a/b as typed\n\n\
                    Examples:\n  \
                    note inspect page.html                         # Blocks as json\n  \
                    note inspect page.html markup-grouped          # Grouped markup\n  \
                    note inspect page.html --extra-normalize-math  # With math wrapped",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the document (html or json)")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'blocks-json'")
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
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - html:  Markup (.html, .htm)\n  \
                    - json:  Stored block sequence (.json)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    note convert page.html --to json               # Blocks (stdout)\n  \
                    note convert blocks.json --to html -o out.html # Markup file\n  \
                    note page.html --to html --normalize-math      # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .long_help(
                            "Target format to convert to.\n\n\
                            Available formats: html, json\n\
                            Use the format name, not the file extension.",
                        )
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("normalize-math")
                        .long("normalize-math")
                        .help("Normalize math in block content before serializing")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("math")
                .about("Normalize math notation in a text file")
                .long_about(
                    "Rewrite informal math (x^2, 1/2, θ, \\(...\\)) into $...$ and $$...$$ spans.\n\n\
                    Fenced code, <pre> regions and existing $$ blocks are left untouched.\n\
                    Output is always written to stdout.\n\n\
                    Examples:\n  \
                    note math notes.txt            # Normalized text\n  \
                    note math notes.txt --detect   # Prints true or false",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("detect")
                        .long("detect")
                        .help("Only report whether the text contains math")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !["inspect", "convert", "math", "help"].contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    init_logging(&config);

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or("blocks-json");
            handle_inspect_command(path, transform, &extra_params, &config);
        }
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");

            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => detect_format_or_exit(input),
            };

            if sub_matches.get_flag("normalize-math") {
                config.convert.normalize_math = true;
            }

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("math", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            handle_math_command(input, sub_matches.get_flag("detect"), &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over the configured filter.
fn init_logging(config: &NoteConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|err| {
            eprintln!(
                "Invalid log filter '{}': {err}",
                config.logging.filter
            );
            EnvFilter::new("warn")
        });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn detect_format_or_exit(input: &str) -> String {
    let registry = FormatRegistry::default();
    registry
        .detect_format_from_filename(input)
        .unwrap_or_else(|| {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        })
}

fn read_or_exit(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
    config: &NoteConfig,
) {
    let source = read_or_exit(path);
    let registry = FormatRegistry::default();
    let from = registry
        .detect_format_from_filename(path)
        .unwrap_or_else(|| "html".to_string());

    let blocks = registry.parse(&source, &from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let params = build_inspect_params(config, extra_params);
    let output = transforms::execute_transform(&blocks, transform, &params).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    println!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &NoteConfig,
) {
    let registry = FormatRegistry::default();

    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_or_exit(input);

    let mut blocks = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    if config.convert.normalize_math {
        blocks = normalize_block_math(&blocks, &MathOptions::from(&config.math));
    }

    let mut format_options = HashMap::new();
    if to == "html" && config.convert.group_lists {
        format_options.insert("group-lists".to_string(), "true".to_string());
    }
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }

    let result = registry
        .serialize_with_options(&blocks, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => println!("{result}"),
    }
}

/// Handle the math command
fn handle_math_command(input: &str, detect_only: bool, config: &NoteConfig) {
    let source = read_or_exit(input);

    if detect_only {
        println!("{}", detect_math_content(&source));
        return;
    }

    print!(
        "{}",
        normalize_math_content_with(&source, &MathOptions::from(&config.math))
    );
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Conversion formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        let description = registry
            .get(&format_name)
            .map(|format| format.description())
            .unwrap_or_default();
        println!("  {format_name:<6} {description}");
    }
    println!("\nInspect transforms:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> NoteConfig {
    let loader = Loader::new().with_optional_file("note.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Move config-mirroring extras into the config so they are not passed on as format options
fn apply_config_overrides(config: &mut NoteConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("group-lists") {
        config.convert.group_lists = parse_bool_arg("group-lists", &raw);
    }
    if let Some(raw) = extra_params.remove("normalize-math") {
        config.convert.normalize_math = parse_bool_arg("normalize-math", &raw);
    }
    if let Some(raw) = extra_params.remove("rewrite-fractions") {
        config.math.rewrite_fractions = parse_bool_arg("rewrite-fractions", &raw);
    }
    if let Some(filter) = take_override(extra_params, &["log", "log-filter"]) {
        config.logging.filter = filter;
    }
}

fn build_inspect_params(
    config: &NoteConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();
    if config.convert.normalize_math {
        params.insert("normalize-math".to_string(), "true".to_string());
    }
    params.insert(
        "rewrite-fractions".to_string(),
        config.math.rewrite_fractions.to_string(),
    );
    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }
    params
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| map.remove(*key))
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
