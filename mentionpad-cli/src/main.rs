// Command-line interface for mentionpad
//
// This binary drives the mentionpad-babel library from a terminal: converting documents between
// the editor value (json), HTML and the tree visualization, replaying the "Add" button round trip,
// and exercising the mention matcher against a line of text.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension, while
// being overwrittable by an explicit --from flag. HTML import honours the [convert.html] section of
// the configuration (mentionpad.toml in the working directory, or --config <path>).
// Usage:
//  mentionpad <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  mentionpad convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  mentionpad roundtrip <input>                  - Serialize to HTML and import it back, logging both
//  mentionpad suggest <text> [--cursor N] [--keys K1,K2]  - Run the mention matcher over <text>
//  mentionpad --list-formats                     - List available formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  mentionpad page.html --to json --extra-quote-type quote

use clap::{Arg, ArgAction, Command, ValueHint};
use mentionpad_babel::formats::{HtmlFormat, ParseOptions};
use mentionpad_babel::{
    Document, EditorHost, FormatRegistry, KeyEvent, MentionMatcher, MentionState, Node, Session,
};
use mentionpad_config::{Loader, MentionpadConfig};
use std::collections::HashMap;
use std::fs;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "roundtrip", "suggest", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports:
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
            let has_value = args
                .get(i + 1)
                .map(|next| !next.starts_with('-'))
                .unwrap_or(false);

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
    Command::new("mentionpad")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting rich-text editor documents and trying out mentions")
        .long_about(
            "mentionpad is a command-line tool for working with rich-text editor documents.\n\n\
            Commands:\n  \
            - convert:   Transform between document formats (json, html, treeviz)\n  \
            - roundtrip: Export to HTML and import it back, logging each step\n  \
            - suggest:   Run the mention matcher over a line of text\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            mentionpad doc.json --to html                 # Export HTML (outputs to stdout)\n  \
            mentionpad page.html --to json -o doc.json    # Import HTML into an editor value\n  \
            mentionpad suggest 'hi {sa' --keys Enter      # Insert a mention",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a mentionpad.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - json:    Editor value (.json)\n  \
                    - html:    HTML fragment or page (.html, .htm)\n  \
                    - treeviz: Tree visualization (output only)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    mentionpad convert doc.json --to html           # Export HTML (stdout)\n  \
                    mentionpad convert page.html --to json -o v.json  # HTML to editor value\n  \
                    mentionpad doc.json --to treeviz                # 'convert' is optional",
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
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("roundtrip")
                .about("Serialize a document to HTML and import it back")
                .long_about(
                    "Serializes the document to HTML, logs the HTML, parses it back and logs\n\
                    the resulting value. The re-imported value is printed as json.\n\n\
                    Run with RUST_LOG=info (or log.level in mentionpad.toml) to see the log.\n\n\
                    Examples:\n  \
                    mentionpad roundtrip doc.json\n  \
                    mentionpad roundtrip page.html --from html",
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
                ),
        )
        .subcommand(
            Command::new("suggest")
                .about("Run the mention matcher over a line of text")
                .long_about(
                    "Places <text> in a single paragraph with the cursor at its end (or at\n\
                    --cursor), evaluates the mention trigger, then replays --keys through the\n\
                    editing session. Prints the matcher state, the suggestions and the\n\
                    resulting HTML.\n\n\
                    Keys use descriptors such as ArrowDown, ArrowUp, Tab, Enter, Escape,\n\
                    Backspace, mod+b or a single character.\n\n\
                    Examples:\n  \
                    mentionpad suggest 'hello {a'\n  \
                    mentionpad suggest 'hello {a' --keys ArrowDown,Enter\n  \
                    mentionpad suggest '{s and more' --cursor 2 --json",
                )
                .arg(
                    Arg::new("text")
                        .help("Paragraph text")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("cursor")
                        .long("cursor")
                        .help("Cursor offset in characters (defaults to the end)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("keys")
                        .long("keys")
                        .help("Comma-separated key presses to replay")
                        .value_delimiter(',')
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("candidates")
                        .long("candidates")
                        .help("Comma-separated names to suggest from")
                        .value_delimiter(',')
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the result as json")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare input path means "convert".
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
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

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    init_tracing(&config);

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&config);
        return;
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");
            let from = resolve_from(input, sub_matches.get_one::<String>("from"), &config);
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("roundtrip", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from = resolve_from(input, sub_matches.get_one::<String>("from"), &config);
            handle_roundtrip_command(input, &from, &extra_params, &config);
        }
        Some(("suggest", sub_matches)) => {
            let text = sub_matches
                .get_one::<String>("text")
                .expect("text is required");
            let cursor = sub_matches.get_one::<usize>("cursor").copied();
            let keys: Vec<String> = sub_matches
                .get_many::<String>("keys")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            let candidates: Option<Vec<String>> = sub_matches
                .get_many::<String>("candidates")
                .map(|values| values.cloned().collect());
            let json = sub_matches.get_flag("json");
            handle_suggest_command(text, cursor, &keys, candidates, json);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_tracing(config: &MentionpadConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log.level.as_str())),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_registry(config: &MentionpadConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::default();
    registry.register(HtmlFormat::new(ParseOptions::from(&config.convert.html)));
    registry
}

fn resolve_from(input: &str, from_arg: Option<&String>, config: &MentionpadConfig) -> String {
    if let Some(from) = from_arg {
        return from.to_string();
    }
    let registry = build_registry(config);
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn read_document(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    extra_params: &HashMap<String, String>,
) -> Document {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let params = if from == "html" {
        extra_params.clone()
    } else {
        HashMap::new()
    };
    registry
        .parse_with_options(&source, from, &params)
        .unwrap_or_else(|e| {
            eprintln!("Parse error: {e}");
            std::process::exit(1);
        })
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &MentionpadConfig,
) {
    let registry = build_registry(config);

    for name in [from, to] {
        if let Err(e) = registry.get(name) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    let doc = read_document(&registry, input, from, extra_params);
    tracing::debug!(from, to, blocks = doc.children.len(), "converting");

    let result = registry.serialize(&doc, to).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, &result) {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            }
        }
        None => print!("{result}"),
    }
}

/// Handle the roundtrip command: value → HTML → value, as the editor's "Add" button does.
fn handle_roundtrip_command(
    input: &str,
    from: &str,
    extra_params: &HashMap<String, String>,
    config: &MentionpadConfig,
) {
    let registry = build_registry(config);
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let doc = read_document(&registry, input, from, extra_params);

    let html = registry.serialize(&doc, "html").unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    tracing::info!(%html, "serialized");

    let imported = registry.parse(&html, "html").unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });
    let value = registry.serialize(&imported, "json").unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    tracing::info!(value = %value.trim_end(), "deserialized");

    print!("{value}");
}

/// Handle the suggest command
fn handle_suggest_command(
    text: &str,
    cursor: Option<usize>,
    keys: &[String],
    candidates: Option<Vec<String>>,
    json: bool,
) {
    let events: Vec<KeyEvent> = keys
        .iter()
        .map(|descriptor| {
            descriptor.parse::<KeyEvent>().unwrap_or_else(|e| {
                eprintln!("Error: invalid key '{descriptor}': {e}");
                std::process::exit(1);
            })
        })
        .collect();

    let matcher = match candidates {
        Some(names) => MentionMatcher::with_candidates(names),
        None => MentionMatcher::new(),
    };
    let document = Document::new(vec![Node::paragraph(vec![Node::text(text)])]);
    let mut session = Session::with_matcher(document, matcher);

    if let Some(offset) = cursor {
        session.editor_mut().select_offset(offset);
        if let Some(range) = session.selection().cloned() {
            session.select(range);
        }
    }

    let mut outcomes = Vec::new();
    for event in &events {
        let outcome = session.handle_key(event);
        tracing::debug!(key = %event, handled = outcome.is_handled(), "replayed key");
        outcomes.push((event.to_string(), outcome.is_handled()));
    }

    let html = mentionpad_babel::to_html(session.document()).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    let matcher = session.matcher();

    if json {
        let (search, index) = match matcher.state() {
            MentionState::Active(active) => (Some(active.search.as_str()), Some(active.index)),
            MentionState::Inactive => (None, None),
        };
        let report = serde_json::json!({
            "active": matcher.is_active(),
            "search": search,
            "index": index,
            "suggestions": matcher.suggestions(),
            "selected": matcher.selected(),
            "keys": outcomes
                .iter()
                .map(|(key, handled)| serde_json::json!({ "key": key, "handled": handled }))
                .collect::<Vec<_>>(),
            "html": html,
        });
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Serialization error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    match matcher.state() {
        MentionState::Active(active) => {
            println!("state: active (search '{}')", active.search);
            println!("suggestions:");
            for (i, name) in matcher.suggestions().iter().enumerate() {
                let marker = if i == active.index { '>' } else { ' ' };
                println!("  {marker} {name}");
            }
        }
        MentionState::Inactive => println!("state: inactive"),
    }
    println!("html: {html}");
}

/// Handle the list-formats command
fn handle_list_formats_command(config: &MentionpadConfig) {
    let registry = build_registry(config);
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        let mut modes = Vec::new();
        if format.supports_parsing() {
            modes.push("parse");
        }
        if format.supports_serialization() {
            modes.push("serialize");
        }
        println!(
            "  {name:<10} {} [{}]",
            format.description(),
            modes.join(", ")
        );
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> MentionpadConfig {
    let loader = Loader::new().with_optional_file("mentionpad.toml");
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
