use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the subcommands from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("mentionpad")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting rich-text editor documents and trying out mentions")
        .arg_required_else_help(true)
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
                .help("Path to a mentionpad.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats")
                .arg(input_arg())
                .arg(Arg::new("from").long("from").value_hint(ValueHint::Other))
                .arg(Arg::new("to").long("to").value_hint(ValueHint::Other))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("roundtrip")
                .about("Serialize a document to HTML and import it back")
                .arg(input_arg())
                .arg(Arg::new("from").long("from").value_hint(ValueHint::Other)),
        )
        .subcommand(
            Command::new("suggest")
                .about("Run the mention matcher over a line of text")
                .arg(Arg::new("text").required(true).index(1))
                .arg(Arg::new("cursor").long("cursor"))
                .arg(Arg::new("keys").long("keys"))
                .arg(Arg::new("candidates").long("candidates"))
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "mentionpad", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "mentionpad", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "mentionpad", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
