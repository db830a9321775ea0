use attrorder_driver::{
    check_target, format_target, lex_target, options_for_target, write_target, AttrOrderError,
    FormattedFile,
};
use attrorder_syntax::{file_diagnostics_have_errors, render_diagnostics};
use std::env;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ATTRORDER_LOG";

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(AttrOrderError::CheckFailed(_)) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), AttrOrderError> {
    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        print_help();
        return Ok(());
    };
    let rest: Vec<String> = args.collect();

    match command.as_str() {
        "-h" | "--help" | "help" => {
            print_help();
            Ok(())
        }
        "-V" | "--version" | "version" => {
            print_version();
            Ok(())
        }
        "fmt" => cmd_fmt(&rest),
        "check" => cmd_check(&rest),
        "lex" => cmd_lex(&rest),
        other => Err(AttrOrderError::InvalidCommand(format!(
            "unknown command `{other}` (see `attrorder --help`)"
        ))),
    }
}

fn cmd_fmt(args: &[String]) -> Result<(), AttrOrderError> {
    let (write, rest) = consume_flag("--write", args);
    let (config, rest) = consume_value_flag("--config", &rest)?;
    let target = single_target("fmt", &rest)?;
    let options = options_for_target(target, config.as_deref())?;

    if write {
        let written = write_target(target, &options)?;
        for file in &written {
            emit_diagnostics(file);
            println!("{}", file.path.display());
        }
    } else {
        let file = format_target(target, &options)?;
        emit_diagnostics(&file);
        print!("{}", file.formatted);
    }
    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), AttrOrderError> {
    let (config, rest) = consume_value_flag("--config", args)?;
    let target = single_target("check", &rest)?;
    let options = options_for_target(target, config.as_deref())?;

    let pending = check_target(target, &options)?;
    for file in &pending {
        emit_diagnostics(file);
        println!("{}", file.path.display());
    }
    if pending.is_empty() {
        Ok(())
    } else {
        eprintln!("{} file(s) need formatting", pending.len());
        Err(AttrOrderError::CheckFailed(pending.len()))
    }
}

fn cmd_lex(args: &[String]) -> Result<(), AttrOrderError> {
    let target = single_target("lex", args)?;
    let file = lex_target(target)?;
    let output = serde_json::to_string_pretty(&file)
        .map_err(|err| AttrOrderError::Io(io::Error::other(err)))?;
    println!("{output}");
    Ok(())
}

/// Lexer problems never block formatting; they go to stderr next to the result.
fn emit_diagnostics(file: &FormattedFile) {
    if file.diagnostics.is_empty() {
        return;
    }
    let use_color = io::stderr().is_terminal();
    let path = file.path.display().to_string();
    let rendered = render_diagnostics(&path, &file.original, &file.diagnostics, use_color);
    if !rendered.is_empty() {
        eprintln!("{rendered}");
    }
    if file_diagnostics_have_errors(&file.file_diagnostics()) {
        warn!(path = %path, "lexical errors; attribute lists after them may be skipped");
    }
}

fn single_target<'a>(command: &str, args: &'a [String]) -> Result<&'a str, AttrOrderError> {
    match args {
        [target] => Ok(target.as_str()),
        [] => Err(AttrOrderError::InvalidCommand(format!(
            "{command} expects a target path"
        ))),
        _ => Err(AttrOrderError::InvalidCommand(format!(
            "{command} expects exactly one target, got {}",
            args.join(" ")
        ))),
    }
}

fn consume_flag(flag: &str, args: &[String]) -> (bool, Vec<String>) {
    let mut enabled = false;
    let mut out = Vec::new();
    for arg in args {
        if arg == flag {
            enabled = true;
        } else {
            out.push(arg.clone());
        }
    }
    (enabled, out)
}

fn consume_value_flag(
    flag: &str,
    args: &[String],
) -> Result<(Option<PathBuf>, Vec<String>), AttrOrderError> {
    let mut value = None;
    let mut out = Vec::new();
    let mut i = 0usize;
    while i < args.len() {
        let arg = &args[i];
        if arg == flag {
            let Some(next) = args.get(i + 1).filter(|next| !next.starts_with('-')) else {
                return Err(AttrOrderError::InvalidCommand(format!("{flag} expects a value")));
            };
            value = Some(PathBuf::from(next));
            i += 2;
            continue;
        }
        out.push(arg.clone());
        i += 1;
    }
    Ok((value, out))
}

fn print_help() {
    println!(
        "{}\n\nUSAGE:\n  attrorder <COMMAND>\n\nCOMMANDS:\n  fmt [--config <file>] [--write] <path|dir|dir/...>\n  check [--config <file>] <path|dir|dir/...>\n  lex <path>\n\n  -h, --help\n  -V, --version\n\nENVIRONMENT:\n  {LOG_ENV}  log filter (default: warn)",
        version_text()
    );
}

fn print_version() {
    println!("{}", version_text());
}

fn version_text() -> String {
    format!("attrorder {}", env!("CARGO_PKG_VERSION"))
}
