//! ctxhl - highlight source files on the terminal
//!
//! Highlights a file (or stdin) with one of the built-in grammars and
//! writes ANSI-styled text to stdout.

use std::env;
use std::fs;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::process;

use ctxhl::config::Config;
use ctxhl::error::{Error, Result};
use ctxhl::render::{render_line, RenderOptions};
use ctxhl::syntax::SyntaxManager;

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    language: Option<String>,
    dump: bool,
    list: bool,
    no_color: bool,
    file: Option<String>,
}

enum Action {
    Run(Args),
    Help,
    Version,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Action> {
    let mut args = Args::default();
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Action::Help),
            "--version" | "-V" => return Ok(Action::Version),
            "--lang" | "-l" => {
                let name = argv
                    .next()
                    .ok_or_else(|| Error::Message(format!("{} needs a language name", arg)))?;
                args.language = Some(name);
            }
            "--dump" => args.dump = true,
            "--list" => args.list = true,
            "--no-color" => args.no_color = true,
            "-" => args.file = None,
            _ if arg.starts_with('-') => {
                return Err(Error::Message(format!("Unknown option: {}", arg)));
            }
            _ => args.file = Some(arg),
        }
    }
    Ok(Action::Run(args))
}

fn run() -> Result<()> {
    let args = match parse_args(env::args().skip(1))? {
        Action::Run(args) => args,
        Action::Help => {
            print_usage();
            return Ok(());
        }
        Action::Version => {
            print_version();
            return Ok(());
        }
    };

    let config = Config::load()?;
    let mut manager = SyntaxManager::new(config.strict_attributes)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if args.list {
        for name in manager.list_languages() {
            writeln!(out, "{}", name)?;
        }
        out.flush()?;
        return Ok(());
    }

    let name = args
        .language
        .or_else(|| config.language.clone())
        .ok_or_else(|| Error::Message("No language given (use --lang NAME)".to_string()))?;
    let language = manager
        .get_language(&name)
        .cloned()
        .ok_or_else(|| Error::UnknownLanguage(name.clone()))?;

    if args.dump {
        write!(out, "{}", language)?;
        out.flush()?;
        return Ok(());
    }

    let contents = match &args.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut contents = String::new();
            io::stdin().read_to_string(&mut contents)?;
            contents
        }
    };
    let lines: Vec<&str> = contents.lines().collect();

    manager.set_buffer_language(0, Some(language.name()))?;
    manager.update_buffer(0, &lines);

    let mut options = RenderOptions::from(&config);
    options.color &= !args.no_color && io::stdout().is_terminal();
    for (index, line) in lines.iter().enumerate() {
        render_line(&mut out, line, &manager.line_spans(0, index), &options)?;
    }
    out.flush()?;
    Ok(())
}

fn print_usage() {
    println!("ctxhl {} - context-stack syntax highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: ctxhl [OPTIONS] [FILE]");
    println!();
    println!("Reads FILE, or stdin when FILE is missing or '-'.");
    println!();
    println!("Options:");
    println!("  -l, --lang NAME  Highlight with the named language");
    println!("      --dump       Print the language's grammar and exit");
    println!("      --list       List available languages and exit");
    println!("      --no-color   Write plain text");
    println!("  -h, --help       Show this help message");
    println!("  -V, --version    Show version information");
    println!();
    println!("Settings are read from ~/.ctxhl.toml; RUST_LOG controls diagnostics.");
}

fn print_version() {
    println!("ctxhl {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Action> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let Ok(Action::Run(args)) = parse(&["--lang", "C", "--dump", "main.c"]) else {
            panic!("expected run");
        };
        assert_eq!(args.language.as_deref(), Some("C"));
        assert!(args.dump);
        assert!(!args.list);
        assert_eq!(args.file.as_deref(), Some("main.c"));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(parse(&["--lang"]), Err(Error::Message(_))));
        assert!(matches!(parse(&["--bogus"]), Err(Error::Message(_))));
        assert!(matches!(parse(&["-h", "--bogus"]), Ok(Action::Help)));
    }
}
