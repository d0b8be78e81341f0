use anyhow::Context;
use argh::FromArgs;
use std::io::IsTerminal;
use tinysh::config::{DEFAULT_MAX_LINE, DEFAULT_PROMPT};
use tinysh::{EditorSource, Interpreter, PipedSource, ShellConfig};
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// A minimal interactive command interpreter.
/// Commands on one line are separated by ';'; a trailing '&' runs the last one in the background.
struct Args {
    #[argh(option, default = "DEFAULT_PROMPT.to_string()")]
    /// prompt written before each line is read.
    prompt: String,

    #[argh(option, default = "DEFAULT_MAX_LINE")]
    /// input buffer size in bytes, line terminator included.
    max_line: usize,

    #[argh(switch, short = 'v')]
    /// log launches and waits to standard error.
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run(args: Args) -> anyhow::Result<tinysh::ExitCode> {
    let config = ShellConfig::new(args.prompt, args.max_line)?;
    let max_line = config.max_line();
    let mut shell = Interpreter::new(config);
    let code = if std::io::stdin().is_terminal() {
        let mut source = EditorSource::new().context("failed to start the line editor")?;
        shell.repl(&mut source)?
    } else {
        shell.repl(&mut PipedSource::stdio().with_limit(max_line))?
    };
    Ok(code)
}

fn main() -> std::process::ExitCode {
    let args: Args = argh::from_env();
    init_tracing(args.verbose);
    match run(args) {
        Ok(code) => std::process::ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(err) => {
            eprintln!("tinysh: {err:#}");
            std::process::ExitCode::FAILURE
        }
    }
}
