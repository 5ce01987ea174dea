mod command;
mod error;

use command::Command;
use error::Error;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs::File, io::{self, BufReader, IsTerminal, Read}, sync::Arc};
use sym_compute::symbolic::{cache::MemoCache, Ctxt};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Parses and runs a single command, returning its output.
fn parse_run(input: &str, ctxt: &Ctxt) -> Result<String, Error> {
    let command = Command::parse(input)?;
    command.run(ctxt)
}

/// Runs every non-empty line of the input, printing the success or failure of each.
fn run_lines(input: &str, ctxt: &Ctxt) {
    for line in input.lines().filter(|line| !line.trim().is_empty()) {
        match parse_run(line, ctxt) {
            Ok(output) => println!("{}", output),
            Err(err) => err.report_to_stderr(line),
        }
    }
}

/// Builds the execution context, with a thread pool if `SYM_THREADS` is set.
fn build_ctxt() -> Ctxt {
    let ctxt = Ctxt::new().with_cache(Arc::new(MemoCache::new()));
    let Ok(threads) = std::env::var("SYM_THREADS") else {
        return ctxt;
    };

    match threads.parse::<usize>() {
        Ok(threads) => match ctxt.clone().with_threads(threads) {
            Ok(ctxt) => {
                debug!(threads, "using thread pool");
                ctxt
            },
            Err(err) => {
                warn!(%err, "could not build thread pool, running sequentially");
                ctxt
            },
        },
        Err(err) => {
            warn!(%threads, %err, "invalid SYM_THREADS, running sequentially");
            ctxt
        },
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("SYM_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let ctxt = build_ctxt();
    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run source file
        let mut file = BufReader::new(File::open(filename)?);
        let mut input = String::new();
        file.read_to_string(&mut input)?;

        run_lines(&input, &ctxt);
    } else if !io::stdin().is_terminal() {
        // read source from stdin
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;

        run_lines(&input, &ctxt);
    } else {
        // run the repl / interactive mode
        let mut rl = DefaultEditor::new().map_err(io::Error::other)?;

        fn process_line(rl: &mut DefaultEditor, ctxt: &Ctxt) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            run_lines(&input, ctxt);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &ctxt) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }

    Ok(())
}
