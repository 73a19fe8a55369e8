//! Request Pro console
//!
//! Interactive terminal front-end: reads one command per line, applies it,
//! and redraws the current screen. Type `help` for the command list.

use anyhow::Context;
use request_pro::console::{self, Command, HELP_TEXT};
use request_pro::{App, Config};
use std::io::{BufRead, Write};

fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    request_pro::logging::init(&config.logging);

    tracing::info!("Request Pro v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Store file: {:?}", config.storage.blob_path());

    let mut app = App::open(&config).context("failed to open the request store")?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    print!("{}", console::render(&app.screen()));
    prompt(&mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;

        match console::parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{}", HELP_TEXT),
            Ok(Command::Redraw) => print!("{}", console::render(&app.screen())),
            Ok(Command::Event(event)) => {
                app.dispatch(event).context("failed to save the request store")?;
                print!("{}", console::render(&app.screen()));
            }
            Err(e) => println!("{}", e),
        }

        prompt(&mut stdout)?;
    }

    tracing::info!("Request Pro shutdown complete");
    Ok(())
}

fn prompt(stdout: &mut std::io::Stdout) -> anyhow::Result<()> {
    print!("\n> ");
    stdout.flush()?;
    Ok(())
}
