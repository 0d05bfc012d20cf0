use std::fs::File;

use anyhow::Result;

mod app;
mod ui;

const LOG_FILE: &str = "housing-form.log";

fn main() -> Result<()> {
    init_logging()?;
    app::run::run()
}

/// Routes `RUST_LOG` output to a file, stderr belongs to the alternate screen.
fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE)?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
