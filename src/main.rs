use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use pocket_diary::accounts::Accounts;
use pocket_diary::config::Config;
use pocket_diary::logging;
use pocket_diary::ui::UI;
use std::fs;
use tracing::info;

fn main() -> Result<()> {
    color_eyre::install()?;
    let config = Config::parse();

    fs::create_dir_all(&config.data_dir).wrap_err_with(|| {
        format!("cannot create data directory {}", config.data_dir.display())
    })?;
    logging::init(&config.log_path())?;
    info!(data_dir = %config.data_dir.display(), "starting");

    let accounts = Accounts::load(&config.data_dir, config.hasher())
        .wrap_err("failed to load the account registry")?;

    let mut ui = UI::new(config.dark)?;
    let result = ui.run(&config, accounts);
    // Restore the terminal before any error report is printed.
    drop(ui);

    info!("exiting");
    result
}
