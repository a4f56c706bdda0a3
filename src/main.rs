use anyhow::{Context, Result};
use console::style;
use course_thumbs::component::ThumbnailGenerator;
use course_thumbs::config::Config;
use course_thumbs::init;
use log::{error, info};

fn main() {
    init::init();

    if let Err(e) = run() {
        error!("Program error: {e:#}");
        eprintln!("{} {e:#}", style("錯誤:").red().bold());
        std::process::exit(1);
    }

    info!("Program exited normally");
}

fn run() -> Result<()> {
    let config = Config::new().context("無法載入設定")?;
    let generator = ThumbnailGenerator::new(config);
    generator.run()?;
    Ok(())
}
