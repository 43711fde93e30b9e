#![warn(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod collect;
mod config;
mod error;
mod fetch;
mod parse;
mod pipeline;
mod render;
mod table;

use crate::{
    config::Config,
    fetch::{make_client, HttpSource},
};

pub use error::{Error, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> core::result::Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let config = Config::from_env()?;
    log::info!(
        "Scraping pages {:?} of {}",
        config.pages,
        config.base_url
    );
    let client = make_client(&config.user_agent)?;
    let source = HttpSource::new(client, config.base_url.clone(), config.status_policy);
    match pipeline::run(&source, &config).await {
        Ok(report) => {
            log::info!(
                "Averaged {} cuisines over {} restaurants",
                report.aggregate.len(),
                report.table.len()
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Run failed: {e}");
            Err(e.into())
        }
    }
}
