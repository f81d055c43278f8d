use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod page;
mod render;

use page::{DEFAULT_BASE_URL, DEFAULT_IMAGE_URL, PageConfig};

#[derive(Parser, Debug)]
#[command(name = "petstore-page")]
#[command(about = "Loads a pet from the pet-store API and renders it as an HTML page", long_about = None)]
struct Args {
    /// Base URL of the pet-store API
    #[arg(short = 'b', long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Id of the pet to show
    #[arg(short = 'p', long, default_value_t = 1)]
    pet_id: i64,

    /// Image to download and check before talking to the API
    #[arg(short = 'i', long, default_value = DEFAULT_IMAGE_URL)]
    image_url: String,

    /// Also upload the image as the pet's picture
    #[arg(long)]
    upload: bool,

    /// Write the page here instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

impl From<&Args> for PageConfig {
    fn from(args: &Args) -> Self {
        PageConfig {
            base_url: args.base_url.clone(),
            pet_id: args.pet_id,
            image_url: args.image_url.clone(),
            upload: args.upload,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    log::info!(
        "loading pet {} from {} (upload: {})",
        args.pet_id,
        args.base_url,
        args.upload
    );

    let data = page::get_data(&PageConfig::from(&args)).await?;
    let html = render::render(&data).context("Failed to render page")?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, html)
                .await
                .context(format!("Failed to write to {:?}", path))?;
            log::info!("page written to {}", path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}
