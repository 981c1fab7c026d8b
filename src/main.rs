use std::error::Error;

use astred::{AstredConfig, demo_pair};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = match std::env::args().nth(1) {
        Some(path) => AstredConfig::from_file(path)?,
        None => AstredConfig::default(),
    };

    let pair = demo_pair(&cfg)?;
    println!("{}", pair.metrics().to_json()?);

    Ok(())
}
