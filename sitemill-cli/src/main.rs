mod args_parse;
mod service_configuration;
mod url_list_source;


use std::{fs::read_to_string, path::Path, sync::Arc};

use crate::{
    args_parse::Args,
    service_configuration::{LoadConfiguration, ServiceConfiguration},
    url_list_source::UrlListSource,
};

use anyhow::{Context, Result};
use clap::Parser;
use sitemill_writer::{Generator, LoggingListener, SimpleIndexEntryResolver, SourceRegistry};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the JSON report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Load the configuration from the specified YAML file
    let config_path = Path::new(&args.config_file);
    let config_content = read_to_string(config_path)
        .with_context(|| format!("Failed to read config file {}", args.config_file))?;
    let load_config: LoadConfiguration = serde_yaml::from_str(&config_content)
        .with_context(|| format!("Failed to parse config file {}", args.config_file))?;

    let mut service_config: ServiceConfiguration = load_config.try_into()?;
    if let Some(base_dir) = config_path.parent() {
        service_config.resolve_source_files(base_dir);
    }

    // Command-line values override the config file
    if let Some(base_url) = args.base_url {
        service_config.base_url = base_url;
    }
    if let Some(storage_root) = args.storage_root {
        service_config.storage.set_root(storage_root);
    }

    let store = service_config.storage.build()?;
    info!(
        storage = service_config.storage.kind(),
        root = %service_config.storage.root(),
        "Initialized sitemap storage"
    );

    let mut registry = SourceRegistry::new();
    for source in &service_config.sources {
        let url_list = UrlListSource::new(source.name.as_str(), source.file.as_path())?;
        info!(source = %source.name, file = %url_list.path().display(), "Registered URL list source");
        registry.register(Arc::new(url_list))?;
    }

    let resolver = SimpleIndexEntryResolver::new(service_config.base_url.as_str())
        .with_context(|| format!("Invalid base URL: {}", service_config.base_url))?;

    let generator = Generator::new(
        Arc::new(store),
        registry,
        Arc::new(resolver),
        service_config.generator.clone(),
    )?
    .with_listener(Arc::new(LoggingListener));

    let report = generator.generate().await.context("Sitemap generation failed")?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
