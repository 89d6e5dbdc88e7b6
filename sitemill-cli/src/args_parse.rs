use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "sitemill")]
#[command(about = "Generate rotated XML sitemaps and their sitemap index")]
#[command(version, after_help = EXAMPLES_TEXT)]
pub(crate) struct Args {
    #[arg(long, short = 'c', help = "Path to the YAML configuration file")]
    pub(crate) config_file: String,

    #[arg(
        long,
        help = "Public URL the published files are served under (overrides base_url)"
    )]
    pub(crate) base_url: Option<String>,

    #[arg(
        long,
        help = "Root directory, bucket URI or namespace of the storage (overrides storage.root)"
    )]
    pub(crate) storage_root: Option<String>,
}

const EXAMPLES_TEXT: &str = r#"
EXAMPLES:
    # Generate with the settings of a config file
    sitemill --config-file ./config/sitemill.yml

    # Publish into another directory, served from another host
    sitemill -c ./config/sitemill.yml --storage-root /var/www/html --base-url https://www.example.com
"#;
