use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "spendwise-server")]
#[command(author, version, about = "Expense tracker API with automatic categorization", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Listen address
    #[arg(short = 'l', long)]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// Expense log file (switches storage to the JSON-lines backend)
    #[arg(short, long, env = "SPENDWISE_DATA")]
    pub data: Option<String>,

    /// Training corpus YAML file (defaults to the embedded corpus)
    #[arg(long)]
    pub corpus: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
