use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "rightway-cart")]
#[command(about = "Shopping cart kept in a local store, with Telegram order hand-off")]
pub struct CliConfig {
    #[arg(long, short, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Override storage.path from the configuration")]
    pub store: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add an item, merging with an existing entry of the same name and size
    Add {
        name: String,
        size: String,
        #[arg(long, short, default_value = "1")]
        quantity: u32,
        #[arg(long, short)]
        price: Decimal,
    },
    /// Remove the entry at a 1-based position as shown by `list`
    Remove { position: usize },
    /// Delete the whole cart
    Clear,
    /// Show cart entries
    List,
    /// Show the cart subtotal
    Total,
    /// Render the item-count badge
    Badge,
    /// Print the order summary that `submit` would send
    Summary,
    /// Send the order summary to the configured Telegram chat
    Submit,
}
