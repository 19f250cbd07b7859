use clap::Parser;
use rightway_cart::utils::error::ErrorSeverity;
use rightway_cart::utils::{logger, validation::Validate};
use rightway_cart::{
    CartConfig, CartError, CartStore, CliConfig, Command, ConsolePresenter, FileStore, LineItem,
    OrderDispatcher, TelegramChannel,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI args: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Cart command failed: {} (Severity: {:?})",
            e,
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 2,
            ErrorSeverity::Medium => 3,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 4,
        };
        std::process::exit(exit_code);
    }
}

fn load_config(cli: &CliConfig) -> Result<CartConfig, CartError> {
    let mut config = match &cli.config {
        Some(path) => CartConfig::from_file(path)?,
        None => CartConfig::default(),
    };
    if let Some(store) = &cli.store {
        config.storage.path = store.clone();
    }

    // 驗證配置
    config.validate()?;
    Ok(config)
}

async fn run(cli: CliConfig) -> Result<(), CartError> {
    let config = load_config(&cli)?;

    let show_badges = matches!(cli.command, Command::Badge);
    let storage = FileStore::new(&config.storage.path);
    let presenter = Arc::new(ConsolePresenter::new(show_badges));
    let cart = CartStore::new(storage, presenter, &config);

    match cli.command {
        Command::Add {
            name,
            size,
            quantity,
            price,
        } => {
            cart.add(LineItem::new(name, size, quantity, price)).await?;
        }
        Command::Remove { position } => {
            let index = position
                .checked_sub(1)
                .ok_or_else(|| CartError::ValidationError {
                    message: "positions start at 1".to_string(),
                })?;
            let removed = cart.remove(index).await?;
            println!("🗑 Removed {} size {}", removed.name, removed.size);
        }
        Command::Clear => {
            cart.clear().await?;
            println!("🗑 Cart cleared");
        }
        Command::List => {
            let items = cart.load().await?;
            if items.is_empty() {
                println!("Cart is empty");
            }
            for (index, item) in items.items().iter().enumerate() {
                println!(
                    "{}. {} size {} x{} @ {}{}",
                    index + 1,
                    item.name,
                    item.size,
                    item.quantity,
                    config.pricing.currency_symbol,
                    item.price.normalize()
                );
            }
        }
        Command::Total => {
            let total = cart.total().await?;
            println!("{}{}", config.pricing.currency_symbol, total.normalize());
        }
        Command::Badge => {
            cart.refresh_badge().await?;
        }
        Command::Summary => {
            println!("{}", cart.order_summary().await?);
        }
        Command::Submit => {
            let telegram = config.telegram()?;
            let summary = cart.order_summary().await?;
            let channel = TelegramChannel::new(telegram)?;
            let dispatcher = OrderDispatcher::new(channel, config.messages.order_header.clone());

            dispatcher.submit_order(&summary).await?;
            println!("📨 Order sent");
        }
    }

    Ok(())
}
