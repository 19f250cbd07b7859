use crate::core::order::{OrderMessages, PricingPolicy};
use crate::domain::model::price_number;
use crate::utils::error::{CartError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CART_KEY: &str = "rightway_cart";
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    pub storage: StorageConfig,
    pub pricing: PricingConfig,
    pub badge: BadgeConfig,
    pub notifications: NotificationConfig,
    pub messages: MessagesConfig,
    pub telegram: Option<TelegramConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: String,
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "./rightway_cart.json".to_string(),
            key: DEFAULT_CART_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    #[serde(with = "price_number")]
    pub shipping_fee: Decimal,
    #[serde(with = "price_number")]
    pub free_shipping_threshold: Decimal,
    pub currency_symbol: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            shipping_fee: Decimal::from(15),
            free_shipping_threshold: Decimal::from(200),
            currency_symbol: "$".to_string(),
        }
    }
}

impl PricingConfig {
    pub fn policy(&self) -> PricingPolicy {
        PricingPolicy {
            shipping_fee: self.shipping_fee,
            free_shipping_threshold: self.free_shipping_threshold,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    pub surfaces: Vec<String>,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            surfaces: vec!["#cartCount".to_string(), ".cart-count".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub display_ms: u64,
    pub exit_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            display_ms: 3000,
            exit_ms: 300,
        }
    }
}

impl NotificationConfig {
    pub fn display(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }

    pub fn exit(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }
}

/// Text templates. `added` may contain `{name}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    pub added: String,
    pub greeting: String,
    pub total_label: String,
    pub order_header: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            added: "{name} added to cart!".to_string(),
            greeting: "Hi! I'd like to order:".to_string(),
            total_label: "💰 Total:".to_string(),
            order_header: "🛍 New order!".to_string(),
        }
    }
}

impl MessagesConfig {
    pub fn added_to_cart(&self, name: &str) -> String {
        self.added.replace("{name}", name)
    }

    pub fn order_messages(&self, currency_symbol: &str) -> OrderMessages {
        OrderMessages {
            greeting: self.greeting.clone(),
            total_label: self.total_label.clone(),
            currency_symbol: currency_symbol.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api")]
    pub api_base: String,
    #[serde(deserialize_with = "secret_from_string")]
    pub bot_token: SecretString,
    pub chat_id: String,
    #[serde(default = "default_parse_mode")]
    pub parse_mode: String,
    pub timeout_seconds: Option<u64>,
}

fn default_telegram_api() -> String {
    DEFAULT_TELEGRAM_API.to_string()
}

fn default_parse_mode() -> String {
    "HTML".to_string()
}

fn secret_from_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

impl CartConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CartError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CartError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TELEGRAM_BOT_TOKEN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CartError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn telegram(&self) -> Result<&TelegramConfig> {
        validation::validate_required_field("telegram", &self.telegram)
    }
}

impl Validate for CartConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("storage.path", &self.storage.path)?;
        validation::validate_non_empty_string("storage.key", &self.storage.key)?;

        validation::validate_non_negative_amount("pricing.shipping_fee", self.pricing.shipping_fee)?;
        validation::validate_non_negative_amount(
            "pricing.free_shipping_threshold",
            self.pricing.free_shipping_threshold,
        )?;

        if let Some(telegram) = &self.telegram {
            telegram.validate()?;
        }

        Ok(())
    }
}

impl Validate for TelegramConfig {
    fn validate(&self) -> Result<()> {
        use secrecy::ExposeSecret;

        validation::validate_url("telegram.api_base", &self.api_base)?;
        validation::validate_non_empty_string("telegram.chat_id", &self.chat_id)?;
        if self.bot_token.expose_secret().trim().is_empty()
            || self.bot_token.expose_secret().starts_with("${")
        {
            return Err(CartError::InvalidConfigValueError {
                field: "telegram.bot_token".to_string(),
                value: "[REDACTED]".to_string(),
                reason: "Bot token is empty or its environment variable is unset".to_string(),
            });
        }
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("telegram.timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}
