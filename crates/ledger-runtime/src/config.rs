//! # Ledger Configuration
//!
//! ## Security Requirements
//!
//! - `admin` MUST NOT be the zero address. Nobody can sign as it, so a ledger
//!   built with it could never approve anyone.

use serde::{Deserialize, Serialize};
use shared_types::{Address, AddressParseError};
use std::env;
use thiserror::Error;

/// Default number of decimals used to display quantities (grams shown as kg).
pub const DEFAULT_DECIMALS: u8 = 3;

/// Complete ledger configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// The single privileged identity.
    pub admin: Address,
    /// Token metadata exposed to collaborators.
    pub token: TokenMetadata,
    /// Accept batches with zero supply or a blank name.
    pub allow_empty_batches: bool,
}

/// Display metadata for batch quantities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Human-readable token name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Decimal places collaborators divide quantities by for display.
    pub decimals: u8,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: "Supply Chain Batch".to_string(),
            symbol: "SCB".to_string(),
            decimals: DEFAULT_DECIMALS,
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            admin: Address::ZERO, // MUST be overridden
            token: TokenMetadata::default(),
            allow_empty_batches: false,
        }
    }
}

impl LedgerConfig {
    /// Configuration with a fixed, non-zero admin for tests.
    pub fn for_testing() -> Self {
        Self {
            admin: Address::repeat(0xAD),
            ..Self::default()
        }
    }

    /// Builds a configuration for `admin` with default token metadata.
    pub fn with_admin(admin: Address) -> Self {
        Self {
            admin,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SC_ADMIN_ADDRESS`: admin address as `0x`-prefixed hex (required)
    /// - `SC_TOKEN_NAME`: token name (default: Supply Chain Batch)
    /// - `SC_TOKEN_SYMBOL`: token symbol (default: SCB)
    /// - `SC_TOKEN_DECIMALS`: display decimals (default: 3)
    /// - `SC_ALLOW_EMPTY_BATCHES`: `true`/`1` to accept empty batches
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let admin = lookup("SC_ADMIN_ADDRESS").ok_or(ConfigError::MissingAdmin)?;
        config.admin = admin
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidAdmin { value: admin, source })?;

        if let Some(name) = lookup("SC_TOKEN_NAME") {
            config.token.name = name;
        }
        if let Some(symbol) = lookup("SC_TOKEN_SYMBOL") {
            config.token.symbol = symbol;
        }
        if let Some(decimals) = lookup("SC_TOKEN_DECIMALS") {
            config.token.decimals = decimals
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidDecimals(decimals))?;
        }
        if let Some(flag) = lookup("SC_ALLOW_EMPTY_BATCHES") {
            config.allow_empty_batches = flag.to_lowercase() == "true" || flag == "1";
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration before building a ledger.
    ///
    /// # Errors
    /// - `ZeroAdmin` if the admin is the zero address
    /// - `InvalidDecimals` if more decimals are requested than `U256` can show
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.is_zero() {
            return Err(ConfigError::ZeroAdmin);
        }
        // 10^77 is the largest power of ten below 2^256.
        if self.token.decimals > 77 {
            return Err(ConfigError::InvalidDecimals(self.token.decimals.to_string()));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No admin address was provided.
    #[error("SC_ADMIN_ADDRESS is not set")]
    MissingAdmin,

    /// The admin address could not be parsed.
    #[error("Invalid admin address {value:?}: {source}")]
    InvalidAdmin {
        value: String,
        #[source]
        source: AddressParseError,
    },

    /// The admin is the zero address.
    #[error("Admin address must not be the zero address")]
    ZeroAdmin,

    /// Decimals are not a small non-negative integer.
    #[error("Invalid token decimals: {0}")]
    InvalidDecimals(String),
}
