use crate::error::{LedgerError, Result};
use log::warn;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::RwLock;

pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::new);

const PRIME_LOW_KEY: &str = "LEDGER_PRIME_LOW";
const PRIME_HIGH_KEY: &str = "LEDGER_PRIME_HIGH";
const PRIME_ATTEMPTS_KEY: &str = "LEDGER_PRIME_ATTEMPTS";
const KEYGEN_ATTEMPTS_KEY: &str = "LEDGER_KEYGEN_ATTEMPTS";
const DATA_DIR_KEY: &str = "LEDGER_DATA_DIR";

pub const DEFAULT_PRIME_LOW: u64 = 100;
pub const DEFAULT_PRIME_HIGH: u64 = 500;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;
static DEFAULT_DATA_DIR: &str = "data";

/// Bounds and retry budgets for keypair generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyGenSettings {
    pub prime_low: u64,
    pub prime_high: u64,
    /// Draws allowed per `random_prime` call
    pub max_prime_attempts: u32,
    /// Draws allowed for a distinct `q` and for a coprime `e`
    pub max_keygen_attempts: u32,
}

impl Default for KeyGenSettings {
    fn default() -> Self {
        Self {
            prime_low: DEFAULT_PRIME_LOW,
            prime_high: DEFAULT_PRIME_HIGH,
            max_prime_attempts: DEFAULT_MAX_ATTEMPTS,
            max_keygen_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl KeyGenSettings {
    pub fn with_range(prime_low: u64, prime_high: u64) -> Self {
        Self {
            prime_low,
            prime_high,
            ..Self::default()
        }
    }

    /// The modulus `p*q` must fit in a `u64`, so both primes stay below 2^32.
    pub fn validate(&self) -> Result<()> {
        if self.prime_low < 2 {
            return Err(LedgerError::Config(format!(
                "Prime range lower bound must be at least 2, got {}",
                self.prime_low
            )));
        }
        if self.prime_low > self.prime_high {
            return Err(LedgerError::Config(format!(
                "Empty prime range [{}, {}]",
                self.prime_low, self.prime_high
            )));
        }
        if self.prime_high > u64::from(u32::MAX) {
            return Err(LedgerError::Config(format!(
                "Prime range upper bound {} would overflow the modulus",
                self.prime_high
            )));
        }
        if self.max_prime_attempts == 0 || self.max_keygen_attempts == 0 {
            return Err(LedgerError::Config(
                "Attempt budgets must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct Config {
    keygen: RwLock<KeyGenSettings>,
    data_dir: RwLock<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Config {
        let defaults = KeyGenSettings::default();
        let mut keygen = KeyGenSettings {
            prime_low: env_or(PRIME_LOW_KEY, defaults.prime_low),
            prime_high: env_or(PRIME_HIGH_KEY, defaults.prime_high),
            max_prime_attempts: env_or(PRIME_ATTEMPTS_KEY, defaults.max_prime_attempts),
            max_keygen_attempts: env_or(KEYGEN_ATTEMPTS_KEY, defaults.max_keygen_attempts),
        };
        if let Err(e) = keygen.validate() {
            warn!("{e}; falling back to default key generation settings");
            keygen = defaults;
        }

        let data_dir = env::var(DATA_DIR_KEY)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        Config {
            keygen: RwLock::new(keygen),
            data_dir: RwLock::new(data_dir),
        }
    }

    pub fn get_keygen_settings(&self) -> KeyGenSettings {
        *self
            .keygen
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_keygen_settings(&self, settings: KeyGenSettings) -> Result<()> {
        settings.validate()?;
        let mut keygen = self
            .keygen
            .write()
            .map_err(|_| LedgerError::Lock("config key generation settings".to_string()))?;
        *keygen = settings;
        Ok(())
    }

    pub fn get_data_dir(&self) -> PathBuf {
        self.data_dir
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set_data_dir(&self, dir: PathBuf) {
        let mut data_dir = self
            .data_dir
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *data_dir = dir;
    }
}

fn env_or<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {key}={raw}: not a valid number, using {default}");
            default
        }),
        Err(_) => default,
    }
}
