use serde::Deserialize;
use std::env;

use crate::error::ConfigError;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub allocator: AllocatorConfig,
    pub scanner: ScannerConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
}

// Настройки генерации карты мест
#[derive(Debug, Clone, Deserialize)]
pub struct AllocatorConfig {
    pub blocked_probability: f64,
    pub reserved_probability: f64,
    pub seed: Option<u64>,
}

// Настройки консоли сканирования
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    pub staff_id: String,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            blocked_probability: 0.05,
            reserved_probability: 0.15,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    // Та же сборка, но источник переменных передается явно (удобно в тестах)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AllocatorConfig::default();

        Ok(Config {
            app: AppConfig {
                environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
                rust_log: lookup("RUST_LOG").unwrap_or_else(|| "seatmap=debug".to_string()),
            },
            allocator: AllocatorConfig {
                blocked_probability: probability(
                    &lookup,
                    "SEAT_BLOCKED_PROBABILITY",
                    defaults.blocked_probability,
                )?,
                reserved_probability: probability(
                    &lookup,
                    "SEAT_RESERVED_PROBABILITY",
                    defaults.reserved_probability,
                )?,
                seed: lookup("SEAT_RNG_SEED")
                    .map(|raw| {
                        raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
                            name: "SEAT_RNG_SEED",
                            value: raw.clone(),
                        })
                    })
                    .transpose()?,
            },
            scanner: ScannerConfig {
                staff_id: lookup("SCANNER_STAFF_ID").unwrap_or_else(|| "Staff-001".to_string()),
            },
        })
    }
}

fn probability<F>(lookup: &F, name: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };

    let value: f64 = raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: raw.clone(),
    })?;

    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ProbabilityOutOfRange { name, value });
    }

    Ok(value)
}
