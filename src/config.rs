//! Server configuration from environment variables
//!
//! | Variable             | Default | Meaning                                         |
//! |----------------------|---------|-------------------------------------------------|
//! | `PORT`               | 3000    | Listen port                                     |
//! | `MAX_COLORS`         | 16      | Quantizer color budget                          |
//! | `RESIZE_AREA`        | 12544   | Pixel area images are scaled to (0 = no resize) |
//! | `FETCH_TIMEOUT_SECS` | 30      | Timeout for fetching URL sources                |
//! | `FILE_ROOT`          | unset   | Directory path sources resolve against          |

use std::path::PathBuf;
use std::time::Duration;

use crate::quantize::DEFAULT_MAX_COLORS;
use crate::source::DEFAULT_RESIZE_AREA;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub max_colors: usize,
    pub resize_area: u32,
    pub fetch_timeout: Duration,
    /// Path sources are refused when unset
    pub file_root: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let parsed = |key: &str| -> Option<u64> {
            let raw = lookup(key)?;
            match raw.trim().parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid {}={:?}", key, raw);
                    None
                }
            }
        };
        let number = |key: &str, default: u64| parsed(key).unwrap_or(default);

        Self {
            port: narrow(number("PORT", defaults.port as u64), defaults.port),
            max_colors: narrow(
                number("MAX_COLORS", defaults.max_colors as u64),
                defaults.max_colors,
            ),
            resize_area: narrow(
                number("RESIZE_AREA", defaults.resize_area as u64),
                defaults.resize_area,
            ),
            fetch_timeout: Duration::from_secs(number(
                "FETCH_TIMEOUT_SECS",
                defaults.fetch_timeout.as_secs(),
            )),
            file_root: lookup("FILE_ROOT")
                .filter(|root| !root.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

fn narrow<T: TryFrom<u64>>(value: u64, default: T) -> T {
    T::try_from(value).unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            max_colors: DEFAULT_MAX_COLORS,
            resize_area: DEFAULT_RESIZE_AREA,
            fetch_timeout: Duration::from_secs(30),
            file_root: None,
        }
    }
}
