//! Settings for the `superschema` command line tool.
//!
//! Values are layered: built-in defaults, then an optional settings file
//! (`superschema.toml`, `superschema.json`, ... or the path given with
//! `--config`), then `SUPERSCHEMA_*` environment variables such as
//! `SUPERSCHEMA_OUTPUT=json`.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Filter directive for the log subscriber, used when `RUST_LOG` is unset.
    pub log_level: String,
    pub output: OutputFormat,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            output: OutputFormat::Text,
            pretty: true,
        }
    }
}

impl Settings {
    pub fn load(path: Option<&str>) -> Result<Self> {
        let builder = Config::builder()
            .set_default("log_level", "warn")?
            .set_default("output", "text")?
            .set_default("pretty", true)?;
        let builder = match path {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("superschema").required(false)),
        };
        let settings = builder
            .add_source(Environment::with_prefix("SUPERSCHEMA").try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
