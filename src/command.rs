//! Commands of the `superschema` tool. Schemas are read from JSON files and
//! folded in the order the files are given, oldest first.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

use crate::error::Result;
use crate::schema::Schema;
use crate::settings::{OutputFormat, Settings};
use crate::superschema::SuperSchema;

/// Reconciles the column history of a table into one schema.
#[derive(Debug, Parser)]
#[command(author, version)]
pub struct Cli {
    /// Settings file; `./superschema.*` is used when present and none is given.
    #[arg(long, global = true)]
    pub config: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the schema generated from the history.
    Generate {
        #[arg(required = true)]
        schemas: Vec<PathBuf>,
    },
    /// Print every tag with its names, most recent first.
    History {
        #[arg(required = true)]
        schemas: Vec<PathBuf>,
    },
    /// Union of two histories, then generate.
    Union {
        #[arg(long, num_args = 1.., required = true)]
        older: Vec<PathBuf>,
        #[arg(long, num_args = 1.., required = true)]
        newer: Vec<PathBuf>,
    },
}

impl Command {
    /// Runs the command and returns what should be printed.
    pub fn run(&self, settings: &Settings) -> Result<String> {
        match self {
            Command::Generate { schemas } => {
                let super_schema = fold_files(schemas)?;
                render_schema(&super_schema.generate_schema()?, settings)
            }
            Command::History { schemas } => {
                let super_schema = fold_files(schemas)?;
                match settings.output {
                    OutputFormat::Text => Ok(super_schema.to_string()),
                    OutputFormat::Json => to_json(&super_schema, settings),
                }
            }
            Command::Union { older, newer } => {
                let united = SuperSchema::union(&fold_files(older)?, &fold_files(newer)?)?;
                render_schema(&united.generate_schema()?, settings)
            }
        }
    }
}

pub fn load_schema(path: &Path) -> Result<Schema> {
    let text = fs::read_to_string(path)?;
    let schema: Schema = serde_json::from_str(&text)?;
    info!(path = %path.display(), columns = schema.len(), "loaded schema");
    Ok(schema)
}

fn fold_files(paths: &[PathBuf]) -> Result<SuperSchema> {
    let schemas = paths
        .iter()
        .map(|p| load_schema(p))
        .collect::<Result<Vec<_>>>()?;
    SuperSchema::new(&schemas)
}

fn render_schema(schema: &Schema, settings: &Settings) -> Result<String> {
    match settings.output {
        OutputFormat::Text => Ok(schema.to_string()),
        OutputFormat::Json => to_json(schema, settings),
    }
}

fn to_json<T: serde::Serialize>(value: &T, settings: &Settings) -> Result<String> {
    let mut json = if settings.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    json.push('\n');
    Ok(json)
}
