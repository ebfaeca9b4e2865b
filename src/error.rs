use thiserror::Error;

use crate::column::Tag;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("tag collision for columns {existing} and {incoming}, different definitions (tag: {tag})")]
    TagCollision { existing: String, incoming: String, tag: Tag },
    #[error("unable to generate schema: {0}")]
    SchemaConstruction(#[source] Box<SchemaError>),
    #[error("duplicate column tag {0}")]
    DuplicateTag(Tag),
    #[error("duplicate column name {name} (tags: {first}, {second})")]
    DuplicateName { name: String, first: Tag, second: Tag },
    #[error("column with tag {0} has an empty name")]
    EmptyColumnName(Tag),
    #[error("invalid primary key: {0}")]
    PrimaryKey(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, SchemaError>;

// Helper conversions
impl From<config::ConfigError> for SchemaError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self { Self::Serialization(e.to_string()) }
}
impl From<std::io::Error> for SchemaError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}
