// used to print out readable forms of a data type
use std::fmt;

// used to read and write schema definitions
use serde::{Deserialize, Serialize};

// ------------- Type Kinds --------------
// The coarse family of a column type. Each kind carries a stable identifier
// and a constant name, in the same spirit as a UID/DATA_TYPE pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    String,
    Int,
    Uint,
    Float,
    Decimal,
    Bool,
    Datetime,
    Uuid,
    Blob,
    Json,
}

impl TypeKind {
    pub fn uid(&self) -> u8 {
        match self {
            TypeKind::String => 1,
            TypeKind::Int => 2,
            TypeKind::Uint => 3,
            TypeKind::Float => 4,
            TypeKind::Decimal => 5,
            TypeKind::Bool => 6,
            TypeKind::Datetime => 7,
            TypeKind::Uuid => 8,
            TypeKind::Blob => 9,
            TypeKind::Json => 10,
        }
    }
    pub fn name(&self) -> &'static str {
        match self {
            TypeKind::String => "String",
            TypeKind::Int => "Int",
            TypeKind::Uint => "Uint",
            TypeKind::Float => "Float",
            TypeKind::Decimal => "Decimal",
            TypeKind::Bool => "Bool",
            TypeKind::Datetime => "Datetime",
            TypeKind::Uuid => "Uuid",
            TypeKind::Blob => "Blob",
            TypeKind::Json => "Json",
        }
    }
}
impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ------------- Type Descriptors --------------
/// Detailed type metadata of a column. Two columns can only share a tag if
/// their descriptors are equal; no coercion between descriptors is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeInfo {
    Varchar { max_len: u32 },
    Int { bits: u8 },
    Uint { bits: u8 },
    Float { bits: u8 },
    Decimal { precision: u8, scale: u8 },
    Bool,
    Datetime,
    Uuid,
    Blob,
    Json,
}

pub const DEFAULT_VARCHAR_LENGTH: u32 = 16383;

impl TypeInfo {
    pub fn string_default() -> Self {
        TypeInfo::Varchar { max_len: DEFAULT_VARCHAR_LENGTH }
    }
    pub fn int32() -> Self {
        TypeInfo::Int { bits: 32 }
    }
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeInfo::Varchar { .. } => TypeKind::String,
            TypeInfo::Int { .. } => TypeKind::Int,
            TypeInfo::Uint { .. } => TypeKind::Uint,
            TypeInfo::Float { .. } => TypeKind::Float,
            TypeInfo::Decimal { .. } => TypeKind::Decimal,
            TypeInfo::Bool => TypeKind::Bool,
            TypeInfo::Datetime => TypeKind::Datetime,
            TypeInfo::Uuid => TypeKind::Uuid,
            TypeInfo::Blob => TypeKind::Blob,
            TypeInfo::Json => TypeKind::Json,
        }
    }
}

fn int_name(bits: u8) -> &'static str {
    match bits {
        8 => "tinyint",
        16 => "smallint",
        24 => "mediumint",
        32 => "int",
        _ => "bigint",
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TypeInfo::Varchar { max_len } => write!(f, "varchar({})", max_len),
            TypeInfo::Int { bits } => write!(f, "{}", int_name(*bits)),
            TypeInfo::Uint { bits } => write!(f, "{} unsigned", int_name(*bits)),
            TypeInfo::Float { bits } if *bits <= 32 => write!(f, "float"),
            TypeInfo::Float { .. } => write!(f, "double"),
            TypeInfo::Decimal { precision, scale } => write!(f, "decimal({},{})", precision, scale),
            TypeInfo::Bool => write!(f, "bool"),
            TypeInfo::Datetime => write!(f, "datetime"),
            TypeInfo::Uuid => write!(f, "uuid"),
            TypeInfo::Blob => write!(f, "blob"),
            TypeInfo::Json => write!(f, "json"),
        }
    }
}
