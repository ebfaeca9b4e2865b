// tag-keyed lookups use a fast non-cryptographic hasher
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::slice::Iter;

// used to print out readable forms of a column
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::datatype::{TypeInfo, TypeKind};
use crate::error::{Result, SchemaError};

// ------------- Tag -------------
pub type Tag = u64;

pub type TagHasher = BuildHasherDefault<SeaHasher>;
pub type NameHasher = BuildHasherDefault<SeaHasher>;

// ------------- Constraint -------------
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    NotNull,
    Unique,
    Default(String),
}
impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Constraint::NotNull => write!(f, "NOT NULL"),
            Constraint::Unique => write!(f, "UNIQUE"),
            Constraint::Default(expr) => write!(f, "DEFAULT {}", expr),
        }
    }
}

// ------------- Column -------------
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ColumnRecord", into = "ColumnRecord")]
pub struct Column {
    name: String,
    tag: Tag,
    type_info: TypeInfo,
    is_part_of_pk: bool,
    constraints: Vec<Constraint>, // sorted and free of duplicates, so order never matters
}

impl Column {
    pub fn new(
        name: impl Into<String>,
        tag: Tag,
        type_info: TypeInfo,
        is_part_of_pk: bool,
        mut constraints: Vec<Constraint>,
    ) -> Self {
        constraints.sort_unstable();
        constraints.dedup();
        Self {
            name: name.into(),
            tag,
            type_info,
            is_part_of_pk,
            constraints,
        }
    }
    // Fields are only exposed through getters, so a column
    // is immutable once created. Renaming yields a new column.
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn tag(&self) -> Tag {
        self.tag
    }
    pub fn kind(&self) -> TypeKind {
        self.type_info.kind()
    }
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }
    pub fn is_part_of_pk(&self) -> bool {
        self.is_part_of_pk
    }
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
    pub fn with_tag(&self, tag: Tag) -> Self {
        Self {
            tag,
            ..self.clone()
        }
    }
    /// The column with its name blanked out, i.e. only the parts that make
    /// up its identity across schema versions.
    pub fn skeleton(&self) -> Self {
        self.with_name(String::new())
    }
    /// Definitional equality: everything but the name has to match.
    pub fn same_definition(&self, other: &Column) -> bool {
        self.tag == other.tag
            && self.kind() == other.kind()
            && self.type_info == other.type_info
            && self.is_part_of_pk == other.is_part_of_pk
            && self.constraints == other.constraints
    }
}
impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.name, self.type_info)?;
        if self.is_part_of_pk {
            write!(f, " PRIMARY KEY")?;
        }
        for constraint in &self.constraints {
            write!(f, " {}", constraint)?;
        }
        write!(f, " (tag: {})", self.tag)
    }
}

#[derive(Serialize, Deserialize)]
struct ColumnRecord {
    name: String,
    tag: Tag,
    #[serde(rename = "type")]
    type_info: TypeInfo,
    #[serde(default)]
    pk: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    constraints: Vec<Constraint>,
}
impl From<ColumnRecord> for Column {
    fn from(r: ColumnRecord) -> Self {
        Column::new(r.name, r.tag, r.type_info, r.pk, r.constraints)
    }
}
impl From<Column> for ColumnRecord {
    fn from(c: Column) -> Self {
        ColumnRecord {
            name: c.name,
            tag: c.tag,
            type_info: c.type_info,
            pk: c.is_part_of_pk,
            constraints: c.constraints,
        }
    }
}

// ------------- ColumnCollection -------------
/// An ordered sequence of columns where every tag occurs at most once.
#[derive(Debug, Clone, Default)]
pub struct ColumnCollection {
    columns: Vec<Column>,
    lookup: HashMap<Tag, usize, TagHasher>, // tag -> position in columns
}

impl ColumnCollection {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut collection = Self::default();
        for column in columns {
            collection.append(column)?;
        }
        Ok(collection)
    }
    pub fn append(&mut self, column: Column) -> Result<()> {
        match self.lookup.entry(column.tag()) {
            Entry::Occupied(_) => Err(SchemaError::DuplicateTag(column.tag())),
            Entry::Vacant(e) => {
                e.insert(self.columns.len());
                self.columns.push(column);
                Ok(())
            }
        }
    }
    pub fn get_by_tag(&self, tag: Tag) -> Option<&Column> {
        self.lookup.get(&tag).map(|&i| &self.columns[i])
    }
    pub fn contains_tag(&self, tag: Tag) -> bool {
        self.lookup.contains_key(&tag)
    }
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.columns.iter().map(Column::tag)
    }
    pub fn iter(&self) -> Iter<'_, Column> {
        self.columns.iter()
    }
    pub fn as_slice(&self) -> &[Column] {
        &self.columns
    }
    pub fn into_vec(self) -> Vec<Column> {
        self.columns
    }
    pub fn len(&self) -> usize {
        self.columns.len()
    }
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
// the lookup is derived from the columns, so it takes no part in equality
impl PartialEq for ColumnCollection {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
    }
}
impl Eq for ColumnCollection {}

impl<'a> IntoIterator for &'a ColumnCollection {
    type Item = &'a Column;
    type IntoIter = Iter<'a, Column>;
    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
