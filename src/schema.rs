use std::collections::HashMap;
use std::collections::hash_map::Entry;

// used to print out readable forms of a schema
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::column::{Column, ColumnCollection, NameHasher, Tag};
use crate::error::{Result, SchemaError};

// ------------- Schema -------------
/// A validated table schema: an ordered collection of columns with unique
/// tags and unique (case-insensitive) names, together with the order in which
/// the primary key columns make up the key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SchemaRecord", into = "SchemaRecord")]
pub struct Schema {
    columns: ColumnCollection,
    pk_ordinals: Vec<usize>, // positions in columns, in key order
    names: HashMap<String, usize, NameHasher>, // lowercased name -> position in columns
}

impl Schema {
    /// Builds a schema whose key order is the order in which the primary key
    /// columns appear among the columns.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let pk_ordinals = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_part_of_pk())
            .map(|(i, _)| i)
            .collect();
        Self::with_pk_ordinals(columns, pk_ordinals)
    }
    pub fn with_pk_ordinals(columns: Vec<Column>, pk_ordinals: Vec<usize>) -> Result<Self> {
        let mut names = HashMap::<String, usize, NameHasher>::default();
        for (i, column) in columns.iter().enumerate() {
            if column.name().is_empty() {
                return Err(SchemaError::EmptyColumnName(column.tag()));
            }
            match names.entry(column.name().to_lowercase()) {
                Entry::Occupied(e) => {
                    return Err(SchemaError::DuplicateName {
                        name: column.name().to_owned(),
                        first: columns[*e.get()].tag(),
                        second: column.tag(),
                    });
                }
                Entry::Vacant(e) => {
                    e.insert(i);
                }
            }
        }
        let pk_count = columns.iter().filter(|c| c.is_part_of_pk()).count();
        if pk_ordinals.len() != pk_count {
            return Err(SchemaError::PrimaryKey(format!(
                "expected {} primary key ordinals, found {}",
                pk_count,
                pk_ordinals.len()
            )));
        }
        let mut seen = vec![false; columns.len()];
        for &ordinal in &pk_ordinals {
            let column = columns.get(ordinal).ok_or_else(|| {
                SchemaError::PrimaryKey(format!("ordinal {} is out of range", ordinal))
            })?;
            if !column.is_part_of_pk() {
                return Err(SchemaError::PrimaryKey(format!(
                    "column {} (tag: {}) is not part of the primary key",
                    column.name(),
                    column.tag()
                )));
            }
            if seen[ordinal] {
                return Err(SchemaError::PrimaryKey(format!(
                    "ordinal {} is listed more than once",
                    ordinal
                )));
            }
            seen[ordinal] = true;
        }
        Ok(Self {
            columns: ColumnCollection::new(columns)?,
            pk_ordinals,
            names,
        })
    }
    pub fn columns(&self) -> &ColumnCollection {
        &self.columns
    }
    /// Primary key columns in key order.
    pub fn pk_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.pk_ordinals.iter().map(|&i| &self.columns.as_slice()[i])
    }
    pub fn non_pk_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|c| !c.is_part_of_pk())
    }
    pub fn pk_ordinals(&self) -> &[usize] {
        &self.pk_ordinals
    }
    pub fn get_by_tag(&self, tag: Tag) -> Option<&Column> {
        self.columns.get_by_tag(tag)
    }
    pub fn get_by_name(&self, name: &str) -> Option<&Column> {
        self.names
            .get(&name.to_lowercase())
            .map(|&i| &self.columns.as_slice()[i])
    }
    pub fn len(&self) -> usize {
        self.columns.len()
    }
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns && self.pk_ordinals == other.pk_ordinals
    }
}
impl Eq for Schema {}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for column in &self.columns {
            writeln!(f, "{}", column)?;
        }
        Ok(())
    }
}

/// Column-wise structural equality of two schemas: same columns in the same
/// order, compared by tag, name, type, primary key flag and constraints.
/// Key order is not considered.
pub fn schemas_are_equal(a: &Schema, b: &Schema) -> bool {
    a.len() == b.len() && a.columns.iter().zip(b.columns.iter()).all(|(x, y)| x == y)
}

#[derive(Serialize, Deserialize)]
struct SchemaRecord {
    columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pk_ordinals: Option<Vec<usize>>,
}
impl TryFrom<SchemaRecord> for Schema {
    type Error = SchemaError;
    fn try_from(r: SchemaRecord) -> Result<Self> {
        match r.pk_ordinals {
            Some(ordinals) => Schema::with_pk_ordinals(r.columns, ordinals),
            None => Schema::from_columns(r.columns),
        }
    }
}
impl From<Schema> for SchemaRecord {
    fn from(s: Schema) -> Self {
        let in_column_order = s.pk_ordinals.windows(2).all(|w| w[0] < w[1]);
        SchemaRecord {
            pk_ordinals: (!in_column_order).then(|| s.pk_ordinals.clone()),
            columns: s.columns.as_slice().to_vec(),
        }
    }
}
