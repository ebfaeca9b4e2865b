//! The SuperSchema of a table: every column tag ever observed across a
//! sequence of schemas, together with every name each tag has been given.
//!
//! Tags are the stable identity of a column. A tag keeps its identity through
//! renames, but two columns sharing a tag must otherwise be defined the same
//! way (type, primary key flag, constraints), or the schemas are considered
//! incompatible and accumulation fails with [`SchemaError::TagCollision`].
//!
//! [`SuperSchema::generate_schema`] turns the accumulated history back into a
//! displayable [`Schema`], using the most recent name of each tag and
//! suffixing names that ended up shared by more than one tag with the tag.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::hash::BuildHasher;

// used to print out readable forms of the name history
use std::fmt;

use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::column::{Column, ColumnCollection, Constraint, NameHasher, Tag, TagHasher};
use crate::datatype::TypeInfo;
use crate::error::{Result, SchemaError};
use crate::schema::Schema;

// ------------- SuperSchema -------------
#[derive(Debug, Clone, Default)]
pub struct SuperSchema {
    // column skeletons (names blanked) in the order their tags were first seen
    all_cols: ColumnCollection,
    // every name a tag has had, most recent first
    tag_names: HashMap<Tag, VecDeque<String>, TagHasher>,
    // position within the primary key, as last seen, for pk tags
    key_positions: HashMap<Tag, usize, TagHasher>,
}

impl SuperSchema {
    /// Folds the schemas, in the given order, into a fresh SuperSchema.
    pub fn new<'s, I>(schemas: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'s Schema>,
    {
        let mut super_schema = Self::default();
        for schema in schemas {
            super_schema.add_schema(schema)?;
        }
        Ok(super_schema)
    }

    /// Accumulates several schemas in order. Either all of them are added or,
    /// on a tag collision, none are.
    pub fn add_schemas<'s, I>(&mut self, schemas: I) -> Result<()>
    where
        I: IntoIterator<Item = &'s Schema>,
    {
        let mut next = self.clone();
        for schema in schemas {
            next.add_schema(schema)?;
        }
        *self = next;
        Ok(())
    }

    /// Accumulates one schema. Every column is checked before any is recorded,
    /// so a failing schema leaves the SuperSchema untouched.
    pub fn add_schema(&mut self, schema: &Schema) -> Result<()> {
        for column in schema.columns() {
            self.check_column(column)?;
        }
        for column in schema.columns() {
            self.record_column(column)?;
        }
        for (position, column) in schema.pk_columns().enumerate() {
            self.key_positions.insert(column.tag(), position);
        }
        Ok(())
    }

    /// Accumulates a single column, as if it came from a one-column schema.
    /// No key position is recorded for it.
    pub fn add_column(&mut self, column: &Column) -> Result<()> {
        self.check_column(column)?;
        self.record_column(column)
    }

    fn check_column(&self, column: &Column) -> Result<()> {
        match self.all_cols.get_by_tag(column.tag()) {
            Some(existing) if !existing.same_definition(column) => {
                let existing_name = self.latest_column_name(column.tag()).unwrap_or_default();
                warn!(
                    tag = column.tag(),
                    existing = existing_name,
                    incoming = column.name(),
                    "tag collision"
                );
                Err(SchemaError::TagCollision {
                    existing: existing_name.to_owned(),
                    incoming: column.name().to_owned(),
                    tag: column.tag(),
                })
            }
            _ => Ok(()),
        }
    }

    // Assumes check_column has accepted the column.
    fn record_column(&mut self, column: &Column) -> Result<()> {
        match self.tag_names.entry(column.tag()) {
            Entry::Occupied(mut e) => {
                e.get_mut().push_front(column.name().to_owned());
            }
            Entry::Vacant(e) => {
                debug!(tag = column.tag(), name = column.name(), "new column tag");
                e.insert(VecDeque::from([column.name().to_owned()]));
                self.all_cols.append(column.skeleton())?;
            }
        }
        Ok(())
    }

    /// Combines two SuperSchemas as if every schema behind `newer` had been
    /// accumulated after every schema behind `older`. The result depends on
    /// the argument order.
    pub fn union(older: &SuperSchema, newer: &SuperSchema) -> Result<SuperSchema> {
        for column in &newer.all_cols {
            if let Some(existing) = older.all_cols.get_by_tag(column.tag()) {
                if !existing.same_definition(column) {
                    let existing_name = older.latest_column_name(column.tag()).unwrap_or_default();
                    let incoming_name = newer.latest_column_name(column.tag()).unwrap_or_default();
                    warn!(
                        tag = column.tag(),
                        existing = existing_name,
                        incoming = incoming_name,
                        "tag collision in union"
                    );
                    return Err(SchemaError::TagCollision {
                        existing: existing_name.to_owned(),
                        incoming: incoming_name.to_owned(),
                        tag: column.tag(),
                    });
                }
            }
        }

        let mut all_cols = older.all_cols.clone();
        for column in &newer.all_cols {
            if !all_cols.contains_tag(column.tag()) {
                all_cols.append(column.clone())?;
            }
        }
        let mut tag_names = older.tag_names.clone();
        for (tag, names) in &newer.tag_names {
            let merged = tag_names.entry(*tag).or_default();
            for name in names.iter().rev() {
                merged.push_front(name.clone());
            }
        }
        let mut key_positions = older.key_positions.clone();
        key_positions.extend(newer.key_positions.iter().map(|(tag, position)| (*tag, *position)));
        Ok(SuperSchema { all_cols, tag_names, key_positions })
    }

    /// Left fold of [`SuperSchema::union`], oldest first.
    pub fn union_all<'s, I>(super_schemas: I) -> Result<SuperSchema>
    where
        I: IntoIterator<Item = &'s SuperSchema>,
    {
        let mut united = SuperSchema::default();
        for super_schema in super_schemas {
            united = SuperSchema::union(&united, super_schema)?;
        }
        Ok(united)
    }

    /// Projects the SuperSchema onto a single schema. Each column takes the
    /// most recent name of its tag; a name claimed by several tags becomes
    /// `name_<tag>` for all of them. The primary key follows the key order
    /// last seen for its tags; tags never seen with one go last.
    pub fn generate_schema(&self) -> Result<Schema> {
        let columns = self.generate_col_collection()?.into_vec();
        let mut pk_ordinals: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_part_of_pk())
            .map(|(i, _)| i)
            .collect();
        pk_ordinals.sort_by_key(|&i| {
            let position = self.key_positions.get(&columns[i].tag()).copied();
            (position.unwrap_or(usize::MAX), i)
        });
        Schema::with_pk_ordinals(columns, pk_ordinals)
            .map_err(|e| SchemaError::SchemaConstruction(Box::new(e)))
    }

    /// The generated columns in first-seen order, before schema validation.
    pub fn generate_col_collection(&self) -> Result<ColumnCollection> {
        let mut collection = ColumnCollection::default();
        for (column, name) in self.all_cols.iter().zip(self.display_names()) {
            collection.append(column.with_name(name))?;
        }
        Ok(collection)
    }

    // Names in all_cols order. Claims are counted case-insensitively, the
    // way schema names are compared.
    fn display_names(&self) -> Vec<String> {
        let candidates: Vec<&str> = self
            .all_cols
            .tags()
            .map(|tag| self.latest_column_name(tag).unwrap_or_default())
            .collect();
        let mut claims = HashMap::<String, usize, NameHasher>::default();
        for name in &candidates {
            *claims.entry(name.to_lowercase()).or_insert(0) += 1;
        }
        self.all_cols
            .tags()
            .zip(candidates.iter())
            .map(|(tag, name)| {
                if claims[&name.to_lowercase()] > 1 {
                    debug!(tag, name, "disambiguating shared column name");
                    format!("{}_{}", name, tag)
                } else {
                    (*name).to_owned()
                }
            })
            .collect()
    }

    /// A copy of this SuperSchema in which the tags found in `mapping` are
    /// replaced by the tags they map to. Order and name history are kept.
    pub fn rebase_tags<S: BuildHasher>(&self, mapping: &HashMap<Tag, Tag, S>) -> Result<SuperSchema> {
        let mut rebased = SuperSchema::default();
        for column in &self.all_cols {
            let old_tag = column.tag();
            let new_tag = mapping.get(&old_tag).copied().unwrap_or(old_tag);
            if new_tag != old_tag {
                debug!(old_tag, new_tag, "rebasing column tag");
            }
            rebased.all_cols.append(column.with_tag(new_tag))?;
            let names = self.tag_names.get(&old_tag).cloned().unwrap_or_default();
            rebased.tag_names.insert(new_tag, names);
            if let Some(&position) = self.key_positions.get(&old_tag) {
                rebased.key_positions.insert(new_tag, position);
            }
        }
        Ok(rebased)
    }

    /// The column skeletons, names blanked, in first-seen order.
    pub fn all_columns(&self) -> &ColumnCollection {
        &self.all_cols
    }
    /// The skeleton recorded for the tag.
    pub fn get_by_tag(&self, tag: Tag) -> Option<&Column> {
        self.all_cols.get_by_tag(tag)
    }
    /// Tags in first-seen order.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.all_cols.tags()
    }
    /// Tags with their skeletons, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (Tag, &Column)> + '_ {
        self.all_cols.iter().map(|c| (c.tag(), c))
    }
    /// Every name the tag has had, most recent first.
    pub fn all_column_names(&self, tag: Tag) -> Vec<&str> {
        self.tag_names
            .get(&tag)
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
    /// The name the tag had in the most recent schema that carried it.
    pub fn latest_column_name(&self, tag: Tag) -> Option<&str> {
        self.tag_names.get(&tag).and_then(|names| names.front()).map(String::as_str)
    }
    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.all_cols.len()
    }
    pub fn is_empty(&self) -> bool {
        self.all_cols.is_empty()
    }
}

// Key positions only steer generation and are not part of equality.
impl PartialEq for SuperSchema {
    fn eq(&self, other: &Self) -> bool {
        self.all_cols == other.all_cols && self.tag_names == other.tag_names
    }
}
impl Eq for SuperSchema {}

impl fmt::Display for SuperSchema {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (tag, column) in self.iter() {
            write!(f, "{}\t{}", tag, column.type_info())?;
            if column.is_part_of_pk() {
                write!(f, " PRIMARY KEY")?;
            }
            writeln!(f, "\t{}", self.all_column_names(tag).join(", "))?;
        }
        Ok(())
    }
}

// Serialized in first-seen tag order, so the output is as deterministic as
// the SuperSchema itself.
#[derive(Serialize)]
struct SkeletonRecord<'a> {
    tag: Tag,
    #[serde(rename = "type")]
    type_info: &'a TypeInfo,
    pk: bool,
    #[serde(skip_serializing_if = "is_unconstrained")]
    constraints: &'a [Constraint],
    names: Vec<&'a str>,
}

fn is_unconstrained(constraints: &&[Constraint]) -> bool {
    constraints.is_empty()
}

impl Serialize for SuperSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let records: Vec<SkeletonRecord> = self
            .iter()
            .map(|(tag, column)| SkeletonRecord {
                tag,
                type_info: column.type_info(),
                pk: column.is_part_of_pk(),
                constraints: column.constraints(),
                names: self.all_column_names(tag),
            })
            .collect();
        records.serialize(serializer)
    }
}
