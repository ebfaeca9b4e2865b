//! SuperSchema – one reconciled schema for every version a table has had.
//!
//! In versioned table storage the same logical table can have a different
//! schema at every commit: columns get added, renamed and reordered. Every
//! column therefore carries a *tag*, a `u64` identity that survives renames.
//! A [`superschema::SuperSchema`] folds a sequence of schemas into:
//! * a registry of every tag ever seen, as a column *skeleton* (the column with
//!   its name blanked), in first-seen order, and
//! * the name history of each tag, most recent name first.
//!
//! History-spanning operations (diff across commits, merge of divergent
//! branches, full-history export) use it to address any historical row with
//! one consistent set of column identities.
//!
//! ## Modules
//! * [`datatype`] – Type kinds and type descriptors of columns.
//! * [`column`] – Tags, columns, constraints and tag-unique column collections.
//! * [`schema`] – Validated schemas and the [`schema::schemas_are_equal`] helper.
//! * [`superschema`] – Accumulation, collision detection, schema generation and union.
//! * [`settings`] and [`command`] – Configuration and commands of the `superschema` tool.
//!
//! ## Tag collisions
//! Two columns sharing a tag must agree on everything but their name. If they
//! don't, accumulation fails with [`SchemaError::TagCollision`] and nothing is
//! recorded.
//!
//! ## Quick Start
//! ```
//! use superschema::column::Column;
//! use superschema::datatype::TypeInfo;
//! use superschema::schema::Schema;
//! use superschema::superschema::SuperSchema;
//!
//! let col = |name: &str, tag, pk| Column::new(name, tag, TypeInfo::string_default(), pk, vec![]);
//! let v1 = Schema::from_columns(vec![col("id", 1, true), col("name", 2, false)]).unwrap();
//! let v2 = Schema::from_columns(vec![col("id", 1, true), col("full_name", 2, false)]).unwrap();
//!
//! let history = SuperSchema::new([&v1, &v2]).unwrap();
//! assert_eq!(history.all_column_names(2), vec!["full_name", "name"]);
//! let latest = history.generate_schema().unwrap();
//! assert_eq!(latest.get_by_tag(2).unwrap().name(), "full_name");
//! ```

pub mod column;
pub mod command;
pub mod datatype;
pub mod error;
pub mod schema;
pub mod settings;
pub mod superschema;

pub use error::{Result, SchemaError};
