//! Read-only relational schema model consumed by the renderer.
//!
//! The model is produced by schema introspection elsewhere; this crate only
//! reads it. Every type deserializes from JSON so the command-line tool can
//! load a model dumped by another process.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A database and the schema objects it contains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Database {
    /// Database name
    pub name: String,
    /// Schema identifier
    pub schema: Option<String>,
    /// Tables in display order
    pub tables: Vec<Table>,
    /// Views in display order
    pub views: Vec<View>,
    /// Stored routines in display order
    pub routines: Vec<Routine>,
}

/// A base table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Free-text comment
    pub comments: Option<String>,
    /// Columns in ordinal order
    pub columns: Vec<TableColumn>,
    /// Foreign keys declared on this (child) table
    pub foreign_keys: Vec<ForeignKeyConstraint>,
    /// Check constraint name -> expression, in declaration order
    pub check_constraints: IndexMap<String, String>,
    /// Indexes on this table
    pub indexes: Vec<TableIndex>,
}

/// A view and its defining query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct View {
    /// View name
    pub name: String,
    /// Free-text comment
    pub comments: Option<String>,
    /// Columns in ordinal order
    pub columns: Vec<TableColumn>,
    /// Defining query text
    pub definition: Option<String>,
}

/// Something that can appear in a name/description summary list.
pub trait Described {
    /// Object name
    fn name(&self) -> &str;
    /// Object comment, if any
    fn comments(&self) -> Option<&str>;
}

impl Described for Table {
    fn name(&self) -> &str {
        &self.name
    }

    fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }
}

impl Described for View {
    fn name(&self) -> &str {
        &self.name
    }

    fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }
}

/// A column of a table or view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableColumn {
    /// Column name
    pub name: String,
    /// SQL type name
    pub type_name: String,
    /// Size descriptor, e.g. `10,2`
    pub detailed_size: String,
    /// Whether the column accepts NULL
    pub nullable: bool,
    /// Whether the value is generated by the database
    pub auto_updated: bool,
    /// Default value expression
    pub default_value: Option<String>,
    /// Free-text comment
    pub comments: Option<String>,
    /// Part of the primary key
    pub primary: bool,
    /// Child side of a foreign key
    pub foreign_key: bool,
}

impl TableColumn {
    /// Create a column with the given name and type.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// Whether this column is part of the primary key.
    pub fn is_primary(&self) -> bool {
        self.primary
    }

    /// Whether this column references another table.
    pub fn is_foreign_key(&self) -> bool {
        self.foreign_key
    }
}

/// A column identified by its owning table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnRef {
    /// Owning table name
    pub table: String,
    /// Column name
    pub column: String,
}

impl ColumnRef {
    /// Create a column reference.
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    /// `table.column`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.table, self.column)
    }
}

/// A foreign key. Parent and child columns are paired by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForeignKeyConstraint {
    /// Constraint name
    pub name: String,
    /// Referenced columns
    pub parent_columns: Vec<ColumnRef>,
    /// Referencing columns
    pub child_columns: Vec<ColumnRef>,
    /// Delete rule label, e.g. `Cascade on delete`
    pub delete_rule: String,
}

/// An index on a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableIndex {
    /// Index name
    pub name: String,
    /// Type label, e.g. `Primary key`, `Must be unique`, `Performance`
    pub index_type: String,
    /// Indexed column names in key order
    pub columns: Vec<String>,
}

impl TableIndex {
    /// Column names joined with ` + `.
    pub fn columns_as_string(&self) -> String {
        self.columns.join(" + ")
    }
}

/// A stored procedure or function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Routine {
    /// Routine name
    pub name: String,
    /// Kind, e.g. `PROCEDURE` or `FUNCTION`
    pub routine_type: String,
    /// Language of the body, e.g. `SQL`
    pub definition_language: String,
    /// Whether the routine is deterministic
    pub deterministic: bool,
    /// Declared return type
    pub return_type: Option<String>,
    /// Security mode, e.g. `DEFINER`
    pub security_type: Option<String>,
    /// Free-text comment
    pub comment: Option<String>,
    /// Source text
    pub definition: Option<String>,
    /// Parameters in declaration order
    pub parameters: Vec<RoutineParameter>,
}

/// A routine parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutineParameter {
    /// Parameter name
    pub name: String,
    /// SQL type
    #[serde(rename = "type")]
    pub param_type: String,
    /// `IN`, `OUT` or `INOUT`
    pub mode: String,
}
