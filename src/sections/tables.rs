//! Tables section: summary list plus columns, relationships, checks and
//! indexes per table.

use super::{flag, render_name_list, SectionRenderer};
use crate::docx::{styles, ContainerEngine};
use crate::error::Result;
use crate::model::{Table, TableColumn};
use crate::writer::{CellContent, SectionWriter};

const COLUMN_HEADERS: [&str; 7] = [
    "Column", "Type", "Size", "Nullable", "Auto", "Default", "Comments",
];

const FOREIGN_KEY_HEADERS: [&str; 4] = [
    "Constraint Name",
    "Child Column",
    "Parent Column",
    "Delete Rule",
];

const CHECK_HEADERS: [&str; 2] = ["Constraint Name", "Constraint"];

const INDEX_HEADERS: [&str; 3] = ["Index Name", "Type Column", "Columns"];

/// Shown when a table has no comment.
pub const MISSING_DESCRIPTION: &str = "Comments";

/// Renders the tables of a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct TablesSection;

impl SectionRenderer for TablesSection {
    type Entity = Table;

    fn name(&self) -> &'static str {
        "tables"
    }

    fn render_summary<C: ContainerEngine + ?Sized>(
        &self,
        out: &mut SectionWriter<'_, C>,
        tables: &[Table],
    ) -> Result<()> {
        render_name_list(out, "Tables", tables)
    }

    fn render_detail<C: ContainerEngine + ?Sized>(
        &self,
        out: &mut SectionWriter<'_, C>,
        table: &Table,
    ) -> Result<()> {
        out.heading(styles::HEADING2, &format!("Table: {}", table.name))?;
        out.heading(styles::HEADING3, "Description")?;
        out.paragraph(Some(table.comments.as_deref().unwrap_or(MISSING_DESCRIPTION)))?;

        render_columns(out, &table.columns)?;
        render_relationships(out, table)?;
        render_checks(out, table)?;
        render_indexes(out, table)
    }
}

fn render_columns<C: ContainerEngine + ?Sized>(
    out: &mut SectionWriter<'_, C>,
    columns: &[TableColumn],
) -> Result<()> {
    if columns.is_empty() {
        return Ok(());
    }
    out.heading(styles::HEADING3, "Columns")?;
    let handle = out.table(&COLUMN_HEADERS, columns.len())?;

    for (idx, column) in columns.iter().enumerate() {
        let auto = if column.auto_updated {
            flag(true)
        } else {
            CellContent::empty()
        };
        out.row(
            &handle,
            idx + 1,
            &[
                CellContent::column_name(column),
                CellContent::text(column.type_name.as_str()),
                CellContent::text(column.detailed_size.as_str()),
                flag(column.nullable),
                auto,
                CellContent::optional(column.default_value.as_deref()),
                CellContent::optional(column.comments.as_deref()),
            ],
        )?;
    }
    Ok(())
}

/// One row per (parent, child) column pair across all foreign keys.
fn render_relationships<C: ContainerEngine + ?Sized>(
    out: &mut SectionWriter<'_, C>,
    table: &Table,
) -> Result<()> {
    if table.foreign_keys.is_empty() {
        return Ok(());
    }
    out.heading(styles::HEADING3, "Relationships")?;

    let rows: usize = table
        .foreign_keys
        .iter()
        .map(|fk| fk.parent_columns.len())
        .sum();
    let handle = out.table(&FOREIGN_KEY_HEADERS, rows)?;

    let mut row = 1;
    for fk in &table.foreign_keys {
        for (pos, parent) in fk.parent_columns.iter().enumerate() {
            let child = match fk.child_columns.get(pos) {
                Some(child) => CellContent::text(child.column.as_str()),
                None => {
                    log::warn!(
                        "Foreign key {} on {} has no child column at position {}",
                        fk.name,
                        table.name,
                        pos
                    );
                    CellContent::empty()
                },
            };
            out.row(
                &handle,
                row,
                &[
                    CellContent::text(fk.name.as_str()),
                    child,
                    CellContent::text(parent.qualified_name()),
                    CellContent::text(fk.delete_rule.as_str()),
                ],
            )?;
            row += 1;
        }
    }
    Ok(())
}

fn render_checks<C: ContainerEngine + ?Sized>(
    out: &mut SectionWriter<'_, C>,
    table: &Table,
) -> Result<()> {
    if table.check_constraints.is_empty() {
        return Ok(());
    }
    out.heading(styles::HEADING3, "Checks")?;
    let handle = out.table(&CHECK_HEADERS, table.check_constraints.len())?;

    for (idx, (name, expression)) in table.check_constraints.iter().enumerate() {
        out.row(
            &handle,
            idx + 1,
            &[
                CellContent::text(name.as_str()),
                CellContent::text(expression.as_str()),
            ],
        )?;
    }
    Ok(())
}

fn render_indexes<C: ContainerEngine + ?Sized>(
    out: &mut SectionWriter<'_, C>,
    table: &Table,
) -> Result<()> {
    if table.indexes.is_empty() {
        return Ok(());
    }
    out.heading(styles::HEADING3, "Indexes")?;
    let handle = out.table(&INDEX_HEADERS, table.indexes.len())?;

    for (idx, index) in table.indexes.iter().enumerate() {
        out.row(
            &handle,
            idx + 1,
            &[
                CellContent::text(index.name.as_str()),
                CellContent::text(index.index_type.as_str()),
                CellContent::text(index.columns_as_string()),
            ],
        )?;
    }
    Ok(())
}
