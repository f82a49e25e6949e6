//! Views section.

use super::{flag, render_name_list, SectionRenderer};
use crate::docx::{styles, ContainerEngine};
use crate::error::Result;
use crate::model::{TableColumn, View};
use crate::writer::{CellContent, SectionWriter};

const COLUMN_HEADERS: [&str; 5] = ["Column", "Type", "Size", "Nullable", "Comments"];

/// Renders the views of a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewsSection;

impl SectionRenderer for ViewsSection {
    type Entity = View;

    fn name(&self) -> &'static str {
        "views"
    }

    fn render_summary<C: ContainerEngine + ?Sized>(
        &self,
        out: &mut SectionWriter<'_, C>,
        views: &[View],
    ) -> Result<()> {
        render_name_list(out, "Views", views)
    }

    fn render_detail<C: ContainerEngine + ?Sized>(
        &self,
        out: &mut SectionWriter<'_, C>,
        view: &View,
    ) -> Result<()> {
        out.heading(styles::HEADING2, &format!("View: {}", view.name))?;
        out.heading(styles::HEADING3, "Description")?;
        out.paragraph(view.comments.as_deref())?;

        render_columns(out, &view.columns)?;

        out.heading(styles::HEADING3, "Source")?;
        out.verbatim_block(view.definition.as_deref().unwrap_or_default())?;
        Ok(())
    }
}

/// View columns never carry key icons.
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
        out.row(
            &handle,
            idx + 1,
            &[
                CellContent::text(column.name.as_str()),
                CellContent::text(column.type_name.as_str()),
                CellContent::text(column.detailed_size.as_str()),
                flag(column.nullable),
                CellContent::optional(column.comments.as_deref()),
            ],
        )?;
    }
    Ok(())
}
