//! Section renderers for tables, views and routines.
//!
//! Each renderer owns the enumeration order and the column layout of one
//! entity kind. A non-empty section is a summary table followed by a page
//! break, then one detail block per entity, each followed by a page break.
//! An empty section contributes nothing at all.

mod routines;
mod tables;
mod views;

pub use routines::RoutinesSection;
pub use tables::TablesSection;
pub use views::ViewsSection;

use crate::docx::{styles, ContainerEngine};
use crate::error::Result;
use crate::model::Described;
use crate::writer::{CellContent, SectionWriter};

/// Renders the summary and detail blocks of one entity kind.
pub trait SectionRenderer {
    /// The schema entity rendered by this section.
    type Entity;

    /// Section name used in logs.
    fn name(&self) -> &'static str;

    /// Render the summary list of all entities.
    fn render_summary<C: ContainerEngine + ?Sized>(
        &self,
        out: &mut SectionWriter<'_, C>,
        entities: &[Self::Entity],
    ) -> Result<()>;

    /// Render the detail block of a single entity.
    fn render_detail<C: ContainerEngine + ?Sized>(
        &self,
        out: &mut SectionWriter<'_, C>,
        entity: &Self::Entity,
    ) -> Result<()>;

    /// Render the whole section, separating blocks with page breaks.
    fn render<C: ContainerEngine + ?Sized>(
        &self,
        out: &mut SectionWriter<'_, C>,
        entities: &[Self::Entity],
    ) -> Result<()> {
        if entities.is_empty() {
            log::debug!("No {} to render", self.name());
            return Ok(());
        }
        log::debug!("Rendering {} {}", entities.len(), self.name());

        self.render_summary(out, entities)?;
        out.page_break()?;
        for entity in entities {
            self.render_detail(out, entity)?;
            out.page_break()?;
        }
        Ok(())
    }
}

const SUMMARY_HEADERS: [&str; 2] = ["Name", "Description"];

/// Name/Description summary shared by tables and views.
pub(crate) fn render_name_list<C, E>(
    out: &mut SectionWriter<'_, C>,
    title: &str,
    entities: &[E],
) -> Result<()>
where
    C: ContainerEngine + ?Sized,
    E: Described,
{
    out.heading(styles::HEADING2, title)?;
    let table = out.table(&SUMMARY_HEADERS, entities.len())?;
    for (idx, entity) in entities.iter().enumerate() {
        out.row(
            &table,
            idx + 1,
            &[
                CellContent::text(entity.name()),
                CellContent::optional(entity.comments()),
            ],
        )?;
    }
    Ok(())
}

/// `true` / `false` cell text.
pub(crate) fn flag(value: bool) -> CellContent {
    CellContent::text(value.to_string())
}


#[cfg(test)]
mod tests {
    use super::test_support::{outline, package};
    use super::*;
    use crate::model::{Routine, Table};

    #[test]
    fn test_empty_section_contributes_nothing() {
        let (mut pkg, mut cache) = package();
        let mut out = SectionWriter::new(&mut pkg, &mut cache);
        TablesSection.render(&mut out, &[] as &[Table]).unwrap();
        RoutinesSection.render(&mut out, &[] as &[Routine]).unwrap();
        assert!(pkg.elements().is_empty());
    }

    #[test]
    fn test_section_page_break_layout() {
        let (mut pkg, mut cache) = package();
        let mut out = SectionWriter::new(&mut pkg, &mut cache);
        let tables = vec![
            Table {
                name: "a".to_string(),
                ..Default::default()
            },
            Table {
                name: "b".to_string(),
                ..Default::default()
            },
        ];
        TablesSection.render(&mut out, &tables).unwrap();

        let lines = outline(pkg.elements());
        assert_eq!(&lines[0..3], ["P:Heading2:Tables", "T:Name|Description", "BR"]);
        assert_eq!(lines.iter().filter(|l| *l == "BR").count(), 3);
        assert_eq!(lines.last().map(String::as_str), Some("BR"));
    }
}
