//! Routines section.

use super::{flag, SectionRenderer};
use crate::docx::{styles, ContainerEngine};
use crate::error::Result;
use crate::model::Routine;
use crate::writer::{CellContent, SectionWriter};

const SUMMARY_HEADERS: [&str; 8] = [
    "Name",
    "Type",
    "Language",
    "Deterministic",
    "Return Type",
    "Security",
    "Restriction",
    "Comments",
];

const PARAMETER_HEADERS: [&str; 3] = ["Name", "Type", "Mode"];

/// Renders the stored routines of a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoutinesSection;

impl SectionRenderer for RoutinesSection {
    type Entity = Routine;

    fn name(&self) -> &'static str {
        "routines"
    }

    fn render_summary<C: ContainerEngine + ?Sized>(
        &self,
        out: &mut SectionWriter<'_, C>,
        routines: &[Routine],
    ) -> Result<()> {
        out.heading(styles::HEADING2, "Routines")?;
        let handle = out.table(&SUMMARY_HEADERS, routines.len())?;

        for (idx, routine) in routines.iter().enumerate() {
            out.row(
                &handle,
                idx + 1,
                &[
                    CellContent::text(routine.name.as_str()),
                    CellContent::text(routine.routine_type.as_str()),
                    CellContent::text(routine.definition_language.as_str()),
                    flag(routine.deterministic),
                    CellContent::optional(routine.return_type.as_deref()),
                    CellContent::optional(routine.security_type.as_deref()),
                    // nothing in the model maps to Restriction
                    CellContent::empty(),
                    CellContent::optional(routine.comment.as_deref()),
                ],
            )?;
        }
        Ok(())
    }

    fn render_detail<C: ContainerEngine + ?Sized>(
        &self,
        out: &mut SectionWriter<'_, C>,
        routine: &Routine,
    ) -> Result<()> {
        out.heading(styles::HEADING2, &format!("Routine: {}", routine.name))?;
        out.heading(styles::HEADING3, "Description")?;
        out.paragraph(routine.comment.as_deref())?;

        if !routine.parameters.is_empty() {
            out.heading(styles::HEADING3, "Parameters")?;
            let handle = out.table(&PARAMETER_HEADERS, routine.parameters.len())?;
            for (idx, param) in routine.parameters.iter().enumerate() {
                out.row(
                    &handle,
                    idx + 1,
                    &[
                        CellContent::text(param.name.as_str()),
                        CellContent::text(param.param_type.as_str()),
                        CellContent::text(param.mode.as_str()),
                    ],
                )?;
            }
        }

        out.heading(styles::HEADING3, "Source")?;
        out.verbatim_block(routine.definition.as_deref().unwrap_or_default())?;
        Ok(())
    }
}
