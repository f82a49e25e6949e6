//! Allocation of page-wide tables with a header row.

use super::cell_writer::{set_cell_content, CellContent};
use super::resource_cache::ResourceCache;
use crate::docx::{ContainerEngine, TableHandle};
use crate::error::{Error, Result};

/// Split `writable_width` evenly over `columns`, rounding down.
///
/// Fails with [`Error::InvalidLayout`] for zero columns.
pub fn column_widths(writable_width: u32, columns: usize) -> Result<Vec<u32>> {
    if columns == 0 {
        return Err(Error::InvalidLayout(
            "a table needs at least one column".to_string(),
        ));
    }
    let divisor = u32::try_from(columns)
        .map_err(|_| Error::InvalidLayout(format!("{} columns is too many", columns)))?;
    Ok(vec![writable_width / divisor; columns])
}

/// Append a table with one header row holding `titles` and `data_rows`
/// empty rows below it.
///
/// Every column gets `floor(writable_width / titles.len())` twips. A table
/// with zero data rows is a header-only table; the renderers use a single
/// title with zero rows as a width-fitted verbatim text block.
pub fn create_table<C, S>(
    container: &mut C,
    cache: &mut ResourceCache,
    titles: &[S],
    data_rows: usize,
) -> Result<TableHandle>
where
    C: ContainerEngine + ?Sized,
    S: AsRef<str>,
{
    let widths = column_widths(container.writable_width(), titles.len())?;
    let handle = container.allocate_table(data_rows + 1, titles.len(), &widths)?;
    log::debug!(
        "Allocated {}x{} table, column width {}",
        handle.rows(),
        handle.columns(),
        widths[0]
    );

    for (col, title) in titles.iter().enumerate() {
        set_cell_content(
            container,
            cache,
            &handle,
            0,
            col,
            &CellContent::text(title.as_ref()),
        )?;
    }
    Ok(handle)
}
