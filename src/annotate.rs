use anyhow::Result;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{
    status::{StatusTally, StockStatus, STATUS_COLUMN},
    table::{read_table, write_table, Table},
};

/// Outcome of a single annotate run.
#[derive(Debug, Clone)]
pub struct AnnotateSummary {
    /// Where the augmented table was written.
    pub output: PathBuf,
    /// Number of data rows (header excluded).
    pub rows: usize,
    pub tally: StatusTally,
    /// Data rows whose field count did not match the header before augmentation.
    pub ragged: usize,
}

/// Append the `stock_status` column to `table`, drawing one label per data row.
pub fn augment<R: Rng + ?Sized>(table: &mut Table, rng: &mut R) -> StatusTally {
    table.headers.push(STATUS_COLUMN.to_string());

    let mut tally = StatusTally::default();
    for row in table.rows.iter_mut() {
        let status = StockStatus::random(rng);
        row.push(status.as_str().to_string());
        tally.record(status);
    }
    tally
}

/// Read `input`, augment it with random stock statuses from `rng`, write `output`.
///
/// `output` is only touched once the whole input has been read and augmented.
#[tracing::instrument(level = "info", skip(input, output, rng), fields(input = %input.as_ref().display(), output = %output.as_ref().display()))]
pub fn annotate_with_rng<P, Q, R>(input: P, output: Q, rng: &mut R) -> Result<AnnotateSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: Rng + ?Sized,
{
    let mut table = read_table(&input)?;

    let ragged = table.ragged_rows().len();
    if ragged > 0 {
        warn!(
            ragged,
            columns = table.headers.len(),
            "rows with a field count different from the header; passing through"
        );
    }

    let tally = augment(&mut table, rng);
    write_table(&output, &table)?;

    info!(
        rows = table.rows.len(),
        available = tally.get(StockStatus::Available),
        low = tally.get(StockStatus::Low),
        none = tally.get(StockStatus::None),
        "annotated"
    );

    Ok(AnnotateSummary {
        output: output.as_ref().to_path_buf(),
        rows: table.rows.len(),
        tally,
        ragged,
    })
}

/// [`annotate_with_rng`] using the thread-local generator.
pub fn annotate<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<AnnotateSummary> {
    annotate_with_rng(input, output, &mut rand::thread_rng())
}
