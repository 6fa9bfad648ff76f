//! Run configuration resolved from CLI flags, the environment and `.env`.

use tracing::info;

use crate::cli::Cli;
use crate::data::PercentileTable;
use crate::domain::ReferenceDate;

/// Settings shared by every subcommand.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// The injected "today" every computation is anchored to.
    pub reference: ReferenceDate,
    pub table: PercentileTable,
}

impl AppConfig {
    pub fn new(reference: ReferenceDate) -> Self {
        Self {
            reference,
            table: PercentileTable::reference(),
        }
    }

    /// Resolve from parsed CLI args. `--today` (or `OBTOOLS_TODAY`) wins over
    /// the current UTC date.
    pub fn from_cli(cli: &Cli) -> Self {
        let reference = cli.today.unwrap_or_else(ReferenceDate::today);
        info!(
            reference = %reference,
            pinned = cli.today.is_some(),
            "resolved reference date"
        );
        Self::new(reference)
    }
}

/// Load `.env` into the process environment, if present.
///
/// Must run before CLI parsing so `OBTOOLS_TODAY` can come from the file.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}
