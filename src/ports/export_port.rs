//! Export port trait.

use crate::domain::draw::DrawRecord;
use crate::domain::error::FourdError;
use crate::domain::frequency::FrequencyTables;
use crate::domain::ranker::CandidateScore;
use std::path::Path;

/// Port for writing the derived outputs: the analytics document and the
/// denormalized history table.
pub trait ExportPort {
    fn write_analytics(
        &self,
        tables: &FrequencyTables,
        top_picks: &[CandidateScore],
        path: &Path,
    ) -> Result<(), FourdError>;

    fn write_history_csv(&self, history: &[DrawRecord], path: &Path) -> Result<(), FourdError>;
}
