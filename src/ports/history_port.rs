//! History persistence port trait.

use crate::domain::draw::DrawRecord;
use crate::domain::error::FourdError;

/// Load and persist the retained draw history. The ingestor side of the
/// pipeline reads through the same trait: a source of draws is a source of
/// draws whether it is the history file or a freshly scraped batch.
pub trait HistoryPort {
    /// A missing store is an empty history, not an error.
    fn load(&self) -> Result<Vec<DrawRecord>, FourdError>;

    fn save(&self, history: &[DrawRecord]) -> Result<(), FourdError>;
}
