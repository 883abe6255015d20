#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A row outside of the currently visible rows was requested.
    ///
    /// The hosting list should only ever ask for rows below [`row_count`](crate::TreeDataSource::row_count).
    #[error("row {row} is out of range, there are only {row_count} visible rows")]
    RowOutOfRange { row: usize, row_count: usize },
}

pub type Result<T> = core::result::Result<T, Error>;
