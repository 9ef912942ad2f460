use thiserror::Error;

/// Errors surfaced while materializing or tearing down fixture data.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The database rejected an insertion built from fixture data, for
    /// example a constraint violation or a column that does not exist.
    /// The batch is aborted; rows inserted earlier in the same call stay
    /// in place.
    #[error("fixture insertion error into `{table}`\n{sql}\n{detail}")]
    InvalidFixtureData {
        table: String,
        sql: String,
        detail: String,
    },

    /// The database rejected a delete-all for a tracked table. The table
    /// stays tracked so the caller can retry.
    #[error("fixture truncation error for `{table}`: {detail}")]
    Truncation { table: String, detail: String },

    /// A fixture file could not be read, parsed, or was not shaped as a
    /// mapping of fixture names to column maps.
    #[error("fixture file error for `{path}`: {detail}")]
    FixtureFile { path: String, detail: String },
}

impl FixtureError {
    pub(crate) fn invalid_fixture_data(table: &str, sql: &str, err: anyhow::Error) -> Self {
        FixtureError::InvalidFixtureData {
            table: table.to_string(),
            sql: sql.to_string(),
            detail: format!("{err:#}"),
        }
    }

    pub(crate) fn truncation(table: &str, err: anyhow::Error) -> Self {
        FixtureError::Truncation {
            table: table.to_string(),
            detail: format!("{err:#}"),
        }
    }

    pub(crate) fn fixture_file(path: &str, detail: impl std::fmt::Display) -> Self {
        FixtureError::FixtureFile {
            path: path.to_string(),
            detail: detail.to_string(),
        }
    }
}
