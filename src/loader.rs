use crate::error::FixtureError;
use crate::fixture_file::{ColumnMap, Fixture, FixtureFile, FixtureValue, InsertedRecord};
use crate::helper::Database;
use crate::key;
use indexmap::IndexMap;
use log::debug;

/// Suffix marking a column whose value names another fixture.
const FOREIGN_KEY_SUFFIX: &str = "_fk";
/// Marker entry naming the primary-key column, or suppressing it.
const PRIMARY_KEY_MARKER: &str = "__id";
/// Primary-key column used when no marker is present.
const DEFAULT_PRIMARY_KEY: &str = "id";

/// How a fixture column participates in record building.
#[derive(Debug, PartialEq)]
enum ColumnKind {
    /// `*_fk`: the value names another fixture and resolves to that
    /// fixture's derived key, stored under the stripped column name.
    ForeignKey(String),
    /// `__id`: names the primary-key column, or suppresses assignment
    /// when its value is empty. Never inserted.
    PrimaryKeyMarker,
    Plain,
}

fn classify(column: &str) -> ColumnKind {
    if column == PRIMARY_KEY_MARKER {
        ColumnKind::PrimaryKeyMarker
    } else if let Some(target) = column.strip_suffix(FOREIGN_KEY_SUFFIX) {
        ColumnKind::ForeignKey(target.to_string())
    } else {
        ColumnKind::Plain
    }
}

/// Materializes fixtures into database rows and tears them down again.
///
/// The loader owns the list of tables it has seeded; nothing is shared
/// across instances. It performs no locking and assumes one caller at a
/// time.
pub struct Loader<D: Database> {
    driver: D,
    tables: Vec<String>,
}

impl<D: Database> Loader<D> {
    pub fn new(driver: D) -> Self {
        Loader {
            driver,
            tables: vec![],
        }
    }

    /// Tables that have received fixture data and not yet been truncated.
    pub fn tracked_tables(&self) -> &[String] {
        &self.tables
    }

    /// Insert `records` into `table`, in order.
    ///
    /// Foreign-key columns (`*_fk`) are resolved to the derived key of the
    /// fixture they name, and each record's primary key is derived from
    /// its own fixture name, so fixtures never depend on insertion order
    /// or auto-incremented ids. Returns the inserted rows keyed by
    /// fixture name.
    ///
    /// A failed insertion aborts the batch. Rows inserted earlier in the
    /// same call stay in place; wrapping the call in a transaction is the
    /// caller's concern.
    pub async fn build_records(
        &mut self,
        table: &str,
        records: Vec<Fixture>,
    ) -> Result<IndexMap<String, InsertedRecord>, FixtureError> {
        let mut inserted = IndexMap::new();

        for fixture in records {
            self.track(table);

            let Fixture { name, mut columns } = fixture;
            resolve_foreign_keys(&mut columns);
            assign_primary_key(name.as_str(), &mut columns);

            let sql = self.insert_sql(table, &columns);
            let params: Vec<FixtureValue> = columns.values().cloned().collect();
            debug!("inserting fixture `{}` into `{}`", name, table);
            self.driver
                .execute(sql.as_str(), &params)
                .await
                .map_err(|err| FixtureError::invalid_fixture_data(table, sql.as_str(), err))?;

            inserted.insert(name, InsertedRecord::new(columns));
        }

        Ok(inserted)
    }

    /// Read each YAML fixture file and insert its records into the table
    /// named by the file stem. Results are keyed by table, then by
    /// fixture name.
    pub async fn load_files(
        &mut self,
        paths: Vec<&str>,
    ) -> Result<IndexMap<String, IndexMap<String, InsertedRecord>>, FixtureError> {
        let mut loaded = IndexMap::new();
        for path in paths {
            let file = FixtureFile::read(path)?;
            let table = file.file_stem();
            let records = self.build_records(table.as_str(), file.fixtures).await?;
            loaded.insert(table, records);
        }
        Ok(loaded)
    }

    /// Delete every row of `table` and stop tracking it. Untracked tables
    /// are a silent no-op, not an error.
    pub async fn truncate(&mut self, table: &str) -> Result<(), FixtureError> {
        let Some(position) = self.tables.iter().position(|t| t == table) else {
            return Ok(());
        };
        debug!("truncating `{}`", table);
        self.driver
            .delete_all(table)
            .await
            .map_err(|err| FixtureError::truncation(table, err))?;
        self.tables.remove(position);
        Ok(())
    }

    /// Truncate every tracked table.
    pub async fn truncate_all(&mut self) -> Result<(), FixtureError> {
        // Snapshot: truncate drops entries out of the tracked list while
        // we walk it.
        let tables = self.tables.clone();
        for table in tables {
            self.truncate(table.as_str()).await?;
        }
        Ok(())
    }

    fn track(&mut self, table: &str) {
        if !self.tables.iter().any(|t| t == table) {
            self.tables.push(table.to_string());
        }
    }

    fn insert_sql(&self, table: &str, columns: &ColumnMap) -> String {
        let fields: Vec<&str> = columns.keys().map(String::as_str).collect();
        let placeholders: Vec<String> = (1..=columns.len())
            .map(|index| self.driver.placeholder(index))
            .collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            fields.join(", "),
            placeholders.join(", ")
        )
    }
}

/// Replace every `*_fk` column with the derived key of the fixture it
/// names, stored under the stripped column name. Columns are classified
/// first, then rewritten in their original order; when two entries land
/// on the same stripped name the later one wins. A resolved key keeps the
/// position of an existing column of the stripped name, otherwise it
/// moves to the end of the map.
fn resolve_foreign_keys(columns: &mut ColumnMap) {
    let foreign_keys: Vec<(String, String)> = columns
        .keys()
        .filter_map(|column| match classify(column.as_str()) {
            ColumnKind::ForeignKey(target) => Some((column.clone(), target)),
            _ => None,
        })
        .collect();

    for (column, target) in foreign_keys {
        if let Some(value) = columns.shift_remove(column.as_str()) {
            let key = key::derive(value.to_string().as_str());
            columns.insert(target, FixtureValue::Integer(key));
        }
    }
}

/// Set the primary-key column to the key derived from the fixture name,
/// overwriting any authored value. A `__id` marker renames the column; a
/// marker that is present but empty skips the assignment entirely. The
/// marker itself never reaches the database.
fn assign_primary_key(record_name: &str, columns: &mut ColumnMap) {
    let column = match columns.shift_remove(PRIMARY_KEY_MARKER) {
        Some(marker) => override_column(&marker),
        None => Some(DEFAULT_PRIMARY_KEY.to_string()),
    };
    if let Some(column) = column {
        columns.insert(column, FixtureValue::Integer(key::derive(record_name)));
    }
}

fn override_column(marker: &FixtureValue) -> Option<String> {
    match marker {
        FixtureValue::Null => None,
        FixtureValue::String(column) if column.is_empty() => None,
        other => Some(other.to_string()),
    }
}
