use crate::error::FixtureError;
use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::Path;
use yaml_rust::{Yaml, YamlLoader};

/// Column name to value, in authoring order. The order determines the
/// column order of the generated INSERT.
pub type ColumnMap = IndexMap<String, FixtureValue>;

/// A single named record destined for one table.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub name: String,
    pub columns: ColumnMap,
}

impl Fixture {
    pub fn new(name: &str) -> Self {
        Fixture {
            name: name.to_string(),
            columns: ColumnMap::new(),
        }
    }

    /// Add a column, replacing any earlier value under the same name.
    pub fn column(mut self, name: &str, value: impl Into<FixtureValue>) -> Self {
        self.columns.insert(name.to_string(), value.into());
        self
    }
}

/// A scalar fixture value, bound positionally into the INSERT.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Datetime(NaiveDateTime),
    Null,
}

impl FixtureValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FixtureValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FixtureValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FixtureValue::Null)
    }
}

impl fmt::Display for FixtureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureValue::String(value) => write!(f, "{}", value),
            FixtureValue::Integer(value) => write!(f, "{}", value),
            FixtureValue::Float(value) => write!(f, "{}", value),
            FixtureValue::Boolean(value) => write!(f, "{}", value),
            FixtureValue::Datetime(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
            FixtureValue::Null => Ok(()),
        }
    }
}

impl From<&str> for FixtureValue {
    fn from(value: &str) -> Self {
        FixtureValue::String(value.to_string())
    }
}

impl From<String> for FixtureValue {
    fn from(value: String) -> Self {
        FixtureValue::String(value)
    }
}

impl From<i64> for FixtureValue {
    fn from(value: i64) -> Self {
        FixtureValue::Integer(value)
    }
}

impl From<f64> for FixtureValue {
    fn from(value: f64) -> Self {
        FixtureValue::Float(value)
    }
}

impl From<bool> for FixtureValue {
    fn from(value: bool) -> Self {
        FixtureValue::Boolean(value)
    }
}

impl From<NaiveDateTime> for FixtureValue {
    fn from(value: NaiveDateTime) -> Self {
        FixtureValue::Datetime(value)
    }
}

/// The row that was inserted for a fixture, after foreign-key resolution
/// and primary-key assignment. Read-only.
#[derive(Debug, Clone)]
pub struct InsertedRecord {
    columns: ColumnMap,
}

impl InsertedRecord {
    pub(crate) fn new(columns: ColumnMap) -> Self {
        InsertedRecord { columns }
    }

    /// Value stored under `column`, if any.
    pub fn get(&self, column: &str) -> Option<&FixtureValue> {
        self.columns.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &FixtureValue)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One YAML fixture file. The file stem names the target table; the
/// document is a mapping of fixture names to column maps:
///
/// ```yaml
/// alice:
///   name: Alice
/// bob:
///   name: Bob
///   manager_fk: alice
/// ```
pub struct FixtureFile {
    pub path: String,
    pub file_name: String,
    pub fixtures: Vec<Fixture>,
}

impl FixtureFile {
    /// Read and parse a fixture file, preserving document order.
    pub fn read(path: &str) -> Result<FixtureFile, FixtureError> {
        let contents =
            fs::read_to_string(path).map_err(|err| FixtureError::fixture_file(path, err))?;
        let docs = YamlLoader::load_from_str(contents.as_str())
            .map_err(|err| FixtureError::fixture_file(path, err))?;
        let records = match docs.first() {
            Some(Yaml::Hash(records)) => records,
            _ => {
                return Err(FixtureError::fixture_file(
                    path,
                    "expected a mapping of fixture names to column maps",
                ))
            }
        };

        let mut fixtures = vec![];
        for (name, values) in records {
            let name = yaml_key(name);
            let values = match values {
                Yaml::Hash(values) => values,
                _ => {
                    return Err(FixtureError::fixture_file(
                        path,
                        format!("fixture `{}` is not a column map", name),
                    ))
                }
            };
            let mut columns = ColumnMap::new();
            for (column, value) in values {
                columns.insert(yaml_key(column), value_from_yaml(value));
            }
            fixtures.push(Fixture { name, columns });
        }

        Ok(FixtureFile {
            path: path.to_string(),
            file_name: Path::new(path)
                .file_name()
                .unwrap()
                .to_str()
                .unwrap()
                .to_string(),
            fixtures,
        })
    }

    pub(crate) fn file_stem(&self) -> String {
        Path::new(self.file_name.as_str())
            .file_stem()
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }
}

fn yaml_key(key: &Yaml) -> String {
    match key {
        Yaml::String(key) => key.to_string(),
        Yaml::Integer(key) => key.to_string(),
        _ => "".to_string(),
    }
}

fn value_from_yaml(value: &Yaml) -> FixtureValue {
    match value {
        Yaml::String(value) => match parse_datetime(value) {
            Some(datetime) => FixtureValue::Datetime(datetime),
            None => FixtureValue::String(value.to_string()),
        },
        Yaml::Integer(value) => FixtureValue::Integer(*value),
        Yaml::Real(value) => value
            .parse()
            .map(FixtureValue::Float)
            .unwrap_or(FixtureValue::Null),
        Yaml::Boolean(value) => FixtureValue::Boolean(*value),
        _ => FixtureValue::Null,
    }
}

/// Recognize `2020-01-02 03:04:05`-shaped strings, with `/` or `-` date
/// separators and an optional time part.
fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let shape = Regex::new(r"^\d{4}[-/]\d{2}[-/]\d{2}( \d{2}:\d{2}:\d{2})?$")
        .expect("datetime shape pattern");
    if !shape.is_match(value) {
        return None;
    }
    let value = value.replace('/', "-");
    NaiveDateTime::parse_from_str(value.as_str(), "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value.as_str(), "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn it_parses_fixture_files() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("todos.yml");
        let mut file = File::create(&path)?;
        writeln!(
            file,
            r#"fizz:
  description: fizz
  done: true
  progress: 10.5
  count: 3
  note: ~
  created_at: 2020/01/01 01:01:01"#
        )?;

        let fixture_file = FixtureFile::read(path.to_str().unwrap())?;
        assert_eq!(fixture_file.file_stem(), "todos");
        assert_eq!(fixture_file.fixtures.len(), 1);

        let fixture = &fixture_file.fixtures[0];
        assert_eq!(fixture.name, "fizz");
        let columns: Vec<&str> = fixture.columns.keys().map(String::as_str).collect();
        assert_eq!(
            columns,
            vec!["description", "done", "progress", "count", "note", "created_at"]
        );
        assert_eq!(
            fixture.columns.get("description"),
            Some(&FixtureValue::String("fizz".to_string()))
        );
        assert_eq!(
            fixture.columns.get("done"),
            Some(&FixtureValue::Boolean(true))
        );
        assert_eq!(
            fixture.columns.get("progress"),
            Some(&FixtureValue::Float(10.5))
        );
        assert_eq!(fixture.columns.get("count"), Some(&FixtureValue::Integer(3)));
        assert_eq!(fixture.columns.get("note"), Some(&FixtureValue::Null));
        assert_eq!(
            fixture.columns.get("created_at"),
            Some(&FixtureValue::Datetime(
                NaiveDate::from_ymd_opt(2020, 1, 1)
                    .unwrap()
                    .and_hms_opt(1, 1, 1)
                    .unwrap()
            ))
        );
        Ok(())
    }

    #[test]
    fn it_rejects_non_mapping_documents() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("todos.yml");
        let mut file = File::create(&path)?;
        writeln!(file, "- one\n- two")?;

        let result = FixtureFile::read(path.to_str().unwrap());
        assert!(matches!(result, Err(FixtureError::FixtureFile { .. })));
        Ok(())
    }

    #[test]
    fn it_detects_date_and_datetime_strings() {
        assert!(parse_datetime("2020-01-02 03:04:05").is_some());
        assert!(parse_datetime("2020/01/02").is_some());
        assert!(parse_datetime("not a date").is_none());
        assert!(parse_datetime("2020-1-2").is_none());
    }
}
