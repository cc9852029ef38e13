//! A file-backed implementation of the [`ZoneSource`][super::ZoneSource] trait.
//!
//! The file is read in full on every [`load`][super::ZoneSource::load], so edits made by an
//! operator are picked up on the next refresh tick. Files ending in `.yaml` or `.yml` are read as
//! YAML, anything else as JSON. Expected shape:
//!
//! ```json
//! {
//!   "domains": {
//!     "sub.example.com": "10.0.0.5",
//!     "example.org": "192.0.2.1"
//!   }
//! }
//! ```
//!
//! or, as YAML:
//!
//! ```yaml
//! domains:
//!   sub.example.com: 10.0.0.5
//!   example.org: 192.0.2.1
//! ```
use crate::error::Error;
use crate::zone::{DomainTable, ZoneSource};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }
}

#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct FileZoneSource {
    path: PathBuf,
    format: Format,
    fold_case: bool,
}

impl FileZoneSource {
    pub fn new(path: impl Into<PathBuf>, fold_case: bool) -> Self {
        let path = path.into();
        FileZoneSource {
            format: Format::of(&path),
            path,
            fold_case,
        }
    }
}

#[async_trait::async_trait]
impl ZoneSource for FileZoneSource {
    /// Read and validate the zone file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the path can't be opened or read.
    ///
    /// Returns [`Error::InvalidJSON`] or [`Error::InvalidYAML`] if the file isn't an object with a
    /// `domains` mapping.
    ///
    /// Returns [`Error::InvalidZoneEntry`] if any mapped address isn't an IPv4 dotted quad, and
    /// [`Error::DuplicateZoneEntry`] if two keys name the same domain.
    async fn load(&self) -> Result<DomainTable, Error> {
        let mut contents = vec![];
        File::open(&self.path)
            .await?
            .read_to_end(&mut contents)
            .await?;
        let table: DomainTable = match self.format {
            Format::Json => serde_json::from_slice(&contents)?,
            Format::Yaml => serde_yaml::from_slice(&contents)?,
        };
        table.normalized(self.fold_case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn zone_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut temp_file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(Format::of(Path::new("domains.yaml")), Format::Yaml);
        assert_eq!(Format::of(Path::new("domains.YML")), Format::Yaml);
        assert_eq!(Format::of(Path::new("domains.json")), Format::Json);
        assert_eq!(Format::of(Path::new("domains")), Format::Json);
    }

    #[tokio::test]
    async fn loads_and_normalizes() {
        let temp_file = zone_file(
            ".json",
            r#"{"domains": {"Sub.Example.com.": "10.0.0.5", "example.org": "192.0.2.1"}}"#,
        );

        let table = FileZoneSource::new(temp_file.path(), true)
            .load()
            .await
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("sub.example.com"), Some("10.0.0.5"));
        assert_eq!(table.get("example.org"), Some("192.0.2.1"));
    }

    #[tokio::test]
    async fn loads_yaml_zone() {
        let temp_file = zone_file(
            ".yaml",
            "domains:\n  sub.example.com: 10.0.0.5\n  example.org: \"192.0.2.1\"\n",
        );

        let table = FileZoneSource::new(temp_file.path(), false)
            .load()
            .await
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("sub.example.com"), Some("10.0.0.5"));
        assert_eq!(table.get("example.org"), Some("192.0.2.1"));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileZoneSource::new(dir.path().join("missing.json"), false)
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::IO(_)), "{err:?}");
    }

    #[tokio::test]
    async fn wrong_shape_is_json_error() {
        let temp_file = zone_file(".json", r#"{"zones": []}"#);

        let err = FileZoneSource::new(temp_file.path(), false)
            .load()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidJSON(_)), "{err:?}");
    }

    #[tokio::test]
    async fn wrong_shape_is_yaml_error() {
        let temp_file = zone_file(".yml", "zones:\n  - example.com\n");

        let err = FileZoneSource::new(temp_file.path(), false)
            .load()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidYAML(_)), "{err:?}");
    }

    #[tokio::test]
    async fn bad_address_is_rejected() {
        let temp_file = zone_file(".json", r#"{"domains": {"example.com": "10.0.0"}}"#);

        let err = FileZoneSource::new(temp_file.path(), false)
            .load()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidZoneEntry { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn colliding_keys_are_rejected() {
        let temp_file = zone_file(
            ".json",
            r#"{"domains": {"example.com": "1.1.1.1", "example.com.": "2.2.2.2"}}"#,
        );

        let err = FileZoneSource::new(temp_file.path(), false)
            .load()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::DuplicateZoneEntry(_)), "{err:?}");
    }
}
