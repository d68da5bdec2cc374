//! Configuration constants and settings for a pipeline run.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DoseError, Result};
use crate::model::Group;

/// Default offset/reference name prefix.
pub const DEFAULT_PREFIX: &str = "dose";

/// Default marker in front of reference position names (`Xdose_A_1`).
pub const DEFAULT_REFERENCE_MARKER: &str = "X";

/// Reference slots per group.
pub const REFERENCE_SLOTS: [u32; 2] = [1, 2];

/// Default JSON export file name.
pub const DEFAULT_EXPORT_FILE: &str = "dispensing-data.json";

/// Default markdown report file name.
pub const DEFAULT_REPORT_FILE: &str = "offsets-list.md";

/// Identifier convention shared by offsets and reference positions.
///
/// Offsets are named `<prefix>_<G>_offset_<digits>` and references
/// `<marker><prefix>_<G>_<digits>`, with `G` one of `A`/`B`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConvention {
    pub prefix: String,
    pub reference_marker: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            reference_marker: DEFAULT_REFERENCE_MARKER.to_string(),
        }
    }
}

impl NamingConvention {
    /// Name of the reference position for a group and slot.
    pub fn reference_name(&self, group: Group, slot: u32) -> String {
        format!("{}{}_{}_{}", self.reference_marker, self.prefix, group, slot)
    }

    /// The four canonical references with their group, in report order.
    pub fn canonical_references(&self) -> Vec<(Group, String)> {
        Group::ALL
            .into_iter()
            .flat_map(|group| {
                REFERENCE_SLOTS
                    .into_iter()
                    .map(move |slot| (group, self.reference_name(group, slot)))
            })
            .collect()
    }

    /// The four canonical reference names every data file must declare.
    pub fn canonical_reference_names(&self) -> Vec<String> {
        self.canonical_references()
            .into_iter()
            .map(|(_, name)| name)
            .collect()
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_export_file() -> String {
    DEFAULT_EXPORT_FILE.to_string()
}

fn default_report_file() -> String {
    DEFAULT_REPORT_FILE.to_string()
}

/// Run configuration, read from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Program (`.src`) file with offset definitions and motion instructions.
    pub src_path: PathBuf,
    /// Data (`.dat`) file with the global reference positions.
    pub dat_path: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_export_file")]
    pub export_file: String,
    #[serde(default = "default_report_file")]
    pub report_file: String,
    #[serde(default)]
    pub naming: NamingConvention,
}

impl Config {
    /// Parse and validate a configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Full path of the JSON export.
    pub fn export_path(&self) -> PathBuf {
        self.output_dir.join(&self.export_file)
    }

    /// Full path of the markdown report.
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file)
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("src_path", self.src_path.as_os_str().is_empty()),
            ("dat_path", self.dat_path.as_os_str().is_empty()),
            ("export_file", self.export_file.trim().is_empty()),
            ("report_file", self.report_file.trim().is_empty()),
            ("naming.prefix", self.naming.prefix.is_empty()),
        ];

        if let Some((field, _)) = required.iter().find(|(_, empty)| *empty) {
            return Err(DoseError::InvalidConfig {
                message: format!("{} must not be empty", field),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    // ==================== NamingConvention tests ====================

    #[test]
    fn test_default_canonical_names() {
        let naming = NamingConvention::default();
        assert_eq!(
            naming.canonical_reference_names(),
            vec!["Xdose_A_1", "Xdose_A_2", "Xdose_B_1", "Xdose_B_2"]
        );
    }

    #[test]
    fn test_custom_prefix_canonical_names() {
        let naming = NamingConvention {
            prefix: "glue".to_string(),
            reference_marker: "P".to_string(),
        };
        let refs = naming.canonical_references();
        assert_eq!(refs[0], (Group::A, "Pglue_A_1".to_string()));
        assert_eq!(refs[3], (Group::B, "Pglue_B_2".to_string()));
    }

    // ==================== Config tests ====================

    #[test]
    fn test_config_minimal_uses_defaults() {
        let config =
            Config::from_json(r#"{"src_path": "PickAndDrop.src", "dat_path": "PickAndDrop.dat"}"#)
                .expect("Should parse config");
        assert_eq!(config.src_path, PathBuf::from("PickAndDrop.src"));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.export_path(), PathBuf::from("./dispensing-data.json"));
        assert_eq!(config.report_path(), PathBuf::from("./offsets-list.md"));
        assert_eq!(config.naming, NamingConvention::default());
    }

    #[test]
    fn test_config_partial_naming() {
        let config = Config::from_json(
            r#"{"src_path": "a.src", "dat_path": "a.dat", "naming": {"prefix": "glue"}}"#,
        )
        .expect("Should parse config");
        assert_eq!(config.naming.prefix, "glue");
        assert_eq!(config.naming.reference_marker, "X");
    }

    #[test]
    fn test_config_missing_dat_path() {
        let err = Config::from_json(r#"{"src_path": "a.src"}"#).unwrap_err();
        assert!(matches!(err, DoseError::Json(_)));
    }

    #[test]
    fn test_config_rejects_unknown_field() {
        let err =
            Config::from_json(r#"{"src_path": "a.src", "dat_path": "a.dat", "srcPath": "b"}"#)
                .unwrap_err();
        assert!(matches!(err, DoseError::Json(_)));
    }

    #[test]
    fn test_config_rejects_empty_path() {
        let err = Config::from_json(r#"{"src_path": "", "dat_path": "a.dat"}"#).unwrap_err();
        match err {
            DoseError::InvalidConfig { message } => assert!(message.contains("src_path")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"src_path": "in.src", "dat_path": "in.dat", "output_dir": "out"}}"#
        )
        .unwrap();

        let config = Config::load(file.path()).expect("Should load config");
        assert_eq!(config.export_path(), PathBuf::from("out/dispensing-data.json"));
    }

    #[test]
    fn test_config_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("config.json")).unwrap_err();
        assert!(matches!(err, DoseError::Io(_)));
    }
}
