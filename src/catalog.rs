//! Static catalog of distributions available for install.
//!
//! The built-in entries are process-wide, read-only data. `config.toml`
//! may append or override entries through `[[catalog]]` tables.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArchiveKind {
    #[serde(rename = "zip")]
    Zip,
    #[serde(rename = "tar.gz")]
    TarGz,
}

impl ArchiveKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveKind::Zip => "zip",
            ArchiveKind::TarGz => "tar.gz",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default = "default_archive_kind")]
    pub archive: ArchiveKind,
}

fn default_archive_kind() -> ArchiveKind {
    ArchiveKind::Zip
}

pub fn builtin_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry {
            id: "openjdk-8".to_string(),
            name: "OpenJDK 8 (LTS)".to_string(),
            url: "https://github.com/adoptium/temurin8-binaries/releases/download/jdk8u392-b08/OpenJDK8U-jdk_x64_windows_hotspot_8u392b08.zip".to_string(),
            archive: ArchiveKind::Zip,
        },
        CatalogEntry {
            id: "openjdk-11".to_string(),
            name: "OpenJDK 11 (LTS)".to_string(),
            url: "https://github.com/adoptium/temurin11-binaries/releases/download/jdk-11.0.21%2B9/OpenJDK11U-jdk_x64_windows_hotspot_11.0.21_9.zip".to_string(),
            archive: ArchiveKind::Zip,
        },
        CatalogEntry {
            id: "openjdk-17".to_string(),
            name: "OpenJDK 17 (LTS)".to_string(),
            url: "https://download.oracle.com/java/17/archive/jdk-17.0.2_windows-x64_bin.zip".to_string(),
            archive: ArchiveKind::Zip,
        },
        CatalogEntry {
            id: "openjdk-21".to_string(),
            name: "OpenJDK 21 (LTS)".to_string(),
            url: "https://download.oracle.com/java/21/latest/jdk-21_windows-x64_bin.zip".to_string(),
            archive: ArchiveKind::Zip,
        },
    ]
}

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }

    /// Built-in entries extended by config-declared ones. An extension with
    /// an id matching a built-in replaces it in place; new ids are appended
    /// in declaration order.
    pub fn with_extensions(extensions: &[CatalogEntry]) -> Self {
        let mut entries = builtin_entries();
        for extra in extensions {
            if let Some(existing) = entries.iter_mut().find(|e| e.id == extra.id) {
                *existing = extra.clone();
            } else {
                entries.push(extra.clone());
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn find(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}
