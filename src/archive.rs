// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::catalog::ArchiveKind;
use crate::error::{JdkmanError, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tar::Archive as TarArchive;
use walkdir::WalkDir;
use zip::ZipArchive;

/// Extract a JDK archive into the destination directory.
pub fn extract_archive(archive_path: &Path, kind: ArchiveKind, destination: &Path) -> Result<()> {
    fs::create_dir_all(destination)?;

    match kind {
        ArchiveKind::Zip => extract_zip(archive_path, destination),
        ArchiveKind::TarGz => extract_tar_gz(archive_path, destination),
    }
}

fn extract_zip(archive_path: &Path, destination: &Path) -> Result<()> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;

    if archive.is_empty() {
        return Err(JdkmanError::ValidationError(
            "Zip archive is empty".to_string(),
        ));
    }

    let total_files = archive.len();

    for i in 0..total_files {
        let mut file = archive.by_index(i)?;
        let outpath = match file.enclosed_name() {
            Some(path) => {
                validate_entry_path(&path)?;
                destination.join(path)
            }
            None => {
                log::warn!("Skipping file with invalid name at index {i}");
                continue;
            }
        };

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent)?;
        }

        if file.is_dir() {
            fs::create_dir_all(&outpath)?;
        } else {
            let mut outfile = File::create(&outpath)?;
            std::io::copy(&mut file, &mut outfile)?;
        }

        if let Some(mode) = file.unix_mode() {
            set_permissions_from_mode(&outpath, mode)?;
        }

        if (i + 1) % 100 == 0 {
            log::debug!("Extracted {}/{} files...", i + 1, total_files);
        }
    }

    log::info!("Extracted {total_files} files from zip archive");
    Ok(())
}

fn extract_tar_gz(archive_path: &Path, destination: &Path) -> Result<()> {
    let file = File::open(archive_path)?;
    let gz = flate2::read::GzDecoder::new(file);
    let mut archive = TarArchive::new(gz);

    archive.set_preserve_permissions(true);
    archive.set_preserve_mtime(true);
    archive.set_overwrite(true);

    let mut extracted_count = 0;
    for entry in archive.entries()? {
        let mut entry = entry?;
        let path = entry.path()?.into_owned();

        validate_entry_path(&path)?;

        let dest_path = destination.join(&path);
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }

        entry.unpack(&dest_path)?;
        extracted_count += 1;

        if extracted_count % 100 == 0 {
            log::debug!("Extracted {extracted_count} files...");
        }
    }

    log::info!("Extracted {extracted_count} files from tar.gz archive");
    Ok(())
}

#[cfg(unix)]
fn set_permissions_from_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_permissions_from_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

fn validate_entry_path(entry_path: &Path) -> Result<()> {
    for component in entry_path.components() {
        match component {
            std::path::Component::ParentDir => {
                return Err(JdkmanError::SecurityError(format!(
                    "Archive contains path traversal: {entry_path:?}"
                )));
            }
            std::path::Component::RootDir | std::path::Component::Prefix(_) => {
                return Err(JdkmanError::SecurityError(format!(
                    "Archive contains absolute path: {entry_path:?}"
                )));
            }
            _ => {}
        }
    }
    Ok(())
}

/// Find the real JDK root nested below `install_dir`, if the archive
/// wrapped it in extra directories.
///
/// Vendors are not layout-consistent: many archives place the JDK one or
/// more levels down (e.g. `jdk-17.0.2/bin/java`), and JDK 8 layouts carry
/// a second runtime under `<root>/jre/bin`. The walk is name-sorted and
/// the shallowest matching root wins, so the JDK root is always preferred
/// over its embedded JRE. Returns `None` when the runtime executable
/// already sits at `install_dir/bin`, or when no runtime executable
/// exists anywhere under the tree.
pub fn find_nested_root(install_dir: &Path, java_bin: &str) -> Option<PathBuf> {
    if install_dir.join("bin").join(java_bin).is_file() {
        return None;
    }

    let mut shallowest: Option<PathBuf> = None;
    for entry in WalkDir::new(install_dir)
        .sort_by_file_name()
        .into_iter()
        .flatten()
    {
        if !entry.file_type().is_file() || entry.file_name() != java_bin {
            continue;
        }
        let Some(bin_dir) = entry.path().parent() else {
            continue;
        };
        if bin_dir.file_name().and_then(|n| n.to_str()) != Some("bin") {
            continue;
        }
        let Some(root) = bin_dir.parent() else {
            continue;
        };
        if root == install_dir {
            return None;
        }
        let depth = root.components().count();
        if shallowest
            .as_ref()
            .is_none_or(|best| depth < best.components().count())
        {
            shallowest = Some(root.to_path_buf());
        }
    }

    if shallowest.is_none() {
        log::warn!(
            "No runtime executable found under {}; leaving layout as extracted",
            install_dir.display()
        );
    }
    shallowest
}

/// Move the contents of a nested JDK root up into `install_dir` and drop
/// the emptied wrapper directories. Conventional subdirectories (`bin`,
/// `lib`, `conf`, `jre`, ...) arrive intact because whole entries are
/// renamed, not reconstructed.
pub fn promote_nested_root(nested_root: &Path, install_dir: &Path) -> Result<()> {
    let relative = nested_root.strip_prefix(install_dir).map_err(|_| {
        JdkmanError::ValidationError(format!(
            "Nested root {} is not inside {}",
            nested_root.display(),
            install_dir.display()
        ))
    })?;
    let wrapper = match relative.components().next() {
        Some(first) => install_dir.join(first),
        None => return Ok(()),
    };

    for entry in fs::read_dir(nested_root)? {
        let entry = entry?;
        let target = install_dir.join(entry.file_name());
        fs::rename(entry.path(), &target)?;
    }

    fs::remove_dir_all(&wrapper)?;
    log::debug!(
        "Promoted nested JDK root {} into {}",
        nested_root.display(),
        install_dir.display()
    );
    Ok(())
}
