//! Loading the site list and the master password from disk.

use crate::deriver::MasterPassword;
use crate::registry::SiteRegistry;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use zeroize::Zeroizing;

pub fn load_sites(path: &Path) -> Result<SiteRegistry> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read site list {}", path.display()))?;
    let registry = SiteRegistry::parse(&text);
    debug!(path = %path.display(), sites = registry.len(), "Read site list");
    Ok(registry)
}

/// Reads and trims the master password, warning when the file is readable by
/// anyone but its owner.
pub fn load_master_password(path: &Path) -> Result<MasterPassword> {
    if !is_accessible_only_by_owner(path)? {
        warn!("{} should be accessible only by the owner", path.display());
    }

    let contents = Zeroizing::new(
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read master password {}", path.display()))?,
    );
    let master = MasterPassword::new(&contents);

    if master.is_empty() {
        anyhow::bail!("Master password file {} is empty", path.display());
    }

    Ok(master)
}

#[cfg(unix)]
pub fn is_accessible_only_by_owner(path: &Path) -> Result<bool> {
    use std::os::unix::fs::PermissionsExt;

    let metadata =
        fs::metadata(path).with_context(|| format!("Failed to stat {}", path.display()))?;
    Ok(metadata.permissions().mode() & 0o077 == 0)
}

#[cfg(not(unix))]
pub fn is_accessible_only_by_owner(path: &Path) -> Result<bool> {
    fs::metadata(path).with_context(|| format!("Failed to stat {}", path.display()))?;
    Ok(true)
}
