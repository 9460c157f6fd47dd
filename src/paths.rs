use crate::error::LinkError;
use std::path::{Component, Path, PathBuf};

/// Compute the path of `package` relative to `app`.
///
/// Both folders are made absolute against the current directory and
/// normalized lexically (`.` and `..` are folded, symlinks are not followed),
/// then the shortest `..`-prefixed route from `app` to `package` is returned
/// using the host separator. Identical folders yield `"."`.
pub fn relative_path(package: &Path, app: &Path) -> Result<String, LinkError> {
    let package_abs = absolute(package)?;
    let app_abs = absolute(app)?;

    let package_parts: Vec<Component<'_>> = package_abs.components().collect();
    let app_parts: Vec<Component<'_>> = app_abs.components().collect();

    // Prefix and root must agree, otherwise there is no relative route.
    let roots_match = package_parts
        .iter()
        .zip(&app_parts)
        .take_while(|(a, b)| !matches!(a, Component::Normal(_)) || !matches!(b, Component::Normal(_)))
        .all(|(a, b)| a == b);
    if !roots_match {
        return Err(LinkError::UnrelatedPaths {
            package: package.to_path_buf(),
            app: app.to_path_buf(),
        });
    }

    let common = package_parts
        .iter()
        .zip(&app_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..app_parts.len() {
        relative.push(Component::ParentDir);
    }
    for part in &package_parts[common..] {
        relative.push(part);
    }

    if relative.as_os_str().is_empty() {
        return Ok(".".to_string());
    }

    Ok(relative.to_string_lossy().into_owned())
}

/// Make `folder` absolute and fold `.`/`..` components without touching the disk.
pub(crate) fn absolute(folder: &Path) -> Result<PathBuf, LinkError> {
    if folder.as_os_str().is_empty() {
        return Err(LinkError::InvalidPath {
            folder: folder.to_path_buf(),
        });
    }

    let absolute = std::path::absolute(folder).map_err(|_| LinkError::InvalidPath {
        folder: folder.to_path_buf(),
    })?;

    Ok(normalize(&absolute))
}

/// Lexically normalize a path. `..` never climbs above a root.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let has_normal = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if has_normal {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push(Component::ParentDir);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
