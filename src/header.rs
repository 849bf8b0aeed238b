use std::fmt::Write as _;
use std::fs::{self, Permissions};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::constants::{WIFI_PASSWORD, WIFI_SSID};
use crate::credentials::WifiCredentials;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// Appends `#define NAME "VALUE"` followed by a newline.
// The value is inserted as-is: an embedded `"` produces an invalid literal.
fn push_define(out: &mut String, name: &str, value: &str) {
    // writing into a String cannot fail
    let _ = writeln!(out, "#define {} \"{}\"", name, value);
}

/// Renders the complete header text: the SSID line, then the password line.
pub fn render(credentials: &WifiCredentials) -> String {
    let mut out = String::new();
    push_define(&mut out, WIFI_SSID, &credentials.ssid);
    push_define(&mut out, WIFI_PASSWORD, &credentials.password);
    out
}

// Permissions of the header being replaced, if there is one.
fn existing_permissions(path: &Path) -> io::Result<Option<Permissions>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata.permissions())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

// Temporary file in `dir` carrying `permissions`, or the mode a plain
// `File::create` would get (0666 minus the umask) for a brand new header.
fn temp_file_in(dir: &Path, permissions: Option<Permissions>) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(Permissions::from_mode(0o666));
    }

    let file = builder.tempfile_in(dir)?;
    if let Some(permissions) = permissions {
        file.as_file().set_permissions(permissions)?;
    }
    Ok(file)
}

/// Replaces the file at `path` with `contents`.
///
/// The data goes to a temporary file next to `path` which is then renamed
/// over the destination, so readers see either the previous header or the
/// new one. An existing header keeps its permissions. The parent directory
/// must already exist.
pub fn write(path: &Path, contents: &str) -> Result<(), Error> {
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let permissions = existing_permissions(path).map_err(io_error)?;
    let mut file = temp_file_in(parent, permissions).map_err(io_error)?;
    file.write_all(contents.as_bytes()).map_err(io_error)?;
    file.as_file().sync_all().map_err(io_error)?;

    file.persist(path).map_err(|err| Error::Persist {
        path: path.to_path_buf(),
        source: err.error,
    })?;

    log::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
