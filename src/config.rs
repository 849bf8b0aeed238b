use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::debug;

use crate::constants::ENV_FILE_NAME;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
    #[error("cannot determine the working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),
}

/// Which side wins when a variable is set both in the process environment
/// and in the environment-definition file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Precedence {
    /// Variables already present in the process environment are kept.
    #[default]
    Process,
    /// Values from the file replace process variables of the same name.
    File,
}

/// Explicit variable mapping handed to the generator instead of the ambient
/// process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    vars: BTreeMap<String, String>,
    // set, but the value is not valid UTF-8
    not_unicode: BTreeSet<String>,
}

impl EnvConfig {
    /// Snapshot of the current process environment.
    pub fn from_process() -> Self {
        Self::from_vars_os(std::env::vars_os())
    }

    /// Builds the mapping from raw OS strings. A variable whose value is not
    /// valid UTF-8 still counts as set: it shadows the file under
    /// [`Precedence::Process`] and is reported by [`EnvConfig::is_not_unicode`].
    /// Names that are not valid UTF-8 are skipped.
    pub fn from_vars_os<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            let Ok(key) = key.into_string() else {
                continue;
            };
            match value.into_string() {
                Ok(value) => {
                    config.vars.insert(key, value);
                }
                Err(_) => {
                    config.not_unicode.insert(key);
                }
            }
        }
        config
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            not_unicode: BTreeSet::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn is_not_unicode(&self, key: &str) -> bool {
        self.not_unicode.contains(key)
    }

    fn is_set(&self, key: &str) -> bool {
        self.vars.contains_key(key) || self.not_unicode.contains(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Merges the `KEY=VALUE` entries of `path` into the mapping and returns
    /// how many of them were applied.
    ///
    /// A key declared several times in the file keeps its last value.
    pub fn merge_file(&mut self, path: &Path, precedence: Precedence) -> Result<usize, Error> {
        let env_file_error = |source| Error::EnvFile {
            path: path.to_path_buf(),
            source,
        };

        let mut declared = BTreeMap::new();
        for item in dotenvy::from_path_iter(path).map_err(env_file_error)? {
            let (key, value) = item.map_err(env_file_error)?;
            declared.insert(key, value);
        }

        let mut applied = 0;
        for (key, value) in declared {
            if precedence == Precedence::Process && self.is_set(&key) {
                debug!("Keeping {} from the process environment", key);
                continue;
            }
            self.not_unicode.remove(&key);
            self.vars.insert(key, value);
            applied += 1;
        }

        Ok(applied)
    }
}

/// Looks for the environment-definition file in `start` and then in each of
/// its parents.
pub fn locate_env_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(ENV_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Builds the configuration mapping: process environment first, then the
/// nearest environment-definition file, if there is one.
pub fn load(start_dir: &Path, precedence: Precedence) -> Result<EnvConfig, Error> {
    let mut config = EnvConfig::from_process();

    match locate_env_file(start_dir) {
        Some(path) => {
            let applied = config.merge_file(&path, precedence)?;
            debug!("Applied {} variable(s) from {}", applied, path.display());
        }
        None => debug!(
            "No {} found from {}, using the process environment only",
            ENV_FILE_NAME,
            start_dir.display()
        ),
    }

    Ok(config)
}

/// [`load`] starting from the working directory of the process.
pub fn load_from_current_dir(precedence: Precedence) -> Result<EnvConfig, Error> {
    let cwd = std::env::current_dir().map_err(Error::WorkingDirectory)?;
    load(&cwd, precedence)
}
