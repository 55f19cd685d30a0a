use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const PARAMS_PREFIX: &str = "sdpfree_csdp_params_";

/// Directory for engine parameter files: `TEST_TMPDIR` when running
/// under a test harness, else `TMPDIR`, else `/tmp`.
pub fn params_directory() -> PathBuf {
    ["TEST_TMPDIR", "TMPDIR"]
        .iter()
        .filter_map(|var| env::var_os(var))
        .find(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
}

/// Engine parameter file.  The file is removed when this value is
/// dropped, whether or not the engine call succeeded.
#[derive(Debug)]
pub(crate) struct ParamsFile {
    file: Option<NamedTempFile>,
}

impl ParamsFile {
    /// Write `contents` to a fresh file.  Empty contents create no file.
    pub fn create(contents: &str) -> io::Result<Self> {
        if contents.is_empty() {
            return Ok(Self { file: None });
        }
        let mut file = tempfile::Builder::new()
            .prefix(PARAMS_PREFIX)
            .tempfile_in(params_directory())?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        log::debug!("wrote engine parameters to {}", file.path().display());
        Ok(Self { file: Some(file) })
    }

    /// Path to hand to the engine, `None` for engine defaults
    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(|f| f.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_contents_no_file() {
        let params = ParamsFile::create("").unwrap();
        assert!(params.path().is_none());
    }

    #[test]
    fn test_file_lifecycle() {
        let params = ParamsFile::create("maxiter=10\n").unwrap();
        let path = params.path().unwrap().to_path_buf();
        assert!(path.starts_with(params_directory()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "maxiter=10\n");

        drop(params);
        assert!(!path.exists());
    }
}
