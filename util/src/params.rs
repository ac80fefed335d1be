//! Generic parameters functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::de::DeserializeOwned;
use std::fs::read_to_string;
use std::path::Path;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An error that occurs during loading of a parameter file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("The software root environment variable (MOTION_SW_ROOT) is not set")]
    SwRootNotSet,

    #[error("Cannot load the parmeter file: {0}")]
    FileLoadError(std::io::Error),

    #[error("Cannot read the parameter file: {0}")]
    DeserialiseError(toml::de::Error)
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Load a parameter file
///
/// The file path is relative to the "$MOTION_SW_ROOT/params" directory
pub fn load<P>(param_file_path: &str) -> Result<P, LoadError>
where
    P: DeserializeOwned
{
    // Get the params dir
    let mut path = crate::host::get_sw_root()
        .map_err(|_| LoadError::SwRootNotSet)?;
    path.push("params");
    path.push(param_file_path);

    load_from_path(path)
}

/// Load a parameter file from an explicit path.
pub fn load_from_path<P, F>(path: F) -> Result<P, LoadError>
where
    P: DeserializeOwned,
    F: AsRef<Path>
{
    // Load the file into a string
    let params_str = match read_to_string(path) {
        Ok(s) => s,
        Err(e) => return Err(LoadError::FileLoadError(e))
    };

    from_toml_str(&params_str)
}

/// Parse parameters from a TOML string.
pub fn from_toml_str<P>(params_str: &str) -> Result<P, LoadError>
where
    P: DeserializeOwned
{
    toml::from_str(params_str).map_err(LoadError::DeserialiseError)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    struct TestParams {
        period_ms: u32,
        tolerance_m: f64,
        #[serde(default)]
        limit: Option<u32>,
    }

    #[test]
    fn test_from_toml_str() {
        let p: TestParams = from_toml_str("period_ms = 5\ntolerance_m = 0.1\n").unwrap();

        assert_eq!(p.period_ms, 5);
        assert_eq!(p.tolerance_m, 0.1);
        assert_eq!(p.limit, None);
    }

    #[test]
    fn test_bad_toml() {
        let r: Result<TestParams, _> = from_toml_str("period_ms = \"five\"");
        assert!(matches!(r, Err(LoadError::DeserialiseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let r: Result<TestParams, _> = load_from_path("this/file/does/not/exist.toml");
        assert!(matches!(r, Err(LoadError::FileLoadError(_))));
    }
}
