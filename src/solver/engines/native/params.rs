use crate::algebra::{AsFloatT, FloatT};
use crate::solver::core::EngineError;
use std::fs;
use std::path::Path;

/// Parameters of the native engine.  Names and defaults follow the
/// CSDP parameter file so that one file serves either engine.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeParams<T> {
    pub axtol: T,
    pub atytol: T,
    pub objtol: T,
    pub pinftol: T,
    pub dinftol: T,
    pub maxiter: u32,
    pub minstepfrac: T,
    pub maxstepfrac: T,
    pub minstepp: T,
    pub minstepd: T,
    pub printlevel: i32,
}

impl<T> Default for NativeParams<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self {
            axtol: (1e-8).as_T(),
            atytol: (1e-8).as_T(),
            objtol: (1e-8).as_T(),
            pinftol: (1e8).as_T(),
            dinftol: (1e8).as_T(),
            maxiter: 100,
            minstepfrac: (0.90).as_T(),
            maxstepfrac: (0.97).as_T(),
            minstepp: (1e-8).as_T(),
            minstepd: (1e-8).as_T(),
            printlevel: 0,
        }
    }
}

// accepted by CSDP, no effect here
const IGNORED_KEYS: [&str; 5] = ["usexzgap", "tweakgap", "affine", "perturbobj", "fastmode"];

impl<T> NativeParams<T>
where
    T: FloatT,
{
    /// Defaults, overridden by the `key=value` lines of `path` if given
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        let mut params = Self::default();
        if let Some(path) = path {
            let contents = fs::read_to_string(path)
                .map_err(|e| EngineError::BadParams(format!("{}: {}", path.display(), e)))?;
            params.parse(&contents)?;
        }
        Ok(params)
    }

    pub fn parse(&mut self, contents: &str) -> Result<(), EngineError> {
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(EngineError::BadParams(line.to_string()));
            };
            self.set(key.trim(), value.trim())?;
        }
        Ok(())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EngineError> {
        let bad = || EngineError::BadParams(format!("{}={}", key, value));
        let float = || -> Result<T, EngineError> {
            let v: f64 = value.parse().map_err(|_| bad())?;
            Ok(v.as_T())
        };
        let int = || -> Result<i32, EngineError> { value.parse().map_err(|_| bad()) };

        match key {
            "axtol" => self.axtol = float()?,
            "atytol" => self.atytol = float()?,
            "objtol" => self.objtol = float()?,
            "pinftol" => self.pinftol = float()?,
            "dinftol" => self.dinftol = float()?,
            "maxiter" => self.maxiter = u32::try_from(int()?).map_err(|_| bad())?,
            "minstepfrac" => self.minstepfrac = float()?,
            "maxstepfrac" => self.maxstepfrac = float()?,
            "minstepp" => self.minstepp = float()?,
            "minstepd" => self.minstepd = float()?,
            "printlevel" => self.printlevel = int()?,
            _ if IGNORED_KEYS.contains(&key) => {}
            _ => log::debug!("ignoring unknown engine parameter {}", key),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let mut params = NativeParams::<f64>::default();
        params
            .parse("axtol=1e-6\n\n# comment\nmaxiter = 12\nprintlevel=1\nfastmode=0\nfoo=1\n")
            .unwrap();
        assert_eq!(params.axtol, 1e-6);
        assert_eq!(params.maxiter, 12);
        assert_eq!(params.printlevel, 1);
        assert_eq!(params.objtol, 1e-8);
    }

    #[test]
    fn test_parse_errors() {
        let mut params = NativeParams::<f64>::default();
        assert!(params.parse("axtol").is_err());
        assert!(params.parse("axtol=abc").is_err());
        assert!(params.parse("maxiter=-1").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing");
        assert!(NativeParams::<f64>::load(Some(path.as_path())).is_err());
        assert_eq!(NativeParams::<f64>::load(None).unwrap(), NativeParams::default());
    }
}
