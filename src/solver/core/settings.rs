use derive_builder::Builder;
use indexmap::IndexMap;
use std::fmt::Write;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Option name selecting the free variable elimination strategy
pub const REMOVE_FREE_VARIABLE_METHOD: &str = "RemoveFreeVariableMethod";

/// Option name of the engine's verbosity level
pub const PRINTLEVEL: &str = "printlevel";

#[derive(Error, Debug, PartialEq)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// unknown value for the elimination strategy selector
    #[error("Bad value ({0}) for option RemoveFreeVariableMethod")]
    BadRemoveFreeVariableMethod(i32),
    /// an option was given with a value type it does not accept
    #[error("Option {0} has the wrong value type")]
    BadOptionType(String),
    /// the engine takes no string options
    #[error("String option {0} is not supported")]
    UnsupportedStringOption(String),
    /// An error attributable to one of the fields
    #[error("Bad value for field {0}")]
    BadFieldValue(&'static str),
}

/// Strategy used to remove free variables before calling the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(i32)]
pub enum RemoveFreeVariableMethod {
    /// `s = p - q` with `p, q ≥ 0` held in two diagonal blocks
    TwoSlackVariables = 1,
    /// project the constraints onto the null space of `Bᵀ`
    #[default]
    Nullspace = 2,
    /// bound `s` by a Lorentz cone held in one dense block
    LorentzConeSlack = 3,
}

impl TryFrom<i32> for RemoveFreeVariableMethod {
    type Error = SettingsError;
    fn try_from(value: i32) -> Result<Self, SettingsError> {
        match value {
            1 => Ok(RemoveFreeVariableMethod::TwoSlackVariables),
            2 => Ok(RemoveFreeVariableMethod::Nullspace),
            3 => Ok(RemoveFreeVariableMethod::LorentzConeSlack),
            _ => Err(SettingsError::BadRemoveFreeVariableMethod(value)),
        }
    }
}

/// Value of a single solver option
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OptionValue {
    Double(f64),
    Int(i32),
    Str(String),
}

/// Generic name/value solver options.  Apart from
/// [`REMOVE_FREE_VARIABLE_METHOD`], options are forwarded to the engine
/// through its parameter file in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverOptions {
    options: IndexMap<String, OptionValue>,
    /// ask the engine to print its progress
    pub print_to_console: bool,
}

impl SolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_double(&mut self, key: &str, value: f64) -> &mut Self {
        self.options.insert(key.to_string(), OptionValue::Double(value));
        self
    }

    pub fn set_int(&mut self, key: &str, value: i32) -> &mut Self {
        self.options.insert(key.to_string(), OptionValue::Int(value));
        self
    }

    pub fn set_string(&mut self, key: &str, value: &str) -> &mut Self {
        self.options
            .insert(key.to_string(), OptionValue::Str(value.to_string()));
        self
    }

    pub fn set_remove_free_variable_method(&mut self, method: RemoveFreeVariableMethod) -> &mut Self {
        self.set_int(REMOVE_FREE_VARIABLE_METHOD, method as i32)
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.options.iter()
    }

    /// Split into the elimination strategy and the contents of the
    /// engine parameter file.  Fails before anything is written if an
    /// option can not be passed on.
    pub(crate) fn resolve(&self) -> Result<ResolvedOptions, SettingsError> {
        let mut method = RemoveFreeVariableMethod::default();
        let mut params = String::new();

        for (key, value) in &self.options {
            match (key.as_str(), value) {
                (REMOVE_FREE_VARIABLE_METHOD, OptionValue::Int(v)) => {
                    method = RemoveFreeVariableMethod::try_from(*v)?;
                }
                (REMOVE_FREE_VARIABLE_METHOD, _) => {
                    return Err(SettingsError::BadOptionType(key.clone()));
                }
                (_, OptionValue::Str(_)) => {
                    return Err(SettingsError::UnsupportedStringOption(key.clone()));
                }
                (_, OptionValue::Double(v)) => {
                    let _ = writeln!(params, "{}={}", key, format_double(*v));
                }
                (_, OptionValue::Int(v)) => {
                    let _ = writeln!(params, "{}={}", key, v);
                }
            }
        }

        // an explicit printlevel always wins
        if self.print_to_console && !self.options.contains_key(PRINTLEVEL) {
            let _ = writeln!(params, "{}=1", PRINTLEVEL);
        }

        Ok(ResolvedOptions { method, params })
    }
}

// shortest of the plain and exponent forms, both of which
// round trip through the engine's parser
fn format_double(v: f64) -> String {
    let plain = format!("{}", v);
    let exp = format!("{:e}", v);
    if exp.len() < plain.len() {
        exp
    } else {
        plain
    }
}

/// Options split into the parts consumed by the crate and the engine
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedOptions {
    pub method: RemoveFreeVariableMethod,
    /// parameter file contents, empty if the engine should use defaults
    pub params: String,
}

/// Typed settings for the known CSDP parameters.  Unset parameters are
/// left at the engine's defaults.
///
/// ```
/// use sdpfree::solver::*;
///
/// let settings = CsdpSettingsBuilder::default()
///     .remove_free_variable_method(RemoveFreeVariableMethod::LorentzConeSlack)
///     .objtol(1e-7)
///     .maxiter(50)
///     .build()
///     .unwrap();
/// let options = SolverOptions::from(&settings);
/// assert_eq!(options.get("maxiter"), Some(&OptionValue::Int(50)));
/// ```
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CsdpSettings {
    ///free variable elimination strategy
    #[builder(default)]
    pub remove_free_variable_method: RemoveFreeVariableMethod,

    ///print engine progress to the console
    #[builder(default = "false")]
    pub print_to_console: bool,

    ///primal feasibility tolerance
    #[builder(default, setter(strip_option))]
    pub axtol: Option<f64>,

    ///dual feasibility tolerance
    #[builder(default, setter(strip_option))]
    pub atytol: Option<f64>,

    ///relative duality gap tolerance
    #[builder(default, setter(strip_option))]
    pub objtol: Option<f64>,

    ///primal infeasibility detection threshold
    #[builder(default, setter(strip_option))]
    pub pinftol: Option<f64>,

    ///dual infeasibility detection threshold
    #[builder(default, setter(strip_option))]
    pub dinftol: Option<f64>,

    ///maximum number of iterations
    #[builder(default, setter(strip_option))]
    pub maxiter: Option<i32>,

    ///smallest fraction of the step to the boundary
    #[builder(default, setter(strip_option))]
    pub minstepfrac: Option<f64>,

    ///largest fraction of the step to the boundary
    #[builder(default, setter(strip_option))]
    pub maxstepfrac: Option<f64>,

    ///primal step length below which progress has stalled
    #[builder(default, setter(strip_option))]
    pub minstepp: Option<f64>,

    ///dual step length below which progress has stalled
    #[builder(default, setter(strip_option))]
    pub minstepd: Option<f64>,

    ///engine verbosity, overrides `print_to_console`
    #[builder(default, setter(strip_option))]
    pub printlevel: Option<i32>,
}

impl Default for CsdpSettings {
    fn default() -> CsdpSettings {
        CsdpSettingsBuilder::default().build().unwrap()
    }
}

impl From<SettingsError> for CsdpSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        CsdpSettingsBuilderError::ValidationError(e.to_string())
    }
}

fn check_positive(value: Option<Option<f64>>, name: &'static str) -> Result<(), SettingsError> {
    match value {
        Some(Some(v)) if !(v > 0.0 && v.is_finite()) => Err(SettingsError::BadFieldValue(name)),
        _ => Ok(()),
    }
}

fn check_fraction(value: Option<Option<f64>>, name: &'static str) -> Result<(), SettingsError> {
    match value {
        Some(Some(v)) if !(v > 0.0 && v <= 1.0) => Err(SettingsError::BadFieldValue(name)),
        _ => Ok(()),
    }
}

/// Automatic pre-build settings validation
impl CsdpSettingsBuilder {
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_positive(self.axtol, "axtol")?;
        check_positive(self.atytol, "atytol")?;
        check_positive(self.objtol, "objtol")?;
        check_positive(self.pinftol, "pinftol")?;
        check_positive(self.dinftol, "dinftol")?;
        check_positive(self.minstepp, "minstepp")?;
        check_positive(self.minstepd, "minstepd")?;
        check_fraction(self.minstepfrac, "minstepfrac")?;
        check_fraction(self.maxstepfrac, "maxstepfrac")?;

        if let Some(Some(maxiter)) = self.maxiter {
            if maxiter <= 0 {
                return Err(SettingsError::BadFieldValue("maxiter"));
            }
        }
        if let (Some(Some(lo)), Some(Some(hi))) = (self.minstepfrac, self.maxstepfrac) {
            if lo > hi {
                return Err(SettingsError::BadFieldValue("minstepfrac"));
            }
        }
        Ok(())
    }
}

impl From<&CsdpSettings> for SolverOptions {
    fn from(settings: &CsdpSettings) -> SolverOptions {
        let mut options = SolverOptions::new();
        options.print_to_console = settings.print_to_console;
        options.set_remove_free_variable_method(settings.remove_free_variable_method);

        let doubles = [
            ("axtol", settings.axtol),
            ("atytol", settings.atytol),
            ("objtol", settings.objtol),
            ("pinftol", settings.pinftol),
            ("dinftol", settings.dinftol),
            ("minstepfrac", settings.minstepfrac),
            ("maxstepfrac", settings.maxstepfrac),
            ("minstepp", settings.minstepp),
            ("minstepd", settings.minstepd),
        ];
        for (key, value) in doubles {
            if let Some(v) = value {
                options.set_double(key, v);
            }
        }
        if let Some(v) = settings.maxiter {
            options.set_int("maxiter", v);
        }
        if let Some(v) = settings.printlevel {
            options.set_int(PRINTLEVEL, v);
        }
        options
    }
}
