use lazy_static::lazy_static;
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Advisory messages that are logged at most once per process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Advisory {
    Nullspace,
    TwoSlackVariables,
    LorentzConeSlack,
}

impl Advisory {
    fn message(&self) -> &'static str {
        match self {
            Advisory::Nullspace => {
                "Free variables are removed by projecting onto the null space of the \
                 free variable coefficients.  This can be slow for large problems; \
                 consider adding bounds so that no free variables remain."
            }
            Advisory::TwoSlackVariables => {
                "Free variables are replaced by the difference of two nonnegative \
                 slacks.  The dual problem has no strictly feasible point, which can \
                 hurt convergence."
            }
            Advisory::LorentzConeSlack => {
                "Free variables are bounded by a Lorentz cone slack block.  The dual \
                 problem has no strictly feasible point and the result can be poorly \
                 conditioned."
            }
        }
    }
}

lazy_static! {
    static ref ISSUED: Mutex<HashSet<Advisory>> = Mutex::new(HashSet::new());
}

/// Log `advisory` unless it was logged before.  Returns true if it was
/// logged by this call.
pub(crate) fn warn_once(advisory: Advisory) -> bool {
    let mut issued = ISSUED.lock().unwrap_or_else(PoisonError::into_inner);
    let first = issued.insert(advisory);
    if first {
        log::warn!("{}", advisory.message());
    }
    first
}

#[test]
fn test_warn_once() {
    // may or may not be the first call in this process
    warn_once(Advisory::Nullspace);
    assert!(!warn_once(Advisory::Nullspace));
}
