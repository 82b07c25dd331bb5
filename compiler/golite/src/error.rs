use golite_eval::EvalError;
use golite_lower::LowerError;
use thiserror::Error;

/// Anything that can go wrong between loading a package and running it.
#[derive(Clone, Debug, Error)]
pub enum Error {
    #[error("lowering failed: {0}")]
    Lower(#[from] LowerError),

    #[error("{0}")]
    Eval(#[from] EvalError),

    #[error("no package named `{0}` is loaded")]
    UnknownPackage(String),

    #[error("package `{package}` has no function `{func}`")]
    UnknownFunction { package: String, func: String },
}

impl Error {
    /// The payload of a `panic` that aborted the program.
    pub fn panic_payload(&self) -> Option<&golite_eval::Value> {
        match self {
            Error::Eval(err) => err.panic_payload(),
            _ => None,
        }
    }
}
