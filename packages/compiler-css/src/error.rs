use thiserror::Error;
use tokensmith_evaluator::EvalError;

pub type CssResult<T> = Result<T, CssError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CssError {
    /// Emission found a `var()` to a name the sheet never declares. The
    /// evaluator prunes these, so this is an internal inconsistency.
    #[error("Unresolved reference in {sheet}: {name} uses {reference}, which is not declared")]
    UnresolvedReference {
        sheet: String,
        name: String,
        reference: String,
    },

    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvalError),
}
