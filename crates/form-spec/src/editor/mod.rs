//! Pure edit operations over ordered questions and choices.
//!
//! Every operation takes the current snapshot by reference and returns a new
//! list; the input is never mutated. Ids that no longer exist turn an
//! operation into a no-op that returns an unchanged copy.

pub mod choices;
pub mod questions;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Raised only under [`crate::OtherPolicy::Strict`].
    #[error("the question already has an \"Other\" choice")]
    OtherChoiceExists,
}
