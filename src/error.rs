use thiserror::Error;

/// Errors that can occur when building or transforming an [`crate::Automaton`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Minimization was requested for an automaton that is not deterministic.
    #[error("cannot minimize `{name}`: automaton is not deterministic")]
    NotDeterministic {
        /// Name of the offending automaton.
        name: String,
    },
    /// The builder was finished without designating a start state.
    #[error("automaton `{name}` has no start state")]
    MissingStartState {
        /// Name of the automaton that was being built.
        name: String,
    },
}

/// Result type used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
