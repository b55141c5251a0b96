//! Library for converting nondeterministic finite automata into deterministic ones and
//! minimizing the result.
//!
//! The central type is [`Automaton`], a finite automaton over string-named states and
//! string symbols whose transitions may be nondeterministic and may be labelled with the
//! epsilon marker (any of `""`, `"ε"`, `"eps"` or `"epsilon"`). An automaton is created
//! through [`Automaton::builder`], which also takes care of collecting every state that is
//! mentioned somewhere and of normalizing the epsilon spellings.
//!
//! The pipeline consists of two transformations, both of which produce a fresh automaton:
//! - [`Automaton::to_dfa`] runs the subset construction (see [`determinization`]). Every
//!   state of the result is a set of states of the input, which is recorded in the
//!   [`Automaton::state_composition`] of the result. Unreachable states are pruned.
//! - [`Automaton::minimize`] applies Hopcroft's partition refinement to a deterministic
//!   automaton (see [`minimization`]), merging all states that cannot be distinguished
//!   by any word. This is feature gated behind the `minimize` feature.
//!
//! Further functionality is concerned with running words ([`Automaton::accepts`]),
//! reachability ([`reachable`]) and presentation, i.e. readable names of composite
//! states, [`Stats`] and transition tables.
//!
//! ```
//! use nfa_dfa::prelude::*;
//!
//! let nfa = Automaton::builder()
//!     .name("ends-with-ab")
//!     .start("q0")
//!     .with_accepting(["q2"])
//!     .with_transitions([("q0", "a", "q0"), ("q0", "b", "q0"), ("q0", "a", "q1"), ("q1", "b", "q2")])
//!     .build()
//!     .unwrap();
//! assert!(!nfa.is_dfa());
//!
//! let dfa = nfa.to_dfa();
//! assert!(dfa.is_dfa());
//! assert!(dfa.accepts(["b", "a", "b"]));
//! assert!(!dfa.accepts(["a", "b", "a"]));
//!
//! let min = dfa.minimize().unwrap();
//! assert_eq!(min.states().len(), 3);
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use nfa_dfa::prelude::*;` should be enough to use the package.
pub mod prelude {
    #[cfg(feature = "minimize")]
    pub use super::minimization::minimize;
    pub use super::{
        automaton::{
            accepts, build_automaton, Automaton, AutomatonBuilder, StateName, Stats,
            Transitions,
        },
        closure::{epsilon_closure, move_on_symbol},
        determinization::to_dfa,
        error::{Error, Result},
        math::{OrderedSet, Partition, SubsetKey},
        naming::Naming,
        reachable::prune_unreachable,
        symbol::{is_epsilon, Symbol, EPSILON},
        Show,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

/// Symbols and the epsilon marker.
pub mod symbol;

/// The error type of the crate.
pub mod error;
pub use error::{Error, Result};

/// Naming schemes for synthetic states and derived automata.
pub mod naming;

/// Defines the [`Automaton`] type, its builder and everything that is derived from it directly.
pub mod automaton;
pub use automaton::Automaton;
pub use automaton::Stats;

/// Epsilon closure and symbol moves on sets of states.
pub mod closure;

/// Reachability and removal of unreachable states.
pub mod reachable;

/// Conversion of nondeterministic automata into deterministic ones.
pub mod determinization;

/// Contains the implementation of Hopcroft's minimization algorithm. This is feature gated behind the `minimize` feature.
#[cfg(feature = "minimize")]
pub mod minimization;

/// Implements the generation of random automata and words.
#[cfg(feature = "random")]
pub mod random;

use itertools::Itertools;

/// Helper trait which can be used to display states, sets of states and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state that is simply its
    /// name and for a set of states it should be `{q0, q1, q2}`.
    fn show(&self) -> String;
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

impl<S: Show> Show for std::collections::BTreeSet<S> {
    fn show(&self) -> String {
        format!("{{{}}}", self.iter().map(Show::show).join(", "))
    }
}
