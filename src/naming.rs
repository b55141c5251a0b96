use crate::automaton::StateName;

/// Determines how the states and the automaton produced by a transformation are named.
///
/// Synthetic states are called `{state_prefix}{i}` where `i` counts up from zero in
/// discovery order, and the resulting automaton is named after its input with
/// `name_suffix` appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Naming<'a> {
    /// Prefix of every synthetic state name.
    pub state_prefix: &'a str,
    /// Appended to the name of the input automaton.
    pub name_suffix: &'a str,
}

impl Naming<'static> {
    /// Scheme used by subset construction: `S0, S1, ...` and suffix `__DFA`.
    pub const DETERMINIZED: Self = Naming {
        state_prefix: "S",
        name_suffix: "__DFA",
    };
    /// Scheme used by minimization: `M0, M1, ...` and suffix `__MIN`.
    pub const MINIMIZED: Self = Naming {
        state_prefix: "M",
        name_suffix: "__MIN",
    };
}

impl<'a> Naming<'a> {
    /// Creates a custom naming scheme.
    pub fn new(state_prefix: &'a str, name_suffix: &'a str) -> Self {
        Self {
            state_prefix,
            name_suffix,
        }
    }

    /// Name of the `index`-th synthetic state.
    pub fn state(&self, index: usize) -> StateName {
        format!("{}{index}", self.state_prefix)
    }

    /// Name of the automaton derived from one called `base`.
    pub fn automaton(&self, base: &str) -> String {
        format!("{base}{}", self.name_suffix)
    }
}
