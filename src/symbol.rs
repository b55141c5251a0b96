//! Symbol types for automata transitions.

/// An input symbol. Symbols are arbitrary strings, a single character being the common case.
pub type Symbol = String;

/// Canonical spelling of the epsilon marker. Transitions given with any of the
/// [`EPSILON_SPELLINGS`] are stored under this key.
pub const EPSILON: &str = "ε";

/// All spellings that are recognized as the epsilon marker.
pub const EPSILON_SPELLINGS: [&str; 4] = ["", "ε", "eps", "epsilon"];

/// Check if a symbol is the epsilon marker, in any of its spellings.
#[inline]
pub fn is_epsilon(symbol: &str) -> bool {
    EPSILON_SPELLINGS.contains(&symbol)
}
