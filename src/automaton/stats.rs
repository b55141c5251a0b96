use std::fmt::Display;

/// Summary of the size of an [`super::Automaton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Stats {
    /// Number of states.
    pub states: usize,
    /// Number of input symbols, epsilon excluded.
    pub alphabet_size: usize,
    /// Number of accepting states.
    pub accept_states: usize,
    /// Number of transitions, where a transition to several successors counts once per successor.
    pub total_transitions: usize,
    /// Number of those transitions that are labelled with epsilon.
    pub epsilon_transitions: usize,
    /// Whether the automaton is deterministic.
    pub is_dfa: bool,
}

impl Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(["states".to_string(), self.states.to_string()]);
        builder.push_record(["alphabet size".to_string(), self.alphabet_size.to_string()]);
        builder.push_record(["accept states".to_string(), self.accept_states.to_string()]);
        builder.push_record([
            "total transitions".to_string(),
            self.total_transitions.to_string(),
        ]);
        builder.push_record([
            "epsilon transitions".to_string(),
            self.epsilon_transitions.to_string(),
        ]);
        builder.push_record(["deterministic".to_string(), self.is_dfa.to_string()]);
        write!(
            f,
            "{}",
            builder.build().with(tabled::settings::Style::ascii())
        )
    }
}
