//! The compiled mask automaton.
//!
//! States are stored in an arena ([`Automaton`]) and linked through
//! [`StateId`] child indices. The chain always ends in a single
//! [`State::Eol`]. Elliptical value states loop onto themselves through
//! [`Automaton::next_state`] instead of holding a self reference.

/// Index of a state inside its [`Automaton`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Character class accepted by a value slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// ASCII digit (`0` / `9`)
    Numeric,
    /// ASCII letter (`A` / `a`)
    Literal,
    /// ASCII letter or digit (`_` / `-`)
    AlphaNumeric,
    /// Custom notation
    Custom { character: char, character_set: String },
}

impl ValueKind {
    pub fn accepts(&self, ch: char) -> bool {
        match self {
            Self::Numeric => ch.is_ascii_digit(),
            Self::Literal => ch.is_ascii_alphabetic(),
            Self::AlphaNumeric => ch.is_ascii_alphanumeric(),
            Self::Custom { character_set, .. } => character_set.contains(ch),
        }
    }

    /// Symbol shown for the slot in a placeholder
    pub fn placeholder_symbol(&self) -> char {
        match self {
            Self::Numeric => '0',
            Self::Literal => 'a',
            Self::AlphaNumeric => '-',
            Self::Custom { character, .. } => *character,
        }
    }
}

/// A node of the automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Literal from a `{...}` group; part of the extracted value
    Fixed { character: char, child: StateId },
    /// Decorative literal outside any group; excluded from the extracted value
    Free { character: char, child: StateId },
    /// Mandatory slot. An elliptical slot repeats indefinitely.
    Value {
        kind: ValueKind,
        elliptical: bool,
        child: StateId,
    },
    /// Optional slot, skipped when the input does not match
    OptionalValue { kind: ValueKind, child: StateId },
    /// End of line, accepts nothing
    Eol,
}

impl State {
    pub fn child(&self) -> Option<StateId> {
        match self {
            Self::Fixed { child, .. }
            | Self::Free { child, .. }
            | Self::Value { child, .. }
            | Self::OptionalValue { child, .. } => Some(*child),
            Self::Eol => None,
        }
    }

    pub fn is_eol(&self) -> bool {
        matches!(self, Self::Eol)
    }

    pub fn is_elliptical(&self) -> bool {
        matches!(
            self,
            Self::Value {
                elliptical: true,
                ..
            }
        )
    }
}

/// Transition produced by [`Automaton::accept`] or [`Automaton::autocomplete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Next {
    /// State to continue from
    pub state: StateId,
    /// Character appended to the formatted text
    pub insert: Option<char>,
    /// Whether the input character was consumed
    pub pass: bool,
    /// Character appended to the extracted value
    pub value: Option<char>,
}

/// Arena holding the states of one compiled format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    states: Vec<State>,
    root: StateId,
}

impl Automaton {
    /// Build from states linked in order: the state at index `i` has child
    /// `i + 1`; an EOL is appended after the last one.
    pub(crate) fn from_chain(nodes: Vec<ChainNode>) -> Self {
        let eol = nodes.len();
        let mut states: Vec<State> = nodes
            .into_iter()
            .enumerate()
            .map(|(i, node)| node.link(StateId(i + 1)))
            .collect();
        states.push(State::Eol);
        debug_assert_eq!(states.len(), eol + 1);
        Self {
            states,
            root: StateId(0),
        }
    }

    pub fn root(&self) -> StateId {
        self.root
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    /// Number of states including the EOL
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Walk the `child` links from the root, EOL excluded.
    pub fn chain(&self) -> impl Iterator<Item = &State> + '_ {
        let mut current = Some(self.root);
        std::iter::from_fn(move || {
            let state = self.state(current?);
            current = state.child();
            (!state.is_eol()).then_some(state)
        })
    }

    /// The state that follows `id`; elliptical slots return themselves.
    pub fn next_state(&self, id: StateId) -> StateId {
        match self.state(id) {
            State::Value {
                elliptical: true, ..
            } => id,
            state => state.child().unwrap_or(id),
        }
    }

    /// Feed one input character to the state `id`.
    ///
    /// `None` means the character is rejected and must be dropped.
    pub fn accept(&self, id: StateId, ch: char) -> Option<Next> {
        let next_state = self.next_state(id);
        match self.state(id) {
            State::Fixed { character, .. } => {
                let pass = *character == ch;
                Some(Next {
                    state: next_state,
                    insert: Some(*character),
                    pass,
                    value: Some(*character),
                })
            }
            State::Free { character, .. } => {
                let pass = *character == ch;
                Some(Next {
                    state: next_state,
                    insert: Some(*character),
                    pass,
                    value: None,
                })
            }
            State::Value { kind, .. } => kind.accepts(ch).then_some(Next {
                state: next_state,
                insert: Some(ch),
                pass: true,
                value: Some(ch),
            }),
            State::OptionalValue { kind, .. } => {
                if kind.accepts(ch) {
                    Some(Next {
                        state: next_state,
                        insert: Some(ch),
                        pass: true,
                        value: Some(ch),
                    })
                } else {
                    Some(Next {
                        state: next_state,
                        insert: None,
                        pass: false,
                        value: None,
                    })
                }
            }
            State::Eol => None,
        }
    }

    /// Transition that completes the input without consuming anything.
    ///
    /// Only literals autocomplete; value slots and EOL return `None`.
    pub fn autocomplete(&self, id: StateId) -> Option<Next> {
        let next_state = self.next_state(id);
        match self.state(id) {
            State::Fixed { character, .. } => Some(Next {
                state: next_state,
                insert: Some(*character),
                pass: false,
                value: Some(*character),
            }),
            State::Free { character, .. } => Some(Next {
                state: next_state,
                insert: Some(*character),
                pass: false,
                value: None,
            }),
            State::Value { .. } | State::OptionalValue { .. } | State::Eol => None,
        }
    }

    /// True when no Fixed or non-elliptical Value state lies between `id` and EOL.
    pub fn no_mandatory_characters_left_after(&self, id: StateId) -> bool {
        let mut current = id;
        loop {
            match self.state(current) {
                State::Eol => return true,
                State::Value { elliptical, .. } => return *elliptical,
                State::Fixed { .. } => return false,
                State::Free { child, .. } | State::OptionalValue { child, .. } => current = *child,
            }
        }
    }

    /// Render the placeholder from `id` onward, appended to `prefix`.
    pub fn placeholder_from(&self, id: StateId, prefix: &str) -> String {
        let mut placeholder = String::from(prefix);
        let mut current = id;
        loop {
            match self.state(current) {
                State::Fixed { character, child } | State::Free { character, child } => {
                    placeholder.push(*character);
                    current = *child;
                }
                State::Value {
                    elliptical: true, ..
                }
                | State::Eol => return placeholder,
                State::Value { kind, child, .. } | State::OptionalValue { kind, child } => {
                    placeholder.push(kind.placeholder_symbol());
                    current = *child;
                }
            }
        }
    }

    /// Debug rendering in the `[0] -> {+} -> EOL` style
    pub fn describe(&self) -> String {
        let mut parts: Vec<String> = self
            .chain()
            .map(|state| match state {
                State::Fixed { character, .. } => format!("{{{}}}", character),
                State::Free { character, .. } => character.to_string(),
                State::Value {
                    elliptical: true, ..
                } => "[…]".to_string(),
                State::Value { kind, .. } => match kind {
                    ValueKind::Numeric => "[0]".to_string(),
                    ValueKind::Literal => "[A]".to_string(),
                    ValueKind::AlphaNumeric => "[_]".to_string(),
                    ValueKind::Custom { character, .. } => format!("[{}]", character),
                },
                State::OptionalValue { kind, .. } => match kind {
                    ValueKind::Numeric => "[9]".to_string(),
                    ValueKind::Literal => "[a]".to_string(),
                    ValueKind::AlphaNumeric => "[-]".to_string(),
                    ValueKind::Custom { character, .. } => format!("[{}]", character),
                },
                State::Eol => "EOL".to_string(),
            })
            .collect();
        parts.push("EOL".to_string());
        parts.join(" -> ")
    }
}

/// A state whose child is not yet known; produced by the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ChainNode {
    Fixed(char),
    Free(char),
    Value(ValueKind),
    Ellipsis(ValueKind),
    OptionalValue(ValueKind),
}

impl ChainNode {
    fn link(self, child: StateId) -> State {
        match self {
            Self::Fixed(character) => State::Fixed { character, child },
            Self::Free(character) => State::Free { character, child },
            Self::Value(kind) => State::Value {
                kind,
                elliptical: false,
                child,
            },
            Self::Ellipsis(kind) => State::Value {
                kind,
                elliptical: true,
                child,
            },
            Self::OptionalValue(kind) => State::OptionalValue { kind, child },
        }
    }
}
