use rustc_hash::FxHashSet;

use crate::order::Slot;

/// Classifies a layer id.
#[derive(Debug, Clone)]
pub enum MatchPredicate {
    Exact(String),
    Prefix(String),
    Contains(String),
    AnyOf(FxHashSet<String>),
}

impl MatchPredicate {
    pub fn matches(&self, id: &str) -> bool {
        match self {
            MatchPredicate::Exact(exact) => id == exact,
            MatchPredicate::Prefix(prefix) => id.starts_with(prefix.as_str()),
            MatchPredicate::Contains(substring) => id.contains(substring.as_str()),
            MatchPredicate::AnyOf(set) => set.contains(id),
        }
    }
}

/// Orders two ids matched by the same rule.
#[derive(Debug, Clone)]
pub enum TieBreak {
    /// Every pair compares the same way, leaving the order to insertion.
    Constant(bool),
    /// Position within the list. Ids outside of the list compare as ascending.
    Order(Vec<String>),
}

impl TieBreak {
    /// Whether `lhs` belongs before `rhs`.
    pub fn is_ordered_ascending(&self, lhs: &str, rhs: &str) -> bool {
        match self {
            TieBreak::Constant(value) => *value,
            TieBreak::Order(ids) => {
                let lhs = ids.iter().position(|id| id == lhs);
                let rhs = ids.iter().position(|id| id == rhs);

                match (lhs, rhs) {
                    (Some(lhs), Some(rhs)) => lhs < rhs,
                    _ => true,
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    predicate: MatchPredicate,
    tie_break: TieBreak,
    slot: Option<Slot>,
}

impl Rule {
    pub fn new(predicate: MatchPredicate, tie_break: TieBreak) -> Self {
        Self {
            predicate,
            tie_break,
            slot: None,
        }
    }

    pub fn exact(id: impl Into<String>) -> Self {
        Self::new(MatchPredicate::Exact(id.into()), TieBreak::Constant(true))
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::new(MatchPredicate::Prefix(prefix.into()), TieBreak::Constant(true))
    }

    pub fn contains(substring: impl Into<String>) -> Self {
        Self::new(
            MatchPredicate::Contains(substring.into()),
            TieBreak::Constant(true),
        )
    }

    /// Matches any of the given ids, ordering them as listed.
    pub fn ordered_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids = ids.into_iter().map(Into::into).collect::<Vec<String>>();
        let set = ids.iter().cloned().collect::<FxHashSet<_>>();

        Self::new(MatchPredicate::AnyOf(set), TieBreak::Order(ids))
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn slotted(mut self, slot: Slot) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn matches(&self, id: &str) -> bool {
        self.predicate.matches(id)
    }

    pub fn is_ordered_ascending(&self, lhs: &str, rhs: &str) -> bool {
        self.tie_break.is_ordered_ascending(lhs, rhs)
    }

    pub fn slot(&self) -> Option<&Slot> {
        self.slot.as_ref()
    }
}

/// Rules in declaration order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// Index of the first rule matching `id`.
    pub fn rule_index(&self, id: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.matches(id))
    }

    /// The first rule matching `id`.
    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(id))
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn matches(&self, id: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(id))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: Vec<Rule>,
}

impl RuleSetBuilder {
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends the rules produced by `build`, assigning all of them
    /// to `slot`. A `None` slot clears any slot set on the nested rules.
    pub fn slotted(
        mut self,
        slot: Option<Slot>,
        build: impl FnOnce(RuleSetBuilder) -> RuleSetBuilder,
    ) -> Self {
        let nested = build(RuleSetBuilder::default());
        self.rules.extend(nested.rules.into_iter().map(|mut rule| {
            rule.slot = slot.clone();
            rule
        }));
        self
    }

    pub fn build(self) -> RuleSet {
        RuleSet { rules: self.rules }
    }
}
