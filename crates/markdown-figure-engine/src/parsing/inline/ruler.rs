use thiserror::Error;

use super::state::InlineState;

/// A recognizer offered each cursor position during inline parsing.
///
/// On success a rule advances `state.pos` past what it consumed and, unless
/// `silent`, pushes its node. On failure it must leave `state` untouched.
pub trait InlineRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn try_parse(&self, state: &mut InlineState<'_>, silent: bool) -> bool;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulerError {
    #[error("inline rule `{0}` not found")]
    NotFound(String),

    #[error("inline rule `{0}` is already registered")]
    Duplicate(String),
}

/// Ordered list of inline rules. Earlier rules win.
#[derive(Default)]
pub struct Ruler {
    rules: Vec<Box<dyn InlineRule>>,
}

impl Ruler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule at the end of the chain.
    pub fn push(&mut self, rule: Box<dyn InlineRule>) -> Result<(), RulerError> {
        self.check_unique(rule.name())?;
        self.rules.push(rule);
        Ok(())
    }

    /// Inserts a rule directly before the rule named `anchor`.
    pub fn insert_before(
        &mut self,
        anchor: &str,
        rule: Box<dyn InlineRule>,
    ) -> Result<(), RulerError> {
        self.check_unique(rule.name())?;
        let idx = self
            .rules
            .iter()
            .position(|r| r.name() == anchor)
            .ok_or_else(|| RulerError::NotFound(anchor.to_string()))?;
        self.rules.insert(idx, rule);
        Ok(())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn InlineRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    fn check_unique(&self, name: &str) -> Result<(), RulerError> {
        if self.rules.iter().any(|r| r.name() == name) {
            return Err(RulerError::Duplicate(name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl InlineRule for Named {
        fn name(&self) -> &'static str {
            self.0
        }

        fn try_parse(&self, _state: &mut InlineState<'_>, _silent: bool) -> bool {
            false
        }
    }

    #[test]
    fn insert_before_places_rule_ahead_of_anchor() {
        let mut ruler = Ruler::new();
        ruler.push(Box::new(Named("escape"))).unwrap();
        ruler.push(Box::new(Named("link"))).unwrap();
        ruler.push(Box::new(Named("newline"))).unwrap();
        ruler
            .insert_before("link", Box::new(Named("figure")))
            .unwrap();
        assert_eq!(ruler.names(), vec!["escape", "figure", "link", "newline"]);
    }

    #[test]
    fn insert_before_unknown_anchor_fails() {
        let mut ruler = Ruler::new();
        ruler.push(Box::new(Named("escape"))).unwrap();
        let err = ruler
            .insert_before("link", Box::new(Named("figure")))
            .unwrap_err();
        assert_eq!(err, RulerError::NotFound("link".into()));
        assert_eq!(err.to_string(), "inline rule `link` not found");
        assert_eq!(ruler.names(), vec!["escape"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut ruler = Ruler::new();
        ruler.push(Box::new(Named("link"))).unwrap();
        assert_eq!(
            ruler.push(Box::new(Named("link"))),
            Err(RulerError::Duplicate("link".into()))
        );
    }
}
