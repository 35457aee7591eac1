use super::types::MethodMatch;

// === Method Matcher DSL === //
pub struct MethodMatcher;

impl MethodMatcher {
    /// Matches methods by exact name,
    /// e.g. "serialize"
    pub fn named(&self, name: impl Into<String>) -> MethodMatchNode {
        MethodMatchNode::Leaf(MethodMatch::NameEquals(name.into()))
    }

    /// Matches methods by type spelling (signature), compared under the
    /// owning target's normalization strategy,
    /// e.g. "void (char *&) const"
    pub fn with_signature(&self, spelling: impl Into<String>) -> MethodMatchNode {
        MethodMatchNode::Leaf(MethodMatch::SignatureEquals(spelling.into()))
    }

    /// Positive match on name and signature together - the same method
    /// must carry both. This is the form the declaration filter uses.
    pub fn is_method(
        &self,
        name: impl Into<String>,
        spelling: impl Into<String>,
    ) -> MethodMatchNode {
        self.named(name).and(self.with_signature(spelling))
    }
}

#[derive(Clone)]
pub enum MethodMatchNode {
    Leaf(MethodMatch),
    And(Box<MethodMatchNode>, Box<MethodMatchNode>),
    Or(Box<MethodMatchNode>, Box<MethodMatchNode>),
    Not(Box<MethodMatchNode>),
}

impl MethodMatchNode {
    pub fn and(self, other: MethodMatchNode) -> Self {
        MethodMatchNode::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: MethodMatchNode) -> Self {
        MethodMatchNode::Or(Box::new(self), Box::new(other))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        MethodMatchNode::Not(Box::new(self))
    }

    // Converts the DSL tree to the actual MethodMatch
    pub fn build(self) -> MethodMatch {
        match self {
            MethodMatchNode::Leaf(matcher) => matcher,
            MethodMatchNode::And(a, b) => {
                let a_match = a.build();
                let b_match = b.build();
                MethodMatch::AndMatches(Box::new(a_match), Box::new(b_match))
            }
            MethodMatchNode::Or(a, b) => {
                let a_match = a.build();
                let b_match = b.build();
                MethodMatch::OrMatches(Box::new(a_match), Box::new(b_match))
            }
            MethodMatchNode::Not(m) => {
                let inner = m.build();
                MethodMatch::NotMatch(Box::new(inner))
            }
        }
    }
}

// Factory function to create a matcher DSL
pub fn matcher<F>(f: F) -> MethodMatch
where
    F: FnOnce(&MethodMatcher) -> MethodMatchNode,
{
    let matcher = MethodMatcher;
    let node = f(&matcher);
    node.build()
}
