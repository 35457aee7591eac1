// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use serde::{Deserialize, Serialize};

/// Method name the stock serialize marker matches on
pub const SERIALIZE_METHOD: &str = "serialize";
/// Type spelling the stock serialize marker matches on, as libclang spells it
pub const SERIALIZE_SIGNATURE: &str = "void (char *&) const";
/// Method name the stock deserialize marker matches on
pub const DESERIALIZE_METHOD: &str = "deserialize";
/// Type spelling the stock deserialize marker matches on
pub const DESERIALIZE_SIGNATURE: &str = "void (char *&)";

/// Specifies how to match a member method
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum MethodMatch {
    /// Match methods whose name equals the given name exactly
    NameEquals(String),
    /// Match methods whose type spelling equals the given spelling under
    /// the owning target's normalization strategy
    SignatureEquals(String),
    /// Logical AND - both patterns must match
    AndMatches(Box<MethodMatch>, Box<MethodMatch>),
    /// Logical OR - either pattern must match
    OrMatches(Box<MethodMatch>, Box<MethodMatch>),
    /// Logical NOT - inverts the match
    NotMatch(Box<MethodMatch>),
}

/// The name and type spelling that, declared together on one method, mark
/// a structure as a serialization target
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MarkerMethod {
    pub name: String,
    pub type_spelling: String,
}

impl MarkerMethod {
    pub fn new(name: impl Into<String>, type_spelling: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_spelling: type_spelling.into(),
        }
    }

    /// The positive match form the declaration filter searches with: the
    /// same method must carry the marker's name AND its signature.
    pub fn to_match(&self) -> MethodMatch {
        MethodMatch::AndMatches(
            Box::new(MethodMatch::NameEquals(self.name.clone())),
            Box::new(MethodMatch::SignatureEquals(self.type_spelling.clone())),
        )
    }
}

/// Strategy for reducing a raw type spelling to the canonical key used in
/// signature comparisons
///
/// Front ends spell the same semantic type consistently within one run,
/// but spellings are whitespace-sensitive across tools. `Exact` keeps the
/// historical string-identical comparison; `CollapseWhitespace` tolerates
/// whitespace and pointer-spacing variation only.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Spellings must be string-identical, whitespace included
    #[default]
    Exact,
    /// Runs of whitespace collapse to a single space and `*`/`&` are
    /// uniformly spaced before comparison
    CollapseWhitespace,
}

/// Policy for structures where more than one method matches the same marker
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbiguityPolicy {
    /// The first matching method in declaration order is authoritative;
    /// the structure still qualifies
    #[default]
    FirstMatch,
    /// Duplicate matches fail the run as a configuration error
    Reject,
}

/// A complete generation target: the marker methods a structure must
/// declare to receive generated code, and how matching behaves
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GenTarget {
    pub name: String,
    pub serialize_marker: MarkerMethod,
    pub deserialize_marker: MarkerMethod,
    pub normalization: Normalization,
    pub ambiguity: AmbiguityPolicy,
}

impl Default for GenTarget {
    fn default() -> Self {
        Self {
            name: "serialization".to_string(),
            serialize_marker: MarkerMethod::new(SERIALIZE_METHOD, SERIALIZE_SIGNATURE),
            deserialize_marker: MarkerMethod::new(DESERIALIZE_METHOD, DESERIALIZE_SIGNATURE),
            normalization: Normalization::default(),
            ambiguity: AmbiguityPolicy::default(),
        }
    }
}
