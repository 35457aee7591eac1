// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

mod builder;
mod matcher;
#[cfg(test)]
mod tests;
/// Generation target module provides tools for describing which structures
/// receive generated serialization code
///
/// A target names the pair of marker methods a structure must declare:
/// - A `serialize` marker (by default `void (char *&) const`)
/// - A `deserialize` marker (by default `void (char *&)`)
///
/// together with the signature normalization strategy and the policy for
/// ambiguous (duplicate) matches.
///
/// # Example
/// ```
/// use sergen_gen_config::{TargetSet, GenTargetExt, AmbiguityPolicy};
///
/// let mut targets = TargetSet::new();
///
/// // The stock target: structures declaring serialize/deserialize stubs,
/// // duplicates treated as a configuration error
/// targets.gen_target()
///     .target_named("packet_structures")
///     .on_ambiguity(AmbiguityPolicy::Reject)
///     .build();
/// ```
mod types;

// Core types for defining generation targets
pub use types::{
    AmbiguityPolicy, DESERIALIZE_METHOD, DESERIALIZE_SIGNATURE, GenTarget, MarkerMethod,
    MethodMatch, Normalization, SERIALIZE_METHOD, SERIALIZE_SIGNATURE,
};

// Method matcher DSL for creating complex matching rules
pub use matcher::{MethodMatchNode, MethodMatcher, matcher};

// Builder API for creating generation targets
pub use builder::{GenTargetBuilder, GenTargetExt, TargetConstraintBuilder};
