pub mod target_set;
mod gen_target;

// Make sure our extensions are visible
pub use gen_target::{
    AmbiguityPolicy, DESERIALIZE_METHOD, DESERIALIZE_SIGNATURE, GenTarget, GenTargetExt,
    MarkerMethod, MethodMatch, MethodMatchNode, MethodMatcher, Normalization, SERIALIZE_METHOD,
    SERIALIZE_SIGNATURE, matcher as method_matcher,
};
pub use target_set::TargetSet;
