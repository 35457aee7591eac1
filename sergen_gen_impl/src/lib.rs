mod filter;
mod generator;
mod normalize;

// Re-export our public API
pub use filter::MatchOutcome;
pub use filter::Partition;
pub use filter::evaluate_method_match;
pub use filter::find_marker;
pub use filter::partition_declarations;
pub use filter::qualifying_type_names;
pub use filter::should_skip;
pub use generator::generate_serialization_methods;
pub use generator::generate_unit_banner;
pub use normalize::canonical_key;
