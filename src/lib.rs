//!
//! sergen
//! Generates C++ binary serialization accessors for structures a
//! libclang-style front end has already parsed.
//!
//! A front end walks a translation unit and dumps every candidate
//! structure - its member methods with their exact type spellings, and
//! its fields in declaration order - into a `DeclarationMap`. A structure
//! qualifies for generated code when it declares the two marker method
//! stubs a `GenTarget` describes: by default `serialize` with signature
//! `void (char *&) const` and `deserialize` with `void (char *&)`. For
//! each qualifying structure the pipeline emits the two method
//! definitions, marshalling fields to and from a raw buffer cursor in
//! declaration order, delegating to nested qualifying structures rather
//! than flattening them.
//!
//! The host program owns everything around the pipeline: invoking the
//! front end, choosing the output sink, and argument handling. This crate
//! only decides and emits.
//!
//! ```
//! use sergen::{DeclarationId, DeclarationMap, Field, Method, Pipeline, Structure};
//!
//! let mut map = DeclarationMap::new();
//! map.translation_unit = "telemetry".to_string();
//! map.insert(
//!     DeclarationId::new("c:@S@PacketHeader"),
//!     Structure::new("PacketHeader")
//!         .with_methods(vec![
//!             Method::new("serialize", "void (char *&) const"),
//!             Method::new("deserialize", "void (char *&)"),
//!         ])
//!         .with_fields(vec![Field::new("apid", "uint16_t")]),
//! );
//!
//! let mut generated = Vec::new();
//! let report = Pipeline::with_default_target()
//!     .run(&map, &mut generated)
//!     .expect("generation succeeds");
//! assert_eq!(report.generated_count(), 1);
//! ```

mod pipeline;
mod report;

pub use pipeline::Pipeline;
pub use report::{GenerationReport, SkipReason, StructureOutcome};

// Surface the member crates' core types at the facade
pub use sergen_common::{
    DeclarationId, DeclarationMap, Field, Method, Signature, Structure,
};
pub use sergen_gen_config::{
    AmbiguityPolicy, GenTarget, GenTargetExt, MarkerMethod, Normalization, TargetSet,
};
