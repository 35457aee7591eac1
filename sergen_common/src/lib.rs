pub mod declarations;

// Make the model types visible without the module path
pub use declarations::{
    DECLARATIONS_FILE_SUFFIX, DeclarationId, DeclarationMap, Field, Method, SERGEN_DIR, Signature,
    Structure,
};
