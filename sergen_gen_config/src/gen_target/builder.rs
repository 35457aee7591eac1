// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use super::types::{AmbiguityPolicy, GenTarget, MarkerMethod, Normalization};
use crate::target_set::TargetSet;

/// Extension trait that adds target building capabilities to TargetSet
pub trait GenTargetExt {
    /// Start building a generation target
    fn gen_target(&mut self) -> GenTargetBuilder<'_>;
}

impl GenTargetExt for TargetSet {
    fn gen_target(&mut self) -> GenTargetBuilder<'_> {
        GenTargetBuilder { parent: self }
    }
}

/// Initial builder for creating a generation target
pub struct GenTargetBuilder<'a> {
    parent: &'a mut TargetSet,
}

impl<'a> GenTargetBuilder<'a> {
    /// Give the target a name. Markers and policies start from the stock
    /// serialize/deserialize defaults.
    pub fn target_named(self, name: impl Into<String>) -> TargetConstraintBuilder<'a> {
        let defaults = GenTarget::default();
        TargetConstraintBuilder {
            parent: self.parent,
            name: name.into(),
            serialize_marker: defaults.serialize_marker,
            deserialize_marker: defaults.deserialize_marker,
            normalization: defaults.normalization,
            ambiguity: defaults.ambiguity,
        }
    }
}

/// Builder for adjusting markers and policies on a target
pub struct TargetConstraintBuilder<'a> {
    parent: &'a mut TargetSet,
    name: String,
    serialize_marker: MarkerMethod,
    deserialize_marker: MarkerMethod,
    normalization: Normalization,
    ambiguity: AmbiguityPolicy,
}

impl<'a> TargetConstraintBuilder<'a> {
    /// Override the serialize marker
    ///
    /// # Example
    /// ```
    /// use sergen_gen_config::{TargetSet, GenTargetExt};
    /// let mut targets = TargetSet::new();
    /// targets.gen_target()
    ///     .target_named("packed_records")
    ///     .serialize_marker("pack", "void (char *&) const")
    ///     .deserialize_marker("unpack", "void (char *&)")
    ///     .build();
    /// ```
    pub fn serialize_marker(
        mut self,
        name: impl Into<String>,
        type_spelling: impl Into<String>,
    ) -> Self {
        self.serialize_marker = MarkerMethod::new(name, type_spelling);
        self
    }

    /// Override the deserialize marker
    pub fn deserialize_marker(
        mut self,
        name: impl Into<String>,
        type_spelling: impl Into<String>,
    ) -> Self {
        self.deserialize_marker = MarkerMethod::new(name, type_spelling);
        self
    }

    /// Set the signature normalization strategy
    pub fn normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Set the policy for duplicate marker matches
    pub fn on_ambiguity(mut self, ambiguity: AmbiguityPolicy) -> Self {
        self.ambiguity = ambiguity;
        self
    }

    /// Finalize the target and return to the parent set
    pub fn build(self) -> &'a mut TargetSet {
        let target = GenTarget {
            name: self.name,
            serialize_marker: self.serialize_marker,
            deserialize_marker: self.deserialize_marker,
            normalization: self.normalization,
            ambiguity: self.ambiguity,
        };
        self.parent.push(target);
        self.parent
    }
}
