use crate::report::{GenerationReport, SkipReason};
use anyhow::{Context, Result};
use sergen_common::{DeclarationMap, Structure};
use sergen_gen_config::{GenTarget, TargetSet};
use sergen_gen_impl::{
    find_marker, generate_serialization_methods, generate_unit_banner, partition_declarations,
    qualifying_type_names,
};
use std::io::Write;

/// Drives one filter-and-generate pass over a declaration map.
///
/// All generated code goes through the single sink the caller supplies, so
/// emitted units never interleave; the pipeline performs no other I/O.
pub struct Pipeline {
    targets: TargetSet,
}

impl Pipeline {
    pub fn new(targets: TargetSet) -> Self {
        Self { targets }
    }

    /// A pipeline with the stock serialize/deserialize target
    pub fn with_default_target() -> Self {
        let mut targets = TargetSet::new();
        targets.push(GenTarget::default());
        Self::new(targets)
    }

    /// Runs every configured target over the map, emitting code for each
    /// qualifying structure into `out`, and returns what happened.
    ///
    /// Fails on sink write errors and, for targets with
    /// `AmbiguityPolicy::Reject`, on duplicate marker matches. A failed
    /// run leaves the sink incomplete and must not be treated as
    /// successful.
    pub fn run(&self, map: &DeclarationMap, out: &mut dyn Write) -> Result<GenerationReport> {
        let mut report = GenerationReport::new(&map.translation_unit);

        generate_unit_banner(out, &map.translation_unit)
            .context("Failed to write the generated-file banner")?;

        for target in &self.targets.targets {
            let partition = partition_declarations(map, target)
                .context(format!("Partitioning failed for target '{}'", target.name))?;
            let nested = qualifying_type_names(map, &partition);

            for id in &partition.generate {
                if let Some(structure) = map.get(id) {
                    generate_serialization_methods(out, structure, target, &nested).context(
                        format!("Code generation failed for structure '{}'", structure.name),
                    )?;
                    report.record_generated(&target.name, &structure.name);
                }
            }

            for id in &partition.skipped {
                if let Some(structure) = map.get(id) {
                    if let Some(reason) = skip_reason(structure, target) {
                        report.record_skipped(&target.name, &structure.name, reason);
                    }
                }
            }
        }

        Ok(report)
    }
}

// A skipped structure is missing one marker or both; name which.
fn skip_reason(structure: &Structure, target: &GenTarget) -> Option<SkipReason> {
    let has_serialize =
        find_marker(structure, &target.serialize_marker, target.normalization).is_match();
    let has_deserialize =
        find_marker(structure, &target.deserialize_marker, target.normalization).is_match();

    match (has_serialize, has_deserialize) {
        (true, true) => None,
        (false, true) => Some(SkipReason::MissingSerialize),
        (true, false) => Some(SkipReason::MissingDeserialize),
        (false, false) => Some(SkipReason::MissingBoth),
    }
}
