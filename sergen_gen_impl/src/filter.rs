use crate::normalize::canonical_key;
use anyhow::{Result, bail};
use sergen_common::{DeclarationId, DeclarationMap, Method, Structure};
use sergen_gen_config::{AmbiguityPolicy, GenTarget, MarkerMethod, MethodMatch, Normalization};
use std::collections::BTreeSet;

/// Result of searching one structure's methods for a marker.
///
/// Duplicate matches are reported explicitly rather than silently resolved;
/// the caller picks a policy (see `AmbiguityPolicy`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome<'a> {
    NoMatch,
    Unique(&'a Method),
    Ambiguous(Vec<&'a Method>),
}

impl MatchOutcome<'_> {
    /// Whether any method matched at all, regardless of multiplicity
    pub fn is_match(&self) -> bool {
        !matches!(self, MatchOutcome::NoMatch)
    }
}

/// The entries of a declaration map split by qualification
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Partition {
    pub generate: Vec<DeclarationId>,
    pub skipped: Vec<DeclarationId>,
}

/// Evaluates a method match description against a single method
pub fn evaluate_method_match(
    matcher: &MethodMatch,
    method: &Method,
    normalization: Normalization,
) -> bool {
    match matcher {
        MethodMatch::NameEquals(name) => method.name == *name,
        MethodMatch::SignatureEquals(spelling) => {
            canonical_key(normalization, &method.type_spelling)
                == canonical_key(normalization, spelling)
        }
        MethodMatch::AndMatches(left, right) => {
            evaluate_method_match(left, method, normalization)
                && evaluate_method_match(right, method, normalization)
        }
        MethodMatch::OrMatches(left, right) => {
            evaluate_method_match(left, method, normalization)
                || evaluate_method_match(right, method, normalization)
        }
        MethodMatch::NotMatch(inner) => !evaluate_method_match(inner, method, normalization),
    }
}

/// Searches a structure's methods for one marker.
///
/// The search walks the method list without modifying it, so repeated
/// queries against the same structure give the same answer.
pub fn find_marker<'a>(
    structure: &'a Structure,
    marker: &MarkerMethod,
    normalization: Normalization,
) -> MatchOutcome<'a> {
    let matcher = marker.to_match();
    let hits: Vec<&Method> = structure
        .methods
        .iter()
        .filter(|method| evaluate_method_match(&matcher, method, normalization))
        .collect();

    match hits.len() {
        0 => MatchOutcome::NoMatch,
        1 => MatchOutcome::Unique(hits[0]),
        _ => MatchOutcome::Ambiguous(hits),
    }
}

/// Returns true when no code should be generated for this structure:
/// it is missing the serialize marker, the deserialize marker, or both.
///
/// This is a pure function of the structure's method list; ambiguity policy
/// is applied separately during partitioning.
pub fn should_skip(structure: &Structure, target: &GenTarget) -> bool {
    let has_serialize =
        find_marker(structure, &target.serialize_marker, target.normalization).is_match();
    let has_deserialize =
        find_marker(structure, &target.deserialize_marker, target.normalization).is_match();

    !(has_serialize && has_deserialize)
}

/// Splits a declaration map into entries to generate code for and entries
/// to skip.
///
/// Under `AmbiguityPolicy::Reject`, a structure with more than one method
/// matching the same marker fails the whole partition, naming the structure
/// and the marker. Under `FirstMatch` duplicates qualify as usual.
pub fn partition_declarations(map: &DeclarationMap, target: &GenTarget) -> Result<Partition> {
    let mut partition = Partition::default();

    for (id, structure) in map.iter() {
        if target.ambiguity == AmbiguityPolicy::Reject {
            for marker in [&target.serialize_marker, &target.deserialize_marker] {
                if let MatchOutcome::Ambiguous(hits) =
                    find_marker(structure, marker, target.normalization)
                {
                    bail!(
                        "{} methods of '{}' match marker '{}' with signature '{}'; \
                         duplicate markers are rejected by target '{}'",
                        hits.len(),
                        structure.name,
                        marker.name,
                        marker.type_spelling,
                        target.name
                    );
                }
            }
        }

        if should_skip(structure, target) {
            partition.skipped.push(id.clone());
        } else {
            partition.generate.push(id.clone());
        }
    }

    Ok(partition)
}

/// The type names of every qualifying structure in the partition.
///
/// The generator consults this set to decide which fields delegate to their
/// own serialize/deserialize methods instead of being copied bytewise.
pub fn qualifying_type_names(map: &DeclarationMap, partition: &Partition) -> BTreeSet<String> {
    partition
        .generate
        .iter()
        .filter_map(|id| map.get(id))
        .map(|structure| structure.name.clone())
        .collect()
}
