// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! The single seam through which all signature comparisons pass.
//!
//! Type spellings come from the front end as raw strings and are
//! whitespace-sensitive across tools ("void(char*&)" vs "void (char *&)").
//! Every comparison reduces both sides to a canonical key first; the
//! `Normalization` strategy on the target decides how much variation the
//! key absorbs.

use regex::Regex;
use sergen_gen_config::Normalization;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static AROUND_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([()*&,\[\]])\s*").expect("punctuation pattern is valid"));

/// Reduces a raw type spelling to the canonical key used for comparison.
///
/// `Exact` returns the spelling unchanged. `CollapseWhitespace` collapses
/// whitespace runs to a single space, strips whitespace adjacent to type
/// punctuation, and trims the ends, so "void(char*&)" and
/// "void (char *&)" share a key while "unsigned int" and a hypothetical
/// "unsignedint" typedef do not.
pub fn canonical_key(normalization: Normalization, spelling: &str) -> String {
    match normalization {
        Normalization::Exact => spelling.to_string(),
        Normalization::CollapseWhitespace => {
            let collapsed = WHITESPACE_RUN.replace_all(spelling, " ");
            let tightened = AROUND_PUNCTUATION.replace_all(&collapsed, "$1");
            tightened.trim().to_string()
        }
    }
}
