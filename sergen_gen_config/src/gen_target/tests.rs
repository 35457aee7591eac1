#[cfg(test)]
mod tests {
    use crate::target_set::TargetSet;
    use crate::{
        AmbiguityPolicy, DESERIALIZE_METHOD, DESERIALIZE_SIGNATURE, GenTargetExt, MarkerMethod,
        MethodMatch, Normalization, SERIALIZE_METHOD, SERIALIZE_SIGNATURE, method_matcher,
    };

    #[test]
    fn test_default_target_markers() {
        let mut targets = TargetSet::new();

        targets.gen_target().target_named("stock").build();

        assert_eq!(targets.targets.len(), 1);
        let target = &targets.targets[0];
        assert_eq!(target.name, "stock");
        assert_eq!(target.serialize_marker.name, SERIALIZE_METHOD);
        assert_eq!(target.serialize_marker.type_spelling, SERIALIZE_SIGNATURE);
        assert_eq!(target.deserialize_marker.name, DESERIALIZE_METHOD);
        assert_eq!(target.deserialize_marker.type_spelling, DESERIALIZE_SIGNATURE);
        assert_eq!(target.normalization, Normalization::Exact);
        assert_eq!(target.ambiguity, AmbiguityPolicy::FirstMatch);
    }

    #[test]
    fn test_marker_and_policy_overrides() {
        let mut targets = TargetSet::new();

        targets
            .gen_target()
            .target_named("packed_records")
            .serialize_marker("pack", "void (char *&) const")
            .deserialize_marker("unpack", "void (char *&)")
            .normalization(Normalization::CollapseWhitespace)
            .on_ambiguity(AmbiguityPolicy::Reject)
            .build();

        assert_eq!(targets.targets.len(), 1);
        let target = &targets.targets[0];
        assert_eq!(target.serialize_marker.name, "pack");
        assert_eq!(target.deserialize_marker.name, "unpack");
        assert_eq!(target.normalization, Normalization::CollapseWhitespace);
        assert_eq!(target.ambiguity, AmbiguityPolicy::Reject);
    }

    #[test]
    fn test_multiple_targets() {
        let mut targets = TargetSet::new();

        targets.gen_target().target_named("first").build();
        targets
            .gen_target()
            .target_named("second")
            .serialize_marker("pack", "void (char *&) const")
            .build();

        assert_eq!(targets.targets.len(), 2);
        assert_eq!(targets.targets[0].name, "first");
        assert_eq!(targets.targets[1].name, "second");
        assert_eq!(targets.targets[1].serialize_marker.name, "pack");
    }

    #[test]
    fn test_is_method_builds_positive_conjunction() {
        let built = method_matcher(|m| m.is_method("serialize", "void (char *&) const"));

        if let MethodMatch::AndMatches(left, right) = built {
            if let MethodMatch::NameEquals(name) = *left {
                assert_eq!(name, "serialize");
            } else {
                panic!("Expected NameEquals on the left of the conjunction");
            }
            if let MethodMatch::SignatureEquals(spelling) = *right {
                assert_eq!(spelling, "void (char *&) const");
            } else {
                panic!("Expected SignatureEquals on the right of the conjunction");
            }
        } else {
            panic!("Expected AndMatches at top level");
        }
    }

    #[test]
    fn test_marker_to_match_agrees_with_dsl() {
        let marker = MarkerMethod::new("serialize", "void (char *&) const");
        let from_marker = marker.to_match();
        let from_dsl = method_matcher(|m| m.is_method("serialize", "void (char *&) const"));

        assert_eq!(from_marker, from_dsl);
    }

    #[test]
    fn test_exclusion_matchers() {
        // The subtractive forms: "wrong name" and "wrong signature"
        let wrong_name = method_matcher(|m| m.named("serialize").not());
        let wrong_signature = method_matcher(|m| m.with_signature("void (char *&)").not());

        assert!(matches!(wrong_name, MethodMatch::NotMatch(_)));
        if let MethodMatch::NotMatch(inner) = wrong_signature {
            assert!(matches!(*inner, MethodMatch::SignatureEquals(_)));
        } else {
            panic!("Expected NotMatch at top level");
        }
    }

    #[test]
    fn test_complex_method_matcher() {
        // A matcher that accepts either of two marker spellings
        let built = method_matcher(|m| {
            m.is_method("serialize", "void (char *&) const")
                .or(m.is_method("pack", "void (char *&) const"))
        });

        assert!(matches!(built, MethodMatch::OrMatches(_, _)));
    }
}
