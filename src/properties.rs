//! Property-based tests for the pipeline building blocks.
//!
//! # Properties Tested
//!
//! 1. **Merge invariant** - merged subwords never repeat a level twice in a
//!    row and concatenate to the builder's string
//! 2. **Reset** - a reset builder is empty
//! 3. **Verbose idempotence** - stripping a stripped pattern changes nothing
//! 4. **Escaped space** - `\ ` survives stripping, bare whitespace does not
//! 5. **Safe capture** - negative offsets always give `""`
//! 6. **Markers** - only one-character markers are accepted

#[cfg(test)]
mod tests {
    use crate::capture::{captured, safe_slice};
    use crate::error::SpecError;
    use crate::hgl::{DictSection, Hgl, ListSection};
    use crate::rule::{Rule, Vars};
    use crate::spec::Spec;
    use crate::subword::{Builder, Subword};
    use crate::verbose::{compile_verbose, strip_verbose};
    use crate::Stage;
    use proptest::prelude::*;

    // ========================================================================
    // Proptest Generators
    // ========================================================================

    fn arb_subword() -> impl Strategy<Value = Subword> {
        ("[a-z가-힣]{0,4}", 0usize..4).prop_map(|(word, level)| Subword::new(word, level))
    }

    fn arb_subwords() -> impl Strategy<Value = Vec<Subword>> {
        prop::collection::vec(arb_subword(), 0..16)
    }

    /// Verbose patterns built from harmless atoms, comments and whitespace.
    fn arb_verbose() -> impl Strategy<Value = String> {
        let atom = prop_oneof![
            Just("a".to_string()),
            Just("[bc]".to_string()),
            Just("\\ ".to_string()),
            Just("(d|e)".to_string()),
            Just(" ".to_string()),
            Just("\n\t".to_string()),
            Just("--- note\n".to_string()),
            Just("x?".to_string()),
        ];
        prop::collection::vec(atom, 0..12).prop_map(|atoms| atoms.concat())
    }

    fn config_with_marker(marker: &str) -> Hgl {
        Hgl::new()
            .with("lang", DictSection::new().with("id", ["prop"]))
            .with("config", DictSection::new().with("markers", [marker]))
            .with("rewrite", ListSection::new())
            .with("hangulize", ListSection::new())
    }

    // ========================================================================
    // Builder
    // ========================================================================

    proptest! {
        #[test]
        fn prop_subwords_merge_invariant(chunks in prop::collection::vec(arb_subwords(), 0..4)) {
            let mut builder = Builder::new();
            for chunk in chunks {
                builder.append(chunk);
            }

            let merged = builder.subwords();
            for pair in merged.windows(2) {
                prop_assert_ne!(pair[0].level, pair[1].level);
            }

            let joined: String = merged.iter().map(|sw| sw.word.as_str()).collect();
            prop_assert_eq!(joined, builder.to_string());
        }

        #[test]
        fn prop_subwords_keep_level_order(subwords in arb_subwords()) {
            let mut builder = Builder::new();
            builder.append(subwords.clone());

            let mut levels: Vec<usize> = subwords.iter().map(|sw| sw.level).collect();
            levels.dedup();
            let merged: Vec<usize> = builder.subwords().iter().map(|sw| sw.level).collect();
            prop_assert_eq!(merged, levels);
        }

        #[test]
        fn prop_reset_empties(subwords in arb_subwords()) {
            let mut builder = Builder::new();
            builder.append(subwords);
            builder.reset();

            prop_assert_eq!(builder.to_string(), "");
            prop_assert!(builder.subwords().is_empty());
        }
    }

    // ========================================================================
    // Verbose patterns
    // ========================================================================

    proptest! {
        #[test]
        fn prop_strip_idempotent(verbose in arb_verbose()) {
            let once = strip_verbose(&verbose);
            prop_assert_eq!(strip_verbose(&once), once);
        }

        #[test]
        fn prop_recompile_equivalent(verbose in arb_verbose(), subject in "[a-e x]{0,8}") {
            let first = compile_verbose(&verbose).unwrap();
            let second = compile_verbose(first.as_str()).unwrap();
            prop_assert_eq!(first.find(&subject), second.find(&subject));
        }

        #[test]
        fn prop_only_escaped_whitespace_survives(verbose in arb_verbose()) {
            let stripped = strip_verbose(&verbose);
            let escaped = verbose.matches("\\ ").count();
            prop_assert_eq!(stripped.matches(' ').count(), escaped);
            prop_assert!(!stripped.contains('\n'));
            prop_assert!(!stripped.contains('\t'));
        }

        #[test]
        fn prop_rule_compile_uses_stripped_pattern(verbose in arb_verbose()) {
            let pair = crate::hgl::Pair::new(verbose.clone(), "");
            let rule = Rule::compile(Stage::Rewrite, 0, &pair, &Vars::default()).unwrap();
            prop_assert_eq!(rule.regex().as_str(), strip_verbose(&verbose));
            prop_assert_eq!(rule.pattern(), verbose.as_str());
        }
    }

    // ========================================================================
    // Safe capture
    // ========================================================================

    proptest! {
        #[test]
        fn prop_negative_offsets_are_empty(
            subject in ".{0,12}",
            start in -20isize..20,
            stop in -20isize..20,
            group in 0usize..3,
        ) {
            let mut offsets = [0, subject.len() as isize].repeat(3);
            offsets[group * 2] = -1;
            offsets[group * 2 + 1] = stop;
            prop_assert_eq!(captured(&subject, &offsets, group), "");

            if start < 0 || stop < 0 {
                prop_assert_eq!(safe_slice(&subject, start, stop), "");
            }
        }

        #[test]
        fn prop_safe_slice_never_panics(
            subject in ".{0,12}",
            start in -20isize..40,
            stop in -20isize..40,
        ) {
            let slice = safe_slice(&subject, start, stop);
            prop_assert!(slice.len() <= subject.len());
        }
    }

    // ========================================================================
    // Markers
    // ========================================================================

    proptest! {
        #[test]
        fn prop_single_char_markers_accepted(marker in any::<char>()) {
            let spec = Spec::parse(&config_with_marker(&marker.to_string())).unwrap();
            prop_assert_eq!(spec.config().markers(), &[marker][..]);
        }

        #[test]
        fn prop_other_markers_rejected(marker in "(.{2,4})?") {
            let result = Spec::parse(&config_with_marker(&marker));
            let rejected = matches!(result, Err(SpecError::InvalidMarker { .. }));
            prop_assert!(rejected);
        }
    }
}
