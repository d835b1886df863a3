//! Identifier normalization applied at ingestion time.
//!
//! Both functions are pure and borrow from their input.

/// Prefix carried by some CU references in the Breakdowns table.
pub const CU_REFERENCE_PREFIX: &str = "sc000";

/// Strip every leading `'0'` from a stock code.
///
/// `"000"` normalizes to `""`; callers must not treat that as a missing cell.
pub fn normalize_stock_code(raw: &str) -> &str {
    raw.trim_start_matches('0')
}

/// Strip a case-insensitive `sc000` prefix from a CU reference.
pub fn normalize_cu_reference(raw: &str) -> &str {
    match raw.get(..CU_REFERENCE_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(CU_REFERENCE_PREFIX) => {
            &raw[CU_REFERENCE_PREFIX.len()..]
        }
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_zeros_only() {
        assert_eq!(normalize_stock_code("007"), "7");
        assert_eq!(normalize_stock_code("1007"), "1007");
        assert_eq!(normalize_stock_code("70"), "70");
    }

    #[test]
    fn all_zero_code_becomes_empty() {
        assert_eq!(normalize_stock_code("000"), "");
    }

    #[test]
    fn prefix_match_ignores_case() {
        assert_eq!(normalize_cu_reference("SC000812"), "812");
        assert_eq!(normalize_cu_reference("sc000812"), "812");
        assert_eq!(normalize_cu_reference("Sc000ABC"), "ABC");
    }

    #[test]
    fn other_references_pass_through() {
        assert_eq!(normalize_cu_reference("SC00812"), "SC00812");
        assert_eq!(normalize_cu_reference("SC0"), "SC0");
        assert_eq!(normalize_cu_reference("X-SC000"), "X-SC000");
    }

    #[test]
    fn short_multibyte_input_is_not_split() {
        assert_eq!(normalize_cu_reference("éé"), "éé");
        assert_eq!(normalize_cu_reference("sc00é1"), "sc00é1");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: normalized codes never start with '0' and are a suffix of the input.
            #[test]
            fn stock_code_is_zero_free_suffix(raw in "[0-9A-Z]{0,12}") {
                let out = normalize_stock_code(&raw);
                prop_assert!(!out.starts_with('0'));
                prop_assert!(raw.ends_with(out));
            }

            /// Property: normalizing twice is the same as normalizing once.
            #[test]
            fn stock_code_is_idempotent(raw in "0{0,4}[0-9]{0,8}") {
                let once = normalize_stock_code(&raw);
                prop_assert_eq!(normalize_stock_code(once), once);
            }

            /// Property: prefixed references lose exactly five characters.
            #[test]
            fn prefixed_reference_drops_five_chars(rest in "[0-9A-Za-z]{0,10}") {
                let raw = format!("SC000{rest}");
                prop_assert_eq!(normalize_cu_reference(&raw), rest.as_str());
            }
        }
    }
}
