use podcheck::predicates::{is_memory_quantity, is_registry_image, is_snake_case, parse_int};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn joined_lowercase_segments_are_snake_case(
        parts in prop::collection::vec("[a-z0-9]{1,6}", 1..5)
    ) {
        prop_assert!(is_snake_case(&parts.join("_")));
    }

    #[test]
    fn uppercase_breaks_snake_case(s in "[a-z0-9]{0,4}[A-Z][a-z0-9]{0,4}") {
        prop_assert!(!is_snake_case(&s));
    }

    #[test]
    fn doubled_underscore_breaks_snake_case(a in "[a-z]{1,4}", b in "[a-z]{1,4}") {
        let name = format!("{}__{}", a, b);
        prop_assert!(!is_snake_case(&name));
    }

    #[test]
    fn memory_quantity_accepts_binary_suffixes(
        n in 0u64..1_000_000,
        unit in prop::sample::select(vec!["Ki", "Mi", "Gi"])
    ) {
        let quantity = format!("{}{}", n, unit);
        prop_assert!(is_memory_quantity(&quantity));
    }

    #[test]
    fn memory_quantity_rejects_decimal_suffixes(
        n in 0u64..1_000_000,
        unit in prop::sample::select(vec!["K", "M", "G", "k", "mi", "Ti", ""])
    ) {
        let quantity = format!("{}{}", n, unit);
        prop_assert!(!is_memory_quantity(&quantity));
    }

    #[test]
    fn registry_images_with_generated_paths(
        path in "[a-z0-9]{1,5}(/[a-z0-9.-]{1,5}){0,3}",
        tag in "[A-Za-z0-9._-]{1,8}"
    ) {
        let image = format!("registry.bigbrother.io/{}:{}", path, tag);
        prop_assert!(is_registry_image(&image));
    }

    #[test]
    fn parse_int_agrees_with_i64(n in any::<i64>()) {
        prop_assert_eq!(parse_int(&n.to_string()), Some(n));
    }
}
