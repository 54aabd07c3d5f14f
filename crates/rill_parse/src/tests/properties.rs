//! Position invariants over random character input.

mod proptest_positions {
    use proptest::prelude::*;
    use rill_ir::Value;

    use super::super::{Fixture, matched};

    fn leading(s: &str, c: char) -> usize {
        s.chars().take_while(|&x| x == c).count()
    }

    proptest! {
        #[test]
        fn test_greedy_runs_stop_at_first_mismatch(s in "[ab]{0,12}") {
            let mut fx = Fixture::new().partial();
            let a = leading(&s, 'a');
            let b = leading(&s[a..], 'b');
            prop_assert_eq!(fx.parse_text(&s, r#"any "a" any "b""#).unwrap(), matched(a + b));
        }

        #[test]
        fn test_ahead_never_moves(s in "[ab]{0,12}") {
            let mut fx = Fixture::new().partial();
            prop_assert_eq!(fx.parse_text(&s, "ahead [any skip]").unwrap(), matched(0));
        }

        #[test]
        fn test_copy_captures_matched_span(s in "[ab]{0,12}") {
            let mut fx = Fixture::new().partial();
            let a = leading(&s, 'a');
            prop_assert!(fx.matches_text(&s, r#"copy x any "a""#));
            prop_assert_eq!(fx.var("x"), Some(Value::text(&s[..a])));
        }

        #[test]
        fn test_skip_all_matches_length(s in "[a-z]{0,16}") {
            let mut fx = Fixture::new();
            prop_assert_eq!(fx.parse_text(&s, "any skip").unwrap(), matched(s.len()));
        }

        #[test]
        fn test_thru_lands_after_first_occurrence(s in "[ab]{0,12}") {
            let mut fx = Fixture::new().partial();
            let result = fx.parse_text(&s, r#"thru "b""#);
            match s.find('b') {
                Some(i) => prop_assert_eq!(result.unwrap(), matched(i + 1)),
                None => prop_assert!(result.is_err()),
            }
        }
    }
}
