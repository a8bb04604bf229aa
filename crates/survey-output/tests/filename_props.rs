use chrono::NaiveDate;
use proptest::prelude::*;
use survey_model::ExportFormat;
use survey_output::{generate_filename_at, sanitize_base_name};

proptest! {
    #[test]
    fn sanitized_names_only_hold_safe_chars(base in ".*") {
        let safe = sanitize_base_name(&base);
        prop_assert!(!safe.is_empty());
        prop_assert!(safe.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()));
        prop_assert!(!safe.contains(['/', '\\', ':', ' ', '.']));
    }

    #[test]
    fn filenames_are_deterministic(base in "[a-zA-Z0-9 _/:-]{0,24}", secs in 0u32..86_400) {
        let when = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(secs / 3600, (secs / 60) % 60, secs % 60)
            .unwrap();
        let first = generate_filename_at(&base, ExportFormat::Csv, when);
        let second = generate_filename_at(&base, ExportFormat::Csv, when);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.ends_with(".csv"));
    }

    #[test]
    fn word_characters_pass_through(base in "[a-zA-Z0-9][a-zA-Z0-9_-]{0,20}") {
        prop_assert_eq!(sanitize_base_name(&base), base);
    }
}
