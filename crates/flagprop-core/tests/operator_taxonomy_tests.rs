//! Golden tests for the operator taxonomy and name canonicalization

use flagprop_core::{acronym_run, pascal_to_snake, OperatorKind};

const GOLDEN: &[(&str, &str)] = &[
    ("Exact", "exact"),
    ("IsNot", "is_not"),
    ("Icontains", "icontains"),
    ("NotIcontains", "not_icontains"),
    ("Regex", "regex"),
    ("NotRegex", "not_regex"),
    ("Gt", "gt"),
    ("Gte", "gte"),
    ("Lt", "lt"),
    ("Lte", "lte"),
    ("IsSet", "is_set"),
    ("IsNotSet", "is_not_set"),
    ("IsDateExact", "is_date_exact"),
    ("IsDateBefore", "is_date_before"),
    ("IsDateAfter", "is_date_after"),
    ("SemverEq", "semver_eq"),
    ("SemverNeq", "semver_neq"),
    ("SemverGt", "semver_gt"),
    ("SemverGte", "semver_gte"),
    ("SemverLt", "semver_lt"),
    ("SemverLte", "semver_lte"),
    ("SemverTilde", "semver_tilde"),
    ("SemverCaret", "semver_caret"),
    ("SemverWildcard", "semver_wildcard"),
    ("FlagEvaluatesTo", "flag_evaluates_to"),
    ("InCohort", "in_cohort"),
    ("NotInCohort", "not_in_cohort"),
];

#[test]
fn test_golden_table_covers_every_operator() {
    assert_eq!(GOLDEN.len(), OperatorKind::ALL.len());

    for op in OperatorKind::ALL {
        let variant = format!("{:?}", op);
        let entry = GOLDEN
            .iter()
            .find(|(pascal, _)| *pascal == variant)
            .unwrap_or_else(|| panic!("{} missing from golden table", variant));
        assert_eq!(entry.1, op.wire_name());
    }
}

#[test]
fn test_golden_table_canonicalization() {
    for (pascal, snake) in GOLDEN {
        assert_eq!(pascal_to_snake(pascal), *snake, "canonicalizing {}", pascal);
    }
}

#[test]
fn test_variant_names_have_no_acronym_runs() {
    for op in OperatorKind::ALL {
        let variant = format!("{:?}", op);
        assert_eq!(acronym_run(&variant), None, "{} would under-split", variant);
    }
}

#[test]
fn test_serde_and_canonicalization_agree() {
    for op in OperatorKind::ALL {
        let serde_name = serde_json::to_value(op).unwrap();
        assert_eq!(serde_name, pascal_to_snake(&format!("{:?}", op)));
    }
}

#[test]
fn test_required_minimum_set_present() {
    let required = [
        "exact",
        "is_not",
        "icontains",
        "not_icontains",
        "regex",
        "not_regex",
        "gt",
        "gte",
        "lt",
        "lte",
        "is_set",
        "is_not_set",
        "is_date_before",
        "is_date_after",
        "is_date_exact",
        "semver_gt",
        "semver_gte",
        "semver_lt",
        "semver_lte",
        "semver_eq",
        "flag_evaluates_to",
        "in_cohort",
        "not_in_cohort",
    ];

    for name in required {
        assert!(OperatorKind::from_wire(name).is_ok(), "missing {}", name);
    }

    for query_only in ["between", "not_between", "min", "max", "is_cleaned_path_exact"] {
        assert!(OperatorKind::from_wire(query_only).is_err(), "{} should not exist", query_only);
    }
}
