use crate::stats::LoweringStats;

#[test]
fn test_empty_report() {
    assert_eq!(
        LoweringStats::default().to_string(),
        "n/a const/let ratio (0 consts, 0 lets)\n"
    );
}

#[test]
fn test_ratio_formatting() {
    let mut stats = LoweringStats::default();
    stats.declarator(true);
    assert_eq!(stats.ratio(), "∞");

    stats.declarator(false);
    stats.declarator(false);
    assert_eq!(stats.ratio(), "0.50x");

    let stats = LoweringStats {
        consts: 3,
        lets: 1,
        ..LoweringStats::default()
    };
    assert_eq!(stats.ratio(), "3.0x");

    let stats = LoweringStats {
        consts: 24,
        lets: 2,
        ..LoweringStats::default()
    };
    assert_eq!(stats.ratio(), "12x");

    let stats = LoweringStats {
        consts: 1,
        lets: 3,
        ..LoweringStats::default()
    };
    assert_eq!(stats.ratio(), "0.33x");

    let stats = LoweringStats {
        consts: 300,
        lets: 1,
        ..LoweringStats::default()
    };
    assert_eq!(stats.ratio(), "3.0e+2x");
}

#[test]
fn test_renames_are_listed_by_line() {
    let mut stats = LoweringStats::default();
    stats.declarator(false);
    stats.declarator(true);
    stats.rename("b", "b$0", 9);
    stats.rename("a", "a$0", 4);
    assert_eq!(
        stats.to_string(),
        "1.0x const/let ratio (1 consts, 1 lets)\nline 4: a => a$0\nline 9: b => b$0\n"
    );
}
