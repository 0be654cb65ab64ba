//! Property tests for the line scanner.

use proptest::prelude::*;
use repdoc_babel::formats::markdown::ScanRules;
use repdoc_babel::ir::stats::DocumentStats;
use repdoc_babel::parse_report;

fn report_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Zа-яА-Я0-9 .,*]{0,24}",
        "#{1,7} [a-zA-Zа-я]{1,12}",
        "[-−] [a-zа-я ]{0,12}",
        "[0-9]{1,2}\\. [a-zа-я ]{0,12}",
        Just("---".to_string()),
        Just(String::new()),
    ]
}

proptest! {
    #[test]
    fn every_non_blank_line_is_one_block(lines in prop::collection::vec(report_line(), 0..24)) {
        let source = lines.join("\n");
        let doc = parse_report(&source, &ScanRules::default()).unwrap();
        let non_blank = lines.iter().filter(|l| !l.trim().is_empty()).count();
        prop_assert_eq!(DocumentStats::collect(&doc).paragraph_blocks(), non_blank);
    }

    #[test]
    fn headings_never_exceed_the_limit(level in 1usize..9, text in "[a-z]{1,8}") {
        let source = format!("{} {}\n", "#".repeat(level), text);
        let rules = ScanRules { max_heading_level: 3, ..ScanRules::default() };
        let doc = parse_report(&source, &rules).unwrap();
        let heading = doc.headings().next().unwrap();
        prop_assert_eq!(heading.level, level.min(3));
    }
}
