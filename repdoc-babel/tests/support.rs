//! Fixtures and the report rules shared by the integration tests.

use repdoc_babel::formats::markdown::{HeadingRule, ScanRules};
use std::path::PathBuf;

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

fn rule(prefix: &str, level: usize, text: Option<&str>) -> HeadingRule {
    HeadingRule {
        prefix: prefix.to_string(),
        level,
        text: text.map(str::to_string),
    }
}

/// The scanner rules of the report profile, trimmed to what `report.md` uses.
pub fn report_rules() -> ScanRules {
    ScanRules {
        skip_prefixes: vec![
            "# ПОЯСНИТЕЛЬНАЯ ЗАПИСКА".to_string(),
            "## ОГЛАВЛЕНИЕ".to_string(),
            "---".to_string(),
        ],
        heading_rules: vec![
            rule("## ВВЕДЕНИЕ", 1, Some("Введение")),
            rule("## 1. ОПИСАНИЕ ПРОГРАММЫ", 1, Some("1. Описание программы")),
            rule("### 1.1.", 2, None),
            rule("#### 1.1.1.", 3, None),
            rule(
                "## 2. СТРУКТУРА",
                1,
                Some("2. Структура классов и их назначение в рамках проекта"),
            ),
            rule("### 2.1.", 2, None),
            rule("## ЗАКЛЮЧЕНИЕ", 1, Some("Заключение")),
            rule("## СПИСОК", 1, Some("Список использованных источников")),
        ],
        ..ScanRules::default()
    }
}
