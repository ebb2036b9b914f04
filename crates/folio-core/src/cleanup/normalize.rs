use regex::Regex;
use std::sync::LazyLock;

static CONTROL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F-\x9F]").unwrap());

static HORIZONTAL_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// Clean one page of raw backend text.
///
/// Steps:
/// 1. Unify line endings and strip control characters (tab and newline survive)
/// 2. Collapse runs of spaces/tabs to a single space
/// 3. Drop page-number lines (1-3 digits) and near-empty lines (<= 2 chars)
/// 4. Keep whitespace-only lines as blank separators, at most one in a row
///
/// The result is stable under a second pass: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let stripped = CONTROL_CHARS.replace_all(&unified, "");
    let spaced = HORIZONTAL_SPACE.replace_all(&stripped, " ");

    let mut lines: Vec<&str> = Vec::new();
    let mut previous_blank = false;
    for line in spaced.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            // 3+ newlines collapse to 2, i.e. one blank separator line
            if !previous_blank {
                lines.push("");
            }
            previous_blank = true;
            continue;
        }
        if is_page_number(trimmed) || trimmed.chars().count() <= 2 {
            continue;
        }
        lines.push(line.trim_end());
        previous_blank = false;
    }

    lines.join("\n")
}

fn is_page_number(trimmed: &str) -> bool {
    trimmed.chars().count() <= 3 && trimmed.chars().all(|c| c.is_ascii_digit())
}
