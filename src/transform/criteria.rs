const BULLET_CHARS: &[char] = &['•', '-', '*', '→', '►', '▪', '▸', ' '];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Outside,
    Inside,
}

/// Pull the acceptance criteria list out of a plain-text description.
///
/// The section starts after any line mentioning "acceptance" and runs until a
/// line that looks like the heading of another section (capitalized and
/// containing a colon) or until the end of the text. Bullet glyphs and
/// numbered-list prefixes are stripped from each item.
pub fn extract_acceptance_criteria(description: &str) -> Vec<String> {
    let mut criteria = Vec::new();
    let mut section = Section::Outside;

    for line in description.split('\n').map(str::trim) {
        // A marker inside an open section keeps it open and is not an item.
        if is_section_marker(line) {
            section = Section::Inside;
            continue;
        }
        if section == Section::Outside || line.is_empty() {
            continue;
        }
        if starts_new_section(line) {
            break;
        }
        let cleaned = clean_item(line);
        if !cleaned.is_empty() {
            criteria.push(cleaned.to_string());
        }
    }

    criteria
}

fn is_section_marker(line: &str) -> bool {
    line.to_lowercase().contains("acceptance")
}

fn starts_new_section(line: &str) -> bool {
    line.chars().next().is_some_and(char::is_uppercase) && line.contains(':')
}

fn clean_item(line: &str) -> &str {
    let item = line.trim_start_matches(BULLET_CHARS);
    let item = if item.starts_with(|c: char| c.is_ascii_digit()) {
        item.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ')')
    } else {
        item
    };
    item.trim()
}
