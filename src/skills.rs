//! Skills column layout planning.

/// Parse a skills layout specification into columns of category labels.
///
/// `|` separates columns and `,` separates categories within a column;
/// surrounding whitespace is trimmed. `"Languages, Frameworks|Tools"` yields
/// `[["Languages", "Frameworks"], ["Tools"]]`.
pub fn parse_skills_layout(layout: &str) -> Vec<Vec<String>> {
    layout
        .split('|')
        .map(|column| {
            column
                .split(',')
                .map(|category| category.trim().to_string())
                .collect()
        })
        .collect()
}
