/// Finds the `{name}` placeholders in a string, in order of appearance.
///
/// Placeholders do not nest: an opening brace that appears before the
/// previous one was closed restarts the token, so `"{a{b}"` yields `b`.
/// Duplicates are kept, and `{}` yields an empty name.
pub fn extract_placeholders(text: &str) -> Vec<String> {
    let mut placeholders = Vec::new();
    let mut open: Option<usize> = None;

    for (i, c) in text.char_indices() {
        match c {
            '{' => open = Some(i + c.len_utf8()),
            '}' => {
                if let Some(start) = open.take() {
                    placeholders.push(text[start..i].to_string());
                }
            }
            _ => {}
        }
    }

    placeholders
}
