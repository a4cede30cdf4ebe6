use regex::Regex;

/// Phrases the model emits when it hallucinates a live-browsing
/// limitation despite the full report being supplied inline.
const REFUSAL_MARKERS: &[&str] = &["don't have access", "cannot access", "cannot browse"];

/// True when the response claims lack of access instead of answering.
pub fn detect_refusal(response: &str) -> bool {
    let lowered = response.to_lowercase();
    REFUSAL_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Remove markdown code fences the model tends to wrap JSON in.
pub fn strip_code_fences(response: &str) -> String {
    let re = Regex::new(r"```json|```").unwrap();
    re.replace_all(response, "").trim().to_string()
}

/// First balanced `{...}` span in the text, or None. The model often
/// surrounds its JSON with prose, so parsing is attempted only on this
/// span. Braces inside JSON string literals are skipped.
pub fn extract_json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }

    None
}
