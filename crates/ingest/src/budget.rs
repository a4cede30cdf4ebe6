/// Estimate token count (rough: 1.3 tokens per word).
pub fn estimate_units(text: &str) -> usize {
    let word_count = text.split_whitespace().count();
    (word_count as f64 * 1.3) as usize
}

/// Bounds report text to a model context budget by keeping a line-wise
/// prefix of the input.
pub struct TokenBudgeter {
    max_units: usize,
}

impl TokenBudgeter {
    pub fn new(max_units: usize) -> Self {
        Self { max_units }
    }

    /// Returns the input unchanged when it fits the budget. Otherwise
    /// accumulates whole lines in original order and stops before the
    /// first line that would exceed the budget. Lines are never split,
    /// so a first line that alone exceeds the budget yields an empty
    /// string.
    ///
    /// The check accumulates raw word counts and re-estimates the whole
    /// kept prefix at each step; summing per-line estimates would
    /// under-count the joined prefix and admit text over budget.
    pub fn bound(&self, text: &str) -> String {
        if estimate_units(text) <= self.max_units {
            return text.to_string();
        }

        let mut kept: Vec<&str> = Vec::new();
        let mut total_words = 0;

        for line in text.lines() {
            let line_words = line.split_whitespace().count();
            let prefix_units = ((total_words + line_words) as f64 * 1.3) as usize;
            if prefix_units > self.max_units {
                break;
            }
            kept.push(line);
            total_words += line_words;
        }

        kept.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_budget_unchanged() {
        let budgeter = TokenBudgeter::new(1000);
        let text = "one two three\nfour five six";
        assert_eq!(budgeter.bound(text), text);
    }

    #[test]
    fn test_budget_invariant() {
        let budgeter = TokenBudgeter::new(10);
        let text = (0..20)
            .map(|i| format!("line {} alpha beta gamma", i))
            .collect::<Vec<_>>()
            .join("\n");
        let bounded = budgeter.bound(&text);
        assert!(estimate_units(&bounded) <= 10);
    }

    #[test]
    fn test_budget_invariant_holds_across_many_short_lines() {
        // Short lines lose the most to per-line flooring, so a prefix
        // of many of them is where the joined estimate can creep over
        // the budget if lines are costed independently.
        let budgeter = TokenBudgeter::new(35);
        let text = (0..12)
            .map(|i| format!("short line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let bounded = budgeter.bound(&text);
        assert!(
            estimate_units(&bounded) <= 35,
            "kept prefix estimates to {} units, budget was 35",
            estimate_units(&bounded)
        );
    }

    #[test]
    fn test_prefix_invariant() {
        let budgeter = TokenBudgeter::new(8);
        let text = "alpha beta gamma\ndelta epsilon\nzeta eta theta iota";
        let bounded = budgeter.bound(&text);

        let original: Vec<&str> = text.lines().collect();
        let kept: Vec<&str> = bounded.lines().collect();
        assert!(kept.len() <= original.len());
        assert_eq!(&original[..kept.len()], &kept[..]);
    }

    #[test]
    fn test_never_splits_a_line() {
        let budgeter = TokenBudgeter::new(5);
        // First line is ~5 units, second would push past the budget.
        let text = "one two three four\nfive six seven eight";
        assert_eq!(budgeter.bound(text), "one two three four");
    }

    #[test]
    fn test_oversized_first_line_yields_empty() {
        let budgeter = TokenBudgeter::new(3);
        let text = "this single line has far too many words to ever fit";
        assert_eq!(budgeter.bound(text), "");
    }
}
