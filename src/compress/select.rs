//! Greedy first-fit selection of ranked units.

use crate::compress::Budget;
use crate::io::{char_count, truncate_chars};
use crate::search::{ScoredUnit, sort_by_relevance};

/// Packs the highest-scoring units into `budget`.
///
/// Units are sorted by descending score (ties keep input order) and
/// appended in that order, joined by `separator` and followed by
/// `terminator`. Packing stops at the first unit that would overflow the
/// budget; later, smaller units are not considered.
///
/// With a character budget the result never exceeds the budget. If not
/// even the top unit fits, the top unit is truncated to the budget.
///
/// # Examples
///
/// ```
/// use ti_compress::compress::{Budget, greedy_pack};
/// use ti_compress::search::ScoredUnit;
///
/// let units = vec![
///     ScoredUnit { index: 0, text: "low", score: 0.1 },
///     ScoredUnit { index: 1, text: "high", score: 0.9 },
/// ];
/// assert_eq!(greedy_pack(units.clone(), Budget::Units(1), " ", ""), "high");
/// assert_eq!(greedy_pack(units, Budget::Chars(8), " ", ""), "high low");
/// ```
#[must_use]
pub fn greedy_pack(
    mut units: Vec<ScoredUnit<'_>>,
    budget: Budget,
    separator: &str,
    terminator: &str,
) -> String {
    sort_by_relevance(&mut units);

    match budget {
        Budget::Units(max_units) => {
            if max_units == 0 || units.is_empty() {
                return String::new();
            }
            let selected: Vec<&str> = units.iter().take(max_units).map(|u| u.text).collect();
            let mut out = selected.join(separator);
            out.push_str(terminator);
            out
        }
        Budget::Chars(max_chars) => pack_chars(&units, max_chars, separator, terminator),
    }
}

fn pack_chars(units: &[ScoredUnit<'_>], max_chars: usize, separator: &str, terminator: &str) -> String {
    let separator_len = char_count(separator);
    let terminator_len = char_count(terminator);

    let mut out = String::new();
    let mut used = 0;
    let mut selected = 0;

    for unit in units {
        let unit_len = char_count(unit.text);
        let joint = if selected == 0 { 0 } else { separator_len };
        if used + joint + unit_len + terminator_len > max_chars {
            break;
        }
        if selected > 0 {
            out.push_str(separator);
        }
        out.push_str(unit.text);
        used += joint + unit_len;
        selected += 1;
    }

    if selected == 0 {
        return units
            .first()
            .map(|top| truncate_chars(top.text, max_chars).to_string())
            .unwrap_or_default();
    }

    out.push_str(terminator);
    truncate_chars(&out, max_chars).to_string()
}
