use crate::{PlaylistItem, Rule};

/// A rule whose pattern matched an item's title.
#[derive(Debug, Clone, Copy)]
pub struct RuleMatch<'a> {
    pub rule_index: usize,
    pub rule: &'a Rule,
    pub item: &'a PlaylistItem,
}

/// Yields matches rules-outer, items-inner, in the order actions must run.
///
/// The iterator is lazy so a caller that stops consuming it also stops
/// evaluating patterns.
pub fn match_in_order<'a>(
    items: &'a [PlaylistItem],
    rules: &'a [Rule],
) -> impl Iterator<Item = RuleMatch<'a>> + 'a {
    rules.iter().enumerate().flat_map(move |(rule_index, rule)| {
        items
            .iter()
            .filter(move |item| rule.is_match(&item.title))
            .map(move |item| RuleMatch {
                rule_index,
                rule,
                item,
            })
    })
}
