// src/schema/aliases.rs

use tracing::warn;

use crate::error::TransformError;

/// Known alternative spellings found in the source data, paired with the
/// canonical name they stand for.
pub static COLUMN_ALIASES: &[(&str, &str)] = &[
    ("previous_campaing_contacts", "previous_campaign_contacts"),
    ("const_price_idx", "cons_price_idx"),
    ("eurobor_three_months", "euribor_three_months"),
    ("mortage", "mortgage"),
];

/// Canonical name for a known alias, `None` for anything else.
pub fn canonical_name(name: &str) -> Option<&'static str> {
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
}

/// Rename aliased headers to their canonical names, in place.
///
/// Fails if a header set carries both an alias and the column it stands for,
/// since either one could be the real data. Returns the number of renames.
pub fn resolve_headers(source: &str, headers: &mut [String]) -> Result<usize, TransformError> {
    let mut renamed = 0;
    for i in 0..headers.len() {
        let Some(canonical) = canonical_name(&headers[i]) else {
            continue;
        };
        if headers.iter().any(|h| h == canonical) {
            return Err(TransformError::AmbiguousColumn {
                source_name: source.to_string(),
                alias: headers[i].clone(),
                canonical: canonical.to_string(),
            });
        }
        warn!(source, alias = %headers[i], canonical, "renaming aliased column");
        headers[i] = canonical.to_string();
        renamed += 1;
    }
    Ok(renamed)
}
