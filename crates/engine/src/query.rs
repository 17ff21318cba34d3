//! Untrusted query parameter translation.
//!
//! List endpoints accept raw `sort` and `filters` strings. This module is
//! the only gate between those strings and the SQL layer: every fragment
//! must match an anchored whitelist pattern or the whole request fails with
//! [`EngineError::InvalidQuery`] before any store access.

use std::sync::LazyLock;

use regex::Regex;

use crate::{EngineError, ResultEngine};

/// Default page size when the caller does not pass `limit`.
pub const DEFAULT_LIMIT: u64 = 50;
/// Hard cap on page size; larger `limit` values are clamped down to it.
pub const MAX_LIMIT: u64 = 200;
/// Default page start when the caller does not pass `offset`.
pub const DEFAULT_OFFSET: u64 = 0;

static SORT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(name|created_at|updated_at):(asc|desc)$").unwrap());

// Whole-fragment whitelist. The quoted bodies may not contain single quotes,
// which keeps each fragment a single opaque literal: no statement
// separators, no quoting escapes, no boolean operators. `%` wildcards in the
// LIKE pattern pass through wherever they appear (leading, trailing, both,
// or none).
static FILTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:name LIKE '[^']*'|(?:created_at|updated_at) (?:>=|<=|==|=|>|<) '[^']*')$")
        .unwrap()
});

/// Raw list-query inputs as they arrive from the boundary, before any
/// validation. `sort` entries are `field:direction`; `filters` entries are
/// predicate fragments checked against the whitelist.
#[derive(Clone, Debug, Default)]
pub struct ListParams {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub sort: Vec<String>,
    pub filters: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SortDirection {
    Asc,
    Desc,
}

/// A validated `field:direction` pair, applied in the order given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SortKey {
    pub(crate) field: String,
    pub(crate) direction: SortDirection,
}

/// A filter fragment that already passed the whitelist. Only this module
/// can construct one, so downstream code can trust the payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Predicate(String);

impl Predicate {
    pub(crate) fn as_sql(&self) -> &str {
        &self.0
    }
}

/// A translated, store-ready list query.
#[derive(Clone, Debug)]
pub(crate) struct ListQuery {
    pub(crate) limit: u64,
    pub(crate) offset: u64,
    pub(crate) sort: Vec<SortKey>,
    pub(crate) filters: Vec<Predicate>,
}

/// Validate raw list parameters into their structured form. Sort and filter
/// entries outside the whitelists fail the whole call; nothing is partially
/// applied.
pub(crate) fn translate(params: &ListParams) -> ResultEngine<ListQuery> {
    Ok(ListQuery {
        limit: params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
        offset: params.offset.unwrap_or(DEFAULT_OFFSET),
        sort: translate_sort(&params.sort)?,
        filters: translate_filters(&params.filters)?,
    })
}

fn translate_sort(raw: &[String]) -> ResultEngine<Vec<SortKey>> {
    raw.iter()
        .map(|entry| {
            let caps = SORT_PATTERN.captures(entry).ok_or_else(|| {
                EngineError::InvalidQuery(format!("unsupported sort parameter: {entry}"))
            })?;
            let direction = match &caps[2] {
                "asc" => SortDirection::Asc,
                _ => SortDirection::Desc,
            };
            Ok(SortKey {
                field: caps[1].to_string(),
                direction,
            })
        })
        .collect()
}

fn translate_filters(raw: &[String]) -> ResultEngine<Vec<Predicate>> {
    raw.iter()
        .map(|entry| {
            if FILTER_PATTERN.is_match(entry) {
                Ok(Predicate(entry.clone()))
            } else {
                Err(EngineError::InvalidQuery(format!(
                    "unsupported filter parameter: {entry}"
                )))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_with_sort(entries: &[&str]) -> ListParams {
        ListParams {
            sort: entries.iter().map(ToString::to_string).collect(),
            ..Default::default()
        }
    }

    fn params_with_filters(entries: &[&str]) -> ListParams {
        ListParams {
            filters: entries.iter().map(ToString::to_string).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn sort_accepts_whitelisted_fields() {
        let query = translate(&params_with_sort(&["name:asc", "created_at:desc"])).unwrap();
        assert_eq!(query.sort.len(), 2);
        assert_eq!(query.sort[0].field, "name");
        assert_eq!(query.sort[0].direction, SortDirection::Asc);
        assert_eq!(query.sort[1].field, "created_at");
        assert_eq!(query.sort[1].direction, SortDirection::Desc);
    }

    #[test]
    fn sort_rejects_unknown_field() {
        let err = translate(&params_with_sort(&["someword:up"])).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidQuery("unsupported sort parameter: someword:up".to_string())
        );
    }

    #[test]
    fn sort_rejects_unknown_direction() {
        assert!(translate(&params_with_sort(&["name:upward"])).is_err());
    }

    #[test]
    fn sort_rejects_any_invalid_entry() {
        // One bad entry poisons the whole request.
        assert!(translate(&params_with_sort(&["name:asc", "id:asc"])).is_err());
    }

    #[test]
    fn filters_accept_like_patterns() {
        let query = translate(&params_with_filters(&[
            "name LIKE '%ham%'",
            "name LIKE 's%'",
            "name LIKE 'plain'",
        ]))
        .unwrap();
        assert_eq!(query.filters.len(), 3);
        assert_eq!(query.filters[0].as_sql(), "name LIKE '%ham%'");
    }

    #[test]
    fn filters_accept_timestamp_comparisons() {
        for op in ["=", "==", ">", "<", ">=", "<="] {
            let fragment = format!("created_at {op} '2021-03-09'");
            assert!(
                translate(&params_with_filters(&[fragment.as_str()])).is_ok(),
                "operator {op} should be accepted"
            );
        }
        assert!(
            translate(&params_with_filters(&["updated_at >= '2021-03-09 20:24:05'"])).is_ok()
        );
    }

    #[test]
    fn filters_reject_statement_separators() {
        let err = translate(&params_with_filters(&["; DROP TABLE ingredients"])).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidQuery(
                "unsupported filter parameter: ; DROP TABLE ingredients".to_string()
            )
        );
    }

    #[test]
    fn filters_reject_quote_escapes() {
        assert!(translate(&params_with_filters(&["name LIKE '%' OR '1'='1'"])).is_err());
        assert!(translate(&params_with_filters(&["name LIKE ''; DROP TABLE recipes; --'"])).is_err());
    }

    #[test]
    fn filters_reject_non_whitelisted_columns() {
        assert!(translate(&params_with_filters(&["id = '1'"])).is_err());
        assert!(translate(&params_with_filters(&["description LIKE '%x%'"])).is_err());
    }

    #[test]
    fn filters_reject_trailing_garbage() {
        assert!(translate(&params_with_filters(&["name LIKE '%x%' AND 1=1"])).is_err());
        assert!(translate(&params_with_filters(&["created_at >< '2021'"])).is_err());
    }

    #[test]
    fn limit_defaults_and_clamps() {
        let query = translate(&ListParams::default()).unwrap();
        assert_eq!(query.limit, DEFAULT_LIMIT);
        assert_eq!(query.offset, DEFAULT_OFFSET);

        let query = translate(&ListParams {
            limit: Some(500),
            offset: Some(10),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(query.limit, MAX_LIMIT);
        assert_eq!(query.offset, 10);
    }
}
