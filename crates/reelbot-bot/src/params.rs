// SPDX-FileCopyrightText: 2026 Reelbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parser for the advanced-search parameter message.
//!
//! Input is one `Label: value` pair per line. Labels are normalised to
//! lower-case snake keys (`Start year` becomes `start_year`); values are
//! passed to the catalog untouched. The remote service decides what is a
//! valid year, rating or genre.

use std::fmt;
use std::num::IntErrorKind;

use reelbot_core::types::QueryParams;
use thiserror::Error;

/// Number of results delivered when the message carries no `Count` line.
pub const DEFAULT_RESULT_LIMIT: usize = 10;

const SEPARATOR: &str = ": ";
const COUNT_KEY: &str = "count";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// A non-empty line without the `": "` separator.
    #[error("line {line_no} is not a `Label: value` pair: {line:?}")]
    MalformedParameterLine { line_no: usize, line: String },

    /// The `Count` value is not a positive integer.
    #[error("count must be a positive integer, got {value:?}")]
    InvalidCountValue { value: String },
}

/// A validated advanced-search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvancedSearchQuery {
    /// Query parameters for the `advancedsearch` endpoint, `count` excluded.
    pub params: QueryParams,
    /// How many of the returned candidates to resolve and deliver.
    pub result_limit: usize,
}

impl AdvancedSearchQuery {
    /// Parses a parameter message. See the module docs for the format.
    pub fn parse(raw: &str) -> Result<Self, ParamError> {
        let mut params = QueryParams::new();

        for (idx, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (label, value) =
                line.split_once(SEPARATOR)
                    .ok_or_else(|| ParamError::MalformedParameterLine {
                        line_no: idx + 1,
                        line: line.to_string(),
                    })?;
            params.insert(normalize_key(label), value.to_string());
        }

        let result_limit = match params.remove(COUNT_KEY) {
            Some(value) => parse_count(&value)?,
            None => DEFAULT_RESULT_LIMIT,
        };

        Ok(Self {
            params,
            result_limit,
        })
    }
}

/// Renders the query back into the message format it was parsed from.
impl fmt::Display for AdvancedSearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.params {
            writeln!(f, "{key}{SEPARATOR}{value}")?;
        }
        write!(f, "{COUNT_KEY}{SEPARATOR}{}", self.result_limit)
    }
}

fn normalize_key(label: &str) -> String {
    label.to_lowercase().replace(' ', "_")
}

fn parse_count(value: &str) -> Result<usize, ParamError> {
    match parse_whole_number(value) {
        Some(n) if n > 0 => Ok(usize::try_from(n).unwrap_or(usize::MAX)),
        _ => Err(ParamError::InvalidCountValue {
            value: value.to_string(),
        }),
    }
}

/// Parses a signed whole number. Values outside the `i64` range saturate
/// instead of failing.
pub(crate) fn parse_whole_number(value: &str) -> Option<i64> {
    match value.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn count_is_extracted_from_params() {
        let query = AdvancedSearchQuery::parse("Count: 5\nGenre: horror").unwrap();
        assert_eq!(query.result_limit, 5);
        assert_eq!(query.params.len(), 1);
        assert_eq!(query.params["genre"], "horror");
    }

    #[test]
    fn full_example_message() {
        let raw = "Start year: 2000\nEnd year: 2010\nMin IMDb: 5\nMax IMDb: 7\n\
                   Genre: action, horror\nSort: latest\nCount: 10";
        let query = AdvancedSearchQuery::parse(raw).unwrap();

        assert_eq!(query.result_limit, 10);
        assert_eq!(query.params["start_year"], "2000");
        assert_eq!(query.params["end_year"], "2010");
        assert_eq!(query.params["min_imdb"], "5");
        assert_eq!(query.params["max_imdb"], "7");
        assert_eq!(query.params["genre"], "action, horror");
        assert_eq!(query.params["sort"], "latest");
    }

    #[test]
    fn default_limit_without_count() {
        let query = AdvancedSearchQuery::parse("Genre: drama").unwrap();
        assert_eq!(query.result_limit, DEFAULT_RESULT_LIMIT);
    }

    #[test]
    fn missing_separator_is_malformed() {
        let err = AdvancedSearchQuery::parse("BadLine").unwrap_err();
        assert_eq!(
            err,
            ParamError::MalformedParameterLine {
                line_no: 1,
                line: "BadLine".into()
            }
        );

        // Colon without the following space is not a separator.
        let err = AdvancedSearchQuery::parse("Genre: drama\nSort:latest").unwrap_err();
        assert!(matches!(err, ParamError::MalformedParameterLine { line_no: 2, .. }));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let query = AdvancedSearchQuery::parse("\nGenre: drama\n\n   \nSort: latest\n").unwrap();
        assert_eq!(query.params.len(), 2);
    }

    #[test]
    fn value_is_kept_verbatim_and_split_on_first_separator() {
        let query = AdvancedSearchQuery::parse("Genre: Sci-Fi: Classic ").unwrap();
        assert_eq!(query.params["genre"], "Sci-Fi: Classic ");
    }

    #[test]
    fn bad_counts_are_rejected() {
        for raw in [
            "Count: ten",
            "Count: 0",
            "Count: -3",
            "Count: 2.5",
            "Count: -99999999999999999999",
        ] {
            let err = AdvancedSearchQuery::parse(raw).unwrap_err();
            assert!(
                matches!(err, ParamError::InvalidCountValue { .. }),
                "{raw} -> {err:?}"
            );
        }
        assert_eq!(AdvancedSearchQuery::parse("Count:  7 ").unwrap().result_limit, 7);
    }

    #[test]
    fn oversized_count_saturates() {
        let query = AdvancedSearchQuery::parse("Genre: drama\nCount: 99999999999999999999").unwrap();
        assert_eq!(query.result_limit, usize::MAX);
        assert_eq!(query.params["genre"], "drama");
    }

    #[test]
    fn whole_numbers_saturate_at_the_i64_bounds() {
        assert_eq!(parse_whole_number(" 12 "), Some(12));
        assert_eq!(parse_whole_number("+3"), Some(3));
        assert_eq!(parse_whole_number("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_whole_number("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(parse_whole_number("1e3"), None);
        assert_eq!(parse_whole_number(""), None);
    }

    #[test]
    fn empty_message_is_a_query_with_defaults() {
        let query = AdvancedSearchQuery::parse("").unwrap();
        assert!(query.params.is_empty());
        assert_eq!(query.result_limit, DEFAULT_RESULT_LIMIT);
    }

    fn label() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z ]{0,12}".prop_filter("count is reserved", |l| {
            l.to_lowercase().replace(' ', "_") != COUNT_KEY
        })
    }

    proptest! {
        #[test]
        fn parsing_is_idempotent(
            pairs in proptest::collection::vec((label(), "[a-z0-9,:. ]{0,16}"), 0..8),
            count in proptest::option::of(1usize..100),
        ) {
            let mut raw: Vec<String> =
                pairs.iter().map(|(k, v)| format!("{k}: {v}")).collect();
            if let Some(n) = count {
                raw.push(format!("Count: {n}"));
            }

            let first = AdvancedSearchQuery::parse(&raw.join("\n")).unwrap();
            let second = AdvancedSearchQuery::parse(&first.to_string()).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.result_limit, count.unwrap_or(DEFAULT_RESULT_LIMIT));
        }
    }
}
