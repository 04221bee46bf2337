use std::collections::HashMap;
use std::str::FromStr;

use healthtrack_core::domain::record::value_objects::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Filter operator for query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,  // equals (default)
    Gt,  // greater than
    Gte, // greater than or equal
    Lt,  // less than
    Lte, // less than or equal
}

impl FromStr for FilterOperator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(FilterOperator::Eq),
            "gt" => Ok(FilterOperator::Gt),
            "gte" => Ok(FilterOperator::Gte),
            "lt" => Ok(FilterOperator::Lt),
            "lte" => Ok(FilterOperator::Lte),
            _ => Err(()),
        }
    }
}

/// Filter condition for a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub offset: i64,
    pub limit: i64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl PaginationParams {
    pub fn new(offset: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            offset: offset.unwrap_or(0).max(0),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }
}

/// Parsed list query: filters plus pagination
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pub filters: Vec<FilterCondition>,
    pub pagination: PaginationParams,
}

impl QueryParams {
    /// Parse from query string map
    /// Handles formats like:
    /// - filter[field]=value (defaults to eq)
    /// - filter[field][operator]=value
    /// - offset=0, limit=20
    ///
    /// Unknown operators are an error; unknown keys are ignored.
    pub fn from_query_map(query_map: &HashMap<String, String>) -> Result<Self, String> {
        let mut filters = Vec::new();
        let mut offset: Option<i64> = None;
        let mut limit: Option<i64> = None;

        for (key, value) in query_map {
            if let Some(filter_key) = key.strip_prefix("filter[") {
                let Some(end_bracket) = filter_key.find(']') else {
                    return Err(format!("malformed filter parameter {key:?}"));
                };
                let field = filter_key[..end_bracket].to_string();
                let remaining = &filter_key[end_bracket + 1..];

                let operator = if remaining.is_empty() {
                    FilterOperator::Eq
                } else if remaining.starts_with('[') && remaining.ends_with(']') {
                    let operator_str = &remaining[1..remaining.len() - 1];
                    operator_str
                        .parse::<FilterOperator>()
                        .map_err(|_| format!("unknown filter operator {operator_str:?}"))?
                } else {
                    return Err(format!("malformed filter parameter {key:?}"));
                };

                filters.push(FilterCondition {
                    field,
                    operator,
                    value: value.clone(),
                });
            } else if key == "offset" {
                offset = Some(
                    value
                        .parse::<i64>()
                        .map_err(|_| format!("offset must be an integer, got {value:?}"))?,
                );
            } else if key == "limit" {
                limit = Some(
                    value
                        .parse::<i64>()
                        .map_err(|_| format!("limit must be an integer, got {value:?}"))?,
                );
            }
        }

        // HashMap iteration order is arbitrary.
        filters.sort_by(|a, b| a.field.cmp(&b.field).then(a.value.cmp(&b.value)));

        Ok(Self {
            filters,
            pagination: PaginationParams::new(offset, limit),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(pairs: &[(&str, &str)]) -> Result<QueryParams, String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        QueryParams::from_query_map(&map)
    }

    #[test]
    fn filter_defaults_to_eq() {
        let params = parse(&[("filter[device_id]", "phone-1")]).unwrap();
        assert_eq!(
            params.filters,
            vec![FilterCondition {
                field: "device_id".to_string(),
                operator: FilterOperator::Eq,
                value: "phone-1".to_string(),
            }]
        );
    }

    #[test]
    fn filter_with_operator() {
        let params = parse(&[("filter[created_at][gte]", "2024-05-01T00:00:00Z")]).unwrap();
        assert_eq!(params.filters[0].field, "created_at");
        assert_eq!(params.filters[0].operator, FilterOperator::Gte);
    }

    #[test]
    fn unknown_operator_is_rejected() {
        assert!(parse(&[("filter[created_at][like]", "2024")]).is_err());
    }

    #[test]
    fn pagination_defaults_and_clamps() {
        let params = parse(&[]).unwrap();
        assert_eq!(params.pagination, PaginationParams { offset: 0, limit: 20 });

        let params = parse(&[("offset", "-5"), ("limit", "500")]).unwrap();
        assert_eq!(params.pagination, PaginationParams { offset: 0, limit: 100 });
    }

    #[test]
    fn non_numeric_limit_is_rejected() {
        assert!(parse(&[("limit", "ten")]).is_err());
    }
}
