//! Translation of filter state into `GET /api/files` query parameters.

use chrono::NaiveDate;

use crate::filter::{FilterState, SortBy, SortOrder};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Search/sort/date parameters delegated to the service.
///
/// Defaults are left out so requests only carry what differs from the
/// service's own defaults (`sort_by=name`, `sort_order=asc`, no filters).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendSearchParams {
    pub search: Option<String>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl BackendSearchParams {
    pub fn from_filter(filter: &FilterState) -> Self {
        let search = Some(filter.search_term.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        let (sort_by, sort_order) = if filter.is_default_sort() {
            (None, None)
        } else {
            (Some(filter.sort_by), Some(filter.sort_order))
        };

        Self {
            search,
            sort_by,
            sort_order,
            date_from: filter.start_date,
            date_to: filter.end_date,
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(sort_by) = self.sort_by {
            pairs.push(("sort_by", sort_by.as_str().to_owned()));
        }
        if let Some(sort_order) = self.sort_order {
            pairs.push(("sort_order", sort_order.as_str().to_owned()));
        }
        if let Some(from) = self.date_from {
            pairs.push(("date_from", from.format(DATE_FORMAT).to_string()));
        }
        if let Some(to) = self.date_to {
            pairs.push(("date_to", to.format(DATE_FORMAT).to_string()));
        }
        pairs
    }
}

/// Full parameter set of one list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub params: BackendSearchParams,
}

impl ListQuery {
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            params: BackendSearchParams::default(),
        }
    }

    pub fn with_params(mut self, params: BackendSearchParams) -> Self {
        self.params = params;
        self
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        pairs.extend(self.params.to_pairs());
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_defaults_emit_nothing() {
        let params = BackendSearchParams::from_filter(&FilterState::default());
        assert!(params.is_empty());
        assert!(params.to_pairs().is_empty());
    }

    #[test]
    fn test_blank_search_is_omitted_and_search_is_trimmed() {
        let blank = FilterState {
            search_term: "   ".to_owned(),
            ..FilterState::default()
        };
        assert_eq!(BackendSearchParams::from_filter(&blank).search, None);

        let padded = FilterState {
            search_term: "  report ".to_owned(),
            ..FilterState::default()
        };
        assert_eq!(
            BackendSearchParams::from_filter(&padded).to_pairs(),
            vec![("search", "report".to_owned())]
        );
    }

    #[test]
    fn test_sort_is_sent_as_a_pair() {
        let only_order = FilterState {
            sort_order: SortOrder::Desc,
            ..FilterState::default()
        };
        assert_eq!(
            BackendSearchParams::from_filter(&only_order).to_pairs(),
            vec![
                ("sort_by", "name".to_owned()),
                ("sort_order", "desc".to_owned())
            ]
        );
    }

    #[test]
    fn test_dates_are_formatted() {
        let filter = FilterState {
            start_date: Some(date(2024, 1, 5)),
            end_date: Some(date(2024, 12, 31)),
            ..FilterState::default()
        };
        assert_eq!(
            BackendSearchParams::from_filter(&filter).to_pairs(),
            vec![
                ("date_from", "2024-01-05".to_owned()),
                ("date_to", "2024-12-31".to_owned())
            ]
        );
    }

    #[test]
    fn test_list_query_pairs_order() {
        let query = ListQuery::page(2, 25).with_params(BackendSearchParams {
            search: Some("a".to_owned()),
            ..BackendSearchParams::default()
        });

        assert_eq!(
            query.to_pairs(),
            vec![
                ("page", "2".to_owned()),
                ("per_page", "25".to_owned()),
                ("search", "a".to_owned())
            ]
        );
    }
}
