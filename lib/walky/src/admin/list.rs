//! List screen state: paging, search, filters and sorting.

use std::collections::BTreeMap;

use crate::models::{Paginated, SuccessEnvelope};

use super::Resource;

/// Rows per page when none is chosen.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Column sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// The other direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The `(field, direction)` pair driven by clickable column headers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SortState {
    field: Option<String>,
    direction: SortDirection,
}

impl SortState {
    /// Sorted by `field` in `direction`.
    #[must_use]
    pub fn by(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: Some(field.into()),
            direction,
        }
    }

    /// Header click: flip on the current column, ascending on a new one.
    pub fn toggle(&mut self, field: &str) {
        if self.field.as_deref() == Some(field) {
            self.direction = self.direction.flipped();
        } else {
            self.field = Some(field.to_string());
            self.direction = SortDirection::Asc;
        }
    }

    /// Sorted column, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Current direction.
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Arrow to draw on the `field` header.
    #[must_use]
    pub fn indicator(&self, field: &str) -> Option<SortDirection> {
        (self.field.as_deref() == Some(field)).then_some(self.direction)
    }
}

/// Everything a paginated table sends to the backend.
///
/// Changing the search text, a filter or the sort goes back to page one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListQuery {
    page: u32,
    limit: u32,
    search: Option<String>,
    filters: BTreeMap<String, String>,
    sort: SortState,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
            filters: BTreeMap::new(),
            sort: SortState::default(),
        }
    }
}

impl ListQuery {
    /// First page, default size, no filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to `page` (1-based).
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Rows per page.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Search text; blank clears it.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        let text = text.trim();
        self.search = (!text.is_empty()).then(|| text.to_string());
        self.page = 1;
        self
    }

    /// Set a filter value, e.g. `("campus", id)` or `("status", "flagged")`.
    #[must_use]
    pub fn filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(name.into(), value.into());
        self.page = 1;
        self
    }

    /// Remove a filter.
    #[must_use]
    pub fn clear_filter(mut self, name: &str) -> Self {
        if self.filters.remove(name).is_some() {
            self.page = 1;
        }
        self
    }

    /// Header click on `field`.
    #[must_use]
    pub fn sort_by(mut self, field: &str) -> Self {
        self.sort.toggle(field);
        self.page = 1;
        self
    }

    /// Next page.
    #[must_use]
    pub fn next_page(self) -> Self {
        let page = self.page.saturating_add(1);
        self.page(page)
    }

    /// Previous page, staying on the first.
    #[must_use]
    pub fn previous_page(self) -> Self {
        let page = self.page.saturating_sub(1);
        self.page(page)
    }

    /// Current 1-based page.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.page
    }

    /// Rows per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.limit
    }

    /// Current sort.
    #[must_use]
    pub const fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Query pairs in a stable order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        pairs.extend(
            self.filters
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        if let Some(field) = self.sort.field() {
            pairs.push(("sortBy".to_string(), field.to_string()));
            pairs.push(("sortOrder".to_string(), self.sort.direction().as_str().to_string()));
        }
        pairs
    }

    /// Cache key of this page of `resource`.
    #[must_use]
    pub fn key(&self, resource: Resource) -> QueryKey {
        QueryKey::new(resource, self.query_pairs())
    }
}

/// Identity of one cached fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: Resource,
    params: Vec<(String, String)>,
}

impl QueryKey {
    /// Key for `resource` with the given parameters.
    #[must_use]
    pub fn new(resource: Resource, params: Vec<(String, String)>) -> Self {
        Self { resource, params }
    }

    /// Key for a single record, as used by detail modals.
    #[must_use]
    pub fn detail(resource: Resource, id: impl Into<String>) -> Self {
        Self::new(resource, vec![("id".to_string(), id.into())])
    }

    /// The resource this key belongs to.
    #[must_use]
    pub const fn resource(&self) -> Resource {
        self.resource
    }
}

/// One page of table rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePage<T> {
    /// Rows of this page.
    pub rows: Vec<T>,
    /// Rows across all pages.
    pub total: u64,
}

/// List envelopes a table can render.
///
/// Envelopes stay as the backend sends them; tables normalize here.
pub trait ListEnvelope {
    /// Row type.
    type Row;

    /// Rows and total count.
    fn into_page(self) -> TablePage<Self::Row>;
}

impl<T> ListEnvelope for Paginated<T> {
    type Row = T;

    fn into_page(self) -> TablePage<T> {
        TablePage {
            rows: self.data,
            total: self.total,
        }
    }
}

impl<T> ListEnvelope for SuccessEnvelope<Vec<T>> {
    type Row = T;

    fn into_page(self) -> TablePage<T> {
        let total = self.data.len() as u64;
        TablePage {
            rows: self.data,
            total,
        }
    }
}

impl<T> ListEnvelope for Vec<T> {
    type Row = T;

    fn into_page(self) -> TablePage<T> {
        let total = self.len() as u64;
        TablePage { rows: self, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_same_field_and_resets_on_new_field() {
        let mut sort = SortState::default();

        sort.toggle("title");
        assert_eq!(sort.indicator("title"), Some(SortDirection::Asc));

        sort.toggle("title");
        assert_eq!(sort.indicator("title"), Some(SortDirection::Desc));

        sort.toggle("startTime");
        assert_eq!(sort.field(), Some("startTime"));
        assert_eq!(sort.direction(), SortDirection::Asc);
        assert_eq!(sort.indicator("title"), None);
    }

    #[test]
    fn query_pairs_are_stable() {
        let query = ListQuery::new()
            .limit(20)
            .filter("status", "flagged")
            .filter("campus", "mit")
            .search("  jazz ")
            .sort_by("title")
            .page(3);

        assert_eq!(
            query.query_pairs(),
            [
                ("page", "3"),
                ("limit", "20"),
                ("search", "jazz"),
                ("campus", "mit"),
                ("status", "flagged"),
                ("sortBy", "title"),
                ("sortOrder", "asc"),
            ]
            .map(|(k, v)| (k.to_string(), v.to_string()))
        );
    }

    #[test]
    fn changing_criteria_returns_to_first_page() {
        let query = ListQuery::new().page(4);
        assert_eq!(query.clone().search("x").current_page(), 1);
        assert_eq!(query.clone().filter("campus", "mit").current_page(), 1);
        assert_eq!(query.clone().sort_by("title").current_page(), 1);
        assert_eq!(query.clear_filter("missing").current_page(), 4);
    }

    #[test]
    fn paging_never_goes_below_one() {
        let query = ListQuery::new().previous_page();
        assert_eq!(query.current_page(), 1);
        assert_eq!(query.next_page().next_page().current_page(), 3);
    }

    #[test]
    fn keys_differ_by_page_and_resource() {
        let first = ListQuery::new();
        let second = ListQuery::new().next_page();

        assert_ne!(first.key(Resource::Events), second.key(Resource::Events));
        assert_ne!(first.key(Resource::Events), first.key(Resource::Spaces));
        assert_eq!(first.key(Resource::Users).resource(), Resource::Users);
    }

    #[test]
    fn envelopes_normalize_to_table_pages() {
        let paginated = Paginated {
            data: vec!["a", "b"],
            total: 12,
            page: 1,
            limit: 2,
        };
        assert_eq!(paginated.into_page().total, 12);

        let wrapped = SuccessEnvelope {
            success: true,
            data: vec![1, 2, 3],
        };
        assert_eq!(wrapped.into_page(), TablePage { rows: vec![1, 2, 3], total: 3 });

        assert_eq!(vec!['x'].into_page().total, 1);
    }
}
