// web_app/state/view.rs - Typed view state decoded from the parameter store
//
// `ViewState` is never mutated directly. It is recomputed from the store on
// every change, and decoding is total: any malformed or missing parameter
// resolves to that field's default.

use std::fmt::Debug;

use super::params::QueryParams;

pub const ORDER_BY: &str = "order_by";
pub const ORDER_DESC: &str = "order_desc";
pub const SEARCH: &str = "q";
pub const PAGE: &str = "page";
pub const PER_PAGE: &str = "per_page";

/// A fixed set of sortable columns for one list page
///
/// `Default` is the page's initial sort column.
pub trait SortColumn: Copy + Eq + Default + Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    /// Value written to the `order_by` parameter.
    fn as_param(&self) -> &'static str;

    fn from_param(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|column| column.as_param() == value)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn is_descending(self) -> bool {
        self == SortDirection::Descending
    }

    /// `"true"` or a missing parameter sorts descending; anything else ascends.
    fn decode(value: Option<&str>) -> Self {
        match value {
            None | Some("true") => SortDirection::Descending,
            Some(_) => SortDirection::Ascending,
        }
    }

    fn as_param(self) -> &'static str {
        if self.is_descending() {
            "true"
        } else {
            "false"
        }
    }
}

/// Rows per page, restricted to the sizes the pagination footer offers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageSize(u32);

impl PageSize {
    pub const ALLOWED: [u32; 3] = [5, 10, 20];
    pub const DEFAULT: PageSize = PageSize(20);

    pub fn new(rows: u32) -> Option<Self> {
        Self::ALLOWED.contains(&rows).then_some(PageSize(rows))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn options() -> impl Iterator<Item = PageSize> {
        Self::ALLOWED.into_iter().map(PageSize)
    }

    fn decode(value: Option<&str>) -> Self {
        value
            .and_then(parse_u32)
            .and_then(PageSize::new)
            .unwrap_or(PageSize::DEFAULT)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::DEFAULT
    }
}

/// Tri-state boolean filters shown as exclusive toggle groups
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facet {
    /// Active-only (`true`) or ended-only (`false`) memberships
    Active,
    /// Owners (`true`) or plain members (`false`)
    Owner,
}

impl Facet {
    pub const ALL: [Facet; 2] = [Facet::Active, Facet::Owner];

    pub fn key(self) -> &'static str {
        match self {
            Facet::Active => "active",
            Facet::Owner => "owner",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FacetFilters {
    pub active: Option<bool>,
    pub owner: Option<bool>,
}

impl FacetFilters {
    pub fn get(&self, facet: Facet) -> Option<bool> {
        match facet {
            Facet::Active => self.active,
            Facet::Owner => self.owner,
        }
    }

    pub fn set(&mut self, facet: Facet, value: Option<bool>) {
        match facet {
            Facet::Active => self.active = value,
            Facet::Owner => self.owner = value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState<S> {
    pub sort_field: S,
    pub sort_direction: SortDirection,
    /// `None` means no filter; `Some("")` filters by the empty string.
    pub search_query: Option<String>,
    pub facets: FacetFilters,
    pub page_index: u32,
    pub page_size: PageSize,
}

impl<S: SortColumn> Default for ViewState<S> {
    fn default() -> Self {
        ViewState {
            sort_field: S::default(),
            sort_direction: SortDirection::default(),
            search_query: None,
            facets: FacetFilters::default(),
            page_index: 0,
            page_size: PageSize::DEFAULT,
        }
    }
}

impl<S: SortColumn> ViewState<S> {
    pub fn decode(params: &QueryParams) -> Self {
        let mut facets = FacetFilters::default();
        for facet in Facet::ALL {
            facets.set(facet, params.get(facet.key()).map(|value| value == "true"));
        }

        ViewState {
            sort_field: params
                .get(ORDER_BY)
                .and_then(S::from_param)
                .unwrap_or_default(),
            sort_direction: SortDirection::decode(params.get(ORDER_DESC)),
            search_query: params.get(SEARCH).map(str::to_string),
            facets,
            page_index: params.get(PAGE).and_then(parse_u32).unwrap_or(0),
            page_size: PageSize::decode(params.get(PER_PAGE)),
        }
    }

    /// Canonical parameters for this state; unset optionals are omitted.
    pub fn encode(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.set(ORDER_BY, self.sort_field.as_param());
        params.set(ORDER_DESC, self.sort_direction.as_param());
        if let Some(query) = &self.search_query {
            params.set(SEARCH, query);
        }
        for facet in Facet::ALL {
            if let Some(value) = self.facets.get(facet) {
                params.set(facet.key(), bool_param(value));
            }
        }
        params.set(PAGE, &self.page_index.to_string());
        params.set(PER_PAGE, &self.page_size.get().to_string());
        params
    }

    /// Direction a column header should display: the live direction for
    /// the active column, descending for the rest.
    pub fn header_direction(&self, column: S) -> SortDirection {
        if column == self.sort_field {
            self.sort_direction
        } else {
            SortDirection::Descending
        }
    }
}

pub(crate) fn bool_param(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web_app::model::AuditOrderBy;

    #[test]
    fn test_empty_params_decode_to_defaults() {
        let view = ViewState::<AuditOrderBy>::decode(&QueryParams::new());
        assert_eq!(view, ViewState::default());
        assert_eq!(view.sort_field, AuditOrderBy::CreatedAt);
        assert_eq!(view.sort_direction, SortDirection::Descending);
        assert_eq!(view.page_size.get(), 20);
    }

    #[test]
    fn test_page_size_only_accepts_allowed_values() {
        for rows in [5, 10, 20] {
            assert_eq!(PageSize::new(rows).map(PageSize::get), Some(rows));
        }
        for rows in [0, 1, 15, 21, 100] {
            assert!(PageSize::new(rows).is_none(), "{rows} should be rejected");
        }
        assert_eq!(PageSize::options().count(), 3);
    }

    #[test]
    fn test_header_direction() {
        let view = ViewState {
            sort_field: AuditOrderBy::Moniker,
            sort_direction: SortDirection::Ascending,
            ..ViewState::default()
        };
        assert_eq!(view.header_direction(AuditOrderBy::Moniker), SortDirection::Ascending);
        assert_eq!(view.header_direction(AuditOrderBy::EndedAt), SortDirection::Descending);
    }

    #[test]
    fn test_facet_filters_accessors() {
        let mut facets = FacetFilters::default();
        facets.set(Facet::Owner, Some(true));
        assert_eq!(facets.get(Facet::Owner), Some(true));
        assert_eq!(facets.get(Facet::Active), None);
    }
}
