//! Data transfer objects.
//!
//! DTOs are flat, serializable mirrors of the domain entities. Responses are
//! built with `From<&Entity>`; request bodies convert back with
//! `From<Dto> for Entity`. Money fields carry integer cents.

pub mod catalog;
pub mod discounts;
pub mod orders;

use commerce_api_core::PagedList;
use serde::{Deserialize, Serialize};

/// Paged response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedListDto<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Zero-based page index
    pub page_index: u32,
    /// Requested page size
    pub page_size: u32,
    /// Items across all pages
    pub total_count: u64,
    /// Number of pages
    pub total_pages: u64,
    /// Whether a page precedes this one
    pub has_previous_page: bool,
    /// Whether a page follows this one
    pub has_next_page: bool,
}

impl<E, T> From<&PagedList<E>> for PagedListDto<T>
where
    T: for<'a> From<&'a E>,
{
    fn from(list: &PagedList<E>) -> Self {
        Self {
            items: list.items().iter().map(T::from).collect(),
            page_index: list.page_index(),
            page_size: list.page_size(),
            total_count: list.total_count(),
            total_pages: list.total_pages(),
            has_previous_page: list.has_previous_page(),
            has_next_page: list.has_next_page(),
        }
    }
}

/// Map every entity of a slice.
pub fn map_all<E, T>(entities: &[E]) -> Vec<T>
where
    T: for<'a> From<&'a E>,
{
    entities.iter().map(T::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use commerce_api_core::PageRequest;
    use proptest::prelude::*;

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Label(String);

    impl From<&i32> for Label {
        fn from(value: &i32) -> Self {
            Self(format!("#{value}"))
        }
    }

    #[test]
    fn test_paged_dto_mirrors_list() {
        let list = PagedList::paginate((1..=45).collect::<Vec<i32>>(), PageRequest::new(1, 20));
        let dto: PagedListDto<Label> = PagedListDto::from(&list);

        assert_eq!(dto.items.first(), Some(&Label("#21".to_string())));
        assert_eq!(dto.items.len(), 20);
        assert_eq!(dto.total_count, 45);
        assert_eq!(dto.total_pages, 3);
        assert!(dto.has_previous_page);
        assert!(dto.has_next_page);
    }

    #[test]
    fn test_map_all_keeps_order() {
        let labels: Vec<Label> = map_all(&[3, 1]);
        assert_eq!(labels, vec![Label("#3".to_string()), Label("#1".to_string())]);
    }

    proptest! {
        #[test]
        fn paged_dto_flags_are_consistent(total in 0usize..500, index in 0u32..30, size in 1u32..100) {
            let list = PagedList::paginate(vec![0i32; total], PageRequest::new(index, size));
            let dto: PagedListDto<Label> = PagedListDto::from(&list);

            prop_assert_eq!(dto.total_pages, (total as u64).div_ceil(u64::from(size)));
            prop_assert_eq!(dto.has_previous_page, index > 0);
            prop_assert_eq!(dto.has_next_page, u64::from(index) + 1 < dto.total_pages);
        }
    }
}
