//! Pagination utilities for paginated resource listings.

use serde::Serialize;

use crate::models::{Link, PageInfo};

/// A page of projected records, with the paging metadata it was decoded from.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Page number that was requested (zero-based).
    pub page: u32,
    /// Page size that was requested.
    pub size: u32,
    /// Paging metadata reported by the platform.
    pub info: PageInfo,
    /// Navigation links reported by the platform.
    pub links: Vec<Link>,
    /// Whether there are more pages.
    ///
    /// A page shorter than the requested size is the end-of-data signal.
    /// The reported `totalCount` is never consulted.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a page from projected items and the decoded paging metadata.
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, size: u32, info: PageInfo, links: Vec<Link>) -> Self {
        let has_more = items.len() >= size as usize;
        Self {
            items,
            page,
            size,
            info,
            links,
            has_more,
        }
    }

    /// Map the items to a different type, keeping the paging metadata.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            info: self.info,
            links: self.links,
            has_more: self.has_more,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
