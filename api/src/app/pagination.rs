//! Page-number pagination

use serde::Serialize;

use crate::error::{AppError, DomainError};

/// Number of records per page
pub const PAGE_SIZE: u64 = 10;

/// One page of a listing, with the neighbouring page numbers
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<u64>,
    pub previous: Option<u64>,
    pub results: Vec<T>,
}

/// A validated 1-based page number whose offset fits in a `u64`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNumber(u64);

impl PageNumber {
    pub fn new(page: Option<u64>) -> Result<Self, AppError> {
        match page.unwrap_or(1) {
            0 => Err(AppError::BadRequest("page must be at least 1".to_string())),
            // No listing is long enough to reach a page this far out
            n if (n - 1).checked_mul(PAGE_SIZE).is_none() => Err(invalid_page()),
            n => Ok(Self(n)),
        }
    }

    pub fn offset(self) -> u64 {
        (self.0 - 1) * PAGE_SIZE
    }

    pub fn limit(self) -> u64 {
        PAGE_SIZE
    }

    /// Reject pages that start past the last record; page 1 is always valid
    pub fn check_in_range(self, count: u64) -> Result<(), AppError> {
        if self.0 > 1 && self.offset() >= count {
            return Err(invalid_page());
        }
        Ok(())
    }
}

fn invalid_page() -> AppError {
    AppError::Domain(DomainError::NotFound("Invalid page.".to_string()))
}

impl<T> Page<T> {
    pub fn new(number: PageNumber, count: u64, results: Vec<T>) -> Self {
        let next = if number.offset().saturating_add(PAGE_SIZE) < count {
            Some(number.0 + 1)
        } else {
            None
        };
        let previous = if number.0 > 1 { Some(number.0 - 1) } else { None };

        Self {
            count,
            next,
            previous,
            results,
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_zero_is_rejected() {
        assert!(matches!(
            PageNumber::new(Some(0)),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn missing_page_defaults_to_first() {
        let page = PageNumber::new(None).unwrap();
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), PAGE_SIZE);
    }

    #[test]
    fn first_page_of_empty_listing_is_valid() {
        let page = PageNumber::new(Some(1)).unwrap();
        assert!(page.check_in_range(0).is_ok());

        let result: Page<u8> = Page::new(page, 0, vec![]);
        assert_eq!(result.next, None);
        assert_eq!(result.previous, None);
    }

    #[test]
    fn page_past_the_end_is_not_found() {
        let page = PageNumber::new(Some(3)).unwrap();
        assert!(page.check_in_range(20).is_err());
        assert!(page.check_in_range(21).is_ok());
    }

    #[test]
    fn page_with_overflowing_offset_is_not_found() {
        for page in [u64::MAX, u64::MAX / PAGE_SIZE + 2] {
            assert!(matches!(
                PageNumber::new(Some(page)),
                Err(AppError::Domain(DomainError::NotFound(_)))
            ));
        }
    }

    #[test]
    fn furthest_representable_page_is_out_of_range() {
        let page = PageNumber::new(Some(u64::MAX / PAGE_SIZE + 1)).unwrap();
        assert_eq!(page.offset(), u64::MAX / PAGE_SIZE * PAGE_SIZE);
        assert!(page.check_in_range(u64::MAX).is_ok());
        assert!(page.check_in_range(1_000).is_err());

        let last: Page<u8> = Page::new(page, u64::MAX, vec![]);
        assert_eq!(last.next, None);
    }

    #[test]
    fn neighbours_are_computed_from_count() {
        let middle = Page::new(PageNumber::new(Some(2)).unwrap(), 25, vec![0u8; 10]);
        assert_eq!(middle.next, Some(3));
        assert_eq!(middle.previous, Some(1));

        let last = Page::new(PageNumber::new(Some(3)).unwrap(), 25, vec![0u8; 5]);
        assert_eq!(last.next, None);
        assert_eq!(last.previous, Some(2));

        let exact = Page::new(PageNumber::new(Some(2)).unwrap(), 20, vec![0u8; 10]);
        assert_eq!(exact.next, None);
    }
}
