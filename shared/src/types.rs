//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Pagination parameters for listing endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_size() -> u32 {
    20
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, size: 20 }
    }
}

impl Pagination {
    /// Zero-based offset of the first element on this page
    pub fn offset(&self) -> usize {
        let page = self.page.max(1);
        ((page - 1) as usize).saturating_mul(self.size as usize)
    }

    /// Slice a full result set down to this page's window.
    ///
    /// An out-of-range page yields an empty vector, not an error.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.size as usize)
            .collect()
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_offsets() {
        let p = Pagination { page: 1, size: 10 };
        assert_eq!(p.offset(), 0);

        let p = Pagination { page: 3, size: 10 };
        assert_eq!(p.offset(), 20);

        // Page 0 is treated as page 1
        let p = Pagination { page: 0, size: 10 };
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let p = Pagination { page: 3, size: 10 };
        let items: Vec<i32> = (0..5).collect();
        assert!(p.slice(items).is_empty());
    }

    #[test]
    fn test_slice_window() {
        let p = Pagination { page: 2, size: 2 };
        let items = vec!["a", "b", "c", "d", "e"];
        assert_eq!(p.slice(items), vec!["c", "d"]);
    }
}
