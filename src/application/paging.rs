// Page through a list that is already in store order.
//
// Rules
// - Pages are 1-based. Defaults: page 1, 20 per page. At most 100 per page.
// - A page past the end is empty, not an error.

use crate::application::errors::ApplicationError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub per_page: u32,
    pub pages: usize,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    pub fn slice<T>(&self, items: Vec<T>) -> Result<Page<T>, ApplicationError> {
        let page = self.page.unwrap_or(1);
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);
        if page == 0 {
            return Err(ApplicationError::Validation("page starts at 1".into()));
        }
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(ApplicationError::Validation(format!(
                "per page must be between 1 and {MAX_PER_PAGE}, got {per_page}"
            )));
        }

        let total = items.len();
        let size = per_page as usize;
        let skip = (page as usize - 1).saturating_mul(size);
        Ok(Page {
            items: items.into_iter().skip(skip).take(size).collect(),
            total,
            page,
            per_page,
            pages: total.div_ceil(size),
        })
    }
}
