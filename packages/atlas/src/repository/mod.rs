//! Storage access for each aggregate.
//!
//! Functions are generic over [`ConnectionTrait`] so the same query runs on the
//! pool or inside a service transaction. Inserts and updates go through the
//! entities' `ActiveModel`s directly.

pub mod algorithm;
pub mod application_area;
pub mod computing_resource_type;
pub mod concrete_solution;
pub mod file;
pub mod implementation;
pub mod implementation_package;
pub mod provider;
pub mod publication;
pub mod qpu;

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, FromQueryResult, PaginatorTrait, Select};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// A 0-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    /// Apply defaults and clamp `size` to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: Option<u64>, size: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(0),
            size: size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Row offset of the first item, or `None` when it does not fit a
    /// Postgres `BIGINT`.
    pub fn offset(&self) -> Option<u64> {
        self.page
            .checked_mul(self.size)
            .filter(|offset| *offset <= i64::MAX as u64)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the size of the whole result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_elements: u64,
    pub page: u64,
    pub size: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(self.size)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page: self.page,
            size: self.size,
        }
    }
}

/// Run an ordered select as one page.
pub async fn fetch_page<C, E>(
    db: &C,
    select: Select<E>,
    request: PageRequest,
) -> Result<Page<E::Model>, DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync,
{
    let paginator = select.paginate(db, request.size);
    let total_elements = paginator.num_items().await?;
    let items = match request.offset() {
        Some(offset) if offset < total_elements => paginator.fetch_page(request.page).await?,
        _ => Vec::new(),
    };

    Ok(Page {
        items,
        total_elements,
        page: request.page,
        size: request.size,
    })
}
