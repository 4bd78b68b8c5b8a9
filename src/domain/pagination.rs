//! Page windows for list views, following the usual web-framework rules:
//! page 1 always exists, `last` names the final page, anything else out of
//! range is an error the handler turns into a 404.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("page is not a number")]
    NotAnInteger,
    #[error("page {0} is out of range")]
    OutOfRange(i64),
}

#[derive(Clone, Copy, Debug)]
pub struct Paginator { total: i64, per_page: i64 }

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub number: i64,
    pub num_pages: i64,
    pub per_page: i64,
    pub total: i64,
}

impl Paginator {
    pub fn new(total: i64, per_page: i64) -> Self { Self { total: total.max(0), per_page: per_page.max(1) } }

    pub fn num_pages(&self) -> i64 { ((self.total + self.per_page - 1) / self.per_page).max(1) }

    pub fn page(&self, requested: Option<&str>) -> Result<PageWindow, PageError> {
        let num_pages = self.num_pages();
        let number = match requested.map(str::trim) {
            None | Some("") => 1,
            Some("last") => num_pages,
            Some(raw) => raw.parse::<i64>().map_err(|_| PageError::NotAnInteger)?,
        };
        if number < 1 || number > num_pages { return Err(PageError::OutOfRange(number)); }
        Ok(PageWindow { number, num_pages, per_page: self.per_page, total: self.total })
    }
}

impl PageWindow {
    pub fn offset(&self) -> i64 { (self.number - 1) * self.per_page }
    pub fn limit(&self) -> i64 { self.per_page }
    pub fn has_previous(&self) -> bool { self.number > 1 }
    pub fn has_next(&self) -> bool { self.number < self.num_pages }
    pub fn previous(&self) -> i64 { self.number - 1 }
    pub fn next(&self) -> i64 { self.number + 1 }
}
