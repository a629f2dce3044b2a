//! Page-query state carried in the location's query string.

use reqwest::Url;
use serde::Serialize;

use super::loader::{AsyncState, ResourceLoader};
use crate::api::{Page, PageRequest};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// List-page state: 1-based page, page size and optional free-text query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub query: String,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            query: String::new(),
        }
    }
}

fn positive(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

impl PageQuery {
    /// Parses `page`, `pageSize` and `query` from a query string.
    ///
    /// A leading `?` is accepted. Missing, zero or non-numeric values fall back
    /// to page 1 and `default_page_size`.
    pub fn parse(query_string: &str, default_page_size: u32) -> Self {
        let mut result = Self {
            page_size: default_page_size,
            ..Self::default()
        };

        let query_string = query_string.trim_start_matches('?');
        if query_string.is_empty() {
            return result;
        }

        let url = match Url::parse(&format!("http://localhost/?{}", query_string)) {
            Ok(url) => url,
            Err(e) => {
                log::debug!("Ignoring unparseable query string '{}': {}", query_string, e);
                return result;
            }
        };

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "page" => {
                    if let Some(page) = positive(&value) {
                        result.page = page;
                    }
                }
                "pageSize" => {
                    if let Some(size) = positive(&value) {
                        result.page_size = size;
                    }
                }
                "query" => result.query = value.trim().to_string(),
                _ => {}
            }
        }

        result
    }

    pub fn from_query_string(query_string: &str) -> Self {
        Self::parse(query_string, DEFAULT_PAGE_SIZE)
    }

    /// Serializes back into `page=..&pageSize=..[&query=..]`.
    pub fn to_query_string(&self) -> String {
        let mut url = match Url::parse("http://localhost/") {
            Ok(url) => url,
            Err(_) => return format!("page={}&pageSize={}", self.page, self.page_size),
        };
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("page", &self.page.to_string())
                .append_pair("pageSize", &self.page_size.to_string());
            if !self.query.is_empty() {
                pairs.append_pair("query", &self.query);
            }
        }
        url.query().unwrap_or_default().to_string()
    }

    /// Zero-based coordinates for the API.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page.saturating_sub(1), self.page_size)
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Changing the page size always returns to the first page.
    pub fn with_page_size(&self, page_size: u32) -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: page_size.max(1),
            query: self.query.clone(),
        }
    }

    /// Executing a search returns to the first page.
    pub fn with_query(&self, query: &str) -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: self.page_size,
            query: query.trim().to_string(),
        }
    }

    /// Clears the query and resets pagination to its defaults.
    pub fn cleared(&self) -> Self {
        Self::default()
    }
}

impl<T> ResourceLoader<PageQuery, Page<T>>
where
    T: Clone + Send + 'static,
{
    fn current_query(&self) -> PageQuery {
        self.params().unwrap_or_default()
    }

    pub async fn set_page(&self, page: u32) -> AsyncState<Page<T>> {
        let params = self.current_query().with_page(page);
        self.set_params(params).await
    }

    pub async fn set_page_size(&self, page_size: u32) -> AsyncState<Page<T>> {
        let params = self.current_query().with_page_size(page_size);
        self.set_params(params).await
    }

    pub async fn set_query(&self, query: &str) -> AsyncState<Page<T>> {
        let params = self.current_query().with_query(query);
        self.set_params(params).await
    }

    pub async fn clear_filters(&self) -> AsyncState<Page<T>> {
        let params = self.current_query().cleared();
        self.set_params(params).await
    }
}
