use crate::catalog::RecipeCatalog;
use crate::error::{BrowserError, CatalogError};
use crate::model::RecipeSummary;
use log::{error, info};

/// Default number of results per page
pub const PAGE_SIZE: usize = 10;

/// Results of one submitted query
#[derive(Debug, Clone)]
pub struct SearchSession {
    query: String,
    results: Option<Vec<RecipeSummary>>,
    page: usize,
}

impl SearchSession {
    /// Start a session for `query`; blank queries are rejected
    pub fn new(query: impl Into<String>) -> Result<Self, BrowserError> {
        let query = query.into().trim().to_string();
        if query.is_empty() {
            return Err(BrowserError::EmptyQuery);
        }

        Ok(Self {
            query,
            results: None,
            page: 1,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// All results, `None` until a search has succeeded
    pub fn results(&self) -> Option<&[RecipeSummary]> {
        self.results.as_deref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Run the query against the catalog
    pub async fn execute(&mut self, catalog: &dyn RecipeCatalog) -> Result<(), BrowserError> {
        let outcome = catalog.search_recipes(&self.query).await;
        self.apply(outcome)
    }

    /// Store the catalog's answer; failures leave the results unset
    pub fn apply(
        &mut self,
        outcome: Result<Vec<RecipeSummary>, CatalogError>,
    ) -> Result<(), BrowserError> {
        let results = match outcome {
            Ok(results) if results.is_empty() => Err("catalog returned no results".to_string()),
            Ok(results) => Ok(results),
            Err(e) => Err(e.to_string()),
        };

        match results {
            Ok(results) => {
                info!("Search '{}' returned {} recipe(s)", self.query, results.len());
                self.results = Some(results);
                self.page = 1;
                Ok(())
            }
            Err(reason) => {
                error!("Search '{}' failed: {}", self.query, reason);
                self.results = None;
                Err(BrowserError::SearchFailed {
                    query: self.query.clone(),
                    reason,
                })
            }
        }
    }

    /// The 1-indexed page window of the results, clipped to what exists
    pub fn page_slice(&self, page: usize, page_size: usize) -> &[RecipeSummary] {
        let results = self.results.as_deref().unwrap_or(&[]);
        if page == 0 || page_size == 0 {
            return &[];
        }

        let start = (page - 1).saturating_mul(page_size).min(results.len());
        let end = page.saturating_mul(page_size).min(results.len());
        &results[start..end]
    }

    /// Number of pages needed to show every result
    pub fn page_count(&self, page_size: usize) -> usize {
        let len = self.results.as_ref().map_or(0, Vec::len);
        if page_size == 0 {
            return 0;
        }
        len.div_ceil(page_size)
    }
}
