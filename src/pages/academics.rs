use crate::catalog::{ContentCatalog, Department};
use crate::navigation::{NavParams, View, ViewController};
use std::sync::Arc;

/// Department listing with a live search filter.
#[derive(Debug, Clone)]
pub struct AcademicsPage {
    catalog: Arc<ContentCatalog>,
    query: String,
}

impl AcademicsPage {
    pub fn new(catalog: Arc<ContentCatalog>) -> Self {
        Self {
            catalog,
            query: String::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Departments whose name or faculty contains the query.
    pub fn results(&self) -> Vec<&Department> {
        self.catalog.search(&self.query)
    }

    /// Open a department's detail page.
    pub fn select(&self, nav: &ViewController, department_id: &str) {
        nav.navigate(View::DepartmentDetail, NavParams::with_id(department_id));
    }
}
