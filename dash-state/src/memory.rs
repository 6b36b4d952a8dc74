//! In-memory `CookieJar` and `Location`.
//!
//! Clones share one backing store (`Rc<RefCell<_>>`), so a test can hand a
//! clone to the controller and inspect the other.

use crate::store::{CookieJar, Location, Result};
use chrono::TimeDelta;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCookie {
    pub value: String,
    pub max_age: Option<TimeDelta>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCookieJar {
    cookies: Rc<RefCell<BTreeMap<String, StoredCookie>>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cookie(self, name: &str, value: &str) -> Self {
        self.cookies.borrow_mut().insert(
            name.to_string(),
            StoredCookie {
                value: value.to_string(),
                max_age: None,
            },
        );
        self
    }

    pub fn cookie(&self, name: &str) -> Option<StoredCookie> {
        self.cookies.borrow().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cookies.borrow().contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.borrow().is_empty()
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies.borrow().get(name).map(|c| c.value.clone())
    }

    fn set(&mut self, name: &str, value: &str, max_age: Option<TimeDelta>) -> Result<()> {
        self.cookies.borrow_mut().insert(
            name.to_string(),
            StoredCookie {
                value: value.to_string(),
                max_age,
            },
        );
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<()> {
        self.cookies.borrow_mut().remove(name);
        Ok(())
    }
}

#[derive(Debug)]
struct Page {
    origin: String,
    path: String,
    query: String,
    history_len: usize,
    replacements: usize,
}

#[derive(Debug, Clone)]
pub struct MemoryLocation {
    page: Rc<RefCell<Page>>,
}

impl MemoryLocation {
    /// A fresh page at `{origin}/` with an empty query.
    pub fn new(origin: &str) -> Self {
        Self {
            page: Rc::new(RefCell::new(Page {
                origin: origin.trim_end_matches('/').to_string(),
                path: "/".to_string(),
                query: String::new(),
                history_len: 1,
                replacements: 0,
            })),
        }
    }

    pub fn with_path(self, path: &str) -> Self {
        self.page.borrow_mut().path = path.to_string();
        self
    }

    pub fn with_query(self, query: &str) -> Self {
        self.page.borrow_mut().query = query.trim_start_matches('?').to_string();
        self
    }

    pub fn href(&self) -> String {
        let page = self.page.borrow();
        if page.query.is_empty() {
            format!("{}{}", page.origin, page.path)
        } else {
            format!("{}{}?{}", page.origin, page.path, page.query)
        }
    }

    pub fn history_len(&self) -> usize {
        self.page.borrow().history_len
    }

    pub fn replacements(&self) -> usize {
        self.page.borrow().replacements
    }
}

impl Location for MemoryLocation {
    fn origin(&self) -> String {
        self.page.borrow().origin.clone()
    }

    fn path(&self) -> String {
        self.page.borrow().path.clone()
    }

    fn query(&self) -> String {
        self.page.borrow().query.clone()
    }

    fn replace_query(&mut self, query: &str) -> Result<()> {
        let mut page = self.page.borrow_mut();
        page.query = query.trim_start_matches('?').to_string();
        page.replacements += 1;
        Ok(())
    }
}
