//! Register listing types: search filter, paging window and result page.

use std::cmp::Ordering;

use crate::error::{PlacenamesError, Result};

/// Normalised case-insensitive substring filter over ID and NAME.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    needle: Option<String>,
}

impl SearchFilter {
    /// Trim and upper-case the search text; empty text means no filter.
    pub fn new(search: Option<&str>) -> Self {
        let needle = search
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty());
        Self { needle }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// The upper-cased needle, if any
    pub fn needle(&self) -> Option<&str> {
        self.needle.as_deref()
    }

    pub fn matches(&self, id: &str, name: &str) -> bool {
        match &self.needle {
            None => true,
            Some(n) => id.to_uppercase().contains(n) || name.to_uppercase().contains(n),
        }
    }

    /// `%NEEDLE%` with LIKE wildcards escaped so they match literally
    pub fn like_pattern(&self) -> Option<String> {
        self.needle.as_ref().map(|n| {
            let mut pattern = String::with_capacity(n.len() + 2);
            pattern.push('%');
            for c in n.chars() {
                if matches!(c, '%' | '_' | '\\') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }
}

/// Paging limits, usually taken from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_per_page: u32,
    pub max_per_page: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_per_page: 50,
            max_per_page: 1000,
        }
    }
}

/// A validated page request; `page` is 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub per_page: u32,
}

impl PageWindow {
    /// Apply defaults and the per-page cap. Zero values are rejected.
    pub fn from_params(page: Option<u32>, per_page: Option<u32>, limits: PageLimits) -> Result<Self> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(PlacenamesError::BadRequest(
                "page must be a positive integer".to_string(),
            ));
        }
        let per_page = per_page.unwrap_or(limits.default_per_page);
        if per_page < 1 {
            return Err(PlacenamesError::BadRequest(
                "per_page must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            page,
            per_page: per_page.min(limits.max_per_page),
        })
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.per_page as u64
    }

    pub fn limit(&self) -> u64 {
        self.per_page as u64
    }

    /// Number of the last page for a total, never less than 1
    pub fn last_page(&self, total: u64) -> u64 {
        total.div_ceil(self.per_page as u64).max(1)
    }
}

/// One register entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterItem {
    pub id: String,
    pub name: String,
}

/// A window of a register plus the filtered total
#[derive(Debug, Clone)]
pub struct RegisterPage {
    pub items: Vec<RegisterItem>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
}

impl RegisterPage {
    pub fn has_next(&self) -> bool {
        (self.page as u64) * (self.per_page as u64) < self.total
    }
}

/// Digits of an AUTH_ID compared as an arbitrarily large number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitRun(String);

impl DigitRun {
    pub fn from_auth_id(auth_id: &str) -> Self {
        let digits: String = auth_id.chars().filter(char::is_ascii_digit).collect();
        let trimmed = digits.trim_start_matches('0');
        Self(trimmed.to_string())
    }
}

impl Ord for DigitRun {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for DigitRun {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Register order: authority, numeric part of AUTH_ID, then raw AUTH_ID
pub fn natural_key(authority: &str, auth_id: &str) -> (String, DigitRun, String) {
    (
        authority.to_string(),
        DigitRun::from_auth_id(auth_id),
        auth_id.to_string(),
    )
}
