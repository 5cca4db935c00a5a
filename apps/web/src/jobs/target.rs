use url::Url;

/// Listings file, resolved relative to the page URL.
pub const DATA_FILE: &str = "data.json";
/// Deliberately absent resource used to exercise the failure path.
pub const MISSING_DATA_FILE: &str = "data-not-found.json";
/// Page query parameter that switches the first load to `MISSING_DATA_FILE`.
pub const ERROR_FLAG: &str = "error";

/// Where the next jobs fetch goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobsTarget {
    valid: Url,
    current: Url,
}

impl JobsTarget {
    pub fn from_page_url(page_url: &Url) -> Result<Self, url::ParseError> {
        let valid = page_url.join(DATA_FILE)?;
        let current = if has_error_flag(page_url) {
            page_url.join(MISSING_DATA_FILE)?
        } else {
            valid.clone()
        };
        Ok(Self { valid, current })
    }

    pub fn current(&self) -> &Url {
        &self.current
    }

    /// True while the target points at the deliberately missing resource.
    pub fn is_diagnostic(&self) -> bool {
        self.current != self.valid
    }

    pub fn reset(&mut self) {
        self.current = self.valid.clone();
    }
}

fn has_error_flag(page_url: &Url) -> bool {
    page_url.query_pairs().any(|(key, _)| key == ERROR_FLAG)
}
