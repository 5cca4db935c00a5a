use serde::{Deserialize, Deserializer, Serialize};

/// One job listing as served by the listings endpoint, plus its derived keywords.
///
/// Every field tolerates being absent or `null` on the wire; unknown fields (such as
/// `id`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub position: String,
    /// Display string such as "1d ago".
    #[serde(deserialize_with = "null_as_default")]
    pub posted_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub contract: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    pub logo: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub new: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub featured: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub level: String,
    #[serde(deserialize_with = "string_list")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub tools: Vec<String>,
    /// Role, level, languages and tools. Filled once per fetch by `with_keywords`.
    #[serde(skip_deserializing)]
    pub keywords: Vec<String>,
}

impl JobPosting {
    /// Caches the derived keywords on the posting.
    pub fn with_keywords(mut self) -> Self {
        self.keywords = derive_keywords(&self);
        self
    }

    /// True when every filter is one of this posting's keywords (exact match).
    pub fn matches(&self, filters: &[String]) -> bool {
        filters.iter().all(|filter| self.keywords.contains(filter))
    }
}

/// Role, level, languages then tools, with empty entries dropped.
pub fn derive_keywords(posting: &JobPosting) -> Vec<String> {
    std::iter::once(&posting.role)
        .chain(std::iter::once(&posting.level))
        .chain(&posting.languages)
        .chain(&posting.tools)
        .filter(|keyword| !keyword.is_empty())
        .cloned()
        .collect()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default().into_iter().flatten().collect())
}
