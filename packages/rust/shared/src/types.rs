//! Domain types shared between the paper fetcher and the site renderer.

use serde::{Deserialize, Deserializer, Serialize};

/// Prefix OpenAlex puts in front of every DOI.
pub const DOI_URL_PREFIX: &str = "https://doi.org/";

// ---------------------------------------------------------------------------
// Work
// ---------------------------------------------------------------------------

/// A single paper record as returned by the OpenAlex `/works` endpoint.
///
/// Only the fields the site renders are modelled; everything else in the
/// response is ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Work {
    /// Display title.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Year of publication.
    #[serde(default)]
    pub publication_year: Option<i32>,
    /// DOI, normally in URL form (`https://doi.org/10.xxxx/...`).
    #[serde(default)]
    pub doi: Option<String>,
    /// Number of citing works (`null` reads as 0).
    #[serde(default, deserialize_with = "null_as_zero")]
    pub cited_by_count: u64,
    /// Where the work is primarily hosted.
    #[serde(default)]
    pub primary_location: Option<Location>,
}

/// The `primary_location` object of a work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub landing_page_url: Option<String>,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

impl Work {
    /// The DOI without its `https://doi.org/` prefix, or `""` if absent.
    pub fn bare_doi(&self) -> &str {
        let doi = self.doi.as_deref().unwrap_or("");
        doi.strip_prefix(DOI_URL_PREFIX).unwrap_or(doi)
    }

    /// Landing page URL from the primary location, or `""` if absent.
    pub fn landing_page_url(&self) -> &str {
        self.primary_location
            .as_ref()
            .and_then(|loc| loc.landing_page_url.as_deref())
            .unwrap_or("")
    }

    /// Year as display text (`""` when unknown).
    pub fn year_text(&self) -> String {
        self.publication_year
            .map(|y| y.to_string())
            .unwrap_or_default()
    }
}
