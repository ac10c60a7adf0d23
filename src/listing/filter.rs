// src/listing/filter.rs
use super::types::JobRecord;

/// Case-insensitive keyword filter over the visible text of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFilter {
    needle: String,
}

impl ListingFilter {
    pub fn new(keyword: &str) -> Self {
        Self {
            needle: keyword.trim().to_lowercase(),
        }
    }

    /// `None` for a blank keyword, which would match everything anyway
    pub fn parse(keyword: Option<&str>) -> Option<Self> {
        keyword
            .map(Self::new)
            .filter(|filter| !filter.needle.is_empty())
    }

    pub fn matches(&self, record: &JobRecord) -> bool {
        [
            &record.title,
            &record.company,
            &record.location,
            &record.description,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::view::tests::record;

    #[test]
    fn test_matches_any_visible_field() {
        let mut job = record("Graphiste", "/1");
        job.location = "Grand Est".to_string();

        assert!(ListingFilter::new("GRAPH").matches(&job));
        assert!(ListingFilter::new("grand est").matches(&job));
        assert!(ListingFilter::new("about").matches(&job));
        assert!(!ListingFilter::new("lyon").matches(&job));
    }

    #[test]
    fn test_url_is_not_searched() {
        let job = record("Designer", "https://lyon.example/1");
        assert!(!ListingFilter::new("lyon").matches(&job));
    }

    #[test]
    fn test_parse_blank_keyword() {
        assert_eq!(ListingFilter::parse(None), None);
        assert_eq!(ListingFilter::parse(Some("   ")), None);
        assert_eq!(
            ListingFilter::parse(Some(" UX ")),
            Some(ListingFilter::new("ux"))
        );
    }
}
