use crate::client::HEADER_LINK;
use serde::Serialize;
use url::Url;

/// Represents `Pagination` information from a Github API request
#[derive(Debug, Default)]
pub struct Pagination {
    pub next_page: Option<usize>,
    pub prev_page: Option<usize>,
    pub first_page: Option<usize>,
    pub last_page: Option<usize>,
}

impl Pagination {
    pub(super) fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        headers
            .get(HEADER_LINK)
            .and_then(|h| h.to_str().ok())
            .map(Self::from_link_header)
            .unwrap_or_default()
    }

    fn from_link_header(links: &str) -> Self {
        let mut pagination = Self::default();

        for link in links.split(',') {
            let segments: Vec<&str> = link.split(';').map(str::trim).collect();

            // Skip if we don't at least have href and rel
            if segments.len() < 2 {
                continue;
            }

            // Check if href segment is well formed and a valid url format
            let url = if segments[0].starts_with('<') && segments[0].ends_with('>') {
                if let Ok(url) = Url::parse(&segments[0][1..segments[0].len() - 1]) {
                    url
                } else {
                    continue;
                }
            } else {
                continue;
            };

            // and then pull out the page number
            let page = if let Some(page) = url
                .query_pairs()
                .find_map(|(k, v)| if k == "page" { v.parse().ok() } else { None })
            {
                page
            } else {
                continue;
            };

            for rel in &segments[1..] {
                match *rel {
                    "rel=\"next\"" => pagination.next_page = Some(page),
                    "rel=\"prev\"" => pagination.prev_page = Some(page),
                    "rel=\"first\"" => pagination.first_page = Some(page),
                    "rel=\"last\"" => pagination.last_page = Some(page),
                    _ => {}
                }
            }
        }

        pagination
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct PaginationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<usize>,
}

#[cfg(test)]
mod test {
    use super::{Pagination, HEADER_LINK};
    use reqwest::header::HeaderMap;

    #[test]
    fn pagination() {
        let mut headers = HeaderMap::new();
        let link = r#"<https://api.github.com/organizations/9919/outside_collaborators?per_page=100&page=3>; rel="next", <https://api.github.com/organizations/9919/outside_collaborators?per_page=100&page=5>; rel="last""#;
        headers.insert(HEADER_LINK, link.parse().unwrap());

        let p = Pagination::from_headers(&headers);
        assert_eq!(p.next_page, Some(3));
        assert_eq!(p.last_page, Some(5));
        assert_eq!(p.prev_page, None);
    }

    #[test]
    fn last_page_has_no_next() {
        let link = r#"<https://api.github.com/orgs/octo/outside_collaborators?page=1>; rel="first", <https://api.github.com/orgs/octo/outside_collaborators?page=4>; rel="prev""#;

        let p = Pagination::from_link_header(link);
        assert_eq!(p.next_page, None);
        assert_eq!(p.first_page, Some(1));
        assert_eq!(p.prev_page, Some(4));
    }

    #[test]
    fn missing_header() {
        let p = Pagination::from_headers(&HeaderMap::new());
        assert_eq!(p.next_page, None);
        assert_eq!(p.last_page, None);
    }

    #[test]
    fn malformed_links_are_skipped() {
        let link = r#"https://api.github.com/orgs/octo/outside_collaborators?page=2; rel="next", <not a url>; rel="last""#;

        let p = Pagination::from_link_header(link);
        assert_eq!(p.next_page, None);
        assert_eq!(p.last_page, None);
    }
}
