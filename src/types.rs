/// A region (US state, Canadian province, ...) as RepeaterBook identifies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: u32,
    pub name: String,
}

impl Region {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    /// File name stem for this region's output: lower-cased display name
    /// with spaces replaced by underscores.
    pub fn file_stem(&self) -> String {
        self.name.to_lowercase().replace(' ', "_")
    }
}

/// Raw page as returned by a fetcher.
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: u16,
    pub url: String,
    pub body: String,
}

impl PageResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Header labels and data rows of a frequency table, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem() {
        assert_eq!(Region::new(53, "Washington").file_stem(), "washington");
        assert_eq!(Region::new(37, "North Carolina").file_stem(), "north_carolina");
        assert_eq!(Region::new(11, "District of Columbia").file_stem(), "district_of_columbia");
    }

    #[test]
    fn test_page_response_success_range() {
        let page = |status| PageResponse { status, url: String::new(), body: String::new() };
        assert!(page(200).is_success());
        assert!(!page(301).is_success());
        assert!(!page(404).is_success());
    }
}
