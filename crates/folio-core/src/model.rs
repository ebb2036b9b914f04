use crate::error::FolioError;
use serde::{Deserialize, Serialize};

/// One page of a document as returned by an extraction backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number in the source document.
    pub page_number: usize,
    /// Text exactly as the backend produced it.
    pub raw_text: String,
    /// `normalize(raw_text)`; empty until the page set has been normalized.
    pub cleaned_text: String,
}

impl Page {
    pub fn new(page_number: usize, raw_text: impl Into<String>) -> Self {
        Page {
            page_number,
            raw_text: raw_text.into(),
            cleaned_text: String::new(),
        }
    }
}

/// Ordered pages from a single extraction attempt.
///
/// Page numbers are strictly increasing and start at 1 or later. The set only
/// ever shrinks after construction: empty pages and duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSet {
    pages: Vec<Page>,
}

impl PageSet {
    /// Build a page set from adapter output, rejecting out-of-order numbering.
    pub fn from_pages(backend: &str, pages: Vec<Page>) -> Result<Self, FolioError> {
        let mut previous = 0;
        for page in &pages {
            if page.page_number <= previous {
                return Err(FolioError::PageOrder {
                    backend: backend.to_string(),
                    page_number: page.page_number,
                    previous,
                });
            }
            previous = page.page_number;
        }
        Ok(PageSet { pages })
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&Page) -> bool) {
        self.pages.retain(keep);
    }

    pub(crate) fn pages_mut(&mut self) -> std::slice::IterMut<'_, Page> {
        self.pages.iter_mut()
    }
}

impl IntoIterator for PageSet {
    type Item = Page;
    type IntoIter = std::vec::IntoIter<Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}

impl<'a> IntoIterator for &'a PageSet {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

/// Document information dictionary, read straight from the PDF.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub page_count: usize,
    pub title: String,
    pub author: String,
    pub subject: String,
    pub creator: String,
    pub producer: String,
    pub creation_date: String,
    pub modification_date: String,
}

/// Simple size figures reported alongside extracted text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub char_count: usize,
    pub word_count: usize,
    pub line_count: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        TextStats {
            char_count: text.chars().count(),
            word_count: text.split_whitespace().count(),
            line_count: text.lines().count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pages_accepts_gaps() {
        let pages = vec![Page::new(1, "a"), Page::new(3, "b")];
        let set = PageSet::from_pages("mock", pages).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_from_pages_rejects_zero_and_repeats() {
        assert!(PageSet::from_pages("mock", vec![Page::new(0, "a")]).is_err());
        let repeated = vec![Page::new(2, "a"), Page::new(2, "b")];
        assert!(matches!(
            PageSet::from_pages("mock", repeated),
            Err(FolioError::PageOrder { page_number: 2, .. })
        ));
    }

    #[test]
    fn test_text_stats() {
        let stats = TextStats::of("one two\nthree");
        assert_eq!(stats.char_count, 13);
        assert_eq!(stats.word_count, 3);
        assert_eq!(stats.line_count, 2);
    }
}
