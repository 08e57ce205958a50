//! File-backed page source.
//!
//! Reads a JSON Lines file where every non-blank line is one recorded API
//! page response, in cursor order.

use super::memory::page_index;
use super::{FetchError, PageSource};
use crate::feed::PageRequest;
use crate::model::error::{InputError, ParseError};
use crate::model::{parse_page, Page};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Pages loaded from a JSON Lines file.
///
/// The whole file is read on construction. A line that fails to parse is
/// kept as an error and reported when its page is requested, so pages
/// before it remain usable.
#[derive(Debug)]
pub struct FilePageSource {
    path: Option<PathBuf>,
    pages: Vec<Result<Page, ParseError>>,
    skipped_posts: usize,
}

impl FilePageSource {
    /// Loads all pages from `path`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::Io` for other I/O errors.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let mut source = Self::from_reader(BufReader::new(file))?;
        source.path = Some(path.to_path_buf());
        info!(
            path = %path.display(),
            pages = source.pages.len(),
            skipped_posts = source.skipped_posts,
            "Loaded pages file"
        );
        Ok(source)
    }

    /// Loads all pages from any buffered reader.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if reading fails.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, InputError> {
        let mut pages = Vec::new();
        let mut skipped_posts = 0;

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = number + 1;
            if line.trim().is_empty() {
                continue;
            }

            match parse_page(&line) {
                Ok((page, errors)) => {
                    skipped_posts += errors.len();
                    debug!(line = line_number, items = page.items.len(), "Parsed page");
                    pages.push(Ok(page));
                }
                Err(ParseError::InvalidJson { message, .. }) => {
                    warn!(line = line_number, %message, "Unparseable page line");
                    pages.push(Err(ParseError::InvalidJson {
                        line: Some(line_number),
                        message,
                    }));
                }
                Err(other) => pages.push(Err(other)),
            }
        }

        Ok(Self {
            path: None,
            pages,
            skipped_posts,
        })
    }

    /// Path the pages were loaded from; `None` for readers.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of page lines, including unparseable ones.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Posts dropped during normalization across all pages.
    pub fn skipped_posts(&self) -> usize {
        self.skipped_posts
    }
}

impl PageSource for FilePageSource {
    /// Serves pages by cursor. The request's context is ignored: a file holds
    /// a single feed.
    fn fetch_page(&mut self, request: &PageRequest) -> Result<Page, FetchError> {
        let next_cursors = self
            .pages
            .iter()
            .map(|page| page.as_ref().ok().and_then(|p| p.next_cursor.as_ref()));
        let index = page_index(next_cursors, request.cursor.as_ref())?;

        match self.pages.get(index) {
            Some(Ok(page)) => Ok(page.clone()),
            Some(Err(err)) => Err(FetchError::Malformed(err.clone())),
            None => Ok(Page::last(Vec::new())),
        }
    }
}
