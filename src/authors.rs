use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Accumulates author entries across a run
#[derive(Debug, Default)]
pub struct AuthorRegistry {
    authors: Vec<String>,
}

impl AuthorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend<I>(&mut self, authors: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.authors.extend(authors);
    }

    /// Sorted list without exact duplicates
    pub fn finalize(&self) -> Vec<String> {
        let mut authors = self.authors.clone();
        authors.sort();
        authors.dedup();
        authors
    }
}

/// Render an author list as an `AUTHORS.md` fragment.
pub fn render_markdown(authors: &[String]) -> String {
    let mut output = String::from("# Authors\n\n");
    for author in authors {
        output.push_str(&format!("- {}\n", author));
    }
    output
}

/// Append to the author file, creating it if needed. Existing content is
/// never truncated.
pub fn append_to_file(path: &Path, content: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(content.as_bytes())
}
