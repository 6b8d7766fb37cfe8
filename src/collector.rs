use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the REUSE manifest under the processed root
pub const DEP5_PATH: &str = ".reuse/dep5";

/// Paths excluded through `Files:` stanzas of a dep5 manifest
#[derive(Debug)]
pub struct ManifestExclusions {
    globs: GlobSet,
    literals: Vec<String>,
}

impl ManifestExclusions {
    /// Build exclusions from dep5 path entries.
    ///
    /// Entries with `*` are globs where `*` stays within one path segment,
    /// matched case-insensitively. Other entries exclude the exact path and
    /// everything beneath it.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let mut literals = Vec::new();

        for pattern in patterns {
            let pattern = pattern.trim_start_matches("./");
            if pattern.contains('*') {
                let glob = GlobBuilder::new(pattern)
                    .literal_separator(true)
                    .case_insensitive(true)
                    .build()
                    .with_context(|| format!("Invalid dep5 glob: {}", pattern))?;
                builder.add(glob);
            } else {
                literals.push(pattern.trim_end_matches('/').to_string());
            }
        }

        let globs = builder.build().context("Failed to build dep5 exclusions")?;
        Ok(Self { globs, literals })
    }

    pub fn empty() -> Self {
        Self {
            globs: GlobSet::empty(),
            literals: Vec::new(),
        }
    }

    /// Whether a root-relative path is excluded
    pub fn is_excluded(&self, relative: &Path) -> bool {
        if self.globs.is_match(relative) {
            return true;
        }
        self.literals
            .iter()
            .any(|literal| relative.starts_with(Path::new(literal)))
    }
}

/// Extract the path entries of every `Files:` stanza in a dep5 manifest.
pub fn parse_dep5(contents: &str) -> Vec<String> {
    contents
        .lines()
        .filter(|line| line.starts_with("Files: "))
        .flat_map(|line| line.split_whitespace().skip(1).map(str::to_string))
        .collect()
}

/// Read dep5 path entries under `root`, if the manifest exists.
pub fn read_dep5(root: &Path) -> Result<Vec<String>> {
    let path = root.join(DEP5_PATH);
    if !path.is_file() {
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(parse_dep5(&contents))
}

/// Walks the processed root and yields candidate files
#[derive(Debug)]
pub struct FileCollector {
    root: PathBuf,
    ignored_dirs: Vec<String>,
    exclusions: ManifestExclusions,
}

impl FileCollector {
    pub fn new(root: &Path, ignored_dirs: &[String], exclusions: ManifestExclusions) -> Self {
        Self {
            root: root.to_path_buf(),
            ignored_dirs: ignored_dirs
                .iter()
                .map(|d| d.trim_matches('/').to_string())
                .collect(),
            exclusions,
        }
    }

    /// Build a collector honoring the root's dep5 manifest.
    pub fn with_manifest(root: &Path, ignored_dirs: &[String]) -> Result<Self> {
        let patterns = read_dep5(root)?;
        if !patterns.is_empty() {
            log::debug!("Excluding {} dep5 path entries", patterns.len());
        }
        let exclusions = ManifestExclusions::new(&patterns)?;
        Ok(Self::new(root, ignored_dirs, exclusions))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Regular files under the root, sorted by name within each directory.
    pub fn files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        let mut walker = WalkBuilder::new(&self.root);
        walker
            .standard_filters(true) // Respect .gitignore, skip dot files
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        let root = self.root.clone();
        let ignored_dirs = self.ignored_dirs.clone();
        walker.filter_entry(move |entry| {
            if !entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
                return true;
            }
            let name = entry.file_name().to_str().unwrap_or("");
            let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
            !ignored_dirs
                .iter()
                .any(|ignored| ignored == name || relative == Path::new(ignored))
        });

        walker
            .build()
            .filter_map(|result| match result {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .map(|entry| entry.into_path())
            .filter(move |path| {
                let relative = path.strip_prefix(&self.root).unwrap_or(path);
                if self.exclusions.is_excluded(relative) {
                    log::debug!("Excluded by dep5: {}", relative.display());
                    return false;
                }
                true
            })
    }
}
