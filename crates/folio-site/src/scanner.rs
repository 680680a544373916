//! Source discovery by filesystem walking.
//!
//! Finds the markdown pages and static assets under the source directory.
//! Nothing is read at this stage; the builder loads each page later.

use std::fs;
use std::path::{Path, PathBuf};

/// A markdown page found in the source tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SourcePage {
    /// Site path (e.g. "", "guide", "guide/setup").
    pub url_path: String,
    /// Site path of the directory containing the file, for link resolution.
    pub dir: String,
    /// File on disk.
    pub source_path: PathBuf,
}

/// A non-markdown file copied to the output unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Asset {
    /// Path relative to the source directory.
    pub relative: PathBuf,
    /// File on disk.
    pub source_path: PathBuf,
}

#[derive(Debug, Default)]
pub(crate) struct ScanResult {
    /// Pages sorted by URL path.
    pub pages: Vec<SourcePage>,
    pub assets: Vec<Asset>,
}

/// Walk `source_dir` collecting pages and assets.
///
/// Entries starting with `.` are skipped, as are the `exclude` paths (the
/// output directory when it lives inside the sources, the menu file).
/// `index.md` maps to its directory's URL, any other `name.md` to
/// `<dir>/name`.
pub(crate) fn scan(source_dir: &Path, exclude: &[PathBuf]) -> ScanResult {
    let walker = Walker {
        root: canonical(source_dir),
        exclude: exclude.iter().map(|path| canonical(path)).collect(),
    };
    let mut result = ScanResult::default();
    walker.scan_directory(source_dir, "", Path::new(""), &mut result);
    result.pages.sort_by(|a, b| a.url_path.cmp(&b.url_path));
    result.assets.sort_by(|a, b| a.relative.cmp(&b.relative));
    result
}

/// Falls back to the path as given when it does not exist yet.
fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

struct Walker {
    root: PathBuf,
    exclude: Vec<PathBuf>,
}

impl Walker {
    fn is_excluded(&self, relative: &Path) -> bool {
        !self.exclude.is_empty() && self.exclude.contains(&self.root.join(relative))
    }

    fn scan_directory(
        &self,
        dir_path: &Path,
        url_prefix: &str,
        relative: &Path,
        result: &mut ScanResult,
    ) {
        let entries = match fs::read_dir(dir_path) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::warn!(path = %dir_path.display(), %error, "Skipping unreadable directory");
                return;
            }
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            let entry_relative = relative.join(&name);
            if self.is_excluded(&entry_relative) {
                tracing::debug!(path = %path.display(), "Excluded from scan");
                continue;
            }

            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());

            if is_dir {
                let child_url = join_url(url_prefix, &name);
                self.scan_directory(&path, &child_url, &entry_relative, result);
            } else if let Some(stem) = name.strip_suffix(".md") {
                let url_path = if stem.eq_ignore_ascii_case("index") {
                    url_prefix.to_owned()
                } else {
                    join_url(url_prefix, stem)
                };
                result.pages.push(SourcePage {
                    url_path,
                    dir: url_prefix.to_owned(),
                    source_path: path,
                });
            } else {
                result.assets.push(Asset {
                    relative: entry_relative,
                    source_path: path,
                });
            }
        }
    }
}

fn join_url(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn urls(result: &ScanResult) -> Vec<&str> {
        result.pages.iter().map(|p| p.url_path.as_str()).collect()
    }

    #[test]
    fn test_scan_pages() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "index.md", "");
        write(root, "guide/index.md", "");
        write(root, "guide/setup.md", "");
        write(root, "api/ref.md", "");

        let result = scan(root, &[]);

        assert_eq!(urls(&result), ["", "api/ref", "guide", "guide/setup"]);
        let setup = &result.pages[3];
        assert_eq!(setup.dir, "guide");
        assert_eq!(setup.source_path, root.join("guide/setup.md"));
        assert_eq!(result.pages[2].dir, "guide");
    }

    #[test]
    fn test_scan_skips_hidden() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, ".drafts/wip.md", "");
        write(root, ".notes.md", "");
        write(root, "page.md", "");

        let result = scan(root, &[]);

        assert_eq!(urls(&result), ["page"]);
        assert!(result.assets.is_empty());
    }

    #[test]
    fn test_scan_collects_assets() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "guide/setup.md", "");
        write(root, "guide/img/flow.png", "png");
        write(root, "style.css", "css");

        let result = scan(root, &[]);

        let assets: Vec<_> = result.assets.iter().map(|a| a.relative.clone()).collect();
        assert_eq!(
            assets,
            [PathBuf::from("guide/img/flow.png"), PathBuf::from("style.css")]
        );
    }

    #[test]
    fn test_scan_skips_excluded_paths() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "page.md", "");
        write(root, "menu.yaml", "");
        write(root, "public/page/index.html", "");
        write(root, "public/logo.png", "");
        write(root, "logo.png", "");

        let result = scan(root, &[root.join("public"), root.join("menu.yaml")]);

        assert_eq!(urls(&result), ["page"]);
        let assets: Vec<_> = result.assets.iter().map(|a| a.relative.clone()).collect();
        assert_eq!(assets, [PathBuf::from("logo.png")]);
    }

    #[test]
    fn test_scan_excludes_relative_spelling() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "out/old.md", "");
        write(root, "page.md", "");

        let result = scan(root, &[root.join("./out")]);

        assert_eq!(urls(&result), ["page"]);
    }

    #[test]
    fn test_scan_missing_directory() {
        let result = scan(Path::new("/nonexistent/docs"), &[]);
        assert!(result.pages.is_empty());
    }
}
