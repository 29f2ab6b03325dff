//! Category registry mapping file extensions to destination folders.
//!
//! The registry is an ordered table fixed at engine construction. Lookup is by
//! lower-cased extension including the leading dot; the first category owning an
//! extension wins. Anything unmatched falls back to the synthetic [`OTHERS`]
//! category, which behaves like a registry category everywhere downstream
//! (folder creation, already-sorted detection, cleanup, undo).

/// Folder name for files whose extension matches no registry category.
pub const OTHERS: &str = "Others";

/// A named bucket of file extensions.
#[derive(Debug, Clone)]
pub struct Category {
    /// Category name, used verbatim as the subfolder name under `Sorted/`.
    pub name: String,
    /// Owned extensions, lower-cased, each with a leading dot.
    pub extensions: Vec<String>,
}

impl Category {
    fn new(name: &str, extensions: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    /// Returns true if this category owns the given lower-cased extension.
    fn owns(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }
}

/// Ordered collection of categories with an `Others` fallback.
#[derive(Debug, Clone)]
pub struct Registry {
    categories: Vec<Category>,
}

impl Registry {
    /// Creates a registry from an explicit ordered table.
    ///
    /// Extensions are normalized to lower case. Order is significant: when an
    /// extension appears in more than one category, the first match wins.
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The default table: Images, Videos, Documents, Music, Archives,
    /// Executables and Code, in that order.
    pub fn default_table() -> Self {
        Self::new(vec![
            Category::new(
                "Images",
                &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp"],
            ),
            Category::new("Videos", &[".mp4", ".mkv", ".flv", ".avi", ".mov", ".wmv"]),
            Category::new(
                "Documents",
                &[".pdf", ".docx", ".doc", ".txt", ".xlsx", ".pptx", ".csv"],
            ),
            Category::new("Music", &[".mp3", ".wav", ".aac", ".flac", ".ogg"]),
            Category::new("Archives", &[".zip", ".rar", ".7z", ".tar", ".gz"]),
            Category::new("Executables", &[".exe", ".msi", ".sh", ".bat"]),
            Category::new(
                "Code",
                &[".py", ".js", ".html", ".css", ".cpp", ".java", ".c", ".php"],
            ),
        ])
    }

    /// Maps an extension (with leading dot, any case) to a category folder name.
    ///
    /// Returns [`OTHERS`] when no registry category owns the extension. Pure
    /// lookup, no failure modes.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortify::categories::{OTHERS, Registry};
    ///
    /// let registry = Registry::default_table();
    /// assert_eq!(registry.classify(".png"), "Images");
    /// assert_eq!(registry.classify(".PDF"), "Documents");
    /// assert_eq!(registry.classify(".xyz"), OTHERS);
    /// ```
    pub fn classify(&self, extension: &str) -> &str {
        let ext = extension.to_lowercase();
        self.categories
            .iter()
            .find(|c| c.owns(&ext))
            .map(|c| c.name.as_str())
            .unwrap_or(OTHERS)
    }

    /// Read-only view of the registry table, for display or validation.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Every folder name a sorted tree may contain: each registry category
    /// followed by [`OTHERS`].
    pub fn folder_names(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .map(|c| c.name.as_str())
            .chain(std::iter::once(OTHERS))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::default_table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_every_registered_extension() {
        let registry = Registry::default_table();
        for category in registry.categories() {
            for ext in &category.extensions {
                assert_eq!(
                    registry.classify(ext),
                    category.name,
                    "extension {} should map to {}",
                    ext,
                    category.name
                );
            }
        }
    }

    #[test]
    fn test_classify_unknown_extension_falls_back_to_others() {
        let registry = Registry::default_table();
        assert_eq!(registry.classify(".xyz"), OTHERS);
        assert_eq!(registry.classify(""), OTHERS);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        let registry = Registry::default_table();
        assert_eq!(registry.classify(".PNG"), "Images");
        assert_eq!(registry.classify(".Mp3"), "Music");
    }

    #[test]
    fn test_first_match_wins_on_duplicate_extension() {
        let registry = Registry::new(vec![
            Category::new("First", &[".dup"]),
            Category::new("Second", &[".dup"]),
        ]);
        assert_eq!(registry.classify(".dup"), "First");
    }

    #[test]
    fn test_folder_names_include_others_last() {
        let registry = Registry::default_table();
        let names: Vec<_> = registry.folder_names().collect();
        assert_eq!(names.len(), 8);
        assert_eq!(names.first(), Some(&"Images"));
        assert_eq!(names.last(), Some(&OTHERS));
    }

    #[test]
    fn test_table_surface_matches_default_categories() {
        let registry = Registry::default_table();
        let names: Vec<_> = registry.categories().iter().map(|c| &c.name).collect();
        assert_eq!(
            names,
            [
                "Images",
                "Videos",
                "Documents",
                "Music",
                "Archives",
                "Executables",
                "Code"
            ]
        );
    }
}
