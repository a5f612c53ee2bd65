//! Model catalog loading and matching
//!
//! The catalog is a plain text list of model identifiers, one per line.
//! Lines are trimmed, empty lines are skipped and identifiers are stored
//! upper-cased. Matching is whole-word and case-insensitive.

mod matcher;

pub use matcher::ModelPattern;

use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read model list {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Model list {0} contains no models")]
    Empty(String),

    #[error("Invalid model pattern '{model}': {source}")]
    Pattern { model: String, source: regex::Error },
}

/// Ordered, immutable list of known model identifiers
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    patterns: Vec<ModelPattern>,
}

impl ModelCatalog {
    /// Loads a catalog from a file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a text file with one model per line
    ///
    /// # Returns
    ///
    /// * `Ok(ModelCatalog)` - At least one model was loaded
    /// * `Err(CatalogError)` - The file could not be read or holds no models
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let catalog = Self::from_lines(content.lines())?;
        if catalog.is_empty() {
            return Err(CatalogError::Empty(path.display().to_string()));
        }

        tracing::info!("Loaded {} models from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Builds a catalog from lines, preserving their order
    pub fn from_lines<I, S>(lines: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_uppercase())
            .filter(|model| !model.is_empty())
            .map(|model| ModelPattern::new(&model))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Finds the first catalog model that appears as a whole word in `text`
    ///
    /// Models are tried in catalog order and the first hit wins, even when a
    /// later model would be a longer match.
    ///
    /// # Examples
    ///
    /// ```
    /// use product_scout::ModelCatalog;
    ///
    /// let catalog = ModelCatalog::from_lines(["x100", "X200"]).unwrap();
    /// assert_eq!(catalog.find_model("Model: X100 Pro"), Some("X100"));
    /// assert_eq!(catalog.find_model("Model X1000"), None);
    /// ```
    pub fn find_model(&self, text: &str) -> Option<&str> {
        let upper = text.to_uppercase();

        self.patterns
            .iter()
            .find(|pattern| pattern.is_match(&upper))
            .map(|pattern| pattern.model())
    }

    /// Model identifiers in catalog order
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.model())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn build(models: &[&str]) -> ModelCatalog {
        ModelCatalog::from_lines(models.iter().copied()).unwrap()
    }

    #[test]
    fn test_whole_word_match() {
        let catalog = build(&["X100"]);
        assert_eq!(catalog.find_model("Model: X100 Pro"), Some("X100"));
    }

    #[test]
    fn test_no_match_on_longer_token() {
        let catalog = build(&["X100"]);
        assert_eq!(catalog.find_model("Model: X1000"), None);
        assert_eq!(catalog.find_model("Model: BX100"), None);
    }

    #[test]
    fn test_case_insensitive() {
        let catalog = build(&["x100"]);
        assert_eq!(catalog.find_model("the x100 blender"), Some("X100"));
    }

    #[test]
    fn test_catalog_order_wins_over_longest_match() {
        // "X100" comes first, so it wins even though "X100 PRO" is the longer match
        let catalog = build(&["X100", "X100 PRO"]);
        assert_eq!(catalog.find_model("X100 Pro in stock"), Some("X100"));

        let catalog = build(&["X100 PRO", "X100"]);
        assert_eq!(catalog.find_model("X100 Pro in stock"), Some("X100 PRO"));
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let catalog = build(&["A.B-7"]);
        assert_eq!(catalog.find_model("Part A.B-7 kit"), Some("A.B-7"));
        assert_eq!(catalog.find_model("Part AXB-7 kit"), None);
    }

    #[test]
    fn test_lines_trimmed_and_blank_skipped() {
        let catalog = build(&["  x100  ", "", "   ", "y200"]);
        assert_eq!(catalog.models().collect::<Vec<_>>(), vec!["X100", "Y200"]);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "X100\n\nY200").unwrap();

        let catalog = ModelCatalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_from_path_rejects_empty_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\n   \n").unwrap();

        let result = ModelCatalog::from_path(file.path());
        assert!(matches!(result, Err(CatalogError::Empty(_))));
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = ModelCatalog::from_path(Path::new("/nonexistent/models.txt"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
