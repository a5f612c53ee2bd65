use crate::catalog::CatalogError;
use regex::Regex;

/// A catalog model together with its compiled whole-word pattern
#[derive(Debug, Clone)]
pub struct ModelPattern {
    model: String,
    regex: Regex,
}

impl ModelPattern {
    /// Compiles `\b<model>\b` with the model text escaped
    ///
    /// # Examples
    ///
    /// ```
    /// use product_scout::catalog::ModelPattern;
    ///
    /// let pattern = ModelPattern::new("X100").unwrap();
    /// assert!(pattern.is_match("MODEL: X100 PRO"));
    /// assert!(!pattern.is_match("BX100"));
    /// ```
    pub fn new(model: &str) -> Result<Self, CatalogError> {
        let regex = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(model))).map_err(
            |source| CatalogError::Pattern {
                model: model.to_string(),
                source,
            },
        )?;

        Ok(Self {
            model: model.to_string(),
            regex,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}
