use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::validate_class_name;

/// Detector label vocabulary, loaded from a newline-delimited class list.
#[derive(Clone, Debug)]
pub struct ClassVocabulary {
    names: Vec<String>,
}

impl ClassVocabulary {
    /// Built-in tableware vocabulary, used when no class list is configured.
    pub fn tableware() -> Self {
        let names = [
            "fork",
            "knife",
            "spoon",
            "plate",
            "bowl",
            "cup",
            "wine glass",
            "napkin",
        ];
        Self {
            names: names.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// Load a class list: one name per line, blank lines skipped, every
    /// name validated.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading class list {}", path.display()))?;

        let mut names = Vec::new();
        for line in raw.lines() {
            let name = line.trim();
            if name.is_empty() {
                continue;
            }
            validate_class_name(name)
                .with_context(|| format!("class list {}", path.display()))?;
            names.push(name.to_string());
        }

        if names.is_empty() {
            return Err(anyhow!("class list {} has no entries", path.display()));
        }
        Ok(Self { names })
    }

    pub fn contains(&self, label: &str) -> bool {
        self.names.iter().any(|name| name == label)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_one_class_per_line_and_skips_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fork\n\nknife\n  spoon  ").unwrap();

        let vocabulary = ClassVocabulary::load(file.path()).unwrap();
        assert_eq!(vocabulary.len(), 3);
        assert!(vocabulary.contains("spoon"));
        assert!(!vocabulary.contains("plate"));
    }

    #[test]
    fn rejects_invalid_class_names() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fork\nKNIFE").unwrap();

        assert!(ClassVocabulary::load(file.path()).is_err());
    }

    #[test]
    fn rejects_empty_class_lists() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(ClassVocabulary::load(file.path()).is_err());
    }

    #[test]
    fn tableware_covers_the_target_classes() {
        let vocabulary = ClassVocabulary::tableware();
        for label in ["fork", "knife", "spoon"] {
            assert!(vocabulary.contains(label));
        }
    }
}
