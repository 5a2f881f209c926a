use std::path::PathBuf;

use anyhow::{Context, Result};
use glob::Pattern;

pub struct PostList {
    pub root_dir: PathBuf,
    pub extension: String,
}

impl PostList {
    /// Every post file below the root directory, at any depth, sorted by path
    pub fn retrieve_files(&self) -> Result<Vec<PathBuf>> {
        self.glob(&format!("**/*.{}", Pattern::escape(&self.extension)))
    }

    /// First file named `<key>.<extension>` below the root directory
    pub fn find_file(&self, key: &str) -> Result<Option<PathBuf>> {
        let file_name = format!("{}.{}", key, self.extension);
        let files = self.glob(&format!("**/{}", Pattern::escape(&file_name)))?;
        Ok(files.into_iter().next())
    }

    fn glob(&self, file_pattern: &str) -> Result<Vec<PathBuf>> {
        let root = self.root_dir.to_str()
            .with_context(|| format!("Invalid posts directory {}", self.root_dir.display()))?;
        let pattern = format!("{}/{}", Pattern::escape(root.trim_end_matches('/')), file_pattern);

        let mut files = vec![];
        for entry in glob::glob(&pattern).with_context(|| format!("Invalid glob pattern {}", pattern))? {
            let path = entry?;
            if path.is_file() {
                files.push(path);
            }
        }
        Ok(files)
    }
}
