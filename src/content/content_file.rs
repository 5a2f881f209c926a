use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::content::document::Document;
use crate::content::metadata::extract_metadata_and_strip;
use crate::content::Post;

pub struct ContentFile {
    pub link: String,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(url_root: &str, file_path: PathBuf) -> Result<ContentFile> {
        let link = Self::link_for(url_root, &file_path)?;
        let raw_content = fs::read_to_string(&file_path)
            .with_context(|| format!("Error reading post file {}", file_path.display()))?;

        Ok(ContentFile {
            link,
            file_path,
            raw_content,
        })
    }

    /// `/blog` + `posts/2024/hello.markdown` gives `/blog/hello`
    pub fn link_for(url_root: &str, file_path: &Path) -> Result<String> {
        let stem = file_path.file_stem()
            .and_then(|s| s.to_str())
            .with_context(|| format!("Invalid post file name {}", file_path.display()))?;

        Ok(format!("{}/{}", url_root.trim_end_matches('/'), stem))
    }

    pub fn into_post(self, include_text: bool) -> Result<Post> {
        let mut document = Document::parse(&self.raw_content)
            .with_context(|| format!("file={}", self.file_path.display()))?;
        let metadata = extract_metadata_and_strip(&mut document)
            .with_context(|| format!("file={}", self.file_path.display()))?;

        let text = if include_text {
            Some(document.to_html().with_context(|| format!("file={}", self.file_path.display()))?)
        } else {
            None
        };

        Ok(Post {
            link: self.link,
            metadata,
            text,
        })
    }
}
