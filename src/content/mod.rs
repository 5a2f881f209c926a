use chrono::NaiveDate;

pub mod content_file;
pub mod document;
pub mod metadata;

/// Fields read from the lines before a post's first heading
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostMetadata {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub link: String,
    pub metadata: PostMetadata,
    pub text: Option<String>,
}

impl Post {
    pub fn title(&self) -> &str {
        self.metadata.title.as_deref().unwrap_or("")
    }

    pub fn tags(&self) -> &[String] {
        self.metadata.tags.as_deref().unwrap_or(&[])
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }
}
