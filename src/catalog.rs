use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use spdlog::{debug, warn};

use crate::config::Config;
use crate::content::content_file::ContentFile;
use crate::content::Post;
use crate::post_list::PostList;

/// Every post link starts with this path
pub const BLOG_URL_ROOT: &str = "/blog";

pub struct PostCatalog {
    post_list: PostList,
    url_root: String,
}

impl PostCatalog {
    pub fn new(posts_dir: PathBuf, url_root: &str, extension: &str) -> Self {
        PostCatalog {
            post_list: PostList {
                root_dir: posts_dir,
                extension: extension.to_string(),
            },
            url_root: url_root.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.paths.posts_dir.clone(), BLOG_URL_ROOT, config.blog.extension())
    }

    /// Published posts, newest first. A post is published when it has a date
    /// and that date is not after `today`.
    pub fn list_posts(&self, include_text: bool, today: NaiveDate) -> Result<Vec<Post>> {
        let mut posts = vec![];

        for file_path in self.post_list.retrieve_files()? {
            let post = match ContentFile::from_file(&self.url_root, file_path)
                .and_then(|content_file| content_file.into_post(include_text)) {
                Ok(post) => post,
                Err(e) => {
                    warn!("Leaving post out of the list: {:#}", e);
                    continue;
                }
            };

            let published = matches!(post.metadata.date, Some(date) if date <= today);
            if published {
                posts.push(post);
            } else {
                debug!("Post {} is not published", post.link);
            }
        }

        // sort contents by date reversed
        posts.sort_by(|a, b| b.metadata.date.cmp(&a.metadata.date));

        Ok(posts)
    }

    /// The post stored as `<key>.<extension>`, rendered in full.
    /// Unpublished posts are still returned here.
    pub fn get_post(&self, key: &str) -> Result<Option<Post>> {
        if !is_valid_key(key) {
            return Ok(None);
        }

        let Some(file_path) = self.post_list.find_file(key)? else {
            return Ok(None);
        };

        let content_file = ContentFile::from_file(&self.url_root, file_path)?;
        Ok(Some(content_file.into_post(true)?))
    }
}

pub fn filter_by_tag(posts: Vec<Post>, tag: &str) -> Vec<Post> {
    posts.into_iter()
        .filter(|post| post.has_tag(tag))
        .collect()
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.starts_with('.') && !key.contains(['/', '\\'])
}
