use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::Post;
use crate::query_string::QueryString;
use crate::text_utils::format_date;

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    area: &'a str,
    title: &'a str,
    post_list: Vec<PostItem<'a>>,
    current_tag: &'a str,
    has_tag: bool,
    is_empty: bool,
}

#[derive(ramhorns::Content)]
struct PostItem<'a> {
    date: String,
    link: &'a str,
    title: &'a str,
    tags: Vec<ViewTag<'a>>,
}

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
    tag_query: String,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing list template: {}", e)));
            }
        };

        Ok(ListRenderer {
            template,
        })
    }

    pub fn render(&self, posts: &[Post], current_tag: Option<&str>) -> String {
        let mut post_list = vec![];
        for post in posts {
            let post_item = PostItem {
                date: post.metadata.date.as_ref().map(format_date).unwrap_or_default(),
                link: post.link.as_str(),
                title: post.title(),
                tags: post.tags().iter()
                    .map(|t| ViewTag { tag: t.as_str(), tag_query: QueryString::tag_query(t) })
                    .collect(),
            };
            post_list.push(post_item);
        }

        self.template.render(&ListPage {
            area: "Blog",
            title: "Blog",
            post_list,
            current_tag: current_tag.unwrap_or(""),
            has_tag: current_tag.is_some(),
            is_empty: posts.is_empty(),
        })
    }
}
