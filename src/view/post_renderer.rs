use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::Post;
use crate::query_string::QueryString;
use crate::text_utils::format_date;

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
    tag_query: String,
}

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    area: &'a str,
    title: &'a str,
    link: &'a str,
    tags: &'a Vec<ViewTag<'a>>,
    date: &'a str,
    text: &'a str,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(view_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing post view template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
        })
    }

    pub fn render(&self, post: &Post) -> String {
        let ref tags: Vec<ViewTag> = post.tags().iter()
            .map(|t| ViewTag { tag: t.as_str(), tag_query: QueryString::tag_query(t) })
            .collect();
        let date = post.metadata.date.as_ref().map(format_date).unwrap_or_default();
        self.template.render(&ViewItem {
            area: "Blog",
            title: post.title(),
            link: post.link.as_str(),
            tags,
            date: date.as_str(),
            text: post.text.as_deref().unwrap_or(""),
        })
    }
}
