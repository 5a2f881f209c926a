use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

/// Home, CV and error pages: a title for the page, the navigation area it
/// belongs to and an optional block of already rendered HTML.
#[derive(ramhorns::Content)]
pub struct PageItem<'a> {
    pub area: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub key: &'a str,
}

pub struct PageRenderer<'a> {
    pub template: Template<'a>,
}

impl PageRenderer<'_> {
    pub fn new(page_tpl_src: &str) -> io::Result<PageRenderer> {
        let template = match Template::new(page_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing page template: {}", e)));
            }
        };

        Ok(PageRenderer {
            template,
        })
    }

    pub fn render(&self, page: &PageItem) -> String {
        self.template.render(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_page() {
        let renderer = PageRenderer::new("<title>{{title}}</title><nav>{{area}}</nav>{{{content}}}").unwrap();
        let res = renderer.render(&PageItem {
            area: "CV",
            title: "CV",
            content: "<p>Hello</p>",
            key: "",
        });
        assert_eq!(res, "<title>CV</title><nav>CV</nav><p>Hello</p>");
    }

    #[test]
    fn render_not_found() {
        let renderer = PageRenderer::new("No post named {{key}}").unwrap();
        let res = renderer.render(&PageItem {
            area: "Blog",
            title: "Post not found",
            content: "",
            key: "<missing>",
        });
        assert_eq!(res, "No post named &lt;missing&gt;");
    }
}
