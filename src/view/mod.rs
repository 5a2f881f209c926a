pub mod list_renderer;
pub mod page_renderer;
pub mod post_renderer;
pub mod rss_renderer;
