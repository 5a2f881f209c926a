use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;
use std::{fs, io};

use anyhow::{Context, Result};
use chrono::Utc;
use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use spdlog::{error, info, warn};

use crate::catalog::{filter_by_tag, PostCatalog};
use crate::config::Config;
use crate::content::document::Document;
use crate::content::Post;
use crate::query_string::QueryString;
use crate::stylesheet::{compile_stylesheet, style_name};
use crate::view::list_renderer::ListRenderer;
use crate::view::page_renderer::{PageItem, PageRenderer};
use crate::view::post_renderer::PostRenderer;
use crate::view::rss_renderer::RssChannel;

pub struct AppState {
    pub config: Config,
}

type SharedState = web::types::State<Arc<AppState>>;

fn html_response(body: String) -> web::HttpResponse {
    web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn server_error(what: &str, e: impl Display) -> web::HttpResponse {
    error!("Error {}: {}", what, e);
    web::HttpResponse::InternalServerError()
        .body(format!("Error {}", what))
}

pub fn read_template(tpl_dir: &Path, file_name: &str) -> io::Result<String> {
    let full_path = tpl_dir.join(file_name);
    fs::read_to_string(&full_path)
        .map_err(|e| io::Error::new(e.kind(), format!("Error loading template {}: {}", full_path.display(), e)))
}

/// Markdown kept next to the page template, e.g. `cv.markdown` for the CV.
/// Pages without one render with empty content.
fn render_page_content(config: &Config, page_name: &str) -> Result<String> {
    let page_path = config.paths.pages_dir.join(format!("{}.{}", page_name, config.blog.extension()));
    if !page_path.is_file() {
        return Ok(String::new());
    }

    let raw_content = fs::read_to_string(&page_path)
        .with_context(|| format!("Error reading page {}", page_path.display()))?;
    Document::parse(&raw_content)?.to_html()
}

fn render_page(config: &Config, page_name: &str, area: &str, title: &str) -> Result<String> {
    let template_src = read_template(&config.paths.template_dir, &format!("{}.tpl", page_name))?;
    let content = render_page_content(config, page_name)?;

    let renderer = PageRenderer::new(&template_src)?;
    Ok(renderer.render(&PageItem {
        area,
        title,
        content: &content,
        key: "",
    }))
}

fn render_not_found(config: &Config, key: &str) -> Result<String> {
    let template_src = read_template(&config.paths.template_dir, "not_found.tpl")?;
    let renderer = PageRenderer::new(&template_src)?;
    Ok(renderer.render(&PageItem {
        area: "Blog",
        title: "Post not found",
        content: "",
        key,
    }))
}

fn render_list(config: &Config, posts: &[Post], tag: Option<&str>) -> Result<String> {
    let template_src = read_template(&config.paths.template_dir, "blog_index.tpl")?;
    let list_renderer = ListRenderer::new(&template_src)?;
    Ok(list_renderer.render(posts, tag))
}

fn render_post(config: &Config, post: &Post) -> Result<String> {
    let template_src = read_template(&config.paths.template_dir, "post.tpl")?;
    let post_renderer = PostRenderer::new(&template_src)?;
    Ok(post_renderer.render(post))
}

fn get_tag(req: &HttpRequest) -> Option<String> {
    let query_str = req.uri().query()?;
    QueryString::from(query_str).get_tag().map(|tag| tag.to_string())
}

#[web::get("/")]
async fn index(state: SharedState) -> web::HttpResponse {
    match render_page(&state.config, "index", "Home", "Home") {
        Ok(rendered) => html_response(rendered),
        Err(e) => server_error("rendering home page", format!("{:#}", e)),
    }
}

#[web::get("/cv")]
async fn cv(state: SharedState) -> web::HttpResponse {
    match render_page(&state.config, "cv", "CV", "CV") {
        Ok(rendered) => html_response(rendered),
        Err(e) => server_error("rendering CV page", format!("{:#}", e)),
    }
}

#[web::get("/blog")]
async fn blog(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let config = &state.config;
    let catalog = PostCatalog::from_config(config);

    let posts = match catalog.list_posts(false, Utc::now().date_naive()) {
        Ok(posts) => posts,
        Err(e) => return server_error("listing posts", format!("{:#}", e)),
    };

    let tag = get_tag(&req);
    let posts = match tag {
        Some(ref tag) => filter_by_tag(posts, tag),
        None => posts,
    };

    match render_list(config, &posts, tag.as_deref()) {
        Ok(rendered) => html_response(rendered),
        Err(e) => server_error("rendering post list", format!("{:#}", e)),
    }
}

#[web::get("/blog/rss")]
async fn rss(state: SharedState) -> web::HttpResponse {
    let config = &state.config;
    let Some(ref rss_feed) = config.rss_feed else {
        return web::HttpResponse::NotFound().body("RSS feed is not enabled");
    };

    let posts = match PostCatalog::from_config(config).list_posts(true, Utc::now().date_naive()) {
        Ok(posts) => posts,
        Err(e) => return server_error("listing posts for the feed", format!("{:#}", e)),
    };

    let channel = RssChannel {
        ch_title: &rss_feed.title,
        ch_link: &rss_feed.site_url,
        ch_desc: &rss_feed.description,
    };

    match channel.render(&posts, Utc::now().naive_utc()) {
        Ok(xml) => web::HttpResponse::Ok()
            .content_type("application/rss+xml; charset=utf-8")
            .body(xml),
        Err(e) => server_error("rendering the feed", e),
    }
}

#[web::get("/blog/{key}")]
async fn post(key: web::types::Path<String>, state: SharedState) -> web::HttpResponse {
    let config = &state.config;
    let key = key.into_inner();

    let post = match PostCatalog::from_config(config).get_post(&key) {
        Ok(Some(post)) => post,
        Ok(None) => {
            info!("Post not found: {}", key);
            let body = render_not_found(config, &key).unwrap_or_else(|e| {
                warn!("Error rendering not found page: {:#}", e);
                "Post not found".to_string()
            });
            return web::HttpResponse::NotFound()
                .content_type("text/html; charset=utf-8")
                .body(body);
        }
        Err(e) => return server_error(&format!("loading post {}", key), format!("{:#}", e)),
    };

    match render_post(config, &post) {
        Ok(rendered) => html_response(rendered),
        Err(e) => server_error(&format!("rendering post {}", key), format!("{:#}", e)),
    }
}

#[web::get("/css/{file_name}")]
async fn stylesheet(file_name: web::types::Path<String>, state: SharedState) -> web::HttpResponse {
    let file_name = file_name.into_inner();
    let Some(style) = style_name(&file_name) else {
        return web::HttpResponse::NotFound().finish();
    };

    match compile_stylesheet(&state.config.paths.styles_dir, style) {
        Ok(css) => web::HttpResponse::Ok()
            .content_type("text/css; charset=utf-8")
            .body(css),
        Err(e) => server_error(&format!("compiling stylesheet {}", style), e),
    }
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: SharedState) -> Result<NamedFile, web::Error> {
    if path.contains("..") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join(path.into_inner());
    Ok(NamedFile::open(file_path)?)
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;

    info!("Posts directory: {}", config.paths.posts_dir.display());
    info!("Listening on {}:{}", bind_addr, bind_port);

    let app_state = Arc::new(AppState {
        config,
    });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(cv)
            .service(blog)
            // registered before /blog/{key} so "rss" is never read as a post key
            .service(rss)
            .service(post)
            .service(stylesheet)
            .service(public_files)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
