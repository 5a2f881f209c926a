pub mod catalog;
pub mod config;
pub mod content;
pub mod logger;
pub mod server;
pub mod stylesheet;
pub mod view;
mod post_list;
mod query_string;
mod text_utils;
