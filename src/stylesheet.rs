use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use lazy_static::lazy_static;
use regex::Regex;

const STYLE_EXTENSION: &str = "scss";

/// Compiles `<styles_dir>/<style>.scss` into plain CSS
pub fn compile_stylesheet(styles_dir: &Path, style: &str) -> Result<String> {
    let source = stylesheet_path(styles_dir, style)?;
    grass::from_path(&source, &grass::Options::default())
        .map_err(|e| anyhow!("Error compiling stylesheet {}: {}", source.display(), e))
}

/// `site.css` in a request path names the `site` stylesheet
pub fn style_name(file_name: &str) -> Option<&str> {
    file_name.strip_suffix(".css")
        .filter(|style| is_valid_style(style))
}

fn is_valid_style(style: &str) -> bool {
    lazy_static! {
        static ref STYLE_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
    }

    STYLE_REGEX.is_match(style)
}

fn stylesheet_path(styles_dir: &Path, style: &str) -> Result<PathBuf> {
    if !is_valid_style(style) {
        bail!("Invalid stylesheet name [{}]", style);
    }

    Ok(styles_dir.join(format!("{}.{}", style, STYLE_EXTENSION)))
}
