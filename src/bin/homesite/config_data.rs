use std::fs;
use std::io;
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
template_dir = "res/template"
public_dir = "res/public"
posts_dir = "res/blog"
pages_dir = "res/pages"
styles_dir = "res/styles"

# Post files are <slug>.<extension>
[blog]
extension = "markdown"

[server]
address = "0.0.0.0"
port = 8001

[log]
level = "Info"
log_to_console = true

[rss_feed]
title = "My blog"
site_url = "http://localhost:8001"
description = "Things I write about"
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, CONFIG_SAMPLE)
}
