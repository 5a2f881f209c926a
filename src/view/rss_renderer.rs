use std::io::Cursor;

use chrono::NaiveDateTime;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::content::Post;
use crate::text_utils::{format_rfc822, start_of_day};

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
  <title>My blog</title>
  <link>https://example.com</link>
  <description>Posts about things</description>
  <pubDate>Wed, 01 May 2024 00:00:00 GMT</pubDate>
  <lastBuildDate>Wed, 01 May 2024 00:00:00 GMT</lastBuildDate>
  <item>
    <title>My Title</title>
    <link>https://example.com/blog/my-title</link>
    <guid>https://example.com/blog/my-title</guid>
    <description><![CDATA[<h1>My Title</h1><p>Body text.</p>]]></description>
    <pubDate>Wed, 01 May 2024 00:00:00 GMT</pubDate>
  </item>
</channel>
</rss>
*/

pub struct RssChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
}

impl<'a> RssChannel<'a> {
    /// `posts` are expected newest first. The channel dates come from the
    /// newest post, or from `now` when there is none.
    pub fn render(&self, posts: &[Post], now: NaiveDateTime) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", self.ch_title)?;
        push_text(&mut writer, "link", self.ch_link)?;
        push_text(&mut writer, "description", self.ch_desc)?;

        let last_update = posts.first()
            .and_then(|post| post.metadata.date.as_ref())
            .map(start_of_day)
            .unwrap_or(now);
        let last_update = format_rfc822(&last_update);
        push_text(&mut writer, "pubDate", &last_update)?;
        push_text(&mut writer, "lastBuildDate", &last_update)?;

        for post in posts {
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", post.title())?;

            let link = full_link(self.ch_link, &post.link);
            push_text(&mut writer, "link", &link)?;
            push_text(&mut writer, "guid", &link)?;

            push_cdata(&mut writer, "description", post.text.as_deref().unwrap_or(""))?;

            if let Some(ref date) = post.metadata.date {
                push_text(&mut writer, "pubDate", &format_rfc822(&start_of_day(date)))?;
            }

            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn full_link(base_url: &str, link: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), link.trim_start_matches('/'))
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if text.contains("]]>") {
        let new_text = text.replace("]]>", "]] >");
        writer.write_event(Event::CData(BytesCData::new(&new_text)))?;
    } else {
        writer.write_event(Event::CData(BytesCData::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
