use std::collections::HashMap;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    /// `tag=<tag>` form-encoded, read back unchanged by `get_tag`
    pub fn tag_query(tag: &str) -> String {
        serde_urlencoded::to_string([("tag", tag)]).unwrap_or_default()
    }

    pub fn get_tag(&self) -> Option<&str> {
        self.items.get("tag")
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_tag() {
        assert_eq!(QueryString::from("tag=rust").get_tag(), Some("rust"));
        assert_eq!(QueryString::from("tag=c%2B%2B&page=2").get_tag(), Some("c++"));
        assert_eq!(QueryString::from("tag=").get_tag(), None);
        assert_eq!(QueryString::from("page=2").get_tag(), None);
    }

    #[test]
    fn test_tag_query() {
        assert_eq!(QueryString::tag_query("rust"), "tag=rust");
        assert_eq!(QueryString::tag_query("c++"), "tag=c%2B%2B");
        assert_eq!(QueryString::tag_query("r&d"), "tag=r%26d");

        for tag in ["c++", "r&d", "c#", "a b", "50%"] {
            let query = QueryString::tag_query(tag);
            assert_eq!(QueryString::from(&query).get_tag(), Some(tag));
        }
    }

    #[test]
    fn test_parse_query_str() {
        let buf = "bread=baguette&cheese=comt%C3%A9";
        let meal = vec![
            ("bread".to_owned(), "baguette".to_owned()),
            ("cheese".to_owned(), "comté".to_owned()),
        ].into_iter().collect::<HashMap<_, _>>();

        assert_eq!(QueryString::from(buf), QueryString { items: meal });
    }

    #[test]
    fn test_parse_invalid_query_str() {
        let expected = QueryString {
            items: Default::default(),
        };
        assert_eq!(QueryString::from(""), expected);
    }
}
