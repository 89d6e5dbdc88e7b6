use crate::entry::Entry;

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// Renders document headers, footers and entry fragments for one kind of sitemap document.
///
/// `url_set` documents list pages (`<urlset>` / `<url>`), `sitemap_index` documents list
/// other sitemap files (`<sitemapindex>` / `<sitemap>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    root_tag: &'static str,
    entry_tag: &'static str,
    encoding: String,
}

impl Renderer {
    pub fn url_set(encoding: impl Into<String>) -> Self {
        Renderer {
            root_tag: "urlset",
            entry_tag: "url",
            encoding: encoding.into(),
        }
    }

    pub fn sitemap_index(encoding: impl Into<String>) -> Self {
        Renderer {
            root_tag: "sitemapindex",
            entry_tag: "sitemap",
            encoding: encoding.into(),
        }
    }

    pub fn root_tag(&self) -> &str {
        self.root_tag
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn render_header(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"{}\"?>\n<{} xmlns=\"{}\">",
            self.encoding, self.root_tag, SITEMAP_NAMESPACE
        )
    }

    /// Fragment for a single entry. Optional fields that are not set produce no tag.
    pub fn render_entry(&self, entry: &Entry) -> String {
        let mut xml = format!(
            "\n    <{}><loc>{}</loc>",
            self.entry_tag,
            escape_xml(entry.location().as_str())
        );

        if let Some(freq) = entry.change_frequency() {
            xml.push_str(&format!("<changefreq>{}</changefreq>", freq));
        }
        if let Some(priority) = entry.priority() {
            xml.push_str(&format!("<priority>{}</priority>", priority));
        }
        if let Some(last_modified) = entry.last_modified() {
            xml.push_str(&format!("<lastmod>{}</lastmod>", last_modified));
        }

        xml.push_str(&format!("</{}>", self.entry_tag));
        xml
    }

    pub fn render_footer(&self) -> String {
        format!("\n</{}>\n", self.root_tag)
    }
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
