//! Discovery documents for the service's own public origin

/// Public origin the documents describe
pub const PUBLIC_ORIGIN: &str = "https://www.seenbygeo.com";

/// Paths listed in the sitemap, relative to [`PUBLIC_ORIGIN`]
pub const SITEMAP_PATHS: &[&str] = &["", "/product", "/pricing", "/company", "/news", "/playbooks"];

/// `robots.txt` allowing every agent and pointing at the sitemap
pub fn robots_txt() -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        PUBLIC_ORIGIN
    )
}

/// `sitemap.xml` listing the public pages
pub fn sitemap_xml() -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for path in SITEMAP_PATHS {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}{}</loc>\n    <changefreq>weekly</changefreq>\n    <priority>0.8</priority>\n  </url>\n",
            PUBLIC_ORIGIN, path
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}
