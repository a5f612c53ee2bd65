use url::Url;

/// Resolves an href or image source against the site base URL
///
/// # Resolution Rules
///
/// | Input | Result |
/// |-------|--------|
/// | `http://...` / `https://...` | unchanged |
/// | `//cdn.example.com/a.jpg` | `https://cdn.example.com/a.jpg` |
/// | `/product/1` | base origin + path |
/// | `item/1` | joined onto the base path |
///
/// Returns None for empty values, fragment-only links and
/// `javascript:`, `mailto:`, `tel:` and `data:` URIs.
///
/// # Examples
///
/// ```
/// use product_scout::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://shop.example.com/store/").unwrap();
/// assert_eq!(
///     resolve_link("/product/x100", &base).as_deref(),
///     Some("https://shop.example.com/product/x100")
/// );
/// ```
pub fn resolve_link(href: &str, base: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(href.to_string());
    }

    if href.starts_with("//") {
        return Some(format!("https:{}", href));
    }

    if href.starts_with('/') {
        return Some(format!("{}{}", site_origin(base), href));
    }

    base.join(href).ok().map(|u| u.to_string())
}

/// Returns the scheme, host and port of a URL without a trailing slash
pub fn site_origin(base: &Url) -> String {
    base.origin().ascii_serialization()
}
