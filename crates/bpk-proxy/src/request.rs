/// Declared body format of an intercepted request.
///
/// Mirrors the classification an intercepting proxy derives from the
/// `Content-Type` header. BlazorPack bodies normally arrive as
/// `Unknown` (`application/octet-stream`) or `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContentType {
    #[default]
    None,
    UrlEncoded,
    Multipart,
    Xml,
    Json,
    Amf,
    Unknown,
}

impl ContentType {
    /// Classify a raw `Content-Type` header value.
    pub fn from_header(value: &str) -> Self {
        let mime = value
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match mime.as_str() {
            "" => Self::None,
            "application/x-www-form-urlencoded" => Self::UrlEncoded,
            "application/x-amf" => Self::Amf,
            m if m.starts_with("multipart/") => Self::Multipart,
            m if m.ends_with("/json") || m.ends_with("+json") => Self::Json,
            m if m.ends_with("/xml") || m.ends_with("+xml") => Self::Xml,
            _ => Self::Unknown,
        }
    }

    /// Already a text format an analyst can read as-is.
    pub fn is_structured_text(self) -> bool {
        self == Self::Json
    }
}

/// Read-only view of a request held by the proxy.
///
/// Hosts implement this over their own request type; the inspector
/// never needs more than these accessors.
pub trait InterceptedRequest {
    /// Full request URL including the query string.
    fn url(&self) -> &str;

    /// Path and query, e.g. `/_blazor?id=QJ3a0`.
    fn path(&self) -> &str;

    fn content_type(&self) -> ContentType;

    fn body(&self) -> &[u8];

    /// Whether the host's target scope includes this request.
    fn is_in_scope(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_classification() {
        assert_eq!(ContentType::from_header(""), ContentType::None);
        assert_eq!(
            ContentType::from_header("application/json; charset=utf-8"),
            ContentType::Json
        );
        assert_eq!(
            ContentType::from_header("application/vnd.api+json"),
            ContentType::Json
        );
        assert_eq!(ContentType::from_header("text/xml"), ContentType::Xml);
        assert_eq!(
            ContentType::from_header("multipart/form-data; boundary=x"),
            ContentType::Multipart
        );
        assert_eq!(
            ContentType::from_header("Application/X-WWW-Form-Urlencoded"),
            ContentType::UrlEncoded
        );
        assert_eq!(
            ContentType::from_header("application/octet-stream"),
            ContentType::Unknown
        );
    }
}
