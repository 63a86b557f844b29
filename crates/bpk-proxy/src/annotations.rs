/// Row highlight colours offered by intercepting proxies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HighlightColor {
    #[default]
    None,
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Pink,
    Magenta,
    Gray,
}

/// Write access to the proxy's per-request annotations.
pub trait Annotations {
    fn set_highlight(&mut self, color: HighlightColor);

    /// Replace the request's notes.
    fn set_notes(&mut self, notes: String);
}
