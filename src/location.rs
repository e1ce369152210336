use url::Url;

/// The current navigation location of the client.
///
/// Holds the application root (the registered redirect URI) and the address
/// currently "visible" to the user, which after an authorization redirect
/// carries the `#access_token=...` fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    root: Url,
    current: Url,
}

impl Location {
    /// A location sitting at the application root, without a fragment.
    pub fn new(root: Url) -> Self {
        let mut root = root;
        root.set_fragment(None);
        Self {
            current: root.clone(),
            root,
        }
    }

    pub fn parse_root(root: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(root)?))
    }

    /// The location the browser lands on after an authorization redirect.
    ///
    /// `href` is the full redirect URL, fragment included.
    pub fn from_redirect(root: Url, href: &str) -> Result<Self, url::ParseError> {
        let current = Url::parse(href)?;
        let mut location = Self::new(root);
        location.current = current;
        Ok(location)
    }

    /// Same as [`Location::from_redirect`] when only the raw fragment is known.
    pub fn with_fragment(root: Url, fragment: &str) -> Self {
        let mut location = Self::new(root);
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        if !fragment.is_empty() {
            location.current.set_fragment(Some(fragment));
        }
        location
    }

    pub fn fragment(&self) -> Option<&str> {
        self.current.fragment().filter(|f| !f.is_empty())
    }

    pub fn clear_fragment(&mut self) {
        self.current.set_fragment(None);
    }

    /// Full navigation back to the application root.
    pub fn navigate_root(&mut self) {
        self.current = self.root.clone();
    }

    pub fn href(&self) -> &str {
        self.current.as_str()
    }

    pub fn root(&self) -> &Url {
        &self.root
    }
}
