use crate::{Link, XrdDocument};
use federation_types::{Error, Format, Result};

/// Relation of the WebFinger lookup link.
pub const LRDD_REL: &str = "lrdd";
/// Media type advertised on the lookup link.
pub const LRDD_TYPE: &str = "application/xrd+xml";
/// Placeholder the client replaces with the account URI.
pub const URI_PLACEHOLDER: &str = "{uri}";

/// The `/.well-known/host-meta` document of a pod.
///
/// It carries one thing: the template a client fills in to find the
/// WebFinger document of an account on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostMeta {
    webfinger_template_url: String,
}

impl HostMeta {
    /// Derives the host-meta of the pod served at `base_url`.
    ///
    /// Only `http` and `https` bases are accepted; a trailing slash is
    /// dropped.
    pub fn from_base_url(base_url: &str) -> Result<Self> {
        let base = base_url.trim().trim_end_matches('/');
        let host = base
            .strip_prefix("https://")
            .or_else(|| base.strip_prefix("http://"))
            .ok_or_else(|| Error::InvalidDocument(format!("base url must be http or https: {base_url:?}")))?;
        if host.is_empty() {
            return Err(Error::InvalidDocument(format!("base url has no host: {base_url:?}")));
        }
        Ok(Self {
            webfinger_template_url: format!("{base}/.well-known/webfinger?resource={URI_PLACEHOLDER}"),
        })
    }

    pub fn webfinger_template_url(&self) -> &str {
        &self.webfinger_template_url
    }

    /// Fills the lookup template for an account URI such as
    /// `acct:alice@pod.example.org`.
    pub fn webfinger_url(&self, account_uri: &str) -> String {
        self.webfinger_template_url.replace(URI_PLACEHOLDER, account_uri)
    }

    /// Builds the XRD document served for this host.
    pub fn to_document(&self) -> XrdDocument {
        let mut doc = XrdDocument::new();
        doc.add_link(
            Link::new(LRDD_REL)
                .with_type(LRDD_TYPE)
                .with_template(self.webfinger_template_url.clone()),
        );
        doc
    }

    /// Reads the lookup template out of a fetched host-meta document.
    pub fn from_document(doc: &XrdDocument) -> Result<Self> {
        doc.links_with_rel(LRDD_REL)
            .filter_map(|link| link.template.as_deref())
            .find(|template| template.contains(URI_PLACEHOLDER))
            .map(|template| Self {
                webfinger_template_url: template.to_string(),
            })
            .ok_or_else(|| Error::InvalidDocument("host-meta has no lrdd template link".into()))
    }

    pub fn parse(input: &[u8], format: Format) -> Result<Self> {
        Self::from_document(&XrdDocument::parse(input, format)?)
    }

    pub fn serialize(&self, format: Format) -> Result<Vec<u8>> {
        self.to_document().serialize(format)
    }
}
