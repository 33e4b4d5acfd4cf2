//! SOAP header blocks.

use thiserror::Error;

use crate::qname::{QName, QNameParseError};
use crate::soap::version::SoapVersion;

/// Local name of the attribute that references the block a `NotUnderstood`
/// element reports.
const QNAME_ATTRIBUTE: &str = "qname";

/// Errors raised while manipulating a SOAP header.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SoapHeaderError {
    /// The operation exists only in another SOAP version.
    #[error("{operation} is not supported by {version}")]
    UnsupportedOperation {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Version of the header.
        version: SoapVersion,
    },
    /// A `NotUnderstood` reference could not be parsed.
    #[error("invalid NotUnderstood reference: {0}")]
    InvalidReference(#[from] QNameParseError),
}

/// One header block: a qualified name, the mustUnderstand flag, its target
/// actor or role, text content and extra attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapHeaderElement {
    name: QName,
    must_understand: bool,
    actor_or_role: Option<String>,
    text: String,
    attributes: Vec<(QName, String)>,
}

impl SoapHeaderElement {
    /// Creates an optional block targeted at the ultimate receiver.
    #[must_use]
    pub const fn new(name: QName) -> Self {
        Self {
            name,
            must_understand: false,
            actor_or_role: None,
            text: String::new(),
            attributes: Vec::new(),
        }
    }

    /// Sets the mustUnderstand flag.
    #[must_use]
    pub const fn with_must_understand(mut self, must_understand: bool) -> Self {
        self.must_understand = must_understand;
        self
    }

    /// Targets the block at `actor_or_role`.
    #[must_use]
    pub fn with_actor_or_role(mut self, actor_or_role: impl Into<String>) -> Self {
        self.actor_or_role = Some(actor_or_role.into());
        self
    }

    /// Sets the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Adds or replaces an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: QName, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Adds or replaces an attribute in place.
    pub fn set_attribute(&mut self, name: QName, value: impl Into<String>) {
        let text = value.into();
        if let Some(entry) = self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            entry.1 = text;
            return;
        }
        self.attributes.push((name, text));
    }

    /// Qualified name of the block.
    #[must_use]
    pub const fn name(&self) -> &QName {
        &self.name
    }

    /// Whether the receiver must process this block or fault.
    #[must_use]
    pub const fn must_understand(&self) -> bool {
        self.must_understand
    }

    /// Explicit actor or role; `None` targets the ultimate receiver.
    #[must_use]
    pub fn actor_or_role(&self) -> Option<&str> {
        self.actor_or_role.as_deref()
    }

    /// Text content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &QName) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, value)| value.as_str())
    }

    /// For a `NotUnderstood` block, the name of the block it reports.
    ///
    /// # Errors
    ///
    /// Returns [`SoapHeaderError::InvalidReference`] when the reference is
    /// not valid Clark notation.
    pub fn not_understood_reference(&self) -> Result<Option<QName>, SoapHeaderError> {
        self.attribute(&QName::new("", QNAME_ATTRIBUTE))
            .map(str::parse)
            .transpose()
            .map_err(SoapHeaderError::from)
    }
}

/// The header section of a SOAP envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapHeader {
    version: SoapVersion,
    elements: Vec<SoapHeaderElement>,
}

impl SoapHeader {
    /// Creates an empty header.
    #[must_use]
    pub const fn new(version: SoapVersion) -> Self {
        Self {
            version,
            elements: Vec::new(),
        }
    }

    /// SOAP version of the enclosing envelope.
    #[must_use]
    pub const fn version(&self) -> SoapVersion {
        self.version
    }

    /// Appends a block.
    pub fn add_header_element(&mut self, element: SoapHeaderElement) {
        self.elements.push(element);
    }

    /// All blocks in document order.
    #[must_use]
    pub fn examine_all_header_elements(&self) -> impl Iterator<Item = &SoapHeaderElement> {
        self.elements.iter()
    }

    /// Blocks flagged mustUnderstand whose target is exactly `actor_or_role`.
    ///
    /// A block without an explicit target is matched against the version's
    /// ultimate-receiver role. The iterator is lazy and may be recreated
    /// freely.
    #[must_use]
    pub fn examine_must_understand_header_elements<'a>(
        &'a self,
        actor_or_role: &'a str,
    ) -> impl Iterator<Item = &'a SoapHeaderElement> + 'a {
        let ultimate_receiver = self.version.ultimate_receiver_role_uri();
        self.elements.iter().filter(move |element| {
            element.must_understand
                && element.actor_or_role().unwrap_or(ultimate_receiver) == actor_or_role
        })
    }

    /// Appends a SOAP 1.2 `NotUnderstood` block reporting `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SoapHeaderError::UnsupportedOperation`] for SOAP 1.1
    /// headers, which have no such block.
    pub fn add_not_understood_header_element(&mut self, name: &QName) -> Result<(), SoapHeaderError> {
        if self.version != SoapVersion::V12 {
            return Err(SoapHeaderError::UnsupportedOperation {
                operation: "NotUnderstood header elements",
                version: self.version,
            });
        }
        let element = SoapHeaderElement::new(self.version.not_understood_name())
            .with_attribute(QName::new("", QNAME_ATTRIBUTE), name.to_string());
        self.add_header_element(element);
        Ok(())
    }
}
