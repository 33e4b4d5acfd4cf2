//! Protocol-agnostic message abstraction.
//!
//! The dispatcher never parses XML. Messages expose their payload as an opaque
//! [`Payload`] whose root element name drives endpoint mapping, while the
//! serialised content is owned by whichever binding produced it.

use std::any::Any;
use std::fmt;

use crate::qname::QName;

/// Body content of a message: the root element name plus its serialised form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    root: QName,
    content: String,
}

impl Payload {
    /// Creates a payload from its root element name and serialised content.
    #[must_use]
    pub fn new(root: QName, content: impl Into<String>) -> Self {
        Self {
            root,
            content: content.into(),
        }
    }

    /// Qualified name of the payload root element.
    #[must_use]
    pub const fn root(&self) -> &QName {
        &self.root
    }

    /// Serialised payload content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A request or response message flowing through the dispatcher.
pub trait WebServiceMessage: fmt::Debug + Send + Sync + 'static {
    /// Returns the message payload, if any.
    fn payload(&self) -> Option<&Payload>;

    /// Replaces the message payload.
    fn set_payload(&mut self, payload: Payload);

    /// Returns the fault view when the message format can carry faults.
    fn as_fault_aware(&self) -> Option<&dyn FaultAwareMessage> {
        None
    }

    /// Upcasts to [`Any`] so protocol extensions can reach their concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable counterpart of [`Self::as_any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A message able to report whether it carries a fault.
pub trait FaultAwareMessage {
    /// Returns `true` when the message body holds a fault.
    fn has_fault(&self) -> bool;

    /// Human-readable fault reason, when a fault is present.
    fn fault_reason(&self) -> Option<&str>;
}

/// Creates response messages for requests.
pub trait MessageFactory: Send + Sync {
    /// Creates an empty response suited to `request`.
    fn create_response(&self, request: &dyn WebServiceMessage) -> Box<dyn WebServiceMessage>;
}
