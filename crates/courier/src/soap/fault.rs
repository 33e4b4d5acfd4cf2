//! SOAP faults.

use courier_config::Locale;

use crate::qname::QName;

/// A fault carried in a SOAP body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    code: QName,
    reason: String,
    locale: Option<Locale>,
    actor_or_role: Option<String>,
    detail: Option<String>,
}

impl SoapFault {
    /// Creates a fault with a code, a reason and an optional reason locale.
    #[must_use]
    pub fn new(code: QName, reason: impl Into<String>, locale: Option<Locale>) -> Self {
        Self {
            code,
            reason: reason.into(),
            locale,
            actor_or_role: None,
            detail: None,
        }
    }

    /// Fault code.
    #[must_use]
    pub const fn code(&self) -> &QName {
        &self.code
    }

    /// Human-readable reason (the 1.1 `faultstring`).
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Language of the reason.
    #[must_use]
    pub const fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    /// Node or role at which the fault occurred.
    #[must_use]
    pub fn actor_or_role(&self) -> Option<&str> {
        self.actor_or_role.as_deref()
    }

    /// Sets the node or role at which the fault occurred.
    pub fn set_actor_or_role(&mut self, actor_or_role: impl Into<String>) {
        self.actor_or_role = Some(actor_or_role.into());
    }

    /// Serialised application detail.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Attaches serialised application detail.
    pub fn set_detail(&mut self, detail: impl Into<String>) {
        self.detail = Some(detail.into());
    }
}
