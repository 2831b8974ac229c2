//! Logical capabilities served by the downstream agents.

/// The dispatch key for an inbound request.
///
/// Each capability maps to exactly one downstream agent. The set is closed:
/// a request either names one of these or it is not routable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Natural-language questions answered against the structured database.
    StructuredQuery,
    /// Knowledge retrieval over the indexed document corpus.
    Retrieval,
    /// The combining router that itself picks database, retrieval, or both.
    SmartRoute,
    /// OCR and content analysis of an uploaded document or image.
    DocumentUnderstanding,
}

impl Capability {
    /// Stable kebab-case name, used in logs and error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StructuredQuery => "structured-query",
            Self::Retrieval => "retrieval",
            Self::SmartRoute => "smart-route",
            Self::DocumentUnderstanding => "document-understanding",
        }
    }

    /// Whether the downstream request body carries the caller's role hint.
    #[must_use]
    pub fn forwards_role(&self) -> bool {
        matches!(self, Self::StructuredQuery | Self::SmartRoute)
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
