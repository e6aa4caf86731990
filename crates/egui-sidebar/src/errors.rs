#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    #[error("sidebar controller accessed outside of an active sidebar scope")]
    MissingContext,
    #[error("sidebar controller is already borrowed by an in-flight operation")]
    Reentrant,
    #[error("failed to persist sidebar preference: {0}")]
    Persist(#[source] Box<dyn std::error::Error + Send + Sync>),
}
