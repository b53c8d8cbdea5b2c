use async_trait::async_trait;

use crate::entity::contact;

/// Outbound notification hook invoked after a contact submission is stored.
///
/// Failures are logged by the caller and never fail the parent request.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn contact_received(&self, contact: &contact::Model) -> anyhow::Result<()>;
}

/// Notifier that records submissions in the log stream.
///
/// Stands in for the mail transport; deployments wanting email plug an SMTP
/// implementation in behind the trait.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn contact_received(&self, contact: &contact::Model) -> anyhow::Result<()> {
        tracing::info!(
            id = contact.id,
            name = %contact.name,
            email = %contact.email,
            "new contact submission received"
        );
        Ok(())
    }
}
