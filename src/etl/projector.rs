use async_trait::async_trait;

use super::envelope::{Envelope, TypeId};
use super::store::Changeset;

/// Projector trait - turns one family of contract events into entity writes
///
/// A projector reads what it needs through the [`Changeset`], writes every entity
/// it changes back into it, and queues any dynamic sources it discovers. It never
/// touches the store directly: the engine commits the change set only once every
/// interested projector has succeeded.
///
/// # Example
///
/// ```rust,ignore
/// async fn project(&self, envelope: &Envelope, changes: &mut Changeset<'_>) -> Result<()> {
///     let Some(event) = envelope.downcast_ref::<BondEvent>() else {
///         return Ok(());
///     };
///     let mut bond: Bond = changes.load_or_create(envelope.context.contract_id())?;
///     bond.timestamps.touch(envelope.context.block_timestamp);
///     changes.save(&bond)?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait Projector: Send + Sync {
    /// Get the name of this projector
    fn name(&self) -> &str;

    /// Get the type IDs this projector is interested in
    fn interested_types(&self) -> Vec<TypeId>;

    /// Project one envelope into the change set
    async fn project(&self, envelope: &Envelope, changes: &mut Changeset<'_>) -> anyhow::Result<()>;
}
