//! Bond mediator projector

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use bondline::governance::{apply_mediator_admin, bind_factory, FactoryBinding};
use bondline::{ContractReader, Changeset, EntityId, Envelope, EventContext, Projector, TypeId};

use crate::entities::Bond;
use crate::events::{AddBond, BondMediatorEvent};
use crate::BondScope;

const TARGET: &str = "bondline_bond::mediator";

/// Projects [`BondMediatorEvent`]s.
///
/// `Initialized` reads the mediator's current bond factory through the
/// injected [`ContractReader`].
pub struct BondMediatorProjector {
    reader: Arc<dyn ContractReader>,
}

impl BondMediatorProjector {
    pub fn new(reader: Arc<dyn ContractReader>) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl Projector for BondMediatorProjector {
    fn name(&self) -> &str {
        "bond_mediator"
    }

    fn interested_types(&self) -> Vec<TypeId> {
        vec![BondMediatorEvent::type_id()]
    }

    async fn project(&self, envelope: &Envelope, changes: &mut Changeset<'_>) -> Result<()> {
        let Some(event) = envelope.downcast_ref::<BondMediatorEvent>() else {
            anyhow::bail!(
                "unexpected body {} for bond mediator projector",
                envelope.event_name()
            );
        };

        tracing::debug!(
            target: TARGET,
            mediator = %envelope.context.contract_id(),
            event = event.name(),
            block = envelope.context.block_number,
            "Projecting bond mediator event"
        );

        let context = &envelope.context;
        match event {
            BondMediatorEvent::AddBond(add) | BondMediatorEvent::AddPerformanceBond(add) => {
                add_bond(context, add, changes)?;
            }
            BondMediatorEvent::BondCreatorUpdate(update)
            | BondMediatorEvent::PerformanceBondCreatorUpdate(update) => {
                bind_factory::<BondScope>(
                    context,
                    update.update_creator,
                    FactoryBinding::CreatorUpdate,
                    changes,
                )?;
            }
            BondMediatorEvent::Admin(admin) => {
                apply_mediator_admin::<BondScope>(context, admin, self.reader.as_ref(), changes)
                    .await?;
            }
        }
        Ok(())
    }
}

fn add_bond(context: &EventContext, add: &AddBond, changes: &mut Changeset<'_>) -> Result<()> {
    let mut bond: Bond = changes.load_or_create(EntityId::contract(&add.bond))?;
    bond.bond = Some(add.bond);
    bond.dao = Some(EntityId::dao(add.dao_id));
    bond.mediator = Some(context.contract_id());
    bond.timestamps.touch(context.block_timestamp);
    changes.save(&bond)?;
    Ok(())
}
