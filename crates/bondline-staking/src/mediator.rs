//! Staking pool mediator projector

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use bondline::governance::{apply_mediator_admin, bind_factory, FactoryBinding};
use bondline::{ContractReader, Changeset, EntityId, Envelope, EventContext, Projector, TypeId};

use crate::entities::StakingPool;
use crate::events::{AddStakingPool, StakingPoolMediatorEvent};
use crate::StakingScope;

const TARGET: &str = "bondline_staking::mediator";

/// Projects [`StakingPoolMediatorEvent`]s.
pub struct StakingPoolMediatorProjector {
    reader: Arc<dyn ContractReader>,
}

impl StakingPoolMediatorProjector {
    pub fn new(reader: Arc<dyn ContractReader>) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl Projector for StakingPoolMediatorProjector {
    fn name(&self) -> &str {
        "staking_pool_mediator"
    }

    fn interested_types(&self) -> Vec<TypeId> {
        vec![StakingPoolMediatorEvent::type_id()]
    }

    async fn project(&self, envelope: &Envelope, changes: &mut Changeset<'_>) -> Result<()> {
        let Some(event) = envelope.downcast_ref::<StakingPoolMediatorEvent>() else {
            anyhow::bail!(
                "unexpected body {} for staking pool mediator projector",
                envelope.event_name()
            );
        };

        tracing::debug!(
            target: TARGET,
            mediator = %envelope.context.contract_id(),
            event = event.name(),
            block = envelope.context.block_number,
            "Projecting staking pool mediator event"
        );

        let context = &envelope.context;
        match event {
            StakingPoolMediatorEvent::AddStakingPool(add) => add_pool(context, add, changes)?,
            StakingPoolMediatorEvent::StakingPoolCreatorUpdate(update) => {
                bind_factory::<StakingScope>(
                    context,
                    update.update_creator,
                    FactoryBinding::CreatorUpdate,
                    changes,
                )?;
            }
            StakingPoolMediatorEvent::Admin(admin) => {
                apply_mediator_admin::<StakingScope>(context, admin, self.reader.as_ref(), changes)
                    .await?;
            }
        }
        Ok(())
    }
}

fn add_pool(context: &EventContext, add: &AddStakingPool, changes: &mut Changeset<'_>) -> Result<()> {
    let mut pool: StakingPool = changes.load_or_create(EntityId::contract(&add.staking_pool))?;
    pool.pool = Some(add.staking_pool);
    pool.dao = Some(EntityId::dao(add.dao_id));
    pool.mediator = Some(context.contract_id());
    pool.timestamps.touch(context.block_timestamp);
    changes.save(&pool)?;
    Ok(())
}
