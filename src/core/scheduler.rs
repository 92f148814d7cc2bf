//! Weighted, capacity-bounded topic activation.
//!
//! Each active topic is scheduled to churn at exactly one future block. A block
//! holds at most `max_active_topics_per_block` topics; when it is full, a
//! candidate displaces the lowest-weight member unless the candidate is
//! strictly lighter. The lowest member of every block is cached and only
//! recomputed on admission, so it may lag behind plain inactivations.
//!
//! The host serializes all calls; every store write is visible to the next read.

use serde::{Deserialize, Serialize};

use crate::core::{
    build_audit_event, ActivationError, ActivationStores, AuditAction, AuditSink, ParameterStore,
    StepProvider, TopicRegistry, WeightProvider,
};
use crate::util::serde::{
    BlockHeight, Topic, TopicId, TopicIdWeightPair, TopicIds, Weight, RESERVED_BLOCK,
};

/// How strictly the scheduler keeps its stores mutually consistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyMode {
    /// Inactivation leaves the vacated block's lowest-weight cache untouched and
    /// updates leave the topic listed at its previous block.
    #[default]
    Compatible,
    /// Inactivation recomputes the vacated block's cache and updates move the
    /// topic out of its previous block.
    Strict,
}

/// Churn schedule lookup result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChurnStatus {
    /// Scheduled churn block, or [`RESERVED_BLOCK`] when unscheduled.
    pub block: BlockHeight,
    /// Whether the scheduled churn has not happened yet.
    pub pending: bool,
}

/// Result of `activate` and `update_active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Topic admitted at `block`, possibly displacing `evicted`.
    Activated {
        /// Block the topic will churn at.
        block: BlockHeight,
        /// Lowest-weight topic displaced to make room.
        evicted: Option<TopicId>,
    },
    /// Block was full and the topic was lighter than its lowest member.
    Rejected {
        /// Block the topic tried to join.
        block: BlockHeight,
    },
    /// Nothing to do: unregistered, already pending, or already a member.
    Unchanged,
}

enum Admission {
    Admitted { evicted: Option<TopicId> },
    AlreadyPresent,
    Rejected { weight: Option<Weight> },
}

/// Orchestrates the activation stores under the per-block capacity policy.
pub struct ActivationScheduler<W, C, P, T> {
    stores: ActivationStores,
    weights: W,
    clock: C,
    params: P,
    topics: T,
    mode: ConsistencyMode,
    audit: Option<Box<dyn AuditSink>>,
}

impl<W, C, P, T> ActivationScheduler<W, C, P, T>
where
    W: WeightProvider,
    C: StepProvider,
    P: ParameterStore,
    T: TopicRegistry,
{
    /// Create a scheduler over the given stores and collaborators.
    pub fn new(stores: ActivationStores, weights: W, clock: C, params: P, topics: T) -> Self {
        Self {
            stores,
            weights,
            clock,
            params,
            topics,
            mode: ConsistencyMode::default(),
            audit: None,
        }
    }

    /// Select the consistency mode.
    #[must_use]
    pub fn with_consistency(mut self, mode: ConsistencyMode) -> Self {
        self.mode = mode;
        self
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Active consistency mode.
    pub const fn consistency(&self) -> ConsistencyMode {
        self.mode
    }

    /// Read access to the underlying stores.
    pub const fn stores(&self) -> &ActivationStores {
        &self.stores
    }

    /// Write access to the underlying stores, for host-side maintenance.
    pub fn stores_mut(&mut self) -> &mut ActivationStores {
        &mut self.stores
    }

    /// Block the host is currently processing.
    pub fn current_block(&self) -> BlockHeight {
        self.clock.current_block()
    }

    /// Scheduled churn block of `topic_id` and whether it is still ahead.
    pub fn next_churn_block(&self, topic_id: TopicId) -> Result<ChurnStatus, ActivationError> {
        match self.stores.churn_schedule.get(&topic_id)? {
            Some(block) => Ok(ChurnStatus {
                block,
                pending: block >= self.clock.current_block(),
            }),
            None => Ok(ChurnStatus {
                block: RESERVED_BLOCK,
                pending: false,
            }),
        }
    }

    /// Whether `topic_id` is flagged in the activation registry.
    pub fn is_active(&self, topic_id: TopicId) -> Result<bool, ActivationError> {
        self.stores.registry.has(&topic_id)
    }

    /// Topics scheduled to churn at `block`, in admission order.
    ///
    /// The list is bounded by the capacity parameter when it is built, so it
    /// is materialized in full.
    pub fn active_at(&self, block: BlockHeight) -> Result<Vec<TopicId>, ActivationError> {
        Ok(self.active_set_at(block)?.topic_ids)
    }

    fn active_set_at(&self, block: BlockHeight) -> Result<TopicIds, ActivationError> {
        Ok(self.stores.active_sets.get(&block)?.unwrap_or_default())
    }

    /// Cached lowest-weight member of `block`; `None` when nothing was recorded.
    pub fn lowest_weight_at(
        &self,
        block: BlockHeight,
    ) -> Result<Option<TopicIdWeightPair>, ActivationError> {
        self.stores.lowest_weights.get(&block)
    }

    /// Drop the active set and lowest-weight entries for `block`. No-op if absent.
    pub fn prune_at(&mut self, block: BlockHeight) -> Result<(), ActivationError> {
        self.stores.active_sets.remove(&block)?;
        self.stores.lowest_weights.remove(&block)
    }

    /// Recompute the lowest-weight member of `block` from the weight provider.
    ///
    /// An empty block is pruned instead. Members whose weight cannot be read
    /// are skipped; on equal weights the earlier member wins.
    pub fn reset_lowest_weight_at(&mut self, block: BlockHeight) -> Result<(), ActivationError> {
        self.recompute_lowest(block).map(|_| ())
    }

    /// Recompute and store the cache of `block`, returning the member it
    /// resolved. `None` when the block is empty or no member weight is readable,
    /// even though the zero pair is stored in the latter case.
    fn recompute_lowest(
        &mut self,
        block: BlockHeight,
    ) -> Result<Option<TopicIdWeightPair>, ActivationError> {
        let members = self.active_set_at(block)?;
        if members.is_empty() {
            self.prune_at(block)?;
            return Ok(None);
        }

        let mut lowest: Option<TopicIdWeightPair> = None;
        for &topic_id in &members.topic_ids {
            let weight = match self.weights.weight_of(topic_id) {
                Ok(weight) => weight,
                Err(err) => {
                    tracing::debug!(
                        "skipping topic {} in lowest-weight reset at block {}: {}",
                        topic_id,
                        block,
                        err
                    );
                    continue;
                }
            };
            if lowest.is_none_or(|current| weight < current.weight) {
                lowest = Some(TopicIdWeightPair { topic_id, weight });
            }
        }

        self.stores
            .lowest_weights
            .set(block, lowest.unwrap_or_default())?;
        Ok(lowest)
    }

    /// Activate `topic_id` at `current_block + epoch_length`.
    ///
    /// Unregistered topics and topics with a pending churn are left alone.
    /// A capacity rejection is reported as [`ActivationOutcome::Rejected`], not
    /// as an error.
    pub fn activate(&mut self, topic_id: TopicId) -> Result<ActivationOutcome, ActivationError> {
        let Some(topic) = self.registered_topic(topic_id)? else {
            return Ok(ActivationOutcome::Unchanged);
        };
        if self.next_churn_block(topic_id)?.pending {
            return Ok(ActivationOutcome::Unchanged);
        }

        let block = self.epoch_end_block(&topic);
        let evicted = match self.admit_respecting_limits(topic_id, block)? {
            Admission::Admitted { evicted } => evicted,
            Admission::AlreadyPresent => return Ok(ActivationOutcome::Unchanged),
            Admission::Rejected { weight } => {
                self.record(topic_id, block, AuditAction::Rejected, weight);
                return Ok(ActivationOutcome::Rejected { block });
            }
        };

        self.stores.churn_schedule.set(topic_id, block)?;
        self.reset_lowest_weight_at(block)?;
        self.stores.registry.set(topic_id, ())?;

        tracing::info!("topic {} activated, next churn at block {}", topic_id, block);
        self.record(topic_id, block, AuditAction::Activated, None);
        Ok(ActivationOutcome::Activated { block, evicted })
    }

    /// Inactivate `topic_id` and return the block it vacated.
    ///
    /// In [`ConsistencyMode::Compatible`] the vacated block's lowest-weight
    /// cache is left as is and may name a topic that is no longer there.
    pub fn inactivate_topic(
        &mut self,
        topic_id: TopicId,
    ) -> Result<Option<BlockHeight>, ActivationError> {
        let vacated = self.inactivate_without_reset(topic_id)?;
        if let Some(block) = vacated {
            self.record(topic_id, block, AuditAction::Inactivated, None);
            if self.mode == ConsistencyMode::Strict {
                self.reset_lowest_weight_at(block)?;
            }
        }
        Ok(vacated)
    }

    /// Reschedule `topic_id` at `current_block + epoch_length`, ignoring any
    /// previous schedule.
    ///
    /// In [`ConsistencyMode::Compatible`] the topic stays listed at its
    /// previous block and the activation registry is not touched.
    pub fn update_active(
        &mut self,
        topic_id: TopicId,
    ) -> Result<ActivationOutcome, ActivationError> {
        let Some(topic) = self.registered_topic(topic_id)? else {
            return Ok(ActivationOutcome::Unchanged);
        };
        let previous = self.stores.churn_schedule.get(&topic_id)?;

        let block = self.epoch_end_block(&topic);
        let evicted = match self.admit_respecting_limits(topic_id, block)? {
            Admission::Admitted { evicted } => evicted,
            Admission::AlreadyPresent => return Ok(ActivationOutcome::Unchanged),
            Admission::Rejected { weight } => {
                self.record(topic_id, block, AuditAction::Rejected, weight);
                return Ok(ActivationOutcome::Rejected { block });
            }
        };

        self.stores.churn_schedule.set(topic_id, block)?;
        self.reset_lowest_weight_at(block)?;

        if self.mode == ConsistencyMode::Strict {
            if let Some(previous) = previous.filter(|previous| *previous != block) {
                let mut members = self.active_set_at(previous)?;
                if members.remove_first(topic_id) {
                    self.stores.active_sets.set(previous, members)?;
                }
                self.reset_lowest_weight_at(previous)?;
            }
            self.stores.registry.set(topic_id, ())?;
        }

        tracing::info!("topic {} rescheduled to churn at block {}", topic_id, block);
        self.record(topic_id, block, AuditAction::Relocated, None);
        Ok(ActivationOutcome::Activated { block, evicted })
    }

    fn registered_topic(&self, topic_id: TopicId) -> Result<Option<Topic>, ActivationError> {
        if !self.topics.exists(topic_id)? {
            return Ok(None);
        }
        self.topics.get(topic_id)
    }

    fn epoch_end_block(&self, topic: &Topic) -> BlockHeight {
        self.clock.current_block().saturating_add(topic.epoch_length)
    }

    /// Remove a pending topic from its block, schedule, and registry without
    /// touching the lowest-weight cache.
    fn inactivate_without_reset(
        &mut self,
        topic_id: TopicId,
    ) -> Result<Option<BlockHeight>, ActivationError> {
        if !self.topics.exists(topic_id)? {
            return Ok(None);
        }
        let status = self.next_churn_block(topic_id)?;
        if !status.pending {
            return Ok(None);
        }

        let mut members = self.active_set_at(status.block)?;
        members.remove_first(topic_id);
        self.stores.active_sets.set(status.block, members)?;
        self.stores.churn_schedule.remove(&topic_id)?;
        self.stores.registry.remove(&topic_id)?;
        Ok(Some(status.block))
    }

    /// Append `topic_id` to `block`, displacing the lowest-weight member when
    /// the block is full. Does not touch the schedule or the cache.
    ///
    /// The membership list is worked on locally: the evictee is torn down
    /// first, then the final list is written once.
    fn admit_respecting_limits(
        &mut self,
        topic_id: TopicId,
        block: BlockHeight,
    ) -> Result<Admission, ActivationError> {
        let max_active = self.params.max_active_topics_per_block()?;
        let mut members = self.active_set_at(block)?;
        if members.contains(topic_id) {
            return Ok(Admission::AlreadyPresent);
        }

        let mut evicted = None;
        if members.len() as u64 >= max_active {
            let Some(lowest) = self.lowest_member(block, &members)? else {
                tracing::warn!(
                    "topic {} cannot be activated: block {} is full and no member weight is available",
                    topic_id,
                    block
                );
                return Ok(Admission::Rejected { weight: None });
            };
            let weight = self.weights.weight_of(topic_id)?;
            if weight < lowest.weight {
                tracing::warn!(
                    "topic {} cannot be activated due to less than lowest weight at block {}",
                    topic_id,
                    block
                );
                return Ok(Admission::Rejected {
                    weight: Some(weight),
                });
            }

            self.inactivate_without_reset(lowest.topic_id)?;
            members.remove_first(lowest.topic_id);
            tracing::info!(
                "topic {} evicted from block {} by topic {}",
                lowest.topic_id,
                block,
                topic_id
            );
            self.record(lowest.topic_id, block, AuditAction::Evicted, Some(lowest.weight));
            evicted = Some(lowest.topic_id);
        }

        members.topic_ids.push(topic_id);
        self.stores.active_sets.set(block, members)?;
        Ok(Admission::Admitted { evicted })
    }

    /// Lowest-weight member of a full block. Falls back to a recompute when the
    /// cache is missing, holds the zero pair, or names a topic that already left
    /// the block.
    fn lowest_member(
        &mut self,
        block: BlockHeight,
        members: &TopicIds,
    ) -> Result<Option<TopicIdWeightPair>, ActivationError> {
        if let Some(pair) = self.lowest_weight_at(block)? {
            if pair != TopicIdWeightPair::default() && members.contains(pair.topic_id) {
                return Ok(Some(pair));
            }
        }
        tracing::debug!("lowest-weight cache at block {} is stale, recomputing", block);
        self.recompute_lowest(block)
    }

    fn record(
        &mut self,
        topic_id: TopicId,
        block: BlockHeight,
        action: AuditAction,
        weight: Option<Weight>,
    ) {
        let now = self.clock.current_block();
        if let Some(audit) = self.audit.as_mut() {
            audit.record(build_audit_event(topic_id, block, action, weight, now));
        }
    }
}
