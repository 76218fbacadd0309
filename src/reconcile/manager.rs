//! Reconciliation manager: the "Save" entry points.
//!
//! One save issues a strictly ordered sequence of awaited store calls.
//! Within a collection the order is delete, update, insert (a delete may
//! free a uniqueness slot an insert needs). Across collections, deletes
//! run bottom-up and creates/updates top-down, so a foreign key is never
//! created pointing at a not-yet-existing parent and a parent is never
//! removed while children still reference it.
//!
//! Nothing here is transactional. If a step fails, the steps before it
//! stay applied; the caller gets a [`ReconcileError`] naming the failing
//! operation and re-saves after fixing the cause. Acceptable under the
//! single-editor-per-tournament assumption.

use std::sync::Arc;

use crate::api::{CollectionStore, Resource, TournamentStore};
use crate::entries::{
    BrktEntry, DivEntry, ElimEntry, EntryBundle, EntryRow, Player, PotEntry, explode_rows,
};
use crate::ids::EntityId;
use crate::reconcile::diff::{CollectionDiff, Record, diff};
use crate::reconcile::errors::{ReconcileError, ReconcileResult};
use crate::tournament::{
    Bracket, Division, Eliminator, Event, Lane, Pot, Squad, TournamentData,
};

/// Orchestrates loads and saves against a per-entity CRUD store.
#[derive(Clone)]
pub struct ReconcileManager<S> {
    store: Arc<S>,
}

impl<S> ReconcileManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Reconcile one collection: diff `edited` against `baseline`, apply
    /// the mutations, and return the new baseline sorted by sort order.
    ///
    /// An empty diff makes no store calls at all.
    pub async fn reconcile<T>(&self, baseline: &[T], edited: &[T]) -> ReconcileResult<Vec<T>>
    where
        T: Record + Resource + Send + Sync,
        S: CollectionStore<T>,
    {
        let d = diff(baseline, edited);
        if d.is_empty() {
            log::debug!("{}: nothing to save", T::ROUTE);
            return Ok(sorted(baseline));
        }
        self.apply_deletes(&d).await?;
        self.apply_upserts(&d).await?;
        Ok(sorted(edited))
    }

    /// Save an edited tournament structure against its baseline and
    /// return the new baseline.
    pub async fn save_structure(
        &self,
        baseline: &TournamentData,
        edited: &TournamentData,
    ) -> ReconcileResult<TournamentData>
    where
        S: TournamentStore
            + CollectionStore<Event>
            + CollectionStore<Division>
            + CollectionStore<Squad>
            + CollectionStore<Lane>
            + CollectionStore<Pot>
            + CollectionStore<Bracket>
            + CollectionStore<Eliminator>,
    {
        // The tournament record is a single object, not a collection.
        if let (Some(prior), Some(current)) = (&baseline.tournament, &edited.tournament) {
            if prior != current {
                self.store.update_tournament(current).await.map_err(|source| {
                    ReconcileError::Update {
                        route: "tmnts",
                        id: current.id.clone(),
                        source,
                    }
                })?;
            }
        }

        let events = diff(&baseline.events, &edited.events);
        let divisions = diff(&baseline.divisions, &edited.divisions);
        let squads = diff(&baseline.squads, &edited.squads);
        let lanes = diff(&baseline.lanes, &edited.lanes);
        let pots = diff(&baseline.pots, &edited.pots);
        let brackets = diff(&baseline.brackets, &edited.brackets);
        let eliminators = diff(&baseline.eliminators, &edited.eliminators);

        let mutations = events.len()
            + divisions.len()
            + squads.len()
            + lanes.len()
            + pots.len()
            + brackets.len()
            + eliminators.len();

        // Deletes bottom-up: leaf objects first, events last.
        self.apply_deletes(&pots).await?;
        self.apply_deletes(&brackets).await?;
        self.apply_deletes(&eliminators).await?;
        self.apply_deletes(&lanes).await?;
        self.apply_deletes(&squads).await?;
        self.apply_deletes(&divisions).await?;
        self.apply_deletes(&events).await?;

        // Creates and updates top-down: parents before children.
        self.apply_upserts(&events).await?;
        self.apply_upserts(&divisions).await?;
        self.apply_upserts(&squads).await?;
        self.apply_upserts(&lanes).await?;
        self.apply_upserts(&pots).await?;
        self.apply_upserts(&brackets).await?;
        self.apply_upserts(&eliminators).await?;

        log::info!("tournament structure saved: {mutations} mutations");
        Ok(TournamentData {
            tournament: edited.tournament.clone(),
            events: sorted(&edited.events),
            divisions: sorted(&edited.divisions),
            squads: sorted(&edited.squads),
            lanes: sorted(&edited.lanes),
            pots: sorted(&edited.pots),
            brackets: sorted(&edited.brackets),
            eliminators: sorted(&edited.eliminators),
        })
    }

    /// Save the entry grid: decompose the wide rows into normalized
    /// records, reconcile the five entry collections against `baseline`,
    /// and return the new baseline.
    pub async fn save_entries(
        &self,
        baseline: &EntryBundle,
        rows: &[EntryRow],
        data: &TournamentData,
    ) -> ReconcileResult<EntryBundle>
    where
        S: CollectionStore<Player>
            + CollectionStore<DivEntry>
            + CollectionStore<PotEntry>
            + CollectionStore<BrktEntry>
            + CollectionStore<ElimEntry>,
    {
        let edited = explode_rows(rows, data, baseline);

        let players = diff(&baseline.players, &edited.players);
        let div_entries = diff(&baseline.div_entries, &edited.div_entries);
        let pot_entries = diff(&baseline.pot_entries, &edited.pot_entries);
        let brkt_entries = diff(&baseline.brkt_entries, &edited.brkt_entries);
        let elim_entries = diff(&baseline.elim_entries, &edited.elim_entries);

        let mutations = players.len()
            + div_entries.len()
            + pot_entries.len()
            + brkt_entries.len()
            + elim_entries.len();

        // Entry deletes before player deletes; entries reference players.
        self.apply_deletes(&div_entries).await?;
        self.apply_deletes(&pot_entries).await?;
        self.apply_deletes(&brkt_entries).await?;
        self.apply_deletes(&elim_entries).await?;
        self.apply_deletes(&players).await?;

        // Player upserts before entry upserts.
        self.apply_upserts(&players).await?;
        self.apply_upserts(&div_entries).await?;
        self.apply_upserts(&pot_entries).await?;
        self.apply_upserts(&brkt_entries).await?;
        self.apply_upserts(&elim_entries).await?;

        log::info!("entries saved: {mutations} mutations");
        Ok(edited)
    }

    /// Load the full structure baseline at edit-session start.
    pub async fn load_structure(&self, tmnt_id: &EntityId) -> ReconcileResult<TournamentData>
    where
        S: TournamentStore
            + CollectionStore<Event>
            + CollectionStore<Division>
            + CollectionStore<Squad>
            + CollectionStore<Lane>
            + CollectionStore<Pot>
            + CollectionStore<Bracket>
            + CollectionStore<Eliminator>,
    {
        let tournament =
            self.store
                .fetch_tournament(tmnt_id)
                .await
                .map_err(|source| ReconcileError::Load {
                    route: "tmnts",
                    source,
                })?;
        Ok(TournamentData {
            tournament: Some(tournament),
            events: self.fetch(tmnt_id).await?,
            divisions: self.fetch(tmnt_id).await?,
            squads: self.fetch(tmnt_id).await?,
            lanes: self.fetch(tmnt_id).await?,
            pots: self.fetch(tmnt_id).await?,
            brackets: self.fetch(tmnt_id).await?,
            eliminators: self.fetch(tmnt_id).await?,
        })
    }

    /// Load the persisted entry baseline at edit-session start.
    pub async fn load_entries(&self, tmnt_id: &EntityId) -> ReconcileResult<EntryBundle>
    where
        S: CollectionStore<Player>
            + CollectionStore<DivEntry>
            + CollectionStore<PotEntry>
            + CollectionStore<BrktEntry>
            + CollectionStore<ElimEntry>,
    {
        Ok(EntryBundle {
            players: self.fetch(tmnt_id).await?,
            div_entries: self.fetch(tmnt_id).await?,
            pot_entries: self.fetch(tmnt_id).await?,
            brkt_entries: self.fetch(tmnt_id).await?,
            elim_entries: self.fetch(tmnt_id).await?,
        })
    }

    async fn fetch<T>(&self, tmnt_id: &EntityId) -> ReconcileResult<Vec<T>>
    where
        T: Record + Resource + Send + Sync,
        S: CollectionStore<T>,
    {
        let records = self
            .store
            .fetch_by_scope("tmnt", tmnt_id)
            .await
            .map_err(|source| ReconcileError::Load {
                route: T::ROUTE,
                source,
            })?;
        Ok(sorted(&records))
    }

    async fn apply_deletes<T>(&self, d: &CollectionDiff<T>) -> ReconcileResult<()>
    where
        T: Record + Resource + Send + Sync,
        S: CollectionStore<T>,
    {
        for record in &d.deleted {
            self.store
                .delete(record.id())
                .await
                .map_err(|source| ReconcileError::Delete {
                    route: T::ROUTE,
                    id: record.id().clone(),
                    source,
                })?;
        }
        Ok(())
    }

    async fn apply_upserts<T>(&self, d: &CollectionDiff<T>) -> ReconcileResult<()>
    where
        T: Record + Resource + Send + Sync,
        S: CollectionStore<T>,
    {
        for record in &d.updated {
            self.store
                .update(record)
                .await
                .map_err(|source| ReconcileError::Update {
                    route: T::ROUTE,
                    id: record.id().clone(),
                    source,
                })?;
        }
        match d.created.as_slice() {
            [] => {}
            [record] => {
                self.store
                    .insert(record)
                    .await
                    .map_err(|source| ReconcileError::Insert {
                        route: T::ROUTE,
                        index: 0,
                        source,
                    })?;
            }
            many => {
                self.store
                    .insert_many(many)
                    .await
                    .map_err(|source| ReconcileError::InsertMany {
                        route: T::ROUTE,
                        count: many.len(),
                        source,
                    })?;
            }
        }
        if !d.is_empty() {
            log::debug!(
                "{}: {} created, {} updated, {} deleted",
                T::ROUTE,
                d.created.len(),
                d.updated.len(),
                d.deleted.len()
            );
        }
        Ok(())
    }
}

/// The persister's result contract: the surviving records, ordered.
fn sorted<T: Record>(records: &[T]) -> Vec<T> {
    let mut out = records.to_vec();
    out.sort_by_key(|r| r.sort_order());
    out
}
