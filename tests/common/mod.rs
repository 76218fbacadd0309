//! In-memory store double for reconciliation tests.
//!
//! Implements the same store traits as the HTTP client, records every
//! mutation in an operation log so tests can assert ordering, and can be
//! told to reject a specific operation to exercise failure semantics.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;

use tenpin::api::{CollectionStore, Resource, StoreError, StoreResult, TournamentStore};
use tenpin::entries::{BrktEntry, DivEntry, ElimEntry, Player, PotEntry};
use tenpin::ids::EntityId;
use tenpin::reconcile::Record;
use tenpin::tournament::{
    Bracket, Division, Eliminator, Event, Lane, Pot, Squad, Tournament,
};

#[derive(Default)]
pub struct MemoryApi {
    /// Every mutation as `"<op> <route> <id>"`, in call order.
    pub log: Mutex<Vec<String>>,
    /// When set to `("<op>", "<route>")`, that operation is rejected.
    pub fail_on: Mutex<Option<(String, String)>>,

    pub tournaments: Mutex<Vec<Tournament>>,
    pub events: Mutex<Vec<Event>>,
    pub divisions: Mutex<Vec<Division>>,
    pub squads: Mutex<Vec<Squad>>,
    pub lanes: Mutex<Vec<Lane>>,
    pub pots: Mutex<Vec<Pot>>,
    pub brackets: Mutex<Vec<Bracket>>,
    pub eliminators: Mutex<Vec<Eliminator>>,
    pub players: Mutex<Vec<Player>>,
    pub div_entries: Mutex<Vec<DivEntry>>,
    pub pot_entries: Mutex<Vec<PotEntry>>,
    pub brkt_entries: Mutex<Vec<BrktEntry>>,
    pub elim_entries: Mutex<Vec<ElimEntry>>,
}

impl MemoryApi {
    /// Reject any further occurrences of `op` against `route`.
    pub fn reject(&self, op: &str, route: &str) {
        *self.fail_on.lock().unwrap() = Some((op.to_string(), route.to_string()));
    }

    /// The op log as `"<op> <route>"` pairs, id stripped.
    pub fn ops(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .map(|line| {
                let mut parts = line.split(' ');
                format!("{} {}", parts.next().unwrap(), parts.next().unwrap())
            })
            .collect()
    }

    /// Index of the first op-log line starting with `prefix`.
    pub fn first_op(&self, prefix: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .position(|line| line.starts_with(prefix))
            .unwrap_or_else(|| panic!("no op matching {prefix:?}"))
    }

    fn record(&self, op: &str, route: &'static str, id: &EntityId) -> StoreResult<()> {
        let rejected = matches!(
            &*self.fail_on.lock().unwrap(),
            Some((o, r)) if o.as_str() == op && r.as_str() == route
        );
        if rejected {
            return Err(StoreError::Rejected { route, status: 500 });
        }
        self.log.lock().unwrap().push(format!("{op} {route} {id}"));
        Ok(())
    }
}

macro_rules! mem_store {
    ($ty:ty, $field:ident) => {
        #[async_trait]
        impl CollectionStore<$ty> for MemoryApi {
            async fn fetch_by_scope(
                &self,
                _scope: &str,
                _scope_id: &EntityId,
            ) -> StoreResult<Vec<$ty>> {
                Ok(self.$field.lock().unwrap().clone())
            }

            async fn insert(&self, item: &$ty) -> StoreResult<$ty> {
                self.record("insert", <$ty>::ROUTE, item.id())?;
                self.$field.lock().unwrap().push(item.clone());
                Ok(item.clone())
            }

            async fn insert_many(&self, items: &[$ty]) -> StoreResult<usize> {
                for item in items {
                    self.record("insert", <$ty>::ROUTE, item.id())?;
                }
                self.$field.lock().unwrap().extend_from_slice(items);
                Ok(items.len())
            }

            async fn update(&self, item: &$ty) -> StoreResult<$ty> {
                self.record("update", <$ty>::ROUTE, item.id())?;
                let mut rows = self.$field.lock().unwrap();
                match rows.iter_mut().find(|r| r.id() == item.id()) {
                    Some(row) => {
                        *row = item.clone();
                        Ok(item.clone())
                    }
                    None => Err(StoreError::Rejected {
                        route: <$ty>::ROUTE,
                        status: 404,
                    }),
                }
            }

            async fn delete(&self, id: &EntityId) -> StoreResult<()> {
                self.record("delete", <$ty>::ROUTE, id)?;
                let mut rows = self.$field.lock().unwrap();
                let before = rows.len();
                rows.retain(|r| r.id() != id);
                if rows.len() == before {
                    return Err(StoreError::Rejected {
                        route: <$ty>::ROUTE,
                        status: 404,
                    });
                }
                Ok(())
            }

            // Scope is ignored, like fetch: the double holds one
            // tournament's worth of data.
            async fn delete_by_scope(
                &self,
                _scope: &str,
                scope_id: &EntityId,
            ) -> StoreResult<usize> {
                self.record("delete", <$ty>::ROUTE, scope_id)?;
                let mut rows = self.$field.lock().unwrap();
                let count = rows.len();
                rows.clear();
                Ok(count)
            }
        }
    };
}

mem_store!(Event, events);
mem_store!(Division, divisions);
mem_store!(Squad, squads);
mem_store!(Lane, lanes);
mem_store!(Pot, pots);
mem_store!(Bracket, brackets);
mem_store!(Eliminator, eliminators);
mem_store!(Player, players);
mem_store!(DivEntry, div_entries);
mem_store!(PotEntry, pot_entries);
mem_store!(BrktEntry, brkt_entries);
mem_store!(ElimEntry, elim_entries);

#[async_trait]
impl TournamentStore for MemoryApi {
    async fn fetch_tournament(&self, id: &EntityId) -> StoreResult<Tournament> {
        self.tournaments
            .lock()
            .unwrap()
            .iter()
            .find(|t| &t.id == id)
            .cloned()
            .ok_or(StoreError::Rejected {
                route: "tmnts",
                status: 404,
            })
    }

    async fn update_tournament(&self, tournament: &Tournament) -> StoreResult<Tournament> {
        self.record("update", "tmnts", &tournament.id)?;
        let mut rows = self.tournaments.lock().unwrap();
        match rows.iter_mut().find(|t| t.id == tournament.id) {
            Some(row) => {
                *row = tournament.clone();
                Ok(tournament.clone())
            }
            None => Err(StoreError::Rejected {
                route: "tmnts",
                status: 404,
            }),
        }
    }
}
