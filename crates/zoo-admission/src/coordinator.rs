//! The admission state machine.
//!
//! ```text
//! SELECTING_CONTAINER -> SELECTING_RESOURCE -> SIMULATED -> COMMITTED
//!          \                    \                  \
//!           +--------------------+------------------+--> ABORTED
//! ```
//!
//! Containers are resolved against the live enclosure list. Resources are
//! resolved against a [`WorkingCopy`], and the chosen one is taken out of
//! that copy to simulate the move. The commit calls the store's own
//! availability operation, which re-validates against current state; if the
//! copy went stale the attempt ends in `AdmissionConflict` and nothing is
//! written.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use zoo_core::entities::{Animal, ZooKeeper};
use zoo_core::errors::{SelectionStage, ZooError};
use zoo_core::ids::EntityKind;
use zoo_db::error::DatabaseError;
use zoo_db::store::EntityStore;

use crate::error::AdmissionError;
use crate::resource::Admissible;
use crate::selector::{BoundedRetrySelector, Prompter, Selection};
use crate::working_copy::{WorkingCopy, WorkingCopyProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdmissionState {
    SelectingContainer,
    SelectingResource,
    Simulated,
    Committed,
    Aborted,
}

impl AdmissionState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SelectingContainer => "SELECTING_CONTAINER",
            Self::SelectingResource => "SELECTING_RESOURCE",
            Self::Simulated => "SIMULATED",
            Self::Committed => "COMMITTED",
            Self::Aborted => "ABORTED",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::Aborted)
    }
}

impl fmt::Display for AdmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// IDs chosen up front, skipping the matching interactive step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preselection {
    pub enclosure: Option<String>,
    pub resource: Option<String>,
}

/// One admission in progress.
#[derive(Debug)]
pub struct AdmissionAttempt<R> {
    state: AdmissionState,
    history: Vec<AdmissionState>,
    enclosure_id: Option<String>,
    resource_id: Option<String>,
    working_copy: Option<WorkingCopy<R>>,
}

impl<R: Admissible> AdmissionAttempt<R> {
    fn new() -> Self {
        Self {
            state: AdmissionState::SelectingContainer,
            history: vec![AdmissionState::SelectingContainer],
            enclosure_id: None,
            resource_id: None,
            working_copy: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> AdmissionState {
        self.state
    }

    #[must_use]
    pub fn history(&self) -> &[AdmissionState] {
        &self.history
    }

    #[must_use]
    pub fn enclosure_id(&self) -> Option<&str> {
        self.enclosure_id.as_deref()
    }

    #[must_use]
    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }

    /// The snapshot the resource was chosen from, until the attempt ends.
    #[must_use]
    pub const fn working_copy(&self) -> Option<&WorkingCopy<R>> {
        self.working_copy.as_ref()
    }

    fn advance(&mut self, next: AdmissionState) {
        tracing::debug!(kind = %R::KIND, from = %self.state, to = %next, "admission transition");
        self.state = next;
        self.history.push(next);
        if next.is_terminal() {
            self.working_copy = None;
        }
    }

    fn abort(&mut self, error: impl Into<AdmissionError>) -> AdmissionError {
        let error = error.into();
        if !self.state.is_terminal() {
            self.advance(AdmissionState::Aborted);
        }
        tracing::debug!(kind = %R::KIND, code = error.code(), "admission aborted");
        error
    }

    fn expect(&self, expected: AdmissionState) -> Result<(), AdmissionError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(AdmissionError::OutOfOrder {
                expected,
                actual: self.state,
            })
        }
    }

    fn report(&self) -> AdmissionReport {
        AdmissionReport {
            kind: R::KIND,
            enclosure_id: self.enclosure_id.clone().unwrap_or_default(),
            resource_id: self.resource_id.clone().unwrap_or_default(),
            history: self.history.clone(),
        }
    }
}

/// Outcome of a committed admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdmissionReport {
    pub kind: EntityKind,
    pub enclosure_id: String,
    pub resource_id: String,
    pub history: Vec<AdmissionState>,
}

pub struct AdmissionCoordinator<'a, S> {
    store: &'a S,
    selector: BoundedRetrySelector,
}

impl<'a, S: EntityStore> AdmissionCoordinator<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S, selector: BoundedRetrySelector) -> Self {
        Self { store, selector }
    }

    /// Move an unassigned animal into an enclosure.
    ///
    /// # Errors
    ///
    /// See [`Self::admit`].
    pub async fn admit_animal<P: Prompter + ?Sized>(
        &self,
        prompter: &mut P,
        preset: &Preselection,
    ) -> Result<AdmissionReport, AdmissionError> {
        self.admit::<Animal, P>(prompter, preset).await
    }

    /// Add an active keeper to an enclosure's caretakers.
    ///
    /// # Errors
    ///
    /// See [`Self::admit`].
    pub async fn assign_keeper<P: Prompter + ?Sized>(
        &self,
        prompter: &mut P,
        preset: &Preselection,
    ) -> Result<AdmissionReport, AdmissionError> {
        self.admit::<ZooKeeper, P>(prompter, preset).await
    }

    /// Run every step of one admission.
    ///
    /// # Errors
    ///
    /// `SelectionAborted` when a selection runs out of attempts,
    /// `NotFound` for a preselected enclosure that does not exist,
    /// `SimulationFailed` when the chosen resource is not in the working copy,
    /// `AdmissionConflict` when the store rejects the commit.
    pub async fn admit<R: Admissible, P: Prompter + ?Sized>(
        &self,
        prompter: &mut P,
        preset: &Preselection,
    ) -> Result<AdmissionReport, AdmissionError> {
        let mut attempt = self.begin::<R>();
        self.choose_container(&mut attempt, prompter, preset.enclosure.as_deref())
            .await?;
        self.choose_resource(&mut attempt, prompter, preset.resource.as_deref())
            .await?;
        self.simulate(&mut attempt)?;
        self.commit(&mut attempt).await
    }

    #[must_use]
    pub fn begin<R: Admissible>(&self) -> AdmissionAttempt<R> {
        AdmissionAttempt::new()
    }

    /// Resolve the target enclosure against the live store.
    ///
    /// # Errors
    ///
    /// Aborts the attempt on `NotFound`, `SelectionAborted`, or a store failure.
    pub async fn choose_container<R: Admissible, P: Prompter + ?Sized>(
        &self,
        attempt: &mut AdmissionAttempt<R>,
        prompter: &mut P,
        preset: Option<&str>,
    ) -> Result<(), AdmissionError> {
        attempt.expect(AdmissionState::SelectingContainer)?;

        let chosen = match preset {
            Some(id) => match self.store.enclosure_exists(id).await {
                Ok(true) => Some(id.to_string()),
                Ok(false) => {
                    return Err(attempt.abort(ZooError::NotFound {
                        kind: EntityKind::Enclosure,
                        id: id.to_string(),
                    }));
                }
                Err(error) => return Err(attempt.abort(error)),
            },
            None => {
                let enclosures = match self.store.list_enclosures().await {
                    Ok(enclosures) => enclosures,
                    Err(error) => return Err(attempt.abort(error)),
                };
                let candidates: BTreeMap<String, String> = enclosures
                    .into_iter()
                    .map(|e| {
                        let label = format!(
                            "{} ({}, {}, {} inhabitants)",
                            e.name,
                            e.environment,
                            e.location,
                            e.inhabitants.len()
                        );
                        (e.id, label)
                    })
                    .collect();
                Some(self.pick(attempt, prompter, "Enclosure ID", &candidates, SelectionStage::Container)?)
            }
        };

        attempt.enclosure_id = chosen;
        attempt.advance(AdmissionState::SelectingResource);
        Ok(())
    }

    /// Snapshot the availability view and resolve the resource against it.
    ///
    /// A preselected resource is taken as given; the simulation step checks it.
    ///
    /// # Errors
    ///
    /// Aborts the attempt on `SelectionAborted` or a store failure.
    pub async fn choose_resource<R: Admissible, P: Prompter + ?Sized>(
        &self,
        attempt: &mut AdmissionAttempt<R>,
        prompter: &mut P,
        preset: Option<&str>,
    ) -> Result<(), AdmissionError> {
        attempt.expect(AdmissionState::SelectingResource)?;

        let copy = match WorkingCopyProvider::new(self.store).snapshot::<R>().await {
            Ok(copy) => copy,
            Err(error) => return Err(attempt.abort(error)),
        };

        let chosen = match preset {
            Some(id) => Some(id.to_string()),
            None => {
                let candidates: BTreeMap<String, String> = copy
                    .iter()
                    .map(|(id, resource)| (id.to_string(), resource.label()))
                    .collect();
                let prompt = format!("{} ID", capitalized(R::KIND));
                Some(self.pick(attempt, prompter, &prompt, &candidates, SelectionStage::Resource)?)
            }
        };

        attempt.resource_id = chosen;
        attempt.working_copy = Some(copy);
        Ok(())
    }

    /// Take the chosen resource out of the working copy.
    ///
    /// # Errors
    ///
    /// Aborts the attempt with `SimulationFailed` if it is not there.
    pub fn simulate<R: Admissible>(&self, attempt: &mut AdmissionAttempt<R>) -> Result<(), AdmissionError> {
        attempt.expect(AdmissionState::SelectingResource)?;
        let Some(resource_id) = attempt.resource_id.clone() else {
            return Err(AdmissionError::OutOfOrder {
                expected: AdmissionState::SelectingResource,
                actual: attempt.state,
            });
        };

        let taken = attempt
            .working_copy
            .as_mut()
            .and_then(|copy| copy.take(&resource_id));
        if taken.is_none() {
            return Err(attempt.abort(ZooError::SimulationFailed { resource_id }));
        }

        attempt.advance(AdmissionState::Simulated);
        Ok(())
    }

    /// Apply the move to the authoritative store.
    ///
    /// # Errors
    ///
    /// `AdmissionConflict` if the store no longer agrees with the working
    /// copy; the store is left as it was.
    pub async fn commit<R: Admissible>(
        &self,
        attempt: &mut AdmissionAttempt<R>,
    ) -> Result<AdmissionReport, AdmissionError> {
        attempt.expect(AdmissionState::Simulated)?;
        let enclosure_id = attempt.enclosure_id.clone().unwrap_or_default();
        let resource_id = attempt.resource_id.clone().unwrap_or_default();

        match R::commit(self.store, &enclosure_id, &resource_id).await {
            Ok(()) => {
                attempt.advance(AdmissionState::Committed);
                tracing::info!(kind = %R::KIND, resource = %resource_id, enclosure = %enclosure_id, "admission committed");
                Ok(attempt.report())
            }
            Err(DatabaseError::Domain(
                error @ (ZooError::NotAvailable { .. } | ZooError::NotFound { .. }),
            )) => {
                tracing::warn!(kind = %R::KIND, resource = %resource_id, enclosure = %enclosure_id, %error, "admission conflict");
                Err(attempt.abort(ZooError::AdmissionConflict {
                    resource_id,
                    enclosure_id,
                    reason: error.to_string(),
                }))
            }
            Err(error) => Err(attempt.abort(error)),
        }
    }

    fn pick<R: Admissible, P: Prompter + ?Sized>(
        &self,
        attempt: &mut AdmissionAttempt<R>,
        prompter: &mut P,
        prompt: &str,
        candidates: &BTreeMap<String, String>,
        stage: SelectionStage,
    ) -> Result<String, AdmissionError> {
        if candidates.is_empty() {
            if let Err(error) = prompter.notify("There is nothing to choose from.") {
                return Err(attempt.abort(error));
            }
            return Err(attempt.abort(ZooError::SelectionAborted { stage, attempts: 0 }));
        }

        for (id, label) in candidates {
            if let Err(error) = prompter.notify(&format!("  {id}  {label}")) {
                return Err(attempt.abort(error));
            }
        }
        match self.selector.select(prompter, prompt, candidates) {
            Ok(Selection::Chosen(id)) => Ok(id),
            Ok(Selection::Cancelled { attempts }) => {
                Err(attempt.abort(ZooError::SelectionAborted { stage, attempts }))
            }
            Err(error) => Err(attempt.abort(error)),
        }
    }
}

fn capitalized(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Animal => "Animal",
        EntityKind::Enclosure => "Enclosure",
        EntityKind::ZooKeeper => "Keeper",
        EntityKind::Visitor => "Visitor",
        EntityKind::Finance => "Finance",
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use zoo_core::entities::{Enclosure, NewAnimal, NewEnclosure, NewKeeper};
    use zoo_core::enums::{
        Department, EnvironmentType, Gender, HealthStatus, LocationType, Rank, Species,
        WorkingStatus,
    };
    use zoo_db::memory::MemoryStore;

    use super::*;
    use crate::selector::ScriptedPrompter;

    fn pen(id: &str) -> Enclosure {
        NewEnclosure {
            name: format!("Pen {id}"),
            area: 400.0,
            temperature: 15.0,
            location: LocationType::Outdoor,
            environment: EnvironmentType::Land,
        }
        .into_enclosure(id.into(), Utc::now())
    }

    async fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store.save_enclosure(&pen("E-0001")).await.unwrap();
        store.save_enclosure(&pen("E-0002")).await.unwrap();
        for id in ["A-0001", "A-0002"] {
            let animal = NewAnimal {
                name: "Vixen".into(),
                species: Species::Fox,
                age: 2,
                gender: Gender::Female,
                health: HealthStatus::Healthy,
            }
            .into_animal(id.into(), Utc::now());
            store.save_animal(&animal).await.unwrap();
        }
        for (id, status) in [("K-0001", WorkingStatus::Active), ("K-0002", WorkingStatus::OnLeave)] {
            let keeper = NewKeeper {
                name: "Sam".into(),
                department: Department::Mammals,
                rank: Rank::Keeper,
                working_status: status,
                danger_handling: false,
                licenses: Vec::new(),
            }
            .into_keeper(id.into(), Utc::now());
            store.save_keeper(&keeper).await.unwrap();
        }
        store
    }

    fn coordinator(store: &MemoryStore) -> AdmissionCoordinator<'_, MemoryStore> {
        AdmissionCoordinator::new(store, BoundedRetrySelector::default())
    }

    #[tokio::test]
    async fn interactive_admission_commits_both_sides() {
        let store = store().await;
        let mut prompter = ScriptedPrompter::new(["E-0002", "y", "A-0001", "y"]);

        let report = coordinator(&store)
            .admit_animal(&mut prompter, &Preselection::default())
            .await
            .unwrap();

        assert_eq!(report.enclosure_id, "E-0002");
        assert_eq!(report.resource_id, "A-0001");
        assert_eq!(
            report.history,
            vec![
                AdmissionState::SelectingContainer,
                AdmissionState::SelectingResource,
                AdmissionState::Simulated,
                AdmissionState::Committed,
            ]
        );
        assert!(store.is_in_enclosure("A-0001", "E-0002").await.unwrap());
        assert!(store.find_enclosure("E-0002").await.unwrap().unwrap().houses("A-0001"));
    }

    #[tokio::test]
    async fn stale_working_copy_ends_in_conflict_and_writes_nothing() {
        let store = store().await;
        let coordinator = coordinator(&store);
        let mut prompter = ScriptedPrompter::default();
        let mut attempt = coordinator.begin::<Animal>();

        coordinator
            .choose_container(&mut attempt, &mut prompter, Some("E-0001"))
            .await
            .unwrap();
        coordinator
            .choose_resource(&mut attempt, &mut prompter, Some("A-0001"))
            .await
            .unwrap();
        coordinator.simulate(&mut attempt).unwrap();

        // Another actor admits the same animal first.
        store.remove_available("A-0001", "E-0002").await.unwrap();

        let err = coordinator.commit(&mut attempt).await.unwrap_err();
        assert_eq!(err.code(), "admission_conflict");
        assert_eq!(attempt.state(), AdmissionState::Aborted);
        assert!(attempt.working_copy().is_none());
        assert!(store.is_in_enclosure("A-0001", "E-0002").await.unwrap());
        assert!(store.find_enclosure("E-0001").await.unwrap().unwrap().inhabitants.is_empty());
    }

    #[tokio::test]
    async fn unavailable_preselection_fails_simulation() {
        let store = store().await;
        store.remove_available("A-0002", "E-0002").await.unwrap();
        let preset = Preselection {
            enclosure: Some("E-0001".into()),
            resource: Some("A-0002".into()),
        };

        let err = coordinator(&store)
            .admit_animal(&mut ScriptedPrompter::default(), &preset)
            .await
            .unwrap_err();

        assert_eq!(err.code(), "simulation_failed");
        assert!(store.is_in_enclosure("A-0002", "E-0002").await.unwrap());
    }

    #[tokio::test]
    async fn missing_preselected_enclosure_is_not_found() {
        let store = store().await;
        let preset = Preselection {
            enclosure: Some("E-0404".into()),
            resource: None,
        };
        let err = coordinator(&store)
            .admit_animal(&mut ScriptedPrompter::default(), &preset)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "not_found");
    }

    #[tokio::test]
    async fn exhausted_container_selection_aborts() {
        let store = store().await;
        let mut prompter = ScriptedPrompter::new(["E-0009", "E-0001", "n", "X"]);

        let err = coordinator(&store)
            .admit_animal(&mut prompter, &Preselection::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err.domain(),
            Some(ZooError::SelectionAborted {
                stage: SelectionStage::Container,
                attempts: 3
            })
        ));
        assert_eq!(store.available_animals().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn closed_input_reports_only_spent_attempts() {
        let store = store().await;

        let err = coordinator(&store)
            .admit_animal(&mut ScriptedPrompter::default(), &Preselection::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err.domain(),
            Some(ZooError::SelectionAborted {
                stage: SelectionStage::Container,
                attempts: 0
            })
        ));

        let mut prompter = ScriptedPrompter::new(["E-0001", "y", "A-0404"]);
        let err = coordinator(&store)
            .admit_animal(&mut prompter, &Preselection::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err.domain(),
            Some(ZooError::SelectionAborted {
                stage: SelectionStage::Resource,
                attempts: 1
            })
        ));
        assert_eq!(store.available_animals().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn keeper_on_leave_is_not_a_candidate() {
        let store = store().await;
        let mut prompter = ScriptedPrompter::new(["E-0001", "y", "K-0002", "K-0002", "K-0002"]);

        let err = coordinator(&store)
            .assign_keeper(&mut prompter, &Preselection::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err.domain(),
            Some(ZooError::SelectionAborted {
                stage: SelectionStage::Resource,
                ..
            })
        ));

        let mut prompter = ScriptedPrompter::new(["E-0001", "y", "K-0001", "y"]);
        let report = coordinator(&store)
            .assign_keeper(&mut prompter, &Preselection::default())
            .await
            .unwrap();
        assert_eq!(report.kind, EntityKind::ZooKeeper);
        assert!(store.find_enclosure("E-0001").await.unwrap().unwrap().is_cared_for_by("K-0001"));
    }

    #[tokio::test]
    async fn steps_must_run_in_order() {
        let store = store().await;
        let coordinator = coordinator(&store);
        let mut attempt = coordinator.begin::<Animal>();

        let err = coordinator.simulate(&mut attempt).unwrap_err();
        assert!(matches!(
            err,
            AdmissionError::OutOfOrder {
                expected: AdmissionState::SelectingResource,
                actual: AdmissionState::SelectingContainer
            }
        ));
        assert_eq!(attempt.state(), AdmissionState::SelectingContainer);
    }
}
