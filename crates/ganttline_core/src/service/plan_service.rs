//! Plan editing use-case service.
//!
//! # Responsibility
//! - Hold the current plan for one editing session.
//! - Apply a transition, then persist the full snapshot.
//!
//! # Invariants
//! - Every mutating call saves, including no-op edits on unknown ids.
//! - The in-memory plan advances even when the save fails; the error is
//!   returned so callers can surface it.
//! - "Today" is read only through the injected clock.

use crate::clock::Clock;
use crate::model::plan::{PhaseId, Plan, TaskId};
use crate::repo::plan_repo::{PlanRepository, RepoResult};
use crate::state::transitions::{self, TaskPatch};
use log::{debug, error};

/// Editing session over a persisted plan.
pub struct PlanService<R: PlanRepository, C: Clock> {
    repo: R,
    clock: C,
    plan: Plan,
}

impl<R: PlanRepository, C: Clock> PlanService<R, C> {
    /// Creates a session seeded from the repository snapshot.
    pub fn new(repo: R, clock: C) -> Self {
        let plan = repo.load_plan();
        Self { repo, clock, plan }
    }

    /// Current plan.
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Replaces the session state with the stored snapshot.
    pub fn reload(&mut self) {
        self.plan = self.repo.load_plan();
    }

    /// Appends a default phase and returns its id.
    pub fn add_phase(&mut self) -> RepoResult<PhaseId> {
        let next = transitions::add_phase(&self.plan);
        let phase_id = next
            .phases
            .last()
            .map(|phase| phase.id)
            .unwrap_or_default();
        self.commit("add_phase", next)?;
        Ok(phase_id)
    }

    /// Appends a default task starting today; `None` for an unknown phase.
    pub fn add_task(&mut self, phase_id: PhaseId) -> RepoResult<Option<TaskId>> {
        let next = transitions::add_task(&self.plan, phase_id, self.clock.today());
        let task_id = next
            .phase(phase_id)
            .and_then(|phase| phase.tasks.last())
            .map(|task| task.id);
        self.commit("add_task", next)?;
        Ok(task_id)
    }

    pub fn rename_phase(&mut self, phase_id: PhaseId, name: impl Into<String>) -> RepoResult<()> {
        let next = transitions::rename_phase(&self.plan, phase_id, name);
        self.commit("rename_phase", next)
    }

    pub fn recolor_phase(&mut self, phase_id: PhaseId, color: impl Into<String>) -> RepoResult<()> {
        let next = transitions::recolor_phase(&self.plan, phase_id, color);
        self.commit("recolor_phase", next)
    }

    pub fn update_task(
        &mut self,
        phase_id: PhaseId,
        task_id: TaskId,
        patch: &TaskPatch,
    ) -> RepoResult<()> {
        let next = transitions::update_task(&self.plan, phase_id, task_id, patch);
        self.commit("update_task", next)
    }

    /// Removes a phase and its tasks. Callers confirm before calling.
    pub fn remove_phase(&mut self, phase_id: PhaseId) -> RepoResult<()> {
        let next = transitions::remove_phase(&self.plan, phase_id);
        self.commit("remove_phase", next)
    }

    /// Removes one task. Callers confirm before calling.
    pub fn remove_task(&mut self, phase_id: PhaseId, task_id: TaskId) -> RepoResult<()> {
        let next = transitions::remove_task(&self.plan, phase_id, task_id);
        self.commit("remove_task", next)
    }

    fn commit(&mut self, op: &'static str, next: Plan) -> RepoResult<()> {
        let changed = next != self.plan;
        self.plan = next;
        match self.repo.save_plan(&self.plan) {
            Ok(()) => {
                debug!(
                    "event=plan_commit module=service status=ok op={} changed={} phases={}",
                    op,
                    changed,
                    self.plan.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=plan_commit module=service status=error op={} error_code=plan_save_failed error={}",
                    op, err
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PlanService;
    use crate::clock::FixedClock;
    use crate::model::palette::PALETTE;
    use crate::repo::plan_repo::{decode_plan, MemoryPlanRepository, PlanRepository};
    use crate::state::transitions::TaskPatch;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
    }

    #[test]
    fn every_mutation_is_persisted() {
        let repo = MemoryPlanRepository::new();
        let mut service = PlanService::new(&repo, clock());

        let phase_id = service.add_phase().unwrap();
        let task_id = service.add_task(phase_id).unwrap().expect("phase exists");
        service
            .update_task(phase_id, task_id, &TaskPatch::default().with_duration(Some(9)))
            .unwrap();

        let stored = decode_plan(&repo.raw_snapshot().unwrap()).unwrap();
        assert_eq!(&stored, service.plan());
        let task = &stored.phases[0].tasks[0];
        assert_eq!(task.start_date, clock().0);
        assert_eq!(task.duration, Some(9));
        assert_eq!(stored.phases[0].color, PALETTE[0]);
    }

    #[test]
    fn add_task_on_unknown_phase_returns_none() {
        let repo = MemoryPlanRepository::new();
        let mut service = PlanService::new(&repo, clock());
        service.add_phase().unwrap();
        assert_eq!(service.add_task(Uuid::new_v4()).unwrap(), None);
        assert_eq!(service.plan().task_count(), 0);
    }

    #[test]
    fn new_session_resumes_stored_plan() {
        let repo = MemoryPlanRepository::new();
        let phase_id = {
            let mut first = PlanService::new(&repo, clock());
            let phase_id = first.add_phase().unwrap();
            first.rename_phase(phase_id, "Discovery").unwrap();
            phase_id
        };

        let second = PlanService::new(&repo, clock());
        assert_eq!(
            second.plan().phase(phase_id).map(|p| p.name.as_str()),
            Some("Discovery")
        );
    }

    #[test]
    fn reload_discards_unsaved_divergence() {
        let repo = MemoryPlanRepository::new();
        let mut service = PlanService::new(&repo, clock());
        service.add_phase().unwrap();
        repo.save_plan(&crate::model::plan::Plan::new()).unwrap();
        service.reload();
        assert!(service.plan().is_empty());
    }
}
