//! Reversible world edits.
//!
//! Every cell a round writes goes through [`EnvironmentMutationLog::apply`],
//! which remembers what was there before. At round end
//! [`EnvironmentMutationLog::revert_all`] puts every prior value back.
//! `revert_all` consumes the log, so a second revert cannot be expressed.

use minerware_host::{Environment, HostError};
use minerware_types::{Block, Location};

/// One reversible change to a world cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentEdit {
    pub location: Location,
    /// Value captured before the round first touched the cell.
    pub prior: Block,
    /// Latest value the round wrote.
    pub new_value: Block,
}

/// Outcome of [`EnvironmentMutationLog::revert_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevertReport {
    pub reverted: Vec<Location>,
    pub failed: Vec<(Location, HostError)>,
}

impl RevertReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_locations(&self) -> Vec<Location> {
        self.failed.iter().map(|(l, _)| *l).collect()
    }
}

/// Append-only record of the edits a round made.
#[derive(Debug, Default)]
pub struct EnvironmentMutationLog {
    edits: Vec<EnvironmentEdit>,
}

impl EnvironmentMutationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current value at `location`, writes `new_value`, and
    /// records the edit.
    ///
    /// Nothing is recorded if the host rejects the read or the write. A
    /// second edit to the same cell keeps the first captured prior value,
    /// so reverting still lands on the pre-round state.
    pub fn apply(
        &mut self,
        env: &mut impl Environment,
        location: Location,
        new_value: Block,
    ) -> Result<(), HostError> {
        let prior = env.block_at(location)?;
        env.set_block(location, new_value)?;

        match self.edits.iter_mut().find(|e| e.location == location) {
            Some(edit) => edit.new_value = new_value,
            None => self.edits.push(EnvironmentEdit {
                location,
                prior,
                new_value,
            }),
        }
        tracing::debug!(%location, %prior, %new_value, "environment edit applied");
        Ok(())
    }

    /// Restores every recorded prior value.
    ///
    /// A failed write does not stop the remaining reverts; failures are
    /// collected in the report instead.
    pub fn revert_all(self, env: &mut impl Environment) -> RevertReport {
        let mut report = RevertReport::default();
        for edit in self.edits {
            match env.set_block(edit.location, edit.prior) {
                Ok(()) => report.reverted.push(edit.location),
                Err(e) => {
                    tracing::warn!(
                        location = %edit.location,
                        error = %e,
                        "failed to revert environment edit"
                    );
                    report.failed.push((edit.location, e));
                }
            }
        }
        report
    }

    pub fn edits(&self) -> &[EnvironmentEdit] {
        &self.edits
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use minerware_host::InMemoryHost;
    use minerware_types::WorldId;

    use super::*;

    fn loc(x: i32) -> Location {
        Location::new(x, 64, 0)
    }

    fn host() -> InMemoryHost {
        let mut host = InMemoryHost::new(WorldId(1));
        host.fill(loc(1), Block::Solid(1));
        host.fill(loc(2), Block::Solid(2));
        host
    }

    #[test]
    fn test_apply_captures_prior_value() {
        let mut host = host();
        let mut log = EnvironmentMutationLog::new();
        log.apply(&mut host, loc(1), Block::Tnt).unwrap();

        assert_eq!(host.block(loc(1)), Block::Tnt);
        assert_eq!(
            log.edits(),
            &[EnvironmentEdit {
                location: loc(1),
                prior: Block::Solid(1),
                new_value: Block::Tnt,
            }]
        );
    }

    #[test]
    fn test_apply_then_revert_restores_world() {
        let mut host = host();
        let before = host.snapshot();

        let mut log = EnvironmentMutationLog::new();
        log.apply(&mut host, loc(1), Block::Tnt).unwrap();
        log.apply(&mut host, loc(2), Block::Tnt).unwrap();
        log.apply(&mut host, loc(3), Block::Tnt).unwrap();
        assert_ne!(host.snapshot(), before);

        let report = log.revert_all(&mut host);
        assert!(report.is_complete());
        assert_eq!(report.reverted.len(), 3);
        assert_eq!(host.snapshot(), before);
    }

    #[test]
    fn test_repeated_edit_keeps_first_prior() {
        let mut host = host();
        let mut log = EnvironmentMutationLog::new();
        log.apply(&mut host, loc(1), Block::Tnt).unwrap();
        log.apply(&mut host, loc(1), Block::Solid(9)).unwrap();
        assert_eq!(log.len(), 1);

        log.revert_all(&mut host);
        assert_eq!(host.block(loc(1)), Block::Solid(1));
    }

    #[test]
    fn test_rejected_write_is_not_recorded() {
        let mut host = host();
        host.occupy(loc(1));
        let mut log = EnvironmentMutationLog::new();
        let err = log.apply(&mut host, loc(1), Block::Tnt).unwrap_err();
        assert_eq!(err, HostError::Occupied(loc(1)));
        assert!(log.is_empty());
    }

    #[test]
    fn test_revert_continues_past_failures() {
        let mut host = host();
        let mut log = EnvironmentMutationLog::new();
        log.apply(&mut host, loc(1), Block::Tnt).unwrap();
        log.apply(&mut host, loc(2), Block::Tnt).unwrap();
        log.apply(&mut host, loc(3), Block::Tnt).unwrap();

        host.occupy(loc(2));
        let report = log.revert_all(&mut host);

        assert!(!report.is_complete());
        assert_eq!(report.failed_locations(), vec![loc(2)]);
        assert_eq!(report.reverted, vec![loc(1), loc(3)]);
        assert_eq!(host.block(loc(1)), Block::Solid(1));
        assert_eq!(host.block(loc(2)), Block::Tnt);
        assert_eq!(host.block(loc(3)), Block::Air);
    }
}
