use tracing::trace;

use crate::models::schedule::{AllocationKey, DailySchedule, ResolvedAllocations};
use crate::models::settings::HoursPolicy;

/// Collapses each person-day's commitments into allocated hours per project.
///
/// A bucket whose nominal sum fits under the daily cap is honored as-is. Otherwise the cap is
/// divided equally between every commitment in the bucket, ignoring each commitment's nominal
/// size: a 4h filming and an 8h editing colliding each receive `cap / 2`. Shares landing on the
/// same project accumulate.
pub fn resolve_conflicts(schedule: &DailySchedule, policy: &HoursPolicy) -> ResolvedAllocations {
    let mut resolved = ResolvedAllocations::new();
    let cap = policy.max_hours_per_day;

    for (person_day, commitments) in schedule {
        if commitments.is_empty() {
            continue;
        }

        let total_nominal: f64 = commitments.iter().map(|c| c.nominal_hours).sum();
        let over_cap = total_nominal > cap;
        let equal_share = cap / commitments.len() as f64;

        if over_cap {
            trace!(
                target: "app::calculator",
                person = %person_day.person,
                date = %person_day.date,
                total_nominal,
                commitments = commitments.len(),
                "splitting daily cap"
            );
        }

        for commitment in commitments {
            let hours = if over_cap {
                equal_share
            } else {
                commitment.nominal_hours
            };
            *resolved
                .entry(AllocationKey {
                    person: person_day.person.clone(),
                    date: person_day.date,
                    project: commitment.project.clone(),
                })
                .or_insert(0.0) += hours;
        }
    }

    resolved
}
