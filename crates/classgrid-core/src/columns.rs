use std::collections::BTreeSet;

use tracing::trace;

use crate::class::ScheduledClass;
use crate::overlap::OverlapCluster;

/// Greedy lane assignment for one cluster.
///
/// Each member, in start order, takes the lowest column not held by an
/// earlier member that is still running at its start. The cluster's column
/// count is `max(column) + 1` and is shared by every member, even members
/// that never meet the one in the last column.
#[must_use]
pub fn assign_columns(cluster: OverlapCluster) -> Vec<ScheduledClass> {
    let mut members = cluster.members;
    members.sort_by_key(|class| class.interval.start);

    for index in 0..members.len() {
        let current = members[index].interval;
        let used = members[..index]
            .iter()
            .filter(|previous| {
                !current.is_degenerate()
                    && !previous.interval.is_degenerate()
                    && previous.interval.end > current.start
            })
            .map(|previous| previous.column)
            .collect::<BTreeSet<_>>();

        let mut column = 0;
        while used.contains(&column) {
            column += 1;
        }
        trace!(class_id = members[index].id(), column, "assigned column");
        members[index].column = column;
    }

    let column_count = members
        .iter()
        .map(|class| class.column)
        .max()
        .unwrap_or(0)
        + 1;
    for class in &mut members {
        class.column_count = column_count;
    }

    members
}
