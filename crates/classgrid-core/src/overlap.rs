use tracing::trace;

use crate::class::ScheduledClass;

/// Same-day classes connected through time overlap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlapCluster {
    pub members: Vec<ScheduledClass>,
}

impl OverlapCluster {
    fn overlaps(&self, candidate: &ScheduledClass) -> bool {
        self.members
            .iter()
            .any(|member| candidate.interval.overlaps(&member.interval))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Groups one day's classes into overlap clusters.
///
/// Classes are visited by start time (ties keep input order) and join the
/// first cluster holding any member they overlap. Clusters are never merged
/// afterwards, so the grouping is single pass and depends on visit order.
#[must_use]
pub fn group_overlaps(mut classes: Vec<ScheduledClass>) -> Vec<OverlapCluster> {
    classes.sort_by_key(|class| class.interval.start);

    let mut clusters: Vec<OverlapCluster> = Vec::new();
    for class in classes {
        match clusters.iter_mut().find(|cluster| cluster.overlaps(&class)) {
            Some(cluster) => {
                trace!(class_id = class.id(), "joined existing cluster");
                cluster.members.push(class);
            }
            None => {
                trace!(class_id = class.id(), "opened new cluster");
                clusters.push(OverlapCluster {
                    members: vec![class],
                });
            }
        }
    }

    clusters
}
