use serde::Serialize;

use crate::class::ClassId;
use crate::layout::ClassBlock;

pub const HOVER_Z_INDEX: i32 = 50;
pub const HOVER_SCALE: f64 = 1.02;
pub const DIMMED_OPACITY: f64 = 0.4;

/// Hover tracking for one timetable. Owned by whoever draws it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    hovered: Option<ClassId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockStyle {
    pub opacity: f64,
    pub z_index: i32,
    pub scale: f64,
}

impl HoverState {
    pub fn enter(&mut self, id: ClassId) {
        self.hovered = Some(id);
    }

    /// Leaving a block that is no longer hovered is a no-op.
    pub fn leave(&mut self, id: ClassId) {
        if self.hovered == Some(id) {
            self.hovered = None;
        }
    }

    #[must_use]
    pub fn hovered(&self) -> Option<ClassId> {
        self.hovered
    }

    /// The hovered block is lifted above its neighbours, every other block is
    /// dimmed while something is hovered.
    #[must_use]
    pub fn style_for(&self, block: &ClassBlock) -> BlockStyle {
        match self.hovered {
            Some(id) if id == block.id => BlockStyle {
                opacity: 1.0,
                z_index: HOVER_Z_INDEX,
                scale: HOVER_SCALE,
            },
            Some(_) => BlockStyle {
                opacity: DIMMED_OPACITY,
                z_index: block.rect.z_index,
                scale: 1.0,
            },
            None => BlockStyle {
                opacity: 1.0,
                z_index: block.rect.z_index,
                scale: 1.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;
    use crate::class::ClassRecord;
    use crate::geometry::GridSettings;
    use crate::layout::layout_day;

    fn blocks() -> Vec<ClassBlock> {
        let classes = [(1, "09:00-10:00"), (2, "09:30-10:30")]
            .into_iter()
            .map(|(id, slot)| {
                let mut record = ClassRecord::new(id, "Reading");
                record.day_of_week = Some("Thursday".to_string());
                record.time_slot = Some(slot.to_string());
                record
            })
            .collect::<Vec<_>>();
        layout_day(Weekday::Thu, &classes, &GridSettings::default()).blocks
    }

    #[test]
    fn idle_blocks_keep_their_stacking() {
        let blocks = blocks();
        let hover = HoverState::default();
        let styles = blocks
            .iter()
            .map(|block| hover.style_for(block))
            .collect::<Vec<_>>();

        assert_eq!(styles[0].z_index, 10);
        assert_eq!(styles[1].z_index, 11);
        assert!(styles.iter().all(|style| style.opacity == 1.0 && style.scale == 1.0));
    }

    #[test]
    fn hovering_lifts_one_block_and_dims_the_rest() {
        let blocks = blocks();
        let mut hover = HoverState::default();
        hover.enter(1);

        let lifted = hover.style_for(&blocks[0]);
        assert_eq!(lifted.z_index, HOVER_Z_INDEX);
        assert_eq!(lifted.scale, HOVER_SCALE);
        assert_eq!(lifted.opacity, 1.0);

        let dimmed = hover.style_for(&blocks[1]);
        assert_eq!(dimmed.opacity, DIMMED_OPACITY);
        assert_eq!(dimmed.z_index, 11);
    }

    #[test]
    fn leave_only_clears_the_hovered_block() {
        let mut hover = HoverState::default();
        hover.enter(1);
        hover.enter(2);
        hover.leave(1);
        assert_eq!(hover.hovered(), Some(2));
        hover.leave(2);
        assert_eq!(hover.hovered(), None);
    }
}
