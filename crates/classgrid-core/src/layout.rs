use chrono::Weekday;
use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::class::{ClassId, ClassRecord, ScheduledClass, weekday_name};
use crate::color::SubjectColor;
use crate::columns::assign_columns;
use crate::geometry::{BlockRect, GridSettings};
use crate::overlap::group_overlaps;
use crate::time_slot::TimeInterval;

/// Everything a display surface needs to draw one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassBlock {
    pub id: ClassId,
    pub name: String,
    pub subject: Option<String>,
    pub teacher_name: Option<String>,
    pub enrollment: Option<String>,
    #[serde(serialize_with = "serialize_interval")]
    pub time_slot: TimeInterval,
    pub start: u32,
    pub end: u32,
    pub column: usize,
    pub column_count: usize,
    pub color: SubjectColor,
    #[serde(flatten)]
    pub rect: BlockRect,
}

impl ClassBlock {
    fn place(class: ScheduledClass, grid: &GridSettings) -> Self {
        let rect = grid.block_rect(class.interval, class.column, class.column_count);
        Self {
            id: class.record.id,
            enrollment: class.record.enrollment(),
            name: class.record.name,
            subject: class.record.subject,
            teacher_name: class.record.teacher_name,
            time_slot: class.interval,
            start: class.interval.start,
            end: class.interval.end,
            column: class.column,
            column_count: class.column_count,
            color: class.color,
            rect,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLayout {
    #[serde(serialize_with = "serialize_weekday")]
    pub day: Weekday,
    pub blocks: Vec<ClassBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeekLayout {
    pub days: Vec<DayLayout>,
}

impl WeekLayout {
    #[must_use]
    pub fn day(&self, day: Weekday) -> Option<&DayLayout> {
        self.days.iter().find(|layout| layout.day == day)
    }

    #[must_use]
    pub fn block(&self, id: ClassId) -> Option<&ClassBlock> {
        self.days
            .iter()
            .flat_map(|layout| layout.blocks.iter())
            .find(|block| block.id == id)
    }

    #[must_use]
    pub fn block_count(&self) -> usize {
        self.days.iter().map(|layout| layout.blocks.len()).sum()
    }
}

/// Lays out one day: keeps the classes scheduled on `day` with a valid time
/// slot, clusters them, assigns columns and maps them onto the grid.
#[tracing::instrument(skip_all, fields(day = weekday_name(day)))]
pub fn layout_day(day: Weekday, classes: &[ClassRecord], grid: &GridSettings) -> DayLayout {
    let scheduled = classes
        .iter()
        .filter(|record| record.weekday() == Some(day))
        .filter_map(|record| {
            let class = ScheduledClass::from_record(record, day);
            if class.is_none() {
                trace!(class_id = record.id, slot = ?record.time_slot, "no valid time slot; skipped");
            }
            class
        })
        .collect::<Vec<_>>();

    let clusters = group_overlaps(scheduled);
    debug!(clusters = clusters.len(), "grouped overlaps");

    let mut blocks = clusters
        .into_iter()
        .flat_map(assign_columns)
        .map(|class| ClassBlock::place(class, grid))
        .collect::<Vec<_>>();
    blocks.sort_by_key(|block| block.start);

    DayLayout { day, blocks }
}

/// Lays out every visible day of the grid, in the configured order.
///
/// Classes without a recognised day, on a day that is not shown, or without
/// a valid time slot are left out. A day listed twice is laid out once.
#[tracing::instrument(skip_all, fields(classes = classes.len()))]
pub fn layout_week(classes: &[ClassRecord], grid: &GridSettings) -> WeekLayout {
    let mut days: Vec<DayLayout> = Vec::with_capacity(grid.days.len());
    for day in &grid.days {
        if days.iter().any(|layout| layout.day == *day) {
            trace!(day = weekday_name(*day), "day listed twice; skipped");
            continue;
        }
        days.push(layout_day(*day, classes, grid));
    }
    let layout = WeekLayout { days };

    debug!(
        placed = layout.block_count(),
        skipped = classes.len().saturating_sub(layout.block_count()),
        "week layout computed"
    );
    layout
}

fn serialize_weekday<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*day))
}

fn serialize_interval<S: Serializer>(
    interval: &TimeInterval,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(interval)
}
