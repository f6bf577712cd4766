use chrono::Weekday;
use classgrid_core::class::ClassRecord;
use classgrid_core::commands::parse_classes;
use classgrid_core::geometry::GridSettings;
use classgrid_core::layout::{ClassBlock, DayLayout, WeekLayout, layout_week};

const WEEK_FIXTURE: &str = include_str!("fixtures/week.json");

fn fixture_layout() -> WeekLayout {
    let classes = parse_classes(WEEK_FIXTURE).expect("fixture decodes");
    layout_week(&classes, &GridSettings::default())
}

fn day(layout: &WeekLayout, weekday: Weekday) -> &DayLayout {
    layout.day(weekday).expect("visible day present")
}

fn block(layout: &WeekLayout, id: i64) -> &ClassBlock {
    layout.block(id).expect("block present")
}

#[test]
fn partially_overlapping_classes_split_then_reset() {
    let layout = fixture_layout();

    let algebra = block(&layout, 1);
    let biology = block(&layout, 2);
    let essays = block(&layout, 3);

    assert_eq!((algebra.column, algebra.column_count), (0, 2));
    assert_eq!((biology.column, biology.column_count), (1, 2));
    assert_eq!((essays.column, essays.column_count), (0, 1));

    assert_eq!(algebra.rect.width, 50.0);
    assert_eq!(biology.rect.left, 50.0);
    assert_eq!(essays.rect.width, 100.0);
    assert_eq!(essays.rect.top, 240.0);
}

#[test]
fn identical_slots_share_the_column_space() {
    let layout = fixture_layout();
    let tuesday = day(&layout, Weekday::Tue);

    let columns = tuesday
        .blocks
        .iter()
        .map(|block| (block.id, block.column, block.column_count))
        .collect::<Vec<_>>();
    assert_eq!(columns, vec![(4, 0, 2), (5, 1, 2)]);
}

#[test]
fn invalid_and_missing_slots_are_left_out() {
    let layout = fixture_layout();

    assert!(layout.block(6).is_none(), "25:00 is not a clock time");
    assert!(layout.block(7).is_none(), "no time slot at all");
    assert!(layout.block(13).is_none(), "no day of week");
    assert!(layout.block(12).is_none(), "saturday is not drawn by default");
    assert!(day(&layout, Weekday::Wed).blocks.is_empty());
}

#[test]
fn four_simultaneous_classes_get_four_lanes() {
    let layout = fixture_layout();
    let thursday = day(&layout, Weekday::Thu);

    let columns = thursday
        .blocks
        .iter()
        .map(|block| block.column)
        .collect::<Vec<_>>();
    assert_eq!(columns, vec![0, 1, 2, 3]);
    assert!(thursday.blocks.iter().all(|block| block.column_count == 4));
    assert!(thursday.blocks.iter().all(|block| block.rect.width == 25.0));
    assert!(thursday.blocks.iter().all(|block| block.color == thursday.blocks[0].color));
}

#[test]
fn reversed_slot_stands_alone() {
    let layout = fixture_layout();
    let friday = day(&layout, Weekday::Fri);

    let ids = friday.blocks.iter().map(|block| block.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![15, 14, 16]);

    let backwards = block(&layout, 14);
    assert_eq!((backwards.column, backwards.column_count), (0, 1));
    assert_eq!(backwards.rect.height, 0.0);

    assert_eq!(block(&layout, 15).column_count, 2);
    assert_eq!(block(&layout, 16).column, 1);
}

#[test]
fn layout_is_idempotent() {
    let classes = parse_classes(WEEK_FIXTURE).expect("fixture decodes");
    let grid = GridSettings::default();

    let first = layout_week(&classes, &grid);
    let second = layout_week(&classes, &grid);
    assert_eq!(first, second);
}

#[test]
fn same_column_blocks_never_overlap_and_counts_match() {
    let layout = fixture_layout();

    for day in &layout.days {
        for (idx, left) in day.blocks.iter().enumerate() {
            for right in &day.blocks[idx + 1..] {
                if left.time_slot.overlaps(&right.time_slot) {
                    assert_eq!(left.column_count, right.column_count);
                    assert_ne!(left.column, right.column);
                }
            }
            assert!(left.column < left.column_count);
        }
    }
}

#[test]
fn other_days_do_not_influence_each_other() {
    let classes = parse_classes(WEEK_FIXTURE).expect("fixture decodes");
    let grid = GridSettings::default();
    let full = layout_week(&classes, &grid);

    let monday_only = classes
        .iter()
        .filter(|class| class.day_of_week.as_deref() == Some("Monday"))
        .cloned()
        .collect::<Vec<ClassRecord>>();
    let isolated = layout_week(&monday_only, &grid);

    assert_eq!(day(&full, Weekday::Mon), day(&isolated, Weekday::Mon));
}

#[test]
fn configured_days_control_what_is_drawn() {
    let classes = parse_classes(WEEK_FIXTURE).expect("fixture decodes");
    let grid = GridSettings {
        days: vec![Weekday::Sat, Weekday::Mon],
        ..GridSettings::default()
    };
    let layout = layout_week(&classes, &grid);

    let order = layout.days.iter().map(|day| day.day).collect::<Vec<_>>();
    assert_eq!(order, vec![Weekday::Sat, Weekday::Mon]);
    assert_eq!(block(&layout, 12).rect.top, 160.0);
    assert_eq!(block(&layout, 12).rect.height, 156.0);
    assert_eq!(layout.block_count(), 4);
}
