//! Property-based tests for the masonry layout.
//!
//! Tests validate:
//! 1. distribute is deterministic
//! 2. Column heights differ by at most one item height
//! 3. Items keep their input order within a column
//! 4. Paged appends land exactly where a single distribute would put them
//! 5. Measurements inside the dead band never move an item
//! 6. reset empties every column

use proptest::prelude::*;
use waterfall::layout::{
    distribute, estimate_height, HeightParams, LayoutConfig, MasonryLayout, MeasureOutcome,
};
use waterfall::model::{Item, ItemId, MediaKind};

const EPSILON: f64 = 1e-6;

fn arb_kind() -> impl Strategy<Value = MediaKind> {
    prop_oneof![
        Just(MediaKind::Image),
        Just(MediaKind::Video),
        Just(MediaKind::Other)
    ]
}

/// Item with a unique id `p{index}`, optionally pre-measured.
fn arb_items(max: usize) -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(
        (
            arb_kind(),
            prop::option::of(1.0f64..1000.0),
            prop::option::of((1.0f64..4000.0, 1.0f64..4000.0)),
        ),
        0..max,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (kind, measured, declared))| {
                let mut item = Item::new(ItemId::new(format!("p{i}")).unwrap(), kind);
                if let Some((w, h)) = declared {
                    item = item.with_declared_size(w, h);
                }
                if let Some(h) = measured {
                    item = item.with_measured_height(h);
                }
                item
            })
            .collect()
    })
}

fn index_of(id: &ItemId) -> usize {
    id.as_str()[1..].parse().unwrap()
}

fn engine(column_count: usize, column_width: f64) -> MasonryLayout {
    let mut layout = MasonryLayout::new(LayoutConfig::default());
    layout.set_column_count(column_count);
    layout.set_column_width(column_width);
    layout
}

fn assignment(layout: &MasonryLayout) -> Vec<Vec<ItemId>> {
    layout
        .columns()
        .iter()
        .map(|column| column.items().to_vec())
        .collect()
}

// ===== Property 1: Determinism =====

proptest! {
    #[test]
    fn distribute_is_deterministic(
        items in arb_items(60),
        columns in 1usize..7,
        width in 50.0f64..500.0,
    ) {
        let params = HeightParams::default();
        let first = distribute(&items, columns, width, &params);
        let second = distribute(&items, columns, width, &params);
        prop_assert_eq!(first, second);
    }
}

// ===== Property 2: Balance =====

proptest! {
    #[test]
    fn column_heights_stay_within_one_item(
        items in arb_items(60),
        columns in 1usize..7,
        width in 50.0f64..500.0,
    ) {
        let params = HeightParams::default();
        let result = distribute(&items, columns, width, &params);

        let tallest_item = items
            .iter()
            .map(|item| estimate_height(item, width, &params))
            .fold(0.0f64, f64::max);
        let max = result.column_heights.iter().copied().fold(f64::MIN, f64::max);
        let min = result.column_heights.iter().copied().fold(f64::MAX, f64::min);

        prop_assert!(
            max - min <= tallest_item + EPSILON,
            "spread {} exceeds tallest item {}",
            max - min,
            tallest_item
        );
    }
}

// ===== Property 3: Order preservation =====

proptest! {
    #[test]
    fn columns_preserve_input_order(
        items in arb_items(60),
        columns in 1usize..7,
        width in 50.0f64..500.0,
    ) {
        let mut layout = engine(columns, width);
        layout.distribute(items);

        for column in layout.columns() {
            let indices: Vec<usize> = column.items().iter().map(index_of).collect();
            prop_assert!(
                indices.windows(2).all(|pair| pair[0] < pair[1]),
                "column out of order: {:?}",
                indices
            );
        }
    }
}

// ===== Property 4: Incrementality equivalence =====

proptest! {
    #[test]
    fn paged_appends_match_single_distribute(
        items in arb_items(80),
        columns in 1usize..7,
        width in 50.0f64..500.0,
        page_size in 1usize..25,
    ) {
        let mut incremental = engine(columns, width);
        for page in items.chunks(page_size) {
            incremental.append(page.to_vec());
        }

        let expected = distribute(&items, columns, width, &HeightParams::default());
        prop_assert_eq!(assignment(&incremental), expected.columns);
    }

    #[test]
    fn appends_never_move_placed_items(
        first in arb_items(30),
        second in arb_items(30),
        columns in 1usize..7,
    ) {
        let mut layout = engine(columns, 240.0);
        layout.append(first.clone());
        let before: Vec<_> = first
            .iter()
            .map(|item| layout.placement(item.id()))
            .collect();

        // Second batch gets distinct ids.
        let offset = first.len();
        layout.append(second.into_iter().enumerate().map(|(i, item)| {
            let id = ItemId::new(format!("p{}", offset + i)).unwrap();
            let mut renamed = Item::new(id, item.kind());
            if let Some(h) = item.measured_height() {
                renamed = renamed.with_measured_height(h);
            }
            renamed
        }));

        let after: Vec<_> = first
            .iter()
            .map(|item| layout.placement(item.id()))
            .collect();
        prop_assert_eq!(before, after);
    }
}

// ===== Property 5: Dead-band stability =====

proptest! {
    #[test]
    fn measurement_inside_dead_band_moves_nothing(
        items in arb_items(40),
        columns in 1usize..7,
        pick in any::<prop::sample::Index>(),
        delta in -0.04f64..0.04,
    ) {
        prop_assume!(!items.is_empty());
        let width = 240.0;
        let params = HeightParams::default();
        let target = items[pick.index(items.len())].clone();

        let mut layout = engine(columns, width);
        layout.append(items);
        let before = assignment(&layout);

        let assumed = estimate_height(&target, width, &params);
        let reported = assumed * (1.0 + delta) - params.gap;
        let outcome = layout.on_item_measured(target.id(), reported);

        prop_assert_eq!(outcome, MeasureOutcome::Absorbed);
        prop_assert_eq!(assignment(&layout), before);
    }
}

// ===== Property 6: Reset =====

proptest! {
    #[test]
    fn reset_clears_every_column(
        items in arb_items(60),
        columns in 1usize..7,
    ) {
        let mut layout = engine(columns, 300.0);
        layout.append(items);
        layout.reset();

        prop_assert!(layout.is_empty());
        prop_assert_eq!(layout.column_count(), columns);
        prop_assert!(layout.columns().iter().all(|c| c.is_empty()));
        prop_assert!(layout.column_heights().iter().all(|&h| h == 0.0));
    }
}
