//! Built-in threshold tables.
//!
//! Every table falls back to 0 below its last bucket.

use super::ladder::{Bound, Direction, Rule, ThresholdLadder};

/// Google and delivery-platform rating averages.
pub fn rating_ladder() -> ThresholdLadder {
    ThresholdLadder::at_least(&[
        (4.0, 10),
        (3.9, 9),
        (3.8, 8),
        (3.7, 7),
        (3.6, 6),
        (3.5, 5),
    ])
}

pub fn amritsari_cost_ladder() -> ThresholdLadder {
    ThresholdLadder::at_most(&[
        (22.0, 10),
        (23.0, 9),
        (24.0, 8),
        (25.0, 7),
        (26.0, 6),
        (27.0, 5),
    ])
}

/// Chennai skips 6 points: 22% goes straight to 5.
pub fn chennai_cost_ladder() -> ThresholdLadder {
    ThresholdLadder::at_most(&[(18.0, 10), (19.0, 9), (20.0, 8), (21.0, 7), (22.0, 5)])
}

pub fn chaat_masala_cost_ladder() -> ThresholdLadder {
    ThresholdLadder::at_most(&[
        (24.0, 10),
        (25.0, 9),
        (26.0, 8),
        (27.0, 7),
        (28.0, 6),
        (29.0, 5),
    ])
}

pub fn activity_ladder() -> ThresholdLadder {
    ThresholdLadder::at_least(&[(98.0, 10), (97.0, 8), (96.0, 6), (95.0, 4)])
}

/// Average kitchen prep time in minutes. The best bucket is strictly under 10.
pub fn prep_time_ladder() -> ThresholdLadder {
    ThresholdLadder::new(
        Direction::LowerIsBetter,
        vec![
            Rule::new(Bound::Below(10.0), 12),
            Rule::new(Bound::AtMost(15.0), 10),
            Rule::new(Bound::AtMost(16.0), 9),
            Rule::new(Bound::AtMost(17.0), 8),
            Rule::new(Bound::AtMost(18.0), 7),
            Rule::new(Bound::AtMost(19.0), 6),
            Rule::new(Bound::AtMost(20.0), 5),
        ],
        0,
    )
}

pub fn bad_order_ladder() -> ThresholdLadder {
    ThresholdLadder::at_most(&[(3.0, 5), (5.0, 4), (7.0, 3), (9.0, 2), (11.0, 1)])
}

pub fn delay_order_ladder() -> ThresholdLadder {
    ThresholdLadder::at_most(&[(10.0, 5), (12.0, 4), (14.0, 3), (16.0, 2), (18.0, 1)])
}

/// Add-on sale rate as a percentage of total sale.
pub fn add_on_sale_ladder() -> ThresholdLadder {
    ThresholdLadder::at_least(&[
        (16.0, 12),
        (15.0, 10),
        (14.0, 8),
        (13.0, 6),
        (12.0, 4),
        (11.0, 2),
    ])
}
