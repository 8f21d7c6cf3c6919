pub mod formatter;

pub use formatter::{
    format_breakdown, format_breakdown_tsv, format_points, format_scorecard_detail,
    format_scorecard_table, format_scorecard_tsv, should_use_colors,
};
