pub mod coverage_chart;
pub mod header;
pub mod metrics;
pub mod option_select;
pub mod overflow_panel;
pub mod recommendation_panel;
pub mod skill_badges;
