//! Native UI bridge for Ganttline core.

pub mod api;
