//! Leptos components for the three views and the pieces they share.

pub mod force_graph;
pub mod frame_loop;
pub mod interest_list;
pub mod panels;
pub mod view_loader;
pub mod world_map;
