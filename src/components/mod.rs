pub mod app;
pub mod controls_panel;
pub mod evolution_display;
pub mod progress_panel;
pub mod resource_counter;
pub mod singularity_overlay;
pub mod upgrade_tree;
