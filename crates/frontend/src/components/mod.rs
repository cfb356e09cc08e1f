pub mod help_overlay;
pub mod jump_form;
pub mod map_view;
pub mod marker_dialog;
pub mod star_list;
