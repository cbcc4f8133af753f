pub mod address_form;
pub mod error_banner;
pub mod isochrone_list;
pub mod map_panel;
