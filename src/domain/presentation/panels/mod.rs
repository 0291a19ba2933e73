pub mod banners;
pub mod diagnostics_panel;
pub mod help_panel;
pub mod roster_panel;
pub mod shop_panel;
