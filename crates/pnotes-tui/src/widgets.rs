pub mod editor_widget;
pub mod info_line;
pub mod logger_widget;
pub mod menu_bar;
pub mod status_line_widget;
