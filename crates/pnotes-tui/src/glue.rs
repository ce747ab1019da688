pub fn convert_rgb([r, g, b]: [u8; 3]) -> tui::style::Color {
    tui::style::Color::Rgb(r, g, b)
}
