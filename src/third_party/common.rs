use ratatui::style::{Color, Style};

pub const BOOL: Style = Style::new().fg(Color::Magenta);
pub const NULL: Style = Style::new().fg(Color::DarkGray);
pub const NUMBER: Style = Style::new().fg(Color::LightBlue);
pub const STRING: Style = Style::new().fg(Color::Green);
pub const COUNT: Style = Style::new().fg(Color::DarkGray);
