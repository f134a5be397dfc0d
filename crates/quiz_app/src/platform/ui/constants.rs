use std::time::Duration;

use ratatui::style::Color;

/// Poll interval of the event loop; client results are drained at this rate.
pub const TICK: Duration = Duration::from_millis(75);

pub const HISTORY_TITLE: &str = "History";
pub const CHAT_TITLE: &str = "Quiz Chat";
pub const INPUT_PLACEHOLDER: &str = "Paste Wikipedia URL and press Enter";
pub const KEY_HINTS: &str = "Tab: focus  Enter: send/open  PgUp/PgDn: scroll  Esc: clear error  Ctrl-Q: quit";

/// Chat bubbles never take more than this share of the message pane.
pub const BUBBLE_WIDTH_PERCENT: u16 = 75;
pub const HISTORY_WIDTH_PERCENT: u16 = 25;

pub const ACCENT: Color = Color::Indexed(99);
pub const ASSISTANT_FG: Color = Color::Gray;
pub const MUTED: Color = Color::DarkGray;
pub const SELECTED_BG: Color = Color::Indexed(55);
pub const ERROR_FG: Color = Color::LightRed;
