//! Core bundle: the start greeting

use crate::application::messaging::{Bundle, Command};
use crate::domain::entities::Reply;

/// Quick-access buttons shown under the greeting
const MENU_BUTTONS: [&str; 3] = ["/ask", "/quote", "/joke"];

pub fn bundle() -> Bundle {
    Bundle::new("core").command(Command::new("start", "Start the bot", |inv| async move {
        Reply::menu(
            format!(
                "Hey {}! I'm alive. Type /help to see commands.",
                inv.user.display_name
            ),
            MENU_BUTTONS.iter().map(|b| b.to_string()).collect(),
        )
    }))
}
