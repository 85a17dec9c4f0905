//! Menu choice parsing for the interactive client.

use anyhow::{Result, anyhow};

pub const MENU: &str = "\
====== COMMUNITY WATCH CLIENT ======
1. Send suspicious activity alert
2. View alerts
3. Register new member
4. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SendAlert,
    ViewAlerts,
    RegisterMember,
    Exit,
}

impl MenuChoice {
    /// Parses one line of menu input. Surrounding whitespace is ignored;
    /// anything other than `1`-`4` is rejected.
    pub fn parse(line: &str) -> Result<Self> {
        match line.trim() {
            "1" => Ok(MenuChoice::SendAlert),
            "2" => Ok(MenuChoice::ViewAlerts),
            "3" => Ok(MenuChoice::RegisterMember),
            "4" => Ok(MenuChoice::Exit),
            "" => Err(anyhow!("empty choice")),
            other => Err(anyhow!("invalid choice '{other}', expected 1-4")),
        }
    }
}
