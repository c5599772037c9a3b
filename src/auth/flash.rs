// src/auth/flash.rs
//! One-shot notices carried across the post-sign-in/out redirect.

use std::str::FromStr;

pub const FLASH_COOKIE: &str = "flash";

// Long enough to survive the redirect, short enough not to linger.
const FLASH_MAX_AGE_SECS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    SignedIn,
    SignedOut,
}

impl Flash {
    pub fn as_str(self) -> &'static str {
        match self {
            Flash::SignedIn => "signed-in",
            Flash::SignedOut => "signed-out",
        }
    }

    pub fn notice(self) -> &'static str {
        match self {
            Flash::SignedIn => "Signed in successfully!",
            Flash::SignedOut => "Signed out successfully!",
        }
    }

    pub fn set_cookie(self) -> String {
        format!(
            "{FLASH_COOKIE}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={FLASH_MAX_AGE_SECS}",
            self.as_str()
        )
    }

    pub fn clear_cookie() -> String {
        format!("{FLASH_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
    }
}

impl FromStr for Flash {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signed-in" => Ok(Flash::SignedIn),
            "signed-out" => Ok(Flash::SignedOut),
            _ => Err(()),
        }
    }
}
