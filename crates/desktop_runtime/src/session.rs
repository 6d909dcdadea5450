//! Power, boot and login state machine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{self, SessionConfig};

pub const BOOT_LINE_INTERVAL_MS: u32 = 150;
pub const BOOT_COMPLETE_DELAY_MS: u32 = 1_000;
pub const LOGIN_ERROR_CLEAR_MS: u32 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemStatus {
    Off,
    Booting,
    Login,
    Desktop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub status: SystemStatus,
    pub user: Option<User>,
    pub boot_lines_shown: usize,
    /// Set once every boot line is visible and completion has been scheduled.
    pub boot_complete_pending: bool,
    pub login_error: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            status: SystemStatus::Booting,
            user: None,
            boot_lines_shown: 0,
            boot_complete_pending: false,
            login_error: false,
        }
    }
}

impl SessionState {
    fn restart_boot(&mut self) {
        self.status = SystemStatus::Booting;
        self.boot_lines_shown = 0;
        self.boot_complete_pending = false;
        self.login_error = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    Shutdown,
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    PowerOn,
    BootTick,
    FinishBoot,
    SubmitPassword { password: String },
    ClearLoginError,
    Power(PowerAction),
    UpdateUser(User),
}

impl SessionAction {
    fn name(&self) -> &'static str {
        match self {
            Self::PowerOn => "power-on",
            Self::BootTick => "boot-tick",
            Self::FinishBoot => "finish-boot",
            Self::SubmitPassword { .. } => "submit-password",
            Self::ClearLoginError => "clear-login-error",
            Self::Power(PowerAction::Shutdown) => "shutdown",
            Self::Power(PowerAction::Restart) => "restart",
            Self::UpdateUser(_) => "update-user",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    /// Dispatch `FinishBoot` after `BOOT_COMPLETE_DELAY_MS`.
    ScheduleBootCompletion,
    /// Dispatch `ClearLoginError` after `LOGIN_ERROR_CLEAR_MS`.
    ScheduleLoginErrorClear,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("incorrect password")]
    InvalidPassword,
    #[error("`{action}` is not valid while the system is {status:?}")]
    UnexpectedStatus {
        action: &'static str,
        status: SystemStatus,
    },
}

pub fn boot_messages() -> &'static [String] {
    &catalog::session_config().boot_messages
}

/// Checks `password` against the configured account.
pub fn verify_password(config: &SessionConfig, password: &str) -> Result<User, SessionError> {
    if password == config.password {
        Ok(User {
            username: config.username.clone(),
            avatar_url: config.avatar_url.clone(),
        })
    } else {
        Err(SessionError::InvalidPassword)
    }
}

fn expect_status(
    state: &SessionState,
    action: &SessionAction,
    expected: SystemStatus,
) -> Result<(), SessionError> {
    if state.status == expected {
        Ok(())
    } else {
        Err(SessionError::UnexpectedStatus {
            action: action.name(),
            status: state.status,
        })
    }
}

/// Applies `action` to the session.
///
/// A wrong password still flags `login_error` on `state` before returning the error.
pub fn reduce_session(
    state: &mut SessionState,
    action: SessionAction,
) -> Result<Vec<SessionEffect>, SessionError> {
    let mut effects = Vec::new();

    match &action {
        SessionAction::PowerOn => {
            expect_status(state, &action, SystemStatus::Off)?;
            state.restart_boot();
        }
        SessionAction::BootTick => {
            expect_status(state, &action, SystemStatus::Booting)?;
            if state.boot_lines_shown < boot_messages().len() {
                state.boot_lines_shown += 1;
            } else if !state.boot_complete_pending {
                state.boot_complete_pending = true;
                effects.push(SessionEffect::ScheduleBootCompletion);
            }
        }
        SessionAction::FinishBoot => {
            expect_status(state, &action, SystemStatus::Booting)?;
            state.status = SystemStatus::Login;
            state.boot_complete_pending = false;
        }
        SessionAction::SubmitPassword { password } => {
            expect_status(state, &action, SystemStatus::Login)?;
            match verify_password(catalog::session_config(), password) {
                Ok(user) => {
                    state.user = Some(user);
                    state.login_error = false;
                    state.status = SystemStatus::Desktop;
                }
                Err(err) => {
                    state.login_error = true;
                    return Err(err);
                }
            }
        }
        SessionAction::ClearLoginError => {
            state.login_error = false;
        }
        SessionAction::Power(PowerAction::Shutdown) => {
            state.status = SystemStatus::Off;
        }
        SessionAction::Power(PowerAction::Restart) => {
            state.restart_boot();
        }
        SessionAction::UpdateUser(user) => {
            expect_status(state, &action, SystemStatus::Desktop)?;
            state.user = Some(user.clone());
        }
    }

    Ok(effects)
}

/// Builds the profile submitted from Settings, or `None` when the username is blank.
///
/// A blank avatar keeps `current_avatar`.
pub fn profile_update(username: &str, avatar_url: &str, current_avatar: &str) -> Option<User> {
    let username = username.trim();
    if username.is_empty() {
        return None;
    }
    let avatar_url = match avatar_url.trim() {
        "" => current_avatar,
        url => url,
    };
    Some(User {
        username: username.to_string(),
        avatar_url: avatar_url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn booted() -> SessionState {
        let mut state = SessionState::default();
        for _ in 0..boot_messages().len() {
            reduce_session(&mut state, SessionAction::BootTick).expect("tick");
        }
        reduce_session(&mut state, SessionAction::BootTick).expect("final tick");
        reduce_session(&mut state, SessionAction::FinishBoot).expect("finish");
        state
    }

    #[test]
    fn boot_ticks_reveal_lines_then_schedule_completion_once() {
        let mut state = SessionState::default();
        let total = boot_messages().len();
        for shown in 1..=total {
            assert_eq!(reduce_session(&mut state, SessionAction::BootTick), Ok(Vec::new()));
            assert_eq!(state.boot_lines_shown, shown);
        }
        assert_eq!(
            reduce_session(&mut state, SessionAction::BootTick),
            Ok(vec![SessionEffect::ScheduleBootCompletion])
        );
        assert_eq!(reduce_session(&mut state, SessionAction::BootTick), Ok(Vec::new()));

        reduce_session(&mut state, SessionAction::FinishBoot).expect("finish");
        assert_eq!(state.status, SystemStatus::Login);
    }

    #[test]
    fn wrong_password_flags_the_error_until_cleared() {
        let mut state = booted();
        assert_eq!(
            reduce_session(
                &mut state,
                SessionAction::SubmitPassword {
                    password: "hunter2".to_string(),
                }
            ),
            Err(SessionError::InvalidPassword)
        );
        assert!(state.login_error);
        assert_eq!(state.status, SystemStatus::Login);

        reduce_session(&mut state, SessionAction::ClearLoginError).expect("clear");
        assert!(!state.login_error);
    }

    #[test]
    fn right_password_signs_in_the_configured_user() {
        let mut state = booted();
        let password = catalog::session_config().password.clone();
        reduce_session(&mut state, SessionAction::SubmitPassword { password }).expect("login");
        assert_eq!(state.status, SystemStatus::Desktop);
        assert_eq!(state.user.as_ref().map(|u| u.username.as_str()), Some("mario"));
    }

    #[test]
    fn power_actions_restart_or_shut_down() {
        let mut state = booted();
        state.status = SystemStatus::Desktop;
        reduce_session(&mut state, SessionAction::Power(PowerAction::Restart)).expect("restart");
        assert_eq!(state.status, SystemStatus::Booting);
        assert_eq!(state.boot_lines_shown, 0);

        reduce_session(&mut state, SessionAction::Power(PowerAction::Shutdown)).expect("shutdown");
        assert_eq!(state.status, SystemStatus::Off);
        reduce_session(&mut state, SessionAction::PowerOn).expect("power on");
        assert_eq!(state.status, SystemStatus::Booting);
    }

    #[test]
    fn actions_out_of_order_are_rejected() {
        let mut state = SessionState::default();
        assert_eq!(
            reduce_session(
                &mut state,
                SessionAction::SubmitPassword {
                    password: "admin".to_string(),
                }
            ),
            Err(SessionError::UnexpectedStatus {
                action: "submit-password",
                status: SystemStatus::Booting,
            })
        );
        assert!(reduce_session(&mut state, SessionAction::PowerOn).is_err());
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn profile_edits_apply_only_on_the_desktop() {
        let user = User {
            username: "luigi".to_string(),
            avatar_url: "avatars/luigi.png".to_string(),
        };
        let mut state = booted();
        assert_eq!(
            reduce_session(&mut state, SessionAction::UpdateUser(user.clone())),
            Err(SessionError::UnexpectedStatus {
                action: "update-user",
                status: SystemStatus::Login,
            })
        );
        assert_eq!(state.user, None);

        let password = catalog::session_config().password.clone();
        reduce_session(&mut state, SessionAction::SubmitPassword { password }).expect("login");
        reduce_session(&mut state, SessionAction::UpdateUser(user.clone())).expect("update");
        assert_eq!(state.user, Some(user));
        assert_eq!(state.status, SystemStatus::Desktop);
    }

    #[test]
    fn profile_form_trims_and_keeps_the_old_avatar_when_blank() {
        assert_eq!(profile_update("   ", "a.png", "old.png"), None);
        assert_eq!(
            profile_update(" luigi ", "  ", "old.png"),
            Some(User {
                username: "luigi".to_string(),
                avatar_url: "old.png".to_string(),
            })
        );
    }
}
