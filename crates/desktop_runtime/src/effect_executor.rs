//! Explicit runtime effect-queue executor for reducer-emitted side effects.

use std::time::Duration;

use leptos::*;

use crate::{
    host,
    model::DesktopState,
    reducer::RuntimeEffect,
    runtime_context::{apply_session_action, DesktopRuntimeContext},
    session::{
        SessionAction, SessionEffect, SessionState, BOOT_COMPLETE_DELAY_MS, LOGIN_ERROR_CLEAR_MS,
    },
};

/// The rename input is mounted by the same render that processes the effect.
const RENAME_FOCUS_DELAY_MS: u64 = 10;

/// Installs the effect executor that drains reducer-emitted runtime effects in order.
pub fn install(runtime: DesktopRuntimeContext) {
    // Clear the current queue before processing so nested dispatches enqueue a fresh batch instead
    // of being overwritten by the in-flight drain.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            run_runtime_effect(effect);
        }
    });
}

fn run_runtime_effect(effect: RuntimeEffect) {
    match effect {
        RuntimeEffect::FocusRenameInput(file_id) => {
            let input_id = format!("rename-input-{file_id}");
            set_timeout(
                move || {
                    if !host::focus_element_by_id(&input_id) {
                        logging::log!("rename input `{input_id}` not mounted");
                    }
                },
                Duration::from_millis(RENAME_FOCUS_DELAY_MS),
            );
        }
        RuntimeEffect::FocusWindowInput(key) => {
            let window_id = key.to_string();
            request_animation_frame(move || {
                host::focus_container_by_id(&window_id);
            });
        }
    }
}

/// Schedules the timer behind a session effect.
pub(crate) fn run_session_effect(
    session: RwSignal<SessionState>,
    state: RwSignal<DesktopState>,
    effect: SessionEffect,
) {
    let (action, delay_ms) = match effect {
        SessionEffect::ScheduleBootCompletion => {
            (SessionAction::FinishBoot, BOOT_COMPLETE_DELAY_MS)
        }
        SessionEffect::ScheduleLoginErrorClear => {
            (SessionAction::ClearLoginError, LOGIN_ERROR_CLEAR_MS)
        }
    };
    set_timeout(
        move || {
            apply_session_action(session, state, action);
        },
        Duration::from_millis(u64::from(delay_ms)),
    );
}
