//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer containers for the desktop and the session, the
//! runtime effect queue, and the hosted-app command bridge. UI composition stays in
//! [`crate::components`].

use desktop_app_contract::{AppCommand, AppHost};
use leptos::*;

use crate::{
    effect_executor, host,
    launcher::format_clock,
    model::{DesktopState, Viewport},
    reducer::{action_for_app_command, reduce_desktop, DesktopAction, RuntimeEffect},
    session::{reduce_session, SessionAction, SessionEffect, SessionState, SystemStatus},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching actions.
pub struct DesktopRuntimeContext {
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive power/boot/login state signal.
    pub session: RwSignal<SessionState>,
    /// Browser viewport, refreshed on resize.
    pub viewport: RwSignal<Viewport>,
    /// Queue of runtime effects emitted by the reducer and processed by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback; returns whether the action applied.
    pub dispatch: Callback<DesktopAction, bool>,
    /// Session reducer dispatch callback.
    pub dispatch_session: Callback<SessionAction, bool>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) -> bool {
        self.dispatch.call(action)
    }

    pub fn dispatch_session_action(&self, action: SessionAction) -> bool {
        self.dispatch_session.call(action)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.get_untracked()
    }

    /// Command bridge handed to hosted apps.
    pub fn app_host(&self) -> AppHost {
        let runtime = *self;
        AppHost::new(Callback::new(move |command: AppCommand| {
            let action = action_for_app_command(
                command,
                runtime.viewport(),
                format_clock(host::clock_now()),
            );
            runtime.dispatch_action(action)
        }))
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(children: Children) -> impl IntoView {
    let state = create_rw_signal(DesktopState::default());
    let session = create_rw_signal(SessionState::default());
    let viewport = create_rw_signal(host::desktop_viewport());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();

        match reduce_desktop(&mut desktop, action) {
            Ok(new_effects) => {
                if state.with_untracked(|current| *current != desktop) {
                    state.set(desktop);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
                true
            }
            Err(err) => {
                logging::warn!("desktop reducer error: {err}");
                false
            }
        }
    });

    let dispatch_session =
        Callback::new(move |action: SessionAction| apply_session_action(session, state, action));

    let runtime = DesktopRuntimeContext {
        state,
        session,
        viewport,
        effects,
        dispatch,
        dispatch_session,
    };

    provide_context(runtime);

    let resize_listener = window_event_listener(ev::resize, move |_| {
        viewport.set(host::desktop_viewport());
    });
    on_cleanup(move || resize_listener.remove());

    effect_executor::install(runtime);

    children().into_view()
}

/// Runs the session reducer and commits the result, including a failed login's error flag.
pub(crate) fn apply_session_action(
    session: RwSignal<SessionState>,
    state: RwSignal<DesktopState>,
    action: SessionAction,
) -> bool {
    let mut next = session.get_untracked();
    let previous = next.clone();
    let result = reduce_session(&mut next, action);

    // Each sign-in starts from a fresh desktop.
    if next.status == SystemStatus::Desktop && previous.status != SystemStatus::Desktop {
        state.set(DesktopState::default());
    }
    let login_failed = next.login_error && !previous.login_error;
    if next != previous {
        session.set(next);
    }

    match result {
        Ok(effects) => {
            for effect in effects {
                effect_executor::run_session_effect(session, state, effect);
            }
            true
        }
        Err(err) => {
            logging::warn!("session error: {err}");
            if login_failed {
                effect_executor::run_session_effect(
                    session,
                    state,
                    SessionEffect::ScheduleLoginErrorClear,
                );
            }
            false
        }
    }
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
