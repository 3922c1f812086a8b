//! Route guards.
//!
//! A guard decides from the resolved [`AuthState`] whether its wrapped view
//! may render. While the persisted session is still being checked the
//! decision is [`GuardDecision::Pending`] and only a loading view is shown, so
//! a protected view never mounts for an anonymous visitor.

use dioxus::prelude::*;
use store::{AuthState, Role};

use crate::provider::use_auth;
use crate::views::LoadingView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Any signed-in account.
    Protected,
    /// Organization accounts only.
    Org,
    /// Any signed-in account; the view picks its variant from the role.
    Profile,
}

/// Where a guard sends a visitor it turns away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectTarget {
    Login,
    Profile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Pending,
    Render,
    Redirect(RedirectTarget),
}

impl Guard {
    pub fn evaluate(self, auth: &AuthState) -> GuardDecision {
        if !auth.resolved {
            return GuardDecision::Pending;
        }
        match (self, auth.role()) {
            (_, None) => GuardDecision::Redirect(RedirectTarget::Login),
            (Guard::Org, Some(Role::Volunteer)) => GuardDecision::Redirect(RedirectTarget::Profile),
            _ => GuardDecision::Render,
        }
    }
}

/// Renders `children` once `guard` allows it, otherwise asks the router to
/// redirect through `on_redirect`.
#[component]
pub fn RouteGuard(
    guard: Guard,
    on_redirect: EventHandler<RedirectTarget>,
    children: Element,
) -> Element {
    let auth = use_auth();

    use_effect(move || {
        if let GuardDecision::Redirect(target) = guard.evaluate(&auth.read()) {
            tracing::debug!("{guard:?} guard redirecting to {target:?}");
            on_redirect.call(target);
        }
    });

    match guard.evaluate(&auth.read()) {
        GuardDecision::Pending => rsx! { LoadingView {} },
        GuardDecision::Render => rsx! { {children} },
        GuardDecision::Redirect(_) => rsx! {},
    }
}

#[component]
pub fn ProtectedRoute(on_redirect: EventHandler<RedirectTarget>, children: Element) -> Element {
    rsx! {
        RouteGuard { guard: Guard::Protected, on_redirect, {children} }
    }
}

#[component]
pub fn OrgRoute(on_redirect: EventHandler<RedirectTarget>, children: Element) -> Element {
    rsx! {
        RouteGuard { guard: Guard::Org, on_redirect, {children} }
    }
}

#[component]
pub fn ProfileRoute(on_redirect: EventHandler<RedirectTarget>, children: Element) -> Element {
    rsx! {
        RouteGuard { guard: Guard::Profile, on_redirect, {children} }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use store::{AppState, Profile, User};

    use crate::provider::use_store_provider;

    thread_local! {
        static GUARDED_RENDERS: Cell<usize> = const { Cell::new(0) };
    }

    #[component]
    fn Guarded() -> Element {
        GUARDED_RENDERS.with(|count| count.set(count.get() + 1));
        rsx! { p { "members only" } }
    }

    #[component]
    fn GuardedApp(auth: AuthState) -> Element {
        use_store_provider(AppState {
            auth,
            ..AppState::default()
        });
        rsx! {
            ProtectedRoute {
                on_redirect: move |_| {},
                Guarded {}
            }
        }
    }

    fn guarded_renders(auth: AuthState) -> usize {
        GUARDED_RENDERS.with(|count| count.set(0));
        let mut dom = VirtualDom::new_with_props(GuardedApp, GuardedAppProps { auth });
        dom.rebuild_in_place();
        GUARDED_RENDERS.with(Cell::get)
    }

    fn resolved(user: Option<User>) -> AuthState {
        AuthState {
            user,
            resolved: true,
            ..AuthState::default()
        }
    }

    fn user(is_org: bool) -> User {
        User {
            id: 1,
            email: "someone@example.org".to_string(),
            username: None,
            is_org,
            profile: Some(Profile::default()),
        }
    }

    #[test]
    fn test_unresolved_is_pending_for_every_guard() {
        let auth = AuthState::default();
        for guard in [Guard::Protected, Guard::Org, Guard::Profile] {
            assert_eq!(guard.evaluate(&auth), GuardDecision::Pending);
        }
    }

    #[test]
    fn test_anonymous_goes_to_login() {
        let auth = resolved(None);
        for guard in [Guard::Protected, Guard::Org, Guard::Profile] {
            assert_eq!(
                guard.evaluate(&auth),
                GuardDecision::Redirect(RedirectTarget::Login)
            );
        }
    }

    #[test]
    fn test_org_guard_checks_role() {
        assert_eq!(
            Guard::Org.evaluate(&resolved(Some(user(false)))),
            GuardDecision::Redirect(RedirectTarget::Profile)
        );
        assert_eq!(
            Guard::Org.evaluate(&resolved(Some(user(true)))),
            GuardDecision::Render
        );
    }

    #[test]
    fn test_signed_in_renders_protected_and_profile() {
        for is_org in [false, true] {
            let auth = resolved(Some(user(is_org)));
            assert_eq!(Guard::Protected.evaluate(&auth), GuardDecision::Render);
            assert_eq!(Guard::Profile.evaluate(&auth), GuardDecision::Render);
        }
    }

    #[test]
    fn test_guard_never_mounts_children_while_pending() {
        assert_eq!(guarded_renders(AuthState::default()), 0);
        assert_eq!(guarded_renders(resolved(None)), 0);
        assert_eq!(guarded_renders(resolved(Some(user(false)))), 1);
    }
}
