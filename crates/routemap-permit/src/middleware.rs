//! The `permits` middleware: wraps a handler with authentication and
//! authorization checks that short-circuit to `forbidden`.

use crate::user::CurrentUser;

/// A middleware builder. Allows access to the wrapped handler if
///
/// 1. the user is authenticated, and
/// 2. every configured rule is satisfied.
///
/// Rules are callables over the current-user resolver; the `authenticated`
/// callback runs before the rules so they can see the stored user.
pub struct Permits<C> {
    rules: Vec<Box<dyn Fn(&C) -> bool>>,
}

impl<C: CurrentUser> Permits<C> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rule(mut self, check: impl Fn(&C) -> bool + 'static) -> Self {
        self.rules.push(Box::new(check));
        self
    }

    /// Wrap `next`, returning the guarded handler.
    pub fn wrap<H>(self, next: H) -> impl Fn(&mut C) -> C::Output
    where
        H: Fn(&mut C) -> C::Output,
    {
        move |current| {
            let user = match current.authenticate() {
                Some(user) => user,
                None => return current.forbidden(),
            };
            if current.authenticated(user).is_none() {
                return current.forbidden();
            }
            if !self.rules.iter().all(|rule| rule(current)) {
                return current.forbidden();
            }
            next(current)
        }
    }
}

impl<C: CurrentUser> Default for Permits<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// A rule that passes when one of `allowed` is among the user's roles.
pub fn role_in<C: CurrentUser>(allowed: &[&str]) -> impl Fn(&C) -> bool + use<C> {
    let allowed: Vec<String> = allowed.iter().map(|role| role.to_string()).collect();
    move |current: &C| {
        let roles = current.roles();
        allowed.iter().any(|wanted| roles.contains(wanted))
    }
}
