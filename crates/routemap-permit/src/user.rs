/// The capability set a host-request type implements so [`Permits`]
/// middleware can authenticate and authorize it. One implementation per
/// request type, selected by static dispatch.
///
/// [`Permits`]: crate::middleware::Permits
pub trait CurrentUser {
    /// The host's authenticated user object.
    type User;
    /// What handlers (and `forbidden`) return.
    type Output;

    /// The credential string carried by the request, if any.
    fn token(&self) -> Option<String>;

    /// Confirm the user's identity using the available security factors.
    fn authenticate(&mut self) -> Option<Self::User>;

    /// Receive the successfully-authenticated user (for example, by storing
    /// it on the request) before authorization rules run. Returning `None`
    /// rejects the request.
    fn authenticated(&mut self, user: Self::User) -> Option<Self::User>;

    /// Produce whatever the host returns for a forbidden request.
    fn forbidden(&mut self) -> Self::Output;

    /// The roles possessed by the current, authenticated user.
    fn roles(&self) -> Vec<String>;
}
