use routemap_permit::testing::FakeRequest;
use routemap_permit::{Permits, create_timed_token, role_in};

const SECRET: &str = "q354809hreuinjvm";
const ALLOWED: &str = "authenticated";
const FORBIDDEN: &str = "403 Forbidden";

fn bearer(sub: &str) -> String {
    let token = create_timed_token(sub, SECRET, None).expect("token");
    format!("bearer {token}")
}

fn admin() -> FakeRequest {
    FakeRequest::new(SECRET)
        .authorization(bearer("luigi"))
        .role("admin")
}

fn plain_user() -> FakeRequest {
    FakeRequest::new(SECRET).authorization(bearer("mario"))
}

fn anonymous() -> FakeRequest {
    FakeRequest::new(SECRET)
}

fn handler(_req: &mut FakeRequest) -> String {
    ALLOWED.to_string()
}

#[test]
fn role_in_checks_roles() {
    let admin = admin();
    let user = plain_user();
    assert!(!role_in::<FakeRequest>(&[])(&user));
    assert!(!role_in::<FakeRequest>(&[])(&admin));
    assert!(!role_in::<FakeRequest>(&["admin"])(&user));
    assert!(role_in::<FakeRequest>(&["admin"])(&admin));
    assert!(role_in::<FakeRequest>(&["admin", "billing"])(&admin));
}

#[test]
fn authenticated_user_passes_without_rules() {
    let wrapped = Permits::new().wrap(handler);
    let mut req = plain_user();
    assert_eq!(wrapped(&mut req), ALLOWED);
    // the authenticated callback stored the subject before rules ran
    assert_eq!(req.user.as_deref(), Some("mario"));
}

#[test]
fn admin_reaches_admin_resource() {
    let wrapped = Permits::new()
        .rule(role_in(&["admin", "billing"]))
        .wrap(handler);
    let mut req = admin();
    assert_eq!(wrapped(&mut req), ALLOWED);
}

#[test]
fn admin_is_forbidden_from_billing_only_resource() {
    let wrapped = Permits::new().rule(role_in(&["billing"])).wrap(handler);
    let mut req = admin();
    assert_eq!(wrapped(&mut req), FORBIDDEN);
    assert_eq!(req.forbidden_calls, 1);
}

#[test]
fn plain_user_is_forbidden_from_admin_resource() {
    let wrapped = Permits::new()
        .rule(role_in(&["admin", "billing"]))
        .wrap(handler);
    let mut req = plain_user();
    assert_eq!(wrapped(&mut req), FORBIDDEN);
}

#[test]
fn anonymous_user_is_forbidden_from_guarded_resource() {
    let wrapped = Permits::new().wrap(handler);
    let mut req = anonymous();
    assert_eq!(wrapped(&mut req), FORBIDDEN);
    assert!(req.user.is_none());
}

#[test]
fn anonymous_user_is_forbidden_from_admin_resource() {
    let wrapped = Permits::new()
        .rule(role_in(&["admin", "billing"]))
        .wrap(handler);
    let mut req = anonymous();
    assert_eq!(wrapped(&mut req), FORBIDDEN);
}

#[test]
fn bad_token_is_forbidden() {
    let wrapped = Permits::new().wrap(handler);
    let mut req = FakeRequest::new(SECRET).authorization("bearer not.a.token");
    assert_eq!(wrapped(&mut req), FORBIDDEN);
}

#[test]
fn rules_all_must_pass() {
    let wrapped = Permits::new()
        .rule(role_in(&["admin"]))
        .rule(|_req: &FakeRequest| false)
        .wrap(handler);
    let mut req = admin();
    assert_eq!(wrapped(&mut req), FORBIDDEN);
}
