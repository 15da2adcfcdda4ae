use std::sync::Arc;

use sectoken::prelude::*;

// ---------------------------------------------------------------------------
// User specification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Account {
    name: String,
    admin: bool,
}

// ---------------------------------------------------------------------------
// "Handlers"
// ---------------------------------------------------------------------------

/// POST /login: bind the account to a token, answer with Set-Cookie.
fn login(gate: &SessionGate<Account>, account: Account) -> Result<SignIn, TokenError> {
    gate.sign_in(account)
}

/// GET /me: resolve the caller, or 401.
fn me(gate: &SessionGate<Account>, request: &HttpRequest) -> (u16, String) {
    match gate.authenticate(request) {
        Ok(account) => (200, format!("hello {} (admin: {})", account.name, account.admin)),
        Err(e) if e.requires_authentication() => (401, e.to_string()),
        Err(e) => (500, e.to_string()),
    }
}

/// POST /logout: drop the token, answer with an expiring Set-Cookie.
fn logout(gate: &SessionGate<Account>, request: &HttpRequest) -> Result<CookieSpec, TokenError> {
    gate.sign_out(request)
}

/// Turns a Set-Cookie header into the Cookie header a browser would send.
fn echo_cookie(set_cookie: &str) -> HttpRequest {
    let pair = set_cookie.split(';').next().unwrap_or_default();
    HttpRequest::new().with_header("Cookie", pair)
}

/// One client's round trip: log in, call /me, optionally log out and
/// call /me again.
fn visit(
    gate: &SessionGate<Account>,
    account: Account,
    log_out: bool,
) -> Result<SignIn, TokenError> {
    let name = account.name.clone();
    let signed_in = login(gate, account)?;
    tracing::info!(user = %name, token = signed_in.token.fingerprint(), "logged in");

    let request = echo_cookie(&signed_in.cookie.to_set_cookie_header());
    let (status, body) = me(gate, &request);
    tracing::info!(user = %name, status, %body, "GET /me");

    if log_out {
        let cleared = logout(gate, &request)?;
        tracing::info!(user = %name, max_age = cleared.max_age, "logged out");
        let (status, body) = me(gate, &request);
        tracing::info!(user = %name, status, %body, "GET /me after logout");
    }
    Ok(signed_in)
}

#[tokio::main]
async fn main() -> Result<(), SectokenError> {
    sectoken::init_tracing("sectoken=debug,sign_in=info");

    let config = TokenConfig::from_env()?;
    let gate: Arc<SessionGate<Account>> = Arc::new(SessionGate::from_config(&config)?);

    let names = ["alice", "bob", "carol", "dave"];
    let mut handles = Vec::new();
    for (i, name) in names.into_iter().enumerate() {
        let gate = Arc::clone(&gate);
        handles.push(tokio::spawn(async move {
            let account = Account {
                name: name.to_string(),
                admin: i == 0,
            };
            visit(&gate, account, i % 2 == 1).map(|_| ())
        }));
    }

    for handle in handles {
        match handle.await {
            Ok(result) => result?,
            Err(e) => tracing::error!(error = %e, "handler task panicked"),
        }
    }

    let (status, body) = me(&gate, &HttpRequest::new());
    tracing::info!(status, %body, "GET /me without credentials");

    tracing::info!(live = gate.registry().len(), "sessions still signed in");
    Ok(())
}
