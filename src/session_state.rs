use std::fmt::Debug;
use std::future::ready;
use std::future::Ready;

use actix_session::Session;
use actix_session::SessionExt;
use actix_session::SessionGetError;
use actix_session::SessionInsertError;
use actix_web::FromRequest;
use secrecy::Secret;
use serde::Deserialize;
use serde::Serialize;

use crate::identity::IdentityUser;

/// Who is signed in to the admin panel. Built from the identity provider's
/// user record at login and kept in the (signed, encrypted) session cookie;
/// the admin gate hands it to handlers through request extensions.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminSession {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    /// Needed to end the provider session on logout
    id_token: String,
}

impl AdminSession {
    /// Falls back to the email when the provider has no display name
    pub fn name(&self) -> &str { self.display_name.as_deref().unwrap_or(&self.email) }

    pub fn id_token(&self) -> Secret<String> { Secret::new(self.id_token.clone()) }
}

impl From<IdentityUser> for AdminSession {
    fn from(user: IdentityUser) -> Self {
        use secrecy::ExposeSecret;
        Self {
            user_id: user.local_id,
            email: user.email,
            display_name: user.display_name.filter(|n| !n.trim().is_empty()),
            id_token: user.id_token.expose_secret().to_string(),
        }
    }
}

// the token must never end up in logs
impl Debug for AdminSession {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("AdminSession")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("id_token", &"[REDACTED]")
            .finish()
    }
}

/// Wrapper around `actix_session::Session`, so that keys are methods instead
/// of loose strings
pub struct TypedSession(Session);

impl TypedSession {
    const ADMIN_KEY: &'static str = "admin";

    /// Rotate the session id; call on every privilege change
    pub fn renew(&self) { self.0.renew(); }

    pub fn insert_admin(
        &self,
        admin: &AdminSession,
    ) -> Result<(), SessionInsertError> {
        self.0.insert(Self::ADMIN_KEY, admin)
    }

    pub fn get_admin(&self) -> Result<Option<AdminSession>, SessionGetError> {
        self.0.get(Self::ADMIN_KEY)
    }

    /// Drop all session state, and the cookie with it
    pub fn logout(self) { self.0.purge() }
}

impl FromRequest for TypedSession {
    type Error = <Session as FromRequest>::Error;

    // session access needs no I/O, so the future is ready immediately
    type Future = Ready<Result<TypedSession, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        ready(Ok(TypedSession(req.get_session())))
    }
}
