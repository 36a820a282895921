use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use time::{Duration, OffsetDateTime};
use tower_sessions::{Expiry, Session};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::error::ApiError;

/// Session key under which the authenticated user's id is stored.
pub const USER_ID_KEY: &str = "user_id";

/// Attaches `user_id` to the session. The session id is cycled so a
/// pre-login cookie can never be replayed as an authenticated one, and
/// `remember` switches the expiry to the long-lived TTL.
pub async fn start_session(
    session: &Session,
    cfg: &SessionConfig,
    user_id: Uuid,
    remember: bool,
) -> Result<(), ApiError> {
    session.cycle_id().await?;
    let ttl = if remember {
        Duration::days(cfg.remember_ttl_days)
    } else {
        Duration::hours(cfg.ttl_hours)
    };
    session.set_expiry(Some(Expiry::AtDateTime(OffsetDateTime::now_utc() + ttl)));
    session.insert(USER_ID_KEY, user_id).await?;
    Ok(())
}

/// Invalidates the current session, store record and cookie both.
/// Fails when the request carried no identity to begin with.
pub async fn end_session(session: &Session) -> Result<(), ApiError> {
    let user_id: Option<Uuid> = session.get(USER_ID_KEY).await?;
    if user_id.is_none() {
        return Err(ApiError::Auth("Authentication required".into()));
    }
    session.flush().await?;
    Ok(())
}

/// Extracts the authenticated user's id, rejecting with 401 when the
/// request carries no identity.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let MaybeAuthUser(user_id) = MaybeAuthUser::from_request_parts(parts, state).await?;
        user_id
            .map(AuthUser)
            .ok_or_else(|| ApiError::Auth("Authentication required".into()))
    }
}

/// Like [`AuthUser`], but resolves to `None` instead of rejecting.
/// The page routes use it to choose between content and redirect.
pub struct MaybeAuthUser(pub Option<Uuid>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| ApiError::Internal(anyhow::anyhow!(msg)))?;
        let user_id = session.get::<Uuid>(USER_ID_KEY).await?;
        Ok(MaybeAuthUser(user_id))
    }
}
