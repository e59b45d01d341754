//! Log-out route handler that invalidates the credential cookie and redirects users.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use crate::{auth::invalidate_auth_cookie, endpoints};

/// Invalidate the credential cookie and redirect the client to the log-in page.
///
/// The Gateway keeps no session, so nothing is sent to it.
pub async fn get_log_out(jar: CookieJar) -> Response {
    let jar = invalidate_auth_cookie(jar);

    (jar, Redirect::to(endpoints::LOG_IN_VIEW)).into_response()
}
