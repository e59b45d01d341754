//! Storing the Gateway credential in an encrypted cookie.

use axum_extra::extract::{
    CookieJar, PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::gateway::Credential;

/// The name of the cookie holding the Gateway credential.
pub const COOKIE_TOKEN: &str = "token";
/// The Gateway issues credentials that are valid for 30 days.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::days(30);

/// Add the credential cookie to `jar`, expiring `duration` from now.
pub fn set_auth_cookie(
    jar: PrivateCookieJar,
    token: Credential,
    duration: Duration,
) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, token.into_inner()))
            .expires(OffsetDateTime::now_utc() + duration)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Set the credential cookie to an invalid value and set its max age to zero, which should
/// delete the cookie on the client side.
pub fn invalidate_auth_cookie(jar: CookieJar) -> CookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Read the credential, if the cookie exists and was encrypted with our key.
pub fn get_credential_from_cookies(jar: &PrivateCookieJar) -> Option<Credential> {
    jar.get(COOKIE_TOKEN)
        .map(|cookie| cookie.value_trimmed().to_owned())
        .filter(|token| !token.is_empty())
        .map(Credential::new)
}

#[cfg(test)]
mod cookie_tests {
    use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
    use axum_extra::extract::{
        CookieJar, PrivateCookieJar,
        cookie::{Cookie, Key, SameSite},
    };
    use sha2::{Digest, Sha512};
    use time::{Duration, OffsetDateTime};

    use crate::gateway::Credential;

    use super::{
        COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, get_credential_from_cookies,
        invalidate_auth_cookie, set_auth_cookie,
    };

    fn get_jar() -> PrivateCookieJar {
        let hash = Sha512::digest(b"foobar");
        let key = Key::from(&hash);

        PrivateCookieJar::new(key)
    }

    #[test]
    fn set_cookie_round_trips_credential() {
        let jar = set_auth_cookie(
            get_jar(),
            Credential::new("abc.def.ghi"),
            DEFAULT_COOKIE_DURATION,
        );

        assert_eq!(
            get_credential_from_cookies(&jar),
            Some(Credential::new("abc.def.ghi"))
        );
    }

    #[test]
    fn set_cookie_has_secure_attributes_and_expiry() {
        let jar = set_auth_cookie(get_jar(), Credential::new("token"), DEFAULT_COOKIE_DURATION);
        let cookie = jar.get(COOKIE_TOKEN).unwrap();

        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        let expires = cookie.expires_datetime().unwrap();
        let want = OffsetDateTime::now_utc() + DEFAULT_COOKIE_DURATION;
        assert!(
            (expires - want).abs() < Duration::seconds(5),
            "got expiry {expires:?}, want close to {want:?}"
        );
    }

    #[test]
    fn unencrypted_cookie_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&Cookie::new(COOKIE_TOKEN, "plain-text").to_string()).unwrap(),
        );
        let jar = PrivateCookieJar::from_headers(&headers, Key::from(&Sha512::digest(b"foobar")));

        assert_eq!(get_credential_from_cookies(&jar), None);
    }

    #[test]
    fn missing_cookie_gives_no_credential() {
        assert_eq!(get_credential_from_cookies(&get_jar()), None);
    }

    #[test]
    fn invalidated_cookie_is_expired() {
        let jar = invalidate_auth_cookie(CookieJar::new());
        let cookie = jar.get(COOKIE_TOKEN).unwrap();

        assert_eq!(cookie.value(), "deleted");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
        assert_eq!(cookie.path(), Some("/"));
    }
}
