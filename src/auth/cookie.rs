//! Cookie based sessions.
//!
//! A logged in client holds two private cookies: one with the user ID and one
//! with the UTC expiry time. The expiry cookie lets the auth middleware slide
//! the session forward without reading the database.

use std::cmp::max;

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{
    Duration, OffsetDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::{Error, auth::UserID};

pub(crate) const COOKIE_USER_ID: &str = "user_id";
pub(crate) const COOKIE_EXPIRY: &str = "expiry";
/// The default duration for which auth cookies are valid.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(5);

/// Date time format for the cookie expiry, e.g. "2021-01-01 00:00:00.000000 +00:00:00".
const DATE_TIME_FORMAT: &[BorrowedFormatItem] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond] [offset_hour \
         sign:mandatory]:[offset_minute]:[offset_second]"
);

fn auth_cookie<'a>(name: &'a str, value: String, expiry: OffsetDateTime) -> Cookie<'a> {
    Cookie::build((name, value))
        .expires(expiry)
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(true)
        .build()
}

fn format_expiry(expiry: OffsetDateTime) -> Result<String, Error> {
    expiry
        .format(DATE_TIME_FORMAT)
        .map_err(|error| Error::InvalidDateFormat(error.to_string(), expiry.to_string()))
}

/// Add the auth cookies for `user_id` to `jar`, expiring `duration` from now.
///
/// # Errors
///
/// Returns [Error::InvalidDateFormat] if the expiry cannot be formatted.
pub fn set_auth_cookie(
    jar: PrivateCookieJar,
    user_id: UserID,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let expiry = OffsetDateTime::now_utc() + duration;
    let expiry_string = format_expiry(expiry)?;

    Ok(jar
        .add(auth_cookie(
            COOKIE_USER_ID,
            user_id.as_i64().to_string(),
            expiry,
        ))
        .add(auth_cookie(COOKIE_EXPIRY, expiry_string, expiry)))
}

/// Overwrite the auth cookies with expired ones so the client drops them.
pub fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    let mut user_id_cookie =
        auth_cookie(COOKIE_USER_ID, "deleted".to_owned(), OffsetDateTime::UNIX_EPOCH);
    user_id_cookie.set_max_age(Duration::ZERO);

    let mut expiry_cookie =
        auth_cookie(COOKIE_EXPIRY, "deleted".to_owned(), OffsetDateTime::UNIX_EPOCH);
    expiry_cookie.set_max_age(Duration::ZERO);

    jar.add(user_id_cookie).add(expiry_cookie)
}

/// Push the expiry of the auth cookies in `jar` out to now plus `duration`,
/// unless they already expire later than that.
///
/// # Errors
///
/// The cookie jar is not modified if an error is returned.
///
/// Returns:
/// - [Error::CookieMissing] if either auth cookie is not in the jar.
/// - [Error::InvalidDateFormat] if the stored expiry cannot be parsed or the
///   new expiry cannot be computed.
pub(crate) fn extend_auth_cookie_duration_if_needed(
    jar: PrivateCookieJar,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let expiry_cookie = jar.get(COOKIE_EXPIRY).ok_or(Error::CookieMissing)?;
    let current_expiry = extract_date_time(&expiry_cookie)?;

    let new_expiry = OffsetDateTime::now_utc()
        .checked_add(duration)
        .ok_or_else(|| {
            Error::InvalidDateFormat(
                "expiry overflowed".to_owned(),
                format!("now + {duration}"),
            )
        })?;

    set_auth_cookie_expiry(jar, max(current_expiry, new_expiry))
}

/// Set the expiry of both auth cookies, and the value of the expiry cookie,
/// to `expiry`.
///
/// Both cookies are built again from scratch because cookies read back from
/// a request only carry a name and value, not their attributes.
///
/// # Errors
///
/// If an error is returned, the cookie jar is not modified.
///
/// Returns:
/// - [Error::CookieMissing] if either auth cookie is not in the jar.
/// - [Error::InvalidDateFormat] if `expiry` cannot be formatted.
pub(crate) fn set_auth_cookie_expiry(
    jar: PrivateCookieJar,
    expiry: OffsetDateTime,
) -> Result<PrivateCookieJar, Error> {
    let expiry_string = format_expiry(expiry)?;

    let user_id = jar
        .get(COOKIE_USER_ID)
        .ok_or(Error::CookieMissing)?
        .value()
        .to_owned();
    if jar.get(COOKIE_EXPIRY).is_none() {
        return Err(Error::CookieMissing);
    }

    Ok(jar
        .add(auth_cookie(COOKIE_USER_ID, user_id, expiry))
        .add(auth_cookie(COOKIE_EXPIRY, expiry_string, expiry)))
}

/// Read the logged in user's ID from `jar`.
///
/// # Errors
///
/// Returns [Error::InvalidCredentials] if the cookie is missing, has been
/// invalidated or has expired.
pub fn get_user_id_from_auth_cookie(jar: &PrivateCookieJar) -> Result<UserID, Error> {
    let user_id_cookie = jar.get(COOKIE_USER_ID).ok_or(Error::InvalidCredentials)?;
    let expiry_cookie = jar.get(COOKIE_EXPIRY).ok_or(Error::InvalidCredentials)?;

    let expiry = extract_date_time(&expiry_cookie).map_err(|_| Error::InvalidCredentials)?;
    if expiry <= OffsetDateTime::now_utc() {
        return Err(Error::InvalidCredentials);
    }

    extract_user_id(&user_id_cookie)
}

fn extract_date_time(cookie: &Cookie) -> Result<OffsetDateTime, Error> {
    OffsetDateTime::parse(cookie.value_trimmed(), DATE_TIME_FORMAT).map_err(|error| {
        Error::InvalidDateFormat(error.to_string(), cookie.value_trimmed().to_owned())
    })
}

fn extract_user_id(cookie: &Cookie) -> Result<UserID, Error> {
    cookie
        .value_trimmed()
        .parse()
        .map(UserID::new)
        .map_err(|_| Error::InvalidCredentials)
}

#[cfg(test)]
mod cookie_tests {
    use axum_extra::extract::{
        PrivateCookieJar,
        cookie::{Cookie, Key, SameSite},
    };
    use sha2::{Digest, Sha512};
    use time::{Duration, OffsetDateTime, UtcOffset, macros::datetime};

    use crate::{Error, auth::UserID};

    use super::{
        COOKIE_EXPIRY, COOKIE_USER_ID, DATE_TIME_FORMAT, DEFAULT_COOKIE_DURATION,
        extend_auth_cookie_duration_if_needed, extract_date_time, extract_user_id,
        get_user_id_from_auth_cookie, invalidate_auth_cookie, set_auth_cookie,
        set_auth_cookie_expiry,
    };

    fn get_jar() -> PrivateCookieJar {
        let hash = Sha512::digest(b"foobar");
        let key = Key::from(&hash);

        PrivateCookieJar::new(key)
    }

    #[track_caller]
    fn assert_date_time_close(left: OffsetDateTime, right: OffsetDateTime) {
        assert!(
            (left - right).abs() < Duration::seconds(1),
            "got date time {left:?}, want {right:?}"
        );
    }

    #[test]
    fn can_extract_date_time_at_midnight() {
        let want = datetime!(2021-01-01 00:00:00).assume_offset(UtcOffset::UTC);
        let date_time_string = want.format(DATE_TIME_FORMAT).unwrap();
        let cookie = Cookie::build((COOKIE_EXPIRY, date_time_string)).build();

        let got = extract_date_time(&cookie).unwrap();

        assert_eq!(got, want);
    }

    #[test]
    fn extract_date_time_fails_on_garbage() {
        let cookie = Cookie::build((COOKIE_EXPIRY, "tomorrow")).build();

        let result = extract_date_time(&cookie);

        assert!(matches!(result, Err(Error::InvalidDateFormat(_, _))));
    }

    #[test]
    fn can_extract_user_id() {
        let cookie = Cookie::build((COOKIE_USER_ID, "1")).build();

        assert_eq!(extract_user_id(&cookie), Ok(UserID::new(1)));
    }

    #[test]
    fn can_set_cookie() {
        let user_id = UserID::new(1);

        let jar = set_auth_cookie(get_jar(), user_id, DEFAULT_COOKIE_DURATION).unwrap();
        let user_id_cookie = jar.get(COOKIE_USER_ID).unwrap();
        let expiry_cookie = jar.get(COOKIE_EXPIRY).unwrap();

        assert_eq!(extract_user_id(&user_id_cookie), Ok(user_id));
        assert_date_time_close(
            extract_date_time(&expiry_cookie).unwrap(),
            OffsetDateTime::now_utc() + DEFAULT_COOKIE_DURATION,
        );
        assert_eq!(user_id_cookie.http_only(), Some(true));
        assert_eq!(user_id_cookie.secure(), Some(true));
    }

    #[test]
    fn get_user_id_from_cookie_succeeds() {
        let user_id = UserID::new(1);
        let jar = set_auth_cookie(get_jar(), user_id, DEFAULT_COOKIE_DURATION).unwrap();

        assert_eq!(get_user_id_from_auth_cookie(&jar), Ok(user_id));
    }

    #[test]
    fn get_user_id_fails_on_expired_cookie() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), DEFAULT_COOKIE_DURATION).unwrap();
        let jar = set_auth_cookie_expiry(jar, OffsetDateTime::now_utc() - Duration::minutes(1))
            .unwrap();

        assert_eq!(
            get_user_id_from_auth_cookie(&jar),
            Err(Error::InvalidCredentials)
        );
    }

    #[test]
    fn can_set_cookie_expires() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), DEFAULT_COOKIE_DURATION).unwrap();

        let want = OffsetDateTime::now_utc() + Duration::days(10);
        let updated_jar = set_auth_cookie_expiry(jar, want).unwrap();
        let id_cookie = updated_jar.get(COOKIE_USER_ID).unwrap();
        let expiry_cookie = updated_jar.get(COOKIE_EXPIRY).unwrap();

        assert_eq!(id_cookie.expires_datetime().unwrap(), want);
        assert_eq!(expiry_cookie.expires_datetime().unwrap(), want);
        assert_eq!(extract_user_id(&id_cookie), Ok(UserID::new(1)));
        assert_eq!(extract_date_time(&expiry_cookie).unwrap(), want);
    }

    #[test]
    fn set_cookie_expiry_restores_security_attributes() {
        // Cookies parsed from a request header only have a name and a value.
        let expiry = OffsetDateTime::now_utc() + DEFAULT_COOKIE_DURATION;
        let jar = get_jar()
            .add(Cookie::new(COOKIE_USER_ID, "1"))
            .add(Cookie::new(
                COOKIE_EXPIRY,
                expiry.format(DATE_TIME_FORMAT).unwrap(),
            ));

        let jar = set_auth_cookie_expiry(jar, expiry + Duration::minutes(5)).unwrap();

        for name in [COOKIE_USER_ID, COOKIE_EXPIRY] {
            let cookie = jar.get(name).unwrap();
            assert_eq!(cookie.secure(), Some(true), "{name} should be secure");
            assert_eq!(cookie.http_only(), Some(true), "{name} should be http only");
            assert_eq!(
                cookie.same_site(),
                Some(SameSite::Strict),
                "{name} should be same site strict"
            );
        }
        assert_eq!(get_user_id_from_auth_cookie(&jar), Ok(UserID::new(1)));
    }

    #[test]
    fn set_cookie_expiry_fails_without_auth_cookies() {
        let result = set_auth_cookie_expiry(get_jar(), OffsetDateTime::now_utc());

        assert!(matches!(result, Err(Error::CookieMissing)));
    }

    #[test]
    fn can_extend_cookie_duration() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), DEFAULT_COOKIE_DURATION).unwrap();
        let want = OffsetDateTime::now_utc() + Duration::minutes(10);

        let jar = extend_auth_cookie_duration_if_needed(jar, Duration::minutes(10)).unwrap();
        let got_id_cookie = jar.get(COOKIE_USER_ID).unwrap();
        let got_expiry_cookie = jar.get(COOKIE_EXPIRY).unwrap();

        assert_date_time_close(extract_date_time(&got_expiry_cookie).unwrap(), want);
        assert_date_time_close(got_id_cookie.expires_datetime().unwrap(), want);
        assert_date_time_close(got_expiry_cookie.expires_datetime().unwrap(), want);
    }

    #[test]
    fn cookie_duration_does_not_shrink() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), DEFAULT_COOKIE_DURATION).unwrap();
        let want = jar.get(COOKIE_USER_ID).unwrap().expires_datetime();

        let jar = extend_auth_cookie_duration_if_needed(jar, Duration::seconds(5)).unwrap();

        assert_eq!(jar.get(COOKIE_USER_ID).unwrap().expires_datetime(), want);
    }

    #[test]
    fn invalidate_auth_cookie_succeeds() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), DEFAULT_COOKIE_DURATION).unwrap();

        let jar = invalidate_auth_cookie(jar);
        let cookie = jar.get(COOKIE_USER_ID).unwrap();

        assert_eq!(cookie.value(), "deleted");
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(
            get_user_id_from_auth_cookie(&jar),
            Err(Error::InvalidCredentials),
        );
    }
}
