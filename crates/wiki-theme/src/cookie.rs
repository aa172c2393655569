//! Cookie wire format for the persisted preference.
//!
//! Reading works on a `document.cookie`-style header (`a=1; b=2`), writing
//! produces a single assignment string such as
//!
//! ```text
//! theme_preference=dark; SameSite=Lax; Path=/; Expires=Sat, 16 Oct 2027 12:00:00 GMT
//! ```
//!
//! which is what a page assigns to `document.cookie`. Both directions go
//! through the `cookie` crate.

use std::fmt;

use cookie::Cookie;
use time::{Duration, OffsetDateTime};

use crate::config::{SameSitePolicy, ThemeConfig, MAX_LIFETIME_DAYS};
use crate::theme::ThemePreference;

/// Looks up `name` in a cookie header.
///
/// Returns `None` when the cookie is missing, when its value is empty, or when
/// the name appears more than once. The last case mirrors the lookup the site
/// has always used in the browser, which gives up on ambiguous headers rather
/// than picking one. Malformed pairs in the header are skipped.
///
/// # Example
///
/// ```rust
/// use wiki_theme::cookie::read_cookie;
///
/// assert_eq!(read_cookie("a=1; theme_preference=dark", "theme_preference").as_deref(), Some("dark"));
/// assert_eq!(read_cookie("a=1", "theme_preference"), None);
/// ```
pub fn read_cookie(header: &str, name: &str) -> Option<String> {
    let mut matching = Cookie::split_parse(header)
        .filter_map(Result::ok)
        .filter(|cookie| cookie.name() == name);

    let found = matching.next()?;
    if matching.next().is_some() {
        return None;
    }

    let value = found.value();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// A single cookie assignment carrying the theme preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceCookie {
    pub name: String,
    pub value: ThemePreference,
    pub expires: OffsetDateTime,
    pub path: String,
    pub same_site: SameSitePolicy,
}

impl PreferenceCookie {
    /// Builds the assignment for `value`, expiring `config.lifetime_days` after `now`.
    ///
    /// The lifetime is capped at [`MAX_LIFETIME_DAYS`] and the expiry saturates
    /// at the latest representable date, so an oversized setting never panics.
    pub fn new(config: &ThemeConfig, value: ThemePreference, now: OffsetDateTime) -> Self {
        let days = config.lifetime_days.min(MAX_LIFETIME_DAYS);
        Self {
            name: config.cookie_name.clone(),
            value,
            expires: now.saturating_add(Duration::days(i64::from(days))),
            path: config.cookie_path.clone(),
            same_site: config.same_site,
        }
    }

    /// The assignment as a `cookie::Cookie`.
    pub fn to_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.name.clone(), self.value.as_str()))
            .path(self.path.clone())
            .same_site(self.same_site.into())
            .expires(self.expires)
            .build()
    }
}

impl fmt::Display for PreferenceCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cookie())
    }
}

/// A parsed cookie assignment, as a browser would see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Assignment {
    pub name: String,
    pub value: String,
    /// `true` when `Expires` lies before `now` or `Max-Age` is zero or negative.
    pub expired: bool,
}

/// Parses a `document.cookie = ...` assignment. Unknown attributes are ignored.
pub(crate) fn parse_assignment(assignment: &str, now: OffsetDateTime) -> Option<Assignment> {
    let cookie = Cookie::parse(assignment).ok()?;

    let expired_by_age = cookie.max_age().is_some_and(|age| age <= Duration::ZERO);
    let expired_by_date = cookie.expires_datetime().is_some_and(|at| at <= now);

    Some(Assignment {
        name: cookie.name().to_string(),
        value: cookie.value().to_string(),
        expired: expired_by_age || expired_by_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookie::SameSite;
    use proptest::prelude::*;
    use time::{Date, Month};

    fn fixed_now() -> OffsetDateTime {
        Date::from_calendar_date(2026, Month::October, 16)
            .unwrap()
            .with_hms(12, 0, 0)
            .unwrap()
            .assume_utc()
    }

    #[test]
    fn test_read_cookie_first_and_later_positions() {
        assert_eq!(
            read_cookie("theme_preference=light", "theme_preference").as_deref(),
            Some("light")
        );
        assert_eq!(
            read_cookie("session=abc; theme_preference=dark; lang=en", "theme_preference").as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn test_read_cookie_does_not_match_suffix_names() {
        assert_eq!(read_cookie("old_theme_preference=dark", "theme_preference"), None);
    }

    #[test]
    fn test_read_cookie_empty_header_and_value() {
        assert_eq!(read_cookie("", "theme_preference"), None);
        assert_eq!(read_cookie("theme_preference=; a=1", "theme_preference"), None);
    }

    #[test]
    fn test_read_cookie_duplicate_name_is_ambiguous() {
        assert_eq!(
            read_cookie("theme_preference=dark; theme_preference=light", "theme_preference"),
            None
        );
    }

    #[test]
    fn test_read_cookie_skips_malformed_pairs() {
        assert_eq!(
            read_cookie("garbage; theme_preference=dark", "theme_preference").as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn test_preference_cookie_attributes() {
        let cookie = PreferenceCookie::new(&ThemeConfig::default(), ThemePreference::Dark, fixed_now());
        let rendered = cookie.to_string();

        let parsed = Cookie::parse(rendered.as_str()).unwrap();
        assert_eq!(parsed.name(), "theme_preference");
        assert_eq!(parsed.value(), "dark");
        assert_eq!(parsed.path(), Some("/"));
        assert_eq!(parsed.same_site(), Some(SameSite::Lax));
        assert_eq!(
            parsed.expires_datetime(),
            Some(fixed_now() + Duration::days(365))
        );
        assert!(rendered.contains("Sat, 16 Oct 2027 12:00:00 GMT"));
    }

    #[test]
    fn test_oversized_lifetime_is_capped() {
        let config = ThemeConfig {
            lifetime_days: 200_000_000,
            ..ThemeConfig::default()
        };
        let cookie = PreferenceCookie::new(&config, ThemePreference::Light, fixed_now());
        assert_eq!(
            cookie.expires,
            fixed_now() + Duration::days(i64::from(MAX_LIFETIME_DAYS))
        );
        assert!(cookie.to_string().starts_with("theme_preference=light"));
    }

    #[test]
    fn test_parse_assignment_attributes() {
        let now = fixed_now();
        let a = parse_assignment("theme_preference=dark; Expires=Sat, 16 Oct 2027 12:00:00 GMT; Path=/", now)
            .unwrap();
        assert_eq!(a.name, "theme_preference");
        assert_eq!(a.value, "dark");
        assert!(!a.expired);

        let gone = parse_assignment("theme_preference=; Expires=Thu, 01 Jan 1970 00:00:00 GMT", now).unwrap();
        assert!(gone.expired);

        let max_age = parse_assignment("x=1; Max-Age=0", now).unwrap();
        assert!(max_age.expired);

        assert!(parse_assignment("no-equals-sign", now).is_none());
    }

    proptest! {
        #[test]
        fn prop_single_cookie_is_found_among_others(
            value in "[a-z0-9]{1,12}",
            before in proptest::collection::vec("[a-z]{1,6}=[a-z0-9]{0,6}", 0..4),
            after in proptest::collection::vec("[a-z]{1,6}=[a-z0-9]{0,6}", 0..4),
        ) {
            let mut pairs = before;
            pairs.push(format!("theme_preference={value}"));
            pairs.extend(after);
            let header = pairs.join("; ");
            prop_assert_eq!(read_cookie(&header, "theme_preference"), Some(value));
        }
    }
}
