use std::path::PathBuf;

use chrono::TimeDelta;
use routeargs::{Choice, Definition, choice, duration, optional};

use crate::{error::CreateError, registry::Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Choice)]
pub enum Toggle {
    True,
    False,
}

impl Toggle {
    fn parse(option: &str) -> bool {
        matches!(Toggle::from_option(option), Some(Toggle::True))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Choice)]
pub enum LookupType {
    Auth,
    Ip,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Status {
    pub code: i64,
}

impl Settings for Status {
    type Output = Self;

    fn definitions(&mut self) -> Vec<Definition<'_>> {
        vec![Definition::from(&mut self.code)]
    }

    fn finish(self) -> Result<Self, CreateError> {
        Ok(self)
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CopyHeader {
    pub source: String,
    pub target: String,
}

impl Settings for CopyHeader {
    type Output = Self;

    fn definitions(&mut self) -> Vec<Definition<'_>> {
        vec![Definition::from(&mut self.source), Definition::from(&mut self.target)]
    }

    fn finish(self) -> Result<Self, CreateError> {
        Ok(self)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Static {
    pub web_root: String,
    pub file_root: PathBuf,
}

#[derive(Debug, Default)]
pub struct StaticArgs {
    web_root: String,
    file_root: String,
}

impl Settings for StaticArgs {
    type Output = Static;

    fn definitions(&mut self) -> Vec<Definition<'_>> {
        vec![Definition::from(&mut self.web_root), Definition::from(&mut self.file_root)]
    }

    fn finish(self) -> Result<Static, CreateError> {
        Ok(Static {
            web_root: self.web_root,
            file_root: PathBuf::from(self.file_root),
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct PreserveHost {
    pub preserve: bool,
}

#[derive(Debug, Default)]
pub struct PreserveHostArgs {
    preserve: String,
}

impl Settings for PreserveHostArgs {
    type Output = PreserveHost;

    fn definitions(&mut self) -> Vec<Definition<'_>> {
        vec![choice::<Toggle>(&mut self.preserve)]
    }

    fn finish(self) -> Result<PreserveHost, CreateError> {
        Ok(PreserveHost {
            preserve: Toggle::parse(&self.preserve),
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct StripQuery {
    pub preserve_as_header: bool,
}

#[derive(Debug, Default)]
pub struct StripQueryArgs {
    preserve_as_header: String,
}

impl Settings for StripQueryArgs {
    type Output = StripQuery;

    fn definitions(&mut self) -> Vec<Definition<'_>> {
        vec![choice::<Toggle>(optional(&mut self.preserve_as_header))]
    }

    fn finish(self) -> Result<StripQuery, CreateError> {
        Ok(StripQuery {
            preserve_as_header: Toggle::parse(&self.preserve_as_header),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatelimitKind {
    Service,
    Local,
    Disabled,
}

/// How requests are grouped into buckets that share a limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookuper {
    SameBucket,
    XForwardedFor,
    Authorization,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Ratelimit {
    pub kind: RatelimitKind,
    pub max_hits: i64,
    pub window: TimeDelta,
    pub clean_interval: TimeDelta,
    pub lookuper: Lookuper,
}

#[derive(Debug)]
pub struct ServiceRatelimitArgs {
    max_hits: i64,
    window: TimeDelta,
}

impl Default for ServiceRatelimitArgs {
    fn default() -> Self {
        Self {
            max_hits: 0,
            window: TimeDelta::zero(),
        }
    }
}

impl Settings for ServiceRatelimitArgs {
    type Output = Ratelimit;

    fn definitions(&mut self) -> Vec<Definition<'_>> {
        vec![
            Definition::from(&mut self.max_hits),
            duration(&mut self.window, TimeDelta::seconds(1)),
        ]
    }

    fn finish(self) -> Result<Ratelimit, CreateError> {
        Ok(Ratelimit {
            kind: RatelimitKind::Service,
            max_hits: self.max_hits,
            window: self.window,
            clean_interval: TimeDelta::zero(),
            lookuper: Lookuper::SameBucket,
        })
    }
}

#[derive(Debug)]
pub struct LocalRatelimitArgs {
    max_hits: i64,
    window: TimeDelta,
    lookup: String,
}

impl Default for LocalRatelimitArgs {
    fn default() -> Self {
        Self {
            max_hits: 0,
            window: TimeDelta::zero(),
            lookup: String::new(),
        }
    }
}

impl Settings for LocalRatelimitArgs {
    type Output = Ratelimit;

    fn definitions(&mut self) -> Vec<Definition<'_>> {
        vec![
            Definition::from(&mut self.max_hits),
            duration(&mut self.window, TimeDelta::seconds(1)),
            choice::<LookupType>(optional(&mut self.lookup)),
        ]
    }

    fn finish(self) -> Result<Ratelimit, CreateError> {
        let lookuper = match LookupType::from_option(&self.lookup) {
            Some(LookupType::Auth) => Lookuper::Authorization,
            Some(LookupType::Ip) | None => Lookuper::XForwardedFor,
        };

        Ok(Ratelimit {
            kind: RatelimitKind::Local,
            max_hits: self.max_hits,
            window: self.window,
            clean_interval: self
                .window
                .num_nanoseconds()
                .and_then(|window| window.checked_mul(10))
                .map(TimeDelta::nanoseconds)
                .ok_or(CreateError::WindowTooLarge)?,
            lookuper,
        })
    }
}

#[derive(Debug, Default)]
pub struct DisableRatelimitArgs;

impl Settings for DisableRatelimitArgs {
    type Output = Ratelimit;

    fn definitions(&mut self) -> Vec<Definition<'_>> {
        Vec::new()
    }

    fn finish(self) -> Result<Ratelimit, CreateError> {
        Ok(Ratelimit {
            kind: RatelimitKind::Disabled,
            max_hits: 0,
            window: TimeDelta::zero(),
            clean_interval: TimeDelta::zero(),
            lookuper: Lookuper::SameBucket,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerKind {
    ConsecutiveFailures,
    FailureRate,
    Disabled,
}

/// Circuit breaker settings. Zero values mean that the breaker registry's
/// defaults apply.
#[derive(Debug, PartialEq, Eq)]
pub struct Breaker {
    pub kind: BreakerKind,
    pub failures: i64,
    pub window: i64,
    pub timeout: TimeDelta,
    pub half_open_requests: i64,
    pub idle_ttl: TimeDelta,
}

impl Breaker {
    fn new(kind: BreakerKind) -> Self {
        Self {
            kind,
            failures: 0,
            window: 0,
            timeout: TimeDelta::zero(),
            half_open_requests: 0,
            idle_ttl: TimeDelta::zero(),
        }
    }
}

#[derive(Debug)]
pub struct ConsecutiveBreakerArgs(Breaker);

impl Default for ConsecutiveBreakerArgs {
    fn default() -> Self {
        Self(Breaker::new(BreakerKind::ConsecutiveFailures))
    }
}

impl Settings for ConsecutiveBreakerArgs {
    type Output = Breaker;

    fn definitions(&mut self) -> Vec<Definition<'_>> {
        let breaker = &mut self.0;

        vec![
            Definition::from(&mut breaker.failures),
            optional(&mut breaker.timeout),
            optional(&mut breaker.half_open_requests),
            optional(&mut breaker.idle_ttl),
        ]
    }

    fn finish(self) -> Result<Breaker, CreateError> {
        Ok(self.0)
    }
}

#[derive(Debug)]
pub struct RateBreakerArgs(Breaker);

impl Default for RateBreakerArgs {
    fn default() -> Self {
        Self(Breaker::new(BreakerKind::FailureRate))
    }
}

impl Settings for RateBreakerArgs {
    type Output = Breaker;

    fn definitions(&mut self) -> Vec<Definition<'_>> {
        let breaker = &mut self.0;

        vec![
            Definition::from(&mut breaker.failures),
            Definition::from(&mut breaker.window),
            optional(&mut breaker.timeout),
            optional(&mut breaker.half_open_requests),
            optional(&mut breaker.idle_ttl),
        ]
    }

    fn finish(self) -> Result<Breaker, CreateError> {
        Ok(self.0)
    }
}

#[derive(Debug, Default)]
pub struct DisableBreakerArgs;

impl Settings for DisableBreakerArgs {
    type Output = Breaker;

    fn definitions(&mut self) -> Vec<Definition<'_>> {
        Vec::new()
    }

    fn finish(self) -> Result<Breaker, CreateError> {
        Ok(Breaker::new(BreakerKind::Disabled))
    }
}

pub const DEFAULT_REALM: &str = "Basic Realm";

#[derive(Debug, PartialEq, Eq)]
pub struct BasicAuth {
    pub htpasswd: PathBuf,
    pub realm: String,

    /// Value of the `WWW-Authenticate` header sent with challenges
    pub challenge: String,
}

#[derive(Debug)]
pub struct BasicAuthArgs {
    htpasswd: String,
    realm: String,
}

impl Default for BasicAuthArgs {
    fn default() -> Self {
        Self {
            htpasswd: String::new(),
            realm: DEFAULT_REALM.to_owned(),
        }
    }
}

impl Settings for BasicAuthArgs {
    type Output = BasicAuth;

    fn definitions(&mut self) -> Vec<Definition<'_>> {
        vec![Definition::from(&mut self.htpasswd), optional(&mut self.realm)]
    }

    fn finish(self) -> Result<BasicAuth, CreateError> {
        Ok(BasicAuth {
            htpasswd: PathBuf::from(self.htpasswd),
            challenge: format!("Basic realm=\"{}\"", self.realm),
            realm: self.realm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use routeargs::{CaptureError, Reason, literals};

    use crate::registry::create;

    fn reason(error: CreateError) -> Option<Reason> {
        match error {
            CreateError::Capture(error) => error.reason(),
            _ => None,
        }
    }

    #[test]
    fn status() {
        assert_eq!(create::<Status>(&literals![418]).unwrap(), Status { code: 418 });
        assert_eq!(create::<Status>(&literals![418.0]).unwrap(), Status { code: 418 });
        assert_eq!(
            reason(create::<Status>(&literals![]).unwrap_err()),
            Some(Reason::MissingArgument { index: 0 })
        );
    }

    #[test]
    fn copy_header() {
        assert_eq!(
            create::<CopyHeader>(&literals!["X-Source", "X-Target"]).unwrap(),
            CopyHeader {
                source: "X-Source".to_owned(),
                target: "X-Target".to_owned(),
            }
        );
    }

    #[test]
    fn static_files() {
        let created = create::<StaticArgs>(&literals!["/static", "/var/www"]).unwrap();
        assert_eq!(created.file_root, PathBuf::from("/var/www"));
    }

    #[test]
    fn preserve_host() {
        assert!(create::<PreserveHostArgs>(&literals!["true"]).unwrap().preserve);
        assert!(!create::<PreserveHostArgs>(&literals!["false"]).unwrap().preserve);
        assert_eq!(
            reason(create::<PreserveHostArgs>(&literals!["yes"]).unwrap_err()),
            Some(Reason::Mismatch { index: 0 })
        );
        assert!(create::<PreserveHostArgs>(&literals![]).is_err());
    }

    #[test]
    fn strip_query() {
        assert!(!create::<StripQueryArgs>(&literals![]).unwrap().preserve_as_header);
        assert!(create::<StripQueryArgs>(&literals!["true"]).unwrap().preserve_as_header);
        assert!(create::<StripQueryArgs>(&literals!["true", "true"]).is_err());
    }

    #[test]
    fn service_ratelimit() {
        let created = create::<ServiceRatelimitArgs>(&literals![20, 60]).unwrap();

        assert_eq!(
            created,
            Ratelimit {
                kind: RatelimitKind::Service,
                max_hits: 20,
                window: TimeDelta::minutes(1),
                clean_interval: TimeDelta::zero(),
                lookuper: Lookuper::SameBucket,
            }
        );
    }

    #[test]
    fn local_ratelimit() {
        let created = create::<LocalRatelimitArgs>(&literals![20, "1m"]).unwrap();
        assert_eq!(created.window, TimeDelta::minutes(1));
        assert_eq!(created.clean_interval, TimeDelta::minutes(10));
        assert_eq!(created.lookuper, Lookuper::XForwardedFor);

        let created = create::<LocalRatelimitArgs>(&literals![20, 1.5, "auth"]).unwrap();
        assert_eq!(created.window, TimeDelta::milliseconds(1500));
        assert_eq!(created.lookuper, Lookuper::Authorization);

        assert_eq!(
            reason(create::<LocalRatelimitArgs>(&literals![20, "1m", "cookie"]).unwrap_err()),
            Some(Reason::Mismatch { index: 2 })
        );
    }

    #[test]
    fn disabled() {
        assert_eq!(
            create::<DisableRatelimitArgs>(&literals![]).unwrap().kind,
            RatelimitKind::Disabled
        );
        assert_eq!(
            reason(create::<DisableBreakerArgs>(&literals![1]).unwrap_err()),
            Some(Reason::TooManyArguments {
                expected: 0,
                got: 1
            })
        );
    }

    #[test]
    fn consecutive_breaker() {
        let created = create::<ConsecutiveBreakerArgs>(&literals![5, "1m", 12]).unwrap();

        assert_eq!(
            created,
            Breaker {
                kind: BreakerKind::ConsecutiveFailures,
                failures: 5,
                window: 0,
                timeout: TimeDelta::minutes(1),
                half_open_requests: 12,
                idle_ttl: TimeDelta::zero(),
            }
        );
    }

    #[test]
    fn rate_breaker() {
        let created = create::<RateBreakerArgs>(&literals![30, 300, 1000]).unwrap();
        assert_eq!(created.window, 300);
        assert_eq!(created.timeout, TimeDelta::seconds(1));

        assert!(matches!(
            create::<RateBreakerArgs>(&literals![30]),
            Err(CreateError::Capture(CaptureError::InvalidArguments(
                Reason::MissingArgument { index: 1 }
            )))
        ));
    }

    #[test]
    fn basic_auth() {
        let created = create::<BasicAuthArgs>(&literals!["/etc/htpasswd"]).unwrap();
        assert_eq!(created.realm, DEFAULT_REALM);
        assert_eq!(created.challenge, r#"Basic realm="Basic Realm""#);

        let created = create::<BasicAuthArgs>(&literals!["/etc/htpasswd", "Admins"]).unwrap();
        assert_eq!(created.realm, "Admins");
    }
}
