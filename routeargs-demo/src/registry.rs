/*!
The registry of filter and predicate specs. Each spec builds its settings
from route arguments with exactly one capture, then turns the captured
values into the finished filter or predicate.
*/

use core::fmt::{self, Debug};

use routeargs::{Definition, Literal};
use tracing::debug;

use crate::{error::CreateError, filters, predicates};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Filter,
    Predicate,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Filter => "filter",
            Kind::Predicate => "predicate",
        })
    }
}

/// The captured arguments of a filter or predicate. `definitions` borrows
/// the fields that the route arguments are captured into; the initial value
/// of each field is the default for optional arguments.
pub trait Settings: Default {
    type Output: Debug + 'static;

    fn definitions(&mut self) -> Vec<Definition<'_>>;

    /// Validate the captured arguments and build the finished instance
    fn finish(self) -> Result<Self::Output, CreateError>;
}

pub fn create<S: Settings>(arguments: &[Literal]) -> Result<S::Output, CreateError> {
    let mut settings = S::default();
    routeargs::capture(settings.definitions(), arguments)?;
    settings.finish()
}

fn create_boxed<S: Settings>(arguments: &[Literal]) -> Result<Box<dyn Debug>, CreateError> {
    create::<S>(arguments).map(|output| Box::new(output) as Box<dyn Debug>)
}

fn signature<S: Settings>() -> String {
    let mut settings = S::default();
    routeargs::signature(&settings.definitions()).to_string()
}

pub struct Spec {
    pub name: &'static str,
    pub kind: Kind,
    pub description: &'static str,
    create: fn(&[Literal]) -> Result<Box<dyn Debug>, CreateError>,
    signature: fn() -> String,
}

impl Spec {
    pub const fn new<S: Settings>(name: &'static str, kind: Kind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            create: create_boxed::<S>,
            signature: signature::<S>,
        }
    }

    pub fn create(&self, arguments: &[Literal]) -> Result<Box<dyn Debug>, CreateError> {
        let created = (self.create)(arguments);

        match created {
            Ok(_) => debug!(name = self.name, kind = %self.kind, "created"),
            Err(ref error) => debug!(name = self.name, kind = %self.kind, %error, "rejected"),
        }

        created
    }

    /// The rendered argument list, like `int, duration(1s)`
    pub fn signature(&self) -> String {
        (self.signature)()
    }
}

impl Debug for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

pub static SPECS: &[Spec] = &[
    Spec::new::<filters::Status>(
        "status",
        Kind::Filter,
        "Set the status code of the response.",
    ),
    Spec::new::<filters::CopyHeader>(
        "requestCopyHeader",
        Kind::Filter,
        "Copy the value of one request header into another request header.",
    ),
    Spec::new::<filters::CopyHeader>(
        "responseCopyHeader",
        Kind::Filter,
        "Copy the value of one response header into another response header.",
    ),
    Spec::new::<filters::StaticArgs>(
        "static",
        Kind::Filter,
        "Serve files from the file root. The first argument is the prefix of \
        the request path that is stripped before looking up the file.",
    ),
    Spec::new::<filters::PreserveHostArgs>(
        "preserveHost",
        Kind::Filter,
        "Choose whether the outgoing Host header is the one from the incoming \
        request (\"true\") or from the backend address (\"false\").",
    ),
    Spec::new::<filters::StripQueryArgs>(
        "stripQuery",
        Kind::Filter,
        "Remove the query from the request URL. With \"true\", the stripped \
        parameters are preserved as request headers.",
    ),
    Spec::new::<filters::ServiceRatelimitArgs>(
        "ratelimit",
        Kind::Filter,
        "Limit the number of requests to the backend to a maximum number of \
        hits per time window. Numeric windows are in seconds.",
    ),
    Spec::new::<filters::LocalRatelimitArgs>(
        "localRatelimit",
        Kind::Filter,
        "Limit the number of requests per client to a maximum number of hits \
        per time window. Clients are identified by their IP address, or by \
        their Authorization header with \"auth\".",
    ),
    Spec::new::<filters::DisableRatelimitArgs>(
        "disableRatelimit",
        Kind::Filter,
        "Turn off rate limiting for the route.",
    ),
    Spec::new::<filters::ConsecutiveBreakerArgs>(
        "consecutiveBreaker",
        Kind::Filter,
        "Open a circuit breaker after a number of consecutive backend \
        failures. Optional arguments: the time the breaker stays open, the \
        number of requests allowed while half open, and the idle time after \
        which the breaker is dropped.",
    ),
    Spec::new::<filters::RateBreakerArgs>(
        "rateBreaker",
        Kind::Filter,
        "Open a circuit breaker when the number of failures within a sliding \
        window of requests reaches a threshold. Takes the same optional \
        arguments as consecutiveBreaker.",
    ),
    Spec::new::<filters::DisableBreakerArgs>(
        "disableBreaker",
        Kind::Filter,
        "Turn off circuit breakers for the route.",
    ),
    Spec::new::<filters::BasicAuthArgs>(
        "basicAuth",
        Kind::Filter,
        "Require HTTP basic authentication against an htpasswd file. The \
        optional second argument is the realm name.",
    ),
    Spec::new::<predicates::QueryParamArgs>(
        "QueryParam",
        Kind::Predicate,
        "Match requests that have the query parameter and, when a value is \
        given, where the parameter matches it as a regular expression.",
    ),
    Spec::new::<predicates::CookieArgs>(
        "Cookie",
        Kind::Predicate,
        "Match requests with the cookie, where the value of the cookie matches \
        the regular expression.",
    ),
    Spec::new::<predicates::BetweenArgs>(
        "Between",
        Kind::Predicate,
        "Match requests made at or after the first time and before the \
        second. Times are RFC 3339 strings or seconds since the Unix epoch.",
    ),
    Spec::new::<predicates::BeforeArgs>(
        "Before",
        Kind::Predicate,
        "Match requests made before the given time.",
    ),
    Spec::new::<predicates::AfterArgs>(
        "After",
        Kind::Predicate,
        "Match requests made at or after the given time.",
    ),
];

pub fn find(name: &str) -> Option<&'static Spec> {
    SPECS.iter().find(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use routeargs::literals;

    #[test]
    fn unique_names() {
        let mut names: Vec<&str> = SPECS.iter().map(|spec| spec.name).collect();
        names.sort_unstable();
        names.dedup();

        assert_eq!(names.len(), SPECS.len());
    }

    #[test]
    fn signatures() {
        let rendered: Vec<(&str, String)> = [
            "status",
            "preserveHost",
            "stripQuery",
            "localRatelimit",
            "rateBreaker",
            "disableBreaker",
            "Between",
        ]
        .into_iter()
        .map(|name| (name, find(name).unwrap().signature()))
        .collect();

        assert_eq!(
            rendered,
            [
                ("status", "int".to_owned()),
                ("preserveHost", r#""true"|"false""#.to_owned()),
                ("stripQuery", r#"["true"|"false"]"#.to_owned()),
                (
                    "localRatelimit",
                    r#"int, duration(1s), ["auth"|"ip"]"#.to_owned()
                ),
                (
                    "rateBreaker",
                    "int, int, [duration], [int], [duration]".to_owned()
                ),
                ("disableBreaker", String::new()),
                ("Between", "time, time".to_owned()),
            ]
        );
    }

    #[test]
    fn create_through_spec() {
        let spec = find("status").unwrap();

        let created = spec.create(&literals![404]).unwrap();
        assert_eq!(format!("{created:?}"), "Status { code: 404 }");

        let error = spec.create(&literals!["404"]).unwrap_err();
        assert!(error.is_route_error());
    }

    #[test]
    fn unknown() {
        assert!(find("nonexistent").is_none());
    }
}
