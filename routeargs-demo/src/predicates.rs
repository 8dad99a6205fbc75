use regex::Regex;
use routeargs::{Definition, Timestamp, optional};

use crate::{error::CreateError, registry::Settings};

#[derive(Debug)]
pub struct QueryParam {
    pub name: String,

    /// When absent, the parameter only needs to exist
    pub matcher: Option<Regex>,
}

#[derive(Debug, Default)]
pub struct QueryParamArgs {
    name: String,
    value: String,
}

impl Settings for QueryParamArgs {
    type Output = QueryParam;

    fn definitions(&mut self) -> Vec<Definition<'_>> {
        vec![Definition::from(&mut self.name), optional(&mut self.value)]
    }

    fn finish(self) -> Result<QueryParam, CreateError> {
        let matcher = match self.value.is_empty() {
            true => None,
            false => Some(Regex::new(&self.value)?),
        };

        Ok(QueryParam {
            name: self.name,
            matcher,
        })
    }
}

#[derive(Debug)]
pub struct Cookie {
    pub name: String,
    pub matcher: Regex,
}

#[derive(Debug, Default)]
pub struct CookieArgs {
    name: String,
    value: String,
}

impl Settings for CookieArgs {
    type Output = Cookie;

    fn definitions(&mut self) -> Vec<Definition<'_>> {
        vec![Definition::from(&mut self.name), Definition::from(&mut self.value)]
    }

    fn finish(self) -> Result<Cookie, CreateError> {
        Ok(Cookie {
            matcher: Regex::new(&self.value)?,
            name: self.name,
        })
    }
}

/// A time-based predicate. Intervals include their beginning and exclude
/// their end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Between { begin: Timestamp, end: Timestamp },
    Before { end: Timestamp },
    After { begin: Timestamp },
}

impl Interval {
    pub fn matches(&self, now: Timestamp) -> bool {
        match *self {
            Interval::Between { begin, end } => begin <= now && now < end,
            Interval::Before { end } => now < end,
            Interval::After { begin } => begin <= now,
        }
    }
}

#[derive(Debug, Default)]
pub struct BetweenArgs {
    from: Timestamp,
    to: Timestamp,
}

impl Settings for BetweenArgs {
    type Output = Interval;

    fn definitions(&mut self) -> Vec<Definition<'_>> {
        vec![Definition::from(&mut self.from), Definition::from(&mut self.to)]
    }

    fn finish(self) -> Result<Interval, CreateError> {
        match self.from < self.to {
            true => Ok(Interval::Between {
                begin: self.from,
                end: self.to,
            }),
            false => Err(CreateError::EmptyInterval {
                from: self.from,
                to: self.to,
            }),
        }
    }
}

#[derive(Debug, Default)]
pub struct BeforeArgs {
    end: Timestamp,
}

impl Settings for BeforeArgs {
    type Output = Interval;

    fn definitions(&mut self) -> Vec<Definition<'_>> {
        vec![Definition::from(&mut self.end)]
    }

    fn finish(self) -> Result<Interval, CreateError> {
        Ok(Interval::Before { end: self.end })
    }
}

#[derive(Debug, Default)]
pub struct AfterArgs {
    begin: Timestamp,
}

impl Settings for AfterArgs {
    type Output = Interval;

    fn definitions(&mut self) -> Vec<Definition<'_>> {
        vec![Definition::from(&mut self.begin)]
    }

    fn finish(self) -> Result<Interval, CreateError> {
        Ok(Interval::After { begin: self.begin })
    }
}
