use std::io::{self, Write as _};

use indent_write::io::IndentWriter;
use lazy_format::lazy_format;

use crate::registry::{Kind, Spec};

const WIDTH: usize = 72;

/// Print every spec of each kind, with its signature and a wrapped
/// description.
pub fn print(out: &mut impl io::Write, specs: &[Spec]) -> io::Result<()> {
    for kind in [Kind::Filter, Kind::Predicate] {
        let header = lazy_format!(match (kind) {
            Kind::Filter => "Filters",
            Kind::Predicate => "Predicates",
        });

        writeln!(out, "{header}:")?;
        let mut out = IndentWriter::new("  ", &mut *out);

        for spec in specs.iter().filter(|spec| spec.kind == kind) {
            writeln!(out, "{}({})", spec.name, spec.signature())?;

            let mut out = IndentWriter::new("  ", &mut out);
            textwrap::wrap(spec.description, WIDTH)
                .iter()
                .try_for_each(|line| writeln!(out, "{line}"))?;
        }
    }

    Ok(())
}
