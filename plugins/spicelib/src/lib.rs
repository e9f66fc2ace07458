use error::{Error, Result};
use parser::{ModelLine, SpiceLine, SubcktLine};
use serde::Serialize;

pub mod error;
pub mod parser;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedSpice<'a> {
    pub lines: Vec<SpiceLine<'a>>,
}

/// A definition visible at the top level of a library.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Definition<'a, 'b> {
    Subckt(&'b SubcktLine<'a>),
    Model(&'b ModelLine<'a>),
}

/// Parse the given SPICE library text.
///
/// Fails if the text contains a `.model` or `.subckt` directive that cannot be
/// parsed, or if subcircuit definitions are not balanced by `.ends` lines.
pub fn parse<T>(input: &T) -> Result<ParsedSpice<'_>>
where
    T: AsRef<str> + ?Sized,
{
    let lines = match parser::parse_spice(input.as_ref()) {
        Ok((rest, lines)) if rest.trim().is_empty() => lines,
        _ => return Err(Error::Parse),
    };

    let mut open: Vec<&str> = Vec::new();
    for line in lines.iter() {
        match line {
            SpiceLine::Subckt(subckt) => open.push(subckt.name),
            SpiceLine::Ends(_) => {
                if open.pop().is_none() {
                    return Err(Error::UnexpectedEnds);
                }
            }
            SpiceLine::Other(text) => {
                if let Some(directive) = parser::malformed_directive(text) {
                    return Err(Error::MalformedDirective {
                        directive: directive.to_string(),
                        line: text.lines().next().unwrap_or_default().to_string(),
                    });
                }
            }
            _ => {}
        }
    }

    if let Some(name) = open.pop() {
        return Err(Error::UnterminatedSubckt(name.to_string()));
    }

    Ok(ParsedSpice { lines })
}

impl<'a> ParsedSpice<'a> {
    /// Return an iterator over the lines in the parsed SPICE netlist.
    pub fn lines(&self) -> impl Iterator<Item = &SpiceLine> {
        self.lines.iter()
    }

    /// Return an iterator over the subcircuit definitions in the netlist.
    pub fn subcircuits(&self) -> impl Iterator<Item = &SubcktLine> {
        self.lines.iter().filter_map(|line| line.subckt())
    }

    /// Return an iterator over every `.model` card, including cards local to a subcircuit.
    pub fn models(&self) -> impl Iterator<Item = &ModelLine> {
        self.lines.iter().filter_map(|line| line.model())
    }

    /// Return the subcircuit definition with the given name.
    ///
    /// Note that this operation takes `O(N)` time, where `N`
    /// is the number of lines in the parsed netlist.
    ///
    /// If you need to query for multiple subcircuits, you may wish to
    /// collect the [`subcircuits`](ParsedSpice::subcircuits) into a
    /// [`HashMap`](std::collections::HashMap), and query the map instead.
    pub fn subcircuit_named(&self, name: impl AsRef<str>) -> Option<&SubcktLine> {
        let name = name.as_ref();
        self.subcircuits().find(|ckt| ckt.name == name)
    }

    /// Returns the subcircuits and model cards that are not nested in another subcircuit,
    /// in file order.
    pub fn definitions(&self) -> Vec<Definition<'a, '_>> {
        let mut depth = 0usize;
        let mut defs = Vec::new();
        for line in self.lines.iter() {
            match line {
                SpiceLine::Subckt(subckt) => {
                    if depth == 0 {
                        defs.push(Definition::Subckt(subckt));
                    }
                    depth += 1;
                }
                SpiceLine::Ends(_) => depth = depth.saturating_sub(1),
                SpiceLine::Model(model) if depth == 0 => defs.push(Definition::Model(model)),
                _ => {}
            }
        }
        defs
    }
}
