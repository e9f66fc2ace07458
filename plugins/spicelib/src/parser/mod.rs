use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_till1};
use nom::character::complete::{char, line_ending, multispace0, one_of, space0, space1};
use nom::combinator::{opt, recognize, value};
use nom::multi::{many0, many1};
use nom::sequence::{pair, terminated, tuple};
use nom::IResult;
use serde::Serialize;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SpiceLine<'a> {
    Subckt(SubcktLine<'a>),
    Model(ModelLine<'a>),
    Ends(Option<&'a str>),
    Comment(&'a str),
    /// Any other logical line, including its continuation lines.
    Other(&'a str),
}

impl<'a> SpiceLine<'a> {
    pub fn subckt(&self) -> Option<&SubcktLine> {
        match self {
            SpiceLine::Subckt(line) => Some(line),
            _ => None,
        }
    }

    pub fn model(&self) -> Option<&ModelLine> {
        match self {
            SpiceLine::Model(line) => Some(line),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct SubcktLine<'a> {
    pub name: &'a str,
    pub ports: Vec<&'a str>,
    pub params: Vec<ParamAssign<'a>>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct ModelLine<'a> {
    pub name: &'a str,
    pub kind: &'a str,
    pub params: Vec<ParamAssign<'a>>,
}

/// A `name=value` pair, or a bare flag such as `LEVEL3` when `value` is `None`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct ParamAssign<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
}

impl<'a> ParamAssign<'a> {
    pub fn is_flag(&self) -> bool {
        self.value.is_none()
    }
}

fn is_newline(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn is_word_end(c: char) -> bool {
    matches!(c, '\n' | '\r' | ' ' | '\t' | '(' | ')' | ',' | '=' | ';')
}

fn within_line_space1(input: &str) -> IResult<&str, ()> {
    let (input, _) = space1(input)?;
    Ok((input, ()))
}

fn line_continuation1(input: &str) -> IResult<&str, ()> {
    let (input, _) = tuple((
        space0,
        opt(line_comment),
        line_ending,
        space0,
        char('+'),
        space0,
    ))(input)?;
    Ok((input, ()))
}

fn many_line_continuation1(input: &str) -> IResult<&str, ()> {
    let (input, _) = many1(line_continuation1)(input)?;
    Ok((input, ()))
}

fn spice_space1(input: &str) -> IResult<&str, ()> {
    let (input, _) = alt((many_line_continuation1, within_line_space1))(input)?;
    Ok((input, ()))
}

fn line_comment(input: &str) -> IResult<&str, ()> {
    let (input, _) = tuple((space0, char(';'), take_till(is_newline)))(input)?;
    Ok((input, ()))
}

/// Whitespace, continuations, comments and the punctuation that SPICE treats as blanks.
fn separator1(input: &str) -> IResult<&str, ()> {
    let (input, _) = many1(alt((
        spice_space1,
        line_comment,
        value((), one_of("(),")),
    )))(input)?;
    Ok((input, ()))
}

fn braced(input: &str) -> IResult<&str, &str> {
    recognize(tuple((char('{'), take_till(|c| c == '}'), char('}'))))(input)
}

fn quoted(input: &str) -> IResult<&str, &str> {
    recognize(tuple((char('\''), take_till(|c| c == '\''), char('\''))))(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    alt((braced, quoted, take_till1(is_word_end)))(input)
}

fn token(input: &str) -> IResult<&str, &str> {
    alt((tag("="), word))(input)
}

fn tokens(input: &str) -> IResult<&str, Vec<&str>> {
    let (input, _) = opt(separator1)(input)?;
    many0(terminated(token, opt(separator1)))(input)
}

/// One physical line plus any `+` continuation lines that follow it.
fn logical_line(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_till1(is_newline),
        many0(tuple((line_ending, space0, char('+'), take_till(is_newline)))),
    ))(input)
}

/// Splits tokens into positional words and `name = value` assignments.
fn assignments<'a>(tokens: &[&'a str]) -> Option<(Vec<&'a str>, Vec<ParamAssign<'a>>)> {
    let mut words = Vec::new();
    let mut params = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if tokens.get(i + 1) == Some(&"=") {
            let value = tokens.get(i + 2).copied().filter(|v| *v != "=")?;
            if tokens[i] == "=" {
                return None;
            }
            params.push(ParamAssign {
                name: tokens[i],
                value: Some(value),
            });
            i += 3;
        } else if tokens[i] == "=" {
            return None;
        } else {
            words.push(tokens[i]);
            i += 1;
        }
    }
    Some((words, params))
}

fn is_directive(token: &str, directive: &str) -> bool {
    token.eq_ignore_ascii_case(directive)
}

fn subckt_line<'a>(tokens: &[&'a str]) -> Option<SubcktLine<'a>> {
    let (words, params) = assignments(tokens.get(1..)?)?;
    let (name, rest) = words.split_first()?;
    let name = *name;
    let ports = rest
        .iter()
        .copied()
        .filter(|w| !w.eq_ignore_ascii_case("params:"))
        .collect();
    Some(SubcktLine {
        name,
        ports,
        params,
    })
}

fn model_line<'a>(tokens: &[&'a str]) -> Option<ModelLine<'a>> {
    let (words, mut params) = assignments(tokens.get(1..)?)?;
    let (name, rest) = words.split_first()?;
    let (kind, flags) = rest.split_first()?;
    params.extend(flags.iter().map(|flag| ParamAssign {
        name: *flag,
        value: None,
    }));
    Some(ModelLine {
        name: *name,
        kind: *kind,
        params,
    })
}

fn classify(line: &str) -> SpiceLine {
    if let Some(comment) = line.trim_start().strip_prefix('*') {
        return SpiceLine::Comment(comment.trim());
    }

    let tokens = match tokens(line) {
        Ok((rest, tokens)) if rest.is_empty() => tokens,
        _ => return SpiceLine::Other(line),
    };

    match tokens.first() {
        Some(first) if is_directive(first, ".subckt") => {
            subckt_line(&tokens).map_or(SpiceLine::Other(line), SpiceLine::Subckt)
        }
        Some(first) if is_directive(first, ".model") => {
            model_line(&tokens).map_or(SpiceLine::Other(line), SpiceLine::Model)
        }
        Some(first) if is_directive(first, ".ends") => SpiceLine::Ends(tokens.get(1).copied()),
        _ => SpiceLine::Other(line),
    }
}

fn spice_line(input: &str) -> IResult<&str, SpiceLine> {
    let (input, line) = logical_line(input)?;
    Ok((input, classify(line)))
}

pub(crate) fn parse_spice(input: &str) -> IResult<&str, Vec<SpiceLine>> {
    let (input, _) = multispace0(input)?;
    many0(terminated(spice_line, multispace0))(input)
}

/// Returns the directive name if `line` starts a `.model` or `.subckt` definition.
///
/// Used on lines that failed to parse as a definition.
pub(crate) fn malformed_directive(line: &str) -> Option<&'static str> {
    let first = line.split_whitespace().next()?;
    [".subckt", ".model"]
        .into_iter()
        .find(|directive| is_directive(first, directive))
}
