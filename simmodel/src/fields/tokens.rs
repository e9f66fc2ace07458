//! Tokenizers for the parameter and pin fields.

use nom::branch::alt;
use nom::bytes::complete::take_till1;
use nom::character::complete::{anychar, char, multispace0, multispace1, none_of};
use nom::combinator::{all_consuming, map};
use nom::multi::{fold_many0, separated_list0};
use nom::sequence::{delimited, preceded, separated_pair};
use nom::IResult;

/// One entry of a pin field.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum PinToken<'a> {
    /// `<model pin>=<symbol pin>`
    Assign(&'a str, &'a str),
    /// A symbol pin number in model pin order.
    Positional(&'a str),
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '='
}

fn name(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| is_separator(c) || c == '"')(input)
}

fn quoted(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        fold_many0(
            alt((preceded(char('\\'), anychar), none_of("\\\""))),
            String::new,
            |mut acc, c| {
                acc.push(c);
                acc
            },
        ),
        char('"'),
    )(input)
}

fn bare(input: &str) -> IResult<&str, String> {
    map(
        take_till1(|c: char| c.is_whitespace() || c == '"'),
        str::to_string,
    )(input)
}

fn param_value(input: &str) -> IResult<&str, String> {
    alt((quoted, bare))(input)
}

fn param(input: &str) -> IResult<&str, (&str, String)> {
    separated_pair(name, char('='), param_value)(input)
}

/// Splits `a=1 b="x y"` into name/value pairs.
pub(crate) fn params(input: &str) -> Option<Vec<(&str, String)>> {
    let parser = delimited(multispace0, separated_list0(multispace1, param), multispace0);
    all_consuming(parser)(input).ok().map(|(_, params)| params)
}

fn pin_token(input: &str) -> IResult<&str, PinToken> {
    alt((
        map(separated_pair(name, char('='), name), |(a, b)| {
            PinToken::Assign(a, b)
        }),
        map(name, PinToken::Positional),
    ))(input)
}

pub(crate) fn pins(input: &str) -> Option<Vec<PinToken>> {
    let parser = delimited(
        multispace0,
        separated_list0(multispace1, pin_token),
        multispace0,
    );
    all_consuming(parser)(input).ok().map(|(_, tokens)| tokens)
}

/// Quotes `value` if it would not survive [`params`] unquoted.
pub(crate) fn quote(value: &str) -> String {
    let needs_quotes =
        value.is_empty() || value.chars().any(|c| c.is_whitespace() || c == '"' || c == '\\');
    if !needs_quotes {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
